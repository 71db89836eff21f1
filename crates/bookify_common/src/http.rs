// --- File: crates/bookify_common/src/http.rs ---
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::error::{BookifyError, HttpStatusCode};
use crate::models::StatusResponse;

// Include the client module
pub mod client;

/// Errors answer with the `{"status": "error", "message"}` envelope and the
/// mapped status code.
impl IntoResponse for BookifyError {
    fn into_response(self) -> Response {
        let status_code =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // Same envelope the frontend reads for successes: it only looks at `status`.
        let body = Json(StatusResponse::error(self.to_string()));

        (status_code, body).into_response()
    }
}
