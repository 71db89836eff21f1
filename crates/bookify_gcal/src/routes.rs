// --- File: crates/bookify_gcal/src/routes.rs ---

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{
    auth_callback_handler, authorize_handler, book_slot_handler, get_slots_handler, GcalState,
};

/// Routes for listing and booking slots plus the OAuth consent flow.
pub fn routes(state: Arc<GcalState>) -> Router {
    Router::new()
        .route("/slots", get(get_slots_handler))
        .route("/book", post(book_slot_handler))
        .route("/authorize", get(authorize_handler))
        .route("/auth/callback", get(auth_callback_handler))
        // The redirect URI registered with Google
        .route("/auth/google/callback", get(auth_callback_handler))
        .with_state(state)
}
