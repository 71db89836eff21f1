// File: crates/bookify_gcal/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    response::{Json, Redirect},
};
use bookify_common::{
    log_error, malformed_input, BookifyError, CalendarService, NotificationService, StatusResponse,
};
use bookify_config::AppConfig;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::credentials::CredentialManager;
use crate::logic::{self, BookingOutcome};
use bookify_common::models::AppointmentRequest;

// Define shared state needed by GCal handlers
pub struct GcalState {
    pub config: Arc<AppConfig>,
    pub credentials: Arc<CredentialManager>,
    pub calendar: Arc<dyn CalendarService>,
    /// `None` when notifications are switched off.
    pub notifier: Option<Arc<dyn NotificationService>>,
}

impl GcalState {
    /// Books a validated request with this state's services.
    pub async fn book(
        &self,
        request: &AppointmentRequest,
        default_details: &str,
    ) -> Result<BookingOutcome, BookifyError> {
        logic::book_appointment(
            &self.credentials,
            self.calendar.as_ref(),
            self.notifier.as_deref(),
            request,
            default_details,
        )
        .await
    }
}

#[derive(Serialize, Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SlotsResponse {
    #[cfg_attr(feature = "openapi", schema(example = "success"))]
    pub status: String,
    /// Start of each upcoming event, ISO 8601
    #[cfg_attr(feature = "openapi", schema(example = json!(["2025-11-01T09:00:00+00:00", "2025-11-02"])))]
    pub slots: Vec<String>,
}

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct BookRequest {
    /// ISO 8601 start, `Z` or offset allowed
    #[cfg_attr(feature = "openapi", schema(example = "2025-11-01T09:00:00Z"))]
    pub slot: Option<String>,
    /// Defaults to "Client" when blank
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub details: Option<String>,
}

#[derive(Serialize, Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct BookingResponse {
    pub status: String,
    pub message: String,
    #[serde(rename = "eventId")]
    pub event_id: String,
}

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
pub struct CallbackQuery {
    pub code: Option<String>,
    /// Set by Google when the operator declines consent
    pub error: Option<String>,
}

/// Lists the start of each upcoming calendar event.
pub async fn get_slots_handler(
    State(state): State<Arc<GcalState>>,
) -> Result<Json<SlotsResponse>, BookifyError> {
    let credential = state.credentials.ensure_valid_credential().await.map_err(|err| {
        log_error(&err, "Listing slots");
        err
    })?;

    let events = state
        .calendar
        .list_upcoming(&credential.access_token, state.config.gcal.slots_limit)
        .await
        .map_err(|err| {
            log_error(&err, "Listing slots");
            err
        })?;

    Ok(Json(SlotsResponse {
        status: "success".to_string(),
        slots: events.iter().map(|e| e.start.to_iso_string()).collect(),
    }))
}

/// Books a one-hour appointment at `slot`.
pub async fn book_slot_handler(
    State(state): State<Arc<GcalState>>,
    payload: Result<Json<BookRequest>, JsonRejection>,
) -> Result<Json<BookingResponse>, BookifyError> {
    let Json(payload) = payload.map_err(|rejection| malformed_input(rejection.body_text()))?;

    let name = logic::non_blank(payload.name)
        .unwrap_or_else(|| logic::DIRECT_CLIENT_NAME.to_string());
    let request = logic::validate_request(
        payload.slot.as_deref(),
        Some(name),
        payload.email,
        payload.phone,
        payload.details,
    )?;

    let outcome = state
        .book(&request, logic::WEBSITE_DETAILS_DEFAULT)
        .await
        .map_err(|err| {
            log_error(&err, "Booking slot");
            err
        })?;

    Ok(Json(BookingResponse {
        status: "success".to_string(),
        message: format!(
            "✅ Slot booked for {}",
            payload.slot.as_deref().unwrap_or_default().trim()
        ),
        event_id: outcome.event_id,
    }))
}

/// Redirects the operator to Google's consent screen.
pub async fn authorize_handler(
    State(state): State<Arc<GcalState>>,
) -> Result<Redirect, BookifyError> {
    let url = state.credentials.authorization_url()?;
    Ok(Redirect::temporary(&url))
}

/// Receives the authorization code and stores the credential.
pub async fn auth_callback_handler(
    State(state): State<Arc<GcalState>>,
    Query(query): Query<CallbackQuery>,
) -> Result<Json<StatusResponse>, BookifyError> {
    if let Some(error) = query.error {
        return Err(BookifyError::AuthenticationError(format!(
            "consent was not granted: {error}"
        )));
    }
    let code = logic::non_blank(query.code)
        .ok_or_else(|| bookify_common::validation_error("missing authorization code"))?;

    state
        .credentials
        .authorize_with_code(&code)
        .await
        .map_err(|err| {
            log_error(&err, "OAuth callback");
            err
        })?;

    info!("OAuth callback stored a new credential");
    Ok(Json(StatusResponse::success(
        "Google Calendar authorized successfully!",
    )))
}
