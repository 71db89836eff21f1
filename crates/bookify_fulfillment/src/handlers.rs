// --- File: crates/bookify_fulfillment/src/handlers.rs ---

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};
use bookify_common::log_error;
use bookify_config::AppConfig;
use bookify_gcal::logic::NOT_AVAILABLE;
use bookify_gcal::GcalState;
use tracing::{info, warn};

use crate::logic::{
    confirmation_text, extract_booking_request, failure_text, DialogflowRequest, WebhookResponse,
    FALLBACK_TEXT,
};

// --- State for Fulfillment Handlers ---
pub struct FulfillmentState {
    pub config: Arc<AppConfig>,
    pub gcal_state: Arc<GcalState>,
}

/// Dialogflow fulfillment webhook.
///
/// Always answers 200: Dialogflow only relays `fulfillmentText` from
/// successful responses.
pub async fn handle_webhook(
    State(state): State<Arc<FulfillmentState>>,
    payload: Result<Json<DialogflowRequest>, JsonRejection>,
) -> Json<WebhookResponse> {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            warn!("Unreadable webhook body: {}", rejection.body_text());
            return Json(WebhookResponse::text(FALLBACK_TEXT));
        }
    };

    let booking_intent = state.config.booking_intent();
    if request.intent_name() != Some(booking_intent.as_str()) {
        info!("Webhook intent {:?} not handled", request.intent_name());
        return Json(WebhookResponse::text(FALLBACK_TEXT));
    }

    let appointment = match extract_booking_request(&request.query_result.parameters) {
        Ok(appointment) => appointment,
        Err(err) => {
            info!("Webhook booking rejected: {}", err);
            return Json(WebhookResponse::text(failure_text(&err)));
        }
    };

    match state.gcal_state.book(&appointment, NOT_AVAILABLE).await {
        Ok(outcome) => Json(WebhookResponse::text(confirmation_text(
            &appointment,
            &outcome.event_id,
        ))),
        Err(err) => {
            log_error(&err, "Webhook booking");
            Json(WebhookResponse::text(failure_text(&err)))
        }
    }
}
