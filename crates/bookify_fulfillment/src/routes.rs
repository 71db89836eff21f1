// --- File: crates/bookify_fulfillment/src/routes.rs ---

use std::sync::Arc;

use axum::{routing::post, Router};
use bookify_common::is_fulfillment_enabled;
use bookify_config::AppConfig;
use bookify_gcal::GcalState;
use tracing::info;

use crate::handlers::{handle_webhook, FulfillmentState};

/// Router for the conversational webhook. Empty unless `use_fulfillment` is
/// set.
pub fn routes(config: Arc<AppConfig>, gcal_state: Arc<GcalState>) -> Router {
    if !is_fulfillment_enabled(&config) {
        info!("Fulfillment: webhook disabled by config.");
        return Router::new();
    }

    info!(
        "💡 Fulfillment: Adding /webhook route for intent '{}'.",
        config.booking_intent()
    );
    let state = Arc::new(FulfillmentState { config, gcal_state });

    Router::new()
        .route("/webhook", post(handle_webhook))
        .with_state(state)
}
