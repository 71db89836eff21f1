// --- File: crates/bookify_fulfillment/src/lib.rs ---

pub mod handlers; // Axum handler for the webhook
pub mod logic; // Payload types and parameter extraction
pub mod routes;
#[cfg(feature = "openapi")]
pub mod doc;

pub use handlers::FulfillmentState;
pub use routes::routes;
