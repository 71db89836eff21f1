// --- File: crates/bookify_common/src/lib.rs ---

// Shared building blocks for the Bookify crates.
pub mod error; // Error taxonomy and status mapping
pub mod features; // Runtime feature flags
pub mod http; // Response envelope and outbound client
pub mod logging; // tracing setup
pub mod models; // Domain types
pub mod services; // Calendar and notification traits

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use error::{
    config_error, external_service_error, internal_error, malformed_input, validation_error,
    BookifyError, Context, HttpStatusCode,
};

pub use http::client::{create_client, DEFAULT_TIMEOUT_SECS};

pub use logging::{init, init_with_level, log_error};

pub use features::{is_emailjs_enabled, is_feature_enabled, is_fulfillment_enabled};

pub use models::StatusResponse;
pub use services::{BoxFuture, CalendarService, NotificationService};
