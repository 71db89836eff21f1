//! Booking notifications sent through EmailJS.
//!
//! The sender is best-effort: callers log its failures and carry on.
pub mod models;
/// The [`bookify_common::NotificationService`] implementation.
pub mod service;

pub use service::EmailJsNotificationService;
