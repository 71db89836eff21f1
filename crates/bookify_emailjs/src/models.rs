// --- File: crates/bookify_emailjs/src/models.rs ---
use bookify_common::models::BookingNotification;
use serde::Serialize;

/// Body of `POST /api/v1.0/email/send`.
#[derive(Serialize, Debug)]
pub struct EmailJsPayload<'a> {
    pub service_id: &'a str,
    pub template_id: &'a str,
    /// The v1.0 API calls the public key `user_id`.
    pub user_id: &'a str,
    pub template_params: &'a BookingNotification,
}
