// --- File: crates/bookify_common/src/models.rs ---

// Domain types passed between the handlers, the calendar adapter and the
// notification sender. None of them is persisted.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A booking request after parsing and time normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct AppointmentRequest {
    /// Start instant, always UTC
    pub start: DateTime<Utc>,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub details: Option<String>,
}

/// An event as submitted to the remote calendar.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCalendarEvent {
    pub summary: String,
    pub description: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Attendee email addresses
    pub attendees: Vec<String>,
}

/// Start of an upcoming event: timed, or all-day.
#[derive(Debug, Clone, PartialEq)]
pub enum SlotStart {
    At(DateTime<Utc>),
    AllDay(NaiveDate),
}

impl SlotStart {
    /// ISO 8601 rendering used by the `/slots` response.
    pub fn to_iso_string(&self) -> String {
        match self {
            SlotStart::At(dt) => dt.to_rfc3339(),
            SlotStart::AllDay(date) => date.format("%Y-%m-%d").to_string(),
        }
    }
}

/// One entry of the upcoming-events listing.
#[derive(Debug, Clone, PartialEq)]
pub struct UpcomingEvent {
    pub id: String,
    pub start: SlotStart,
}

/// Template parameters for the booking notification email.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingNotification {
    pub name: String,
    pub email: String,
    pub phone: String,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM`, UTC
    pub time: String,
    pub details: String,
}

/// Result of a successful notification send.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationResult {
    pub status: String,
}

/// `{status, message}` body used by liveness, the OAuth callback and errors.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    #[cfg_attr(feature = "openapi", schema(example = "success"))]
    pub status: String,
    pub message: String,
}

impl StatusResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            status: "ok".to_string(),
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: "success".to_string(),
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: message.into(),
        }
    }
}
