// --- File: crates/bookify_gcal/src/logic.rs ---
use bookify_common::models::{AppointmentRequest, BookingNotification, NewCalendarEvent};
use bookify_common::{
    malformed_input, validation_error, BookifyError, CalendarService, NotificationService,
};
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use tracing::{info, warn};

use crate::credentials::CredentialManager;

/// Every appointment lasts one hour.
pub const APPOINTMENT_DURATION_MINUTES: i64 = 60;

pub const MISSING_DETAILS_MESSAGE: &str =
    "Some details are missing. Please provide all required information.";

/// Details used when a direct booking leaves them out.
pub const WEBSITE_DETAILS_DEFAULT: &str = "Reserved via website";
/// Name used when the booking page sends none.
pub const DIRECT_CLIENT_NAME: &str = "Client";
/// Placeholder for any optional field the conversation did not fill.
pub const NOT_AVAILABLE: &str = "N/A";
/// Email reported to the notification template when the client gave none.
pub const NO_EMAIL: &str = "no-email@local";

pub fn appointment_duration() -> Duration {
    Duration::minutes(APPOINTMENT_DURATION_MINUTES)
}

// Offset-carrying layouts that RFC 3339 parsing rejects.
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
];

// Layouts without an offset; these are read as UTC.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parses an ISO 8601 datetime and converts it to UTC.
///
/// A `Z` suffix means `+00:00`. Input with an offset is converted; input
/// without one is taken as UTC. A bare date means midnight UTC.
pub fn normalize_to_utc(input: &str) -> Result<DateTime<Utc>, BookifyError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(malformed_input("empty datetime"));
    }

    let candidate = match trimmed.strip_suffix(['Z', 'z']) {
        Some(rest) => format!("{rest}+00:00"),
        None => trimmed.to_string(),
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(&candidate) {
        return Ok(dt.with_timezone(&Utc));
    }
    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(&candidate, format) {
            return Ok(dt.with_timezone(&Utc));
        }
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(&candidate, format) {
            return Ok(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(&candidate, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc());
        }
    }

    Err(malformed_input(format!("invalid ISO datetime '{trimmed}'")))
}

/// `Some` only for values that are not blank.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Builds a request from raw fields, enforcing the required ones.
///
/// The start and a non-blank name are required. Nothing is booked when
/// either is missing. The `/book` handler fills in [`DIRECT_CLIENT_NAME`]
/// before calling this, so there only the start can be missing.
pub fn validate_request(
    start: Option<&str>,
    name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    details: Option<String>,
) -> Result<AppointmentRequest, BookifyError> {
    let start = start.map(str::trim).filter(|s| !s.is_empty());
    let name = non_blank(name);

    let (Some(start), Some(name)) = (start, name) else {
        return Err(validation_error(MISSING_DETAILS_MESSAGE));
    };

    Ok(AppointmentRequest {
        start: normalize_to_utc(start)?,
        name,
        email: non_blank(email),
        phone: non_blank(phone),
        details: non_blank(details),
    })
}

pub fn build_calendar_event(request: &AppointmentRequest, default_details: &str) -> NewCalendarEvent {
    let details = request.details.as_deref().unwrap_or(default_details);
    let phone = request.phone.as_deref().unwrap_or(NOT_AVAILABLE);
    let email = request.email.as_deref().unwrap_or(NOT_AVAILABLE);

    NewCalendarEvent {
        summary: format!("Appointment with {}", request.name),
        description: format!("Details: {details}\nPhone: {phone}\nEmail: {email}"),
        start: request.start,
        end: request.start + appointment_duration(),
        attendees: request.email.iter().cloned().collect(),
    }
}

pub fn build_notification(request: &AppointmentRequest, default_details: &str) -> BookingNotification {
    BookingNotification {
        name: request.name.clone(),
        email: request.email.clone().unwrap_or_else(|| NO_EMAIL.to_string()),
        phone: request
            .phone
            .clone()
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        date: request.start.format("%Y-%m-%d").to_string(),
        time: request.start.format("%H:%M").to_string(),
        details: request
            .details
            .clone()
            .unwrap_or_else(|| default_details.to_string()),
    }
}

/// Result of a booking that reached the calendar.
#[derive(Debug, Clone)]
pub struct BookingOutcome {
    pub event_id: String,
    pub start: DateTime<Utc>,
    /// Whether the notification went out. Never affects success.
    pub notified: bool,
}

/// Books an already validated request.
///
/// Authenticates, creates the one-hour event, then attempts the notification.
/// Failures before the event exists abort the booking; a failed notification
/// is only logged.
pub async fn book_appointment(
    credentials: &CredentialManager,
    calendar: &dyn CalendarService,
    notifier: Option<&dyn NotificationService>,
    request: &AppointmentRequest,
    default_details: &str,
) -> Result<BookingOutcome, BookifyError> {
    let credential = credentials.ensure_valid_credential().await?;

    let event = build_calendar_event(request, default_details);
    let event_id = calendar
        .create_event(&credential.access_token, event)
        .await?;
    info!(
        "Booked {} for {} as event {}",
        request.start, request.name, event_id
    );

    let notified = match notifier {
        Some(notifier) => match notifier
            .notify(build_notification(request, default_details))
            .await
        {
            Ok(_) => true,
            Err(err) => {
                warn!("Booking notification failed for event {}: {}", event_id, err);
                false
            }
        },
        None => false,
    };

    Ok(BookingOutcome {
        event_id,
        start: request.start,
        notified,
    })
}
