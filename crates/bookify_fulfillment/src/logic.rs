// --- File: crates/bookify_fulfillment/src/logic.rs ---
//! Dialogflow ES webhook payloads and the booking parameter extraction.

use bookify_common::models::AppointmentRequest;
use bookify_common::BookifyError;
use bookify_gcal::logic::{validate_request, MISSING_DETAILS_MESSAGE, NOT_AVAILABLE};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const FALLBACK_TEXT: &str = "I didn't understand that. Can you please rephrase?";

// --- Request Structures ---
#[derive(Deserialize, Debug, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct DialogflowRequest {
    #[serde(default)]
    pub query_result: QueryResult,
}

#[derive(Deserialize, Debug, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    #[serde(default)]
    pub intent: Option<Intent>,
    /// Raw intent parameters, read with [`BookingParameters::from_value`]
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(value_type = Object))]
    pub parameters: Value,
}

#[derive(Deserialize, Debug, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Intent {
    #[serde(default)]
    pub display_name: Option<String>,
}

impl DialogflowRequest {
    pub fn intent_name(&self) -> Option<&str> {
        self.query_result
            .intent
            .as_ref()
            .and_then(|intent| intent.display_name.as_deref())
    }
}

// --- Response Structures ---
#[derive(Serialize, Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct WebhookResponse {
    pub fulfillment_text: String,
}

impl WebhookResponse {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            fulfillment_text: text.into(),
        }
    }
}

// --- Parameter Variants ---

/// `person` is either a bare string or a `{ "name": ... }` object.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum PersonParam {
    Plain(String),
    Named { name: Option<String> },
    Other(Value),
}

impl PersonParam {
    pub fn name(&self) -> Option<String> {
        match self {
            PersonParam::Plain(name) => Some(name.clone()),
            PersonParam::Named { name } => name.clone(),
            PersonParam::Other(_) => None,
        }
    }
}

/// A Dialogflow date or time: a string, a `date_time` object, or a period
/// whose start is used.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum DateTimeParam {
    Plain(String),
    DateTime { date_time: String },
    Period {
        #[serde(rename = "startDateTime")]
        start_date_time: String,
    },
    Other(Value),
}

impl DateTimeParam {
    pub fn as_str(&self) -> Option<&str> {
        let raw = match self {
            DateTimeParam::Plain(s) => s.as_str(),
            DateTimeParam::DateTime { date_time } => date_time.as_str(),
            DateTimeParam::Period { start_date_time } => start_date_time.as_str(),
            DateTimeParam::Other(_) => return None,
        };
        let raw = raw.trim();
        (!raw.is_empty()).then_some(raw)
    }
}

/// Free-text parameters sometimes arrive as lists.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum TextParam {
    Text(String),
    List(Vec<String>),
    Other(Value),
}

impl TextParam {
    pub fn text(&self) -> Option<String> {
        match self {
            TextParam::Text(s) => Some(s.clone()),
            TextParam::List(items) => items.iter().find(|s| !s.trim().is_empty()).cloned(),
            TextParam::Other(_) => None,
        }
    }
}

/// The booking intent's parameters.
#[derive(Deserialize, Debug, Default)]
pub struct BookingParameters {
    #[serde(default)]
    pub date: Option<DateTimeParam>,
    #[serde(default)]
    pub time: Option<DateTimeParam>,
    #[serde(default)]
    pub person: Option<PersonParam>,
    #[serde(default)]
    pub email: Option<TextParam>,
    #[serde(default, rename = "phone-number")]
    pub phone: Option<TextParam>,
    /// Free-form details
    #[serde(default)]
    pub any: Option<TextParam>,
}

impl BookingParameters {
    /// Reads the parameters object; anything that is not an object counts as
    /// no parameters at all.
    pub fn from_value(value: &Value) -> Self {
        serde_json::from_value(value.clone()).unwrap_or_default()
    }

    pub fn name(&self) -> Option<String> {
        self.person.as_ref().and_then(PersonParam::name)
    }

    /// The start as a single datetime string.
    ///
    /// With a `date`, its calendar day is joined to the time of day (and
    /// offset) of `time`. Without one, `time` is already a full datetime.
    pub fn start(&self) -> Option<String> {
        let time = self.time.as_ref().and_then(DateTimeParam::as_str)?;
        match self.date.as_ref().and_then(DateTimeParam::as_str) {
            Some(date) => Some(combine_date_and_time(date, time)),
            None => Some(time.to_string()),
        }
    }
}

pub fn combine_date_and_time(date: &str, time: &str) -> String {
    let day = date.split_once('T').map_or(date, |(day, _)| day);
    let time_of_day = time.split_once('T').map_or(time, |(_, rest)| rest);
    format!("{day}T{time_of_day}")
}

/// Turns the intent parameters into a validated request.
pub fn extract_booking_request(parameters: &Value) -> Result<AppointmentRequest, BookifyError> {
    let params = BookingParameters::from_value(parameters);
    let start = params.start();

    validate_request(
        start.as_deref(),
        params.name(),
        params.email.as_ref().and_then(TextParam::text),
        params.phone.as_ref().and_then(TextParam::text),
        params.any.as_ref().and_then(TextParam::text),
    )
}

pub fn confirmation_text(request: &AppointmentRequest, event_id: &str) -> String {
    let or_na = |value: &Option<String>| value.clone().unwrap_or_else(|| NOT_AVAILABLE.to_string());
    format!(
        "✅ Appointment booked successfully!\n\n\
         📅 Date: {}\n\
         ⏰ Time: {} (UTC)\n\
         👤 Name: {}\n\
         📧 Email: {}\n\
         📞 Phone: {}\n\
         📝 Details: {}\n\
         🆔 Event ID: {}",
        request.start.format("%Y-%m-%d"),
        request.start.format("%H:%M"),
        request.name,
        or_na(&request.email),
        or_na(&request.phone),
        or_na(&request.details),
        event_id
    )
}

/// Text shown to the user when a booking could not be made.
pub fn failure_text(error: &BookifyError) -> String {
    match error {
        BookifyError::ValidationError(_) => format!("❌ {MISSING_DETAILS_MESSAGE}"),
        other => format!("⚠️ An error occurred: {other}"),
    }
}
