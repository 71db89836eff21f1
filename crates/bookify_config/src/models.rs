// --- File: crates/bookify_config/src/models.rs ---

use serde::{Deserialize, Serialize};

pub const CALENDAR_SCOPE: &str = "https://www.googleapis.com/auth/calendar";
pub const EMAILJS_SEND_ENDPOINT: &str = "https://api.emailjs.com/api/v1.0/email/send";

// --- General Server Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

// --- Outbound HTTP Config ---
// One timeout for every outbound call: token endpoint, calendar API, EmailJS.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct HttpConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

// --- Google Calendar Config ---
// The OAuth client secret itself stays in the client-secrets file.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GcalConfig {
    pub client_secrets_path: String, // Mandatory, Google "web" client JSON
    pub redirect_uri: String,        // Mandatory, must match the consent screen setup
    #[serde(default = "default_token_path")]
    pub token_path: String,
    #[serde(default = "default_calendar_id")]
    pub calendar_id: String,
    #[serde(default = "default_scopes")]
    pub scopes: Vec<String>,
    /// Number of upcoming events listed by `/slots`.
    #[serde(default = "default_slots_limit")]
    pub slots_limit: usize,
    /// A credential counts as expired this many seconds before its expiry.
    #[serde(default = "default_refresh_skew_seconds")]
    pub refresh_skew_seconds: i64,
}

// --- EmailJS Config ---
// public_key is usually "secret_from_env" in the config file.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct EmailJsConfig {
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
    #[serde(default = "default_emailjs_endpoint")]
    pub endpoint: String,
}

// --- Conversational webhook Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct FulfillmentConfig {
    #[serde(default = "default_booking_intent")]
    pub booking_intent: String,
}

impl Default for FulfillmentConfig {
    fn default() -> Self {
        Self {
            booking_intent: default_booking_intent(),
        }
    }
}

// --- Unified App Configuration ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    // Server and calendar config are mandatory
    pub server: ServerConfig,
    pub gcal: GcalConfig,

    // --- Runtime Flags (optional in config file, default to false) ---
    #[serde(default)]
    pub use_emailjs: bool,
    #[serde(default)]
    pub use_fulfillment: bool,

    // --- Optional Sections ---
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub emailjs: Option<EmailJsConfig>,
    #[serde(default)]
    pub fulfillment: Option<FulfillmentConfig>,
}

impl AppConfig {
    /// Intent name that triggers a booking, falling back to the default.
    pub fn booking_intent(&self) -> String {
        self.fulfillment
            .as_ref()
            .map(|f| f.booking_intent.clone())
            .unwrap_or_else(default_booking_intent)
    }
}

fn default_timeout_secs() -> u64 {
    20
}

fn default_token_path() -> String {
    "token.json".to_string()
}

fn default_calendar_id() -> String {
    "primary".to_string()
}

fn default_scopes() -> Vec<String> {
    vec![CALENDAR_SCOPE.to_string()]
}

fn default_slots_limit() -> usize {
    10
}

fn default_refresh_skew_seconds() -> i64 {
    225
}

fn default_emailjs_endpoint() -> String {
    EMAILJS_SEND_ENDPOINT.to_string()
}

fn default_booking_intent() -> String {
    "Book Appointment".to_string()
}
