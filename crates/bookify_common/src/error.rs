// --- File: crates/bookify_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// The error type shared by every Bookify crate.
///
/// Handlers never let one of these escape as a panic or a bare 500: each
/// variant maps to a status code and a user-facing message.
#[derive(Error, Debug)]
pub enum BookifyError {
    /// No usable credential; the operator has to visit the authorization endpoint
    #[error("{0}")]
    AuthenticationRequired(String),

    /// Token refresh or code exchange was rejected
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// The calendar or email API answered with a non-success response
    #[error("{service_name} error: {message}")]
    RemoteServiceError {
        service_name: String,
        message: String,
    },

    /// Required booking fields are missing
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// A time string could not be parsed
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// An outbound call exceeded the configured timeout
    #[error("Timeout: {0}")]
    Timeout(String),

    /// Missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Anything unexpected
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// A trait for converting errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for BookifyError {
    fn status_code(&self) -> u16 {
        match self {
            BookifyError::AuthenticationRequired(_) => 401,
            BookifyError::AuthenticationError(_) => 401,
            BookifyError::RemoteServiceError { .. } => 502,
            BookifyError::ValidationError(_) => 400,
            BookifyError::MalformedInput(_) => 400,
            BookifyError::Timeout(_) => 504,
            BookifyError::ConfigError(_) => 500,
            BookifyError::InternalError(_) => 500,
        }
    }
}

/// Attaches what was being done to a low-level error.
pub trait Context<T, E> {
    /// Adds context to an error.
    fn context<C>(self, context: C) -> Result<T, BookifyError>
    where
        C: fmt::Display + Send + Sync + 'static;
}

impl<T, E: std::error::Error + Send + Sync + 'static> Context<T, E> for Result<T, E> {
    fn context<C>(self, context: C) -> Result<T, BookifyError>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|error| BookifyError::InternalError(format!("{}: {}", context, error)))
    }
}

// Common error conversions
impl From<reqwest::Error> for BookifyError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            BookifyError::Timeout(err.to_string())
        } else {
            external_service_error("HTTP", err)
        }
    }
}

impl From<serde_json::Error> for BookifyError {
    fn from(err: serde_json::Error) -> Self {
        BookifyError::InternalError(format!("JSON error: {}", err))
    }
}

impl From<std::io::Error> for BookifyError {
    fn from(err: std::io::Error) -> Self {
        BookifyError::InternalError(err.to_string())
    }
}

// Utility functions for error handling
pub fn config_error<T: fmt::Display>(message: T) -> BookifyError {
    BookifyError::ConfigError(message.to_string())
}

pub fn validation_error<T: fmt::Display>(message: T) -> BookifyError {
    BookifyError::ValidationError(message.to_string())
}

pub fn malformed_input<T: fmt::Display>(message: T) -> BookifyError {
    BookifyError::MalformedInput(message.to_string())
}

pub fn external_service_error<T: fmt::Display>(service_name: &str, message: T) -> BookifyError {
    BookifyError::RemoteServiceError {
        service_name: service_name.to_string(),
        message: message.to_string(),
    }
}

pub fn internal_error<T: fmt::Display>(message: T) -> BookifyError {
    BookifyError::InternalError(message.to_string())
}
