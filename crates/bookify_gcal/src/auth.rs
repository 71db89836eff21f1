// File: crates/bookify_gcal/src/auth.rs
use bookify_common::{config_error, BookifyError};
use google_calendar3::{
    hyper_rustls::{self, HttpsConnectorBuilder},
    hyper_util::client::legacy::connect::HttpConnector,
    hyper_util::client::legacy::Client,
    CalendarHub,
};

// Type aliases for clarity
pub type Connector = hyper_rustls::HttpsConnector<HttpConnector>;

pub type HubType = CalendarHub<Connector>;

/// TLS connector shared by every hub.
pub fn create_connector() -> Result<Connector, BookifyError> {
    let https = HttpsConnectorBuilder::new()
        .with_native_roots()
        .map_err(|err| config_error(format!("loading native TLS roots: {err}")))?
        .https_or_http()
        .enable_http1()
        .build();
    Ok(https)
}

/// A hub that authorizes every request with `access_token`.
///
/// Hubs are cheap; one is built per call so each uses the token that was
/// valid when the call started.
pub fn create_calendar_hub(connector: &Connector, access_token: &str) -> HubType {
    let client = Client::builder(hyper_util::rt::TokioExecutor::new()).build(connector.clone());
    CalendarHub::new(client, access_token.to_string())
}
