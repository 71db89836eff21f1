// --- File: crates/bookify_common/src/http/client.rs ---
use std::time::Duration;

use reqwest::{redirect::Policy, Client};

/// Outbound timeout used when the config does not set one.
pub const DEFAULT_TIMEOUT_SECS: u64 = 20;

const USER_AGENT: &str = concat!("bookify/", env!("CARGO_PKG_VERSION"));

/// Builds the client used for every outbound call.
///
/// The whole request, connect through body, must finish within
/// `timeout_secs`. Token endpoints are called with `follow_redirects` off so a
/// redirect surfaces as an error instead of silently re-posting credentials.
pub fn create_client(timeout_secs: u64, follow_redirects: bool) -> Result<Client, reqwest::Error> {
    let timeout_secs = if timeout_secs == 0 {
        DEFAULT_TIMEOUT_SECS
    } else {
        timeout_secs
    };
    let redirects = match follow_redirects {
        true => Policy::limited(5),
        false => Policy::none(),
    };

    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(timeout_secs))
        .redirect(redirects)
        .build()
}
