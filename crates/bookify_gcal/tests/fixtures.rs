//! Test fixtures for the Google Calendar crate.
#![allow(dead_code)]

use std::sync::Arc;

use bookify_common::{BookifyError, BoxFuture, CalendarService, NotificationService};
use bookify_config::{AppConfig, GcalConfig, HttpConfig, ServerConfig};
use bookify_gcal::{
    Credential, CredentialManager, CredentialStore, GcalState, InMemoryCredentialStore,
    TokenEndpoint,
};
use chrono::{Duration, Utc};

/// Token endpoint that hands out fixed credentials.
pub struct StaticTokenEndpoint;

impl TokenEndpoint for StaticTokenEndpoint {
    fn exchange_code<'a>(&'a self, code: &'a str) -> BoxFuture<'a, Credential, BookifyError> {
        Box::pin(async move {
            if code == "bad-code" {
                return Err(BookifyError::AuthenticationError("invalid_grant".into()));
            }
            Ok(valid_credential())
        })
    }

    fn refresh<'a>(&'a self, _credential: &'a Credential) -> BoxFuture<'a, Credential, BookifyError> {
        Box::pin(async { Ok(valid_credential()) })
    }

    fn authorization_url(&self) -> Result<String, BookifyError> {
        Ok("https://accounts.google.com/o/oauth2/auth?client_id=test&access_type=offline".into())
    }
}

pub fn valid_credential() -> Credential {
    Credential {
        access_token: "ya29.test".into(),
        refresh_token: Some("1//refresh".into()),
        token_uri: "https://oauth2.googleapis.com/token".into(),
        client_id: "test".into(),
        client_secret: "secret".into(),
        scopes: vec![bookify_config::CALENDAR_SCOPE.into()],
        expiry: Some(Utc::now() + Duration::hours(1)),
    }
}

pub fn create_mock_config() -> Arc<AppConfig> {
    Arc::new(AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".into(),
            port: 8080,
        },
        gcal: GcalConfig {
            client_secrets_path: "credentials.json".into(),
            redirect_uri: "http://localhost:8080/auth/google/callback".into(),
            token_path: "token.json".into(),
            calendar_id: "primary".into(),
            scopes: vec![bookify_config::CALENDAR_SCOPE.into()],
            slots_limit: 10,
            refresh_skew_seconds: 225,
        },
        use_emailjs: false,
        use_fulfillment: false,
        http: HttpConfig::default(),
        emailjs: None,
        fulfillment: None,
    })
}

pub fn authorized_store() -> Arc<dyn CredentialStore> {
    Arc::new(InMemoryCredentialStore::with_credential(valid_credential()))
}

pub fn empty_store() -> Arc<dyn CredentialStore> {
    Arc::new(InMemoryCredentialStore::new())
}

pub fn create_state(
    store: Arc<dyn CredentialStore>,
    calendar: Arc<dyn CalendarService>,
    notifier: Option<Arc<dyn NotificationService>>,
) -> Arc<GcalState> {
    let credentials = CredentialManager::new(
        store,
        Arc::new(StaticTokenEndpoint),
        Duration::seconds(225),
    );
    Arc::new(GcalState {
        config: create_mock_config(),
        credentials: Arc::new(credentials),
        calendar,
        notifier,
    })
}
