// --- File: crates/services/bookify_backend/src/service_factory.rs ---
//! Builds the services from configuration.
//!
//! Handlers only ever see the traits from `bookify_common::services`; this is
//! the one place that picks the concrete implementations.
use std::sync::Arc;
use std::time::Duration as StdDuration;

use bookify_common::{is_emailjs_enabled, BookifyError, CalendarService, NotificationService};
use bookify_config::AppConfig;
use bookify_emailjs::EmailJsNotificationService;
use bookify_gcal::{
    auth::create_connector, CredentialManager, CredentialStore, FileCredentialStore, GcalState,
    GoogleCalendarService, GoogleOAuthClient, OAuthClientSettings,
};
use chrono::Duration;
use tracing::info;

/// Every service the routers need, already wired together.
pub struct BookifyServiceFactory {
    config: Arc<AppConfig>,
    credentials: Arc<CredentialManager>,
    calendar: Arc<dyn CalendarService>,
    notifier: Option<Arc<dyn NotificationService>>,
}

impl BookifyServiceFactory {
    /// Builds the production services: token file store, Google OAuth client,
    /// Google Calendar, and EmailJS when enabled.
    pub async fn new(config: Arc<AppConfig>) -> Result<Self, BookifyError> {
        let timeout_secs = config.http.timeout_secs;

        info!("ℹ️ Initializing Google Calendar service...");
        let settings = OAuthClientSettings::load(&config.gcal).await?;
        let endpoint = Arc::new(GoogleOAuthClient::new(settings, timeout_secs)?);
        let store: Arc<dyn CredentialStore> =
            Arc::new(FileCredentialStore::new(&config.gcal.token_path));
        let calendar = Arc::new(GoogleCalendarService::new(
            create_connector()?,
            config.gcal.calendar_id.clone(),
            StdDuration::from_secs(timeout_secs),
        ));

        let notifier: Option<Arc<dyn NotificationService>> = match config.emailjs.as_ref() {
            Some(emailjs) if is_emailjs_enabled(&config) => {
                info!("ℹ️ Initializing EmailJS notifications...");
                Some(Arc::new(EmailJsNotificationService::new(
                    emailjs.clone(),
                    timeout_secs,
                )?))
            }
            _ => {
                info!("EmailJS notifications disabled");
                None
            }
        };

        let credentials = Arc::new(CredentialManager::new(
            store,
            endpoint,
            Duration::seconds(config.gcal.refresh_skew_seconds),
        ));

        Ok(Self::from_parts(config, credentials, calendar, notifier))
    }

    /// Wires pre-built services; used by tests to inject doubles.
    pub fn from_parts(
        config: Arc<AppConfig>,
        credentials: Arc<CredentialManager>,
        calendar: Arc<dyn CalendarService>,
        notifier: Option<Arc<dyn NotificationService>>,
    ) -> Self {
        Self {
            config,
            credentials,
            calendar,
            notifier,
        }
    }

    pub fn config(&self) -> Arc<AppConfig> {
        self.config.clone()
    }

    pub fn gcal_state(&self) -> Arc<GcalState> {
        Arc::new(GcalState {
            config: self.config.clone(),
            credentials: self.credentials.clone(),
            calendar: self.calendar.clone(),
            notifier: self.notifier.clone(),
        })
    }
}
