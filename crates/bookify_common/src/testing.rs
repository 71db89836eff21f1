// --- File: crates/bookify_common/src/testing.rs ---
//! In-memory doubles for [`CalendarService`] and [`NotificationService`].

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::error::{external_service_error, BookifyError};
use crate::models::{
    BookingNotification, NewCalendarEvent, NotificationResult, UpcomingEvent,
};
use crate::services::{BoxFuture, CalendarService, NotificationService};

/// Calendar double that records inserted events and the tokens it saw.
#[derive(Default)]
pub struct RecordingCalendar {
    upcoming: Vec<UpcomingEvent>,
    fail_with: Option<String>,
    created: Mutex<Vec<NewCalendarEvent>>,
    tokens: Mutex<Vec<String>>,
}

impl RecordingCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events returned by `list_upcoming`.
    pub fn with_upcoming(mut self, events: Vec<UpcomingEvent>) -> Self {
        self.upcoming = events;
        self
    }

    /// Makes every call fail as a remote calendar error.
    pub fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn created_events(&self) -> Vec<NewCalendarEvent> {
        self.created.lock().map(|e| e.clone()).unwrap_or_default()
    }

    pub fn seen_tokens(&self) -> Vec<String> {
        self.tokens.lock().map(|t| t.clone()).unwrap_or_default()
    }

    fn record_token(&self, token: &str) {
        if let Ok(mut tokens) = self.tokens.lock() {
            tokens.push(token.to_string());
        }
    }
}

impl CalendarService for RecordingCalendar {
    fn list_upcoming(
        &self,
        access_token: &str,
        limit: usize,
    ) -> BoxFuture<'_, Vec<UpcomingEvent>, BookifyError> {
        self.record_token(access_token);
        Box::pin(async move {
            if let Some(message) = &self.fail_with {
                return Err(external_service_error("Google Calendar", message));
            }
            Ok(self.upcoming.iter().take(limit).cloned().collect())
        })
    }

    fn create_event(
        &self,
        access_token: &str,
        event: NewCalendarEvent,
    ) -> BoxFuture<'_, String, BookifyError> {
        self.record_token(access_token);
        Box::pin(async move {
            if let Some(message) = &self.fail_with {
                return Err(external_service_error("Google Calendar", message));
            }
            let mut created = self
                .created
                .lock()
                .map_err(|_| BookifyError::InternalError("poisoned".into()))?;
            created.push(event);
            Ok(format!("evt-{}", created.len()))
        })
    }
}

/// Notifier double that counts calls and optionally fails.
#[derive(Default)]
pub struct StubNotifier {
    fail: bool,
    calls: AtomicUsize,
    sent: Mutex<Vec<BookingNotification>>,
}

impl StubNotifier {
    pub fn succeeding() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn sent(&self) -> Vec<BookingNotification> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

impl NotificationService for StubNotifier {
    fn notify(
        &self,
        notification: BookingNotification,
    ) -> BoxFuture<'_, NotificationResult, BookifyError> {
        Box::pin(async move {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(external_service_error("EmailJS", "status 500"));
            }
            if let Ok(mut sent) = self.sent.lock() {
                sent.push(notification);
            }
            Ok(NotificationResult {
                status: "sent".to_string(),
            })
        })
    }
}
