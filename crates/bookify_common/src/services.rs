// --- File: crates/bookify_common/src/services.rs ---
//! Service abstractions for the remote APIs.
//!
//! Handlers only see these traits, so tests can swap in the doubles from
//! [`crate::testing`].

use std::future::Future;
use std::pin::Pin;

use crate::error::BookifyError;
use crate::models::{BookingNotification, NewCalendarEvent, NotificationResult, UpcomingEvent};

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// Calendar operations, called with an already validated access token.
///
/// No overlap check is made before inserting; double-booking is possible.
pub trait CalendarService: Send + Sync {
    /// Upcoming single event instances starting at or after now, ascending
    /// by start time, at most `limit` of them.
    fn list_upcoming(
        &self,
        access_token: &str,
        limit: usize,
    ) -> BoxFuture<'_, Vec<UpcomingEvent>, BookifyError>;

    /// Insert an event and return its id.
    fn create_event(
        &self,
        access_token: &str,
        event: NewCalendarEvent,
    ) -> BoxFuture<'_, String, BookifyError>;
}

/// Best-effort notification of a new booking.
pub trait NotificationService: Send + Sync {
    /// Send the booking notification.
    fn notify(
        &self,
        notification: BookingNotification,
    ) -> BoxFuture<'_, NotificationResult, BookifyError>;
}
