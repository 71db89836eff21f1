// --- File: crates/bookify_gcal/src/service.rs ---
//! Google Calendar implementation of [`CalendarService`].

use std::future::Future;
use std::time::Duration;

use bookify_common::models::{NewCalendarEvent, SlotStart, UpcomingEvent};
use bookify_common::{external_service_error, BookifyError, BoxFuture, CalendarService};
use chrono::Utc;
use google_calendar3::api::{Event, EventAttendee, EventDateTime};
use tracing::{debug, warn};

use crate::auth::{create_calendar_hub, Connector};

const SERVICE_NAME: &str = "Google Calendar";

/// Google Calendar service implementation.
pub struct GoogleCalendarService {
    connector: Connector,
    calendar_id: String,
    timeout: Duration,
}

impl GoogleCalendarService {
    pub fn new(connector: Connector, calendar_id: impl Into<String>, timeout: Duration) -> Self {
        Self {
            connector,
            calendar_id: calendar_id.into(),
            timeout,
        }
    }
}

/// Runs a calendar call, failing with [`BookifyError::Timeout`] once `limit`
/// has passed.
async fn bounded<T, F>(limit: Duration, call: F) -> Result<T, BookifyError>
where
    F: Future<Output = Result<T, google_calendar3::Error>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result.map_err(|err| external_service_error(SERVICE_NAME, err)),
        Err(_) => Err(BookifyError::Timeout(format!(
            "{} did not answer within {}s",
            SERVICE_NAME,
            limit.as_secs()
        ))),
    }
}

impl CalendarService for GoogleCalendarService {
    fn list_upcoming(
        &self,
        access_token: &str,
        limit: usize,
    ) -> BoxFuture<'_, Vec<UpcomingEvent>, BookifyError> {
        let hub = create_calendar_hub(&self.connector, access_token);

        Box::pin(async move {
            let max_results = i32::try_from(limit).unwrap_or(i32::MAX);
            let request = hub
                .events()
                .list(&self.calendar_id)
                .time_min(Utc::now())
                .max_results(max_results)
                .single_events(true) // Expand recurring events
                .order_by("startTime");

            let (_response, events) = bounded(self.timeout, request.doit()).await?;
            let items = events.items.unwrap_or_default();
            debug!("Calendar returned {} upcoming events", items.len());

            Ok(items.into_iter().filter_map(upcoming_from_event).collect())
        })
    }

    fn create_event(
        &self,
        access_token: &str,
        event: NewCalendarEvent,
    ) -> BoxFuture<'_, String, BookifyError> {
        let hub = create_calendar_hub(&self.connector, access_token);

        Box::pin(async move {
            let request = hub
                .events()
                .insert(to_google_event(event), &self.calendar_id);

            let (_response, created) = bounded(self.timeout, request.doit()).await?;
            created
                .id
                .ok_or_else(|| external_service_error(SERVICE_NAME, "created event has no id"))
        })
    }
}

/// Timed events use `dateTime`; all-day events only carry `date`. Events with
/// neither are skipped.
pub fn upcoming_from_event(event: Event) -> Option<UpcomingEvent> {
    let start = event.start?;
    let slot = match (start.date_time, start.date) {
        (Some(date_time), _) => SlotStart::At(date_time),
        (None, Some(date)) => SlotStart::AllDay(date),
        (None, None) => {
            warn!("Skipping event {:?} without a start", event.id);
            return None;
        }
    };

    Some(UpcomingEvent {
        id: event.id.unwrap_or_default(),
        start: slot,
    })
}

pub fn to_google_event(event: NewCalendarEvent) -> Event {
    let attendees: Vec<EventAttendee> = event
        .attendees
        .into_iter()
        .map(|email| EventAttendee {
            email: Some(email),
            ..Default::default()
        })
        .collect();

    Event {
        summary: Some(event.summary),
        description: Some(event.description),
        start: Some(EventDateTime {
            date_time: Some(event.start),
            time_zone: Some("UTC".to_string()),
            ..Default::default()
        }),
        end: Some(EventDateTime {
            date_time: Some(event.end),
            time_zone: Some("UTC".to_string()),
            ..Default::default()
        }),
        attendees: Some(attendees),
        ..Default::default()
    }
}
