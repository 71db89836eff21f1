use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use bookify_common::models::{SlotStart, UpcomingEvent};
use bookify_common::testing::{RecordingCalendar, StubNotifier};
use bookify_gcal::routes::routes;
use chrono::{NaiveDate, TimeZone, Utc};
use serde_json::{json, Value};
use tower::ServiceExt;

mod fixtures;
use fixtures::{authorized_store, create_state, empty_store};

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

fn book_request(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/book")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_book_creates_one_hour_event() {
    let calendar = Arc::new(RecordingCalendar::new());
    let app = routes(create_state(authorized_store(), calendar.clone(), None));

    let (status, body) = send(
        app,
        book_request(json!({"slot": "2025-11-01T09:00:00Z", "name": "Ada"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "✅ Slot booked for 2025-11-01T09:00:00Z");
    assert!(!body["eventId"].as_str().unwrap().is_empty());

    let created = calendar.created_events();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].start, Utc.with_ymd_and_hms(2025, 11, 1, 9, 0, 0).unwrap());
    assert_eq!(created[0].end, Utc.with_ymd_and_hms(2025, 11, 1, 10, 0, 0).unwrap());
}

#[tokio::test]
async fn test_book_converts_offset_to_utc_and_adds_attendee() {
    let calendar = Arc::new(RecordingCalendar::new());
    let app = routes(create_state(authorized_store(), calendar.clone(), None));

    let (status, _) = send(
        app,
        book_request(json!({
            "slot": "2025-10-10T14:45:00+01:00",
            "name": "Grace",
            "email": "grace@example.com",
            "phone": "+1 555 0100",
            "details": "Intro call"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let created = calendar.created_events();
    assert_eq!(created[0].start, Utc.with_ymd_and_hms(2025, 10, 10, 13, 45, 0).unwrap());
    assert_eq!(created[0].attendees, vec!["grace@example.com".to_string()]);
    assert_eq!(
        created[0].description,
        "Details: Intro call\nPhone: +1 555 0100\nEmail: grace@example.com"
    );
}

#[tokio::test]
async fn test_book_from_page_without_name_books_for_client() {
    let calendar = Arc::new(RecordingCalendar::new());
    let app = routes(create_state(authorized_store(), calendar.clone(), None));

    // The booking page sends every field, blank when the visitor left it empty.
    let (status, body) = send(
        app,
        book_request(json!({
            "slot": "2025-11-01T09:00:00Z",
            "name": "",
            "email": "",
            "phone": "",
            "details": ""
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    let created = calendar.created_events();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].summary, "Appointment with Client");
    assert!(created[0].attendees.is_empty());
    assert_eq!(
        created[0].description,
        "Details: Reserved via website\nPhone: N/A\nEmail: N/A"
    );
}

#[tokio::test]
async fn test_book_with_slot_only_books_for_client() {
    let calendar = Arc::new(RecordingCalendar::new());
    let app = routes(create_state(authorized_store(), calendar.clone(), None));

    let (status, _) = send(app, book_request(json!({"slot": "2025-11-01T09:00:00Z"}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(calendar.created_events()[0].summary, "Appointment with Client");
}

#[tokio::test]
async fn test_book_without_slot_reports_missing_details() {
    for body in [json!({"name": "Ada"}), json!({"slot": null, "name": "Ada"}), json!({"slot": "  "})] {
        let calendar = Arc::new(RecordingCalendar::new());
        let app = routes(create_state(authorized_store(), calendar.clone(), None));

        let (status, response) = send(app, book_request(body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response["status"], "error");
        assert_eq!(
            response["message"],
            "Validation error: Some details are missing. Please provide all required information."
        );
        assert!(calendar.created_events().is_empty());
    }
}

#[tokio::test]
async fn test_book_with_unparseable_slot_is_bad_request() {
    let calendar = Arc::new(RecordingCalendar::new());
    let app = routes(create_state(authorized_store(), calendar.clone(), None));

    let (status, body) = send(app, book_request(json!({"slot": "next tuesday", "name": "Ada"}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().starts_with("Malformed input"));
    assert!(calendar.created_events().is_empty());
}

#[tokio::test]
async fn test_book_with_invalid_json_uses_error_envelope() {
    let app = routes(create_state(authorized_store(), Arc::new(RecordingCalendar::new()), None));

    let request = Request::builder()
        .method("POST")
        .uri("/book")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");
}

#[tokio::test]
async fn test_notification_failure_still_reports_success() {
    let calendar = Arc::new(RecordingCalendar::new());
    let notifier = Arc::new(StubNotifier::failing());
    let app = routes(create_state(
        authorized_store(),
        calendar.clone(),
        Some(notifier.clone()),
    ));

    let (status, body) = send(
        app,
        book_request(json!({"slot": "2025-11-01T09:00:00Z", "name": "Ada"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["eventId"], "evt-1");
    assert_eq!(notifier.call_count(), 1);
}

#[tokio::test]
async fn test_notification_uses_website_defaults() {
    let notifier = Arc::new(StubNotifier::succeeding());
    let app = routes(create_state(
        authorized_store(),
        Arc::new(RecordingCalendar::new()),
        Some(notifier.clone()),
    ));

    send(
        app,
        book_request(json!({"slot": "2025-11-01T09:00:00Z", "name": "Ada"})),
    )
    .await;

    let sent = notifier.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].email, "no-email@local");
    assert_eq!(sent[0].details, "Reserved via website");
    assert_eq!(sent[0].time, "09:00");
}

#[tokio::test]
async fn test_without_credential_slots_and_book_require_auth() {
    let calendar = Arc::new(RecordingCalendar::new());
    let app = routes(create_state(empty_store(), calendar.clone(), None));

    let (status, body) = send(app.clone(), get("/slots")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        body["message"],
        "Google authentication required. Visit /authorize"
    );

    let (status, body) = send(
        app,
        book_request(json!({"slot": "2025-11-01T09:00:00Z", "name": "Ada"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["status"], "error");
    assert!(calendar.created_events().is_empty());
}

#[tokio::test]
async fn test_slots_lists_timed_and_all_day_starts() {
    let calendar = Arc::new(RecordingCalendar::new().with_upcoming(vec![
        UpcomingEvent {
            id: "a".into(),
            start: SlotStart::At(Utc.with_ymd_and_hms(2025, 11, 1, 9, 0, 0).unwrap()),
        },
        UpcomingEvent {
            id: "b".into(),
            start: SlotStart::AllDay(NaiveDate::from_ymd_opt(2025, 11, 2).unwrap()),
        },
    ]));
    let app = routes(create_state(authorized_store(), calendar.clone(), None));

    let (status, body) = send(app, get("/slots")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["slots"], json!(["2025-11-01T09:00:00+00:00", "2025-11-02"]));
    assert_eq!(calendar.seen_tokens(), vec!["ya29.test".to_string()]);
}

#[tokio::test]
async fn test_slots_remote_failure_is_bad_gateway() {
    let app = routes(create_state(
        authorized_store(),
        Arc::new(RecordingCalendar::failing("backendError")),
        None,
    ));

    let (status, body) = send(app, get("/slots")).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["message"], "Google Calendar error: backendError");
}

#[tokio::test]
async fn test_authorize_redirects_to_consent_screen() {
    let app = routes(create_state(empty_store(), Arc::new(RecordingCalendar::new()), None));

    let response = app.oneshot(get("/authorize")).await.unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    let location = response.headers()[header::LOCATION].to_str().unwrap();
    assert!(location.starts_with("https://accounts.google.com/o/oauth2/auth"));
}

#[tokio::test]
async fn test_callback_stores_credential_and_unlocks_slots() {
    let app = routes(create_state(empty_store(), Arc::new(RecordingCalendar::new()), None));

    let (status, body) = send(app.clone(), get("/auth/google/callback?code=good-code")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Google Calendar authorized successfully!");

    let (status, _) = send(app, get("/slots")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_callback_errors() {
    let app = routes(create_state(empty_store(), Arc::new(RecordingCalendar::new()), None));

    let (status, _) = send(app.clone(), get("/auth/callback")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(app.clone(), get("/auth/callback?code=bad-code")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["status"], "error");

    let (status, _) = send(app, get("/auth/callback?error=access_denied")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
