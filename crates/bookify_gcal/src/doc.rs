// File: crates/bookify_gcal/src/doc.rs

#![allow(dead_code)]
#![cfg(feature = "openapi")]
use bookify_common::StatusResponse;
use utoipa::OpenApi;

use crate::handlers::{BookRequest, BookingResponse, CallbackQuery, SlotsResponse};

#[utoipa::path(
    get,
    path = "/slots",
    responses(
        (status = 200, description = "Start of each upcoming event", body = SlotsResponse),
        (status = 401, description = "Calendar not authorized yet", body = StatusResponse,
         example = json!({
             "status": "error",
             "message": "Google authentication required. Visit /authorize"
         })
        ),
        (status = 502, description = "Calendar API failure", body = StatusResponse)
    ),
    tag = "GCal"
)]
fn doc_get_slots_handler() {}

#[utoipa::path(
    post,
    path = "/book",
    request_body(content = BookRequest, example = json!({
        "slot": "2025-11-01T09:00:00Z",
        "name": "Ada",
        "email": "ada@example.com",
        "phone": "+41 79 000 00 00",
        "details": "Portfolio review"
    })),
    responses(
        (status = 200, description = "Event created", body = BookingResponse,
         example = json!({
             "status": "success",
             "message": "✅ Slot booked for 2025-11-01T09:00:00Z",
             "eventId": "abc123xyz456"
         })
        ),
        (status = 400, description = "Missing details or unparseable slot", body = StatusResponse),
        (status = 401, description = "Calendar not authorized yet", body = StatusResponse),
        (status = 502, description = "Calendar API failure", body = StatusResponse),
        (status = 504, description = "Calendar API timed out", body = StatusResponse)
    ),
    tag = "GCal"
)]
fn doc_book_slot_handler() {}

#[utoipa::path(
    get,
    path = "/authorize",
    responses(
        (status = 307, description = "Redirect to the Google consent screen")
    ),
    tag = "Auth"
)]
fn doc_authorize_handler() {}

#[utoipa::path(
    get,
    path = "/auth/callback",
    params(CallbackQuery),
    responses(
        (status = 200, description = "Credential stored", body = StatusResponse,
         example = json!({
             "status": "success",
             "message": "Google Calendar authorized successfully!"
         })
        ),
        (status = 400, description = "No code in the callback", body = StatusResponse),
        (status = 401, description = "Code exchange rejected", body = StatusResponse)
    ),
    tag = "Auth"
)]
fn doc_auth_callback_handler() {}

#[derive(OpenApi)]
#[openapi(
    paths(
        doc_get_slots_handler,
        doc_book_slot_handler,
        doc_authorize_handler,
        doc_auth_callback_handler
    ),
    components(
        schemas(SlotsResponse, BookRequest, BookingResponse, StatusResponse)
    ),
    tags(
        (name = "GCal", description = "Upcoming events and booking"),
        (name = "Auth", description = "Google OAuth consent")
    )
)]
pub struct GcalApiDoc;
