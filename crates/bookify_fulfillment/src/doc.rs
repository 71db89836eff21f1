// --- File: crates/bookify_fulfillment/src/doc.rs ---

// Only compile this module if the 'openapi' feature is enabled
#![cfg(feature = "openapi")]
// Allow dead code for the dummy functions used by utoipa macros
#![allow(dead_code)]

use utoipa::OpenApi;

use crate::logic::{DialogflowRequest, Intent, QueryResult, WebhookResponse};

#[utoipa::path(
    post,
    path = "/webhook",
    request_body(
        content = DialogflowRequest,
        description = "Dialogflow ES fulfillment request",
        example = json!({
            "queryResult": {
                "intent": { "displayName": "Book Appointment" },
                "parameters": {
                    "date": "2025-09-01T12:00:00+02:00",
                    "time": "2025-09-01T11:30:00+02:00",
                    "person": { "name": "Ada" },
                    "email": "ada@example.com",
                    "phone-number": "",
                    "any": "Portfolio review"
                }
            }
        })
    ),
    responses(
        (status = 200, description = "Text for the agent to say; also used for failures", body = WebhookResponse,
         examples(
            ("Booked" = (
                summary = "Event created",
                value = json!({"fulfillmentText": "✅ Appointment booked successfully!\n\n📅 Date: 2025-09-01\n⏰ Time: 09:30 (UTC)\n👤 Name: Ada\n📧 Email: ada@example.com\n📞 Phone: N/A\n📝 Details: Portfolio review\n🆔 Event ID: abc123"})
            )),
            ("MissingDetails" = (
                summary = "Time or name missing",
                value = json!({"fulfillmentText": "❌ Some details are missing. Please provide all required information."})
            )),
            ("OtherIntent" = (
                summary = "Intent is not the booking intent",
                value = json!({"fulfillmentText": "I didn't understand that. Can you please rephrase?"})
            ))
         ))
    ),
    tag = "Fulfillment"
)]
fn doc_handle_webhook() {}

#[derive(OpenApi)]
#[openapi(
    paths(doc_handle_webhook),
    components(schemas(DialogflowRequest, QueryResult, Intent, WebhookResponse)),
    tags(
        (name = "Fulfillment", description = "Conversational agent webhook")
    )
)]
pub struct FulfillmentApiDoc;
