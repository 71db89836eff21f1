// --- File: crates/bookify_emailjs/src/service.rs ---
use bookify_common::models::{BookingNotification, NotificationResult};
use bookify_common::{
    create_client, external_service_error, BookifyError, BoxFuture, NotificationService,
};
use bookify_config::EmailJsConfig;
use reqwest::Client;
use tracing::{error, info};

use crate::models::EmailJsPayload;

const SERVICE_NAME: &str = "EmailJS";

/// Sends the booking template through EmailJS.
pub struct EmailJsNotificationService {
    http: Client,
    config: EmailJsConfig,
}

impl EmailJsNotificationService {
    /// `timeout_secs` bounds each send.
    pub fn new(config: EmailJsConfig, timeout_secs: u64) -> Result<Self, BookifyError> {
        let http = create_client(timeout_secs, true)?;
        Ok(Self { http, config })
    }
}

impl NotificationService for EmailJsNotificationService {
    fn notify(
        &self,
        notification: BookingNotification,
    ) -> BoxFuture<'_, NotificationResult, BookifyError> {
        Box::pin(async move {
            let payload = EmailJsPayload {
                service_id: &self.config.service_id,
                template_id: &self.config.template_id,
                user_id: &self.config.public_key,
                template_params: &notification,
            };

            let response = self
                .http
                .post(&self.config.endpoint)
                .json(&payload)
                .send()
                .await?;

            // EmailJS answers 200 with a plain "OK" body.
            let status = response.status();
            let body = response.text().await?;
            if status != reqwest::StatusCode::OK {
                error!("EmailJS returned {}: {}", status, body);
                return Err(external_service_error(
                    SERVICE_NAME,
                    format!("status {}: {}", status.as_u16(), body),
                ));
            }

            info!(
                "Booking notification sent for {} on {} {}",
                notification.name, notification.date, notification.time
            );
            Ok(NotificationResult { status: body })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;
    use std::io::Write;
    use std::time::Duration;

    fn notification() -> BookingNotification {
        BookingNotification {
            name: "Ada".into(),
            email: "no-email@local".into(),
            phone: "N/A".into(),
            date: "2025-11-01".into(),
            time: "09:00".into(),
            details: "Reserved via website".into(),
        }
    }

    fn config(endpoint: String) -> EmailJsConfig {
        EmailJsConfig {
            service_id: "service_abc".into(),
            template_id: "template_xyz".into(),
            public_key: "pk_123".into(),
            endpoint,
        }
    }

    #[tokio::test]
    async fn test_posts_template_params() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/v1.0/email/send")
            .match_body(Matcher::Json(json!({
                "service_id": "service_abc",
                "template_id": "template_xyz",
                "user_id": "pk_123",
                "template_params": {
                    "name": "Ada",
                    "email": "no-email@local",
                    "phone": "N/A",
                    "date": "2025-11-01",
                    "time": "09:00",
                    "details": "Reserved via website"
                }
            })))
            .with_status(200)
            .with_body("OK")
            .create_async()
            .await;

        let service = EmailJsNotificationService::new(
            config(format!("{}/api/v1.0/email/send", server.url())),
            5,
        )
        .unwrap();
        let result = service.notify(notification()).await.unwrap();

        mock.assert_async().await;
        assert_eq!(result.status, "OK");
    }

    #[tokio::test]
    async fn test_non_200_is_remote_service_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/send")
            .with_status(400)
            .with_body("The user ID is invalid")
            .create_async()
            .await;

        let service =
            EmailJsNotificationService::new(config(format!("{}/send", server.url())), 5).unwrap();
        let err = service.notify(notification()).await.unwrap_err();

        match err {
            BookifyError::RemoteServiceError {
                service_name,
                message,
            } => {
                assert_eq!(service_name, "EmailJS");
                assert!(message.contains("400"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_slow_endpoint_is_timeout() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/send")
            .with_status(200)
            .with_chunked_body(|writer| {
                std::thread::sleep(Duration::from_secs(3));
                writer.write_all(b"OK")
            })
            .create_async()
            .await;

        let service =
            EmailJsNotificationService::new(config(format!("{}/send", server.url())), 1).unwrap();
        let err = service.notify(notification()).await.unwrap_err();

        assert!(matches!(err, BookifyError::Timeout(_)), "got {err:?}");
    }
}
