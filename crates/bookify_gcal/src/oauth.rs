// --- File: crates/bookify_gcal/src/oauth.rs ---
//! Google OAuth 2.0 web-server flow: consent URL, code exchange and refresh.

use std::path::Path;

use bookify_common::{config_error, create_client, BookifyError, BoxFuture};
use bookify_config::GcalConfig;
use chrono::{Duration, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error};
use yup_oauth2::ApplicationSecret;

use crate::credentials::Credential;

pub const GOOGLE_AUTH_URI: &str = "https://accounts.google.com/o/oauth2/auth";
pub const GOOGLE_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// Talks to the OAuth token endpoint.
pub trait TokenEndpoint: Send + Sync {
    /// Trade an authorization code for a new credential.
    fn exchange_code<'a>(&'a self, code: &'a str) -> BoxFuture<'a, Credential, BookifyError>;

    /// Obtain a fresh access token for `credential`.
    fn refresh<'a>(&'a self, credential: &'a Credential) -> BoxFuture<'a, Credential, BookifyError>;

    /// URL of the consent screen.
    fn authorization_url(&self) -> Result<String, BookifyError>;
}

/// Client registration plus the parts of the flow we configure.
#[derive(Debug, Clone)]
pub struct OAuthClientSettings {
    pub client_id: String,
    pub client_secret: String,
    pub auth_uri: String,
    pub token_uri: String,
    pub redirect_uri: String,
    pub scopes: Vec<String>,
}

impl OAuthClientSettings {
    pub fn from_application_secret(
        secret: ApplicationSecret,
        redirect_uri: &str,
        scopes: &[String],
    ) -> Self {
        let auth_uri = if secret.auth_uri.is_empty() {
            GOOGLE_AUTH_URI.to_string()
        } else {
            secret.auth_uri
        };
        let token_uri = if secret.token_uri.is_empty() {
            GOOGLE_TOKEN_URI.to_string()
        } else {
            secret.token_uri
        };

        Self {
            client_id: secret.client_id,
            client_secret: secret.client_secret,
            auth_uri,
            token_uri,
            redirect_uri: redirect_uri.to_string(),
            scopes: scopes.to_vec(),
        }
    }

    /// Reads the client-secrets file named in the config.
    pub async fn load(config: &GcalConfig) -> Result<Self, BookifyError> {
        let path = Path::new(&config.client_secrets_path);
        let secret = yup_oauth2::read_application_secret(path)
            .await
            .map_err(|err| {
                config_error(format!(
                    "cannot read client secrets {}: {}",
                    path.display(),
                    err
                ))
            })?;
        Ok(Self::from_application_secret(
            secret,
            &config.redirect_uri,
            &config.scopes,
        ))
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    scope: Option<String>,
}

/// [`TokenEndpoint`] backed by Google's token URI.
pub struct GoogleOAuthClient {
    http: Client,
    settings: OAuthClientSettings,
}

impl GoogleOAuthClient {
    pub fn new(settings: OAuthClientSettings, timeout_secs: u64) -> Result<Self, BookifyError> {
        let http = create_client(timeout_secs, false)?;
        Ok(Self { http, settings })
    }

    async fn post_form(
        &self,
        token_uri: &str,
        form: &[(&str, &str)],
    ) -> Result<TokenResponse, BookifyError> {
        let response = self.http.post(token_uri).form(form).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!("Token endpoint returned {}: {}", status, body);
            return Err(BookifyError::AuthenticationError(format!(
                "token endpoint returned {status}: {body}"
            )));
        }

        Ok(response.json::<TokenResponse>().await?)
    }

    fn credential_from(
        &self,
        response: TokenResponse,
        previous: Option<&Credential>,
    ) -> Credential {
        let scopes = response
            .scope
            .map(|s| s.split_whitespace().map(str::to_string).collect())
            .or_else(|| previous.map(|c| c.scopes.clone()))
            .unwrap_or_else(|| self.settings.scopes.clone());

        Credential {
            access_token: response.access_token,
            // Google omits the refresh token on refresh; keep the old one.
            refresh_token: response
                .refresh_token
                .or_else(|| previous.and_then(|c| c.refresh_token.clone())),
            token_uri: previous
                .map(|c| c.token_uri.clone())
                .unwrap_or_else(|| self.settings.token_uri.clone()),
            client_id: self.settings.client_id.clone(),
            client_secret: self.settings.client_secret.clone(),
            scopes,
            expiry: response
                .expires_in
                .map(|secs| Utc::now() + Duration::seconds(secs)),
        }
    }
}

impl TokenEndpoint for GoogleOAuthClient {
    fn exchange_code<'a>(&'a self, code: &'a str) -> BoxFuture<'a, Credential, BookifyError> {
        Box::pin(async move {
            debug!("Exchanging authorization code");
            let form = [
                ("code", code),
                ("client_id", self.settings.client_id.as_str()),
                ("client_secret", self.settings.client_secret.as_str()),
                ("redirect_uri", self.settings.redirect_uri.as_str()),
                ("grant_type", "authorization_code"),
            ];
            let response = self.post_form(&self.settings.token_uri, &form).await?;
            Ok(self.credential_from(response, None))
        })
    }

    fn refresh<'a>(&'a self, credential: &'a Credential) -> BoxFuture<'a, Credential, BookifyError> {
        Box::pin(async move {
            let refresh_token = credential.refresh_token.as_deref().ok_or_else(|| {
                BookifyError::AuthenticationError("credential has no refresh token".into())
            })?;
            let token_uri = if credential.token_uri.is_empty() {
                self.settings.token_uri.as_str()
            } else {
                credential.token_uri.as_str()
            };

            let form = [
                ("refresh_token", refresh_token),
                ("client_id", self.settings.client_id.as_str()),
                ("client_secret", self.settings.client_secret.as_str()),
                ("grant_type", "refresh_token"),
            ];
            let response = self.post_form(token_uri, &form).await?;
            Ok(self.credential_from(response, Some(credential)))
        })
    }

    fn authorization_url(&self) -> Result<String, BookifyError> {
        let scope = self.settings.scopes.join(" ");
        let query = serde_urlencoded::to_string([
            ("response_type", "code"),
            ("client_id", self.settings.client_id.as_str()),
            ("redirect_uri", self.settings.redirect_uri.as_str()),
            ("scope", scope.as_str()),
            ("access_type", "offline"),
            ("prompt", "consent"),
            ("include_granted_scopes", "true"),
        ])
        .map_err(|err| BookifyError::InternalError(format!("building consent URL: {err}")))?;

        Ok(format!("{}?{}", self.settings.auth_uri, query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn settings(token_uri: String) -> OAuthClientSettings {
        OAuthClientSettings {
            client_id: "client-123".into(),
            client_secret: "s3cret".into(),
            auth_uri: GOOGLE_AUTH_URI.into(),
            token_uri,
            redirect_uri: "http://localhost:8080/auth/google/callback".into(),
            scopes: vec![bookify_config::CALENDAR_SCOPE.into()],
        }
    }

    #[test]
    fn test_authorization_url_requests_offline_consent() {
        let client = GoogleOAuthClient::new(settings(GOOGLE_TOKEN_URI.into()), 5).unwrap();
        let url = client.authorization_url().unwrap();

        assert!(url.starts_with("https://accounts.google.com/o/oauth2/auth?"));
        assert!(url.contains("access_type=offline"));
        assert!(url.contains("prompt=consent"));
        assert!(url.contains("include_granted_scopes=true"));
        assert!(url.contains("client_id=client-123"));
        assert!(url.contains(
            "redirect_uri=http%3A%2F%2Flocalhost%3A8080%2Fauth%2Fgoogle%2Fcallback"
        ));
        assert!(url.contains("scope=https%3A%2F%2Fwww.googleapis.com%2Fauth%2Fcalendar"));
    }

    #[tokio::test]
    async fn test_exchange_code_builds_credential() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/token")
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("code".into(), "auth-code".into()),
                Matcher::UrlEncoded("grant_type".into(), "authorization_code".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"access_token":"ya29.new","expires_in":3599,"refresh_token":"1//r","scope":"https://www.googleapis.com/auth/calendar","token_type":"Bearer"}"#,
            )
            .create_async()
            .await;

        let client =
            GoogleOAuthClient::new(settings(format!("{}/token", server.url())), 5).unwrap();
        let credential = client.exchange_code("auth-code").await.unwrap();

        mock.assert_async().await;
        assert_eq!(credential.access_token, "ya29.new");
        assert_eq!(credential.refresh_token.as_deref(), Some("1//r"));
        assert_eq!(credential.client_id, "client-123");
        assert!(credential.expiry.unwrap() > Utc::now());
    }

    #[tokio::test]
    async fn test_refresh_keeps_previous_refresh_token() {
        let mut server = mockito::Server::new_async().await;
        let token_uri = format!("{}/token", server.url());
        let mock = server
            .mock("POST", "/token")
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("refresh_token".into(), "1//keep".into()),
                Matcher::UrlEncoded("grant_type".into(), "refresh_token".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"access_token":"ya29.fresh","expires_in":3599}"#)
            .create_async()
            .await;

        let client = GoogleOAuthClient::new(settings(token_uri.clone()), 5).unwrap();
        let stale = Credential {
            access_token: "ya29.stale".into(),
            refresh_token: Some("1//keep".into()),
            token_uri,
            client_id: "client-123".into(),
            client_secret: "s3cret".into(),
            scopes: vec!["scope-a".into()],
            expiry: Some(Utc::now() - Duration::minutes(1)),
        };

        let refreshed = client.refresh(&stale).await.unwrap();

        mock.assert_async().await;
        assert_eq!(refreshed.access_token, "ya29.fresh");
        assert_eq!(refreshed.refresh_token.as_deref(), Some("1//keep"));
        assert_eq!(refreshed.scopes, vec!["scope-a".to_string()]);
    }

    #[tokio::test]
    async fn test_revoked_refresh_token_is_authentication_error() {
        let mut server = mockito::Server::new_async().await;
        let token_uri = format!("{}/token", server.url());
        server
            .mock("POST", "/token")
            .with_status(400)
            .with_body(r#"{"error":"invalid_grant","error_description":"Token has been expired or revoked."}"#)
            .create_async()
            .await;

        let client = GoogleOAuthClient::new(settings(token_uri.clone()), 5).unwrap();
        let stale = Credential {
            access_token: "old".into(),
            refresh_token: Some("revoked".into()),
            token_uri,
            client_id: String::new(),
            client_secret: String::new(),
            scopes: vec![],
            expiry: None,
        };

        let err = client.refresh(&stale).await.unwrap_err();
        assert!(matches!(err, BookifyError::AuthenticationError(ref m) if m.contains("invalid_grant")));
    }
}
