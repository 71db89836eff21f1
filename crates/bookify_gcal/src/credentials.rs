// --- File: crates/bookify_gcal/src/credentials.rs ---
//! The Google credential: its on-disk format, where it is stored, and how it
//! is kept valid.
//!
//! A single credential is live at a time. It is created by the OAuth code
//! exchange, overwritten on every refresh, and never deleted. Absence means
//! the operator has not authorized the calendar yet.

use std::path::PathBuf;
use std::sync::Arc;

use bookify_common::{internal_error, BookifyError, BoxFuture, Context};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::oauth::{TokenEndpoint, GOOGLE_TOKEN_URI};

/// Message shown whenever no usable credential exists.
pub const AUTH_REQUIRED_MESSAGE: &str = "Google authentication required. Visit /authorize";

/// An OAuth credential in Google's authorized-user JSON layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credential {
    #[serde(rename = "token")]
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub client_secret: String,
    #[serde(default)]
    pub scopes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry: Option<DateTime<Utc>>,
}

fn default_token_uri() -> String {
    GOOGLE_TOKEN_URI.to_string()
}

impl Credential {
    /// True once `now` is within `skew` of the expiry. A credential without
    /// an expiry never expires.
    pub fn is_expired(&self, now: DateTime<Utc>, skew: Duration) -> bool {
        match self.expiry {
            Some(expiry) => now >= expiry - skew,
            None => false,
        }
    }

    pub fn can_refresh(&self) -> bool {
        self.refresh_token
            .as_deref()
            .is_some_and(|token| !token.is_empty())
    }
}

/// Single-slot storage for the credential.
pub trait CredentialStore: Send + Sync {
    /// The stored credential, or `None` when nothing has been authorized.
    fn load(&self) -> BoxFuture<'_, Option<Credential>, BookifyError>;

    /// Replace the stored credential.
    fn save<'a>(&'a self, credential: &'a Credential) -> BoxFuture<'a, (), BookifyError>;
}

/// JSON file store. Writes go to a sibling temp file that is then renamed
/// over the target.
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "token.json".into());
        name.push(format!(".{}.tmp", uuid::Uuid::new_v4()));
        self.path.with_file_name(name)
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> BoxFuture<'_, Option<Credential>, BookifyError> {
        Box::pin(async move {
            let bytes = match tokio::fs::read(&self.path).await {
                Ok(bytes) => bytes,
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                    debug!("No credential file at {}", self.path.display());
                    return Ok(None);
                }
                Err(err) => {
                    return Err(err).context(format!("reading {}", self.path.display()))
                }
            };

            match serde_json::from_slice::<Credential>(&bytes) {
                Ok(credential) => Ok(Some(credential)),
                Err(err) => {
                    // An unreadable token is treated like a missing one so the
                    // operator is sent back through /authorize.
                    warn!(
                        "Ignoring unreadable credential file {}: {}",
                        self.path.display(),
                        err
                    );
                    Ok(None)
                }
            }
        })
    }

    fn save<'a>(&'a self, credential: &'a Credential) -> BoxFuture<'a, (), BookifyError> {
        Box::pin(async move {
            let json = serde_json::to_vec_pretty(credential)?;
            let temp = self.temp_path();
            tokio::fs::write(&temp, json)
                .await
                .context(format!("writing {}", temp.display()))?;
            if let Err(err) = tokio::fs::rename(&temp, &self.path).await {
                let _ = tokio::fs::remove_file(&temp).await;
                return Err(err).context(format!("replacing {}", self.path.display()));
            }
            debug!("Credential written to {}", self.path.display());
            Ok(())
        })
    }
}

/// Process-local store, used by tests and ephemeral deployments.
#[derive(Default)]
pub struct InMemoryCredentialStore {
    slot: std::sync::Mutex<Option<Credential>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credential(credential: Credential) -> Self {
        Self {
            slot: std::sync::Mutex::new(Some(credential)),
        }
    }
}

impl CredentialStore for InMemoryCredentialStore {
    fn load(&self) -> BoxFuture<'_, Option<Credential>, BookifyError> {
        Box::pin(async move {
            let slot = self
                .slot
                .lock()
                .map_err(|_| internal_error("credential store lock poisoned"))?;
            Ok(slot.clone())
        })
    }

    fn save<'a>(&'a self, credential: &'a Credential) -> BoxFuture<'a, (), BookifyError> {
        Box::pin(async move {
            let mut slot = self
                .slot
                .lock()
                .map_err(|_| internal_error("credential store lock poisoned"))?;
            *slot = Some(credential.clone());
            Ok(())
        })
    }
}

/// Owns the store and the token endpoint, and serializes every
/// load-refresh-save sequence behind one lock.
pub struct CredentialManager {
    store: Arc<dyn CredentialStore>,
    endpoint: Arc<dyn TokenEndpoint>,
    refresh_skew: Duration,
    write_lock: Mutex<()>,
}

impl CredentialManager {
    pub fn new(
        store: Arc<dyn CredentialStore>,
        endpoint: Arc<dyn TokenEndpoint>,
        refresh_skew: Duration,
    ) -> Self {
        Self {
            store,
            endpoint,
            refresh_skew,
            write_lock: Mutex::new(()),
        }
    }

    /// Returns a credential that is not expired, refreshing it first when
    /// needed.
    ///
    /// Fails with `AuthenticationRequired` when nothing is stored, or when the
    /// stored credential is expired and has no refresh token. A rejected
    /// refresh surfaces as `AuthenticationError`.
    pub async fn ensure_valid_credential(&self) -> Result<Credential, BookifyError> {
        let _guard = self.write_lock.lock().await;

        let credential = self
            .store
            .load()
            .await?
            .ok_or_else(authentication_required)?;

        if !credential.is_expired(Utc::now(), self.refresh_skew) {
            return Ok(credential);
        }

        if !credential.can_refresh() {
            warn!("Stored credential expired and has no refresh token");
            return Err(authentication_required());
        }

        info!("Refreshing expired Google credential");
        let refreshed = self.endpoint.refresh(&credential).await?;
        self.store.save(&refreshed).await?;
        Ok(refreshed)
    }

    /// Exchanges an authorization code and stores the resulting credential.
    pub async fn authorize_with_code(&self, code: &str) -> Result<Credential, BookifyError> {
        let _guard = self.write_lock.lock().await;

        let credential = self.endpoint.exchange_code(code).await?;
        self.store.save(&credential).await?;
        info!("Google Calendar authorized");
        Ok(credential)
    }

    /// Consent screen URL the operator is redirected to.
    pub fn authorization_url(&self) -> Result<String, BookifyError> {
        self.endpoint.authorization_url()
    }
}

pub fn authentication_required() -> BookifyError {
    BookifyError::AuthenticationRequired(AUTH_REQUIRED_MESSAGE.to_string())
}
