// --- File: crates/bookify_gcal/src/lib.rs ---
pub mod auth;
pub mod credentials;
pub mod doc;
pub mod handlers;
pub mod logic;
pub mod oauth;
pub mod routes;
pub mod service;

pub use credentials::{
    Credential, CredentialManager, CredentialStore, FileCredentialStore, InMemoryCredentialStore,
};
pub use handlers::GcalState;
pub use oauth::{GoogleOAuthClient, OAuthClientSettings, TokenEndpoint};
pub use service::GoogleCalendarService;
