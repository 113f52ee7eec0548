//! Backend client construction.
//!
//! # Responsibilities
//! - Define the second phase of bootstrap: `configure(config) -> client`
//! - Provide a Firebase REST connector that addresses Firestore and
//!   Identity Toolkit with a loaded config
//!
//! # Design Decisions
//! - A connector never loads config itself; it only accepts one
//! - Firebase operations stay out of scope; the client only knows where
//!   the backend lives and how to authenticate to it

use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::backend::types::BackendConfig;

const FIRESTORE_BASE: &str = "https://firestore.googleapis.com/v1/";
const IDENTITY_TOOLKIT_BASE: &str = "https://identitytoolkit.googleapis.com/v1/";

/// Turns a loaded [`BackendConfig`] into a ready client handle.
pub trait BackendConnector: Send + Sync {
    type Client: Send;
    type Error: std::error::Error + Send + Sync + 'static;

    fn configure(&self, config: &BackendConfig) -> Result<Self::Client, Self::Error>;
}

/// Errors raised while configuring the Firebase client.
#[derive(Debug, Error)]
pub enum FirebaseInitError {
    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("Invalid project id '{0}'")]
    InvalidProjectId(String),

    #[error("HTTP client error: {0}")]
    Http(String),

    #[error("URL error: {0}")]
    Url(String),
}

/// Connector for Firebase's REST surface.
#[derive(Debug, Clone)]
pub struct FirebaseConnector {
    timeout: Duration,
}

impl FirebaseConnector {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for FirebaseConnector {
    fn default() -> Self {
        Self::new(Duration::from_secs(30))
    }
}

impl BackendConnector for FirebaseConnector {
    type Client = FirebaseClient;
    type Error = FirebaseInitError;

    fn configure(&self, config: &BackendConfig) -> Result<FirebaseClient, FirebaseInitError> {
        if config.api_key.is_empty() || config.api_key.chars().any(char::is_whitespace) {
            return Err(FirebaseInitError::InvalidApiKey);
        }
        if !is_valid_project_id(&config.project_id) {
            return Err(FirebaseInitError::InvalidProjectId(config.project_id.clone()));
        }

        let http = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| FirebaseInitError::Http(e.to_string()))?;

        let documents_base = Url::parse(FIRESTORE_BASE)
            .and_then(|base| {
                base.join(&format!(
                    "projects/{}/databases/(default)/documents/",
                    config.project_id
                ))
            })
            .map_err(|e| FirebaseInitError::Url(e.to_string()))?;
        let identity_base =
            Url::parse(IDENTITY_TOOLKIT_BASE).map_err(|e| FirebaseInitError::Url(e.to_string()))?;

        tracing::info!(
            project_id = %config.project_id,
            api_key = %config.masked_api_key(),
            "Backend client configured"
        );

        Ok(FirebaseClient {
            http,
            api_key: config.api_key.clone(),
            project_id: config.project_id.clone(),
            documents_base,
            identity_base,
        })
    }
}

/// Firebase project ids: 6-30 chars of lowercase letters, digits and
/// hyphens, starting with a letter and not ending with a hyphen.
fn is_valid_project_id(id: &str) -> bool {
    let len_ok = (6..=30).contains(&id.len());
    let starts_ok = id.chars().next().is_some_and(|c| c.is_ascii_lowercase());
    let ends_ok = !id.ends_with('-');
    let chars_ok = id
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    len_ok && starts_ok && ends_ok && chars_ok
}

/// Configured handle to the Firebase REST endpoints.
#[derive(Clone)]
pub struct FirebaseClient {
    http: reqwest::Client,
    api_key: String,
    project_id: String,
    documents_base: Url,
    identity_base: Url,
}

impl FirebaseClient {
    /// Underlying HTTP client.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// Base URL of the project's Firestore documents.
    pub fn documents_base(&self) -> &Url {
        &self.documents_base
    }

    /// URL of a Firestore collection, e.g. `blogPosts` or `coupons`.
    pub fn collection_url(&self, collection: &str) -> Result<Url, FirebaseInitError> {
        self.documents_base
            .join(&format!("./{}", collection.trim_matches('/')))
            .map_err(|e| FirebaseInitError::Url(e.to_string()))
    }

    /// URL of an Identity Toolkit account method, e.g. `signInWithPassword`.
    pub fn auth_url(&self, method: &str) -> Result<Url, FirebaseInitError> {
        let mut url = self
            .identity_base
            .join(&format!("./accounts:{}", method))
            .map_err(|e| FirebaseInitError::Url(e.to_string()))?;
        url.query_pairs_mut().append_pair("key", &self.api_key);
        Ok(url)
    }
}

impl std::fmt::Debug for FirebaseClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FirebaseClient")
            .field("project_id", &self.project_id)
            .field("documents_base", &self.documents_base.as_str())
            .finish()
    }
}
