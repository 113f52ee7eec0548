//! Where the loader gets its config from.

use async_trait::async_trait;
use url::Url;

use crate::backend::types::{BackendConfig, RawBackendConfig};
use crate::loader::error::{ConfigLoadError, LoadResult};

/// A single fetch of the backend config.
///
/// Implementations perform exactly one attempt per call; de-duplication
/// and caching belong to [`crate::loader::ConfigLoader`].
#[async_trait]
pub trait ConfigSource: Send + Sync + 'static {
    async fn fetch(&self) -> LoadResult<BackendConfig>;
}

/// Fetches the config from the config proxy over HTTP.
#[derive(Debug, Clone)]
pub struct HttpConfigSource {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpConfigSource {
    pub fn new(endpoint: Url) -> Self {
        Self::with_client(reqwest::Client::new(), endpoint)
    }

    pub fn with_client(client: reqwest::Client, endpoint: Url) -> Self {
        Self { client, endpoint }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl ConfigSource for HttpConfigSource {
    async fn fetch(&self) -> LoadResult<BackendConfig> {
        tracing::debug!(endpoint = %self.endpoint, "Fetching backend config");

        let response = self
            .client
            .get(self.endpoint.clone())
            .send()
            .await
            .map_err(|e| ConfigLoadError::Transport {
                status: None,
                status_text: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ConfigLoadError::Transport {
                status: Some(status.as_u16()),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        let body = response.bytes().await.map_err(|e| ConfigLoadError::Transport {
            status: Some(status.as_u16()),
            status_text: e.to_string(),
        })?;

        decode_config(&body)
    }
}

/// Decode and validate a config proxy response body.
pub fn decode_config(body: &[u8]) -> LoadResult<BackendConfig> {
    let value: serde_json::Value =
        serde_json::from_slice(body).map_err(|e| ConfigLoadError::Decode(e.to_string()))?;
    if !value.is_object() {
        return Err(ConfigLoadError::Decode("expected a JSON object".to_string()));
    }
    let raw: RawBackendConfig =
        serde_json::from_value(value).map_err(|e| ConfigLoadError::Decode(e.to_string()))?;
    raw.validate()
}
