//! Two-phase backend bootstrap: load config, then configure the client.

use std::sync::Arc;

use thiserror::Error;

use crate::backend::client::BackendConnector;
use crate::backend::types::BackendConfig;
use crate::loader::{ConfigLoadError, ConfigLoader};

/// Failure of either bootstrap phase, with the original error kept intact.
#[derive(Debug, Error)]
pub enum InitError<E: std::error::Error + 'static> {
    #[error(transparent)]
    Config(#[from] ConfigLoadError),

    #[error(transparent)]
    Backend(E),
}

/// A configured backend client and the config it was built from.
#[derive(Debug)]
pub struct InitializedBackend<C> {
    pub client: C,
    pub config: Arc<BackendConfig>,
}

/// Load the backend config and hand it to `connector`.
pub async fn initialize_backend_client<C: BackendConnector>(
    loader: &ConfigLoader,
    connector: &C,
) -> Result<InitializedBackend<C::Client>, InitError<C::Error>> {
    let config = loader.load().await?;
    let client = connector.configure(&config).map_err(InitError::Backend)?;
    Ok(InitializedBackend { client, config })
}
