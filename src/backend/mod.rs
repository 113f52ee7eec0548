//! Managed backend integration.
//!
//! # Data Flow
//! ```text
//! Server side:
//!     process environment
//!         → env.rs (primary / fallback names)
//!         → BackendConfig served by the config proxy
//!
//! Client side:
//!     ConfigLoader (loader module)
//!         → init.rs (load, then configure)
//!         → client.rs (connector → client handle)
//! ```
//!
//! # Security Constraints
//! - Credentials come from the environment only
//! - The api key is masked in every Debug and log output

pub mod client;
pub mod env;
pub mod init;
pub mod types;

pub use client::{BackendConnector, FirebaseClient, FirebaseConnector, FirebaseInitError};
pub use env::{resolve_backend_config, EnvResolution, Environment};
pub use init::{initialize_backend_client, InitError, InitializedBackend};
pub use types::{BackendConfig, RawBackendConfig};
