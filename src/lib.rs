//! Config bridge: serves managed-backend initialization parameters over
//! HTTP and loads them, once, on the client side.

pub mod backend;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod loader;
pub mod observability;

pub use backend::{initialize_backend_client, BackendConfig, Environment};
pub use config::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use loader::{ConfigLoader, HttpConfigSource};
