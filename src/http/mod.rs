//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (assign / propagate request ID)
//!     → config_proxy.rs (resolve env, build payload)
//!     → response.rs (JSON error bodies)
//!     → Send to client
//! ```

pub mod config_proxy;
pub mod request;
pub mod response;
pub mod server;

pub use config_proxy::{proxy_router, ProxyState};
pub use request::{UuidRequestId, X_REQUEST_ID};
pub use server::{HttpServer, ServerError};
