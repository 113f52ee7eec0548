//! Client-side config loading.
//!
//! # Data Flow
//! ```text
//! caller(s) → service.rs (cache / single in-flight fetch)
//!           → source.rs (one HTTP GET to the config proxy)
//!           → backend::types (required-field validation)
//!           → Arc<BackendConfig> shared with every caller
//! ```
//!
//! # Design Decisions
//! - No retries or timeouts here; callers decide when to try again
//! - A failed load leaves nothing cached

pub mod error;
pub mod service;
pub mod source;

pub use error::{ConfigLoadError, LoadResult};
pub use service::{ConfigLoader, LoaderPhase};
pub use source::{ConfigSource, HttpConfigSource};
