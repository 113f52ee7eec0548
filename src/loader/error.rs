//! Loader error definitions.

use thiserror::Error;

/// Errors that can occur while loading the backend config.
///
/// `Clone` because one failure is delivered to every caller waiting on the
/// same in-flight request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigLoadError {
    /// Endpoint unreachable or answered with a non-success status.
    #[error("Failed to fetch config: {}", describe_status(.status, .status_text))]
    Transport {
        status: Option<u16>,
        status_text: String,
    },

    /// Response body was not a JSON object.
    #[error("Failed to decode config response: {0}")]
    Decode(String),

    /// Response was well-formed but lacked required fields.
    #[error("Invalid config: {0}")]
    Validation(String),
}

impl ConfigLoadError {
    /// Status code carried by a transport failure, if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            ConfigLoadError::Transport { status, .. } => *status,
            _ => None,
        }
    }
}

fn describe_status(status: &Option<u16>, status_text: &str) -> String {
    match status {
        Some(code) => format!("{} {}", code, status_text),
        None => status_text.to_string(),
    }
}

/// Result type for loader operations.
pub type LoadResult<T> = Result<T, ConfigLoadError>;
