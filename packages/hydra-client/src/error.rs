//! Error types for the Hydra client.

use serde_json::Value;
use thiserror::Error;

/// Result type for Hydra client operations.
pub type Result<T> = std::result::Result<T, HydraError>;

/// Hydra client errors.
#[derive(Debug, Error)]
pub enum HydraError {
    /// Configuration error (missing access token).
    #[error("configuration error: {0}")]
    Config(String),

    /// Transport failure (DNS, connection refused, timeout). No HTTP
    /// status was received.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-200 response. `body` holds the parsed error payload, or a
    /// synthesized "<status> <reason>" string when the body is not JSON.
    #[error("API error {status}: {body}")]
    Api { status: u16, body: Value },

    /// 200 response whose body could not be parsed as JSON.
    #[error("parse error: {reason}")]
    Parse { status: u16, reason: String },
}

impl HydraError {
    /// HTTP status carried by the error, if a response was received at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Config(_) | Self::Transport(_) => None,
            Self::Api { status, .. } | Self::Parse { status, .. } => Some(*status),
        }
    }

    /// Diagnostic payload suitable for a report body.
    pub fn diagnostic(&self) -> Value {
        match self {
            Self::Config(reason) => Value::String(reason.clone()),
            Self::Transport(err) => Value::String(err.to_string()),
            Self::Api { body, .. } => body.clone(),
            Self::Parse { status, reason } => Value::String(format!("{status} {reason}")),
        }
    }
}
