//! Error types for authflow.

use thiserror::Error;

/// Primary error type for all authflow operations.
#[derive(Error, Debug)]
pub enum AuthFlowError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Session expired: {0}")]
    SessionExpired(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Timeout after {0}ms")]
    Timeout(u64),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Broad error category for routing display and recovery logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Authorization,
    Session,
    Api,
    Network,
    Storage,
    Timeout,
    Internal,
}

impl AuthFlowError {
    /// Create an API error from a status code and server message.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Network(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether this error means the session is gone and the caller should
    /// re-authenticate.
    pub fn is_session_expired(&self) -> bool {
        matches!(self, Self::SessionExpired(_))
    }

    /// Classify this error into a category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Validation(_) => ErrorCategory::Validation,
            Self::SessionExpired(_) => ErrorCategory::Session,
            Self::Api { status, .. } => match status {
                401 | 403 => ErrorCategory::Authorization,
                _ => ErrorCategory::Api,
            },
            Self::Network(_) => ErrorCategory::Network,
            Self::Storage(_) => ErrorCategory::Storage,
            Self::Serialization(_) => ErrorCategory::Storage,
            Self::Timeout(_) => ErrorCategory::Timeout,
            Self::InvalidState(_) | Self::Configuration(_) => ErrorCategory::Internal,
        }
    }
}

impl From<std::io::Error> for AuthFlowError {
    fn from(error: std::io::Error) -> Self {
        Self::Storage(error.to_string())
    }
}

impl From<toml::de::Error> for AuthFlowError {
    fn from(error: toml::de::Error) -> Self {
        Self::Storage(error.to_string())
    }
}

impl From<toml::ser::Error> for AuthFlowError {
    fn from(error: toml::ser::Error) -> Self {
        Self::Storage(error.to_string())
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, AuthFlowError>;
