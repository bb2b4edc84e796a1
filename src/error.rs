//! Error types for CoinDash

use std::time::Duration;
use thiserror::Error;

/// Result type alias for CoinDash operations
pub type Result<T> = std::result::Result<T, Error>;

/// Result type for a single provider call
pub type ProviderResult<T> = std::result::Result<T, ProviderError>;

/// Top-level error type for the application
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Operation failed: {0}")]
    Other(String),
}

/// Failures talking to, or interpreting the response of, the market-data provider
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("Rate limit exceeded. Retry after {0:?}")]
    RateLimited(Duration),

    #[error("Provider returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid provider response: {0}")]
    InvalidResponse(String),
}

impl ProviderError {
    /// HTTP status of the failed call, if the provider answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ProviderError::RateLimited(_) => Some(429),
            ProviderError::Status { status, .. } => Some(*status),
            ProviderError::Network(_) | ProviderError::InvalidResponse(_) => None,
        }
    }

    pub fn is_rate_limited(&self) -> bool {
        matches!(self, ProviderError::RateLimited(_))
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProviderError::Network("Request timed out".to_string())
        } else if err.is_connect() {
            ProviderError::Network("Failed to connect to provider".to_string())
        } else if err.is_decode() {
            ProviderError::InvalidResponse(err.to_string())
        } else {
            ProviderError::Network(err.to_string())
        }
    }
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found at {0}")]
    NotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
