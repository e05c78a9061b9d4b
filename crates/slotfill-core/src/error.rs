//! Core error types for slotfill-core.
//!
//! Degenerate input (empty busy list, zero percentage, oversized minimum
//! duration) is never an error; only contract violations by the caller and
//! collaborator failures end up here.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Core error type for slotfill-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Calendar adapter errors
    #[error("Adapter error: {0}")]
    Adapter(#[from] AdapterError),

    /// A fill was requested before the cooldown elapsed
    #[error("Calendar already filled; next update allowed on {}", next_update.format("%Y-%m-%d"))]
    CooldownActive { next_update: DateTime<Utc> },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Caller contract violations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Range end lies before the range start
    #[error("Invalid time range: end ({end}) must not be before start ({start})")]
    InvalidTimeRange {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    /// Interval with start >= end
    #[error("Invalid interval: start ({start}) must be before end ({end})")]
    InvalidInterval {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },

    /// Timezone name not found in the tz database
    #[error("Unknown time zone: {0}")]
    UnknownTimeZone(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown configuration key or bad value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Missing required configuration key
    #[error("Missing required configuration key: {0}")]
    MissingKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Errors reported by calendar read/write adapters.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdapterError {
    /// Reading busy intervals failed
    #[error("Failed to read calendar '{calendar}': {message}")]
    Read { calendar: String, message: String },

    /// Writing a single event failed
    #[error("Failed to write event: {0}")]
    Write(String),

    /// Provider rejected the credentials
    #[error("Not authorized with {provider}")]
    Unauthorized { provider: String },
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseFailed(err.to_string())
    }
}

impl ValidationError {
    pub(crate) fn invalid_value(field: &str, message: impl Into<String>) -> Self {
        ValidationError::InvalidValue {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
