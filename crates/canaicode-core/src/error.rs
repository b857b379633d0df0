//! Structured error types for the library facade.
//!
//! Every failure carries a stable snake_case code so callers (and JSON
//! consumers) can branch on it without parsing messages.

use serde::{Deserialize, Serialize};
use std::fmt;

use canaicode_model::NormalizeError;
use canaicode_settings::SettingsError;

/// Error codes for canaicode operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Input file does not exist.
    PathNotFound,
    /// Input is not valid JSON or does not match the wire shape.
    InvalidJson,
    /// A date could not be parsed or a period is inverted.
    InvalidData,
    /// A metrics request is incomplete or inconsistent.
    InvalidRequest,
    /// Invalid settings/arguments.
    InvalidSettings,
    /// I/O error during operation.
    IoError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCode::PathNotFound => write!(f, "path_not_found"),
            ErrorCode::InvalidJson => write!(f, "invalid_json"),
            ErrorCode::InvalidData => write!(f, "invalid_data"),
            ErrorCode::InvalidRequest => write!(f, "invalid_request"),
            ErrorCode::InvalidSettings => write!(f, "invalid_settings"),
            ErrorCode::IoError => write!(f, "io_error"),
        }
    }
}

/// Structured error with a stable code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanaiError {
    /// Error code for programmatic handling.
    pub code: ErrorCode,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl CanaiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(
        code: ErrorCode,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            details: Some(details.into()),
        }
    }

    pub fn path_not_found(path: &str) -> Self {
        Self::new(ErrorCode::PathNotFound, format!("Path not found: {}", path))
    }

    pub fn invalid_json(err: impl fmt::Display) -> Self {
        Self::new(ErrorCode::InvalidJson, format!("Invalid JSON: {}", err))
    }

    pub fn invalid_request(reason: impl fmt::Display) -> Self {
        Self::new(
            ErrorCode::InvalidRequest,
            format!("Invalid metrics request: {}", reason),
        )
    }

    pub fn io_error(err: impl fmt::Display) -> Self {
        Self::new(ErrorCode::IoError, format!("I/O error: {}", err))
    }

    /// Convert to JSON string.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            format!(
                r#"{{"code":"{}","message":"{}"}}"#,
                self.code, self.message
            )
        })
    }
}

impl fmt::Display for CanaiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(details) = &self.details {
            write!(f, "[{}] {}: {}", self.code, self.message, details)
        } else {
            write!(f, "[{}] {}", self.code, self.message)
        }
    }
}

impl std::error::Error for CanaiError {}

impl From<NormalizeError> for CanaiError {
    fn from(err: NormalizeError) -> Self {
        Self::new(ErrorCode::InvalidData, err.to_string())
    }
}

impl From<SettingsError> for CanaiError {
    fn from(err: SettingsError) -> Self {
        match err {
            SettingsError::Io(io) => Self::io_error(io),
            other => Self::new(ErrorCode::InvalidSettings, other.to_string()),
        }
    }
}

impl From<serde_json::Error> for CanaiError {
    fn from(err: serde_json::Error) -> Self {
        Self::invalid_json(err)
    }
}

impl From<std::io::Error> for CanaiError {
    fn from(err: std::io::Error) -> Self {
        Self::io_error(err)
    }
}
