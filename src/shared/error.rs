//! Shared Error Types
//!
//! This module defines input errors that are independent of the HTTP layer.
//! They describe what was wrong with a request payload; the backend maps
//! them onto status codes.
//!
//! # Error Categories
//!
//! - `ValidationError` - Data validation failures (missing or blank fields)
//!
//! # Usage
//!
//! ```rust
//! use videotube::shared::error::SharedError;
//!
//! let error = SharedError::validation("email", "Email is required");
//! ```
use thiserror::Error;

/// Input errors shared between request parsing and handlers
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// Data validation error
    #[error("{message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },
}

impl SharedError {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Return the trimmed value if it is present and not blank.
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Require a present, non-blank field.
pub fn require(field: &str, value: Option<&str>, message: &str) -> Result<String, SharedError> {
    non_blank(value)
        .map(str::to_string)
        .ok_or_else(|| SharedError::validation(field, message))
}
