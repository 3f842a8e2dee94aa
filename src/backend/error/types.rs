/**
 * Backend Error Types
 *
 * This module defines the single error type returned by every HTTP handler.
 * Each variant corresponds to one HTTP status; lower layers (store, media,
 * tokens, input validation) convert into it with `?`.
 *
 * # Error Categories
 *
 * - `BadRequest` - missing or invalid input (400)
 * - `Unauthorized` - missing/invalid/expired credential or wrong password (401)
 * - `NotFound` - no matching user (404)
 * - `Conflict` - duplicate username or email (409)
 * - `Internal` - upload, hashing, signing or persistence failure (500)
 */

use thiserror::Error;
use axum::http::StatusCode;
use crate::backend::auth::sessions::{TokenError, TOKEN_FAILURE};
use crate::backend::auth::store::StoreError;
use crate::backend::media::MediaError;
use crate::shared::SharedError;

/// Backend error carrying an HTTP status and a client-facing message
///
/// # Usage
///
/// ```rust
/// use videotube::backend::error::BackendError;
///
/// let err = BackendError::bad_request("All fields are required");
/// assert_eq!(err.status_code().as_u16(), 400);
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Missing or invalid input
    #[error("{0}")]
    BadRequest(String),

    /// Missing, invalid or expired credential
    #[error("{0}")]
    Unauthorized(String),

    /// No matching resource
    #[error("{0}")]
    NotFound(String),

    /// Unique field already taken
    #[error("{0}")]
    Conflict(String),

    /// Server-side failure; the message is safe to show to clients
    #[error("{0}")]
    Internal(String),
}

impl BackendError {
    /// Create a 400 error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    /// Create a 401 error
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    /// Create a 404 error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Create a 409 error
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    /// Create a 500 error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error message
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl From<SharedError> for BackendError {
    fn from(err: SharedError) -> Self {
        match err {
            SharedError::ValidationError { message, .. } => Self::BadRequest(message),
        }
    }
}

impl From<StoreError> for BackendError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate(_) => {
                Self::Conflict("User with email or username already exists".to_string())
            }
            StoreError::NotFound => Self::NotFound("User does not exist".to_string()),
            StoreError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                Self::Internal("Database operation failed".to_string())
            }
        }
    }
}

impl From<MediaError> for BackendError {
    fn from(err: MediaError) -> Self {
        tracing::error!("Media upload error: {}", err);
        Self::Internal("Error while uploading file".to_string())
    }
}

impl From<TokenError> for BackendError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Signing(e) => {
                tracing::error!("Failed to sign token: {:?}", e);
                Self::Internal(TOKEN_FAILURE.to_string())
            }
            TokenError::Invalid(e) => {
                tracing::warn!("Invalid token: {:?}", e);
                Self::Unauthorized("Invalid token".to_string())
            }
            TokenError::MalformedSubject => Self::Unauthorized("Invalid token".to_string()),
        }
    }
}
