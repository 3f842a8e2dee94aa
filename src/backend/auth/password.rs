/**
 * Password Hashing
 *
 * bcrypt hashing and verification. Both run on the blocking thread pool
 * since a single bcrypt round at the default cost takes tens of
 * milliseconds.
 */

use crate::backend::error::BackendError;

/// Hash a password with the given bcrypt cost
pub async fn hash_password(password: &str, cost: u32) -> Result<String, BackendError> {
    let password = password.to_string();
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| {
            tracing::error!("Password hashing task failed: {:?}", e);
            BackendError::internal("Server error")
        })?
        .map_err(|e| {
            tracing::error!("Failed to hash password: {:?}", e);
            BackendError::internal("Server error")
        })
}

/// Check a password against a stored bcrypt hash
///
/// A malformed stored hash is an internal error, not a failed check.
pub async fn verify_password(password: &str, password_hash: &str) -> Result<bool, BackendError> {
    let password = password.to_string();
    let password_hash = password_hash.to_string();
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &password_hash))
        .await
        .map_err(|e| {
            tracing::error!("Password verification task failed: {:?}", e);
            BackendError::internal("Server error")
        })?
        .map_err(|e| {
            tracing::error!("Password verification error: {:?}", e);
            BackendError::internal("Server error")
        })
}
