//! User Store
//!
//! The persistence seam for user records. Handlers only see
//! `SharedUserStore` (an `Arc<dyn UserStore>`) taken from application state,
//! so the PostgreSQL store and the in-memory store are interchangeable.
//!
//! # Guarantees
//!
//! Implementations must:
//! - reject a second user with the same username or email with
//!   `StoreError::Duplicate`, even under concurrent inserts;
//! - apply each update to a single record atomically;
//! - implement `rotate_refresh_token` as a compare-and-swap.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use crate::backend::auth::users::{AccountUpdate, NewUser, User};

/// PostgreSQL-backed store
pub mod postgres;

/// In-memory store
pub mod memory;

pub use memory::MemoryUserStore;
pub use postgres::PgUserStore;

/// Store handle held in application state
pub type SharedUserStore = Arc<dyn UserStore>;

/// Store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique field (`"username"` or `"email"`) is already taken
    #[error("duplicate value for {0}")]
    Duplicate(&'static str),
    /// The record to update does not exist
    #[error("user not found")]
    NotFound,
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a new user
    async fn create_user(&self, new_user: NewUser) -> Result<User, StoreError>;

    /// Get user by ID
    async fn get_user_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    /// Find the user matching the username or the email
    ///
    /// Both arguments are expected to be normalized. Returns `None` when
    /// both are `None`.
    async fn find_by_username_or_email(
        &self,
        username: Option<&str>,
        email: Option<&str>,
    ) -> Result<Option<User>, StoreError>;

    /// Overwrite (or clear) the stored refresh token
    async fn set_refresh_token(&self, id: Uuid, token: Option<&str>) -> Result<(), StoreError>;

    /// Replace the refresh token only if it still equals `current`
    ///
    /// Returns `false` when the stored value differs (stale token or
    /// logged-out session).
    async fn rotate_refresh_token(
        &self,
        id: Uuid,
        current: &str,
        next: &str,
    ) -> Result<bool, StoreError>;

    /// Replace the password hash
    async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<(), StoreError>;

    /// Apply a partial update of full name and email
    async fn update_account(&self, id: Uuid, update: AccountUpdate) -> Result<User, StoreError>;

    /// Replace the avatar URL
    async fn update_avatar(&self, id: Uuid, url: &str) -> Result<User, StoreError>;

    /// Replace the cover image URL
    async fn update_cover_image(&self, id: Uuid, url: &str) -> Result<User, StoreError>;
}
