/**
 * User Model
 *
 * `User` is the stored record, including the password hash and the current
 * refresh token. It is deliberately not `Serialize`: everything sent to a
 * client goes through `PublicUser`, which has no secret fields.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User record as persisted by a `UserStore`
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (UUID)
    pub id: Uuid,
    /// Username (unique, lowercased)
    pub username: String,
    /// Email address (unique, lowercased)
    pub email: String,
    /// Display name
    pub full_name: String,
    /// Avatar URL
    pub avatar: String,
    /// Cover image URL
    pub cover_image: Option<String>,
    /// Hashed password (bcrypt)
    pub password_hash: String,
    /// Most recently issued refresh token, if a session is active
    pub refresh_token: Option<String>,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
    /// Updated at timestamp
    pub updated_at: DateTime<Utc>,
}

/// Fields required to create a user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub avatar: String,
    pub cover_image: Option<String>,
    pub password_hash: String,
}

impl NewUser {
    /// Build a new user, normalizing username and email
    pub fn new(
        username: &str,
        email: &str,
        full_name: &str,
        avatar: String,
        cover_image: Option<String>,
        password_hash: String,
    ) -> Self {
        Self {
            username: normalize_username(username),
            email: normalize_email(email),
            full_name: full_name.trim().to_string(),
            avatar,
            cover_image,
            password_hash,
        }
    }

    /// Turn into a stored record with a fresh id and timestamps
    pub fn into_user(self, now: DateTime<Utc>) -> User {
        User {
            id: Uuid::new_v4(),
            username: self.username,
            email: self.email,
            full_name: self.full_name,
            avatar: self.avatar,
            cover_image: self.cover_image,
            password_hash: self.password_hash,
            refresh_token: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update of the account details
#[derive(Debug, Clone, Default)]
pub struct AccountUpdate {
    pub full_name: Option<String>,
    pub email: Option<String>,
}

impl AccountUpdate {
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none() && self.email.is_none()
    }
}

/// User as returned to clients (no password hash, no refresh token)
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub avatar: String,
    /// Empty string when no cover image was uploaded
    pub cover_image: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            full_name: user.full_name,
            avatar: user.avatar,
            cover_image: user.cover_image.unwrap_or_default(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

pub fn normalize_username(username: &str) -> String {
    username.trim().to_lowercase()
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
