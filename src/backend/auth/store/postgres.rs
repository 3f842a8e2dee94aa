/**
 * PostgreSQL User Store
 *
 * Runtime-checked sqlx queries against the `users` table created by
 * `migrations/`. Uniqueness is enforced by the `users_username_key` and
 * `users_email_key` constraints; violations surface as
 * `StoreError::Duplicate`.
 */

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use super::{StoreError, UserStore};
use crate::backend::auth::users::{AccountUpdate, NewUser, User};

const USER_COLUMNS: &str = "id, username, email, full_name, avatar, cover_image, password_hash, refresh_token, created_at, updated_at";

/// User store backed by a PostgreSQL pool
#[derive(Debug, Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Map a unique violation to the field it concerns
fn map_write_error(err: sqlx::Error) -> StoreError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            if db.constraint() == Some("users_email_key") {
                StoreError::Duplicate("email")
            } else {
                StoreError::Duplicate("username")
            }
        }
        sqlx::Error::RowNotFound => StoreError::NotFound,
        _ => StoreError::Database(err),
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn create_user(&self, new_user: NewUser) -> Result<User, StoreError> {
        let user = new_user.into_user(Utc::now());

        sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (id, username, email, full_name, avatar, cover_image, password_hash, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.full_name)
        .bind(&user.avatar)
        .bind(&user.cover_image)
        .bind(&user.password_hash)
        .bind(user.created_at)
        .bind(user.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)
    }

    async fn get_user_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_username_or_email(
        &self,
        username: Option<&str>,
        email: Option<&str>,
    ) -> Result<Option<User>, StoreError> {
        if username.is_none() && email.is_none() {
            return Ok(None);
        }

        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            SELECT {USER_COLUMNS}
            FROM users
            WHERE username = $1 OR email = $2
            ORDER BY created_at
            LIMIT 1
            "#
        ))
        .bind(username)
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn set_refresh_token(&self, id: Uuid, token: Option<&str>) -> Result<(), StoreError> {
        let result = sqlx::query(
            "UPDATE users SET refresh_token = $1, updated_at = $2 WHERE id = $3",
        )
        .bind(token)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn rotate_refresh_token(
        &self,
        id: Uuid,
        current: &str,
        next: &str,
    ) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET refresh_token = $1, updated_at = $2
            WHERE id = $3 AND refresh_token = $4
            "#,
        )
        .bind(next)
        .bind(Utc::now())
        .bind(id)
        .bind(current)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<(), StoreError> {
        let result = sqlx::query(
            "UPDATE users SET password_hash = $1, updated_at = $2 WHERE id = $3",
        )
        .bind(password_hash)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn update_account(&self, id: Uuid, update: AccountUpdate) -> Result<User, StoreError> {
        sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET full_name = COALESCE($1, full_name),
                email = COALESCE($2, email),
                updated_at = $3
            WHERE id = $4
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(update.full_name)
        .bind(update.email)
        .bind(Utc::now())
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)
    }

    async fn update_avatar(&self, id: Uuid, url: &str) -> Result<User, StoreError> {
        sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET avatar = $1, updated_at = $2
            WHERE id = $3
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(url)
        .bind(Utc::now())
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)
    }

    async fn update_cover_image(&self, id: Uuid, url: &str) -> Result<User, StoreError> {
        sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET cover_image = $1, updated_at = $2
            WHERE id = $3
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(url)
        .bind(Utc::now())
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)
    }
}
