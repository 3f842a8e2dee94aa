/**
 * In-Memory User Store
 *
 * Keeps users in a `HashMap` behind one `tokio::sync::RwLock`. Every write
 * takes the write lock, so uniqueness checks and updates are atomic with
 * respect to each other. Used when `DATABASE_URL` is not set and by tests.
 */

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{StoreError, UserStore};
use crate::backend::auth::users::{AccountUpdate, NewUser, User};

#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<Uuid, User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    async fn update<F>(&self, id: Uuid, apply: F) -> Result<User, StoreError>
    where
        F: FnOnce(&mut User),
    {
        let mut users = self.users.write().await;
        let user = users.get_mut(&id).ok_or(StoreError::NotFound)?;
        apply(user);
        user.updated_at = Utc::now();
        Ok(user.clone())
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create_user(&self, new_user: NewUser) -> Result<User, StoreError> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.username == new_user.username) {
            return Err(StoreError::Duplicate("username"));
        }
        if users.values().any(|u| u.email == new_user.email) {
            return Err(StoreError::Duplicate("email"));
        }

        let user = new_user.into_user(Utc::now());
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn get_user_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn find_by_username_or_email(
        &self,
        username: Option<&str>,
        email: Option<&str>,
    ) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        let found = users
            .values()
            .filter(|u| {
                username.is_some_and(|name| u.username == name)
                    || email.is_some_and(|mail| u.email == mail)
            })
            .min_by_key(|u| u.created_at)
            .cloned();
        Ok(found)
    }

    async fn set_refresh_token(&self, id: Uuid, token: Option<&str>) -> Result<(), StoreError> {
        self.update(id, |user| user.refresh_token = token.map(str::to_string))
            .await
            .map(|_| ())
    }

    async fn rotate_refresh_token(
        &self,
        id: Uuid,
        current: &str,
        next: &str,
    ) -> Result<bool, StoreError> {
        let mut users = self.users.write().await;
        let Some(user) = users.get_mut(&id) else {
            return Ok(false);
        };
        if user.refresh_token.as_deref() != Some(current) {
            return Ok(false);
        }
        user.refresh_token = Some(next.to_string());
        user.updated_at = Utc::now();
        Ok(true)
    }

    async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<(), StoreError> {
        self.update(id, |user| user.password_hash = password_hash.to_string())
            .await
            .map(|_| ())
    }

    async fn update_account(&self, id: Uuid, update: AccountUpdate) -> Result<User, StoreError> {
        let mut users = self.users.write().await;
        if let Some(email) = &update.email {
            if users.values().any(|u| u.id != id && &u.email == email) {
                return Err(StoreError::Duplicate("email"));
            }
        }

        let user = users.get_mut(&id).ok_or(StoreError::NotFound)?;
        if let Some(full_name) = update.full_name {
            user.full_name = full_name;
        }
        if let Some(email) = update.email {
            user.email = email;
        }
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    async fn update_avatar(&self, id: Uuid, url: &str) -> Result<User, StoreError> {
        self.update(id, |user| user.avatar = url.to_string()).await
    }

    async fn update_cover_image(&self, id: Uuid, url: &str) -> Result<User, StoreError> {
        self.update(id, |user| user.cover_image = Some(url.to_string())).await
    }
}
