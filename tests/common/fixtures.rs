//! Test doubles
//!
//! - `RejectingUploader`: local media store that refuses files with given
//!   contents, to fail one upload of a request but not another
//! - `FailingCreateStore`: in-memory store whose `create_user` always fails

use async_trait::async_trait;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use uuid::Uuid;
use videotube::backend::auth::store::{MemoryUserStore, StoreError, UserStore};
use videotube::backend::auth::users::{AccountUpdate, NewUser, User};
use videotube::backend::media::{LocalMediaStore, MediaError, MediaUploader, UploadedMedia};

use super::BASE_URL;

pub const REJECTED_BYTES: &[u8] = b"rejected-by-media-host";

pub struct RejectingUploader {
    inner: LocalMediaStore,
    pub deletes: AtomicUsize,
}

impl RejectingUploader {
    pub fn new(public_dir: &Path) -> Arc<Self> {
        Arc::new(Self {
            inner: LocalMediaStore::new(public_dir, BASE_URL),
            deletes: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl MediaUploader for RejectingUploader {
    async fn upload(&self, path: &Path) -> Result<UploadedMedia, MediaError> {
        if tokio::fs::read(path).await? == REJECTED_BYTES {
            return Err(MediaError::Rejected {
                status: 400,
                body: "Invalid image file".into(),
            });
        }
        self.inner.upload(path).await
    }

    async fn delete(&self, media: &UploadedMedia) -> Result<(), MediaError> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        self.inner.delete(media).await
    }
}

#[derive(Default)]
pub struct FailingCreateStore {
    inner: MemoryUserStore,
}

#[async_trait]
impl UserStore for FailingCreateStore {
    async fn create_user(&self, _new_user: NewUser) -> Result<User, StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn get_user_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        self.inner.get_user_by_id(id).await
    }

    async fn find_by_username_or_email(
        &self,
        username: Option<&str>,
        email: Option<&str>,
    ) -> Result<Option<User>, StoreError> {
        self.inner.find_by_username_or_email(username, email).await
    }

    async fn set_refresh_token(&self, id: Uuid, token: Option<&str>) -> Result<(), StoreError> {
        self.inner.set_refresh_token(id, token).await
    }

    async fn rotate_refresh_token(
        &self,
        id: Uuid,
        current: &str,
        next: &str,
    ) -> Result<bool, StoreError> {
        self.inner.rotate_refresh_token(id, current, next).await
    }

    async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<(), StoreError> {
        self.inner.update_password(id, password_hash).await
    }

    async fn update_account(&self, id: Uuid, update: AccountUpdate) -> Result<User, StoreError> {
        self.inner.update_account(id, update).await
    }

    async fn update_avatar(&self, id: Uuid, url: &str) -> Result<User, StoreError> {
        self.inner.update_avatar(id, url).await
    }

    async fn update_cover_image(&self, id: Uuid, url: &str) -> Result<User, StoreError> {
        self.inner.update_cover_image(id, url).await
    }
}
