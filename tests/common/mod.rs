//! Common test utilities and helpers
//!
//! - `TestApp`: the full router over an in-memory store and a local media
//!   directory inside a temporary folder
//! - Auth helpers for registering and logging in
//! - Test doubles for the media host and the user store
//! - Assertion helpers for the JSON error format

#![allow(dead_code)]

pub mod assertions;
pub mod auth_helpers;
pub mod fixtures;

pub use assertions::*;
pub use auth_helpers::*;
pub use fixtures::*;

use axum_test::TestServer;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;
use videotube::backend::auth::store::{MemoryUserStore, SharedUserStore};
use videotube::backend::media::{LocalMediaStore, SharedMediaUploader};
use videotube::backend::routes::create_router;
use videotube::backend::server::state::AppState;
use videotube::shared::AppConfig;

pub const ACCESS_SECRET: &str = "test-access-secret";
pub const REFRESH_SECRET: &str = "test-refresh-secret";
pub const BASE_URL: &str = "http://localhost:8000";

/// Router under test plus the handles behind it
pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
    public: TempDir,
}

impl TestApp {
    /// In-memory store, local media store
    pub fn new() -> Self {
        Self::build_with(None, None)
    }

    /// Custom media uploader
    pub fn with_media(media: SharedMediaUploader) -> Self {
        Self::build_with(Some(media), None)
    }

    /// Custom user store
    pub fn with_store(store: SharedUserStore) -> Self {
        Self::build_with(None, Some(store))
    }

    pub fn build_with(media: Option<SharedMediaUploader>, store: Option<SharedUserStore>) -> Self {
        let public = tempfile::tempdir().expect("create temp public dir");
        let config = AppConfig::builder()
            .access_token_secret(ACCESS_SECRET)
            .refresh_token_secret(REFRESH_SECRET)
            .bcrypt_cost(4)
            .cookie_secure(false)
            .public_dir(public.path())
            .upload_temp_dir(public.path().join("temp"))
            .public_base_url(BASE_URL)
            .build()
            .expect("valid test config");

        let media = media.unwrap_or_else(|| {
            Arc::new(LocalMediaStore::new(&config.public_dir, &config.public_base_url))
        });
        let store = store.unwrap_or_else(|| Arc::new(MemoryUserStore::new()));

        let state = AppState::new(store, media, config);
        let server = TestServer::new(create_router(state.clone())).expect("start test server");

        Self {
            server,
            state,
            public,
        }
    }

    pub fn public_dir(&self) -> &Path {
        self.public.path()
    }

    pub fn uploads_dir(&self) -> PathBuf {
        self.public.path().join("uploads")
    }

    /// Files currently stored by the local media store
    pub fn uploaded_files(&self) -> Vec<PathBuf> {
        std::fs::read_dir(self.uploads_dir())
            .map(|entries| entries.filter_map(|e| e.ok()).map(|e| e.path()).collect())
            .unwrap_or_default()
    }

    /// Files left behind in the staging directory
    pub fn staged_files(&self) -> Vec<PathBuf> {
        std::fs::read_dir(self.public.path().join("temp"))
            .map(|entries| entries.filter_map(|e| e.ok()).map(|e| e.path()).collect())
            .unwrap_or_default()
    }
}
