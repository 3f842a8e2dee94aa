/**
 * Application State Management
 *
 * This module defines the application state passed to every handler.
 *
 * # Architecture
 *
 * `AppState` holds explicit handles to every collaborator a handler may
 * need:
 * - the user store (PostgreSQL or in-memory)
 * - the token issuer (access/refresh secrets and lifetimes)
 * - the media uploader (Cloudinary or local directory)
 * - the loaded configuration
 *
 * Everything is behind an `Arc`, so cloning the state per request is cheap.
 * Handlers and the session middleware take `State<AppState>` and read the
 * fields they need.
 */

use std::sync::Arc;

use crate::backend::auth::sessions::TokenIssuer;
use crate::backend::auth::store::SharedUserStore;
use crate::backend::media::SharedMediaUploader;
use crate::shared::AppConfig;

/// Shared handles passed to every handler
#[derive(Clone)]
pub struct AppState {
    pub users: SharedUserStore,
    pub tokens: Arc<TokenIssuer>,
    pub media: SharedMediaUploader,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(
        users: SharedUserStore,
        media: SharedMediaUploader,
        config: AppConfig,
    ) -> Self {
        Self {
            users,
            tokens: Arc::new(TokenIssuer::from_config(&config)),
            media,
            config: Arc::new(config),
        }
    }
}
