/**
 * Server Initialization
 *
 * Builds the application state from configuration and wires it into the
 * router.
 *
 * # Initialization Process
 *
 * 1. Select the user store (PostgreSQL or in-memory)
 * 2. Select the media uploader (Cloudinary or local directory)
 * 3. Create the token issuer from the configured secrets
 * 4. Create the router with all routes and layers
 */

use axum::Router;
use thiserror::Error;

use crate::backend::media::{uploader_from_config, MediaError};
use crate::backend::routes::router::create_router;
use crate::backend::server::config::load_user_store;
use crate::backend::server::state::AppState;
use crate::shared::AppConfig;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to initialise media uploads: {0}")]
    Media(#[from] MediaError),
    #[error("failed to prepare directory: {0}")]
    Io(#[from] std::io::Error),
}

/// Build application state from configuration
pub async fn build_state(config: AppConfig) -> Result<AppState, StartupError> {
    tokio::fs::create_dir_all(&config.upload_temp_dir).await?;
    tokio::fs::create_dir_all(&config.public_dir).await?;

    let users = load_user_store(&config).await;
    let media = uploader_from_config(&config)?;
    Ok(AppState::new(users, media, config))
}

/// Create and configure the Axum application
pub async fn create_app(config: AppConfig) -> Result<Router, StartupError> {
    tracing::info!("Initializing VideoTube backend server");
    let state = build_state(config).await?;
    let app = create_router(state);
    tracing::info!("Router configured");
    Ok(app)
}
