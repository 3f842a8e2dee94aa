//! Media Module
//!
//! Avatar and cover images are not stored by the user service itself: the
//! multipart file is staged to a temporary file, handed to a
//! [`MediaUploader`], and only the returned URL is persisted on the user.
//!
//! # Module Structure
//!
//! ```text
//! media/
//! ├── mod.rs          - MediaUploader trait and errors
//! ├── staging.rs      - Temporary files for multipart uploads
//! ├── cloudinary.rs   - Cloudinary signed upload/destroy
//! └── local.rs        - Local directory served under /static
//! ```
//!
//! Cloudinary is used when its three credentials are configured; otherwise
//! files are copied into `<public_dir>/uploads`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

use crate::shared::AppConfig;

/// Multipart staging
pub mod staging;

/// Cloudinary client
pub mod cloudinary;

/// Local directory store
pub mod local;

pub use cloudinary::CloudinaryUploader;
pub use local::LocalMediaStore;
pub use staging::StagedFile;

/// A file accepted by the media host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedMedia {
    /// Durable URL stored on the user record
    pub url: String,
    /// Identifier used to delete the file again
    pub public_id: String,
    /// Host-side media kind, when the host distinguishes them
    /// (Cloudinary `image`, `video` or `raw`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
}

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("media file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("media host request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("media host rejected the request ({status}): {body}")]
    Rejected { status: u16, body: String },

    #[error("invalid media identifier: {0}")]
    InvalidId(String),
}

/// Uploads a staged local file and returns its durable location
#[async_trait]
pub trait MediaUploader: Send + Sync {
    async fn upload(&self, path: &Path) -> Result<UploadedMedia, MediaError>;

    async fn delete(&self, media: &UploadedMedia) -> Result<(), MediaError>;
}

pub type SharedMediaUploader = Arc<dyn MediaUploader>;

/// Pick the media backend for a configuration
pub fn uploader_from_config(config: &AppConfig) -> Result<SharedMediaUploader, MediaError> {
    match &config.cloudinary {
        Some(cloudinary) => {
            tracing::info!("Uploading media to Cloudinary cloud {}", cloudinary.cloud_name);
            Ok(Arc::new(CloudinaryUploader::new(cloudinary.clone())?))
        }
        None => {
            tracing::info!(
                "Cloudinary not configured; storing media under {}",
                config.public_dir.join(local::UPLOADS_DIR).display()
            );
            Ok(Arc::new(LocalMediaStore::new(
                &config.public_dir,
                &config.public_base_url,
            )))
        }
    }
}

/// Delete uploaded media, logging instead of failing
pub async fn discard(uploader: &dyn MediaUploader, media: &UploadedMedia) {
    if let Err(e) = uploader.delete(media).await {
        tracing::error!("Failed to delete uploaded media {}: {:?}", media.public_id, e);
    } else {
        tracing::info!("Deleted orphaned media {}", media.public_id);
    }
}
