/**
 * Local Media Store
 *
 * Copies staged files into `<public_dir>/uploads` under a random name. The
 * router serves `public_dir` at `/static`, so the returned URL is
 * `<public_base_url>/static/uploads/<name>`.
 */

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use super::{MediaError, MediaUploader, UploadedMedia};

pub const UPLOADS_DIR: &str = "uploads";

#[derive(Debug, Clone)]
pub struct LocalMediaStore {
    dir: PathBuf,
    base_url: String,
}

impl LocalMediaStore {
    pub fn new(public_dir: &Path, public_base_url: &str) -> Self {
        Self {
            dir: public_dir.join(UPLOADS_DIR),
            base_url: format!(
                "{}/static/{}",
                public_base_url.trim_end_matches('/'),
                UPLOADS_DIR
            ),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl MediaUploader for LocalMediaStore {
    async fn upload(&self, path: &Path) -> Result<UploadedMedia, MediaError> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let mut name = Uuid::new_v4().simple().to_string();
        if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
            name.push('.');
            name.push_str(ext);
        }
        tokio::fs::copy(path, self.dir.join(&name)).await?;

        tracing::debug!("Stored media {} locally", name);
        Ok(UploadedMedia {
            url: format!("{}/{}", self.base_url, name),
            public_id: name,
            resource_type: None,
        })
    }

    async fn delete(&self, media: &UploadedMedia) -> Result<(), MediaError> {
        let id = &media.public_id;
        if id.is_empty() || id.contains(['/', '\\']) || id.starts_with('.') {
            return Err(MediaError::InvalidId(id.clone()));
        }
        match tokio::fs::remove_file(self.dir.join(id)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
