/**
 * Upload Staging
 *
 * Multipart file fields are written to a named temporary file inside the
 * configured temp directory before upload. The file is removed when the
 * `StagedFile` is dropped, so every exit path of a handler cleans up.
 */

use std::path::Path;
use tempfile::NamedTempFile;

use super::MediaError;

/// A multipart file written to disk for the duration of a request
#[derive(Debug)]
pub struct StagedFile {
    file: NamedTempFile,
}

impl StagedFile {
    /// Write `bytes` to a new temporary file in `dir`
    ///
    /// The extension of `original_name` is kept so media hosts can infer the
    /// file type.
    pub async fn write(
        dir: &Path,
        original_name: Option<&str>,
        bytes: &[u8],
    ) -> Result<Self, MediaError> {
        tokio::fs::create_dir_all(dir).await?;

        let suffix = original_name.and_then(extension).unwrap_or_default();
        let file = tempfile::Builder::new()
            .prefix("upload-")
            .suffix(&suffix)
            .tempfile_in(dir)?;
        tokio::fs::write(file.path(), bytes).await?;

        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

/// `.ext` of a client-supplied file name, if it is short and alphanumeric
fn extension(name: &str) -> Option<String> {
    let ext = Path::new(name).extension()?.to_str()?;
    if ext.is_empty() || ext.len() > 10 || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(format!(".{}", ext.to_ascii_lowercase()))
}
