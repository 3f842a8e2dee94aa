/**
 * Multipart Forms
 *
 * Reads a multipart request into its text fields and staged files. Only
 * the named file fields are staged; empty file parts count as absent.
 */

use axum::extract::{multipart::MultipartRejection, Multipart};
use std::collections::HashMap;
use std::path::Path;

use crate::backend::error::{BackendError, BackendResult};
use crate::backend::media::StagedFile;

/// Text fields and staged files of a multipart request
#[derive(Debug, Default)]
pub struct UploadForm {
    texts: HashMap<String, String>,
    files: HashMap<String, StagedFile>,
}

impl UploadForm {
    /// Drain a multipart body, staging `file_fields` under `temp_dir`
    pub async fn read(
        multipart: Result<Multipart, MultipartRejection>,
        temp_dir: &Path,
        file_fields: &[&str],
    ) -> BackendResult<Self> {
        let mut multipart = multipart.map_err(|rejection| {
            tracing::warn!("Rejected multipart body: {}", rejection.body_text());
            BackendError::bad_request(rejection.body_text())
        })?;

        let mut form = Self::default();
        while let Some(field) = multipart.next_field().await.map_err(|e| {
            tracing::warn!("Malformed multipart body: {}", e.body_text());
            BackendError::bad_request(e.body_text())
        })? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            if file_fields.contains(&name.as_str()) {
                let file_name = field.file_name().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| BackendError::bad_request(e.body_text()))?;
                if bytes.is_empty() {
                    continue;
                }
                let staged = StagedFile::write(temp_dir, file_name.as_deref(), &bytes).await?;
                form.files.insert(name, staged);
            } else if field.file_name().is_none() {
                let value = field
                    .text()
                    .await
                    .map_err(|e| BackendError::bad_request(e.body_text()))?;
                form.texts.insert(name, value);
            }
        }

        Ok(form)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.texts.get(name).map(String::as_str)
    }

    /// Take ownership of a staged file
    pub fn take_file(&mut self, name: &str) -> Option<StagedFile> {
        self.files.remove(name)
    }

    #[cfg(test)]
    pub(crate) fn with_texts(texts: &[(&str, &str)]) -> Self {
        Self {
            texts: texts
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            files: HashMap::new(),
        }
    }
}
