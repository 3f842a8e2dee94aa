/**
 * Cloudinary Uploader
 *
 * Signed uploads to `{base}/v1_1/{cloud}/auto/upload` and signed deletes to
 * `{base}/v1_1/{cloud}/{resource_type}/destroy`, using the resource type
 * Cloudinary reported for the upload.
 *
 * # Signing
 *
 * The signed parameters (everything except `file`, `api_key` and
 * `signature_algorithm`) are sorted by name, joined as `k=v&k=v`, the API
 * secret is appended, and the SHA-256 hex digest of that string is sent as
 * `signature` together with `signature_algorithm=sha256`.
 */

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{multipart, Client};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::path::Path;
use std::time::Duration;

use super::{MediaError, MediaUploader, UploadedMedia};
use crate::shared::CloudinaryConfig;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_RESOURCE_TYPE: &str = "image";

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
    public_id: String,
    #[serde(default)]
    resource_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DestroyResponse {
    result: String,
}

/// Media uploader backed by the Cloudinary upload API
#[derive(Debug, Clone)]
pub struct CloudinaryUploader {
    config: CloudinaryConfig,
    client: Client,
}

impl CloudinaryUploader {
    pub fn new(config: CloudinaryConfig) -> Result<Self, MediaError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { config, client })
    }

    fn endpoint(&self, resource: &str, action: &str) -> String {
        format!(
            "{}/v1_1/{}/{}/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.cloud_name,
            resource,
            action
        )
    }

    /// Sign a set of request parameters
    pub fn sign(&self, params: &[(&str, &str)]) -> String {
        sign_params(params, &self.config.api_secret)
    }

    /// Form carrying the signed parameters plus credentials
    fn signed_form(&self, params: &[(&str, &str)]) -> multipart::Form {
        let mut form = multipart::Form::new()
            .text("api_key", self.config.api_key.clone())
            .text("signature", self.sign(params))
            .text("signature_algorithm", "sha256");
        for (key, value) in params {
            form = form.text(key.to_string(), value.to_string());
        }
        form
    }

    async fn send(&self, url: &str, form: multipart::Form) -> Result<reqwest::Response, MediaError> {
        let response = self.client.post(url).multipart(form).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(MediaError::Rejected { status, body });
        }
        Ok(response)
    }
}

fn sign_params(params: &[(&str, &str)], secret: &str) -> String {
    let mut sorted = params.to_vec();
    sorted.sort_by(|a, b| a.0.cmp(b.0));
    let joined = sorted
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");
    format!("{:x}", Sha256::digest(format!("{}{}", joined, secret).as_bytes()))
}

#[async_trait]
impl MediaUploader for CloudinaryUploader {
    async fn upload(&self, path: &Path) -> Result<UploadedMedia, MediaError> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload")
            .to_string();

        let timestamp = Utc::now().timestamp().to_string();
        let form = self
            .signed_form(&[("timestamp", timestamp.as_str())])
            .part("file", multipart::Part::bytes(bytes).file_name(file_name));

        let response = self.send(&self.endpoint("auto", "upload"), form).await?;
        let body: UploadResponse = response.json().await?;

        tracing::info!("Uploaded media to Cloudinary as {}", body.public_id);
        Ok(UploadedMedia {
            url: body.secure_url,
            public_id: body.public_id,
            resource_type: body.resource_type,
        })
    }

    async fn delete(&self, media: &UploadedMedia) -> Result<(), MediaError> {
        let timestamp = Utc::now().timestamp().to_string();
        let form = self.signed_form(&[
            ("public_id", media.public_id.as_str()),
            ("timestamp", timestamp.as_str()),
        ]);

        let resource = media
            .resource_type
            .as_deref()
            .unwrap_or(DEFAULT_RESOURCE_TYPE);
        let response = self.send(&self.endpoint(resource, "destroy"), form).await?;
        let body: DestroyResponse = response.json().await?;
        if body.result != "ok" {
            tracing::warn!("Cloudinary destroy of {} returned {}", media.public_id, body.result);
        }
        Ok(())
    }
}
