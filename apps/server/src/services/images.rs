//! Image storage - Cloudinary-style upload client
//!
//! Files arrive as in-memory multipart parts, are encoded as base64 data
//! URIs, and posted to the image CDN with an api-key + SHA-256 signature.
//! The CDN answers with a durable URL that lands on the hotel record.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use futures::future::try_join_all;
use sha2::{Digest, Sha256};
use std::time::Duration;

use crate::{config::ImagesConfig, Result};

/// One uploaded file, held in memory.
#[derive(Debug, Clone)]
pub struct UploadImage {
    pub content_type: String,
    pub data: Vec<u8>,
}

/// Seam between handlers and the image CDN.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Upload one image; returns its durable URL.
    async fn upload(&self, image: &UploadImage) -> Result<String>;
}

/// Upload a batch concurrently; any failure fails the whole batch.
pub async fn upload_all(store: &dyn ImageStore, images: &[UploadImage]) -> Result<Vec<String>> {
    try_join_all(images.iter().map(|image| store.upload(image))).await
}

#[derive(Debug, serde::Deserialize)]
struct UploadResponse {
    secure_url: Option<String>,
    url: Option<String>,
}

pub struct CloudinaryStore {
    config: ImagesConfig,
    http: reqwest::Client,
}

impl CloudinaryStore {
    pub fn new(config: ImagesConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_seconds))
            .build()?;
        Ok(Self { config, http })
    }
}

#[async_trait]
impl ImageStore for CloudinaryStore {
    async fn upload(&self, image: &UploadImage) -> Result<String> {
        if !self.config.configured() {
            return Err(crate::Error::ImageUpload(
                "image storage is not configured".to_string(),
            ));
        }

        let timestamp = chrono::Utc::now().timestamp();
        let timestamp_field = timestamp.to_string();
        let signature = sign_upload(timestamp, &self.config.api_secret);
        let file = data_uri(image);

        let response = self
            .http
            .post(self.config.upload_url())
            .form(&[
                ("file", file.as_str()),
                ("api_key", self.config.api_key.as_str()),
                ("timestamp", timestamp_field.as_str()),
                ("signature", signature.as_str()),
                ("signature_algorithm", "sha256"),
            ])
            .send()
            .await
            .map_err(|e| crate::Error::ImageUpload(format!("upload request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(crate::Error::ImageUpload(format!(
                "upload returned HTTP {}",
                response.status()
            )));
        }

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| crate::Error::ImageUpload(format!("upload response parse failed: {e}")))?;

        body.secure_url
            .or(body.url)
            .ok_or_else(|| crate::Error::ImageUpload("upload response missing URL".to_string()))
    }
}

/// Encode the file exactly as the CDN expects: `data:<mime>;base64,<bytes>`.
fn data_uri(image: &UploadImage) -> String {
    format!(
        "data:{};base64,{}",
        image.content_type,
        STANDARD.encode(&image.data)
    )
}

/// Signature over the sorted request parameters plus the API secret.
fn sign_upload(timestamp: i64, api_secret: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(format!("timestamp={timestamp}{api_secret}"));
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_uri_encodes_mime_and_payload() {
        let image = UploadImage {
            content_type: "image/png".to_string(),
            data: vec![1, 2, 3],
        };
        assert_eq!(data_uri(&image), "data:image/png;base64,AQID");
    }

    #[test]
    fn signature_is_deterministic_hex_sha256() {
        let a = sign_upload(1_700_000_000, "secret");
        let b = sign_upload(1_700_000_000, "secret");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn signature_depends_on_secret() {
        assert_ne!(
            sign_upload(1_700_000_000, "secret-a"),
            sign_upload(1_700_000_000, "secret-b")
        );
    }
}
