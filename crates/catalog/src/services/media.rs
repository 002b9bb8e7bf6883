//! Media host client for product image uploads.
//!
//! Forwards base64 data-URI image payloads to the Cloudinary upload
//! endpoint, scoped to the configured storage folder, and returns the
//! durable secure URL. Failures are propagated; nothing is retried here.

use std::time::{SystemTime, UNIX_EPOCH};

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use thiserror::Error;
use url::Url;

use crate::config::MediaConfig;

/// Media host API base URL.
const BASE_URL: &str = "https://api.cloudinary.com/v1_1";

/// Errors that can occur when uploading media.
#[derive(Debug, Error)]
pub enum MediaError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// The submitted payload is not a decodable base64 data URI.
    #[error("invalid image payload: {0}")]
    InvalidPayload(String),

    /// The API response did not contain a usable secure URL.
    #[error("invalid API response: {0}")]
    InvalidResponse(String),
}

/// Media host client for image uploads.
#[derive(Clone)]
pub struct MediaClient {
    client: reqwest::Client,
    upload_url: String,
    api_key: String,
    api_secret: SecretString,
    folder: String,
}

/// Successful upload response (the fields we consume).
#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
}

impl MediaClient {
    /// Create a new media host client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &MediaConfig) -> Result<Self, MediaError> {
        let client = reqwest::Client::builder().build()?;

        Ok(Self {
            client,
            upload_url: format!("{BASE_URL}/{}/image/upload", config.cloud_name),
            api_key: config.api_key.clone(),
            api_secret: config.api_secret.clone(),
            folder: config.upload_folder.clone(),
        })
    }

    /// Upload an image and return its durable secure URL.
    ///
    /// The payload must already be a base64 data URI
    /// (`data:image/png;base64,...`); the media host accepts it directly.
    ///
    /// # Errors
    ///
    /// Returns error if the payload is not a decodable data URI, if the
    /// request fails, or if the host rejects the upload.
    pub async fn upload_image(&self, data_uri: &str) -> Result<String, MediaError> {
        validate_data_uri(data_uri)?;

        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        let signature = sign_upload(&self.folder, timestamp, self.api_secret.expose_secret());
        let timestamp_str = timestamp.to_string();

        let form = [
            ("file", data_uri),
            ("folder", self.folder.as_str()),
            ("timestamp", timestamp_str.as_str()),
            ("api_key", self.api_key.as_str()),
            ("signature", signature.as_str()),
            ("signature_algorithm", "sha256"),
        ];

        let response = self.client.post(&self.upload_url).form(&form).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(MediaError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let upload: UploadResponse = response
            .json()
            .await
            .map_err(|e| MediaError::InvalidResponse(e.to_string()))?;

        let url = Url::parse(&upload.secure_url)
            .map_err(|e| MediaError::InvalidResponse(format!("secure_url: {e}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(MediaError::InvalidResponse(format!(
                "secure_url has scheme '{}', expected http(s)",
                url.scheme()
            )));
        }

        tracing::info!(secure_url = %upload.secure_url, folder = %self.folder, "Image uploaded");

        Ok(upload.secure_url)
    }
}

/// Compute the request signature over the signed parameters.
///
/// The host signs the sorted parameter string (here `folder` and
/// `timestamp`) concatenated with the API secret, hashed with SHA-256.
fn sign_upload(folder: &str, timestamp: u64, api_secret: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(format!("folder={folder}&timestamp={timestamp}"));
    hasher.update(api_secret);
    hex::encode(hasher.finalize())
}

/// Check that a payload is a base64 data URI we can forward.
fn validate_data_uri(data_uri: &str) -> Result<(), MediaError> {
    let rest = data_uri
        .strip_prefix("data:")
        .ok_or_else(|| MediaError::InvalidPayload("missing 'data:' prefix".to_owned()))?;

    let (meta, payload) = rest
        .split_once(',')
        .ok_or_else(|| MediaError::InvalidPayload("missing ',' separator".to_owned()))?;

    if !meta.ends_with(";base64") {
        return Err(MediaError::InvalidPayload(
            "payload is not base64-encoded".to_owned(),
        ));
    }

    if payload.is_empty() {
        return Err(MediaError::InvalidPayload("empty payload".to_owned()));
    }

    BASE64
        .decode(payload)
        .map_err(|e| MediaError::InvalidPayload(format!("undecodable base64: {e}")))?;

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    // "hello" base64-encoded
    const SAMPLE_DATA_URI: &str = "data:image/png;base64,aGVsbG8=";

    #[test]
    fn test_validate_data_uri_accepts_base64() {
        assert!(validate_data_uri(SAMPLE_DATA_URI).is_ok());
    }

    #[test]
    fn test_validate_data_uri_rejects_plain_url() {
        let err = validate_data_uri("https://example.com/cat.png").unwrap_err();
        assert!(matches!(err, MediaError::InvalidPayload(_)));
    }

    #[test]
    fn test_validate_data_uri_rejects_missing_separator() {
        let err = validate_data_uri("data:image/png;base64").unwrap_err();
        assert!(matches!(err, MediaError::InvalidPayload(_)));
    }

    #[test]
    fn test_validate_data_uri_rejects_non_base64_encoding() {
        let err = validate_data_uri("data:text/plain,hello").unwrap_err();
        assert!(matches!(err, MediaError::InvalidPayload(_)));
    }

    #[test]
    fn test_validate_data_uri_rejects_undecodable_payload() {
        let err = validate_data_uri("data:image/png;base64,!!!not-base64!!!").unwrap_err();
        assert!(matches!(err, MediaError::InvalidPayload(_)));
    }

    #[test]
    fn test_validate_data_uri_rejects_empty_payload() {
        let err = validate_data_uri("data:image/png;base64,").unwrap_err();
        assert!(matches!(err, MediaError::InvalidPayload(_)));
    }

    #[test]
    fn test_sign_upload_is_deterministic() {
        let a = sign_upload("products", 1_700_000_000, "topsecret");
        let b = sign_upload("products", 1_700_000_000, "topsecret");
        assert_eq!(a, b);
        // 32-byte SHA-256 digest, hex-encoded
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_sign_upload_varies_with_inputs() {
        let base = sign_upload("products", 1_700_000_000, "topsecret");
        assert_ne!(base, sign_upload("avatars", 1_700_000_000, "topsecret"));
        assert_ne!(base, sign_upload("products", 1_700_000_001, "topsecret"));
        assert_ne!(base, sign_upload("products", 1_700_000_000, "othersecret"));
    }

    #[test]
    fn test_sign_upload_known_digest() {
        // sha256("folder=products&timestamp=0" + "s")
        let sig = sign_upload("products", 0, "s");
        assert_eq!(
            sig,
            hex::encode(Sha256::digest(b"folder=products&timestamp=0s"))
        );
    }
}
