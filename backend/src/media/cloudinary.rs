//! Cloudinary signed upload client

use super::{ImageHost, MediaError};
use crate::config::{MediaConfig, SignatureAlgorithm};
use async_trait::async_trait;
use chrono::Utc;
use ring::digest;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::{debug, warn};

/// Subset of the upload API response we use
#[derive(Debug, Deserialize)]
struct UploadResult {
    secure_url: Option<String>,
}

/// Cloudinary-backed image host
///
/// Requests are signed with the configured digest, which has to match the
/// account's signature algorithm.
pub struct CloudinaryHost {
    client: reqwest::Client,
    upload_url: String,
    api_key: String,
    api_secret: SecretString,
    folder: String,
    algorithm: SignatureAlgorithm,
    configured: bool,
}

impl CloudinaryHost {
    pub fn from_config(config: &MediaConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            upload_url: format!(
                "{}/{}/image/upload",
                config.api_base.trim_end_matches('/'),
                config.cloud_name
            ),
            api_key: config.api_key.clone(),
            api_secret: SecretString::new(config.api_secret.clone()),
            folder: config.folder.clone(),
            algorithm: config.signature_algorithm,
            configured: config.is_configured(),
        }
    }
}

#[async_trait]
impl ImageHost for CloudinaryHost {
    async fn upload(&self, data_url: &str) -> Result<String, MediaError> {
        if !self.configured {
            return Err(MediaError::NotConfigured);
        }

        let timestamp = Utc::now().timestamp().to_string();
        let signature = sign_params(
            &[("folder", self.folder.as_str()), ("timestamp", timestamp.as_str())],
            self.api_secret.expose_secret(),
            self.algorithm,
        );

        let response = self
            .client
            .post(&self.upload_url)
            .form(&[
                ("file", data_url),
                ("folder", self.folder.as_str()),
                ("timestamp", timestamp.as_str()),
                ("api_key", self.api_key.as_str()),
                ("signature", signature.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body: serde_json::Value = response.json().await.unwrap_or_default();
            let message = body["error"]["message"]
                .as_str()
                .unwrap_or("no error message")
                .to_string();
            warn!(status = status.as_u16(), %message, "Image upload rejected");
            return Err(MediaError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let result: UploadResult = response.json().await?;
        let url = result.secure_url.ok_or(MediaError::MissingUrl)?;
        debug!(%url, "Image uploaded");
        Ok(url)
    }
}

/// Sign upload parameters: digest over `k=v` pairs sorted by key and
/// joined with `&`, followed by the API secret, hex encoded.
pub fn sign_params(
    params: &[(&str, &str)],
    secret: &str,
    algorithm: SignatureAlgorithm,
) -> String {
    let mut sorted = params.to_vec();
    sorted.sort_by(|a, b| a.0.cmp(b.0));

    let to_sign = sorted
        .iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect::<Vec<_>>()
        .join("&");

    let mut context = digest::Context::new(match algorithm {
        SignatureAlgorithm::Sha1 => &digest::SHA1_FOR_LEGACY_USE_ONLY,
        SignatureAlgorithm::Sha256 => &digest::SHA256,
    });
    context.update(to_sign.as_bytes());
    context.update(secret.as_bytes());
    hex::encode(context.finish())
}
