//! Image hosting
//!
//! Uploaded images are forwarded to a third-party host; only the resulting
//! public URL is stored on todos. The host sits behind [`ImageHost`] so the
//! upload route does not depend on a specific provider.

mod cloudinary;

pub use cloudinary::{sign_params, CloudinaryHost};

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use thiserror::Error;

/// Largest accepted image, in decoded bytes
pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

/// Image host failures
#[derive(Error, Debug)]
pub enum MediaError {
    #[error("image host is not configured")]
    NotConfigured,

    #[error("request to image host failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("image host rejected upload ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("image host response did not include a URL")]
    MissingUrl,
}

/// Destination for uploaded images
#[async_trait]
pub trait ImageHost: Send + Sync {
    /// Upload a base64 data URL and return its public https URL
    async fn upload(&self, data_url: &str) -> Result<String, MediaError>;
}

/// A parsed `data:<mime>;base64,<payload>` URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl<'a> {
    pub mime_type: &'a str,
    pub byte_len: usize,
}

impl<'a> DataUrl<'a> {
    /// Parse and size-check an image data URL
    pub fn parse(input: &'a str) -> Result<Self, String> {
        let rest = input
            .strip_prefix("data:")
            .ok_or_else(|| "File must be a data URL".to_string())?;
        let (meta, payload) = rest
            .split_once(',')
            .ok_or_else(|| "Malformed data URL".to_string())?;
        let mime_type = meta
            .strip_suffix(";base64")
            .ok_or_else(|| "Data URL must be base64 encoded".to_string())?;

        if !mime_type.starts_with("image/") {
            return Err("Only image uploads are supported".to_string());
        }

        // Reject oversized payloads before decoding them
        if payload.len() / 4 * 3 > MAX_IMAGE_BYTES + 2 {
            return Err("Image cannot be larger than 10 MiB".to_string());
        }

        let bytes = STANDARD
            .decode(payload)
            .map_err(|_| "Data URL payload is not valid base64".to_string())?;

        if bytes.is_empty() {
            return Err("Uploaded file is empty".to_string());
        }
        if bytes.len() > MAX_IMAGE_BYTES {
            return Err("Image cannot be larger than 10 MiB".to_string());
        }

        Ok(Self {
            mime_type,
            byte_len: bytes.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const PNG_HEADER: &str = "data:image/png;base64,iVBORw0KGgo=";

    #[test]
    fn test_parse_valid_data_url() {
        let parsed = DataUrl::parse(PNG_HEADER).unwrap();
        assert_eq!(parsed.mime_type, "image/png");
        assert_eq!(parsed.byte_len, 8);
    }

    #[rstest]
    #[case("https://example.com/cat.png", "File must be a data URL")]
    #[case("data:image/png;base64", "Malformed data URL")]
    #[case("data:image/png,iVBORw0KGgo=", "Data URL must be base64 encoded")]
    #[case("data:text/plain;base64,aGVsbG8=", "Only image uploads are supported")]
    #[case("data:image/png;base64,not*base64", "Data URL payload is not valid base64")]
    #[case("data:image/png;base64,", "Uploaded file is empty")]
    fn test_parse_rejects(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(DataUrl::parse(input).unwrap_err(), expected);
    }

    #[test]
    fn test_parse_rejects_oversized_payload() {
        let payload = STANDARD.encode(vec![0u8; MAX_IMAGE_BYTES + 1]);
        let input = format!("data:image/jpeg;base64,{}", payload);
        assert!(DataUrl::parse(&input).is_err());
    }

    #[test]
    fn test_parse_accepts_payload_at_limit() {
        let payload = STANDARD.encode(vec![0u8; MAX_IMAGE_BYTES]);
        let input = format!("data:image/jpeg;base64,{}", payload);
        assert_eq!(DataUrl::parse(&input).unwrap().byte_len, MAX_IMAGE_BYTES);
    }
}
