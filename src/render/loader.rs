//! Asset loading: resolves garment and design image URLs to decoded images.
//!
//! The compositor only sees the [`AssetLoader`] trait, so callers (and tests)
//! decide where pixels come from. [`UrlAssetLoader`] covers the URL forms the
//! storefront hands us:
//!
//! | Form | Example |
//! |------|---------|
//! | HTTP(S) | `https://cdn.example.com/mockups/tee-front.png` |
//! | data URL | `data:image/png;base64,iVBORw0...` |
//! | file URL | `file:///srv/mockups/tee-front.png` |
//! | bare path | `mockups/tee-front.png` |

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::DynamicImage;

use crate::DrapeError;

/// Source of decoded images for the compositor.
#[async_trait]
pub trait AssetLoader: Send + Sync {
    /// Fetch and decode the image at `url`.
    async fn load(&self, url: &str) -> Result<DynamicImage, DrapeError>;
}

/// Loads images from HTTP(S), `data:` URLs and the local filesystem.
#[derive(Debug, Clone)]
pub struct UrlAssetLoader {
    http_client: reqwest::Client,
}

impl UrlAssetLoader {
    /// Create a loader with its own HTTP client.
    pub fn new() -> Result<Self, DrapeError> {
        let http_client = reqwest::Client::builder()
            .user_agent(concat!("drape/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DrapeError::Fetch(format!("HTTP client error: {}", e)))?;
        Ok(Self { http_client })
    }

    /// Create a loader sharing an existing HTTP client.
    pub fn with_client(http_client: reqwest::Client) -> Self {
        Self { http_client }
    }

    /// Raw bytes behind `url`, without decoding.
    pub async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, DrapeError> {
        if url.starts_with("data:") {
            return decode_data_url(url);
        }
        if url.starts_with("http://") || url.starts_with("https://") {
            return self.fetch_http(url).await;
        }
        if let Some(path) = url.strip_prefix("file://") {
            return read_file(path).await;
        }
        if url.contains("://") {
            return Err(DrapeError::Fetch(format!("Unsupported URL scheme: {}", url)));
        }
        read_file(url).await
    }

    async fn fetch_http(&self, url: &str) -> Result<Vec<u8>, DrapeError> {
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| DrapeError::Fetch(format!("Failed to download {}: {}", url, e)))?;
        if !response.status().is_success() {
            return Err(DrapeError::Fetch(format!(
                "Failed to download {}: HTTP {}",
                url,
                response.status()
            )));
        }
        let bytes = response
            .bytes()
            .await
            .map_err(|e| DrapeError::Fetch(format!("Failed to read image data: {}", e)))?;
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl AssetLoader for UrlAssetLoader {
    async fn load(&self, url: &str) -> Result<DynamicImage, DrapeError> {
        let bytes = self.fetch_bytes(url).await?;
        decode_image(&bytes, url)
    }
}

async fn read_file(path: &str) -> Result<Vec<u8>, DrapeError> {
    tokio::fs::read(path)
        .await
        .map_err(|e| DrapeError::Fetch(format!("Failed to read {}: {}", path, e)))
}

/// Decode image bytes, naming `origin` in the error.
pub fn decode_image(bytes: &[u8], origin: &str) -> Result<DynamicImage, DrapeError> {
    image::load_from_memory(bytes)
        .map_err(|e| DrapeError::Image(format!("Failed to decode {}: {}", short_origin(origin), e)))
}

/// Payload of a `data:` URL.
///
/// Base64 payloads are decoded; anything else is taken as raw bytes.
pub fn decode_data_url(url: &str) -> Result<Vec<u8>, DrapeError> {
    let rest = url
        .strip_prefix("data:")
        .ok_or_else(|| DrapeError::Fetch("Not a data URL".to_string()))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| DrapeError::Fetch("Malformed data URL: missing ','".to_string()))?;

    if header.split(';').any(|part| part.eq_ignore_ascii_case("base64")) {
        STANDARD
            .decode(payload.trim())
            .map_err(|e| DrapeError::Fetch(format!("Invalid base64 in data URL: {}", e)))
    } else {
        Ok(payload.as_bytes().to_vec())
    }
}

/// Data URLs are huge; keep only the media type in messages.
fn short_origin(origin: &str) -> &str {
    if origin.starts_with("data:") {
        origin.split(',').next().unwrap_or("data:")
    } else {
        origin
    }
}
