//! Image fetching
//!
//! The deferred loader issues its network fetch through this trait so
//! hosts can substitute their own transport. Fetch failures are terminal
//! for the loading instance; there are no retries or timeouts here.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use bytes::Bytes;

use crate::error::DeliveryError;

/// Asynchronous image transport
#[async_trait]
pub trait ImageFetcher: Send + Sync {
    /// Fetch the image bytes at `url`
    async fn fetch(&self, url: &str) -> Result<Bytes, DeliveryError>;
}

/// HTTP fetcher backed by a shared reqwest client
///
/// Also resolves base64 data URIs locally, since those never touch the
/// network. Blob URIs have no meaning outside a browser and fail.
pub struct HttpImageFetcher {
    client: reqwest::Client,
}

impl HttpImageFetcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpImageFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageFetcher for HttpImageFetcher {
    async fn fetch(&self, url: &str) -> Result<Bytes, DeliveryError> {
        if let Some(rest) = url.strip_prefix("data:") {
            return decode_data_uri(url, rest);
        }
        if url.starts_with("blob:") {
            return Err(DeliveryError::fetch_failed(
                url,
                "blob URIs cannot be fetched outside a browser",
            ));
        }

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DeliveryError::fetch_failed(url, e.to_string()))?
            .error_for_status()
            .map_err(|e| DeliveryError::fetch_failed(url, e.to_string()))?;

        response
            .bytes()
            .await
            .map_err(|e| DeliveryError::fetch_failed(url, e.to_string()))
    }
}

fn decode_data_uri(url: &str, rest: &str) -> Result<Bytes, DeliveryError> {
    let Some((meta, payload)) = rest.split_once(',') else {
        return Err(DeliveryError::fetch_failed(url, "malformed data URI"));
    };

    if meta.ends_with(";base64") {
        let decoded = STANDARD
            .decode(payload)
            .map_err(|e| DeliveryError::fetch_failed(url, e.to_string()))?;
        Ok(Bytes::from(decoded))
    } else {
        Ok(Bytes::from(payload.as_bytes().to_vec()))
    }
}
