//! Error types for the delivery pipeline
//!
//! Ineligible input is not an error: the rewriter passes it through
//! unchanged. Errors here cover construction failures (which degrade to
//! the original URL at the public surface), invalid parameters, and
//! terminal fetch failures surfaced to the deferred loader.

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum DeliveryError {
    /// Invalid transformation parameter
    #[error("Invalid parameter '{param}': {message}")]
    InvalidParameter { param: String, message: String },

    /// Quality value out of range
    #[error("Invalid quality {quality}: must be 1-100")]
    InvalidQuality { quality: u8 },

    /// Provider URL construction failed (malformed source, encoding error)
    #[error("URL construction failed for '{url}': {message}")]
    UrlConstruction { url: String, message: String },

    /// Network image fetch failed; terminal for the loading instance
    #[error("Image fetch failed for '{url}': {message}")]
    FetchFailed { url: String, message: String },
}

impl DeliveryError {
    /// Helper constructors for common error patterns
    pub fn invalid_param(param: impl Into<String>, message: impl Into<String>) -> Self {
        DeliveryError::InvalidParameter {
            param: param.into(),
            message: message.into(),
        }
    }

    pub fn url_construction(url: impl Into<String>, message: impl Into<String>) -> Self {
        DeliveryError::UrlConstruction {
            url: url.into(),
            message: message.into(),
        }
    }

    pub fn fetch_failed(url: impl Into<String>, message: impl Into<String>) -> Self {
        DeliveryError::FetchFailed {
            url: url.into(),
            message: message.into(),
        }
    }
}
