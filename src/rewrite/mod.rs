//! URL rewriting module
//!
//! Turns a source image reference plus a [`TransformRequest`] into a
//! provider-specific fetch URL, a responsive candidate list, and a sizing
//! hint string.
//!
//! # Eligibility
//!
//! A URL is rewritten only when it passes the eligibility gate: not a
//! data/blob URI, not already on a provider domain, not already carrying
//! optimization parameters, and carrying a recognized raster extension.
//! Ineligible URLs pass through unchanged.
//!
//! # Failure behavior
//!
//! Construction failures never propagate to the caller: `optimize` logs a
//! warning and returns the original URL so the image still renders,
//! merely unoptimized.

pub mod eligibility;
pub mod params;
pub mod provider;
pub mod responsive;

// Re-export commonly used types
pub use eligibility::{is_blob_uri, is_data_uri, is_eligible};
pub use params::{FitMode, OutputFormat, QualityTier, TransformRequest};
pub use provider::Provider;
pub use responsive::{responsive_set, responsive_set_with, sizes_hint, SizesHint};

/// Rewrite a source URL through a specific provider
///
/// Ineligible URLs and construction failures both yield the original URL.
pub fn optimize_with(provider: &Provider, url: &str, opts: &TransformRequest) -> String {
    if !eligibility::is_eligible(url) {
        return url.to_string();
    }

    match provider.build_url(url, opts) {
        Ok(rewritten) => rewritten,
        Err(e) => {
            tracing::warn!(
                url = %url,
                provider = provider.name(),
                error = %e,
                "URL construction failed, serving original"
            );
            url.to_string()
        }
    }
}

/// [`optimize_with`] against the process-wide provider
pub fn optimize(url: &str, opts: &TransformRequest) -> String {
    optimize_with(crate::config::provider(), url, opts)
}
