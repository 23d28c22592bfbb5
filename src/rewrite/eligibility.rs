//! Source eligibility gate
//!
//! Determines whether a source URL may be rewritten at all. Re-wrapping an
//! already-optimized URL, a data/blob URI, or a non-image resource would
//! corrupt it, so ineligible sources always pass through unchanged.

use crate::constants::{
    OPTIMIZATION_PARAMS, PROVIDER_DOMAINS, RASTER_EXTENSIONS, VERCEL_IMAGE_PATH,
};

/// Inline data URI (`data:`)
pub fn is_data_uri(url: &str) -> bool {
    url.starts_with("data:")
}

/// Object URL (`blob:`)
pub fn is_blob_uri(url: &str) -> bool {
    url.starts_with("blob:")
}

/// URL already pointing at a known delivery backend
fn on_provider_domain(url: &str) -> bool {
    PROVIDER_DOMAINS.iter().any(|domain| url.contains(domain)) || url.contains(VERCEL_IMAGE_PATH)
}

/// URL already carrying optimization query parameters
fn has_optimization_params(url: &str) -> bool {
    let Some((_, query)) = url.split_once('?') else {
        return false;
    };
    query
        .split('&')
        .filter_map(|pair| pair.split_once('=').map(|(k, _)| k))
        .any(|key| OPTIMIZATION_PARAMS.contains(&key))
}

/// Path carries a recognized raster-image extension (query/fragment ignored)
fn has_raster_extension(url: &str) -> bool {
    let end = url
        .find('?')
        .unwrap_or(url.len())
        .min(url.find('#').unwrap_or(url.len()));
    let path = &url[..end];

    let Some((_, ext)) = path.rsplit_once('.') else {
        return false;
    };
    if ext.is_empty() || ext.contains('/') {
        return false;
    }
    let ext = ext.to_lowercase();
    RASTER_EXTENSIONS.contains(&ext.as_str())
}

/// Whether a source URL may be rewritten
///
/// All conditions must hold: not a data/blob URI, not on a provider
/// domain, not already optimized, and a recognized raster extension.
pub fn is_eligible(url: &str) -> bool {
    !url.is_empty()
        && !is_data_uri(url)
        && !is_blob_uri(url)
        && !on_provider_domain(url)
        && !has_optimization_params(url)
        && has_raster_extension(url)
}
