//! Delivery providers and per-provider URL construction
//!
//! Each provider has its own transform syntax: Cloudinary and ImageKit use
//! segment-style token lists in the path, Vercel and the Generic fallback
//! use ordinary query parameters. All providers honor explicit
//! width/height/quality/format/fit/blur/sharpen and request automatic
//! format/quality negotiation when those are unset.

use super::params::{FitMode, OutputFormat, TransformRequest};
use crate::constants::{DEFAULT_QUALITY, DEFAULT_VERCEL_WIDTH};
use crate::error::DeliveryError;

/// A third-party image-delivery backend
///
/// Resolved once per process from environment configuration and then
/// dispatched via exhaustive match; see [`crate::config`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Provider {
    Cloudinary { cloud_name: String },
    ImageKit { id: String },
    Vercel { host: String },
    Generic,
}

impl Provider {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Cloudinary { .. } => "cloudinary",
            Self::ImageKit { .. } => "imagekit",
            Self::Vercel { .. } => "vercel",
            Self::Generic => "generic",
        }
    }

    /// Build the provider-specific fetch URL for an eligible source
    pub(crate) fn build_url(
        &self,
        url: &str,
        opts: &TransformRequest,
    ) -> Result<String, DeliveryError> {
        opts.validate()?;
        match self {
            Self::Cloudinary { cloud_name } => build_cloudinary(cloud_name, url, opts),
            Self::ImageKit { id } => build_imagekit(id, url, opts),
            Self::Vercel { host } => build_vercel(host, url, opts),
            Self::Generic => build_generic(url, opts),
        }
    }
}

/// Absolute sources go through fetch-style endpoints; anything else is
/// addressed as a provider-hosted asset.
fn is_absolute(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

fn build_cloudinary(
    cloud_name: &str,
    url: &str,
    opts: &TransformRequest,
) -> Result<String, DeliveryError> {
    let mut tokens = Vec::new();

    if let Some(w) = opts.width {
        tokens.push(format!("w_{}", w));
    }
    if let Some(h) = opts.height {
        tokens.push(format!("h_{}", h));
    }
    if opts.width.is_some() || opts.height.is_some() {
        tokens.push(format!("c_{}", cloudinary_crop(opts.fit)));
    }
    match opts.quality {
        Some(q) => tokens.push(format!("q_{}", q)),
        None => tokens.push("q_auto".to_string()),
    }
    match opts.format {
        OutputFormat::Auto => tokens.push("f_auto".to_string()),
        f => tokens.push(format!("f_{}", f.as_str())),
    }
    if let Some(blur) = opts.blur {
        tokens.push(format!("e_blur:{}", blur));
    }
    if let Some(sharpen) = opts.sharpen {
        tokens.push(format!("e_sharpen:{}", sharpen));
    }

    let tokens = tokens.join(",");

    if is_absolute(url) {
        let encoded = urlencoding::encode(url);
        Ok(format!(
            "https://res.cloudinary.com/{}/image/fetch/{}/{}",
            cloud_name, tokens, encoded
        ))
    } else {
        let asset = url.trim_start_matches('/');
        Ok(format!(
            "https://res.cloudinary.com/{}/image/upload/{}/{}",
            cloud_name, tokens, asset
        ))
    }
}

/// Closest Cloudinary crop mode for each fit
fn cloudinary_crop(fit: FitMode) -> &'static str {
    match fit {
        FitMode::Cover => "fill",
        FitMode::Contain => "fit",
        FitMode::Fill => "scale",
        FitMode::Inside => "limit",
        FitMode::Outside => "mfit",
    }
}

fn build_imagekit(id: &str, url: &str, opts: &TransformRequest) -> Result<String, DeliveryError> {
    let mut tokens = Vec::new();

    if let Some(w) = opts.width {
        tokens.push(format!("w-{}", w));
    }
    if let Some(h) = opts.height {
        tokens.push(format!("h-{}", h));
    }
    if opts.width.is_some() || opts.height.is_some() {
        if let Some(crop) = imagekit_crop(opts.fit) {
            tokens.push(crop.to_string());
        }
    }
    // Omitting q selects ImageKit's automatic quality
    if let Some(q) = opts.quality {
        tokens.push(format!("q-{}", q));
    }
    match opts.format {
        OutputFormat::Auto => tokens.push("f-auto".to_string()),
        f => tokens.push(format!("f-{}", f.as_str())),
    }
    if let Some(blur) = opts.blur {
        tokens.push(format!("bl-{}", blur));
    }
    if let Some(sharpen) = opts.sharpen {
        tokens.push(format!("e-sharpen-{}", sharpen));
    }

    let tokens = tokens.join(",");

    let source = if is_absolute(url) {
        urlencoding::encode(url).into_owned()
    } else {
        url.trim_start_matches('/').to_string()
    };

    Ok(format!("https://ik.imagekit.io/{}/tr:{}/{}", id, tokens, source))
}

/// Closest ImageKit crop strategy for each fit; Cover is the service default
fn imagekit_crop(fit: FitMode) -> Option<&'static str> {
    match fit {
        FitMode::Cover => None,
        FitMode::Contain | FitMode::Inside => Some("c-at_max"),
        FitMode::Fill => Some("c-force"),
        FitMode::Outside => Some("c-at_least"),
    }
}

fn build_vercel(host: &str, url: &str, opts: &TransformRequest) -> Result<String, DeliveryError> {
    // The endpoint requires explicit width and quality; format negotiation
    // happens on the transport via the Accept header.
    let width = opts.width.unwrap_or(DEFAULT_VERCEL_WIDTH);
    let quality = opts.quality.unwrap_or(DEFAULT_QUALITY);
    let encoded = urlencoding::encode(url);

    Ok(format!(
        "https://{}/_next/image?url={}&w={}&q={}",
        host, encoded, width, quality
    ))
}

fn build_generic(url: &str, opts: &TransformRequest) -> Result<String, DeliveryError> {
    // Append/overwrite transform parameters on the original URL while
    // preserving unrelated existing query parameters.
    let (path, query) = match url.split_once('?') {
        Some((p, q)) => (p, Some(q)),
        None => (url, None),
    };

    let mut pairs: Vec<(String, String)> = Vec::new();
    if let Some(query) = query {
        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            if !is_transform_key(key) {
                pairs.push((key.to_string(), value.to_string()));
            }
        }
    }

    if let Some(w) = opts.width {
        pairs.push(("w".to_string(), w.to_string()));
    }
    if let Some(h) = opts.height {
        pairs.push(("h".to_string(), h.to_string()));
    }
    pairs.push((
        "q".to_string(),
        opts.quality.unwrap_or(DEFAULT_QUALITY).to_string(),
    ));
    if opts.format != OutputFormat::Auto {
        pairs.push(("fm".to_string(), opts.format.as_str().to_string()));
    }
    if opts.fit != FitMode::Cover {
        pairs.push(("fit".to_string(), opts.fit.as_str().to_string()));
    }
    if let Some(blur) = opts.blur {
        pairs.push(("blur".to_string(), blur.to_string()));
    }
    if let Some(sharpen) = opts.sharpen {
        pairs.push(("sharpen".to_string(), sharpen.to_string()));
    }

    let query = pairs
        .iter()
        .map(|(k, v)| {
            if v.is_empty() {
                k.clone()
            } else {
                format!("{}={}", k, v)
            }
        })
        .collect::<Vec<_>>()
        .join("&");

    Ok(format!("{}?{}", path, query))
}

fn is_transform_key(key: &str) -> bool {
    matches!(key, "w" | "h" | "q" | "quality" | "fm" | "fit" | "blur" | "sharpen")
}
