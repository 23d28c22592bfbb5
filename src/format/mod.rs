//! Format capability probe
//!
//! Probes the process's ability to encode modern image formats and caches
//! the answer for the process lifetime. Preference order follows
//! compression efficiency: AVIF > WebP > JPEG. Any probe failure falls
//! back to JPEG, which every environment can produce.

use std::sync::OnceLock;

use crate::rewrite::OutputFormat;

/// Best image format the current process can encode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatCapability {
    Avif,
    Webp,
    Jpeg,
}

impl FormatCapability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Avif => "avif",
            Self::Webp => "webp",
            Self::Jpeg => "jpeg",
        }
    }

    /// The transform output format corresponding to this capability
    pub fn output_format(&self) -> OutputFormat {
        match self {
            Self::Avif => OutputFormat::Avif,
            Self::Webp => OutputFormat::Webp,
            Self::Jpeg => OutputFormat::Jpeg,
        }
    }
}

static CAPABILITY: OnceLock<FormatCapability> = OnceLock::new();

/// Detect the best encodable format, memoized for the process lifetime
///
/// The probe encodes a single RGBA pixel with each candidate encoder and
/// runs at most once; every later call returns the cached value. Callers
/// may therefore invoke this per image without cost.
pub fn detect_format() -> FormatCapability {
    *CAPABILITY.get_or_init(probe_capability)
}

fn probe_capability() -> FormatCapability {
    if probe_avif() {
        FormatCapability::Avif
    } else if probe_webp() {
        FormatCapability::Webp
    } else {
        FormatCapability::Jpeg
    }
}

/// Probe support for a single format, bypassing the memo
///
/// Used by the progressive loader, which decides between two concrete
/// candidate sources rather than asking for the overall best format.
pub fn supports_format(format: FormatCapability) -> bool {
    match format {
        FormatCapability::Avif => probe_avif(),
        FormatCapability::Webp => probe_webp(),
        FormatCapability::Jpeg => true,
    }
}

fn probe_avif() -> bool {
    let pixel = [rgb::RGBA8::new(0, 0, 0, 255)];
    ravif::Encoder::new()
        .with_quality(80.0)
        .with_speed(10)
        .encode_rgba(imgref::Img::new(&pixel[..], 1, 1))
        .is_ok()
}

fn probe_webp() -> bool {
    use image::codecs::webp::WebPEncoder;
    use image::ImageEncoder as _;
    use std::io::Cursor;

    let mut output = Cursor::new(Vec::new());
    WebPEncoder::new_lossless(&mut output)
        .write_image(&[0, 0, 0, 255], 1, 1, image::ColorType::Rgba8)
        .is_ok()
}
