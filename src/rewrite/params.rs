//! Transform request types
//!
//! A `TransformRequest` describes the desired output of a single image:
//! dimensions, quality, format, fit mode, and effects. Requests are
//! immutable once built; the responsive-set generator derives per-width
//! variants with [`TransformRequest::with_width_override`].

use std::str::FromStr;

use crate::constants::DEFAULT_QUALITY;
use crate::error::DeliveryError;

/// Output image format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Auto-negotiate with the delivery backend
    #[default]
    Auto,
    Webp,
    Avif,
    Jpeg,
    Png,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Webp => "webp",
            Self::Avif => "avif",
            Self::Jpeg => "jpeg",
            Self::Png => "png",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = DeliveryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(OutputFormat::Auto),
            "webp" => Ok(OutputFormat::Webp),
            "avif" => Ok(OutputFormat::Avif),
            "jpeg" | "jpg" => Ok(OutputFormat::Jpeg),
            "png" => Ok(OutputFormat::Png),
            _ => Err(DeliveryError::invalid_param(
                "format",
                format!("unknown format: {}", s),
            )),
        }
    }
}

/// How to fit the image within target dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FitMode {
    /// Crop to fill target dimensions (default)
    #[default]
    Cover,
    /// Scale to fit within dimensions, preserving aspect ratio
    Contain,
    /// Stretch to fill exactly (may distort)
    Fill,
    /// Scale down only, never up
    Inside,
    /// Scale to cover, may exceed target
    Outside,
}

impl FitMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cover => "cover",
            Self::Contain => "contain",
            Self::Fill => "fill",
            Self::Inside => "inside",
            Self::Outside => "outside",
        }
    }
}

impl FromStr for FitMode {
    type Err = DeliveryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cover" => Ok(FitMode::Cover),
            "contain" => Ok(FitMode::Contain),
            "fill" => Ok(FitMode::Fill),
            "inside" => Ok(FitMode::Inside),
            "outside" => Ok(FitMode::Outside),
            _ => Err(DeliveryError::invalid_param(
                "fit",
                format!("unknown fit mode: {}", s),
            )),
        }
    }
}

/// Caller-facing quality tier, mapped to a concrete quality value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QualityTier {
    /// Aggressive compression for thumbnails and gallery grids
    Low,
    /// Balanced default
    #[default]
    Standard,
    /// Hero images and full-screen views
    High,
}

impl QualityTier {
    pub fn quality(&self) -> u8 {
        match self {
            Self::Low => 50,
            Self::Standard => DEFAULT_QUALITY,
            Self::High => 90,
        }
    }
}

impl FromStr for QualityTier {
    type Err = DeliveryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(QualityTier::Low),
            "standard" => Ok(QualityTier::Standard),
            "high" => Ok(QualityTier::High),
            _ => Err(DeliveryError::invalid_param(
                "tier",
                format!("unknown quality tier: {}", s),
            )),
        }
    }
}

/// Desired transformation for a single image request
#[derive(Debug, Clone, Default)]
pub struct TransformRequest {
    /// Target width in pixels
    pub width: Option<u32>,
    /// Target height in pixels
    pub height: Option<u32>,
    /// Output quality (1-100); None requests automatic quality selection
    pub quality: Option<u8>,
    /// Output format; Auto requests automatic format negotiation
    pub format: OutputFormat,
    /// How to fit image in target dimensions
    pub fit: FitMode,
    /// Blur strength
    pub blur: Option<u32>,
    /// Sharpen strength
    pub sharpen: Option<u32>,
}

impl TransformRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn with_height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }

    pub fn with_quality(mut self, quality: u8) -> Self {
        self.quality = Some(quality);
        self
    }

    /// Set quality from a caller-facing tier
    pub fn with_tier(mut self, tier: QualityTier) -> Self {
        self.quality = Some(tier.quality());
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_fit(mut self, fit: FitMode) -> Self {
        self.fit = fit;
        self
    }

    pub fn with_blur(mut self, blur: u32) -> Self {
        self.blur = Some(blur);
        self
    }

    pub fn with_sharpen(mut self, sharpen: u32) -> Self {
        self.sharpen = Some(sharpen);
        self
    }

    /// Clone this request with the width replaced
    ///
    /// Used by the responsive-set generator to walk the breakpoint ladder.
    pub fn with_width_override(&self, width: u32) -> Self {
        let mut req = self.clone();
        req.width = Some(width);
        req
    }

    /// Validate parameter ranges
    pub fn validate(&self) -> Result<(), DeliveryError> {
        if let Some(quality) = self.quality {
            if !(1..=100).contains(&quality) {
                return Err(DeliveryError::InvalidQuality { quality });
            }
        }
        if let Some(width) = self.width {
            if width == 0 {
                return Err(DeliveryError::invalid_param("width", "must be positive"));
            }
        }
        if let Some(height) = self.height {
            if height == 0 {
                return Err(DeliveryError::invalid_param("height", "must be positive"));
            }
        }
        if let Some(blur) = self.blur {
            if blur > 100 {
                return Err(DeliveryError::invalid_param("blur", "must be 0-100"));
            }
        }
        Ok(())
    }
}
