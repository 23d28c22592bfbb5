//! Responsive candidate sets and sizes hints

use super::eligibility::is_eligible;
use super::params::TransformRequest;
use super::provider::Provider;
use crate::constants::{
    BREAKPOINT_LADDER, DEFAULT_SIZES_DESKTOP, DEFAULT_SIZES_MOBILE, DEFAULT_SIZES_TABLET,
    MOBILE_BREAKPOINT_PX, TABLET_BREAKPOINT_PX,
};

/// Build a `srcset` candidate list over the fixed breakpoint ladder
///
/// Each entry is `<url> <width>w`, produced via [`super::optimize_with`]
/// with that width substituted. Ineligible URLs yield an empty string.
pub fn responsive_set_with(provider: &Provider, url: &str, opts: &TransformRequest) -> String {
    if !is_eligible(url) {
        return String::new();
    }

    BREAKPOINT_LADDER
        .iter()
        .map(|&width| {
            let candidate = super::optimize_with(provider, url, &opts.with_width_override(width));
            format!("{} {}w", candidate, width)
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// [`responsive_set_with`] against the process-wide provider
pub fn responsive_set(url: &str, opts: &TransformRequest) -> String {
    responsive_set_with(crate::config::provider(), url, opts)
}

/// Per-tier sizes values for the three-tier media-conditional hint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizesHint {
    pub mobile: String,
    pub tablet: String,
    pub desktop: String,
}

impl Default for SizesHint {
    fn default() -> Self {
        Self {
            mobile: DEFAULT_SIZES_MOBILE.to_string(),
            tablet: DEFAULT_SIZES_TABLET.to_string(),
            desktop: DEFAULT_SIZES_DESKTOP.to_string(),
        }
    }
}

/// Render the three-tier `sizes` attribute string
pub fn sizes_hint(hint: &SizesHint) -> String {
    format!(
        "(max-width: {}px) {}, (max-width: {}px) {}, {}",
        MOBILE_BREAKPOINT_PX, hint.mobile, TABLET_BREAKPOINT_PX, hint.tablet, hint.desktop
    )
}
