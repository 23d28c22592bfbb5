//! Built-in placeholder graphics
//!
//! Inline SVG data URIs used while an image is pending or after a fetch
//! failure, so the host never has to ship placeholder assets.

use base64::{engine::general_purpose::STANDARD, Engine as _};

/// Animated shimmer placeholder sized to the target slot
pub fn shimmer_placeholder(width: u32, height: u32) -> String {
    let svg = format!(
        r##"<svg width="{w}" height="{h}" viewBox="0 0 {w} {h}" xmlns="http://www.w3.org/2000/svg"><defs><linearGradient id="g"><stop stop-color="#eee" offset="20%"/><stop stop-color="#ddd" offset="50%"/><stop stop-color="#eee" offset="70%"/></linearGradient></defs><rect width="{w}" height="{h}" fill="#eee"/><rect id="r" width="{w}" height="{h}" fill="url(#g)"/><animate xlink:href="#r" attributeName="x" from="-{w}" to="{w}" dur="1s" repeatCount="indefinite"/></svg>"##,
        w = width,
        h = height
    );
    format!("data:image/svg+xml;base64,{}", STANDARD.encode(svg))
}

/// Fixed placeholder shown when a fetch has failed
pub fn error_placeholder() -> String {
    let svg = r##"<svg width="400" height="300" viewBox="0 0 400 300" xmlns="http://www.w3.org/2000/svg"><rect width="400" height="300" fill="#f3f4f6"/><path d="M170 120h60v60h-60z" fill="none" stroke="#9ca3af" stroke-width="4"/><circle cx="185" cy="135" r="6" fill="#9ca3af"/><path d="M170 170l20-20 12 12 18-22 10 12" fill="none" stroke="#9ca3af" stroke-width="4"/><line x1="160" y1="110" x2="240" y2="190" stroke="#9ca3af" stroke-width="4"/></svg>"##;
    format!("data:image/svg+xml;base64,{}", STANDARD.encode(svg))
}
