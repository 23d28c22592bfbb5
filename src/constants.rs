// Constants module - centralized default values for the delivery pipeline
//
// This module defines all default values used throughout the codebase.
// Using constants instead of magic numbers improves maintainability
// and makes it easier to understand and modify defaults.

// =============================================================================
// Transform defaults
// =============================================================================

/// Default output quality when the caller does not specify one (1-100)
pub const DEFAULT_QUALITY: u8 = 75;

/// Fallback width for providers that require an explicit width parameter
pub const DEFAULT_VERCEL_WIDTH: u32 = 1280;

// =============================================================================
// Responsive breakpoints
// =============================================================================

/// Fixed breakpoint ladder used to build responsive candidate sets
pub const BREAKPOINT_LADDER: [u32; 6] = [320, 640, 768, 1024, 1280, 1920];

/// Viewport width below which the mobile sizes tier applies
pub const MOBILE_BREAKPOINT_PX: u32 = 768;

/// Viewport width below which the tablet sizes tier applies
pub const TABLET_BREAKPOINT_PX: u32 = 1024;

/// Default sizes value for the mobile tier
pub const DEFAULT_SIZES_MOBILE: &str = "100vw";

/// Default sizes value for the tablet tier
pub const DEFAULT_SIZES_TABLET: &str = "50vw";

/// Default sizes value for the desktop tier
pub const DEFAULT_SIZES_DESKTOP: &str = "33vw";

// =============================================================================
// Eligibility gate
// =============================================================================

/// Hostnames of delivery backends; URLs already pointing at one are never
/// rewritten a second time
pub const PROVIDER_DOMAINS: [&str; 2] = ["res.cloudinary.com", "ik.imagekit.io"];

/// Path marker for host-local image optimization endpoints
pub const VERCEL_IMAGE_PATH: &str = "/_next/image";

/// Raster extensions eligible for rewriting (lowercase, no dot)
pub const RASTER_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "webp", "avif", "gif"];

/// Query parameter keys that mark a URL as already optimized
pub const OPTIMIZATION_PARAMS: [&str; 3] = ["w", "q", "quality"];

// =============================================================================
// Deferred loading
// =============================================================================

/// Default margin around the viewport that triggers loading (pixels)
pub const DEFAULT_VIEWPORT_MARGIN_PX: u32 = 50;

// =============================================================================
// Environment variables
// =============================================================================

/// Cloudinary cloud name (presence selects the Cloudinary provider)
pub const ENV_CLOUDINARY_CLOUD_NAME: &str = "CLOUDINARY_CLOUD_NAME";

/// ImageKit instance id (presence selects the ImageKit provider)
pub const ENV_IMAGEKIT_ID: &str = "IMAGEKIT_ID";

/// Hosting hostname with a local image endpoint (presence selects Vercel)
pub const ENV_IMAGE_HOST: &str = "IMAGE_HOST";

/// Production-mode flag
pub const ENV_PRODUCTION: &str = "PRODUCTION";
