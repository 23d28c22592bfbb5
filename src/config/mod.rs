// Configuration module
//
// Provider selection is driven purely by which environment values are
// present. Configuration is read once at first use and never re-read;
// the resolved provider is fixed for the process lifetime.

use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::constants::{
    ENV_CLOUDINARY_CLOUD_NAME, ENV_IMAGEKIT_ID, ENV_IMAGE_HOST, ENV_PRODUCTION,
};
use crate::rewrite::Provider;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DeliveryConfig {
    /// Cloudinary cloud name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloudinary_cloud_name: Option<String>,

    /// ImageKit instance id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imagekit_id: Option<String>,

    /// Hostname serving a local image-optimization endpoint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_host: Option<String>,

    /// Production-mode flag
    #[serde(default)]
    pub production: bool,
}

impl DeliveryConfig {
    /// Read configuration from the environment
    ///
    /// Empty values are treated as absent so a blank variable in a
    /// deployment manifest does not select a provider.
    pub fn from_env() -> Self {
        Self {
            cloudinary_cloud_name: env_nonempty(ENV_CLOUDINARY_CLOUD_NAME),
            imagekit_id: env_nonempty(ENV_IMAGEKIT_ID),
            image_host: env_nonempty(ENV_IMAGE_HOST),
            production: env_nonempty(ENV_PRODUCTION)
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
        }
    }

    /// Resolve the delivery provider from this configuration
    ///
    /// Priority order: Cloudinary, ImageKit, Vercel; the first provider
    /// whose required value is present wins. Outside production the
    /// Generic provider applies regardless of configured credentials, so
    /// development traffic never reaches a CDN. With nothing configured
    /// the Generic provider applies too.
    pub fn resolve_provider(&self) -> Provider {
        if !self.production {
            return Provider::Generic;
        }
        if let Some(cloud_name) = &self.cloudinary_cloud_name {
            return Provider::Cloudinary {
                cloud_name: cloud_name.clone(),
            };
        }
        if let Some(id) = &self.imagekit_id {
            return Provider::ImageKit { id: id.clone() };
        }
        if let Some(host) = &self.image_host {
            return Provider::Vercel { host: host.clone() };
        }
        Provider::Generic
    }
}

fn env_nonempty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

static PROVIDER: OnceLock<Provider> = OnceLock::new();

/// Process-wide delivery provider, resolved from the environment on first use
///
/// The resolution runs exactly once; later environment changes are not
/// observed. Call sites needing a specific provider (tests, embedding
/// applications) should use the `*_with` rewrite entry points instead.
pub fn provider() -> &'static Provider {
    PROVIDER.get_or_init(|| DeliveryConfig::from_env().resolve_provider())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_provider_priority_cloudinary_first() {
        let config = DeliveryConfig {
            cloudinary_cloud_name: Some("demo".to_string()),
            imagekit_id: Some("acme".to_string()),
            image_host: Some("example.com".to_string()),
            production: true,
        };
        assert_eq!(
            config.resolve_provider(),
            Provider::Cloudinary {
                cloud_name: "demo".to_string()
            }
        );
    }

    #[test]
    fn test_resolve_provider_imagekit_before_vercel() {
        let config = DeliveryConfig {
            imagekit_id: Some("acme".to_string()),
            image_host: Some("example.com".to_string()),
            production: true,
            ..Default::default()
        };
        assert_eq!(
            config.resolve_provider(),
            Provider::ImageKit {
                id: "acme".to_string()
            }
        );
    }

    #[test]
    fn test_resolve_provider_vercel() {
        let config = DeliveryConfig {
            image_host: Some("example.com".to_string()),
            production: true,
            ..Default::default()
        };
        assert_eq!(
            config.resolve_provider(),
            Provider::Vercel {
                host: "example.com".to_string()
            }
        );
    }

    #[test]
    fn test_resolve_provider_defaults_to_generic() {
        let config = DeliveryConfig::default();
        assert_eq!(config.resolve_provider(), Provider::Generic);
    }

    #[test]
    fn test_non_production_forces_generic() {
        // Configured credentials must not select a CDN outside production
        let config = DeliveryConfig {
            cloudinary_cloud_name: Some("demo".to_string()),
            imagekit_id: Some("acme".to_string()),
            image_host: Some("example.com".to_string()),
            production: false,
        };
        assert_eq!(config.resolve_provider(), Provider::Generic);
    }

    #[test]
    fn test_config_roundtrip_json() {
        let config = DeliveryConfig {
            cloudinary_cloud_name: Some("demo".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let parsed: DeliveryConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.cloudinary_cloud_name.as_deref(), Some("demo"));
        assert!(!parsed.production);
    }
}
