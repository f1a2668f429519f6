//! Configuration management
//!
//! Configuration is loaded from multiple sources with clear precedence:
//!
//! 1. Environment variables (highest priority, `DOCSITE_` prefix, `__` as
//!    the section separator, e.g. `DOCSITE_SUPPORT__ZENDESK_HOSTNAME`)
//! 2. `./docsite.toml`
//! 3. Hardcoded defaults (fallback)
//!
//! # Example Configuration
//!
//! ```toml
//! # docsite.toml
//! [server]
//! host = "127.0.0.1"
//! port = 3331
//!
//! [content]
//! docs_tree = "./content/docs_tree.json"
//! templates = "./content/templates.json"
//! settings = "./content/settings.json"
//!
//! [support]
//! zendesk_email = "support@example.com"
//! zendesk_api_key = "secret"
//! zendesk_hostname = "example"
//! allow_origins = ["https://example.com"]
//!
//! [rate_limit]
//! enabled = true
//! max_requests = 5
//! window_secs = 3600
//! ```

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::SiteError;

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Bind address
    pub host: String,

    /// Bind port
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3331,
        }
    }
}

/// Static content locations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentSettings {
    /// Documentation sidebar tree (JSON)
    pub docs_tree: PathBuf,

    /// Template catalog (JSON)
    pub templates: PathBuf,

    /// Page settings (titles, CTA labels) (JSON)
    pub settings: PathBuf,
}

impl Default for ContentSettings {
    fn default() -> Self {
        Self {
            docs_tree: PathBuf::from("./content/docs_tree.json"),
            templates: PathBuf::from("./content/templates.json"),
            settings: PathBuf::from("./content/settings.json"),
        }
    }
}

/// Helpdesk proxy settings
///
/// The API key and account email form the basic-auth credential for the
/// Zendesk ticket API. All fields must be provided before the support
/// routes can start; [`SupportSettings::validate`] enforces this at boot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SupportSettings {
    /// Zendesk account email
    pub zendesk_email: String,

    /// Zendesk API token
    pub zendesk_api_key: String,

    /// Zendesk subdomain (`{hostname}.zendesk.com`)
    pub zendesk_hostname: String,

    /// Origins allowed by the CORS layer
    pub allow_origins: Vec<String>,
}

impl SupportSettings {
    /// Check that every required setting is present
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::Config`] naming the first missing setting.
    pub fn validate(&self) -> Result<(), SiteError> {
        let required = [
            ("support.zendesk_email", &self.zendesk_email),
            ("support.zendesk_api_key", &self.zendesk_api_key),
            ("support.zendesk_hostname", &self.zendesk_hostname),
        ];

        for (name, value) in required {
            if value.is_empty() {
                return Err(SiteError::Config(format!("{name} is not set")));
            }
        }

        if self.allow_origins.is_empty() {
            return Err(SiteError::Config(
                "support.allow_origins is not set".to_string(),
            ));
        }

        Ok(())
    }
}

/// Rate limit configuration for the support API
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Enable rate limiting
    pub enabled: bool,

    /// Maximum requests per window per client
    pub max_requests: u32,

    /// Window length in seconds
    pub window_secs: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_requests: 5,
            window_secs: 3600, // 60 minutes
        }
    }
}

/// GitHub metadata fetch settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GithubSettings {
    /// API base URL (overridable for tests)
    pub api_base: String,

    /// User-Agent header sent with API requests
    pub user_agent: String,
}

impl Default for GithubSettings {
    fn default() -> Self {
        Self {
            api_base: "https://api.github.com".to_string(),
            user_agent: "docsite".to_string(),
        }
    }
}

/// Complete site configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerSettings,

    /// Static content locations
    #[serde(default)]
    pub content: ContentSettings,

    /// Helpdesk proxy settings
    #[serde(default)]
    pub support: SupportSettings,

    /// Support API rate limiting
    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    /// GitHub metadata fetch settings
    #[serde(default)]
    pub github: GithubSettings,
}

impl SiteConfig {
    /// Load configuration from `./docsite.toml` and the environment
    ///
    /// # Errors
    ///
    /// Returns an error if a source is present but malformed.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from("./docsite.toml")
    }

    /// Load configuration from a specific TOML file plus the environment
    ///
    /// # Errors
    ///
    /// Returns an error if a source is present but malformed.
    pub fn load_from(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let config = Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed("DOCSITE_").split("__"))
            .extract()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.server.port, 3331);
        assert!(config.rate_limit.enabled);
        assert_eq!(config.rate_limit.max_requests, 5);
        assert_eq!(config.rate_limit.window_secs, 3600);
        assert_eq!(config.github.api_base, "https://api.github.com");
    }

    #[test]
    fn test_support_validate_rejects_missing() {
        let support = SupportSettings::default();
        let err = support.validate().unwrap_err();
        assert!(err.to_string().contains("zendesk_email"));
    }

    #[test]
    fn test_support_validate_accepts_complete() {
        let support = SupportSettings {
            zendesk_email: "support@example.com".to_string(),
            zendesk_api_key: "secret".to_string(),
            zendesk_hostname: "example".to_string(),
            allow_origins: vec!["https://example.com".to_string()],
        };
        assert!(support.validate().is_ok());
    }

    #[test]
    fn test_support_validate_requires_origins() {
        let support = SupportSettings {
            zendesk_email: "support@example.com".to_string(),
            zendesk_api_key: "secret".to_string(),
            zendesk_hostname: "example".to_string(),
            allow_origins: vec![],
        };
        let err = support.validate().unwrap_err();
        assert!(err.to_string().contains("allow_origins"));
    }
}
