//! Configuration management for CoinDash

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cache::TtlPolicy;
use crate::error::{ConfigError, Result};

/// Default market-data provider (CoinGecko-compatible API)
pub const DEFAULT_API_URL: &str = "https://api.coingecko.com/api/v3";

/// Header the provider expects the API key in
pub const DEFAULT_API_KEY_HEADER: &str = "x-cg-demo-api-key";

/// Default address for `coindash serve`
pub const DEFAULT_BIND: &str = "127.0.0.1:8080";

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Market-data provider settings
    #[serde(default)]
    pub provider: ProviderConfig,

    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Cache TTL settings
    #[serde(default)]
    pub cache: CacheConfig,
}

/// Market-data provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Base URL of the provider API
    #[serde(default = "default_api_url")]
    pub base_url: String,

    /// Provider API key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Header used to send the API key
    #[serde(default = "default_api_key_header")]
    pub api_key_header: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Quote currency for prices
    #[serde(default = "default_vs_currency")]
    pub vs_currency: String,

    /// Coins per listing page
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_api_key_header() -> String {
    DEFAULT_API_KEY_HEADER.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_vs_currency() -> String {
    "usd".to_string()
}

fn default_per_page() -> u32 {
    100
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_url(),
            api_key: None,
            api_key_header: default_api_key_header(),
            timeout_secs: default_timeout_secs(),
            vs_currency: default_vs_currency(),
            per_page: default_per_page(),
        }
    }
}

impl ProviderConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Socket address to listen on
    #[serde(default = "default_bind")]
    pub bind: String,
}

fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

/// Cache TTLs in seconds, one per resource class
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_short_ttl")]
    pub global_ttl_secs: u64,

    #[serde(default = "default_short_ttl")]
    pub listing_ttl_secs: u64,

    #[serde(default = "default_short_ttl")]
    pub detail_ttl_secs: u64,

    /// Historical series spanning one day or less
    #[serde(default = "default_intraday_ttl")]
    pub history_intraday_ttl_secs: u64,

    /// Historical series spanning more than one day
    #[serde(default = "default_history_ttl")]
    pub history_ttl_secs: u64,
}

fn default_short_ttl() -> u64 {
    TtlPolicy::default().global.as_secs()
}

fn default_intraday_ttl() -> u64 {
    TtlPolicy::default().history_intraday.as_secs()
}

fn default_history_ttl() -> u64 {
    TtlPolicy::default().history.as_secs()
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            global_ttl_secs: default_short_ttl(),
            listing_ttl_secs: default_short_ttl(),
            detail_ttl_secs: default_short_ttl(),
            history_intraday_ttl_secs: default_intraday_ttl(),
            history_ttl_secs: default_history_ttl(),
        }
    }
}

impl CacheConfig {
    /// Convert to the TTL policy used by the market service
    pub fn ttl_policy(&self) -> TtlPolicy {
        TtlPolicy {
            global: Duration::from_secs(self.global_ttl_secs),
            listing: Duration::from_secs(self.listing_ttl_secs),
            detail: Duration::from_secs(self.detail_ttl_secs),
            history_intraday: Duration::from_secs(self.history_intraday_ttl_secs),
            history: Duration::from_secs(self.history_ttl_secs),
        }
    }
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".coindash").join("config.yaml"))
    }

    /// Resolve the config path from an optional override
    pub fn resolve_path(path: Option<&str>) -> Result<PathBuf> {
        match path {
            Some(p) => Ok(PathBuf::from(p)),
            None => Self::default_path(),
        }
    }

    /// Load configuration from an explicit path, or the default location.
    ///
    /// A missing file at the default location yields the built-in defaults;
    /// a missing file at an explicit path is an error.
    pub fn load_at(path: Option<&str>) -> Result<Self> {
        match path {
            Some(p) => Self::load_from(Path::new(p)),
            None => {
                let default = Self::default_path()?;
                if default.exists() {
                    Self::load_from(&default)
                } else {
                    log::debug!("No config at {}, using defaults", default.display());
                    Ok(Self::default())
                }
            }
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()).into());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;
        config.validate()?;

        Ok(config)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents =
            serde_yaml::to_string(self).map_err(|e| ConfigError::SaveError(e.to_string()))?;

        std::fs::write(path, contents)?;

        // The file may hold an API key
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(path)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(path, perms)?;
        }

        Ok(())
    }

    /// Apply CLI/env overrides on top of file values
    pub fn apply_overrides(&mut self, api_url: Option<&str>, api_key: Option<&str>) {
        if let Some(url) = api_url {
            self.provider.base_url = url.to_string();
        }
        if let Some(key) = api_key {
            self.provider.api_key = Some(key.to_string());
        }
    }

    /// Validate settings that would otherwise fail late
    pub fn validate(&self) -> Result<()> {
        let url = &self.provider.base_url;
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "provider.base_url must be an http(s) URL, got '{}'",
                url
            ))
            .into());
        }
        if self.provider.timeout_secs == 0 {
            return Err(
                ConfigError::Invalid("provider.timeout_secs must be positive".to_string()).into(),
            );
        }
        if self.provider.per_page == 0 || self.provider.per_page > 250 {
            return Err(ConfigError::Invalid(
                "provider.per_page must be between 1 and 250".to_string(),
            )
            .into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.provider.base_url, DEFAULT_API_URL);
        assert!(config.provider.api_key.is_none());
        assert_eq!(config.provider.timeout_secs, 10);
        assert_eq!(config.server.bind, DEFAULT_BIND);
        assert_eq!(config.cache.global_ttl_secs, 60);
        assert_eq!(config.cache.history_intraday_ttl_secs, 30);
        assert_eq!(config.cache.history_ttl_secs, 300);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let yaml = "provider:\n  api_key: secret\ncache:\n  detail_ttl_secs: 15\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.provider.api_key.as_deref(), Some("secret"));
        assert_eq!(config.provider.base_url, DEFAULT_API_URL);
        assert_eq!(config.cache.detail_ttl_secs, 15);
        assert_eq!(config.cache.listing_ttl_secs, 60);
        assert_eq!(config.server.bind, DEFAULT_BIND);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.yaml");

        let mut config = Config::default();
        config.provider.api_key = Some("k".to_string());
        config.server.bind = "0.0.0.0:9000".to_string();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.provider.api_key.as_deref(), Some("k"));
        assert_eq!(loaded.server.bind, "0.0.0.0:9000");
    }

    #[test]
    fn test_explicit_missing_path_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.yaml");

        let result = Config::load_at(Some(path.to_str().unwrap()));
        assert!(matches!(result, Err(Error::Config(ConfigError::NotFound(_)))));
    }

    #[test]
    fn test_overrides_win() {
        let mut config = Config::default();
        config.apply_overrides(Some("http://localhost:1234"), Some("override-key"));

        assert_eq!(config.provider.base_url, "http://localhost:1234");
        assert_eq!(config.provider.api_key.as_deref(), Some("override-key"));
    }

    #[test]
    fn test_validate_rejects_bad_url() {
        let mut config = Config::default();
        config.provider.base_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = Config::default();
        config.provider.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_ttl_policy_from_config() {
        let mut cache = CacheConfig::default();
        cache.history_ttl_secs = 600;
        let policy = cache.ttl_policy();

        assert_eq!(policy.history, Duration::from_secs(600));
        assert_eq!(policy.global, Duration::from_secs(60));
    }
}
