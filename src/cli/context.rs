//! Command execution context
//!
//! Loads configuration, applies CLI overrides and wires the fetch gateway to
//! a fresh response cache so commands only deal with the market service.

use std::sync::Arc;

use crate::cache::ResponseCache;
use crate::cli::{GlobalOptions, OutputFormat};
use crate::client::FetchGateway;
use crate::config::Config;
use crate::error::Result;
use crate::market::{MarketService, MarketSettings};

/// Context for command execution containing config, service, and runtime options.
pub struct CommandContext {
    /// Loaded configuration with CLI overrides applied
    pub config: Config,
    /// Cached market-data access (Arc-wrapped so the server can share it)
    pub service: Arc<MarketService<FetchGateway>>,
    /// Output format preference
    pub format: OutputFormat,
}

impl CommandContext {
    /// Create a new command context.
    ///
    /// # Errors
    /// Returns error if the config cannot be loaded, the overrides leave it
    /// invalid, or the HTTP client cannot be built.
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        let config = Self::load_config(opts)?;

        let gateway = FetchGateway::new(&config.provider)?;
        log::debug!("Using provider at {}", gateway.base_url());

        let cache = Arc::new(ResponseCache::new());
        let service = MarketService::new(gateway, cache, MarketSettings::from_config(&config));

        Ok(Self {
            config,
            service: Arc::new(service),
            format: opts.format,
        })
    }

    /// Load the config file and merge the CLI/env layer on top
    pub fn load_config(opts: &GlobalOptions) -> Result<Config> {
        let mut config = Config::load_at(opts.config_ref())?;
        config.apply_overrides(opts.api_url_ref(), opts.api_key_ref());
        config.validate()?;
        Ok(config)
    }

    /// Quote currency prices are shown in
    pub fn vs_currency(&self) -> &str {
        &self.service.settings().vs_currency
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConfigError, Error};
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, contents: &str) -> String {
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, contents).unwrap();
        path.to_string_lossy().to_string()
    }

    #[test]
    fn test_overrides_win_over_file() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            "provider:\n  base_url: https://file.example/api\n  api_key: file-key\n",
        );
        let opts = GlobalOptions {
            config: Some(path),
            api_url: Some("http://localhost:9999".to_string()),
            ..GlobalOptions::default()
        };

        let config = CommandContext::load_config(&opts).unwrap();

        assert_eq!(config.provider.base_url, "http://localhost:9999");
        assert_eq!(config.provider.api_key.as_deref(), Some("file-key"));
    }

    #[test]
    fn test_invalid_override_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "{}\n");
        let opts = GlobalOptions {
            config: Some(path),
            api_url: Some("ftp://nope".to_string()),
            ..GlobalOptions::default()
        };

        assert!(matches!(
            CommandContext::load_config(&opts),
            Err(Error::Config(ConfigError::Invalid(_)))
        ));
    }

    #[test]
    fn test_context_uses_configured_currency() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "provider:\n  vs_currency: EUR\n");
        let opts = GlobalOptions {
            config: Some(path),
            format: OutputFormat::Json,
            ..GlobalOptions::default()
        };

        let ctx = CommandContext::new(&opts).unwrap();

        assert_eq!(ctx.vs_currency(), "eur");
        assert_eq!(ctx.format, OutputFormat::Json);
        assert!(ctx.service.cache().is_empty());
    }
}
