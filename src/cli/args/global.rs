//! Global CLI options shared across all commands

use crate::cli::{Cli, OutputFormat};

/// Global CLI options passed to command handlers.
///
/// # Precedence
///
/// CLI flag > environment variable > config file > default. This struct holds
/// the CLI/env layer; the config file is merged in `CommandContext`.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Output format (table, json)
    pub format: OutputFormat,

    /// Custom config file path (defaults to ~/.coindash/config.yaml)
    pub config: Option<String>,

    /// Provider base URL override
    pub api_url: Option<String>,

    /// Provider API key override
    pub api_key: Option<String>,
}

impl GlobalOptions {
    /// Create GlobalOptions from the parsed CLI, once in main.rs.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            format: cli.format,
            config: cli.config.clone(),
            api_url: cli.api_url.clone(),
            api_key: cli.api_key.clone(),
        }
    }

    pub fn config_ref(&self) -> Option<&str> {
        self.config.as_deref()
    }

    pub fn api_url_ref(&self) -> Option<&str> {
        self.api_url.as_deref()
    }

    pub fn api_key_ref(&self) -> Option<&str> {
        self.api_key.as_deref()
    }
}
