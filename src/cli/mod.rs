//! CLI command definitions and handlers

use clap::{Parser, Subcommand};

pub mod args;
pub mod context;
pub mod init;
pub mod market;
pub mod serve;
pub mod status;

pub use args::{GlobalOptions, OutputFormat};
pub use context::CommandContext;

/// CoinDash - caching market-data proxy and CLI
#[derive(Parser, Debug)]
#[command(name = "coindash")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (table, json)
    #[arg(
        long,
        global = true,
        env = "COINDASH_FORMAT",
        default_value = "table",
        hide_env = true
    )]
    pub format: OutputFormat,

    /// Override config file location
    #[arg(long, global = true, env = "COINDASH_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "COINDASH_DEBUG", hide_env = true)]
    pub debug: bool,

    /// Override the provider base URL
    #[arg(long, global = true, env = "COINDASH_API_URL", hide_env = true)]
    pub api_url: Option<String>,

    /// Provider API key
    #[arg(long, global = true, env = "COINDASH_API_KEY", hide_env = true)]
    pub api_key: Option<String>,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Show configuration and cache settings
    Status,

    /// Display version information
    Version,

    /// Run the dashboard API server
    #[command(after_help = "EXAMPLES:\n  \
            coindash serve                       # Listen on the configured address\n  \
            coindash serve --bind 0.0.0.0:9000   # Listen on all interfaces")]
    Serve {
        /// Address to listen on (overrides server.bind)
        #[arg(long, env = "COINDASH_BIND", hide_env = true)]
        bind: Option<String>,
    },

    /// Show market-wide totals
    Global,

    /// List coins by market cap
    #[command(visible_alias = "ls")]
    Coins {
        /// Listing page, starting at 1
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        page: u32,

        /// Show at most this many rows
        #[arg(long, short = 'n')]
        limit: Option<usize>,
    },

    /// Show details for one coin
    Coin {
        /// Provider coin id, e.g. bitcoin
        id: String,
    },

    /// Show price history for one coin
    #[command(after_help = "EXAMPLES:\n  \
            coindash history bitcoin                     # Last 7 days\n  \
            coindash history bitcoin --days 1            # Intraday\n  \
            coindash history ethereum --days max --interval daily")]
    History {
        /// Provider coin id, e.g. bitcoin
        id: String,

        /// Days of history (positive integer or "max")
        #[arg(long, short = 'd', default_value = "7")]
        days: String,

        /// Sampling interval (daily, hourly)
        #[arg(long, short = 'i')]
        interval: Option<String>,

        /// Show only the most recent N samples in table output
        #[arg(long, short = 'n', default_value_t = 24)]
        limit: usize,
    },

    /// Search coins by name or symbol
    Search {
        /// Search text
        query: String,
    },

    /// Market totals plus the top of the listing
    Overview {
        /// Listing rows to show
        #[arg(long, short = 'n', default_value_t = 10)]
        limit: usize,
    },
}
