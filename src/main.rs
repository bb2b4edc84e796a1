//! CoinDash - caching market-data proxy and CLI for a crypto dashboard

use clap::Parser;

mod cache;
mod cli;
mod client;
mod config;
mod error;
mod market;
mod models;
mod output;
mod server;

use cli::{Cli, Commands, GlobalOptions};
use error::Result;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.debug, matches!(cli.command, Commands::Serve { .. }));

    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        Commands::Init { force } => cli::init::run(&opts, force),
        Commands::Status => cli::status::run(&opts),
        Commands::Version => {
            println!("coindash version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::Serve { bind } => cli::serve::run(&opts, bind.as_deref()).await,
        Commands::Global => cli::market::global(&opts).await,
        Commands::Coins { page, limit } => cli::market::coins(&opts, page, limit).await,
        Commands::Coin { id } => cli::market::coin(&opts, &id).await,
        Commands::History {
            id,
            days,
            interval,
            limit,
        } => cli::market::history(&opts, &id, &days, interval.as_deref(), limit).await,
        Commands::Search { query } => cli::market::search(&opts, &query).await,
        Commands::Overview { limit } => cli::market::overview(&opts, limit).await,
    }
}

/// `RUST_LOG` wins when set; otherwise `--debug` raises the default level.
/// The server logs at info so requests to a cold or failing provider show up.
fn init_logging(debug: bool, serving: bool) {
    let default_filter = match (debug, serving) {
        (true, _) => "coindash=debug",
        (false, true) => "coindash=info",
        (false, false) => "coindash=warn",
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp_millis()
        .init();

    log::debug!("Debug logging enabled");
}
