//! Status command implementation

use colored::Colorize;

use crate::cli::{CommandContext, GlobalOptions};
use crate::config::Config;
use crate::error::Result;
use crate::output::table;

/// Run the status command to display configuration status
pub fn run(opts: &GlobalOptions) -> Result<()> {
    println!("{}\n", "CoinDash Configuration Status".bold());

    let config_path = Config::resolve_path(opts.config_ref())?;
    if config_path.exists() || opts.config.is_some() {
        println!("Config file: {}", config_path.display().to_string().cyan());
    } else {
        println!(
            "Config file: {} {}",
            config_path.display().to_string().cyan(),
            "(not found, using defaults)".dimmed()
        );
    }

    let config = match CommandContext::load_config(opts) {
        Ok(config) => config,
        Err(err) => {
            println!("{} {}", "✗".red(), err);
            println!();
            println!("Run {} to create a configuration file.", "coindash init".cyan());
            println!();
            return Ok(());
        }
    };

    println!();
    println!("{} Provider: {}", "✓".green(), config.provider.base_url);

    if config.provider.api_key.is_some() {
        println!(
            "{} API key configured (sent as {})",
            "✓".green(),
            config.provider.api_key_header
        );
    } else {
        println!("{} No API key (public rate limits apply)", "○".dimmed());
    }

    println!(
        "{} Timeout {}s, {} coins per page, prices in {}",
        "○".dimmed(),
        config.provider.timeout_secs,
        config.provider.per_page,
        config.provider.vs_currency.to_uppercase()
    );
    println!("{} Server bind: {}", "○".dimmed(), config.server.bind);

    println!("\n{}", "Cache TTLs".bold());
    let ttl = &config.cache;
    println!(
        "{}",
        table::format_details(&[
            ("Global stats", format!("{}s", ttl.global_ttl_secs)),
            ("Listing (page 1)", format!("{}s", ttl.listing_ttl_secs)),
            ("Coin detail", format!("{}s", ttl.detail_ttl_secs)),
            (
                "History (≤ 1 day)",
                format!("{}s", ttl.history_intraday_ttl_secs)
            ),
            ("History (> 1 day)", format!("{}s", ttl.history_ttl_secs)),
        ])
    );

    Ok(())
}
