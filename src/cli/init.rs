//! Init command implementation

use colored::Colorize;

use crate::cli::GlobalOptions;
use crate::config::Config;
use crate::error::{ConfigError, Result};

/// Write a default configuration file.
///
/// `--api-url` and `--api-key` given on the command line are written into the
/// new file. An existing file is left alone unless `force` is set.
pub fn run(opts: &GlobalOptions, force: bool) -> Result<()> {
    let path = Config::resolve_path(opts.config_ref())?;

    if path.exists() && !force {
        return Err(ConfigError::SaveError(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        ))
        .into());
    }

    let mut config = Config::default();
    config.apply_overrides(opts.api_url_ref(), opts.api_key_ref());
    config.validate()?;
    config.save_to(&path)?;

    println!(
        "{} Configuration saved to: {}",
        "✓".green(),
        path.display()
    );
    println!("\n{}", "Try running:".bold());
    println!("  {} - Show configuration status", "coindash status".cyan());
    println!("  {} - Market overview", "coindash overview".cyan());
    println!("  {} - Start the dashboard API", "coindash serve".cyan());

    Ok(())
}
