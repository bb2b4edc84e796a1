//! Serve command implementation

use colored::Colorize;

use crate::cli::{CommandContext, GlobalOptions};
use crate::error::Result;
use crate::server;

/// Run the dashboard API until interrupted
pub async fn run(opts: &GlobalOptions, bind: Option<&str>) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let bind = bind.unwrap_or(&ctx.config.server.bind).to_string();

    println!("{}", "CoinDash API".bold());
    println!("Provider: {}", ctx.config.provider.base_url.cyan());
    println!("Listening on {}", format!("http://{}", bind).cyan());
    println!("{}", "Press Ctrl-C to stop".dimmed());

    server::serve(&bind, ctx.service).await
}
