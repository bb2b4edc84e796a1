//! Market data commands

use colored::Colorize;
use log::debug;

use crate::cli::{CommandContext, GlobalOptions, OutputFormat};
use crate::error::Result;
use crate::market::{CoinId, HistoryRange, Interval};
use crate::models::{
    CoinRowDisplay, SearchDisplay, chart_rows, detail_fields, dominance_rows, global_fields,
};
use crate::output::{Formattable, json, table};

/// Dominance rows shown under the global totals
const DOMINANCE_ROWS: usize = 5;

/// Run the global command
pub async fn global(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let stats = ctx.service.global_stats().await?;

    match ctx.format {
        OutputFormat::Json => println!("{}", json::format_json(&stats)?),
        OutputFormat::Table => {
            println!(
                "{}",
                table::format_details(&global_fields(&stats, ctx.vs_currency()))
            );

            let dominance = dominance_rows(&stats, DOMINANCE_ROWS);
            if !dominance.is_empty() {
                println!("\n{}", "Market cap dominance".bold());
                println!("{}", table::format_table(&dominance));
            }
        }
    }

    Ok(())
}

/// Run the coins command
pub async fn coins(opts: &GlobalOptions, page: u32, limit: Option<usize>) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let mut coins = ctx.service.coins(page).await?;

    debug!("Fetched {} coins on page {}", coins.len(), page);

    if let Some(limit) = limit {
        coins.truncate(limit);
    }

    match ctx.format {
        OutputFormat::Json => println!("{}", json::format_json(&coins)?),
        OutputFormat::Table => {
            let rows: Vec<CoinRowDisplay> = coins.iter().map(CoinRowDisplay::from).collect();
            rows.print(OutputFormat::Table)?;
        }
    }

    Ok(())
}

/// Run the coin command
pub async fn coin(opts: &GlobalOptions, id: &str) -> Result<()> {
    let id = CoinId::parse(id)?;
    let ctx = CommandContext::new(opts)?;
    let detail = ctx.service.coin(&id).await?;

    match ctx.format {
        OutputFormat::Json => println!("{}", json::format_json(&detail)?),
        OutputFormat::Table => println!(
            "{}",
            table::format_details(&detail_fields(&detail, ctx.vs_currency()))
        ),
    }

    Ok(())
}

/// Run the history command
pub async fn history(
    opts: &GlobalOptions,
    id: &str,
    days: &str,
    interval: Option<&str>,
    limit: usize,
) -> Result<()> {
    let id = CoinId::parse(id)?;
    let range: HistoryRange = days.parse()?;
    let interval = Interval::parse_opt(interval)?;

    let ctx = CommandContext::new(opts)?;
    let chart = ctx.service.history(&id, range, interval).await?;

    debug!("Fetched {} samples for {} over {} days", chart.prices.len(), id, range);

    match ctx.format {
        OutputFormat::Json => println!("{}", json::format_json(&chart)?),
        OutputFormat::Table => chart_rows(&chart, limit).print(OutputFormat::Table)?,
    }

    Ok(())
}

/// Run the search command
pub async fn search(opts: &GlobalOptions, query: &str) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let results = ctx.service.search(query).await?;

    let rows: Vec<SearchDisplay> = results.coins.into_iter().map(SearchDisplay::from).collect();
    rows.print(ctx.format)
}

/// Run the overview command
pub async fn overview(opts: &GlobalOptions, limit: usize) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let mut overview = ctx.service.overview().await?;
    overview.coins.truncate(limit);

    match ctx.format {
        OutputFormat::Json => println!("{}", json::format_json(&overview)?),
        OutputFormat::Table => {
            println!(
                "{}",
                table::format_details(&global_fields(&overview.global, ctx.vs_currency()))
            );
            println!("\n{}", format!("Top {} by market cap", overview.coins.len()).bold());

            let rows: Vec<CoinRowDisplay> =
                overview.coins.iter().map(CoinRowDisplay::from).collect();
            rows.print(OutputFormat::Table)?;
        }
    }

    Ok(())
}
