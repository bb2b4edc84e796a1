//! Global market display model

use serde::Serialize;
use tabled::Tabled;

use crate::client::models::GlobalStats;
use crate::output::formatters::{format_compact, format_percent, format_timestamp_secs};

/// Market-cap dominance of one coin
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct DominanceDisplay {
    #[tabled(rename = "SYMBOL")]
    pub symbol: String,

    #[tabled(rename = "SHARE")]
    pub share: String,
}

/// FIELD / VALUE pairs for the market-wide totals
pub fn global_fields(stats: &GlobalStats, vs_currency: &str) -> Vec<(&'static str, String)> {
    vec![
        ("Active coins", stats.active_cryptocurrencies.to_string()),
        (
            "Markets",
            stats
                .markets
                .map(|m| m.to_string())
                .unwrap_or_else(|| "N/A".to_string()),
        ),
        (
            "Total market cap",
            format_compact(stats.total_market_cap.get(vs_currency).copied()),
        ),
        (
            "Volume (24h)",
            format_compact(stats.total_volume.get(vs_currency).copied()),
        ),
        (
            "Change (24h, USD)",
            format_percent(stats.market_cap_change_percentage_24h_usd),
        ),
        ("Updated", format_timestamp_secs(stats.updated_at)),
    ]
}

/// Top `limit` coins by dominance, largest first
pub fn dominance_rows(stats: &GlobalStats, limit: usize) -> Vec<DominanceDisplay> {
    let mut shares: Vec<(&String, &f64)> = stats.market_cap_percentage.iter().collect();
    shares.sort_by(|a, b| b.1.total_cmp(a.1));

    shares
        .into_iter()
        .take(limit)
        .map(|(symbol, share)| DominanceDisplay {
            symbol: symbol.to_uppercase(),
            share: format!("{:.2}%", share),
        })
        .collect()
}
