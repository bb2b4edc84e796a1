//! Historical series display model

use serde::Serialize;
use tabled::Tabled;

use crate::client::models::MarketChart;
use crate::output::formatters::{format_compact, format_price, format_timestamp_millis};

/// One sample of a historical series
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct PricePointDisplay {
    #[tabled(rename = "TIME (UTC)")]
    pub time: String,

    #[tabled(rename = "PRICE")]
    pub price: String,

    #[tabled(rename = "MARKET CAP")]
    pub market_cap: String,

    #[tabled(rename = "VOLUME")]
    pub volume: String,
}

/// Flatten a chart into rows, keeping only the last `limit` samples.
///
/// Market cap and volume are matched to prices by position; the provider
/// returns the three series on the same timestamps.
pub fn chart_rows(chart: &MarketChart, limit: usize) -> Vec<PricePointDisplay> {
    let skip = chart.prices.len().saturating_sub(limit);

    chart
        .prices
        .iter()
        .enumerate()
        .skip(skip)
        .map(|(i, [time, price])| PricePointDisplay {
            time: format_timestamp_millis(*time),
            price: format_price(Some(*price)),
            market_cap: format_compact(chart.market_caps.get(i).map(|p| p[1])),
            volume: format_compact(chart.total_volumes.get(i).map(|p| p[1])),
        })
        .collect()
}
