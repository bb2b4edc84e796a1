//! Coin listing and detail display models

use std::collections::BTreeMap;

use serde::Serialize;
use tabled::Tabled;

use super::common::{format_rank, unknown};
use crate::client::models::{CoinDetail, CoinMarket};
use crate::output::formatters::{format_compact, format_percent, format_price, truncate};

/// One row of the coin listing table.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct CoinRowDisplay {
    #[tabled(rename = "#")]
    pub rank: String,

    #[tabled(rename = "ID")]
    pub id: String,

    #[tabled(rename = "SYMBOL")]
    pub symbol: String,

    #[tabled(rename = "NAME")]
    pub name: String,

    #[tabled(rename = "PRICE")]
    pub price: String,

    #[tabled(rename = "24H")]
    pub change_24h: String,

    #[tabled(rename = "MARKET CAP")]
    pub market_cap: String,

    #[tabled(rename = "VOLUME")]
    pub volume: String,
}

impl From<&CoinMarket> for CoinRowDisplay {
    fn from(coin: &CoinMarket) -> Self {
        Self {
            rank: format_rank(coin.market_cap_rank),
            id: coin.id.clone(),
            symbol: coin.symbol.to_uppercase(),
            name: truncate(&coin.name, 24),
            price: format_price(coin.current_price),
            change_24h: format_percent(coin.price_change_percentage_24h),
            market_cap: format_compact(coin.market_cap),
            volume: format_compact(coin.total_volume),
        }
    }
}

impl From<CoinMarket> for CoinRowDisplay {
    fn from(coin: CoinMarket) -> Self {
        Self::from(&coin)
    }
}

/// FIELD / VALUE pairs for a coin detail, priced in `vs_currency`
pub fn detail_fields(coin: &CoinDetail, vs_currency: &str) -> Vec<(&'static str, String)> {
    let market = coin.market_data.as_ref();

    let categories: Vec<&str> = coin.categories.iter().flatten().map(String::as_str).collect();
    let description = coin
        .description
        .get("en")
        .map(|d| truncate(d.trim(), 120))
        .filter(|d| !d.is_empty());

    vec![
        ("ID", coin.id.clone()),
        ("Name", coin.name.clone()),
        ("Symbol", coin.symbol.to_uppercase()),
        ("Rank", format_rank(coin.market_cap_rank)),
        (
            "Price",
            format_price(quoted(market.map(|m| &m.current_price), vs_currency)),
        ),
        (
            "Market cap",
            format_compact(quoted(market.map(|m| &m.market_cap), vs_currency)),
        ),
        (
            "Volume (24h)",
            format_compact(quoted(market.map(|m| &m.total_volume), vs_currency)),
        ),
        (
            "Change (24h)",
            format_percent(market.and_then(|m| m.price_change_percentage_24h)),
        ),
        (
            "Change (7d)",
            format_percent(market.and_then(|m| m.price_change_percentage_7d)),
        ),
        (
            "Circulating",
            unknown(market.and_then(|m| m.circulating_supply).map(format_supply)),
        ),
        (
            "Max supply",
            unknown(market.and_then(|m| m.max_supply).map(format_supply)),
        ),
        ("Algorithm", unknown(coin.hashing_algorithm.clone())),
        (
            "Categories",
            unknown(Some(categories.join(", ")).filter(|c| !c.is_empty())),
        ),
        ("Description", unknown(description)),
        ("Updated", unknown(coin.last_updated.clone())),
    ]
}

fn format_supply(supply: f64) -> String {
    format!("{:.0}", supply)
}

fn quoted(by_currency: Option<&BTreeMap<String, f64>>, vs_currency: &str) -> Option<f64> {
    by_currency.and_then(|m| m.get(vs_currency).copied())
}
