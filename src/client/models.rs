//! Provider response shapes
//!
//! These types double as the validation schema for cached values: a payload
//! that does not deserialize into the expected type is rejected before it
//! reaches the cache.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Envelope returned by `/global`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalResponse {
    pub data: GlobalStats,
}

/// Market-wide totals
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalStats {
    /// Number of tracked coins
    pub active_cryptocurrencies: u64,

    /// Number of tracked exchanges
    #[serde(default)]
    pub markets: Option<u64>,

    /// Total market cap keyed by quote currency
    #[serde(default)]
    pub total_market_cap: BTreeMap<String, f64>,

    /// 24h volume keyed by quote currency
    #[serde(default)]
    pub total_volume: BTreeMap<String, f64>,

    /// Dominance percentage keyed by coin symbol
    #[serde(default)]
    pub market_cap_percentage: BTreeMap<String, f64>,

    #[serde(default)]
    pub market_cap_change_percentage_24h_usd: Option<f64>,

    /// Unix seconds
    #[serde(default)]
    pub updated_at: Option<i64>,
}

/// One row of `/coins/markets`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoinMarket {
    pub id: String,
    pub symbol: String,
    pub name: String,

    #[serde(default)]
    pub image: Option<String>,

    #[serde(default)]
    pub current_price: Option<f64>,

    #[serde(default)]
    pub market_cap: Option<f64>,

    #[serde(default)]
    pub market_cap_rank: Option<u32>,

    #[serde(default)]
    pub total_volume: Option<f64>,

    #[serde(default)]
    pub high_24h: Option<f64>,

    #[serde(default)]
    pub low_24h: Option<f64>,

    #[serde(default)]
    pub price_change_percentage_24h: Option<f64>,

    #[serde(default)]
    pub circulating_supply: Option<f64>,

    #[serde(default)]
    pub last_updated: Option<String>,
}

/// `/coins/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoinDetail {
    pub id: String,
    pub symbol: String,
    pub name: String,

    #[serde(default)]
    pub hashing_algorithm: Option<String>,

    #[serde(default)]
    pub categories: Vec<Option<String>>,

    /// Description keyed by locale
    #[serde(default)]
    pub description: BTreeMap<String, String>,

    #[serde(default)]
    pub image: Option<CoinImage>,

    #[serde(default)]
    pub market_cap_rank: Option<u32>,

    #[serde(default)]
    pub market_data: Option<CoinMarketData>,

    #[serde(default)]
    pub last_updated: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoinImage {
    #[serde(default)]
    pub thumb: Option<String>,
    #[serde(default)]
    pub small: Option<String>,
    #[serde(default)]
    pub large: Option<String>,
}

/// Market figures embedded in a coin detail, keyed by quote currency
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoinMarketData {
    #[serde(default)]
    pub current_price: BTreeMap<String, f64>,

    #[serde(default)]
    pub market_cap: BTreeMap<String, f64>,

    #[serde(default)]
    pub total_volume: BTreeMap<String, f64>,

    #[serde(default)]
    pub price_change_percentage_24h: Option<f64>,

    #[serde(default)]
    pub price_change_percentage_7d: Option<f64>,

    #[serde(default)]
    pub circulating_supply: Option<f64>,

    #[serde(default)]
    pub total_supply: Option<f64>,

    #[serde(default)]
    pub max_supply: Option<f64>,
}

/// `/coins/{id}/market_chart`: `[unix_millis, value]` pairs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketChart {
    pub prices: Vec<[f64; 2]>,

    #[serde(default)]
    pub market_caps: Vec<[f64; 2]>,

    #[serde(default)]
    pub total_volumes: Vec<[f64; 2]>,
}

/// `/search`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResults {
    #[serde(default)]
    pub coins: Vec<SearchCoin>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchCoin {
    pub id: String,
    pub name: String,
    pub symbol: String,

    #[serde(default)]
    pub market_cap_rank: Option<u32>,

    #[serde(default)]
    pub thumb: Option<String>,
}
