//! Market data service
//!
//! Composes the fetch gateway with the response cache. Each resource class
//! gets its own key rule and TTL; route handlers and CLI commands call these
//! methods and never touch the cache directly.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

use crate::cache::{CacheKey, ResponseCache, TtlPolicy};
use crate::client::models::{
    CoinDetail, CoinMarket, GlobalResponse, GlobalStats, MarketChart, SearchResults,
};
use crate::client::MarketDataProvider;
use crate::config::Config;
use crate::error::{ProviderError, ProviderResult};

pub mod params;

pub use params::{CoinId, HistoryRange, Interval};

/// Settings the service needs from config
#[derive(Debug, Clone)]
pub struct MarketSettings {
    pub vs_currency: String,
    pub per_page: u32,
    pub ttl: TtlPolicy,
}

impl Default for MarketSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl MarketSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            vs_currency: config.provider.vs_currency.to_ascii_lowercase(),
            per_page: config.provider.per_page,
            ttl: config.cache.ttl_policy(),
        }
    }
}

/// Dashboard landing data
#[derive(Debug, Clone, Serialize)]
pub struct Overview {
    pub global: GlobalStats,
    pub coins: Vec<CoinMarket>,
}

/// Cached access to the market-data provider
pub struct MarketService<P: MarketDataProvider> {
    provider: P,
    cache: Arc<ResponseCache>,
    settings: MarketSettings,
}

impl<P: MarketDataProvider> MarketService<P> {
    pub fn new(provider: P, cache: Arc<ResponseCache>, settings: MarketSettings) -> Self {
        Self {
            provider,
            cache,
            settings,
        }
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    pub fn settings(&self) -> &MarketSettings {
        &self.settings
    }

    /// Market-wide totals
    pub async fn global_stats(&self) -> ProviderResult<GlobalStats> {
        let key = CacheKey::from("global");
        let response: GlobalResponse = self
            .cache
            .get_or_fetch(&key, self.settings.ttl.global, || {
                self.provider.fetch("/global", &[])
            })
            .await?;
        Ok(response.data)
    }

    /// One page of coins ordered by market cap.
    ///
    /// Only the first page is cached; later pages go to the provider on
    /// every call.
    pub async fn coins(&self, page: u32) -> ProviderResult<Vec<CoinMarket>> {
        let page = page.max(1).to_string();
        let per_page = self.settings.per_page.to_string();
        let vs = self.settings.vs_currency.as_str();
        let query = [
            ("vs_currency", vs),
            ("order", "market_cap_desc"),
            ("per_page", per_page.as_str()),
            ("page", page.as_str()),
            ("sparkline", "false"),
            ("price_change_percentage", "24h"),
        ];

        if page != "1" {
            log::debug!("Listing page {} is not cached", page);
            let raw = self.provider.fetch("/coins/markets", &query).await?;
            return decode(raw);
        }

        let key = CacheKey::new(
            "listing",
            &[("vs_currency", vs), ("per_page", per_page.as_str())],
        );
        self.cache
            .get_or_fetch(&key, self.settings.ttl.listing, || {
                self.provider.fetch("/coins/markets", &query)
            })
            .await
    }

    /// Full detail for one coin
    pub async fn coin(&self, id: &CoinId) -> ProviderResult<CoinDetail> {
        let path = format!("/coins/{}", id);
        let query = [
            ("localization", "false"),
            ("tickers", "false"),
            ("market_data", "true"),
            ("community_data", "false"),
            ("developer_data", "false"),
            ("sparkline", "false"),
        ];

        let key = CacheKey::new("coin", &[("id", id.as_str())]);
        self.cache
            .get_or_fetch(&key, self.settings.ttl.detail, || {
                self.provider.fetch(&path, &query)
            })
            .await
    }

    /// Price, market cap and volume series for one coin
    pub async fn history(
        &self,
        id: &CoinId,
        range: HistoryRange,
        interval: Option<Interval>,
    ) -> ProviderResult<MarketChart> {
        let path = format!("/coins/{}/market_chart", id);
        let days = range.to_string();
        let vs = self.settings.vs_currency.as_str();

        let mut query = vec![("vs_currency", vs), ("days", days.as_str())];
        if let Some(interval) = interval {
            query.push(("interval", interval.as_str()));
        }

        let mut key_params = vec![
            ("id", id.as_str()),
            ("vs_currency", vs),
            ("days", days.as_str()),
        ];
        if let Some(interval) = interval {
            key_params.push(("interval", interval.as_str()));
        }
        let key = CacheKey::new("history", &key_params);

        let ttl = self.settings.ttl.for_history(range.is_intraday());
        self.cache
            .get_or_fetch(&key, ttl, || self.provider.fetch(&path, &query))
            .await
    }

    /// Free-text coin search; never cached
    pub async fn search(&self, query: &str) -> ProviderResult<SearchResults> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(SearchResults { coins: Vec::new() });
        }
        let raw = self.provider.fetch("/search", &[("query", query)]).await?;
        decode(raw)
    }

    /// Global stats and the first listing page, fetched concurrently
    pub async fn overview(&self) -> ProviderResult<Overview> {
        let (global, coins) = futures::try_join!(self.global_stats(), self.coins(1))?;
        Ok(Overview { global, coins })
    }
}

/// Validate an uncached payload against its expected shape
fn decode<T: DeserializeOwned>(raw: Value) -> ProviderResult<T> {
    serde_json::from_value(raw).map_err(|e| ProviderError::InvalidResponse(e.to_string()))
}
