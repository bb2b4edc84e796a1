//! Market-data provider client

use async_trait::async_trait;
use serde_json::Value;

use crate::error::ProviderResult;

pub mod gateway;
#[cfg(test)]
pub mod mock;
pub mod models;

pub use gateway::FetchGateway;
#[cfg(test)]
pub use mock::MockProvider;

/// One outbound call to the market-data provider.
///
/// Implementations attach their own headers and timeout, never retry, and
/// map every failure into a [`ProviderError`](crate::error::ProviderError).
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// GET `path` (relative to the provider base URL) with `query` parameters
    /// and return the parsed JSON body.
    async fn fetch(&self, path: &str, query: &[(&str, &str)]) -> ProviderResult<Value>;
}
