//! HTTP fetch gateway for the market-data provider

use async_trait::async_trait;
use reqwest::header::{ACCEPT, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client as HttpClient, StatusCode};
use serde_json::Value;
use std::time::Duration;

use super::MarketDataProvider;
use crate::config::ProviderConfig;
use crate::error::{ConfigError, ProviderError, ProviderResult, Result};

/// Client identification sent with every request
const USER_AGENT: &str = concat!("coindash/", env!("CARGO_PKG_VERSION"));

/// Retry-After fallback when a 429 carries no usable header
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// Error bodies are cut to this many characters
const MAX_ERROR_BODY: usize = 200;

/// Stateless gateway: fixed headers, bounded timeout, no retries.
pub struct FetchGateway {
    http: HttpClient,
    base_url: String,
}

impl FetchGateway {
    /// Build a gateway from provider settings
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        if let Some(ref key) = config.api_key {
            let name = HeaderName::from_bytes(config.api_key_header.as_bytes()).map_err(|e| {
                ConfigError::Invalid(format!(
                    "Invalid API key header '{}': {}",
                    config.api_key_header, e
                ))
            })?;
            let mut value = HeaderValue::from_str(key)
                .map_err(|e| ConfigError::Invalid(format!("Invalid API key: {}", e)))?;
            value.set_sensitive(true);
            headers.insert(name, value);
        }

        let http = HttpClient::builder()
            .timeout(config.timeout())
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()
            .map_err(ProviderError::from)?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl MarketDataProvider for FetchGateway {
    async fn fetch(&self, path: &str, query: &[(&str, &str)]) -> ProviderResult<Value> {
        let url = format!("{}{}", self.base_url, path);
        log::debug!("GET {} {:?}", url, query);

        let response = self.http.get(&url).query(query).send().await?;

        let status = response.status();
        match status {
            s if s.is_success() => {
                // A body cut off in transit is a network failure, not bad JSON
                let bytes = response.bytes().await?;
                serde_json::from_slice::<Value>(&bytes).map_err(|e| {
                    ProviderError::InvalidResponse(format!("Failed to parse response: {}", e))
                })
            }
            StatusCode::TOO_MANY_REQUESTS => {
                let retry_after = response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.trim().parse::<u64>().ok())
                    .unwrap_or(DEFAULT_RETRY_AFTER_SECS);
                log::warn!("Provider rate limited {} (retry after {}s)", path, retry_after);
                Err(ProviderError::RateLimited(Duration::from_secs(retry_after)))
            }
            _ => {
                let body = response.text().await.unwrap_or_default();
                Err(ProviderError::Status {
                    status: status.as_u16(),
                    message: error_message(status, &body),
                })
            }
        }
    }
}

/// Human-readable message for a non-2xx response
fn error_message(status: StatusCode, body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        return status
            .canonical_reason()
            .unwrap_or("Unexpected status")
            .to_string();
    }
    if body.chars().count() > MAX_ERROR_BODY {
        let cut: String = body.chars().take(MAX_ERROR_BODY).collect();
        format!("{}...", cut)
    } else {
        body.to_string()
    }
}
