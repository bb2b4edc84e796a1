//! Mock market-data provider for testing
//!
//! Scripted responses per path; the last scripted response for a path
//! repeats once the queue is drained.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;

use super::MarketDataProvider;
use crate::error::{ProviderError, ProviderResult};

/// A request seen by the mock
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedRequest {
    pub path: String,
    pub query: Vec<(String, String)>,
}

/// Mock provider.
///
/// # Example
/// ```ignore
/// let mock = MockProvider::new()
///     .with_response("/global", json!({"data": {"active_cryptocurrencies": 1}}));
/// ```
#[derive(Default)]
pub struct MockProvider {
    responses: Mutex<HashMap<String, Vec<ProviderResult<Value>>>>,
    captured: Mutex<Vec<CapturedRequest>>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful response for `path`
    pub fn with_response(self, path: &str, body: Value) -> Self {
        self.push(path, Ok(body));
        self
    }

    /// Queue a failure for `path`
    pub fn with_error(self, path: &str, err: ProviderError) -> Self {
        self.push(path, Err(err));
        self
    }

    /// Queue a result for `path` after construction
    pub fn push(&self, path: &str, result: ProviderResult<Value>) {
        self.responses
            .lock()
            .unwrap()
            .entry(path.to_string())
            .or_default()
            .push(result);
    }

    /// Number of calls made for `path`
    pub fn call_count(&self, path: &str) -> usize {
        self.captured
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.path == path)
            .count()
    }

    /// All captured requests, in order
    pub fn captured(&self) -> Vec<CapturedRequest> {
        self.captured.lock().unwrap().clone()
    }
}

#[async_trait]
impl MarketDataProvider for MockProvider {
    async fn fetch(&self, path: &str, query: &[(&str, &str)]) -> ProviderResult<Value> {
        self.captured.lock().unwrap().push(CapturedRequest {
            path: path.to_string(),
            query: query
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        });

        let mut responses = self.responses.lock().unwrap();
        match responses.get_mut(path) {
            Some(queue) if queue.len() > 1 => queue.remove(0),
            Some(queue) if !queue.is_empty() => queue[0].clone(),
            _ => Err(ProviderError::Status {
                status: 404,
                message: format!("no mock response for {}", path),
            }),
        }
    }
}
