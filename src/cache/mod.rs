//! In-memory response cache for provider calls
//!
//! Keeps the last good response per key, serves it while fresh, and falls
//! back to it (at any age) when a refresh fails.

pub mod key;
pub mod store;

use std::time::Duration;

/// TTL per resource class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TtlPolicy {
    /// Global market stats
    pub global: Duration,
    /// First page of the coin listing
    pub listing: Duration,
    /// Coin detail by id
    pub detail: Duration,
    /// Historical series spanning at most one day
    pub history_intraday: Duration,
    /// Historical series spanning more than one day
    pub history: Duration,
}

impl Default for TtlPolicy {
    fn default() -> Self {
        Self {
            global: Duration::from_secs(60),
            listing: Duration::from_secs(60),
            detail: Duration::from_secs(60),
            history_intraday: Duration::from_secs(30),
            history: Duration::from_secs(5 * 60),
        }
    }
}

impl TtlPolicy {
    /// TTL for a historical series; short ranges move faster
    pub fn for_history(&self, intraday: bool) -> Duration {
        if intraday {
            self.history_intraday
        } else {
            self.history
        }
    }
}

pub use key::CacheKey;
pub use store::{CacheStats, ResponseCache};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ttls() {
        let ttl = TtlPolicy::default();
        assert_eq!(ttl.global, Duration::from_secs(60));
        assert_eq!(ttl.listing, Duration::from_secs(60));
        assert_eq!(ttl.detail, Duration::from_secs(60));
        assert_eq!(ttl.for_history(true), Duration::from_secs(30));
        assert_eq!(ttl.for_history(false), Duration::from_secs(300));
    }
}
