//! Keyed response store with freshness, fallback and per-key single-flight

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::OwnedMutexGuard;

use super::CacheKey;
use crate::error::{ProviderError, ProviderResult};

/// Source of "now" for freshness checks
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Last successfully validated response for a key
#[derive(Debug, Clone)]
struct CacheEntry {
    value: Value,
    stored_at: DateTime<Utc>,
}

impl CacheEntry {
    fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        let ttl = chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::MAX);
        now.signed_duration_since(self.stored_at) < ttl
    }
}

type FlightMap = HashMap<CacheKey, Arc<tokio::sync::Mutex<()>>>;

/// Counters for diagnostics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Keys currently holding a value
    pub entries: usize,
    /// Calls answered from a fresh entry
    pub hits: u64,
    /// Calls that invoked the loader
    pub misses: u64,
    /// Successful loads stored
    pub refreshes: u64,
    /// Failed loads answered with a stale entry
    pub fallbacks: u64,
}

#[derive(Default)]
struct Counters {
    hits: AtomicU64,
    misses: AtomicU64,
    refreshes: AtomicU64,
    fallbacks: AtomicU64,
}

/// In-memory cache in front of the market-data provider.
///
/// Built once at startup and shared by `Arc`. Each key has its own async
/// lock held across check, load and store, so concurrent callers for the same
/// key wait for one in-flight load instead of each hitting the provider.
/// Entries are never evicted; a key that has loaded once keeps its last value
/// as a fallback for as long as the process lives. A key's lock is dropped
/// again once nobody waits on it unless the key holds a value.
pub struct ResponseCache {
    entries: Mutex<HashMap<CacheKey, CacheEntry>>,
    flights: Mutex<FlightMap>,
    clock: Arc<dyn Clock>,
    counters: Counters,
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseCache {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create a cache reading time from `clock`
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            flights: Mutex::new(HashMap::new()),
            clock,
            counters: Counters::default(),
        }
    }

    /// Return the cached value for `key` if younger than `ttl`, otherwise run
    /// `loader` and store its result.
    ///
    /// The loader's JSON must deserialize into `T`; a payload that does not is
    /// treated exactly like a failed load and is never stored. When a load
    /// fails and the key has ever held a value, that value is returned
    /// whatever its age. Only a key with no value at all surfaces the error.
    /// Rate-limited loads are not retried here.
    pub async fn get_or_fetch<T, F, Fut>(
        &self,
        key: &CacheKey,
        ttl: Duration,
        loader: F,
    ) -> ProviderResult<T>
    where
        T: DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = ProviderResult<Value>>,
    {
        let permit = self.flight(key).lock_owned().await;
        let _flight = Flight {
            cache: self,
            key,
            permit: Some(permit),
        };

        let previous = self.lock_entries().get(key).cloned();

        if let Some(ref entry) = previous
            && entry.is_fresh(self.clock.now(), ttl)
        {
            match T::deserialize(&entry.value) {
                Ok(value) => {
                    self.counters.hits.fetch_add(1, Ordering::Relaxed);
                    log::debug!("Cache hit: {}", key);
                    return Ok(value);
                }
                Err(e) => log::warn!("Cached value for {} no longer decodes: {}", key, e),
            }
        }

        self.counters.misses.fetch_add(1, Ordering::Relaxed);
        log::debug!("Cache miss: {}", key);

        let loaded = loader().await.and_then(|raw| {
            let value = T::deserialize(&raw)
                .map_err(|e| ProviderError::InvalidResponse(format!("{}: {}", key, e)))?;
            Ok((value, raw))
        });

        match loaded {
            Ok((value, raw)) => {
                let entry = CacheEntry {
                    value: raw,
                    stored_at: self.clock.now(),
                };
                self.lock_entries().insert(key.clone(), entry);
                self.counters.refreshes.fetch_add(1, Ordering::Relaxed);
                Ok(value)
            }
            Err(err) => self.fall_back(key, previous, err),
        }
    }

    /// Serve `previous` in place of `err`, if there is one to serve
    fn fall_back<T: DeserializeOwned>(
        &self,
        key: &CacheKey,
        previous: Option<CacheEntry>,
        err: ProviderError,
    ) -> ProviderResult<T> {
        let Some(entry) = previous else {
            log::warn!("Load failed for {} with nothing cached: {}", key, err);
            return Err(err);
        };

        match T::deserialize(&entry.value) {
            Ok(value) => {
                self.counters.fallbacks.fetch_add(1, Ordering::Relaxed);
                log::warn!(
                    "Load failed for {} ({}), serving value stored at {}",
                    key,
                    err,
                    entry.stored_at.to_rfc3339()
                );
                Ok(value)
            }
            Err(_) => Err(err),
        }
    }

    /// Number of keys holding a value
    pub fn len(&self) -> usize {
        self.lock_entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every stored value, returning how many there were
    pub fn clear(&self) -> usize {
        let removed = {
            let mut entries = self.lock_entries();
            let removed = entries.len();
            entries.clear();
            removed
        };
        self.lock_flights()
            .retain(|_, flight| Arc::strong_count(flight) > 1);
        removed
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.len(),
            hits: self.counters.hits.load(Ordering::Relaxed),
            misses: self.counters.misses.load(Ordering::Relaxed),
            refreshes: self.counters.refreshes.load(Ordering::Relaxed),
            fallbacks: self.counters.fallbacks.load(Ordering::Relaxed),
        }
    }

    fn flight(&self, key: &CacheKey) -> Arc<tokio::sync::Mutex<()>> {
        Arc::clone(self.lock_flights().entry(key.clone()).or_default())
    }

    fn lock_flights(&self) -> MutexGuard<'_, FlightMap> {
        self.flights.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn lock_entries(&self) -> MutexGuard<'_, HashMap<CacheKey, CacheEntry>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Holds a key's lock for one check, load and store sequence
struct Flight<'a> {
    cache: &'a ResponseCache,
    key: &'a CacheKey,
    permit: Option<OwnedMutexGuard<()>>,
}

impl Drop for Flight<'_> {
    fn drop(&mut self) {
        // Lock order is flights then entries
        let mut flights = self.cache.lock_flights();
        self.permit.take();

        let idle = flights
            .get(self.key)
            .is_some_and(|flight| Arc::strong_count(flight) == 1);
        if idle && !self.cache.lock_entries().contains_key(self.key) {
            flights.remove(self.key);
        }
    }
}
