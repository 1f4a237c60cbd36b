//! # Meridian Market Data
//!
//! The price-history boundary of the system. It defines the abstract
//! `PriceHistoryProvider` contract the analytics core consumes, concrete
//! clients for the free Stooq and CoinGecko endpoints, and a TTL
//! memoization layer so repeated backtests do not hammer the upstreams.
//!
//! ## Contract
//!
//! Providers return ascending `(date, close)` points, possibly fewer than
//! requested. An unknown symbol yields an empty history, never an error:
//! the core has no visibility into *why* data is missing and treats an
//! empty result identically to an upstream failure.

use async_trait::async_trait;
use core_types::PricePoint;
use std::sync::Arc;
use std::time::Duration;

pub mod cache;
pub mod coingecko;
pub mod error;
pub mod stooq;

// Re-export the key components to create a clean, public-facing API.
pub use cache::{HistoryCache, MemoryCache, NoopCache};
pub use coingecko::CoinGeckoClient;
pub use error::MarketDataError;
pub use stooq::StooqClient;

/// Smallest history window a provider will be asked for.
pub const MIN_HISTORY_DAYS: u32 = 2;
/// Largest history window a provider will be asked for (~35 trading years).
pub const MAX_HISTORY_DAYS: u32 = 9000;
/// How long a fetched history stays cached by default.
pub const DEFAULT_HISTORY_TTL: Duration = Duration::from_secs(6 * 60 * 60);

/// The generic, abstract interface for a daily price-history source.
/// This trait is the contract the backtester consumes, allowing the
/// underlying implementation (live or mock) to be swapped out.
#[async_trait]
pub trait PriceHistoryProvider: Send + Sync {
    /// Fetches up to `days` of daily closes for `symbol`, ascending by
    /// date. Unknown symbols yield `Ok(vec![])`.
    async fn fetch_history(
        &self,
        symbol: &str,
        days: u32,
    ) -> Result<Vec<PricePoint>, MarketDataError>;
}

/// A caching decorator around any provider.
///
/// Normalizes the request (trimmed, lowercased symbol; days clamped to
/// [`MIN_HISTORY_DAYS`, `MAX_HISTORY_DAYS`]) before keying the cache, so
/// equivalent requests share one entry. Concurrent writers for the same
/// key race last-write-wins; a day's history is immutable once published,
/// so the duplicate fetch is wasted work rather than a correctness hazard.
pub struct CachedHistory {
    inner: Arc<dyn PriceHistoryProvider>,
    cache: Arc<dyn HistoryCache>,
    ttl: Duration,
}

impl CachedHistory {
    pub fn new(inner: Arc<dyn PriceHistoryProvider>, cache: Arc<dyn HistoryCache>) -> Self {
        Self {
            inner,
            cache,
            ttl: DEFAULT_HISTORY_TTL,
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    fn cache_key(symbol: &str, days: u32) -> String {
        format!("hist:v1:{symbol}:{days}")
    }
}

#[async_trait]
impl PriceHistoryProvider for CachedHistory {
    async fn fetch_history(
        &self,
        symbol: &str,
        days: u32,
    ) -> Result<Vec<PricePoint>, MarketDataError> {
        let symbol = symbol.trim().to_lowercase();
        let days = days.clamp(MIN_HISTORY_DAYS, MAX_HISTORY_DAYS);
        let key = Self::cache_key(&symbol, days);

        if let Some(hit) = self.cache.get(&key) {
            tracing::debug!(%symbol, days, "price history cache hit");
            return Ok(hit);
        }

        let series = self.inner.fetch_history(&symbol, days).await?;
        // Cache even empty results to avoid hammering upstreams.
        self.cache.set(&key, series.clone(), self.ttl);
        Ok(series)
    }
}
