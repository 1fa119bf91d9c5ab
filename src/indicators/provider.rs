//! Cached, failure-tolerant access to economic indicators.

use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::{debug, warn};

use super::{EconomicIndicators, IndicatorSource};

/// How long fetched indicators are served without asking the source again.
pub const DEFAULT_INDICATOR_TTL: Duration = Duration::from_secs(5 * 60);

/// How long a single fetch may take before the provider falls back.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(2);

/// Supplies the indicator values a calculation should use.
///
/// Implementations never fail: a caller always receives usable values.
#[async_trait]
pub trait IndicatorProvider: Send + Sync {
    /// Returns the current indicator values.
    async fn get_indicators(&self) -> EconomicIndicators;
}

#[derive(Debug, Clone)]
struct CachedIndicators {
    indicators: EconomicIndicators,
    fetched_at: Instant,
}

/// Wraps an [`IndicatorSource`] with a time-bounded cache and fallbacks.
///
/// A fresh cache entry is returned directly. Otherwise the source is asked,
/// waiting at most the fetch timeout. If the source fails or times out, the
/// last known good values are returned, or [`EconomicIndicators::fallback`]
/// when the source has never answered.
pub struct CachedIndicatorProvider<S> {
    source: S,
    ttl: Duration,
    fetch_timeout: Duration,
    cache: RwLock<Option<CachedIndicators>>,
}

impl<S: IndicatorSource> CachedIndicatorProvider<S> {
    /// Creates a provider with the default TTL and fetch timeout.
    pub fn new(source: S) -> Self {
        Self {
            source,
            ttl: DEFAULT_INDICATOR_TTL,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            cache: RwLock::new(None),
        }
    }

    /// Sets the cache time-to-live.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Sets the maximum wait for a single fetch.
    pub fn with_fetch_timeout(mut self, fetch_timeout: Duration) -> Self {
        self.fetch_timeout = fetch_timeout;
        self
    }

    /// Drops the cached values so the next call asks the source.
    pub async fn invalidate(&self) {
        *self.cache.write().await = None;
    }

    async fn fresh_cached(&self) -> Option<EconomicIndicators> {
        let cache = self.cache.read().await;
        cache
            .as_ref()
            .filter(|entry| entry.fetched_at.elapsed() < self.ttl)
            .map(|entry| entry.indicators.clone())
    }

    async fn last_known_or_fallback(&self) -> EconomicIndicators {
        let cache = self.cache.read().await;
        match cache.as_ref() {
            Some(entry) => entry.indicators.clone(),
            None => {
                warn!(source = self.source.name(), "No cached indicators, using hardcoded fallback");
                EconomicIndicators::fallback()
            }
        }
    }
}

#[async_trait]
impl<S: IndicatorSource> IndicatorProvider for CachedIndicatorProvider<S> {
    async fn get_indicators(&self) -> EconomicIndicators {
        if let Some(indicators) = self.fresh_cached().await {
            return indicators;
        }

        match tokio::time::timeout(self.fetch_timeout, self.source.fetch()).await {
            Ok(Ok(indicators)) => {
                debug!(
                    source = self.source.name(),
                    as_of = %indicators.as_of,
                    "Fetched economic indicators"
                );
                *self.cache.write().await = Some(CachedIndicators {
                    indicators: indicators.clone(),
                    fetched_at: Instant::now(),
                });
                indicators
            }
            Ok(Err(err)) => {
                warn!(source = self.source.name(), error = %err, "Indicator fetch failed");
                self.last_known_or_fallback().await
            }
            Err(_) => {
                warn!(
                    source = self.source.name(),
                    timeout_ms = self.fetch_timeout.as_millis() as u64,
                    "Indicator fetch timed out"
                );
                self.last_known_or_fallback().await
            }
        }
    }
}
