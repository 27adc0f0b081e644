/// Market Data Fetcher
///
/// Cache-in-front-of-source: every lookup checks the TTL cache keyed by the
/// canonical query before touching the network, and every outcome (success
/// or failure) is cached. Failures get the shorter error TTL so a down
/// upstream is re-probed quickly without a hot retry loop. No retries happen
/// here; the refresh loop re-invokes on its own schedule.

use crate::apis::coingecko::CoinGeckoClient;
use crate::cache::{CacheConfig, CacheManager, CacheMetrics};
use crate::config::Config;
use crate::logger::Logger;
use crate::types::{
    AssetQuery, AssetSnapshot, FetchError, FetchResult, HistoryQuery, HistoryResult, PriceHistory,
};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Upstream market-data provider seam. The CoinGecko client is the
/// production implementation; tests substitute counting mocks.
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    async fn markets(&self, query: &AssetQuery) -> Result<Vec<AssetSnapshot>, FetchError>;

    async fn market_chart(&self, query: &HistoryQuery) -> Result<PriceHistory, FetchError>;
}

#[async_trait]
impl MarketDataSource for CoinGeckoClient {
    async fn markets(&self, query: &AssetQuery) -> Result<Vec<AssetSnapshot>, FetchError> {
        let rows = self.fetch_markets(query).await?;
        Ok(rows.iter().map(|row| row.to_snapshot()).collect())
    }

    async fn market_chart(&self, query: &HistoryQuery) -> Result<PriceHistory, FetchError> {
        let chart = self.fetch_market_chart(query).await?;
        Ok(chart.to_history(&query.id, query.currency))
    }
}

/// Fetches market data through a short-lived cache.
///
/// Owns its caches explicitly; constructed once at startup and held by the
/// consumer rather than living in ambient global state.
pub struct MarketDataFetcher {
    source: Arc<dyn MarketDataSource>,
    markets_cache: CacheManager<AssetQuery, FetchResult>,
    history_cache: CacheManager<HistoryQuery, HistoryResult>,
}

impl MarketDataFetcher {
    pub fn new(
        source: Arc<dyn MarketDataSource>,
        markets_config: CacheConfig,
        history_config: CacheConfig,
    ) -> Self {
        Self {
            source,
            markets_cache: CacheManager::new(markets_config),
            history_cache: CacheManager::new(history_config),
        }
    }

    /// Build the production fetcher (CoinGecko source) from configuration
    pub fn from_config(config: &Config) -> Result<Self, String> {
        let client = CoinGeckoClient::with_settings(
            &config.api.base_url,
            config.api.timeout_secs,
            config.api.rate_limit_per_minute,
        )?;

        let mut markets_config = CacheConfig::markets();
        markets_config.ttl = Duration::from_secs(config.cache.ttl_secs);
        markets_config.error_ttl = Duration::from_secs(config.cache.error_ttl_secs);
        markets_config.capacity = config.cache.capacity;

        let mut history_config = CacheConfig::history();
        history_config.error_ttl = Duration::from_secs(config.cache.error_ttl_secs);

        Ok(Self::new(Arc::new(client), markets_config, history_config))
    }

    /// Fetch current snapshots for the query, served from cache when fresh.
    ///
    /// Every outcome is a `FetchResult`; operational failures never escape
    /// as errors.
    pub async fn fetch(&self, query: &AssetQuery) -> FetchResult {
        if query.is_empty() {
            return FetchResult::Snapshots(Vec::new());
        }

        if let Some(cached) = self.markets_cache.get(query) {
            Logger::debug(&format!(
                "Cache hit for [{}] ({})",
                query.joined_ids(),
                query.currency()
            ));
            return cached;
        }

        let result: FetchResult = self.source.markets(query).await.into();

        match &result {
            FetchResult::Snapshots(rows) => {
                Logger::debug(&format!(
                    "Fetched {} snapshots for [{}]",
                    rows.len(),
                    query.joined_ids()
                ));
                self.markets_cache.insert(query.clone(), result.clone());
            }
            FetchResult::Failed(err) => {
                Logger::debug(&format!(
                    "Fetch failed for [{}]: {}",
                    query.joined_ids(),
                    err
                ));
                self.markets_cache.insert_error(query.clone(), result.clone());
            }
        }

        result
    }

    /// Fetch the historical series for one asset, served from cache when fresh
    pub async fn history(&self, query: &HistoryQuery) -> HistoryResult {
        if let Some(cached) = self.history_cache.get(query) {
            Logger::debug(&format!("History cache hit for {} ({}d)", query.id, query.days));
            return cached;
        }

        let result: HistoryResult = self.source.market_chart(query).await.into();

        match &result {
            HistoryResult::Series(_) => {
                self.history_cache.insert(query.clone(), result.clone());
            }
            HistoryResult::Failed(_) => {
                self.history_cache.insert_error(query.clone(), result.clone());
            }
        }

        result
    }

    pub fn markets_cache_metrics(&self) -> CacheMetrics {
        self.markets_cache.metrics()
    }

    pub fn history_cache_metrics(&self) -> CacheMetrics {
        self.history_cache.metrics()
    }

    /// Drop all cached results; next calls hit the network
    pub fn clear_caches(&self) {
        self.markets_cache.clear();
        self.history_cache.clear();
    }
}
