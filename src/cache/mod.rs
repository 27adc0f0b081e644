/// In-memory caching for market-data results
///
/// One [`CacheManager`] instance per result type, owned by the fetcher and
/// constructed once at startup. Nothing here is persisted.

pub mod config;
pub mod manager;

pub use config::CacheConfig;
pub use manager::{CacheManager, CacheMetrics};
