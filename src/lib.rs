pub mod apis;
pub mod arguments;
pub mod cache;
pub mod config;
pub mod constants;
pub mod dashboard;
pub mod fetcher;
pub mod logger;
pub mod types;

pub use config::Config;
pub use fetcher::{MarketDataFetcher, MarketDataSource};
pub use types::{
    AssetQuery, AssetSnapshot, Currency, FetchError, FetchResult, HistoryQuery, HistoryResult,
    PriceHistory, PricePoint,
};
