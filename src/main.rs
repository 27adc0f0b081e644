use anyhow::Result;
use clap::Parser;
use cryptodash::arguments::Arguments;
use cryptodash::dashboard;
use cryptodash::logger::{self, Logger};
use cryptodash::types::{
    AssetQuery, AssetSnapshot, Currency, FetchResult, HistoryQuery, HistoryResult,
};
use cryptodash::{Config, MarketDataFetcher};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Arguments::parse();
    logger::set_debug_enabled(args.debug_api);

    Logger::header("Real-Time Market Overview");

    let mut config = Config::load(&args.config)?;
    if let Some(coins) = &args.coins {
        config.assets.coins = coins.clone();
    }
    if let Some(currency) = &args.currency {
        config.assets.currency = currency
            .parse::<Currency>()
            .map_err(|e| anyhow::anyhow!(e))?;
    }
    if let Some(refresh) = args.refresh_secs {
        config.general.refresh_interval_secs = refresh;
    }

    let fetcher = MarketDataFetcher::from_config(&config).map_err(|e| anyhow::anyhow!(e))?;
    let query = AssetQuery::new(&config.assets.coins, config.assets.currency);
    if query.is_empty() {
        return Err(anyhow::anyhow!("No coins to track; check --coins or the config file"));
    }

    let shutdown = Arc::new(AtomicBool::new(false));
    {
        let shutdown = shutdown.clone();
        ctrlc::set_handler(move || {
            shutdown.store(true, Ordering::SeqCst);
        })?;
    }

    Logger::info(&format!(
        "Tracking {} assets in {} (refresh every {}s, cache TTL {}s)",
        query.ids().len(),
        query.currency(),
        config.general.refresh_interval_secs,
        config.cache.ttl_secs
    ));

    let refresh = Duration::from_secs(config.general.refresh_interval_secs.max(1));
    let mut last_snapshots: Option<Vec<AssetSnapshot>> = None;

    loop {
        match fetcher.fetch(&query).await {
            FetchResult::Snapshots(snapshots) => {
                Logger::market(&format!("Updated {} assets", snapshots.len()));
                dashboard::render_snapshots(&snapshots, query.currency());
                last_snapshots = Some(snapshots);
            }
            FetchResult::Failed(err) => {
                dashboard::render_error_banner(&err);
                // Keep the last good view on screen instead of clearing it
                if let Some(snapshots) = &last_snapshots {
                    dashboard::render_snapshots(snapshots, query.currency());
                }
            }
        }

        if let Some(coin) = &args.history {
            let history_query =
                HistoryQuery::new(coin, config.general.history_days, query.currency());
            match fetcher.history(&history_query).await {
                HistoryResult::Series(history) => {
                    dashboard::render_history(&history, history_query.days);
                }
                HistoryResult::Failed(err) => dashboard::render_error_banner(&err),
            }
        }

        if args.once || shutdown.load(Ordering::SeqCst) {
            break;
        }

        // Sleep in short slices so Ctrl-C is honored promptly
        let mut waited = Duration::ZERO;
        let slice = Duration::from_millis(200);
        while waited < refresh {
            if shutdown.load(Ordering::SeqCst) {
                break;
            }
            tokio::time::sleep(slice).await;
            waited += slice;
        }
        if shutdown.load(Ordering::SeqCst) {
            break;
        }
    }

    let metrics = fetcher.markets_cache_metrics();
    Logger::separator();
    Logger::info(&format!(
        "Cache: {} hits, {} misses ({:.0}% hit rate)",
        metrics.hits,
        metrics.misses,
        metrics.hit_rate() * 100.0
    ));
    Logger::success("Shutdown complete");

    Ok(())
}
