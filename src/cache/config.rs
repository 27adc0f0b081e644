/// Cache configuration per result type
///
/// TTLs tuned for the upstream refresh cadence:
/// - Market snapshots: CoinGecko updates roughly every minute
/// - Historical series: stable once fetched, longer TTL is safe
/// - Failures: short TTL so a down upstream is not hot-retried, but
///   recovery is picked up quickly

use std::time::Duration;

#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Time-to-live for successful entries
    pub ttl: Duration,

    /// Time-to-live for failure entries (kept shorter than `ttl`)
    pub error_ttl: Duration,

    /// Maximum number of entries (LRU eviction when exceeded)
    pub capacity: usize,
}

impl CacheConfig {
    /// Current market snapshots (upstream refreshes ~1/min)
    pub fn markets() -> Self {
        Self {
            ttl: Duration::from_secs(60),
            error_ttl: Duration::from_secs(10),
            capacity: 256,
        }
    }

    /// Historical price series (immutable once served)
    pub fn history() -> Self {
        Self {
            ttl: Duration::from_secs(300),
            error_ttl: Duration::from_secs(10),
            capacity: 128,
        }
    }

    /// Custom configuration
    pub fn custom(ttl: Duration, error_ttl: Duration, capacity: usize) -> Self {
        Self {
            ttl,
            error_ttl,
            capacity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_keep_error_ttl_below_success_ttl() {
        for preset in [CacheConfig::markets(), CacheConfig::history()] {
            assert!(preset.error_ttl <= preset.ttl);
            assert!(preset.capacity > 0);
        }
    }

    #[test]
    fn test_markets_preset_matches_upstream_cadence() {
        let preset = CacheConfig::markets();
        assert_eq!(preset.ttl, Duration::from_secs(60));
        assert_eq!(preset.error_ttl, Duration::from_secs(10));
    }
}
