/// Core domain types shared across the fetcher, cache and dashboard
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// CURRENCY DENOMINATION
// ============================================================================

/// Currency used to denominate prices. Fixed set supported by CoinGecko's
/// `vs_currency` parameter for the denominations the dashboard offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Currency {
    Usd,
    Eur,
    Gbp,
    Btc,
    Eth,
}

impl Currency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::Usd => "usd",
            Currency::Eur => "eur",
            Currency::Gbp => "gbp",
            Currency::Btc => "btc",
            Currency::Eth => "eth",
        }
    }

    /// Symbol prefix used when rendering prices
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Eur => "€",
            Currency::Gbp => "£",
            Currency::Btc => "₿",
            Currency::Eth => "Ξ",
        }
    }
}

impl Default for Currency {
    fn default() -> Self {
        Currency::Usd
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "usd" => Ok(Currency::Usd),
            "eur" => Ok(Currency::Eur),
            "gbp" => Ok(Currency::Gbp),
            "btc" => Ok(Currency::Btc),
            "eth" => Ok(Currency::Eth),
            other => Err(format!("Unsupported currency: {}", other)),
        }
    }
}

// ============================================================================
// QUERIES
// ============================================================================

/// Set of asset identifiers priced in one currency.
///
/// Identifiers are canonicalized on construction (trimmed, lowercased,
/// sorted, deduplicated) so that equivalent queries hash to the same cache
/// key regardless of input order or casing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetQuery {
    ids: Vec<String>,
    currency: Currency,
}

impl AssetQuery {
    pub fn new<I, S>(ids: I, currency: Currency) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut ids: Vec<String> = ids
            .into_iter()
            .map(|id| id.as_ref().trim().to_lowercase())
            .filter(|id| !id.is_empty())
            .collect();
        ids.sort();
        ids.dedup();

        Self { ids, currency }
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Comma-joined identifier list for the `ids` query parameter
    pub fn joined_ids(&self) -> String {
        self.ids.join(",")
    }
}

/// Historical series request for a single asset
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HistoryQuery {
    pub id: String,
    pub days: u32,
    pub currency: Currency,
}

impl HistoryQuery {
    pub fn new(id: &str, days: u32, currency: Currency) -> Self {
        Self {
            id: id.trim().to_lowercase(),
            days,
            currency,
        }
    }
}

// ============================================================================
// SNAPSHOTS & HISTORY
// ============================================================================

/// One row of current market data for a single asset.
///
/// Numeric fields are zero when the upstream omits them; `change_24h` is the
/// only field that may legitimately be negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetSnapshot {
    pub id: String,
    pub name: String,
    pub symbol: String,
    pub price: f64,
    pub change_24h: f64,
    pub market_cap: f64,
    pub volume_24h: f64,
}

/// Single point of a historical price/volume series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: DateTime<Utc>,
    pub price: f64,
    pub volume: f64,
}

/// Historical series for one asset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceHistory {
    pub id: String,
    pub currency: Currency,
    pub points: Vec<PricePoint>,
}

// ============================================================================
// FETCH OUTCOMES
// ============================================================================

/// Expected failure modes of a market-data fetch.
///
/// Carried inside [`FetchResult`] rather than returned as a crate error: the
/// fetcher never raises past its boundary for operational failures.
#[derive(Debug, Clone, PartialEq, thiserror::Error, Serialize, Deserialize)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Rate limited by upstream (HTTP 429)")]
    RateLimited,

    #[error("Upstream error: HTTP {0}")]
    Upstream(u16),

    #[error("Malformed response: {0}")]
    Parse(String),
}

/// Outcome of one market snapshot fetch. Created per call, cacheable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FetchResult {
    Snapshots(Vec<AssetSnapshot>),
    Failed(FetchError),
}

impl FetchResult {
    pub fn is_success(&self) -> bool {
        matches!(self, FetchResult::Snapshots(_))
    }

    pub fn snapshots(&self) -> Option<&[AssetSnapshot]> {
        match self {
            FetchResult::Snapshots(rows) => Some(rows),
            FetchResult::Failed(_) => None,
        }
    }

    pub fn error(&self) -> Option<&FetchError> {
        match self {
            FetchResult::Snapshots(_) => None,
            FetchResult::Failed(err) => Some(err),
        }
    }
}

impl From<Result<Vec<AssetSnapshot>, FetchError>> for FetchResult {
    fn from(result: Result<Vec<AssetSnapshot>, FetchError>) -> Self {
        match result {
            Ok(rows) => FetchResult::Snapshots(rows),
            Err(err) => FetchResult::Failed(err),
        }
    }
}

/// Outcome of one historical series fetch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum HistoryResult {
    Series(PriceHistory),
    Failed(FetchError),
}

impl HistoryResult {
    pub fn is_success(&self) -> bool {
        matches!(self, HistoryResult::Series(_))
    }

    pub fn series(&self) -> Option<&PriceHistory> {
        match self {
            HistoryResult::Series(history) => Some(history),
            HistoryResult::Failed(_) => None,
        }
    }
}

impl From<Result<PriceHistory, FetchError>> for HistoryResult {
    fn from(result: Result<PriceHistory, FetchError>) -> Self {
        match result {
            Ok(series) => HistoryResult::Series(series),
            Err(err) => HistoryResult::Failed(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_canonicalization() {
        let a = AssetQuery::new(["Bitcoin", "ethereum", "bitcoin", " Cardano "], Currency::Usd);
        let b = AssetQuery::new(["cardano", "bitcoin", "ETHEREUM"], Currency::Usd);

        assert_eq!(a, b);
        assert_eq!(a.ids(), &["bitcoin", "cardano", "ethereum"]);
        assert_eq!(a.joined_ids(), "bitcoin,cardano,ethereum");
    }

    #[test]
    fn test_query_currency_distinguishes_keys() {
        let usd = AssetQuery::new(["bitcoin"], Currency::Usd);
        let eur = AssetQuery::new(["bitcoin"], Currency::Eur);
        assert_ne!(usd, eur);
    }

    #[test]
    fn test_query_drops_empty_ids() {
        let query = AssetQuery::new(["", "  ", "solana"], Currency::Usd);
        assert_eq!(query.ids(), &["solana"]);
    }

    #[test]
    fn test_currency_parsing() {
        assert_eq!("USD".parse::<Currency>(), Ok(Currency::Usd));
        assert_eq!(" eur ".parse::<Currency>(), Ok(Currency::Eur));
        assert!("xyz".parse::<Currency>().is_err());
        assert_eq!(Currency::Btc.as_str(), "btc");
    }

    #[test]
    fn test_fetch_result_accessors() {
        let ok = FetchResult::Snapshots(vec![]);
        assert!(ok.is_success());
        assert!(ok.error().is_none());

        let failed = FetchResult::Failed(FetchError::RateLimited);
        assert!(!failed.is_success());
        assert_eq!(failed.error(), Some(&FetchError::RateLimited));
    }
}
