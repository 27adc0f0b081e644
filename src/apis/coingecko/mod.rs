/// CoinGecko API client
///
/// API Documentation: https://docs.coingecko.com/reference/introduction
///
/// Endpoints implemented:
/// 1. /api/v3/coins/markets?vs_currency={cur}&ids={ids} - Current market rows
/// 2. /api/v3/coins/{id}/market_chart?vs_currency={cur}&days={d} - History

pub mod types;

pub use self::types::{CoinGeckoMarketChart, CoinGeckoMarketRow};

use crate::apis::client::{HttpClient, RateLimiter};
use crate::logger::Logger;
use crate::types::{AssetQuery, FetchError, HistoryQuery};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

// ============================================================================
// API CONFIGURATION
// ============================================================================

pub const COINGECKO_BASE_URL: &str = "https://api.coingecko.com/api/v3";

/// Request timeout in seconds - CoinGecko can be slow, bounded so a hung
/// request classifies as a network error instead of blocking the refresh loop
pub const TIMEOUT_SECS: u64 = 10;

/// Rate limit per minute - CoinGecko public tier is strict, 30/min is safe
pub const RATE_LIMIT_PER_MINUTE: usize = 30;

// ============================================================================
// ERROR CLASSIFICATION
// ============================================================================

/// Map a transport-level error onto the fetch taxonomy
pub fn classify_transport_error(err: &reqwest::Error) -> FetchError {
    if err.is_decode() {
        FetchError::Parse(err.to_string())
    } else if err.is_timeout() {
        FetchError::Network(format!("Request timeout: {}", err))
    } else {
        FetchError::Network(err.to_string())
    }
}

/// Map a non-2xx status onto the fetch taxonomy. 429 is distinguished so the
/// caller can surface back-off guidance instead of a generic upstream error.
pub fn classify_status(status: StatusCode) -> FetchError {
    if status == StatusCode::TOO_MANY_REQUESTS {
        FetchError::RateLimited
    } else {
        FetchError::Upstream(status.as_u16())
    }
}

// ============================================================================
// CLIENT IMPLEMENTATION
// ============================================================================

pub struct CoinGeckoClient {
    http_client: HttpClient,
    rate_limiter: RateLimiter,
    base_url: String,
}

impl CoinGeckoClient {
    pub fn new() -> Result<Self, String> {
        Self::with_settings(COINGECKO_BASE_URL, TIMEOUT_SECS, RATE_LIMIT_PER_MINUTE)
    }

    pub fn with_settings(
        base_url: &str,
        timeout_secs: u64,
        rate_limit_per_minute: usize,
    ) -> Result<Self, String> {
        let http_client = HttpClient::new(timeout_secs)?;

        Ok(Self {
            http_client,
            rate_limiter: RateLimiter::new(rate_limit_per_minute),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<T, FetchError>
    where
        T: DeserializeOwned,
    {
        let guard = self
            .rate_limiter
            .acquire()
            .await
            .map_err(FetchError::Network)?;

        let url = format!("{}/{}", self.base_url, endpoint);
        let response_result = self
            .http_client
            .client()
            .get(&url)
            .header("Accept", "application/json")
            .query(query)
            .send()
            .await;
        drop(guard);

        let response = response_result.map_err(|e| classify_transport_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            Logger::debug(&format!("CoinGecko {} returned HTTP {}", endpoint, status));
            return Err(classify_status(status));
        }

        // Decode from the raw body so a mangled payload maps to Parse rather
        // than a transport error
        let body = response
            .text()
            .await
            .map_err(|e| classify_transport_error(&e))?;

        serde_json::from_str(&body).map_err(|e| FetchError::Parse(e.to_string()))
    }

    /// Fetch current market rows for every asset in the query, one request
    pub async fn fetch_markets(
        &self,
        query: &AssetQuery,
    ) -> Result<Vec<CoinGeckoMarketRow>, FetchError> {
        Logger::debug(&format!(
            "CoinGecko markets request: ids={}, vs_currency={}",
            query.joined_ids(),
            query.currency()
        ));

        let params = [
            ("vs_currency", query.currency().as_str().to_string()),
            ("ids", query.joined_ids()),
        ];

        self.get_json("coins/markets", &params).await
    }

    /// Fetch the historical price/volume series for a single asset
    pub async fn fetch_market_chart(
        &self,
        query: &HistoryQuery,
    ) -> Result<CoinGeckoMarketChart, FetchError> {
        Logger::debug(&format!(
            "CoinGecko market_chart request: id={}, days={}, vs_currency={}",
            query.id, query.days, query.currency
        ));

        let endpoint = format!("coins/{}/market_chart", query.id);
        let params = [
            ("vs_currency", query.currency.as_str().to_string()),
            ("days", query.days.to_string()),
        ];

        self.get_json(&endpoint, &params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Currency;

    #[tokio::test]
    async fn test_timeout_classifies_as_network_error() {
        use std::net::TcpListener;

        // Accepts connections but never answers, so the client read times out
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        std::thread::spawn(move || {
            let mut held = Vec::new();
            for stream in listener.incoming() {
                if let Ok(stream) = stream {
                    held.push(stream);
                }
            }
        });

        let base_url = format!("http://{}", addr);
        let client = CoinGeckoClient::with_settings(&base_url, 1, 0).unwrap();
        let query = AssetQuery::new(["bitcoin"], Currency::Usd);

        let err = client.fetch_markets(&query).await.unwrap_err();
        match err {
            FetchError::Network(msg) => {
                assert!(msg.to_lowercase().contains("timeout"), "got: {}", msg)
            }
            other => panic!("expected Network error, got {:?}", other),
        }
    }

    #[test]
    fn test_status_classification() {
        assert_eq!(
            classify_status(StatusCode::TOO_MANY_REQUESTS),
            FetchError::RateLimited
        );
        assert_eq!(
            classify_status(StatusCode::INTERNAL_SERVER_ERROR),
            FetchError::Upstream(500)
        );
        assert_eq!(
            classify_status(StatusCode::BAD_GATEWAY),
            FetchError::Upstream(502)
        );
    }

    #[test]
    fn test_client_rejects_zero_timeout() {
        assert!(CoinGeckoClient::with_settings(COINGECKO_BASE_URL, 0, 30).is_err());
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client =
            CoinGeckoClient::with_settings("https://api.coingecko.com/api/v3/", 10, 30).unwrap();
        assert_eq!(client.base_url(), "https://api.coingecko.com/api/v3");
    }
}
