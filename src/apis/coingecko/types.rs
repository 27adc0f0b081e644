/// Raw CoinGecko response types
///
/// Field-by-field extraction with explicit defaults: CoinGecko omits or
/// nulls numeric fields for thinly traded coins, and a single bad field must
/// never fail the whole batch.
use crate::types::{AssetSnapshot, Currency, PriceHistory, PricePoint};
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// One row of `/coins/markets`
#[derive(Debug, Clone, Deserialize)]
pub struct CoinGeckoMarketRow {
    pub id: String,
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub current_price: Option<f64>,
    #[serde(default)]
    pub market_cap: Option<f64>,
    #[serde(default)]
    pub total_volume: Option<f64>,
    #[serde(default)]
    pub price_change_percentage_24h: Option<f64>,
}

impl CoinGeckoMarketRow {
    /// Flatten into a snapshot, zero-filling whatever the upstream omitted.
    /// A missing display name falls back to the known-coin table, then to
    /// the raw identifier.
    pub fn to_snapshot(&self) -> AssetSnapshot {
        let name = if self.name.is_empty() {
            crate::constants::display_name(&self.id)
                .unwrap_or(self.id.as_str())
                .to_string()
        } else {
            self.name.clone()
        };

        AssetSnapshot {
            id: self.id.clone(),
            name,
            symbol: self.symbol.to_uppercase(),
            price: self.current_price.unwrap_or(0.0),
            change_24h: self.price_change_percentage_24h.unwrap_or(0.0),
            market_cap: self.market_cap.unwrap_or(0.0),
            volume_24h: self.total_volume.unwrap_or(0.0),
        }
    }
}

/// Body of `/coins/{id}/market_chart`
///
/// Series come as `[unix_millis, value]` pairs; prices and volumes are
/// parallel arrays aligned by index.
#[derive(Debug, Clone, Deserialize)]
pub struct CoinGeckoMarketChart {
    #[serde(default)]
    pub prices: Vec<[f64; 2]>,
    #[serde(default)]
    pub total_volumes: Vec<[f64; 2]>,
}

impl CoinGeckoMarketChart {
    pub fn to_history(&self, id: &str, currency: Currency) -> PriceHistory {
        let points = self
            .prices
            .iter()
            .enumerate()
            .filter_map(|(i, pair)| {
                let timestamp = DateTime::<Utc>::from_timestamp_millis(pair[0] as i64)?;
                let volume = self.total_volumes.get(i).map(|v| v[1]).unwrap_or(0.0);
                Some(PricePoint {
                    timestamp,
                    price: pair[1],
                    volume,
                })
            })
            .collect();

        PriceHistory {
            id: id.to_string(),
            currency,
            points,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_market_row_full_fields() {
        let json = r#"{
            "id": "bitcoin",
            "symbol": "btc",
            "name": "Bitcoin",
            "current_price": 64250.12,
            "market_cap": 1200000000000.0,
            "total_volume": 35000000000.0,
            "price_change_percentage_24h": -2.41
        }"#;

        let row: CoinGeckoMarketRow = serde_json::from_str(json).unwrap();
        let snapshot = row.to_snapshot();

        assert_eq!(snapshot.id, "bitcoin");
        assert_eq!(snapshot.symbol, "BTC");
        assert_eq!(snapshot.price, 64250.12);
        assert_eq!(snapshot.change_24h, -2.41);
    }

    #[test]
    fn test_market_row_missing_fields_default_to_zero() {
        // Thin listings often carry only id/name; nulls and omissions both
        // map to zero rather than failing the batch.
        let json = r#"{
            "id": "newcoin",
            "name": "New Coin",
            "current_price": null
        }"#;

        let row: CoinGeckoMarketRow = serde_json::from_str(json).unwrap();
        let snapshot = row.to_snapshot();

        assert_eq!(snapshot.id, "newcoin");
        assert_eq!(snapshot.symbol, "");
        assert_eq!(snapshot.price, 0.0);
        assert_eq!(snapshot.change_24h, 0.0);
        assert_eq!(snapshot.market_cap, 0.0);
        assert_eq!(snapshot.volume_24h, 0.0);
    }

    #[test]
    fn test_missing_name_falls_back_to_known_table() {
        let json = r#"{"id": "bitcoin", "symbol": "btc"}"#;
        let row: CoinGeckoMarketRow = serde_json::from_str(json).unwrap();
        assert_eq!(row.to_snapshot().name, "Bitcoin");

        let json = r#"{"id": "obscure-coin"}"#;
        let row: CoinGeckoMarketRow = serde_json::from_str(json).unwrap();
        assert_eq!(row.to_snapshot().name, "obscure-coin");
    }

    #[test]
    fn test_market_chart_parsing() {
        let json = r#"{
            "prices": [[1700000000000, 37000.5], [1700003600000, 37100.0]],
            "total_volumes": [[1700000000000, 1.5e10], [1700003600000, 1.6e10]]
        }"#;

        let chart: CoinGeckoMarketChart = serde_json::from_str(json).unwrap();
        let history = chart.to_history("bitcoin", Currency::Usd);

        assert_eq!(history.points.len(), 2);
        assert_eq!(history.points[0].price, 37000.5);
        assert_eq!(history.points[1].volume, 1.6e10);
        assert!(history.points[0].timestamp < history.points[1].timestamp);
    }

    #[test]
    fn test_market_chart_missing_volumes() {
        let json = r#"{"prices": [[1700000000000, 37000.5]]}"#;

        let chart: CoinGeckoMarketChart = serde_json::from_str(json).unwrap();
        let history = chart.to_history("bitcoin", Currency::Usd);

        assert_eq!(history.points.len(), 1);
        assert_eq!(history.points[0].volume, 0.0);
    }
}
