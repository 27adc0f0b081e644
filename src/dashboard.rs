/// Terminal rendering for fetched market data
///
/// Thin consumer of the fetcher: renders whatever tabular result it gets.
/// On failure the caller keeps the previously rendered data on screen and
/// only an error banner is added.

use crate::types::{AssetSnapshot, Currency, FetchError, PriceHistory};
use colored::*;
use comfy_table::{presets::UTF8_BORDERS_ONLY, Cell, Color, Table};

/// Max points shown in the history table; longer series are tail-sampled
const HISTORY_TABLE_ROWS: usize = 12;

/// Shorten large quantities for table cells (1234567890.0 -> "1.23B")
pub fn format_amount(value: f64) -> String {
    let abs = value.abs();
    if abs >= 1e12 {
        format!("{:.2}T", value / 1e12)
    } else if abs >= 1e9 {
        format!("{:.2}B", value / 1e9)
    } else if abs >= 1e6 {
        format!("{:.2}M", value / 1e6)
    } else if abs >= 1e3 {
        format!("{:.2}K", value / 1e3)
    } else {
        format!("{:.2}", value)
    }
}

/// Price with sensible precision for sub-unit assets
pub fn format_price(value: f64) -> String {
    if value >= 1.0 {
        format!("{:.2}", value)
    } else {
        format!("{:.6}", value)
    }
}

pub fn format_change(change: f64) -> String {
    let arrow = if change >= 0.0 { "↗" } else { "↘" };
    format!("{} {:+.2}%", arrow, change)
}

/// Print the market overview table plus aggregate metrics
pub fn render_snapshots(snapshots: &[AssetSnapshot], currency: Currency) {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec![
        "Name",
        "Symbol",
        "Price",
        "24h Change",
        "Market Cap",
        "24h Volume",
    ]);

    for snapshot in snapshots {
        let change_color = if snapshot.change_24h >= 0.0 {
            Color::Green
        } else {
            Color::Red
        };

        table.add_row(vec![
            Cell::new(&snapshot.name),
            Cell::new(&snapshot.symbol),
            Cell::new(format!(
                "{}{}",
                currency.symbol(),
                format_price(snapshot.price)
            )),
            Cell::new(format_change(snapshot.change_24h)).fg(change_color),
            Cell::new(format!(
                "{}{}",
                currency.symbol(),
                format_amount(snapshot.market_cap)
            )),
            Cell::new(format!(
                "{}{}",
                currency.symbol(),
                format_amount(snapshot.volume_24h)
            )),
        ]);
    }

    println!("{table}");

    let total_cap: f64 = snapshots.iter().map(|s| s.market_cap).sum();
    let total_volume: f64 = snapshots.iter().map(|s| s.volume_24h).sum();
    println!(
        "  {} {}{}   {} {}{}",
        "Total market cap:".dimmed(),
        currency.symbol(),
        format_amount(total_cap).bright_white().bold(),
        "Total 24h volume:".dimmed(),
        currency.symbol(),
        format_amount(total_volume).bright_white().bold()
    );
}

/// First/last price of a series and the percent change between them
pub fn summarize_history(history: &PriceHistory) -> Option<(f64, f64, f64)> {
    let first = history.points.first()?.price;
    let last = history.points.last()?.price;
    let change = if first == 0.0 {
        0.0
    } else {
        (last - first) / first * 100.0
    };
    Some((first, last, change))
}

/// Print the recent tail of a historical series plus a period summary
pub fn render_history(history: &PriceHistory, days: u32) {
    println!(
        "  {} {}",
        format!("{} price history", history.id).bright_white().bold(),
        format!("(last {}d)", days).dimmed()
    );

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Time (UTC)", "Price", "Volume"]);

    let start = history.points.len().saturating_sub(HISTORY_TABLE_ROWS);
    for point in &history.points[start..] {
        table.add_row(vec![
            Cell::new(point.timestamp.format("%m-%d %H:%M").to_string()),
            Cell::new(format!(
                "{}{}",
                history.currency.symbol(),
                format_price(point.price)
            )),
            Cell::new(format!(
                "{}{}",
                history.currency.symbol(),
                format_amount(point.volume)
            )),
        ]);
    }

    println!("{table}");

    if let Some((first, last, change)) = summarize_history(history) {
        let colored_change = if change >= 0.0 {
            format_change(change).green().bold()
        } else {
            format_change(change).red().bold()
        };
        println!(
            "  {} {}{} -> {}{}   {}",
            "Period:".dimmed(),
            history.currency.symbol(),
            format_price(first),
            history.currency.symbol(),
            format_price(last),
            colored_change
        );
    }
}

/// Error banner shown above whatever data is already on screen
pub fn render_error_banner(err: &FetchError) {
    let hint = match err {
        FetchError::RateLimited => "upstream rate limit hit, backing off",
        FetchError::Network(_) => "check connectivity",
        FetchError::Upstream(_) => "upstream is having trouble",
        FetchError::Parse(_) => "unexpected upstream payload",
    };

    println!(
        "{} {} {}",
        "▌".red().bold(),
        format!("Data refresh failed: {}", err).red().bold(),
        format!("({}, showing last known data)", hint).dimmed()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amount_scales() {
        assert_eq!(format_amount(950.0), "950.00");
        assert_eq!(format_amount(1_500.0), "1.50K");
        assert_eq!(format_amount(2_300_000.0), "2.30M");
        assert_eq!(format_amount(1_234_567_890.0), "1.23B");
        assert_eq!(format_amount(1.2e12), "1.20T");
    }

    #[test]
    fn test_format_price_precision() {
        assert_eq!(format_price(64250.1234), "64250.12");
        assert_eq!(format_price(0.00001234), "0.000012");
    }

    #[test]
    fn test_format_change_sign() {
        assert_eq!(format_change(2.5), "↗ +2.50%");
        assert_eq!(format_change(-3.75), "↘ -3.75%");
    }

    #[test]
    fn test_summarize_history_period_change() {
        use crate::types::PricePoint;
        use chrono::{Duration as ChronoDuration, Utc};

        let start = Utc::now() - ChronoDuration::days(7);
        let history = PriceHistory {
            id: "bitcoin".to_string(),
            currency: Currency::Usd,
            points: vec![
                PricePoint {
                    timestamp: start,
                    price: 50_000.0,
                    volume: 1e9,
                },
                PricePoint {
                    timestamp: Utc::now(),
                    price: 55_000.0,
                    volume: 2e9,
                },
            ],
        };

        let (first, last, change) = summarize_history(&history).unwrap();
        assert_eq!(first, 50_000.0);
        assert_eq!(last, 55_000.0);
        assert!((change - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_summarize_history_empty_series() {
        let history = PriceHistory {
            id: "bitcoin".to_string(),
            currency: Currency::Usd,
            points: vec![],
        };
        assert!(summarize_history(&history).is_none());
    }
}
