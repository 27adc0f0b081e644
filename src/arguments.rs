/// Command-line surface for the dashboard binary
use clap::Parser;

#[derive(Debug, Parser)]
#[command(
    name = "cryptodash",
    version,
    about = "Terminal dashboard for cryptocurrency market data"
)]
pub struct Arguments {
    /// Path to the JSON configuration file (created with defaults if missing)
    #[arg(long, default_value = "config.json")]
    pub config: String,

    /// Override the configured coin list (comma-separated CoinGecko ids)
    #[arg(long, value_delimiter = ',')]
    pub coins: Option<Vec<String>>,

    /// Override the price currency (usd, eur, gbp, btc, eth)
    #[arg(long)]
    pub currency: Option<String>,

    /// Override the refresh interval in seconds
    #[arg(long)]
    pub refresh_secs: Option<u64>,

    /// Also render a recent price history table for this coin id
    #[arg(long)]
    pub history: Option<String>,

    /// Render a single refresh and exit
    #[arg(long)]
    pub once: bool,

    /// Log cache and API activity
    #[arg(long)]
    pub debug_api: bool,
}
