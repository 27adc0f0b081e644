/// Static lookup data for the default asset universe
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Display names for the coins the dashboard ships with, used as fallback
/// when the upstream omits the `name` field
pub static KNOWN_COINS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("bitcoin", "Bitcoin"),
        ("ethereum", "Ethereum"),
        ("cardano", "Cardano"),
        ("polkadot", "Polkadot"),
        ("chainlink", "Chainlink"),
        ("solana", "Solana"),
        ("avalanche-2", "Avalanche"),
        ("polygon", "Polygon"),
    ])
});

pub fn display_name(id: &str) -> Option<&'static str> {
    KNOWN_COINS.get(id).copied()
}
