use crate::types::Currency;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    pub cache: CacheSettings,
    pub assets: AssetsConfig,
    pub general: GeneralConfig,
    #[serde(default)]
    pub theme: ThemeConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub rate_limit_per_minute: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheSettings {
    pub ttl_secs: u64,
    pub error_ttl_secs: u64,
    pub capacity: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetsConfig {
    pub coins: Vec<String>,
    pub currency: Currency,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    pub refresh_interval_secs: u64,
    pub history_days: u32,
}

/// Chart/UI color palette. Consumed by external presentation layers; carried
/// here so one config file covers the whole deployment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeConfig {
    pub primary: String,
    pub secondary: String,
    pub success: String,
    pub warning: String,
    pub danger: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            primary: "#00D4AA".to_string(),
            secondary: "#FF6B6B".to_string(),
            success: "#4ECDC4".to_string(),
            warning: "#FFEAA7".to_string(),
            danger: "#FF7675".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: "https://api.coingecko.com/api/v3".to_string(),
                timeout_secs: 10,
                rate_limit_per_minute: 30,
            },
            cache: CacheSettings {
                ttl_secs: 60,
                error_ttl_secs: 10,
                capacity: 256,
            },
            assets: AssetsConfig {
                coins: vec![
                    "bitcoin".to_string(),
                    "ethereum".to_string(),
                    "cardano".to_string(),
                    "polkadot".to_string(),
                    "chainlink".to_string(),
                    "solana".to_string(),
                    "avalanche-2".to_string(),
                    "polygon".to_string(),
                ],
                currency: Currency::Usd,
            },
            general: GeneralConfig {
                refresh_interval_secs: 60,
                history_days: 7,
            },
            theme: ThemeConfig::default(),
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        if !Path::new(path).exists() {
            let default_config = Self::default();
            default_config.save(path)?;
            return Ok(default_config);
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path))?;

        config.validate()?;

        Ok(config)
    }

    pub fn save(&self, path: &str) -> Result<()> {
        let content =
            serde_json::to_string_pretty(self).with_context(|| "Failed to serialize config")?;

        fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path))?;

        Ok(())
    }

    pub fn reload(&mut self, path: &str) -> Result<()> {
        *self = Self::load(path)?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.api.timeout_secs == 0 {
            return Err(anyhow::anyhow!("api.timeout_secs must be greater than zero"));
        }
        if self.assets.coins.is_empty() {
            return Err(anyhow::anyhow!("assets.coins must list at least one coin"));
        }
        if self.cache.error_ttl_secs > self.cache.ttl_secs {
            return Err(anyhow::anyhow!(
                "cache.error_ttl_secs must not exceed cache.ttl_secs"
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.cache.ttl_secs, 60);
        assert_eq!(config.assets.currency, Currency::Usd);
        assert!(config.assets.coins.contains(&"bitcoin".to_string()));
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let json = serde_json::to_string_pretty(&config).unwrap();
        let parsed: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.assets.coins, config.assets.coins);
        assert_eq!(parsed.theme.primary, "#00D4AA");
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = Config::default();
        config.api.timeout_secs = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.assets.coins.clear();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.cache.error_ttl_secs = 120;
        assert!(config.validate().is_err());
    }
}
