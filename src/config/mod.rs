//! Configuration loading and validation for the arbitrage scanner.
//!
//! Uses serde_yaml to load YAML configuration files. A `.env` file is loaded
//! first so that `RUST_LOG` and friends can live next to the config.

mod app;
mod currency;
mod duration;
mod error;
mod exchange;
mod http;
mod scan;

pub use app::AppConfig;
pub use currency::CurrencyConfig;
pub use error::ConfigError;
pub use exchange::ExchangeConfig;
pub use http::{HttpConfig, RetryConfig};
pub use scan::ScanConfig;

use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;

use crate::domain::{ArbitrageRequest, MAX_INVESTMENT, Pair};

/// Root configuration structure for the scanner.
///
/// Required sections: app, exchanges, scan, pairs.
/// Optional sections: currency, http.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Application-level settings like name and log level.
    pub app: AppConfig,
    /// Target currency and static conversion rates.
    #[serde(default)]
    pub currency: CurrencyConfig,
    /// Timeouts and retries of outbound requests (optional).
    #[serde(default)]
    pub http: HttpConfig,
    /// Maps exchange ids to their configurations.
    pub exchanges: HashMap<String, ExchangeConfig>,
    /// The scan request: pair, investment, threshold.
    pub scan: ScanConfig,
    /// Trading pairs the user may choose from (e.g., "BTC/USDT").
    pub pairs: Vec<String>,
}

impl Config {
    /// Load configuration from a YAML file at the given path.
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        // Load .env file if it exists (ignore error if not found)
        dotenvy::dotenv().ok();

        let content = fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;

        config.validate()?;

        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.app.name.is_empty() {
            return Err(ConfigError::Validation("app.name is required".into()));
        }

        if self.pairs.is_empty() {
            return Err(ConfigError::Validation(
                "at least one trading pair is required".into(),
            ));
        }

        let pairs = self.supported_pairs()?;

        let scan_pair = self.scan_pair()?;
        if !pairs.contains(&scan_pair) {
            return Err(ConfigError::Validation(format!(
                "scan.pair {} is not listed in pairs",
                scan_pair
            )));
        }

        if self.scan.investment <= Decimal::ZERO || self.scan.investment > MAX_INVESTMENT {
            return Err(ConfigError::Validation(format!(
                "scan.investment must be in (0, {}]",
                MAX_INVESTMENT
            )));
        }

        if self.currency.target.trim().is_empty() {
            return Err(ConfigError::Validation("currency.target is required".into()));
        }

        for (code, rate) in &self.currency.rates {
            if *rate <= Decimal::ZERO {
                return Err(ConfigError::Validation(format!(
                    "currency.rates.{} must be positive",
                    code
                )));
            }
        }

        let mut enabled_exchanges = 0;
        for (name, exchange) in &self.exchanges {
            if !exchange.enabled {
                continue;
            }
            enabled_exchanges += 1;

            if let Some(fee) = exchange.fee_taker {
                if fee < Decimal::ZERO || fee >= Decimal::ONE {
                    return Err(ConfigError::Validation(format!(
                        "exchange {}: fee_taker must be in [0, 1)",
                        name
                    )));
                }
            }

            for pair in exchange.pairs.iter().flatten() {
                pair.parse::<Pair>().map_err(|e| {
                    ConfigError::Validation(format!("exchange {}: {}", name, e))
                })?;
            }
        }

        if enabled_exchanges == 0 {
            return Err(ConfigError::Validation(
                "at least one exchange must be enabled".into(),
            ));
        }

        if let Some(ref retry) = self.http.retry {
            if retry.max_attempts == Some(0) {
                return Err(ConfigError::Validation(
                    "http.retry.max_attempts must be positive".into(),
                ));
            }
        }

        Ok(())
    }

    /// Parses the `pairs` list.
    pub fn supported_pairs(&self) -> Result<Vec<Pair>, ConfigError> {
        self.pairs
            .iter()
            .map(|p| p.parse::<Pair>().map_err(ConfigError::Validation))
            .collect()
    }

    /// Parses `scan.pair`.
    pub fn scan_pair(&self) -> Result<Pair, ConfigError> {
        self.scan
            .pair
            .parse::<Pair>()
            .map_err(|e| ConfigError::Validation(format!("scan.pair: {}", e)))
    }

    /// Returns ids of enabled exchanges, sorted.
    pub fn enabled_exchanges(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .exchanges
            .iter()
            .filter(|(_, ex)| ex.enabled)
            .map(|(name, _)| name.to_lowercase())
            .collect();
        names.sort();
        names
    }

    /// Builds the arbitrage request described by the `scan` section.
    /// Without an explicit exchange list every enabled exchange is selected.
    pub fn arbitrage_request(&self) -> Result<ArbitrageRequest, ConfigError> {
        let exchanges = self
            .scan
            .exchanges
            .clone()
            .unwrap_or_else(|| self.enabled_exchanges());

        ArbitrageRequest::new(
            self.scan_pair()?,
            exchanges,
            self.scan.investment,
            self.scan.min_profit_pct,
        )
        .map_err(|e| ConfigError::Validation(e.to_string()))
    }
}

#[cfg(test)]
mod tests;
