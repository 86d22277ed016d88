//! Scan request configuration.

use rust_decimal::Decimal;
use serde::Deserialize;
use std::time::Duration;

use super::duration;
use crate::arbitrage::SameExchangePolicy;

/// Default delay between cycles in watch mode.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(10);

/// Default time each exchange gets to answer within one cycle.
pub const DEFAULT_CYCLE_TIMEOUT: Duration = Duration::from_secs(15);

/// What to scan and when to report it.
#[derive(Debug, Clone, Deserialize)]
pub struct ScanConfig {
    /// Trading pair to scan (e.g. "BTC/USDT").
    pub pair: String,
    /// Exchanges to consult. Defaults to every enabled exchange.
    pub exchanges: Option<Vec<String>>,
    /// Amount invested, in the target currency.
    pub investment: Decimal,
    /// Minimum net profit percentage (e.g. "1.0" for 1%).
    #[serde(default)]
    pub min_profit_pct: Decimal,
    /// Delay between cycles in watch mode (default: 10s).
    #[serde(default, with = "duration")]
    pub refresh_interval: Duration,
    /// Time each exchange gets to answer within a cycle (default: 15s).
    #[serde(default, with = "duration")]
    pub cycle_timeout: Duration,
    /// Whether one exchange may be both buy and sell venue.
    #[serde(default)]
    pub same_exchange: SameExchangePolicy,
}

impl ScanConfig {
    pub fn refresh_interval(&self) -> Duration {
        if self.refresh_interval.is_zero() {
            DEFAULT_REFRESH_INTERVAL
        } else {
            self.refresh_interval
        }
    }

    pub fn cycle_timeout(&self) -> Duration {
        if self.cycle_timeout.is_zero() {
            DEFAULT_CYCLE_TIMEOUT
        } else {
            self.cycle_timeout
        }
    }
}
