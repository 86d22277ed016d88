//! Target currency and static conversion rates.

use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;

/// Default display currency.
pub const DEFAULT_TARGET_CURRENCY: &str = "AUD";

/// Fallback USD to AUD multiplier, also applied to USD-pegged stablecoins.
const DEFAULT_USD_RATE: Decimal = Decimal::from_parts(152, 0, 0, false, 2);

/// Currency settings.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrencyConfig {
    /// Currency every quote is converted into (e.g. "AUD").
    #[serde(default = "default_target")]
    pub target: String,
    /// Multipliers from a market currency into the target currency.
    #[serde(default = "default_rates")]
    pub rates: HashMap<String, Decimal>,
}

impl CurrencyConfig {
    /// Returns the multiplier from `currency` into the target currency.
    /// The target currency itself always converts at 1.
    pub fn rate_for(&self, currency: &str) -> Option<Decimal> {
        if currency.eq_ignore_ascii_case(&self.target) {
            return Some(Decimal::ONE);
        }
        self.rates
            .iter()
            .find(|(code, _)| code.eq_ignore_ascii_case(currency))
            .map(|(_, rate)| *rate)
    }
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self {
            target: default_target(),
            rates: default_rates(),
        }
    }
}

fn default_target() -> String {
    DEFAULT_TARGET_CURRENCY.to_string()
}

fn default_rates() -> HashMap<String, Decimal> {
    HashMap::from([
        ("USD".to_string(), DEFAULT_USD_RATE),
        ("USDT".to_string(), DEFAULT_USD_RATE),
        ("USDC".to_string(), DEFAULT_USD_RATE),
    ])
}
