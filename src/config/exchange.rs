//! Exchange configuration.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Settings for a single exchange. Unset fields fall back to the
/// built-in catalog defaults for that exchange.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExchangeConfig {
    /// Whether this exchange should be used.
    #[serde(default)]
    pub enabled: bool,
    /// Taker fee as a fraction (e.g., "0.001" for 0.1%).
    pub fee_taker: Option<Decimal>,
    /// Pairs this exchange is consulted for.
    pub pairs: Option<Vec<String>>,
    /// Currency the exchange quotes in when it only lists one market (e.g. "AUD").
    pub market_currency: Option<String>,
    /// Override of the public API base URL.
    pub base_url: Option<String>,
}
