//! Common utilities for exchange adapters.

use rust_decimal::Decimal;
use serde::de::DeserializeOwned;

use super::{QuoteError, Result};
use crate::domain::Ticker;

/// Exchanges that still use the ISO 4217 style "XBT" code for bitcoin.
const XBT_ALIASES: &[(&str, &str)] = &[("BTC", "XBT")];

/// Parses a response body as JSON.
pub fn parse_json<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    Ok(serde_json::from_slice(body)?)
}

/// Unwraps a price field, reporting its name when absent.
pub fn require(value: Option<Decimal>, field: &str) -> Result<Decimal> {
    value.ok_or_else(|| QuoteError::MissingField(field.to_string()))
}

/// Builds a ticker from optional ask and bid fields.
pub fn ticker_from(
    ask: Option<Decimal>,
    ask_field: &str,
    bid: Option<Decimal>,
    bid_field: &str,
) -> Result<Ticker> {
    Ok(Ticker::new(require(ask, ask_field)?, require(bid, bid_field)?))
}

/// Maps "BTC" to "XBT"; other assets are returned unchanged.
pub fn xbt_code(asset: &str) -> String {
    XBT_ALIASES
        .iter()
        .find(|(generic, _)| generic.eq_ignore_ascii_case(asset))
        .map(|(_, code)| code.to_string())
        .unwrap_or_else(|| asset.to_uppercase())
}

/// Converts "XBT" to "Xbt".
pub fn capitalize(code: &str) -> String {
    let lower = code.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
