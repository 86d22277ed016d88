//! Kraken public ticker.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;

use super::utils::{parse_json, ticker_from, xbt_code};
use super::{HttpClient, QuoteError, QuoteSource, Result};
use crate::domain::{Pair, Ticker};

pub const EXCHANGE_NAME: &str = "kraken";

/// Kraken `Ticker` endpoint. Bitcoin is traded as "XBT".
pub struct KrakenSource {
    client: Arc<HttpClient>,
    base_url: String,
}

impl KrakenSource {
    pub fn new(client: Arc<HttpClient>, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl QuoteSource for KrakenSource {
    fn name(&self) -> &str {
        EXCHANGE_NAME
    }

    async fn fetch_ticker(&self, market: &Pair) -> Result<Ticker> {
        let symbol = format!("{}{}", xbt_code(market.base()), market.quote());
        let body = self
            .client
            .get(&self.base_url, "/0/public/Ticker", &[("pair", symbol.as_str())])
            .await?;
        parse_ticker(&body, market)
    }
}

#[derive(Debug, Deserialize)]
struct TickerResponse {
    #[serde(default)]
    error: Vec<String>,
    #[serde(default)]
    result: HashMap<String, PairTicker>,
}

/// Price arrays are [price, whole lot volume, lot volume].
#[derive(Debug, Deserialize)]
struct PairTicker {
    #[serde(default)]
    a: Vec<Decimal>,
    #[serde(default)]
    b: Vec<Decimal>,
}

/// The result is keyed by Kraken's internal pair name (e.g. "XXBTZUSD"),
/// which differs from the requested symbol, so the single entry is taken.
fn parse_ticker(body: &[u8], market: &Pair) -> Result<Ticker> {
    let resp: TickerResponse = parse_json(body)?;

    if !resp.error.is_empty() {
        let message = resp.error.join("; ");
        if message.contains("Unknown asset pair") {
            return Err(QuoteError::PairNotSupported(market.to_string()));
        }
        return Err(QuoteError::Api(message));
    }

    let ticker = resp
        .result
        .into_values()
        .next()
        .ok_or_else(|| QuoteError::MissingField("result".to_string()))?;

    ticker_from(
        ticker.a.first().copied(),
        "a[0]",
        ticker.b.first().copied(),
        "b[0]",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn market() -> Pair {
        "BTC/USDT".parse().unwrap()
    }

    #[test]
    fn test_parse_ticker() {
        let body = br#"{"error":[],"result":{"XBTUSDT":{"a":["64010.10000","1","1.000"],"b":["64009.90000","2","2.000"],"c":["64010.0","0.1"]}}}"#;
        let ticker = parse_ticker(body, &market()).unwrap();
        assert_eq!(ticker.ask, Decimal::new(640101, 1));
        assert_eq!(ticker.bid, Decimal::new(640099, 1));
    }

    #[test]
    fn test_unknown_pair() {
        let body = br#"{"error":["EQuery:Unknown asset pair"]}"#;
        assert!(matches!(
            parse_ticker(body, &market()),
            Err(QuoteError::PairNotSupported(_))
        ));
    }

    #[test]
    fn test_other_api_error() {
        let body = br#"{"error":["EService:Unavailable"]}"#;
        assert!(matches!(parse_ticker(body, &market()), Err(QuoteError::Api(_))));
    }

    #[test]
    fn test_empty_ask_array() {
        let body = br#"{"error":[],"result":{"XBTUSDT":{"a":[],"b":["64009.9","2","2.000"]}}}"#;
        assert!(matches!(
            parse_ticker(body, &market()),
            Err(QuoteError::MissingField(f)) if f == "a[0]"
        ));
    }
}
