//! Crypto.com Exchange ticker.

use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;

use super::utils::{parse_json, ticker_from};
use super::{HttpClient, QuoteError, QuoteSource, Result};
use crate::domain::{Pair, Ticker};

pub const EXCHANGE_NAME: &str = "cryptocom";

/// Crypto.com `public/get-tickers` endpoint, instrument like "BTC_USDT".
/// Field `k` is the best ask, `b` the best bid (`a` is the last trade).
pub struct CryptoComSource {
    client: Arc<HttpClient>,
    base_url: String,
}

impl CryptoComSource {
    pub fn new(client: Arc<HttpClient>, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl QuoteSource for CryptoComSource {
    fn name(&self) -> &str {
        EXCHANGE_NAME
    }

    async fn fetch_ticker(&self, market: &Pair) -> Result<Ticker> {
        let instrument = market.join("_");
        let body = self
            .client
            .get(
                &self.base_url,
                "/exchange/v1/public/get-tickers",
                &[("instrument_name", instrument.as_str())],
            )
            .await?;
        parse_tickers(&body, market)
    }
}

#[derive(Debug, Deserialize)]
struct TickersResponse {
    code: i64,
    message: Option<String>,
    result: Option<TickersResult>,
}

#[derive(Debug, Deserialize)]
struct TickersResult {
    #[serde(default)]
    data: Vec<InstrumentTicker>,
}

#[derive(Debug, Deserialize)]
struct InstrumentTicker {
    k: Option<Decimal>,
    b: Option<Decimal>,
}

fn parse_tickers(body: &[u8], market: &Pair) -> Result<Ticker> {
    let resp: TickersResponse = parse_json(body)?;

    if resp.code != 0 {
        return Err(QuoteError::Api(format!(
            "code {}: {}",
            resp.code,
            resp.message.unwrap_or_default()
        )));
    }

    let ticker = resp
        .result
        .and_then(|r| r.data.into_iter().next())
        .ok_or_else(|| QuoteError::PairNotSupported(market.to_string()))?;

    ticker_from(ticker.k, "k", ticker.b, "b")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn market() -> Pair {
        "BTC/USDT".parse().unwrap()
    }

    #[test]
    fn test_parse_tickers() {
        let body = br#"{"id":-1,"method":"public/get-tickers","code":0,"result":{"data":[{"i":"BTC_USDT","h":"65000","l":"63000","a":"64005","v":"100","b":"64000.5","k":"64010.5","t":1700000000000}]}}"#;
        let ticker = parse_tickers(body, &market()).unwrap();
        assert_eq!(ticker.ask, Decimal::new(640105, 1));
        assert_eq!(ticker.bid, Decimal::new(640005, 1));
    }

    #[test]
    fn test_error_code() {
        let body = br#"{"id":-1,"code":40004,"message":"Invalid instrument_name"}"#;
        assert!(matches!(parse_tickers(body, &market()), Err(QuoteError::Api(_))));
    }

    #[test]
    fn test_empty_data() {
        let body = br#"{"code":0,"result":{"data":[]}}"#;
        assert!(matches!(
            parse_tickers(body, &market()),
            Err(QuoteError::PairNotSupported(_))
        ));
    }
}
