//! Bybit v5 spot tickers.

use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;

use super::utils::{parse_json, ticker_from};
use super::{HttpClient, QuoteError, QuoteSource, Result};
use crate::domain::{Pair, Ticker};

pub const EXCHANGE_NAME: &str = "bybit";

/// Bybit `/v5/market/tickers` endpoint in the spot category.
pub struct BybitSource {
    client: Arc<HttpClient>,
    base_url: String,
}

impl BybitSource {
    pub fn new(client: Arc<HttpClient>, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl QuoteSource for BybitSource {
    fn name(&self) -> &str {
        EXCHANGE_NAME
    }

    async fn fetch_ticker(&self, market: &Pair) -> Result<Ticker> {
        let symbol = market.join("");
        let body = self
            .client
            .get(
                &self.base_url,
                "/v5/market/tickers",
                &[("category", "spot"), ("symbol", symbol.as_str())],
            )
            .await?;
        parse_tickers(&body, market)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TickersResponse {
    ret_code: i64,
    ret_msg: Option<String>,
    result: Option<TickersResult>,
}

#[derive(Debug, Deserialize)]
struct TickersResult {
    #[serde(default)]
    list: Vec<SpotTicker>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpotTicker {
    ask1_price: Option<Decimal>,
    bid1_price: Option<Decimal>,
}

fn parse_tickers(body: &[u8], market: &Pair) -> Result<Ticker> {
    let resp: TickersResponse = parse_json(body)?;

    if resp.ret_code != 0 {
        return Err(QuoteError::Api(format!(
            "retCode {}: {}",
            resp.ret_code,
            resp.ret_msg.unwrap_or_default()
        )));
    }

    let ticker = resp
        .result
        .and_then(|r| r.list.into_iter().next())
        .ok_or_else(|| QuoteError::PairNotSupported(market.to_string()))?;

    ticker_from(ticker.ask1_price, "ask1Price", ticker.bid1_price, "bid1Price")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn market() -> Pair {
        "SOL/USDT".parse().unwrap()
    }

    #[test]
    fn test_parse_tickers() {
        let body = br#"{"retCode":0,"retMsg":"OK","result":{"category":"spot","list":[{"symbol":"SOLUSDT","bid1Price":"150.25","bid1Size":"10","ask1Price":"150.30","ask1Size":"12","lastPrice":"150.27"}]},"time":1700000000000}"#;
        let ticker = parse_tickers(body, &market()).unwrap();
        assert_eq!(ticker.ask, Decimal::new(15030, 2));
        assert_eq!(ticker.bid, Decimal::new(15025, 2));
    }

    #[test]
    fn test_ret_code_error() {
        let body = br#"{"retCode":10001,"retMsg":"Not supported symbols","result":{},"time":1700000000000}"#;
        assert!(matches!(parse_tickers(body, &market()), Err(QuoteError::Api(_))));
    }
}
