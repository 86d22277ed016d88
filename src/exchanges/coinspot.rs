//! CoinSpot latest prices (AUD market).

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;

use super::utils::{parse_json, ticker_from};
use super::{HttpClient, QuoteError, QuoteSource, Result};
use crate::domain::{Pair, Ticker};

pub const EXCHANGE_NAME: &str = "coinspot";

/// CoinSpot `latest` endpoint. One call returns every coin, priced in AUD.
pub struct CoinSpotSource {
    client: Arc<HttpClient>,
    base_url: String,
}

impl CoinSpotSource {
    pub fn new(client: Arc<HttpClient>, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl QuoteSource for CoinSpotSource {
    fn name(&self) -> &str {
        EXCHANGE_NAME
    }

    async fn fetch_ticker(&self, market: &Pair) -> Result<Ticker> {
        let body = self.client.get(&self.base_url, "/pubapi/v2/latest", &[]).await?;
        parse_latest(&body, market)
    }
}

#[derive(Debug, Deserialize)]
struct LatestResponse {
    status: Option<String>,
    message: Option<String>,
    #[serde(default)]
    prices: HashMap<String, CoinPrice>,
}

#[derive(Debug, Deserialize)]
struct CoinPrice {
    ask: Option<Decimal>,
    bid: Option<Decimal>,
}

fn parse_latest(body: &[u8], market: &Pair) -> Result<Ticker> {
    let resp: LatestResponse = parse_json(body)?;

    if let Some(status) = resp.status.as_deref() {
        if status != "ok" {
            return Err(QuoteError::Api(resp.message.unwrap_or_else(|| status.to_string())));
        }
    }

    let price = resp
        .prices
        .iter()
        .find(|(coin, _)| coin.eq_ignore_ascii_case(market.base()))
        .map(|(_, price)| price)
        .ok_or_else(|| QuoteError::PairNotSupported(market.to_string()))?;

    ticker_from(price.ask, "ask", price.bid, "bid")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_latest_case_insensitive() {
        let body = br#"{"status":"ok","prices":{"btc":{"bid":"98000.5","ask":"98100","last":"98050"},"eth":{"bid":"5000","ask":"5010","last":"5005"}}}"#;
        let market: Pair = "ETH/AUD".parse().unwrap();
        let ticker = parse_latest(body, &market).unwrap();
        assert_eq!(ticker.ask, Decimal::new(5010, 0));
        assert_eq!(ticker.bid, Decimal::new(5000, 0));
    }

    #[test]
    fn test_coin_not_listed() {
        let body = br#"{"status":"ok","prices":{"btc":{"bid":"1","ask":"2"}}}"#;
        let market: Pair = "BNB/AUD".parse().unwrap();
        assert!(matches!(
            parse_latest(body, &market),
            Err(QuoteError::PairNotSupported(_))
        ));
    }

    #[test]
    fn test_error_status() {
        let body = br#"{"status":"error","message":"rate limited"}"#;
        let market: Pair = "BTC/AUD".parse().unwrap();
        assert!(matches!(parse_latest(body, &market), Err(QuoteError::Api(m)) if m == "rate limited"));
    }
}
