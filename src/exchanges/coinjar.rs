//! CoinJar Exchange product ticker (AUD market).

use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;

use super::utils::{parse_json, ticker_from};
use super::{HttpClient, QuoteSource, Result};
use crate::domain::{Pair, Ticker};

pub const EXCHANGE_NAME: &str = "coinjar";

/// CoinJar `products/{symbol}/ticker` endpoint, symbol like "BTCAUD".
pub struct CoinJarSource {
    client: Arc<HttpClient>,
    base_url: String,
}

impl CoinJarSource {
    pub fn new(client: Arc<HttpClient>, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl QuoteSource for CoinJarSource {
    fn name(&self) -> &str {
        EXCHANGE_NAME
    }

    async fn fetch_ticker(&self, market: &Pair) -> Result<Ticker> {
        let endpoint = format!("/products/{}/ticker", market.join(""));
        let body = self.client.get(&self.base_url, &endpoint, &[]).await?;
        parse_product_ticker(&body)
    }
}

#[derive(Debug, Deserialize)]
struct ProductTicker {
    ask: Option<Decimal>,
    bid: Option<Decimal>,
}

fn parse_product_ticker(body: &[u8]) -> Result<Ticker> {
    let resp: ProductTicker = parse_json(body)?;
    ticker_from(resp.ask, "ask", resp.bid, "bid")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exchanges::QuoteError;

    #[test]
    fn test_parse_product_ticker() {
        let body = br#"{"volume":"12.5","transition_time":"2024-01-01T00:00:00Z","status":"continuous","session":1,"prev_close":"98000","last":"98050","current_time":"2024-01-01T00:00:01Z","bid":"98040.00","ask":"98060.00"}"#;
        let ticker = parse_product_ticker(body).unwrap();
        assert_eq!(ticker.ask, Decimal::new(98060, 0));
        assert_eq!(ticker.bid, Decimal::new(98040, 0));
    }

    #[test]
    fn test_null_bid() {
        let body = br#"{"ask":"98060.00","bid":null}"#;
        assert!(matches!(
            parse_product_ticker(body),
            Err(QuoteError::MissingField(f)) if f == "bid"
        ));
    }
}
