//! Coinbase retail buy/sell prices (USD market).

use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;

use super::utils::{parse_json, require};
use super::{HttpClient, QuoteError, QuoteSource, Result};
use crate::domain::{Pair, Ticker};

pub const EXCHANGE_NAME: &str = "coinbase";

/// Coinbase `prices` endpoints. Buy and sell prices live behind two
/// separate URLs, so every ticker costs exactly two requests.
pub struct CoinbaseSource {
    client: Arc<HttpClient>,
    base_url: String,
}

impl CoinbaseSource {
    pub fn new(client: Arc<HttpClient>, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    async fn fetch_price(&self, symbol: &str, side: &str) -> Result<Decimal> {
        let endpoint = format!("/v2/prices/{}/{}", symbol, side);
        let body = self.client.get(&self.base_url, &endpoint, &[]).await?;
        parse_price(&body)
    }
}

#[async_trait]
impl QuoteSource for CoinbaseSource {
    fn name(&self) -> &str {
        EXCHANGE_NAME
    }

    async fn fetch_ticker(&self, market: &Pair) -> Result<Ticker> {
        let symbol = market.join("-");
        let (buy, sell) = tokio::try_join!(
            self.fetch_price(&symbol, "buy"),
            self.fetch_price(&symbol, "sell")
        )?;
        Ok(Ticker::new(buy, sell))
    }
}

#[derive(Debug, Deserialize)]
struct PriceResponse {
    data: Option<PriceData>,
    #[serde(default)]
    errors: Vec<ApiMessage>,
}

#[derive(Debug, Deserialize)]
struct PriceData {
    amount: Option<Decimal>,
}

#[derive(Debug, Deserialize)]
struct ApiMessage {
    message: String,
}

fn parse_price(body: &[u8]) -> Result<Decimal> {
    let resp: PriceResponse = parse_json(body)?;

    if !resp.errors.is_empty() {
        let message = resp
            .errors
            .into_iter()
            .map(|e| e.message)
            .collect::<Vec<_>>()
            .join("; ");
        return Err(QuoteError::Api(message));
    }

    let data = resp
        .data
        .ok_or_else(|| QuoteError::MissingField("data".to_string()))?;
    require(data.amount, "data.amount")
}
