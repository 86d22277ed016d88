//! Binance spot book ticker.

use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;

use super::utils::{parse_json, ticker_from};
use super::{HttpClient, QuoteSource, Result};
use crate::domain::{Pair, Ticker};

pub const EXCHANGE_NAME: &str = "binance";

/// Binance public `bookTicker` endpoint.
pub struct BinanceSource {
    client: Arc<HttpClient>,
    base_url: String,
}

impl BinanceSource {
    pub fn new(client: Arc<HttpClient>, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl QuoteSource for BinanceSource {
    fn name(&self) -> &str {
        EXCHANGE_NAME
    }

    async fn fetch_ticker(&self, market: &Pair) -> Result<Ticker> {
        let symbol = market.join("");
        let body = self
            .client
            .get(&self.base_url, "/api/v3/ticker/bookTicker", &[("symbol", symbol.as_str())])
            .await?;
        parse_book_ticker(&body)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BookTicker {
    ask_price: Option<Decimal>,
    bid_price: Option<Decimal>,
}

fn parse_book_ticker(body: &[u8]) -> Result<Ticker> {
    let resp: BookTicker = parse_json(body)?;
    ticker_from(resp.ask_price, "askPrice", resp.bid_price, "bidPrice")
}
