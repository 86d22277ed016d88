//! KuCoin level 1 order book.

use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;

use super::utils::{parse_json, ticker_from};
use super::{HttpClient, QuoteError, QuoteSource, Result};
use crate::domain::{Pair, Ticker};

pub const EXCHANGE_NAME: &str = "kucoin";

/// Success code of KuCoin responses.
const CODE_OK: &str = "200000";

/// KuCoin `/api/v1/market/orderbook/level1` endpoint, symbol like "BTC-USDT".
pub struct KuCoinSource {
    client: Arc<HttpClient>,
    base_url: String,
}

impl KuCoinSource {
    pub fn new(client: Arc<HttpClient>, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl QuoteSource for KuCoinSource {
    fn name(&self) -> &str {
        EXCHANGE_NAME
    }

    async fn fetch_ticker(&self, market: &Pair) -> Result<Ticker> {
        let symbol = market.join("-");
        let body = self
            .client
            .get(
                &self.base_url,
                "/api/v1/market/orderbook/level1",
                &[("symbol", symbol.as_str())],
            )
            .await?;
        parse_level1(&body, market)
    }
}

#[derive(Debug, Deserialize)]
struct Level1Response {
    code: String,
    msg: Option<String>,
    data: Option<Level1>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Level1 {
    best_ask: Option<Decimal>,
    best_bid: Option<Decimal>,
}

/// Unknown symbols come back as success with `"data": null`.
fn parse_level1(body: &[u8], market: &Pair) -> Result<Ticker> {
    let resp: Level1Response = parse_json(body)?;

    if resp.code != CODE_OK {
        return Err(QuoteError::Api(format!(
            "code {}: {}",
            resp.code,
            resp.msg.unwrap_or_default()
        )));
    }

    let level = resp
        .data
        .ok_or_else(|| QuoteError::PairNotSupported(market.to_string()))?;

    ticker_from(level.best_ask, "bestAsk", level.best_bid, "bestBid")
}
