//! OKX market ticker.

use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;

use super::utils::{parse_json, ticker_from};
use super::{HttpClient, QuoteError, QuoteSource, Result};
use crate::domain::{Pair, Ticker};

pub const EXCHANGE_NAME: &str = "okx";

/// OKX `/api/v5/market/ticker` endpoint, instrument like "BTC-USDT".
pub struct OkxSource {
    client: Arc<HttpClient>,
    base_url: String,
}

impl OkxSource {
    pub fn new(client: Arc<HttpClient>, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl QuoteSource for OkxSource {
    fn name(&self) -> &str {
        EXCHANGE_NAME
    }

    async fn fetch_ticker(&self, market: &Pair) -> Result<Ticker> {
        let inst_id = market.join("-");
        let body = self
            .client
            .get(&self.base_url, "/api/v5/market/ticker", &[("instId", inst_id.as_str())])
            .await?;
        parse_ticker(&body, market)
    }
}

#[derive(Debug, Deserialize)]
struct TickerResponse {
    code: String,
    msg: Option<String>,
    #[serde(default)]
    data: Vec<InstrumentTicker>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InstrumentTicker {
    ask_px: Option<Decimal>,
    bid_px: Option<Decimal>,
}

fn parse_ticker(body: &[u8], market: &Pair) -> Result<Ticker> {
    let resp: TickerResponse = parse_json(body)?;

    if resp.code != "0" {
        return Err(QuoteError::Api(format!(
            "code {}: {}",
            resp.code,
            resp.msg.unwrap_or_default()
        )));
    }

    let ticker = resp
        .data
        .into_iter()
        .next()
        .ok_or_else(|| QuoteError::PairNotSupported(market.to_string()))?;

    ticker_from(ticker.ask_px, "askPx", ticker.bid_px, "bidPx")
}
