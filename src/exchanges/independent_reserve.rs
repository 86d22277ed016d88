//! Independent Reserve market summary (AUD market).

use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;

use super::utils::{capitalize, parse_json, ticker_from, xbt_code};
use super::{HttpClient, QuoteSource, Result};
use crate::domain::{Pair, Ticker};

pub const EXCHANGE_NAME: &str = "independentreserve";

/// Independent Reserve `GetMarketSummary` endpoint.
/// Currency codes are capitalized words ("Xbt", "Aud").
pub struct IndependentReserveSource {
    client: Arc<HttpClient>,
    base_url: String,
}

impl IndependentReserveSource {
    pub fn new(client: Arc<HttpClient>, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl QuoteSource for IndependentReserveSource {
    fn name(&self) -> &str {
        EXCHANGE_NAME
    }

    async fn fetch_ticker(&self, market: &Pair) -> Result<Ticker> {
        let primary = capitalize(&xbt_code(market.base()));
        let secondary = capitalize(market.quote());
        let body = self
            .client
            .get(
                &self.base_url,
                "/Public/GetMarketSummary",
                &[
                    ("primaryCurrencyCode", primary.as_str()),
                    ("secondaryCurrencyCode", secondary.as_str()),
                ],
            )
            .await?;
        parse_market_summary(&body)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct MarketSummary {
    current_lowest_offer_price: Option<Decimal>,
    current_highest_bid_price: Option<Decimal>,
}

fn parse_market_summary(body: &[u8]) -> Result<Ticker> {
    let resp: MarketSummary = parse_json(body)?;
    ticker_from(
        resp.current_lowest_offer_price,
        "CurrentLowestOfferPrice",
        resp.current_highest_bid_price,
        "CurrentHighestBidPrice",
    )
}
