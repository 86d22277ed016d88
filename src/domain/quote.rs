//! Normalized quote records.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::InvalidQuote;

/// Smallest accepted price, in the target currency.
pub const MIN_PRICE: Decimal = Decimal::from_parts(1, 0, 0, false, 8);

/// Largest accepted price, in the target currency.
/// With MIN_PRICE this keeps every spread ratio representable.
pub const MAX_PRICE: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// ExchangeQuoteSet maps exchange id to its quote for one cycle.
/// Ordered by exchange id so that extremal selection has a stable tie-break.
pub type ExchangeQuoteSet = BTreeMap<String, Quote>;

/// Ticker is the raw best ask and best bid an exchange reports,
/// in the exchange's own market currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticker {
    /// Lowest price at which the asset can be bought.
    pub ask: Decimal,
    /// Highest price at which the asset can be sold.
    pub bid: Decimal,
}

impl Ticker {
    pub fn new(ask: Decimal, bid: Decimal) -> Self {
        Self { ask, bid }
    }

    /// Multiplies both sides by a currency conversion rate.
    /// Returns `None` if either product overflows.
    pub fn convert(self, rate: Decimal) -> Option<Self> {
        Some(Self {
            ask: self.ask.checked_mul(rate)?,
            bid: self.bid.checked_mul(rate)?,
        })
    }
}

/// Quote is a validated buy/sell price pair in the target currency
/// together with the exchange's per-leg fee rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Quote {
    buy_price: Decimal,
    sell_price: Decimal,
    fee_rate: Decimal,
}

impl Quote {
    /// Creates a quote, rejecting prices outside [MIN_PRICE, MAX_PRICE]
    /// and fee rates outside [0, 1).
    pub fn new(buy_price: Decimal, sell_price: Decimal, fee_rate: Decimal) -> Result<Self, InvalidQuote> {
        if !price_in_range(buy_price) {
            return Err(InvalidQuote::BuyPrice(buy_price.to_string()));
        }
        if !price_in_range(sell_price) {
            return Err(InvalidQuote::SellPrice(sell_price.to_string()));
        }
        if fee_rate < Decimal::ZERO || fee_rate >= Decimal::ONE {
            return Err(InvalidQuote::FeeRate(fee_rate.to_string()));
        }

        Ok(Self {
            buy_price,
            sell_price,
            fee_rate,
        })
    }

    /// Builds a quote from a ticker already converted to the target currency.
    pub fn from_ticker(ticker: Ticker, fee_rate: Decimal) -> Result<Self, InvalidQuote> {
        Self::new(ticker.ask, ticker.bid, fee_rate)
    }

    /// Best ask in the target currency.
    pub fn buy_price(&self) -> Decimal {
        self.buy_price
    }

    /// Best bid in the target currency.
    pub fn sell_price(&self) -> Decimal {
        self.sell_price
    }

    /// Fee charged per executed leg, as a fraction.
    pub fn fee_rate(&self) -> Decimal {
        self.fee_rate
    }
}

fn price_in_range(price: Decimal) -> bool {
    (MIN_PRICE..=MAX_PRICE).contains(&price)
}
