//! Arbitrage evaluation result.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use super::Pair;

/// ArbitrageResult is the outcome of evaluating one quote snapshot:
/// where to buy, where to sell, and what is left after fees.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArbitrageResult {
    /// Trading pair the quotes belong to.
    pub pair: Pair,
    /// Exchange with the lowest ask.
    pub buy_exchange: String,
    /// Exchange with the highest bid.
    pub sell_exchange: String,
    /// Ask on the buy exchange, target currency.
    pub buy_price: Decimal,
    /// Bid on the sell exchange, target currency.
    pub sell_price: Decimal,
    /// Fee rate of the buy exchange.
    pub buy_fee_rate: Decimal,
    /// Fee rate of the sell exchange.
    pub sell_fee_rate: Decimal,
    /// sell_price - buy_price.
    pub gross_spread: Decimal,
    /// Fee paid on the buy leg.
    pub buy_fee_amount: Decimal,
    /// Fee paid on the sell leg.
    pub sell_fee_amount: Decimal,
    /// Net profit as a percentage of the buy price.
    pub net_profit_pct: Decimal,
    /// Net profit on the investment, target currency.
    pub net_profit_amount: Decimal,
    /// Investment the amount was computed for.
    pub investment: Decimal,
    /// Threshold the result was compared against.
    pub min_profit_pct: Decimal,
    /// True when net_profit_pct >= min_profit_pct.
    pub meets_threshold: bool,
    /// True when the same exchange holds both the best ask and the best bid.
    pub same_exchange: bool,
    /// When the evaluation ran.
    pub timestamp: DateTime<Utc>,
}

impl ArbitrageResult {
    /// Gross spread as a percentage of the buy price.
    pub fn gross_profit_pct(&self) -> Decimal {
        self.gross_spread / self.buy_price * Decimal::ONE_HUNDRED
    }

    /// Combined fee rate of both legs, as a percentage.
    pub fn total_fee_pct(&self) -> Decimal {
        (self.buy_fee_rate + self.sell_fee_rate) * Decimal::ONE_HUNDRED
    }
}
