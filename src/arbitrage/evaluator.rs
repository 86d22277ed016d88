//! Best buy/sell selection and fee-adjusted profit computation.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::SameExchangePolicy;
use crate::domain::{ArbitrageResult, ExchangeQuoteSet, Pair, Quote};

/// Evaluator turns a quote snapshot into an arbitrage result.
///
/// Evaluation is a pure function of its inputs: the buy venue is the lowest
/// ask, the sell venue the highest bid, ties keep the first exchange in id
/// order.
#[derive(Debug, Clone, Copy, Default)]
pub struct Evaluator {
    policy: SameExchangePolicy,
}

impl Evaluator {
    pub fn new(policy: SameExchangePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> SameExchangePolicy {
        self.policy
    }

    /// Evaluates `quotes` now. Returns `None` when there is nothing to evaluate.
    pub fn evaluate(
        &self,
        pair: &Pair,
        quotes: &ExchangeQuoteSet,
        investment: Decimal,
        min_profit_pct: Decimal,
    ) -> Option<ArbitrageResult> {
        self.evaluate_at(pair, quotes, investment, min_profit_pct, Utc::now())
    }

    /// Evaluates `quotes` with an explicit capture time.
    pub fn evaluate_at(
        &self,
        pair: &Pair,
        quotes: &ExchangeQuoteSet,
        investment: Decimal,
        min_profit_pct: Decimal,
        timestamp: DateTime<Utc>,
    ) -> Option<ArbitrageResult> {
        let (buy_id, buy) = best_buy(quotes)?;
        let (sell_id, sell) = best_sell(quotes)?;

        let leg = Leg {
            pair,
            investment,
            min_profit_pct,
            timestamp,
        };

        if buy_id != sell_id || self.policy == SameExchangePolicy::Allow {
            return Some(leg.compute(buy_id, buy, sell_id, sell));
        }

        best_distinct(quotes, &leg)
    }
}

fn best_buy(quotes: &ExchangeQuoteSet) -> Option<(&str, &Quote)> {
    let mut best: Option<(&str, &Quote)> = None;
    for (id, quote) in quotes {
        match best {
            Some((_, b)) if quote.buy_price() >= b.buy_price() => {}
            _ => best = Some((id.as_str(), quote)),
        }
    }
    best
}

fn best_sell(quotes: &ExchangeQuoteSet) -> Option<(&str, &Quote)> {
    let mut best: Option<(&str, &Quote)> = None;
    for (id, quote) in quotes {
        match best {
            Some((_, b)) if quote.sell_price() <= b.sell_price() => {}
            _ => best = Some((id.as_str(), quote)),
        }
    }
    best
}

/// Most profitable (buy, sell) combination of two different exchanges.
fn best_distinct(quotes: &ExchangeQuoteSet, leg: &Leg<'_>) -> Option<ArbitrageResult> {
    let mut best: Option<ArbitrageResult> = None;
    for (buy_id, buy) in quotes {
        for (sell_id, sell) in quotes {
            if buy_id == sell_id {
                continue;
            }
            let candidate = leg.compute(buy_id, buy, sell_id, sell);
            match best {
                Some(ref b) if candidate.net_profit_pct <= b.net_profit_pct => {}
                _ => best = Some(candidate),
            }
        }
    }
    best
}

/// Request-wide inputs shared by every candidate pair.
struct Leg<'a> {
    pair: &'a Pair,
    investment: Decimal,
    min_profit_pct: Decimal,
    timestamp: DateTime<Utc>,
}

impl Leg<'_> {
    fn compute(&self, buy_id: &str, buy: &Quote, sell_id: &str, sell: &Quote) -> ArbitrageResult {
        let buy_price = buy.buy_price();
        let sell_price = sell.sell_price();

        let gross_spread = sell_price - buy_price;
        let buy_fee_amount = buy_price * buy.fee_rate();
        let sell_fee_amount = sell_price * sell.fee_rate();

        // Quote price bounds and MAX_INVESTMENT keep every step below within
        // Decimal range: |pct| < 3e19 and |amount| < 3e26.
        let net_profit_pct =
            (gross_spread - buy_fee_amount - sell_fee_amount) / buy_price * Decimal::ONE_HUNDRED;
        let net_profit_amount = self.investment * (net_profit_pct / Decimal::ONE_HUNDRED);

        ArbitrageResult {
            pair: self.pair.clone(),
            buy_exchange: buy_id.to_string(),
            sell_exchange: sell_id.to_string(),
            buy_price,
            sell_price,
            buy_fee_rate: buy.fee_rate(),
            sell_fee_rate: sell.fee_rate(),
            gross_spread,
            buy_fee_amount,
            sell_fee_amount,
            net_profit_pct,
            net_profit_amount,
            investment: self.investment,
            min_profit_pct: self.min_profit_pct,
            meets_threshold: net_profit_pct >= self.min_profit_pct,
            same_exchange: buy_id == sell_id,
            timestamp: self.timestamp,
        }
    }
}
