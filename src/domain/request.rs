//! Parameters of one arbitrage evaluation.

use rust_decimal::Decimal;
use std::collections::BTreeSet;

use super::{InvalidRequest, Pair};

/// Largest accepted investment, in the target currency.
pub const MAX_INVESTMENT: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// ArbitrageRequest holds the user's selection for one scan cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct ArbitrageRequest {
    /// Trading pair to scan.
    pub pair: Pair,
    /// Exchange ids to consult. Ids unknown to the registry are ignored.
    pub exchanges: BTreeSet<String>,
    /// Amount invested, in the target currency. In (0, MAX_INVESTMENT].
    pub investment: Decimal,
    /// Minimum net profit percentage. Zero or negative accepts any spread.
    pub min_profit_pct: Decimal,
}

impl ArbitrageRequest {
    /// Creates a request, rejecting an investment outside (0, MAX_INVESTMENT].
    pub fn new<I, S>(
        pair: Pair,
        exchanges: I,
        investment: Decimal,
        min_profit_pct: Decimal,
    ) -> Result<Self, InvalidRequest>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if investment <= Decimal::ZERO || investment > MAX_INVESTMENT {
            return Err(InvalidRequest::Investment(investment.to_string()));
        }

        Ok(Self {
            pair,
            exchanges: exchanges
                .into_iter()
                .map(|id| id.into().to_lowercase())
                .collect(),
            investment,
            min_profit_pct,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_request_lowercases_exchanges() {
        let req = ArbitrageRequest::new(
            "BTC/USDT".parse().unwrap(),
            ["Binance", "KRAKEN"],
            Decimal::new(1000, 0),
            Decimal::ONE,
        )
        .unwrap();

        assert!(req.exchanges.contains("binance"));
        assert!(req.exchanges.contains("kraken"));
    }

    #[test]
    fn test_non_positive_investment_rejected() {
        let result = ArbitrageRequest::new(
            "BTC/USDT".parse().unwrap(),
            Vec::<String>::new(),
            Decimal::ZERO,
            Decimal::ONE,
        );
        assert!(matches!(result, Err(InvalidRequest::Investment(_))));
    }

    #[test]
    fn test_oversized_investment_rejected() {
        let pair: Pair = "BTC/USDT".parse().unwrap();
        let result = ArbitrageRequest::new(
            pair.clone(),
            Vec::<String>::new(),
            MAX_INVESTMENT + Decimal::ONE,
            Decimal::ONE,
        );
        assert!(matches!(result, Err(InvalidRequest::Investment(_))));

        assert!(ArbitrageRequest::new(pair, Vec::<String>::new(), MAX_INVESTMENT, Decimal::ONE).is_ok());
    }
}
