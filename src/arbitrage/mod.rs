//! Cross-exchange arbitrage evaluation.

mod evaluator;

pub use evaluator::Evaluator;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::{ArbitrageResult, ExchangeQuoteSet};

/// SameExchangePolicy decides what happens when one exchange holds both
/// the lowest ask and the highest bid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SameExchangePolicy {
    /// Keep the extremal selection and flag it via `same_exchange`.
    #[default]
    Allow,
    /// Fall back to the most profitable pair of distinct exchanges.
    Reject,
}

impl fmt::Display for SameExchangePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SameExchangePolicy::Allow => write!(f, "allow"),
            SameExchangePolicy::Reject => write!(f, "reject"),
        }
    }
}

/// ScanOutcome is the state shown to the user after one cycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ScanOutcome {
    /// Net profit clears the threshold.
    Opportunity(ArbitrageResult),
    /// A valid result whose net profit is below the threshold.
    BelowThreshold(ArbitrageResult),
    /// Quotes were collected but no admissible buy/sell pair exists.
    NoOpportunity,
    /// No exchange produced a usable quote.
    EmptyQuoteSet,
}

impl ScanOutcome {
    /// Classifies an evaluation of `quotes`.
    pub fn classify(quotes: &ExchangeQuoteSet, result: Option<ArbitrageResult>) -> Self {
        match result {
            Some(result) if result.meets_threshold => ScanOutcome::Opportunity(result),
            Some(result) => ScanOutcome::BelowThreshold(result),
            None if quotes.is_empty() => ScanOutcome::EmptyQuoteSet,
            None => ScanOutcome::NoOpportunity,
        }
    }

    /// The underlying result, if any.
    pub fn result(&self) -> Option<&ArbitrageResult> {
        match self {
            ScanOutcome::Opportunity(r) | ScanOutcome::BelowThreshold(r) => Some(r),
            ScanOutcome::NoOpportunity | ScanOutcome::EmptyQuoteSet => None,
        }
    }

    /// Short label used in logs and JSON.
    pub fn label(&self) -> &'static str {
        match self {
            ScanOutcome::Opportunity(_) => "opportunity",
            ScanOutcome::BelowThreshold(_) => "below_threshold",
            ScanOutcome::NoOpportunity => "no_opportunity",
            ScanOutcome::EmptyQuoteSet => "empty_quote_set",
        }
    }
}
