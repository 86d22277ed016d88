//! Domain validation errors.

use thiserror::Error;

/// A quote that violates the price/fee invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidQuote {
    #[error("buy price out of range, got {0}")]
    BuyPrice(String),
    #[error("sell price out of range, got {0}")]
    SellPrice(String),
    #[error("fee rate must be in [0, 1), got {0}")]
    FeeRate(String),
}

/// An arbitrage request with unusable parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidRequest {
    #[error("investment must be positive and at most 1000000000, got {0}")]
    Investment(String),
}
