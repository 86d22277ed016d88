//! Exchange quote sources, the registry that holds them, and the collector
//! that queries them for one scan cycle.

mod binance;
mod bybit;
pub mod catalog;
mod client;
mod coinbase;
mod coinjar;
mod coinspot;
mod collector;
mod crypto_com;
mod independent_reserve;
mod kraken;
mod kucoin;
mod okx;
pub(crate) mod registry;
mod utils;

use crate::domain::{InvalidQuote, Pair, Ticker};
use async_trait::async_trait;
use thiserror::Error;

pub use client::HttpClient;
pub use collector::{Collector, Unavailable};
pub use registry::{Registry, RegistryError};

/// Reasons a single exchange could not produce a quote.
#[derive(Debug, Error)]
pub enum QuoteError {
    /// The request did not complete within the configured timeout.
    #[error("request timed out")]
    Timeout,

    /// Connection-level failure (DNS, TLS, reset).
    #[error("connection error: {0}")]
    Connection(String),

    /// Non-success HTTP status.
    #[error("http status {status}: {body}")]
    Status { status: u16, body: String },

    /// The exchange answered with an error envelope.
    #[error("API error: {0}")]
    Api(String),

    /// Response body is not the expected JSON shape.
    #[error("malformed response: {0}")]
    Malformed(String),

    /// Response is valid JSON but lacks a required field.
    #[error("missing field {0}")]
    MissingField(String),

    /// Trading pair is not supported by this exchange.
    #[error("pair {0} is not supported")]
    PairNotSupported(String),

    /// Exchange id is not in the registry.
    #[error("exchange {0} is not registered")]
    UnknownExchange(String),

    /// No static rate converts the exchange's currency into the target one.
    #[error("no conversion rate from {from} to {to}")]
    NoConversionRate { from: String, to: String },

    /// Parsed prices violate the quote invariants.
    #[error("invalid quote: {0}")]
    InvalidQuote(#[from] InvalidQuote),
}

impl QuoteError {
    /// Short label of the failure kind, used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            QuoteError::Timeout | QuoteError::Connection(_) => "network",
            QuoteError::Status { .. } | QuoteError::Api(_) => "api",
            QuoteError::Malformed(_) | QuoteError::MissingField(_) => "parse",
            QuoteError::PairNotSupported(_) | QuoteError::UnknownExchange(_) => "unsupported",
            QuoteError::NoConversionRate { .. } => "conversion",
            QuoteError::InvalidQuote(_) => "invalid_quote",
        }
    }

    /// Returns true if repeating the request may succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            QuoteError::Timeout | QuoteError::Connection(_) => true,
            QuoteError::Status { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for QuoteError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            QuoteError::Timeout
        } else if err.is_decode() {
            QuoteError::Malformed(err.to_string())
        } else {
            QuoteError::Connection(err.to_string())
        }
    }
}

impl From<serde_json::Error> for QuoteError {
    fn from(err: serde_json::Error) -> Self {
        QuoteError::Malformed(err.to_string())
    }
}

/// Result type for quote operations.
pub type Result<T> = std::result::Result<T, QuoteError>;

/// QuoteSource is one exchange's public ticker endpoint.
///
/// Implementations translate the market into the exchange's symbol format,
/// call the endpoint and extract the best ask and best bid. They never
/// convert currencies or attach fees; the registry does that.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Unique identifier of this exchange (e.g. "binance").
    fn name(&self) -> &str;

    /// Fetches the best ask and bid for `market`, priced in `market.quote()`.
    async fn fetch_ticker(&self, market: &Pair) -> Result<Ticker>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_labels() {
        assert_eq!(QuoteError::Timeout.kind(), "network");
        assert_eq!(QuoteError::MissingField("askPrice".into()).kind(), "parse");
        assert_eq!(QuoteError::PairNotSupported("BNB/USDT".into()).kind(), "unsupported");
        assert_eq!(
            QuoteError::InvalidQuote(InvalidQuote::BuyPrice("0".into())).kind(),
            "invalid_quote"
        );
    }

    #[test]
    fn test_transient_errors() {
        assert!(QuoteError::Timeout.is_transient());
        assert!(QuoteError::Connection("reset".into()).is_transient());
        assert!(QuoteError::Status { status: 503, body: String::new() }.is_transient());
        assert!(QuoteError::Status { status: 429, body: String::new() }.is_transient());
        assert!(!QuoteError::Status { status: 400, body: String::new() }.is_transient());
        assert!(!QuoteError::Malformed("eof".into()).is_transient());
    }

    #[test]
    fn test_json_error_is_malformed() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(matches!(QuoteError::from(err), QuoteError::Malformed(_)));
    }
}
