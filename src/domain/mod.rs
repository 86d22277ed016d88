//! Domain models for quote aggregation and arbitrage evaluation.

mod error;
mod opportunity;
mod pair;
mod quote;
mod request;

pub use error::{InvalidQuote, InvalidRequest};
pub use opportunity::ArbitrageResult;
pub use pair::Pair;
pub use quote::{ExchangeQuoteSet, Quote, Ticker};
pub use request::{ArbitrageRequest, MAX_INVESTMENT};
