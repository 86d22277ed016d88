//! Trading pair value object.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Pair is a tradable asset denominated against a quote currency, "BASE/QUOTE".
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Pair {
    base: String,
    quote: String,
}

impl Pair {
    /// Creates a pair from its parts. Both parts are uppercased.
    pub fn new(base: &str, quote: &str) -> Self {
        Self {
            base: base.trim().to_uppercase(),
            quote: quote.trim().to_uppercase(),
        }
    }

    /// Base asset (e.g. "BTC" in "BTC/USDT").
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Quote currency (e.g. "USDT" in "BTC/USDT").
    pub fn quote(&self) -> &str {
        &self.quote
    }

    /// Returns the same base asset quoted in another currency.
    pub fn with_quote(&self, quote: &str) -> Self {
        Self::new(&self.base, quote)
    }

    /// Joins base and quote with the given separator ("BTC" + "-" + "USDT").
    pub fn join(&self, separator: &str) -> String {
        format!("{}{}{}", self.base, separator, self.quote)
    }
}

impl fmt::Display for Pair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}

impl FromStr for Pair {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (base, quote) = s
            .split_once('/')
            .ok_or_else(|| format!("pair {} must be in BASE/QUOTE format", s))?;

        let valid = |part: &str| {
            let part = part.trim();
            !part.is_empty() && part.chars().all(|c| c.is_ascii_alphanumeric())
        };

        if !valid(base) || !valid(quote) {
            return Err(format!("pair {} must be in BASE/QUOTE format", s));
        }

        Ok(Self::new(base, quote))
    }
}

impl TryFrom<String> for Pair {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Pair> for String {
    fn from(pair: Pair) -> Self {
        pair.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pair() {
        let pair: Pair = "btc/usdt".parse().unwrap();
        assert_eq!(pair.base(), "BTC");
        assert_eq!(pair.quote(), "USDT");
        assert_eq!(pair.to_string(), "BTC/USDT");
    }

    #[test]
    fn test_parse_pair_without_slash() {
        assert!("BTCUSDT".parse::<Pair>().is_err());
    }

    #[test]
    fn test_parse_pair_empty_part() {
        assert!("BTC/".parse::<Pair>().is_err());
        assert!("/USDT".parse::<Pair>().is_err());
    }

    #[test]
    fn test_with_quote_and_join() {
        let pair: Pair = "ETH/USDT".parse().unwrap();
        let market = pair.with_quote("aud");
        assert_eq!(market.to_string(), "ETH/AUD");
        assert_eq!(market.join("-"), "ETH-AUD");
        assert_eq!(market.join(""), "ETHAUD");
    }
}
