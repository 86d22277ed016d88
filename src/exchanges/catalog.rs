//! Built-in defaults for every supported exchange.
//!
//! Each row is the static data the registry needs: API base URL, taker fee,
//! the single fiat market for exchanges that only list one, and the pairs
//! consulted by default. Config values override these per exchange.

use rust_decimal::Decimal;

use super::{
    binance, bybit, coinbase, coinjar, coinspot, crypto_com, independent_reserve, kraken, kucoin,
    okx,
};

/// Default data of one exchange.
#[derive(Debug, Clone, Copy)]
pub struct CatalogEntry {
    pub id: &'static str,
    pub base_url: &'static str,
    pub fee_taker: Decimal,
    /// Quote currency used for every pair, or None to use the pair's own quote.
    pub market_currency: Option<&'static str>,
    pub pairs: &'static [&'static str],
}

const fn fee(value: u32, scale: u32) -> Decimal {
    Decimal::from_parts(value, 0, 0, false, scale)
}

const MAJORS: &[&str] = &[
    "BTC/USDT", "ETH/USDT", "BNB/USDT", "SOL/USDT", "XRP/USDT", "ADA/USDT",
];

const MAJORS_WITHOUT_BNB: &[&str] = &["BTC/USDT", "ETH/USDT", "SOL/USDT", "XRP/USDT", "ADA/USDT"];

pub const CATALOG: &[CatalogEntry] = &[
    CatalogEntry {
        id: binance::EXCHANGE_NAME,
        base_url: "https://api.binance.com",
        fee_taker: fee(1, 3),
        market_currency: None,
        pairs: MAJORS,
    },
    CatalogEntry {
        id: kraken::EXCHANGE_NAME,
        base_url: "https://api.kraken.com",
        fee_taker: fee(26, 4),
        market_currency: None,
        pairs: MAJORS_WITHOUT_BNB,
    },
    CatalogEntry {
        id: coinspot::EXCHANGE_NAME,
        base_url: "https://www.coinspot.com.au",
        fee_taker: fee(1, 2),
        market_currency: Some("AUD"),
        pairs: MAJORS,
    },
    CatalogEntry {
        id: independent_reserve::EXCHANGE_NAME,
        base_url: "https://api.independentreserve.com",
        fee_taker: fee(5, 3),
        market_currency: Some("AUD"),
        pairs: MAJORS_WITHOUT_BNB,
    },
    CatalogEntry {
        id: coinbase::EXCHANGE_NAME,
        base_url: "https://api.coinbase.com",
        fee_taker: fee(5, 3),
        market_currency: Some("USD"),
        pairs: MAJORS_WITHOUT_BNB,
    },
    CatalogEntry {
        id: coinjar::EXCHANGE_NAME,
        base_url: "https://data.exchange.coinjar.com",
        fee_taker: fee(5, 3),
        market_currency: Some("AUD"),
        pairs: MAJORS_WITHOUT_BNB,
    },
    CatalogEntry {
        id: crypto_com::EXCHANGE_NAME,
        base_url: "https://api.crypto.com",
        fee_taker: fee(4, 3),
        market_currency: None,
        pairs: MAJORS,
    },
    CatalogEntry {
        id: bybit::EXCHANGE_NAME,
        base_url: "https://api.bybit.com",
        fee_taker: fee(1, 3),
        market_currency: None,
        pairs: MAJORS,
    },
    CatalogEntry {
        id: okx::EXCHANGE_NAME,
        base_url: "https://www.okx.com",
        fee_taker: fee(1, 3),
        market_currency: None,
        pairs: MAJORS,
    },
    CatalogEntry {
        id: kucoin::EXCHANGE_NAME,
        base_url: "https://api.kucoin.com",
        fee_taker: fee(1, 3),
        market_currency: None,
        pairs: MAJORS,
    },
];

/// Finds the catalog row of an exchange id (case-insensitive).
pub fn lookup(id: &str) -> Option<&'static CatalogEntry> {
    CATALOG.iter().find(|entry| entry.id.eq_ignore_ascii_case(id))
}

/// All known exchange ids.
pub fn ids() -> impl Iterator<Item = &'static str> {
    CATALOG.iter().map(|entry| entry.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Pair;
    use std::collections::HashSet;

    #[test]
    fn test_ids_are_unique() {
        let ids: HashSet<_> = ids().collect();
        assert_eq!(ids.len(), CATALOG.len());
    }

    #[test]
    fn test_fees_are_valid_rates() {
        for entry in CATALOG {
            assert!(entry.fee_taker >= Decimal::ZERO && entry.fee_taker < Decimal::ONE, "{}", entry.id);
        }
    }

    #[test]
    fn test_default_pairs_parse() {
        for entry in CATALOG {
            for pair in entry.pairs {
                assert!(pair.parse::<Pair>().is_ok(), "{} {}", entry.id, pair);
            }
        }
    }

    #[test]
    fn test_lookup() {
        assert_eq!(lookup("Kraken").unwrap().fee_taker, Decimal::new(26, 4));
        assert_eq!(lookup("coinspot").unwrap().market_currency, Some("AUD"));
        assert!(lookup("mtgox").is_none());
    }
}
