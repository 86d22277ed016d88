//! Registry of quote sources with their static per-exchange data.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, info};

use super::binance::BinanceSource;
use super::bybit::BybitSource;
use super::catalog::{self, CatalogEntry};
use super::coinbase::CoinbaseSource;
use super::coinjar::CoinJarSource;
use super::coinspot::CoinSpotSource;
use super::crypto_com::CryptoComSource;
use super::independent_reserve::IndependentReserveSource;
use super::kraken::KrakenSource;
use super::kucoin::KuCoinSource;
use super::okx::OkxSource;
use super::{HttpClient, QuoteError, QuoteSource, Result};
use crate::config::{Config, CurrencyConfig, ExchangeConfig};
use crate::domain::{Pair, Quote};

/// Errors raised while building the registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("unknown exchange: {name} (known: {known})")]
    UnknownExchange { name: String, known: String },

    #[error("no exchange is enabled")]
    NoExchanges,

    #[error("exchange {exchange}: invalid pair {pair}: {reason}")]
    InvalidPair {
        exchange: String,
        pair: String,
        reason: String,
    },

    #[error("failed to build http client: {0}")]
    Http(#[from] reqwest::Error),
}

/// One registered exchange: its source plus fee, market and pair data.
pub struct ExchangeEntry {
    source: Arc<dyn QuoteSource>,
    pairs: BTreeSet<Pair>,
    fee_rate: Decimal,
    market_currency: Option<String>,
}

impl ExchangeEntry {
    pub fn new(
        source: Arc<dyn QuoteSource>,
        pairs: impl IntoIterator<Item = Pair>,
        fee_rate: Decimal,
        market_currency: Option<String>,
    ) -> Self {
        Self {
            source,
            pairs: pairs.into_iter().collect(),
            fee_rate,
            market_currency: market_currency.map(|c| c.to_uppercase()),
        }
    }

    pub fn name(&self) -> &str {
        self.source.name()
    }

    /// Returns true if the exchange is consulted for `pair`.
    pub fn supports(&self, pair: &Pair) -> bool {
        self.pairs.contains(pair)
    }

    /// The market actually queried for `pair` on this exchange.
    pub fn market_for(&self, pair: &Pair) -> Pair {
        match self.market_currency {
            Some(ref currency) => pair.with_quote(currency),
            None => pair.clone(),
        }
    }

    pub fn fee_rate(&self) -> Decimal {
        self.fee_rate
    }

    pub fn pairs(&self) -> impl Iterator<Item = &Pair> {
        self.pairs.iter()
    }
}

/// Registry maps exchange id to its entry. Built once, lookup-only afterwards.
pub struct Registry {
    currency: CurrencyConfig,
    entries: BTreeMap<String, ExchangeEntry>,
}

impl Registry {
    /// Creates an empty registry converting into `currency.target`.
    pub fn new(currency: CurrencyConfig) -> Self {
        Self {
            currency,
            entries: BTreeMap::new(),
        }
    }

    /// Creates a registry from configuration.
    /// Only enabled exchanges are instantiated; unknown names are rejected.
    pub fn from_config(config: &Config) -> std::result::Result<Self, RegistryError> {
        let client = Arc::new(HttpClient::from_config(&config.http)?);
        let mut registry = Self::new(config.currency.clone());

        let mut names: Vec<&String> = config.exchanges.keys().collect();
        names.sort();

        for name in names {
            let exchange_config = &config.exchanges[name];
            if !exchange_config.enabled {
                info!(exchange = %name, "Skipping disabled exchange");
                continue;
            }

            let defaults = catalog::lookup(name).ok_or_else(|| unknown_exchange(name))?;

            info!(exchange = %defaults.id, "Loading exchange from config");

            let entry = Self::create_entry(defaults, exchange_config, Arc::clone(&client))?;
            registry.register(entry);
        }

        if registry.is_empty() {
            return Err(RegistryError::NoExchanges);
        }

        info!(exchanges = registry.len(), "Registry built");

        Ok(registry)
    }

    /// Merges config overrides into the catalog defaults of one exchange.
    fn create_entry(
        defaults: &CatalogEntry,
        config: &ExchangeConfig,
        client: Arc<HttpClient>,
    ) -> std::result::Result<ExchangeEntry, RegistryError> {
        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| defaults.base_url.to_string());

        let source = create_source(defaults.id, client, base_url)
            .ok_or_else(|| unknown_exchange(defaults.id))?;

        let pairs = match config.pairs {
            Some(ref pairs) => pairs.iter().map(String::as_str).collect::<Vec<_>>(),
            None => defaults.pairs.to_vec(),
        };
        let pairs = pairs
            .into_iter()
            .map(|p| {
                p.parse::<Pair>().map_err(|reason| RegistryError::InvalidPair {
                    exchange: defaults.id.to_string(),
                    pair: p.to_string(),
                    reason,
                })
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let market_currency = config
            .market_currency
            .clone()
            .or_else(|| defaults.market_currency.map(str::to_string));

        Ok(ExchangeEntry::new(
            source,
            pairs,
            config.fee_taker.unwrap_or(defaults.fee_taker),
            market_currency,
        ))
    }

    /// Registers an entry under its source name, replacing any previous one.
    pub fn register(&mut self, entry: ExchangeEntry) {
        let name = entry.name().to_lowercase();
        debug!(exchange = %name, pairs = entry.pairs().count(), "Registering exchange");
        self.entries.insert(name, entry);
    }

    /// Returns the entry of an exchange id.
    pub fn get(&self, id: &str) -> Option<&ExchangeEntry> {
        self.entries.get(&id.to_lowercase())
    }

    /// Returns all registered exchange ids, sorted.
    pub fn list(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Currency every quote is expressed in.
    pub fn target_currency(&self) -> &str {
        &self.currency.target
    }

    /// Fetches one exchange's ticker for `pair` and turns it into a quote
    /// in the target currency with the exchange's fee attached.
    pub async fn normalize(&self, id: &str, pair: &Pair) -> Result<Quote> {
        let entry = self
            .get(id)
            .ok_or_else(|| QuoteError::UnknownExchange(id.to_string()))?;

        if !entry.supports(pair) {
            return Err(QuoteError::PairNotSupported(pair.to_string()));
        }

        let market = entry.market_for(pair);
        let rate = self
            .currency
            .rate_for(market.quote())
            .ok_or_else(|| QuoteError::NoConversionRate {
                from: market.quote().to_string(),
                to: self.currency.target.clone(),
            })?;

        let ticker = entry.source.fetch_ticker(&market).await?;

        let converted = ticker
            .convert(rate)
            .ok_or_else(|| QuoteError::Malformed(format!("price overflow converting {}", market)))?;

        Ok(Quote::from_ticker(converted, entry.fee_rate())?)
    }
}

fn unknown_exchange(name: &str) -> RegistryError {
    RegistryError::UnknownExchange {
        name: name.to_string(),
        known: catalog::ids().collect::<Vec<_>>().join(", "),
    }
}

/// Factory of quote sources by catalog id.
fn create_source(
    id: &str,
    client: Arc<HttpClient>,
    base_url: String,
) -> Option<Arc<dyn QuoteSource>> {
    let source: Arc<dyn QuoteSource> = match id {
        "binance" => Arc::new(BinanceSource::new(client, base_url)),
        "kraken" => Arc::new(KrakenSource::new(client, base_url)),
        "coinspot" => Arc::new(CoinSpotSource::new(client, base_url)),
        "independentreserve" => Arc::new(IndependentReserveSource::new(client, base_url)),
        "coinbase" => Arc::new(CoinbaseSource::new(client, base_url)),
        "coinjar" => Arc::new(CoinJarSource::new(client, base_url)),
        "cryptocom" => Arc::new(CryptoComSource::new(client, base_url)),
        "bybit" => Arc::new(BybitSource::new(client, base_url)),
        "okx" => Arc::new(OkxSource::new(client, base_url)),
        "kucoin" => Arc::new(KuCoinSource::new(client, base_url)),
        _ => return None,
    };
    Some(source)
}
