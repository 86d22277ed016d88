//! Concurrent quote collection for one scan cycle.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use futures_util::future::join_all;
use serde::Serialize;
use tracing::{debug, warn};

use super::{QuoteError, Registry};
use crate::domain::{ExchangeQuoteSet, Pair};

/// An exchange that was queried but produced no quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Unavailable {
    pub exchange: String,
    /// Failure category, see `QuoteError::kind`.
    pub kind: &'static str,
    pub reason: String,
}

/// Collected quotes plus the exchanges that failed.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Collection {
    pub quotes: ExchangeQuoteSet,
    pub unavailable: Vec<Unavailable>,
}

/// Collector queries the selected exchanges concurrently.
/// One exchange failing never fails the cycle; it is simply absent from the set.
#[derive(Clone)]
pub struct Collector {
    registry: Arc<Registry>,
    call_timeout: Duration,
}

impl Collector {
    /// `call_timeout` bounds each exchange separately. An exchange still
    /// pending when it expires is reported as timed out.
    pub fn new(registry: Arc<Registry>, call_timeout: Duration) -> Self {
        Self {
            registry,
            call_timeout,
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Returns a quote for every selected exchange that answered, and why
    /// each missing one is missing.
    /// Ids not in the registry, or not listing `pair`, are skipped without a request.
    pub async fn collect(&self, exchanges: &BTreeSet<String>, pair: &Pair) -> Collection {
        let targets: Vec<&str> = exchanges
            .iter()
            .map(String::as_str)
            .filter(|id| match self.registry.get(id) {
                Some(entry) if entry.supports(pair) => true,
                Some(_) => {
                    debug!(exchange = %id, pair = %pair, "Pair not listed, skipping exchange");
                    false
                }
                None => {
                    debug!(exchange = %id, "Exchange not registered, skipping");
                    false
                }
            })
            .collect();

        let results = join_all(targets.iter().map(|id| async move {
            let result = tokio::time::timeout(self.call_timeout, self.registry.normalize(id, pair))
                .await
                .unwrap_or(Err(QuoteError::Timeout));
            (*id, result)
        }))
        .await;

        let mut collection = Collection::default();
        for (id, result) in results {
            match result {
                Ok(quote) => {
                    debug!(
                        exchange = %id,
                        buy = %quote.buy_price(),
                        sell = %quote.sell_price(),
                        "Quote collected"
                    );
                    collection.quotes.insert(id.to_string(), quote);
                }
                Err(e) => {
                    warn!(exchange = %id, pair = %pair, kind = e.kind(), error = %e, "Quote unavailable");
                    collection.unavailable.push(Unavailable {
                        exchange: id.to_string(),
                        kind: e.kind(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        collection
    }
}
