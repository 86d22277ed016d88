//! Scan loop: collects quotes, evaluates them and hands the outcome over.
//!
//! Every cycle takes a new id. A cycle whose id is no longer the latest when
//! its quotes arrive is discarded, so results of different cycles never mix.

mod error;
mod stats;

pub use error::ScannerError;
pub use stats::Stats;

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use tokio::sync::Mutex;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::arbitrage::{Evaluator, ScanOutcome};
use crate::config::Config;
use crate::domain::{ArbitrageRequest, ExchangeQuoteSet, Pair};
use crate::exchanges::{Collector, Registry, Unavailable};

/// Everything produced by one completed cycle.
#[derive(Debug, Clone, Serialize)]
pub struct CycleReport {
    pub cycle: u64,
    pub pair: Pair,
    pub target_currency: String,
    pub investment: Decimal,
    pub min_profit_pct: Decimal,
    pub quotes: ExchangeQuoteSet,
    pub unavailable: Vec<Unavailable>,
    pub outcome: ScanOutcome,
    pub captured_at: DateTime<Utc>,
}

/// Scanner runs collect + evaluate cycles for one request at a time.
pub struct Scanner {
    collector: Collector,
    evaluator: Evaluator,
    cycle_timeout: Duration,
    refresh_interval: Duration,

    latest_cycle: AtomicU64,
    stats: Mutex<Stats>,
}

impl Scanner {
    pub fn new(
        registry: Arc<Registry>,
        evaluator: Evaluator,
        cycle_timeout: Duration,
        refresh_interval: Duration,
    ) -> Self {
        Self {
            collector: Collector::new(registry, cycle_timeout),
            evaluator,
            cycle_timeout,
            refresh_interval,
            latest_cycle: AtomicU64::new(0),
            stats: Mutex::new(Stats::default()),
        }
    }

    /// Builds the registry and scanner described by `config`.
    pub fn from_config(config: &Config) -> Result<Self, ScannerError> {
        let registry = Registry::from_config(config)?;
        let evaluator = Evaluator::new(config.scan.same_exchange);

        info!(
            exchanges = ?registry.list(),
            target_currency = %registry.target_currency(),
            same_exchange = %evaluator.policy(),
            "Scanner initialized"
        );

        Ok(Self::new(
            Arc::new(registry),
            evaluator,
            config.scan.cycle_timeout(),
            config.scan.refresh_interval(),
        ))
    }

    pub fn registry(&self) -> &Registry {
        self.collector.registry()
    }

    /// Returns a copy of the current statistics.
    pub async fn stats(&self) -> Stats {
        self.stats.lock().await.clone()
    }

    /// Runs one cycle.
    ///
    /// Exchanges still pending after the cycle timeout are reported as timed
    /// out and the cycle completes with the quotes that did arrive. Returns
    /// `None` only when a newer cycle started before this one finished collecting.
    pub async fn scan(&self, request: &ArbitrageRequest) -> Option<CycleReport> {
        let cycle = self.latest_cycle.fetch_add(1, Ordering::SeqCst) + 1;
        self.stats.lock().await.cycles += 1;

        debug!(
            cycle = cycle,
            pair = %request.pair,
            exchanges = ?request.exchanges,
            "Scan cycle started"
        );

        let collection = self.collector.collect(&request.exchanges, &request.pair).await;

        if self.latest_cycle.load(Ordering::SeqCst) != cycle {
            debug!(cycle = cycle, "Discarding stale scan cycle");
            self.stats.lock().await.stale += 1;
            return None;
        }

        let result = self.evaluator.evaluate(
            &request.pair,
            &collection.quotes,
            request.investment,
            request.min_profit_pct,
        );
        let captured_at = result.as_ref().map_or_else(Utc::now, |r| r.timestamp);
        let outcome = ScanOutcome::classify(&collection.quotes, result);

        self.stats.lock().await.record(&outcome);

        info!(
            cycle = cycle,
            pair = %request.pair,
            quotes = collection.quotes.len(),
            unavailable = collection.unavailable.len(),
            outcome = outcome.label(),
            net_profit_pct = ?outcome.result().map(|r| r.net_profit_pct.round_dp(2)),
            "Scan cycle finished"
        );

        Some(CycleReport {
            cycle,
            pair: request.pair.clone(),
            target_currency: self.registry().target_currency().to_string(),
            investment: request.investment,
            min_profit_pct: request.min_profit_pct,
            quotes: collection.quotes,
            unavailable: collection.unavailable,
            outcome,
            captured_at,
        })
    }

    /// Repeats `scan` every refresh interval until Ctrl-C.
    pub async fn watch<F>(&self, request: &ArbitrageRequest, on_report: F)
    where
        F: FnMut(&CycleReport),
    {
        let shutdown = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!(error = %e, "Failed to listen for Ctrl-C");
                std::future::pending::<()>().await;
            }
        };

        self.watch_until(request, shutdown, on_report).await;
    }

    /// Repeats `scan` every refresh interval until `shutdown` completes.
    /// Cycles never overlap; ticks missed while a cycle runs are skipped.
    pub async fn watch_until<F, S>(&self, request: &ArbitrageRequest, shutdown: S, mut on_report: F)
    where
        F: FnMut(&CycleReport),
        S: Future<Output = ()>,
    {
        let mut interval = tokio::time::interval(self.refresh_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        tokio::pin!(shutdown);

        info!(
            pair = %request.pair,
            refresh_interval = ?self.refresh_interval,
            cycle_timeout = ?self.cycle_timeout,
            "Starting watch loop"
        );

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("Stopping watch loop...");
                    break;
                }
                _ = interval.tick() => {
                    if let Some(report) = self.scan(request).await {
                        on_report(&report);
                    }
                }
            }
        }

        let stats = self.stats().await;
        info!(
            cycles = stats.cycles,
            completed = stats.completed(),
            opportunities = stats.opportunities,
            below_threshold = stats.below_threshold,
            no_opportunity = stats.no_opportunity,
            empty = stats.empty,
            stale = stats.stale,
            "Watch loop stopped"
        );
    }
}
