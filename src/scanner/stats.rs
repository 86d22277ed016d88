//! Runtime statistics of the scanner.

use crate::arbitrage::ScanOutcome;

/// Counters over every cycle the scanner started.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stats {
    pub cycles: u64,
    pub opportunities: u64,
    pub below_threshold: u64,
    pub no_opportunity: u64,
    pub empty: u64,
    /// Cycles superseded by a newer one before they finished.
    pub stale: u64,
}

impl Stats {
    /// Counts a cycle that produced an outcome.
    pub fn record(&mut self, outcome: &ScanOutcome) {
        match outcome {
            ScanOutcome::Opportunity(_) => self.opportunities += 1,
            ScanOutcome::BelowThreshold(_) => self.below_threshold += 1,
            ScanOutcome::NoOpportunity => self.no_opportunity += 1,
            ScanOutcome::EmptyQuoteSet => self.empty += 1,
        }
    }

    /// Cycles that produced an outcome.
    pub fn completed(&self) -> u64 {
        self.opportunities + self.below_threshold + self.no_opportunity + self.empty
    }
}
