//! Run statistics

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Trial counters, accumulated over a whole run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Oracle invocations
    pub trials: usize,
    /// Trials whose removal was kept
    pub accepted: usize,
    /// Trials whose removal was rolled back
    pub rejected: usize,
    /// Oracle infrastructure failures (counted as rejections too)
    pub oracle_errors: usize,
    /// Chunks removed by accepted trials
    pub removed_chunks: usize,
}

impl SearchStats {
    /// Counters accumulated since the `earlier` snapshot
    pub fn since(&self, earlier: &SearchStats) -> SearchStats {
        SearchStats {
            trials: self.trials.saturating_sub(earlier.trials),
            accepted: self.accepted.saturating_sub(earlier.accepted),
            rejected: self.rejected.saturating_sub(earlier.rejected),
            oracle_errors: self.oracle_errors.saturating_sub(earlier.oracle_errors),
            removed_chunks: self.removed_chunks.saturating_sub(earlier.removed_chunks),
        }
    }
}

/// Summary of a complete reduction run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReductionReport {
    /// Driver passes executed, including the final one that removed nothing
    pub passes: usize,
    pub trials: usize,
    pub accepted: usize,
    pub rejected: usize,
    pub oracle_errors: usize,
    /// Removed chunks per strategy name
    pub removed_by_strategy: BTreeMap<String, usize>,
    /// Files whose whitespace tidy was accepted
    pub tidied_files: Vec<PathBuf>,
    /// Non-whitespace bytes across the target files
    pub size_before: usize,
    pub size_after: usize,
    /// Outcome of the closing oracle check, when one was run
    pub final_verified: Option<bool>,
}

impl ReductionReport {
    /// Add search counters to the run totals
    pub fn absorb(&mut self, stats: &SearchStats) {
        self.trials += stats.trials;
        self.accepted += stats.accepted;
        self.rejected += stats.rejected;
        self.oracle_errors += stats.oracle_errors;
    }

    pub fn record_strategy(&mut self, strategy: &str, removed: usize) {
        *self.removed_by_strategy.entry(strategy.to_string()).or_insert(0) += removed;
    }

    pub fn removed_chunks(&self) -> usize {
        self.removed_by_strategy.values().sum()
    }

    /// Anything at all was taken out of the input
    pub fn reduced(&self) -> bool {
        self.removed_chunks() > 0 || !self.tidied_files.is_empty()
    }

    /// Fraction of non-whitespace content removed, 0.0 for empty input
    pub fn reduction_ratio(&self) -> f64 {
        if self.size_before == 0 {
            return 0.0;
        }
        1.0 - self.size_after as f64 / self.size_before as f64
    }
}
