//! Shared state threaded through one strategy run

use std::path::Path;

use tracing::{debug, warn};

use crate::errors::{ReduceError, Result};
use crate::features::buffer::BufferSet;
use crate::features::parsing::Frontend;
use crate::features::reduction::domain::SearchStats;
use crate::features::reduction::ports::Oracle;
use crate::shared::CancelFlag;

/// Borrowed handles for one strategy run.
///
/// The driver owns the buffers and the oracle; everything below it borrows
/// them through this context, one trial at a time.
pub struct ReductionContext<'a> {
    pub buffers: &'a mut BufferSet,
    pub frontend: &'a dyn Frontend,
    pub oracle: &'a mut dyn Oracle,
    pub workdir: &'a Path,
    pub cancel: &'a CancelFlag,
    pub stats: SearchStats,
}

impl<'a> ReductionContext<'a> {
    pub fn new(
        buffers: &'a mut BufferSet,
        frontend: &'a dyn Frontend,
        oracle: &'a mut dyn Oracle,
        workdir: &'a Path,
        cancel: &'a CancelFlag,
    ) -> Self {
        Self {
            buffers,
            frontend,
            oracle,
            workdir,
            cancel,
            stats: SearchStats::default(),
        }
    }

    pub fn ensure_not_cancelled(&self) -> Result<()> {
        if self.cancel.is_cancelled() {
            return Err(ReduceError::Cancelled);
        }
        Ok(())
    }

    /// Flush every dirty buffer and ask the oracle.
    ///
    /// Oracle failures count as "property lost"; only a failed flush is an
    /// error here.
    pub fn probe(&mut self) -> Result<bool> {
        self.buffers.save_all()?;
        self.stats.trials += 1;

        match self.oracle.check(self.workdir) {
            Ok(passed) => {
                debug!(trial = self.stats.trials, passed, "oracle verdict");
                Ok(passed)
            }
            Err(e) => {
                self.stats.oracle_errors += 1;
                warn!(trial = self.stats.trials, error = %e, "oracle failed to run, treating as rejection");
                Ok(false)
            }
        }
    }
}
