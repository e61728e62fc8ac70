//! Reduction driver
//!
//! Owns the buffer set for the run and repeats the configured strategy list
//! until a whole pass removes nothing.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::config::ReduceConfig;
use crate::errors::{ReduceError, Result};
use crate::features::buffer::BufferSet;
use crate::features::parsing::Frontend;
use crate::features::reduction::domain::ReductionReport;
use crate::features::reduction::ports::Oracle;
use crate::shared::CancelFlag;

use super::context::ReductionContext;
use super::strategy::run_strategy;
use super::tidy::tidy_file;

pub struct Reducer<F: Frontend, O: Oracle> {
    frontend: F,
    oracle: O,
    config: ReduceConfig,
    workdir: PathBuf,
    cancel: CancelFlag,
}

impl<F: Frontend, O: Oracle> Reducer<F, O> {
    pub fn new(frontend: F, oracle: O, config: ReduceConfig) -> Self {
        Self {
            frontend,
            oracle,
            config,
            workdir: PathBuf::from("."),
            cancel: CancelFlag::new(),
        }
    }

    /// Directory the oracle runs in
    pub fn with_workdir(mut self, workdir: impl Into<PathBuf>) -> Self {
        self.workdir = workdir.into();
        self
    }

    pub fn with_cancel(mut self, cancel: CancelFlag) -> Self {
        self.cancel = cancel;
        self
    }

    /// Handle for interrupting the run from another thread
    pub fn cancel_flag(&self) -> CancelFlag {
        self.cancel.clone()
    }

    pub fn config(&self) -> &ReduceConfig {
        &self.config
    }

    /// Reduce `files` in place.
    ///
    /// Whatever happens, the files on disk are left at the last state the
    /// oracle accepted.
    pub fn run(&mut self, files: &[PathBuf]) -> Result<ReductionReport> {
        if files.is_empty() {
            return Err(ReduceError::parse_error("no input files"));
        }
        if let Some(unsupported) = files.iter().find(|f| !self.frontend.supports(f)) {
            return Err(ReduceError::parse_error(format!(
                "unsupported language: {}",
                unsupported.display()
            )));
        }

        let mut buffers = BufferSet::new();
        for file in files {
            buffers.get_or_load(file)?;
        }

        let mut report = ReductionReport::default();
        let outcome = self.reduce(&mut buffers, files, &mut report);
        let saved = buffers.save_all();
        outcome?;
        saved?;

        info!(
            passes = report.passes,
            trials = report.trials,
            removed = report.removed_chunks(),
            size_before = report.size_before,
            size_after = report.size_after,
            "reduction finished"
        );
        Ok(report)
    }

    fn reduce(&mut self, buffers: &mut BufferSet, files: &[PathBuf], report: &mut ReductionReport) -> Result<()> {
        report.size_before = target_size(buffers, files);

        let mut ctx = ReductionContext::new(buffers, &self.frontend, &mut self.oracle, &self.workdir, &self.cancel);

        ctx.ensure_not_cancelled()?;
        let reproduces = ctx.probe()?;
        if !reproduces {
            report.absorb(&ctx.stats);
            return Err(ReduceError::OracleNeverSatisfied);
        }

        loop {
            report.passes += 1;
            let mut removed_this_pass = 0;

            for &strategy in &self.config.strategies {
                let outcome = run_strategy(strategy, files, &mut ctx)?;
                report.record_strategy(strategy.name(), outcome.removed);
                removed_this_pass += outcome.removed;
            }
            info!(pass = report.passes, removed = removed_this_pass, "pass finished");

            if removed_this_pass == 0 {
                break;
            }
            if self.config.max_passes != 0 && report.passes >= self.config.max_passes {
                info!(max_passes = self.config.max_passes, "pass limit reached before fixpoint");
                break;
            }
        }

        if self.config.tidy {
            for file in files {
                if tidy_file(&mut ctx, file)? {
                    report.tidied_files.push(file.clone());
                }
            }
        }

        if self.config.verify_final {
            ctx.ensure_not_cancelled()?;
            let verified = ctx.probe()?;
            if !verified {
                warn!("oracle no longer passes on the reduced output");
            }
            report.final_verified = Some(verified);
        }

        report.absorb(&ctx.stats);
        report.size_after = target_size(ctx.buffers, files);
        Ok(())
    }
}

fn target_size(buffers: &BufferSet, files: &[PathBuf]) -> usize {
    files
        .iter()
        .filter_map(|f| buffers.get(Path::new(f)))
        .map(|b| b.content_size())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Preset;
    use crate::errors::OracleError;
    use crate::features::parsing::TreeSitterFrontend;
    use crate::features::reduction::domain::Strategy;
    use std::fs;

    fn config() -> ReduceConfig {
        ReduceConfig::preset(Preset::Balanced).with_command("unused")
    }

    #[test]
    fn test_oracle_never_satisfied_leaves_files_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("m.py");
        let original = "def f():\n    return 1\n";
        fs::write(&file, original).unwrap();

        let oracle = |_: &Path| -> std::result::Result<bool, OracleError> { Ok(false) };
        let mut reducer = Reducer::new(TreeSitterFrontend::new(), oracle, config()).with_workdir(dir.path());

        let err = reducer.run(&[file.clone()]).unwrap_err();
        assert!(matches!(err, ReduceError::OracleNeverSatisfied));
        assert_eq!(fs::read_to_string(&file).unwrap(), original);
    }

    #[test]
    fn test_unsupported_file_rejected_before_any_trial() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("notes.txt");
        fs::write(&file, "hello\n").unwrap();

        let mut calls = 0;
        let oracle = |_: &Path| -> std::result::Result<bool, OracleError> {
            calls += 1;
            Ok(true)
        };
        let mut reducer = Reducer::new(TreeSitterFrontend::new(), oracle, config());

        assert!(matches!(reducer.run(&[file]), Err(ReduceError::Parse(_))));
        drop(reducer);
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_everything_removable_reaches_empty_fixpoint() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("m.py");
        fs::write(&file, "import os\n\nclass A:\n    x = 1\n\ndef f():\n    return 1\n").unwrap();

        let oracle = |_: &Path| -> std::result::Result<bool, OracleError> { Ok(true) };
        let mut reducer = Reducer::new(TreeSitterFrontend::new(), oracle, config()).with_workdir(dir.path());
        let report = reducer.run(&[file.clone()]).unwrap();

        assert!(report.reduced());
        assert_eq!(report.size_after, 0);
        assert_eq!(report.passes, 2);
        assert_eq!(report.final_verified, Some(true));
        assert_eq!(fs::read_to_string(&file).unwrap(), "\n");
    }

    #[test]
    fn test_max_passes_caps_the_loop() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("m.py");
        fs::write(&file, "def f():\n    return 1\n").unwrap();

        let oracle = |_: &Path| -> std::result::Result<bool, OracleError> { Ok(true) };
        let config = config().with_max_passes(1).with_strategies(vec![Strategy::Subprograms]);
        let mut reducer = Reducer::new(TreeSitterFrontend::new(), oracle, config).with_workdir(dir.path());
        let report = reducer.run(&[file]).unwrap();

        assert_eq!(report.passes, 1);
        assert_eq!(report.removed_by_strategy["subprograms"], 1);
    }

    #[test]
    fn test_cancelled_run_returns_cancelled() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("m.py");
        let original = "def f():\n    return 1\n";
        fs::write(&file, original).unwrap();

        let cancel = CancelFlag::new();
        cancel.cancel();
        let oracle = |_: &Path| -> std::result::Result<bool, OracleError> { Ok(true) };
        let mut reducer = Reducer::new(TreeSitterFrontend::new(), oracle, config())
            .with_workdir(dir.path())
            .with_cancel(cancel);

        assert!(matches!(reducer.run(&[file.clone()]), Err(ReduceError::Cancelled)));
        assert_eq!(fs::read_to_string(&file).unwrap(), original);
    }

    #[test]
    fn test_flush_failure_aborts_with_last_accepted_state() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.py");
        let b = dir.path().join("b.py");
        fs::write(&a, "def a1():\n    pass\n\ndef a2():\n    pass\n").unwrap();
        fs::write(&b, "def b1():\n    pass\n").unwrap();

        // 1: initial check, 2: whole level rejected, 3: `a1` accepted and
        // b.py turns into a directory, so the next flush fails
        let mut calls = 0;
        let target = b.clone();
        let oracle = move |_: &Path| -> std::result::Result<bool, OracleError> {
            calls += 1;
            if calls == 3 {
                fs::remove_file(&target).unwrap();
                fs::create_dir(&target).unwrap();
            }
            Ok(calls != 2)
        };
        let config = config().with_strategies(vec![Strategy::Subprograms]);
        let mut reducer = Reducer::new(TreeSitterFrontend::new(), oracle, config).with_workdir(dir.path());

        let err = reducer.run(&[a.clone(), b.clone()]).unwrap_err();
        assert!(matches!(err, ReduceError::Io { ref path, .. } if path == &b));

        let kept = fs::read_to_string(&a).unwrap();
        assert!(!kept.contains("def a1"));
        assert!(kept.contains("def a2():\n    pass\n"));
        assert!(b.is_dir());
    }
}
