//! One strategy run: scan, build, search

use std::path::PathBuf;

use tracing::{debug, info};

use crate::errors::Result;
use crate::features::reduction::domain::{Chunk, ReductionTree, SearchStats, Strategy};

use super::context::ReductionContext;
use super::dichotomy::DichotomySearch;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrategyOutcome {
    pub strategy: Strategy,
    /// Candidate chunks found by the scan
    pub chunks: usize,
    /// Chunks whose removal was accepted
    pub removed: usize,
    pub stats: SearchStats,
}

impl StrategyOutcome {
    pub fn reduced(&self) -> bool {
        self.removed > 0
    }
}

/// Scan `files` for the strategy's category in the current buffer state,
/// build a fresh tree and reduce it.
///
/// Search counters in the outcome are the ones accumulated in `ctx` during
/// this call.
pub fn run_strategy(strategy: Strategy, files: &[PathBuf], ctx: &mut ReductionContext<'_>) -> Result<StrategyOutcome> {
    let before = ctx.stats;
    let category = strategy.category();

    // Companion files are resolved from disk
    ctx.buffers.save_all()?;

    let mut chunks = Vec::new();
    for file in files {
        let text = ctx.buffers.get_or_load(file)?.text();
        let parsed = ctx.frontend.parse(file, &text)?;
        if parsed.has_errors {
            debug!(file = %file.display(), errors = parsed.errors.len(), "scanning a tree with syntax errors");
        }

        let nodes = parsed.fragments(&category);
        let links = if strategy.links_declarations() {
            ctx.frontend.resolve_declarations(file, &nodes)
        } else {
            vec![None; nodes.len()]
        };

        chunks.extend(
            nodes
                .iter()
                .zip(links)
                .map(|(node, link)| Chunk::from_node(file, node).with_link(link)),
        );
    }

    let total = chunks.len();
    if total == 0 {
        debug!(strategy = %strategy, "nothing to reduce");
        return Ok(StrategyOutcome {
            strategy,
            chunks: 0,
            removed: 0,
            stats: SearchStats::default(),
        });
    }

    let mut tree = ReductionTree::build(chunks)?;
    debug!(strategy = %strategy, chunks = total, depth = tree.depth(), "reduction tree built");

    let removed = DichotomySearch::new(&mut tree).run(ctx)?;
    ctx.buffers.save_all()?;

    let stats = ctx.stats.since(&before);
    info!(strategy = %strategy, chunks = total, removed, trials = stats.trials, "strategy finished");

    Ok(StrategyOutcome {
        strategy,
        chunks: total,
        removed,
        stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::OracleError;
    use crate::features::buffer::BufferSet;
    use crate::features::parsing::TreeSitterFrontend;
    use crate::shared::CancelFlag;
    use pretty_assertions::assert_eq;
    use std::fs;
    use std::path::Path;

    #[test]
    fn test_statements_reduced_to_the_needed_one() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("m.py");
        fs::write(&file, "def f():\n    a = 1\n    b = 2\n    boom()\n    return 0\n").unwrap();

        let mut buffers = BufferSet::new();
        let frontend = TreeSitterFrontend::new();
        let cancel = CancelFlag::new();
        let probe = file.clone();
        let mut oracle =
            move |_: &Path| -> std::result::Result<bool, OracleError> { Ok(fs::read_to_string(&probe).unwrap().contains("boom()")) };

        let mut ctx = ReductionContext::new(&mut buffers, &frontend, &mut oracle, dir.path(), &cancel);
        let outcome = run_strategy(Strategy::Statements, &[file.clone()], &mut ctx).unwrap();

        assert_eq!(outcome.chunks, 4);
        assert_eq!(outcome.removed, 3);
        assert!(outcome.reduced());
        let text = fs::read_to_string(&file).unwrap();
        assert!(text.contains("def f():"));
        assert!(text.contains("boom()"));
        assert!(!text.contains("return"));
        assert_eq!(text.lines().count(), 5);
    }

    #[test]
    fn test_no_candidates_is_not_a_reduction() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("m.py");
        fs::write(&file, "x = 1\n").unwrap();

        let mut buffers = BufferSet::new();
        let frontend = TreeSitterFrontend::new();
        let cancel = CancelFlag::new();
        let mut oracle = |_: &Path| -> std::result::Result<bool, OracleError> { Ok(true) };

        let mut ctx = ReductionContext::new(&mut buffers, &frontend, &mut oracle, dir.path(), &cancel);
        let outcome = run_strategy(Strategy::Subprograms, &[file], &mut ctx).unwrap();

        assert_eq!(outcome.chunks, 0);
        assert!(!outcome.reduced());
        assert_eq!(ctx.stats.trials, 0);
    }
}
