//! Hierarchical delta debugging over a reduction forest
//!
//! Per level:
//! 1. Try removing the whole level at once.
//! 2. On rejection split the list in half (left half first) and repeat on
//!    each half, down to single nodes.
//! 3. A single node that cannot go is kept, and the search descends into
//!    its children.
//!
//! Step 1 for a singleton is the per-node trial, so a level of one node costs
//! exactly one oracle call before descending. Splitting always cuts at
//! `len / 2`, which makes runs on identical input reproducible.

use tracing::{debug, trace, warn};

use crate::errors::Result;
use crate::features::reduction::domain::{NodeId, ReductionTree};

use super::context::ReductionContext;

pub struct DichotomySearch<'t> {
    tree: &'t mut ReductionTree,
    removed: usize,
}

impl<'t> DichotomySearch<'t> {
    pub fn new(tree: &'t mut ReductionTree) -> Self {
        Self { tree, removed: 0 }
    }

    /// Reduce the whole forest. Returns the number of chunks whose removal was
    /// accepted (nested chunks removed along with an ancestor are not counted).
    pub fn run(mut self, ctx: &mut ReductionContext<'_>) -> Result<usize> {
        let roots = self.tree.roots().to_vec();
        self.reduce_level(ctx, &roots)?;
        Ok(self.removed)
    }

    fn reduce_level(&mut self, ctx: &mut ReductionContext<'_>, level: &[NodeId]) -> Result<()> {
        if level.is_empty() {
            return Ok(());
        }
        trace!(nodes = level.len(), "reducing level");

        let survivors = self.partition(ctx, level)?;
        for id in survivors {
            let children = self.tree.children(id).to_vec();
            self.reduce_level(ctx, &children)?;
        }
        Ok(())
    }

    /// Nodes of `ids` that could not be removed, in source order
    fn partition(&mut self, ctx: &mut ReductionContext<'_>, ids: &[NodeId]) -> Result<Vec<NodeId>> {
        if self.trial(ctx, ids)? {
            return Ok(Vec::new());
        }
        if ids.len() == 1 {
            return Ok(ids.to_vec());
        }

        let (left, right) = ids.split_at(ids.len() / 2);
        let mut survivors = self.partition(ctx, left)?;
        survivors.extend(self.partition(ctx, right)?);
        Ok(survivors)
    }

    /// Remove `ids` together, consult the oracle, then commit or roll back.
    ///
    /// Never returns with an edit in flight: every error path restores the
    /// chunks touched so far before propagating.
    fn trial(&mut self, ctx: &mut ReductionContext<'_>, ids: &[NodeId]) -> Result<bool> {
        ctx.ensure_not_cancelled()?;

        let mut touched = Vec::with_capacity(ids.len());
        for &id in ids {
            touched.push(id);
            if let Err(e) = self.tree.chunk_mut(id).remove(ctx.buffers) {
                self.rollback(ctx, &touched)?;
                return Err(e);
            }
        }

        let passed = match ctx.probe() {
            Ok(passed) => passed,
            Err(e) => {
                self.rollback(ctx, &touched)?;
                // Put the last accepted state back on disk
                if let Err(restore) = ctx.buffers.save_all() {
                    warn!(error = %restore, "could not restore last accepted state; files on disk may differ");
                }
                return Err(e);
            }
        };

        if passed {
            for &id in ids {
                self.tree.chunk_mut(id).commit();
            }
            ctx.stats.accepted += 1;
            ctx.stats.removed_chunks += ids.len();
            self.removed += ids.len();
            debug!(chunks = ids.len(), "removal accepted");
        } else {
            self.rollback(ctx, &touched)?;
            ctx.stats.rejected += 1;
            trace!(chunks = ids.len(), "removal rejected");
        }
        Ok(passed)
    }

    fn rollback(&mut self, ctx: &mut ReductionContext<'_>, touched: &[NodeId]) -> Result<()> {
        for &id in touched.iter().rev() {
            self.tree.chunk_mut(id).restore(ctx.buffers)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{OracleError, ReduceError};
    use crate::features::buffer::BufferSet;
    use crate::features::parsing::{SyntaxKind, TreeSitterFrontend};
    use crate::features::reduction::domain::{Chunk, SearchStats};
    use crate::shared::models::Span;
    use crate::shared::CancelFlag;
    use pretty_assertions::assert_eq;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    /// Writes one word per line and returns a statement chunk per line
    fn line_file(dir: &TempDir, words: &[&str]) -> (PathBuf, Vec<Chunk>) {
        let path = dir.path().join("items.txt");
        fs::write(&path, format!("{}\n", words.join("\n"))).unwrap();
        let chunks = words
            .iter()
            .enumerate()
            .map(|(i, w)| {
                let line = i as u32 + 1;
                Chunk::new(&path, Span::new(line, 0, line, w.len() as u32), SyntaxKind::Statement)
            })
            .collect();
        (path, chunks)
    }

    fn words_on_disk(path: &Path) -> Vec<String> {
        fs::read_to_string(path)
            .unwrap()
            .split_whitespace()
            .map(str::to_string)
            .collect()
    }

    fn search<O>(chunks: Vec<Chunk>, cancel: &CancelFlag, mut oracle: O) -> Result<(usize, SearchStats, BufferSet)>
    where
        O: FnMut(&Path) -> std::result::Result<bool, OracleError>,
    {
        let workdir = tempfile::tempdir().unwrap();
        let frontend = TreeSitterFrontend::new();
        let mut buffers = BufferSet::new();
        let mut tree = ReductionTree::build(chunks)?;

        let mut ctx = ReductionContext::new(&mut buffers, &frontend, &mut oracle, workdir.path(), cancel);
        let removed = DichotomySearch::new(&mut tree).run(&mut ctx)?;
        let stats = ctx.stats;
        Ok((removed, stats, buffers))
    }

    #[test]
    fn test_everything_removable_costs_one_trial() {
        let dir = tempfile::tempdir().unwrap();
        let (path, chunks) = line_file(&dir, &["a", "b", "c", "d"]);

        let (removed, stats, _) = search(chunks, &CancelFlag::new(), |_: &Path| Ok(true)).unwrap();

        assert_eq!(removed, 4);
        assert_eq!(stats.trials, 1);
        assert!(words_on_disk(&path).is_empty());
    }

    #[test]
    fn test_bisection_keeps_only_the_needed_chunk() {
        let dir = tempfile::tempdir().unwrap();
        let (path, chunks) = line_file(&dir, &["a", "b", "bug", "c", "d"]);
        let probe = path.clone();

        let (removed, stats, _) = search(chunks, &CancelFlag::new(), move |_: &Path| {
            Ok(fs::read_to_string(&probe).unwrap().contains("bug"))
        })
        .unwrap();

        // all, [a b] ok, [bug c d], [bug], [c d] ok
        assert_eq!(removed, 4);
        assert_eq!(stats.trials, 5);
        assert_eq!(stats.accepted, 2);
        assert_eq!(stats.rejected, 3);
        assert_eq!(words_on_disk(&path), vec!["bug"]);
        // line structure survives blanking
        assert_eq!(fs::read_to_string(&path).unwrap().lines().count(), 5);
    }

    #[test]
    fn test_descends_into_children_of_kept_node() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested.txt");
        fs::write(&path, "outer {\nkeep\ndrop\n}\n").unwrap();
        let chunks = vec![
            Chunk::new(&path, Span::new(1, 0, 4, 1), SyntaxKind::Statement),
            Chunk::new(&path, Span::new(2, 0, 2, 4), SyntaxKind::Statement),
            Chunk::new(&path, Span::new(3, 0, 3, 4), SyntaxKind::Statement),
        ];
        let probe = path.clone();

        let (removed, stats, _) = search(chunks, &CancelFlag::new(), move |_: &Path| {
            Ok(fs::read_to_string(&probe).unwrap().contains("keep"))
        })
        .unwrap();

        // [outer], [keep drop], [keep], [drop] ok
        assert_eq!(removed, 1);
        assert_eq!(stats.trials, 4);
        assert_eq!(words_on_disk(&path), vec!["outer", "{", "keep", "}"]);
    }

    #[test]
    fn test_oracle_errors_keep_everything() {
        let dir = tempfile::tempdir().unwrap();
        let (path, chunks) = line_file(&dir, &["a", "b"]);

        let (removed, stats, buffers) = search(chunks, &CancelFlag::new(), |_: &Path| {
            Err(OracleError::Other("no compiler".into()))
        })
        .unwrap();

        assert_eq!(removed, 0);
        assert_eq!(stats.trials, 3);
        assert_eq!(stats.oracle_errors, 3);
        assert_eq!(buffers.get(&path).unwrap().text(), "a\nb\n");
    }

    #[test]
    fn test_cancelled_before_first_trial() {
        let dir = tempfile::tempdir().unwrap();
        let (path, chunks) = line_file(&dir, &["a", "b"]);
        let cancel = CancelFlag::new();
        cancel.cancel();

        let err = search(chunks, &cancel, |_: &Path| Ok(true)).unwrap_err();

        assert!(matches!(err, ReduceError::Cancelled));
        assert_eq!(fs::read_to_string(&path).unwrap(), "a\nb\n");
    }

    #[test]
    fn test_range_error_escalates_after_rollback() {
        let dir = tempfile::tempdir().unwrap();
        let (path, mut chunks) = line_file(&dir, &["a", "b"]);
        chunks.push(Chunk::new(&path, Span::new(9, 0, 9, 1), SyntaxKind::Statement));

        let err = search(chunks, &CancelFlag::new(), |_: &Path| Ok(true)).unwrap_err();

        assert!(err.is_invariant_violation());
        assert_eq!(fs::read_to_string(&path).unwrap(), "a\nb\n");
    }
}
