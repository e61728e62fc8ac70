//! Whitespace tidy after the fixpoint
//!
//! Blanking leaves runs of whitespace-only lines behind. The tidy pass
//! rewrites each file without them and keeps the result only if the oracle
//! still passes, since some checkers are sensitive to line numbers.

use std::path::Path;

use tracing::{debug, warn};

use crate::errors::Result;

use super::context::ReductionContext;

/// Strip trailing whitespace, collapse blank runs to one line and drop
/// leading and trailing blank lines.
pub fn tidy_lines(lines: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    for line in lines {
        let trimmed = line.trim_end();
        let blank = trimmed.is_empty();
        if blank && out.last().map_or(true, |prev| prev.is_empty()) {
            continue;
        }
        out.push(trimmed.to_string());
    }
    while out.last().is_some_and(|l| l.is_empty()) {
        out.pop();
    }
    out
}

/// Try the tidied form of `file`; returns whether it was kept.
pub fn tidy_file(ctx: &mut ReductionContext<'_>, file: &Path) -> Result<bool> {
    ctx.ensure_not_cancelled()?;

    let buffer = ctx.buffers.get_or_load(file)?;
    let tidied = tidy_lines(buffer.lines());
    if tidied.as_slice() == buffer.lines() {
        return Ok(false);
    }
    let span = buffer.full_span();

    let edit = ctx.buffers.replace(file, span, tidied)?;
    let passed = match ctx.probe() {
        Ok(passed) => passed,
        Err(e) => {
            ctx.buffers.revert(edit)?;
            // Put the last accepted state back on disk
            if let Err(restore) = ctx.buffers.save_all() {
                warn!(error = %restore, "could not restore last accepted state; files on disk may differ");
            }
            return Err(e);
        }
    };

    if passed {
        ctx.stats.accepted += 1;
        debug!(file = %file.display(), "tidy accepted");
    } else {
        ctx.buffers.revert(edit)?;
        ctx.stats.rejected += 1;
        debug!(file = %file.display(), "tidy rejected");
    }
    Ok(passed)
}
