//! Front-end port
//!
//! The reduction core consumes parsing and cross-file resolution only through
//! this trait.

use std::path::Path;

use crate::errors::Result;
use crate::features::parsing::domain::{DeclarationLink, ParsedTree, SyntaxNode};

pub trait Frontend {
    /// Parse the current content of `path` into a categorized tree.
    ///
    /// Called again after every accepted reduction, so implementations must
    /// not cache by path alone.
    fn parse(&self, path: &Path, source: &str) -> Result<ParsedTree>;

    /// Check if this front-end can handle the file
    fn supports(&self, path: &Path) -> bool;

    /// Declaration of each node in another file, or `None` when unresolved.
    ///
    /// Reads the other file from disk; callers flush buffers first.
    fn resolve_declarations(&self, path: &Path, nodes: &[&SyntaxNode]) -> Vec<Option<DeclarationLink>> {
        let _ = path;
        vec![None; nodes.len()]
    }
}
