//! Source location types
//!
//! Lines are 1-based, columns are 0-based byte offsets (tree-sitter convention).
//! A span's end column is exclusive on its end line.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Single location in source code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Location {
    pub line: u32,
    pub column: u32,
}

impl Location {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

/// Span in source code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start_line: u32,
    pub start_col: u32,
    pub end_line: u32,
    pub end_col: u32,
}

impl Span {
    pub fn new(start_line: u32, start_col: u32, end_line: u32, end_col: u32) -> Self {
        Self {
            start_line,
            start_col,
            end_line,
            end_col,
        }
    }

    /// Create a zero span (0:0-0:0)
    pub fn zero() -> Self {
        Self::new(0, 0, 0, 0)
    }

    pub fn start(&self) -> Location {
        Location::new(self.start_line, self.start_col)
    }

    pub fn end(&self) -> Location {
        Location::new(self.end_line, self.end_col)
    }

    /// Start does not come after end
    pub fn is_well_formed(&self) -> bool {
        self.start() <= self.end()
    }

    pub fn contains_line(&self, line: u32) -> bool {
        self.start_line <= line && line <= self.end_line
    }

    /// `other` lies entirely within `self` (inclusive endpoints)
    pub fn contains(&self, other: &Span) -> bool {
        self.start() <= other.start() && other.end() <= self.end()
    }

    /// The spans share at least one position without either containing the other.
    pub fn overlaps_without_nesting(&self, other: &Span) -> bool {
        let disjoint = self.end() <= other.start() || other.end() <= self.start();
        !disjoint && !self.contains(other) && !other.contains(self)
    }

    pub fn line_count(&self) -> u32 {
        if self.end_line >= self.start_line {
            self.end_line - self.start_line + 1
        } else {
            0
        }
    }

    /// Same span with its start moved back to `start`
    pub fn with_start(mut self, start: Location) -> Self {
        self.start_line = start.line;
        self.start_col = start.column;
        self
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}-{}:{}",
            self.start_line, self.start_col, self.end_line, self.end_col
        )
    }
}

impl Default for Span {
    fn default() -> Self {
        Self::zero()
    }
}
