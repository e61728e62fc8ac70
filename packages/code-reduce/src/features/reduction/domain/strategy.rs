//! Strategy catalogue
//!
//! A closed set of fragment categories. The driver iterates them in order;
//! each run is dispatched by `match`, never through a trait object.

use serde::{Deserialize, Serialize};

use crate::features::parsing::SyntaxKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Subprogram bodies, together with their declarations in companion files
    Subprograms,
    /// Type, class and constant declarations
    Declarations,
    /// Statements inside bodies and blocks
    Statements,
    /// Import / use clauses
    Imports,
    /// Comments
    Comments,
}

impl Strategy {
    /// Default order
    pub const ALL: [Strategy; 5] = [
        Strategy::Subprograms,
        Strategy::Declarations,
        Strategy::Statements,
        Strategy::Imports,
        Strategy::Comments,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Subprograms => "subprograms",
            Self::Declarations => "declarations",
            Self::Statements => "statements",
            Self::Imports => "imports",
            Self::Comments => "comments",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "subprograms" | "subprogram" => Some(Self::Subprograms),
            "declarations" | "declaration" => Some(Self::Declarations),
            "statements" | "statement" => Some(Self::Statements),
            "imports" | "import" => Some(Self::Imports),
            "comments" | "comment" => Some(Self::Comments),
            _ => None,
        }
    }

    /// Fragment category this strategy scans for
    pub fn category(&self) -> SyntaxKind {
        match self {
            Self::Subprograms => SyntaxKind::Subprogram,
            Self::Declarations => SyntaxKind::Declaration,
            Self::Statements => SyntaxKind::Statement,
            Self::Imports => SyntaxKind::Import,
            Self::Comments => SyntaxKind::Comment,
        }
    }

    /// Chunks carry a cross-file declaration link
    pub fn links_declarations(&self) -> bool {
        matches!(self, Self::Subprograms)
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
