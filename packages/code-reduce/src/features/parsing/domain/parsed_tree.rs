//! Parsed tree representation
//!
//! Abstracts the parsed AST for the reduction strategies.

use std::path::PathBuf;

use super::syntax_node::{SyntaxKind, SyntaxNode};
use crate::shared::models::Span;

/// Parsed syntax tree
#[derive(Debug, Clone)]
pub struct ParsedTree {
    /// Root node of the tree
    pub root: SyntaxNode,

    /// File path (for error messages and chunk ownership)
    pub file_path: PathBuf,

    /// Language
    pub language: String,

    /// Whether parsing had errors
    pub has_errors: bool,

    /// Parse errors (if any)
    pub errors: Vec<ParseError>,
}

/// Parse error
#[derive(Debug, Clone)]
pub struct ParseError {
    pub message: String,
    pub span: Span,
}

impl ParsedTree {
    pub fn new(root: SyntaxNode, file_path: impl Into<PathBuf>, language: impl Into<String>) -> Self {
        Self {
            root,
            file_path: file_path.into(),
            language: language.into(),
            has_errors: false,
            errors: Vec::new(),
        }
    }

    pub fn with_errors(mut self, errors: Vec<ParseError>) -> Self {
        self.has_errors = !errors.is_empty();
        self.errors = errors;
        self
    }

    /// Every node of one reduction category, in source order
    pub fn fragments(&self, kind: &SyntaxKind) -> Vec<&SyntaxNode> {
        let mut out = Vec::new();
        self.root.collect(kind, &mut out);
        out
    }

    /// First node of `kind` whose qualified name is `qualified_name`
    pub fn find_named(&self, kind: &SyntaxKind, qualified_name: &str) -> Option<&SyntaxNode> {
        self.fragments(kind)
            .into_iter()
            .find(|n| n.qualified_name.as_deref() == Some(qualified_name))
    }
}
