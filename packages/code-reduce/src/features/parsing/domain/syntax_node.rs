//! Language-neutral syntax node representation
//!
//! Abstracts tree-sitter nodes for use by the reduction strategies.

use crate::shared::models::Span;

/// Reduction category of a syntax node
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SyntaxKind {
    /// Function / method / procedure bodies
    Subprogram,
    /// Type, class and constant declarations
    Declaration,
    /// Statements inside bodies and blocks
    Statement,
    /// Import / use / with clauses
    Import,
    /// Comments
    Comment,

    // Unknown/Other
    Other(String),
}

impl SyntaxKind {
    /// Categories that open a naming scope for nested fragments
    pub fn is_scope(&self) -> bool {
        matches!(self, SyntaxKind::Subprogram | SyntaxKind::Declaration)
    }

    pub fn is_reducible(&self) -> bool {
        !matches!(self, SyntaxKind::Other(_))
    }
}

/// Language-neutral syntax node
#[derive(Debug, Clone)]
pub struct SyntaxNode {
    pub kind: SyntaxKind,
    pub span: Span,
    pub children: Vec<SyntaxNode>,

    /// Original tree-sitter kind
    pub raw_kind: String,

    /// Declared name, for named fragments
    pub name: Option<String>,

    /// Name qualified by enclosing named fragments (`Outer.inner`)
    pub qualified_name: Option<String>,
}

impl SyntaxNode {
    pub fn new(kind: SyntaxKind, span: Span) -> Self {
        Self {
            kind,
            span,
            children: Vec::new(),
            raw_kind: String::new(),
            name: None,
            qualified_name: None,
        }
    }

    pub fn with_children(mut self, children: Vec<SyntaxNode>) -> Self {
        self.children = children;
        self
    }

    pub fn with_raw_kind(mut self, raw_kind: impl Into<String>) -> Self {
        self.raw_kind = raw_kind.into();
        self
    }

    pub fn with_name(mut self, name: impl Into<String>, qualified_name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self.qualified_name = Some(qualified_name.into());
        self
    }

    /// Find first child of given kind
    pub fn find_child(&self, kind: &SyntaxKind) -> Option<&SyntaxNode> {
        self.children.iter().find(|c| &c.kind == kind)
    }

    /// All descendants (self included) of the given kind, in pre-order
    pub fn collect<'a>(&'a self, kind: &SyntaxKind, out: &mut Vec<&'a SyntaxNode>) {
        if &self.kind == kind {
            out.push(self);
        }
        for child in &self.children {
            child.collect(kind, out);
        }
    }
}
