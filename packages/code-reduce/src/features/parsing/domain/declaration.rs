//! Cross-file declaration reference

use std::path::PathBuf;

use crate::shared::models::Span;

/// Non-owning lookup of a fragment's declaration in another file.
///
/// The declaration's buffer belongs to the buffer set; a link is only a path
/// and a range, resolved by the front-end when chunks are built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationLink {
    pub file: PathBuf,
    pub span: Span,
}

impl DeclarationLink {
    pub fn new(file: impl Into<PathBuf>, span: Span) -> Self {
        Self {
            file: file.into(),
            span,
        }
    }
}
