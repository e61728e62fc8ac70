//! Removable unit bound to one syntactic fragment

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::errors::Result;
use crate::features::buffer::{BufferSet, Edit};
use crate::features::parsing::{DeclarationLink, SyntaxKind, SyntaxNode};
use crate::shared::models::Span;

/// One candidate deletion.
///
/// `remove` blanks the fragment (and its linked declaration, if that file
/// exists) and records reversal edits; `restore` replays them newest first.
/// Every `remove` is matched by exactly one `restore` or `commit`.
#[derive(Debug, Clone)]
pub struct Chunk {
    file: PathBuf,
    span: Span,
    kind: SyntaxKind,
    link: Option<DeclarationLink>,
    undo: Vec<Edit>,
}

impl Chunk {
    pub fn new(file: impl Into<PathBuf>, span: Span, kind: SyntaxKind) -> Self {
        Self {
            file: file.into(),
            span,
            kind,
            link: None,
            undo: Vec::new(),
        }
    }

    pub fn from_node(file: &Path, node: &SyntaxNode) -> Self {
        Self::new(file, node.span, node.kind.clone())
    }

    pub fn with_link(mut self, link: Option<DeclarationLink>) -> Self {
        self.link = link;
        self
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn kind(&self) -> &SyntaxKind {
        &self.kind
    }

    pub fn link(&self) -> Option<&DeclarationLink> {
        self.link.as_ref()
    }

    /// Removed and not yet restored or committed
    pub fn is_pending(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn remove(&mut self, buffers: &mut BufferSet) -> Result<()> {
        let edit = buffers.blank(&self.file, self.span)?;
        self.undo.push(edit);

        if let Some(link) = &self.link {
            if link.file.exists() {
                let edit = buffers.blank(&link.file, link.span)?;
                self.undo.push(edit);
            } else {
                debug!("declaration file {} missing, local removal only", link.file.display());
            }
        }
        Ok(())
    }

    pub fn restore(&mut self, buffers: &mut BufferSet) -> Result<()> {
        while let Some(edit) = self.undo.pop() {
            buffers.revert(edit)?;
        }
        Ok(())
    }

    /// Accept the removal; the reversal records are dropped
    pub fn commit(&mut self) {
        self.undo.clear();
    }

    /// `other` lies entirely within this chunk (same file, inclusive endpoints)
    pub fn contains(&self, other: &Chunk) -> bool {
        self.file == other.file && self.span.contains(&other.span)
    }
}
