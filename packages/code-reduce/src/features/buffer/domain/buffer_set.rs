//! Buffers for every file touched during one reduction run
//!
//! Owned by the driver; strategies, chunks and the search borrow it.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::buffer::{Buffer, Edit};
use crate::errors::Result;
use crate::shared::models::Span;

#[derive(Debug, Default)]
pub struct BufferSet {
    buffers: BTreeMap<PathBuf, Buffer>,
}

impl BufferSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the buffer for `path`, loading it from disk on first touch
    pub fn get_or_load(&mut self, path: &Path) -> Result<&mut Buffer> {
        match self.buffers.entry(path.to_path_buf()) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                debug!("loading buffer {}", path.display());
                Ok(entry.insert(Buffer::load(path)?))
            }
        }
    }

    pub fn get(&self, path: &Path) -> Option<&Buffer> {
        self.buffers.get(path)
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.buffers.contains_key(path)
    }

    /// Register an in-memory buffer (replaces any existing one for the path)
    pub fn insert(&mut self, buffer: Buffer) {
        self.buffers.insert(buffer.path().to_path_buf(), buffer);
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.buffers.keys().map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }

    /// Blank `span` in `file` and return the reversal record
    pub fn blank(&mut self, file: &Path, span: Span) -> Result<Edit> {
        let (applied, prior) = self.get_or_load(file)?.blank(span)?;
        Ok(Edit {
            file: file.to_path_buf(),
            applied,
            prior,
        })
    }

    /// Replace `span` in `file` with `lines` and return the reversal record
    pub fn replace(&mut self, file: &Path, span: Span, lines: Vec<String>) -> Result<Edit> {
        let (applied, prior) = self.get_or_load(file)?.replace(span, lines)?;
        Ok(Edit {
            file: file.to_path_buf(),
            applied,
            prior,
        })
    }

    /// Replay a reversal record
    pub fn revert(&mut self, edit: Edit) -> Result<()> {
        self.get_or_load(&edit.file)?.replace(edit.applied, edit.prior)?;
        Ok(())
    }

    /// Flush every dirty buffer; the oracle only observes the filesystem
    pub fn save_all(&mut self) -> Result<()> {
        for buffer in self.buffers.values_mut() {
            buffer.save()?;
        }
        Ok(())
    }

    /// Sum of `Buffer::content_size` over all buffers
    pub fn content_size(&self) -> usize {
        self.buffers.values().map(Buffer::content_size).sum()
    }
}
