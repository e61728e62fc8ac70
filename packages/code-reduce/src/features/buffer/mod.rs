//! Buffer Feature
//!
//! Versioned, undoable text storage for the files under reduction.
//!
//! ## Structure
//! - `domain/` - Buffer (one file), BufferSet (every file touched in a run)

pub mod domain;

pub use domain::{Buffer, BufferSet, Edit};
