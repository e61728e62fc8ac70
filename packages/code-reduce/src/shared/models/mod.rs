//! Shared models
//!
//! Source positions used by every feature (buffers, parsing, reduction).

mod span;

pub use span::{Location, Span};
