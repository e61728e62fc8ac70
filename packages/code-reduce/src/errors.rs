//! Error types for code-reduce
//!
//! Fatal errors abort the run; oracle failures are non-fatal and live in
//! [`OracleError`], which the search downgrades to "property lost".

use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;
use crate::shared::models::Span;

/// Main error type for reduction runs
#[derive(Debug, Error)]
pub enum ReduceError {
    /// Buffer load or persistence failure
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Edit against a range outside the buffer, or an inconsistent chunk set
    #[error("Range error in {} at {span}: {reason}", file.display())]
    Range {
        file: PathBuf,
        span: Span,
        reason: String,
    },

    /// Front-end could not produce a tree
    #[error("Parse error: {0}")]
    Parse(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The oracle rejected the unmodified input
    #[error("oracle never satisfied: the property does not reproduce on the original input")]
    OracleNeverSatisfied,

    /// Interrupted between trials
    #[error("reduction cancelled")]
    Cancelled,
}

impl ReduceError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ReduceError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn range(file: impl Into<PathBuf>, span: Span, reason: impl Into<String>) -> Self {
        ReduceError::Range {
            file: file.into(),
            span,
            reason: reason.into(),
        }
    }

    pub fn parse_error(msg: impl Into<String>) -> Self {
        ReduceError::Parse(msg.into())
    }

    /// Invariant violations always escalate, never downgrade to "keep original"
    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, ReduceError::Range { .. })
    }
}

/// Oracle infrastructure failure (treated as "property lost")
#[derive(Debug, Error)]
pub enum OracleError {
    /// Command could not be started
    #[error("failed to spawn oracle command `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Command exceeded its time budget and was killed
    #[error("oracle command timed out after {limit:?}")]
    Timeout { limit: std::time::Duration },

    /// Waiting on the child process failed
    #[error("failed to wait for oracle command: {0}")]
    Wait(#[source] std::io::Error),

    /// Any other collaborator failure
    #[error("{0}")]
    Other(String),
}

/// Result type alias for reduction operations
pub type Result<T> = std::result::Result<T, ReduceError>;
