//! Reduction Feature
//!
//! Hierarchical delta debugging over syntactic fragments.
//!
//! ## Structure
//! - `domain/` - Chunk, ReductionTree (arena), Strategy, reports
//! - `ports/` - Oracle trait
//! - `application/` - DichotomySearch, strategy runs, Reducer (driver), tidy pass
//! - `infrastructure/` - ShellOracle

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

// Re-exports
pub use application::{run_strategy, DichotomySearch, ReductionContext, Reducer, StrategyOutcome};
pub use domain::{Chunk, NodeId, ReductionReport, ReductionTree, SearchStats, Strategy};
pub use infrastructure::ShellOracle;
pub use ports::Oracle;
