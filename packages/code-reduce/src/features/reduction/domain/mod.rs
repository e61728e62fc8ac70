//! Reduction domain models

mod chunk;
mod reduction_tree;
mod report;
mod strategy;

pub use chunk::Chunk;
pub use reduction_tree::{NodeId, ReductionNode, ReductionTree};
pub use report::{ReductionReport, SearchStats};
pub use strategy::Strategy;
