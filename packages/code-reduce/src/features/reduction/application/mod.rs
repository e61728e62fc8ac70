//! Reduction application layer

mod context;
mod dichotomy;
mod driver;
mod strategy;
mod tidy;

pub use context::ReductionContext;
pub use dichotomy::DichotomySearch;
pub use driver::Reducer;
pub use strategy::{run_strategy, StrategyOutcome};
pub use tidy::{tidy_file, tidy_lines};
