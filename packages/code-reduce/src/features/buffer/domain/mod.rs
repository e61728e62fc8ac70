//! Buffer domain models

mod buffer;
mod buffer_set;

pub use buffer::{Buffer, Edit};
pub use buffer_set::BufferSet;
