//! Reduction ports

mod oracle;

pub use oracle::Oracle;
