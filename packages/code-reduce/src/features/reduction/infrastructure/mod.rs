//! Reduction infrastructure

mod shell_oracle;

pub use shell_oracle::ShellOracle;
