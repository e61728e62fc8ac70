//! Reduction configuration
//!
//! Three ways to build a [`ReduceConfig`]:
//! - Preset: `ReduceConfig::preset(Preset::Fast)` picks the strategy list
//! - Builder: `.with_command("./check.sh").with_timeout(30)`
//! - YAML: `ReduceConfig::from_yaml("reduce.yaml")` (schema v1)
//!
//! ```rust,ignore
//! use code_reduce::config::{Preset, ReduceConfig};
//!
//! let config = ReduceConfig::preset(Preset::Thorough)
//!     .with_command("cc -c crash.c 2>&1 | grep -q 'internal compiler error'")
//!     .with_timeout(60);
//! config.validate()?;
//! ```

pub mod error;
pub mod io;
pub mod preset;
pub mod reduce_config;
pub mod validation;

// Re-exports
pub use error::{ConfigError, ConfigResult};
pub use io::ConfigFileV1;
pub use preset::Preset;
pub use reduce_config::{OracleConfig, ReduceConfig};
pub use validation::Validatable;
