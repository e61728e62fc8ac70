//! Configuration validation

use regex::Regex;

use super::error::{ConfigError, ConfigResult};
use super::reduce_config::{OracleConfig, ReduceConfig};

const MAX_TIMEOUT_SECS: u64 = 86_400;

/// Trait for validatable configuration objects
pub trait Validatable {
    /// Returns `Ok(())` if valid, `Err(ConfigError)` with details if invalid.
    fn validate(&self) -> ConfigResult<()>;

    /// Get the configuration name for error messages
    fn config_name(&self) -> &'static str {
        "Config"
    }
}

impl Validatable for OracleConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.command.trim().is_empty() {
            return Err(ConfigError::MissingOracle);
        }

        if let Some(secs) = self.timeout_secs {
            if !(1..=MAX_TIMEOUT_SECS).contains(&secs) {
                return Err(ConfigError::range_with_hint(
                    "oracle.timeout_secs",
                    secs,
                    1,
                    MAX_TIMEOUT_SECS,
                    "Omit the timeout to let the oracle run unbounded",
                ));
            }
        }

        if let Some(pattern) = &self.output_pattern {
            Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern {
                pattern: pattern.clone(),
                source,
            })?;
        }

        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "OracleConfig"
    }
}

impl Validatable for ReduceConfig {
    fn validate(&self) -> ConfigResult<()> {
        match &self.oracle {
            Some(oracle) => oracle.validate()?,
            None => return Err(ConfigError::MissingOracle),
        }

        if self.strategies.is_empty() {
            return Err(ConfigError::NoStrategies);
        }

        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "ReduceConfig"
    }
}
