//! Configuration I/O
//!
//! Defines the YAML schema. Conversion to and from [`ReduceConfig`] lives in
//! reduce_config.rs.
//!
//! [`ReduceConfig`]: super::ReduceConfig

use serde::{Deserialize, Serialize};

use super::reduce_config::OracleConfig;

/// YAML Schema v1
///
/// Every field except `version` is optional; absent fields keep the preset's
/// value. `version` is optional here only so that its absence can be reported
/// as [`ConfigError::MissingVersion`] instead of a generic YAML error.
///
/// [`ConfigError::MissingVersion`]: super::ConfigError::MissingVersion
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFileV1 {
    /// Schema version (always 1 for v1)
    pub version: Option<u32>,

    /// Base preset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preset: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub oracle: Option<OracleConfig>,

    /// Strategy names, validated after parsing so typos get a suggestion
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategies: Option<Vec<String>>,

    /// 0 = until fixpoint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_passes: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tidy: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub verify_final: Option<bool>,
}
