//! Reduction configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::{ConfigError, ConfigResult};
use super::io::ConfigFileV1;
use super::preset::Preset;
use crate::features::reduction::Strategy;

const SUPPORTED_VERSIONS: &[u32] = &[1];

/// How the oracle command is run and judged
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OracleConfig {
    /// Shell command, run with `sh -c` in the working directory
    pub command: String,

    /// Kill the command after this many seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// Exit status meaning "the behavior still reproduces"
    #[serde(default)]
    pub success_exit_code: i32,

    /// Regex that must also match stdout+stderr
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_pattern: Option<String>,
}

impl OracleConfig {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            timeout_secs: None,
            success_exit_code: 0,
            output_pattern: None,
        }
    }
}

/// Complete configuration of one reduction run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReduceConfig {
    pub preset: Preset,
    pub oracle: Option<OracleConfig>,
    /// Driver order
    pub strategies: Vec<Strategy>,
    /// Cap on driver passes, 0 = until fixpoint
    pub max_passes: usize,
    /// Whitespace tidy after the fixpoint
    pub tidy: bool,
    /// Re-run the oracle on the final output
    pub verify_final: bool,
}

impl ReduceConfig {
    pub fn preset(preset: Preset) -> Self {
        Self {
            preset,
            oracle: None,
            strategies: preset.strategies(),
            max_passes: 0,
            tidy: true,
            verify_final: true,
        }
    }

    pub fn with_oracle(mut self, oracle: OracleConfig) -> Self {
        self.oracle = Some(oracle);
        self
    }

    /// Set the oracle command, keeping any other oracle settings
    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        match &mut self.oracle {
            Some(oracle) => oracle.command = command.into(),
            None => self.oracle = Some(OracleConfig::new(command)),
        }
        self
    }

    /// Applies only once an oracle is configured
    pub fn with_timeout(mut self, secs: u64) -> Self {
        if let Some(oracle) = &mut self.oracle {
            oracle.timeout_secs = Some(secs);
        }
        self
    }

    pub fn with_strategies(mut self, strategies: Vec<Strategy>) -> Self {
        self.strategies = strategies;
        self
    }

    pub fn with_max_passes(mut self, max_passes: usize) -> Self {
        self.max_passes = max_passes;
        self
    }

    pub fn with_tidy(mut self, tidy: bool) -> Self {
        self.tidy = tidy;
        self
    }

    pub fn with_verify_final(mut self, verify_final: bool) -> Self {
        self.verify_final = verify_final;
        self
    }

    /// Load a v1 YAML file
    pub fn from_yaml(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let file: ConfigFileV1 = serde_yaml::from_str(content)?;

        // Version check
        match file.version {
            None => return Err(ConfigError::MissingVersion),
            Some(found) if !SUPPORTED_VERSIONS.contains(&found) => {
                return Err(ConfigError::UnsupportedVersion {
                    found,
                    supported: SUPPORTED_VERSIONS.to_vec(),
                });
            }
            Some(_) => {}
        }

        let preset = match &file.preset {
            Some(name) => Preset::from_str(name)?,
            None => Preset::default(),
        };
        let mut config = Self::preset(preset);

        if let Some(oracle) = file.oracle {
            config.oracle = Some(oracle);
        }
        if let Some(names) = file.strategies {
            config.strategies = parse_strategies(&names)?;
        }
        if let Some(max_passes) = file.max_passes {
            config.max_passes = max_passes;
        }
        if let Some(tidy) = file.tidy {
            config.tidy = tidy;
        }
        if let Some(verify_final) = file.verify_final {
            config.verify_final = verify_final;
        }

        Ok(config)
    }

    pub fn to_yaml(&self) -> ConfigResult<String> {
        let file = ConfigFileV1 {
            version: Some(1),
            preset: Some(self.preset.as_str().to_string()),
            oracle: self.oracle.clone(),
            strategies: Some(self.strategies.iter().map(|s| s.name().to_string()).collect()),
            max_passes: Some(self.max_passes),
            tidy: Some(self.tidy),
            verify_final: Some(self.verify_final),
        };
        Ok(serde_yaml::to_string(&file)?)
    }
}

impl Default for ReduceConfig {
    fn default() -> Self {
        Self::preset(Preset::default())
    }
}

/// Resolve strategy names, keeping their order and dropping repeats
pub fn parse_strategies<S: AsRef<str>>(names: &[S]) -> ConfigResult<Vec<Strategy>> {
    let valid: Vec<&str> = Strategy::ALL.iter().map(|s| s.name()).collect();
    let mut strategies = Vec::with_capacity(names.len());
    for name in names {
        let name = name.as_ref();
        let strategy = Strategy::from_str(name).ok_or_else(|| ConfigError::unknown_strategy(name, &valid))?;
        if !strategies.contains(&strategy) {
            strategies.push(strategy);
        }
    }
    Ok(strategies)
}
