//! Preset configurations
//!
//! Presets select the strategy list; everything else keeps its default.

use serde::{Deserialize, Serialize};

use super::error::{ConfigError, ConfigResult};
use crate::features::reduction::Strategy;

/// Configuration preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Coarse fragments only: subprograms, declarations, imports
    Fast,

    /// Adds statements
    Balanced,

    /// Every strategy, comments included
    Thorough,
}

impl Preset {
    /// Strategies run by this preset, in driver order
    pub fn strategies(&self) -> Vec<Strategy> {
        match self {
            Self::Fast => vec![Strategy::Subprograms, Strategy::Declarations, Strategy::Imports],
            Self::Balanced => vec![
                Strategy::Subprograms,
                Strategy::Declarations,
                Strategy::Statements,
                Strategy::Imports,
            ],
            Self::Thorough => Strategy::ALL.to_vec(),
        }
    }

    /// Parse preset from string
    pub fn from_str(s: &str) -> ConfigResult<Self> {
        match s.to_lowercase().as_str() {
            "fast" => Ok(Self::Fast),
            "balanced" => Ok(Self::Balanced),
            "thorough" => Ok(Self::Thorough),
            _ => Err(ConfigError::UnknownPreset(s.to_string())),
        }
    }

    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fast => "fast",
            Self::Balanced => "balanced",
            Self::Thorough => "thorough",
        }
    }
}

impl Default for Preset {
    fn default() -> Self {
        Self::Balanced
    }
}

impl std::fmt::Display for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_from_str() {
        assert_eq!(Preset::from_str("FAST").unwrap(), Preset::Fast);
        assert_eq!(Preset::from_str("thorough").unwrap(), Preset::Thorough);
        assert!(matches!(Preset::from_str("extreme"), Err(ConfigError::UnknownPreset(_))));
    }

    #[test]
    fn test_presets_widen() {
        let fast = Preset::Fast.strategies();
        let balanced = Preset::Balanced.strategies();
        let thorough = Preset::Thorough.strategies();

        assert!(fast.iter().all(|s| balanced.contains(s)));
        assert!(balanced.iter().all(|s| thorough.contains(s)));
        assert!(!balanced.contains(&Strategy::Comments));
        assert_eq!(thorough.len(), 5);
    }

    #[test]
    fn test_strategy_order_follows_default_order() {
        for preset in [Preset::Fast, Preset::Balanced, Preset::Thorough] {
            let list = preset.strategies();
            let mut sorted = list.clone();
            sorted.sort();
            assert_eq!(list, sorted, "{preset}");
        }
    }
}
