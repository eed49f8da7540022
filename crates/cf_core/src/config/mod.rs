//! # Planner Configuration
//!
//! 브래킷, 1인당 에너지 상한, 배정 전략을 한 곳에서 관리.
//!
//! ## 사용법
//! ```rust
//! use cf_core::config::PlannerConfig;
//!
//! let config = PlannerConfig::default();
//! assert_eq!(config.energy_cap, 21);
//! assert!(config.validate().is_ok());
//! ```

mod env;

pub use env::{config_from_env, CONFIG_PATH_ENV};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::bracket::BracketKey;
use crate::error::ConfigError;

pub const ENERGY_CAP_MIN: u32 = 1;
pub const ENERGY_CAP_MAX: u32 = 50;
pub const DEFAULT_ENERGY_CAP: u32 = 21;

/// Energy regeneration rate (display only, not used in planning)
pub const ENERGY_REGEN_INFO: &str = "1e / 3min";

/// 배정 전략
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AssignStrategy {
    /// Greedy assignment bounded by the roster-capped quota
    #[default]
    Quota,
    /// Fill the bracket's nominal role layout, leftovers Mag-only
    Layout,
}

impl AssignStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssignStrategy::Quota => "quota",
            AssignStrategy::Layout => "layout",
        }
    }
}

impl fmt::Display for AssignStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssignStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quota" | "greedy" => Ok(AssignStrategy::Quota),
            "layout" | "split" => Ok(AssignStrategy::Layout),
            other => Err(ConfigError::UnknownStrategy(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub bracket: BracketKey,
    /// 1인당 사이클 에너지 상한 (1..=50)
    pub energy_cap: u32,
    pub strategy: AssignStrategy,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            bracket: BracketKey::default(),
            energy_cap: DEFAULT_ENERGY_CAP,
            strategy: AssignStrategy::default(),
        }
    }
}

impl PlannerConfig {
    pub fn new(bracket: BracketKey, energy_cap: u32) -> Self {
        Self { bracket, energy_cap, ..Self::default() }
    }

    pub fn with_strategy(mut self, strategy: AssignStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(ENERGY_CAP_MIN..=ENERGY_CAP_MAX).contains(&self.energy_cap) {
            return Err(ConfigError::EnergyCapOutOfRange {
                value: self.energy_cap,
                min: ENERGY_CAP_MIN,
                max: ENERGY_CAP_MAX,
            });
        }
        Ok(())
    }
}
