//! Configuration System
//!
//! Loads model parameters from rebellion.toml for easy adjustment without
//! recompiling. Every section and field has a default matching the
//! classic parameterization, so a partial file (or none at all) yields a
//! runnable configuration.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::error::ConfigurationError;
use crate::rng::SimRng;

/// Default configuration file path
pub const DEFAULT_CONFIG_PATH: &str = "rebellion.toml";

/// Top-level configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub grid: GridConfig,
    pub population: PopulationConfig,
    pub vision: VisionConfig,
    pub rules: RuleConfig,
    pub distributions: DistributionConfig,
    pub extensions: ExtensionConfig,
    pub run: RunConfig,
}

/// Grid dimensions
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub width: u32,
    pub height: u32,
}

/// Agent population sizes
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PopulationConfig {
    pub citizens: u32,
    pub cops: u32,
}

/// Vision radii, in cells, under wrapped Euclidean distance
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VisionConfig {
    pub citizen: f64,
    pub cop: f64,
}

/// Core decision-rule parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleConfig {
    pub legitimacy: f64,
    pub max_jail_term: u32,
    pub movement_enabled: bool,
    pub active_threshold: f64,
    pub arrest_constant: f64,
}

/// Inclusive uniform sampling range
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct UnitRange {
    pub min: f64,
    pub max: f64,
}

impl UnitRange {
    pub fn sample(&self, rng: &mut SimRng) -> f64 {
        rng.uniform(self.min, self.max)
    }
}

impl Default for UnitRange {
    fn default() -> Self {
        Self { min: 0.0, max: 1.0 }
    }
}

/// Per-citizen trait distributions
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DistributionConfig {
    pub hardship: UnitRange,
    pub risk_aversion: UnitRange,
}

/// Optional model extensions, all off by default
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtensionConfig {
    pub shift_perceived_hardship: bool,
    pub aggregate_grievance: bool,
    pub hardship_drift: f64,
}

/// Run control
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub seed: u64,
    pub default_ticks: u64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: 40,
            height: 40,
        }
    }
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            citizens: 1120,
            cops: 64,
        }
    }
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            citizen: 7.0,
            cop: 7.0,
        }
    }
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            legitimacy: 0.82,
            max_jail_term: 30,
            movement_enabled: true,
            active_threshold: 0.1,
            arrest_constant: 2.3,
        }
    }
}

impl Default for ExtensionConfig {
    fn default() -> Self {
        Self {
            shift_perceived_hardship: false,
            aggregate_grievance: false,
            hardship_drift: 0.05,
        }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            default_ticks: 200,
        }
    }
}

impl SimConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration from `path`, or use defaults if it cannot be read
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        Self::load(path).unwrap_or_else(|e| {
            eprintln!(
                "Warning: Could not load {}: {}. Using defaults.",
                path.display(),
                e
            );
            Self::default()
        })
    }

    /// Checks every parameter before any world state is built, so a bad
    /// configuration can never leave a half-constructed run behind.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.grid.width == 0 || self.grid.height == 0 {
            return Err(ConfigurationError::ZeroDimension {
                width: self.grid.width,
                height: self.grid.height,
            });
        }

        let cells = u64::from(self.grid.width) * u64::from(self.grid.height);
        let agents = u64::from(self.population.citizens) + u64::from(self.population.cops);
        if agents > cells {
            return Err(ConfigurationError::PopulationExceedsCells { agents, cells });
        }

        check_unit("legitimacy", self.rules.legitimacy)?;
        check_unit("active_threshold", self.rules.active_threshold)?;
        check_non_negative("arrest_constant", self.rules.arrest_constant)?;
        check_non_negative("citizen vision", self.vision.citizen)?;
        check_non_negative("cop vision", self.vision.cop)?;
        check_non_negative("hardship_drift", self.extensions.hardship_drift)?;

        if self.rules.max_jail_term == 0 {
            return Err(ConfigurationError::ZeroJailTerm);
        }

        check_range("hardship", self.distributions.hardship)?;
        check_range("risk_aversion", self.distributions.risk_aversion)?;

        Ok(())
    }
}

fn check_unit(name: &'static str, value: f64) -> Result<(), ConfigurationError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ConfigurationError::OutOfRange {
            name,
            value,
            min: 0.0,
            max: 1.0,
        });
    }
    Ok(())
}

fn check_non_negative(name: &'static str, value: f64) -> Result<(), ConfigurationError> {
    if value < 0.0 || value.is_nan() {
        return Err(ConfigurationError::Negative { name, value });
    }
    Ok(())
}

fn check_range(name: &'static str, range: UnitRange) -> Result<(), ConfigurationError> {
    check_unit(name, range.min)?;
    check_unit(name, range.max)?;
    if range.min > range.max {
        return Err(ConfigurationError::InvertedRange {
            name,
            min: range.min,
            max: range.max,
        });
    }
    Ok(())
}

/// Configuration file error type
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Renders the default configuration as a TOML document,
/// used to seed a fresh rebellion.toml.
pub fn default_config_toml() -> String {
    // Defaults always serialize.
    toml::to_string_pretty(&SimConfig::default()).unwrap_or_default()
}
