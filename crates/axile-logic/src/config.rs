//! Engine tuning: tick intervals, cascade step/horizon, mentor delays.
//!
//! Every field has a default, so a partial JSON document (or `{}`) is a
//! valid configuration. Use [`validate_config`] before handing a loaded
//! config to the engines; it reports every problem at once.

use serde::{Deserialize, Serialize};

use crate::constants::{progression, timing};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    /// Real milliseconds per elapsed scenario second.
    pub tick_interval_ms: u64,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: timing::SCENARIO_TICK_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CascadeConfig {
    pub tick_interval_ms: u64,
    /// Simulated minutes per tick.
    pub step_minutes: u32,
    /// Run ends once the clock reaches this many minutes.
    pub horizon_minutes: u32,
}

impl Default for CascadeConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: timing::CASCADE_TICK_MS,
            step_minutes: timing::CASCADE_STEP_MINUTES,
            horizon_minutes: timing::CASCADE_HORIZON_MINUTES,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrillConfig {
    pub tick_interval_ms: u64,
    /// Analysis percent added per tick.
    pub progress_step: u32,
}

impl Default for DrillConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: timing::DRILL_TICK_MS,
            progress_step: timing::DRILL_PROGRESS_STEP,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MentorConfig {
    pub base_delay_ms: u64,
    /// Upper bound (exclusive) of the random extra delay.
    pub jitter_ms: u64,
    pub suggestion_delay_ms: u64,
    /// Seed for the reply jitter generator.
    pub seed: u64,
}

impl Default for MentorConfig {
    fn default() -> Self {
        Self {
            base_delay_ms: timing::MENTOR_BASE_DELAY_MS,
            jitter_ms: timing::MENTOR_JITTER_MS,
            suggestion_delay_ms: timing::MENTOR_SUGGESTION_DELAY_MS,
            seed: 42,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressConfig {
    pub points_per_level: u32,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            points_per_level: progression::POINTS_PER_LEVEL,
        }
    }
}

/// All tunables for one [`crate::app::App`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub scenario: ScenarioConfig,
    pub cascade: CascadeConfig,
    pub drill: DrillConfig,
    pub mentor: MentorConfig,
    pub progress: ProgressConfig,
}

impl EngineConfig {
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Configuration validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A tick interval of zero (names the section).
    ZeroTickInterval(&'static str),
    /// Cascade clock would never move.
    ZeroCascadeStep,
    /// Horizon shorter than one step.
    HorizonBelowStep { horizon: u32, step: u32 },
    /// Horizon is not reached on an exact tick.
    HorizonNotStepMultiple { horizon: u32, step: u32 },
    /// Drill analysis would never complete.
    ZeroProgressStep,
    /// Level arithmetic would divide by zero.
    ZeroPointsPerLevel,
}

/// Validate a config, returning all problems found.
pub fn validate_config(config: &EngineConfig) -> Vec<ConfigError> {
    let mut errors = Vec::new();

    if config.scenario.tick_interval_ms == 0 {
        errors.push(ConfigError::ZeroTickInterval("scenario"));
    }
    if config.cascade.tick_interval_ms == 0 {
        errors.push(ConfigError::ZeroTickInterval("cascade"));
    }
    if config.drill.tick_interval_ms == 0 {
        errors.push(ConfigError::ZeroTickInterval("drill"));
    }

    let step = config.cascade.step_minutes;
    let horizon = config.cascade.horizon_minutes;
    if step == 0 {
        errors.push(ConfigError::ZeroCascadeStep);
    } else if horizon < step {
        errors.push(ConfigError::HorizonBelowStep { horizon, step });
    } else if horizon % step != 0 {
        errors.push(ConfigError::HorizonNotStepMultiple { horizon, step });
    }

    if config.drill.progress_step == 0 {
        errors.push(ConfigError::ZeroProgressStep);
    }
    if config.progress.points_per_level == 0 {
        errors.push(ConfigError::ZeroPointsPerLevel);
    }

    errors
}
