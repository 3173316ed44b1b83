//! Fixed scoring, timing and threshold constants.
//!
//! Tunable values live in [`crate::config::EngineConfig`]; the numbers here
//! are the defaults it falls back to plus the lookup tables that are part of
//! the game rules themselves.

pub mod scoring {
    /// Score awarded for a consequence that lowers a risk.
    pub const RISK_DECREASE: i32 = 50;
    /// Score removed for a consequence that raises a risk.
    pub const RISK_INCREASE: i32 = -25;
    /// Score for an objective change with positive magnitude.
    pub const OBJECTIVE_GAIN: i32 = 75;
    /// Score for an objective change with zero or negative magnitude.
    pub const OBJECTIVE_LOSS: i32 = -30;
    /// Resource changes carry no score.
    pub const RESOURCE_CHANGE: i32 = 0;

    /// Default pass mark for a scenario (final score must exceed it).
    pub const DEFAULT_WIN_SCORE: i32 = 200;

    /// Risk label bands for a running scenario score.
    pub const LOW_RISK_ABOVE: i32 = 300;
    pub const MEDIUM_RISK_ABOVE: i32 = 150;
    pub const HIGH_RISK_ABOVE: i32 = 50;
}

pub mod timing {
    /// Real milliseconds per scenario clock tick (one elapsed second).
    pub const SCENARIO_TICK_MS: u64 = 1000;
    /// Real milliseconds per cascade tick.
    pub const CASCADE_TICK_MS: u64 = 1000;
    /// Simulated minutes the cascade clock moves per tick.
    pub const CASCADE_STEP_MINUTES: u32 = 5;
    /// Simulated minutes after which a cascade run ends.
    pub const CASCADE_HORIZON_MINUTES: u32 = 120;
    /// Real milliseconds per risk drill analysis tick.
    pub const DRILL_TICK_MS: u64 = 500;
    /// Analysis progress added per drill tick (percent).
    pub const DRILL_PROGRESS_STEP: u32 = 10;
    /// Minimum mentor "thinking" delay for free-form messages.
    pub const MENTOR_BASE_DELAY_MS: u64 = 1500;
    /// Random extra delay added on top of the base delay.
    pub const MENTOR_JITTER_MS: u64 = 1000;
    /// Fixed delay for suggestion-button replies.
    pub const MENTOR_SUGGESTION_DELAY_MS: u64 = 2000;
}

pub mod progression {
    /// Total score needed per player level.
    pub const POINTS_PER_LEVEL: u32 = 1000;
    /// Number of risk domains a player can master.
    pub const RISK_DOMAIN_COUNT: u32 = 6;
    /// Total score above which a perfect-score run is credited.
    pub const PERFECT_SCORE_TOTAL: u32 = 2000;
    /// Score divisor used for evidence-based decision progress.
    pub const EVIDENCE_SCORE_DIVISOR: f64 = 100.0;
    /// Score divisor used for mitigation progress.
    pub const MITIGATION_SCORE_DIVISOR: f64 = 50.0;
}

pub mod recovery {
    /// Recovery minutes added by a preventable failure.
    pub const PREVENTABLE_MINUTES: u32 = 30;
    /// Recovery minutes added by a failure that could not be prevented.
    pub const UNPREVENTABLE_MINUTES: u32 = 60;
}
