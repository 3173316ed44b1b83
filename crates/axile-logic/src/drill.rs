//! Risk domain drill: pick a domain, watch the analysis timeline fill, then
//! choose a response.
//!
//! Phases cycle Selection → Analysis → Decision → Selection. The analysis
//! timeline is driven by a [`Ticker`]; each tick adds `progress_step` percent.
//! The tick after the timeline reaches 100 moves the drill to Decision.

use serde::{Deserialize, Serialize};

use crate::clock::Ticker;
use crate::config::DrillConfig;
use crate::error::CommandError;
use crate::risk::{risk_score, RiskLevel};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DomainKind {
    Financial,
    Operational,
    Technological,
    Environmental,
    Cultural,
    Political,
}

impl DomainKind {
    pub const ALL: [DomainKind; 6] = [
        Self::Financial,
        Self::Operational,
        Self::Technological,
        Self::Environmental,
        Self::Cultural,
        Self::Political,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Financial => "financial",
            Self::Operational => "operational",
            Self::Technological => "technological",
            Self::Environmental => "environmental",
            Self::Cultural => "cultural",
            Self::Political => "political",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.name() == name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainMetric {
    pub label: String,
    pub value: String,
    /// Percent change shown next to the value.
    pub change: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskDomain {
    #[serde(rename = "type")]
    pub kind: DomainKind,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub probability: f64,
    pub impact: f64,
    pub risk_level: RiskLevel,
    #[serde(default)]
    pub metrics: Vec<DomainMetric>,
}

impl RiskDomain {
    pub fn score(&self) -> f64 {
        risk_score(self.probability, self.impact)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrillResponse {
    Mitigate,
    Monitor,
    Accept,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseImpact {
    Positive,
    Neutral,
    Negative,
}

impl DrillResponse {
    pub fn impact(self) -> ResponseImpact {
        match self {
            Self::Mitigate => ResponseImpact::Positive,
            Self::Monitor => ResponseImpact::Neutral,
            Self::Accept => ResponseImpact::Negative,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrillDecision {
    pub domain: DomainKind,
    pub response: DrillResponse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrillPhase {
    Selection,
    Analysis,
    Decision,
}

impl DrillPhase {
    pub fn name(self) -> &'static str {
        match self {
            Self::Selection => "selection",
            Self::Analysis => "analysis",
            Self::Decision => "decision",
        }
    }
}

#[derive(Debug, Clone)]
pub struct RiskDrill {
    domains: Vec<RiskDomain>,
    config: DrillConfig,
    phase: DrillPhase,
    selected: Option<DomainKind>,
    progress: u32,
    ticker: Ticker,
    history: Vec<DrillDecision>,
}

impl RiskDrill {
    pub fn new(domains: Vec<RiskDomain>, config: DrillConfig) -> Self {
        let ticker = Ticker::new(config.tick_interval_ms);
        Self {
            domains,
            config,
            phase: DrillPhase::Selection,
            selected: None,
            progress: 0,
            ticker,
            history: Vec::new(),
        }
    }

    pub fn domains(&self) -> &[RiskDomain] {
        &self.domains
    }

    pub fn phase(&self) -> DrillPhase {
        self.phase
    }

    pub fn selected(&self) -> Option<&RiskDomain> {
        let kind = self.selected?;
        self.domains.iter().find(|d| d.kind == kind)
    }

    /// Analysis timeline, 0..=100.
    pub fn progress(&self) -> u32 {
        self.progress
    }

    pub fn history(&self) -> &[DrillDecision] {
        &self.history
    }

    /// Selection → Analysis with the timeline reset.
    pub fn select(&mut self, kind: DomainKind) -> Result<(), CommandError> {
        if self.phase != DrillPhase::Selection {
            log::warn!("Drill select rejected in phase {}", self.phase.name());
            return Err(CommandError::WrongPhase(self.phase.name()));
        }
        if !self.domains.iter().any(|d| d.kind == kind) {
            log::warn!("Drill: domain {} not loaded", kind.name());
            return Err(CommandError::UnknownDomain(kind.name().to_string()));
        }
        self.selected = Some(kind);
        self.progress = 0;
        self.phase = DrillPhase::Analysis;
        self.ticker.start();
        Ok(())
    }

    /// One analysis step.
    pub fn tick(&mut self) {
        if self.phase != DrillPhase::Analysis {
            return;
        }
        if self.progress >= 100 {
            self.phase = DrillPhase::Decision;
            self.ticker.stop();
        } else {
            self.progress = self.progress.saturating_add(self.config.progress_step.max(1)).min(100);
        }
    }

    pub fn advance(&mut self, elapsed_ms: u64) {
        let ticks = self.ticker.advance(elapsed_ms);
        for _ in 0..ticks {
            if self.phase != DrillPhase::Analysis {
                break;
            }
            self.tick();
        }
    }

    /// Record a response and return to Selection.
    pub fn decide(&mut self, response: DrillResponse) -> Result<DrillDecision, CommandError> {
        if self.phase != DrillPhase::Decision {
            log::warn!("Drill decide rejected in phase {}", self.phase.name());
            return Err(CommandError::WrongPhase(self.phase.name()));
        }
        let Some(domain) = self.selected else {
            return Err(CommandError::WrongPhase(self.phase.name()));
        };
        let decision = DrillDecision { domain, response };
        log::info!("Drill decision: {:?} on {}", response, domain.name());
        self.history.push(decision);
        self.reset();
        Ok(decision)
    }

    /// Abandon the current drill and return to Selection.
    pub fn reset(&mut self) {
        self.phase = DrillPhase::Selection;
        self.selected = None;
        self.progress = 0;
        self.ticker.stop();
    }
}
