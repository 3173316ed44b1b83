//! OKRM register: objectives, key results, risks and their mitigations.
//!
//! Field names follow the camelCase shape of the sample data so a register
//! exported from the web app can be loaded as-is.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    /// Band a probability × impact score.
    pub fn from_score(score: f64) -> Self {
        if score <= 0.25 {
            Self::Low
        } else if score <= 0.5 {
            Self::Medium
        } else if score <= 0.75 {
            Self::High
        } else {
            Self::Critical
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectiveCategory {
    Financial,
    Operational,
    Compliance,
    Strategic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectiveStatus {
    Draft,
    Active,
    Completed,
    AtRisk,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Objective {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: ObjectiveCategory,
    pub priority: RiskLevel,
    pub status: ObjectiveStatus,
    #[serde(default)]
    pub key_results: Vec<String>,
    #[serde(default)]
    pub risks: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyResultStatus {
    NotStarted,
    InProgress,
    Completed,
    AtRisk,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyResult {
    pub id: String,
    pub objective_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub target: f64,
    pub current: f64,
    pub unit: String,
    #[serde(default)]
    pub due_date: String,
    pub status: KeyResultStatus,
}

impl KeyResult {
    /// Percent of target reached, capped at 100.
    pub fn completion_percent(&self) -> f64 {
        if self.target <= 0.0 {
            return 0.0;
        }
        (self.current / self.target * 100.0).clamp(0.0, 100.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskCategory {
    Financial,
    Operational,
    Compliance,
    Strategic,
    Reputational,
    Technological,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskStatus {
    Identified,
    Assessed,
    Mitigated,
    Accepted,
    Avoided,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Risk {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: RiskCategory,
    /// 0.0..=1.0
    pub probability: f64,
    /// 0.0..=1.0
    pub impact: f64,
    pub risk_level: RiskLevel,
    pub status: RiskStatus,
    #[serde(default)]
    pub objective_ids: Vec<String>,
    #[serde(default)]
    pub mitigation_ids: Vec<String>,
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub identified_date: String,
    #[serde(default)]
    pub last_review_date: String,
    #[serde(default)]
    pub natural_patterns: Vec<String>,
}

impl Risk {
    pub fn score(&self) -> f64 {
        risk_score(self.probability, self.impact)
    }
}

/// Partial update for a risk; `None` leaves the field alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RiskUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub probability: Option<f64>,
    pub impact: Option<f64>,
    pub risk_level: Option<RiskLevel>,
    pub status: Option<RiskStatus>,
    pub owner: Option<String>,
    pub last_review_date: Option<String>,
    pub mitigation_ids: Option<Vec<String>>,
}

impl RiskUpdate {
    pub fn apply_to(&self, risk: &mut Risk) {
        if let Some(v) = &self.title {
            risk.title = v.clone();
        }
        if let Some(v) = &self.description {
            risk.description = v.clone();
        }
        if let Some(v) = self.probability {
            risk.probability = v;
        }
        if let Some(v) = self.impact {
            risk.impact = v;
        }
        if let Some(v) = self.risk_level {
            risk.risk_level = v;
        }
        if let Some(v) = self.status {
            risk.status = v;
        }
        if let Some(v) = &self.owner {
            risk.owner = v.clone();
        }
        if let Some(v) = &self.last_review_date {
            risk.last_review_date = v.clone();
        }
        if let Some(v) = &self.mitigation_ids {
            risk.mitigation_ids = v.clone();
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MitigationKind {
    Preventive,
    Corrective,
    Detective,
    Compensating,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MitigationStatus {
    Planned,
    InProgress,
    Implemented,
    Ineffective,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mitigation {
    pub id: String,
    pub risk_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub kind: MitigationKind,
    pub status: MitigationStatus,
    /// 0.0..=1.0
    pub effectiveness: f64,
    pub cost: u64,
    #[serde(default)]
    pub implementation_date: String,
    #[serde(default)]
    pub owner: String,
}

// ============================================================================
// REGISTER
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Okrm {
    pub objectives: Vec<Objective>,
    pub key_results: Vec<KeyResult>,
    pub risks: Vec<Risk>,
    pub mitigations: Vec<Mitigation>,
}

impl Okrm {
    pub fn risk(&self, id: &str) -> Option<&Risk> {
        self.risks.iter().find(|r| r.id == id)
    }

    pub fn objective(&self, id: &str) -> Option<&Objective> {
        self.objectives.iter().find(|o| o.id == id)
    }

    /// Apply a partial update. Returns false when no risk has that id.
    pub fn update_risk(&mut self, risk_id: &str, update: &RiskUpdate) -> bool {
        match self.risks.iter_mut().find(|r| r.id == risk_id) {
            Some(risk) => {
                update.apply_to(risk);
                true
            }
            None => false,
        }
    }

    /// Append a mitigation. Duplicate ids are appended too, matching the
    /// register's append-only log semantics.
    pub fn add_mitigation(&mut self, mitigation: Mitigation) {
        self.mitigations.push(mitigation);
    }

    pub fn mitigations_for_risk<'a>(&'a self, risk_id: &'a str) -> impl Iterator<Item = &'a Mitigation> {
        self.mitigations.iter().filter(move |m| m.risk_id == risk_id)
    }

    /// Risks ordered by descending score. Equal scores keep register order.
    pub fn highest_priority_risks(&self, limit: usize) -> Vec<&Risk> {
        let mut ranked: Vec<&Risk> = self.risks.iter().collect();
        ranked.sort_by(|a, b| b.score().total_cmp(&a.score()));
        ranked.truncate(limit);
        ranked
    }

    pub fn key_results_for(&self, objective_id: &str) -> Vec<&KeyResult> {
        self.key_results
            .iter()
            .filter(|k| k.objective_id == objective_id)
            .collect()
    }

    pub fn implemented_mitigations(&self) -> usize {
        self.mitigations
            .iter()
            .filter(|m| m.status == MitigationStatus::Implemented)
            .count()
    }
}

pub const DEFAULT_PRIORITY_LIMIT: usize = 5;

pub fn risk_score(probability: f64, impact: f64) -> f64 {
    probability * impact
}
