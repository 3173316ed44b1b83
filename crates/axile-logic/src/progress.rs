//! Player progress: completed scenarios, score, level and milestones.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon_url: String,
    #[serde(default)]
    pub earned_date: String,
    #[serde(default)]
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProgress {
    pub user_id: String,
    pub completed_scenarios: Vec<String>,
    #[serde(default)]
    pub badges: Vec<Badge>,
    pub total_score: u32,
    pub level: u32,
    pub experience_points: u32,
    #[serde(default)]
    pub risk_assessment_skill: u32,
    #[serde(default)]
    pub mitigation_planning_skill: u32,
    #[serde(default)]
    pub decision_making_skill: u32,
}

impl UserProgress {
    /// A fresh player at level 1.
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            completed_scenarios: Vec::new(),
            badges: Vec::new(),
            total_score: 0,
            level: 1,
            experience_points: 0,
            risk_assessment_skill: 0,
            mitigation_planning_skill: 0,
            decision_making_skill: 0,
        }
    }

    pub fn apply(&mut self, update: &ProgressUpdate) {
        if let Some(v) = &update.completed_scenarios {
            self.completed_scenarios = v.clone();
        }
        if let Some(v) = &update.badges {
            self.badges = v.clone();
        }
        if let Some(v) = update.total_score {
            self.total_score = v;
        }
        if let Some(v) = update.level {
            self.level = v;
        }
        if let Some(v) = update.experience_points {
            self.experience_points = v;
        }
        if let Some(v) = update.risk_assessment_skill {
            self.risk_assessment_skill = v;
        }
        if let Some(v) = update.mitigation_planning_skill {
            self.mitigation_planning_skill = v;
        }
        if let Some(v) = update.decision_making_skill {
            self.decision_making_skill = v;
        }
    }

    pub fn has_completed(&self, scenario_id: &str) -> bool {
        self.completed_scenarios.iter().any(|s| s == scenario_id)
    }

    /// Record a finished scenario. The id is only listed once, but score and
    /// experience accumulate on every completion.
    pub fn complete_scenario(&mut self, scenario_id: &str, score: u32, points_per_level: u32) {
        if !self.has_completed(scenario_id) {
            self.completed_scenarios.push(scenario_id.to_string());
        }
        self.total_score = self.total_score.saturating_add(score);
        self.experience_points = self.experience_points.saturating_add(score);
        self.level = level_for_score(self.total_score, points_per_level);
    }
}

/// Partial update for [`UserProgress`]; `None` leaves the field alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProgressUpdate {
    pub completed_scenarios: Option<Vec<String>>,
    pub badges: Option<Vec<Badge>>,
    pub total_score: Option<u32>,
    pub level: Option<u32>,
    pub experience_points: Option<u32>,
    pub risk_assessment_skill: Option<u32>,
    pub mitigation_planning_skill: Option<u32>,
    pub decision_making_skill: Option<u32>,
}

/// `total / points_per_level + 1`. A zero divisor is treated as 1.
pub fn level_for_score(total_score: u32, points_per_level: u32) -> u32 {
    total_score / points_per_level.max(1) + 1
}

/// Progress through the current level, 0.0..100.0.
pub fn level_progress_percent(experience_points: u32, points_per_level: u32) -> f64 {
    let per_level = points_per_level.max(1);
    (experience_points % per_level) as f64 / per_level as f64 * 100.0
}

// ============================================================================
// MILESTONES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Milestone {
    pub name: &'static str,
    pub points: u32,
}

pub static MILESTONES: [Milestone; 5] = [
    Milestone { name: "Novice", points: 500 },
    Milestone { name: "Apprentice", points: 1000 },
    Milestone { name: "Practitioner", points: 2500 },
    Milestone { name: "Expert", points: 5000 },
    Milestone { name: "Master", points: 10000 },
];

/// Milestones already reached at `total_score`.
pub fn reached_milestones(total_score: u32) -> impl Iterator<Item = &'static Milestone> {
    MILESTONES.iter().filter(move |m| total_score >= m.points)
}

/// The first milestone not yet reached, if any.
pub fn next_milestone(total_score: u32) -> Option<&'static Milestone> {
    MILESTONES.iter().find(|m| total_score < m.points)
}

/// Percent of the way from the previous milestone to the next one.
pub fn milestone_progress_percent(total_score: u32) -> f64 {
    let Some(next) = next_milestone(total_score) else {
        return 100.0;
    };
    let floor = reached_milestones(total_score).last().map_or(0, |m| m.points);
    let span = (next.points - floor) as f64;
    (total_score - floor) as f64 / span * 100.0
}
