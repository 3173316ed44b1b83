//! Application store: one state value and a pure reducer.
//!
//! Every mutation of shared application state goes through [`reduce`]. The
//! reducer never touches its input; it returns the next state. Achievements
//! are re-evaluated inside the reducer whenever player progress changes, so
//! the tracker can never drift from the progress it describes.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::achievements::{AchievementTracker, PlayerStats, UnlockNotice};
use crate::catalog::Catalog;
use crate::constants::progression;
use crate::progress::{ProgressUpdate, UserProgress};
use crate::risk::{Mitigation, Okrm, RiskUpdate};
use crate::scenario::Scenario;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    SetLoading(bool),
    /// Also clears the loading flag.
    SetError(Option<String>),
    UpdateRisk {
        #[serde(rename = "riskId")]
        risk_id: String,
        updates: RiskUpdate,
    },
    AddMitigation(Mitigation),
    UpdateUserProgress(ProgressUpdate),
    SelectScenario(String),
    /// Leave the selected scenario without recording a result.
    ExitScenario,
    CompleteScenario {
        #[serde(rename = "scenarioId")]
        scenario_id: String,
        score: i32,
    },
    /// Back to the catalog's starting content. The clock is kept, and so
    /// are latched achievements: a reset never re-locks or re-announces them.
    ResetState,
    /// Move the virtual clock used for unlock timestamps.
    AdvanceClock(u64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AxileState {
    catalog: Arc<Catalog>,
    pub okrm: Okrm,
    pub user_progress: UserProgress,
    pub current_scenario_id: Option<String>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub achievements: AchievementTracker,
    pub clock_ms: u64,
    pub points_per_level: u32,
}

impl AxileState {
    /// Fresh state seeded from `catalog`, with achievements evaluated once.
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self::with_points_per_level(catalog, progression::POINTS_PER_LEVEL)
    }

    pub fn with_points_per_level(catalog: Arc<Catalog>, points_per_level: u32) -> Self {
        Self::seeded(catalog, points_per_level, 0)
    }

    fn seeded(catalog: Arc<Catalog>, points_per_level: u32, clock_ms: u64) -> Self {
        let mut achievements = AchievementTracker::new(catalog.achievements.clone());
        achievements.update(&PlayerStats::from(&catalog.user), clock_ms);
        Self {
            okrm: catalog.okrm.clone(),
            user_progress: catalog.user.clone(),
            current_scenario_id: None,
            is_loading: false,
            error: None,
            achievements,
            clock_ms,
            points_per_level,
            catalog,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn scenarios(&self) -> &[Scenario] {
        &self.catalog.scenarios
    }

    /// The selected scenario, if any.
    pub fn current_scenario(&self) -> Option<&Scenario> {
        self.current_scenario_id
            .as_deref()
            .and_then(|id| self.catalog.scenario(id))
    }

    pub fn stats(&self) -> PlayerStats {
        PlayerStats::from(&self.user_progress)
    }

    /// Apply `action` in place.
    pub fn dispatch(&mut self, action: &Action) {
        *self = reduce(self, action);
    }

    /// Drain pending achievement notices.
    pub fn take_notices(&mut self) -> Vec<UnlockNotice> {
        self.achievements.take_notices()
    }

    fn refresh_achievements(&mut self) {
        let stats = self.stats();
        self.achievements.update(&stats, self.clock_ms);
    }
}

/// Next state for `action`. `state` is left untouched.
pub fn reduce(state: &AxileState, action: &Action) -> AxileState {
    let mut next = state.clone();
    match action {
        Action::SetLoading(loading) => next.is_loading = *loading,
        Action::SetError(error) => {
            next.error = error.clone();
            next.is_loading = false;
        }
        Action::UpdateRisk { risk_id, updates } => {
            if !next.okrm.update_risk(risk_id, updates) {
                log::warn!("UpdateRisk: unknown risk {}", risk_id);
            }
        }
        Action::AddMitigation(mitigation) => next.okrm.add_mitigation(mitigation.clone()),
        Action::UpdateUserProgress(update) => {
            next.user_progress.apply(update);
            next.refresh_achievements();
        }
        Action::SelectScenario(id) => {
            if next.catalog.scenario(id).is_some() {
                next.current_scenario_id = Some(id.clone());
            } else {
                log::warn!("SelectScenario: unknown scenario {}", id);
                next.current_scenario_id = None;
            }
        }
        Action::ExitScenario => next.current_scenario_id = None,
        Action::CompleteScenario { scenario_id, score } => {
            // Negative runs are recorded but never reduce the running total.
            let credited = (*score).max(0) as u32;
            next.user_progress
                .complete_scenario(scenario_id, credited, next.points_per_level);
            next.current_scenario_id = None;
            log::info!(
                "Scenario {} completed: +{} (total {}, level {})",
                scenario_id,
                credited,
                next.user_progress.total_score,
                next.user_progress.level
            );
            next.refresh_achievements();
        }
        Action::ResetState => {
            next = AxileState::seeded(
                Arc::clone(&state.catalog),
                state.points_per_level,
                state.clock_ms,
            );
            next.achievements = state.achievements.clone();
            next.refresh_achievements();
        }
        Action::AdvanceClock(ms) => next.clock_ms = next.clock_ms.saturating_add(*ms),
    }
    next
}
