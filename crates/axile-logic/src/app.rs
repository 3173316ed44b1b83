//! Top-level wiring: the store plus every live engine.
//!
//! [`App::advance`] is the only way time enters the system. The host calls
//! it with the real milliseconds since the previous call and every engine
//! consumes whole ticks from its own ticker. Replacing or exiting an engine
//! drops its ticker, so no stale timer can fire into a newer session.

use std::sync::Arc;

use crate::achievements::UnlockNotice;
use crate::cascade::{FiredEvent, PremortemSimulation};
use crate::catalog::{Catalog, CatalogError};
use crate::config::{validate_config, EngineConfig};
use crate::drill::RiskDrill;
use crate::error::CommandError;
use crate::mentor::{ChatMessage, MentorChat};
use crate::scenario::{ScenarioSession, SessionStatus};
use crate::store::{Action, AxileState};

/// What happened during one [`App::advance`] call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdvanceReport {
    /// Elapsed seconds added to the active scenario.
    pub scenario_seconds: u32,
    pub fired: Vec<FiredEvent>,
    pub replies: Vec<ChatMessage>,
}

pub struct App {
    config: EngineConfig,
    state: AxileState,
    session: Option<ScenarioSession>,
    premortem: Option<PremortemSimulation>,
    drill: RiskDrill,
    mentor: MentorChat,
}

impl App {
    pub fn new(catalog: Catalog, config: EngineConfig) -> Self {
        for problem in validate_config(&config) {
            log::warn!("Config problem: {:?}", problem);
        }
        let drill = RiskDrill::new(catalog.domains.clone(), config.drill.clone());
        let mentor = MentorChat::new(config.mentor.clone());
        let state = AxileState::with_points_per_level(
            Arc::new(catalog),
            config.progress.points_per_level,
        );
        Self {
            config,
            state,
            session: None,
            premortem: None,
            drill,
            mentor,
        }
    }

    /// App over the bundled sample catalog.
    pub fn builtin(config: EngineConfig) -> Result<Self, CatalogError> {
        Ok(Self::new(Catalog::builtin()?, config))
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn state(&self) -> &AxileState {
        &self.state
    }

    pub fn dispatch(&mut self, action: &Action) {
        self.state.dispatch(action);
    }

    pub fn take_notices(&mut self) -> Vec<UnlockNotice> {
        self.state.take_notices()
    }

    // ------------------------------------------------------------------
    // Scenario play
    // ------------------------------------------------------------------

    /// Select a scenario and start a fresh session on it. Any running
    /// session is discarded.
    pub fn start_scenario(&mut self, scenario_id: &str) -> Result<(), CommandError> {
        let Some(scenario) = self.state.catalog().scenario(scenario_id).cloned() else {
            log::warn!("Start rejected: unknown scenario {}", scenario_id);
            return Err(CommandError::UnknownScenario(scenario_id.to_string()));
        };
        self.state
            .dispatch(&Action::SelectScenario(scenario_id.to_string()));
        self.session = Some(ScenarioSession::with_tick_interval(
            scenario,
            self.config.scenario.tick_interval_ms,
        ));
        self.mentor
            .observe_action(&format!("selected scenario {}", scenario_id));
        Ok(())
    }

    pub fn session(&self) -> Option<&ScenarioSession> {
        self.session.as_ref()
    }

    fn session_mut(&mut self) -> Result<&mut ScenarioSession, CommandError> {
        self.session.as_mut().ok_or(CommandError::NoSession)
    }

    pub fn select_choice(&mut self, choice_id: &str) -> Result<(), CommandError> {
        self.session_mut()?.select_choice(choice_id)
    }

    /// Confirm the selection. A completed scenario is credited to the
    /// player; a failed one is not.
    pub fn confirm_choice(&mut self) -> Result<SessionStatus, CommandError> {
        let session = self.session_mut()?;
        let status = session.confirm_choice()?;
        if status == SessionStatus::Completed {
            let scenario_id = session.scenario().id.clone();
            let score = session.score();
            self.state.dispatch(&Action::CompleteScenario { scenario_id, score });
            self.mentor
                .observe_action(&format!("completed scenario with score {}", score));
        }
        Ok(status)
    }

    pub fn toggle_pause(&mut self) -> Result<(), CommandError> {
        self.session_mut()?.toggle_pause();
        Ok(())
    }

    pub fn restart_scenario(&mut self) -> Result<(), CommandError> {
        let fresh = self.session_mut()?.restart();
        self.session = Some(fresh);
        Ok(())
    }

    /// Leave the scenario. The session and its clock are dropped.
    pub fn exit_scenario(&mut self) {
        if self.session.take().is_some() {
            self.state.dispatch(&Action::ExitScenario);
            self.mentor.observe_action("exited scenario");
        }
    }

    // ------------------------------------------------------------------
    // Premortem, drill, mentor
    // ------------------------------------------------------------------

    /// Open the premortem drill on the catalog's failure scenario at `index`.
    pub fn open_premortem(&mut self, index: usize) -> Result<&mut PremortemSimulation, CommandError> {
        let Some(scenario) = self.state.catalog().failure_scenarios.get(index).cloned() else {
            log::warn!("No failure scenario at index {}", index);
            return Err(CommandError::UnknownScenario(format!("failure scenario #{}", index)));
        };
        Ok(self
            .premortem
            .insert(PremortemSimulation::new(scenario, self.config.cascade.clone())))
    }

    pub fn premortem(&self) -> Option<&PremortemSimulation> {
        self.premortem.as_ref()
    }

    pub fn premortem_mut(&mut self) -> Option<&mut PremortemSimulation> {
        self.premortem.as_mut()
    }

    pub fn close_premortem(&mut self) {
        self.premortem = None;
    }

    pub fn drill(&self) -> &RiskDrill {
        &self.drill
    }

    pub fn drill_mut(&mut self) -> &mut RiskDrill {
        &mut self.drill
    }

    pub fn mentor(&self) -> &MentorChat {
        &self.mentor
    }

    pub fn mentor_mut(&mut self) -> &mut MentorChat {
        &mut self.mentor
    }

    // ------------------------------------------------------------------
    // Time
    // ------------------------------------------------------------------

    /// Feed real elapsed time to every engine.
    pub fn advance(&mut self, elapsed_ms: u64) -> AdvanceReport {
        self.state.dispatch(&Action::AdvanceClock(elapsed_ms));
        let scenario_seconds = self
            .session
            .as_mut()
            .map_or(0, |s| s.advance(elapsed_ms));
        let fired = self
            .premortem
            .as_mut()
            .map(|p| p.advance(elapsed_ms))
            .unwrap_or_default();
        self.drill.advance(elapsed_ms);
        let replies = self.mentor.advance(elapsed_ms);
        AdvanceReport {
            scenario_seconds,
            fired,
            replies,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cascade::PremortemPhase;

    fn app() -> App {
        App::builtin(EngineConfig::default()).unwrap()
    }

    #[test]
    fn test_unknown_scenario_leaves_state() {
        let mut app = app();
        let before = app.state().clone();
        assert_eq!(
            app.start_scenario("nope"),
            Err(CommandError::UnknownScenario("nope".into()))
        );
        assert_eq!(app.state(), &before);
        assert!(app.session().is_none());
    }

    #[test]
    fn test_commands_without_session() {
        let mut app = app();
        assert_eq!(app.select_choice("choice-001"), Err(CommandError::NoSession));
        assert_eq!(app.confirm_choice(), Err(CommandError::NoSession));
        assert_eq!(app.toggle_pause(), Err(CommandError::NoSession));
    }

    #[test]
    fn test_failed_run_is_not_credited() {
        let mut app = app();
        app.start_scenario("scenario-001").unwrap();
        app.advance(3_000);
        assert_eq!(app.session().unwrap().elapsed_seconds(), 3);
        app.select_choice("choice-002").unwrap();
        assert_eq!(app.confirm_choice(), Ok(SessionStatus::Failed));
        assert_eq!(app.state().user_progress.total_score, 1250);
        assert_eq!(
            app.state().current_scenario().map(|s| s.id.as_str()),
            Some("scenario-001")
        );
        app.exit_scenario();
        assert!(app.state().current_scenario_id.is_none());
    }

    #[test]
    fn test_mentor_observes_scenario_flow() {
        let mut app = app();
        app.start_scenario("scenario-001").unwrap();
        let last = app.mentor().messages().last().unwrap();
        assert!(last.content.starts_with("I noticed you selected scenario scenario-001."));
    }

    #[test]
    fn test_premortem_runs_on_app_clock() {
        let mut app = app();
        app.open_premortem(0).unwrap().start_default_cascade().unwrap();
        let report = app.advance(24_000);
        assert_eq!(report.fired.len(), 4);
        let sim = app.premortem().unwrap();
        assert_eq!(sim.phase(), PremortemPhase::Results);
        assert_eq!(sim.metrics().revenue, -200_000);
        assert!(app.open_premortem(9).is_err());
    }

    #[test]
    fn test_exit_drops_timer() {
        let mut app = app();
        app.start_scenario("scenario-001").unwrap();
        app.exit_scenario();
        let report = app.advance(10_000);
        assert_eq!(report.scenario_seconds, 0);
        app.start_scenario("scenario-001").unwrap();
        assert_eq!(app.session().unwrap().elapsed_seconds(), 0);
    }
}
