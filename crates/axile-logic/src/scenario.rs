//! Scenario progression: event-by-event decision play.
//!
//! A [`Scenario`] is a fixed list of crisis events. Each event offers a set of
//! choices; confirming a choice applies its consequences to the running score
//! and moves on to the next event. After the last event the session is
//! evaluated against the scenario's pass mark and time budget.
//!
//! # State Machine
//!
//! ```text
//! Playing(0) --confirm--> Playing(1) --confirm--> ... Playing(N-1)
//!                                                       |
//!                                 confirm: score > win_score && elapsed < budget
//!                                          /                         \
//!                                   Completed                       Failed
//! ```
//!
//! Terminal states only leave through [`ScenarioSession::restart`] or by the
//! owner dropping the session.
//!
//! ```
//! use axile_logic::scenario::{Choice, Consequence, ConsequenceKind, Scenario,
//!     ScenarioEvent, ScenarioSession, SessionStatus};
//!
//! let choice = Choice::new("c1", "Invest in differentiation")
//!     .with_consequence(Consequence::new(ConsequenceKind::RiskDecrease, "risk-001", -0.1));
//! let event = ScenarioEvent::new("e1", "Competitor undercuts pricing").with_choice(choice);
//! let scenario = Scenario::new("s1", "Expansion", 45).with_event(event);
//!
//! let mut session = ScenarioSession::new(scenario);
//! session.select_choice("c1").unwrap();
//! let status = session.confirm_choice().unwrap();
//! assert_eq!(session.score(), 50);
//! assert_eq!(status, SessionStatus::Failed); // 50 does not beat 200
//! ```

use serde::{Deserialize, Serialize};

use crate::clock::Ticker;
use crate::constants::{scoring, timing};
use crate::error::CommandError;

// ============================================================================
// SCENARIO DATA
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

/// What a consequence does to the scenario's risk picture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsequenceKind {
    RiskIncrease,
    RiskDecrease,
    ObjectiveChange,
    ResourceChange,
}

/// A scored effect attached to a choice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Consequence {
    #[serde(rename = "type")]
    pub kind: ConsequenceKind,
    pub target_id: String,
    /// Only the sign matters, and only for objective changes.
    pub magnitude: f64,
}

impl Consequence {
    pub fn new(kind: ConsequenceKind, target_id: impl Into<String>, magnitude: f64) -> Self {
        Self {
            kind,
            target_id: target_id.into(),
            magnitude,
        }
    }

    /// Score delta from the fixed per-kind table.
    pub fn score_delta(&self) -> i32 {
        match self.kind {
            ConsequenceKind::RiskDecrease => scoring::RISK_DECREASE,
            ConsequenceKind::RiskIncrease => scoring::RISK_INCREASE,
            ConsequenceKind::ObjectiveChange => {
                if self.magnitude > 0.0 {
                    scoring::OBJECTIVE_GAIN
                } else {
                    scoring::OBJECTIVE_LOSS
                }
            }
            ConsequenceKind::ResourceChange => scoring::RESOURCE_CHANGE,
        }
    }
}

/// A player-selectable option on an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Choice {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub consequences: Vec<Consequence>,
    /// Cost in currency units.
    #[serde(default)]
    pub cost: u64,
    #[serde(default)]
    pub required_evidence: Vec<String>,
}

impl Choice {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            consequences: Vec::new(),
            cost: 0,
            required_evidence: Vec::new(),
        }
    }

    pub fn with_consequence(mut self, consequence: Consequence) -> Self {
        self.consequences.push(consequence);
        self
    }

    pub fn with_cost(mut self, cost: u64) -> Self {
        self.cost = cost;
        self
    }

    pub fn with_evidence(mut self, tag: impl Into<String>) -> Self {
        self.required_evidence.push(tag.into());
        self
    }

    /// Sum of all consequence deltas.
    pub fn score_delta(&self) -> i32 {
        self.consequences.iter().map(Consequence::score_delta).sum()
    }

    /// A choice backed by at least one piece of evidence.
    pub fn is_evidence_based(&self) -> bool {
        !self.required_evidence.is_empty()
    }
}

/// One crisis beat in a scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioEvent {
    pub id: String,
    #[serde(default)]
    pub trigger: String,
    pub description: String,
    /// Descriptive impact shown with the event; not scored.
    #[serde(default)]
    pub impact: Vec<Consequence>,
    #[serde(default)]
    pub choices: Vec<Choice>,
    /// Descriptive minute marker. Events are always played in list order.
    #[serde(default)]
    pub timestamp: u32,
}

impl ScenarioEvent {
    pub fn new(id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            trigger: "time_based".to_string(),
            description: description.into(),
            impact: Vec::new(),
            choices: Vec::new(),
            timestamp: 0,
        }
    }

    pub fn with_choice(mut self, choice: Choice) -> Self {
        self.choices.push(choice);
        self
    }

    pub fn choice(&self, choice_id: &str) -> Option<&Choice> {
        self.choices.iter().find(|c| c.id == choice_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewardKind {
    Points,
    Badge,
    Unlock,
    Certificate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reward {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: RewardKind,
    pub value: u32,
    pub description: String,
}

fn default_win_score() -> i32 {
    scoring::DEFAULT_WIN_SCORE
}

/// A complete scenario definition. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    pub difficulty: Difficulty,
    /// Time budget in minutes.
    pub estimated_duration: u32,
    #[serde(default)]
    pub events: Vec<ScenarioEvent>,
    /// Final score must be strictly greater than this to pass.
    #[serde(default = "default_win_score")]
    pub win_score: i32,
    #[serde(default)]
    pub objective_ids: Vec<String>,
    #[serde(default)]
    pub initial_risk_ids: Vec<String>,
    #[serde(default)]
    pub rewards: Vec<Reward>,
}

impl Scenario {
    pub fn new(id: impl Into<String>, title: impl Into<String>, estimated_duration: u32) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            category: String::new(),
            difficulty: Difficulty::Intermediate,
            estimated_duration,
            events: Vec::new(),
            win_score: scoring::DEFAULT_WIN_SCORE,
            objective_ids: Vec::new(),
            initial_risk_ids: Vec::new(),
            rewards: Vec::new(),
        }
    }

    pub fn with_event(mut self, event: ScenarioEvent) -> Self {
        self.events.push(event);
        self
    }

    pub fn with_win_score(mut self, win_score: i32) -> Self {
        self.win_score = win_score;
        self
    }

    /// Time budget in seconds.
    pub fn time_budget_seconds(&self) -> u32 {
        self.estimated_duration.saturating_mul(60)
    }

    /// Highest score reachable by always taking the best choice.
    pub fn max_score(&self) -> i32 {
        self.events
            .iter()
            .map(|e| e.choices.iter().map(Choice::score_delta).max().unwrap_or(0))
            .sum()
    }
}

/// Pass/fail rule applied after the last event.
pub fn evaluate_outcome(score: i32, elapsed_seconds: u32, scenario: &Scenario) -> SessionStatus {
    if score > scenario.win_score && elapsed_seconds < scenario.time_budget_seconds() {
        SessionStatus::Completed
    } else {
        SessionStatus::Failed
    }
}

/// Risk label for a running score.
pub fn risk_label(score: i32) -> &'static str {
    if score > scoring::LOW_RISK_ABOVE {
        "Low Risk"
    } else if score > scoring::MEDIUM_RISK_ABOVE {
        "Medium Risk"
    } else if score > scoring::HIGH_RISK_ABOVE {
        "High Risk"
    } else {
        "Critical Risk"
    }
}

// ============================================================================
// SESSION
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Playing,
    Completed,
    Failed,
}

impl SessionStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Playing)
    }
}

/// A confirmed decision, kept for the results screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionRecord {
    pub event_id: String,
    pub choice_id: String,
    pub score_delta: i32,
    pub cost: u64,
    pub evidence_based: bool,
    /// Elapsed seconds when the decision was confirmed.
    pub at_second: u32,
}

/// Read-only view of a session for presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub scenario_id: String,
    pub event_index: usize,
    pub event_count: usize,
    pub score: i32,
    pub elapsed_seconds: u32,
    pub paused: bool,
    pub status: SessionStatus,
    pub selected_choice: Option<String>,
}

/// A single-player run through one scenario.
#[derive(Debug, Clone)]
pub struct ScenarioSession {
    scenario: Scenario,
    event_index: usize,
    selected: Option<String>,
    score: i32,
    elapsed_seconds: u32,
    paused: bool,
    status: SessionStatus,
    decisions: Vec<DecisionRecord>,
    cost_spent: u64,
    ticker: Ticker,
}

impl ScenarioSession {
    pub fn new(scenario: Scenario) -> Self {
        Self::with_tick_interval(scenario, timing::SCENARIO_TICK_MS)
    }

    /// Create a session whose elapsed-seconds clock ticks every `tick_ms`
    /// of fed real time.
    pub fn with_tick_interval(scenario: Scenario, tick_ms: u64) -> Self {
        log::info!(
            "Scenario {} started: {} events, win score {}, budget {}s",
            scenario.id,
            scenario.events.len(),
            scenario.win_score,
            scenario.time_budget_seconds()
        );
        let mut session = Self {
            scenario,
            event_index: 0,
            selected: None,
            score: 0,
            elapsed_seconds: 0,
            paused: false,
            status: SessionStatus::Playing,
            decisions: Vec::new(),
            cost_spent: 0,
            ticker: Ticker::new(tick_ms),
        };
        if session.scenario.events.is_empty() {
            // Nothing to decide: evaluate straight away.
            session.finish();
        } else {
            session.ticker.start();
        }
        session
    }

    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn elapsed_seconds(&self) -> u32 {
        self.elapsed_seconds
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn event_index(&self) -> usize {
        self.event_index
    }

    pub fn selected_choice(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn decisions(&self) -> &[DecisionRecord] {
        &self.decisions
    }

    pub fn cost_spent(&self) -> u64 {
        self.cost_spent
    }

    pub fn evidence_based_decisions(&self) -> usize {
        self.decisions.iter().filter(|d| d.evidence_based).count()
    }

    /// The event awaiting a decision, or `None` once terminal.
    pub fn current_event(&self) -> Option<&ScenarioEvent> {
        if self.status.is_terminal() {
            return None;
        }
        self.scenario.events.get(self.event_index)
    }

    /// Percentage of events reached, counting the current one.
    pub fn progress_percent(&self) -> f64 {
        let total = self.scenario.events.len();
        if total == 0 || self.status.is_terminal() {
            return 100.0;
        }
        (self.event_index + 1) as f64 / total as f64 * 100.0
    }

    pub fn risk_label(&self) -> &'static str {
        risk_label(self.score)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            scenario_id: self.scenario.id.clone(),
            event_index: self.event_index,
            event_count: self.scenario.events.len(),
            score: self.score,
            elapsed_seconds: self.elapsed_seconds,
            paused: self.paused,
            status: self.status,
            selected_choice: self.selected.clone(),
        }
    }

    fn ensure_active(&self) -> Result<(), CommandError> {
        if self.status.is_terminal() {
            return Err(CommandError::Finished);
        }
        if self.paused {
            return Err(CommandError::Paused);
        }
        Ok(())
    }

    /// Record a tentative selection on the current event. No score effect.
    pub fn select_choice(&mut self, choice_id: &str) -> Result<(), CommandError> {
        if let Err(e) = self.ensure_active() {
            log::warn!("Scenario {}: select rejected ({})", self.scenario.id, e);
            return Err(e);
        }
        let offered = self
            .current_event()
            .map_or(false, |event| event.choice(choice_id).is_some());
        if !offered {
            log::warn!(
                "Scenario {}: choice {} not offered by event {}",
                self.scenario.id,
                choice_id,
                self.event_index
            );
            return Err(CommandError::UnknownChoice(choice_id.to_string()));
        }
        self.selected = Some(choice_id.to_string());
        Ok(())
    }

    /// Apply the selected choice and move to the next event, or evaluate the
    /// outcome after the last one.
    pub fn confirm_choice(&mut self) -> Result<SessionStatus, CommandError> {
        if let Err(e) = self.ensure_active() {
            log::warn!("Scenario {}: confirm rejected ({})", self.scenario.id, e);
            return Err(e);
        }
        let Some(choice_id) = self.selected.clone() else {
            log::warn!("Scenario {}: confirm without a selection", self.scenario.id);
            return Err(CommandError::NoSelection);
        };
        let event = &self.scenario.events[self.event_index];
        let Some(choice) = event.choice(&choice_id) else {
            return Err(CommandError::UnknownChoice(choice_id));
        };

        let delta = choice.score_delta();
        let record = DecisionRecord {
            event_id: event.id.clone(),
            choice_id: choice.id.clone(),
            score_delta: delta,
            cost: choice.cost,
            evidence_based: choice.is_evidence_based(),
            at_second: self.elapsed_seconds,
        };
        self.cost_spent = self.cost_spent.saturating_add(choice.cost);
        self.score += delta;
        self.decisions.push(record);
        self.selected = None;

        if self.event_index + 1 < self.scenario.events.len() {
            self.event_index += 1;
        } else {
            self.finish();
        }
        Ok(self.status)
    }

    fn finish(&mut self) {
        self.status = evaluate_outcome(self.score, self.elapsed_seconds, &self.scenario);
        self.ticker.stop();
        log::info!(
            "Scenario {} finished: {:?} with score {} after {}s",
            self.scenario.id,
            self.status,
            self.score,
            self.elapsed_seconds
        );
    }

    /// Freeze the elapsed-time counter. Choices are rejected while paused.
    pub fn pause(&mut self) {
        if self.status.is_terminal() || self.paused {
            return;
        }
        self.paused = true;
        self.ticker.stop();
    }

    pub fn resume(&mut self) {
        if self.status.is_terminal() || !self.paused {
            return;
        }
        self.paused = false;
        self.ticker.start();
    }

    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }

    /// One elapsed second. Ignored while paused or terminal.
    pub fn tick(&mut self) {
        if self.status.is_terminal() || self.paused {
            return;
        }
        self.elapsed_seconds = self.elapsed_seconds.saturating_add(1);
    }

    /// Feed real elapsed time; applies every whole tick that is due at once.
    pub fn advance(&mut self, elapsed_ms: u64) -> u32 {
        let ticks = self.ticker.advance(elapsed_ms);
        if ticks > 0 && !self.status.is_terminal() && !self.paused {
            self.elapsed_seconds = self.elapsed_seconds.saturating_add(ticks);
        }
        ticks
    }

    /// Throw the session away and start again from the first event.
    pub fn restart(&self) -> Self {
        Self::with_tick_interval(self.scenario.clone(), self.ticker.interval_ms())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_event_scenario() -> Scenario {
        Scenario::new("s", "Two beats", 45)
            .with_event(
                ScenarioEvent::new("e1", "first")
                    .with_choice(
                        Choice::new("good", "mitigate").with_consequence(Consequence::new(
                            ConsequenceKind::RiskDecrease,
                            "r1",
                            -0.1,
                        )),
                    )
                    .with_choice(
                        Choice::new("bad", "ignore").with_consequence(Consequence::new(
                            ConsequenceKind::RiskIncrease,
                            "r1",
                            0.2,
                        )),
                    ),
            )
            .with_event(
                ScenarioEvent::new("e2", "second").with_choice(
                    Choice::new("grow", "invest")
                        .with_cost(500)
                        .with_evidence("market_research")
                        .with_consequence(Consequence::new(
                            ConsequenceKind::ObjectiveChange,
                            "o1",
                            1.0,
                        )),
                ),
            )
    }

    #[test]
    fn test_consequence_delta_table() {
        let d = |kind, m| Consequence::new(kind, "x", m).score_delta();
        assert_eq!(d(ConsequenceKind::RiskDecrease, -5.0), 50);
        assert_eq!(d(ConsequenceKind::RiskIncrease, 5.0), -25);
        assert_eq!(d(ConsequenceKind::ObjectiveChange, 0.01), 75);
        assert_eq!(d(ConsequenceKind::ObjectiveChange, 0.0), -30);
        assert_eq!(d(ConsequenceKind::ObjectiveChange, -0.3), -30);
        assert_eq!(d(ConsequenceKind::ResourceChange, 9.0), 0);
    }

    #[test]
    fn test_two_events_totalling_125_fail() {
        let mut s = ScenarioSession::new(two_event_scenario());
        s.select_choice("good").unwrap();
        assert_eq!(s.confirm_choice().unwrap(), SessionStatus::Playing);
        assert_eq!(s.score(), 50);
        s.select_choice("grow").unwrap();
        assert_eq!(s.confirm_choice().unwrap(), SessionStatus::Failed);
        assert_eq!(s.score(), 125);
        assert_eq!(s.cost_spent(), 500);
        assert_eq!(s.evidence_based_decisions(), 1);
        assert!(s.current_event().is_none());
    }

    #[test]
    fn test_win_requires_score_and_time() {
        let scenario = two_event_scenario().with_win_score(100);
        let mut s = ScenarioSession::new(scenario.clone());
        s.select_choice("good").unwrap();
        s.confirm_choice().unwrap();
        s.select_choice("grow").unwrap();
        assert_eq!(s.confirm_choice().unwrap(), SessionStatus::Completed);

        // Same choices, but over the 45 minute budget.
        let mut slow = ScenarioSession::new(scenario);
        slow.select_choice("good").unwrap();
        slow.confirm_choice().unwrap();
        for _ in 0..45 * 60 {
            slow.tick();
        }
        slow.select_choice("grow").unwrap();
        assert_eq!(slow.confirm_choice().unwrap(), SessionStatus::Failed);
    }

    #[test]
    fn test_huge_elapsed_time_saturates_clock() {
        let mut s = ScenarioSession::new(two_event_scenario());
        s.advance(500);
        assert_eq!(s.advance(u64::MAX), u32::MAX);
        assert_eq!(s.elapsed_seconds(), u32::MAX);
        s.select_choice("good").unwrap();
        s.confirm_choice().unwrap();
        s.select_choice("grow").unwrap();
        assert_eq!(s.confirm_choice().unwrap(), SessionStatus::Failed);
    }

    #[test]
    fn test_score_equal_to_threshold_fails() {
        let scenario = two_event_scenario().with_win_score(125);
        let mut s = ScenarioSession::new(scenario);
        s.select_choice("good").unwrap();
        s.confirm_choice().unwrap();
        s.select_choice("grow").unwrap();
        assert_eq!(s.confirm_choice().unwrap(), SessionStatus::Failed);
    }

    #[test]
    fn test_unknown_choice_is_rejected_without_mutation() {
        let mut s = ScenarioSession::new(two_event_scenario());
        s.select_choice("good").unwrap();
        let err = s.select_choice("grow").unwrap_err();
        assert_eq!(err, CommandError::UnknownChoice("grow".into()));
        assert_eq!(s.selected_choice(), Some("good"));
    }

    #[test]
    fn test_confirm_without_selection_is_rejected() {
        let mut s = ScenarioSession::new(two_event_scenario());
        assert_eq!(s.confirm_choice(), Err(CommandError::NoSelection));
        assert_eq!(s.event_index(), 0);
        assert_eq!(s.score(), 0);
    }

    #[test]
    fn test_paused_session_rejects_choices_and_freezes_time() {
        let mut s = ScenarioSession::new(two_event_scenario());
        s.select_choice("good").unwrap();
        s.pause();
        assert_eq!(s.confirm_choice(), Err(CommandError::Paused));
        assert_eq!(s.select_choice("bad"), Err(CommandError::Paused));
        assert_eq!(s.advance(10_000), 0);
        assert_eq!(s.elapsed_seconds(), 0);

        s.resume();
        assert_eq!(s.advance(3_000), 3);
        assert_eq!(s.elapsed_seconds(), 3);
        assert_eq!(s.confirm_choice(), Ok(SessionStatus::Playing));
    }

    #[test]
    fn test_zero_event_scenario_fails_immediately() {
        let s = ScenarioSession::new(Scenario::new("empty", "Empty", 10));
        assert_eq!(s.status(), SessionStatus::Failed);
        assert_eq!(s.score(), 0);
        assert_eq!(s.progress_percent(), 100.0);
    }

    #[test]
    fn test_zero_event_scenario_with_negative_pass_mark_completes() {
        let s = ScenarioSession::new(Scenario::new("empty", "Empty", 10).with_win_score(-1));
        assert_eq!(s.status(), SessionStatus::Completed);
    }

    #[test]
    fn test_terminal_session_rejects_everything() {
        let mut s = ScenarioSession::new(Scenario::new("empty", "Empty", 10));
        assert_eq!(s.select_choice("x"), Err(CommandError::Finished));
        assert_eq!(s.confirm_choice(), Err(CommandError::Finished));
        s.tick();
        assert_eq!(s.elapsed_seconds(), 0);
    }

    #[test]
    fn test_restart_resets_to_first_event() {
        let mut s = ScenarioSession::new(two_event_scenario());
        s.select_choice("bad").unwrap();
        s.confirm_choice().unwrap();
        s.advance(5_000);
        let fresh = s.restart();
        assert_eq!(fresh.event_index(), 0);
        assert_eq!(fresh.score(), 0);
        assert_eq!(fresh.elapsed_seconds(), 0);
        assert_eq!(fresh.status(), SessionStatus::Playing);
        assert!(fresh.decisions().is_empty());
    }

    #[test]
    fn test_progress_and_risk_label() {
        let mut s = ScenarioSession::new(two_event_scenario());
        assert_eq!(s.progress_percent(), 50.0);
        assert_eq!(s.risk_label(), "Critical Risk");
        s.select_choice("good").unwrap();
        s.confirm_choice().unwrap();
        assert_eq!(s.progress_percent(), 100.0);
        assert_eq!(s.risk_label(), "Critical Risk");
        assert_eq!(risk_label(51), "High Risk");
        assert_eq!(risk_label(151), "Medium Risk");
        assert_eq!(risk_label(301), "Low Risk");
    }

    #[test]
    fn test_max_score_takes_best_choice_per_event() {
        assert_eq!(two_event_scenario().max_score(), 125);
    }

    #[test]
    fn test_scenario_parses_camel_case_json() {
        let json = r#"{
            "id": "scenario-x",
            "title": "X",
            "difficulty": "beginner",
            "estimatedDuration": 30,
            "events": [{
                "id": "e",
                "description": "d",
                "choices": [{
                    "id": "c",
                    "text": "t",
                    "cost": 10,
                    "requiredEvidence": ["a"],
                    "consequences": [{"type": "risk_decrease", "targetId": "r", "magnitude": -0.1}]
                }]
            }]
        }"#;
        let scenario: Scenario = serde_json::from_str(json).unwrap();
        assert_eq!(scenario.win_score, 200);
        assert_eq!(scenario.time_budget_seconds(), 1800);
        assert!(scenario.events[0].choices[0].is_evidence_based());
        assert_eq!(scenario.events[0].choices[0].score_delta(), 50);
    }
}
