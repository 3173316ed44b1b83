//! Cascading failure replay for the premortem "what if we failed?" drill.
//!
//! A static graph of [`FailureEvent`]s is replayed on a virtual clock. Each
//! tick moves the clock forward by a fixed number of simulated minutes and
//! fires every event whose trigger time has been reached, in the order the
//! events appear in the graph. Fired events add severity-keyed amounts to the
//! running [`ImpactMetrics`].
//!
//! The replay depends only on the graph, the root event and the number of
//! ticks. Real time enters through [`CascadeRun::advance`], which converts
//! elapsed milliseconds into whole ticks with a [`Ticker`].
//!
//! ```
//! use axile_logic::cascade::{CascadeRun, FailureEvent, Severity};
//! use axile_logic::config::CascadeConfig;
//!
//! let graph = vec![
//!     FailureEvent::new("crash", Severity::Critical, 0),
//!     FailureEvent::new("outage", Severity::High, 5),
//! ];
//! let mut run = CascadeRun::start(graph, "crash", CascadeConfig::default()).unwrap();
//! assert_eq!(run.metrics().revenue, -50_000);
//! let fired = run.tick();
//! assert_eq!(fired.len(), 1);
//! assert_eq!(run.clock_minutes(), 5);
//! assert_eq!(run.metrics().revenue, -75_000);
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::clock::Ticker;
use crate::config::CascadeConfig;
use crate::constants::recovery;
use crate::error::CommandError;

// ============================================================================
// FAILURE GRAPH
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

/// Business impact of one fired event, before the recovery term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeverityImpact {
    pub revenue: i64,
    pub customers: i64,
    pub reputation: i32,
}

impl Severity {
    pub fn impact(self) -> SeverityImpact {
        match self {
            Self::Critical => SeverityImpact {
                revenue: -50_000,
                customers: -1_000,
                reputation: -20,
            },
            Self::High => SeverityImpact {
                revenue: -25_000,
                customers: -500,
                reputation: -15,
            },
            Self::Medium => SeverityImpact {
                revenue: -10_000,
                customers: -200,
                reputation: -10,
            },
            Self::Low => SeverityImpact {
                revenue: -5_000,
                customers: -50,
                reputation: -5,
            },
        }
    }
}

/// One node in the failure graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureEvent {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub severity: Severity,
    /// Depth from the root cause.
    #[serde(default, alias = "level")]
    pub cascade_level: u32,
    /// Simulated minute at which the event fires.
    #[serde(alias = "timestamp")]
    pub trigger_time: u32,
    /// Causal parents (event or decision ids).
    #[serde(default)]
    pub triggers: Vec<String>,
    /// Causal children. May name events outside the modelled graph.
    #[serde(default)]
    pub consequences: Vec<String>,
    #[serde(default)]
    pub preventable: bool,
}

impl FailureEvent {
    pub fn new(id: impl Into<String>, severity: Severity, trigger_time: u32) -> Self {
        let id = id.into();
        Self {
            title: id.clone(),
            id,
            description: String::new(),
            severity,
            cascade_level: 0,
            trigger_time,
            triggers: Vec::new(),
            consequences: Vec::new(),
            preventable: false,
        }
    }

    pub fn preventable(mut self) -> Self {
        self.preventable = true;
        self
    }

    pub fn at_level(mut self, level: u32) -> Self {
        self.cascade_level = level;
        self
    }

    pub fn triggered_by(mut self, parent: impl Into<String>) -> Self {
        self.triggers.push(parent.into());
        self
    }

    pub fn recovery_minutes(&self) -> u32 {
        if self.preventable {
            recovery::PREVENTABLE_MINUTES
        } else {
            recovery::UNPREVENTABLE_MINUTES
        }
    }
}

/// Aggregate business impact of a cascade run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImpactMetrics {
    pub revenue: i64,
    pub customers: i64,
    pub reputation: i32,
    pub recovery_minutes: u32,
}

impl ImpactMetrics {
    pub fn apply(&mut self, event: &FailureEvent) {
        let impact = event.severity.impact();
        self.revenue += impact.revenue;
        self.customers += impact.customers;
        self.reputation += impact.reputation;
        self.recovery_minutes = self.recovery_minutes.saturating_add(event.recovery_minutes());
    }
}

/// An event that has fired, in firing order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiredEvent {
    pub id: String,
    pub severity: Severity,
    pub cascade_level: u32,
    /// Clock reading (minutes) when it fired.
    pub fired_at: u32,
}

#[derive(Serialize)]
struct OutcomeFingerprint<'a> {
    fired: &'a [FiredEvent],
    metrics: &'a ImpactMetrics,
    clock_minutes: u32,
}

// ============================================================================
// CASCADE RUN
// ============================================================================

/// A single replay of a failure graph.
#[derive(Debug, Clone)]
pub struct CascadeRun {
    graph: Vec<FailureEvent>,
    config: CascadeConfig,
    clock_minutes: u32,
    fired: Vec<FiredEvent>,
    fired_ids: HashSet<String>,
    metrics: ImpactMetrics,
    paused: bool,
    finished: bool,
    ticker: Ticker,
}

impl CascadeRun {
    /// Start a run at minute 0 with `root_id` already fired.
    /// A step of 0 minutes is treated as 1.
    pub fn start(
        graph: Vec<FailureEvent>,
        root_id: &str,
        mut config: CascadeConfig,
    ) -> Result<Self, CommandError> {
        config.step_minutes = config.step_minutes.max(1);
        let Some(root) = graph.iter().find(|e| e.id == root_id).cloned() else {
            log::warn!("Cascade start rejected: unknown root event {}", root_id);
            return Err(CommandError::UnknownEvent(root_id.to_string()));
        };

        let mut ticker = Ticker::new(config.tick_interval_ms);
        ticker.start();
        let mut run = Self {
            graph,
            config,
            clock_minutes: 0,
            fired: Vec::new(),
            fired_ids: HashSet::new(),
            metrics: ImpactMetrics::default(),
            paused: false,
            finished: false,
            ticker,
        };
        run.fire(&root);
        log::info!(
            "Cascade started from {} ({} events, horizon {}m)",
            root_id,
            run.graph.len(),
            run.config.horizon_minutes
        );
        Ok(run)
    }

    fn fire(&mut self, event: &FailureEvent) {
        self.fired_ids.insert(event.id.clone());
        self.metrics.apply(event);
        self.fired.push(FiredEvent {
            id: event.id.clone(),
            severity: event.severity,
            cascade_level: event.cascade_level,
            fired_at: self.clock_minutes,
        });
    }

    pub fn clock_minutes(&self) -> u32 {
        self.clock_minutes
    }

    pub fn metrics(&self) -> &ImpactMetrics {
        &self.metrics
    }

    pub fn fired(&self) -> &[FiredEvent] {
        &self.fired
    }

    pub fn has_fired(&self, id: &str) -> bool {
        self.fired_ids.contains(id)
    }

    pub fn graph(&self) -> &[FailureEvent] {
        &self.graph
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Fraction of the horizon elapsed, 0.0..=1.0.
    pub fn progress(&self) -> f64 {
        if self.config.horizon_minutes == 0 {
            return 1.0;
        }
        (self.clock_minutes as f64 / self.config.horizon_minutes as f64).min(1.0)
    }

    pub fn pause(&mut self) {
        if self.finished {
            return;
        }
        self.paused = true;
        self.ticker.stop();
    }

    pub fn resume(&mut self) {
        if self.finished {
            return;
        }
        self.paused = false;
        self.ticker.start();
    }

    /// Advance the clock one step and fire everything that is due.
    /// Returns the newly fired events. Ignored while paused or finished.
    pub fn tick(&mut self) -> Vec<FiredEvent> {
        if self.paused || self.finished {
            return Vec::new();
        }
        self.clock_minutes = self.clock_minutes.saturating_add(self.config.step_minutes);

        let due: Vec<FailureEvent> = self
            .graph
            .iter()
            .filter(|e| e.trigger_time <= self.clock_minutes && !self.fired_ids.contains(&e.id))
            .cloned()
            .collect();
        let first_new = self.fired.len();
        for event in &due {
            log::debug!(
                "Cascade t={}m: {} fired ({:?})",
                self.clock_minutes,
                event.id,
                event.severity
            );
            self.fire(event);
        }

        if self.clock_minutes >= self.config.horizon_minutes {
            self.clock_minutes = self.config.horizon_minutes;
            self.finished = true;
            self.ticker.stop();
            log::info!(
                "Cascade reached horizon: {} events fired, revenue {}, recovery {}m",
                self.fired.len(),
                self.metrics.revenue,
                self.metrics.recovery_minutes
            );
        }
        self.fired[first_new..].to_vec()
    }

    /// Feed real elapsed time and run every whole tick that is due.
    pub fn advance(&mut self, elapsed_ms: u64) -> Vec<FiredEvent> {
        let ticks = self.ticker.advance(elapsed_ms);
        let mut fired = Vec::new();
        for _ in 0..ticks {
            if self.finished {
                break;
            }
            fired.extend(self.tick());
        }
        fired
    }

    /// Run to the horizon without real time.
    pub fn run_to_horizon(&mut self) {
        self.resume();
        let max_ticks = (self.config.horizon_minutes / self.config.step_minutes).saturating_add(1);
        for _ in 0..max_ticks {
            if self.finished {
                break;
            }
            self.tick();
        }
    }

    /// Stable byte encoding of the observable outcome.
    pub fn fingerprint(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(&OutcomeFingerprint {
            fired: &self.fired,
            metrics: &self.metrics,
            clock_minutes: self.clock_minutes,
        })
    }
}

// ============================================================================
// PREMORTEM DRILL
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionOutcome {
    Success,
    Failure,
    Unknown,
}

/// A response option at the premortem decision point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub cost: u64,
    /// Success rate in percent.
    pub effectiveness: u8,
    pub outcome: DecisionOutcome,
    /// Extra failures this response introduces into the cascade.
    #[serde(default)]
    pub consequences: Vec<FailureEvent>,
}

/// A complete premortem exercise: the base failure graph and the responses
/// the player can pick from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureScenario {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub initial_trigger: String,
    pub root_event_id: String,
    pub events: Vec<FailureEvent>,
    #[serde(default)]
    pub decisions: Vec<Decision>,
}

impl FailureScenario {
    pub fn decision(&self, id: &str) -> Option<&Decision> {
        self.decisions.iter().find(|d| d.id == id)
    }

    /// Base graph followed by the decision's extra events. Extra events that
    /// reuse a base id are skipped.
    pub fn graph_for(&self, decision: Option<&Decision>) -> Vec<FailureEvent> {
        let mut graph = self.events.clone();
        if let Some(decision) = decision {
            for extra in &decision.consequences {
                if !graph.iter().any(|e| e.id == extra.id) {
                    graph.push(extra.clone());
                }
            }
        }
        graph
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PremortemPhase {
    Setup,
    DecisionPoint,
    Cascade,
    Results,
}

impl PremortemPhase {
    pub fn name(self) -> &'static str {
        match self {
            Self::Setup => "setup",
            Self::DecisionPoint => "decision_point",
            Self::Cascade => "cascade",
            Self::Results => "results",
        }
    }
}

/// Phased wrapper around a [`CascadeRun`].
#[derive(Debug, Clone)]
pub struct PremortemSimulation {
    scenario: FailureScenario,
    config: CascadeConfig,
    phase: PremortemPhase,
    selected_decision: Option<String>,
    run: Option<CascadeRun>,
}

impl PremortemSimulation {
    pub fn new(scenario: FailureScenario, config: CascadeConfig) -> Self {
        Self {
            scenario,
            config,
            phase: PremortemPhase::Setup,
            selected_decision: None,
            run: None,
        }
    }

    pub fn scenario(&self) -> &FailureScenario {
        &self.scenario
    }

    pub fn phase(&self) -> PremortemPhase {
        self.phase
    }

    pub fn selected_decision(&self) -> Option<&Decision> {
        self.selected_decision
            .as_deref()
            .and_then(|id| self.scenario.decision(id))
    }

    pub fn run(&self) -> Option<&CascadeRun> {
        self.run.as_ref()
    }

    /// Current metrics, zero before a run starts.
    pub fn metrics(&self) -> ImpactMetrics {
        self.run.as_ref().map(|r| *r.metrics()).unwrap_or_default()
    }

    pub fn is_playing(&self) -> bool {
        self.phase == PremortemPhase::Cascade && self.run.as_ref().map_or(false, |r| !r.is_paused())
    }

    fn require_phase(&self, allowed: &[PremortemPhase]) -> Result<(), CommandError> {
        if allowed.contains(&self.phase) {
            Ok(())
        } else {
            log::warn!("Premortem command rejected in phase {}", self.phase.name());
            Err(CommandError::WrongPhase(self.phase.name()))
        }
    }

    /// Setup → DecisionPoint.
    pub fn begin_analysis(&mut self) -> Result<(), CommandError> {
        self.require_phase(&[PremortemPhase::Setup])?;
        self.phase = PremortemPhase::DecisionPoint;
        Ok(())
    }

    pub fn select_decision(&mut self, decision_id: &str) -> Result<(), CommandError> {
        self.require_phase(&[PremortemPhase::DecisionPoint])?;
        if self.scenario.decision(decision_id).is_none() {
            log::warn!("Premortem: unknown decision {}", decision_id);
            return Err(CommandError::UnknownDecision(decision_id.to_string()));
        }
        self.selected_decision = Some(decision_id.to_string());
        Ok(())
    }

    /// Start replaying from `root_id` with the selected decision's extra
    /// events merged into the graph.
    pub fn start_cascade(&mut self, root_id: &str) -> Result<(), CommandError> {
        self.require_phase(&[PremortemPhase::Setup, PremortemPhase::DecisionPoint])?;
        let graph = self.scenario.graph_for(self.selected_decision());
        let run = CascadeRun::start(graph, root_id, self.config.clone())?;
        self.run = Some(run);
        self.phase = PremortemPhase::Cascade;
        Ok(())
    }

    /// Start from the scenario's own root cause.
    pub fn start_default_cascade(&mut self) -> Result<(), CommandError> {
        let root = self.scenario.root_event_id.clone();
        self.start_cascade(&root)
    }

    pub fn pause(&mut self) {
        if let Some(run) = self.run.as_mut() {
            run.pause();
        }
    }

    pub fn resume(&mut self) {
        if self.phase == PremortemPhase::Cascade {
            if let Some(run) = self.run.as_mut() {
                run.resume();
            }
        }
    }

    pub fn toggle_play(&mut self) {
        if self.is_playing() {
            self.pause();
        } else {
            self.resume();
        }
    }

    fn sync_phase(&mut self) {
        if self.phase == PremortemPhase::Cascade && self.run.as_ref().map_or(false, |r| r.is_finished()) {
            self.phase = PremortemPhase::Results;
        }
    }

    /// One cascade step (direct drive).
    pub fn tick(&mut self) -> Vec<FiredEvent> {
        if self.phase != PremortemPhase::Cascade {
            return Vec::new();
        }
        let fired = self.run.as_mut().map(CascadeRun::tick).unwrap_or_default();
        self.sync_phase();
        fired
    }

    /// Feed real elapsed time.
    pub fn advance(&mut self, elapsed_ms: u64) -> Vec<FiredEvent> {
        if self.phase != PremortemPhase::Cascade {
            return Vec::new();
        }
        let fired = self
            .run
            .as_mut()
            .map(|r| r.advance(elapsed_ms))
            .unwrap_or_default();
        self.sync_phase();
        fired
    }

    /// Discard the run and go back to the setup screen.
    pub fn reset(&mut self) {
        if self.run.is_some() {
            log::info!("Premortem reset");
        }
        self.phase = PremortemPhase::Setup;
        self.selected_decision = None;
        self.run = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> CascadeConfig {
        CascadeConfig::default()
    }

    fn sample_graph() -> Vec<FailureEvent> {
        vec![
            FailureEvent::new("initial_failure", Severity::Critical, 0),
            FailureEvent::new("service_unavailable", Severity::Critical, 2)
                .preventable()
                .at_level(1)
                .triggered_by("initial_failure"),
            FailureEvent::new("customer_complaints", Severity::High, 15)
                .preventable()
                .at_level(2),
            FailureEvent::new("revenue_loss", Severity::Critical, 10)
                .preventable()
                .at_level(2),
            FailureEvent::new("reputation_damage", Severity::High, 60)
                .preventable()
                .at_level(3),
        ]
    }

    #[test]
    fn test_severity_table() {
        assert_eq!(Severity::Critical.impact().revenue, -50_000);
        assert_eq!(Severity::High.impact().customers, -500);
        assert_eq!(Severity::Medium.impact().reputation, -10);
        assert_eq!(Severity::Low.impact().revenue, -5_000);
        assert!(Severity::Critical > Severity::Low);
    }

    #[test]
    fn test_root_alone_contributes_before_first_tick() {
        let graph = vec![
            FailureEvent::new("root", Severity::Critical, 0),
            FailureEvent::new("later", Severity::Low, 30),
        ];
        let mut run = CascadeRun::start(graph, "root", config()).unwrap();
        let fired = run.tick();
        assert!(fired.is_empty());
        assert_eq!(run.clock_minutes(), 5);
        assert_eq!(run.fired().len(), 1);
        assert_eq!(run.metrics().revenue, -50_000);
        assert_eq!(run.metrics().recovery_minutes, 60);
    }

    #[test]
    fn test_unknown_root_is_rejected() {
        let err = CascadeRun::start(sample_graph(), "nope", config()).unwrap_err();
        assert_eq!(err, CommandError::UnknownEvent("nope".into()));
    }

    #[test]
    fn test_events_fire_once_in_list_order() {
        let mut run = CascadeRun::start(sample_graph(), "initial_failure", config()).unwrap();
        // Jump straight to minute 15 in one step.
        let mut cfg = config();
        cfg.step_minutes = 15;
        let mut big = CascadeRun::start(sample_graph(), "initial_failure", cfg).unwrap();
        let fired: Vec<_> = big.tick().into_iter().map(|f| f.id).collect();
        assert_eq!(
            fired,
            vec!["service_unavailable", "customer_complaints", "revenue_loss"]
        );

        run.run_to_horizon();
        let mut ids: Vec<_> = run.fired().iter().map(|f| f.id.clone()).collect();
        let total = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), total);
        assert_eq!(total, 5);
    }

    #[test]
    fn test_full_run_metrics() {
        let mut run = CascadeRun::start(sample_graph(), "initial_failure", config()).unwrap();
        run.run_to_horizon();
        let m = run.metrics();
        assert_eq!(m.revenue, -200_000);
        assert_eq!(m.customers, -4_000);
        assert_eq!(m.reputation, -90);
        assert_eq!(m.recovery_minutes, 60 + 4 * 30);
        assert_eq!(run.clock_minutes(), 120);
        assert!(run.is_finished());
        assert!(run.tick().is_empty());
    }

    #[test]
    fn test_events_at_horizon_still_fire() {
        let graph = vec![
            FailureEvent::new("root", Severity::Low, 0),
            FailureEvent::new("edge", Severity::Low, 120),
        ];
        let mut run = CascadeRun::start(graph, "root", config()).unwrap();
        run.run_to_horizon();
        assert!(run.has_fired("edge"));
    }

    #[test]
    fn test_zero_step_run_still_reaches_horizon() {
        let cfg = CascadeConfig {
            step_minutes: 0,
            horizon_minutes: 120,
            ..config()
        };
        let mut run = CascadeRun::start(sample_graph(), "initial_failure", cfg.clone()).unwrap();
        run.run_to_horizon();
        assert!(run.is_finished());
        assert_eq!(run.clock_minutes(), 120);

        let mut fed = CascadeRun::start(sample_graph(), "initial_failure", cfg).unwrap();
        fed.advance(u64::MAX);
        assert!(fed.is_finished());
        assert_eq!(run.fingerprint().unwrap(), fed.fingerprint().unwrap());
    }

    #[test]
    fn test_pause_keeps_clock_and_fired_set() {
        let mut run = CascadeRun::start(sample_graph(), "initial_failure", config()).unwrap();
        run.advance(2_000);
        assert_eq!(run.clock_minutes(), 10);
        run.pause();
        assert!(run.advance(10_000).is_empty());
        assert!(run.tick().is_empty());
        assert_eq!(run.clock_minutes(), 10);
        assert_eq!(run.fired().len(), 3);
        run.resume();
        run.advance(1_000);
        assert_eq!(run.clock_minutes(), 15);
    }

    #[test]
    fn test_advance_matches_direct_ticks() {
        let mut by_time = CascadeRun::start(sample_graph(), "initial_failure", config()).unwrap();
        let mut by_tick = by_time.clone();
        for ms in [300, 1700, 999, 1, 4000, 2000] {
            by_time.advance(ms);
        }
        for _ in 0..10 {
            by_tick.tick();
        }
        assert_eq!(by_time.fingerprint().unwrap(), by_tick.fingerprint().unwrap());
    }

    #[test]
    fn test_premortem_phase_flow() {
        let scenario = FailureScenario {
            title: "t".into(),
            description: String::new(),
            initial_trigger: String::new(),
            root_event_id: "initial_failure".into(),
            events: sample_graph(),
            decisions: vec![Decision {
                id: "immediate_restart".into(),
                title: "Restart".into(),
                description: String::new(),
                cost: 50_000,
                effectiveness: 30,
                outcome: DecisionOutcome::Failure,
                consequences: vec![FailureEvent::new("data_corruption", Severity::High, 5)
                    .preventable()
                    .triggered_by("immediate_restart")],
            }],
        };
        let mut sim = PremortemSimulation::new(scenario, config());
        assert_eq!(
            sim.select_decision("immediate_restart"),
            Err(CommandError::WrongPhase("setup"))
        );
        sim.begin_analysis().unwrap();
        assert_eq!(
            sim.select_decision("bogus"),
            Err(CommandError::UnknownDecision("bogus".into()))
        );
        sim.select_decision("immediate_restart").unwrap();
        assert!(sim.start_cascade("bogus").is_err());
        assert_eq!(sim.phase(), PremortemPhase::DecisionPoint);

        sim.start_default_cascade().unwrap();
        assert!(sim.is_playing());
        let first: Vec<_> = sim.tick().into_iter().map(|f| f.id).collect();
        assert_eq!(first, vec!["service_unavailable", "data_corruption"]);

        sim.toggle_play();
        assert!(!sim.is_playing());
        assert!(sim.advance(60_000).is_empty());
        sim.toggle_play();
        sim.advance(60_000);
        assert_eq!(sim.phase(), PremortemPhase::Results);
        assert_eq!(sim.metrics().revenue, -225_000);

        sim.reset();
        assert_eq!(sim.phase(), PremortemPhase::Setup);
        assert!(sim.selected_decision().is_none());
        assert_eq!(sim.metrics(), ImpactMetrics::default());
    }

    #[test]
    fn test_failure_event_accepts_field_aliases() {
        let json = r#"{"id":"x","title":"X","severity":"medium","level":2,"timestamp":10,
            "triggers":["a"],"consequences":["b"],"preventable":true}"#;
        let e: FailureEvent = serde_json::from_str(json).unwrap();
        assert_eq!(e.cascade_level, 2);
        assert_eq!(e.trigger_time, 10);
        assert_eq!(e.recovery_minutes(), 30);
    }
}
