//! Integration tests for a full play session.
//!
//! Exercises: Catalog → App → ScenarioSession → Store → Achievements,
//! plus the premortem cascade, the risk drill and the mentor on the same
//! virtual clock.
//!
//! All tests are pure logic: no UI, no real timers.

use axile_logic::app::App;
use axile_logic::cascade::{CascadeRun, PremortemPhase};
use axile_logic::catalog::Catalog;
use axile_logic::config::{CascadeConfig, EngineConfig, MentorConfig};
use axile_logic::drill::{DomainKind, DrillPhase, DrillResponse};
use axile_logic::error::CommandError;
use axile_logic::mentor::Persona;
use axile_logic::scenario::{
    Choice, Consequence, ConsequenceKind, Scenario, ScenarioEvent, SessionStatus,
};
use axile_logic::store::Action;

// ── Helpers ────────────────────────────────────────────────────────────

fn objective_choice(id: &str) -> Choice {
    Choice::new(id, "Push the objective").with_consequence(Consequence::new(
        ConsequenceKind::ObjectiveChange,
        "obj-001",
        0.2,
    ))
}

/// Three events, each worth 75 with the right choice: 225 beats the 200 pass mark.
fn winnable_catalog() -> Catalog {
    let mut catalog = Catalog::builtin().unwrap();
    let mut scenario = Scenario::new("scenario-win", "Board Review", 30);
    for i in 0..3 {
        scenario = scenario.with_event(
            ScenarioEvent::new(format!("e{}", i), "The board asks for a plan")
                .with_choice(objective_choice("push"))
                .with_choice(Choice::new("wait", "Do nothing")),
        );
    }
    catalog.scenarios.push(scenario);
    catalog.validate().unwrap();
    catalog
}

fn play(app: &mut App, choice: &str) -> SessionStatus {
    loop {
        app.select_choice(choice).unwrap();
        let status = app.confirm_choice().unwrap();
        if status.is_terminal() {
            return status;
        }
        app.advance(1_000);
    }
}

// ── Scenario flow ──────────────────────────────────────────────────────

#[test]
fn builtin_scenario_fails_below_pass_mark() {
    let mut app = App::builtin(EngineConfig::default()).unwrap();
    app.start_scenario("scenario-001").unwrap();
    assert_eq!(play(&mut app, "choice-002"), SessionStatus::Failed);

    let session = app.session().unwrap();
    assert_eq!(session.score(), 50);
    assert_eq!(session.evidence_based_decisions(), 1);
    assert_eq!(session.cost_spent(), 500_000);
    assert_eq!(app.state().user_progress.total_score, 1250);
}

#[test]
fn winning_run_credits_player() {
    let mut app = App::new(winnable_catalog(), EngineConfig::default());
    app.take_notices();
    app.advance(7_000);
    app.start_scenario("scenario-win").unwrap();
    assert_eq!(play(&mut app, "push"), SessionStatus::Completed);

    let state = app.state();
    assert_eq!(state.user_progress.total_score, 1475);
    assert!(state.user_progress.has_completed("scenario-win"));
    assert!(state.current_scenario_id.is_none());

    // The starting profile already holds everything reachable at 1475.
    assert!(app.take_notices().is_empty());
    let last = app.mentor().messages().last().unwrap();
    assert!(last.content.contains("completed scenario with score 225"));
}

#[test]
fn slow_run_fails_on_time() {
    let mut app = App::new(winnable_catalog(), EngineConfig::default());
    app.start_scenario("scenario-win").unwrap();
    app.select_choice("push").unwrap();
    app.confirm_choice().unwrap();
    app.select_choice("push").unwrap();
    app.confirm_choice().unwrap();
    // The 30 minute budget is spent before the last decision.
    app.advance(30 * 60 * 1_000);
    app.select_choice("push").unwrap();
    assert_eq!(app.confirm_choice(), Ok(SessionStatus::Failed));
    assert_eq!(app.session().unwrap().score(), 225);
}

#[test]
fn paused_session_keeps_time_and_rejects_choices() {
    let mut app = App::builtin(EngineConfig::default()).unwrap();
    app.start_scenario("scenario-001").unwrap();
    app.advance(2_500);
    app.toggle_pause().unwrap();
    app.advance(10_000);
    assert_eq!(app.session().unwrap().elapsed_seconds(), 2);
    assert_eq!(app.select_choice("choice-001"), Err(CommandError::Paused));
    app.toggle_pause().unwrap();
    app.advance(1_000);
    assert_eq!(app.session().unwrap().elapsed_seconds(), 3);
}

#[test]
fn restart_starts_from_scratch() {
    let mut app = App::new(winnable_catalog(), EngineConfig::default());
    app.start_scenario("scenario-win").unwrap();
    app.select_choice("push").unwrap();
    app.confirm_choice().unwrap();
    app.advance(4_000);
    app.restart_scenario().unwrap();
    let session = app.session().unwrap();
    assert_eq!(session.event_index(), 0);
    assert_eq!(session.score(), 0);
    assert_eq!(session.elapsed_seconds(), 0);
}

// ── Premortem ──────────────────────────────────────────────────────────

#[test]
fn premortem_decision_changes_outcome() {
    let mut app = App::builtin(EngineConfig::default()).unwrap();
    let sim = app.open_premortem(0).unwrap();
    sim.begin_analysis().unwrap();
    sim.select_decision("switch_backup").unwrap();
    sim.start_default_cascade().unwrap();
    app.advance(60_000);

    let sim = app.premortem().unwrap();
    assert_eq!(sim.phase(), PremortemPhase::Results);
    let run = sim.run().unwrap();
    assert!(run.has_fired("backup_overload"));
    assert_eq!(run.clock_minutes(), 120);
    // Unpreventable: another 60 minutes on top of the base run.
    assert_eq!(sim.metrics().recovery_minutes, 240);
}

#[test]
fn cascade_outcome_is_reproducible() {
    let catalog = Catalog::builtin().unwrap();
    let failure = &catalog.failure_scenarios[0];
    let config = EngineConfig::default().cascade;

    let mut stepped = CascadeRun::start(failure.graph_for(None), "initial_failure", config.clone()).unwrap();
    stepped.run_to_horizon();

    // Same run fed through uneven real-time chunks.
    let mut fed = CascadeRun::start(failure.graph_for(None), "initial_failure", config).unwrap();
    for chunk in [300, 1_700, 999, 20_001, 5_000] {
        fed.advance(chunk);
    }
    assert!(fed.is_finished());
    assert_eq!(stepped.fingerprint().unwrap(), fed.fingerprint().unwrap());
}

#[test]
fn huge_elapsed_time_with_zero_step_finishes_every_engine() {
    let config = EngineConfig {
        cascade: CascadeConfig {
            step_minutes: 0,
            ..CascadeConfig::default()
        },
        ..EngineConfig::default()
    };
    let mut app = App::builtin(config).unwrap();
    app.start_scenario("scenario-001").unwrap();
    app.drill_mut().select(DomainKind::Financial).unwrap();
    let sim = app.open_premortem(0).unwrap();
    sim.begin_analysis().unwrap();
    sim.select_decision("switch_backup").unwrap();
    sim.start_default_cascade().unwrap();

    app.advance(500);
    app.advance(u64::MAX);

    assert_eq!(app.session().unwrap().elapsed_seconds(), u32::MAX);
    assert_eq!(app.drill().phase(), DrillPhase::Decision);
    let sim = app.premortem().unwrap();
    assert_eq!(sim.phase(), PremortemPhase::Results);
    assert_eq!(sim.run().unwrap().clock_minutes(), 120);
}

// ── Drill and mentor on the app clock ──────────────────────────────────

#[test]
fn drill_completes_on_app_clock() {
    let mut app = App::builtin(EngineConfig::default()).unwrap();
    app.drill_mut().select(DomainKind::Financial).unwrap();
    app.advance(5_000);
    assert_eq!(app.drill().progress(), 100);
    assert_eq!(app.drill().phase(), DrillPhase::Analysis);
    app.advance(500);
    assert_eq!(app.drill().phase(), DrillPhase::Decision);
    let decision = app.drill_mut().decide(DrillResponse::Mitigate).unwrap();
    assert_eq!(decision.domain, DomainKind::Financial);
    assert_eq!(app.drill().history().len(), 1);
}

#[test]
fn mentor_reply_arrives_and_stale_reply_is_dropped() {
    let config = EngineConfig {
        mentor: MentorConfig {
            seed: 7,
            ..MentorConfig::default()
        },
        ..EngineConfig::default()
    };
    let mut app = App::builtin(config).unwrap();
    app.mentor_mut().send("How do I handle a budget risk?").unwrap();
    assert!(app.mentor().is_typing());
    let report = app.advance(3_000);
    assert_eq!(report.replies.len(), 1);
    assert!(report.replies[0].from_mentor);

    app.mentor_mut().send("And the timeline?").unwrap();
    app.mentor_mut().switch_persona(Persona::Alex);
    let report = app.advance(5_000);
    assert!(report.replies.is_empty());
    assert_eq!(app.mentor().persona(), Persona::Alex);
}

// ── Store interplay ────────────────────────────────────────────────────

#[test]
fn reset_state_discards_progress_but_not_catalog() {
    let mut app = App::new(winnable_catalog(), EngineConfig::default());
    app.start_scenario("scenario-win").unwrap();
    play(&mut app, "push");
    assert_eq!(app.state().user_progress.total_score, 1475);

    app.dispatch(&Action::ResetState);
    assert_eq!(app.state().user_progress.total_score, 1250);
    assert!(app.state().catalog().scenario("scenario-win").is_some());
}

#[test]
fn unlock_timestamps_follow_virtual_clock() {
    let mut app = App::builtin(EngineConfig::default()).unwrap();
    app.advance(12_345);
    app.dispatch(&Action::CompleteScenario {
        scenario_id: "scenario-001".into(),
        score: 900,
    });
    let perfect = app.state().achievements.get("perfect_score").unwrap();
    assert_eq!(perfect.unlocked_at, Some(12_345));

    // Latched: later progress never moves the timestamp.
    app.advance(1_000);
    app.dispatch(&Action::CompleteScenario {
        scenario_id: "scenario-003".into(),
        score: 10,
    });
    let perfect = app.state().achievements.get("perfect_score").unwrap();
    assert_eq!(perfect.unlocked_at, Some(12_345));
}
