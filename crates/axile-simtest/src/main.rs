//! AXiLe Headless Simulation Harness
//!
//! Validates game logic and bundled content without a UI.
//! Runs entirely in-process on virtual time: no timers, no rendering.
//!
//! Usage:
//!   cargo run -p axile-simtest
//!   cargo run -p axile-simtest -- --verbose
//!
//! Set `RUST_LOG=debug` to see engine logging.

use axile_logic::app::App;
use axile_logic::cascade::{CascadeRun, PremortemPhase, PremortemSimulation};
use axile_logic::catalog::Catalog;
use axile_logic::config::{validate_config, EngineConfig};
use axile_logic::drill::{DomainKind, DrillPhase, DrillResponse};
use axile_logic::mentor::{MentorChat, Persona, SUGGESTIONS};
use axile_logic::progress;
use axile_logic::scenario::{Choice, Scenario, ScenarioSession, SessionStatus};
use axile_logic::store::Action;

// ── Extra scenario pack (same shape as the built-in catalog) ────────────
const SCENARIO_PACK_JSON: &str = include_str!("../../../data/scenarios.json");

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn main() {
    let verbose = std::env::args().any(|a| a == "--verbose");
    let default_filter = if verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
    println!("=== AXiLe Simulation Harness ===\n");

    let mut results = Vec::new();

    // 1. Catalog content
    results.extend(validate_catalogs(verbose));

    // 2. Scenario progression
    results.extend(validate_scenarios(verbose));

    // 3. Cascading failures
    results.extend(validate_cascades(verbose));

    // 4. Progress & achievements
    results.extend(validate_progression(verbose));

    // 5. Risk drill sweep
    results.extend(validate_drill(verbose));

    // 6. Mentor chat
    results.extend(validate_mentor(verbose));

    // 7. Engine configuration
    results.extend(validate_engine_config(verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

fn best_choice(choices: &[Choice]) -> Option<&Choice> {
    choices.iter().max_by_key(|c| c.score_delta())
}

fn worst_choice(choices: &[Choice]) -> Option<&Choice> {
    choices.iter().min_by_key(|c| c.score_delta())
}

/// Play every event with `pick`, confirming immediately.
fn play_with(scenario: &Scenario, pick: fn(&[Choice]) -> Option<&Choice>) -> ScenarioSession {
    let mut session = ScenarioSession::new(scenario.clone());
    while let Some(event) = session.current_event() {
        if session.status().is_terminal() {
            break;
        }
        let Some(choice_id) = pick(&event.choices).map(|c| c.id.clone()) else {
            break;
        };
        if session.select_choice(&choice_id).is_err() || session.confirm_choice().is_err() {
            break;
        }
    }
    session
}

// ── 1. Catalog Content ──────────────────────────────────────────────────

fn validate_catalogs(verbose: bool) -> Vec<TestResult> {
    println!("--- Catalog Content ---");
    let mut results = Vec::new();

    let builtin = match Catalog::builtin() {
        Ok(c) => c,
        Err(e) => {
            results.push(TestResult {
                name: "catalog_builtin_parse".into(),
                passed: false,
                detail: format!("built-in catalog rejected: {}", e),
            });
            return results;
        }
    };
    results.push(TestResult {
        name: "catalog_builtin_parse".into(),
        passed: true,
        detail: format!(
            "{} scenarios, {} failure scenarios, {} achievements",
            builtin.scenarios.len(),
            builtin.failure_scenarios.len(),
            builtin.achievements.len()
        ),
    });

    match Catalog::from_json_str(SCENARIO_PACK_JSON) {
        Ok(pack) => results.push(TestResult {
            name: "catalog_pack_parse".into(),
            passed: !pack.scenarios.is_empty(),
            detail: format!("{} scenarios in pack", pack.scenarios.len()),
        }),
        Err(e) => results.push(TestResult {
            name: "catalog_pack_parse".into(),
            passed: false,
            detail: format!("scenario pack rejected: {}", e),
        }),
    }

    // Every drill domain has content
    let missing: Vec<_> = DomainKind::ALL
        .iter()
        .filter(|k| !builtin.domains.iter().any(|d| d.kind == **k))
        .map(|k| k.name())
        .collect();
    results.push(TestResult {
        name: "catalog_all_domains".into(),
        passed: missing.is_empty(),
        detail: if missing.is_empty() {
            "all 6 risk domains present".into()
        } else {
            format!("missing domains: {}", missing.join(", "))
        },
    });

    // Risk scores stay in the unit square
    let bad_risks: Vec<_> = builtin
        .okrm
        .risks
        .iter()
        .filter(|r| !(0.0..=1.0).contains(&r.score()))
        .map(|r| r.id.as_str())
        .collect();
    results.push(TestResult {
        name: "catalog_risk_scores".into(),
        passed: bad_risks.is_empty(),
        detail: format!("{} risks, {} out of range", builtin.okrm.risks.len(), bad_risks.len()),
    });

    if verbose {
        println!("  Top risks:");
        for risk in builtin.okrm.highest_priority_risks(5) {
            println!("    {:10} {:.2} {}", risk.id, risk.score(), risk.title);
        }
    }

    results
}

// ── 2. Scenario Progression ─────────────────────────────────────────────

fn validate_scenarios(verbose: bool) -> Vec<TestResult> {
    println!("--- Scenario Progression ---");
    let mut results = Vec::new();

    let pack = match Catalog::from_json_str(SCENARIO_PACK_JSON) {
        Ok(p) => p,
        Err(e) => {
            results.push(TestResult {
                name: "scenario_pack_load".into(),
                passed: false,
                detail: e.to_string(),
            });
            return results;
        }
    };

    for scenario in &pack.scenarios {
        let best = play_with(scenario, best_choice);
        results.push(TestResult {
            name: format!("scenario_{}_winnable", scenario.id),
            passed: best.status() == SessionStatus::Completed,
            detail: format!(
                "best play: {:?} with {} (pass mark {})",
                best.status(),
                best.score(),
                scenario.win_score
            ),
        });

        let worst = play_with(scenario, worst_choice);
        results.push(TestResult {
            name: format!("scenario_{}_losable", scenario.id),
            passed: worst.status() == SessionStatus::Failed,
            detail: format!("worst play: {:?} with {}", worst.status(), worst.score()),
        });

        // Out of time: the best line still fails
        let mut late = ScenarioSession::new(scenario.clone());
        late.advance(scenario.time_budget_seconds() as u64 * 1_000);
        while let Some(id) = late
            .current_event()
            .and_then(|e| best_choice(&e.choices))
            .map(|c| c.id.clone())
        {
            if late.select_choice(&id).is_err() || late.confirm_choice().is_err() {
                break;
            }
        }
        results.push(TestResult {
            name: format!("scenario_{}_time_budget", scenario.id),
            passed: late.status() == SessionStatus::Failed,
            detail: format!("{}s elapsed of {}s", late.elapsed_seconds(), scenario.time_budget_seconds()),
        });

        if verbose {
            println!(
                "  {}: max score {}, best line {} decisions, cost {}",
                scenario.id,
                scenario.max_score(),
                best.decisions().len(),
                best.cost_spent()
            );
        }
    }

    // Pause freezes the clock and blocks decisions
    let builtin = Catalog::builtin().ok();
    if let Some(scenario) = builtin.as_ref().and_then(|c| c.scenarios.first()) {
        let mut session = ScenarioSession::new(scenario.clone());
        session.advance(3_000);
        session.pause();
        session.advance(60_000);
        let blocked = session
            .current_event()
            .and_then(|e| e.choices.first())
            .map(|c| c.id.clone())
            .map_or(false, |id| session.select_choice(&id).is_err());
        results.push(TestResult {
            name: "scenario_pause".into(),
            passed: session.elapsed_seconds() == 3 && blocked,
            detail: format!("elapsed {}s while paused, selection blocked={}", session.elapsed_seconds(), blocked),
        });
    }

    results
}

// ── 3. Cascading Failures ───────────────────────────────────────────────

fn validate_cascades(verbose: bool) -> Vec<TestResult> {
    println!("--- Cascading Failures ---");
    let mut results = Vec::new();
    let config = EngineConfig::default().cascade;

    let Ok(catalog) = Catalog::builtin() else {
        return results;
    };

    for failure in &catalog.failure_scenarios {
        let mut run = match CascadeRun::start(failure.graph_for(None), &failure.root_event_id, config.clone()) {
            Ok(r) => r,
            Err(e) => {
                results.push(TestResult {
                    name: "cascade_start".into(),
                    passed: false,
                    detail: e.to_string(),
                });
                continue;
            }
        };
        run.run_to_horizon();
        let all_fired = failure.events.iter().all(|e| run.has_fired(&e.id));
        results.push(TestResult {
            name: "cascade_full_run".into(),
            passed: all_fired && run.is_finished(),
            detail: format!(
                "{} fired, revenue {}, customers {}, reputation {}, recovery {}m",
                run.fired().len(),
                run.metrics().revenue,
                run.metrics().customers,
                run.metrics().reputation,
                run.metrics().recovery_minutes
            ),
        });

        // Determinism
        let mut again = match CascadeRun::start(failure.graph_for(None), &failure.root_event_id, config.clone()) {
            Ok(r) => r,
            Err(_) => continue,
        };
        again.advance(u64::from(config.horizon_minutes / config.step_minutes.max(1)) * config.tick_interval_ms);
        let same = matches!((run.fingerprint(), again.fingerprint()), (Ok(a), Ok(b)) if a == b);
        results.push(TestResult {
            name: "cascade_deterministic".into(),
            passed: same,
            detail: "direct ticks and fed time give identical outcomes".into(),
        });

        // Every decision replays to Results
        for decision in &failure.decisions {
            let mut sim = PremortemSimulation::new(failure.clone(), config.clone());
            let started = sim.begin_analysis().is_ok()
                && sim.select_decision(&decision.id).is_ok()
                && sim.start_default_cascade().is_ok();
            while started && sim.phase() == PremortemPhase::Cascade {
                sim.tick();
            }
            let metrics = sim.metrics();
            results.push(TestResult {
                name: format!("premortem_{}", decision.id),
                passed: started && sim.phase() == PremortemPhase::Results,
                detail: format!(
                    "{:?}: revenue {}, recovery {}m",
                    decision.outcome, metrics.revenue, metrics.recovery_minutes
                ),
            });
            if verbose {
                if let Some(run) = sim.run() {
                    for fired in run.fired() {
                        println!("    t={:3}m {:?} {}", fired.fired_at, fired.severity, fired.id);
                    }
                }
            }
        }
    }

    results
}

// ── 4. Progress & Achievements ──────────────────────────────────────────

fn validate_progression(verbose: bool) -> Vec<TestResult> {
    println!("--- Progress & Achievements ---");
    let mut results = Vec::new();

    let mut app = match App::builtin(EngineConfig::default()) {
        Ok(a) => a,
        Err(e) => {
            results.push(TestResult {
                name: "progress_app".into(),
                passed: false,
                detail: e.to_string(),
            });
            return results;
        }
    };
    let initial = app.take_notices();
    results.push(TestResult {
        name: "progress_initial_unlocks".into(),
        passed: !initial.is_empty(),
        detail: format!("{} achievements unlocked by the starting profile", initial.len()),
    });

    app.advance(60_000);
    app.dispatch(&Action::CompleteScenario {
        scenario_id: "scenario-001".into(),
        score: 900,
    });
    let notices = app.take_notices();
    let perfect = app.state().achievements.get("perfect_score");
    results.push(TestResult {
        name: "progress_perfect_score".into(),
        passed: perfect.map_or(false, |a| a.unlocked && a.unlocked_at == Some(60_000)),
        detail: format!("{} new unlocks after +900", notices.len()),
    });

    let before = app.state().achievements.unlocked_count();
    app.dispatch(&Action::CompleteScenario {
        scenario_id: "scenario-001".into(),
        score: -50,
    });
    results.push(TestResult {
        name: "progress_negative_not_credited".into(),
        passed: app.state().user_progress.total_score == 2150
            && app.state().achievements.unlocked_count() == before,
        detail: format!("total {}", app.state().user_progress.total_score),
    });

    // Level thresholds
    let ppl = app.config().progress.points_per_level;
    let levels_ok = (0..10u32).all(|n| progress::level_for_score(n * ppl, ppl) == n + 1);
    results.push(TestResult {
        name: "progress_level_thresholds".into(),
        passed: levels_ok,
        detail: format!("one level per {} points", ppl),
    });

    if verbose {
        let tracker = &app.state().achievements;
        println!(
            "  {} / {} unlocked, {} points, {}% complete",
            tracker.unlocked_count(),
            tracker.achievements().len(),
            tracker.total_points(),
            tracker.completion_rate()
        );
        if let Some(next) = progress::next_milestone(app.state().user_progress.total_score) {
            println!("  Next milestone: {} at {}", next.name, next.points);
        }
    }

    results
}

// ── 5. Risk Drill ───────────────────────────────────────────────────────

fn validate_drill(_verbose: bool) -> Vec<TestResult> {
    println!("--- Risk Drill ---");
    let mut results = Vec::new();

    let Ok(mut app) = App::builtin(EngineConfig::default()) else {
        return results;
    };
    let step_ms = app.config().drill.tick_interval_ms;
    let responses = [DrillResponse::Mitigate, DrillResponse::Monitor, DrillResponse::Accept];

    for (i, kind) in DomainKind::ALL.iter().enumerate() {
        let selected = app.drill_mut().select(*kind).is_ok();
        // Ten steps to 100%, one more to open the decision.
        for _ in 0..11 {
            app.advance(step_ms);
        }
        let ready = app.drill().phase() == DrillPhase::Decision;
        let decided = app.drill_mut().decide(responses[i % responses.len()]).is_ok();
        results.push(TestResult {
            name: format!("drill_{}", kind.name()),
            passed: selected && ready && decided,
            detail: format!("selected={} ready={} decided={}", selected, ready, decided),
        });
    }

    results.push(TestResult {
        name: "drill_history".into(),
        passed: app.drill().history().len() == DomainKind::ALL.len(),
        detail: format!("{} decisions recorded", app.drill().history().len()),
    });

    results
}

// ── 6. Mentor Chat ──────────────────────────────────────────────────────

fn validate_mentor(_verbose: bool) -> Vec<TestResult> {
    println!("--- Mentor Chat ---");
    let mut results = Vec::new();
    let config = EngineConfig::default().mentor;
    let max_delay = config.base_delay_ms + config.jitter_ms;

    let mut chat = MentorChat::new(config.clone());
    let sent = chat.send("How do I assess a budget risk?").is_ok();
    let replies = chat.advance(max_delay);
    results.push(TestResult {
        name: "mentor_reply_delay".into(),
        passed: sent && replies.len() == 1,
        detail: format!("{} replies within {}ms", replies.len(), max_delay),
    });

    let _ = chat.send("What about the timeline?");
    chat.switch_persona(Persona::Alex);
    let stale = chat.advance(max_delay);
    results.push(TestResult {
        name: "mentor_stale_dropped".into(),
        passed: stale.is_empty() && chat.persona() == Persona::Alex,
        detail: format!("{} replies after persona switch", stale.len()),
    });

    let mut answered = 0;
    for (question, _) in SUGGESTIONS {
        if chat.ask_suggestion(question).is_ok() {
            answered += chat.advance(config.suggestion_delay_ms).len();
        }
    }
    results.push(TestResult {
        name: "mentor_suggestions".into(),
        passed: answered == SUGGESTIONS.len(),
        detail: format!("{} / {} suggestions answered", answered, SUGGESTIONS.len()),
    });

    results
}

// ── 7. Engine Configuration ─────────────────────────────────────────────

fn validate_engine_config(_verbose: bool) -> Vec<TestResult> {
    println!("--- Engine Configuration ---");
    let mut results = Vec::new();

    let defaults = EngineConfig::default();
    let problems = validate_config(&defaults);
    results.push(TestResult {
        name: "config_defaults_valid".into(),
        passed: problems.is_empty(),
        detail: format!("{} problems", problems.len()),
    });

    let round_trip = serde_json::to_string(&defaults)
        .ok()
        .and_then(|json| EngineConfig::from_json_str(&json).ok());
    results.push(TestResult {
        name: "config_json_round_trip".into(),
        passed: round_trip.as_ref() == Some(&defaults),
        detail: "defaults survive JSON".into(),
    });

    let broken = EngineConfig::from_json_str(r#"{"cascade":{"step_minutes":7},"drill":{"progress_step":0}}"#);
    let reported = broken.map(|c| validate_config(&c).len()).unwrap_or(0);
    results.push(TestResult {
        name: "config_problems_reported".into(),
        passed: reported == 2,
        detail: format!("{} problems reported for a bad config", reported),
    });

    results
}
