//! Pure game logic for AXiLe, a risk-management training game.
//!
//! This crate contains everything that does not depend on a UI or host
//! runtime. Time is virtual: engines only move when the host feeds them
//! elapsed milliseconds, so every run is reproducible and unit-testable.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`achievements`] | Achievement definitions, requirement progress, latching unlocks |
//! | [`app`] | Wires the store and every live engine to one virtual clock |
//! | [`cascade`] | Premortem failure graphs and the cascading failure simulator |
//! | [`catalog`] | Built-in and file-loaded content with cross-reference checks |
//! | [`clock`] | Interval ticker and generation-aware delay queue |
//! | [`config`] | Tunable timing and progression settings plus validation |
//! | [`constants`] | Scoring rules, default timings, progression thresholds |
//! | [`drill`] | Risk domain analysis drill (select, analyse, respond) |
//! | [`error`] | Rejected player commands |
//! | [`mentor`] | Scripted AI mentor personas with delayed replies |
//! | [`progress`] | Player level, experience and milestones |
//! | [`risk`] | OKRM register: objectives, key results, risks, mitigations |
//! | [`scenario`] | Scenario progression engine (choices, scoring, timer) |
//! | [`store`] | Application state and the pure action reducer |

pub mod achievements;
pub mod app;
pub mod cascade;
pub mod catalog;
pub mod clock;
pub mod config;
pub mod constants;
pub mod drill;
pub mod error;
pub mod mentor;
pub mod progress;
pub mod risk;
pub mod scenario;
pub mod store;
