//! Achievement evaluation from aggregate player statistics.
//!
//! [`evaluate`] recomputes every achievement from scratch; nothing is
//! incremented in place. The only state carried between evaluations is the
//! previous array, which supplies the latched `unlocked` flag, the first
//! unlock time and the requirement counters that have no formula.
//! [`AchievementTracker`] wraps that loop and turns the first unlock of each
//! id into exactly one [`UnlockNotice`].

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::constants::progression;
use crate::progress::UserProgress;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementCategory {
    Decision,
    Analysis,
    Learning,
    Mastery,
    Collaboration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequirementKind {
    RisksIdentified,
    EvidenceDecisions,
    FastCompletion,
    MitigationsImplemented,
    DomainsMastered,
    TeamSuccesses,
    PerfectScores,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Requirement {
    #[serde(rename = "type")]
    pub kind: RequirementKind,
    pub target: u32,
    #[serde(default)]
    pub current: f64,
}

impl Requirement {
    pub fn is_met(&self) -> bool {
        self.current >= self.target as f64
    }

    /// 0.0..=100.0
    pub fn percent(&self) -> f64 {
        if self.target == 0 {
            return 100.0;
        }
        (self.current / self.target as f64 * 100.0).min(100.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AchievementReward {
    pub points: u32,
    #[serde(default)]
    pub unlocks: Vec<String>,
}

/// Static description of an achievement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AchievementDefinition {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub rarity: Rarity,
    pub category: AchievementCategory,
    pub requirement: Requirement,
    pub reward: AchievementReward,
}

/// An evaluated achievement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: String,
    pub title: String,
    pub description: String,
    pub rarity: Rarity,
    pub category: AchievementCategory,
    pub requirement: Requirement,
    pub reward: AchievementReward,
    pub unlocked: bool,
    /// Virtual time (ms) of the first unlock.
    pub unlocked_at: Option<u64>,
}

impl Achievement {
    /// Locked, with the definition's starting counter.
    pub fn locked(def: &AchievementDefinition) -> Self {
        Self {
            id: def.id.clone(),
            title: def.title.clone(),
            description: def.description.clone(),
            rarity: def.rarity,
            category: def.category,
            requirement: def.requirement.clone(),
            reward: def.reward.clone(),
            unlocked: false,
            unlocked_at: None,
        }
    }
}

/// Caller-visible "achievement unlocked" payload. Shown once, then dismissed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnlockNotice {
    pub id: String,
    pub title: String,
    pub description: String,
    pub points: u32,
}

impl From<&Achievement> for UnlockNotice {
    fn from(a: &Achievement) -> Self {
        Self {
            id: a.id.clone(),
            title: a.title.clone(),
            description: a.description.clone(),
            points: a.reward.points,
        }
    }
}

/// The aggregate figures every requirement formula reads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub total_score: u32,
    pub completed_scenarios: u32,
    pub level: u32,
}

impl From<&UserProgress> for PlayerStats {
    fn from(p: &UserProgress) -> Self {
        Self {
            total_score: p.total_score,
            completed_scenarios: p.completed_scenarios.len() as u32,
            level: p.level,
        }
    }
}

// ============================================================================
// EVALUATION
// ============================================================================

/// Requirement counter for `kind`. `previous` is returned for kinds with no
/// formula.
pub fn requirement_progress(kind: RequirementKind, target: u32, previous: f64, stats: &PlayerStats) -> f64 {
    let target = target as f64;
    let total = stats.total_score as f64;
    match kind {
        RequirementKind::RisksIdentified => target.min(1.0),
        RequirementKind::EvidenceDecisions => {
            target.min(total / progression::EVIDENCE_SCORE_DIVISOR)
        }
        RequirementKind::FastCompletion => {
            if stats.completed_scenarios > 0 {
                1.0
            } else {
                0.0
            }
        }
        RequirementKind::MitigationsImplemented => {
            target.min(total / progression::MITIGATION_SCORE_DIVISOR)
        }
        RequirementKind::DomainsMastered => {
            (stats.level / 2).min(progression::RISK_DOMAIN_COUNT) as f64
        }
        RequirementKind::PerfectScores => {
            if stats.total_score > progression::PERFECT_SCORE_TOTAL {
                1.0
            } else {
                0.0
            }
        }
        RequirementKind::TeamSuccesses => previous,
    }
}

/// Recompute all achievements. Unlocks latch: an achievement unlocked in
/// `previous` stays unlocked and keeps its first `unlocked_at`.
pub fn evaluate(
    definitions: &[AchievementDefinition],
    previous: &[Achievement],
    stats: &PlayerStats,
    now_ms: u64,
) -> Vec<Achievement> {
    definitions
        .iter()
        .map(|def| {
            let prev = previous.iter().find(|a| a.id == def.id);
            let was_unlocked = prev.map_or(false, |a| a.unlocked);
            let previous_current = prev.map_or(def.requirement.current, |a| a.requirement.current);

            let mut next = Achievement::locked(def);
            next.requirement.current =
                requirement_progress(def.requirement.kind, def.requirement.target, previous_current, stats);
            next.unlocked = was_unlocked || next.requirement.is_met();
            next.unlocked_at = match prev.and_then(|a| a.unlocked_at) {
                Some(at) => Some(at),
                None if next.unlocked => Some(now_ms),
                None => None,
            };
            next
        })
        .collect()
}

/// Achievements unlocked in `next` but not in `previous`.
pub fn newly_unlocked(previous: &[Achievement], next: &[Achievement]) -> Vec<UnlockNotice> {
    next.iter()
        .filter(|a| a.unlocked)
        .filter(|a| !previous.iter().any(|p| p.id == a.id && p.unlocked))
        .map(UnlockNotice::from)
        .collect()
}

// ============================================================================
// TRACKER
// ============================================================================

/// Holds the last evaluation and queues one notice per first unlock.
#[derive(Debug, Clone, PartialEq)]
pub struct AchievementTracker {
    definitions: Vec<AchievementDefinition>,
    achievements: Vec<Achievement>,
    notified: HashSet<String>,
    pending: Vec<UnlockNotice>,
}

impl AchievementTracker {
    pub fn new(definitions: Vec<AchievementDefinition>) -> Self {
        let achievements = definitions.iter().map(Achievement::locked).collect();
        Self {
            definitions,
            achievements,
            notified: HashSet::new(),
            pending: Vec::new(),
        }
    }

    /// Re-evaluate against `stats`. Returns how many achievements unlocked
    /// for the first time.
    pub fn update(&mut self, stats: &PlayerStats, now_ms: u64) -> usize {
        let next = evaluate(&self.definitions, &self.achievements, stats, now_ms);
        let mut fresh = 0;
        for notice in newly_unlocked(&self.achievements, &next) {
            if self.notified.insert(notice.id.clone()) {
                log::info!("Achievement unlocked: {} (+{} points)", notice.title, notice.points);
                self.pending.push(notice);
                fresh += 1;
            }
        }
        self.achievements = next;
        fresh
    }

    /// Drain pending notices.
    pub fn take_notices(&mut self) -> Vec<UnlockNotice> {
        std::mem::take(&mut self.pending)
    }

    pub fn pending_notices(&self) -> &[UnlockNotice] {
        &self.pending
    }

    pub fn achievements(&self) -> &[Achievement] {
        &self.achievements
    }

    pub fn get(&self, id: &str) -> Option<&Achievement> {
        self.achievements.iter().find(|a| a.id == id)
    }

    pub fn unlocked(&self) -> impl Iterator<Item = &Achievement> {
        self.achievements.iter().filter(|a| a.unlocked)
    }

    pub fn unlocked_count(&self) -> usize {
        self.unlocked().count()
    }

    pub fn total_points(&self) -> u32 {
        self.unlocked().map(|a| a.reward.points).sum()
    }

    /// Rounded percent of achievements unlocked.
    pub fn completion_rate(&self) -> u32 {
        if self.achievements.is_empty() {
            return 0;
        }
        (self.unlocked_count() as f64 / self.achievements.len() as f64 * 100.0).round() as u32
    }

    pub fn legendary_unlocked(&self) -> usize {
        self.unlocked().filter(|a| a.rarity == Rarity::Legendary).count()
    }

    /// Feature keys granted by unlocked achievements, in unlock-list order.
    pub fn unlocked_features(&self) -> Vec<&str> {
        self.unlocked()
            .flat_map(|a| a.reward.unlocks.iter().map(String::as_str))
            .collect()
    }
}
