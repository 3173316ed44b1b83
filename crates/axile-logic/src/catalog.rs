//! Content catalog: scenarios, the OKRM register, premortem failure graphs,
//! achievement definitions, drill domains and the starting player profile.
//!
//! The built-in sample catalog ships inside the crate as JSON. External
//! catalogs use the same shape and pass through the same validation.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::achievements::AchievementDefinition;
use crate::cascade::FailureScenario;
use crate::drill::RiskDomain;
use crate::progress::UserProgress;
use crate::risk::Okrm;
use crate::scenario::Scenario;

pub const BUILTIN_CATALOG: &str = include_str!("data/catalog.json");

fn default_user() -> UserProgress {
    UserProgress::new("player")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    #[serde(default)]
    pub scenarios: Vec<Scenario>,
    #[serde(default)]
    pub okrm: Okrm,
    #[serde(default)]
    pub failure_scenarios: Vec<FailureScenario>,
    #[serde(default)]
    pub achievements: Vec<AchievementDefinition>,
    #[serde(default)]
    pub domains: Vec<RiskDomain>,
    #[serde(default = "default_user")]
    pub user: UserProgress,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read catalog from {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("duplicate {kind} id {id}")]
    Duplicate { kind: &'static str, id: String },
    #[error("{kind} with empty id")]
    EmptyId { kind: &'static str },
    #[error("{kind} {id} references unknown {target}")]
    UnknownReference {
        kind: &'static str,
        id: String,
        target: String,
    },
    #[error("event {event} in scenario {scenario} offers no choices")]
    NoChoices { scenario: String, event: String },
}

/// Insert every id, failing on the first empty or repeated one.
fn check_ids<'a>(
    kind: &'static str,
    ids: impl IntoIterator<Item = &'a str>,
) -> Result<HashSet<&'a str>, CatalogError> {
    let mut seen = HashSet::new();
    for id in ids {
        if id.trim().is_empty() {
            return Err(CatalogError::EmptyId { kind });
        }
        if !seen.insert(id) {
            return Err(CatalogError::Duplicate {
                kind,
                id: id.to_string(),
            });
        }
    }
    Ok(seen)
}

impl Catalog {
    /// The sample content bundled with the crate.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json_str(BUILTIN_CATALOG)
    }

    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let contents = fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    pub fn scenario(&self, id: &str) -> Option<&Scenario> {
        self.scenarios.iter().find(|s| s.id == id)
    }

    pub fn failure_scenario(&self, title: &str) -> Option<&FailureScenario> {
        self.failure_scenarios.iter().find(|s| s.title == title)
    }

    /// Check ids and cross references.
    pub fn validate(&self) -> Result<(), CatalogError> {
        check_ids("scenario", self.scenarios.iter().map(|s| s.id.as_str()))?;
        for scenario in &self.scenarios {
            check_ids("event", scenario.events.iter().map(|e| e.id.as_str()))?;
            for event in &scenario.events {
                if event.choices.is_empty() {
                    return Err(CatalogError::NoChoices {
                        scenario: scenario.id.clone(),
                        event: event.id.clone(),
                    });
                }
                check_ids("choice", event.choices.iter().map(|c| c.id.as_str()))?;
            }
        }

        for failure in &self.failure_scenarios {
            let decisions = check_ids("decision", failure.decisions.iter().map(|d| d.id.as_str()))?;
            let events = check_ids("failure event", failure.events.iter().map(|e| e.id.as_str()))?;
            if !events.contains(failure.root_event_id.as_str()) {
                return Err(CatalogError::UnknownReference {
                    kind: "failure scenario",
                    id: failure.title.clone(),
                    target: failure.root_event_id.clone(),
                });
            }
            let extra = failure.decisions.iter().flat_map(|d| d.consequences.iter());
            for event in failure.events.iter().chain(extra) {
                for parent in &event.triggers {
                    if !events.contains(parent.as_str()) && !decisions.contains(parent.as_str()) {
                        return Err(CatalogError::UnknownReference {
                            kind: "failure event",
                            id: event.id.clone(),
                            target: parent.clone(),
                        });
                    }
                }
            }
        }

        check_ids("achievement", self.achievements.iter().map(|a| a.id.as_str()))?;
        check_ids("domain", self.domains.iter().map(|d| d.kind.name()))?;

        let objectives = check_ids("objective", self.okrm.objectives.iter().map(|o| o.id.as_str()))?;
        let risks = check_ids("risk", self.okrm.risks.iter().map(|r| r.id.as_str()))?;
        check_ids("key result", self.okrm.key_results.iter().map(|k| k.id.as_str()))?;
        check_ids("mitigation", self.okrm.mitigations.iter().map(|m| m.id.as_str()))?;
        for kr in &self.okrm.key_results {
            if !objectives.contains(kr.objective_id.as_str()) {
                return Err(CatalogError::UnknownReference {
                    kind: "key result",
                    id: kr.id.clone(),
                    target: kr.objective_id.clone(),
                });
            }
        }
        for mitigation in &self.okrm.mitigations {
            if !risks.contains(mitigation.risk_id.as_str()) {
                return Err(CatalogError::UnknownReference {
                    kind: "mitigation",
                    id: mitigation.id.clone(),
                    target: mitigation.risk_id.clone(),
                });
            }
        }

        Ok(())
    }
}
