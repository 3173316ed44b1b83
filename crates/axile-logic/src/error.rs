//! Rejection reasons for gameplay commands.
//!
//! Commands never panic on bad input. A rejected command returns one of
//! these and leaves the target state exactly as it was.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown scenario {0}")]
    UnknownScenario(String),
    #[error("choice {0} is not offered by the current event")]
    UnknownChoice(String),
    #[error("no choice selected")]
    NoSelection,
    #[error("session is paused")]
    Paused,
    #[error("session already finished")]
    Finished,
    #[error("no active session")]
    NoSession,
    #[error("unknown failure event {0}")]
    UnknownEvent(String),
    #[error("unknown decision {0}")]
    UnknownDecision(String),
    #[error("unknown risk domain {0}")]
    UnknownDomain(String),
    #[error("command not valid in phase {0}")]
    WrongPhase(&'static str),
    #[error("message is empty")]
    EmptyMessage,
}
