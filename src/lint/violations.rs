//! Reference violations reported by the linter.

use crate::core::StateId;
use thiserror::Error;

/// A state reference that points nowhere.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReferenceViolation {
    #[error("Initial state '{initial}' is not a state of machine '{machine}'")]
    UnknownInitialState { machine: String, initial: StateId },

    #[error("Transition '{event}' in machine '{machine}' leaves unknown state '{state}'")]
    UnknownSourceState {
        machine: String,
        state: StateId,
        event: String,
    },

    #[error("Transition '{event}' in machine '{machine}' targets unknown state '{state}'")]
    UnknownTargetState {
        machine: String,
        state: StateId,
        event: String,
    },

    #[error("State '{state}' in machine '{machine}' names unknown parent '{parent}'")]
    UnknownParent {
        machine: String,
        state: StateId,
        parent: StateId,
    },
}

impl ReferenceViolation {
    /// Id of the machine the violation was found in.
    pub fn machine(&self) -> &str {
        match self {
            Self::UnknownInitialState { machine, .. }
            | Self::UnknownSourceState { machine, .. }
            | Self::UnknownTargetState { machine, .. }
            | Self::UnknownParent { machine, .. } => machine,
        }
    }
}
