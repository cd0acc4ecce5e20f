//! Construction-time errors for descriptions, the assembler and the builders.

use crate::core::StateId;
use thiserror::Error;

/// Errors that make a machine description impossible to execute.
///
/// These are always raised while assembling or building, never during
/// dispatch.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Machine ID is required")]
    MissingId,

    #[error("Initial state is required")]
    MissingInitialState,

    #[error("At least one state is required in machine '{machine}'")]
    NoStates { machine: String },

    #[error("Initial state '{initial}' is not a state of machine '{machine}'")]
    UnknownInitialState { machine: String, initial: StateId },

    #[error("State '{state}' is declared more than once in machine '{machine}'")]
    DuplicateState { machine: String, state: StateId },

    #[error("State keyed '{key}' declares a different id '{declared}' in machine '{machine}'")]
    StateIdMismatch {
        machine: String,
        key: StateId,
        declared: StateId,
    },

    #[error("Guard function '{name}' not found in registry (machine '{machine}')")]
    UnknownGuard { machine: String, name: String },

    #[error("Action function '{name}' not found in registry (machine '{machine}')")]
    UnknownAction { machine: String, name: String },

    #[error("Handler function '{name}' not found in registry (state '{state}' of machine '{machine}')")]
    UnknownHandler {
        machine: String,
        state: StateId,
        name: String,
    },

    #[error("Transition source state not specified. Call .from(state)")]
    MissingFromState,

    #[error("Transition target state not specified. Call .to(state)")]
    MissingToState,

    #[error("Transition event type not specified. Call .on(event)")]
    MissingEventType,

    #[error("Malformed machine description: {0}")]
    Malformed(#[from] serde_json::Error),
}
