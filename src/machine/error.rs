//! Run-time machine errors.

use crate::core::{ActionError, StateId};
use thiserror::Error;

/// Errors raised while starting, exiting or dispatching to a machine.
#[derive(Debug, Error)]
pub enum MachineError {
    /// The machine's bookkeeping points at a state missing from its
    /// configuration.
    #[error("Invalid state: {state}")]
    InvalidState { state: StateId },

    /// A transition action failed. The source state has already been exited
    /// and the target state was not entered.
    #[error("Action failed during transition from '{from}' to '{to}' on '{event}': {source}")]
    ActionFailed {
        from: StateId,
        to: StateId,
        event: String,
        #[source]
        source: ActionError,
    },
}

impl MachineError {
    pub(crate) fn invalid_state(state: &str) -> Self {
        MachineError::InvalidState {
            state: state.to_string(),
        }
    }
}
