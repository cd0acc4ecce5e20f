//! Transition table entries.

use crate::core::{Action, Guard, StateId};

/// A table entry mapping `(from_state, event_type)` to `to_state`, with an
/// optional guard and action.
///
/// Transitions carry no identity beyond their fields; a table may hold several
/// entries for the same source and event type.
#[derive(Clone, Debug)]
pub struct Transition {
    pub from_state: StateId,
    pub event_type: String,
    pub to_state: StateId,
    pub guard: Option<Guard>,
    pub action: Option<Action>,
}

impl Transition {
    pub fn new(
        from_state: impl Into<StateId>,
        event_type: impl Into<String>,
        to_state: impl Into<StateId>,
    ) -> Self {
        Self {
            from_state: from_state.into(),
            event_type: event_type.into(),
            to_state: to_state.into(),
            guard: None,
            action: None,
        }
    }

    pub fn with_guard(mut self, guard: Guard) -> Self {
        self.guard = Some(guard);
        self
    }

    pub fn with_action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    /// Whether this entry is selected by `event_type` while `active` is the
    /// active state. Guards are not evaluated here.
    pub fn matches(&self, active: &str, event_type: &str) -> bool {
        self.from_state == active && self.event_type == event_type
    }

    /// Evaluate the guard; a transition without one is always allowed.
    pub fn guard_allows(&self) -> bool {
        self.guard.as_ref().is_none_or(Guard::check)
    }
}
