//! Builder for constructing transitions.

use crate::builder::error::ConfigError;
use crate::core::{Action, ActionError, Guard, StateId};
use crate::machine::Transition;

/// Builder for constructing transitions with a fluent API.
#[derive(Default)]
pub struct TransitionBuilder {
    from: Option<StateId>,
    to: Option<StateId>,
    event_type: Option<String>,
    guard: Option<Guard>,
    action: Option<Action>,
}

impl TransitionBuilder {
    /// Create a new transition builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the source state (required).
    pub fn from(mut self, state: impl Into<StateId>) -> Self {
        self.from = Some(state.into());
        self
    }

    /// Set the target state (required).
    pub fn to(mut self, state: impl Into<StateId>) -> Self {
        self.to = Some(state.into());
        self
    }

    /// Set the triggering event type (required).
    pub fn on(mut self, event_type: impl Into<String>) -> Self {
        self.event_type = Some(event_type.into());
        self
    }

    /// Add a guard (optional).
    pub fn guard(mut self, guard: Guard) -> Self {
        self.guard = Some(guard);
        self
    }

    /// Add a guard using a closure (optional).
    pub fn when<F>(mut self, predicate: F) -> Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        self.guard = Some(Guard::new(predicate));
        self
    }

    /// Add an action (optional).
    pub fn action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    /// Add an infallible action using a closure (optional).
    pub fn run<F>(mut self, effect: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.action = Some(Action::infallible(effect));
        self
    }

    /// Add a fallible action using a closure (optional).
    pub fn try_run<F>(mut self, effect: F) -> Self
    where
        F: Fn() -> Result<(), ActionError> + Send + Sync + 'static,
    {
        self.action = Some(Action::new(effect));
        self
    }

    /// Build the transition.
    pub fn build(self) -> Result<Transition, ConfigError> {
        let from = self.from.ok_or(ConfigError::MissingFromState)?;
        let to = self.to.ok_or(ConfigError::MissingToState)?;
        let event_type = self.event_type.ok_or(ConfigError::MissingEventType)?;

        Ok(Transition {
            from_state: from,
            event_type,
            to_state: to,
            guard: self.guard,
            action: self.action,
        })
    }
}
