//! Named guards, actions and handlers that descriptions refer to.

use crate::core::{Action, ActionError, Event, EventHandler, EventHandlingResult, Guard};
use std::collections::HashMap;

/// Caller-supplied table of callables, in three disjoint namespaces.
///
/// Descriptions never carry behavior themselves; they name entries of a
/// registry, and the assembler swaps the names for these callables.
///
/// # Example
///
/// ```rust
/// use composite_hsm::builder::FunctionRegistry;
/// use composite_hsm::core::{Event, EventHandlingResult};
///
/// let registry = FunctionRegistry::new()
///     .with_guard("always", || true)
///     .with_action("log", || println!("transition"))
///     .with_handler("swallow", |_: &Event| EventHandlingResult::STOP);
///
/// assert!(registry.guard("always").is_some());
/// assert!(registry.guard("log").is_none());
/// ```
#[derive(Clone, Debug, Default)]
pub struct FunctionRegistry {
    guards: HashMap<String, Guard>,
    actions: HashMap<String, Action>,
    handlers: HashMap<String, EventHandler>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_guard<F>(mut self, name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        self.register_guard(name, Guard::new(predicate));
        self
    }

    pub fn with_action<F>(mut self, name: impl Into<String>, effect: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.register_action(name, Action::infallible(effect));
        self
    }

    /// Register an action that can fail and abort the transition.
    pub fn with_fallible_action<F>(mut self, name: impl Into<String>, effect: F) -> Self
    where
        F: Fn() -> Result<(), ActionError> + Send + Sync + 'static,
    {
        self.register_action(name, Action::new(effect));
        self
    }

    pub fn with_handler<F>(mut self, name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&Event) -> EventHandlingResult + Send + Sync + 'static,
    {
        self.register_handler(name, EventHandler::new(handler));
        self
    }

    pub fn register_guard(&mut self, name: impl Into<String>, guard: Guard) -> Option<Guard> {
        self.guards.insert(name.into(), guard)
    }

    pub fn register_action(&mut self, name: impl Into<String>, action: Action) -> Option<Action> {
        self.actions.insert(name.into(), action)
    }

    pub fn register_handler(
        &mut self,
        name: impl Into<String>,
        handler: EventHandler,
    ) -> Option<EventHandler> {
        self.handlers.insert(name.into(), handler)
    }

    pub fn guard(&self, name: &str) -> Option<&Guard> {
        self.guards.get(name)
    }

    pub fn action(&self, name: &str) -> Option<&Action> {
        self.actions.get(name)
    }

    pub fn handler(&self, name: &str) -> Option<&EventHandler> {
        self.handlers.get(name)
    }

    /// Combine two registries. Entries of `other` win on name clashes.
    pub fn merge(mut self, other: FunctionRegistry) -> Self {
        self.guards.extend(other.guards);
        self.actions.extend(other.actions);
        self.handlers.extend(other.handlers);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.guards.is_empty() && self.actions.is_empty() && self.handlers.is_empty()
    }
}
