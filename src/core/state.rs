//! Composite states: handler tables plus owned child machines.
//!
//! A [`CompositeState`] is the executable node of a configuration. Besides its
//! own event handlers it may own any number of child [`Orchestrator`]s
//! (orthogonal regions) which run only while the state is active.

use super::event::{Event, EventHandler, EventHandlingResult, ENTER_EVENT, EXIT_EVENT};
use crate::machine::{MachineError, MachineId, Orchestrator};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::trace;

/// Identifier of a state, unique within its configuration.
pub type StateId = String;

/// Declared kind of a state.
///
/// `Choice` is carried as metadata and behaves exactly like `Normal` at run
/// time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StateKind {
    #[default]
    Normal,
    Choice,
}

/// A named state that may hold event handlers and own child machines.
///
/// # Example
///
/// ```rust
/// use composite_hsm::core::{CompositeState, Event, EventHandlingResult};
///
/// let mut state = CompositeState::new("idle");
/// state.add_event_handler("PING", |_: &Event| EventHandlingResult::STOP);
///
/// let result = state.deliver_event(&Event::new("PING")).unwrap();
/// assert!(!result.propagate);
///
/// let result = state.deliver_event(&Event::new("OTHER")).unwrap();
/// assert_eq!(result, EventHandlingResult::NOT_HANDLED);
/// ```
#[derive(Debug)]
pub struct CompositeState {
    id: StateId,
    parent: Option<StateId>,
    kind: StateKind,
    history: bool,
    handlers: HashMap<String, EventHandler>,
    children: Vec<Orchestrator>,
}

impl CompositeState {
    pub fn new(id: impl Into<StateId>) -> Self {
        Self {
            id: id.into(),
            parent: None,
            kind: StateKind::Normal,
            history: false,
            handlers: HashMap::new(),
            children: Vec::new(),
        }
    }

    /// Record a structural parent. Used for diagnostics only, never for routing.
    pub fn with_parent(mut self, parent: impl Into<StateId>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn with_kind(mut self, kind: StateKind) -> Self {
        self.kind = kind;
        self
    }

    /// Make child machines resume their last active state on re-entry.
    pub fn with_history(mut self, history: bool) -> Self {
        self.history = history;
        self
    }

    pub fn with_handler<F>(mut self, event_type: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&Event) -> EventHandlingResult + Send + Sync + 'static,
    {
        self.add_event_handler(event_type, handler);
        self
    }

    pub fn with_child(mut self, machine: Orchestrator) -> Self {
        self.add_child_machine(machine);
        self
    }

    pub fn id(&self) -> &StateId {
        &self.id
    }

    pub fn parent(&self) -> Option<&StateId> {
        self.parent.as_ref()
    }

    pub fn kind(&self) -> StateKind {
        self.kind
    }

    pub fn has_history(&self) -> bool {
        self.history
    }

    /// Register (or replace) the handler for `event_type`.
    pub fn add_event_handler<F>(&mut self, event_type: impl Into<String>, handler: F)
    where
        F: Fn(&Event) -> EventHandlingResult + Send + Sync + 'static,
    {
        self.insert_handler(event_type, EventHandler::new(handler));
    }

    /// Register an already wrapped handler, e.g. one resolved from a registry.
    pub fn insert_handler(&mut self, event_type: impl Into<String>, handler: EventHandler) {
        self.handlers.insert(event_type.into(), handler);
    }

    pub fn remove_event_handler(&mut self, event_type: &str) -> Option<EventHandler> {
        self.handlers.remove(event_type)
    }

    pub fn handler(&self, event_type: &str) -> Option<&EventHandler> {
        self.handlers.get(event_type)
    }

    /// Event types this state has handlers for, lifecycle keys included.
    pub fn handled_events(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(String::as_str)
    }

    pub fn add_child_machine(&mut self, machine: Orchestrator) -> MachineId {
        let id = machine.instance_id();
        self.children.push(machine);
        id
    }

    pub fn remove_child_machine(&mut self, id: MachineId) -> Option<Orchestrator> {
        let index = self.children.iter().position(|m| m.instance_id() == id)?;
        Some(self.children.remove(index))
    }

    pub fn children(&self) -> &[Orchestrator] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut [Orchestrator] {
        &mut self.children
    }

    /// Entry lifecycle: the `enter` handler runs first, then every child machine
    /// is started (or resumed, for history states).
    pub fn on_enter(&mut self) -> Result<(), MachineError> {
        if let Some(handler) = self.handlers.get(ENTER_EVENT) {
            handler.handle(&Event::enter());
        }

        for child in &mut self.children {
            if self.history {
                child.resume(&self.id)?;
            } else {
                child.start()?;
            }
        }
        Ok(())
    }

    /// Exit lifecycle: every child machine exits first, then the `exit` handler
    /// runs.
    pub fn on_exit(&mut self) -> Result<(), MachineError> {
        for child in &mut self.children {
            child.exit()?;
            if self.history {
                child.record_history(&self.id);
            }
        }

        if let Some(handler) = self.handlers.get(EXIT_EVENT) {
            handler.handle(&Event::exit());
        }
        Ok(())
    }

    /// Offer an event to this state.
    ///
    /// With child machines, the event goes to every child first. If none of
    /// them propagated it, the state is done and its own handler table is not
    /// consulted. Otherwise the handler for the event type answers, or the
    /// event is reported as not handled.
    pub fn deliver_event(&mut self, event: &Event) -> Result<EventHandlingResult, MachineError> {
        if !self.children.is_empty() {
            let mut any_propagated = false;
            for child in &mut self.children {
                let result = child.deliver_event(event)?;
                any_propagated |= result.propagate;
            }

            if !any_propagated {
                trace!(
                    state = %self.id,
                    event = %event.event_type,
                    "event consumed by every child machine"
                );
                return Ok(EventHandlingResult::STOP);
            }
        }

        Ok(self
            .handlers
            .get(&event.event_type)
            .map(|handler| handler.handle(event))
            .unwrap_or(EventHandlingResult::NOT_HANDLED))
    }
}
