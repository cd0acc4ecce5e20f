//! Machine orchestrator: enter/exit/dispatch over one configuration.

use super::config::Configuration;
use super::error::MachineError;
use super::transition::Transition;
use crate::builder::ConfigError;
use crate::core::{CompositeState, Context, Event, EventHandlingResult, StateId, TransitionRecord};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use tracing::{debug, trace, warn};
use uuid::Uuid;

/// Identity of one orchestrator instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MachineId(Uuid);

impl MachineId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for MachineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One runnable machine: a configuration plus its mutable context.
///
/// # Example
///
/// ```rust
/// use composite_hsm::core::{CompositeState, Event};
/// use composite_hsm::machine::{Configuration, Orchestrator, Transition};
///
/// let mut config = Configuration::new("switch", "off");
/// config.add_state(CompositeState::new("off"));
/// config.add_state(CompositeState::new("on"));
/// config.add_transition(Transition::new("off", "FLIP", "on"));
/// config.add_transition(Transition::new("on", "FLIP", "off"));
///
/// let mut machine = Orchestrator::new(config).unwrap();
/// machine.start().unwrap();
/// machine.deliver_event(&Event::new("FLIP")).unwrap();
/// assert_eq!(machine.current_state(), "on");
/// ```
#[derive(Debug)]
pub struct Orchestrator {
    instance_id: MachineId,
    config: Configuration,
    context: Context,
}

impl Orchestrator {
    /// Create a machine positioned at (but not yet entered into) its initial
    /// state.
    pub fn new(config: Configuration) -> Result<Self, ConfigError> {
        if config.initial.is_empty() {
            return Err(ConfigError::MissingInitialState);
        }

        let context = Context::new(config.initial.clone());
        Ok(Self {
            instance_id: MachineId::new(),
            config,
            context,
        })
    }

    pub fn instance_id(&self) -> MachineId {
        self.instance_id
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    /// Caller-defined run-time values.
    pub fn data_mut(&mut self) -> &mut Map<String, Value> {
        self.context.data_mut()
    }

    pub fn active_state(&self) -> &StateId {
        self.context.active_state()
    }

    pub fn current_state(&self) -> &StateId {
        self.active_state()
    }

    pub fn state(&self, id: &str) -> Option<&CompositeState> {
        self.config.state(id)
    }

    pub fn state_mut(&mut self, id: &str) -> Option<&mut CompositeState> {
        self.config.state_mut(id)
    }

    /// Enter the configured initial state, starting its child machines.
    pub fn start(&mut self) -> Result<(), MachineError> {
        let initial = self.config.initial.clone();
        self.initialize_state(&initial)
    }

    /// Enter `state_id`, failing if the configuration has no such state.
    pub fn initialize_state(&mut self, state_id: &str) -> Result<(), MachineError> {
        if !self.config.has_state(state_id) {
            return Err(MachineError::invalid_state(state_id));
        }
        self.enter_state(state_id)
    }

    /// Start from the substate remembered for `owner`, falling back to the
    /// initial state when nothing (or a state that no longer exists) was
    /// remembered.
    pub fn resume(&mut self, owner: &str) -> Result<(), MachineError> {
        let target = self
            .context
            .remembered(owner)
            .filter(|state| self.config.has_state(state))
            .cloned()
            .unwrap_or_else(|| self.config.initial.clone());
        self.initialize_state(&target)
    }

    /// Remember the active state as the substate of `owner`.
    pub fn record_history(&mut self, owner: &str) {
        let active = self.context.active_state().clone();
        self.context.remember(owner.to_string(), active);
    }

    /// Run the exit sequence of the active state without changing it.
    pub fn exit(&mut self) -> Result<(), MachineError> {
        let active = self.context.active_state().clone();
        if self.config.has_state(&active) {
            self.exit_state(&active)?;
        }
        Ok(())
    }

    /// Transitions selected by `event` from the active state, in table order.
    pub fn find_transitions<'a>(
        &'a self,
        event: &'a Event,
    ) -> impl Iterator<Item = &'a Transition> + 'a {
        let active = self.context.active_state();
        self.config
            .transitions
            .iter()
            .filter(move |t| t.matches(active, &event.event_type))
    }

    /// Dispatch an event.
    ///
    /// The active state sees the event first; if it consumed the event the
    /// result is returned as is. Otherwise every matching transition whose
    /// guard passes is applied, in table order, and the event is reported as
    /// propagating.
    ///
    /// Matches are collected once, before any transition runs. A second match
    /// still exits its own `from_state` even if an earlier match already moved
    /// the machine elsewhere.
    pub fn deliver_event(&mut self, event: &Event) -> Result<EventHandlingResult, MachineError> {
        let active = self.context.active_state().clone();
        let state = self
            .config
            .states
            .get_mut(&active)
            .ok_or_else(|| MachineError::invalid_state(&active))?;

        trace!(
            machine = %self.config.id,
            state = %active,
            event = %event.event_type,
            "delivering event"
        );
        let result = state.deliver_event(event)?;
        if !result.propagate {
            return Ok(result);
        }

        let matched: Vec<Transition> = self.find_transitions(event).cloned().collect();
        for transition in &matched {
            if !transition.guard_allows() {
                debug!(
                    machine = %self.config.id,
                    from = %transition.from_state,
                    to = %transition.to_state,
                    event = %event.event_type,
                    "guard rejected transition"
                );
                continue;
            }
            self.apply_transition(transition, event)?;
        }

        Ok(EventHandlingResult::CONTINUE)
    }

    fn apply_transition(&mut self, transition: &Transition, event: &Event) -> Result<(), MachineError> {
        if !self.config.has_state(&transition.from_state) || !self.config.has_state(&transition.to_state) {
            warn!(
                machine = %self.config.id,
                from = %transition.from_state,
                to = %transition.to_state,
                event = %event.event_type,
                "skipping transition that references an unknown state"
            );
            return Ok(());
        }

        self.exit_state(&transition.from_state)?;
        if let Some(action) = &transition.action {
            action.run().map_err(|source| MachineError::ActionFailed {
                from: transition.from_state.clone(),
                to: transition.to_state.clone(),
                event: event.event_type.clone(),
                source,
            })?;
        }
        self.enter_state(&transition.to_state)?;

        self.context.record(TransitionRecord {
            from: transition.from_state.clone(),
            to: transition.to_state.clone(),
            event: event.event_type.clone(),
            timestamp: Utc::now(),
        });
        Ok(())
    }

    fn enter_state(&mut self, state_id: &str) -> Result<(), MachineError> {
        let state = self
            .config
            .states
            .get_mut(state_id)
            .ok_or_else(|| MachineError::invalid_state(state_id))?;

        debug!(machine = %self.config.id, state = %state_id, "entering state");
        self.context.set_active_state(state_id.to_string());
        state.on_enter()
    }

    fn exit_state(&mut self, state_id: &str) -> Result<(), MachineError> {
        let state = self
            .config
            .states
            .get_mut(state_id)
            .ok_or_else(|| MachineError::invalid_state(state_id))?;

        debug!(machine = %self.config.id, state = %state_id, "exiting state");
        state.on_exit()
    }
}
