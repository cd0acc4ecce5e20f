//! Executable machine configuration.

use super::transition::Transition;
use crate::core::{CompositeState, StateId};
use std::collections::BTreeMap;

/// The assembled description of one machine: its states and its flat
/// transition table.
///
/// The assembler and [`ConfigurationBuilder`](crate::builder::ConfigurationBuilder)
/// only produce configurations whose `initial` is a key of `states`. Fields are
/// public so configurations can also be put together by hand; such
/// configurations are checked when the machine starts.
#[derive(Debug)]
pub struct Configuration {
    pub id: String,
    pub initial: StateId,
    pub states: BTreeMap<StateId, CompositeState>,
    pub transitions: Vec<Transition>,
}

impl Configuration {
    pub fn new(id: impl Into<String>, initial: impl Into<StateId>) -> Self {
        Self {
            id: id.into(),
            initial: initial.into(),
            states: BTreeMap::new(),
            transitions: Vec::new(),
        }
    }

    /// Insert a state keyed by its id, returning any state it replaced.
    pub fn add_state(&mut self, state: CompositeState) -> Option<CompositeState> {
        self.states.insert(state.id().clone(), state)
    }

    pub fn add_transition(&mut self, transition: Transition) {
        self.transitions.push(transition);
    }

    pub fn state(&self, id: &str) -> Option<&CompositeState> {
        self.states.get(id)
    }

    pub fn state_mut(&mut self, id: &str) -> Option<&mut CompositeState> {
        self.states.get_mut(id)
    }

    pub fn has_state(&self, id: &str) -> bool {
        self.states.contains_key(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_state_keys_by_state_id() {
        let mut config = Configuration::new("machine", "idle");
        assert!(config.add_state(CompositeState::new("idle")).is_none());
        assert!(config.add_state(CompositeState::new("idle")).is_some());

        assert!(config.has_state("idle"));
        assert!(!config.has_state("running"));
        assert_eq!(config.states.len(), 1);
    }

    #[test]
    fn transitions_keep_declared_order() {
        let mut config = Configuration::new("machine", "idle");
        config.add_transition(Transition::new("idle", "START", "running"));
        config.add_transition(Transition::new("running", "STOP", "idle"));

        let events: Vec<_> = config
            .transitions
            .iter()
            .map(|t| t.event_type.as_str())
            .collect();
        assert_eq!(events, vec!["START", "STOP"]);
    }
}
