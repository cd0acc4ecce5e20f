//! Event and transition vocabulary of a configuration tree.
//!
//! Useful for generating typed constants or documentation: every event type a
//! machine (or any of its child machines) reacts to, and one identifier per
//! distinct transition.

use crate::core::StateId;
use crate::machine::Configuration;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Identifier of one transition, displayed as `{from}_to_{to}_{event}`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TransitionKey {
    pub from: StateId,
    pub to: StateId,
    pub event: String,
}

impl fmt::Display for TransitionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_to_{}_{}", self.from, self.to, self.event)
    }
}

/// Distinct event types and transition keys, sorted.
///
/// # Example
///
/// ```rust
/// use composite_hsm::core::{CompositeState, Event, EventHandlingResult};
/// use composite_hsm::machine::{Configuration, Transition};
/// use composite_hsm::vocabulary::Vocabulary;
///
/// let mut config = Configuration::new("door", "closed");
/// config.add_state(
///     CompositeState::new("closed").with_handler("KNOCK", |_: &Event| EventHandlingResult::STOP),
/// );
/// config.add_state(CompositeState::new("open"));
/// config.add_transition(Transition::new("closed", "OPEN", "open"));
///
/// let vocabulary = Vocabulary::extract(&config);
/// assert_eq!(vocabulary.event_names(), vec!["KNOCK", "OPEN"]);
/// assert_eq!(vocabulary.transition_names(), vec!["closed_to_open_OPEN"]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabulary {
    pub events: BTreeSet<String>,
    pub transitions: BTreeSet<TransitionKey>,
}

impl Vocabulary {
    /// Walk `config` and every child configuration below it.
    pub fn extract(config: &Configuration) -> Self {
        let mut vocabulary = Self::default();
        vocabulary.collect(config);
        vocabulary
    }

    fn collect(&mut self, config: &Configuration) {
        for state in config.states.values() {
            self.events
                .extend(state.handled_events().map(str::to_string));
            for child in state.children() {
                self.collect(child.config());
            }
        }

        for transition in &config.transitions {
            self.events.insert(transition.event_type.clone());
            self.transitions.insert(TransitionKey {
                from: transition.from_state.clone(),
                to: transition.to_state.clone(),
                event: transition.event_type.clone(),
            });
        }
    }

    pub fn event_names(&self) -> Vec<&str> {
        self.events.iter().map(String::as_str).collect()
    }

    pub fn transition_names(&self) -> Vec<String> {
        self.transitions.iter().map(ToString::to_string).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty() && self.transitions.is_empty()
    }
}
