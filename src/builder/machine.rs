//! Builder for constructing configurations in code.

use crate::builder::error::ConfigError;
use crate::builder::transition::TransitionBuilder;
use crate::core::{CompositeState, StateId};
use crate::machine::{Configuration, Orchestrator, Transition};

/// Builder for assembling a [`Configuration`] directly from states and
/// transitions, with the same header checks the assembler applies.
///
/// # Example
///
/// ```rust
/// use composite_hsm::builder::{ConfigurationBuilder, TransitionBuilder};
/// use composite_hsm::core::{CompositeState, Event};
///
/// let mut machine = ConfigurationBuilder::new()
///     .id("light")
///     .initial("red")
///     .state(CompositeState::new("red"))
///     .state(CompositeState::new("green"))
///     .transition(TransitionBuilder::new().from("red").on("TIMER").to("green"))
///     .unwrap()
///     .build_machine()
///     .unwrap();
///
/// machine.start().unwrap();
/// machine.deliver_event(&Event::new("TIMER")).unwrap();
/// assert_eq!(machine.current_state(), "green");
/// ```
#[derive(Default)]
pub struct ConfigurationBuilder {
    id: Option<String>,
    initial: Option<StateId>,
    states: Vec<CompositeState>,
    transitions: Vec<Transition>,
}

impl ConfigurationBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the machine id (required).
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: impl Into<StateId>) -> Self {
        self.initial = Some(state.into());
        self
    }

    /// Add a state.
    pub fn state(mut self, state: CompositeState) -> Self {
        self.states.push(state);
        self
    }

    /// Add a transition using a builder.
    /// Returns an error if the builder fails validation.
    pub fn transition(mut self, builder: TransitionBuilder) -> Result<Self, ConfigError> {
        let transition = builder.build()?;
        self.transitions.push(transition);
        Ok(self)
    }

    /// Add a pre-built transition.
    pub fn add_transition(mut self, transition: Transition) -> Self {
        self.transitions.push(transition);
        self
    }

    /// Add multiple transitions at once.
    pub fn transitions(mut self, transitions: Vec<Transition>) -> Self {
        self.transitions.extend(transitions);
        self
    }

    /// Build the configuration.
    pub fn build(self) -> Result<Configuration, ConfigError> {
        let id = self.id.filter(|id| !id.is_empty()).ok_or(ConfigError::MissingId)?;
        let initial = self
            .initial
            .filter(|initial| !initial.is_empty())
            .ok_or(ConfigError::MissingInitialState)?;

        if self.states.is_empty() {
            return Err(ConfigError::NoStates { machine: id });
        }

        let mut config = Configuration::new(id, initial);
        for state in self.states {
            let state_id = state.id().clone();
            if config.add_state(state).is_some() {
                return Err(ConfigError::DuplicateState {
                    machine: config.id,
                    state: state_id,
                });
            }
        }

        if !config.has_state(&config.initial) {
            return Err(ConfigError::UnknownInitialState {
                machine: config.id,
                initial: config.initial,
            });
        }

        config.transitions = self.transitions;
        Ok(config)
    }

    /// Build the configuration and wrap it in a machine.
    pub fn build_machine(self) -> Result<Orchestrator, ConfigError> {
        Orchestrator::new(self.build()?)
    }
}
