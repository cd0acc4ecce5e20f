//! Turns descriptions into executable configurations.
//!
//! Assembly resolves every named guard, action and handler against a
//! [`FunctionRegistry`]. The whole description tree, child machines included,
//! is checked before anything is built, so an unresolvable name fails the
//! assembly before any machine exists.

use super::description::{MachineDescription, StateDescription, TransitionDescription};
use super::error::ConfigError;
use super::registry::FunctionRegistry;
use crate::core::{CompositeState, EventHandler};
use crate::machine::{Configuration, Orchestrator, Transition};
use tracing::debug;

/// Resolves descriptions against one registry.
///
/// # Example
///
/// ```rust
/// use composite_hsm::builder::{Assembler, FunctionRegistry, MachineDescription};
/// use composite_hsm::core::Event;
///
/// let description = MachineDescription::from_json(r#"{
///     "id": "door",
///     "initial": "closed",
///     "states": { "closed": {}, "open": {} },
///     "transitions": [
///         { "fromState": "closed", "eventType": "OPEN", "toState": "open",
///           "guardReference": "unlocked" }
///     ]
/// }"#).unwrap();
/// let registry = FunctionRegistry::new().with_guard("unlocked", || true);
///
/// let mut door = Assembler::new(&registry).assemble_machine(&description).unwrap();
/// door.start().unwrap();
/// door.deliver_event(&Event::new("OPEN")).unwrap();
/// assert_eq!(door.current_state(), "open");
/// ```
pub struct Assembler<'r> {
    registry: &'r FunctionRegistry,
}

impl<'r> Assembler<'r> {
    pub fn new(registry: &'r FunctionRegistry) -> Self {
        Self { registry }
    }

    /// Assemble a configuration, child machines included.
    pub fn assemble(&self, description: &MachineDescription) -> Result<Configuration, ConfigError> {
        self.check(description)?;
        self.build(description)
    }

    /// Assemble a configuration and wrap it in a machine, ready to start.
    pub fn assemble_machine(&self, description: &MachineDescription) -> Result<Orchestrator, ConfigError> {
        Orchestrator::new(self.assemble(description)?)
    }

    /// Validate the whole tree without building anything.
    pub fn check(&self, description: &MachineDescription) -> Result<(), ConfigError> {
        check_header(description)?;

        for (key, state) in &description.states {
            check_state_id(&description.id, key, state)?;
            self.resolve_handlers(&description.id, key, state)?;
            for child in state.children() {
                self.check(child)?;
            }
        }

        for transition in &description.transitions {
            self.resolve_transition(&description.id, transition)?;
        }
        Ok(())
    }

    fn build(&self, description: &MachineDescription) -> Result<Configuration, ConfigError> {
        let mut config = Configuration::new(description.id.clone(), description.initial.clone());

        for (key, state) in &description.states {
            config.add_state(self.build_state(&description.id, key, state)?);
        }
        for transition in &description.transitions {
            config.add_transition(self.resolve_transition(&description.id, transition)?);
        }

        debug!(
            machine = %config.id,
            states = config.states.len(),
            transitions = config.transitions.len(),
            "assembled configuration"
        );
        Ok(config)
    }

    fn build_state(
        &self,
        machine: &str,
        key: &str,
        description: &StateDescription,
    ) -> Result<CompositeState, ConfigError> {
        let mut state = CompositeState::new(key)
            .with_kind(description.kind)
            .with_history(description.history);
        if let Some(parent) = &description.parent {
            state = state.with_parent(parent.clone());
        }

        for (event_type, handler) in self.resolve_handlers(machine, key, description)? {
            state.insert_handler(event_type, handler);
        }
        for child in description.children() {
            state.add_child_machine(Orchestrator::new(self.build(child)?)?);
        }
        Ok(state)
    }

    fn resolve_handlers(
        &self,
        machine: &str,
        key: &str,
        description: &StateDescription,
    ) -> Result<Vec<(String, EventHandler)>, ConfigError> {
        description
            .handler_references
            .iter()
            .map(|(event_type, name)| -> Result<(String, EventHandler), ConfigError> {
                let handler = self
                    .registry
                    .handler(name)
                    .ok_or_else(|| ConfigError::UnknownHandler {
                        machine: machine.to_string(),
                        state: key.to_string(),
                        name: name.clone(),
                    })?;
                Ok((event_type.clone(), handler.clone()))
            })
            .collect()
    }

    fn resolve_transition(
        &self,
        machine: &str,
        description: &TransitionDescription,
    ) -> Result<Transition, ConfigError> {
        let mut transition = Transition::new(
            description.from_state.clone(),
            description.event_type.clone(),
            description.to_state.clone(),
        );

        if let Some(name) = &description.guard_reference {
            let guard = self
                .registry
                .guard(name)
                .ok_or_else(|| ConfigError::UnknownGuard {
                    machine: machine.to_string(),
                    name: name.clone(),
                })?;
            transition = transition.with_guard(guard.clone());
        }

        if let Some(name) = &description.action_reference {
            let action = self
                .registry
                .action(name)
                .ok_or_else(|| ConfigError::UnknownAction {
                    machine: machine.to_string(),
                    name: name.clone(),
                })?;
            transition = transition.with_action(action.clone());
        }

        Ok(transition)
    }
}

/// Assemble `description` against `registry`.
pub fn assemble(
    description: &MachineDescription,
    registry: &FunctionRegistry,
) -> Result<Configuration, ConfigError> {
    Assembler::new(registry).assemble(description)
}

fn check_header(description: &MachineDescription) -> Result<(), ConfigError> {
    if description.id.is_empty() {
        return Err(ConfigError::MissingId);
    }
    if description.initial.is_empty() {
        return Err(ConfigError::MissingInitialState);
    }
    if description.states.is_empty() {
        return Err(ConfigError::NoStates {
            machine: description.id.clone(),
        });
    }
    if !description.states.contains_key(&description.initial) {
        return Err(ConfigError::UnknownInitialState {
            machine: description.id.clone(),
            initial: description.initial.clone(),
        });
    }
    Ok(())
}

fn check_state_id(machine: &str, key: &str, description: &StateDescription) -> Result<(), ConfigError> {
    match &description.id {
        Some(declared) if declared != key => Err(ConfigError::StateIdMismatch {
            machine: machine.to_string(),
            key: key.to_string(),
            declared: declared.clone(),
        }),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Event, EventHandlingResult, StateKind};
    use serde_json::json;

    fn registry() -> FunctionRegistry {
        FunctionRegistry::new()
            .with_guard("allowTransition", || true)
            .with_guard("preventTransition", || false)
            .with_action("logTransition", || {})
            .with_handler("onEnter", |_: &Event| EventHandlingResult::STOP)
            .with_handler("onExit", |_: &Event| EventHandlingResult::STOP)
    }

    fn idle_active() -> MachineDescription {
        MachineDescription::new("testMachine", "idle")
            .with_state(
                "idle",
                StateDescription::new()
                    .with_handler("enter", "onEnter")
                    .with_handler("exit", "onExit"),
            )
            .with_state("active", StateDescription::new())
            .with_transition(
                TransitionDescription::new("idle", "START", "active")
                    .guarded_by("allowTransition")
                    .with_action("logTransition"),
            )
    }

    #[test]
    fn resolves_references_to_registry_callables() {
        let registry = registry();
        let config = assemble(&idle_active(), &registry).unwrap();

        assert_eq!(config.id, "testMachine");
        assert_eq!(config.initial, "idle");
        assert_eq!(config.states.len(), 2);

        let transition = &config.transitions[0];
        assert!(transition
            .guard
            .as_ref()
            .is_some_and(|g| g.ptr_eq(registry.guard("allowTransition").unwrap())));
        assert!(transition
            .action
            .as_ref()
            .is_some_and(|a| a.ptr_eq(registry.action("logTransition").unwrap())));

        let idle = config.state("idle").unwrap();
        assert!(idle
            .handler("enter")
            .is_some_and(|h| h.ptr_eq(registry.handler("onEnter").unwrap())));
        assert!(idle
            .handler("exit")
            .is_some_and(|h| h.ptr_eq(registry.handler("onExit").unwrap())));
    }

    #[test]
    fn absent_references_yield_no_callables() {
        let description = MachineDescription::new("m", "a")
            .with_state("a", StateDescription::new())
            .with_transition(TransitionDescription::new("a", "GO", "a"));

        let config = assemble(&description, &FunctionRegistry::new()).unwrap();
        assert!(config.transitions[0].guard.is_none());
        assert!(config.transitions[0].action.is_none());
    }

    #[test]
    fn rejects_missing_header_fields() {
        let registry = registry();

        let no_id = MachineDescription::new("", "idle").with_state("idle", StateDescription::new());
        assert!(matches!(assemble(&no_id, &registry), Err(ConfigError::MissingId)));

        let no_initial = MachineDescription::new("m", "").with_state("idle", StateDescription::new());
        assert!(matches!(
            assemble(&no_initial, &registry),
            Err(ConfigError::MissingInitialState)
        ));

        let no_states = MachineDescription::new("m", "idle");
        assert!(matches!(
            assemble(&no_states, &registry),
            Err(ConfigError::NoStates { .. })
        ));
    }

    #[test]
    fn rejects_initial_state_outside_state_map() {
        let description = MachineDescription::new("m", "ghost").with_state("idle", StateDescription::new());
        let err = assemble(&description, &registry()).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownInitialState { ref initial, .. } if initial == "ghost"));
    }

    #[test]
    fn rejects_mismatched_state_id() {
        let description = MachineDescription::from_value(json!({
            "id": "m",
            "initial": "a",
            "states": { "a": { "id": "b" } }
        }))
        .unwrap();
        let err = assemble(&description, &registry()).unwrap_err();
        assert!(matches!(err, ConfigError::StateIdMismatch { .. }));
    }

    #[test]
    fn missing_handler_names_the_reference() {
        let description = MachineDescription::new("m", "idle").with_state(
            "idle",
            StateDescription::new().with_handler("enter", "nonExistentHandler"),
        );

        let err = assemble(&description, &registry()).unwrap_err();
        assert!(err.to_string().contains("Handler function 'nonExistentHandler' not found in registry"));
    }

    #[test]
    fn missing_guard_names_the_reference() {
        let description = MachineDescription::new("m", "idle")
            .with_state("idle", StateDescription::new())
            .with_transition(TransitionDescription::new("idle", "START", "idle").guarded_by("nonExistentGuard"));

        let err = assemble(&description, &registry()).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownGuard { ref name, .. } if name == "nonExistentGuard"));
        assert!(err.to_string().contains("Guard function 'nonExistentGuard' not found in registry"));
    }

    #[test]
    fn missing_action_names_the_reference() {
        let description = MachineDescription::new("m", "idle")
            .with_state("idle", StateDescription::new())
            .with_transition(TransitionDescription::new("idle", "START", "idle").with_action("nonExistentAction"));

        let err = assemble(&description, &registry()).unwrap_err();
        assert!(err.to_string().contains("Action function 'nonExistentAction' not found in registry"));
    }

    #[test]
    fn nested_errors_fail_the_whole_assembly() {
        let child = MachineDescription::new("child", "c")
            .with_state("c", StateDescription::new())
            .with_transition(TransitionDescription::new("c", "GO", "c").guarded_by("missing"));
        let description = MachineDescription::new("parent", "p")
            .with_state("p", StateDescription::new().with_child(child));

        let err = assemble(&description, &registry()).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownGuard { ref machine, .. } if machine == "child"));
    }

    #[test]
    fn builds_nested_and_concurrent_children() {
        let registry = registry();
        let description = MachineDescription::from_value(json!({
            "id": "parentMachine",
            "initial": "parent",
            "states": {
                "parent": {
                    "handlerReferences": { "enter": "onEnter" },
                    "childMachine": {
                        "id": "childMachine",
                        "initial": "concurrent",
                        "states": {
                            "concurrent": {
                                "childMachines": [
                                    { "id": "child1", "initial": "state1", "states": { "state1": {} } },
                                    { "id": "child2", "initial": "state2", "states": { "state2": {} } }
                                ]
                            }
                        }
                    }
                }
            }
        }))
        .unwrap();

        let config = assemble(&description, &registry).unwrap();
        let parent = config.state("parent").unwrap();
        assert_eq!(parent.children().len(), 1);

        let child = &parent.children()[0];
        assert_eq!(child.config().id, "childMachine");
        let concurrent = child.state("concurrent").unwrap();
        let ids: Vec<_> = concurrent
            .children()
            .iter()
            .map(|m| m.config().id.as_str())
            .collect();
        assert_eq!(ids, vec!["child1", "child2"]);
    }

    #[test]
    fn carries_state_metadata() {
        let description = MachineDescription::new("m", "a")
            .with_state("a", StateDescription::new())
            .with_state(
                "b",
                StateDescription::new()
                    .with_parent("a")
                    .with_history(true)
                    .with_kind(StateKind::Choice),
            );

        let config = assemble(&description, &registry()).unwrap();
        let b = config.state("b").unwrap();
        assert_eq!(b.parent().map(String::as_str), Some("a"));
        assert!(b.has_history());
        assert_eq!(b.kind(), StateKind::Choice);
    }
}
