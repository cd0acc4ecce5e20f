//! Declarative machine descriptions.
//!
//! A description is plain data: states, transitions and the *names* of the
//! guards, actions and handlers they use. It deserializes from a camelCase
//! JSON document:
//!
//! ```json
//! {
//!   "id": "door",
//!   "initial": "closed",
//!   "states": {
//!     "closed": { "handlerReferences": { "enter": "logEnter" } },
//!     "open": { "type": "normal", "childMachines": [] }
//!   },
//!   "transitions": [
//!     { "fromState": "closed", "eventType": "OPEN", "toState": "open",
//!       "guardReference": "unlocked", "actionReference": "chime" }
//!   ]
//! }
//! ```

use super::error::ConfigError;
use crate::core::{StateId, StateKind};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Description of one machine.
///
/// A missing `id` or `initial` deserializes as empty and is rejected by the
/// assembler.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MachineDescription {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub initial: StateId,
    #[serde(default)]
    pub states: BTreeMap<StateId, StateDescription>,
    #[serde(default)]
    pub transitions: Vec<TransitionDescription>,
}

impl MachineDescription {
    pub fn new(id: impl Into<String>, initial: impl Into<StateId>) -> Self {
        Self {
            id: id.into(),
            initial: initial.into(),
            ..Self::default()
        }
    }

    /// Parse a JSON document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Convert an already parsed JSON value.
    pub fn from_value(value: Value) -> Result<Self, ConfigError> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn with_state(mut self, id: impl Into<StateId>, state: StateDescription) -> Self {
        self.states.insert(id.into(), state);
        self
    }

    pub fn with_transition(mut self, transition: TransitionDescription) -> Self {
        self.transitions.push(transition);
        self
    }
}

/// Description of one state.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateDescription {
    /// Optional explicit id; must equal the key the state is stored under.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<StateId>,
    #[serde(default, rename = "type")]
    pub kind: StateKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<StateId>,
    #[serde(default)]
    pub history: bool,
    /// Event type -> handler name. Lifecycle handlers use the `enter` and
    /// `exit` keys.
    #[serde(default)]
    pub handler_references: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub child_machine: Option<Box<MachineDescription>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub child_machines: Vec<MachineDescription>,
}

impl StateDescription {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_kind(mut self, kind: StateKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_parent(mut self, parent: impl Into<StateId>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn with_history(mut self, history: bool) -> Self {
        self.history = history;
        self
    }

    pub fn with_handler(mut self, event_type: impl Into<String>, name: impl Into<String>) -> Self {
        self.handler_references.insert(event_type.into(), name.into());
        self
    }

    /// Add a concurrent child machine.
    pub fn with_child(mut self, child: MachineDescription) -> Self {
        self.child_machines.push(child);
        self
    }

    /// Every embedded child description: `child_machine` first, then
    /// `child_machines` in order.
    pub fn children(&self) -> impl Iterator<Item = &MachineDescription> {
        self.child_machine
            .as_deref()
            .into_iter()
            .chain(self.child_machines.iter())
    }
}

/// Description of one transition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionDescription {
    pub from_state: StateId,
    pub event_type: String,
    pub to_state: StateId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guard_reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_reference: Option<String>,
}

impl TransitionDescription {
    pub fn new(
        from_state: impl Into<StateId>,
        event_type: impl Into<String>,
        to_state: impl Into<StateId>,
    ) -> Self {
        Self {
            from_state: from_state.into(),
            event_type: event_type.into(),
            to_state: to_state.into(),
            guard_reference: None,
            action_reference: None,
        }
    }

    pub fn guarded_by(mut self, guard: impl Into<String>) -> Self {
        self.guard_reference = Some(guard.into());
        self
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action_reference = Some(action.into());
        self
    }
}
