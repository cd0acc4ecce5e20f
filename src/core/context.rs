//! Per-machine run-time record.

use super::history::{TransitionLog, TransitionRecord};
use super::state::StateId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Mutable run-time record owned by exactly one machine.
///
/// Only the owning machine's enter/exit/dispatch operations change the active
/// state, the history map and the log. The `data` bag is free for the caller.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Context {
    active_state: StateId,
    history: HashMap<StateId, StateId>,
    data: Map<String, Value>,
    log: TransitionLog,
}

impl Context {
    pub fn new(initial: impl Into<StateId>) -> Self {
        Self {
            active_state: initial.into(),
            history: HashMap::new(),
            data: Map::new(),
            log: TransitionLog::new(),
        }
    }

    pub fn active_state(&self) -> &StateId {
        &self.active_state
    }

    /// Owner state id -> substate that was active when the owner last exited.
    pub fn history(&self) -> &HashMap<StateId, StateId> {
        &self.history
    }

    pub fn remembered(&self, owner: &str) -> Option<&StateId> {
        self.history.get(owner)
    }

    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.data
    }

    pub fn log(&self) -> &TransitionLog {
        &self.log
    }

    pub(crate) fn set_active_state(&mut self, state: StateId) {
        self.active_state = state;
    }

    pub(crate) fn remember(&mut self, owner: StateId, substate: StateId) {
        self.history.insert(owner, substate);
    }

    pub(crate) fn record(&mut self, record: TransitionRecord) {
        self.log = self.log.record(record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    #[test]
    fn new_context_starts_at_initial() {
        let context = Context::new("idle");
        assert_eq!(context.active_state(), "idle");
        assert!(context.history().is_empty());
        assert!(context.data().is_empty());
        assert!(context.log().is_empty());
    }

    #[test]
    fn remember_overwrites_previous_substate() {
        let mut context = Context::new("idle");
        context.remember("parent".to_string(), "child1".to_string());
        context.remember("parent".to_string(), "child2".to_string());

        assert_eq!(context.remembered("parent").map(String::as_str), Some("child2"));
        assert!(context.remembered("other").is_none());
    }

    #[test]
    fn data_bag_accepts_caller_values() {
        let mut context = Context::new("idle");
        context.data_mut().insert("retries".to_string(), json!(3));
        assert_eq!(context.data().get("retries"), Some(&json!(3)));
    }

    #[test]
    fn context_serializes_correctly() {
        let mut context = Context::new("idle");
        context.set_active_state("running".to_string());
        context.record(TransitionRecord {
            from: "idle".to_string(),
            to: "running".to_string(),
            event: "START".to_string(),
            timestamp: Utc::now(),
        });

        let json = serde_json::to_string(&context).unwrap();
        let deserialized: Context = serde_json::from_str(&json).unwrap();
        assert_eq!(context, deserialized);
    }
}
