//! Events and the results of handling them.
//!
//! An [`Event`] is a string tag plus an optional opaque payload. Handlers
//! answer with an [`EventHandlingResult`] that says whether the event was
//! fully consumed or should keep propagating toward the transition table.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Event type of the lifecycle notification sent to a state on entry.
pub const ENTER_EVENT: &str = "enter";

/// Event type of the lifecycle notification sent to a state on exit.
pub const EXIT_EVENT: &str = "exit";

/// An event delivered to a machine.
///
/// # Example
///
/// ```rust
/// use composite_hsm::core::Event;
/// use serde_json::json;
///
/// let start = Event::new("START");
/// assert_eq!(start.event_type, "START");
/// assert!(start.data.is_none());
///
/// let tick = Event::with_data("TICK", json!({ "ms": 250 }));
/// assert_eq!(tick.data, Some(json!({ "ms": 250 })));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Tag matched against handler tables and transition tables
    #[serde(rename = "type")]
    pub event_type: String,
    /// Optional caller-defined payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl Event {
    /// Create an event without payload.
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            data: None,
        }
    }

    /// Create an event carrying a payload.
    pub fn with_data(event_type: impl Into<String>, data: Value) -> Self {
        Self {
            event_type: event_type.into(),
            data: Some(data),
        }
    }

    /// The lifecycle sentinel delivered to a state's `enter` handler.
    pub fn enter() -> Self {
        Self::new(ENTER_EVENT)
    }

    /// The lifecycle sentinel delivered to a state's `exit` handler.
    pub fn exit() -> Self {
        Self::new(EXIT_EVENT)
    }

    /// Whether this is one of the two lifecycle sentinels.
    pub fn is_lifecycle(&self) -> bool {
        self.event_type == ENTER_EVENT || self.event_type == EXIT_EVENT
    }
}

/// Outcome of offering an event to a handler, a state or a machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventHandlingResult {
    /// `true`: not fully consumed, keep processing.
    /// `false`: fully consumed, stop here.
    pub propagate: bool,
}

impl EventHandlingResult {
    /// No handler was found for the event.
    pub const NOT_HANDLED: Self = Self { propagate: true };

    /// Handled, and the event should keep propagating.
    pub const CONTINUE: Self = Self { propagate: true };

    /// Handled and fully consumed.
    pub const STOP: Self = Self { propagate: false };

    /// Whether processing should stop at the responder.
    pub fn is_consumed(&self) -> bool {
        !self.propagate
    }
}

/// Callable stored in a state's handler table.
///
/// Handlers are reference counted so a single registry entry can back any
/// number of states.
#[derive(Clone)]
pub struct EventHandler {
    callback: Arc<dyn Fn(&Event) -> EventHandlingResult + Send + Sync>,
}

impl EventHandler {
    /// Wrap a closure as a handler.
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&Event) -> EventHandlingResult + Send + Sync + 'static,
    {
        Self {
            callback: Arc::new(callback),
        }
    }

    /// Invoke the handler.
    pub fn handle(&self, event: &Event) -> EventHandlingResult {
        (self.callback)(event)
    }

    /// Whether two handles share the same underlying callable.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.callback, &other.callback)
    }
}

impl fmt::Debug for EventHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("EventHandler(..)")
    }
}
