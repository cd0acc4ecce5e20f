//! Transition log kept in each machine's context.
//!
//! Records which transitions a machine applied and when, for introspection and
//! diagnostics. The log is bounded: once it holds `capacity` records the
//! oldest one is dropped for every new one.

use super::state::StateId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Number of records a [`TransitionLog`] retains by default.
pub const DEFAULT_LOG_CAPACITY: usize = 64;

/// Record of a single applied transition.
///
/// # Example
///
/// ```rust
/// use composite_hsm::core::TransitionRecord;
/// use chrono::Utc;
///
/// let record = TransitionRecord {
///     from: "idle".to_string(),
///     to: "running".to_string(),
///     event: "START".to_string(),
///     timestamp: Utc::now(),
/// };
/// assert_eq!(record.to, "running");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// The state that was exited
    pub from: StateId,
    /// The state that was entered
    pub to: StateId,
    /// The event type that selected the transition
    pub event: String,
    /// When the target state was entered
    pub timestamp: DateTime<Utc>,
}

/// Ordered, bounded log of applied transitions.
///
/// `record` returns a new log with the transition added; the receiver is left
/// untouched.
///
/// # Example
///
/// ```rust
/// use composite_hsm::core::{TransitionLog, TransitionRecord};
/// use chrono::Utc;
///
/// let log = TransitionLog::new();
/// let log = log.record(TransitionRecord {
///     from: "idle".to_string(),
///     to: "running".to_string(),
///     event: "START".to_string(),
///     timestamp: Utc::now(),
/// });
/// let log = log.record(TransitionRecord {
///     from: "running".to_string(),
///     to: "idle".to_string(),
///     event: "STOP".to_string(),
///     timestamp: Utc::now(),
/// });
///
/// assert_eq!(log.path(), vec!["idle", "running", "idle"]);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionLog {
    records: VecDeque<TransitionRecord>,
    capacity: usize,
}

impl Default for TransitionLog {
    fn default() -> Self {
        Self::new()
    }
}

impl TransitionLog {
    /// Create an empty log with [`DEFAULT_LOG_CAPACITY`].
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_LOG_CAPACITY)
    }

    /// Create an empty log retaining at most `capacity` records.
    ///
    /// A capacity of zero keeps nothing.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: VecDeque::new(),
            capacity,
        }
    }

    /// Record a transition, returning a new log.
    pub fn record(&self, record: TransitionRecord) -> Self {
        let mut records = self.records.clone();
        if self.capacity > 0 {
            if records.len() == self.capacity {
                records.pop_front();
            }
            records.push_back(record);
        }
        Self {
            records,
            capacity: self.capacity,
        }
    }

    /// Path of states traversed: the first retained source, then every target.
    pub fn path(&self) -> Vec<&str> {
        let mut path = Vec::new();
        if let Some(first) = self.records.front() {
            path.push(first.from.as_str());
        }
        for record in &self.records {
            path.push(record.to.as_str());
        }
        path
    }

    /// Time between the first and last retained records.
    ///
    /// Returns `None` if the log is empty.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.records.front(), self.records.back()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    /// Most recent record, if any.
    pub fn last(&self) -> Option<&TransitionRecord> {
        self.records.back()
    }

    /// Retained records, oldest first.
    pub fn records(&self) -> impl Iterator<Item = &TransitionRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
