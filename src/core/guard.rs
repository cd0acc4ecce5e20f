//! Guard predicates and transition actions.
//!
//! Guards are zero-argument predicates evaluated at dispatch time to decide
//! whether a transition fires. Actions are zero-argument callbacks run between
//! exiting the source state and entering the target state. Both capture
//! whatever caller state they need in their closures.

use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Predicate that determines if a transition can fire.
///
/// # Example
///
/// ```rust
/// use composite_hsm::core::Guard;
/// use std::sync::atomic::{AtomicBool, Ordering};
/// use std::sync::Arc;
///
/// let armed = Arc::new(AtomicBool::new(false));
/// let flag = Arc::clone(&armed);
/// let guard = Guard::new(move || flag.load(Ordering::SeqCst));
///
/// assert!(!guard.check());
/// armed.store(true, Ordering::SeqCst);
/// assert!(guard.check());
/// ```
#[derive(Clone)]
pub struct Guard {
    predicate: Arc<dyn Fn() -> bool + Send + Sync>,
}

impl Guard {
    /// Create a guard from a predicate.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Arc::new(predicate),
        }
    }

    /// Evaluate the predicate.
    pub fn check(&self) -> bool {
        (self.predicate)()
    }

    /// Whether two handles share the same underlying predicate.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.predicate, &other.predicate)
    }
}

impl fmt::Debug for Guard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Guard(..)")
    }
}

/// Failure reported by a transition action.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct ActionError {
    message: String,
}

impl ActionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Side-effecting callback run while a transition is applied.
///
/// An `Err` aborts the dispatch after the source state has been exited and
/// before the target state is entered.
#[derive(Clone)]
pub struct Action {
    effect: Arc<dyn Fn() -> Result<(), ActionError> + Send + Sync>,
}

impl Action {
    /// Create an action from a fallible callback.
    pub fn new<F>(effect: F) -> Self
    where
        F: Fn() -> Result<(), ActionError> + Send + Sync + 'static,
    {
        Action {
            effect: Arc::new(effect),
        }
    }

    /// Create an action from a callback that cannot fail.
    pub fn infallible<F>(effect: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self::new(move || {
            effect();
            Ok(())
        })
    }

    /// Run the callback.
    pub fn run(&self) -> Result<(), ActionError> {
        (self.effect)()
    }

    /// Whether two handles share the same underlying callback.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.effect, &other.effect)
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Action(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn guard_reflects_predicate() {
        assert!(Guard::new(|| true).check());
        assert!(!Guard::new(|| false).check());
    }

    #[test]
    fn guard_can_read_captured_state() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let guard = Guard::new(move || counter.fetch_add(1, Ordering::SeqCst) % 2 == 0);

        assert!(guard.check());
        assert!(!guard.check());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn cloned_guard_shares_predicate() {
        let guard = Guard::new(|| true);
        assert!(guard.ptr_eq(&guard.clone()));
        assert!(!guard.ptr_eq(&Guard::new(|| true)));
    }

    #[test]
    fn infallible_action_runs_effect() {
        let runs = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&runs);
        let action = Action::infallible(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        assert!(action.run().is_ok());
        assert!(action.run().is_ok());
        assert_eq!(runs.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn failing_action_reports_message() {
        let action = Action::new(|| Err(ActionError::new("disk full")));
        let err = action.run().unwrap_err();
        assert_eq!(err.message(), "disk full");
        assert_eq!(err.to_string(), "disk full");
    }
}
