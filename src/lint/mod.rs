//! Validation-based reference linting for configurations.
//!
//! Assembly tolerates transitions whose states do not exist; dispatch skips
//! them with a warning. The linter finds such references up front. It uses
//! Stillwater's `Validation` type so that one pass reports every dangling
//! reference in the tree instead of stopping at the first.
//!
//! # Example
//!
//! ```rust
//! use composite_hsm::core::CompositeState;
//! use composite_hsm::lint::check_references;
//! use composite_hsm::machine::{Configuration, Transition};
//!
//! let mut config = Configuration::new("door", "closed");
//! config.add_state(CompositeState::new("closed"));
//! config.add_transition(Transition::new("closed", "OPEN", "open"));
//!
//! assert!(check_references(&config).is_failure());
//! ```

pub mod rules;
pub mod violations;

pub use rules::{check_references, Check};
pub use violations::ReferenceViolation;
