//! Core types shared by machines, states and the assembler.
//!
//! - Events and handling results
//! - Guard predicates and transition actions
//! - Composite states and their child machines
//! - Per-machine context and transition log

mod context;
mod event;
mod guard;
mod history;
mod state;

pub use context::Context;
pub use event::{Event, EventHandler, EventHandlingResult, ENTER_EVENT, EXIT_EVENT};
pub use guard::{Action, ActionError, Guard};
pub use history::{TransitionLog, TransitionRecord, DEFAULT_LOG_CAPACITY};
pub use state::{CompositeState, StateId, StateKind};
