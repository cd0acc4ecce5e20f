//! Runnable machines.
//!
//! An [`Orchestrator`] owns one [`Configuration`] and one
//! [`Context`](crate::core::Context) and drives the enter/exit/dispatch
//! protocol. Everything runs synchronously on the caller's thread: delivering
//! an event to a machine recurses into the child machines of its active state
//! before any result is returned.

mod config;
mod error;
mod orchestrator;
mod transition;

pub use config::Configuration;
pub use error::MachineError;
pub use orchestrator::{MachineId, Orchestrator};
pub use transition::Transition;
