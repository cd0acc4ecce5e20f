//! Composite HSM: hierarchical state machines with concurrent child regions
//!
//! A machine is an [`Orchestrator`] driving one [`Configuration`]: a set of
//! [`CompositeState`]s and a flat transition table. Any state may own child
//! machines which run while it is active and see every event before it does.
//!
//! # Core Concepts
//!
//! - **Events**: a type string plus an optional JSON payload
//! - **Composite states**: handler tables plus owned child machines, with an
//!   aggregation rule deciding whether an event keeps propagating
//! - **Orchestrator**: enter/exit/dispatch protocol over one configuration
//! - **Assembler**: builds configurations from JSON descriptions whose guards,
//!   actions and handlers are named entries of a [`FunctionRegistry`]
//!
//! # Example
//!
//! ```rust
//! use composite_hsm::{assemble, Event, FunctionRegistry, MachineDescription, Orchestrator};
//! use serde_json::json;
//!
//! let description = MachineDescription::from_value(json!({
//!     "id": "player",
//!     "initial": "stopped",
//!     "states": {
//!         "stopped": {},
//!         "playing": {
//!             "childMachine": {
//!                 "id": "track",
//!                 "initial": "intro",
//!                 "states": { "intro": {}, "chorus": {} },
//!                 "transitions": [
//!                     { "fromState": "intro", "eventType": "NEXT", "toState": "chorus" }
//!                 ]
//!             }
//!         }
//!     },
//!     "transitions": [
//!         { "fromState": "stopped", "eventType": "PLAY", "toState": "playing",
//!           "guardReference": "hasMedia" }
//!     ]
//! }))
//! .unwrap();
//!
//! let registry = FunctionRegistry::new().with_guard("hasMedia", || true);
//! let config = assemble(&description, &registry).unwrap();
//! let mut player = Orchestrator::new(config).unwrap();
//!
//! player.start().unwrap();
//! player.deliver_event(&Event::new("PLAY")).unwrap();
//! player.deliver_event(&Event::new("NEXT")).unwrap();
//!
//! assert_eq!(player.current_state(), "playing");
//! let track = &player.state("playing").unwrap().children()[0];
//! assert_eq!(track.current_state(), "chorus");
//! ```

pub mod builder;
pub mod core;
pub mod lint;
pub mod machine;
pub mod vocabulary;

// Re-export commonly used types
pub use builder::{
    assemble, Assembler, ConfigError, ConfigurationBuilder, FunctionRegistry, MachineDescription,
    TransitionBuilder,
};
pub use core::{CompositeState, Context, Event, EventHandlingResult, StateId};
pub use machine::{Configuration, MachineError, MachineId, Orchestrator, Transition};
pub use vocabulary::Vocabulary;
