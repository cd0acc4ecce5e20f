//! Construction of machine configurations.
//!
//! Two routes lead to a [`Configuration`](crate::machine::Configuration):
//!
//! - declaratively, from a [`MachineDescription`] whose guard, action and
//!   handler names are resolved against a [`FunctionRegistry`] by the
//!   [`Assembler`];
//! - in code, with the fluent [`ConfigurationBuilder`] and
//!   [`TransitionBuilder`].

pub mod assembler;
pub mod description;
pub mod error;
pub mod machine;
pub mod registry;
pub mod transition;

pub use assembler::{assemble, Assembler};
pub use description::{MachineDescription, StateDescription, TransitionDescription};
pub use error::ConfigError;
pub use machine::ConfigurationBuilder;
pub use registry::FunctionRegistry;
pub use transition::TransitionBuilder;
