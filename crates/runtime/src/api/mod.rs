//! Public API surface for runtime consumers.
//!
//! Re-exports the provider traits and error types that clients use to drive
//! the environment.
mod errors;
mod providers;

pub use errors::{Result, RuntimeError};
pub use providers::{
    ActionProvider, IdleProvider, InputSource, NoInput, RandomProvider, ScriptedInput,
    ScriptedProvider,
};
