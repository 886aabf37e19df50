//! Runtime orchestration for the maze explorer environment.
//!
//! This crate wraps the deterministic core into the surface a training driver
//! or an interactive client talks to. Consumers build a [`MazeEnv`] and drive
//! it one step at a time, or hand it an [`ActionProvider`] and let it run
//! whole episodes.
//!
//! Modules are organized by responsibility:
//! - [`env`] hosts the environment facade and its builder
//! - [`api`] exposes the provider traits and error types clients implement against
//! - [`config`] resolves runtime configuration from files and environment variables
//! - [`control`] and [`stats`] back the operator-facing settings panel and stat display
pub mod api;
pub mod config;
pub mod control;
pub mod env;
pub mod stats;

pub use api::{
    ActionProvider, IdleProvider, InputSource, NoInput, RandomProvider, Result, RuntimeError,
    ScriptedInput, ScriptedProvider,
};
pub use config::RuntimeConfig;
pub use control::ControlPanel;
pub use env::{EpisodeSummary, MazeEnv, MazeEnvBuilder, StepOutcome};
pub use stats::StatsBoard;
