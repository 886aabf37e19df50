//! Subcommand implementations.
mod render;
pub mod run;

pub use render::Render;
pub use run::Run;
