//! Data-driven content definitions and loaders.
//!
//! This crate houses the tunable parameters exposed to operators and
//! provides TOML loaders for them:
//! - Settings-panel slider table (ranges, defaults, snapping rules)
//! - Environment configuration (maze, agent and reward parameters)
//!
//! Content is consumed by the runtime and never appears in episode state.

pub mod settings;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use settings::{SettingKind, SliderSpec, default_sliders};

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, LoadResult, SettingsLoader};
