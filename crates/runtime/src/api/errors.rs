//! Unified error types surfaced by the runtime API.
//!
//! Step-level anomalies never reach this type: the environment recovers from
//! them and logs. These errors cover building the environment and feeding it
//! actions.
use std::path::PathBuf;

use maze_core::ConfigError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("invalid environment configuration")]
    InvalidConfig(#[source] ConfigError),

    #[error("failed to load configuration from {path}")]
    ConfigLoad {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    #[error("{0} action provider has no actions left")]
    ProviderExhausted(&'static str),
}
