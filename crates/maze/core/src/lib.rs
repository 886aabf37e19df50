//! Deterministic maze generation and episode logic for the maze explorer environment.
//!
//! `maze-core` defines the canonical rules of the environment: the carving
//! algorithm that produces a perfect maze, key/door placement, and the
//! episode state machine that turns actions and collision feedback into
//! observations and rewards. Nothing here performs I/O; renderers, settings
//! panels and training drivers sit on top of the types re-exported below.
//!
//! Data flows one way: [`EpisodeController`] owns its [`MazeGenerator`],
//! regenerates it at every episode start, and reads the resulting
//! [`MazeLayout`] to build observations.
pub mod agent;
pub mod config;
pub mod error;
pub mod generator;
pub mod grid;
pub mod layout;
pub mod props;
pub mod rng;

pub use agent::{
    AgentAction, AgentPose, BehaviorMode, ContactEvent, ContactPhase, EpisodeController,
    EpisodePhase, EpisodeState, GridMotion, HeuristicInput, MotionFeedback, MotionIntent,
    MotionSubstrate, ObstacleKind, Observation, StepReport, TerminalReason,
};
pub use config::{AgentConfig, EnvConfig, MazeConfig, RewardConfig};
pub use error::{ActionError, ConfigError, EnvError, ErrorSeverity, PlacementError, PropError};
pub use generator::MazeGenerator;
pub use grid::{Cell, Direction, Grid, TilePos, carve};
pub use layout::{MazeLayout, WorldPos};
pub use props::{PropKind, PropPlacement, place_props};
pub use rng::{PcgRng, RngOracle, RngStream, compute_seed};
