//! Runtime configuration assembled from TOML files and environment variables.
use std::env;
use std::path::Path;
use std::str::FromStr;

use maze_content::ConfigLoader;
use maze_core::{BehaviorMode, EnvConfig};

use crate::api::{Result, RuntimeError};

/// Environment parameters plus the generator seed.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RuntimeConfig {
    pub env: EnvConfig,
    /// `None` draws a fresh seed when the environment is built.
    pub seed: Option<u64>,
}

impl RuntimeConfig {
    /// Construct configuration from environment variables.
    ///
    /// Environment variables:
    /// - `MAZE_SEED` - Generator seed (default: random)
    /// - `MAZE_MAP_SIZE` - Grid side length in tiles (default: 10)
    /// - `MAZE_CELL_SIZE` - World units per tile (default: 2)
    /// - `MAZE_MOVE_SPEED` - Agent speed in world units per second (default: 2)
    /// - `MAZE_ROTATION_SPEED` - Agent turn rate in degrees per second (default: 180)
    /// - `MAZE_MAX_STEPS` - Steps per episode (default: 5000)
    /// - `MAZE_HEURISTIC` - Start in heuristic mode (default: false)
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Loads the environment parameters from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let env = ConfigLoader::load(path).map_err(|source| RuntimeError::ConfigLoad {
            path: path.to_path_buf(),
            source: source.into(),
        })?;
        Ok(Self { env, seed: None })
    }

    /// Applies `MAZE_*` environment variables on top of `self`.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| env::var(key).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(seed) = read_var::<u64>(&lookup, "MAZE_SEED") {
            self.seed = Some(seed);
        }
        if let Some(size) = read_var::<u32>(&lookup, "MAZE_MAP_SIZE") {
            self.env.maze.width = size;
            self.env.maze.height = size;
        }
        if let Some(size) = read_var::<u32>(&lookup, "MAZE_CELL_SIZE") {
            self.env.maze.cell_size = size;
        }
        if let Some(speed) = read_var::<f32>(&lookup, "MAZE_MOVE_SPEED") {
            self.env.agent.move_speed = speed;
        }
        if let Some(speed) = read_var::<f32>(&lookup, "MAZE_ROTATION_SPEED") {
            self.env.agent.rotation_speed = speed;
        }
        if let Some(steps) = read_var::<u32>(&lookup, "MAZE_MAX_STEPS") {
            self.env.agent.max_steps = steps;
        }
        if let Some(heuristic) = read_var_bool(&lookup, "MAZE_HEURISTIC") {
            self.env.agent.behavior = BehaviorMode::from_heuristic_flag(heuristic);
        }
        self
    }

    /// The configured seed, or a freshly drawn one.
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }
}

fn read_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: FromStr,
{
    lookup(key)?.trim().parse().ok()
}

fn read_var_bool(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<bool> {
    match lookup(key)?.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
