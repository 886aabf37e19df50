//! Environment configuration and tunable parameters.
//!
//! Values arrive from settings panels, TOML files and environment variables.
//! [`EnvConfig::validate`] reports the first problem strictly;
//! [`EnvConfig::sanitized`] clamps every field into its valid range, which is
//! what the setters on the generator and the controller use so the
//! environment never ends up with a degenerate grid.
use crate::agent::BehaviorMode;
use crate::error::ConfigError;

/// Maze layout parameters. Read by the generator at the next `generate()` call.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MazeConfig {
    pub width: u32,
    pub height: u32,
    /// World units per tile.
    pub cell_size: u32,
}

impl MazeConfig {
    /// Below this, placement cannot find three distinct open tiles.
    pub const MIN_MAP_SIZE: u32 = 4;
    pub const MAX_MAP_SIZE: u32 = 256;
    pub const MIN_CELL_SIZE: u32 = 1;

    pub const DEFAULT_MAP_SIZE: u32 = 10;
    pub const DEFAULT_CELL_SIZE: u32 = 2;

    pub const fn new(width: u32, height: u32, cell_size: u32) -> Self {
        Self {
            width,
            height,
            cell_size,
        }
    }

    pub const fn square(size: u32, cell_size: u32) -> Self {
        Self::new(size, size, cell_size)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let in_range = |v: u32| (Self::MIN_MAP_SIZE..=Self::MAX_MAP_SIZE).contains(&v);
        if !in_range(self.width) || !in_range(self.height) {
            return Err(ConfigError::MapSizeOutOfRange {
                width: self.width as i64,
                height: self.height as i64,
                min: Self::MIN_MAP_SIZE,
                max: Self::MAX_MAP_SIZE,
            });
        }
        if self.width % 2 != 0 || self.height % 2 != 0 {
            return Err(ConfigError::MapSizeOdd {
                width: self.width,
                height: self.height,
            });
        }
        if self.cell_size < Self::MIN_CELL_SIZE {
            return Err(ConfigError::CellSizeTooSmall(self.cell_size as i64));
        }
        Ok(())
    }

    /// Rounds a requested side length down to even and clamps it into range.
    pub fn clamp_map_size(requested: i64) -> u32 {
        let clamped = requested.clamp(Self::MIN_MAP_SIZE as i64, Self::MAX_MAP_SIZE as i64) as u32;
        (clamped / 2 * 2).max(Self::MIN_MAP_SIZE)
    }

    pub fn clamp_cell_size(requested: i64) -> u32 {
        requested.clamp(Self::MIN_CELL_SIZE as i64, u32::MAX as i64) as u32
    }

    pub fn sanitized(&self) -> Self {
        Self {
            width: Self::clamp_map_size(self.width as i64),
            height: Self::clamp_map_size(self.height as i64),
            cell_size: Self::clamp_cell_size(self.cell_size as i64),
        }
    }
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self::square(Self::DEFAULT_MAP_SIZE, Self::DEFAULT_CELL_SIZE)
    }
}

/// Agent motion and episode parameters. Applied immediately when changed.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AgentConfig {
    /// World units per second.
    pub move_speed: f32,
    /// Degrees per second.
    pub rotation_speed: f32,
    pub max_steps: u32,
    /// Simulated seconds per step.
    pub tick_seconds: f32,
    pub behavior: BehaviorMode,
}

impl AgentConfig {
    pub const DEFAULT_MOVE_SPEED: f32 = 2.0;
    pub const DEFAULT_ROTATION_SPEED: f32 = 180.0;
    pub const DEFAULT_MAX_STEPS: u32 = 5000;
    pub const DEFAULT_TICK_SECONDS: f32 = 0.02;

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_speed("move_speed", self.move_speed)?;
        check_speed("rotation_speed", self.rotation_speed)?;
        if self.max_steps == 0 {
            return Err(ConfigError::MaxStepsZero);
        }
        if !(self.tick_seconds.is_finite() && self.tick_seconds > 0.0) {
            return Err(ConfigError::InvalidTick(self.tick_seconds));
        }
        Ok(())
    }

    /// Non-finite or negative speeds become zero.
    pub fn clamp_speed(value: f32) -> f32 {
        if value.is_finite() { value.max(0.0) } else { 0.0 }
    }

    pub fn sanitized(&self) -> Self {
        Self {
            move_speed: Self::clamp_speed(self.move_speed),
            rotation_speed: Self::clamp_speed(self.rotation_speed),
            max_steps: self.max_steps.max(1),
            tick_seconds: if self.tick_seconds.is_finite() && self.tick_seconds > 0.0 {
                self.tick_seconds
            } else {
                Self::DEFAULT_TICK_SECONDS
            },
            behavior: self.behavior,
        }
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            move_speed: Self::DEFAULT_MOVE_SPEED,
            rotation_speed: Self::DEFAULT_ROTATION_SPEED,
            max_steps: Self::DEFAULT_MAX_STEPS,
            tick_seconds: Self::DEFAULT_TICK_SECONDS,
            behavior: BehaviorMode::Policy,
        }
    }
}

fn check_speed(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidSpeed { field, value })
    }
}

/// Reward shaping constants.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RewardConfig {
    /// Total time pressure over a full episode, spread as `-step_budget / max_steps` per step.
    pub step_budget: f32,
    /// One-time penalty when contact with a wall begins.
    pub contact_enter: f32,
    /// Penalty per simulated second of sustained wall contact.
    pub contact_rate: f32,
    pub key_pickup: f32,
    pub door_reached: f32,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            step_budget: 2.0,
            contact_enter: -0.01,
            contact_rate: -0.002,
            key_pickup: 1.0,
            door_reached: 2.0,
        }
    }
}

/// Complete environment configuration.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EnvConfig {
    pub maze: MazeConfig,
    pub agent: AgentConfig,
    pub rewards: RewardConfig,
}

impl EnvConfig {
    /// Position normalization divisor used in observations.
    pub const POSITION_SCALE: f32 = 5.0;
    pub const OBSERVATION_SIZE: usize = 10;

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.maze.validate()?;
        self.agent.validate()
    }

    pub fn sanitized(&self) -> Self {
        Self {
            maze: self.maze.sanitized(),
            agent: self.agent.sanitized(),
            rewards: self.rewards,
        }
    }
}
