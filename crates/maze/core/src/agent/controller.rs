//! Episode state machine: observation, action and reward logic.
//!
//! ```text
//! EpisodeStart ──apply_action──▶ Running ──door with key──────▶ Terminal(KeyThenDoor)
//!                                   │     ──step_count == max──▶ Terminal(StepLimitReached)
//!                                   └─────restart_run──────────▶ Terminal(Interrupted)
//! ```
//!
//! Terminal states absorb further actions and events until
//! [`EpisodeController::begin_episode`] starts the next episode.
use crate::config::{AgentConfig, EnvConfig, RewardConfig};
use crate::error::{ConfigError, EnvError};
use crate::generator::MazeGenerator;
use crate::layout::MazeLayout;
use crate::props::PropKind;

use super::action::{AgentAction, BehaviorMode, HeuristicInput};
use super::motion::{ContactPhase, MotionSubstrate, ObstacleKind};
use super::observation::Observation;
use super::pose::{AgentPose, MotionIntent};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TerminalReason {
    /// Key collected, then door reached.
    KeyThenDoor,
    StepLimitReached,
    /// Forced by `restart_run`.
    Interrupted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EpisodePhase {
    Start,
    Running,
    Terminal(TerminalReason),
}

impl EpisodePhase {
    pub fn terminal_reason(self) -> Option<TerminalReason> {
        match self {
            EpisodePhase::Terminal(reason) => Some(reason),
            _ => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, EpisodePhase::Terminal(_))
    }
}

/// Per-episode counters. `episode_index` is never reset.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EpisodeState {
    pub episode_index: u64,
    pub has_key: bool,
    pub cumulative_reward: f32,
    pub step_count: u32,
}

/// Outcome of one full step through [`EpisodeController::step`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepReport {
    /// Reward earned during this step.
    pub reward: f32,
    pub cumulative_reward: f32,
    pub step_count: u32,
    pub terminal: Option<TerminalReason>,
}

/// Agent decision and reward logic for one maze instance.
///
/// The controller owns its [`MazeGenerator`] and regenerates it at every
/// episode start. It only reads the resulting layout.
#[derive(Clone, Debug)]
pub struct EpisodeController {
    maze: MazeGenerator,
    agent: AgentConfig,
    rewards: RewardConfig,
    state: EpisodeState,
    phase: EpisodePhase,
    pose: AgentPose,
    /// Layout generation the motion substrate was last reset for.
    substrate_generation: Option<u64>,
}

impl EpisodeController {
    /// Builds a controller around `maze` and begins the first episode.
    pub fn new(maze: MazeGenerator, config: EnvConfig) -> Self {
        if let Err(error) = config.agent.validate() {
            tracing::warn!(code = error.error_code(), %error, "clamping agent configuration");
        }
        let mut controller = Self {
            maze,
            agent: config.agent.sanitized(),
            rewards: config.rewards,
            state: EpisodeState::default(),
            phase: EpisodePhase::Start,
            pose: AgentPose::default(),
            substrate_generation: None,
        };
        controller.begin_episode();
        controller
    }

    pub fn maze(&self) -> &MazeGenerator {
        &self.maze
    }

    /// Mutable access for configuration setters. Changes apply at the next episode.
    pub fn maze_mut(&mut self) -> &mut MazeGenerator {
        &mut self.maze
    }

    pub fn layout(&self) -> Option<&MazeLayout> {
        self.maze.layout()
    }

    pub fn state(&self) -> EpisodeState {
        self.state
    }

    pub fn phase(&self) -> EpisodePhase {
        self.phase
    }

    pub fn pose(&self) -> AgentPose {
        self.pose
    }

    pub fn agent_config(&self) -> AgentConfig {
        self.agent
    }

    pub fn reward_config(&self) -> RewardConfig {
        self.rewards
    }

    pub fn behavior_mode(&self) -> BehaviorMode {
        self.agent.behavior
    }

    pub fn begin_episode(&mut self) {
        self.state.has_key = false;
        self.state.episode_index += 1;
        self.state.cumulative_reward = 0.0;
        self.state.step_count = 0;

        let layout = self.maze.generate();
        let spawn = layout.world_of(layout.props().spawn);
        self.pose = AgentPose::at_spawn(spawn);
        self.phase = EpisodePhase::Start;

        tracing::debug!(
            episode = self.state.episode_index,
            generation = layout.generation(),
            "episode started"
        );
    }

    pub fn observe(&self) -> Observation {
        let key = if self.state.has_key {
            None
        } else {
            self.maze.key_pos()
        };
        Observation::build(&self.pose, key, self.maze.door_pos())
    }

    /// In heuristic mode the operator's input replaces the requested action.
    pub fn resolve_action(&self, requested: AgentAction, input: HeuristicInput) -> AgentAction {
        match self.agent.behavior {
            BehaviorMode::Heuristic => input.to_action(),
            BehaviorMode::Policy => requested,
        }
    }

    /// Counts the step, applies the time penalty and converts `action` into
    /// a motion intent for the substrate.
    ///
    /// Returns `None` once the episode is terminal; the action is dropped.
    pub fn apply_action(&mut self, action: AgentAction) -> Option<MotionIntent> {
        if let Some(reason) = self.phase.terminal_reason() {
            tracing::warn!(?reason, ?action, "action after episode end ignored");
            return None;
        }
        self.phase = EpisodePhase::Running;
        self.state.step_count += 1;

        let tick = self.agent.tick_seconds;
        let turn = self.agent.rotation_speed.to_radians() * tick;
        let intent = match action {
            AgentAction::Idle => MotionIntent::Idle,
            AgentAction::Forward => MotionIntent::Forward {
                distance: self.agent.move_speed * tick,
            },
            AgentAction::RotateLeft => MotionIntent::Rotate { radians: -turn },
            AgentAction::RotateRight => MotionIntent::Rotate { radians: turn },
        };

        self.add_reward(-self.rewards.step_budget / self.agent.max_steps as f32);
        Some(intent)
    }

    pub fn on_collision(&mut self, obstacle: ObstacleKind, phase: ContactPhase) {
        if self.phase.is_terminal() || obstacle != ObstacleKind::Wall {
            return;
        }
        let reward = match phase {
            ContactPhase::Enter => self.rewards.contact_enter,
            ContactPhase::Stay => self.rewards.contact_rate * self.agent.tick_seconds,
        };
        self.add_reward(reward);
    }

    pub fn on_trigger(&mut self, prop: PropKind) {
        if self.phase.is_terminal() {
            return;
        }
        match prop {
            PropKind::Key if !self.state.has_key => {
                self.add_reward(self.rewards.key_pickup);
                self.state.has_key = true;
                // Failure is logged by the generator; the pickup still counts.
                let _ = self.maze.destroy_key();
                tracing::debug!(episode = self.state.episode_index, "key collected");
            }
            PropKind::Door if self.state.has_key => {
                self.add_reward(self.rewards.door_reached);
                self.end_episode(TerminalReason::KeyThenDoor);
            }
            PropKind::Key | PropKind::Door | PropKind::Spawn => {}
        }
    }

    /// Ends the episode once the step counter reaches `max_steps`.
    pub fn check_step_limit(&mut self) -> bool {
        if !self.phase.is_terminal() && self.state.step_count >= self.agent.max_steps {
            self.end_episode(TerminalReason::StepLimitReached);
            return true;
        }
        false
    }

    /// No-op when the episode has already ended.
    pub fn end_episode(&mut self, reason: TerminalReason) {
        if self.phase.is_terminal() {
            return;
        }
        self.phase = EpisodePhase::Terminal(reason);
        tracing::debug!(
            episode = self.state.episode_index,
            ?reason,
            reward = self.state.cumulative_reward,
            steps = self.state.step_count,
            "episode ended"
        );
    }

    /// Ends the current episode regardless of its state and starts a new one.
    pub fn restart_run(&mut self) {
        self.end_episode(TerminalReason::Interrupted);
        self.begin_episode();
    }

    /// Runs one full step: action, motion, collision and trigger feedback,
    /// step limit.
    ///
    /// The substrate is reset on the first step of every new layout, so
    /// contact and trigger history never leaks across episodes.
    pub fn step<S>(&mut self, action: AgentAction, substrate: &mut S) -> StepReport
    where
        S: MotionSubstrate + ?Sized,
    {
        let before = self.state.cumulative_reward;

        if let Some(intent) = self.apply_action(action) {
            if let Some(layout) = self.maze.layout() {
                if self.substrate_generation != Some(layout.generation()) {
                    substrate.reset(layout, self.pose);
                    self.substrate_generation = Some(layout.generation());
                }
                let feedback = substrate.resolve(layout, self.pose, intent);
                self.pose = feedback.pose;
                for contact in feedback.contacts {
                    self.on_collision(contact.obstacle, contact.phase);
                }
                for prop in feedback.triggers {
                    self.on_trigger(prop);
                }
            }
            self.check_step_limit();
        }

        StepReport {
            reward: self.state.cumulative_reward - before,
            cumulative_reward: self.state.cumulative_reward,
            step_count: self.state.step_count,
            terminal: self.phase.terminal_reason(),
        }
    }

    pub fn apply_move_speed(&mut self, speed: f32) {
        self.agent.move_speed = checked_speed("move_speed", speed);
    }

    /// Degrees per second.
    pub fn apply_rotation_speed(&mut self, speed: f32) {
        self.agent.rotation_speed = checked_speed("rotation_speed", speed);
    }

    /// Takes effect immediately, including for the running episode.
    pub fn set_max_steps(&mut self, max_steps: u32) {
        if max_steps == 0 {
            let error = ConfigError::MaxStepsZero;
            tracing::warn!(code = error.error_code(), %error, "clamping max steps to 1");
        }
        self.agent.max_steps = max_steps.max(1);
    }

    pub fn change_behaviour_type(&mut self, use_heuristic: bool) {
        self.agent.behavior = BehaviorMode::from_heuristic_flag(use_heuristic);
    }

    fn add_reward(&mut self, reward: f32) {
        self.state.cumulative_reward += reward;
    }
}

fn checked_speed(field: &'static str, value: f32) -> f32 {
    let clamped = AgentConfig::clamp_speed(value);
    if clamped != value {
        let error = ConfigError::InvalidSpeed { field, value };
        tracing::warn!(code = error.error_code(), %error, "clamping speed");
    }
    clamped
}
