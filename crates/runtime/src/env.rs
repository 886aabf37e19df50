//! Environment facade driven by training loops and interactive clients.
//!
//! [`MazeEnv`] owns the episode controller, the motion substrate and the
//! operator input source, and exposes the step protocol:
//!
//! ```text
//! observe() ──▶ policy ──▶ step(action) ──▶ StepOutcome
//!                              │
//!                              └─ terminal? end episode, begin the next one
//! ```
//!
//! Terminal steps end the episode and begin the next one inside the same
//! call, so callers never observe a half-reset environment.
use maze_core::{
    ActionError, AgentAction, AgentPose, BehaviorMode, EnvConfig, EnvError, EpisodeController,
    EpisodePhase, EpisodeState, GridMotion, HeuristicInput, MazeGenerator, MazeLayout,
    MotionSubstrate, Observation, TerminalReason,
};

use crate::api::{ActionProvider, InputSource, NoInput, Result, RuntimeError};
use crate::config::RuntimeConfig;
use crate::stats::StatsBoard;

/// Result of one environment step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepOutcome {
    /// Observation after the step. For terminal steps this is the final
    /// observation of the finished episode.
    pub observation: Observation,
    /// Action actually applied, after heuristic override.
    pub action: AgentAction,
    pub reward: f32,
    pub cumulative_reward: f32,
    pub episode_index: u64,
    pub step_count: u32,
    pub terminal: Option<TerminalReason>,
}

/// Summary of a finished episode.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct EpisodeSummary {
    pub episode: u64,
    pub reason: TerminalReason,
    pub reward: f32,
    pub steps: u32,
}

pub struct MazeEnv {
    seed: u64,
    controller: EpisodeController,
    motion: Box<dyn MotionSubstrate>,
    input: Box<dyn InputSource>,
    stats: StatsBoard,
}

impl MazeEnv {
    pub fn builder() -> MazeEnvBuilder {
        MazeEnvBuilder::new()
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn observe(&self) -> Observation {
        self.controller.observe()
    }

    /// Applies one action and advances the simulation by one tick.
    ///
    /// Operator input is only polled in heuristic mode.
    pub fn step(&mut self, action: AgentAction) -> StepOutcome {
        let input = match self.controller.behavior_mode() {
            BehaviorMode::Heuristic => self.input.poll(),
            BehaviorMode::Policy => HeuristicInput::empty(),
        };
        let action = self.controller.resolve_action(action, input);
        let report = self.controller.step(action, self.motion.as_mut());
        let state = self.controller.state();
        self.stats
            .record(state.episode_index, report.cumulative_reward, report.step_count);

        let outcome = StepOutcome {
            observation: self.controller.observe(),
            action,
            reward: report.reward,
            cumulative_reward: report.cumulative_reward,
            episode_index: state.episode_index,
            step_count: report.step_count,
            terminal: report.terminal,
        };

        if let Some(reason) = report.terminal {
            tracing::info!(
                episode = state.episode_index,
                ?reason,
                reward = report.cumulative_reward,
                steps = report.step_count,
                "episode finished"
            );
            self.controller.begin_episode();
        }

        outcome
    }

    /// Steps with a raw discrete action index. Unknown values idle.
    pub fn step_raw(&mut self, action: i64) -> StepOutcome {
        let action = AgentAction::try_from(action).unwrap_or_else(|error: ActionError| {
            tracing::warn!(code = error.error_code(), %error, "treating as idle");
            AgentAction::Idle
        });
        self.step(action)
    }

    /// Steps with actions from `provider` until the current episode ends.
    pub fn run_episode(&mut self, provider: &mut dyn ActionProvider) -> Result<EpisodeSummary> {
        let mut observation = self.observe();
        loop {
            let action = provider.provide_action(&observation)?;
            let outcome = self.step(action);
            if let Some(reason) = outcome.terminal {
                return Ok(EpisodeSummary {
                    episode: outcome.episode_index,
                    reason,
                    reward: outcome.cumulative_reward,
                    steps: outcome.step_count,
                });
            }
            observation = outcome.observation;
        }
    }

    /// Interrupts the current episode and starts a new one.
    pub fn restart_run(&mut self) {
        let state = self.controller.state();
        tracing::info!(
            episode = state.episode_index,
            steps = state.step_count,
            "restarting run"
        );
        self.controller.restart_run();
    }

    pub fn apply_map_size(&mut self, size: i32) {
        self.controller.maze_mut().apply_map_size(size);
    }

    pub fn apply_map_dimensions(&mut self, width: i32, height: i32) {
        self.controller.maze_mut().apply_map_dimensions(width, height);
    }

    pub fn apply_cell_size(&mut self, size: i32) {
        self.controller.maze_mut().apply_cell_size(size);
    }

    pub fn apply_move_speed(&mut self, speed: f32) {
        self.controller.apply_move_speed(speed);
    }

    pub fn apply_rotation_speed(&mut self, speed: f32) {
        self.controller.apply_rotation_speed(speed);
    }

    pub fn set_max_steps(&mut self, max_steps: u32) {
        self.controller.set_max_steps(max_steps);
    }

    pub fn change_behaviour_type(&mut self, use_heuristic: bool) {
        self.controller.change_behaviour_type(use_heuristic);
    }

    pub fn layout(&self) -> Option<&MazeLayout> {
        self.controller.layout()
    }

    pub fn maze(&self) -> &MazeGenerator {
        self.controller.maze()
    }

    pub fn state(&self) -> EpisodeState {
        self.controller.state()
    }

    pub fn phase(&self) -> EpisodePhase {
        self.controller.phase()
    }

    pub fn pose(&self) -> AgentPose {
        self.controller.pose()
    }

    pub fn controller(&self) -> &EpisodeController {
        &self.controller
    }

    pub fn stats(&self) -> &StatsBoard {
        &self.stats
    }
}

/// Builder for [`MazeEnv`] with flexible configuration.
pub struct MazeEnvBuilder {
    config: EnvConfig,
    seed: Option<u64>,
    strict: bool,
    motion: Option<Box<dyn MotionSubstrate>>,
    input: Option<Box<dyn InputSource>>,
}

impl MazeEnvBuilder {
    fn new() -> Self {
        Self {
            config: EnvConfig::default(),
            seed: None,
            strict: false,
            motion: None,
            input: None,
        }
    }

    /// Override environment configuration
    pub fn config(mut self, config: EnvConfig) -> Self {
        self.config = config;
        self
    }

    /// Take configuration and seed from a resolved [`RuntimeConfig`]
    pub fn runtime_config(mut self, config: RuntimeConfig) -> Self {
        self.config = config.env;
        if config.seed.is_some() {
            self.seed = config.seed;
        }
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Reject invalid configuration instead of clamping it.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Replace the default [`GridMotion`] substrate.
    pub fn motion(mut self, motion: impl MotionSubstrate + 'static) -> Self {
        self.motion = Some(Box::new(motion));
        self
    }

    /// Set the operator input used in heuristic mode (default: nothing pressed).
    pub fn input(mut self, input: impl InputSource + 'static) -> Self {
        self.input = Some(Box::new(input));
        self
    }

    /// Generates the first maze and begins episode 1.
    pub fn build(self) -> Result<MazeEnv> {
        if self.strict {
            self.config.validate().map_err(RuntimeError::InvalidConfig)?;
        }

        let seed = self.seed.unwrap_or_else(rand::random);
        let generator = MazeGenerator::new(self.config.maze, seed);
        let controller = EpisodeController::new(generator, self.config);

        let motion: Box<dyn MotionSubstrate> = match self.motion {
            Some(motion) => motion,
            None => Box::new(GridMotion::new()),
        };

        tracing::info!(
            seed,
            width = self.config.maze.width,
            height = self.config.maze.height,
            behavior = ?controller.behavior_mode(),
            "maze environment ready"
        );

        let input: Box<dyn InputSource> = match self.input {
            Some(input) => input,
            None => Box::new(NoInput),
        };

        Ok(MazeEnv {
            seed,
            controller,
            motion,
            input,
            stats: StatsBoard::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ScriptedInput;
    use maze_core::{AgentConfig, ConfigError, MazeConfig};

    fn env(max_steps: u32) -> MazeEnv {
        let config = EnvConfig {
            agent: AgentConfig {
                max_steps,
                ..AgentConfig::default()
            },
            ..EnvConfig::default()
        };
        MazeEnv::builder().config(config).seed(11).build().unwrap()
    }

    #[test]
    fn terminal_step_begins_the_next_episode() {
        let mut env = env(3);
        let mut outcomes = Vec::new();
        for _ in 0..3 {
            outcomes.push(env.step(AgentAction::Idle));
        }

        let last = outcomes[2];
        assert_eq!(last.terminal, Some(TerminalReason::StepLimitReached));
        assert_eq!(last.episode_index, 1);
        assert_eq!(last.step_count, 3);
        assert!((last.cumulative_reward + 2.0).abs() < 1e-5);

        assert_eq!(env.state().episode_index, 2);
        assert_eq!(env.state().step_count, 0);
        assert_eq!(env.phase(), EpisodePhase::Start);
        assert_eq!(env.stats().episode_text(), "Episode: 1 | Step: 3");
    }

    #[test]
    fn unknown_raw_actions_idle() {
        let mut env = env(100);
        let before = env.pose();
        let outcome = env.step_raw(9);
        assert_eq!(outcome.action, AgentAction::Idle);
        assert_eq!(env.pose(), before);
        assert_eq!(outcome.step_count, 1);
    }

    #[test]
    fn heuristic_mode_replaces_the_policy_action() {
        let config = EnvConfig {
            agent: AgentConfig {
                behavior: BehaviorMode::Heuristic,
                ..AgentConfig::default()
            },
            ..EnvConfig::default()
        };
        let mut env = MazeEnv::builder()
            .config(config)
            .seed(5)
            .input(ScriptedInput::new([HeuristicInput::RIGHT]))
            .build()
            .unwrap();

        assert_eq!(env.step(AgentAction::Forward).action, AgentAction::RotateRight);
        assert_eq!(env.step(AgentAction::Forward).action, AgentAction::Idle);

        env.change_behaviour_type(false);
        assert_eq!(env.step(AgentAction::Forward).action, AgentAction::Forward);
    }

    #[test]
    fn policy_mode_leaves_operator_input_queued() {
        let mut env = MazeEnv::builder()
            .seed(5)
            .input(ScriptedInput::new([HeuristicInput::LEFT]))
            .build()
            .unwrap();

        assert_eq!(env.step(AgentAction::Forward).action, AgentAction::Forward);
        env.change_behaviour_type(true);
        assert_eq!(env.step(AgentAction::Forward).action, AgentAction::RotateLeft);
    }

    #[test]
    fn restart_run_interrupts_and_regenerates() {
        let mut env = env(100);
        env.apply_map_size(14);
        env.step(AgentAction::RotateLeft);
        assert_eq!(env.layout().unwrap().grid().width(), 10);

        env.restart_run();
        assert_eq!(env.state().episode_index, 2);
        assert_eq!(env.state().step_count, 0);
        assert_eq!(env.layout().unwrap().grid().width(), 14);
        assert_eq!(env.pose(), AgentPose::default());
    }

    #[test]
    fn strict_builds_reject_invalid_config() {
        let config = EnvConfig {
            maze: MazeConfig::square(7, 2),
            ..EnvConfig::default()
        };
        let result = MazeEnv::builder().config(config).strict(true).build();
        assert!(matches!(
            result,
            Err(RuntimeError::InvalidConfig(ConfigError::MapSizeOdd { .. }))
        ));

        let env = MazeEnv::builder().config(config).seed(1).build().unwrap();
        assert_eq!(env.layout().unwrap().grid().width(), 6);
    }

    #[test]
    fn same_seed_same_mazes() {
        let mut a = env(2);
        let mut b = env(2);
        for _ in 0..6 {
            a.step(AgentAction::Forward);
            b.step(AgentAction::Forward);
            assert_eq!(a.layout(), b.layout());
            assert_eq!(a.observe(), b.observe());
        }
        assert_eq!(a.seed(), 11);
    }
}
