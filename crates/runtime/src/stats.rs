//! Operator-facing episode statistics.
//!
//! Display only: nothing here feeds back into rewards or observations.
use std::fmt;

/// Latest episode counters and the best cumulative reward seen so far.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct StatsBoard {
    episode: u64,
    reward: f32,
    step: u32,
    max_reward: f32,
}

impl StatsBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, episode: u64, reward: f32, step: u32) {
        if reward > self.max_reward {
            self.max_reward = reward;
        }
        self.episode = episode;
        self.reward = reward;
        self.step = step;
    }

    /// Best reward observed across all episodes. Starts at zero.
    pub fn max_reward(&self) -> f32 {
        self.max_reward
    }

    pub fn reward_text(&self) -> String {
        format!("Reward: {} | Max Reward: {}", self.reward, self.max_reward)
    }

    pub fn episode_text(&self) -> String {
        format!("Episode: {} | Step: {}", self.episode, self.step)
    }
}

impl fmt::Display for StatsBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n{}", self.reward_text(), self.episode_text())
    }
}
