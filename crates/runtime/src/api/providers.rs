//! Abstractions for sourcing agent actions and operator input.
//!
//! Runtime users plug in [`ActionProvider`] implementations so episodes can
//! run with trained policies, scripted fixtures, or baseline behaviours.
//! [`InputSource`] feeds the heuristic mode, where operator controls replace
//! the policy's choice.
use std::collections::VecDeque;

use maze_core::{AgentAction, HeuristicInput, Observation};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::errors::{Result, RuntimeError};

/// Trait for choosing an action from the current observation.
///
/// Different implementations can handle:
/// - Trained policies served by an external driver
/// - Baselines (idle, uniform random)
/// - Scripted/replayed actions for tests
pub trait ActionProvider {
    fn provide_action(&mut self, observation: &Observation) -> Result<AgentAction>;
}

/// Always idles. Useful for measuring the pure time penalty.
pub struct IdleProvider;

impl ActionProvider for IdleProvider {
    fn provide_action(&mut self, _observation: &Observation) -> Result<AgentAction> {
        Ok(AgentAction::Idle)
    }
}

/// Uniformly random actions from a seeded generator.
pub struct RandomProvider {
    rng: StdRng,
}

impl RandomProvider {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl ActionProvider for RandomProvider {
    fn provide_action(&mut self, _observation: &Observation) -> Result<AgentAction> {
        let index = self.rng.gen_range(0..AgentAction::ALL.len());
        Ok(AgentAction::ALL[index])
    }
}

/// Replays a fixed action sequence, then fails.
pub struct ScriptedProvider {
    actions: VecDeque<AgentAction>,
}

impl ScriptedProvider {
    pub fn new(actions: impl IntoIterator<Item = AgentAction>) -> Self {
        Self {
            actions: actions.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.actions.len()
    }
}

impl ActionProvider for ScriptedProvider {
    fn provide_action(&mut self, _observation: &Observation) -> Result<AgentAction> {
        self.actions
            .pop_front()
            .ok_or(RuntimeError::ProviderExhausted("scripted"))
    }
}

/// Operator controls sampled once per step in heuristic mode.
pub trait InputSource {
    fn poll(&mut self) -> HeuristicInput;
}

/// No controls pressed; heuristic mode idles.
pub struct NoInput;

impl InputSource for NoInput {
    fn poll(&mut self) -> HeuristicInput {
        HeuristicInput::empty()
    }
}

/// Replays recorded input frames, then reports nothing pressed.
pub struct ScriptedInput {
    frames: VecDeque<HeuristicInput>,
}

impl ScriptedInput {
    pub fn new(frames: impl IntoIterator<Item = HeuristicInput>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> HeuristicInput {
        self.frames.pop_front().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_provider_is_reproducible() {
        let observation = Observation::default();
        let mut a = RandomProvider::new(3);
        let mut b = RandomProvider::new(3);
        let first: Vec<_> = (0..32)
            .map(|_| a.provide_action(&observation).unwrap())
            .collect();
        let second: Vec<_> = (0..32)
            .map(|_| b.provide_action(&observation).unwrap())
            .collect();
        assert_eq!(first, second);
    }

    #[test]
    fn scripted_provider_runs_dry() {
        let observation = Observation::default();
        let mut provider = ScriptedProvider::new([AgentAction::Forward]);
        assert_eq!(
            provider.provide_action(&observation).unwrap(),
            AgentAction::Forward
        );
        assert!(matches!(
            provider.provide_action(&observation),
            Err(RuntimeError::ProviderExhausted("scripted"))
        ));
    }

    #[test]
    fn scripted_input_falls_back_to_nothing_pressed() {
        let mut input = ScriptedInput::new([HeuristicInput::FORWARD | HeuristicInput::LEFT]);
        assert_eq!(input.poll().to_action(), AgentAction::Forward);
        assert_eq!(input.poll(), HeuristicInput::empty());
    }
}
