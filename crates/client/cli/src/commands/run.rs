//! Run episodes with a built-in policy and report the outcomes.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use console::style;
use maze_core::TerminalReason;
use maze_runtime::{
    ActionProvider, EpisodeSummary, IdleProvider, MazeEnv, RandomProvider, RuntimeConfig,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Policy {
    /// Never act; measures the pure time penalty
    Idle,
    /// Uniformly random actions
    Random,
}

/// Run episodes with a built-in policy
#[derive(Parser, Debug)]
pub struct Run {
    /// Number of episodes to run
    #[arg(long, default_value_t = 5)]
    pub episodes: u32,

    /// Policy choosing the actions
    #[arg(long, value_enum, default_value_t = Policy::Random)]
    pub policy: Policy,

    /// Generator seed (random if omitted); also seeds the random policy
    #[arg(long)]
    pub seed: Option<u64>,

    /// Environment configuration file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override the per-episode step limit
    #[arg(long)]
    pub max_steps: Option<u32>,

    /// Print one JSON object per episode instead of text
    #[arg(long)]
    pub json: bool,
}

impl Run {
    pub fn execute(self) -> Result<()> {
        let mut runtime = match &self.config {
            Some(path) => RuntimeConfig::load(path)?,
            None => RuntimeConfig::default(),
        }
        .with_env_overrides();
        if self.seed.is_some() {
            runtime.seed = self.seed;
        }
        if let Some(max_steps) = self.max_steps {
            runtime.env.agent.max_steps = max_steps;
        }
        let seed = runtime.resolve_seed();
        runtime.seed = Some(seed);

        let mut env = MazeEnv::builder()
            .runtime_config(runtime)
            .build()
            .context("Failed to build environment")?;

        let mut provider: Box<dyn ActionProvider> = match self.policy {
            Policy::Idle => Box::new(IdleProvider),
            Policy::Random => Box::new(RandomProvider::new(seed)),
        };

        let mut solved = 0;
        for _ in 0..self.episodes {
            let summary = env.run_episode(provider.as_mut())?;
            if summary.reason == TerminalReason::KeyThenDoor {
                solved += 1;
            }
            if self.json {
                println!("{}", serde_json::to_string(&summary)?);
            } else {
                print_summary(&summary);
            }
        }

        if !self.json {
            println!();
            println!("{}", env.stats());
            println!(
                "{} {}/{} episodes reached the door (seed {})",
                style("Done:").bold(),
                solved,
                self.episodes,
                seed
            );
        }
        tracing::info!(episodes = self.episodes, solved, seed, "run complete");

        Ok(())
    }
}

fn print_summary(summary: &EpisodeSummary) {
    let reason = match summary.reason {
        TerminalReason::KeyThenDoor => style("key then door").green(),
        TerminalReason::StepLimitReached => style("step limit").yellow(),
        TerminalReason::Interrupted => style("interrupted").red(),
    };
    println!(
        "episode {:>4} | {:<14} | reward {:>8.4} | steps {:>5}",
        summary.episode, reason, summary.reward, summary.steps
    );
}
