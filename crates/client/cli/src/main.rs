//! Command-line front end for the maze explorer environment.
//!
//! Run with: `cargo run -p maze-cli -- <command>`
mod ascii;
mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Render, Run};

/// Maze explorer environment tools
#[derive(Parser)]
#[command(name = "maze")]
#[command(about = "Generate mazes and run key-and-door episodes", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Generate one maze and print it
    Render(Render),

    /// Run episodes with a built-in policy
    Run(Run),
}

fn main() -> Result<()> {
    // Load .env file if it exists (for MAZE_* overrides)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Render(cmd) => cmd.execute(),
        Command::Run(cmd) => cmd.execute(),
    }
}
