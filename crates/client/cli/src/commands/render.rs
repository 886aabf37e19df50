//! Generate a single maze and print it as ASCII or JSON.

use anyhow::{Context, Result};
use clap::Parser;
use maze_core::{MazeConfig, MazeGenerator, MazeLayout, TilePos, WorldPos};
use maze_runtime::RuntimeConfig;
use serde::Serialize;

use crate::ascii;

/// Generate one maze and print it
#[derive(Parser, Debug)]
pub struct Render {
    /// Grid width in tiles (rounded down to even)
    #[arg(long, default_value_t = MazeConfig::DEFAULT_MAP_SIZE)]
    pub width: u32,

    /// Grid height in tiles (defaults to the width)
    #[arg(long)]
    pub height: Option<u32>,

    /// World units per tile
    #[arg(long, default_value_t = MazeConfig::DEFAULT_CELL_SIZE)]
    pub cell_size: u32,

    /// Generator seed (random if omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print the layout as JSON instead of ASCII
    #[arg(long)]
    pub json: bool,
}

/// Everything a renderer needs to rebuild the scene.
#[derive(Serialize)]
struct LayoutExport<'a> {
    seed: u64,
    layout: &'a MazeLayout,
    internal_walls: Vec<TilePos>,
    boundary_walls: Vec<TilePos>,
    spawn: WorldPos,
    key: Option<WorldPos>,
    door: WorldPos,
}

impl Render {
    pub fn execute(self) -> Result<()> {
        let config = MazeConfig::new(
            self.width,
            self.height.unwrap_or(self.width),
            self.cell_size,
        );
        let mut runtime = RuntimeConfig::from_env();
        if self.seed.is_some() {
            runtime.seed = self.seed;
        }
        let seed = runtime.resolve_seed();
        let mut generator = MazeGenerator::new(config, seed);
        let layout = generator.generate();

        if self.json {
            let props = layout.props();
            let export = LayoutExport {
                seed,
                layout,
                internal_walls: layout.internal_walls(),
                boundary_walls: layout.boundary_walls(),
                spawn: layout.world_of(props.spawn),
                key: props.key.map(|tile| layout.world_of(tile)),
                door: layout.world_of(props.door),
            };
            let json = serde_json::to_string_pretty(&export).context("Failed to encode layout")?;
            println!("{json}");
        } else {
            let grid = layout.grid();
            println!(
                "seed {seed} | {}x{} | {} open tiles",
                grid.width(),
                grid.height(),
                grid.open_count()
            );
            print!("{}", ascii::render(layout));
        }

        Ok(())
    }
}
