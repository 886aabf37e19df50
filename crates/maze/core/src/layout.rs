//! Renderer-facing snapshot of a generated maze.
use crate::grid::{Grid, TilePos};
use crate::props::PropPlacement;

/// Props sit this high above the ground plane.
pub const PROP_HEIGHT: f32 = 1.0;

/// Position in world units. `x`/`z` span the ground plane, `y` is up.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldPos {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl WorldPos {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Everything a renderer needs to build matching geometry for one generation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MazeLayout {
    generation: u64,
    cell_size: f32,
    grid: Grid,
    props: PropPlacement,
}

impl MazeLayout {
    pub fn new(generation: u64, cell_size: f32, grid: Grid, props: PropPlacement) -> Self {
        Self {
            generation,
            cell_size,
            grid,
            props,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn props(&self) -> &PropPlacement {
        &self.props
    }

    pub(crate) fn remove_key(&mut self) -> Option<TilePos> {
        self.props.key.take()
    }

    pub fn world_of(&self, tile: TilePos) -> WorldPos {
        WorldPos::new(
            tile.x as f32 * self.cell_size,
            PROP_HEIGHT,
            tile.y as f32 * self.cell_size,
        )
    }

    /// Tile whose footprint contains the world point. Tiles are centred on
    /// `tile × cell_size`, so this rounds to the nearest tile.
    pub fn tile_of(&self, x: f32, z: f32) -> TilePos {
        TilePos::new(
            (x / self.cell_size).round() as i32,
            (z / self.cell_size).round() as i32,
        )
    }

    /// Whether a world point lies on an open tile.
    pub fn is_walkable(&self, x: f32, z: f32) -> bool {
        self.grid.is_open(self.tile_of(x, z))
    }

    /// Every blocked cell inside the grid.
    pub fn internal_walls(&self) -> Vec<TilePos> {
        self.grid.blocked_tiles()
    }

    /// Wall ring enclosing the grid.
    ///
    /// Rows sit at `y = -1` and `y = height - 1`, columns at `x = -1` and
    /// `x = width - 1`. The far row and column overlap the last grid row and
    /// column, which the carving walk never opens on even-sized grids.
    pub fn boundary_walls(&self) -> Vec<TilePos> {
        let w = self.grid.width() as i32;
        let h = self.grid.height() as i32;
        let mut walls = Vec::with_capacity(4 * (w + h) as usize);

        for x in -1..w {
            walls.push(TilePos::new(x, -1));
            walls.push(TilePos::new(x, h - 1));
        }
        for y in 0..h - 1 {
            walls.push(TilePos::new(-1, y));
            walls.push(TilePos::new(w - 1, y));
        }

        walls
    }
}
