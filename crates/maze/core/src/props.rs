//! Spawn, key and door placement on a carved grid.
use crate::error::PlacementError;
use crate::grid::{Grid, TilePos};
use crate::rng::{RngOracle, RngStream};

/// Prop categories the renderer instantiates and the motion substrate
/// reports trigger events for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PropKind {
    Spawn,
    Key,
    Door,
}

/// Tile coordinates of every prop in the current layout.
///
/// `key` becomes `None` once the key is picked up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PropPlacement {
    pub spawn: TilePos,
    pub key: Option<TilePos>,
    pub door: TilePos,
}

impl PropPlacement {
    /// Which prop, if any, sits on `tile`. Spawn is not a trigger and is not reported.
    pub fn trigger_at(&self, tile: TilePos) -> Option<PropKind> {
        if self.key == Some(tile) {
            Some(PropKind::Key)
        } else if self.door == tile {
            Some(PropKind::Door)
        } else {
            None
        }
    }
}

/// Picks key and door tiles uniformly among open tiles by rejection sampling.
///
/// The key is redrawn until it is off the spawn tile; the door is redrawn
/// until it is off both the spawn and the key. Both loops rely on the
/// stream's oracle eventually drawing every index, which holds for [`PcgRng`](crate::rng::PcgRng).
pub fn place_props<R: RngOracle>(
    grid: &Grid,
    rng: &mut RngStream<R>,
) -> Result<PropPlacement, PlacementError> {
    let open = grid.open_tiles();
    // Spawn, key and door each need their own tile.
    if open.len() < 3 || !grid.is_open(TilePos::ORIGIN) {
        return Err(PlacementError::TooFewOpenTiles(open.len()));
    }

    let spawn = TilePos::ORIGIN;

    let key = loop {
        let candidate = open[rng.next_index(open.len())];
        if candidate != spawn {
            break candidate;
        }
    };

    let door = loop {
        let candidate = open[rng.next_index(open.len())];
        if candidate != key && candidate != spawn {
            break candidate;
        }
    };

    Ok(PropPlacement {
        spawn,
        key: Some(key),
        door,
    })
}
