//! Randomized depth-first carving (recursive backtracker).
//!
//! The walk is expressed with an explicit stack of frames so that large grids
//! cannot exhaust the call stack. Each frame stores the direction order that
//! was shuffled when its cell was entered and how far through that order the
//! walk has progressed, which reproduces the recursive formulation exactly:
//! the same number of draws in the same order, and every neighbour checked
//! for `Blocked` at the moment it is visited rather than when the frame was
//! created.

use super::{Cell, Direction, Grid, TilePos};
use crate::rng::{RngOracle, RngStream};

struct Frame {
    pos: TilePos,
    directions: [Direction; 4],
    next: usize,
}

impl Frame {
    fn enter<R: RngOracle>(grid: &mut Grid, pos: TilePos, rng: &mut RngStream<R>) -> Self {
        grid.set(pos, Cell::Open);
        let mut directions = Direction::ALL;
        rng.shuffle(&mut directions);
        Self {
            pos,
            directions,
            next: 0,
        }
    }
}

/// Carves a perfect maze over the room sublattice of a `width × height` grid,
/// starting at `(0, 0)`.
///
/// The result is a spanning tree over the room cells: every open cell is
/// reachable from the origin and the number of open connectors is one less
/// than the number of open rooms.
pub fn carve<R: RngOracle>(width: u32, height: u32, rng: &mut RngStream<R>) -> Grid {
    let mut grid = Grid::new_blocked(width, height);
    if width == 0 || height == 0 {
        return grid;
    }

    let mut stack = vec![Frame::enter(&mut grid, TilePos::ORIGIN, rng)];

    while let Some(frame) = stack.last_mut() {
        if frame.next == frame.directions.len() {
            stack.pop();
            continue;
        }

        let direction = frame.directions[frame.next];
        frame.next += 1;

        let from = frame.pos;
        let room = from.offset(direction, 2);
        if grid.is_blocked(room) {
            grid.set(from.offset(direction, 1), Cell::Open);
            let child = Frame::enter(&mut grid, room, rng);
            stack.push(child);
        }
    }

    tracing::trace!(
        width,
        height,
        open = grid.open_count(),
        draws = rng.draws(),
        "carved maze"
    );

    grid
}
