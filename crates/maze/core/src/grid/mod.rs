//! Logical maze grid.
//!
//! Cells whose coordinates are both even are *rooms*; the carving walk moves
//! between rooms two steps at a time and opens the *connector* cell between
//! them. Every other cell stays blocked.
mod carve;

pub use carve::carve;

use std::collections::VecDeque;
use std::fmt;

/// Discrete grid position expressed in tile coordinates.
///
/// `y` is the second grid axis; renderers map it onto the world `z` axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TilePos {
    pub x: i32,
    pub y: i32,
}

impl TilePos {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const fn offset(self, direction: Direction, steps: i32) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx * steps,
            y: self.y + dy * steps,
        }
    }
}

impl fmt::Display for TilePos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Cardinal step directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Canonical order before shuffling.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, 1),
            Direction::Down => (0, -1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Cell {
    Open,
    #[default]
    Blocked,
}

/// Row-major `width × height` array of cells.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    width: u32,
    height: u32,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new_blocked(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::Blocked; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn in_bounds(&self, pos: TilePos) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width as i32 && pos.y < self.height as i32
    }

    fn index(&self, pos: TilePos) -> Option<usize> {
        self.in_bounds(pos)
            .then(|| pos.y as usize * self.width as usize + pos.x as usize)
    }

    /// Returns `None` outside the grid.
    pub fn cell(&self, pos: TilePos) -> Option<Cell> {
        self.index(pos).map(|idx| self.cells[idx])
    }

    /// Writes are ignored outside the grid.
    pub fn set(&mut self, pos: TilePos, cell: Cell) {
        if let Some(idx) = self.index(pos) {
            self.cells[idx] = cell;
        }
    }

    pub fn is_open(&self, pos: TilePos) -> bool {
        self.cell(pos) == Some(Cell::Open)
    }

    pub fn is_blocked(&self, pos: TilePos) -> bool {
        self.cell(pos) == Some(Cell::Blocked)
    }

    /// Room cells have both coordinates even.
    pub fn is_room(pos: TilePos) -> bool {
        pos.x % 2 == 0 && pos.y % 2 == 0
    }

    /// Iterates every tile, x-major (all of column 0, then column 1, ...).
    pub fn tiles(&self) -> impl Iterator<Item = (TilePos, Cell)> + '_ {
        (0..self.width as i32).flat_map(move |x| {
            (0..self.height as i32).map(move |y| {
                let pos = TilePos::new(x, y);
                (pos, self.cells[y as usize * self.width as usize + x as usize])
            })
        })
    }

    /// Open tiles in x-major scan order.
    pub fn open_tiles(&self) -> Vec<TilePos> {
        self.tiles()
            .filter(|(_, cell)| *cell == Cell::Open)
            .map(|(pos, _)| pos)
            .collect()
    }

    /// Blocked tiles in x-major scan order.
    pub fn blocked_tiles(&self) -> Vec<TilePos> {
        self.tiles()
            .filter(|(_, cell)| *cell == Cell::Blocked)
            .map(|(pos, _)| pos)
            .collect()
    }

    pub fn open_count(&self) -> usize {
        self.cells.iter().filter(|cell| **cell == Cell::Open).count()
    }

    pub fn open_room_count(&self) -> usize {
        self.open_tiles()
            .into_iter()
            .filter(|pos| Self::is_room(*pos))
            .count()
    }

    pub fn open_connector_count(&self) -> usize {
        self.open_count() - self.open_room_count()
    }

    /// Open tiles reachable from `start` through 4-connected open tiles.
    ///
    /// Returns an empty set when `start` itself is not open.
    pub fn reachable_from(&self, start: TilePos) -> Vec<TilePos> {
        if !self.is_open(start) {
            return Vec::new();
        }

        let mut seen = vec![false; self.cells.len()];
        let mut queue = VecDeque::from([start]);
        let mut reached = Vec::new();
        if let Some(idx) = self.index(start) {
            seen[idx] = true;
        }

        while let Some(pos) = queue.pop_front() {
            reached.push(pos);
            for direction in Direction::ALL {
                let next = pos.offset(direction, 1);
                let Some(idx) = self.index(next) else {
                    continue;
                };
                if !seen[idx] && self.cells[idx] == Cell::Open {
                    seen[idx] = true;
                    queue.push_back(next);
                }
            }
        }

        reached
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_reads_are_none() {
        let grid = Grid::new_blocked(4, 6);
        assert_eq!(grid.cell(TilePos::new(3, 5)), Some(Cell::Blocked));
        assert_eq!(grid.cell(TilePos::new(4, 0)), None);
        assert_eq!(grid.cell(TilePos::new(0, -1)), None);
        assert!(!grid.is_open(TilePos::new(-1, 0)));
        assert!(!grid.is_blocked(TilePos::new(-1, 0)));
    }

    #[test]
    fn open_tiles_scan_x_major() {
        let mut grid = Grid::new_blocked(3, 3);
        grid.set(TilePos::new(1, 0), Cell::Open);
        grid.set(TilePos::new(0, 2), Cell::Open);
        grid.set(TilePos::new(0, 1), Cell::Open);
        assert_eq!(
            grid.open_tiles(),
            vec![TilePos::new(0, 1), TilePos::new(0, 2), TilePos::new(1, 0)]
        );
    }

    #[test]
    fn reachability_stops_at_blocked_cells() {
        let mut grid = Grid::new_blocked(4, 1);
        grid.set(TilePos::new(0, 0), Cell::Open);
        grid.set(TilePos::new(1, 0), Cell::Open);
        grid.set(TilePos::new(3, 0), Cell::Open);

        let reached = grid.reachable_from(TilePos::ORIGIN);
        assert_eq!(reached.len(), 2);
        assert!(!reached.contains(&TilePos::new(3, 0)));
        assert!(grid.reachable_from(TilePos::new(2, 0)).is_empty());
    }

    #[test]
    fn room_parity() {
        assert!(Grid::is_room(TilePos::new(2, 4)));
        assert!(!Grid::is_room(TilePos::new(1, 2)));
        assert!(!Grid::is_room(TilePos::new(2, 3)));
    }
}
