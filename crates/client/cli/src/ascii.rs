//! Plain-text maze rendering.
//!
//! One character per tile, `+z` pointing up. The boundary ring is drawn, so
//! a `W × H` grid renders as `H + 1` lines of `W + 1` characters.
use std::collections::HashSet;

use maze_core::{MazeLayout, TilePos};

pub const WALL: char = '#';
pub const OPEN: char = '.';
pub const SPAWN: char = 'S';
pub const KEY: char = 'K';
pub const DOOR: char = 'D';

pub fn render(layout: &MazeLayout) -> String {
    let grid = layout.grid();
    let props = layout.props();
    let boundary: HashSet<TilePos> = layout.boundary_walls().into_iter().collect();
    let w = grid.width() as i32;
    let h = grid.height() as i32;

    let mut out = String::with_capacity(((w + 2) * (h + 1)) as usize);
    for y in (-1..h).rev() {
        for x in -1..w {
            let tile = TilePos::new(x, y);
            let glyph = if boundary.contains(&tile) || grid.is_blocked(tile) {
                WALL
            } else if tile == props.spawn {
                SPAWN
            } else if props.key == Some(tile) {
                KEY
            } else if tile == props.door {
                DOOR
            } else {
                OPEN
            };
            out.push(glyph);
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_core::{MazeConfig, MazeGenerator};

    fn count(text: &str, glyph: char) -> usize {
        text.chars().filter(|c| *c == glyph).count()
    }

    #[test]
    fn renders_ring_and_props() {
        let mut generator = MazeGenerator::new(MazeConfig::new(8, 6, 1), 12);
        let layout = generator.generate().clone();
        let text = render(&layout);

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 7);
        assert!(lines.iter().all(|line| line.chars().count() == 9));
        assert!(lines[0].chars().all(|c| c == WALL));
        assert!(lines[6].chars().all(|c| c == WALL));

        assert_eq!(count(&text, SPAWN), 1);
        assert_eq!(count(&text, KEY), 1);
        assert_eq!(count(&text, DOOR), 1);
        assert_eq!(count(&text, OPEN) + 3, layout.grid().open_count());
        // Spawn sits at the bottom-left corner inside the ring.
        assert_eq!(lines[5].chars().nth(1), Some(SPAWN));
    }

    #[test]
    fn picked_up_key_disappears() {
        let mut generator = MazeGenerator::new(MazeConfig::square(6, 1), 3);
        generator.generate();
        generator.destroy_key().unwrap();
        let text = render(generator.layout().unwrap());
        assert_eq!(count(&text, KEY), 0);
    }
}
