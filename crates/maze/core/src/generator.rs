//! Maze generator: owns the current layout and regenerates it on demand.
use crate::config::MazeConfig;
use crate::error::{ConfigError, EnvError, PropError};
use crate::grid::{Grid, TilePos, carve};
use crate::layout::{MazeLayout, WorldPos};
use crate::props::place_props;
use crate::rng::{CONTEXT_CARVE, CONTEXT_PLACEMENT, RngStream};

/// Produces connected, acyclic maze layouts with a key, a door and a spawn tile.
///
/// Configuration setters only touch the *pending* configuration; the active
/// layout keeps the dimensions it was generated with until the next
/// [`generate`](Self::generate).
#[derive(Clone, Debug)]
pub struct MazeGenerator {
    seed: u64,
    generation: u64,
    pending: MazeConfig,
    active: Option<MazeConfig>,
    layout: Option<MazeLayout>,
}

impl MazeGenerator {
    /// Creates a generator with no layout. Invalid configuration is clamped.
    pub fn new(config: MazeConfig, seed: u64) -> Self {
        if let Err(error) = config.validate() {
            tracing::warn!(code = error.error_code(), %error, "clamping maze configuration");
        }
        Self {
            seed,
            generation: 0,
            pending: config.sanitized(),
            active: None,
            layout: None,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of layouts generated so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Configuration the next `generate()` call will use.
    pub fn pending_config(&self) -> MazeConfig {
        self.pending
    }

    /// Configuration of the current layout, if any.
    pub fn active_config(&self) -> Option<MazeConfig> {
        self.active
    }

    pub fn layout(&self) -> Option<&MazeLayout> {
        self.layout.as_ref()
    }

    pub fn grid(&self) -> Option<&Grid> {
        self.layout.as_ref().map(MazeLayout::grid)
    }

    /// Discards the current layout and builds a fresh one from the pending
    /// configuration.
    pub fn generate(&mut self) -> &MazeLayout {
        let config = self.pending;
        let generation = self.generation;
        self.generation += 1;
        self.layout = None;

        let mut carve_rng = RngStream::new(self.seed, generation, CONTEXT_CARVE);
        let grid = carve(config.width, config.height, &mut carve_rng);

        let mut place_rng = RngStream::new(self.seed, generation, CONTEXT_PLACEMENT);
        let props = match place_props(&grid, &mut place_rng) {
            Ok(props) => props,
            // MazeConfig::sanitized keeps every side >= MIN_MAP_SIZE, which
            // always yields at least seven open tiles.
            Err(error) => unreachable!("{error}"),
        };

        tracing::debug!(
            generation,
            width = config.width,
            height = config.height,
            open = grid.open_count(),
            key = ?props.key,
            door = %props.door,
            "generated maze"
        );

        self.active = Some(config);
        self.layout.insert(MazeLayout::new(
            generation,
            config.cell_size as f32,
            grid,
            props,
        ))
    }

    /// World position of the key, or `None` once it has been picked up.
    pub fn key_pos(&self) -> Option<WorldPos> {
        let layout = self.layout.as_ref()?;
        layout.props().key.map(|tile| layout.world_of(tile))
    }

    pub fn door_pos(&self) -> Option<WorldPos> {
        let layout = self.layout.as_ref()?;
        Some(layout.world_of(layout.props().door))
    }

    pub fn spawn_pos(&self) -> Option<WorldPos> {
        let layout = self.layout.as_ref()?;
        Some(layout.world_of(layout.props().spawn))
    }

    pub fn key_tile(&self) -> Option<TilePos> {
        self.layout.as_ref()?.props().key
    }

    pub fn door_tile(&self) -> Option<TilePos> {
        Some(self.layout.as_ref()?.props().door)
    }

    /// Removes the key from the current layout.
    ///
    /// Calling this without a key present is an anomaly: it is logged and
    /// otherwise ignored.
    pub fn destroy_key(&mut self) -> Result<TilePos, PropError> {
        let result = match self.layout.as_mut() {
            None => Err(PropError::NoLayout),
            Some(layout) => layout.remove_key().ok_or(PropError::KeyAlreadyRemoved),
        };
        if let Err(error) = &result {
            tracing::warn!(code = error.error_code(), %error, "destroy_key ignored");
        }
        result
    }

    /// Sets both sides of the next layout. Rounded down to even and clamped.
    pub fn apply_map_size(&mut self, size: i32) {
        self.apply_map_dimensions(size, size);
    }

    pub fn apply_map_dimensions(&mut self, width: i32, height: i32) {
        let requested = MazeConfig {
            width: width.max(0) as u32,
            height: height.max(0) as u32,
            ..self.pending
        };
        if let Err(error) = requested.validate() {
            tracing::warn!(width, height, %error, "adjusting requested map size");
        }
        self.pending.width = MazeConfig::clamp_map_size(width as i64);
        self.pending.height = MazeConfig::clamp_map_size(height as i64);
    }

    /// Sets the cell spacing of the next layout. Clamped to at least 1.
    pub fn apply_cell_size(&mut self, size: i32) {
        if (size as i64) < MazeConfig::MIN_CELL_SIZE as i64 {
            let error = ConfigError::CellSizeTooSmall(size as i64);
            tracing::warn!(code = error.error_code(), %error, "clamping cell size");
        }
        self.pending.cell_size = MazeConfig::clamp_cell_size(size as i64);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queries_are_empty_before_first_generation() {
        let generator = MazeGenerator::new(MazeConfig::default(), 1);
        assert!(generator.layout().is_none());
        assert!(generator.key_pos().is_none());
        assert!(generator.door_pos().is_none());
    }

    #[test]
    fn positions_scale_with_cell_size() {
        let mut generator = MazeGenerator::new(MazeConfig::square(6, 3), 4);
        generator.generate();

        let key = generator.key_tile().unwrap();
        let key_pos = generator.key_pos().unwrap();
        assert_eq!(key_pos.x, key.x as f32 * 3.0);
        assert_eq!(key_pos.z, key.y as f32 * 3.0);
        assert_eq!(generator.spawn_pos().unwrap(), WorldPos::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn map_size_changes_wait_for_next_generate() {
        let mut generator = MazeGenerator::new(MazeConfig::square(6, 2), 8);
        generator.generate();

        generator.apply_map_size(12);
        generator.apply_cell_size(5);
        let layout = generator.layout().unwrap();
        assert_eq!(layout.grid().width(), 6);
        assert_eq!(layout.cell_size(), 2.0);
        assert_eq!(generator.active_config(), Some(MazeConfig::square(6, 2)));

        generator.generate();
        let layout = generator.layout().unwrap();
        assert_eq!(layout.grid().width(), 12);
        assert_eq!(layout.grid().height(), 12);
        assert_eq!(layout.cell_size(), 5.0);
    }

    #[test]
    fn invalid_sizes_are_clamped() {
        let mut generator = MazeGenerator::new(MazeConfig::square(0, 0), 2);
        assert_eq!(generator.pending_config(), MazeConfig::new(4, 4, 1));

        generator.apply_map_size(-3);
        generator.apply_cell_size(0);
        assert_eq!(generator.pending_config(), MazeConfig::new(4, 4, 1));

        generator.apply_map_dimensions(9, 14);
        assert_eq!(generator.pending_config(), MazeConfig::new(8, 14, 1));

        let layout = generator.generate();
        assert!(layout.grid().open_count() >= 3);
    }

    #[test]
    fn destroy_key_is_a_logged_no_op_the_second_time() {
        let mut generator = MazeGenerator::new(MazeConfig::default(), 3);
        assert_eq!(generator.destroy_key(), Err(PropError::NoLayout));

        generator.generate();
        let key = generator.key_tile().unwrap();
        assert_eq!(generator.destroy_key(), Ok(key));
        assert!(generator.key_pos().is_none());
        assert_eq!(generator.destroy_key(), Err(PropError::KeyAlreadyRemoved));
        assert!(generator.door_pos().is_some());
    }

    #[test]
    fn same_seed_reproduces_layouts() {
        let mut a = MazeGenerator::new(MazeConfig::square(12, 2), 77);
        let mut b = MazeGenerator::new(MazeConfig::square(12, 2), 77);
        for _ in 0..3 {
            assert_eq!(a.generate(), b.generate());
        }
        assert_eq!(a.generation(), 3);
    }

    #[test]
    fn generate_restores_the_key() {
        let mut generator = MazeGenerator::new(MazeConfig::default(), 5);
        generator.generate();
        generator.destroy_key().unwrap();
        generator.generate();
        assert!(generator.key_pos().is_some());
    }
}
