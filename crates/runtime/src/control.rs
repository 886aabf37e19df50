//! Settings panel backing: sliders plus the auto-update and heuristic toggles.
use std::collections::HashMap;

use maze_content::{SettingKind, SliderSpec, default_sliders};

use crate::env::MazeEnv;

/// Operator controls bound to a [`MazeEnv`].
///
/// Slider changes are snapped through [`SliderSpec::finalize`] and applied
/// right away. Maze dimensions only show up at the next generation, so with
/// auto-update on every change also restarts the run.
#[derive(Clone, Debug)]
pub struct ControlPanel {
    sliders: Vec<SliderSpec>,
    values: HashMap<SettingKind, i32>,
    auto_update: bool,
    heuristic: bool,
}

impl ControlPanel {
    pub fn new(sliders: Vec<SliderSpec>) -> Self {
        let values = sliders.iter().map(|s| (s.kind, s.default)).collect();
        Self {
            sliders,
            values,
            auto_update: false,
            heuristic: false,
        }
    }

    /// Pushes every slider default and the heuristic toggle into `env`.
    /// Does not restart the run.
    pub fn initialize(&mut self, env: &mut MazeEnv) {
        for slider in &self.sliders {
            let value = slider.finalize(slider.default);
            self.values.insert(slider.kind, value);
            apply_setting(env, slider.kind, value);
        }
        env.change_behaviour_type(self.heuristic);
    }

    /// Applies a raw slider value and returns the value actually used.
    ///
    /// Returns `None` for settings this panel has no slider for.
    pub fn apply(&mut self, env: &mut MazeEnv, kind: SettingKind, raw: i32) -> Option<i32> {
        let Some(slider) = self.slider(kind) else {
            tracing::warn!(%kind, raw, "no slider for setting");
            return None;
        };
        let value = slider.finalize(raw);
        self.values.insert(kind, value);
        apply_setting(env, kind, value);
        tracing::debug!(%kind, raw, value, "setting applied");

        if self.auto_update {
            env.restart_run();
        }
        Some(value)
    }

    pub fn slider(&self, kind: SettingKind) -> Option<SliderSpec> {
        self.sliders.iter().find(|s| s.kind == kind).copied()
    }

    pub fn value(&self, kind: SettingKind) -> Option<i32> {
        self.values.get(&kind).copied()
    }

    /// Slider caption, e.g. `"10/40"`.
    pub fn value_text(&self, kind: SettingKind) -> Option<String> {
        let slider = self.slider(kind)?;
        Some(slider.value_text(self.value(kind)?))
    }

    pub fn auto_update(&self) -> bool {
        self.auto_update
    }

    pub fn set_auto_update(&mut self, enabled: bool) {
        self.auto_update = enabled;
    }

    pub fn heuristic(&self) -> bool {
        self.heuristic
    }

    pub fn set_heuristic(&mut self, env: &mut MazeEnv, enabled: bool) {
        self.heuristic = enabled;
        env.change_behaviour_type(enabled);
    }
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self::new(default_sliders())
    }
}

fn apply_setting(env: &mut MazeEnv, kind: SettingKind, value: i32) {
    match kind {
        SettingKind::MapSize => env.apply_map_size(value),
        SettingKind::CellSize => env.apply_cell_size(value),
        SettingKind::AgentMoveSpeed => env.apply_move_speed(value as f32),
        SettingKind::AgentRotationSpeed => env.apply_rotation_speed(value as f32),
        SettingKind::AgentMaxSteps => env.set_max_steps(value.max(0) as u32),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_core::{BehaviorMode, MazeConfig};

    fn env() -> MazeEnv {
        MazeEnv::builder().seed(2).build().unwrap()
    }

    #[test]
    fn initialize_applies_defaults_without_restarting() {
        let mut env = env();
        let mut panel = ControlPanel::new(vec![
            SliderSpec::new(SettingKind::MapSize, 4, 40, 12),
            SliderSpec::new(SettingKind::AgentMaxSteps, 100, 1000, 300),
        ]);
        panel.initialize(&mut env);

        assert_eq!(env.state().episode_index, 1);
        assert_eq!(env.maze().pending_config(), MazeConfig::square(12, 2));
        assert_eq!(env.controller().agent_config().max_steps, 300);
        assert_eq!(panel.value_text(SettingKind::MapSize).as_deref(), Some("12/40"));
    }

    #[test]
    fn map_size_is_snapped_before_it_is_applied() {
        let mut env = env();
        let mut panel = ControlPanel::default();
        assert_eq!(panel.apply(&mut env, SettingKind::MapSize, 15), Some(14));
        assert_eq!(env.maze().pending_config().width, 14);
        assert_eq!(panel.value(SettingKind::MapSize), Some(14));
        // Current maze untouched until the next episode.
        assert_eq!(env.layout().unwrap().grid().width(), 10);
    }

    #[test]
    fn auto_update_restarts_the_run() {
        let mut env = env();
        let mut panel = ControlPanel::default();
        panel.set_auto_update(true);

        panel.apply(&mut env, SettingKind::MapSize, 8);
        assert_eq!(env.state().episode_index, 2);
        assert_eq!(env.layout().unwrap().grid().width(), 8);
    }

    #[test]
    fn speeds_apply_immediately() {
        let mut env = env();
        let mut panel = ControlPanel::default();
        panel.apply(&mut env, SettingKind::AgentRotationSpeed, 1000);
        assert_eq!(env.controller().agent_config().rotation_speed, 360.0);
        assert_eq!(env.state().episode_index, 1);
    }

    #[test]
    fn heuristic_toggle_switches_behaviour() {
        let mut env = env();
        let mut panel = ControlPanel::default();
        panel.set_heuristic(&mut env, true);
        assert_eq!(env.controller().behavior_mode(), BehaviorMode::Heuristic);
    }

    #[test]
    fn missing_sliders_are_ignored() {
        let mut env = env();
        let mut panel = ControlPanel::new(Vec::new());
        assert_eq!(panel.apply(&mut env, SettingKind::CellSize, 3), None);
        assert_eq!(env.maze().pending_config().cell_size, 2);
    }
}
