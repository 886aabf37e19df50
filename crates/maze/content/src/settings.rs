//! Settings-panel slider definitions.
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// Parameter a slider controls.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SettingKind {
    MapSize,
    CellSize,
    AgentMoveSpeed,
    AgentRotationSpeed,
    AgentMaxSteps,
}

/// Integer slider bound to one [`SettingKind`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SliderSpec {
    pub kind: SettingKind,
    pub min: i32,
    pub max: i32,
    pub default: i32,
}

impl SliderSpec {
    pub const fn new(kind: SettingKind, min: i32, max: i32, default: i32) -> Self {
        Self {
            kind,
            min,
            max,
            default,
        }
    }

    /// Built-in range for `kind`.
    pub const fn default_for(kind: SettingKind) -> Self {
        match kind {
            SettingKind::MapSize => Self::new(kind, 4, 40, 10),
            SettingKind::CellSize => Self::new(kind, 1, 5, 2),
            SettingKind::AgentMoveSpeed => Self::new(kind, 1, 10, 2),
            SettingKind::AgentRotationSpeed => Self::new(kind, 30, 360, 180),
            SettingKind::AgentMaxSteps => Self::new(kind, 100, 10_000, 5000),
        }
    }

    /// Snaps a raw slider value to the value that gets applied.
    ///
    /// Map sizes are rounded down to even and never drop below `min`.
    pub fn finalize(&self, value: i32) -> i32 {
        let clamped = value.clamp(self.min, self.max.max(self.min));
        match self.kind {
            SettingKind::MapSize => (clamped / 2 * 2).max(self.min),
            _ => clamped,
        }
    }

    /// Text shown next to the slider, e.g. `"10/40"`.
    pub fn value_text(&self, value: i32) -> String {
        format!("{value}/{}", self.max)
    }

    pub fn is_consistent(&self) -> bool {
        self.min <= self.max && (self.min..=self.max).contains(&self.default)
    }
}

/// One slider per setting, in declaration order.
pub fn default_sliders() -> Vec<SliderSpec> {
    SettingKind::iter().map(SliderSpec::default_for).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn defaults_cover_every_setting() {
        let sliders = default_sliders();
        assert_eq!(sliders.len(), SettingKind::iter().count());
        assert!(sliders.iter().all(SliderSpec::is_consistent));
    }

    #[test]
    fn map_size_snaps_down_to_even() {
        let slider = SliderSpec::default_for(SettingKind::MapSize);
        assert_eq!(slider.finalize(11), 10);
        assert_eq!(slider.finalize(12), 12);
        assert_eq!(slider.finalize(5), 4);
        assert_eq!(slider.finalize(-7), 4);
        assert_eq!(slider.finalize(99), 40);
    }

    #[test]
    fn odd_minimum_is_kept() {
        let slider = SliderSpec::new(SettingKind::MapSize, 5, 20, 6);
        assert_eq!(slider.finalize(5), 5);
    }

    #[test]
    fn other_settings_only_clamp() {
        let slider = SliderSpec::default_for(SettingKind::AgentRotationSpeed);
        assert_eq!(slider.finalize(91), 91);
        assert_eq!(slider.finalize(0), 30);
        assert_eq!(slider.value_text(91), "91/360");
    }

    #[test]
    fn kinds_parse_from_snake_case() {
        assert_eq!(
            SettingKind::from_str("agent_max_steps"),
            Ok(SettingKind::AgentMaxSteps)
        );
        assert_eq!(SettingKind::MapSize.to_string(), "map_size");
        assert!(SettingKind::from_str("gravity").is_err());
    }
}
