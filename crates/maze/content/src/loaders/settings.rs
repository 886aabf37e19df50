//! Slider table loader.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::loaders::{LoadResult, read_file};
use crate::settings::SliderSpec;

#[derive(Deserialize)]
struct SettingsFile {
    #[serde(rename = "slider", default)]
    sliders: Vec<SliderSpec>,
}

/// Loader for settings-panel slider tables.
///
/// ```toml
/// [[slider]]
/// kind = "map_size"
/// min = 4
/// max = 40
/// default = 10
/// ```
pub struct SettingsLoader;

impl SettingsLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<SliderSpec>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parses and checks a slider table: ranges must be ordered, defaults
    /// inside them, and each setting may appear only once.
    pub fn parse(content: &str) -> LoadResult<Vec<SliderSpec>> {
        let file: SettingsFile = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse settings TOML: {}", e))?;

        let mut seen = HashSet::new();
        for slider in &file.sliders {
            anyhow::ensure!(
                slider.is_consistent(),
                "Slider {} has inconsistent range [{}, {}] with default {}",
                slider.kind,
                slider.min,
                slider.max,
                slider.default
            );
            anyhow::ensure!(seen.insert(slider.kind), "Slider {} defined twice", slider.kind);
        }

        Ok(file.sliders)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::SettingKind;

    #[test]
    fn parses_slider_tables() {
        let sliders = SettingsLoader::parse(
            r#"
            [[slider]]
            kind = "map_size"
            min = 6
            max = 20
            default = 8

            [[slider]]
            kind = "agent_move_speed"
            min = 1
            max = 4
            default = 3
            "#,
        )
        .unwrap();

        assert_eq!(
            sliders,
            vec![
                SliderSpec::new(SettingKind::MapSize, 6, 20, 8),
                SliderSpec::new(SettingKind::AgentMoveSpeed, 1, 4, 3),
            ]
        );
    }

    #[test]
    fn rejects_inconsistent_sliders() {
        let err = SettingsLoader::parse(
            "[[slider]]\nkind = \"cell_size\"\nmin = 5\nmax = 1\ndefault = 2",
        )
        .unwrap_err();
        assert!(err.to_string().contains("inconsistent range"));

        let duplicate = "[[slider]]\nkind = \"cell_size\"\nmin = 1\nmax = 5\ndefault = 2\n";
        let err = SettingsLoader::parse(&duplicate.repeat(2)).unwrap_err();
        assert!(err.to_string().contains("defined twice"));
    }

    #[test]
    fn bundled_table_matches_defaults() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/sliders.toml");
        let sliders = SettingsLoader::load(&path).unwrap();
        assert_eq!(sliders, crate::default_sliders());
    }
}
