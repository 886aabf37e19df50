//! Environment configuration loader.

use std::path::Path;

use maze_core::EnvConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for environment configuration from TOML files.
///
/// Missing tables and fields fall back to their defaults. Out-of-range values
/// are accepted here and clamped (with a warning) when the environment is built.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    pub fn load(path: &Path) -> LoadResult<EnvConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<EnvConfig> {
        let config: EnvConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        Ok(config)
    }
}
