//! Tracker configuration loader.

use std::path::Path;

use tracker_core::TrackerConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for tracker configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys take their defaults, so an empty file is a valid config.
    pub fn load(path: &Path) -> LoadResult<TrackerConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse config data from TOML text.
    pub fn parse(content: &str) -> LoadResult<TrackerConfig> {
        let config: TrackerConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if config.round_marker_label.trim().is_empty() {
            anyhow::bail!("round_marker_label must not be empty");
        }
        if config.max_entries == 0 {
            anyhow::bail!("max_entries must be at least 1");
        }

        Ok(config)
    }
}
