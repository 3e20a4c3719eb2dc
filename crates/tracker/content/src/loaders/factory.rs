//! Content factory for loading an encounter directory.

use std::path::{Path, PathBuf};

use tracker_core::{ParticipantSheet, TrackerConfig};

use crate::loaders::{ConfigLoader, LoadResult, RosterLoader};

/// Content factory that loads tracker content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// └── roster.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load tracker configuration from `config.toml`, or defaults when the
    /// file does not exist.
    pub fn load_config(&self) -> LoadResult<TrackerConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            return Ok(TrackerConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load the participant roster from `roster.ron`.
    pub fn load_roster(&self) -> LoadResult<Vec<ParticipantSheet>> {
        let path = self.data_dir.join("roster.ron");
        RosterLoader::load(&path)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_data_loads() {
        let factory = ContentFactory::new(concat!(env!("CARGO_MANIFEST_DIR"), "/data"));
        let config = factory.load_config().expect("Failed to load bundled config");
        assert_eq!(config.round_marker_label, TrackerConfig::DEFAULT_ROUND_MARKER_LABEL);

        let roster = factory.load_roster().expect("Failed to load bundled roster");
        assert!(roster.len() >= 4);
    }

    #[test]
    fn missing_config_falls_back_to_defaults() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let factory = ContentFactory::new(dir.path());
        assert_eq!(
            factory.load_config().expect("defaults"),
            TrackerConfig::default()
        );
        assert!(factory.load_roster().is_err());
    }
}
