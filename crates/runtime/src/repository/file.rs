//! File-based TurnOrderStore implementation.

use std::fs;
use std::path::{Path, PathBuf};

use tracker_core::{TrackerConfig, TurnOrder, codec};

use crate::repository::{RepositoryError, Result, TurnOrderStore};

/// File-based implementation of TurnOrderStore.
///
/// # File Format
///
/// The sequence is stored as the host's JSON turn-order array (see
/// [`tracker_core::codec`]), so the file can be pasted into or copied out of
/// the host's field unchanged. A missing or blank file is an empty sequence.
pub struct FileTurnOrderStore {
    path: PathBuf,
    config: TrackerConfig,
}

impl FileTurnOrderStore {
    /// Create a store backed by `path`, creating its parent directory.
    pub fn new(path: impl AsRef<Path>, config: TrackerConfig) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(RepositoryError::Io)?;
        }
        Ok(Self { path, config })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TurnOrderStore for FileTurnOrderStore {
    fn load(&self) -> Result<TurnOrder> {
        if !self.path.exists() {
            return Ok(TurnOrder::new());
        }

        let text = fs::read_to_string(&self.path).map_err(RepositoryError::Io)?;
        let order = codec::decode(&text, &self.config)?;

        tracing::debug!(
            "Loaded turn order ({} entries) from {}",
            order.len(),
            self.path.display()
        );

        Ok(order)
    }

    fn save(&self, order: &TurnOrder) -> Result<()> {
        let temp_path = self.path.with_extension("json.tmp");
        let text = codec::encode(order, &self.config)?;

        // Write to temp file
        fs::write(&temp_path, text).map_err(RepositoryError::Io)?;

        // Atomic rename
        fs::rename(&temp_path, &self.path).map_err(RepositoryError::Io)?;

        tracing::debug!(
            "Saved turn order ({} entries) to {}",
            order.len(),
            self.path.display()
        );

        Ok(())
    }

    fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path).map_err(RepositoryError::Io)?;
            tracing::debug!("Cleared turn order at {}", self.path.display());
        }
        Ok(())
    }
}
