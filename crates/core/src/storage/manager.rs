use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::errors::CoreError;
use crate::services::activity_store::ActivityStore;

use super::format;

/// Whole-file save/load of the activity list.
///
/// Every save replaces the file completely; there is no journal and no
/// partial-write recovery.
#[derive(Debug, Clone)]
pub struct StorageManager {
    path: PathBuf,
}

impl StorageManager {
    /// Store the list at an explicit file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store the list as `activities.json` inside `data_dir`.
    pub fn in_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join(format::FILE_NAME))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted list. A missing file is an empty list.
    pub fn load(&self) -> Result<ActivityStore, CoreError> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %self.path.display(), "No saved activity list, starting empty");
                return Ok(ActivityStore::new());
            }
            Err(e) => return Err(e.into()),
        };
        let store = ActivityStore::load(&bytes)?;
        info!(path = %self.path.display(), count = store.len(), "Loaded activity list");
        Ok(store)
    }

    /// Serialize the full list and replace the file, creating parent directories.
    pub fn save(&self, store: &ActivityStore) -> Result<(), CoreError> {
        let bytes = store.serialize()?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&self.path, bytes)?;
        debug!(path = %self.path.display(), count = store.len(), "Saved activity list");
        Ok(())
    }
}
