//! File-based ProgressRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use game_core::ProgressSnapshot;

use super::{ProgressRepository, RepositoryError, Result};

/// Stores progression as pretty-printed JSON in `progress.json`.
///
/// Saves go to a temporary file first and are renamed into place, so a crash
/// mid-write never corrupts the previous record.
pub struct FileProgressRepository {
    base_dir: PathBuf,
}

impl FileProgressRepository {
    const FILE_NAME: &'static str = "progress.json";

    /// Create a repository rooted at `base_dir`, creating it if needed.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    /// Platform data directory for Dungeon saves.
    ///
    /// - macOS: `~/Library/Application Support/dungeon`
    /// - Linux: `~/.local/share/dungeon` (or `$XDG_DATA_HOME/dungeon`)
    /// - Windows: `%APPDATA%\dungeon`
    pub fn default_dir() -> Result<PathBuf> {
        directories::ProjectDirs::from("", "", "dungeon")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or(RepositoryError::NoSaveDirectory)
    }

    pub fn path(&self) -> PathBuf {
        self.base_dir.join(Self::FILE_NAME)
    }
}

impl ProgressRepository for FileProgressRepository {
    fn load(&self) -> Result<Option<ProgressSnapshot>> {
        let path = self.path();
        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path)?;
        let progress =
            serde_json::from_slice(&bytes).map_err(|e| RepositoryError::Json(e.to_string()))?;

        tracing::debug!("Loaded progress from {}", path.display());
        Ok(Some(progress))
    }

    fn save(&self, progress: &ProgressSnapshot) -> Result<()> {
        let path = self.path();
        let temp_path = path.with_extension("json.tmp");

        let bytes =
            serde_json::to_vec_pretty(progress).map_err(|e| RepositoryError::Json(e.to_string()))?;

        fs::write(&temp_path, bytes)?;

        // Atomic rename
        fs::rename(&temp_path, &path)?;

        tracing::debug!(
            best_score = progress.best_score,
            level_index = progress.level_index,
            "Saved progress to {}",
            path.display()
        );
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let path = self.path();
        if path.exists() {
            fs::remove_file(&path)?;
            tracing::debug!("Deleted {}", path.display());
        }
        Ok(())
    }
}
