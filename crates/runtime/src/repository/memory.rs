//! In-memory ProgressRepository implementation for tests and local runs.

use std::sync::RwLock;

use game_core::ProgressSnapshot;

use super::{ProgressRepository, RepositoryError, Result};

#[derive(Default)]
pub struct InMemoryProgressRepository {
    progress: RwLock<Option<ProgressSnapshot>>,
}

impl InMemoryProgressRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_progress(progress: ProgressSnapshot) -> Self {
        Self {
            progress: RwLock::new(Some(progress)),
        }
    }
}

impl ProgressRepository for InMemoryProgressRepository {
    fn load(&self) -> Result<Option<ProgressSnapshot>> {
        let progress = self
            .progress
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(progress.clone())
    }

    fn save(&self, progress: &ProgressSnapshot) -> Result<()> {
        let mut slot = self
            .progress
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        *slot = Some(progress.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut slot = self
            .progress
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        *slot = None;
        Ok(())
    }
}
