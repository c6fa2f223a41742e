//! Repository contracts for persisting progression between sessions.

use game_core::ProgressSnapshot;

use super::Result;

/// Storage for the single progression record of a player.
///
/// Written when a run ends (GameOver or Victory) and read when a session is
/// created. Implementations must leave the previous record intact if a save
/// fails half way.
pub trait ProgressRepository: Send + Sync {
    /// Load the stored progression, if any.
    fn load(&self) -> Result<Option<ProgressSnapshot>>;

    /// Replace the stored progression.
    fn save(&self, progress: &ProgressSnapshot) -> Result<()>;

    /// Remove the stored progression.
    fn clear(&self) -> Result<()>;
}
