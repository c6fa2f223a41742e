//! Content loaders for reading game data from files.
//!
//! RON files are parsed with the `unwrap_newtypes` extension so ids are
//! written as bare numbers (`id: 3` rather than `id: AbilityId(3)`).

pub mod abilities;
pub mod actors;
pub mod config;
pub mod factory;
pub mod item;
pub mod levels;
pub mod skills;

pub use abilities::AbilityLoader;
pub use actors::ActorLoader;
pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use item::ShopLoader;
pub use levels::LevelLoader;
pub use skills::SkillLoader;

use std::path::Path;

use ron::extensions::Extensions;
use serde::de::DeserializeOwned;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

/// Parses RON text with the loader extensions enabled.
pub(crate) fn parse_ron<T: DeserializeOwned>(content: &str, what: &str) -> LoadResult<T> {
    ron::Options::default()
        .with_default_extension(Extensions::UNWRAP_NEWTYPES)
        .from_str(content)
        .map_err(|e| anyhow::anyhow!("Failed to parse {} RON: {}", what, e))
}
