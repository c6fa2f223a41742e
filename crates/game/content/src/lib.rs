//! Data-driven content definitions and loaders.
//!
//! This crate reads authored content from a data directory:
//! - Ability templates (RON)
//! - Hero and enemy/boss templates (RON)
//! - Skill picks and shop stock (RON)
//! - Level layouts, one RON file per level (RON)
//! - Game configuration (TOML)
//!
//! Everything lands in a [`game_core::Catalog`], which the session consumes
//! through the `ContentOracle` trait. Content never appears in game state.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    AbilityLoader, ActorLoader, ConfigLoader, ContentFactory, LevelLoader, LoadResult,
    ShopLoader, SkillLoader,
};

/// Sample data directory shipped with this crate.
pub fn bundled_data_dir() -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("data")
}
