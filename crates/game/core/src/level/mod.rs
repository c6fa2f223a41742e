//! Levels, rooms, doors and keys.
//!
//! [`LevelDefinition`] is authored data. [`LevelProgress`] tracks which rooms
//! are cleared and which doors are unlocked, and [`LevelRun`] ties progress to
//! the combat loop of the active room.

mod definition;
mod error;
mod keys;
mod progress;
mod run;

pub use definition::{DoorDefinition, EnemySpawn, KeySpawn, LevelDefinition, RoomDefinition};
pub use error::{LevelDataError, validate_level};
pub use keys::{KeyGrant, KeyRequirement, KeyRing};
pub use progress::{DoorPassage, DoorState, LevelProgress};
pub use run::LevelRun;
