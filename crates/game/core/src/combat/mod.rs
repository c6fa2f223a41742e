//! Per-room combat loop.
//!
//! Each active room runs a small state machine:
//!
//! ```text
//! Spawning ──► Active ──► Clearing ──► Cleared
//! ```
//!
//! Transitions only move forward. While the room is active, every tick
//! collects attack intents (hero first, then enemies in spawn order), resolves
//! them, applies effects, ticks statuses and finally drains the event queue,
//! removing dead enemies and dropping their loot.

mod arena;
mod room;

pub use arena::{Combatant, Pickup};
pub use room::{CombatLoop, TickInput, TickReport};

/// Lifecycle of one room instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum RoomPhase {
    Spawning,
    Active,
    Clearing,
    Cleared,
}
