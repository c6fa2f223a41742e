//! Stat and timer primitives.
//!
//! - [`ResourcePool`]: clamped numeric pools (health, energy, ultimate charge)
//! - [`CooldownState`]: per-entity ability cooldown timers
//! - [`StatusEffects`]: duration-based status effects with refresh semantics
//!
//! Every timer counts down by the frame delta and clamps at zero; nothing in
//! this module suspends or schedules work.

mod cooldown;
mod pool;
mod status;

pub use cooldown::CooldownState;
pub use pool::{ResourceError, ResourceKind, ResourcePool};
pub use status::{
    StatusApplied, StatusEffect, StatusEffects, StatusKind, StatusSpec, StatusTick,
};
