use bitflags::bitflags;

use crate::geometry::{DoorGate, MoveOutcome, RoomGeometry, Vec2};
use crate::ids::AbilityId;

bitflags! {
    /// Which shared capabilities an entity exposes.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Capabilities: u8 {
        const MOVABLE    = 1 << 0;
        const DAMAGEABLE = 1 << 1;
        const ATTACKER   = 1 << 2;
    }
}

/// Result of applying damage to a [`Damageable`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct DamageOutcome {
    /// Health actually removed.
    pub dealt: u32,
    /// Health left afterwards.
    pub remaining: u32,
    /// True only on the hit that took health to zero.
    pub killed: bool,
}

pub trait Movable {
    fn position(&self) -> Vec2;

    /// Speed after status multipliers, in units per second.
    fn move_speed(&self) -> f32;

    /// Moves by `delta` through room collision and updates facing.
    fn move_by(&mut self, geometry: &RoomGeometry<'_>, delta: Vec2, doors: &[DoorGate]) -> MoveOutcome;
}

pub trait Damageable {
    fn is_alive(&self) -> bool;

    /// Defense including status modifiers.
    fn defense_rating(&self) -> i32;

    /// Removes health. Dead or invulnerable entities take nothing.
    fn take_damage(&mut self, amount: u32) -> DamageOutcome;

    /// Restores health up to the maximum. Returns the amount restored.
    fn heal(&mut self, amount: u32) -> u32;
}

pub trait Attacker {
    /// Attack including status modifiers.
    fn attack_rating(&self) -> i32;

    /// Alive and not stunned.
    fn can_act(&self) -> bool;

    fn ability_slots(&self) -> &[AbilityId];

    fn cooldown_remaining(&self, ability: AbilityId) -> f32;
}
