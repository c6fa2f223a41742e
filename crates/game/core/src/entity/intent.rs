use crate::geometry::Vec2;
use crate::ids::{AbilityId, EntityId};

/// Player input sampled for one frame.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlayerInput {
    /// Desired movement direction; clamped to unit length.
    pub move_vector: Vec2,
    /// Facing override. Zero keeps facing the movement direction.
    pub aim: Vec2,
    /// Use the basic attack (slot 0).
    pub attack: bool,
    /// Use the ability in this slot instead of the basic attack.
    pub ability_slot: Option<u8>,
    /// Use the hero's ultimate. Takes precedence over every other attack.
    pub ultimate: bool,
}

impl PlayerInput {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn moving(direction: Vec2) -> Self {
        Self {
            move_vector: direction,
            ..Self::default()
        }
    }

    pub fn attacking(mut self) -> Self {
        self.attack = true;
        self
    }
}

/// An attack a controller wants to perform this tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AttackIntent {
    pub caster: EntityId,
    pub ability: AbilityId,
    /// Explicit target; `None` lets the targeting rule choose.
    pub target: Option<EntityId>,
    pub aim: Vec2,
}
