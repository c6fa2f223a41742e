use crate::controller::Controller;
use crate::entity::Entity;
use crate::geometry::Vec2;
use crate::level::KeyGrant;

/// An enemy or boss living in the active room.
#[derive(Clone, Debug)]
pub struct Combatant {
    pub entity: Entity,
    pub controller: Controller,
}

/// A key lying on the floor.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pickup {
    pub grant: KeyGrant,
    pub position: Vec2,
}
