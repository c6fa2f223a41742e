//! Authored level layout.

use crate::geometry::{Rect, RoomGeometry, Vec2};
use crate::ids::{DoorId, EnemyKindId, RoomId};
use crate::level::{KeyGrant, KeyRequirement};

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemySpawn {
    pub enemy: EnemyKindId,
    pub position: Vec2,
    /// Key dropped where this enemy dies.
    #[cfg_attr(feature = "serde", serde(default))]
    pub drop: Option<KeyGrant>,
}

/// One-way passage into another room. Unlocks once the owning room is cleared
/// and the requirement is met.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DoorDefinition {
    pub id: DoorId,
    pub rect: Rect,
    pub target_room: RoomId,
    /// Where the hero appears in the target room.
    pub entry: Vec2,
    #[cfg_attr(feature = "serde", serde(default))]
    pub requirement: KeyRequirement,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KeySpawn {
    pub grant: KeyGrant,
    pub position: Vec2,
    /// Dropped when the room clears instead of when it spawns.
    #[cfg_attr(feature = "serde", serde(default))]
    pub on_clear: bool,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoomDefinition {
    pub id: RoomId,
    pub bounds: Rect,
    #[cfg_attr(feature = "serde", serde(default))]
    pub walls: Vec<Rect>,
    /// Hero position when the level starts in this room.
    pub player_start: Vec2,
    #[cfg_attr(feature = "serde", serde(default))]
    pub spawns: Vec<EnemySpawn>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub doors: Vec<DoorDefinition>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub keys: Vec<KeySpawn>,
}

impl RoomDefinition {
    pub fn geometry(&self) -> RoomGeometry<'_> {
        RoomGeometry {
            bounds: self.bounds,
            walls: &self.walls,
        }
    }

    pub fn door(&self, id: DoorId) -> Option<&DoorDefinition> {
        self.doors.iter().find(|d| d.id == id)
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelDefinition {
    pub name: String,
    pub rooms: Vec<RoomDefinition>,
    pub start_room: RoomId,
    pub boss_room: RoomId,
}

impl LevelDefinition {
    pub fn room(&self, id: RoomId) -> Option<&RoomDefinition> {
        self.rooms.iter().find(|r| r.id == id)
    }
}
