//! Room clear flags and door lock states for one level.

use std::collections::{BTreeMap, BTreeSet};

use super::{DoorDefinition, KeyRing, LevelDefinition, RoomDefinition};
use crate::geometry::{DoorGate, Vec2};
use crate::ids::{DoorId, RoomId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum DoorState {
    Locked,
    Unlocked,
}

/// Result of trying to walk through a door.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DoorPassage {
    /// Door is locked or its room is not cleared. Nothing changed.
    Blocked,
    Through { room: RoomId, entry: Vec2 },
}

/// Mutable progression state of a level.
///
/// Doors only move from `Locked` to `Unlocked`; nothing re-locks them.
#[derive(Clone, Debug, PartialEq)]
pub struct LevelProgress {
    active_room: RoomId,
    cleared: BTreeSet<RoomId>,
    doors: BTreeMap<DoorId, DoorState>,
    boss_defeated: bool,
    completed: bool,
}

impl LevelProgress {
    pub fn new(level: &LevelDefinition) -> Self {
        let doors = level
            .rooms
            .iter()
            .flat_map(|room| room.doors.iter())
            .map(|door| (door.id, DoorState::Locked))
            .collect();

        Self {
            active_room: level.start_room,
            cleared: BTreeSet::new(),
            doors,
            boss_defeated: false,
            completed: false,
        }
    }

    pub fn active_room(&self) -> RoomId {
        self.active_room
    }

    pub fn is_cleared(&self, room: RoomId) -> bool {
        self.cleared.contains(&room)
    }

    pub fn door_state(&self, door: DoorId) -> DoorState {
        self.doors.get(&door).copied().unwrap_or(DoorState::Locked)
    }

    pub fn boss_defeated(&self) -> bool {
        self.boss_defeated
    }

    /// Marks `room` cleared and runs the unlock check on each of its doors in
    /// authored order. Returns the doors that unlocked.
    pub fn mark_cleared(&mut self, room: &RoomDefinition, keys: &mut KeyRing) -> Vec<DoorId> {
        self.cleared.insert(room.id);

        // Doors are checked in authored order, so earlier doors get first use of keys.
        let mut unlocked = Vec::new();
        for door in &room.doors {
            if self.door_state(door.id) == DoorState::Locked && keys.consume(door.requirement) {
                self.doors.insert(door.id, DoorState::Unlocked);
                unlocked.push(door.id);
            }
        }
        unlocked
    }

    /// Unlock check for a single door, run when the hero pushes against it.
    ///
    /// Returns true if the door is unlocked afterwards. Keys are only spent when
    /// the door changes state.
    pub fn try_unlock(&mut self, room: &RoomDefinition, door: &DoorDefinition, keys: &mut KeyRing) -> bool {
        if !self.is_cleared(room.id) {
            return false;
        }
        if self.door_state(door.id) == DoorState::Unlocked {
            return true;
        }
        if keys.consume(door.requirement) {
            self.doors.insert(door.id, DoorState::Unlocked);
            return true;
        }
        false
    }

    /// Collision view of the room's doors. A door is open once its room is
    /// cleared and it is unlocked.
    pub fn gates(&self, room: &RoomDefinition) -> Vec<DoorGate> {
        let cleared = self.is_cleared(room.id);
        room.doors
            .iter()
            .map(|door| DoorGate {
                id: door.id,
                rect: door.rect,
                open: cleared && self.door_state(door.id) == DoorState::Unlocked,
            })
            .collect()
    }

    /// Moves the active room through `door` if it is open.
    pub fn pass(&mut self, room: &RoomDefinition, door: &DoorDefinition) -> DoorPassage {
        if !self.is_cleared(room.id) || self.door_state(door.id) != DoorState::Unlocked {
            return DoorPassage::Blocked;
        }
        self.active_room = door.target_room;
        DoorPassage::Through {
            room: door.target_room,
            entry: door.entry,
        }
    }

    pub fn mark_boss_defeated(&mut self) {
        self.boss_defeated = true;
    }

    /// True exactly once: the first call after every room is cleared and the
    /// boss is dead.
    pub fn try_complete(&mut self, level: &LevelDefinition) -> bool {
        if self.completed || !self.boss_defeated {
            return false;
        }
        if level.rooms.iter().all(|room| self.is_cleared(room.id)) {
            self.completed = true;
            return true;
        }
        false
    }
}
