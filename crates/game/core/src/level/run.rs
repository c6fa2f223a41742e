use std::collections::BTreeMap;

use super::{
    DoorDefinition, DoorPassage, DoorState, KeyRing, LevelDataError, LevelDefinition,
    LevelProgress, RoomDefinition, validate_level,
};
use crate::combat::{CombatLoop, Pickup, TickInput};
use crate::config::GameConfig;
use crate::controller::PlayerController;
use crate::entity::{Damageable, Entity};
use crate::env::ContentOracle;
use crate::event::GameEvent;
use crate::ids::{DoorId, EntityIdAllocator, RoomId};

/// One attempt at a level: progression plus the active room's combat loop.
///
/// Only one room is live at a time. Passing a door discards the old combat
/// loop before the new room starts spawning.
#[derive(Clone, Debug)]
pub struct LevelRun {
    level_index: usize,
    progress: LevelProgress,
    combat: CombatLoop,
    ids: EntityIdAllocator,
    /// Pickups left behind in rooms the hero walked out of.
    stash: BTreeMap<RoomId, Vec<Pickup>>,
}

impl LevelRun {
    /// Validates the level and places the hero in its start room.
    pub fn start(
        level_index: usize,
        content: &dyn ContentOracle,
        player: &mut Entity,
        config: &GameConfig,
    ) -> Result<Self, LevelDataError> {
        let level = content
            .level(level_index)
            .ok_or(LevelDataError::MissingLevel(level_index))?;
        validate_level(level, content)?;
        let room = level
            .room(level.start_room)
            .ok_or(LevelDataError::MissingRoom(level.start_room))?;

        player.prepare_for_level(config);
        player.position = room.player_start;

        Ok(Self {
            level_index,
            progress: LevelProgress::new(level),
            combat: CombatLoop::new(room.id, false, Vec::new()),
            ids: EntityIdAllocator::new(),
            stash: BTreeMap::new(),
        })
    }

    pub fn level_index(&self) -> usize {
        self.level_index
    }

    pub fn progress(&self) -> &LevelProgress {
        &self.progress
    }

    pub fn combat(&self) -> &CombatLoop {
        &self.combat
    }

    pub fn active_room(&self) -> RoomId {
        self.progress.active_room()
    }

    pub fn tick(
        &mut self,
        player: &mut Entity,
        controller: &mut PlayerController,
        content: &dyn ContentOracle,
        config: &GameConfig,
        dt: f32,
    ) -> Vec<GameEvent> {
        let Some(level) = content.level(self.level_index) else {
            return Vec::new();
        };
        let Some(room) = level.room(self.progress.active_room()) else {
            return Vec::new();
        };

        let gates = self.progress.gates(room);
        let input = TickInput {
            room,
            doors: &gates,
            content,
            config,
            dt,
        };
        let report = self.combat.tick(player, controller, &input, &mut self.ids);
        let mut events = report.events;

        let mut scratch = KeyRing::new();
        let mut unlocked = Vec::new();
        for event in &events {
            match event {
                GameEvent::RoomCleared { .. } => {
                    let keys = hero_keys(player, &mut scratch);
                    unlocked.extend(self.progress.mark_cleared(room, keys));
                }
                GameEvent::BossDefeated { .. } if room.id == level.boss_room => {
                    self.progress.mark_boss_defeated()
                }
                _ => {}
            }
        }

        if player.is_alive() {
            if let Some(door) = report.player_blocked_by.and_then(|id| room.door(id)) {
                if self.unlock_on_push(room, door, hero_keys(player, &mut scratch)) {
                    unlocked.push(door.id);
                }
            }
        }
        events.extend(unlocked.into_iter().map(|door| GameEvent::DoorUnlocked { door }));

        if player.is_alive() {
            let open_door = room
                .doors
                .iter()
                .find(|door| self.is_open(room, door) && door.rect.intersects_circle(player.position, player.radius));
            if let Some(door) = open_door {
                self.enter(level, room, door, player, &mut events);
            }
        }

        if self.progress.try_complete(level) {
            events.push(GameEvent::LevelComplete {
                level_index: self.level_index,
            });
        }
        events
    }

    /// Explicit attempt to walk through `door`. A locked door (or a door of an
    /// uncleared room) is a no-op and returns [`DoorPassage::Blocked`].
    pub fn pass_door(
        &mut self,
        door: DoorId,
        player: &mut Entity,
        content: &dyn ContentOracle,
    ) -> (DoorPassage, Vec<GameEvent>) {
        let mut events = Vec::new();
        let Some(level) = content.level(self.level_index) else {
            return (DoorPassage::Blocked, events);
        };
        let Some(room) = level.room(self.progress.active_room()) else {
            return (DoorPassage::Blocked, events);
        };
        let Some(door) = room.door(door) else {
            return (DoorPassage::Blocked, events);
        };
        let passage = self.enter(level, room, door, player, &mut events);
        (passage, events)
    }

    fn is_open(&self, room: &RoomDefinition, door: &DoorDefinition) -> bool {
        self.progress.is_cleared(room.id) && self.progress.door_state(door.id) == DoorState::Unlocked
    }

    /// Unlock check triggered by pushing against a locked door. True only if
    /// the door changed state.
    fn unlock_on_push(&mut self, room: &RoomDefinition, door: &DoorDefinition, keys: &mut KeyRing) -> bool {
        self.progress.door_state(door.id) == DoorState::Locked && self.progress.try_unlock(room, door, keys)
    }

    fn enter(
        &mut self,
        level: &LevelDefinition,
        room: &RoomDefinition,
        door: &DoorDefinition,
        player: &mut Entity,
        events: &mut Vec<GameEvent>,
    ) -> DoorPassage {
        let passage = self.progress.pass(room, door);
        let DoorPassage::Through { room: target, entry } = passage else {
            return passage;
        };

        self.stash.insert(room.id, self.combat.take_pickups());
        let leftovers = self.stash.remove(&target).unwrap_or_default();
        let cleared = self.progress.is_cleared(target) || level.room(target).is_none();
        self.combat = CombatLoop::new(target, cleared, leftovers);
        player.position = entry;
        events.push(GameEvent::RoomEntered { room: target });
        passage
    }
}

fn hero_keys<'a>(player: &'a mut Entity, scratch: &'a mut KeyRing) -> &'a mut KeyRing {
    match player.hero.as_mut() {
        Some(hero) => &mut hero.keys,
        None => scratch,
    }
}
