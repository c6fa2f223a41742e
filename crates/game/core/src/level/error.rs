//! Authored level validation.
//!
//! The simulation trusts content once a level has passed [`validate_level`];
//! everything checked here would otherwise surface as a missing lookup in the
//! middle of combat.

use std::collections::BTreeSet;

use super::LevelDefinition;
use crate::env::ContentOracle;
use crate::error::{ErrorSeverity, GameError};
use crate::ids::{AbilityId, DoorId, EnemyKindId, RoomId};

/// Malformed or missing level content.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LevelDataError {
    #[error("level {0} does not exist")]
    MissingLevel(usize),

    #[error("level has no rooms")]
    EmptyLevel,

    #[error("duplicate {0}")]
    DuplicateRoom(RoomId),

    #[error("duplicate {0}")]
    DuplicateDoor(DoorId),

    #[error("{0} referenced but not defined")]
    MissingRoom(RoomId),

    #[error("{door} leads to missing {target}")]
    MissingDoorTarget { door: DoorId, target: RoomId },

    #[error("{room} spawns unknown {enemy}")]
    UnknownEnemy { room: RoomId, enemy: EnemyKindId },

    #[error("{enemy} uses unknown {ability}")]
    UnknownAbility { enemy: EnemyKindId, ability: AbilityId },

    #[error("{0} has degenerate bounds")]
    DegenerateRoom(RoomId),

    #[error("boss {0} has no boss spawn")]
    BossRoomWithoutBoss(RoomId),
}

impl GameError for LevelDataError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        use LevelDataError::*;
        match self {
            MissingLevel(_) => "LEVEL_MISSING",
            EmptyLevel => "LEVEL_EMPTY",
            DuplicateRoom(_) => "LEVEL_DUPLICATE_ROOM",
            DuplicateDoor(_) => "LEVEL_DUPLICATE_DOOR",
            MissingRoom(_) => "LEVEL_MISSING_ROOM",
            MissingDoorTarget { .. } => "LEVEL_MISSING_DOOR_TARGET",
            UnknownEnemy { .. } => "LEVEL_UNKNOWN_ENEMY",
            UnknownAbility { .. } => "LEVEL_UNKNOWN_ABILITY",
            DegenerateRoom(_) => "LEVEL_DEGENERATE_ROOM",
            BossRoomWithoutBoss(_) => "LEVEL_BOSS_ROOM_WITHOUT_BOSS",
        }
    }
}

/// Checks references and geometry of `level` against `content`.
pub fn validate_level(level: &LevelDefinition, content: &dyn ContentOracle) -> Result<(), LevelDataError> {
    if level.rooms.is_empty() {
        return Err(LevelDataError::EmptyLevel);
    }

    let mut rooms = BTreeSet::new();
    for room in &level.rooms {
        if !rooms.insert(room.id) {
            return Err(LevelDataError::DuplicateRoom(room.id));
        }
        if room.bounds.is_degenerate() {
            return Err(LevelDataError::DegenerateRoom(room.id));
        }
    }
    for id in [level.start_room, level.boss_room] {
        if !rooms.contains(&id) {
            return Err(LevelDataError::MissingRoom(id));
        }
    }

    let mut doors = BTreeSet::new();
    for room in &level.rooms {
        for door in &room.doors {
            if !doors.insert(door.id) {
                return Err(LevelDataError::DuplicateDoor(door.id));
            }
            if !rooms.contains(&door.target_room) {
                return Err(LevelDataError::MissingDoorTarget {
                    door: door.id,
                    target: door.target_room,
                });
            }
        }

        for spawn in &room.spawns {
            let enemy = content.enemy(spawn.enemy).ok_or(LevelDataError::UnknownEnemy {
                room: room.id,
                enemy: spawn.enemy,
            })?;
            let phase_abilities = enemy.phases.iter().flat_map(|p| p.abilities.iter());
            for &ability in enemy.abilities.iter().chain(phase_abilities) {
                if content.ability(ability).is_none() {
                    return Err(LevelDataError::UnknownAbility {
                        enemy: enemy.id,
                        ability,
                    });
                }
            }
        }
    }

    let has_boss = level
        .room(level.boss_room)
        .map(|room| {
            room.spawns
                .iter()
                .any(|s| content.enemy(s.enemy).is_some_and(|e| e.is_boss()))
        })
        .unwrap_or(false);
    if !has_boss {
        return Err(LevelDataError::BossRoomWithoutBoss(level.boss_room));
    }

    Ok(())
}
