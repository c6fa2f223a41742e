//! Events emitted by the simulation.
//!
//! Every observable change leaves game-core as a [`GameEvent`]. Events are
//! queued in emission order and drained once per tick; the runtime fans them
//! out to subscribers.

use std::collections::VecDeque;

use crate::combat::RoomPhase;
use crate::entity::EntityKind;
use crate::geometry::Vec2;
use crate::ids::{AbilityId, DoorId, EntityId, EnemyKindId, RoomId, SkillId, ShopItemId};
use crate::level::KeyGrant;
use crate::session::Scene;
use crate::stats::StatusKind;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameEvent {
    // ===== combat =====
    EntitySpawned {
        entity: EntityId,
        template: EnemyKindId,
        kind: EntityKind,
    },
    AbilityCast {
        caster: EntityId,
        ability: AbilityId,
        targets: Vec<EntityId>,
    },
    Damaged {
        source: Option<EntityId>,
        target: EntityId,
        amount: u32,
        remaining: u32,
    },
    Healed {
        target: EntityId,
        amount: u32,
    },
    StatusApplied {
        target: EntityId,
        status: StatusKind,
    },
    StatusExpired {
        target: EntityId,
        status: StatusKind,
    },
    /// Emitted exactly once per entity.
    Died {
        entity: EntityId,
        kind: EntityKind,
    },
    BossPhaseChanged {
        boss: EntityId,
        phase: u8,
    },
    BossDefeated {
        boss: EntityId,
    },
    UltimateReady,
    RewardEarned {
        gold: u32,
        score: u32,
    },
    PlayerDied,

    // ===== room & level =====
    RoomPhaseChanged {
        room: RoomId,
        phase: RoomPhase,
    },
    RoomCleared {
        room: RoomId,
    },
    KeyDropped {
        grant: KeyGrant,
        position: Vec2,
    },
    KeyCollected {
        grant: KeyGrant,
    },
    DoorUnlocked {
        door: DoorId,
    },
    RoomEntered {
        room: RoomId,
    },
    LevelComplete {
        level_index: usize,
    },

    // ===== session =====
    SceneChanged {
        from: Scene,
        to: Scene,
    },
    SkillChosen {
        skill: SkillId,
    },
    ItemPurchased {
        item: ShopItemId,
        price: u32,
    },
}

impl GameEvent {
    /// Coarse grouping used for routing.
    pub fn category(&self) -> EventCategory {
        use GameEvent::*;
        match self {
            EntitySpawned { .. }
            | AbilityCast { .. }
            | Damaged { .. }
            | Healed { .. }
            | StatusApplied { .. }
            | StatusExpired { .. }
            | Died { .. }
            | BossPhaseChanged { .. }
            | BossDefeated { .. }
            | UltimateReady
            | RewardEarned { .. }
            | PlayerDied => EventCategory::Combat,
            RoomPhaseChanged { .. }
            | RoomCleared { .. }
            | KeyDropped { .. }
            | KeyCollected { .. }
            | DoorUnlocked { .. }
            | RoomEntered { .. }
            | LevelComplete { .. } => EventCategory::Progression,
            SceneChanged { .. } | SkillChosen { .. } | ItemPurchased { .. } => {
                EventCategory::Scene
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum EventCategory {
    Combat,
    Progression,
    Scene,
}

/// FIFO queue of pending events.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EventQueue {
    pending: VecDeque<GameEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: GameEvent) {
        self.pending.push_back(event);
    }

    pub fn pop(&mut self) -> Option<GameEvent> {
        self.pending.pop_front()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GameEvent> {
        self.pending.iter()
    }

    /// Removes and returns every pending event in emission order.
    pub fn drain(&mut self) -> Vec<GameEvent> {
        self.pending.drain(..).collect()
    }
}

impl Extend<GameEvent> for EventQueue {
    fn extend<T: IntoIterator<Item = GameEvent>>(&mut self, iter: T) {
        self.pending.extend(iter);
    }
}
