//! Read-only views handed to rendering collaborators and persistence.

use crate::combat::{Pickup, RoomPhase};
use crate::entity::{Entity, EntityKind};
use crate::geometry::Vec2;
use crate::ids::{EntityId, HeroId, RoomId, SkillId};
use crate::stats::StatusKind;

use super::Scene;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityView {
    pub id: EntityId,
    pub kind: EntityKind,
    pub position: Vec2,
    pub facing: Vec2,
    pub health: u32,
    pub max_health: u32,
    pub energy: u32,
    /// Active statuses with their remaining seconds.
    pub statuses: Vec<(StatusKind, f32)>,
}

impl From<&Entity> for EntityView {
    fn from(entity: &Entity) -> Self {
        Self {
            id: entity.id,
            kind: entity.kind,
            position: entity.position,
            facing: entity.facing,
            health: entity.health.current(),
            max_health: entity.health.maximum(),
            energy: entity.energy.current(),
            statuses: entity.statuses.iter().map(|s| (s.kind, s.remaining)).collect(),
        }
    }
}

/// Everything a renderer needs for one frame.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldSnapshot {
    pub frame: u64,
    pub scene: Scene,
    pub level_index: usize,
    pub room: Option<RoomId>,
    pub room_phase: Option<RoomPhase>,
    pub player: Option<EntityView>,
    /// Living enemies in spawn order.
    pub enemies: Vec<EntityView>,
    pub pickups: Vec<Pickup>,
    pub keys: u32,
    pub gold: u32,
    pub score: u32,
    pub ultimate: u32,
    pub ultimate_max: u32,
    /// Skills on offer while in `SkillSelect`.
    pub skill_offers: Vec<SkillId>,
}

impl WorldSnapshot {
    /// Closest living enemy to the hero.
    pub fn nearest_enemy(&self) -> Option<&EntityView> {
        let origin = self.player.as_ref()?.position;
        self.enemies.iter().min_by(|a, b| {
            origin
                .distance(a.position)
                .total_cmp(&origin.distance(b.position))
                .then(a.id.cmp(&b.id))
        })
    }
}

/// Persistent progression written at GameOver/Victory and read at Start.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ProgressSnapshot {
    /// Furthest level reached (0-based).
    pub level_index: usize,
    pub hero: Option<HeroId>,
    pub skills: Vec<SkillId>,
    pub best_score: u32,
}
