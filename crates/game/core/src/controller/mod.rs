//! Per-frame entity controllers.
//!
//! A controller advances its entity's timers, moves it through room geometry
//! and may emit an [`AttackIntent`]. It never applies combat effects; those are
//! resolved afterwards by the combat loop in a fixed order.
//!
//! Variants share the capability traits on [`Entity`] and differ only in the
//! policy that picks movement and attacks:
//!
//! - [`PlayerController`]: external input
//! - [`EnemyController`]: behavior-tree AI (attack, chase, patrol, idle)
//! - [`BossController`]: enemy AI plus a health-threshold phase policy

mod ai;
mod boss;
mod enemy;
mod player;

pub use boss::{BossController, PhasePolicy};
pub use enemy::EnemyController;
pub use player::PlayerController;

use crate::config::GameConfig;
use crate::entity::{AttackIntent, EnemyDefinition, Entity};
use crate::env::ContentOracle;
use crate::geometry::{DoorGate, RoomGeometry, Vec2};
use crate::ids::{DoorId, EntityId};

/// The hero as seen by AI this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sighting {
    pub id: EntityId,
    pub position: Vec2,
}

/// Shared, read-only inputs for one controller update.
#[derive(Clone, Copy)]
pub struct ControlContext<'a> {
    pub geometry: RoomGeometry<'a>,
    pub doors: &'a [DoorGate],
    pub content: &'a dyn ContentOracle,
    pub config: &'a GameConfig,
    /// Living hero, if any.
    pub player: Option<Sighting>,
    /// Frame counter, mixed into AI rolls.
    pub frame: u64,
    pub dt: f32,
}

/// What a controller produced this frame.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct ControllerOutput {
    pub attack: Option<AttackIntent>,
    /// Closed door the entity walked into.
    pub blocked_by: Option<DoorId>,
    /// Boss phase entered this frame.
    pub phase_changed: Option<u8>,
}

/// Controller variant attached to an entity, dispatched by entity kind.
#[derive(Clone, Debug)]
pub enum Controller {
    Player(PlayerController),
    Enemy(EnemyController),
    Boss(BossController),
}

impl Controller {
    /// AI controller for a freshly spawned enemy or boss.
    pub fn for_enemy(entity: &mut Entity, def: &EnemyDefinition) -> Self {
        if def.is_boss() {
            Controller::Boss(BossController::new(entity, def))
        } else {
            Controller::Enemy(EnemyController::new(entity.position, def))
        }
    }

    pub fn update(&mut self, entity: &mut Entity, ctx: &ControlContext<'_>) -> ControllerOutput {
        match self {
            Controller::Player(controller) => controller.update(entity, ctx),
            Controller::Enemy(controller) => controller.update(entity, ctx),
            Controller::Boss(controller) => controller.update(entity, ctx),
        }
    }
}
