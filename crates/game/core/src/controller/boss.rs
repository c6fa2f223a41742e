use super::{ControlContext, ControllerOutput, EnemyController};
use crate::entity::{BossPhaseDefinition, Damageable, EnemyDefinition, Entity};

/// Health-threshold phase state machine.
///
/// Phases are ordered by descending `health_percent`. The phase for a given
/// health is the last one whose threshold is at or above it, and the current
/// phase only ever moves forward.
#[derive(Clone, Debug, PartialEq)]
pub struct PhasePolicy {
    phases: Vec<BossPhaseDefinition>,
    current: Option<usize>,
}

impl PhasePolicy {
    pub fn new(phases: Vec<BossPhaseDefinition>) -> Self {
        Self {
            phases,
            current: None,
        }
    }

    pub fn current(&self) -> Option<usize> {
        self.current
    }

    pub fn phase(&self, index: usize) -> Option<&BossPhaseDefinition> {
        self.phases.get(index)
    }

    fn phase_for(&self, health_percent: u32) -> Option<usize> {
        self.phases
            .iter()
            .rposition(|phase| health_percent <= phase.health_percent)
    }

    /// Advances to the phase matching `health_percent`. Returns the new phase
    /// index if it changed.
    pub fn advance(&mut self, health_percent: u32) -> Option<usize> {
        let next = self.phase_for(health_percent)?;
        if self.current.is_some_and(|current| next <= current) {
            return None;
        }
        self.current = Some(next);
        Some(next)
    }
}

/// Enemy AI plus a phase policy that swaps abilities and speed.
#[derive(Clone, Debug)]
pub struct BossController {
    enemy: EnemyController,
    phases: PhasePolicy,
    base_speed: f32,
}

impl BossController {
    /// Enters the opening phase silently.
    pub fn new(entity: &mut Entity, def: &EnemyDefinition) -> Self {
        let mut controller = Self {
            enemy: EnemyController::new(entity.position, def),
            phases: PhasePolicy::new(def.phases.clone()),
            base_speed: def.speed,
        };
        if let Some(index) = controller.phases.advance(entity.health.percent()) {
            controller.enter(entity, index);
        }
        controller
    }

    pub fn phase(&self) -> Option<usize> {
        self.phases.current()
    }

    pub fn update(&mut self, entity: &mut Entity, ctx: &ControlContext<'_>) -> ControllerOutput {
        let mut changed = None;
        if entity.is_alive() {
            if let Some(index) = self.phases.advance(entity.health.percent()) {
                self.enter(entity, index);
                changed = Some(index as u8);
            }
        }

        let mut out = self.enemy.update(entity, ctx);
        out.phase_changed = changed;
        out
    }

    fn enter(&self, entity: &mut Entity, index: usize) {
        let Some(phase) = self.phases.phase(index) else {
            return;
        };
        if !phase.abilities.is_empty() {
            entity.set_abilities(&phase.abilities);
        }
        entity.speed = self.base_speed * phase.speed_percent as f32 / 100.0;
    }
}
