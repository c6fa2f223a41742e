use std::fmt;

use super::ai::{Blackboard, Decision, Policy, enemy_policy};
use super::{ControlContext, ControllerOutput};
use crate::entity::{AttackIntent, Attacker, Damageable, EnemyDefinition, Entity, Movable, PatrolPolicy};
use crate::env::{PcgRng, RngOracle, compute_seed, purpose};
use crate::geometry::Vec2;
use crate::ids::AbilityId;

/// Distance at which a movement target counts as reached.
const ARRIVAL_EPSILON: f32 = 0.25;

/// AI controller for regular enemies.
#[derive(Clone)]
pub struct EnemyController {
    home: Vec2,
    aggro_range: f32,
    patrol: PatrolPolicy,
    waypoint: usize,
    wander_target: Option<Vec2>,
    policy: Policy,
}

impl fmt::Debug for EnemyController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnemyController")
            .field("home", &self.home)
            .field("aggro_range", &self.aggro_range)
            .field("patrol", &self.patrol)
            .field("waypoint", &self.waypoint)
            .field("wander_target", &self.wander_target)
            .finish_non_exhaustive()
    }
}

impl EnemyController {
    pub fn new(home: Vec2, def: &EnemyDefinition) -> Self {
        Self {
            home,
            aggro_range: def.aggro_range,
            patrol: def.patrol.clone(),
            waypoint: 0,
            wander_target: None,
            policy: enemy_policy(),
        }
    }

    pub fn update(&mut self, entity: &mut Entity, ctx: &ControlContext<'_>) -> ControllerOutput {
        entity.tick_timers(ctx.dt, ctx.config);
        if !entity.can_act() {
            return ControllerOutput::default();
        }

        let mut blackboard = Blackboard {
            position: entity.position,
            target: ctx.player,
            aggro_range: self.aggro_range,
            ready: ready_ability(entity, ctx),
            hold_range: hold_range(entity, ctx),
            patrol_target: self.patrol_target(entity, ctx),
            decision: Decision::Idle,
        };
        self.policy.tick(&mut blackboard);

        let mut out = ControllerOutput::default();
        match blackboard.decision {
            Decision::Idle => {}
            Decision::MoveTo(point) => {
                let distance = entity.position.distance(point);
                let step = (entity.move_speed() * ctx.dt).min(distance);
                if step > 0.0 {
                    let delta = entity.position.direction_to(point) * step;
                    out.blocked_by = entity.move_by(&ctx.geometry, delta, ctx.doors).blocked_by;
                }
            }
            Decision::Attack { ability, target } => {
                if let Some(sighting) = ctx.player {
                    let aim = entity.position.direction_to(sighting.position);
                    if !aim.is_zero() {
                        entity.facing = aim;
                    }
                }
                out.attack = Some(AttackIntent {
                    caster: entity.id,
                    ability,
                    target: Some(target),
                    aim: entity.facing,
                });
            }
        }
        out
    }

    fn patrol_target(&mut self, entity: &Entity, ctx: &ControlContext<'_>) -> Option<Vec2> {
        let arrived = |point: Vec2| entity.position.distance(point) <= ARRIVAL_EPSILON;

        match &self.patrol {
            PatrolPolicy::Idle => (!arrived(self.home)).then_some(self.home),
            PatrolPolicy::Waypoints(points) if points.is_empty() => None,
            PatrolPolicy::Waypoints(points) => {
                let mut point = self.home + points[self.waypoint % points.len()];
                if arrived(point) {
                    self.waypoint = (self.waypoint + 1) % points.len();
                    point = self.home + points[self.waypoint];
                }
                Some(point)
            }
            PatrolPolicy::Wander { radius } => {
                let radius = *radius;
                let target = match self.wander_target {
                    Some(point) if !arrived(point) => point,
                    _ => {
                        let rng = PcgRng;
                        let roll = |p| {
                            let seed = compute_seed(ctx.config.seed, ctx.frame, entity.id.0, p);
                            (rng.unit(seed) * 2.0 - 1.0) * radius
                        };
                        self.home + Vec2::new(roll(purpose::WANDER_X), roll(purpose::WANDER_Y))
                    }
                };
                self.wander_target = Some(target);
                Some(target)
            }
        }
    }
}

/// First slot ability the enemy can cast at the hero right now.
fn ready_ability(entity: &Entity, ctx: &ControlContext<'_>) -> Option<AbilityId> {
    let target = ctx.player?;
    let distance = entity.position.distance(target.position);

    entity.ability_slots().iter().copied().find(|&id| {
        let Some(def) = ctx.content.ability(id) else {
            return false;
        };
        let in_reach = def.targeting.is_self_only() || distance <= def.targeting.reach();
        !def.ultimate
            && in_reach
            && entity.cooldown_remaining(id) <= 0.0
            && entity.energy.current() >= def.cost
    })
}

/// Keeps melee enemies from stacking on top of the hero while waiting for a
/// cooldown.
fn hold_range(entity: &Entity, ctx: &ControlContext<'_>) -> f32 {
    entity
        .ability_slots()
        .iter()
        .filter_map(|&id| ctx.content.ability(id))
        .filter(|def| !def.targeting.is_self_only())
        .map(|def| def.targeting.reach() * 0.8)
        .fold(None, |min: Option<f32>, reach| Some(min.map_or(reach, |m| m.min(reach))))
        .unwrap_or(0.0)
}
