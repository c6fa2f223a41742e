//! Enemy decision policy.
//!
//! Priority: attack with a ready ability if the hero is in its reach, chase if
//! the hero is inside aggro range, follow the patrol target, otherwise idle.

use std::sync::{Arc, OnceLock};

use behavior_tree::{Behavior, builder::*};

use super::Sighting;
use crate::geometry::Vec2;
use crate::ids::{AbilityId, EntityId};

#[derive(Clone, Copy, Debug, PartialEq)]
pub(super) enum Decision {
    Idle,
    Attack { ability: AbilityId, target: EntityId },
    MoveTo(Vec2),
}

/// Per-frame blackboard filled by the controller before the tree runs.
#[derive(Clone, Copy, Debug)]
pub(super) struct Blackboard {
    pub position: Vec2,
    pub target: Option<Sighting>,
    pub aggro_range: f32,
    /// First ability that is off cooldown, affordable and reaches the target.
    pub ready: Option<AbilityId>,
    /// Chasing stops inside this distance.
    pub hold_range: f32,
    pub patrol_target: Option<Vec2>,
    pub decision: Decision,
}

impl Blackboard {
    fn target_distance(&self) -> Option<f32> {
        self.target.map(|t| self.position.distance(t.position))
    }

    fn in_aggro(&self) -> bool {
        self.target_distance().is_some_and(|d| d <= self.aggro_range)
    }
}

pub(super) type Policy = Arc<dyn Behavior<Blackboard>>;

/// The enemy policy tree. Nodes are stateless, so one tree serves every enemy.
pub(super) fn enemy_policy() -> Policy {
    static POLICY: OnceLock<Policy> = OnceLock::new();
    POLICY.get_or_init(|| Arc::from(build())).clone()
}

fn build() -> Box<dyn Behavior<Blackboard>> {
    selector(vec![
        sequence(vec![
            condition(|bb: &Blackboard| bb.ready.is_some() && bb.target.is_some() && bb.in_aggro()),
            action(|bb: &mut Blackboard| match (bb.ready, bb.target) {
                (Some(ability), Some(target)) => {
                    bb.decision = Decision::Attack {
                        ability,
                        target: target.id,
                    };
                    true
                }
                _ => false,
            }),
        ]),
        sequence(vec![
            condition(Blackboard::in_aggro),
            action(|bb: &mut Blackboard| {
                let (Some(target), Some(distance)) = (bb.target, bb.target_distance()) else {
                    return false;
                };
                bb.decision = if distance > bb.hold_range {
                    Decision::MoveTo(target.position)
                } else {
                    Decision::Idle
                };
                true
            }),
        ]),
        sequence(vec![
            condition(|bb: &Blackboard| bb.patrol_target.is_some()),
            action(|bb: &mut Blackboard| match bb.patrol_target {
                Some(point) => {
                    bb.decision = Decision::MoveTo(point);
                    true
                }
                None => false,
            }),
        ]),
        action(|bb: &mut Blackboard| {
            bb.decision = Decision::Idle;
            true
        }),
    ])
}
