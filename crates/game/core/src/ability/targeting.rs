//! Target selection.
//!
//! Candidates are supplied by the combat loop (already filtered to hostile
//! entities). Results are ordered by distance, then entity id, so the same
//! positions always produce the same target list.

use std::cmp::Ordering;

use super::TargetingRule;
use crate::geometry::Vec2;
use crate::ids::EntityId;

/// A potential target as seen at resolution time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TargetCandidate {
    pub id: EntityId,
    pub position: Vec2,
    /// Defense rating including status modifiers.
    pub defense: i32,
    pub alive: bool,
}

/// Picks targets for `rule` from `candidates`.
///
/// `facing` is only used by cone rules; a zero vector faces right.
pub fn select_targets(
    rule: &TargetingRule,
    caster: EntityId,
    origin: Vec2,
    facing: Vec2,
    candidates: &[TargetCandidate],
) -> Vec<EntityId> {
    let range = match *rule {
        TargetingRule::SelfOnly => return vec![caster],
        other => other.reach(),
    };

    let direction = if facing.is_zero() {
        Vec2::RIGHT
    } else {
        facing.normalized()
    };

    let mut hits: Vec<(f32, EntityId)> = candidates
        .iter()
        .filter(|c| c.alive && c.id != caster)
        .filter_map(|c| {
            let distance = origin.distance(c.position);
            if distance > range {
                return None;
            }
            if let TargetingRule::Cone {
                half_angle_degrees, ..
            } = *rule
            {
                // A target standing on the caster is always inside the cone.
                if distance > f32::EPSILON {
                    let cos = direction.dot((c.position - origin) * (1.0 / distance));
                    if cos < half_angle_degrees.to_radians().cos() {
                        return None;
                    }
                }
            }
            Some((distance, c.id))
        })
        .collect();

    hits.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal).then(a.1.cmp(&b.1)));

    match rule {
        TargetingRule::SingleNearest { .. } => hits.into_iter().take(1).map(|(_, id)| id).collect(),
        _ => hits.into_iter().map(|(_, id)| id).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(id: u32, x: f32, y: f32) -> TargetCandidate {
        TargetCandidate {
            id: EntityId(id),
            position: Vec2::new(x, y),
            defense: 0,
            alive: true,
        }
    }

    #[test]
    fn nearest_breaks_ties_by_id() {
        let candidates = [candidate(7, 2.0, 0.0), candidate(3, 0.0, 2.0), candidate(1, 5.0, 0.0)];
        let picked = select_targets(
            &TargetingRule::SingleNearest { range: 3.0 },
            EntityId::PLAYER,
            Vec2::ZERO,
            Vec2::ZERO,
            &candidates,
        );
        assert_eq!(picked, vec![EntityId(3)]);
    }

    #[test]
    fn radius_skips_dead_and_far() {
        let mut dead = candidate(2, 1.0, 0.0);
        dead.alive = false;
        let candidates = [candidate(1, 1.5, 0.0), dead, candidate(3, 9.0, 0.0), candidate(4, 0.5, 0.0)];
        let picked = select_targets(
            &TargetingRule::AllInRadius { radius: 2.0 },
            EntityId::PLAYER,
            Vec2::ZERO,
            Vec2::ZERO,
            &candidates,
        );
        assert_eq!(picked, vec![EntityId(4), EntityId(1)]);
    }

    #[test]
    fn cone_respects_facing() {
        let candidates = [candidate(1, 2.0, 0.0), candidate(2, -2.0, 0.0), candidate(3, 2.0, 1.9)];
        let rule = TargetingRule::Cone {
            range: 4.0,
            half_angle_degrees: 30.0,
        };
        let picked = select_targets(&rule, EntityId::PLAYER, Vec2::ZERO, Vec2::RIGHT, &candidates);
        assert_eq!(picked, vec![EntityId(1)]);

        let picked = select_targets(
            &rule,
            EntityId::PLAYER,
            Vec2::ZERO,
            Vec2::new(-1.0, 0.0),
            &candidates,
        );
        assert_eq!(picked, vec![EntityId(2)]);
    }

    #[test]
    fn self_only_targets_caster() {
        let picked = select_targets(
            &TargetingRule::SelfOnly,
            EntityId(5),
            Vec2::ZERO,
            Vec2::ZERO,
            &[candidate(1, 0.0, 0.0)],
        );
        assert_eq!(picked, vec![EntityId(5)]);
    }
}
