//! Generic ability resolution.
//!
//! A cast is verified completely before anything changes: cooldown, ultimate
//! charge, energy, caster state and the explicit target. Only then are targets
//! selected, the cooldown started and the cost paid, in that order. A failed
//! cast leaves the caster untouched.

use super::{AbilityDefinition, AbilityError, TargetCandidate, TargetingRule, select_targets};
use crate::config::GameConfig;
use crate::entity::{Attacker, Damageable, DamageOutcome, Entity};
use crate::event::{EventQueue, GameEvent};
use crate::ids::{AbilityId, EntityId};
use crate::stats::{ResourceKind, StatusApplied, StatusSpec};

/// Effect of a resolved cast on one target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EffectApplication {
    pub target: EntityId,
    pub damage: u32,
    pub status: Option<StatusSpec>,
}

/// A successful cast. `applications` may be empty when nothing was in range.
#[derive(Clone, Debug, PartialEq)]
pub struct Resolution {
    pub caster: EntityId,
    pub ability: AbilityId,
    pub applications: Vec<EffectApplication>,
}

impl Resolution {
    pub fn targets(&self) -> Vec<EntityId> {
        self.applications.iter().map(|a| a.target).collect()
    }

    pub fn is_whiff(&self) -> bool {
        self.applications.is_empty()
    }
}

/// `scaled(base) + attack - defense`, floored at zero.
pub fn compute_damage(config: &GameConfig, base: u32, attack: i32, defense: i32) -> u32 {
    let raw = config.scale_damage(base) as i64 + attack as i64 - defense as i64;
    raw.clamp(0, u32::MAX as i64) as u32
}

#[derive(Clone, Copy, Debug)]
pub struct Resolver<'a> {
    config: &'a GameConfig,
}

impl<'a> Resolver<'a> {
    pub fn new(config: &'a GameConfig) -> Self {
        Self { config }
    }

    pub fn resolve(
        &self,
        caster: &mut Entity,
        ability: &AbilityDefinition,
        explicit_target: Option<EntityId>,
        candidates: &[TargetCandidate],
    ) -> Result<Resolution, AbilityError> {
        self.verify(caster, ability)?;

        let targets = match explicit_target {
            Some(target) if !ability.targeting.is_self_only() => {
                self.verify_explicit(caster, ability, target, candidates)?
            }
            _ => select_targets(
                &ability.targeting,
                caster.id,
                caster.position,
                caster.facing,
                candidates,
            ),
        };

        let attack = caster.attack_rating();
        let applications = targets
            .into_iter()
            .map(|target| {
                let damage = if ability.targeting.is_self_only() {
                    0
                } else {
                    let defense = candidates
                        .iter()
                        .find(|c| c.id == target)
                        .map_or(0, |c| c.defense);
                    compute_damage(self.config, ability.effect.base_damage, attack, defense)
                };
                EffectApplication {
                    target,
                    damage,
                    status: ability.effect.status,
                }
            })
            .collect();

        caster
            .cooldowns
            .start(ability.id, caster.cooldown_for(ability, self.config));
        caster
            .energy
            .spend(ability.cost)
            .map_err(|e| AbilityError::InsufficientResource {
                kind: ResourceKind::Energy,
                requested: e.requested,
                available: e.available,
            })?;
        if ability.ultimate {
            if let Some(hero) = caster.hero.as_mut() {
                hero.ultimate.deplete();
            }
        }

        Ok(Resolution {
            caster: caster.id,
            ability: ability.id,
            applications,
        })
    }

    fn verify(&self, caster: &Entity, ability: &AbilityDefinition) -> Result<(), AbilityError> {
        if !caster.can_act() {
            return Err(AbilityError::CasterIncapacitated(caster.id));
        }
        if !caster.has_ability(ability.id) {
            return Err(AbilityError::UnknownAbility(ability.id));
        }

        let remaining = caster.cooldown_remaining(ability.id);
        if remaining > 0.0 {
            return Err(AbilityError::NotReady {
                ability: ability.id,
                remaining,
            });
        }

        if ability.ultimate {
            let (current, maximum) = caster
                .hero
                .as_ref()
                .map_or((0, 0), |h| (h.ultimate.current(), h.ultimate.maximum()));
            if maximum == 0 || current < maximum {
                return Err(AbilityError::UltimateNotCharged { current, maximum });
            }
        }

        if ability.cost > caster.energy.current() {
            return Err(AbilityError::InsufficientResource {
                kind: ResourceKind::Energy,
                requested: ability.cost,
                available: caster.energy.current(),
            });
        }
        Ok(())
    }

    fn verify_explicit(
        &self,
        caster: &Entity,
        ability: &AbilityDefinition,
        target: EntityId,
        candidates: &[TargetCandidate],
    ) -> Result<Vec<EntityId>, AbilityError> {
        let candidate = candidates
            .iter()
            .find(|c| c.id == target && c.alive)
            .ok_or(AbilityError::InvalidTarget(target))?;
        if caster.position.distance(candidate.position) > ability.targeting.reach() {
            return Err(AbilityError::InvalidTarget(target));
        }

        Ok(match ability.targeting {
            TargetingRule::SingleNearest { .. } => vec![target],
            rule => select_targets(&rule, caster.id, caster.position, caster.facing, candidates),
        })
    }
}

/// Applies one effect to its target and queues the resulting events.
///
/// Statuses are only applied to targets that survive the hit.
pub fn apply_effect(
    target: &mut Entity,
    application: &EffectApplication,
    source: EntityId,
    events: &mut EventQueue,
) -> DamageOutcome {
    let mut outcome = DamageOutcome {
        dealt: 0,
        remaining: target.health.current(),
        killed: false,
    };

    if application.damage > 0 {
        outcome = target.take_damage(application.damage);
        if outcome.dealt > 0 {
            events.push(GameEvent::Damaged {
                source: Some(source),
                target: target.id,
                amount: outcome.dealt,
                remaining: outcome.remaining,
            });
        }
    }

    if let Some(status) = application.status {
        if target.apply_status(status) != StatusApplied::Rejected {
            events.push(GameEvent::StatusApplied {
                target: target.id,
                status: status.kind,
            });
        }
    }

    if outcome.killed {
        events.push(GameEvent::Died {
            entity: target.id,
            kind: target.kind,
        });
    }
    outcome
}
