use std::collections::BTreeSet;

use super::Entity;
use crate::ids::{AbilityId, HeroId, SkillId};
use crate::level::KeyRing;
use crate::stats::ResourcePool;

/// Permanent hero upgrade granted by a skill pick or a shop purchase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkillEffect {
    MaxHealth(u32),
    MaxEnergy(u32),
    Attack(i32),
    Defense(i32),
    /// Percent shaved off every cooldown. Capped at 90 in total.
    CooldownReduction(u32),
    /// Percent added to base movement speed.
    MoveSpeed(u32),
    /// Restores health without changing the maximum.
    Heal(u32),
}

impl SkillEffect {
    pub fn apply_to(&self, entity: &mut Entity) {
        match *self {
            SkillEffect::MaxHealth(amount) => entity.health.grow(amount),
            SkillEffect::MaxEnergy(amount) => entity.energy.grow(amount),
            SkillEffect::Attack(amount) => entity.attack += amount,
            SkillEffect::Defense(amount) => entity.defense += amount,
            SkillEffect::CooldownReduction(percent) => {
                entity.cooldown_reduction_percent =
                    (entity.cooldown_reduction_percent + percent).min(Entity::MAX_COOLDOWN_REDUCTION);
            }
            SkillEffect::MoveSpeed(percent) => {
                entity.speed *= 1.0 + percent as f32 / 100.0;
            }
            SkillEffect::Heal(amount) => {
                entity.health.restore(amount);
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillDefinition {
    pub id: SkillId,
    pub name: String,
    pub effect: SkillEffect,
}

/// Hero-only state carried across levels of a run.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeroState {
    pub hero: HeroId,
    pub ultimate_ability: Option<AbilityId>,
    pub ultimate: ResourcePool,
    /// Reset at the start of every level.
    pub keys: KeyRing,
    pub skills: BTreeSet<SkillId>,
    pub gold: u32,
    pub score: u32,
}

impl HeroState {
    pub fn new(hero: HeroId, ultimate_ability: Option<AbilityId>, ultimate_max: u32) -> Self {
        Self {
            hero,
            ultimate_ability,
            ultimate: ResourcePool::empty(ultimate_max),
            keys: KeyRing::new(),
            skills: BTreeSet::new(),
            gold: 0,
            score: 0,
        }
    }
}
