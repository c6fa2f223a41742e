use arrayvec::ArrayVec;

use super::capability::{Attacker, Capabilities, Damageable, DamageOutcome, Movable};
use super::hero::HeroState;
use super::template::{EnemyDefinition, HeroDefinition};
use crate::ability::AbilityDefinition;
use crate::config::GameConfig;
use crate::geometry::{DoorGate, MoveOutcome, RoomGeometry, Vec2};
use crate::ids::{AbilityId, EnemyKindId, EntityId};
use crate::level::KeyGrant;
use crate::stats::{CooldownState, ResourcePool, StatusApplied, StatusEffects, StatusSpec};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum EntityKind {
    Player,
    Enemy,
    Boss,
}

impl EntityKind {
    pub fn is_hostile_to(self, other: EntityKind) -> bool {
        (self == EntityKind::Player) != (other == EntityKind::Player)
    }
}

/// What an enemy leaves behind when it dies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Loot {
    pub key: Option<KeyGrant>,
    pub gold: u32,
    pub score: u32,
}

/// A live combatant.
///
/// `alive` flips to false exactly once; every later damage call is a no-op.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    pub template: Option<EnemyKindId>,
    pub capabilities: Capabilities,
    pub position: Vec2,
    pub facing: Vec2,
    pub radius: f32,
    pub speed: f32,
    pub health: ResourcePool,
    pub energy: ResourcePool,
    pub attack: i32,
    pub defense: i32,
    pub cooldown_reduction_percent: u32,
    pub statuses: StatusEffects,
    pub abilities: ArrayVec<AbilityId, { GameConfig::MAX_ABILITY_SLOTS }>,
    pub cooldowns: CooldownState,
    pub loot: Loot,
    pub hero: Option<HeroState>,
    alive: bool,
}

impl Entity {
    pub const MAX_COOLDOWN_REDUCTION: u32 = 90;

    /// Builds the hero from its template. The ultimate ability, if any, takes
    /// the last slot.
    pub fn player(def: &HeroDefinition, config: &GameConfig) -> Self {
        let mut abilities = collect_slots(&def.abilities);
        if let Some(ultimate) = def.ultimate {
            if !abilities.contains(&ultimate) {
                let _ = abilities.try_push(ultimate);
            }
        }

        Self {
            id: EntityId::PLAYER,
            kind: EntityKind::Player,
            template: None,
            capabilities: Capabilities::all(),
            position: Vec2::ZERO,
            facing: Vec2::RIGHT,
            radius: def.radius,
            speed: def.speed,
            health: ResourcePool::full(def.max_health),
            energy: ResourcePool::full(def.max_energy),
            attack: def.attack,
            defense: def.defense,
            cooldown_reduction_percent: 0,
            statuses: StatusEffects::empty(),
            abilities,
            cooldowns: CooldownState::new(),
            loot: Loot::default(),
            hero: Some(HeroState::new(def.id, def.ultimate, config.ultimate_max)),
            alive: true,
        }
    }

    /// Spawns an enemy (or boss, when the template declares phases).
    pub fn enemy(id: EntityId, def: &EnemyDefinition, position: Vec2, key: Option<KeyGrant>) -> Self {
        let mut capabilities = Capabilities::DAMAGEABLE;
        if def.speed > 0.0 {
            capabilities |= Capabilities::MOVABLE;
        }
        if !def.abilities.is_empty() {
            capabilities |= Capabilities::ATTACKER;
        }

        Self {
            id,
            kind: if def.is_boss() {
                EntityKind::Boss
            } else {
                EntityKind::Enemy
            },
            template: Some(def.id),
            capabilities,
            position,
            facing: Vec2::new(-1.0, 0.0),
            radius: def.radius,
            speed: def.speed,
            health: ResourcePool::full(def.max_health),
            energy: ResourcePool::full(def.max_energy),
            attack: def.attack,
            defense: def.defense,
            cooldown_reduction_percent: 0,
            statuses: StatusEffects::empty(),
            abilities: collect_slots(&def.abilities),
            cooldowns: CooldownState::new(),
            loot: Loot {
                key,
                gold: def.gold,
                score: def.score,
            },
            hero: None,
            alive: true,
        }
    }

    pub fn is_player(&self) -> bool {
        self.kind == EntityKind::Player
    }

    pub fn has_ability(&self, ability: AbilityId) -> bool {
        self.abilities.contains(&ability)
    }

    /// Replaces the ability slots (boss phase changes).
    pub fn set_abilities(&mut self, abilities: &[AbilityId]) {
        self.abilities = collect_slots(abilities);
    }

    /// Cooldown this entity pays for `ability`, after config scaling and
    /// cooldown reduction.
    pub fn cooldown_for(&self, ability: &AbilityDefinition, config: &GameConfig) -> f32 {
        let scaled = config.scale_cooldown(ability.cooldown);
        if self.cooldown_reduction_percent == 0 {
            return scaled;
        }
        let reduction = self.cooldown_reduction_percent.min(Self::MAX_COOLDOWN_REDUCTION);
        scaled * (100 - reduction) as f32 / 100.0
    }

    pub fn apply_status(&mut self, spec: StatusSpec) -> StatusApplied {
        if !self.alive {
            return StatusApplied::Rejected;
        }
        self.statuses.apply(spec)
    }

    /// Advances cooldown timers and regenerates energy.
    pub fn tick_timers(&mut self, dt: f32, config: &GameConfig) {
        self.cooldowns.tick_all(dt);
        if self.alive {
            self.energy.accrue(config.energy_regen_per_second, dt);
        }
    }

    /// Resets transient state before a new level.
    pub fn prepare_for_level(&mut self, config: &GameConfig) {
        if config.restore_health_between_levels {
            self.health.fill();
        }
        self.energy.fill();
        self.statuses.clear();
        self.cooldowns.clear();
        if let Some(hero) = self.hero.as_mut() {
            hero.keys.clear();
        }
    }
}

fn collect_slots(abilities: &[AbilityId]) -> ArrayVec<AbilityId, { GameConfig::MAX_ABILITY_SLOTS }> {
    abilities
        .iter()
        .copied()
        .take(GameConfig::MAX_ABILITY_SLOTS)
        .collect()
}

impl Movable for Entity {
    fn position(&self) -> Vec2 {
        self.position
    }

    fn move_speed(&self) -> f32 {
        if !self.capabilities.contains(Capabilities::MOVABLE) {
            return 0.0;
        }
        self.speed * self.statuses.move_multiplier()
    }

    fn move_by(&mut self, geometry: &RoomGeometry<'_>, delta: Vec2, doors: &[DoorGate]) -> MoveOutcome {
        if !self.alive || !self.capabilities.contains(Capabilities::MOVABLE) {
            return MoveOutcome {
                position: self.position,
                blocked_by: None,
            };
        }
        let outcome = geometry.resolve_move(self.position, self.radius, delta, doors);
        if !delta.is_zero() {
            self.facing = delta.normalized();
        }
        self.position = outcome.position;
        outcome
    }
}

impl Damageable for Entity {
    fn is_alive(&self) -> bool {
        self.alive
    }

    fn defense_rating(&self) -> i32 {
        self.defense + self.statuses.defense_modifier()
    }

    fn take_damage(&mut self, amount: u32) -> DamageOutcome {
        if !self.alive || !self.capabilities.contains(Capabilities::DAMAGEABLE) {
            return DamageOutcome {
                dealt: 0,
                remaining: self.health.current(),
                killed: false,
            };
        }
        let dealt = self.health.drain(amount);
        let killed = self.health.is_empty();
        if killed {
            self.alive = false;
        }
        DamageOutcome {
            dealt,
            remaining: self.health.current(),
            killed,
        }
    }

    fn heal(&mut self, amount: u32) -> u32 {
        if !self.alive {
            return 0;
        }
        self.health.restore(amount)
    }
}

impl Attacker for Entity {
    fn attack_rating(&self) -> i32 {
        self.attack + self.statuses.attack_modifier()
    }

    fn can_act(&self) -> bool {
        self.alive && self.statuses.can_act()
    }

    fn ability_slots(&self) -> &[AbilityId] {
        &self.abilities
    }

    fn cooldown_remaining(&self, ability: AbilityId) -> f32 {
        self.cooldowns.remaining(ability)
    }
}
