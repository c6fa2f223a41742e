//! Authored entity templates.

use crate::geometry::Vec2;
use crate::ids::{AbilityId, EnemyKindId, HeroId};

/// A playable hero.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeroDefinition {
    pub id: HeroId,
    pub name: String,
    pub max_health: u32,
    pub max_energy: u32,
    pub attack: i32,
    pub defense: i32,
    pub speed: f32,
    pub radius: f32,
    /// Slot 0 is the basic attack.
    pub abilities: Vec<AbilityId>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub ultimate: Option<AbilityId>,
}

/// How an enemy moves while the hero is outside its aggro range.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PatrolPolicy {
    #[default]
    Idle,
    /// Offsets from the spawn point, visited in order and looped.
    Waypoints(Vec<Vec2>),
    /// Random points within `radius` of the spawn point.
    Wander { radius: f32 },
}

/// One boss phase. Phases are entered when health falls to or below
/// `health_percent` and never reverted.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BossPhaseDefinition {
    pub health_percent: u32,
    pub abilities: Vec<AbilityId>,
    #[cfg_attr(feature = "serde", serde(default = "hundred"))]
    pub speed_percent: u32,
}

#[cfg(feature = "serde")]
fn hundred() -> u32 {
    100
}

/// An enemy or boss template. A template with phases is a boss.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyDefinition {
    pub id: EnemyKindId,
    pub name: String,
    pub max_health: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub max_energy: u32,
    pub attack: i32,
    pub defense: i32,
    pub speed: f32,
    pub radius: f32,
    pub abilities: Vec<AbilityId>,
    pub aggro_range: f32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub patrol: PatrolPolicy,
    #[cfg_attr(feature = "serde", serde(default))]
    pub gold: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub score: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub phases: Vec<BossPhaseDefinition>,
}

impl EnemyDefinition {
    pub fn is_boss(&self) -> bool {
        !self.phases.is_empty()
    }
}
