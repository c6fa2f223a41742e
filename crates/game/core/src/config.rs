/// Tunable constants consumed once at session and level initialisation.
///
/// Percent fields are integers so that scaling stays exact; durations and
/// rates are seconds.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Scales every ability's base damage (100 = authored value).
    pub damage_scale_percent: u32,
    /// Scales every ability's cooldown (100 = authored value).
    pub cooldown_scale_percent: u32,
    /// Energy restored per second to every living entity.
    pub energy_regen_per_second: f32,
    /// Size of the hero's ultimate charge pool.
    pub ultimate_max: u32,
    /// Ultimate charge gained per second while playing.
    pub ultimate_charge_per_second: f32,
    /// Ultimate charge gained per point of damage the hero deals.
    pub ultimate_charge_per_hit: u32,
    /// Seconds before the level intro dismisses itself.
    pub intro_duration: f32,
    /// When true, SkillSelect continues into the Shop instead of the next intro.
    pub shop_after_skill_select: bool,
    /// Number of skills offered after each level.
    pub skill_choices: usize,
    /// Distance at which the hero collects a pickup.
    pub pickup_radius: f32,
    /// Refill hero health when a new level starts.
    pub restore_health_between_levels: bool,
    /// Base seed for every deterministic roll in a session.
    pub seed: u64,
}

impl GameConfig {
    // ===== compile-time capacities =====
    /// Ability slots per entity (basic attack, abilities, ultimate).
    pub const MAX_ABILITY_SLOTS: usize = 6;
    /// Distinct status effects an entity can carry at once.
    pub const MAX_STATUS_EFFECTS: usize = 8;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_ULTIMATE_MAX: u32 = 100;
    pub const DEFAULT_INTRO_DURATION: f32 = 2.5;
    pub const DEFAULT_SKILL_CHOICES: usize = 3;

    pub fn new() -> Self {
        Self {
            damage_scale_percent: 100,
            cooldown_scale_percent: 100,
            energy_regen_per_second: 5.0,
            ultimate_max: Self::DEFAULT_ULTIMATE_MAX,
            ultimate_charge_per_second: 2.0,
            ultimate_charge_per_hit: 1,
            intro_duration: Self::DEFAULT_INTRO_DURATION,
            shop_after_skill_select: true,
            skill_choices: Self::DEFAULT_SKILL_CHOICES,
            pickup_radius: 1.0,
            restore_health_between_levels: true,
            seed: 0,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Applies `damage_scale_percent` to an authored base damage.
    pub fn scale_damage(&self, base: u32) -> u32 {
        ((base as u64 * self.damage_scale_percent as u64) / 100) as u32
    }

    /// Applies `cooldown_scale_percent` to an authored cooldown.
    pub fn scale_cooldown(&self, seconds: f32) -> f32 {
        if self.cooldown_scale_percent == 100 {
            return seconds;
        }
        seconds * self.cooldown_scale_percent as f32 / 100.0
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
