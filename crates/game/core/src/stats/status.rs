//! Duration-based status effects.
//!
//! Applying an effect that is already present refreshes it: the remaining
//! duration becomes the larger of the existing and the new duration (durations
//! never add up). Magnitudes add up only when the effect is declared
//! `stackable`; otherwise the stronger magnitude wins.

use arrayvec::ArrayVec;

use crate::config::GameConfig;

/// Types of status effects.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum StatusKind {
    // ========================================================================
    // Crowd Control
    // ========================================================================
    /// Cannot move or attack.
    Stunned,
    /// Cannot move.
    Rooted,
    /// Movement reduced by `magnitude` percent.
    Slowed,

    // ========================================================================
    // Buffs
    // ========================================================================
    /// Movement increased by `magnitude` percent.
    Hasted,
    /// Attack modifier increased by `magnitude`.
    Empowered,
    /// Defense modifier increased by `magnitude`.
    Shielded,
    /// Restores `magnitude` health per second.
    Regenerating,

    // ========================================================================
    // Debuffs
    // ========================================================================
    /// Attack modifier reduced by `magnitude`.
    Weakened,
    /// Defense modifier reduced by `magnitude`.
    Vulnerable,
    /// Loses `magnitude` health per second.
    Poisoned,
    /// Loses `magnitude` health per second.
    Burning,
}

impl StatusKind {
    pub fn is_periodic_damage(self) -> bool {
        matches!(self, StatusKind::Poisoned | StatusKind::Burning)
    }
}

/// Immutable description of an effect to apply, as authored on an ability.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusSpec {
    pub kind: StatusKind,
    pub magnitude: u32,
    /// Seconds.
    pub duration: f32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub stackable: bool,
}

impl StatusSpec {
    pub fn new(kind: StatusKind, magnitude: u32, duration: f32) -> Self {
        Self {
            kind,
            magnitude,
            duration,
            stackable: false,
        }
    }

    pub fn stackable(mut self) -> Self {
        self.stackable = true;
        self
    }
}

/// A status effect currently active on an entity.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffect {
    pub kind: StatusKind,
    pub magnitude: u32,
    /// Seconds left.
    pub remaining: f32,
    /// Fractional periodic amount not yet applied.
    carry: f32,
}

/// What [`StatusEffects::apply`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusApplied {
    Inserted,
    Refreshed,
    /// No free slot; the effect was dropped.
    Rejected,
}

/// Whole-point periodic amounts and expirations produced by one tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StatusTick {
    pub damage: u32,
    pub healing: u32,
    pub expired: ArrayVec<StatusKind, { GameConfig::MAX_STATUS_EFFECTS }>,
}

/// Active status effects on an entity, at most one entry per kind.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffects {
    effects: ArrayVec<StatusEffect, { GameConfig::MAX_STATUS_EFFECTS }>,
}

impl StatusEffects {
    pub fn empty() -> Self {
        Self {
            effects: ArrayVec::new(),
        }
    }

    /// Inserts or refreshes an effect.
    pub fn apply(&mut self, spec: StatusSpec) -> StatusApplied {
        if let Some(existing) = self.effects.iter_mut().find(|e| e.kind == spec.kind) {
            existing.remaining = existing.remaining.max(spec.duration);
            existing.magnitude = if spec.stackable {
                existing.magnitude.saturating_add(spec.magnitude)
            } else {
                existing.magnitude.max(spec.magnitude)
            };
            return StatusApplied::Refreshed;
        }

        if spec.duration <= 0.0 || self.effects.is_full() {
            return StatusApplied::Rejected;
        }
        self.effects.push(StatusEffect {
            kind: spec.kind,
            magnitude: spec.magnitude,
            remaining: spec.duration,
            carry: 0.0,
        });
        StatusApplied::Inserted
    }

    pub fn has(&self, kind: StatusKind) -> bool {
        self.effects.iter().any(|e| e.kind == kind)
    }

    pub fn get(&self, kind: StatusKind) -> Option<&StatusEffect> {
        self.effects.iter().find(|e| e.kind == kind)
    }

    pub fn magnitude(&self, kind: StatusKind) -> u32 {
        self.get(kind).map_or(0, |e| e.magnitude)
    }

    pub fn remove(&mut self, kind: StatusKind) {
        self.effects.retain(|e| e.kind != kind);
    }

    pub fn clear(&mut self) {
        self.effects.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Net attack modifier contributed by effects.
    pub fn attack_modifier(&self) -> i32 {
        self.magnitude(StatusKind::Empowered) as i32 - self.magnitude(StatusKind::Weakened) as i32
    }

    /// Net defense modifier contributed by effects.
    pub fn defense_modifier(&self) -> i32 {
        self.magnitude(StatusKind::Shielded) as i32 - self.magnitude(StatusKind::Vulnerable) as i32
    }

    /// Multiplier applied to movement speed.
    pub fn move_multiplier(&self) -> f32 {
        if self.has(StatusKind::Stunned) || self.has(StatusKind::Rooted) {
            return 0.0;
        }
        let slowed = self.magnitude(StatusKind::Slowed).min(100) as f32;
        let hasted = self.magnitude(StatusKind::Hasted) as f32;
        (100.0 - slowed + hasted).max(0.0) / 100.0
    }

    /// Stunned entities neither move nor attack.
    pub fn can_act(&self) -> bool {
        !self.has(StatusKind::Stunned)
    }

    /// Advances every effect by `dt`.
    ///
    /// Periodic effects only count the part of `dt` that fell inside their
    /// remaining duration, so an effect never ticks past its expiry.
    pub fn tick(&mut self, dt: f32) -> StatusTick {
        let mut out = StatusTick::default();

        for effect in self.effects.iter_mut() {
            let active = dt.min(effect.remaining).max(0.0);
            let periodic = effect.kind.is_periodic_damage()
                || effect.kind == StatusKind::Regenerating;
            if periodic {
                effect.carry += effect.magnitude as f32 * active;
                let whole = effect.carry.floor();
                effect.carry -= whole;
                if effect.kind == StatusKind::Regenerating {
                    out.healing += whole as u32;
                } else {
                    out.damage += whole as u32;
                }
            }
            effect.remaining = (effect.remaining - dt).max(0.0);
            if effect.remaining == 0.0 {
                out.expired.push(effect.kind);
            }
        }

        self.effects.retain(|e| e.remaining > 0.0);
        out
    }
}
