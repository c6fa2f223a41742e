//! Per-entity cooldown timers.

use std::collections::BTreeMap;

use crate::ids::AbilityId;

/// Remaining cooldown per ability, in seconds.
///
/// Stored in a `BTreeMap` so iteration (and therefore snapshots and
/// equality checks) follows ability id order.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CooldownState {
    remaining: BTreeMap<AbilityId, f32>,
}

impl CooldownState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts (or restarts) a cooldown at exactly `duration` seconds.
    pub fn start(&mut self, ability: AbilityId, duration: f32) {
        if duration > 0.0 {
            self.remaining.insert(ability, duration);
        } else {
            self.remaining.remove(&ability);
        }
    }

    /// Advances a single ability's cooldown by `dt` and returns what is left.
    ///
    /// Never negative: a finished cooldown reads as `0.0`.
    pub fn tick(&mut self, ability: AbilityId, dt: f32) -> f32 {
        let Some(left) = self.remaining.get_mut(&ability) else {
            return 0.0;
        };
        *left = (*left - dt).max(0.0);
        let left = *left;
        if left == 0.0 {
            self.remaining.remove(&ability);
        }
        left
    }

    /// Advances every running cooldown by `dt`.
    pub fn tick_all(&mut self, dt: f32) {
        for left in self.remaining.values_mut() {
            *left = (*left - dt).max(0.0);
        }
        self.remaining.retain(|_, left| *left > 0.0);
    }

    pub fn remaining(&self, ability: AbilityId) -> f32 {
        self.remaining.get(&ability).copied().unwrap_or(0.0)
    }

    pub fn is_ready(&self, ability: AbilityId) -> bool {
        self.remaining(ability) <= 0.0
    }

    pub fn clear(&mut self) {
        self.remaining.clear();
    }
}
