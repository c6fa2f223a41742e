//! Clamped resource pools.

/// Enum representing individual resource types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ResourceKind {
    Health,
    Energy,
    /// Hero-only charge gating ultimate abilities.
    Ultimate,
}

/// Spending more than the pool holds. Nothing is deducted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("insufficient resource: requested {requested}, available {available}")]
pub struct ResourceError {
    pub requested: u32,
    pub available: u32,
}

/// A numeric pool whose current value always stays within `[0, maximum]`.
///
/// Fractional gains (per-second regeneration) accumulate in `carry` until a
/// whole point is available, so integer pools still regenerate smoothly at
/// any frame rate.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourcePool {
    current: u32,
    maximum: u32,
    carry: f32,
}

impl ResourcePool {
    /// Creates a full pool.
    pub const fn full(maximum: u32) -> Self {
        Self {
            current: maximum,
            maximum,
            carry: 0.0,
        }
    }

    /// Creates an empty pool.
    pub const fn empty(maximum: u32) -> Self {
        Self {
            current: 0,
            maximum,
            carry: 0.0,
        }
    }

    /// Creates a pool, clamping `current` to `maximum`.
    pub fn new(current: u32, maximum: u32) -> Self {
        Self {
            current: current.min(maximum),
            maximum,
            carry: 0.0,
        }
    }

    #[inline]
    pub fn current(&self) -> u32 {
        self.current
    }

    #[inline]
    pub fn maximum(&self) -> u32 {
        self.maximum
    }

    pub fn is_full(&self) -> bool {
        self.current == self.maximum
    }

    pub fn is_empty(&self) -> bool {
        self.current == 0
    }

    /// Current value as an integer percentage of the maximum (0 for a zero-size pool).
    pub fn percent(&self) -> u32 {
        if self.maximum == 0 {
            0
        } else {
            ((self.current as u64 * 100) / self.maximum as u64) as u32
        }
    }

    /// Deducts `amount` entirely or not at all.
    pub fn spend(&mut self, amount: u32) -> Result<(), ResourceError> {
        if amount > self.current {
            return Err(ResourceError {
                requested: amount,
                available: self.current,
            });
        }
        self.current -= amount;
        Ok(())
    }

    /// Removes up to `amount`, stopping at zero. Returns how much was removed.
    pub fn drain(&mut self, amount: u32) -> u32 {
        let removed = amount.min(self.current);
        self.current -= removed;
        removed
    }

    /// Adds up to `amount`, stopping at the maximum. Returns how much was added.
    pub fn restore(&mut self, amount: u32) -> u32 {
        let added = amount.min(self.maximum - self.current);
        self.current += added;
        added
    }

    /// Accrues `rate * dt`, carrying the fractional part to the next call.
    /// Returns the whole points added.
    pub fn accrue(&mut self, rate: f32, dt: f32) -> u32 {
        if rate <= 0.0 || dt <= 0.0 {
            return 0;
        }
        if self.is_full() {
            self.carry = 0.0;
            return 0;
        }
        self.carry += rate * dt;
        let whole = self.carry.floor();
        self.carry -= whole;
        self.restore(whole as u32)
    }

    pub fn fill(&mut self) {
        self.current = self.maximum;
        self.carry = 0.0;
    }

    pub fn deplete(&mut self) {
        self.current = 0;
        self.carry = 0.0;
    }

    /// Changes the maximum, clamping the current value into the new range.
    pub fn set_maximum(&mut self, maximum: u32) {
        self.maximum = maximum;
        self.current = self.current.min(maximum);
    }

    /// Raises the maximum and grants the same amount to the current value.
    pub fn grow(&mut self, amount: u32) {
        self.maximum = self.maximum.saturating_add(amount);
        self.restore(amount);
    }
}
