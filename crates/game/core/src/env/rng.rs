//! Deterministic randomness.
//!
//! There is no ambient RNG state. Every roll is a pure function of a seed
//! derived from the session seed plus the frame, entity and purpose of the
//! roll, so replays with the same seed and inputs reproduce every choice.

/// Source of seeded random numbers.
pub trait RngOracle: Send + Sync {
    fn next_u32(&self, seed: u64) -> u32;

    /// Uniform value in `[min, max]` inclusive.
    fn range(&self, seed: u64, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        min + self.next_u32(seed) % (max - min + 1)
    }

    /// Uniform value in `[0, 1)`.
    fn unit(&self, seed: u64) -> f32 {
        (self.next_u32(seed) >> 8) as f32 / (1u32 << 24) as f32
    }
}

/// PCG-XSH-RR: one LCG step followed by an xorshift and a data-dependent
/// rotation. 64-bit state, 32-bit output.
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    #[inline]
    fn output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        xorshifted.rotate_right((state >> 59) as u32)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::output(Self::step(seed))
    }
}

/// Purposes of a roll, mixed into the seed so two rolls on the same frame
/// for the same entity stay independent.
pub mod purpose {
    pub const WANDER_X: u32 = 1;
    pub const WANDER_Y: u32 = 2;
    pub const SKILL_OFFER: u32 = 3;
}

/// Mixes the session seed with a frame counter, an entity id and a purpose.
pub fn compute_seed(session_seed: u64, frame: u64, entity: u32, purpose: u32) -> u64 {
    let mut hash = session_seed;
    hash ^= frame.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (entity as u64).wrapping_mul(0x517cc1b727220a95);
    hash ^= (purpose as u64).wrapping_mul(0x85ebca6b);

    // SplitMix64 finaliser
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;
    hash
}
