//! Ability and attack definitions plus the generic resolver.
//!
//! Definitions are immutable template data owned by the content catalog.
//! Runtime use never mutates them; per-entity state lives in
//! [`CooldownState`](crate::stats::CooldownState) and resource pools.

mod definition;
mod error;
mod resolver;
mod targeting;

pub use definition::{AbilityDefinition, EffectSpec, TargetingRule};
pub use error::AbilityError;
pub use resolver::{EffectApplication, Resolution, Resolver, apply_effect, compute_damage};
pub use targeting::{TargetCandidate, select_targets};
