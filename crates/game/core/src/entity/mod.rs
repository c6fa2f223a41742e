//! Entities and their authored templates.
//!
//! Player, enemies and bosses share one [`Entity`] record. Behaviour differs
//! only through the controller attached to each entity and the capability
//! flags its template grants.

mod capability;
mod hero;
mod intent;
mod state;
mod template;

pub use capability::{Attacker, Capabilities, Damageable, DamageOutcome, Movable};
pub use hero::{HeroState, SkillDefinition, SkillEffect};
pub use intent::{AttackIntent, PlayerInput};
pub use state::{Entity, EntityKind, Loot};
pub use template::{BossPhaseDefinition, EnemyDefinition, HeroDefinition, PatrolPolicy};
