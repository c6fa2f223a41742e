//! Ability resolution errors.
//!
//! All of these are non-fatal: the combat loop treats a failed cast as a no-op
//! for that tick.

use crate::error::{ErrorSeverity, GameError};
use crate::ids::{AbilityId, EntityId};
use crate::stats::ResourceKind;

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum AbilityError {
    /// Cooldown has not finished.
    #[error("{ability} not ready ({remaining:.2}s remaining)")]
    NotReady { ability: AbilityId, remaining: f32 },

    /// Not enough energy (or another pool) to pay the cost.
    #[error("insufficient {kind}: requested {requested}, available {available}")]
    InsufficientResource {
        kind: ResourceKind,
        requested: u32,
        available: u32,
    },

    /// Ultimate charge is below maximum.
    #[error("ultimate not charged ({current}/{maximum})")]
    UltimateNotCharged { current: u32, maximum: u32 },

    /// Explicit target is dead, missing, or out of range.
    #[error("invalid target {0}")]
    InvalidTarget(EntityId),

    /// Caster does not carry this ability or the catalog has no definition.
    #[error("unknown ability {0}")]
    UnknownAbility(AbilityId),

    /// Caster is dead or stunned.
    #[error("caster {0} cannot act")]
    CasterIncapacitated(EntityId),
}

impl GameError for AbilityError {
    fn severity(&self) -> ErrorSeverity {
        use AbilityError::*;
        match self {
            NotReady { .. } | InsufficientResource { .. } | UltimateNotCharged { .. } => {
                ErrorSeverity::Recoverable
            }
            CasterIncapacitated(_) => ErrorSeverity::Recoverable,
            InvalidTarget(_) | UnknownAbility(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use AbilityError::*;
        match self {
            NotReady { .. } => "ABILITY_NOT_READY",
            InsufficientResource { .. } => "ABILITY_INSUFFICIENT_RESOURCE",
            UltimateNotCharged { .. } => "ABILITY_ULTIMATE_NOT_CHARGED",
            InvalidTarget(_) => "ABILITY_INVALID_TARGET",
            UnknownAbility(_) => "ABILITY_UNKNOWN",
            CasterIncapacitated(_) => "ABILITY_CASTER_INCAPACITATED",
        }
    }
}
