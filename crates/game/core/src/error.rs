//! Common error infrastructure for game-core.
//!
//! Domain errors (`AbilityError`, `TransitionError`, `LevelDataError`, ...) live
//! next to the modules that raise them and implement [`GameError`] so callers
//! can classify failures without matching every variant.
//!
//! Per-tick combat failures are always [`ErrorSeverity::Recoverable`]: the
//! combat loop absorbs them. Only malformed authored content is
//! [`ErrorSeverity::Fatal`].

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Temporary condition; the same request may succeed on a later tick.
    ///
    /// Examples: ability on cooldown, not enough energy.
    Recoverable,

    /// Invalid request; rejected without changing state.
    ///
    /// Examples: dead target, illegal scene transition.
    Validation,

    /// Unexpected state inconsistency that indicates a bug.
    Internal,

    /// Content or state is unusable; the current flow must abort.
    ///
    /// Examples: door pointing at a missing room.
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Fatal)
    }
}

/// Common trait for all game-core errors.
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Stable identifier for metrics, logs and tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
