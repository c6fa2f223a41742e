//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from content loading, scene transitions and repositories so
//! clients can bubble them up with consistent context.

use thiserror::Error;

use game_core::{ShopError, TransitionError};

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("runtime requires content to be configured before building")]
    MissingContent,

    #[error("failed to load content: {0}")]
    Content(String),

    #[error(transparent)]
    Transition(#[from] TransitionError),

    #[error(transparent)]
    Shop(#[from] ShopError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
