//! Types downstream clients interact with.

mod errors;
mod providers;

pub use errors::{RepositoryError, Result, RuntimeError};
pub use providers::{Autopilot, IdleInput, InputSource, ScriptedInput};
