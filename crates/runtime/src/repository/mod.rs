//! Repository adapters for persisting progression.
//!
//! - [`ProgressRepository`]: load/save contract
//! - [`FileProgressRepository`]: JSON on disk with atomic replace
//! - [`InMemoryProgressRepository`]: tests and throwaway runs

mod error;
mod file;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::FileProgressRepository;
pub use memory::InMemoryProgressRepository;
pub use traits::ProgressRepository;
