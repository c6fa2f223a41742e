//! Read-only content access.
//!
//! Simulation code never owns authored data. It asks a [`ContentOracle`] for
//! ability, entity, skill, shop and level definitions by id. [`Catalog`] is the
//! in-memory implementation the content loaders fill.

mod catalog;
mod rng;

pub use catalog::{Catalog, ContentOracle};
pub use rng::{PcgRng, RngOracle, compute_seed, purpose};
