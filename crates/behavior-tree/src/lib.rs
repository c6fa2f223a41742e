//! Small deterministic behavior tree library evaluated once per simulation frame.
//!
//! Trees are re-evaluated from the root on every frame. There is no `Running`
//! status: a node either succeeds or fails within the frame it is ticked, and
//! long-lived behavior (chasing, patrolling) is expressed by the caller writing
//! a fresh decision into its context every frame.
//!
//! - [`Behavior`]: Core trait for all nodes
//! - [`Status`]: Success or Failure
//! - Composite nodes: [`Sequence`], [`Selector`]
//! - Leaf nodes: [`Condition`], [`Action`]

pub mod behavior;
pub mod builder;
pub mod composite;
pub mod leaf;
pub mod status;

pub use behavior::Behavior;
pub use composite::{Selector, Sequence};
pub use leaf::{Action, Condition};
pub use status::Status;
