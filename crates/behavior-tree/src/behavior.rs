//! Core behavior trait.

use crate::Status;

/// A node evaluated against a caller-defined context `C`.
///
/// The context is the blackboard: conditions read it, actions write their
/// decision into it. Nodes themselves hold no per-frame state, which keeps a
/// tree shareable between every entity that uses the same policy.
pub trait Behavior<C>: Send + Sync {
    /// Evaluate this node for the current frame.
    fn tick(&self, ctx: &mut C) -> Status;
}

impl<C> Behavior<C> for Box<dyn Behavior<C>> {
    #[inline]
    fn tick(&self, ctx: &mut C) -> Status {
        (**self).tick(ctx)
    }
}
