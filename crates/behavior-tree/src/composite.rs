//! Composite nodes: [`Sequence`] (AND) and [`Selector`] (OR).

use crate::{Behavior, Status};

/// Ticks children left to right and stops at the first `Failure`.
///
/// Returns `Success` only if every child succeeded.
pub struct Sequence<C> {
    children: Vec<Box<dyn Behavior<C>>>,
}

impl<C> Sequence<C> {
    /// # Panics
    ///
    /// Panics if `children` is empty.
    pub fn new(children: Vec<Box<dyn Behavior<C>>>) -> Self {
        assert!(!children.is_empty(), "Sequence must have at least one child");
        Self { children }
    }
}

impl<C> Behavior<C> for Sequence<C> {
    fn tick(&self, ctx: &mut C) -> Status {
        for child in &self.children {
            if child.tick(ctx).is_failure() {
                return Status::Failure;
            }
        }
        Status::Success
    }
}

/// Ticks children left to right and stops at the first `Success`.
///
/// Returns `Failure` only if every child failed. Child order is priority
/// order, which is what makes AI policies deterministic.
pub struct Selector<C> {
    children: Vec<Box<dyn Behavior<C>>>,
}

impl<C> Selector<C> {
    /// # Panics
    ///
    /// Panics if `children` is empty.
    pub fn new(children: Vec<Box<dyn Behavior<C>>>) -> Self {
        assert!(!children.is_empty(), "Selector must have at least one child");
        Self { children }
    }
}

impl<C> Behavior<C> for Selector<C> {
    fn tick(&self, ctx: &mut C) -> Status {
        for child in &self.children {
            if child.tick(ctx).is_success() {
                return Status::Success;
            }
        }
        Status::Failure
    }
}
