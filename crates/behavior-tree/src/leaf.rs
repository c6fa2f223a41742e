//! Closure-backed leaf nodes.
//!
//! Most game policies only need "check something" and "decide something"
//! leaves. Wrapping closures avoids a struct + impl per leaf.

use crate::{Behavior, Status};

type Predicate<C> = Box<dyn Fn(&C) -> bool + Send + Sync>;
type Effect<C> = Box<dyn Fn(&mut C) -> bool + Send + Sync>;

/// Read-only check; succeeds when the predicate holds.
pub struct Condition<C> {
    predicate: Predicate<C>,
}

impl<C> Condition<C> {
    pub fn new(predicate: impl Fn(&C) -> bool + Send + Sync + 'static) -> Self {
        Self {
            predicate: Box::new(predicate),
        }
    }
}

impl<C> Behavior<C> for Condition<C> {
    fn tick(&self, ctx: &mut C) -> Status {
        Status::from_bool((self.predicate)(ctx))
    }
}

/// Writes a decision into the context; succeeds when the closure returns `true`.
pub struct Action<C> {
    effect: Effect<C>,
}

impl<C> Action<C> {
    pub fn new(effect: impl Fn(&mut C) -> bool + Send + Sync + 'static) -> Self {
        Self {
            effect: Box::new(effect),
        }
    }
}

impl<C> Behavior<C> for Action<C> {
    fn tick(&self, ctx: &mut C) -> Status {
        Status::from_bool((self.effect)(ctx))
    }
}
