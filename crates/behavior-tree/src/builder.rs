//! Shorthand constructors returning boxed nodes.
//!
//! `selector(vec![sequence(vec![condition(..), action(..)]), ..])` reads close
//! to the decision table it encodes.

use crate::{Action, Behavior, Condition, Selector, Sequence};

#[inline]
pub fn sequence<C: 'static>(children: Vec<Box<dyn Behavior<C>>>) -> Box<dyn Behavior<C>> {
    Box::new(Sequence::new(children))
}

#[inline]
pub fn selector<C: 'static>(children: Vec<Box<dyn Behavior<C>>>) -> Box<dyn Behavior<C>> {
    Box::new(Selector::new(children))
}

#[inline]
pub fn condition<C: 'static>(
    predicate: impl Fn(&C) -> bool + Send + Sync + 'static,
) -> Box<dyn Behavior<C>> {
    Box::new(Condition::new(predicate))
}

#[inline]
pub fn action<C: 'static>(
    effect: impl Fn(&mut C) -> bool + Send + Sync + 'static,
) -> Box<dyn Behavior<C>> {
    Box::new(Action::new(effect))
}
