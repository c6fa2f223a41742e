//! Runtime orchestration for the deterministic game simulation.
//!
//! This crate wires a [`game_core::Session`] to input sources, the content
//! catalog, an event bus and progression storage. Consumers embed [`Runtime`]
//! to drive frames, subscribe to events, and persist progress between runs.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`repository`] persists progression snapshots
pub mod api;
pub mod events;
pub mod repository;
pub mod runtime;

pub use api::{Autopilot, IdleInput, InputSource, Result, RuntimeError, ScriptedInput};
pub use events::{Event, EventBus, Topic};
pub use repository::{
    FileProgressRepository, InMemoryProgressRepository, ProgressRepository, RepositoryError,
};
pub use runtime::{RunSummary, Runtime, RuntimeBuilder, RuntimeConfig};
