//! Deterministic simulation for a real-time, room-based action roguelike.
//!
//! `game-core` owns the rules: stat/timer primitives, the ability resolver,
//! entity controllers, the per-room combat loop, key/door progression and the
//! session scene machine. It performs no I/O and reads no clocks. Callers
//! drive it with frame deltas and input, and observe it through
//! [`GameEvent`]s and [`WorldSnapshot`]s.
//!
//! Identical configs, content, deltas and inputs always produce identical
//! state.
pub mod ability;
pub mod combat;
pub mod config;
pub mod controller;
pub mod entity;
pub mod env;
pub mod error;
pub mod event;
pub mod geometry;
pub mod ids;
pub mod level;
pub mod session;
pub mod stats;

pub use ability::{AbilityDefinition, AbilityError, EffectSpec, Resolver, TargetingRule};
pub use combat::{CombatLoop, RoomPhase};
pub use config::GameConfig;
pub use controller::{BossController, Controller, EnemyController, PlayerController};
pub use entity::{
    Attacker, BossPhaseDefinition, Damageable, EnemyDefinition, Entity, EntityKind,
    HeroDefinition, Movable, PatrolPolicy, PlayerInput, SkillDefinition, SkillEffect,
};
pub use env::{Catalog, ContentOracle, PcgRng, RngOracle, compute_seed};
pub use error::{ErrorSeverity, GameError};
pub use event::{EventCategory, EventQueue, GameEvent};
pub use geometry::{Rect, Vec2};
pub use ids::{
    AbilityId, DoorId, EnemyKindId, EntityId, HeroId, KeyId, RoomId, ShopItemId, SkillId,
};
pub use level::{
    DoorDefinition, DoorPassage, EnemySpawn, KeyGrant, KeyRequirement, KeySpawn,
    LevelDataError, LevelDefinition, LevelRun, RoomDefinition,
};
pub use session::{
    ProgressSnapshot, Scene, SceneRequest, Session, ShopError, ShopItem, TransitionError,
    WorldSnapshot,
};
pub use stats::{ResourcePool, StatusKind, StatusSpec};
