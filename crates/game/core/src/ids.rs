//! Identifier newtypes.
//!
//! Runtime entities get an [`EntityId`] from an allocator; authored content is
//! referenced by small numeric ids so definitions stay `Copy` and ordered.

use std::fmt;

/// Unique identifier for a live entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityId(pub u32);

impl EntityId {
    /// Reserved identifier for the hero. Never reassigned for the lifetime of a session.
    pub const PLAYER: Self = Self(0);

    #[inline]
    pub const fn is_player(self) -> bool {
        self.0 == Self::PLAYER.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonic entity id allocator. Ids are never reused within a level run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntityIdAllocator {
    next: u32,
}

impl EntityIdAllocator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    pub fn allocate(&mut self) -> EntityId {
        let id = EntityId(self.next);
        self.next = self.next.wrapping_add(1).max(1);
        id
    }
}

impl Default for EntityIdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

macro_rules! content_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct $name(pub u16);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }
    };
}

content_id!(
    /// Ability/attack definition id.
    AbilityId,
    "ability:"
);
content_id!(
    /// Playable hero definition id.
    HeroId,
    "hero:"
);
content_id!(
    /// Enemy or boss template id.
    EnemyKindId,
    "enemy:"
);
content_id!(
    /// Room id, unique within a level.
    RoomId,
    "room:"
);
content_id!(
    /// Door id, unique within a level.
    DoorId,
    "door:"
);
content_id!(
    /// Named key id for doors that need one specific key.
    KeyId,
    "key:"
);
content_id!(SkillId, "skill:");
content_id!(ShopItemId, "item:");
