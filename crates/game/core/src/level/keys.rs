//! Keys and door requirements.

use std::collections::BTreeSet;

use crate::ids::KeyId;

/// What a key pickup grants.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum KeyGrant {
    /// Counts toward `KeyRequirement::Count`.
    Generic,
    /// Opens doors requiring this key id.
    Specific(KeyId),
}

/// Condition for unlocking a door.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum KeyRequirement {
    /// Unlocks as soon as the room is cleared.
    #[default]
    None,
    /// Needs at least this many generic keys.
    Count(u32),
    /// Needs one specific key.
    Specific(KeyId),
}

/// Keys held by the hero during one level.
///
/// Keys are consumed when they open a door and are cleared between levels.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KeyRing {
    generic: u32,
    named: BTreeSet<KeyId>,
}

impl KeyRing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grant(&mut self, key: KeyGrant) {
        match key {
            KeyGrant::Generic => self.generic = self.generic.saturating_add(1),
            KeyGrant::Specific(id) => {
                self.named.insert(id);
            }
        }
    }

    pub fn generic_count(&self) -> u32 {
        self.generic
    }

    pub fn has(&self, id: KeyId) -> bool {
        self.named.contains(&id)
    }

    /// Total keys held, generic and named.
    pub fn total(&self) -> u32 {
        self.generic + self.named.len() as u32
    }

    pub fn satisfies(&self, requirement: KeyRequirement) -> bool {
        match requirement {
            KeyRequirement::None => true,
            KeyRequirement::Count(n) => self.generic >= n,
            KeyRequirement::Specific(id) => self.has(id),
        }
    }

    /// Spends the keys `requirement` asks for. Returns false (and spends
    /// nothing) if the ring does not satisfy it.
    pub fn consume(&mut self, requirement: KeyRequirement) -> bool {
        if !self.satisfies(requirement) {
            return false;
        }
        match requirement {
            KeyRequirement::None => {}
            KeyRequirement::Count(n) => self.generic -= n,
            KeyRequirement::Specific(id) => {
                self.named.remove(&id);
            }
        }
        true
    }

    pub fn clear(&mut self) {
        self.generic = 0;
        self.named.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_requirement_consumes_generic_keys() {
        let mut ring = KeyRing::new();
        assert!(!ring.consume(KeyRequirement::Count(1)));

        ring.grant(KeyGrant::Generic);
        ring.grant(KeyGrant::Generic);
        assert!(ring.consume(KeyRequirement::Count(1)));
        assert_eq!(ring.generic_count(), 1);
    }

    #[test]
    fn specific_key_only_opens_matching_requirement() {
        let mut ring = KeyRing::new();
        ring.grant(KeyGrant::Specific(KeyId(4)));

        assert!(!ring.satisfies(KeyRequirement::Specific(KeyId(5))));
        assert!(!ring.satisfies(KeyRequirement::Count(1)));
        assert!(ring.consume(KeyRequirement::Specific(KeyId(4))));
        assert_eq!(ring.total(), 0);
    }
}
