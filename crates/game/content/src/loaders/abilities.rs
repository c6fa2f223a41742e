//! Ability template loader.

use std::path::Path;

use game_core::AbilityDefinition;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, parse_ron, read_file};

/// Ability list structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbilityCatalog {
    pub abilities: Vec<AbilityDefinition>,
}

/// Loader for `abilities.ron`.
pub struct AbilityLoader;

impl AbilityLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<AbilityDefinition>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<AbilityDefinition>> {
        let catalog: AbilityCatalog = parse_ron(content, "ability catalog")?;
        Ok(catalog.abilities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{AbilityId, StatusKind, TargetingRule};

    #[test]
    fn parses_rules_and_optional_fields() {
        let abilities = AbilityLoader::parse(
            r#"(
                abilities: [
                    (
                        id: 1,
                        name: "Cleave",
                        cooldown: 0.6,
                        effect: (base_damage: 18),
                        targeting: SingleNearest(range: 1.8),
                    ),
                    (
                        id: 2,
                        name: "Breath",
                        cooldown: 3.0,
                        cost: 10,
                        effect: (
                            base_damage: 14,
                            status: Some((kind: Burning, magnitude: 4, duration: 3.0)),
                        ),
                        targeting: Cone(range: 5.0, half_angle_degrees: 35.0),
                        ultimate: true,
                    ),
                ],
            )"#,
        )
        .unwrap();

        assert_eq!(abilities.len(), 2);
        assert_eq!(abilities[0].id, AbilityId(1));
        assert_eq!(abilities[0].cost, 0);
        assert!(!abilities[0].ultimate);
        assert_eq!(abilities[0].targeting, TargetingRule::SingleNearest { range: 1.8 });

        let status = abilities[1].effect.status.expect("status");
        assert_eq!(status.kind, StatusKind::Burning);
        assert!(!status.stackable);
        assert!(abilities[1].ultimate);
    }

    #[test]
    fn unknown_rule_is_a_parse_error() {
        let err = AbilityLoader::parse(
            r#"(abilities: [(id: 1, name: "x", cooldown: 1.0, effect: (), targeting: Everywhere)])"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("ability catalog"));
    }
}
