//! Hero and enemy template loader.

use std::path::Path;

use game_core::{EnemyDefinition, HeroDefinition};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, parse_ron, read_file};

/// `heroes.ron` structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeroRoster {
    pub heroes: Vec<HeroDefinition>,
}

/// `enemies.ron` structure. Bosses are enemies with phases.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bestiary {
    pub enemies: Vec<EnemyDefinition>,
}

/// Loader for playable heroes and hostile templates.
pub struct ActorLoader;

impl ActorLoader {
    pub fn load_heroes(path: &Path) -> LoadResult<Vec<HeroDefinition>> {
        let content = read_file(path)?;
        let roster: HeroRoster = parse_ron(&content, "hero roster")?;
        Ok(roster.heroes)
    }

    pub fn load_enemies(path: &Path) -> LoadResult<Vec<EnemyDefinition>> {
        let content = read_file(path)?;
        Self::parse_enemies(&content)
    }

    pub fn parse_enemies(content: &str) -> LoadResult<Vec<EnemyDefinition>> {
        let bestiary: Bestiary = parse_ron(content, "bestiary")?;
        for enemy in &bestiary.enemies {
            let thresholds: Vec<u32> = enemy.phases.iter().map(|p| p.health_percent).collect();
            if !thresholds.windows(2).all(|w| w[0] > w[1]) {
                anyhow::bail!(
                    "Boss {} ({}) phases must have strictly decreasing health thresholds",
                    enemy.name,
                    enemy.id
                );
            }
        }
        Ok(bestiary.enemies)
    }
}
