//! Content factory for building a catalog from data files.

use std::path::{Path, PathBuf};

use game_core::level::validate_level;
use game_core::{
    AbilityDefinition, Catalog, EnemyDefinition, GameConfig, HeroDefinition, LevelDefinition,
    ShopItem, SkillDefinition,
};

use crate::loaders::{
    AbilityLoader, ActorLoader, ConfigLoader, LevelLoader, LoadResult, ShopLoader, SkillLoader,
};

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── abilities.ron
/// ├── heroes.ron
/// ├── enemies.ron
/// ├── skills.ron
/// ├── shop.ron
/// └── levels/
///     ├── 01_catacombs.ron
///     └── 02_drake_nest.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load game configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        ConfigLoader::load(&self.data_dir.join("config.toml"))
    }

    pub fn load_abilities(&self) -> LoadResult<Vec<AbilityDefinition>> {
        AbilityLoader::load(&self.data_dir.join("abilities.ron"))
    }

    pub fn load_heroes(&self) -> LoadResult<Vec<HeroDefinition>> {
        ActorLoader::load_heroes(&self.data_dir.join("heroes.ron"))
    }

    pub fn load_enemies(&self) -> LoadResult<Vec<EnemyDefinition>> {
        ActorLoader::load_enemies(&self.data_dir.join("enemies.ron"))
    }

    pub fn load_skills(&self) -> LoadResult<Vec<SkillDefinition>> {
        SkillLoader::load(&self.data_dir.join("skills.ron"))
    }

    /// Shop stock from `shop.ron`. A missing file means an empty shop.
    pub fn load_shop(&self) -> LoadResult<Vec<ShopItem>> {
        let path = self.data_dir.join("shop.ron");
        if !path.exists() {
            return Ok(Vec::new());
        }
        ShopLoader::load(&path)
    }

    /// Levels from `levels/`, in play order.
    pub fn load_levels(&self) -> LoadResult<Vec<LevelDefinition>> {
        LevelLoader::load_dir(&self.data_dir.join("levels"))
    }

    /// Loads every content file into one [`Catalog`].
    ///
    /// Duplicate ids are rejected here. Level references are not checked;
    /// the session validates each level when it is entered. Call
    /// [`ContentFactory::validate`] to check them up front.
    pub fn load_catalog(&self) -> LoadResult<Catalog> {
        let mut catalog = Catalog::new();

        for ability in self.load_abilities()? {
            let id = ability.id;
            if catalog.insert_ability(ability).is_some() {
                anyhow::bail!("Duplicate {} in abilities.ron", id);
            }
        }
        for hero in self.load_heroes()? {
            let id = hero.id;
            if catalog.insert_hero(hero).is_some() {
                anyhow::bail!("Duplicate {} in heroes.ron", id);
            }
        }
        for enemy in self.load_enemies()? {
            let id = enemy.id;
            if catalog.insert_enemy(enemy).is_some() {
                anyhow::bail!("Duplicate {} in enemies.ron", id);
            }
        }
        for skill in self.load_skills()? {
            let id = skill.id;
            if catalog.insert_skill(skill).is_some() {
                anyhow::bail!("Duplicate {} in skills.ron", id);
            }
        }
        for item in self.load_shop()? {
            let id = item.id;
            if catalog.insert_shop_item(item).is_some() {
                anyhow::bail!("Duplicate {} in shop.ron", id);
            }
        }
        for level in self.load_levels()? {
            catalog.push_level(level);
        }

        Ok(catalog)
    }

    /// Checks every level's references against the catalog and that hero
    /// ability slots resolve.
    pub fn validate(catalog: &Catalog) -> LoadResult<()> {
        use game_core::ContentOracle;

        for (index, level) in catalog.levels().iter().enumerate() {
            validate_level(level, catalog)
                .map_err(|e| anyhow::anyhow!("Level {} ({}) is invalid: {}", index, level.name, e))?;
        }
        for id in catalog.hero_ids() {
            let Some(hero) = catalog.hero(id) else {
                continue;
            };
            for ability in hero.abilities.iter().chain(hero.ultimate.iter()) {
                if catalog.ability(*ability).is_none() {
                    anyhow::bail!("Hero {} ({}) uses unknown {}", hero.name, id, ability);
                }
            }
        }
        Ok(())
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
