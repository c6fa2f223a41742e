use std::collections::BTreeMap;

use crate::ability::AbilityDefinition;
use crate::entity::{EnemyDefinition, HeroDefinition, SkillDefinition};
use crate::ids::{AbilityId, EnemyKindId, HeroId, ShopItemId, SkillId};
use crate::level::LevelDefinition;
use crate::session::ShopItem;

/// Lookup interface for authored content.
pub trait ContentOracle: Send + Sync {
    fn ability(&self, id: AbilityId) -> Option<&AbilityDefinition>;
    fn hero(&self, id: HeroId) -> Option<&HeroDefinition>;
    fn enemy(&self, id: EnemyKindId) -> Option<&EnemyDefinition>;
    fn skill(&self, id: SkillId) -> Option<&SkillDefinition>;
    fn shop_item(&self, id: ShopItemId) -> Option<&ShopItem>;
    fn level(&self, index: usize) -> Option<&LevelDefinition>;
    fn level_count(&self) -> usize;

    /// Every hero id, ascending.
    fn hero_ids(&self) -> Vec<HeroId>;

    /// Every skill id, ascending.
    fn skill_ids(&self) -> Vec<SkillId>;

    /// Every shop item id, ascending.
    fn shop_item_ids(&self) -> Vec<ShopItemId>;
}

/// In-memory content set keyed by id.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Catalog {
    abilities: BTreeMap<AbilityId, AbilityDefinition>,
    heroes: BTreeMap<HeroId, HeroDefinition>,
    enemies: BTreeMap<EnemyKindId, EnemyDefinition>,
    skills: BTreeMap<SkillId, SkillDefinition>,
    shop: BTreeMap<ShopItemId, ShopItem>,
    levels: Vec<LevelDefinition>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_ability(&mut self, def: AbilityDefinition) -> Option<AbilityDefinition> {
        self.abilities.insert(def.id, def)
    }

    pub fn insert_hero(&mut self, def: HeroDefinition) -> Option<HeroDefinition> {
        self.heroes.insert(def.id, def)
    }

    pub fn insert_enemy(&mut self, def: EnemyDefinition) -> Option<EnemyDefinition> {
        self.enemies.insert(def.id, def)
    }

    pub fn insert_skill(&mut self, def: SkillDefinition) -> Option<SkillDefinition> {
        self.skills.insert(def.id, def)
    }

    pub fn insert_shop_item(&mut self, item: ShopItem) -> Option<ShopItem> {
        self.shop.insert(item.id, item)
    }

    /// Appends a level; levels are played in insertion order.
    pub fn push_level(&mut self, level: LevelDefinition) {
        self.levels.push(level);
    }

    pub fn with_ability(mut self, def: AbilityDefinition) -> Self {
        self.insert_ability(def);
        self
    }

    pub fn with_hero(mut self, def: HeroDefinition) -> Self {
        self.insert_hero(def);
        self
    }

    pub fn with_enemy(mut self, def: EnemyDefinition) -> Self {
        self.insert_enemy(def);
        self
    }

    pub fn with_skill(mut self, def: SkillDefinition) -> Self {
        self.insert_skill(def);
        self
    }

    pub fn with_shop_item(mut self, item: ShopItem) -> Self {
        self.insert_shop_item(item);
        self
    }

    pub fn with_level(mut self, level: LevelDefinition) -> Self {
        self.push_level(level);
        self
    }

    pub fn levels(&self) -> &[LevelDefinition] {
        &self.levels
    }
}

impl ContentOracle for Catalog {
    fn ability(&self, id: AbilityId) -> Option<&AbilityDefinition> {
        self.abilities.get(&id)
    }

    fn hero(&self, id: HeroId) -> Option<&HeroDefinition> {
        self.heroes.get(&id)
    }

    fn enemy(&self, id: EnemyKindId) -> Option<&EnemyDefinition> {
        self.enemies.get(&id)
    }

    fn skill(&self, id: SkillId) -> Option<&SkillDefinition> {
        self.skills.get(&id)
    }

    fn shop_item(&self, id: ShopItemId) -> Option<&ShopItem> {
        self.shop.get(&id)
    }

    fn level(&self, index: usize) -> Option<&LevelDefinition> {
        self.levels.get(index)
    }

    fn level_count(&self) -> usize {
        self.levels.len()
    }

    fn hero_ids(&self) -> Vec<HeroId> {
        self.heroes.keys().copied().collect()
    }

    fn skill_ids(&self) -> Vec<SkillId> {
        self.skills.keys().copied().collect()
    }

    fn shop_item_ids(&self) -> Vec<ShopItemId> {
        self.shop.keys().copied().collect()
    }
}
