//! Shop stock loader.

use std::path::Path;

use game_core::ShopItem;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, parse_ron, read_file};

/// Shop stock structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopCatalog {
    pub items: Vec<ShopItem>,
}

/// Loader for `shop.ron`.
pub struct ShopLoader;

impl ShopLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<ShopItem>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<ShopItem>> {
        let catalog: ShopCatalog = parse_ron(content, "shop catalog")?;
        if let Some(free) = catalog.items.iter().find(|item| item.price == 0) {
            anyhow::bail!("Shop item {} ({}) has no price", free.name, free.id);
        }
        Ok(catalog.items)
    }
}
