//! Skill pick loader.

use std::path::Path;

use game_core::SkillDefinition;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, parse_ron, read_file};

/// `skills.ron` structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillCatalog {
    pub skills: Vec<SkillDefinition>,
}

pub struct SkillLoader;

impl SkillLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<SkillDefinition>> {
        let content = read_file(path)?;
        let catalog: SkillCatalog = parse_ron(&content, "skill catalog")?;
        Ok(catalog.skills)
    }
}
