//! Level layout loader.
//!
//! Each level lives in its own RON file under `levels/`. Files are played in
//! file-name order, so authors prefix them (`01_catacombs.ron`, ...).

use std::path::{Path, PathBuf};

use game_core::LevelDefinition;

use crate::loaders::{LoadResult, parse_ron, read_file};

pub struct LevelLoader;

impl LevelLoader {
    pub fn load(path: &Path) -> LoadResult<LevelDefinition> {
        let content = read_file(path)?;
        parse_ron(&content, &format!("level {}", path.display()))
    }

    /// Loads every `*.ron` file in `dir`, sorted by file name.
    pub fn load_dir(dir: &Path) -> LoadResult<Vec<LevelDefinition>> {
        let entries = std::fs::read_dir(dir)
            .map_err(|e| anyhow::anyhow!("Failed to read level directory {}: {}", dir.display(), e))?;

        let mut paths: Vec<PathBuf> = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "ron") {
                paths.push(path);
            }
        }
        paths.sort();

        if paths.is_empty() {
            anyhow::bail!("No level files found in {}", dir.display());
        }
        paths.iter().map(|path| Self::load(path)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROOM: &str = r#"(
        name: "{name}",
        rooms: [(
            id: 1,
            bounds: (x: 0.0, y: 0.0, width: 10.0, height: 10.0),
            player_start: (x: 1.0, y: 5.0),
            spawns: [(enemy: 1, position: (x: 8.0, y: 5.0), drop: Some(Specific(4)))],
        )],
        start_room: 1,
        boss_room: 1,
    )"#;

    #[test]
    fn directory_is_loaded_in_file_name_order() {
        let dir = tempfile::tempdir().unwrap();
        for (file, name) in [("02_b.ron", "second"), ("01_a.ron", "first"), ("notes.txt", "skip")] {
            std::fs::write(dir.path().join(file), ROOM.replace("{name}", name)).unwrap();
        }

        let levels = LevelLoader::load_dir(dir.path()).unwrap();
        let names: Vec<_> = levels.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, ["first", "second"]);
        assert!(levels[0].rooms[0].walls.is_empty());
        assert_eq!(
            levels[0].rooms[0].spawns[0].drop,
            Some(game_core::KeyGrant::Specific(game_core::KeyId(4)))
        );
    }

    #[test]
    fn empty_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = LevelLoader::load_dir(dir.path()).unwrap_err();
        assert!(err.to_string().contains("No level files"));
    }

    #[test]
    fn parse_errors_name_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("01_bad.ron");
        std::fs::write(&path, "(name: \"x\", rooms: [)").unwrap();
        let err = LevelLoader::load(&path).unwrap_err();
        assert!(err.to_string().contains("01_bad.ron"));
    }
}
