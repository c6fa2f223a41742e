//! Client configuration read from the environment.
use std::env;
use std::path::PathBuf;

use game_core::HeroId;

/// Headless client settings.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Content directory with `config.toml`, catalogs and `levels/`.
    pub data_dir: PathBuf,
    pub hero: HeroId,
    pub frame_rate: u32,
    /// Stop after this many frames even if the run has not ended.
    pub max_frames: Option<u64>,
    /// Hold the frame rate in wall-clock time.
    pub realtime: bool,
    /// Where progression is stored. `None` uses the platform data dir.
    pub save_dir: Option<PathBuf>,
    /// Where log files go. `None` uses the platform cache dir.
    pub log_dir: Option<PathBuf>,
    pub session_id: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            data_dir: game_content::bundled_data_dir(),
            hero: HeroId(1),
            frame_rate: runtime::RuntimeConfig::DEFAULT_FRAME_RATE,
            max_frames: None,
            realtime: true,
            save_dir: None,
            log_dir: None,
            session_id: None,
        }
    }
}

impl ClientConfig {
    /// Construct configuration from environment variables.
    ///
    /// Environment variables:
    /// - `DUNGEON_DATA_DIR` - content directory (default: bundled data)
    /// - `DUNGEON_HERO` - hero id to play (default: 1)
    /// - `DUNGEON_FRAME_RATE` - simulation frames per second (default: 60)
    /// - `DUNGEON_MAX_FRAMES` - frame limit (default: none)
    /// - `DUNGEON_REALTIME` - pace frames in wall-clock time (default: true)
    /// - `DUNGEON_SAVE_DIR` - progression directory
    /// - `DUNGEON_LOG_DIR` - log directory
    /// - `DUNGEON_SESSION` - session name used for the log subdirectory
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(dir) = read_env::<PathBuf>("DUNGEON_DATA_DIR") {
            config.data_dir = dir;
        }
        if let Some(hero) = read_env::<u16>("DUNGEON_HERO") {
            config.hero = HeroId(hero);
        }
        if let Some(rate) = read_env::<u32>("DUNGEON_FRAME_RATE") {
            config.frame_rate = rate.max(1);
        }
        config.max_frames = read_env("DUNGEON_MAX_FRAMES");
        if let Some(realtime) = read_env::<bool>("DUNGEON_REALTIME") {
            config.realtime = realtime;
        }
        config.save_dir = read_env("DUNGEON_SAVE_DIR");
        config.log_dir = read_env("DUNGEON_LOG_DIR");
        config.session_id = env::var("DUNGEON_SESSION").ok();

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
