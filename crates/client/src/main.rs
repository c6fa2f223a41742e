//! Headless game client.
//!
//! Loads content, restores progression and lets the autopilot play a run
//! through the runtime frame loop. Configured through environment variables
//! (see [`config::ClientConfig::from_env`]); a `.env` file is honoured.
//!
//! ```bash
//! DUNGEON_HERO=2 DUNGEON_REALTIME=false cargo run -p dungeon-client
//! ```
mod config;
mod logging;

use std::sync::Arc;

use anyhow::{Context, Result};
use runtime::{Autopilot, FileProgressRepository, Runtime, RuntimeConfig};

use crate::config::ClientConfig;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = ClientConfig::from_env();
    let _guard = logging::setup_logging(&config)?;

    tracing::info!("Starting Dungeon client");
    tracing::info!("Content: {}", config.data_dir.display());
    tracing::info!("Hero: {}", config.hero);

    let save_dir = match &config.save_dir {
        Some(dir) => dir.clone(),
        None => FileProgressRepository::default_dir()?,
    };
    let repository = FileProgressRepository::new(&save_dir)
        .with_context(|| format!("failed to open save directory {}", save_dir.display()))?;

    let runtime_config = RuntimeConfig {
        frame_rate: config.frame_rate,
        realtime: config.realtime,
        ..RuntimeConfig::default()
    };
    let mut runtime = Runtime::builder()
        .config(runtime_config)
        .data_dir(&config.data_dir)?
        .repository(Arc::new(repository))
        .build()?;

    let mut pilot = Autopilot::new(config.hero, runtime.content());
    let summary = runtime.run(&mut pilot, config.max_frames).await?;

    tracing::info!(
        frames = summary.frames,
        scene = %summary.scene,
        level = summary.level_index + 1,
        score = summary.score,
        best_score = runtime.session().progress().best_score,
        "Run finished"
    );
    Ok(())
}
