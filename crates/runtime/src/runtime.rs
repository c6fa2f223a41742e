//! High-level runtime orchestrator.
//!
//! The runtime owns the [`Session`], shares the content catalog, fans events
//! out through the [`EventBus`] and persists progression when a run ends. It
//! exposes a builder-based API for clients to drive the simulation.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::time::MissedTickBehavior;

use game_content::ContentFactory;
use game_core::{
    ContentOracle, DoorId, DoorPassage, GameConfig, GameEvent, PlayerInput, ProgressSnapshot,
    Scene, SceneRequest, Session, ShopItemId, WorldSnapshot,
};

use crate::api::{InputSource, Result, RuntimeError};
use crate::events::{Event, EventBus, Topic, log_event};
use crate::repository::{InMemoryProgressRepository, ProgressRepository};

/// Runtime configuration shared across the orchestrator and the frame loop.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub game_config: GameConfig,
    /// Simulation frames per second. Also the fixed frame delta.
    pub frame_rate: u32,
    /// Sleep between frames to hold `frame_rate` in wall-clock time.
    /// Disable for tests and headless replays.
    pub realtime: bool,
    pub event_buffer_size: usize,
}

impl RuntimeConfig {
    pub const DEFAULT_FRAME_RATE: u32 = 60;

    /// Fixed simulation step in seconds.
    pub fn frame_delta(&self) -> f32 {
        1.0 / self.frame_rate.max(1) as f32
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game_config: GameConfig::default(),
            frame_rate: Self::DEFAULT_FRAME_RATE,
            realtime: true,
            event_buffer_size: 256,
        }
    }
}

/// Outcome of [`Runtime::run`].
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub frames: u64,
    pub scene: Scene,
    pub level_index: usize,
    pub score: u32,
}

/// Main runtime that drives a session frame by frame.
pub struct Runtime {
    config: RuntimeConfig,
    session: Session,
    content: Arc<dyn ContentOracle>,
    event_bus: EventBus,
    repository: Arc<dyn ProgressRepository>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn content(&self) -> Arc<dyn ContentOracle> {
        Arc::clone(&self.content)
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        self.session.snapshot()
    }

    /// Cloneable handle to the event bus.
    pub fn event_bus(&self) -> EventBus {
        self.event_bus.clone()
    }

    /// Subscribe to one event topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Applies a scene request. Rejected requests are logged and returned;
    /// the session is left unchanged.
    pub fn request(&mut self, request: SceneRequest) -> Result<()> {
        let result = self.session.request(request, self.content.as_ref());
        if let Err(err) = &result {
            tracing::warn!(%request, scene = %self.session.scene(), "request rejected: {}", err);
        }
        self.flush()?;
        result.map_err(RuntimeError::from)
    }

    /// Explicitly walks through a door of the active room.
    pub fn pass_door(&mut self, door: DoorId) -> Result<DoorPassage> {
        let passage = self.session.pass_door(door, self.content.as_ref());
        if passage == DoorPassage::Blocked {
            tracing::debug!(%door, "door is closed");
        }
        self.flush()?;
        Ok(passage)
    }

    /// Buys a shop item.
    pub fn purchase(&mut self, item: ShopItemId) -> Result<()> {
        let result = self.session.purchase(item, self.content.as_ref());
        if let Err(err) = &result {
            tracing::warn!(%item, "purchase failed: {}", err);
        }
        self.flush()?;
        result.map_err(RuntimeError::from)
    }

    /// Executes a single frame and returns the events it produced.
    pub fn step(&mut self, dt: f32, input: PlayerInput) -> Result<Vec<GameEvent>> {
        let events = self.session.tick(dt, input, self.content.as_ref());
        self.dispatch(&events)?;
        Ok(events)
    }

    /// Runs the frame loop until the session reaches a terminal scene or
    /// `max_frames` frames have been simulated.
    ///
    /// Before each frame the source may issue a scene request; during
    /// `Playing` it supplies the frame's input.
    pub async fn run(&mut self, source: &mut dyn InputSource, max_frames: Option<u64>) -> Result<RunSummary> {
        let dt = self.config.frame_delta();
        let mut interval = tokio::time::interval(Duration::from_secs_f32(dt));
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        tracing::info!(
            frame_rate = self.config.frame_rate,
            realtime = self.config.realtime,
            ?max_frames,
            "Runtime loop started"
        );

        let mut frames = 0u64;
        while max_frames.is_none_or(|max| frames < max) {
            if self.config.realtime {
                interval.tick().await;
            } else {
                tokio::task::yield_now().await;
            }

            let snapshot = self.session.snapshot();
            if let Some(request) = source.decide(&snapshot) {
                match self.request(request) {
                    // Rejections are logged in `request`; the source retries next frame.
                    Ok(()) | Err(RuntimeError::Transition(_)) => {}
                    Err(err) => return Err(err),
                }
            }
            if self.session.scene().is_terminal() {
                break;
            }

            let input = if self.session.scene() == Scene::Playing {
                source.next_input(&self.session.snapshot()).await
            } else {
                PlayerInput::idle()
            };
            self.step(dt, input)?;
            frames += 1;

            if self.session.scene().is_terminal() {
                break;
            }
        }

        let snapshot = self.session.snapshot();
        let summary = RunSummary {
            frames,
            scene: snapshot.scene,
            level_index: snapshot.level_index,
            score: snapshot.score,
        };
        tracing::info!(?summary, "Runtime loop finished");
        Ok(summary)
    }

    /// Publishes events buffered by requests outside of a tick.
    fn flush(&mut self) -> Result<()> {
        let events = self.session.drain_events();
        self.dispatch(&events)
    }

    fn dispatch(&mut self, events: &[GameEvent]) -> Result<()> {
        let frame = self.session.frame();
        let mut run_ended = false;
        for event in events {
            log_event(frame, event);
            if let GameEvent::SceneChanged { to: Scene::GameOver | Scene::Victory, .. } = event {
                run_ended = true;
            }
            self.event_bus.publish(Event {
                frame,
                event: event.clone(),
            });
        }

        if run_ended {
            self.persist()?;
        }
        Ok(())
    }

    fn persist(&self) -> Result<()> {
        let progress = self.session.progress();
        self.repository.save(progress)?;
        tracing::debug!(
            best_score = progress.best_score,
            level_index = progress.level_index,
            "progress persisted"
        );
        Ok(())
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    content: Option<Arc<dyn ContentOracle>>,
    repository: Option<Arc<dyn ProgressRepository>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            content: None,
            repository: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Set required content catalog
    pub fn content(mut self, content: Arc<dyn ContentOracle>) -> Self {
        self.content = Some(content);
        self
    }

    /// Load content and `config.toml` from a data directory.
    ///
    /// Levels are validated up front so broken data fails here instead of
    /// mid-run.
    pub fn data_dir(mut self, dir: impl AsRef<Path>) -> Result<Self> {
        let factory = ContentFactory::new(dir.as_ref());
        let catalog = factory
            .load_catalog()
            .map_err(|e| RuntimeError::Content(format!("{e:#}")))?;
        ContentFactory::validate(&catalog).map_err(|e| RuntimeError::Content(format!("{e:#}")))?;
        self.config.game_config = factory
            .load_config()
            .map_err(|e| RuntimeError::Content(format!("{e:#}")))?;
        self.content = Some(Arc::new(catalog));
        Ok(self)
    }

    /// Set the progression store. Defaults to an in-memory repository.
    pub fn repository(mut self, repository: Arc<dyn ProgressRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    /// Build the runtime, restoring any stored progression.
    pub fn build(self) -> Result<Runtime> {
        let content = self.content.ok_or(RuntimeError::MissingContent)?;
        let repository = self
            .repository
            .unwrap_or_else(|| Arc::new(InMemoryProgressRepository::new()));

        let progress: ProgressSnapshot = repository.load()?.unwrap_or_default();
        tracing::info!(
            levels = content.level_count(),
            heroes = content.hero_ids().len(),
            best_score = progress.best_score,
            "Runtime initialized"
        );

        Ok(Runtime {
            session: Session::with_progress(self.config.game_config.clone(), progress),
            event_bus: EventBus::with_capacity(self.config.event_buffer_size),
            config: self.config,
            content,
            repository,
        })
    }
}
