//! Session state machine.
//!
//! The [`Session`] is the single owner of game-flow state: current scene,
//! level index, the hero and (while playing) the [`LevelRun`]. Scene changes
//! come from two places:
//!
//! - explicit [`SceneRequest`]s, checked against the transition table
//! - events raised during a tick (`LevelComplete`, `PlayerDied`)
//!
//! Every change is reported as a `SceneChanged` event. Events accumulate until
//! the next [`Session::tick`] or [`Session::drain_events`].

mod scene;
mod shop;
mod snapshot;

pub use scene::{Scene, SceneRequest, TransitionError, accepts};
pub use shop::{ShopError, ShopItem};
pub use snapshot::{EntityView, ProgressSnapshot, WorldSnapshot};

use crate::config::GameConfig;
use crate::controller::PlayerController;
use crate::entity::{Entity, PlayerInput};
use crate::env::{ContentOracle, PcgRng, RngOracle, compute_seed, purpose};
use crate::event::{EventQueue, GameEvent};
use crate::ids::{DoorId, ShopItemId, SkillId};
use crate::level::{DoorPassage, LevelDataError, LevelRun};

#[derive(Clone, Debug)]
pub struct Session {
    config: GameConfig,
    scene: Scene,
    level_index: usize,
    player: Option<Entity>,
    controller: PlayerController,
    run: Option<LevelRun>,
    intro_remaining: f32,
    skill_offers: Vec<SkillId>,
    progress: ProgressSnapshot,
    last_error: Option<LevelDataError>,
    frame: u64,
    events: EventQueue,
}

impl Session {
    pub fn new(config: GameConfig) -> Self {
        Self::with_progress(config, ProgressSnapshot::default())
    }

    /// Starts at [`Scene::Start`] with previously persisted progression.
    pub fn with_progress(config: GameConfig, progress: ProgressSnapshot) -> Self {
        Self {
            config,
            scene: Scene::Start,
            level_index: 0,
            player: None,
            controller: PlayerController::new(),
            run: None,
            intro_remaining: 0.0,
            skill_offers: Vec::new(),
            progress,
            last_error: None,
            frame: 0,
            events: EventQueue::new(),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn scene(&self) -> Scene {
        self.scene
    }

    pub fn level_index(&self) -> usize {
        self.level_index
    }

    pub fn player(&self) -> Option<&Entity> {
        self.player.as_ref()
    }

    pub fn run(&self) -> Option<&LevelRun> {
        self.run.as_ref()
    }

    pub fn skill_offers(&self) -> &[SkillId] {
        &self.skill_offers
    }

    pub fn last_error(&self) -> Option<&LevelDataError> {
        self.last_error.as_ref()
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Progression as of the last GameOver/Victory (or as loaded).
    pub fn progress(&self) -> &ProgressSnapshot {
        &self.progress
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain()
    }

    /// Applies a user request. Illegal requests leave the session untouched.
    pub fn request(&mut self, request: SceneRequest, content: &dyn ContentOracle) -> Result<(), TransitionError> {
        if !accepts(self.scene, request) {
            return Err(TransitionError::InvalidTransition {
                from: self.scene,
                request,
            });
        }

        match request {
            SceneRequest::Confirm => self.change_scene(Scene::HeroSelect),
            SceneRequest::ChooseHero(hero) => {
                let def = content.hero(hero).ok_or(TransitionError::UnknownHero(hero))?;
                self.player = Some(Entity::player(def, &self.config));
                self.controller = PlayerController::new();
                self.level_index = 0;
                self.enter_intro();
            }
            SceneRequest::DismissIntro => self.enter_playing(content)?,
            SceneRequest::Pause => self.change_scene(Scene::Paused),
            SceneRequest::Resume => self.change_scene(Scene::Playing),
            SceneRequest::ChooseSkill(skill) => {
                if !self.skill_offers.contains(&skill) {
                    return Err(TransitionError::SkillNotOffered(skill));
                }
                if let (Some(def), Some(player)) = (content.skill(skill), self.player.as_mut()) {
                    def.effect.apply_to(player);
                    if let Some(hero) = player.hero.as_mut() {
                        hero.skills.insert(skill);
                    }
                }
                self.events.push(GameEvent::SkillChosen { skill });
                self.leave_skill_select();
            }
            SceneRequest::SkipSkill => self.leave_skill_select(),
            SceneRequest::LeaveShop => self.enter_intro(),
            SceneRequest::Restart => self.reset(),
        }
        Ok(())
    }

    /// Advances the session by one frame.
    pub fn tick(&mut self, dt: f32, input: PlayerInput, content: &dyn ContentOracle) -> Vec<GameEvent> {
        self.frame += 1;

        match self.scene {
            Scene::LevelIntro => {
                self.intro_remaining -= dt;
                if self.intro_remaining <= 0.0 {
                    // A load failure has already moved the session to `Error`.
                    let _ = self.enter_playing(content);
                }
            }
            Scene::Playing => self.tick_playing(dt, input, content),
            _ => {}
        }
        self.events.drain()
    }

    /// Explicit attempt to walk through a door of the active room.
    pub fn pass_door(&mut self, door: DoorId, content: &dyn ContentOracle) -> DoorPassage {
        if self.scene != Scene::Playing {
            return DoorPassage::Blocked;
        }
        let (Some(run), Some(player)) = (self.run.as_mut(), self.player.as_mut()) else {
            return DoorPassage::Blocked;
        };
        let (passage, events) = run.pass_door(door, player, content);
        self.events.extend(events);
        passage
    }

    /// Buys a shop item with gold. Only valid in [`Scene::Shop`].
    pub fn purchase(&mut self, item: ShopItemId, content: &dyn ContentOracle) -> Result<(), ShopError> {
        if self.scene != Scene::Shop {
            return Err(ShopError::NotInShop);
        }
        let item = content.shop_item(item).ok_or(ShopError::UnknownItem(item))?;
        let player = self.player.as_mut().ok_or(ShopError::NotInShop)?;
        let hero = player.hero.as_mut().ok_or(ShopError::NotInShop)?;
        if hero.gold < item.price {
            return Err(ShopError::NotEnoughGold {
                price: item.price,
                gold: hero.gold,
            });
        }

        hero.gold -= item.price;
        item.effect.apply_to(player);
        self.events.push(GameEvent::ItemPurchased {
            item: item.id,
            price: item.price,
        });
        Ok(())
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        let hero = self.player.as_ref().and_then(|p| p.hero.as_ref());
        let combat = self.run.as_ref().map(|run| run.combat());

        WorldSnapshot {
            frame: self.frame,
            scene: self.scene,
            level_index: self.level_index,
            room: combat.map(|c| c.room()),
            room_phase: combat.map(|c| c.phase()),
            player: self.player.as_ref().map(EntityView::from),
            enemies: combat
                .map(|c| c.combatants().iter().map(|c| EntityView::from(&c.entity)).collect())
                .unwrap_or_default(),
            pickups: combat.map(|c| c.pickups().to_vec()).unwrap_or_default(),
            keys: hero.map_or(0, |h| h.keys.total()),
            gold: hero.map_or(0, |h| h.gold),
            score: hero.map_or(0, |h| h.score),
            ultimate: hero.map_or(0, |h| h.ultimate.current()),
            ultimate_max: hero.map_or(0, |h| h.ultimate.maximum()),
            skill_offers: self.skill_offers.clone(),
        }
    }

    fn tick_playing(&mut self, dt: f32, input: PlayerInput, content: &dyn ContentOracle) {
        let (Some(run), Some(player)) = (self.run.as_mut(), self.player.as_mut()) else {
            return;
        };
        self.controller.set_input(input);
        let events = run.tick(player, &mut self.controller, content, &self.config, dt);

        let player_died = events.iter().any(|e| matches!(e, GameEvent::PlayerDied));
        let completed = events.iter().any(|e| matches!(e, GameEvent::LevelComplete { .. }));
        self.events.extend(events);

        if player_died {
            self.finish(Scene::GameOver);
        } else if completed {
            self.on_level_complete(content);
        }
    }

    fn on_level_complete(&mut self, content: &dyn ContentOracle) {
        if self.level_index + 1 >= content.level_count() {
            self.finish(Scene::Victory);
            return;
        }
        self.run = None;
        self.level_index += 1;
        self.skill_offers = self.roll_skill_offers(content);
        self.change_scene(Scene::SkillSelect);
    }

    /// Deterministic pick of skills the hero does not own yet.
    fn roll_skill_offers(&self, content: &dyn ContentOracle) -> Vec<SkillId> {
        let owned = self.player.as_ref().and_then(|p| p.hero.as_ref()).map(|h| &h.skills);
        let mut pool: Vec<SkillId> = content
            .skill_ids()
            .into_iter()
            .filter(|id| !owned.is_some_and(|s| s.contains(id)))
            .collect();

        let rng = PcgRng;
        let mut offers = Vec::new();
        for pick in 0..self.config.skill_choices {
            if pool.is_empty() {
                break;
            }
            let seed = compute_seed(
                self.config.seed,
                self.level_index as u64,
                pick as u32,
                purpose::SKILL_OFFER,
            );
            let index = rng.range(seed, 0, pool.len() as u32 - 1) as usize;
            offers.push(pool.remove(index));
        }
        offers
    }

    fn leave_skill_select(&mut self) {
        self.skill_offers.clear();
        if self.config.shop_after_skill_select {
            self.change_scene(Scene::Shop);
        } else {
            self.enter_intro();
        }
    }

    fn enter_intro(&mut self) {
        self.intro_remaining = self.config.intro_duration;
        self.change_scene(Scene::LevelIntro);
    }

    fn enter_playing(&mut self, content: &dyn ContentOracle) -> Result<(), TransitionError> {
        let Some(player) = self.player.as_mut() else {
            return Err(TransitionError::InvalidTransition {
                from: self.scene,
                request: SceneRequest::DismissIntro,
            });
        };
        match LevelRun::start(self.level_index, content, player, &self.config) {
            Ok(run) => {
                self.run = Some(run);
                self.change_scene(Scene::Playing);
                Ok(())
            }
            Err(err) => {
                self.run = None;
                self.last_error = Some(err.clone());
                self.change_scene(Scene::Error);
                Err(TransitionError::LevelLoad(err))
            }
        }
    }

    /// Tears down the combat loop and records progression.
    fn finish(&mut self, scene: Scene) {
        self.run = None;
        let hero = self.player.as_ref().and_then(|p| p.hero.as_ref());
        let score = hero.map_or(0, |h| h.score);

        self.progress = ProgressSnapshot {
            level_index: self.progress.level_index.max(self.level_index),
            hero: hero.map(|h| h.hero),
            skills: hero.map(|h| h.skills.iter().copied().collect()).unwrap_or_default(),
            best_score: self.progress.best_score.max(score),
        };
        self.change_scene(scene);
    }

    /// Back to Start. The hero is discarded; persisted progression stays.
    fn reset(&mut self) {
        self.player = None;
        self.run = None;
        self.controller = PlayerController::new();
        self.level_index = 0;
        self.skill_offers.clear();
        self.last_error = None;
        self.change_scene(Scene::Start);
    }

    fn change_scene(&mut self, to: Scene) {
        let from = self.scene;
        self.scene = to;
        self.events.push(GameEvent::SceneChanged { from, to });
    }
}
