//! Asynchronous abstraction for sourcing player input.
//!
//! Runtime users plug in [`InputSource`] implementations so a session can run
//! with human input, scripted fixtures, or the built-in autopilot.

use std::collections::{BTreeSet, VecDeque};
use std::sync::Arc;

use async_trait::async_trait;
use game_core::session::EntityView;
use game_core::{
    ContentOracle, HeroId, PlayerInput, RoomId, Scene, SceneRequest, Vec2, WorldSnapshot,
};

/// Source of per-frame input and between-level decisions.
#[async_trait]
pub trait InputSource: Send {
    /// Input for the next `Playing` frame.
    async fn next_input(&mut self, snapshot: &WorldSnapshot) -> PlayerInput;

    /// Scene request to issue before the next frame, if any. Called every
    /// frame; most scenes need none.
    fn decide(&mut self, _snapshot: &WorldSnapshot) -> Option<SceneRequest> {
        None
    }
}

/// Never moves, never attacks.
pub struct IdleInput;

#[async_trait]
impl InputSource for IdleInput {
    async fn next_input(&mut self, _snapshot: &WorldSnapshot) -> PlayerInput {
        PlayerInput::idle()
    }
}

/// Replays recorded input, then idles.
///
/// Requests are issued one per frame whenever the scene is not `Playing`.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    inputs: VecDeque<PlayerInput>,
    requests: VecDeque<SceneRequest>,
}

impl ScriptedInput {
    pub fn new(inputs: impl IntoIterator<Item = PlayerInput>) -> Self {
        Self {
            inputs: inputs.into_iter().collect(),
            requests: VecDeque::new(),
        }
    }

    pub fn with_requests(mut self, requests: impl IntoIterator<Item = SceneRequest>) -> Self {
        self.requests = requests.into_iter().collect();
        self
    }

    pub fn remaining(&self) -> usize {
        self.inputs.len()
    }
}

#[async_trait]
impl InputSource for ScriptedInput {
    async fn next_input(&mut self, _snapshot: &WorldSnapshot) -> PlayerInput {
        self.inputs.pop_front().unwrap_or_default()
    }

    fn decide(&mut self, snapshot: &WorldSnapshot) -> Option<SceneRequest> {
        if snapshot.scene == Scene::Playing {
            return None;
        }
        self.requests.pop_front()
    }
}

/// Plays the game on its own: fights the nearest enemy, picks up keys, then
/// heads for a door it has not taken yet.
pub struct Autopilot {
    hero: HeroId,
    content: Arc<dyn ContentOracle>,
    visited: BTreeSet<(usize, RoomId)>,
}

impl Autopilot {
    /// Share of the basic attack's reach the autopilot closes to before
    /// swinging.
    const ENGAGE_FRACTION: f32 = 0.8;

    pub fn new(hero: HeroId, content: Arc<dyn ContentOracle>) -> Self {
        Self {
            hero,
            content,
            visited: BTreeSet::new(),
        }
    }

    fn attack_reach(&self) -> f32 {
        self.content
            .hero(self.hero)
            .and_then(|hero| hero.abilities.first())
            .and_then(|id| self.content.ability(*id))
            .map_or(1.0, |ability| ability.targeting.reach())
    }

    fn fight(&self, player: &EntityView, enemy: &EntityView, snapshot: &WorldSnapshot) -> PlayerInput {
        let to_enemy = enemy.position - player.position;
        if to_enemy.length() > self.attack_reach() * Self::ENGAGE_FRACTION {
            return PlayerInput::moving(to_enemy);
        }
        PlayerInput {
            aim: to_enemy,
            attack: true,
            ultimate: snapshot.ultimate_max > 0 && snapshot.ultimate >= snapshot.ultimate_max,
            ..PlayerInput::idle()
        }
    }

    /// Centre of the first door leading somewhere new, else of the first door.
    fn exit_target(&self, snapshot: &WorldSnapshot) -> Option<Vec2> {
        let room = snapshot.room?;
        let level = self.content.level(snapshot.level_index)?;
        let doors = &level.room(room)?.doors;
        doors
            .iter()
            .find(|door| !self.visited.contains(&(snapshot.level_index, door.target_room)))
            .or_else(|| doors.first())
            .map(|door| door.rect.center())
    }
}

#[async_trait]
impl InputSource for Autopilot {
    async fn next_input(&mut self, snapshot: &WorldSnapshot) -> PlayerInput {
        if let Some(room) = snapshot.room {
            self.visited.insert((snapshot.level_index, room));
        }
        let Some(player) = snapshot.player.as_ref() else {
            return PlayerInput::idle();
        };

        if let Some(enemy) = snapshot.nearest_enemy() {
            return self.fight(player, enemy, snapshot);
        }
        let nearest_pickup = snapshot.pickups.iter().min_by(|a, b| {
            player
                .position
                .distance(a.position)
                .total_cmp(&player.position.distance(b.position))
        });
        if let Some(pickup) = nearest_pickup {
            return PlayerInput::moving(pickup.position - player.position);
        }
        match self.exit_target(snapshot) {
            Some(door) => PlayerInput::moving(door - player.position),
            None => PlayerInput::idle(),
        }
    }

    fn decide(&mut self, snapshot: &WorldSnapshot) -> Option<SceneRequest> {
        match snapshot.scene {
            Scene::Start => Some(SceneRequest::Confirm),
            Scene::HeroSelect => Some(SceneRequest::ChooseHero(self.hero)),
            Scene::LevelIntro => Some(SceneRequest::DismissIntro),
            Scene::Paused => Some(SceneRequest::Resume),
            Scene::SkillSelect => Some(match snapshot.skill_offers.first() {
                Some(skill) => SceneRequest::ChooseSkill(*skill),
                None => SceneRequest::SkipSkill,
            }),
            Scene::Shop => Some(SceneRequest::LeaveShop),
            Scene::Playing | Scene::Victory | Scene::GameOver | Scene::Error => None,
        }
    }
}
