use super::{Combatant, Pickup, RoomPhase};
use crate::ability::{AbilityDefinition, Resolver, TargetCandidate, apply_effect};
use crate::config::GameConfig;
use crate::controller::{ControlContext, Controller, PlayerController, Sighting};
use crate::entity::{AttackIntent, Damageable, Entity, EntityKind};
use crate::env::ContentOracle;
use crate::event::{EventQueue, GameEvent};
use crate::geometry::{DoorGate, Vec2};
use crate::ids::{DoorId, EntityId, EntityIdAllocator, RoomId};
use crate::level::{KeyGrant, RoomDefinition};
use crate::stats::ResourcePool;

/// Read-only inputs for one combat tick.
#[derive(Clone, Copy)]
pub struct TickInput<'a> {
    pub room: &'a RoomDefinition,
    pub doors: &'a [DoorGate],
    pub content: &'a dyn ContentOracle,
    pub config: &'a GameConfig,
    pub dt: f32,
}

/// Everything a tick produced, in emission order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    pub events: Vec<GameEvent>,
    /// Closed door the hero walked into this tick.
    pub player_blocked_by: Option<DoorId>,
}

/// Combat state of the active room.
///
/// Owns the room's enemies. The hero is owned by the session and lent to
/// every tick.
#[derive(Clone, Debug)]
pub struct CombatLoop {
    room: RoomId,
    phase: RoomPhase,
    frame: u64,
    combatants: Vec<Combatant>,
    pickups: Vec<Pickup>,
    events: EventQueue,
}

impl CombatLoop {
    /// A fresh room instance. Rooms already cleared earlier in the level start
    /// in `Cleared` and never spawn again.
    pub fn new(room: RoomId, already_cleared: bool, pickups: Vec<Pickup>) -> Self {
        Self {
            room,
            phase: if already_cleared {
                RoomPhase::Cleared
            } else {
                RoomPhase::Spawning
            },
            frame: 0,
            combatants: Vec::new(),
            pickups,
            events: EventQueue::new(),
        }
    }

    pub fn room(&self) -> RoomId {
        self.room
    }

    pub fn phase(&self) -> RoomPhase {
        self.phase
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Living enemies in spawn order.
    pub fn combatants(&self) -> &[Combatant] {
        &self.combatants
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.combatants.iter().map(|c| &c.entity).find(|e| e.id == id)
    }

    pub fn pickups(&self) -> &[Pickup] {
        &self.pickups
    }

    /// Hands uncollected pickups back when the room is left.
    pub fn take_pickups(&mut self) -> Vec<Pickup> {
        std::mem::take(&mut self.pickups)
    }

    pub fn tick(
        &mut self,
        player: &mut Entity,
        player_controller: &mut PlayerController,
        input: &TickInput<'_>,
        ids: &mut EntityIdAllocator,
    ) -> TickReport {
        self.frame += 1;
        if self.phase == RoomPhase::Spawning {
            self.spawn(input, ids);
            self.advance(RoomPhase::Active);
        }

        let (intents, player_blocked_by) = self.collect_intents(player, player_controller, input);
        self.collect_pickups(player, input.config);
        let ultimate_fired = self.resolve_intents(player, &intents, input);

        let dt = input.dt;
        tick_statuses(player, dt, &mut self.events);
        for combatant in &mut self.combatants {
            tick_statuses(&mut combatant.entity, dt, &mut self.events);
        }
        // A drained ultimate stays at zero for the rest of the frame it fired in.
        if player.is_alive() && !ultimate_fired {
            let rate = input.config.ultimate_charge_per_second;
            charge_ultimate(player, |pool| pool.accrue(rate, dt), &mut self.events);
        }

        let mut events = self.process_events(player);
        if self.phase == RoomPhase::Active && self.combatants.is_empty() {
            self.clear(input.room);
            events.extend(self.process_events(player));
        }

        TickReport {
            events,
            player_blocked_by,
        }
    }

    fn advance(&mut self, next: RoomPhase) {
        if next <= self.phase {
            return;
        }
        self.phase = next;
        self.events.push(GameEvent::RoomPhaseChanged {
            room: self.room,
            phase: next,
        });
    }

    fn spawn(&mut self, input: &TickInput<'_>, ids: &mut EntityIdAllocator) {
        for spawn in &input.room.spawns {
            let Some(def) = input.content.enemy(spawn.enemy) else {
                continue;
            };
            let id = ids.allocate();
            let mut entity = Entity::enemy(id, def, spawn.position, spawn.drop);
            let controller = Controller::for_enemy(&mut entity, def);
            self.events.push(GameEvent::EntitySpawned {
                entity: id,
                template: def.id,
                kind: entity.kind,
            });
            self.combatants.push(Combatant { entity, controller });
        }

        self.pickups.extend(
            input
                .room
                .keys
                .iter()
                .filter(|k| !k.on_clear)
                .map(|k| Pickup {
                    grant: k.grant,
                    position: k.position,
                }),
        );
    }

    /// Runs every controller: the hero first, then enemies in spawn order.
    fn collect_intents(
        &mut self,
        player: &mut Entity,
        player_controller: &mut PlayerController,
        input: &TickInput<'_>,
    ) -> (Vec<AttackIntent>, Option<DoorId>) {
        let mut ctx = ControlContext {
            geometry: input.room.geometry(),
            doors: input.doors,
            content: input.content,
            config: input.config,
            player: None,
            frame: self.frame,
            dt: input.dt,
        };

        let mut intents = Vec::new();
        let out = player_controller.update(player, &ctx);
        intents.extend(out.attack);
        let blocked_by = out.blocked_by;

        ctx.player = player.is_alive().then_some(Sighting {
            id: player.id,
            position: player.position,
        });
        for combatant in &mut self.combatants {
            let out = combatant.controller.update(&mut combatant.entity, &ctx);
            if let Some(phase) = out.phase_changed {
                self.events.push(GameEvent::BossPhaseChanged {
                    boss: combatant.entity.id,
                    phase,
                });
            }
            intents.extend(out.attack);
        }

        (intents, blocked_by)
    }

    fn collect_pickups(&mut self, player: &mut Entity, config: &GameConfig) {
        if !player.is_alive() {
            return;
        }
        let Some(hero) = player.hero.as_mut() else {
            return;
        };
        let position = player.position;
        let events = &mut self.events;
        self.pickups.retain(|pickup| {
            if position.distance(pickup.position) > config.pickup_radius {
                return true;
            }
            hero.keys.grant(pickup.grant);
            events.push(GameEvent::KeyCollected { grant: pickup.grant });
            false
        });
    }

    /// Resolves intents in collection order. Failed casts are dropped.
    /// Returns true if the hero's ultimate went off.
    fn resolve_intents(&mut self, player: &mut Entity, intents: &[AttackIntent], input: &TickInput<'_>) -> bool {
        let resolver = Resolver::new(input.config);

        let mut ultimate_fired = false;
        for intent in intents {
            let Some(ability) = input.content.ability(intent.ability) else {
                continue;
            };
            if intent.caster == player.id {
                let cast = self.resolve_player_cast(
                    player,
                    ability,
                    intent,
                    &resolver,
                    input.config,
                    ultimate_fired,
                );
                ultimate_fired |= cast && ability.ultimate;
            } else {
                self.resolve_enemy_cast(player, ability, intent, &resolver);
            }
        }
        ultimate_fired
    }

    fn resolve_player_cast(
        &mut self,
        player: &mut Entity,
        ability: &AbilityDefinition,
        intent: &AttackIntent,
        resolver: &Resolver<'_>,
        config: &GameConfig,
        ultimate_fired: bool,
    ) -> bool {
        let candidates: Vec<TargetCandidate> = self
            .combatants
            .iter()
            .map(|c| candidate(&c.entity))
            .collect();
        let Ok(resolution) = resolver.resolve(player, ability, intent.target, &candidates) else {
            return false;
        };
        self.events.push(GameEvent::AbilityCast {
            caster: player.id,
            ability: ability.id,
            targets: resolution.targets(),
        });

        let caster = player.id;
        let mut dealt = 0;
        for application in &resolution.applications {
            if application.target == caster {
                apply_effect(player, application, caster, &mut self.events);
            } else if let Some(combatant) = self
                .combatants
                .iter_mut()
                .find(|c| c.entity.id == application.target)
            {
                dealt += apply_effect(&mut combatant.entity, application, caster, &mut self.events).dealt;
            }
        }

        let charge = dealt.saturating_mul(config.ultimate_charge_per_hit);
        if charge > 0 && !ability.ultimate && !ultimate_fired {
            charge_ultimate(player, |pool| pool.restore(charge), &mut self.events);
        }
        true
    }

    fn resolve_enemy_cast(
        &mut self,
        player: &mut Entity,
        ability: &AbilityDefinition,
        intent: &AttackIntent,
        resolver: &Resolver<'_>,
    ) {
        let Some(caster) = self
            .combatants
            .iter_mut()
            .find(|c| c.entity.id == intent.caster)
        else {
            return;
        };
        if !caster.entity.is_alive() {
            return;
        }

        let candidates = [candidate(player)];
        let Ok(resolution) = resolver.resolve(&mut caster.entity, ability, intent.target, &candidates) else {
            return;
        };
        self.events.push(GameEvent::AbilityCast {
            caster: caster.entity.id,
            ability: ability.id,
            targets: resolution.targets(),
        });

        for application in &resolution.applications {
            let target = if application.target == player.id {
                &mut *player
            } else {
                &mut caster.entity
            };
            apply_effect(target, application, intent.caster, &mut self.events);
        }
    }

    /// Drains the queue, handling deaths as they come. Follow-up events are
    /// appended and handled in the same pass.
    fn process_events(&mut self, player: &mut Entity) -> Vec<GameEvent> {
        let mut processed = Vec::with_capacity(self.events.len());
        while let Some(event) = self.events.pop() {
            if let GameEvent::Died { entity, kind } = event {
                self.on_death(player, entity, kind);
            }
            processed.push(event);
        }
        processed
    }

    fn on_death(&mut self, player: &mut Entity, id: EntityId, kind: EntityKind) {
        if kind == EntityKind::Player {
            self.events.push(GameEvent::PlayerDied);
            return;
        }
        let Some(index) = self.combatants.iter().position(|c| c.entity.id == id) else {
            return;
        };
        let dead = self.combatants.remove(index).entity;

        if let Some(grant) = dead.loot.key {
            self.drop_key(grant, dead.position);
        }
        if dead.loot.gold > 0 || dead.loot.score > 0 {
            if let Some(hero) = player.hero.as_mut() {
                hero.gold = hero.gold.saturating_add(dead.loot.gold);
                hero.score = hero.score.saturating_add(dead.loot.score);
            }
            self.events.push(GameEvent::RewardEarned {
                gold: dead.loot.gold,
                score: dead.loot.score,
            });
        }
        if kind == EntityKind::Boss {
            self.events.push(GameEvent::BossDefeated { boss: id });
        }
    }

    /// Active → Clearing → Cleared, dropping on-clear keys in between.
    fn clear(&mut self, room: &RoomDefinition) {
        self.advance(RoomPhase::Clearing);
        for key in room.keys.iter().filter(|k| k.on_clear) {
            self.drop_key(key.grant, key.position);
        }
        self.advance(RoomPhase::Cleared);
        self.events.push(GameEvent::RoomCleared { room: self.room });
    }

    fn drop_key(&mut self, grant: KeyGrant, position: Vec2) {
        self.pickups.push(Pickup { grant, position });
        self.events.push(GameEvent::KeyDropped { grant, position });
    }
}

fn candidate(entity: &Entity) -> TargetCandidate {
    TargetCandidate {
        id: entity.id,
        position: entity.position,
        defense: entity.defense_rating(),
        alive: entity.is_alive(),
    }
}

/// Adds ultimate charge through `gain` and reports when the pool fills up.
fn charge_ultimate(
    player: &mut Entity,
    gain: impl FnOnce(&mut ResourcePool) -> u32,
    events: &mut EventQueue,
) {
    let Some(hero) = player.hero.as_mut() else {
        return;
    };
    let was_full = hero.ultimate.is_full();
    gain(&mut hero.ultimate);
    if !was_full && hero.ultimate.is_full() && hero.ultimate.maximum() > 0 {
        events.push(GameEvent::UltimateReady);
    }
}

/// Applies periodic status damage/healing and reports expirations.
fn tick_statuses(entity: &mut Entity, dt: f32, events: &mut EventQueue) {
    if !entity.is_alive() {
        return;
    }
    let tick = entity.statuses.tick(dt);

    if tick.damage > 0 {
        let outcome = entity.take_damage(tick.damage);
        if outcome.dealt > 0 {
            events.push(GameEvent::Damaged {
                source: None,
                target: entity.id,
                amount: outcome.dealt,
                remaining: outcome.remaining,
            });
        }
        if outcome.killed {
            events.push(GameEvent::Died {
                entity: entity.id,
                kind: entity.kind,
            });
        }
    }
    if tick.healing > 0 {
        let healed = entity.heal(tick.healing);
        if healed > 0 {
            events.push(GameEvent::Healed {
                target: entity.id,
                amount: healed,
            });
        }
    }
    for status in tick.expired {
        events.push(GameEvent::StatusExpired {
            target: entity.id,
            status,
        });
    }
}
