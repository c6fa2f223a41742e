//! End-to-end scenarios driven through the public `Session` API.

mod common;

use common::*;
use game_core::level::DoorState;
use game_core::{
    ContentOracle, DoorPassage, EntityId, GameEvent, KeyGrant, LevelDataError, LevelDefinition,
    GameConfig, PlayerInput, Rect, RoomPhase, Scene, SceneRequest, Session, ShopError, ShopItem,
    ShopItemId, SkillEffect, TransitionError, Vec2,
};

const DOOR_APPROACH: Vec2 = Vec2::new(19.0, 5.0);

/// Fights, collects keys, then walks through the exit of the first room.
fn gatehouse_input(session: &Session) -> PlayerInput {
    let snapshot = session.snapshot();
    let Some(player) = snapshot.player.as_ref() else {
        return PlayerInput::idle();
    };
    if !snapshot.enemies.is_empty() {
        return fight(session);
    }
    if let Some(pickup) = snapshot.pickups.first() {
        return walk_toward(player.position, pickup.position);
    }
    if snapshot.room == Some(HALL) {
        if player.position.distance(DOOR_APPROACH) > 0.25 {
            return walk_toward(player.position, DOOR_APPROACH);
        }
        return PlayerInput::moving(Vec2::RIGHT);
    }
    PlayerInput::idle()
}

fn count(events: &[GameEvent], matches: impl Fn(&GameEvent) -> bool) -> usize {
    events.iter().filter(|e| matches(e)).count()
}

#[test]
fn enemy_hit_reduces_hero_health_by_damage_minus_defense() {
    let catalog = catalog_with(vec![duel_level()]);
    let mut session = playing_session(&catalog, config());

    let events = session.tick(DT, PlayerInput::idle(), &catalog);

    let hit = events
        .iter()
        .find_map(|e| match e {
            GameEvent::Damaged { target, amount, remaining, .. } if *target == EntityId::PLAYER => {
                Some((*amount, *remaining))
            }
            _ => None,
        })
        .expect("brute should hit the hero on its first tick");
    assert_eq!(hit, (25, 75));
    assert_eq!(session.player().expect("hero").health.current(), 75);
}

#[test]
fn room_clears_on_the_tick_the_last_enemy_dies() {
    let catalog = catalog_with(vec![gated_level(), shrine_level()]);
    let mut session = playing_session(&catalog, config());

    let mut all = Vec::new();
    let mut deaths = 0;
    for _ in 0..100 {
        let events = session.tick(DT, PlayerInput::idle().attacking(), &catalog);
        deaths += count(&events, |e| matches!(e, GameEvent::Died { .. }));
        let cleared = events.iter().any(|e| matches!(e, GameEvent::RoomCleared { room } if *room == HALL));

        if deaths < 2 {
            assert!(!cleared, "room cleared with an enemy still standing");
        }
        all.extend(events);
        if cleared {
            assert_eq!(deaths, 2);
            break;
        }
    }

    assert_eq!(session.snapshot().room_phase, Some(RoomPhase::Cleared));
    assert_eq!(
        count(&all, |e| matches!(e, GameEvent::KeyDropped { .. })),
        1,
        "exactly the one on-clear key"
    );
    assert!(all.contains(&GameEvent::KeyDropped {
        grant: KeyGrant::Generic,
        position: KEY_SPOT,
    }));
    assert_eq!(
        count(&all, |e| matches!(e, GameEvent::RewardEarned { .. })),
        2
    );
    assert_eq!(session.snapshot().gold, 4);
}

#[test]
fn locked_door_without_keys_is_a_no_op() {
    let catalog = catalog_with(vec![gated_level(), shrine_level()]);
    let mut session = playing_session(&catalog, config());

    run_until(
        &mut session,
        &catalog,
        100,
        |_| PlayerInput::idle().attacking(),
        |e| matches!(e, GameEvent::RoomCleared { .. }),
    );
    assert_eq!(session.snapshot().keys, 0);

    let before = session.player().expect("hero").position;
    assert_eq!(session.pass_door(EXIT, &catalog), DoorPassage::Blocked);
    assert_eq!(session.player().expect("hero").position, before);
    assert_eq!(session.scene(), Scene::Playing);
    assert_eq!(session.snapshot().room, Some(HALL));
    assert!(session.drain_events().is_empty());

    let progress = session.run().expect("level run").progress();
    assert_eq!(progress.door_state(EXIT), DoorState::Locked);
}

#[test]
fn collected_key_unlocks_the_door_and_is_consumed() {
    let catalog = catalog_with(vec![gated_level(), shrine_level()]);
    let mut session = playing_session(&catalog, config());

    let events = run_until(&mut session, &catalog, 600, gatehouse_input, |e| {
        matches!(e, GameEvent::RoomEntered { .. })
    });

    assert_eq!(
        count(&events, |e| matches!(e, GameEvent::KeyCollected { .. })),
        1
    );
    assert!(events.contains(&GameEvent::DoorUnlocked { door: EXIT }));
    assert!(events.contains(&GameEvent::RoomEntered { room: LAIR }));

    let snapshot = session.snapshot();
    assert_eq!(snapshot.room, Some(LAIR));
    assert_eq!(snapshot.keys, 0);
    assert_eq!(snapshot.player.expect("hero").position, START);
}

#[test]
fn doors_never_relock_once_opened() {
    let catalog = catalog_with(vec![gated_level(), shrine_level()]);
    let mut session = playing_session(&catalog, config());

    let mut unlocked = false;
    for _ in 0..600 {
        let input = gatehouse_input(&session);
        let events = session.tick(DT, input, &catalog);
        unlocked |= events.contains(&GameEvent::DoorUnlocked { door: EXIT });
        if events.iter().any(|e| matches!(e, GameEvent::RoomEntered { .. })) {
            break;
        }
        if unlocked {
            let progress = session.run().expect("level run").progress();
            assert_eq!(progress.door_state(EXIT), DoorState::Unlocked);
        }
    }
    assert!(unlocked);

    // Leaving the room does not lock it behind the hero.
    for _ in 0..20 {
        session.tick(DT, PlayerInput::idle(), &catalog);
        let progress = session.run().expect("level run").progress();
        assert_eq!(progress.door_state(EXIT), DoorState::Unlocked);
    }
}

#[test]
fn finishing_a_middle_level_offers_skills() {
    let catalog = catalog_with(vec![gated_level(), shrine_level()]);
    let mut session = playing_session(&catalog, config());

    let events = run_until(
        &mut session,
        &catalog,
        1200,
        |s| {
            if s.snapshot().room == Some(LAIR) {
                fight(s)
            } else {
                gatehouse_input(s)
            }
        },
        |e| matches!(e, GameEvent::LevelComplete { .. }),
    );

    assert!(events.contains(&GameEvent::LevelComplete { level_index: 0 }));
    assert!(events.iter().any(|e| matches!(e, GameEvent::BossDefeated { .. })));
    assert_eq!(session.scene(), Scene::SkillSelect);
    assert_eq!(session.level_index(), 1);
    assert_eq!(session.skill_offers().len(), 3);
    assert!(session.run().is_none());
}

#[test]
fn finishing_the_final_level_is_victory() {
    let catalog = catalog_with(vec![shrine_level()]);
    let mut session = playing_session(&catalog, config());

    let events = run_until(&mut session, &catalog, 100, fight, |e| {
        matches!(e, GameEvent::LevelComplete { .. })
    });

    assert!(events.contains(&GameEvent::SceneChanged {
        from: Scene::Playing,
        to: Scene::Victory,
    }));
    assert!(!events.iter().any(|e| matches!(
        e,
        GameEvent::SceneChanged {
            to: Scene::SkillSelect,
            ..
        }
    )));
    assert_eq!(session.scene(), Scene::Victory);
    assert_eq!(session.progress().best_score, 10);

    // Terminal scenes ignore frames until restarted.
    assert!(session.tick(DT, PlayerInput::idle(), &catalog).is_empty());
    session.request(SceneRequest::Restart, &catalog).expect("restart");
    assert_eq!(session.scene(), Scene::Start);
    assert_eq!(session.progress().best_score, 10);
}

#[test]
fn skill_choice_and_shop_carry_into_the_next_level() {
    let mut catalog = catalog_with(vec![shrine_level(), shrine_level()]);
    catalog.insert_shop_item(ShopItem {
        id: ShopItemId(1),
        name: "Elixir".into(),
        price: 30,
        effect: SkillEffect::MaxHealth(10),
    });
    catalog.insert_shop_item(ShopItem {
        id: ShopItemId(2),
        name: "Whetstone".into(),
        price: 1,
        effect: SkillEffect::Attack(1),
    });
    let mut session = playing_session(&catalog, config());

    assert_eq!(
        session.purchase(ShopItemId(2), &catalog),
        Err(ShopError::NotInShop)
    );

    run_until(&mut session, &catalog, 100, fight, |e| {
        matches!(e, GameEvent::LevelComplete { .. })
    });
    assert_eq!(session.scene(), Scene::SkillSelect);

    let skill = session.skill_offers()[0];
    let not_offered = catalog
        .skill_ids()
        .into_iter()
        .find(|id| !session.skill_offers().contains(id));
    if let Some(other) = not_offered {
        assert_eq!(
            session.request(SceneRequest::ChooseSkill(other), &catalog),
            Err(TransitionError::SkillNotOffered(other))
        );
        assert_eq!(session.scene(), Scene::SkillSelect);
    }
    session
        .request(SceneRequest::ChooseSkill(skill), &catalog)
        .expect("offered skill");
    assert_eq!(session.scene(), Scene::Shop);
    assert!(session.player().expect("hero").hero.as_ref().expect("hero state").skills.contains(&skill));

    assert_eq!(
        session.purchase(ShopItemId(1), &catalog),
        Err(ShopError::NotEnoughGold { price: 30, gold: 2 })
    );
    assert_eq!(
        session.purchase(ShopItemId(9), &catalog),
        Err(ShopError::UnknownItem(ShopItemId(9)))
    );
    let attack = session.player().expect("hero").attack;
    session.purchase(ShopItemId(2), &catalog).expect("affordable");
    assert_eq!(session.snapshot().gold, 1);
    assert_eq!(session.player().expect("hero").attack, attack + 1);

    session.request(SceneRequest::LeaveShop, &catalog).expect("leave shop");
    assert_eq!(session.scene(), Scene::LevelIntro);
    session.tick(DT, PlayerInput::idle(), &catalog);
    assert_eq!(session.scene(), Scene::Playing);
    assert_eq!(session.snapshot().level_index, 1);
}

#[test]
fn invalid_requests_leave_the_session_unchanged() {
    let catalog = catalog_with(vec![gated_level(), shrine_level()]);
    let mut session = playing_session(&catalog, config());
    session.tick(DT, PlayerInput::idle(), &catalog);

    let before = session.snapshot();
    for request in [
        SceneRequest::Confirm,
        SceneRequest::ChooseHero(KNIGHT),
        SceneRequest::LeaveShop,
        SceneRequest::SkipSkill,
        SceneRequest::Resume,
    ] {
        let err = session.request(request, &catalog).expect_err("illegal in Playing");
        assert_eq!(
            err,
            TransitionError::InvalidTransition {
                from: Scene::Playing,
                request,
            }
        );
    }
    assert_eq!(session.snapshot(), before);
    assert!(session.drain_events().is_empty());
}

#[test]
fn pause_freezes_the_simulation() {
    let catalog = catalog_with(vec![duel_level()]);
    let mut session = playing_session(&catalog, config());
    session.tick(DT, PlayerInput::idle(), &catalog);

    session.request(SceneRequest::Pause, &catalog).expect("pause");
    let paused = session.snapshot();
    for _ in 0..50 {
        assert!(session.tick(DT, PlayerInput::moving(Vec2::RIGHT), &catalog).is_empty());
    }
    let after = session.snapshot();
    assert_eq!(after.player, paused.player);
    assert_eq!(after.enemies, paused.enemies);

    session.request(SceneRequest::Resume, &catalog).expect("resume");
    assert_eq!(session.scene(), Scene::Playing);
}

#[test]
fn corrupt_level_data_moves_to_error_scene() {
    let broken = LevelDefinition {
        name: "Broken".into(),
        rooms: vec![],
        start_room: HALL,
        boss_room: HALL,
    };
    let catalog = catalog_with(vec![broken]);
    let mut session = Session::new(config());
    session.request(SceneRequest::Confirm, &catalog).expect("confirm");
    session
        .request(SceneRequest::ChooseHero(KNIGHT), &catalog)
        .expect("choose hero");

    let err = session
        .request(SceneRequest::DismissIntro, &catalog)
        .expect_err("level cannot load");
    assert_eq!(err, TransitionError::LevelLoad(LevelDataError::EmptyLevel));
    assert_eq!(session.scene(), Scene::Error);
    assert!(session.last_error().is_some());
    assert!(session.run().is_none());

    session.request(SceneRequest::Restart, &catalog).expect("restart");
    assert_eq!(session.scene(), Scene::Start);
}

#[test]
fn identical_inputs_produce_identical_runs() {
    let catalog = catalog_with(vec![arena_level()]);
    let config = config().with_seed(0xD1CE);
    let mut a = playing_session(&catalog, config.clone());
    let mut b = playing_session(&catalog, config);

    for _ in 0..400 {
        let input = fight(&a);
        assert_eq!(input, fight(&b));
        let events_a = a.tick(DT, input, &catalog);
        let events_b = b.tick(DT, input, &catalog);
        assert_eq!(events_a, events_b);
        assert_eq!(a.snapshot(), b.snapshot());
        if a.scene() != Scene::Playing {
            break;
        }
    }
}

#[test]
fn arena_invariants_hold_every_frame() {
    let catalog = catalog_with(vec![arena_level()]);
    let mut session = playing_session(&catalog, config().with_seed(42));

    let mut last_phase = None;
    let mut boss_phases = Vec::new();
    let mut deaths: Vec<EntityId> = Vec::new();
    for _ in 0..1500 {
        let input = fight(&session);
        let events = session.tick(DT, input, &catalog);
        for event in &events {
            match event {
                GameEvent::RoomPhaseChanged { phase, .. } => {
                    assert!(Some(*phase) > last_phase, "room phase went backwards");
                    last_phase = Some(*phase);
                }
                GameEvent::BossPhaseChanged { phase, .. } => boss_phases.push(*phase),
                GameEvent::Died { entity, .. } => {
                    assert!(!deaths.contains(entity), "{entity} died twice");
                    deaths.push(*entity);
                }
                _ => {}
            }
        }

        let snapshot = session.snapshot();
        if let Some(player) = snapshot.player.as_ref() {
            assert!(player.health <= player.max_health);
        }
        assert!(snapshot.ultimate <= snapshot.ultimate_max);
        for enemy in &snapshot.enemies {
            assert!(enemy.health > 0 && enemy.health <= enemy.max_health);
        }
        if session.scene() != Scene::Playing {
            break;
        }
    }

    assert!(boss_phases.windows(2).all(|w| w[0] < w[1]));
    assert!(boss_phases.len() <= 2);
    assert!(matches!(session.scene(), Scene::Victory | Scene::GameOver | Scene::Playing));
}

#[test]
fn ultimate_leaves_no_charge_on_the_frame_it_fires() {
    let catalog = catalog_with(vec![duel_level()]);
    let config = GameConfig {
        ultimate_max: 1,
        ultimate_charge_per_second: 5.0,
        ultimate_charge_per_hit: 1,
        ..config()
    };
    let mut session = playing_session(&catalog, config);

    let events = session.tick(DT, PlayerInput::idle().attacking(), &catalog);
    assert!(events.contains(&GameEvent::UltimateReady));
    assert_eq!(session.snapshot().ultimate, 1);

    let ultimate = PlayerInput {
        ultimate: true,
        ..PlayerInput::idle()
    };
    let events = session.tick(DT, ultimate, &catalog);
    assert!(events.iter().any(|e| matches!(
        e,
        GameEvent::AbilityCast { ability, caster, .. } if *ability == NOVA && *caster == EntityId::PLAYER
    )));
    assert!(events.iter().any(|e| matches!(e, GameEvent::Damaged { source, .. } if *source == Some(EntityId::PLAYER))));
    assert_eq!(session.snapshot().ultimate, 0);
    assert!(!events.contains(&GameEvent::UltimateReady));
}

#[test]
fn long_frames_never_carry_the_hero_through_a_wall() {
    let mut level = shrine_level();
    level.rooms[0].walls.push(Rect::new(10.0, 0.0, 0.5, 10.0));
    level.rooms[0].spawns[0].position = Vec2::new(18.0, 5.0);
    let catalog = catalog_with(vec![level]);
    let mut session = playing_session(&catalog, config());

    for dt in [0.6, 1.0, 0.25, 2.5, 0.6, 0.6] {
        session.tick(dt, PlayerInput::moving(Vec2::RIGHT), &catalog);
        let x = session.player().expect("hero").position.x;
        assert!(x <= 9.5, "hero crossed the wall to x={x}");
    }
    assert_eq!(session.scene(), Scene::Playing);
    assert_eq!(session.snapshot().enemies.len(), 1);
}

#[test]
fn boss_kind_killed_outside_the_boss_room_does_not_finish_the_level() {
    let mut level = gated_level();
    level.rooms[0].spawns[0].enemy = IDOL;
    level.rooms[1].spawns[0].enemy = DUMMY;
    let catalog = catalog_with(vec![level, shrine_level()]);
    let mut session = playing_session(&catalog, config());

    let input = |s: &Session| {
        if s.snapshot().room == Some(LAIR) {
            fight(s)
        } else {
            gatehouse_input(s)
        }
    };
    let mut events = run_until(&mut session, &catalog, 1200, input, |e| {
        matches!(e, GameEvent::RoomCleared { room } if *room == LAIR)
    });
    assert!(events.iter().any(|e| matches!(e, GameEvent::BossDefeated { .. })));
    assert!(events.contains(&GameEvent::RoomCleared { room: HALL }));
    assert!(events.contains(&GameEvent::RoomCleared { room: LAIR }));

    for _ in 0..20 {
        events.extend(session.tick(DT, PlayerInput::idle(), &catalog));
    }
    assert!(!events.iter().any(|e| matches!(e, GameEvent::LevelComplete { .. })));
    assert_eq!(session.scene(), Scene::Playing);
    assert_eq!(session.level_index(), 0);
}
