#![allow(dead_code)]

use game_core::{
    AbilityDefinition, AbilityId, BossPhaseDefinition, Catalog, DoorDefinition, DoorId,
    EffectSpec, EnemyDefinition, EnemyKindId, EnemySpawn, GameConfig, GameEvent, HeroDefinition,
    HeroId, KeyGrant, KeyRequirement, KeySpawn, LevelDefinition, PatrolPolicy, PlayerInput, Rect,
    RoomDefinition, RoomId, Scene, SceneRequest, Session, SkillDefinition, SkillEffect, SkillId,
    StatusKind, StatusSpec, TargetingRule, Vec2,
};

pub const DT: f32 = 0.1;

pub const SLASH: AbilityId = AbilityId(1);
pub const NOVA: AbilityId = AbilityId(3);
pub const BITE: AbilityId = AbilityId(10);
pub const CLEAVE: AbilityId = AbilityId(11);
pub const SMASH: AbilityId = AbilityId(20);
pub const QUAKE: AbilityId = AbilityId(21);

pub const KNIGHT: HeroId = HeroId(1);

pub const DUMMY: EnemyKindId = EnemyKindId(1);
pub const RAT: EnemyKindId = EnemyKindId(2);
pub const BRUTE: EnemyKindId = EnemyKindId(3);
pub const IDOL: EnemyKindId = EnemyKindId(8);
pub const OGRE: EnemyKindId = EnemyKindId(9);

pub const HALL: RoomId = RoomId(1);
pub const LAIR: RoomId = RoomId(2);
pub const EXIT: DoorId = DoorId(1);

pub const ROOM: Rect = Rect::new(0.0, 0.0, 20.0, 10.0);
pub const START: Vec2 = Vec2::new(2.0, 5.0);
pub const KEY_SPOT: Vec2 = Vec2::new(10.0, 8.0);

pub fn abilities() -> Vec<AbilityDefinition> {
    vec![
        AbilityDefinition::new(
            SLASH,
            "slash",
            0.5,
            EffectSpec::damage(30),
            TargetingRule::SingleNearest { range: 2.0 },
        ),
        AbilityDefinition::new(
            NOVA,
            "nova",
            5.0,
            EffectSpec::damage(60),
            TargetingRule::AllInRadius { radius: 6.0 },
        )
        .as_ultimate(),
        AbilityDefinition::new(
            BITE,
            "bite",
            1.0,
            EffectSpec::damage(8).with_status(StatusSpec::new(StatusKind::Poisoned, 2, 2.0).stackable()),
            TargetingRule::SingleNearest { range: 1.5 },
        ),
        AbilityDefinition::new(
            CLEAVE,
            "cleave",
            5.0,
            EffectSpec::damage(30),
            TargetingRule::SingleNearest { range: 2.0 },
        ),
        AbilityDefinition::new(
            SMASH,
            "smash",
            1.5,
            EffectSpec::damage(12),
            TargetingRule::SingleNearest { range: 2.0 },
        ),
        AbilityDefinition::new(
            QUAKE,
            "quake",
            2.0,
            EffectSpec::damage(10).with_status(StatusSpec::new(StatusKind::Slowed, 40, 1.5)),
            TargetingRule::AllInRadius { radius: 4.0 },
        ),
    ]
}

pub fn knight() -> HeroDefinition {
    HeroDefinition {
        id: KNIGHT,
        name: "Knight".into(),
        max_health: 100,
        max_energy: 50,
        attack: 0,
        defense: 5,
        speed: 5.0,
        radius: 0.5,
        abilities: vec![SLASH],
        ultimate: Some(NOVA),
    }
}

fn enemy(id: EnemyKindId, name: &str, health: u32, speed: f32, abilities: Vec<AbilityId>) -> EnemyDefinition {
    EnemyDefinition {
        id,
        name: name.into(),
        max_health: health,
        max_energy: 0,
        attack: 0,
        defense: 0,
        speed,
        radius: 0.5,
        abilities,
        aggro_range: 8.0,
        patrol: PatrolPolicy::Idle,
        gold: 2,
        score: 10,
        phases: vec![],
    }
}

pub fn enemies() -> Vec<EnemyDefinition> {
    let mut rat = enemy(RAT, "Rat", 25, 2.0, vec![BITE]);
    rat.patrol = PatrolPolicy::Wander { radius: 3.0 };

    let mut idol = enemy(IDOL, "Idol", 20, 0.0, vec![]);
    idol.phases = vec![BossPhaseDefinition {
        health_percent: 100,
        abilities: vec![],
        speed_percent: 100,
    }];

    let mut ogre = enemy(OGRE, "Ogre", 150, 1.5, vec![SMASH]);
    ogre.defense = 2;
    ogre.gold = 40;
    ogre.score = 300;
    ogre.phases = vec![
        BossPhaseDefinition {
            health_percent: 100,
            abilities: vec![SMASH],
            speed_percent: 100,
        },
        BossPhaseDefinition {
            health_percent: 66,
            abilities: vec![SMASH, QUAKE],
            speed_percent: 120,
        },
        BossPhaseDefinition {
            health_percent: 33,
            abilities: vec![QUAKE],
            speed_percent: 150,
        },
    ];

    let brute = enemy(BRUTE, "Brute", 500, 0.0, vec![CLEAVE]);

    vec![enemy(DUMMY, "Dummy", 20, 0.0, vec![]), rat, brute, idol, ogre]
}

pub fn skills() -> Vec<SkillDefinition> {
    vec![
        SkillDefinition {
            id: SkillId(1),
            name: "Toughness".into(),
            effect: SkillEffect::MaxHealth(20),
        },
        SkillDefinition {
            id: SkillId(2),
            name: "Might".into(),
            effect: SkillEffect::Attack(3),
        },
        SkillDefinition {
            id: SkillId(3),
            name: "Focus".into(),
            effect: SkillEffect::CooldownReduction(10),
        },
        SkillDefinition {
            id: SkillId(4),
            name: "Swiftness".into(),
            effect: SkillEffect::MoveSpeed(10),
        },
    ]
}

fn room(id: RoomId) -> RoomDefinition {
    RoomDefinition {
        id,
        bounds: ROOM,
        walls: vec![],
        player_start: START,
        spawns: vec![],
        doors: vec![],
        keys: vec![],
    }
}

fn spawn(enemy: EnemyKindId, x: f32, y: f32) -> EnemySpawn {
    EnemySpawn {
        enemy,
        position: Vec2::new(x, y),
        drop: None,
    }
}

/// Two dummies guarding a door that needs one key, then an idol boss room.
pub fn gated_level() -> LevelDefinition {
    let mut hall = room(HALL);
    hall.spawns = vec![spawn(DUMMY, 3.5, 5.0), spawn(DUMMY, 4.0, 5.0)];
    hall.keys = vec![KeySpawn {
        grant: KeyGrant::Generic,
        position: KEY_SPOT,
        on_clear: true,
    }];
    hall.doors = vec![DoorDefinition {
        id: EXIT,
        rect: Rect::new(19.5, 4.0, 0.5, 2.0),
        target_room: LAIR,
        entry: START,
        requirement: KeyRequirement::Count(1),
    }];

    let mut lair = room(LAIR);
    lair.spawns = vec![spawn(IDOL, 6.0, 5.0)];

    LevelDefinition {
        name: "Gatehouse".into(),
        rooms: vec![hall, lair],
        start_room: HALL,
        boss_room: LAIR,
    }
}

/// A single boss room with an idol next to the start position.
pub fn shrine_level() -> LevelDefinition {
    let mut shrine = room(LAIR);
    shrine.spawns = vec![spawn(IDOL, 3.5, 5.0)];
    LevelDefinition {
        name: "Shrine".into(),
        rooms: vec![shrine],
        start_room: LAIR,
        boss_room: LAIR,
    }
}

/// A brute next to the start, inside a room whose boss is out of reach.
pub fn duel_level() -> LevelDefinition {
    let mut pit = room(HALL);
    pit.spawns = vec![spawn(BRUTE, 3.0, 5.0), spawn(IDOL, 18.0, 9.0)];
    LevelDefinition {
        name: "Pit".into(),
        rooms: vec![pit],
        start_room: HALL,
        boss_room: HALL,
    }
}

/// Rats that chase and poison, plus the phased ogre.
pub fn arena_level() -> LevelDefinition {
    let mut arena = room(HALL);
    arena.spawns = vec![
        spawn(RAT, 8.0, 3.0),
        spawn(RAT, 8.0, 7.0),
        spawn(OGRE, 14.0, 5.0),
    ];
    LevelDefinition {
        name: "Arena".into(),
        rooms: vec![arena],
        start_room: HALL,
        boss_room: HALL,
    }
}

pub fn catalog_with(levels: Vec<LevelDefinition>) -> Catalog {
    let mut catalog = Catalog::new().with_hero(knight());
    for ability in abilities() {
        catalog.insert_ability(ability);
    }
    for enemy in enemies() {
        catalog.insert_enemy(enemy);
    }
    for skill in skills() {
        catalog.insert_skill(skill);
    }
    for level in levels {
        catalog.push_level(level);
    }
    catalog
}

pub fn config() -> GameConfig {
    GameConfig {
        intro_duration: 0.0,
        ..GameConfig::default()
    }
}

/// Start → HeroSelect → LevelIntro → Playing.
pub fn playing_session(catalog: &Catalog, config: GameConfig) -> Session {
    let mut session = Session::new(config);
    session.request(SceneRequest::Confirm, catalog).expect("confirm");
    session
        .request(SceneRequest::ChooseHero(KNIGHT), catalog)
        .expect("choose hero");
    session
        .request(SceneRequest::DismissIntro, catalog)
        .expect("dismiss intro");
    assert_eq!(session.scene(), Scene::Playing);
    session.drain_events();
    session
}

/// Input that walks toward `target`.
pub fn walk_toward(from: Vec2, target: Vec2) -> PlayerInput {
    PlayerInput::moving(target - from)
}

/// Simple fighter: approach the nearest enemy and swing when in range.
pub fn fight(session: &Session) -> PlayerInput {
    let snapshot = session.snapshot();
    let (Some(player), Some(enemy)) = (snapshot.player.as_ref(), snapshot.nearest_enemy()) else {
        return PlayerInput::idle();
    };
    if player.position.distance(enemy.position) <= 1.8 {
        PlayerInput::idle().attacking()
    } else {
        walk_toward(player.position, enemy.position)
    }
}

/// Ticks until `done` holds for an event or the frame budget runs out.
/// Returns every event seen.
pub fn run_until(
    session: &mut Session,
    catalog: &Catalog,
    frames: usize,
    mut input: impl FnMut(&Session) -> PlayerInput,
    done: impl Fn(&GameEvent) -> bool,
) -> Vec<GameEvent> {
    let mut seen = Vec::new();
    for _ in 0..frames {
        let frame_input = input(session);
        let events = session.tick(DT, frame_input, catalog);
        let finished = events.iter().any(&done);
        seen.extend(events);
        if finished {
            break;
        }
    }
    seen
}
