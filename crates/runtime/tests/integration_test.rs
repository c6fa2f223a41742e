use std::sync::Arc;

use game_content::bundled_data_dir;
use game_core::{
    AbilityDefinition, AbilityId, BossPhaseDefinition, Catalog, EffectSpec, EnemyDefinition,
    EnemyKindId, EnemySpawn, GameConfig, GameEvent, HeroDefinition, HeroId, LevelDefinition,
    PatrolPolicy, PlayerInput, ProgressSnapshot, Rect, RoomDefinition, RoomId, Scene,
    SceneRequest, TargetingRule, TransitionError, Vec2,
};
use runtime::repository;
use runtime::{
    Autopilot, FileProgressRepository, InMemoryProgressRepository, ProgressRepository,
    RepositoryError, Runtime, RuntimeConfig, RuntimeError, ScriptedInput, Topic,
};

const KNIGHT: HeroId = HeroId(1);
const SLASH: AbilityId = AbilityId(1);
const CLEAVE: AbilityId = AbilityId(2);
const IDOL: EnemyKindId = EnemyKindId(1);
const BRUTE: EnemyKindId = EnemyKindId(2);
const ROOM: RoomId = RoomId(1);

fn headless() -> RuntimeConfig {
    RuntimeConfig {
        game_config: GameConfig {
            intro_duration: 0.0,
            ..GameConfig::default()
        },
        frame_rate: 10,
        realtime: false,
        ..RuntimeConfig::default()
    }
}

fn enemy(id: EnemyKindId, name: &str, health: u32, abilities: Vec<AbilityId>) -> EnemyDefinition {
    EnemyDefinition {
        id,
        name: name.into(),
        max_health: health,
        max_energy: 0,
        attack: 0,
        defense: 0,
        speed: 0.0,
        radius: 0.5,
        abilities,
        aggro_range: 8.0,
        patrol: PatrolPolicy::Idle,
        gold: 2,
        score: 10,
        phases: vec![],
    }
}

/// One room. The idol boss stands beside the hero; a brute may stand on the
/// other side.
fn shrine(with_brute: bool) -> Arc<Catalog> {
    let mut idol = enemy(IDOL, "Idol", 20, vec![]);
    idol.phases = vec![BossPhaseDefinition {
        health_percent: 100,
        abilities: vec![],
        speed_percent: 100,
    }];

    let mut spawns = vec![EnemySpawn {
        enemy: IDOL,
        position: Vec2::new(if with_brute { 18.0 } else { 3.5 }, 5.0),
        drop: None,
    }];
    if with_brute {
        spawns.push(EnemySpawn {
            enemy: BRUTE,
            position: Vec2::new(3.0, 5.0),
            drop: None,
        });
    }

    let catalog = Catalog::new()
        .with_ability(AbilityDefinition::new(
            SLASH,
            "slash",
            0.5,
            EffectSpec::damage(30),
            TargetingRule::SingleNearest { range: 2.0 },
        ))
        .with_ability(AbilityDefinition::new(
            CLEAVE,
            "cleave",
            5.0,
            EffectSpec::damage(30),
            TargetingRule::SingleNearest { range: 2.0 },
        ))
        .with_hero(HeroDefinition {
            id: KNIGHT,
            name: "Knight".into(),
            max_health: 100,
            max_energy: 50,
            attack: 0,
            defense: 5,
            speed: 5.0,
            radius: 0.5,
            abilities: vec![SLASH],
            ultimate: None,
        })
        .with_enemy(idol)
        .with_enemy(enemy(BRUTE, "Brute", 500, vec![CLEAVE]))
        .with_level(LevelDefinition {
            name: "Shrine".into(),
            rooms: vec![RoomDefinition {
                id: ROOM,
                bounds: Rect::new(0.0, 0.0, 20.0, 10.0),
                walls: vec![],
                player_start: Vec2::new(2.0, 5.0),
                spawns,
                doors: vec![],
                keys: vec![],
            }],
            start_room: ROOM,
            boss_room: ROOM,
        });
    Arc::new(catalog)
}

/// End-to-end run driven by the autopilot, from the title screen to victory.
#[tokio::test]
async fn test_autopilot_clears_a_level_and_persists_progress() {
    println!("\n════════════════════════════════════════════════════════");
    println!("  Autopilot Run");
    println!("════════════════════════════════════════════════════════\n");

    let content = shrine(false);
    let repository = Arc::new(InMemoryProgressRepository::new());
    let mut runtime = Runtime::builder()
        .config(headless())
        .content(content.clone())
        .repository(repository.clone())
        .build()
        .expect("Runtime should build");
    let mut scenes = runtime.subscribe(Topic::Scene);

    let mut pilot = Autopilot::new(KNIGHT, content);
    let summary = runtime.run(&mut pilot, Some(600)).await.expect("run");
    println!("✓ Finished after {} frames in {}", summary.frames, summary.scene);

    assert_eq!(summary.scene, Scene::Victory);
    assert_eq!(summary.score, 10);

    let mut path = Vec::new();
    while let Ok(event) = scenes.try_recv() {
        if let GameEvent::SceneChanged { to, .. } = event.event {
            path.push(to);
        }
    }
    assert_eq!(
        path,
        vec![Scene::HeroSelect, Scene::LevelIntro, Scene::Playing, Scene::Victory]
    );

    let stored = repository
        .load()
        .expect("load")
        .expect("progress saved on victory");
    assert_eq!(stored.best_score, 10);
    assert_eq!(stored.hero, Some(KNIGHT));
    println!("✓ Progress persisted: best score {}", stored.best_score);
}

#[tokio::test]
async fn test_scripted_hero_dies_to_an_unanswered_brute() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let repository = Arc::new(FileProgressRepository::new(tmp.path()).expect("repository"));
    let mut runtime = Runtime::builder()
        .config(headless())
        .content(shrine(true))
        .repository(repository.clone())
        .build()
        .expect("Runtime should build");

    let mut script = ScriptedInput::new([]).with_requests([
        SceneRequest::Confirm,
        SceneRequest::ChooseHero(KNIGHT),
        SceneRequest::DismissIntro,
    ]);
    let summary = runtime.run(&mut script, Some(400)).await.expect("run");

    assert_eq!(summary.scene, Scene::GameOver);
    assert!(summary.frames < 400);
    assert!(repository.path().exists());
    assert_eq!(
        repository.load().expect("load").map(|p| p.hero),
        Some(Some(KNIGHT))
    );
}

#[tokio::test]
async fn test_frame_limit_stops_the_loop() {
    let mut runtime = Runtime::builder()
        .config(headless())
        .content(shrine(false))
        .build()
        .expect("Runtime should build");

    let mut script = ScriptedInput::default();
    let summary = runtime.run(&mut script, Some(5)).await.expect("run");
    assert_eq!(summary.frames, 5);
    assert_eq!(summary.scene, Scene::Start);
}

#[tokio::test]
async fn test_invalid_request_is_rejected_without_side_effects() {
    let mut runtime = Runtime::builder()
        .config(headless())
        .content(shrine(false))
        .build()
        .expect("Runtime should build");
    let before = runtime.snapshot();

    let err = runtime.request(SceneRequest::Pause).expect_err("pause from start");
    assert!(matches!(err, RuntimeError::Transition(TransitionError::InvalidTransition { .. })));
    assert_eq!(runtime.snapshot(), before);
}

#[tokio::test]
async fn test_step_publishes_to_subscribers() {
    let mut runtime = Runtime::builder()
        .config(headless())
        .content(shrine(true))
        .build()
        .expect("Runtime should build");
    let mut combat = runtime.subscribe(Topic::Combat);
    let mut scenes = runtime.subscribe(Topic::Scene);

    runtime.request(SceneRequest::Confirm).expect("confirm");
    runtime.request(SceneRequest::ChooseHero(KNIGHT)).expect("hero");
    runtime.request(SceneRequest::DismissIntro).expect("intro");

    let received = scenes.recv().await.expect("scene event");
    assert_eq!(
        received.event,
        GameEvent::SceneChanged {
            from: Scene::Start,
            to: Scene::HeroSelect,
        }
    );

    let events = runtime.step(0.1, PlayerInput::idle()).expect("step");
    assert!(events.iter().any(|e| matches!(e, GameEvent::Damaged { .. })));

    let mut saw_damage = false;
    while let Ok(event) = combat.try_recv() {
        assert_eq!(event.topic(), Topic::Combat);
        saw_damage |= matches!(event.event, GameEvent::Damaged { .. });
    }
    assert!(saw_damage);
}

#[test]
fn test_builder_requires_content() {
    let err = Runtime::builder().build().err().expect("no content");
    assert!(matches!(err, RuntimeError::MissingContent));
}

#[tokio::test]
async fn test_bundled_content_runs_under_autopilot() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let repository = Arc::new(FileProgressRepository::new(tmp.path()).expect("repository"));
    let mut runtime = Runtime::builder()
        .config(headless())
        .data_dir(bundled_data_dir())
        .expect("bundled content")
        .repository(repository.clone())
        .build()
        .expect("Runtime should build");
    let mut scenes = runtime.subscribe(Topic::Scene);

    let mut pilot = Autopilot::new(KNIGHT, runtime.content());
    let summary = runtime.run(&mut pilot, Some(3_000)).await.expect("run");
    println!("✓ Bundled run: {summary:?}");

    let mut reached_playing = false;
    while let Ok(event) = scenes.try_recv() {
        reached_playing |= matches!(
            event.event,
            GameEvent::SceneChanged {
                to: Scene::Playing,
                ..
            }
        );
    }
    assert!(reached_playing);
    assert_ne!(summary.scene, Scene::Error);
    if summary.scene.is_terminal() {
        assert!(repository.load().expect("load").is_some());
    }
}

/// Store whose writes always fail.
struct ReadOnlyRepository;

impl ProgressRepository for ReadOnlyRepository {
    fn load(&self) -> repository::Result<Option<ProgressSnapshot>> {
        Ok(None)
    }

    fn save(&self, _progress: &ProgressSnapshot) -> repository::Result<()> {
        Err(RepositoryError::NoSaveDirectory)
    }

    fn clear(&self) -> repository::Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn test_rejected_requests_keep_the_loop_running() {
    let mut runtime = Runtime::builder()
        .config(headless())
        .content(shrine(false))
        .build()
        .expect("Runtime should build");

    // Pause is not accepted on the title screen.
    let mut script = ScriptedInput::default().with_requests([SceneRequest::Pause; 3]);
    let summary = runtime.run(&mut script, Some(10)).await.expect("run");
    assert_eq!(summary.frames, 10);
    assert_eq!(summary.scene, Scene::Start);
}

#[tokio::test]
async fn test_failed_save_stops_the_loop_with_repository_error() {
    let mut runtime = Runtime::builder()
        .config(headless())
        .content(shrine(true))
        .repository(Arc::new(ReadOnlyRepository))
        .build()
        .expect("Runtime should build");

    let mut script = ScriptedInput::new([]).with_requests([
        SceneRequest::Confirm,
        SceneRequest::ChooseHero(KNIGHT),
        SceneRequest::DismissIntro,
    ]);
    let err = runtime
        .run(&mut script, Some(400))
        .await
        .expect_err("save failure surfaces");
    assert!(matches!(err, RuntimeError::Repository(RepositoryError::NoSaveDirectory)));
    assert_eq!(runtime.session().scene(), Scene::GameOver);
}
