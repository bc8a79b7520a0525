//! End-to-end runs of the simulation over the built-in content tables.

use crawl_content::{default_content, monster_catalog, Difficulty, MonsterLoader};
use crawl_core::{
    ActionError, GameConfig, GameSession, NewGame, PcgDice, Phase, Position, ShopCategory,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn new_session(seed: u64) -> GameSession {
    GameSession::new(
        default_content(Difficulty::Normal),
        GameConfig::new(),
        NewGame {
            seed,
            skills: Vec::new(),
            stats: None,
        },
    )
}

#[test]
fn a_waited_out_run_always_ends() {
    init_tracing();
    let mut session = new_session(7);
    let mut steps = 0;
    loop {
        if matches!(session.state().phase, Phase::GameOver { .. }) {
            break;
        }
        if matches!(session.state().phase, Phase::ChoosingLevelUp { .. }) {
            session.choose_level_up(0).unwrap();
        } else if session.wait_turn().is_err() {
            break;
        }

        let state = session.state();
        assert!(state.player.hp <= state.player.max_hp);
        assert!(state.player.torch <= state.player.max_torch);
        steps += 1;
        assert!(steps < 2000, "run never ended");
    }
    assert!(matches!(session.state().phase, Phase::GameOver { .. }));
    assert_eq!(session.wait_turn(), Err(ActionError::GameOver));
}

#[test]
fn the_first_floor_shop_carries_no_specials() {
    let mut session = new_session(11);
    let stock = session.open_shop().unwrap().to_vec();
    assert!(!stock.is_empty());
    assert!(stock.len() <= 8);
    assert!(stock.iter().all(|i| i.category != ShopCategory::Special));

    // A fresh player has no gold, and specials are not even on the shelf.
    let first = stock[0].id.clone();
    assert_eq!(session.purchase(&first), Err(ActionError::CannotAfford));
    assert_eq!(
        session.purchase("exp_orb"),
        Err(ActionError::UnknownShopItem("exp_orb".to_owned()))
    );
}

#[test]
fn floor_one_spawns_only_early_archetypes() {
    let catalog = monster_catalog();
    let mut dice = PcgDice::new(3);
    for _ in 0..50 {
        let def = catalog.pick(1, &mut dice).unwrap();
        assert!(def.id == "goblin" || def.id == "slime", "got {}", def.id);
    }
}

#[test]
fn nightmare_multipliers_reach_the_spawned_enemy() {
    let catalog = monster_catalog();
    let goblin = catalog.get("goblin").unwrap();
    let spawned = goblin.spawn(Position::new(2, 2), 1, &Difficulty::Nightmare.multipliers());
    assert_eq!(spawned.hp, 22);
    assert_eq!(spawned.attack, 5);
    assert_eq!(spawned.exp, 4);
}

#[test]
fn the_builtin_roster_round_trips_through_ron() {
    let catalog = monster_catalog();
    let source = ron::to_string(&catalog).unwrap();
    let parsed = MonsterLoader::parse(&source).unwrap();
    assert_eq!(parsed, catalog);
}

#[test]
fn a_loaded_catalog_drives_floor_population() {
    let source = r#"
        (
            monsters: [
                (
                    id: "training_dummy",
                    name: "Training Dummy",
                    glyph: 'd',
                    min_floor: 1,
                    max_floor: 99,
                    hp: (10, 0),
                    attack: (0, 0),
                    defense: (0, 0),
                    exp: (1, 0),
                    evasion: 0,
                    speed: 10,
                ),
            ],
        )
    "#;
    let mut content = default_content(Difficulty::Normal);
    content.monsters = MonsterLoader::parse(source).unwrap();

    let session = GameSession::new(
        content,
        GameConfig::new(),
        NewGame {
            seed: 5,
            skills: Vec::new(),
            stats: None,
        },
    );
    let enemies = &session.state().enemies;
    assert!(!enemies.is_empty());
    assert!(enemies.iter().all(|e| e.kind == "training_dummy"));
}
