use mario_sisters::compute::*;
use mario_sisters::entities::*;
use mario_sisters::levels::{LevelLayout, LevelSet, TileSpec};
use mario_sisters::{enemies, items, terrain, GameConfig, GameError};

use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn flat_layout() -> LevelLayout {
    LevelLayout {
        name: "Flat".to_string(),
        tiles: vec![TileSpec::GroundRun {
            from: 0.0,
            to: 3200.0,
            y: 568.0,
            gaps: Vec::new(),
        }],
        enemies: Vec::new(),
        items: Vec::new(),
    }
}

fn flat_with_exit() -> LevelLayout {
    let mut layout = flat_layout();
    layout.tiles.push(TileSpec::Exit {
        x: 200.0,
        base_y: 568.0,
    });
    layout
}

fn make_state_with(levels: Vec<LevelLayout>) -> GameState {
    let mut s = init_state(GameConfig::default(), LevelSet { levels }).unwrap();
    new_game(&mut s).unwrap();
    s
}

fn make_state() -> GameState {
    make_state_with(vec![flat_layout()])
}

/// Put the player at rest on the flat ground.
fn stand(s: &mut GameState, x: f32) {
    s.player.body.x = x;
    s.player.body.y = 504.0;
    s.player.body.vx = 0.0;
    s.player.body.vy = 0.0;
    s.player.on_ground = true;
}

fn step(s: &mut GameState, input: InputState) -> FrameReport {
    advance_frame(s, &input, &mut seeded_rng()).unwrap()
}

fn idle(s: &mut GameState) -> FrameReport {
    step(s, InputState::default())
}

// ── init_state / new_game ─────────────────────────────────────────────────────

#[test]
fn init_state_starts_on_intro() {
    let s = init_state(GameConfig::default(), LevelSet::builtin()).unwrap();
    assert_eq!(s.phase, GamePhase::Intro);
    assert_eq!(s.selected, Sister::Maria);
    assert!(s.terrain.is_empty());
    assert_eq!(s.score, 0);
}

#[test]
fn init_state_rejects_empty_level_set() {
    let err = init_state(GameConfig::default(), LevelSet { levels: Vec::new() }).unwrap_err();
    assert!(matches!(err, GameError::EmptyLevelSet));
}

#[test]
fn init_state_rejects_invalid_config() {
    let config = GameConfig {
        fps: 0,
        ..GameConfig::default()
    };
    let err = init_state(config, LevelSet::builtin()).unwrap_err();
    assert!(matches!(err, GameError::InvalidConfig(_)));
}

#[test]
fn intro_selection_and_start() {
    let mut s = init_state(GameConfig::default(), LevelSet::builtin()).unwrap();
    step(
        &mut s,
        InputState {
            select_down: true,
            ..Default::default()
        },
    );
    assert_eq!(s.selected, Sister::Luigietta);
    step(
        &mut s,
        InputState {
            select_up: true,
            ..Default::default()
        },
    );
    step(
        &mut s,
        InputState {
            select_up: true,
            ..Default::default()
        },
    );
    assert_eq!(s.selected, Sister::Daisy);
    assert_eq!(s.phase, GamePhase::Intro);

    step(
        &mut s,
        InputState {
            confirm_pressed: true,
            ..Default::default()
        },
    );
    assert_eq!(s.phase, GamePhase::Playing);
    assert_eq!(s.player.sister, Sister::Daisy);
    assert_eq!(s.level, 1);
    assert!(!s.terrain.is_empty());
}

#[test]
fn new_game_resets_run() {
    let mut s = make_state();
    s.score = 1234;
    s.player.lives = 7;
    s.player.power_level = 3;
    s.time_left = 40;
    new_game(&mut s).unwrap();
    assert_eq!(s.score, 0);
    assert_eq!(s.time_left, 300);
    assert_eq!(s.player.lives, 3);
    assert_eq!(s.player.power_level, 0);
    assert_eq!(s.player.body.x, 100.0);
    assert_eq!(s.player.body.y, 300.0);
}

// ── load_level ────────────────────────────────────────────────────────────────

#[test]
fn load_level_keeps_run_stats() {
    let mut s = make_state();
    s.score = 500;
    s.player.lives = 5;
    s.player.power_level = 2;
    stand(&mut s, 900.0);
    s.time_left = 12;

    load_level(&mut s, 1).unwrap();
    assert_eq!(s.score, 500);
    assert_eq!(s.player.lives, 5);
    assert_eq!(s.player.power_level, 2);
    assert_eq!(s.player.body.x, 100.0);
    assert_eq!(s.player.body.y, 300.0);
    assert_eq!(s.time_left, 12);
    assert_eq!(s.camera_offset_x, 0.0);
}

#[test]
fn load_level_is_repeatable() {
    let mut s = make_state_with(LevelSet::builtin().levels);
    let terrain = s.terrain.clone();
    let enemies = s.enemies.clone();
    let items = s.items.clone();

    for _ in 0..200 {
        idle(&mut s);
    }
    assert_ne!(s.enemies, enemies);

    load_level(&mut s, 1).unwrap();
    assert_eq!(s.terrain, terrain);
    assert_eq!(s.enemies, enemies);
    assert_eq!(s.items, items);
}

#[test]
fn load_level_unknown_index() {
    let mut s = make_state();
    let err = load_level(&mut s, 0).unwrap_err();
    assert!(matches!(err, GameError::UnknownLevel { index: 0, .. }));
    let err = load_level(&mut s, 2).unwrap_err();
    assert!(matches!(
        err,
        GameError::UnknownLevel {
            index: 2,
            available: 1
        }
    ));
    assert_eq!(s.level, 1);
}

// ── Phases ────────────────────────────────────────────────────────────────────

#[test]
fn pause_freezes_simulation() {
    let mut s = make_state();
    let report = step(
        &mut s,
        InputState {
            pause_pressed: true,
            ..Default::default()
        },
    );
    assert_eq!(report.events, vec![GameEvent::Paused]);
    assert_eq!(s.phase, GamePhase::Paused);

    let y = s.player.body.y;
    let frame = s.frame;
    for _ in 0..30 {
        idle(&mut s);
    }
    assert_eq!(s.player.body.y, y);
    assert_eq!(s.frame, frame);

    let report = step(
        &mut s,
        InputState {
            pause_pressed: true,
            ..Default::default()
        },
    );
    assert_eq!(report.events, vec![GameEvent::Resumed]);
    assert_eq!(s.phase, GamePhase::Playing);
}

#[test]
fn countdown_ticks_once_per_second() {
    let mut s = make_state();
    for _ in 0..59 {
        idle(&mut s);
    }
    assert_eq!(s.time_left, 300);
    idle(&mut s);
    assert_eq!(s.time_left, 299);
}

#[test]
fn running_out_of_time_ends_game() {
    let mut s = make_state();
    s.time_left = 1;
    s.time_counter = 59;
    let report = idle(&mut s);
    assert_eq!(s.time_left, 0);
    assert_eq!(s.phase, GamePhase::GameOver);
    assert!(report.events.contains(&GameEvent::GameOver));

    step(
        &mut s,
        InputState {
            confirm_pressed: true,
            ..Default::default()
        },
    );
    assert_eq!(s.phase, GamePhase::Intro);
}

// ── Player ────────────────────────────────────────────────────────────────────

#[test]
fn builtin_level_player_settles_on_ground() {
    let mut s = make_state_with(LevelSet::builtin().levels);
    assert_eq!(s.player.lives, 3);
    for _ in 0..300 {
        idle(&mut s);
    }
    assert_eq!(s.player.body.x, 100.0);
    assert_eq!(s.player.body.y, 504.0);
    assert_eq!(s.player.body.vy, 0.0);
    assert!(s.player.on_ground);
    assert_eq!(s.time_left, 295);
}

#[test]
fn held_direction_accelerates() {
    let mut s = make_state();
    stand(&mut s, 100.0);
    step(
        &mut s,
        InputState {
            move_right_held: true,
            ..Default::default()
        },
    );
    assert_eq!(s.player.body.vx, 0.5);
    assert_eq!(s.player.body.x, 100.5);
    assert_eq!(s.player.facing, 1.0);
}

#[test]
fn jump_leaves_ground() {
    let mut s = make_state();
    stand(&mut s, 100.0);
    step(
        &mut s,
        InputState {
            jump_pressed: true,
            ..Default::default()
        },
    );
    assert!(s.player.jumping);
    assert!(!s.player.on_ground);
    assert!(s.player.body.y < 504.0);
}

#[test]
fn maria_ability_reports_fireball() {
    let mut s = make_state();
    stand(&mut s, 100.0);
    let report = step(
        &mut s,
        InputState {
            ability_pressed: true,
            ..Default::default()
        },
    );
    assert_eq!(
        report.events,
        vec![
            GameEvent::AbilityUsed {
                sister: Sister::Maria
            },
            GameEvent::FireballThrown { direction: 1.0 },
        ]
    );
}

#[test]
fn falling_out_costs_a_life() {
    let mut s = make_state_with(vec![LevelLayout {
        name: "Void".to_string(),
        tiles: Vec::new(),
        enemies: Vec::new(),
        items: Vec::new(),
    }]);
    s.player.body.y = 601.0;
    let report = idle(&mut s);
    assert_eq!(report.events, vec![GameEvent::PlayerDied { lives_left: 2 }]);
    assert_eq!(s.player.lives, 2);
    assert_eq!(s.player.body.x, 100.0);
    assert_eq!(s.player.body.y, 300.0);
    assert_eq!(s.phase, GamePhase::Playing);

    s.player.lives = 1;
    s.player.body.y = 601.0;
    let report = idle(&mut s);
    assert!(report.events.contains(&GameEvent::GameOver));
    assert_eq!(s.phase, GamePhase::GameOver);
}

#[test]
fn camera_follows_past_midpoint() {
    let mut s = make_state();
    stand(&mut s, 300.0);
    idle(&mut s);
    assert_eq!(s.camera_offset_x, 0.0);

    stand(&mut s, 600.0);
    idle(&mut s);
    assert_eq!(s.camera_offset_x, -216.0);
}

#[test]
fn camera_returns_after_respawn() {
    let mut s = make_state();
    stand(&mut s, 1300.0);
    idle(&mut s);
    assert_eq!(s.camera_offset_x, -916.0);

    s.player.body.y = 601.0;
    let report = idle(&mut s);
    assert_eq!(report.events, vec![GameEvent::PlayerDied { lives_left: 2 }]);
    assert_eq!(s.player.body.x, 100.0);
    assert_eq!(s.camera_offset_x, 0.0);
    assert!(s.player.body.x + s.camera_offset_x >= 0.0);
}

// ── Terrain contacts ──────────────────────────────────────────────────────────

#[test]
fn bumping_question_block_releases_item() {
    let mut s = make_state();
    s.terrain
        .push(terrain::question_block(100.0, 400.0, ItemKind::HeelShoe));
    s.player.body.y = 440.0;
    s.player.body.vy = -10.0;

    let report = idle(&mut s);
    assert_eq!(
        report.events,
        vec![
            GameEvent::BlockBumped,
            GameEvent::ItemReleased {
                kind: ItemKind::HeelShoe
            },
        ]
    );
    assert_eq!(s.player.body.y, 432.0);
    assert_eq!(s.items.len(), 1);
    assert_eq!(s.items[0].kind, ItemKind::HeelShoe);
    assert_eq!(s.items[0].body.bottom(), 400.0);

    let block = s.terrain.last().unwrap();
    assert!(matches!(
        block.kind,
        TerrainKind::QuestionBlock { active: false, .. }
    ));
}

#[test]
fn bumping_empty_brick_breaks_it() {
    let mut s = make_state();
    let before = s.terrain.len();
    s.terrain.push(terrain::brick(100.0, 400.0, None));
    s.player.body.y = 440.0;
    s.player.body.vy = -10.0;

    let report = idle(&mut s);
    assert_eq!(report.events, vec![GameEvent::BrickBroken]);
    assert_eq!(s.terrain.len(), before);
}

#[test]
fn landing_triggers_falling_platform() {
    let mut s = make_state();
    s.terrain.push(terrain::falling_platform(100.0, 400.0, 96.0));
    s.player.body.y = 335.0;
    s.player.body.vy = 1.0;

    let report = idle(&mut s);
    assert_eq!(report.events, vec![GameEvent::PlatformTriggered]);
    assert!(s.player.on_ground);
    let platform = s.terrain.last().unwrap();
    assert_eq!(
        platform.kind,
        TerrainKind::FallingPlatform(FallPhase::Delayed(30))
    );
}

// ── Enemy contacts ────────────────────────────────────────────────────────────

#[test]
fn stomp_from_above_defeats_walker() {
    let mut s = make_state();
    s.enemies.push(enemies::goombetta(100.0, 536.0));
    s.player.body.y = 475.0;
    s.player.body.vy = 5.0;

    let report = idle(&mut s);
    assert_eq!(
        report.events,
        vec![GameEvent::EnemyDefeated {
            kind: EnemyKind::Goombetta,
            points: 100
        }]
    );
    assert!(s.enemies.is_empty());
    assert_eq!(s.score, 100);
    assert_eq!(s.player.body.vy, mario_sisters::constants::STOMP_BOUNCE);
}

#[test]
fn stomping_koopette_makes_shell() {
    let mut s = make_state();
    s.enemies.push(enemies::koopette(100.0, 520.0));
    s.player.body.y = 460.0;
    s.player.body.vy = 5.0;

    let report = idle(&mut s);
    assert_eq!(
        report.events,
        vec![GameEvent::EnemyStomped {
            kind: EnemyKind::Koopette,
            points: 50
        }]
    );
    assert_eq!(s.enemies.len(), 1);
    assert_eq!(s.score, 50);
}

#[test]
fn side_contact_hurts_once() {
    let mut s = make_state();
    stand(&mut s, 100.0);
    s.enemies.push(enemies::goombetta(120.0, 536.0));

    let report = idle(&mut s);
    assert_eq!(report.events, vec![GameEvent::PlayerHit { lives_left: 2 }]);
    assert!(s.player.invincible);
    assert_eq!(s.enemies.len(), 1);

    let report = idle(&mut s);
    assert!(report.events.is_empty());
    assert_eq!(s.player.lives, 2);
}

#[test]
fn last_life_lost_to_enemy_ends_game() {
    let mut s = make_state();
    stand(&mut s, 100.0);
    s.player.lives = 1;
    s.enemies.push(enemies::goombetta(120.0, 536.0));

    let report = idle(&mut s);
    assert_eq!(
        report.events,
        vec![GameEvent::PlayerHit { lives_left: 0 }, GameEvent::GameOver]
    );
    assert_eq!(s.phase, GamePhase::GameOver);
}

#[test]
fn star_power_ignores_contact() {
    let mut s = make_state();
    stand(&mut s, 100.0);
    items::apply_effect(ItemKind::Star, &mut s.player);
    s.enemies.push(enemies::goombetta(120.0, 536.0));

    let report = idle(&mut s);
    assert!(report.events.is_empty());
    assert_eq!(s.player.lives, 3);
}

#[test]
fn retracted_piranha_ignores_contact() {
    let mut s = make_state();
    stand(&mut s, 100.0);
    s.enemies.push(enemies::piranha_queen(110.0, 504.0, true));

    for _ in 0..60 {
        let report = idle(&mut s);
        assert!(report.events.is_empty());
    }
    assert_eq!(s.player.lives, 3);
    assert!(!s.player.invincible);
    assert_eq!(s.enemies.len(), 1);
}

#[test]
fn stomping_emerged_piranha_defeats_it() {
    let mut s = make_state();
    let mut piranha = enemies::piranha_queen(100.0, 504.0, true);
    piranha.state = EnemyState::PiranhaQueen {
        pipe_top: true,
        hidden: false,
        rise_timer: 100,
        current_rise: mario_sisters::constants::RISER_MAX_RISE,
    };
    s.enemies.push(piranha);
    s.player.body.y = 460.0;
    s.player.body.vy = 5.0;

    let report = idle(&mut s);
    assert_eq!(
        report.events,
        vec![GameEvent::EnemyDefeated {
            kind: EnemyKind::PiranhaQueen,
            points: 200
        }]
    );
    assert!(s.enemies.is_empty());
    assert_eq!(s.score, 200);
}

#[test]
fn enemies_below_level_are_dropped() {
    let mut s = make_state();
    s.enemies.push(enemies::goombetta(2000.0, 700.0));
    idle(&mut s);
    assert!(s.enemies.is_empty());
    assert_eq!(s.score, 0);
}

// ── Item contacts ─────────────────────────────────────────────────────────────

#[test]
fn coin_adds_score() {
    let mut s = make_state();
    stand(&mut s, 100.0);
    s.items.push(items::spawn(ItemKind::Coin, 105.0, 520.0));

    let report = idle(&mut s);
    assert_eq!(
        report.events,
        vec![GameEvent::ItemCollected {
            kind: ItemKind::Coin
        }]
    );
    assert_eq!(s.score, 100);
    assert!(s.items.is_empty());
}

#[test]
fn power_ups_apply_on_contact() {
    let mut s = make_state();
    stand(&mut s, 100.0);
    s.items.push(items::spawn(ItemKind::Purse, 100.0, 536.0));
    s.items.push(items::spawn(ItemKind::OneUp, 100.0, 536.0));

    idle(&mut s);
    assert!(s.items.is_empty());
    assert_eq!(s.player.power_level, 3);
    assert_eq!(s.player.lives, 4);
    assert_eq!(s.score, 0);
}

// ── Level exit ────────────────────────────────────────────────────────────────

#[test]
fn exit_on_last_level_wins() {
    let mut s = make_state_with(vec![flat_with_exit()]);
    stand(&mut s, 190.0);

    let report = idle(&mut s);
    assert_eq!(
        report.events,
        vec![
            GameEvent::LevelComplete {
                level: 1,
                bonus: 3000
            },
            GameEvent::GameWon,
        ]
    );
    assert_eq!(s.phase, GamePhase::Won);
    assert_eq!(s.score, 3000);
    assert_eq!(report.run.phase, GamePhase::Won);
}

#[test]
fn exit_advances_to_next_level() {
    let mut s = make_state_with(vec![flat_with_exit(), flat_layout()]);
    s.player.power_level = 2;
    s.time_left = 120;
    stand(&mut s, 190.0);

    let report = idle(&mut s);
    assert_eq!(
        report.events,
        vec![GameEvent::LevelComplete {
            level: 1,
            bonus: 1200
        }]
    );
    assert_eq!(s.phase, GamePhase::Playing);
    assert_eq!(s.level, 2);
    assert_eq!(s.score, 1200);
    assert_eq!(s.player.power_level, 2);
    assert_eq!(s.player.body.x, 100.0);
    assert_eq!(s.player.body.y, 300.0);
    assert_eq!(s.time_left, 120);
}

// ── Determinism ───────────────────────────────────────────────────────────────

#[test]
fn same_seed_same_run() {
    let run = || {
        let mut s = make_state_with(LevelSet::builtin().levels);
        load_level(&mut s, 3).unwrap();
        let mut rng = seeded_rng();
        for _ in 0..400 {
            advance_frame(&mut s, &InputState::default(), &mut rng).unwrap();
        }
        s.enemies
    };
    assert_eq!(run(), run());
}
