/// Frame orchestration.
///
/// `advance_frame` is the single entry point the front-end calls once per
/// fixed 60 Hz step.  It mutates the `GameState` in place and reports what
/// happened.  All randomness comes through the injected `rng` so callers
/// control determinism (tests pass a seeded `StdRng`).

use log::{debug, info};
use rand::Rng;

use crate::config::GameConfig;
use crate::constants::{COIN_VALUE, STOMP_BOUNCE, TIME_BONUS_PER_SECOND};
use crate::enemies;
use crate::entities::{
    GameEvent, GamePhase, GameState, InputState, ItemKind, Sister, StompOutcome, TerrainKind,
};
use crate::error::{GameError, Result};
use crate::items;
use crate::levels::LevelSet;
use crate::physics::{Collisions, VerticalHit};
use crate::player;
use crate::snapshot::{run_view, RunView};
use crate::terrain::{self, BumpOutcome};

/// What one call to `advance_frame` produced.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameReport {
    pub run: RunView,
    pub events: Vec<GameEvent>,
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build a state sitting on the intro screen.  No level is loaded until
/// `new_game`.
pub fn init_state(config: GameConfig, levels: LevelSet) -> Result<GameState> {
    config.validate()?;
    if levels.is_empty() {
        return Err(GameError::EmptyLevelSet);
    }
    let player = player::spawn(
        Sister::Maria,
        config.spawn_x,
        config.spawn_y,
        config.starting_lives,
    );
    Ok(GameState {
        phase: GamePhase::Intro,
        selected: Sister::Maria,
        player,
        terrain: Vec::new(),
        enemies: Vec::new(),
        items: Vec::new(),
        score: 0,
        time_left: config.time_budget,
        time_counter: 0,
        level: 1,
        camera_offset_x: 0.0,
        frame: 0,
        levels,
        config,
    })
}

/// Reset the run: fresh player of the selected sister, zero score, level 1.
pub fn new_game(state: &mut GameState) -> Result<()> {
    state.score = 0;
    state.frame = 0;
    state.time_left = state.config.time_budget;
    state.time_counter = 0;
    state.player = player::spawn(
        state.selected,
        state.config.spawn_x,
        state.config.spawn_y,
        state.config.starting_lives,
    );
    load_level(state, 1)?;
    state.phase = GamePhase::Playing;
    info!("new game as {}", state.selected.name());
    Ok(())
}

/// Replace every transient entity with the layout's fresh set.  The player
/// keeps lives, score and power level but goes back to the spawn point.
/// The remaining time carries over; only `new_game` refills it.
pub fn load_level(state: &mut GameState, index: u32) -> Result<()> {
    let layout = state.levels.get(index)?;
    let fresh = layout.build();
    info!("loading level {} ({})", index, layout.name);

    state.terrain = fresh.terrain;
    state.enemies = fresh.enemies;
    state.items = fresh.items;
    state.level = index;
    state.camera_offset_x = 0.0;
    player::respawn(&mut state.player, state.config.spawn_x, state.config.spawn_y);
    Ok(())
}

// ── Per-frame entry point ────────────────────────────────────────────────────

/// Advance the simulation by one frame.
///
/// Only level loading can fail, and only when the level set is malformed.
pub fn advance_frame(
    state: &mut GameState,
    input: &InputState,
    rng: &mut impl Rng,
) -> Result<FrameReport> {
    let mut events = Vec::new();

    match state.phase {
        GamePhase::Intro => {
            if input.select_up {
                state.selected = state.selected.previous();
            }
            if input.select_down {
                state.selected = state.selected.next();
            }
            if input.confirm_pressed {
                new_game(state)?;
            }
        }
        GamePhase::Playing => {
            if input.pause_pressed {
                state.phase = GamePhase::Paused;
                events.push(GameEvent::Paused);
            } else {
                step_playing(state, input, rng, &mut events)?;
            }
        }
        GamePhase::Paused => {
            if input.pause_pressed {
                state.phase = GamePhase::Playing;
                events.push(GameEvent::Resumed);
            }
        }
        GamePhase::GameOver | GamePhase::Won => {
            if input.confirm_pressed {
                state.phase = GamePhase::Intro;
            }
        }
    }

    Ok(FrameReport {
        run: run_view(state),
        events,
    })
}

fn game_over(state: &mut GameState, events: &mut Vec<GameEvent>) {
    state.phase = GamePhase::GameOver;
    events.push(GameEvent::GameOver);
    info!("game over with score {}", state.score);
}

/// One playing frame, in fixed order:
///  1. Real-time countdown (once per `fps` frames)
///  2. Press and held movement intents
///  3. Moving / falling terrain
///  4. Player physics, then platform triggers and block bumps
///  5. Fall death
///  6. Camera
///  7. Enemies, then player ↔ enemy contact
///  8. Items, then player ↔ item contact
///  9. Player ↔ exit contact
fn step_playing(
    state: &mut GameState,
    input: &InputState,
    rng: &mut impl Rng,
    events: &mut Vec<GameEvent>,
) -> Result<()> {
    state.frame += 1;

    // ── 1. Countdown ─────────────────────────────────────────────────────────
    state.time_counter += 1;
    if state.time_counter >= state.config.fps {
        state.time_counter = 0;
        state.time_left = state.time_left.saturating_sub(1);
        if state.time_left == 0 {
            game_over(state, events);
            return Ok(());
        }
    }

    // ── 2. Intents ───────────────────────────────────────────────────────────
    apply_intents(state, input, events);

    // ── 3. Terrain ───────────────────────────────────────────────────────────
    let bottom = state.config.level_bottom();
    terrain::update_all(&mut state.terrain, bottom);

    // ── 4. Player ────────────────────────────────────────────────────────────
    let hits = player::update(&mut state.player, &state.terrain);
    resolve_terrain_contacts(state, hits, events);

    // ── 5. Fall death ────────────────────────────────────────────────────────
    if state.player.body.top() > bottom {
        state.player.lives = state.player.lives.saturating_sub(1);
        events.push(GameEvent::PlayerDied {
            lives_left: state.player.lives,
        });
        if state.player.lives == 0 {
            game_over(state, events);
            return Ok(());
        }
        player::respawn(&mut state.player, state.config.spawn_x, state.config.spawn_y);
    }

    // ── 6. Camera ────────────────────────────────────────────────────────────
    update_camera(state);

    // ── 7. Enemies ───────────────────────────────────────────────────────────
    for enemy in state.enemies.iter_mut() {
        enemies::update(enemy, &state.terrain, rng);
    }
    state.enemies.retain(|e| e.body.top() <= bottom);
    resolve_enemy_contacts(state, events);
    if state.phase != GamePhase::Playing {
        return Ok(());
    }

    // ── 8. Items ─────────────────────────────────────────────────────────────
    for item in state.items.iter_mut() {
        items::update(item, &state.terrain);
    }
    state.items.retain(|i| i.body.top() <= bottom);
    resolve_item_contacts(state, events);

    // ── 9. Exit ──────────────────────────────────────────────────────────────
    let at_exit = state.terrain.iter().any(|t| {
        t.kind == TerrainKind::LevelExit && state.player.body.overlaps(&t.body)
    });
    if at_exit {
        complete_level(state, events)?;
    }

    Ok(())
}

fn apply_intents(state: &mut GameState, input: &InputState, events: &mut Vec<GameEvent>) {
    let p = &mut state.player;

    if input.jump_pressed {
        player::jump(p);
    }
    if input.ability_pressed && player::use_special_ability(p) {
        events.push(GameEvent::AbilityUsed { sister: p.sister });
        if p.sister == Sister::Maria {
            events.push(GameEvent::FireballThrown {
                direction: p.facing,
            });
        }
    }

    if input.move_left_pressed || input.move_left_held {
        player::move_left(p);
    }
    if input.move_right_pressed || input.move_right_held {
        player::move_right(p);
    }
}

/// Landing on an idle falling platform starts it; a head bump activates
/// bricks and question blocks.
fn resolve_terrain_contacts(state: &mut GameState, hits: Collisions, events: &mut Vec<GameEvent>) {
    match hits.vertical {
        Some(VerticalHit::Landed(i)) => {
            if terrain::trigger(&mut state.terrain[i]) {
                events.push(GameEvent::PlatformTriggered);
            }
        }
        Some(VerticalHit::Bumped(i)) => match terrain::bump(&mut state.terrain[i]) {
            BumpOutcome::Released(kind) => {
                let block = state.terrain[i].body;
                let (w, h) = items::size(kind);
                let x = block.x + (block.width - w) / 2.0;
                state.items.push(items::spawn(kind, x, block.top() - h));
                events.push(GameEvent::BlockBumped);
                events.push(GameEvent::ItemReleased { kind });
                debug!("block released {:?}", kind);
            }
            BumpOutcome::Broken => {
                state.terrain.remove(i);
                events.push(GameEvent::BrickBroken);
            }
            BumpOutcome::Nothing => {}
        },
        None => {}
    }
}

/// Keep the player centred once past the screen midpoint.  Never shows
/// anything left of the level start.
fn update_camera(state: &mut GameState) {
    let center = state.player.body.center_x();
    let mid = state.config.screen_midpoint();
    state.camera_offset_x = (-(center - mid)).min(0.0);
}

/// Coming down from above the enemy's middle is a stomp; any other touch
/// hurts the player.
fn resolve_enemy_contacts(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let player = &mut state.player;
    let score = &mut state.score;
    let mut out_of_lives = false;

    state.enemies.retain_mut(|enemy| {
        if out_of_lives || !enemy.is_contactable() || !player.body.overlaps(&enemy.body) {
            return true;
        }

        let stomping =
            player.body.bottom() < enemy.body.center_y() && player.body.vy > 0.0;
        if !stomping {
            if player::hit(player) {
                events.push(GameEvent::PlayerHit {
                    lives_left: player.lives,
                });
                out_of_lives = player.lives == 0;
            }
            return true;
        }

        let kind = enemy.kind();
        player.body.vy = STOMP_BOUNCE;
        match enemies::stomp(enemy) {
            StompOutcome::Damaged { points } => {
                *score += points;
                events.push(GameEvent::EnemyStomped { kind, points });
                true
            }
            StompOutcome::Defeated { points } => {
                *score += points;
                events.push(GameEvent::EnemyDefeated { kind, points });
                false
            }
        }
    });

    if out_of_lives {
        game_over(state, events);
    }
}

fn resolve_item_contacts(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let player = &mut state.player;
    let score = &mut state.score;

    state.items.retain(|item| {
        if !player.body.overlaps(&item.body) {
            return true;
        }
        if item.kind == ItemKind::Coin {
            *score += COIN_VALUE;
        } else {
            items::apply_effect(item.kind, player);
        }
        events.push(GameEvent::ItemCollected { kind: item.kind });
        debug!("collected {:?}", item.kind);
        false
    });
}

/// Award the time bonus and move on, or win after the last level.
fn complete_level(state: &mut GameState, events: &mut Vec<GameEvent>) -> Result<()> {
    let bonus = state.time_left * TIME_BONUS_PER_SECOND;
    state.score += bonus;
    events.push(GameEvent::LevelComplete {
        level: state.level,
        bonus,
    });

    let next = state.level + 1;
    if next as usize > state.levels.len() {
        state.level = next;
        state.phase = GamePhase::Won;
        events.push(GameEvent::GameWon);
        info!("won with score {}", state.score);
        Ok(())
    } else {
        load_level(state, next)
    }
}
