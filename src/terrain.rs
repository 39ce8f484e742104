/// Terrain construction and per-frame terrain behaviour.
///
/// Only moving and falling platforms change on their own; blocks change when
/// the player bumps them from below.

use crate::constants::{FALL_DELAY, PLAYER_GRAVITY, TILE_SIZE};
use crate::entities::{Axis, FallPhase, ItemKind, Oscillation, TerrainKind, TerrainTile};
use crate::physics::Body;

// ── Constructors ─────────────────────────────────────────────────────────────

fn tile(x: f32, y: f32, width: f32, height: f32, kind: TerrainKind) -> TerrainTile {
    TerrainTile {
        body: Body::new(x, y, width, height),
        solid: true,
        kind,
    }
}

pub fn ground(x: f32, y: f32, width: f32) -> TerrainTile {
    tile(x, y, width, TILE_SIZE, TerrainKind::Ground)
}

pub fn brick(x: f32, y: f32, contents: Option<ItemKind>) -> TerrainTile {
    tile(x, y, TILE_SIZE, TILE_SIZE, TerrainKind::Brick { contents })
}

pub fn question_block(x: f32, y: f32, item: ItemKind) -> TerrainTile {
    tile(
        x,
        y,
        TILE_SIZE,
        TILE_SIZE,
        TerrainKind::QuestionBlock { item, active: true },
    )
}

/// A two-tile-wide pipe standing on `base_y`, `height_tiles` tall.
pub fn pipe(x: f32, base_y: f32, height_tiles: u32) -> TerrainTile {
    let height = TILE_SIZE * height_tiles as f32;
    tile(x, base_y - height, TILE_SIZE * 2.0, height, TerrainKind::Pipe)
}

pub fn moving_platform(
    x: f32,
    y: f32,
    width: f32,
    axis: Axis,
    distance: f32,
    speed: f32,
) -> TerrainTile {
    tile(
        x,
        y,
        width,
        TILE_SIZE,
        TerrainKind::MovingPlatform(Oscillation {
            axis,
            distance,
            speed,
            direction: 1.0,
            travelled: 0.0,
        }),
    )
}

pub fn falling_platform(x: f32, y: f32, width: f32) -> TerrainTile {
    tile(x, y, width, TILE_SIZE, TerrainKind::FallingPlatform(FallPhase::Idle))
}

/// Five-tile flag pole standing on `base_y`.  Passable.
pub fn level_exit(x: f32, base_y: f32) -> TerrainTile {
    let height = TILE_SIZE * 5.0;
    TerrainTile {
        body: Body::new(x, base_y - height, TILE_SIZE, height),
        solid: false,
        kind: TerrainKind::LevelExit,
    }
}

// ── Per-frame update ─────────────────────────────────────────────────────────

fn oscillate(body: &mut Body, osc: &mut Oscillation) {
    let step = osc.speed * osc.direction;
    match osc.axis {
        Axis::Horizontal => body.x += step,
        Axis::Vertical => body.y += step,
    }
    osc.travelled += osc.speed;
    if osc.travelled >= osc.distance {
        osc.direction = -osc.direction;
        osc.travelled = 0.0;
    }
}

fn fall(body: &mut Body, phase: &mut FallPhase) {
    match *phase {
        FallPhase::Idle => {}
        FallPhase::Delayed(0) => {
            let speed = PLAYER_GRAVITY;
            body.y += speed;
            *phase = FallPhase::Falling { speed };
        }
        FallPhase::Delayed(n) => *phase = FallPhase::Delayed(n - 1),
        FallPhase::Falling { speed } => {
            let speed = speed + PLAYER_GRAVITY;
            body.y += speed;
            *phase = FallPhase::Falling { speed };
        }
    }
}

/// Advance one tile.  Static kinds are untouched.
pub fn update(tile: &mut TerrainTile) {
    match &mut tile.kind {
        TerrainKind::MovingPlatform(osc) => oscillate(&mut tile.body, osc),
        TerrainKind::FallingPlatform(phase) => fall(&mut tile.body, phase),
        _ => {}
    }
}

/// Advance every tile, then drop falling platforms that left the level.
pub fn update_all(terrain: &mut Vec<TerrainTile>, level_bottom: f32) {
    for tile in terrain.iter_mut() {
        update(tile);
    }
    terrain.retain(|tile| {
        !(matches!(tile.kind, TerrainKind::FallingPlatform(_)) && tile.body.top() > level_bottom)
    });
}

// ── Player interactions ──────────────────────────────────────────────────────

/// Start an idle falling platform's countdown.  Returns true if it was idle.
pub fn trigger(tile: &mut TerrainTile) -> bool {
    match &mut tile.kind {
        TerrainKind::FallingPlatform(phase @ FallPhase::Idle) => {
            *phase = FallPhase::Delayed(FALL_DELAY);
            true
        }
        _ => false,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BumpOutcome {
    Nothing,
    /// Spawn this item just above the block.
    Released(ItemKind),
    /// Remove the block.
    Broken,
}

/// Head bump from below.  A brick gives up its item before it will break;
/// a question block pays out once.
pub fn bump(tile: &mut TerrainTile) -> BumpOutcome {
    match &mut tile.kind {
        TerrainKind::Brick { contents } => match contents.take() {
            Some(kind) => BumpOutcome::Released(kind),
            None => BumpOutcome::Broken,
        },
        TerrainKind::QuestionBlock { item, active } if *active => {
            *active = false;
            BumpOutcome::Released(*item)
        }
        _ => BumpOutcome::Nothing,
    }
}
