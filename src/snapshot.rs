/// Read-only view of the simulation for the render and HUD layer.
///
/// Positions are in world pixels; the renderer applies `camera_offset_x`.

use crate::entities::{
    EnemyKind, EnemyState, FallPhase, GamePhase, GameState, ItemAnim, ItemKind, Rgb, Sister,
    TerrainKind,
};
use crate::items::STAR_PALETTE;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Visual {
    Ground,
    Brick,
    QuestionBlock,
    UsedBlock,
    Pipe,
    MovingPlatform,
    FallingPlatform,
    LevelExit,
    Enemy(EnemyKind),
    Shell,
    Item(ItemKind),
    Player(Sister),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpriteView {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub visual: Visual,
    pub color: Rgb,
    /// Drawn blinking (invincible player, falling platform about to drop).
    pub flashing: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RunView {
    pub phase: GamePhase,
    pub score: u32,
    pub lives: u32,
    pub time_left: u32,
    pub level: u32,
    pub power_level: u8,
    pub sister: Sister,
    pub sister_name: &'static str,
    /// Highlighted entry on the intro screen.
    pub selected: Sister,
    pub camera_offset_x: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    /// In draw order: terrain, items, enemies, player.
    pub sprites: Vec<SpriteView>,
    pub run: RunView,
}

pub fn sister_color(sister: Sister) -> Rgb {
    match sister {
        Sister::Maria => Rgb(255, 0, 0),
        Sister::Luigietta => Rgb(0, 255, 0),
        Sister::Peach => Rgb(255, 192, 203),
        Sister::Daisy => Rgb(255, 255, 0),
    }
}

fn terrain_look(kind: &TerrainKind) -> (Visual, Rgb, bool) {
    match kind {
        TerrainKind::Ground => (Visual::Ground, Rgb(150, 75, 0), false),
        TerrainKind::Brick { .. } => (Visual::Brick, Rgb(210, 105, 30), false),
        TerrainKind::QuestionBlock { active: true, .. } => {
            (Visual::QuestionBlock, Rgb(255, 255, 0), false)
        }
        TerrainKind::QuestionBlock { active: false, .. } => {
            (Visual::UsedBlock, Rgb(128, 128, 128), false)
        }
        TerrainKind::Pipe => (Visual::Pipe, Rgb(0, 200, 0), false),
        TerrainKind::MovingPlatform(_) => (Visual::MovingPlatform, Rgb(200, 200, 200), false),
        TerrainKind::FallingPlatform(phase) => (
            Visual::FallingPlatform,
            Rgb(150, 150, 150),
            matches!(phase, FallPhase::Delayed(_)),
        ),
        TerrainKind::LevelExit => (Visual::LevelExit, Rgb(255, 215, 0), false),
    }
}

fn enemy_look(state: &EnemyState) -> (Visual, Rgb) {
    match state {
        EnemyState::Goombetta => (Visual::Enemy(EnemyKind::Goombetta), Rgb(165, 42, 42)),
        EnemyState::Koopette {
            shell_mode: true, ..
        } => (Visual::Shell, Rgb(200, 200, 200)),
        EnemyState::Koopette { .. } => (Visual::Enemy(EnemyKind::Koopette), Rgb(0, 128, 0)),
        EnemyState::PiranhaQueen { .. } => (Visual::Enemy(EnemyKind::PiranhaQueen), Rgb(255, 0, 0)),
        EnemyState::Bossette { .. } => (Visual::Enemy(EnemyKind::Bossette), Rgb(255, 165, 0)),
    }
}

fn item_color(kind: ItemKind, anim: &ItemAnim) -> Rgb {
    match (kind, anim) {
        (_, ItemAnim::Cycle { color_index, .. }) => STAR_PALETTE[*color_index % STAR_PALETTE.len()],
        (ItemKind::Coin, _) | (ItemKind::FeatherCap, _) => Rgb(255, 255, 0),
        (ItemKind::HeelShoe, _) => Rgb(255, 0, 0),
        (ItemKind::Purse, _) => Rgb(255, 192, 203),
        (ItemKind::Star, _) => Rgb(255, 215, 0),
        (ItemKind::OneUp, _) => Rgb(50, 205, 50),
    }
}

pub fn run_view(state: &GameState) -> RunView {
    RunView {
        phase: state.phase,
        score: state.score,
        lives: state.player.lives,
        time_left: state.time_left,
        level: state.level,
        power_level: state.player.power_level,
        sister: state.player.sister,
        sister_name: state.player.sister.name(),
        selected: state.selected,
        camera_offset_x: state.camera_offset_x,
    }
}

pub fn snapshot(state: &GameState) -> Snapshot {
    let mut sprites = Vec::with_capacity(
        state.terrain.len() + state.items.len() + state.enemies.len() + 1,
    );

    for tile in &state.terrain {
        let (visual, color, flashing) = terrain_look(&tile.kind);
        let b = &tile.body;
        sprites.push(SpriteView {
            x: b.x,
            y: b.y,
            width: b.width,
            height: b.height,
            visual,
            color,
            flashing,
        });
    }

    for item in &state.items {
        let b = &item.body;
        sprites.push(SpriteView {
            x: b.x,
            y: b.y,
            width: b.width,
            height: b.height,
            visual: Visual::Item(item.kind),
            color: item_color(item.kind, &item.anim),
            flashing: false,
        });
    }

    for enemy in &state.enemies {
        let (visual, color) = enemy_look(&enemy.state);
        let b = &enemy.body;
        sprites.push(SpriteView {
            x: b.x,
            y: b.y,
            width: b.width,
            height: b.height,
            visual,
            color,
            flashing: false,
        });
    }

    let p = &state.player;
    sprites.push(SpriteView {
        x: p.body.x,
        y: p.body.y,
        width: p.body.width,
        height: p.body.height,
        visual: Visual::Player(p.sister),
        color: sister_color(p.sister),
        flashing: p.invincible,
    });

    Snapshot {
        sprites,
        run: run_view(state),
    }
}
