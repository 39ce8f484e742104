/// All game entity types: pure data, no logic.

use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::levels::LevelSet;
use crate::physics::Body;

// ── Colours ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

// ── Terrain ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Back-and-forth motion of a moving platform.
#[derive(Clone, Debug, PartialEq)]
pub struct Oscillation {
    pub axis: Axis,
    /// Distance covered before reversing.
    pub distance: f32,
    pub speed: f32,
    /// +1 away from the start, -1 back towards it.
    pub direction: f32,
    /// Distance covered since the last reversal.
    pub travelled: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FallPhase {
    Idle,
    /// Triggered; frames remaining before the drop.
    Delayed(u32),
    Falling { speed: f32 },
}

#[derive(Clone, Debug, PartialEq)]
pub enum TerrainKind {
    Ground,
    Brick { contents: Option<ItemKind> },
    QuestionBlock { item: ItemKind, active: bool },
    Pipe,
    MovingPlatform(Oscillation),
    FallingPlatform(FallPhase),
    LevelExit,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TerrainTile {
    pub body: Body,
    /// Non-solid tiles (the level exit) are contact triggers, never obstacles.
    pub solid: bool,
    pub kind: TerrainKind,
}

// ── Enemies ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    Goombetta,
    Koopette,
    PiranhaQueen,
    Bossette,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BossAttack {
    Leap,
    Charge,
    Fireballs,
}

/// Behaviour-specific state, one variant per enemy kind.
#[derive(Clone, Debug, PartialEq)]
pub enum EnemyState {
    Goombetta,
    Koopette {
        shell_mode: bool,
        shell_timer: u32,
    },
    PiranhaQueen {
        /// Emerges upward out of a pipe top when true, downward otherwise.
        pipe_top: bool,
        hidden: bool,
        rise_timer: u32,
        current_rise: f32,
    },
    Bossette {
        health: u32,
        attack_timer: u32,
        last_attack: Option<BossAttack>,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub body: Body,
    /// -1 left, +1 right.
    pub direction: f32,
    /// Current horizontal speed (pixels per frame).
    pub speed: f32,
    /// Speed the enemy was spawned with; charges multiply from this.
    pub base_speed: f32,
    /// Awarded by a terminal stomp.
    pub points: u32,
    pub state: EnemyState,
}

/// Result of stomping an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StompOutcome {
    /// Enemy survives with altered state.
    Damaged { points: u32 },
    /// Enemy is removed.
    Defeated { points: u32 },
}

// ── Items ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    Coin,
    /// Power level 1.
    HeelShoe,
    /// Power level 2.
    FeatherCap,
    /// Power level 3.
    Purse,
    Star,
    OneUp,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ItemAnim {
    /// Coins float in place, ping-ponging around their spawn height.
    Bob {
        start_y: f32,
        offset: f32,
        direction: f32,
    },
    Walk,
    /// Stars cycle through `STAR_PALETTE`.
    Cycle { color_index: usize, color_timer: u32 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Item {
    pub body: Body,
    pub kind: ItemKind,
    pub anim: ItemAnim,
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sister {
    /// Balanced; throws fireballs.
    Maria,
    /// High jumper; flutters.
    Luigietta,
    /// Floats.
    Peach,
    /// Ground-pounds.
    Daisy,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub body: Body,
    pub sister: Sister,
    pub lives: u32,
    /// 0 ..= 3; set by power-ups, lowered by hits.
    pub power_level: u8,
    pub invincible: bool,
    pub invincible_timer: u32,
    pub ability_cooldown: u32,
    pub ability_active: bool,
    pub on_ground: bool,
    pub jumping: bool,
    /// -1 left, +1 right.
    pub facing: f32,
    /// Horizontal acceleration requested this frame; consumed by the update.
    pub acc_x: f32,
}

// ── Input ─────────────────────────────────────────────────────────────────────

/// Abstract input for one frame: discrete presses plus held directions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputState {
    pub move_left_pressed: bool,
    pub move_right_pressed: bool,
    pub jump_pressed: bool,
    pub ability_pressed: bool,
    pub pause_pressed: bool,
    pub confirm_pressed: bool,
    pub select_up: bool,
    pub select_down: bool,
    pub move_left_held: bool,
    pub move_right_held: bool,
}

// ── Events ────────────────────────────────────────────────────────────────────

/// Discrete things that happened during a frame, for sound and screen cues.
#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    EnemyStomped { kind: EnemyKind, points: u32 },
    EnemyDefeated { kind: EnemyKind, points: u32 },
    ItemCollected { kind: ItemKind },
    PlayerHit { lives_left: u32 },
    PlayerDied { lives_left: u32 },
    AbilityUsed { sister: Sister },
    FireballThrown { direction: f32 },
    BlockBumped,
    BrickBroken,
    ItemReleased { kind: ItemKind },
    PlatformTriggered,
    LevelComplete { level: u32, bonus: u32 },
    GameOver,
    GameWon,
    Paused,
    Resumed,
}

// ── Master game state ─────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GamePhase {
    Intro,
    Playing,
    Paused,
    GameOver,
    Won,
}

/// The entire simulation state, passed by `&mut` through the orchestrator.
#[derive(Clone, Debug)]
pub struct GameState {
    pub phase: GamePhase,
    /// Sister highlighted on the intro screen.
    pub selected: Sister,
    pub player: Player,
    pub terrain: Vec<TerrainTile>,
    pub enemies: Vec<Enemy>,
    pub items: Vec<Item>,
    pub score: u32,
    /// Seconds remaining.
    pub time_left: u32,
    /// Frames since the last whole second.
    pub time_counter: u32,
    /// 1-based.
    pub level: u32,
    /// Horizontal scroll applied to world positions; never positive.
    pub camera_offset_x: f32,
    pub frame: u64,
    pub levels: LevelSet,
    pub config: GameConfig,
}
