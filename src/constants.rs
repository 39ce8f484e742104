// All values are per-frame at 60 Hz unless noted.

pub const FPS: u32 = 60;
pub const TILE_SIZE: f32 = 32.0;

// Player physics
pub const PLAYER_ACC: f32 = 0.5;
pub const PLAYER_FRICTION: f32 = -0.12;
pub const PLAYER_GRAVITY: f32 = 0.5;
pub const PLAYER_JUMP: f32 = -16.0;
pub const HIGH_JUMP: f32 = PLAYER_JUMP * 1.5;
pub const VX_SNAP: f32 = 0.1;
pub const STOMP_BOUNCE: f32 = PLAYER_JUMP * 0.5;

// Player hitbox
pub const PLAYER_WIDTH: f32 = 32.0;
pub const PLAYER_HEIGHT: f32 = 64.0;

// Player timers
pub const ABILITY_COOLDOWN: u32 = 120;
pub const HIT_INVINCIBILITY: u32 = 120;
pub const STAR_INVINCIBILITY: u32 = 600;
pub const MAX_POWER_LEVEL: u8 = 3;

// Special abilities
pub const FLOAT_VY: f32 = 0.5;
pub const GROUND_POUND_VY: f32 = 15.0;

// Enemies
pub const ENEMY_GRAVITY: f32 = PLAYER_GRAVITY * 0.8;
pub const SHELL_DURATION: u32 = 180;
pub const SHELL_SPEED_FACTOR: f32 = 3.0;
pub const SHELL_POINTS: u32 = 50;
pub const LEDGE_PROBE_DROP: f32 = 5.0;
pub const LEDGE_PROBE_TOLERANCE: f32 = 10.0;
pub const RISER_HIDDEN_FRAMES: u32 = 180;
pub const RISER_VISIBLE_FRAMES: u32 = 120;
pub const RISER_SPEED: f32 = 1.0;
pub const RISER_MAX_RISE: f32 = TILE_SIZE * 2.0;
pub const BOSS_HEALTH: u32 = 5;
pub const BOSS_ATTACK_INTERVAL: u32 = 180;
pub const BOSS_LEAP: f32 = PLAYER_JUMP * 0.7;
pub const BOSS_CHARGE_FACTOR: f32 = 3.0;
pub const BOSS_HIT_POINTS: u32 = 50;

// Items
pub const ITEM_GRAVITY: f32 = PLAYER_GRAVITY * 0.5;
pub const COIN_VALUE: u32 = 100;
pub const COIN_BOB_HEIGHT: f32 = 5.0;
pub const COIN_BOB_SPEED: f32 = 0.1;
pub const POWER_UP_SPEED: f32 = 2.0;
pub const STAR_SPEED: f32 = 3.0;
pub const STAR_LAUNCH_VY: f32 = -5.0;
pub const STAR_BOUNCE_VY: f32 = -10.0;
pub const STAR_COLOR_FRAMES: u32 = 5;

// Terrain
pub const FALL_DELAY: u32 = 30;

// Scoring
pub const TIME_BONUS_PER_SECOND: u32 = 10;
