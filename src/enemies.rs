/// Enemy behaviours, keyed by `EnemyState` variant.
///
/// `update` advances one frame; `stomp` applies a top-down hit and reports
/// whether the enemy survives it.

use log::{debug, trace};
use rand::Rng;

use crate::constants::*;
use crate::entities::{
    BossAttack, Enemy, EnemyKind, EnemyState, StompOutcome, TerrainTile,
};
use crate::physics::{move_and_collide, Body};

// ── Constructors ─────────────────────────────────────────────────────────────

fn enemy(body: Body, speed: f32, points: u32, state: EnemyState) -> Enemy {
    Enemy {
        body,
        direction: -1.0,
        speed,
        base_speed: speed,
        points,
        state,
    }
}

pub fn goombetta(x: f32, y: f32) -> Enemy {
    enemy(
        Body::new(x, y, TILE_SIZE, TILE_SIZE),
        1.0,
        100,
        EnemyState::Goombetta,
    )
}

pub fn koopette(x: f32, y: f32) -> Enemy {
    enemy(
        Body::new(x, y, TILE_SIZE, TILE_SIZE * 1.5),
        1.5,
        200,
        EnemyState::Koopette {
            shell_mode: false,
            shell_timer: 0,
        },
    )
}

pub fn piranha_queen(x: f32, y: f32, pipe_top: bool) -> Enemy {
    enemy(
        Body::new(x, y, TILE_SIZE, TILE_SIZE * 2.0),
        0.0,
        200,
        EnemyState::PiranhaQueen {
            pipe_top,
            hidden: false,
            rise_timer: 0,
            current_rise: 0.0,
        },
    )
}

pub fn bossette(x: f32, y: f32) -> Enemy {
    enemy(
        Body::new(x, y, TILE_SIZE * 3.0, TILE_SIZE * 4.0),
        0.5,
        5000,
        EnemyState::Bossette {
            health: BOSS_HEALTH,
            attack_timer: BOSS_ATTACK_INTERVAL,
            last_attack: None,
        },
    )
}

/// Spawn by kind.  Piranhas built this way emerge from a pipe top.
pub fn spawn(kind: EnemyKind, x: f32, y: f32) -> Enemy {
    match kind {
        EnemyKind::Goombetta => goombetta(x, y),
        EnemyKind::Koopette => koopette(x, y),
        EnemyKind::PiranhaQueen => piranha_queen(x, y, true),
        EnemyKind::Bossette => bossette(x, y),
    }
}

impl Enemy {
    pub fn kind(&self) -> EnemyKind {
        match self.state {
            EnemyState::Goombetta => EnemyKind::Goombetta,
            EnemyState::Koopette { .. } => EnemyKind::Koopette,
            EnemyState::PiranhaQueen { .. } => EnemyKind::PiranhaQueen,
            EnemyState::Bossette { .. } => EnemyKind::Bossette,
        }
    }

    pub fn name(&self) -> &'static str {
        match self.kind() {
            EnemyKind::Goombetta => "Goombetta",
            EnemyKind::Koopette => "Koopette",
            EnemyKind::PiranhaQueen => "Piranha Queen",
            EnemyKind::Bossette => "Bossette",
        }
    }

    /// A piranha fully retracted into its pipe cannot be touched at all.
    pub fn is_contactable(&self) -> bool {
        match self.state {
            EnemyState::PiranhaQueen {
                hidden,
                current_rise,
                ..
            } => !(hidden && current_rise <= 0.0),
            _ => true,
        }
    }
}

// ── Movement primitives ──────────────────────────────────────────────────────

/// Gravity plus horizontal walk; a wall reverses the direction.
fn patrol(enemy: &mut Enemy, terrain: &[TerrainTile], speed_factor: f32) {
    let dx = enemy.speed * enemy.direction * speed_factor;
    let hits = move_and_collide(&mut enemy.body, dx, ENEMY_GRAVITY, terrain);
    if hits.horizontal.is_some() {
        enemy.direction = -enemy.direction;
    }
}

/// Is there a surface just below the point one tile ahead?
pub fn ground_ahead(enemy: &Enemy, terrain: &[TerrainTile]) -> bool {
    let ahead_x = enemy.body.x + enemy.direction * TILE_SIZE;
    let ahead_y = enemy.body.bottom() + LEDGE_PROBE_DROP;
    terrain.iter().filter(|t| t.solid).any(|t| {
        t.body.left() <= ahead_x
            && ahead_x <= t.body.right()
            && (t.body.top() - ahead_y).abs() < LEDGE_PROBE_TOLERANCE
    })
}

fn patrol_with_probe(enemy: &mut Enemy, terrain: &[TerrainTile]) {
    patrol(enemy, terrain, 1.0);
    if !ground_ahead(enemy, terrain) {
        enemy.direction = -enemy.direction;
    }
}

fn rise_and_hide(
    body: &mut Body,
    pipe_top: bool,
    hidden: &mut bool,
    rise_timer: &mut u32,
    current_rise: &mut f32,
) {
    if *rise_timer > 0 {
        *rise_timer -= 1;
    } else if *hidden {
        *hidden = false;
        *rise_timer = RISER_VISIBLE_FRAMES;
        *current_rise = 0.0;
    } else {
        *hidden = true;
        *rise_timer = RISER_HIDDEN_FRAMES;
    }

    let outward = if pipe_top { -RISER_SPEED } else { RISER_SPEED };
    if !*hidden {
        if *current_rise < RISER_MAX_RISE {
            *current_rise += RISER_SPEED;
            body.y += outward;
        }
    } else if *current_rise > 0.0 {
        *current_rise -= RISER_SPEED;
        body.y -= outward;
    }
}

fn boss_attack(enemy: &mut Enemy, rng: &mut impl Rng) -> BossAttack {
    // A charge lasts until the next attack is chosen.
    enemy.speed = enemy.base_speed;
    let attack = match rng.gen_range(0..3) {
        0 => BossAttack::Leap,
        1 => BossAttack::Charge,
        _ => BossAttack::Fireballs,
    };
    match attack {
        BossAttack::Leap => enemy.body.vy = BOSS_LEAP,
        BossAttack::Charge => enemy.speed = enemy.base_speed * BOSS_CHARGE_FACTOR,
        BossAttack::Fireballs => {}
    }
    trace!("Bossette attack: {:?}", attack);
    attack
}

// ── Per-frame update ─────────────────────────────────────────────────────────

pub fn update(enemy: &mut Enemy, terrain: &[TerrainTile], rng: &mut impl Rng) {
    match enemy.state {
        EnemyState::Goombetta => patrol_with_probe(enemy, terrain),
        EnemyState::Koopette {
            shell_mode: false, ..
        } => patrol_with_probe(enemy, terrain),
        EnemyState::Koopette {
            shell_mode: true, ..
        } => {
            patrol(enemy, terrain, SHELL_SPEED_FACTOR);
            if let EnemyState::Koopette {
                shell_mode,
                shell_timer,
            } = &mut enemy.state
            {
                *shell_timer = shell_timer.saturating_sub(1);
                if *shell_timer == 0 {
                    *shell_mode = false;
                }
            }
        }
        EnemyState::PiranhaQueen { .. } => {
            if let EnemyState::PiranhaQueen {
                pipe_top,
                hidden,
                rise_timer,
                current_rise,
            } = &mut enemy.state
            {
                rise_and_hide(&mut enemy.body, *pipe_top, hidden, rise_timer, current_rise);
            }
        }
        EnemyState::Bossette { .. } => {
            patrol(enemy, terrain, 1.0);
            let expired = match &mut enemy.state {
                EnemyState::Bossette { attack_timer, .. } => {
                    *attack_timer = attack_timer.saturating_sub(1);
                    *attack_timer == 0
                }
                _ => false,
            };
            if expired {
                let attack = boss_attack(enemy, rng);
                if let EnemyState::Bossette {
                    attack_timer,
                    last_attack,
                    ..
                } = &mut enemy.state
                {
                    *attack_timer = BOSS_ATTACK_INTERVAL;
                    *last_attack = Some(attack);
                }
            }
        }
    }
}

// ── Stomp contracts ──────────────────────────────────────────────────────────

pub fn stomp(enemy: &mut Enemy) -> StompOutcome {
    let points = enemy.points;
    let outcome = match &mut enemy.state {
        EnemyState::Koopette {
            shell_mode,
            shell_timer,
        } if !*shell_mode => {
            *shell_mode = true;
            *shell_timer = SHELL_DURATION;
            StompOutcome::Damaged {
                points: SHELL_POINTS,
            }
        }
        EnemyState::Bossette { health, .. } => {
            *health = health.saturating_sub(1);
            if *health == 0 {
                StompOutcome::Defeated { points }
            } else {
                StompOutcome::Damaged {
                    points: BOSS_HIT_POINTS,
                }
            }
        }
        _ => StompOutcome::Defeated { points },
    };
    debug!("{} stomped: {:?}", enemy.name(), outcome);
    outcome
}
