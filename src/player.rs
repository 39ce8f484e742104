/// Player controller: the four sisters share one state machine and differ
/// only in jump impulse and special ability.

use log::debug;

use crate::constants::*;
use crate::entities::{Player, Sister, TerrainTile};
use crate::physics::{resolve_horizontal, resolve_vertical, Body, Collisions, VerticalHit};

// ── Sister tables ────────────────────────────────────────────────────────────

impl Sister {
    pub const ALL: [Sister; 4] = [Sister::Maria, Sister::Luigietta, Sister::Peach, Sister::Daisy];

    pub fn name(self) -> &'static str {
        match self {
            Sister::Maria => "Maria",
            Sister::Luigietta => "Luigietta",
            Sister::Peach => "Peach",
            Sister::Daisy => "Daisy",
        }
    }

    pub fn jump_impulse(self) -> f32 {
        match self {
            Sister::Luigietta => HIGH_JUMP,
            _ => PLAYER_JUMP,
        }
    }

    /// Next sister in selection order, wrapping.
    pub fn next(self) -> Sister {
        let i = Sister::ALL.iter().position(|&s| s == self).unwrap_or(0);
        Sister::ALL[(i + 1) % Sister::ALL.len()]
    }

    pub fn previous(self) -> Sister {
        let i = Sister::ALL.iter().position(|&s| s == self).unwrap_or(0);
        Sister::ALL[(i + Sister::ALL.len() - 1) % Sister::ALL.len()]
    }
}

// ── Constructors ─────────────────────────────────────────────────────────────

pub fn spawn(sister: Sister, x: f32, y: f32, lives: u32) -> Player {
    Player {
        body: Body::new(x, y, PLAYER_WIDTH, PLAYER_HEIGHT),
        sister,
        lives,
        power_level: 0,
        invincible: false,
        invincible_timer: 0,
        ability_cooldown: 0,
        ability_active: false,
        on_ground: false,
        jumping: false,
        facing: 1.0,
        acc_x: 0.0,
    }
}

/// Put the player back at `(x, y)` at rest, keeping lives, power and timers.
pub fn respawn(player: &mut Player, x: f32, y: f32) {
    player.body.x = x;
    player.body.y = y;
    player.body.vx = 0.0;
    player.body.vy = 0.0;
    player.on_ground = false;
    player.jumping = false;
    player.acc_x = 0.0;
}

// ── Intents ──────────────────────────────────────────────────────────────────

pub fn move_left(player: &mut Player) {
    player.acc_x = -PLAYER_ACC;
    player.facing = -1.0;
}

pub fn move_right(player: &mut Player) {
    player.acc_x = PLAYER_ACC;
    player.facing = 1.0;
}

/// Returns true if the jump started.
pub fn jump(player: &mut Player) -> bool {
    if player.on_ground && !player.jumping {
        player.jumping = true;
        player.body.vy = player.sister.jump_impulse();
        true
    } else {
        false
    }
}

/// Returns true if the ability fired (cooldown was clear).
///
/// Daisy's ground-pound spends the cooldown even on the ground, where it has
/// no effect.
pub fn use_special_ability(player: &mut Player) -> bool {
    if player.ability_cooldown > 0 {
        return false;
    }
    player.ability_active = true;
    player.ability_cooldown = ABILITY_COOLDOWN;

    match player.sister {
        Sister::Luigietta => {
            if player.body.vy > 0.0 {
                player.body.vy *= 0.5;
            }
        }
        // Fireballs are reported as an event; no projectile exists.
        Sister::Maria => {}
        Sister::Peach => player.body.vy = FLOAT_VY,
        Sister::Daisy => {
            if !player.on_ground {
                player.body.vy = GROUND_POUND_VY;
            }
        }
    }
    true
}

// ── Per-frame update ─────────────────────────────────────────────────────────

/// Integrate one frame against terrain, then tick the ability and
/// invincibility timers.  The returned collisions tell the orchestrator
/// which tile was landed on or bumped.
pub fn update(player: &mut Player, terrain: &[TerrainTile]) -> Collisions {
    let acc_x = player.acc_x + player.body.vx * PLAYER_FRICTION;
    player.acc_x = 0.0;

    player.body.vx += acc_x;
    player.body.vy += PLAYER_GRAVITY;
    if player.body.vx.abs() < VX_SNAP {
        player.body.vx = 0.0;
    }

    let dx = player.body.vx;
    let horizontal = resolve_horizontal(&mut player.body, dx, terrain);
    if horizontal.is_some() {
        player.body.vx = 0.0;
    }

    player.on_ground = false;
    let vertical = resolve_vertical(&mut player.body, terrain);
    if let Some(VerticalHit::Landed(_)) = vertical {
        player.on_ground = true;
        player.jumping = false;
    }

    if player.ability_cooldown > 0 {
        player.ability_cooldown -= 1;
        if player.ability_cooldown == 0 {
            player.ability_active = false;
        }
    }

    tick_invincibility(player);

    Collisions {
        horizontal,
        vertical,
    }
}

pub fn tick_invincibility(player: &mut Player) {
    if player.invincible {
        player.invincible_timer = player.invincible_timer.saturating_sub(1);
        if player.invincible_timer == 0 {
            player.invincible = false;
        }
    }
}

// ── Damage & power ───────────────────────────────────────────────────────────

pub fn grant_invincibility(player: &mut Player, frames: u32) {
    player.invincible = true;
    player.invincible_timer = frames;
}

/// Non-stomp enemy contact.  Returns true if the hit landed (the player was
/// not invincible); the caller checks `lives` for game over.
pub fn hit(player: &mut Player) -> bool {
    if player.invincible {
        return false;
    }
    player.lives = player.lives.saturating_sub(1);
    grant_invincibility(player, HIT_INVINCIBILITY);
    player.power_level = player.power_level.saturating_sub(1);
    debug!(
        "{} hit: {} lives, power {}",
        player.sister.name(),
        player.lives,
        player.power_level
    );
    true
}

/// Power-ups set the tier outright rather than stacking.
pub fn set_power_level(player: &mut Player, level: u8) {
    player.power_level = level.min(MAX_POWER_LEVEL);
}
