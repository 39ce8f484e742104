/// Collectible items: physics per kind and the effect applied on pickup.

use crate::constants::*;
use crate::entities::{Item, ItemAnim, ItemKind, Player, Rgb, TerrainTile};
use crate::physics::{move_and_collide, Body};
use crate::player::{grant_invincibility, set_power_level};

/// Star colour cycle.
pub const STAR_PALETTE: [Rgb; 6] = [
    Rgb(255, 0, 0),
    Rgb(255, 165, 0),
    Rgb(255, 255, 0),
    Rgb(0, 255, 0),
    Rgb(0, 0, 255),
    Rgb(128, 0, 128),
];

// ── Constructors ─────────────────────────────────────────────────────────────

pub fn size(kind: ItemKind) -> (f32, f32) {
    match kind {
        ItemKind::Coin => (TILE_SIZE / 2.0, TILE_SIZE / 2.0),
        _ => (TILE_SIZE, TILE_SIZE),
    }
}

pub fn spawn(kind: ItemKind, x: f32, y: f32) -> Item {
    let (w, h) = size(kind);
    let mut body = Body::new(x, y, w, h);
    let anim = match kind {
        ItemKind::Coin => ItemAnim::Bob {
            start_y: y,
            offset: 0.0,
            direction: 1.0,
        },
        ItemKind::Star => {
            body.vx = STAR_SPEED;
            body.vy = STAR_LAUNCH_VY;
            ItemAnim::Cycle {
                color_index: 0,
                color_timer: 0,
            }
        }
        ItemKind::HeelShoe | ItemKind::FeatherCap | ItemKind::Purse | ItemKind::OneUp => {
            body.vx = POWER_UP_SPEED;
            ItemAnim::Walk
        }
    };
    Item { body, kind, anim }
}

// ── Per-frame update ─────────────────────────────────────────────────────────

pub fn update(item: &mut Item, terrain: &[TerrainTile]) {
    if let ItemAnim::Bob {
        start_y,
        offset,
        direction,
    } = &mut item.anim
    {
        *offset += COIN_BOB_SPEED * *direction;
        if offset.abs() >= COIN_BOB_HEIGHT {
            *direction = -*direction;
        }
        item.body.y = *start_y + *offset;
        return;
    }

    let dx = item.body.vx;
    let hits = move_and_collide(&mut item.body, dx, ITEM_GRAVITY, terrain);
    if hits.horizontal.is_some() {
        item.body.vx = -item.body.vx;
    }

    if let ItemAnim::Cycle {
        color_index,
        color_timer,
    } = &mut item.anim
    {
        // Stars never settle.
        if hits.landed() {
            item.body.vy = STAR_BOUNCE_VY;
        }
        *color_timer += 1;
        if *color_timer >= STAR_COLOR_FRAMES {
            *color_timer = 0;
            *color_index = (*color_index + 1) % STAR_PALETTE.len();
        }
    }
}

// ── Effects ──────────────────────────────────────────────────────────────────

/// Apply a non-coin item to the player.  Coins go straight to the score and
/// leave the player untouched.
pub fn apply_effect(kind: ItemKind, player: &mut Player) {
    match kind {
        ItemKind::Coin => {}
        ItemKind::HeelShoe => set_power_level(player, 1),
        ItemKind::FeatherCap => set_power_level(player, 2),
        ItemKind::Purse => set_power_level(player, 3),
        ItemKind::Star => grant_invincibility(player, STAR_INVINCIBILITY),
        ItemKind::OneUp => player.lives += 1,
    }
}
