/// Kinematic bodies and axis-separated collision resolution.
///
/// Every dynamic entity owns a `Body` and moves through `move_and_collide`.
/// Resolution is first-hit: the first solid tile in iteration
/// order that overlaps the body resolves the contact on that axis, even when
/// a nearer tile also overlaps.

use crate::entities::TerrainTile;

// ── Body ──────────────────────────────────────────────────────────────────────

/// Axis-aligned box with velocity.  `x`/`y` is the top-left corner.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Body {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub width: f32,
    pub height: f32,
}

impl Body {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Body {
            x,
            y,
            vx: 0.0,
            vy: 0.0,
            width,
            height,
        }
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    pub fn set_right(&mut self, right: f32) {
        self.x = right - self.width;
    }

    pub fn set_bottom(&mut self, bottom: f32) {
        self.y = bottom - self.height;
    }

    /// Strict overlap test: boxes that merely share an edge do not overlap.
    pub fn overlaps(&self, other: &Body) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

// ── Contacts ──────────────────────────────────────────────────────────────────

/// Outcome of the vertical resolution pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum VerticalHit {
    /// Came down onto the tile at this index (vy was positive).
    Landed(usize),
    /// Struck the underside of the tile at this index (vy was zero or negative).
    Bumped(usize),
}

/// Tiles touched while moving one frame.  Indices refer to the terrain slice.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Collisions {
    pub horizontal: Option<usize>,
    pub vertical: Option<VerticalHit>,
}

impl Collisions {
    pub fn landed(&self) -> bool {
        matches!(self.vertical, Some(VerticalHit::Landed(_)))
    }
}

/// Index of the first solid tile overlapping `body`, in iteration order.
pub fn first_solid_overlap(body: &Body, terrain: &[TerrainTile]) -> Option<usize> {
    terrain
        .iter()
        .position(|tile| tile.solid && body.overlaps(&tile.body))
}

/// Move along X by `dx` and push the body out of the first solid tile hit.
///
/// Moving right snaps the body's right edge to the tile's left edge; any
/// other motion (including none) snaps the left edge to the tile's right.
/// Velocity consequences are left to the caller.
pub fn resolve_horizontal(body: &mut Body, dx: f32, terrain: &[TerrainTile]) -> Option<usize> {
    body.x += dx;
    let hit = first_solid_overlap(body, terrain)?;
    let tile = &terrain[hit].body;
    if dx > 0.0 {
        body.set_right(tile.left());
    } else {
        body.x = tile.right();
    }
    Some(hit)
}

/// Move along Y by the body's `vy` and push it out of the first solid tile hit.
/// Either contact zeroes `vy`.
pub fn resolve_vertical(body: &mut Body, terrain: &[TerrainTile]) -> Option<VerticalHit> {
    body.y += body.vy;
    let hit = first_solid_overlap(body, terrain)?;
    let tile = terrain[hit].body;
    if body.vy > 0.0 {
        body.set_bottom(tile.top());
        body.vy = 0.0;
        Some(VerticalHit::Landed(hit))
    } else {
        body.y = tile.bottom();
        body.vy = 0.0;
        Some(VerticalHit::Bumped(hit))
    }
}

/// One frame of axis-separated integration: gravity, then X, then Y.
pub fn move_and_collide(
    body: &mut Body,
    dx: f32,
    gravity: f32,
    terrain: &[TerrainTile],
) -> Collisions {
    body.vy += gravity;
    let horizontal = resolve_horizontal(body, dx, terrain);
    let vertical = resolve_vertical(body, terrain);
    Collisions {
        horizontal,
        vertical,
    }
}
