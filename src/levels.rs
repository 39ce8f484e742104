/// Level layouts: what terrain, enemies and items a level starts with.
///
/// Layouts are plain data so they can come from a RON file as well as from
/// the built-in campaign.  Building a layout always yields fresh entities.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::TILE_SIZE;
use crate::enemies;
use crate::entities::{Axis, Enemy, EnemyKind, Item, ItemKind, TerrainTile};
use crate::error::{GameError, Result};
use crate::items;
use crate::terrain;

const GROUND_Y: f32 = 568.0;

// ── Layout data ──────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum TileSpec {
    Ground {
        x: f32,
        y: f32,
        width: f32,
    },
    /// One ground tile every `TILE_SIZE` in `from..to`, skipping any x
    /// strictly inside a gap.
    GroundRun {
        from: f32,
        to: f32,
        y: f32,
        #[serde(default)]
        gaps: Vec<(f32, f32)>,
    },
    Brick {
        x: f32,
        y: f32,
        #[serde(default)]
        contents: Option<ItemKind>,
    },
    QuestionBlock {
        x: f32,
        y: f32,
        item: ItemKind,
    },
    Pipe {
        x: f32,
        base_y: f32,
        height: u32,
    },
    MovingPlatform {
        x: f32,
        y: f32,
        width: f32,
        axis: Axis,
        distance: f32,
        speed: f32,
    },
    FallingPlatform {
        x: f32,
        y: f32,
        width: f32,
    },
    Exit {
        x: f32,
        base_y: f32,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnemySpec {
    pub kind: EnemyKind,
    pub x: f32,
    pub y: f32,
    /// Piranhas only: emerge downward from a ceiling pipe.
    #[serde(default)]
    pub emerges_down: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ItemSpec {
    pub kind: ItemKind,
    pub x: f32,
    pub y: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LevelLayout {
    pub name: String,
    pub tiles: Vec<TileSpec>,
    #[serde(default)]
    pub enemies: Vec<EnemySpec>,
    #[serde(default)]
    pub items: Vec<ItemSpec>,
}

/// Entities of a freshly loaded level.
#[derive(Clone, Debug, PartialEq)]
pub struct LevelEntities {
    pub terrain: Vec<TerrainTile>,
    pub enemies: Vec<Enemy>,
    pub items: Vec<Item>,
}

impl TileSpec {
    fn build_into(&self, out: &mut Vec<TerrainTile>) {
        match self {
            TileSpec::Ground { x, y, width } => out.push(terrain::ground(*x, *y, *width)),
            TileSpec::GroundRun { from, to, y, gaps } => {
                let mut x = *from;
                while x < *to {
                    if !gaps.iter().any(|&(lo, hi)| lo < x && x < hi) {
                        out.push(terrain::ground(x, *y, TILE_SIZE));
                    }
                    x += TILE_SIZE;
                }
            }
            TileSpec::Brick { x, y, contents } => out.push(terrain::brick(*x, *y, *contents)),
            TileSpec::QuestionBlock { x, y, item } => {
                out.push(terrain::question_block(*x, *y, *item))
            }
            TileSpec::Pipe { x, base_y, height } => out.push(terrain::pipe(*x, *base_y, *height)),
            TileSpec::MovingPlatform {
                x,
                y,
                width,
                axis,
                distance,
                speed,
            } => out.push(terrain::moving_platform(
                *x, *y, *width, *axis, *distance, *speed,
            )),
            TileSpec::FallingPlatform { x, y, width } => {
                out.push(terrain::falling_platform(*x, *y, *width))
            }
            TileSpec::Exit { x, base_y } => out.push(terrain::level_exit(*x, *base_y)),
        }
    }
}

impl LevelLayout {
    pub fn build(&self) -> LevelEntities {
        let mut terrain = Vec::new();
        for spec in &self.tiles {
            spec.build_into(&mut terrain);
        }
        let enemies = self
            .enemies
            .iter()
            .map(|e| match e.kind {
                EnemyKind::PiranhaQueen => enemies::piranha_queen(e.x, e.y, !e.emerges_down),
                kind => enemies::spawn(kind, e.x, e.y),
            })
            .collect();
        let items = self
            .items
            .iter()
            .map(|i| items::spawn(i.kind, i.x, i.y))
            .collect();
        LevelEntities {
            terrain,
            enemies,
            items,
        }
    }
}

// ── Level sets ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LevelSet {
    pub levels: Vec<LevelLayout>,
}

impl LevelSet {
    pub fn from_ron_str(source: &str) -> Result<Self> {
        let set: LevelSet = ron::from_str(source).map_err(|e| GameError::Parse {
            path: "<levels>".to_string(),
            message: e.to_string(),
        })?;
        if set.levels.is_empty() {
            return Err(GameError::EmptyLevelSet);
        }
        Ok(set)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        LevelSet::from_ron_str(&source).map_err(|e| match e {
            GameError::Parse { message, .. } => GameError::Parse {
                path: path.display().to_string(),
                message,
            },
            other => other,
        })
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Layout for a 1-based level index.
    pub fn get(&self, index: u32) -> Result<&LevelLayout> {
        let unknown = GameError::UnknownLevel {
            index,
            available: self.levels.len(),
        };
        if index == 0 {
            return Err(unknown);
        }
        self.levels.get(index as usize - 1).ok_or(unknown)
    }

    /// The three-level campaign: an opening course, a platforming course
    /// and the Bossette arena.
    pub fn builtin() -> Self {
        LevelSet {
            levels: vec![level_one(), level_two(), boss_arena()],
        }
    }
}

impl Default for LevelSet {
    fn default() -> Self {
        LevelSet::builtin()
    }
}

// ── Built-in campaign ────────────────────────────────────────────────────────

fn row<T>(from: f32, to: f32, f: impl Fn(f32) -> T) -> Vec<T> {
    let mut out = Vec::new();
    let mut x = from;
    while x < to {
        out.push(f(x));
        x += TILE_SIZE;
    }
    out
}

fn level_one() -> LevelLayout {
    let mut tiles = vec![TileSpec::GroundRun {
        from: 0.0,
        to: 2400.0,
        y: GROUND_Y,
        gaps: vec![(700.0, 900.0), (1100.0, 1300.0)],
    }];
    tiles.extend(row(300.0, 500.0, |x| TileSpec::Brick {
        x,
        y: 472.0,
        contents: None,
    }));
    tiles.extend([
        TileSpec::QuestionBlock {
            x: 350.0,
            y: 376.0,
            item: ItemKind::Coin,
        },
        TileSpec::QuestionBlock {
            x: 450.0,
            y: 376.0,
            item: ItemKind::HeelShoe,
        },
        TileSpec::Pipe {
            x: 600.0,
            base_y: GROUND_Y,
            height: 2,
        },
        TileSpec::Pipe {
            x: 1000.0,
            base_y: GROUND_Y,
            height: 3,
        },
        TileSpec::MovingPlatform {
            x: 800.0,
            y: 408.0,
            width: TILE_SIZE * 3.0,
            axis: Axis::Horizontal,
            distance: 200.0,
            speed: 1.0,
        },
        TileSpec::Exit {
            x: 2240.0,
            base_y: GROUND_Y,
        },
    ]);

    LevelLayout {
        name: "Mushroom Meadow".to_string(),
        tiles,
        enemies: vec![
            EnemySpec {
                kind: EnemyKind::Goombetta,
                x: 400.0,
                y: 536.0,
                emerges_down: false,
            },
            EnemySpec {
                kind: EnemyKind::Goombetta,
                x: 960.0,
                y: 536.0,
                emerges_down: false,
            },
            EnemySpec {
                kind: EnemyKind::Koopette,
                x: 1400.0,
                y: 520.0,
                emerges_down: false,
            },
        ],
        items: row(350.0, 550.0, |x| ItemSpec {
            kind: ItemKind::Coin,
            x,
            y: 280.0,
        }),
    }
}

fn level_two() -> LevelLayout {
    LevelLayout {
        name: "Sky Bridges".to_string(),
        tiles: vec![
            TileSpec::GroundRun {
                from: 0.0,
                to: 2600.0,
                y: GROUND_Y,
                gaps: vec![(500.0, 800.0), (1400.0, 1700.0)],
            },
            TileSpec::FallingPlatform {
                x: 540.0,
                y: 472.0,
                width: TILE_SIZE * 3.0,
            },
            TileSpec::FallingPlatform {
                x: 660.0,
                y: 440.0,
                width: TILE_SIZE * 3.0,
            },
            TileSpec::Brick {
                x: 850.0,
                y: 440.0,
                contents: None,
            },
            TileSpec::Brick {
                x: 882.0,
                y: 440.0,
                contents: Some(ItemKind::OneUp),
            },
            TileSpec::Brick {
                x: 914.0,
                y: 440.0,
                contents: None,
            },
            TileSpec::Pipe {
                x: 1000.0,
                base_y: GROUND_Y,
                height: 2,
            },
            TileSpec::Pipe {
                x: 1200.0,
                base_y: GROUND_Y,
                height: 3,
            },
            TileSpec::MovingPlatform {
                x: 1420.0,
                y: 472.0,
                width: TILE_SIZE * 3.0,
                axis: Axis::Horizontal,
                distance: 160.0,
                speed: 1.0,
            },
            TileSpec::QuestionBlock {
                x: 1800.0,
                y: 440.0,
                item: ItemKind::FeatherCap,
            },
            TileSpec::QuestionBlock {
                x: 1832.0,
                y: 440.0,
                item: ItemKind::Star,
            },
            TileSpec::MovingPlatform {
                x: 2000.0,
                y: 440.0,
                width: TILE_SIZE * 3.0,
                axis: Axis::Vertical,
                distance: 96.0,
                speed: 1.0,
            },
            TileSpec::QuestionBlock {
                x: 2200.0,
                y: 440.0,
                item: ItemKind::Purse,
            },
            TileSpec::Exit {
                x: 2480.0,
                base_y: GROUND_Y,
            },
        ],
        enemies: vec![
            EnemySpec {
                kind: EnemyKind::Koopette,
                x: 900.0,
                y: 520.0,
                emerges_down: false,
            },
            EnemySpec {
                kind: EnemyKind::PiranhaQueen,
                x: 1016.0,
                y: 504.0,
                emerges_down: false,
            },
            EnemySpec {
                kind: EnemyKind::Goombetta,
                x: 1300.0,
                y: 536.0,
                emerges_down: false,
            },
            EnemySpec {
                kind: EnemyKind::Koopette,
                x: 1850.0,
                y: 520.0,
                emerges_down: false,
            },
            EnemySpec {
                kind: EnemyKind::Goombetta,
                x: 2100.0,
                y: 536.0,
                emerges_down: false,
            },
        ],
        items: vec![
            ItemSpec {
                kind: ItemKind::Coin,
                x: 580.0,
                y: 420.0,
            },
            ItemSpec {
                kind: ItemKind::Coin,
                x: 700.0,
                y: 388.0,
            },
        ],
    }
}

fn boss_arena() -> LevelLayout {
    LevelLayout {
        name: "Bossette's Keep".to_string(),
        tiles: vec![
            TileSpec::GroundRun {
                from: 0.0,
                to: 1664.0,
                y: GROUND_Y,
                gaps: Vec::new(),
            },
            // Left wall so nothing walks off the start.
            TileSpec::Pipe {
                x: -64.0,
                base_y: GROUND_Y,
                height: 10,
            },
            TileSpec::Ground {
                x: 400.0,
                y: 440.0,
                width: TILE_SIZE * 3.0,
            },
            TileSpec::Ground {
                x: 700.0,
                y: 376.0,
                width: TILE_SIZE * 3.0,
            },
            TileSpec::Ground {
                x: 1000.0,
                y: 440.0,
                width: TILE_SIZE * 3.0,
            },
            TileSpec::QuestionBlock {
                x: 432.0,
                y: 312.0,
                item: ItemKind::HeelShoe,
            },
            TileSpec::QuestionBlock {
                x: 732.0,
                y: 248.0,
                item: ItemKind::Star,
            },
            TileSpec::Pipe {
                x: 1500.0,
                base_y: GROUND_Y,
                height: 4,
            },
            TileSpec::Exit {
                x: 1600.0,
                base_y: GROUND_Y,
            },
        ],
        enemies: vec![
            EnemySpec {
                kind: EnemyKind::Goombetta,
                x: 600.0,
                y: 536.0,
                emerges_down: false,
            },
            EnemySpec {
                kind: EnemyKind::Bossette,
                x: 1100.0,
                y: 440.0,
                emerges_down: false,
            },
        ],
        items: vec![ItemSpec {
            kind: ItemKind::OneUp,
            x: 732.0,
            y: 344.0,
        }],
    }
}
