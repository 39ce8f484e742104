/// Rendering layer: all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable `Snapshot`.
/// No game logic is performed; world pixels are scaled into terminal cells
/// and shifted by the camera offset.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use mario_sisters::entities::{EnemyKind, GamePhase, ItemKind, Rgb, Sister};
use mario_sisters::snapshot::{sister_color, RunView, Snapshot, SpriteView, Visual};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_SKY: Color = Color::Rgb { r: 135, g: 206, b: 235 };
const C_HUD: Color = Color::White;
const C_HUD_BG: Color = Color::Black;
const C_TITLE: Color = Color::Red;
const C_SELECTED: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;

/// World-to-cell mapping for one frame.
struct Viewport {
    cols: u16,
    rows: u16,
    /// World pixels per column / row.
    sx: f32,
    sy: f32,
    camera: f32,
}

impl Viewport {
    /// Row 0 is the HUD and the last row the controls hint; the world fills
    /// the rows in between.
    fn new(cols: u16, rows: u16, world_w: f32, world_h: f32, camera: f32) -> Self {
        let play_rows = rows.saturating_sub(2).max(1);
        Viewport {
            cols,
            rows,
            sx: world_w / cols.max(1) as f32,
            sy: world_h / play_rows as f32,
            camera,
        }
    }

    fn bottom_row(&self) -> u16 {
        self.rows.saturating_sub(1)
    }
}

fn to_color(c: Rgb) -> Color {
    Color::Rgb { r: c.0, g: c.1, b: c.2 }
}

fn glyph(visual: Visual) -> char {
    match visual {
        Visual::Ground => '▓',
        Visual::Brick => '▒',
        Visual::QuestionBlock => '?',
        Visual::UsedBlock => '■',
        Visual::Pipe => '█',
        Visual::MovingPlatform => '=',
        Visual::FallingPlatform => '-',
        Visual::LevelExit => '|',
        Visual::Enemy(EnemyKind::Goombetta) => 'g',
        Visual::Enemy(EnemyKind::Koopette) => 'k',
        Visual::Enemy(EnemyKind::PiranhaQueen) => 'Ψ',
        Visual::Enemy(EnemyKind::Bossette) => 'B',
        Visual::Shell => 'o',
        Visual::Item(ItemKind::Coin) => '$',
        Visual::Item(ItemKind::HeelShoe) => 'h',
        Visual::Item(ItemKind::FeatherCap) => 'f',
        Visual::Item(ItemKind::Purse) => 'p',
        Visual::Item(ItemKind::Star) => '*',
        Visual::Item(ItemKind::OneUp) => '+',
        Visual::Player(sister) => sister.name().chars().next().unwrap_or('@'),
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.  `frame` drives blinking sprites.
pub fn render<W: Write>(
    out: &mut W,
    snap: &Snapshot,
    world_w: f32,
    world_h: f32,
    frame: u64,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let (cols, rows) = terminal::size()?;

    if snap.run.phase == GamePhase::Intro {
        draw_intro(out, &snap.run, cols, rows)?;
    } else {
        let view = Viewport::new(cols, rows, world_w, world_h, snap.run.camera_offset_x);
        for sprite in &snap.sprites {
            if sprite.flashing && frame % 8 < 4 {
                continue;
            }
            draw_sprite(out, sprite, &view)?;
        }
        draw_hud(out, &snap.run, cols)?;
        draw_controls_hint(out, &view)?;

        match snap.run.phase {
            GamePhase::Paused => draw_banner(
                out,
                cols,
                rows,
                &[("PAUSED", Color::White), ("ESC - resume", C_HINT)],
            )?,
            GamePhase::GameOver => {
                let score = format!("Final Score: {}", snap.run.score);
                draw_banner(
                    out,
                    cols,
                    rows,
                    &[
                        ("GAME OVER", Color::Red),
                        (score.as_str(), Color::White),
                        ("ENTER - title screen", C_HINT),
                    ],
                )?
            }
            GamePhase::Won => {
                let score = format!("Final Score: {}", snap.run.score);
                draw_banner(
                    out,
                    cols,
                    rows,
                    &[
                        ("YOU WIN!", Color::Yellow),
                        ("The princesses saved themselves!", Color::White),
                        (score.as_str(), Color::White),
                        ("ENTER - title screen", C_HINT),
                    ],
                )?
            }
            _ => {}
        }
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── World ─────────────────────────────────────────────────────────────────────

fn draw_sprite<W: Write>(out: &mut W, sprite: &SpriteView, view: &Viewport) -> std::io::Result<()> {
    let left = ((sprite.x + view.camera) / view.sx).floor() as i32;
    let top = (sprite.y / view.sy).floor() as i32 + 1;
    let w = ((sprite.width / view.sx).ceil() as i32).max(1);
    let h = ((sprite.height / view.sy).ceil() as i32).max(1);

    let min_row = 1;
    let max_row = view.bottom_row() as i32 - 1;
    let max_col = view.cols as i32 - 1;

    let col_from = left.max(0);
    let col_to = (left + w - 1).min(max_col);
    if col_from > col_to {
        return Ok(());
    }

    let ch = glyph(sprite.visual).to_string().repeat((col_to - col_from + 1) as usize);
    out.queue(style::SetForegroundColor(to_color(sprite.color)))?;
    for row in top.max(min_row)..=(top + h - 1).min(max_row) {
        out.queue(cursor::MoveTo(col_from as u16, row as u16))?;
        out.queue(Print(&ch))?;
    }
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, run: &RunView, cols: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(0, 0))?;
    out.queue(style::SetBackgroundColor(C_HUD_BG))?;
    out.queue(style::SetForegroundColor(C_HUD))?;
    let hud = format!(
        " SCORE: {:<7} LIVES: {:<2} SISTER: {:<10} WORLD {}  POWER {}  TIME: {:>3} ",
        run.score, run.lives, run.sister_name, run.level, run.power_level, run.time_left
    );
    let clipped: String = hud.chars().take(cols as usize).collect();
    out.queue(Print(clipped))?;
    out.queue(style::SetBackgroundColor(Color::Reset))?;
    Ok(())
}

fn draw_controls_hint<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, view.bottom_row()))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → / A D : Move   ↑ / SPACE : Jump   Z : Ability   ESC : Pause   Q : Quit"))?;
    Ok(())
}

// ── Screens ───────────────────────────────────────────────────────────────────

fn centered<W: Write>(out: &mut W, cols: u16, row: u16, text: &str, color: Color) -> std::io::Result<()> {
    let col = (cols / 2).saturating_sub(text.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}

fn draw_intro<W: Write>(out: &mut W, run: &RunView, cols: u16, rows: u16) -> std::io::Result<()> {
    let cy = rows / 2;
    centered(out, cols, cy.saturating_sub(8), "MARIO SISTERS", C_TITLE)?;
    centered(out, cols, cy.saturating_sub(6), "A Satirical Adventure", C_SKY)?;
    centered(out, cols, cy.saturating_sub(3), "Select Your Sister:", Color::White)?;

    for (i, sister) in Sister::ALL.iter().enumerate() {
        let row = cy.saturating_sub(1) + i as u16;
        let (label, color) = if *sister == run.selected {
            (format!("> {} <", sister.name()), C_SELECTED)
        } else {
            (sister.name().to_string(), to_color(sister_color(*sister)))
        };
        centered(out, cols, row, &label, color)?;
    }

    centered(
        out,
        cols,
        cy + 5,
        "Press UP/DOWN to select, ENTER to start, Q to quit",
        C_HINT,
    )?;
    Ok(())
}

fn draw_banner<W: Write>(
    out: &mut W,
    cols: u16,
    rows: u16,
    lines: &[(&str, Color)],
) -> std::io::Result<()> {
    let start = (rows / 2).saturating_sub(lines.len() as u16 / 2);
    for (i, (text, color)) in lines.iter().enumerate() {
        centered(out, cols, start + i as u16, text, *color)?;
    }
    Ok(())
}
