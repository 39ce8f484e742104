mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use log::{debug, info, warn};
use rand::thread_rng;

use mario_sisters::{
    advance_frame, init_state, snapshot, GameConfig, GameError, GameEvent, GameState, InputState,
    LevelSet,
};

/// Environment variable naming the log file.  Logging is off when unset,
/// since stdout belongs to the game screen.
const LOG_FILE_VAR: &str = "MARIO_SISTERS_LOG";

// ── Held-key tracking ─────────────────────────────────────────────────────────

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// at 60 FPS, 8 frames (≈133 ms) outlasts the OS key-repeat interval.
const HOLD_WINDOW: u64 = 8;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn any_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|k| is_held(key_frame, k, frame))
}

const LEFT_KEYS: [KeyCode; 3] = [KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')];
const RIGHT_KEYS: [KeyCode; 3] = [KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')];

// ── Setup ─────────────────────────────────────────────────────────────────────

fn init_logging() {
    let Ok(path) = std::env::var(LOG_FILE_VAR) else {
        return;
    };
    match File::create(&path) {
        Ok(file) => {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
                .target(env_logger::Target::Pipe(Box::new(file)))
                .init();
        }
        Err(e) => eprintln!("cannot open log file {}: {}", path, e),
    }
}

/// Config from the optional first argument, levels from the config's
/// `levels_file` or the built-in set.
fn load_setup() -> mario_sisters::Result<(GameConfig, LevelSet)> {
    let config = match std::env::args().nth(1) {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    let levels = match &config.levels_file {
        Some(path) => LevelSet::load(path)?,
        None => LevelSet::builtin(),
    };
    Ok((config, levels))
}

fn to_io(e: GameError) -> io::Error {
    io::Error::new(io::ErrorKind::Other, e)
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.
///
/// Input model: one-shot actions (jump, ability, pause, menu keys) come from
/// `Press` events drained this frame.  Walking uses the `key_frame` map, which
/// records the frame of the last press/repeat for every key, so a direction
/// stays live while it is held even on terminals without release events.
fn game_loop<W: Write>(
    out: &mut W,
    state: &mut GameState,
    rx: &mpsc::Receiver<Event>,
) -> io::Result<()> {
    let mut rng = thread_rng();
    let frame_time = Duration::from_secs_f64(1.0 / state.config.fps as f64);
    let world_w = state.config.screen_width as f32;
    let world_h = state.config.screen_height as f32;

    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;
        let mut input = InputState::default();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
                continue;
            };
            match kind {
                KeyEventKind::Press => {
                    key_frame.insert(code.clone(), frame);
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(()),
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(());
                        }
                        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
                            input.move_left_pressed = true;
                        }
                        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
                            input.move_right_pressed = true;
                        }
                        KeyCode::Up => {
                            input.jump_pressed = true;
                            input.select_up = true;
                        }
                        KeyCode::Char(' ') | KeyCode::Char('w') | KeyCode::Char('W') => {
                            input.jump_pressed = true;
                        }
                        KeyCode::Down => input.select_down = true,
                        KeyCode::Char('z')
                        | KeyCode::Char('Z')
                        | KeyCode::Char('x')
                        | KeyCode::Char('X') => input.ability_pressed = true,
                        KeyCode::Esc | KeyCode::Char('p') | KeyCode::Char('P') => {
                            input.pause_pressed = true;
                        }
                        KeyCode::Enter => input.confirm_pressed = true,
                        _ => {}
                    }
                }
                KeyEventKind::Repeat => {
                    key_frame.insert(code.clone(), frame);
                }
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        input.move_left_held = any_held(&key_frame, &LEFT_KEYS, frame);
        input.move_right_held = any_held(&key_frame, &RIGHT_KEYS, frame);

        let report = advance_frame(state, &input, &mut rng).map_err(to_io)?;
        for event in &report.events {
            match event {
                GameEvent::LevelComplete { level, bonus } => {
                    info!("level {} complete, time bonus {}", level, bonus)
                }
                GameEvent::PlayerDied { lives_left } => info!("fell, {} lives left", lives_left),
                other => debug!("{:?}", other),
            }
        }

        display::render(out, &snapshot(state), world_w, world_h, frame)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> io::Result<()> {
    init_logging();

    let (config, levels) = load_setup().map_err(to_io)?;
    info!(
        "starting with {} levels at {} fps",
        levels.len(),
        config.fps
    );
    let mut state = init_state(config, levels).map_err(to_io)?;

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back to HOLD_WINDOW.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();
    if !keyboard_enhanced {
        warn!("terminal has no key-release events; using hold window");
    }

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = game_loop(&mut out, &mut state, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    info!("exiting with score {}", state.score);
    result
}
