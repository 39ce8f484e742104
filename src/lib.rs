/// Mario Sisters: a side-scrolling platformer simulation.
///
/// The library is the simulation core: entity data, physics, per-kind
/// behaviours and the frame orchestrator.  Rendering, input polling and the
/// menu screens live in the `mario_sisters` binary.

pub mod compute;
pub mod config;
pub mod constants;
pub mod enemies;
pub mod entities;
pub mod error;
pub mod items;
pub mod levels;
pub mod physics;
pub mod player;
pub mod snapshot;
pub mod terrain;

pub use compute::{advance_frame, init_state, load_level, new_game, FrameReport};
pub use config::GameConfig;
pub use entities::{GameEvent, GamePhase, GameState, InputState, Sister};
pub use error::{GameError, Result};
pub use levels::LevelSet;
pub use snapshot::{snapshot, Snapshot};
