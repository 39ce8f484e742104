/// Run configuration, loadable from TOML or RON.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::FPS;
use crate::error::{GameError, Result};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Visible window, in world pixels.  The height is also the level's
    /// vertical bound: anything whose top passes it has fallen out.
    pub screen_width: u32,
    pub screen_height: u32,

    /// Where the player appears on every level load and after a fall.
    pub spawn_x: f32,
    pub spawn_y: f32,

    pub starting_lives: u32,

    /// Seconds per level.
    pub time_budget: u32,

    /// Simulation frames per in-game second.
    pub fps: u32,

    /// RON level set replacing the built-in campaign.
    pub levels_file: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            screen_width: 800,
            screen_height: 600,
            spawn_x: 100.0,
            spawn_y: 300.0,
            starting_lives: 3,
            time_budget: 300,
            fps: FPS,
            levels_file: None,
        }
    }
}

impl GameConfig {
    /// Load from a `.toml` or `.ron` file; missing keys take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let display = path.display().to_string();

        let config: GameConfig = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => toml::from_str(&contents).map_err(|e| GameError::Parse {
                path: display,
                message: e.to_string(),
            })?,
            Some("ron") => ron::from_str(&contents).map_err(|e| GameError::Parse {
                path: display,
                message: e.to_string(),
            })?,
            _ => return Err(GameError::UnsupportedFormat(display)),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.fps == 0 {
            return Err(GameError::InvalidConfig("fps must be positive".into()));
        }
        if self.screen_width == 0 || self.screen_height == 0 {
            return Err(GameError::InvalidConfig("screen size must be positive".into()));
        }
        if self.starting_lives == 0 {
            return Err(GameError::InvalidConfig("starting_lives must be at least 1".into()));
        }
        Ok(())
    }

    pub fn level_bottom(&self) -> f32 {
        self.screen_height as f32
    }

    pub fn screen_midpoint(&self) -> f32 {
        self.screen_width as f32 / 2.0
    }
}
