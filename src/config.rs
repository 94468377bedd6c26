/// Session configuration and tunable parameters.
///
/// Every field has a default, so a config file only needs to name the values
/// it overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// A cloud's fixed row and sprite width, in virtual pixels.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CloudSpec {
    pub y: f32,
    pub width: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub pumpkin_count: usize,
    pub starting_lives: u32,
    pub starting_round: u32,
    /// Seconds of play per round.
    pub round_duration_secs: f32,
    pub clouds: Vec<CloudSpec>,
    pub owl_positions: Vec<(f32, f32)>,
    /// Target frame time of the terminal front-end.
    pub frame_millis: u64,
}

impl GameConfig {
    /// Width of the virtual play area all scenery coordinates are laid out in.
    pub const VIRTUAL_WIDTH: f32 = 1280.0;
    pub const VIRTUAL_HEIGHT: f32 = 720.0;

    pub const DEFAULT_PUMPKIN_COUNT: usize = 5;
    pub const DEFAULT_STARTING_LIVES: u32 = 3;
    pub const DEFAULT_ROUND_DURATION_SECS: f32 = 30.0;

    pub fn new() -> Self {
        Self {
            pumpkin_count: Self::DEFAULT_PUMPKIN_COUNT,
            starting_lives: Self::DEFAULT_STARTING_LIVES,
            starting_round: 1,
            round_duration_secs: Self::DEFAULT_ROUND_DURATION_SECS,
            clouds: vec![
                CloudSpec { y: 620.0, width: 240.0 },
                CloudSpec { y: 540.0, width: 180.0 },
                CloudSpec { y: 470.0, width: 300.0 },
            ],
            owl_positions: vec![(60.0, 420.0)],
            frame_millis: 33,
        }
    }

    /// Read a JSON config file and validate it.
    pub fn load(path: &Path) -> Result<Self, GameError> {
        let text = std::fs::read_to_string(path)?;
        let config: GameConfig = serde_json::from_str(&text)?;
        config.validate()?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if self.pumpkin_count == 0 {
            return Err(GameError::InvalidConfig("pumpkin_count must be at least 1".into()));
        }
        if self.starting_lives == 0 {
            return Err(GameError::InvalidConfig("starting_lives must be at least 1".into()));
        }
        if !(self.round_duration_secs > 0.0) {
            return Err(GameError::InvalidConfig(format!(
                "round_duration_secs must be positive, got {}",
                self.round_duration_secs
            )));
        }
        if let Some(cloud) = self.clouds.iter().find(|c| !(c.width > 0.0)) {
            return Err(GameError::InvalidConfig(format!(
                "cloud width must be positive, got {}",
                cloud.width
            )));
        }
        if self.frame_millis == 0 {
            return Err(GameError::InvalidConfig("frame_millis must be at least 1".into()));
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
