/// Best-round persistence.

use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::GameError;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    /// Highest round completed in any session.
    pub high_round: u32,
}

impl Progress {
    /// Load saved progress.  A missing file is a fresh install, not an error.
    pub fn load(path: &Path) -> Result<Self, GameError> {
        match std::fs::read_to_string(path) {
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                log::debug!("no saved progress at {}", path.display());
                Ok(Self::default())
            }
            Err(err) => Err(err.into()),
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), GameError> {
        let text = serde_json::to_string_pretty(self)?;
        std::fs::write(path, text)?;
        Ok(())
    }

    /// Keep the larger of the stored and the newly reached round.
    /// Returns `true` when `round` is a new best.
    pub fn record(&mut self, round: u32) -> bool {
        if round > self.high_round {
            log::info!("new best round {} (was {})", round, self.high_round);
            self.high_round = round;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.high_round = 0;
    }
}
