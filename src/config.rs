//! Options recognised when starting a game.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_DIFFICULTY, EXTRA_HARD_DIFFICULTY};
use crate::error::ConfigError;

/// Highest difficulty the startup prompt accepts as-is.
pub const PROMPT_MAX_DIFFICULTY: u32 = 5;

/// Game options. Missing fields fall back to the defaults, so a partial JSON
/// document only overrides what it names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Rows of aliens, and the speed multiplier for their movement.
    pub difficulty: u32,
    /// Render the playfield edges visibly.
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            difficulty: DEFAULT_DIFFICULTY,
            debug: false,
        }
    }
}

impl Config {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.difficulty == 0 {
            return Err(ConfigError::InvalidDifficulty(self.difficulty));
        }
        Ok(())
    }
}

/// Turn the raw answer of the startup prompt into a usable difficulty.
///
/// Anything outside `1..=5` (including unparsable text) means extra hard mode.
pub fn coerce_difficulty(input: &str) -> u32 {
    match input.trim().parse::<u32>() {
        Ok(d) if (1..=PROMPT_MAX_DIFFICULTY).contains(&d) => d,
        _ => EXTRA_HARD_DIFFICULTY,
    }
}
