use std::path::PathBuf;

use thiserror::Error;

/// Contract violations rejected when a game is constructed.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("difficulty must be at least 1, got {0}")]
    InvalidDifficulty(u32),

    #[error("a fleet of {rows} rows reaches the defense line at {defense_line}px")]
    FleetOverflow { rows: u32, defense_line: f32 },

    #[error("playfield {width}x{height} cannot hold the ship")]
    InvalidPlayfield { width: f32, height: f32 },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config JSON")]
    Parse(#[from] serde_json::Error),

    #[error("difficulty must be a positive integer, got {0}")]
    InvalidDifficulty(u32),
}
