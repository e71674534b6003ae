use std::io;

use thiserror::Error;

use crate::components::Tile;

/// A maze layout that cannot host a session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LevelError {
    #[error("maze layout is empty")]
    Empty,

    #[error("row {row} has width {found}, expected {expected}")]
    Ragged { row: usize, expected: usize, found: usize },

    #[error("unknown symbol {symbol:?} at column {col}, row {row}")]
    UnknownSymbol { symbol: char, col: usize, row: usize },

    #[error("{what} spawn {tile} lies outside the maze")]
    SpawnOutOfBounds { what: &'static str, tile: Tile },

    #[error("{what} spawn {tile} is a wall")]
    SpawnOnWall { what: &'static str, tile: Tile },

    #[error("{what} spawn {tile} cannot be reached from the player spawn")]
    SpawnUnreachable { what: &'static str, tile: Tile },

    #[error("level has no pursuers")]
    NoPursuers,
}

/// Invalid tuning or host settings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{var}={value:?} is not a valid value")]
    InvalidEnv { var: &'static str, value: String },

    #[error("{what} speed {speed} must be between 1 and {max}")]
    BadSpeed { what: &'static str, speed: i32, max: i32 },

    #[error("tile size {0} must be an even number of at least 2")]
    BadTileSize(i32),

    #[error("step interval must be non-zero")]
    ZeroStep,

    #[error("flash period must be non-zero")]
    ZeroFlashPeriod,

    #[error("ghost score table is empty")]
    EmptyScoreTable,
}

#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    Level(#[from] LevelError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("terminal error: {0}")]
    Io(#[from] io::Error),
}

pub type GameResult<T> = Result<T, GameError>;
