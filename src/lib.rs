//! Tile-based maze-chase simulation.
//!
//! The crate is the game core only: a fixed-step loop moving a player and
//! a set of pursuers through a static maze, with pellets, power-up timing,
//! scoring and the intro / playing / dying / game-over / win flow. Drawing
//! and raw input polling belong to the host; see `src/main.rs` for the
//! terminal front-end.

pub mod actor;
pub mod components;
pub mod config;
pub mod constants;
pub mod error;
pub mod ghost;
pub mod level;
pub mod pellets;
pub mod player;
pub mod scoring;
pub mod session;

pub use components::{Dir, Position, Tile};
pub use config::{Rules, Settings};
pub use error::{ConfigError, GameError, GameResult, LevelError};
pub use ghost::{GhostKind, GhostLook, GhostMode};
pub use level::{Level, Maze, PursuerSpawn};
pub use session::{GhostView, Input, PlayerView, Session, SessionState, Snapshot};
