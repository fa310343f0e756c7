use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::config::{Axis, MAX_BOARD_DIMENSION, MIN_BOARD_DIMENSION};

/// Fatal problems detected while assembling a game.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "board {axis} {value} is outside [{}, {}]",
        MIN_BOARD_DIMENSION,
        MAX_BOARD_DIMENSION
    )]
    InvalidDimension { axis: Axis, value: u16 },

    #[error("initial snake segment ({x}, {y}) lies outside the board")]
    SnakeOutOfBounds { x: u16, y: u16 },

    #[error("no display collaborator was supplied")]
    MissingDisplay,

    #[error("no input collaborator was supplied")]
    MissingInput,

    #[error("cannot open log file {}: {source}", path.display())]
    LogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot load settings from {}: {source}", path.display())]
    Settings {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Failures that abort a running game.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("input capture failed: {0}")]
    Input(#[source] io::Error),

    #[error("display failed: {0}")]
    Display(#[source] io::Error),
}
