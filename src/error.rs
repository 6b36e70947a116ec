//! Centralized error types for the simulation core.
//!
//! Configuration defects (a state without steering, a ghost without a house
//! priority) are programming errors and panic instead; everything a caller can
//! reasonably trigger is reported through these types.

use crate::map::tile::Tile;

/// Main error type for the simulation core.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("Map parsing error: {0}")]
    MapParse(#[from] ParseError),

    #[error("Map error: {0}")]
    Map(#[from] MapError),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Error type for board layout parsing.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown character in board: {0:?}")]
    UnknownCharacter(char),
    #[error("Board row {row} has width {width}, expected {expected}")]
    RaggedRow { row: usize, width: usize, expected: usize },
    #[error("Board has no rows")]
    Empty,
    #[error("Pac-Man's starting position not found")]
    MissingPacManStart,
    #[error("Pac-Man's starting position is defined {0} times")]
    DuplicatePacManStart(usize),
}

/// Errors related to maze configuration and food bookkeeping.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum MapError {
    #[error("Invalid map configuration: {0}")]
    InvalidConfig(String),

    #[error("No food left at tile {0}")]
    NoFood(Tile),
}

/// Result type for core operations.
pub type GameResult<T> = Result<T, GameError>;
