//! Error types for the rules engine.
//!
//! Placement and follower rejections are expected outcomes: the caller picks
//! another position or skips. `IllegalAction` marks a caller defect (an action
//! issued in a state that does not accept it). Every error is returned before
//! any state is touched.

use thiserror::Error;

use crate::grid::{Direction, Position};
use crate::tiles::TerrainType;

use super::player::PlayerId;

/// Why a tile cannot go where it was asked to go.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlacementError {
    #[error("position {0} is outside the grid")]
    OutOfBounds(Position),

    #[error("position {0} is already occupied")]
    Occupied(Position),

    #[error("position {0} does not touch any placed tile")]
    NotAdjacent(Position),

    #[error("{direction:?} edge does not match the neighbor of {position}")]
    EdgeMismatch { position: Position, direction: Direction },
}

/// Why a follower cannot go on the requested feature.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MeepleError {
    #[error("{0} has no followers left")]
    NoneLeft(PlayerId),

    #[error("followers may not be placed on {0:?}")]
    TerrainDisabled(TerrainType),

    #[error("no feature at {direction:?} of {position}")]
    NoFeature { position: Position, direction: Direction },

    #[error("the feature at {direction:?} of {position} is already occupied")]
    Occupied { position: Position, direction: Direction },
}

/// Invalid game settings.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    #[error("player count must be between 2 and 5, got {0}")]
    PlayerCount(usize),

    #[error("tiles per player must be between 1 and 5, got {0}")]
    HandSize(usize),

    #[error("grid must be at least 1x1, got {width}x{height}")]
    GridSize { width: u32, height: u32 },

    #[error("stack size multiplier must be between 1 and 10, got {0}")]
    StackMultiplier(u32),
}

/// Top-level engine error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("{action} is not allowed while {phase}")]
    IllegalAction { phase: &'static str, action: &'static str },

    #[error("placement rejected: {0}")]
    Placement(#[from] PlacementError),

    #[error("follower rejected: {0}")]
    Meeple(#[from] MeepleError),

    #[error("invalid settings: {0}")]
    Settings(#[from] SettingsError),

    #[error("{0} has no tile at hand index {1}")]
    NoSuchTile(PlayerId, usize),

    #[error("{0} is computer controlled")]
    ComputerTurn(PlayerId),

    #[error("no computer move is pending")]
    NoPendingMove,

    #[error("move search for {0} stopped without a result")]
    SearchFailed(PlayerId),

    #[error("move search pool unavailable: {0}")]
    SearchPool(String),

    #[error("state serialization failed: {0}")]
    Serialization(String),
}

impl GameError {
    /// True for outcomes the caller is expected to recover from by trying
    /// something else (another position, rotation or feature).
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        matches!(self, GameError::Placement(_) | GameError::Meeple(_))
    }
}

pub type Result<T> = std::result::Result<T, GameError>;
