//! The move search interface.
//!
//! A search gets an owned snapshot of everything a player can see and
//! answers with at most one move. The state machine turns that move into
//! ordinary actions, so a computer player is held to the same rules as a
//! human one.

use serde::{Deserialize, Serialize};

use super::distance::MinkowskiDistance;
use crate::core::{Action, GameSettings, MeepleRules, PlayerId};
use crate::grid::{Direction, Grid, Position};
use crate::stack::TileStack;
use crate::tiles::{Rotation, Tile};

/// Snapshot handed to a move search.
///
/// Grid and stack are persistent structures, so building a request does not
/// copy the board.
#[derive(Clone, Debug)]
pub struct SearchRequest {
    pub player: PlayerId,
    pub hand: Vec<Tile>,
    pub free_meeples: u8,
    pub grid: Grid,
    pub stack: TileStack,
    pub meeple_rules: MeepleRules,
    pub allow_fortifying: bool,
    pub distance_measure: MinkowskiDistance,
}

impl SearchRequest {
    /// Build a request with the rule toggles taken from the settings.
    #[must_use]
    pub fn new(player: PlayerId, hand: Vec<Tile>, free_meeples: u8, grid: Grid, stack: TileStack, settings: &GameSettings) -> Self {
        Self {
            player,
            hand,
            free_meeples,
            grid,
            stack,
            meeple_rules: settings.meeple_rules,
            allow_fortifying: settings.allow_fortifying,
            distance_measure: settings.distance_measure,
        }
    }
}

/// A complete turn: which tile, how it is turned, where it goes and where
/// the follower goes, if anywhere.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// Index into the hand.
    pub tile: usize,
    pub rotation: Rotation,
    pub position: Position,
    pub meeple: Option<Direction>,
}

impl Move {
    /// The tile placement as an action.
    #[must_use]
    pub fn placement(&self) -> Action {
        Action::PlaceTile {
            tile: self.tile,
            rotation: self.rotation,
            position: self.position,
        }
    }

    /// The follower decision as an action.
    #[must_use]
    pub fn manning(&self) -> Action {
        self.meeple.map_or(Action::Skip, Action::PlaceMeeple)
    }
}

/// Strategy that picks moves for computer players.
///
/// Implementations must be deterministic: equal requests give equal answers.
pub trait MoveSearch: Send + Sync {
    /// The best move, or `None` if no tile in hand fits anywhere.
    fn best_move(&self, request: &SearchRequest) -> Option<Move>;

    /// Hand index of the tile to give up when skipping on `grid`.
    fn choose_tile_to_drop(&self, hand: &[Tile], grid: &Grid) -> usize {
        let _ = (hand, grid);
        0
    }
}
