//! The mutable state of one round.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::phase::Phase;
use super::result::GameResult;
use crate::core::PatternId;
use crate::grid::Grid;
use crate::round::Round;
use crate::stack::TileStack;

/// Everything a round changes.
///
/// The state is plain data: it serializes to a stable byte form, which is
/// how refused actions are shown to leave it untouched.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub grid: Grid,
    pub round: Round,
    pub stack: TileStack,
    pub phase: Phase,
    /// Patterns completed by the tile just placed; they score when the turn
    /// ends.
    pub pending_scoring: SmallVec<[PatternId; 4]>,
    pub result: Option<GameResult>,
}

impl GameState {
    /// Stable byte form of the state.
    pub fn to_bytes(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }
}
