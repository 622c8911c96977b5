//! Actions accepted by the turn state machine.
//!
//! Actions come from a UI or are synthesized from an AI move. Which ones are
//! accepted depends on the current phase; see `rules::Phase::permits`.

use serde::{Deserialize, Serialize};

use crate::grid::{Direction, Position};
use crate::tiles::Rotation;

/// A request to change the game state.
///
/// ## Example
///
/// ```
/// use tile_placer::core::Action;
/// use tile_placer::grid::{Direction, Position};
/// use tile_placer::tiles::Rotation;
///
/// let place = Action::PlaceTile { tile: 0, rotation: Rotation::new(1), position: Position::new(3, 4) };
/// let meeple = Action::PlaceMeeple(Direction::Center);
///
/// assert_eq!(place.name(), "place tile");
/// assert_eq!(meeple.name(), "place meeple");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Place the tile at hand index `tile`, turned by `rotation`.
    PlaceTile {
        tile: usize,
        rotation: Rotation,
        position: Position,
    },

    /// Choose which hand tile a skip discards.
    SelectTile(usize),

    /// Put a follower on the feature at `Direction` of the tile just placed.
    PlaceMeeple(Direction),

    /// Discard the selected tile (while placing) or decline a follower.
    Skip,

    /// Abandon the round.
    Abort,
}

impl Action {
    /// Short name used in logs and errors.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Action::PlaceTile { .. } => "place tile",
            Action::SelectTile(_) => "select tile",
            Action::PlaceMeeple(_) => "place meeple",
            Action::Skip => "skip",
            Action::Abort => "abort",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::PlaceTile { tile, rotation, position } => {
                write!(f, "place tile {} at {} rotated {}", tile, position, rotation)
            }
            Action::SelectTile(index) => write!(f, "select tile {}", index),
            Action::PlaceMeeple(direction) => write!(f, "place meeple {:?}", direction),
            Action::Skip => write!(f, "skip"),
            Action::Abort => write!(f, "abort"),
        }
    }
}
