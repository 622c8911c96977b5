//! Turn phases and the actions each one accepts.

use serde::{Deserialize, Serialize};

use crate::core::Action;
use crate::grid::Position;

/// Where the turn sequence stands.
///
/// ```text
/// Placing --place tile--> Manning --meeple/skip--> TurnEnd --> Placing
///    |  \--skip--> Placing (next player)
///    \--------- abort, or round over from any phase --------> GameOver
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// The active player places a tile. `selected` is the hand index a skip
    /// would discard.
    Placing { selected: usize },
    /// The active player may put a follower on the tile at `position`.
    Manning { position: Position },
    /// Completed patterns score and the turn passes on.
    TurnEnd,
    /// The round is over; only abort (a no-op) and a new round are accepted.
    GameOver,
}

impl Phase {
    /// Name used in logs and errors.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Placing { .. } => "placing",
            Phase::Manning { .. } => "manning",
            Phase::TurnEnd => "ending the turn",
            Phase::GameOver => "game over",
        }
    }

    /// Whether the phase accepts the action at all. Guards that depend on
    /// the game (hand contents, follower pool, placement rules) come after.
    #[must_use]
    pub fn permits(&self, action: &Action) -> bool {
        match (self, action) {
            (_, Action::Abort) => true,

            (Phase::Placing { .. }, Action::PlaceTile { .. }) => true,
            (Phase::Placing { .. }, Action::SelectTile(_)) => true,
            (Phase::Placing { .. }, Action::Skip) => true,
            (Phase::Placing { .. }, Action::PlaceMeeple(_)) => false,

            (Phase::Manning { .. }, Action::PlaceMeeple(_)) => true,
            (Phase::Manning { .. }, Action::Skip) => true,
            (Phase::Manning { .. }, Action::PlaceTile { .. }) => false,
            (Phase::Manning { .. }, Action::SelectTile(_)) => false,

            (Phase::TurnEnd, Action::PlaceTile { .. } | Action::SelectTile(_) | Action::PlaceMeeple(_) | Action::Skip) => {
                false
            }
            (Phase::GameOver, Action::PlaceTile { .. } | Action::SelectTile(_) | Action::PlaceMeeple(_) | Action::Skip) => {
                false
            }
        }
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        matches!(self, Phase::GameOver)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
