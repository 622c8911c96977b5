//! Greedy rule-based move search.
//!
//! Every legal combination of hand tile, rotation, position and follower is
//! played out on a snapshot of the grid and valued by what it earns right
//! away: points the player collects from patterns it completes, minus points
//! it hands to opponents. A follower on an unfinished pattern counts with the
//! pattern's current end-of-round value, less a small charge for tying it up.
//! Among equal values the move closest to the grid center wins, then the one
//! found first.

use tracing::trace;

use super::search::{Move, MoveSearch, SearchRequest};
use crate::core::{PatternId, PlayerId};
use crate::grid::{Grid, PlacementOutcome};
use crate::tiles::Tile;

/// Charge for a follower that stays on the grid after the turn.
pub const FOLLOWER_COST: i64 = 2;

/// A move together with its value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RatedMove {
    pub mv: Move,
    pub value: i64,
    pub distance: f64,
}

/// Deterministic greedy strategy.
///
/// ## Example
///
/// ```
/// use tile_placer::ai::{MoveSearch, RuleBasedAi, SearchRequest};
/// use tile_placer::core::{GameSettings, PlayerId, TileId};
/// use tile_placer::grid::{Grid, Position};
/// use tile_placer::stack::TileStack;
/// use tile_placer::tiles::{Tile, TileType};
///
/// let mut grid = Grid::new(5, 5);
/// grid.place(Tile::new(TileId::new(0), TileType::Monastery), Position::new(1, 2)).unwrap();
///
/// let hand = vec![Tile::new(TileId::new(1), TileType::Monastery)];
/// let request = SearchRequest::new(PlayerId::new(0), hand, 0, grid, TileStack::default(), &GameSettings::default());
///
/// let mv = RuleBasedAi::new().best_move(&request).unwrap();
/// assert_eq!(mv.position, Position::new(2, 2));
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct RuleBasedAi;

impl RuleBasedAi {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Every legal move with its rating, in enumeration order: hand index,
    /// then position (row-major), then rotation, then follower choice
    /// (none first).
    #[must_use]
    pub fn rate_moves(&self, request: &SearchRequest) -> Vec<RatedMove> {
        let center = request.grid.center();
        let mut rated = Vec::new();

        for (index, tile) in request.hand.iter().enumerate() {
            for (rotation, position) in request.grid.legal_placements(tile) {
                let mut placed_tile = tile.clone();
                placed_tile.rotate_to(rotation);
                let mut grid = request.grid.clone();
                let Ok(outcome) = grid.place(placed_tile, position) else {
                    continue;
                };

                let distance = request.distance_measure.distance(position, center);
                let mv = Move {
                    tile: index,
                    rotation,
                    position,
                    meeple: None,
                };
                rated.push(RatedMove {
                    mv,
                    value: value_of(&grid, &outcome, request.player, None),
                    distance,
                });

                if request.free_meeples == 0 {
                    continue;
                }
                let options =
                    grid.meeple_options(position, request.player, &request.meeple_rules, request.allow_fortifying);
                for (direction, _) in options {
                    let mut manned = grid.clone();
                    let Ok(pattern) =
                        manned.place_meeple(position, direction, request.player, request.allow_fortifying)
                    else {
                        continue;
                    };
                    rated.push(RatedMove {
                        mv: Move {
                            meeple: Some(direction),
                            ..mv
                        },
                        value: value_of(&manned, &outcome, request.player, Some(pattern)),
                        distance,
                    });
                }
            }
        }
        rated
    }
}

/// Immediate value of a placement for `player`.
fn value_of(grid: &Grid, outcome: &PlacementOutcome, player: PlayerId, manned: Option<PatternId>) -> i64 {
    let mut value = 0;
    for &id in &outcome.completed {
        let Some(pattern) = grid.pattern(id) else {
            continue;
        };
        let points = i64::from(grid.pattern_value(id));
        for owner in pattern.majority_owners() {
            if owner == player {
                value += points;
            } else {
                value -= points;
            }
        }
    }
    if let Some(id) = manned {
        if !outcome.completed.contains(&id) {
            value += i64::from(grid.pattern_value(id)) - FOLLOWER_COST;
        }
    }
    value
}

impl MoveSearch for RuleBasedAi {
    fn best_move(&self, request: &SearchRequest) -> Option<Move> {
        let rated = self.rate_moves(request);
        let evaluated = rated.len();

        let mut best: Option<RatedMove> = None;
        for candidate in rated {
            let better = match &best {
                None => true,
                Some(current) => {
                    candidate.value > current.value
                        || (candidate.value == current.value && candidate.distance < current.distance)
                }
            };
            if better {
                best = Some(candidate);
            }
        }

        trace!(player = %request.player, evaluated, best = ?best.map(|b| (b.mv, b.value)), "move search finished");
        best.map(|b| b.mv)
    }

    /// Give up the tile with the fewest legal placements, the first one on
    /// ties.
    fn choose_tile_to_drop(&self, hand: &[Tile], grid: &Grid) -> usize {
        hand.iter()
            .enumerate()
            .min_by_key(|(index, tile)| (grid.legal_placements(tile).len(), *index))
            .map_or(0, |(index, _)| index)
    }
}
