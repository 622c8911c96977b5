//! A placed tile and the patterns its positions belong to.

use serde::{Deserialize, Serialize};

use super::position::{Direction, Position};
use crate::core::PatternId;
use crate::tiles::Tile;

/// One occupied grid slot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSpot {
    tile: Tile,
    position: Position,
    tags: [Option<PatternId>; 9],
}

impl GridSpot {
    pub(super) fn new(tile: Tile, position: Position) -> Self {
        Self {
            tile,
            position,
            tags: [None; 9],
        }
    }

    #[must_use]
    pub fn tile(&self) -> &Tile {
        &self.tile
    }

    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    /// The pattern claiming a position on this tile, as last written.
    ///
    /// Tags are rewritten on every merge, so this is always a live pattern;
    /// `Grid::pattern_at` additionally follows absorption links.
    #[must_use]
    pub fn tag(&self, direction: Direction) -> Option<PatternId> {
        self.tags[direction.index()]
    }

    pub(super) fn set_tag(&mut self, direction: Direction, pattern: PatternId) {
        self.tags[direction.index()] = Some(pattern);
    }

    /// Distinct patterns tagged on this tile, in first-seen order.
    #[must_use]
    pub fn patterns(&self) -> Vec<PatternId> {
        let mut seen = Vec::with_capacity(4);
        for tag in self.tags.iter().flatten() {
            if !seen.contains(tag) {
                seen.push(*tag);
            }
        }
        seen
    }
}
