//! The shared draw pile.
//!
//! Tiles are drawn from the top; skipped tiles go back under the bottom. A
//! tile may only go back once: returning it a second time takes it out of the
//! round, so a tile that fits nowhere cannot keep a round alive forever.
//!
//! ```
//! use tile_placer::core::GameRng;
//! use tile_placer::stack::TileStack;
//! use tile_placer::tiles::TileDistribution;
//!
//! let mut rng = GameRng::new(7);
//! let mut stack = TileStack::new(&TileDistribution::default(), 1, &mut rng);
//! assert_eq!(stack.len(), 71);
//!
//! let tile = stack.draw().unwrap();
//! assert!(stack.put_back(tile.clone()));
//! assert_eq!(stack.len(), 71);
//!
//! let again = stack.draw_matching(|t| t.id() == tile.id()).unwrap();
//! assert!(!stack.put_back(again));
//! assert_eq!(stack.len(), 70);
//! ```

use im::{OrdSet, Vector};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{GameRng, TileId};
use crate::tiles::{Tile, TileDistribution};

/// Id of the first stack tile; lower ids are reserved for the foundation.
pub const FIRST_STACK_TILE_ID: u32 = 1;

/// The draw pile of a round.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileStack {
    tiles: Vector<Tile>,
    returned: OrdSet<TileId>,
}

impl TileStack {
    /// Build and shuffle a stack from a distribution.
    #[must_use]
    pub fn new(distribution: &TileDistribution, multiplier: u32, rng: &mut GameRng) -> Self {
        let mut tiles = distribution.create_tiles(multiplier, FIRST_STACK_TILE_ID);
        rng.shuffle(&mut tiles);
        debug!(size = tiles.len(), seed = rng.seed(), "tile stack shuffled");
        Self::from_tiles(tiles)
    }

    /// A stack in the given order, first element on top.
    #[must_use]
    pub fn from_tiles(tiles: impl IntoIterator<Item = Tile>) -> Self {
        Self {
            tiles: tiles.into_iter().collect(),
            returned: OrdSet::new(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Take the top tile.
    pub fn draw(&mut self) -> Option<Tile> {
        self.tiles.pop_front()
    }

    /// Take the first tile from the top that satisfies the predicate.
    pub fn draw_matching(&mut self, predicate: impl Fn(&Tile) -> bool) -> Option<Tile> {
        let index = self.tiles.iter().position(predicate)?;
        Some(self.tiles.remove(index))
    }

    /// Put a tile under the bottom. Returns `false` and discards the tile if
    /// it was already returned once this round.
    pub fn put_back(&mut self, tile: Tile) -> bool {
        if self.returned.contains(&tile.id()) {
            debug!(tile = %tile.id(), "tile returned twice, discarded");
            return false;
        }
        self.returned.insert(tile.id());
        self.tiles.push_back(tile);
        true
    }

    /// Whether the tile went back to the stack before.
    #[must_use]
    pub fn was_returned(&self, id: TileId) -> bool {
        self.returned.contains(&id)
    }

    /// Tiles from top to bottom.
    pub fn iter(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }
}
