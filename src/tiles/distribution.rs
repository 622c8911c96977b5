//! Tile distribution: how many tiles of each type a stack holds.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::definition::TileType;
use super::tile::Tile;
use crate::core::TileId;

/// Number of copies per tile type.
///
/// Starts from the base-game amounts; games can change individual amounts
/// before a round starts.
///
/// ## Example
///
/// ```
/// use tile_placer::tiles::{TileDistribution, TileType};
///
/// let mut distribution = TileDistribution::default();
/// distribution.set_amount(TileType::RoadCrossing, 3);
///
/// assert_eq!(distribution.amount(TileType::RoadCrossing), 3);
/// assert_eq!(distribution.total(2), 2 * 73);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileDistribution {
    amounts: FxHashMap<TileType, u32>,
}

impl Default for TileDistribution {
    fn default() -> Self {
        let amounts = TileType::ALL
            .iter()
            .map(|&tile_type| (tile_type, tile_type.definition().amount))
            .collect();
        Self { amounts }
    }
}

impl TileDistribution {
    /// A distribution with no tiles at all.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            amounts: FxHashMap::default(),
        }
    }

    /// Copies of one type.
    #[must_use]
    pub fn amount(&self, tile_type: TileType) -> u32 {
        self.amounts.get(&tile_type).copied().unwrap_or(0)
    }

    /// Change the copies of one type.
    pub fn set_amount(&mut self, tile_type: TileType, amount: u32) {
        self.amounts.insert(tile_type, amount);
    }

    /// Tiles in a stack built with the given multiplier.
    #[must_use]
    pub fn total(&self, multiplier: u32) -> u32 {
        self.amounts
            .values()
            .fold(0u32, |sum, &amount| sum.saturating_add(amount))
            .saturating_mul(multiplier)
    }

    /// Create the tiles of a stack, in `TileType::ALL` order, with ids
    /// starting at `first_id`.
    #[must_use]
    pub fn create_tiles(&self, multiplier: u32, first_id: u32) -> Vec<Tile> {
        let mut next_id = first_id;
        let mut tiles = Vec::with_capacity(self.total(multiplier) as usize);
        for tile_type in TileType::ALL {
            for _ in 0..self.amount(tile_type).saturating_mul(multiplier) {
                tiles.push(Tile::new(TileId::new(next_id), tile_type));
                next_id += 1;
            }
        }
        tiles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_base_game() {
        let distribution = TileDistribution::default();
        assert_eq!(distribution.total(1), 71);
        assert_eq!(distribution.amount(TileType::RoadCurve), 9);
    }

    #[test]
    fn test_total_saturates() {
        let mut distribution = TileDistribution::empty();
        distribution.set_amount(TileType::Road, u32::MAX);
        distribution.set_amount(TileType::Monastery, 1);
        assert_eq!(distribution.total(1), u32::MAX);
        assert_eq!(TileDistribution::default().total(u32::MAX), u32::MAX);
    }

    #[test]
    fn test_create_tiles_assigns_unique_ids() {
        let mut distribution = TileDistribution::empty();
        distribution.set_amount(TileType::Road, 2);
        distribution.set_amount(TileType::Monastery, 1);

        let tiles = distribution.create_tiles(2, 10);
        assert_eq!(tiles.len(), 6);
        assert_eq!(tiles[0].tile_type(), TileType::Monastery);
        assert_eq!(tiles[2].tile_type(), TileType::Road);

        let ids: Vec<u32> = tiles.iter().map(|t| t.id().raw()).collect();
        assert_eq!(ids, vec![10, 11, 12, 13, 14, 15]);
    }
}
