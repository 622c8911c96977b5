//! Players: hand, follower pool and score.

use serde::{Deserialize, Serialize};

use crate::core::{PlayerId, MAXIMAL_MEEPLES};
use crate::tiles::{TerrainType, Tile};

/// Points per basic terrain plus the overall total. Only ever grows.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerScore {
    overall: u32,
    by_terrain: [u32; 4],
}

impl PlayerScore {
    /// Credit points earned from a pattern of the given terrain.
    pub fn add_points(&mut self, amount: u32, terrain: TerrainType) {
        if let Some(index) = terrain.basic_index() {
            self.by_terrain[index] += amount;
            self.overall += amount;
        }
    }

    #[must_use]
    pub fn overall(&self) -> u32 {
        self.overall
    }

    /// Points from one terrain. `Other` never scores.
    #[must_use]
    pub fn terrain_score(&self, terrain: TerrainType) -> u32 {
        terrain.basic_index().map_or(0, |i| self.by_terrain[i])
    }
}

/// One seat in a round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    id: PlayerId,
    name: String,
    computer: bool,
    hand: Vec<Tile>,
    free_meeples: u8,
    score: PlayerScore,
}

impl Player {
    #[must_use]
    pub fn new(id: PlayerId, name: impl Into<String>, computer: bool) -> Self {
        Self {
            id,
            name: name.into(),
            computer,
            hand: Vec::new(),
            free_meeples: MAXIMAL_MEEPLES,
            score: PlayerScore::default(),
        }
    }

    #[must_use]
    pub fn id(&self) -> PlayerId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn is_computer_controlled(&self) -> bool {
        self.computer
    }

    #[must_use]
    pub fn hand(&self) -> &[Tile] {
        &self.hand
    }

    pub fn add_tile(&mut self, tile: Tile) {
        self.hand.push(tile);
    }

    /// Remove a tile from the hand by index.
    pub fn take_tile(&mut self, index: usize) -> Option<Tile> {
        (index < self.hand.len()).then(|| self.hand.remove(index))
    }

    #[must_use]
    pub fn free_meeples(&self) -> u8 {
        self.free_meeples
    }

    #[must_use]
    pub fn has_free_meeple(&self) -> bool {
        self.free_meeples > 0
    }

    /// Take a follower from the pool. `false` if none is left.
    pub fn take_meeple(&mut self) -> bool {
        if self.free_meeples == 0 {
            return false;
        }
        self.free_meeples -= 1;
        true
    }

    /// Put a follower back into the pool.
    pub fn return_meeple(&mut self) {
        debug_assert!(self.free_meeples < MAXIMAL_MEEPLES, "{} has too many followers", self.id);
        self.free_meeples = (self.free_meeples + 1).min(MAXIMAL_MEEPLES);
    }

    #[must_use]
    pub fn score(&self) -> &PlayerScore {
        &self.score
    }

    pub fn add_points(&mut self, amount: u32, terrain: TerrainType) {
        self.score.add_points(amount, terrain);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TileId;
    use crate::tiles::TileType;

    #[test]
    fn test_score_tracks_terrain() {
        let mut score = PlayerScore::default();
        score.add_points(4, TerrainType::City);
        score.add_points(3, TerrainType::Road);
        score.add_points(2, TerrainType::City);
        score.add_points(5, TerrainType::Other);

        assert_eq!(score.overall(), 9);
        assert_eq!(score.terrain_score(TerrainType::City), 6);
        assert_eq!(score.terrain_score(TerrainType::Field), 0);
        assert_eq!(score.terrain_score(TerrainType::Other), 0);
    }

    #[test]
    fn test_meeple_pool() {
        let mut player = Player::new(PlayerId::new(0), "ONE", false);
        assert_eq!(player.free_meeples(), MAXIMAL_MEEPLES);
        for _ in 0..MAXIMAL_MEEPLES {
            assert!(player.take_meeple());
        }
        assert!(!player.has_free_meeple());
        assert!(!player.take_meeple());
        player.return_meeple();
        assert_eq!(player.free_meeples(), 1);
    }

    #[test]
    fn test_hand() {
        let mut player = Player::new(PlayerId::new(1), "TWO", true);
        player.add_tile(Tile::new(TileId::new(4), TileType::Road));
        player.add_tile(Tile::new(TileId::new(5), TileType::Monastery));

        assert_eq!(player.take_tile(2), None);
        let tile = player.take_tile(0).unwrap();
        assert_eq!(tile.id(), TileId::new(4));
        assert_eq!(player.hand().len(), 1);
        assert!(player.is_computer_controlled());
    }
}
