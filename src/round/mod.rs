//! Round and turn tracking.
//!
//! A `Round` owns the players of one round and knows whose turn it is. It
//! does not know about phases; the state machine in `rules` drives it.

mod player;

pub use player::{Player, PlayerScore};

use serde::{Deserialize, Serialize};

use crate::core::{GameSettings, PlayerId, PlayerMap};
use crate::stack::TileStack;

/// Players, active seat and turn counter of one round.
///
/// ## Example
///
/// ```
/// use tile_placer::core::{GameSettings, PlayerId};
/// use tile_placer::round::Round;
///
/// let mut round = Round::new(&GameSettings::default().with_players(3));
/// assert_eq!(round.active(), PlayerId::new(0));
///
/// round.next_turn();
/// round.next_turn();
/// round.next_turn();
/// assert_eq!(round.active(), PlayerId::new(0));
/// assert_eq!(round.turn(), 3);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    players: PlayerMap<Player>,
    active: PlayerId,
    turn: u32,
    hand_size: usize,
}

impl Round {
    /// Seat the players described by the settings.
    #[must_use]
    pub fn new(settings: &GameSettings) -> Self {
        let players = PlayerMap::new(settings.player_count, |id| {
            Player::new(id, settings.player_name(id), settings.is_computer_controlled(id))
        });
        Self {
            players,
            active: PlayerId::new(0),
            turn: 0,
            hand_size: settings.tiles_per_player,
        }
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    /// Hand size cap.
    #[must_use]
    pub fn hand_size(&self) -> usize {
        self.hand_size
    }

    #[must_use]
    pub fn active(&self) -> PlayerId {
        self.active
    }

    /// Completed turns.
    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    #[must_use]
    pub fn active_player(&self) -> &Player {
        &self.players[self.active]
    }

    pub fn active_player_mut(&mut self) -> &mut Player {
        &mut self.players[self.active]
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id]
    }

    pub fn player_mut(&mut self, id: PlayerId) -> &mut Player {
        &mut self.players[id]
    }

    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().map(|(_, player)| player)
    }

    /// Pass the turn to the next seat.
    pub fn next_turn(&mut self) -> PlayerId {
        self.active = self.active.next(self.player_count());
        self.turn += 1;
        self.active
    }

    /// Whether the player's hand is at the cap.
    #[must_use]
    pub fn has_full_hand(&self, id: PlayerId) -> bool {
        self.players[id].hand().len() >= self.hand_size
    }

    /// Draw into a hand until it is full or the stack is empty. Returns the
    /// number of tiles drawn.
    pub fn fill_hand(&mut self, id: PlayerId, stack: &mut TileStack) -> usize {
        let mut drawn = 0;
        while !self.has_full_hand(id) {
            let Some(tile) = stack.draw() else { break };
            self.players[id].add_tile(tile);
            drawn += 1;
        }
        drawn
    }

    /// Whether any seat is human.
    #[must_use]
    pub fn has_human_players(&self) -> bool {
        self.players().any(|p| !p.is_computer_controlled())
    }

    /// The round is over once the stack is empty and no one holds a tile.
    #[must_use]
    pub fn is_over(&self, stack: &TileStack) -> bool {
        stack.is_empty() && self.players().all(|p| p.hand().is_empty())
    }

    /// Players with the highest overall score.
    #[must_use]
    pub fn leaders(&self) -> Vec<PlayerId> {
        let best = self.players().map(|p| p.score().overall()).max().unwrap_or(0);
        self.players()
            .filter(|p| p.score().overall() == best)
            .map(Player::id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TileId;
    use crate::tiles::{TerrainType, Tile, TileType};

    fn stack(n: u32) -> TileStack {
        TileStack::from_tiles((0..n).map(|i| Tile::new(TileId::new(i), TileType::Road)))
    }

    #[test]
    fn test_seats_follow_settings() {
        let settings = GameSettings::default().with_players(4).with_computer_player(3);
        let round = Round::new(&settings);
        assert_eq!(round.player_count(), 4);
        assert_eq!(round.player(PlayerId::new(2)).name(), "THREE");
        assert!(round.player(PlayerId::new(3)).is_computer_controlled());
        assert!(round.has_human_players());
    }

    #[test]
    fn test_fill_hand_respects_cap_and_stack() {
        let settings = GameSettings::default().with_tiles_per_player(3);
        let mut round = Round::new(&settings);
        let mut tiles = stack(4);

        assert_eq!(round.fill_hand(PlayerId::new(0), &mut tiles), 3);
        assert_eq!(round.fill_hand(PlayerId::new(0), &mut tiles), 0);
        assert_eq!(round.fill_hand(PlayerId::new(1), &mut tiles), 1);
        assert!(tiles.is_empty());
        assert!(!round.has_full_hand(PlayerId::new(1)));
    }

    #[test]
    fn test_round_over_needs_empty_hands() {
        let mut round = Round::new(&GameSettings::default());
        let mut tiles = stack(1);
        round.fill_hand(PlayerId::new(0), &mut tiles);
        assert!(tiles.is_empty());
        assert!(!round.is_over(&tiles));

        round.player_mut(PlayerId::new(0)).take_tile(0);
        assert!(round.is_over(&tiles));
    }

    #[test]
    fn test_leaders() {
        let mut round = Round::new(&GameSettings::default().with_players(3));
        assert_eq!(round.leaders().len(), 3);

        round.player_mut(PlayerId::new(1)).add_points(4, TerrainType::City);
        round.player_mut(PlayerId::new(2)).add_points(4, TerrainType::Road);
        assert_eq!(round.leaders(), vec![PlayerId::new(1), PlayerId::new(2)]);
    }
}
