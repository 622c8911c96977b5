//! Outcome of a finished round.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// Result of a completed round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerId),
    /// Every player has the same score.
    Draw,
    /// Several players share the top score.
    Winners(Vec<PlayerId>),
}

impl GameResult {
    /// Build a result from the players holding the top score.
    #[must_use]
    pub fn from_leaders(leaders: Vec<PlayerId>, player_count: usize) -> Self {
        match leaders.as_slice() {
            [single] => GameResult::Winner(*single),
            _ if leaders.len() >= player_count => GameResult::Draw,
            _ => GameResult::Winners(leaders),
        }
    }

    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        match self {
            GameResult::Winner(p) => *p == player,
            GameResult::Winners(ps) => ps.contains(&player),
            GameResult::Draw => false,
        }
    }
}
