//! Feature patterns: one contiguous road, city, field or monastery.
//!
//! Patterns live in an arena owned by the grid and are referenced by
//! `PatternId`. A merge never removes a pattern; the absorbed one points at
//! its survivor through `absorbed_into` and is ignored from then on.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::position::{Direction, Position};
use crate::core::{PatternId, PlayerId};
use crate::tiles::TerrainType;

/// A placed follower.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Follower {
    pub owner: PlayerId,
    pub position: Position,
    pub direction: Direction,
}

/// Terrain-specific part of a pattern.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PatternKind {
    /// Road, city or field: grows by merging across tile edges.
    Connected,
    /// A single monastery center; tracks which of its eight surrounding
    /// slots hold tiles.
    Monastery {
        center: Position,
        neighbors: SmallVec<[Position; 8]>,
    },
}

/// One feature instance on the grid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridPattern {
    pub(super) id: PatternId,
    pub(super) terrain: TerrainType,
    pub(super) kind: PatternKind,
    pub(super) positions: Vec<(Position, Direction)>,
    pub(super) followers: SmallVec<[Follower; 4]>,
    pub(super) complete: bool,
    pub(super) scored: bool,
    pub(super) absorbed_into: Option<PatternId>,
}

impl GridPattern {
    pub(super) fn connected(id: PatternId, terrain: TerrainType) -> Self {
        Self {
            id,
            terrain,
            kind: PatternKind::Connected,
            positions: Vec::new(),
            followers: SmallVec::new(),
            complete: false,
            scored: false,
            absorbed_into: None,
        }
    }

    /// Starts incomplete even when surrounded, so the placement that fills
    /// the last hole still reports the completion.
    pub(super) fn monastery(id: PatternId, center: Position, neighbors: SmallVec<[Position; 8]>) -> Self {
        Self {
            id,
            terrain: TerrainType::Monastery,
            kind: PatternKind::Monastery { center, neighbors },
            positions: vec![(center, Direction::Center)],
            followers: SmallVec::new(),
            complete: false,
            scored: false,
            absorbed_into: None,
        }
    }

    #[must_use]
    pub fn id(&self) -> PatternId {
        self.id
    }

    #[must_use]
    pub fn terrain(&self) -> TerrainType {
        self.terrain
    }

    #[must_use]
    pub fn kind(&self) -> &PatternKind {
        &self.kind
    }

    /// Points per tile (monastery: per occupied slot including its own).
    #[must_use]
    pub fn multiplier(&self) -> u32 {
        self.terrain.multiplier()
    }

    /// Every `(position, direction)` pair the pattern covers.
    #[must_use]
    pub fn positions(&self) -> &[(Position, Direction)] {
        &self.positions
    }

    #[must_use]
    pub fn followers(&self) -> &[Follower] {
        &self.followers
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    #[must_use]
    pub fn is_scored(&self) -> bool {
        self.scored
    }

    /// The pattern this one was merged into, if any.
    #[must_use]
    pub fn absorbed_into(&self) -> Option<PatternId> {
        self.absorbed_into
    }

    /// Not absorbed into another pattern.
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.absorbed_into.is_none()
    }

    /// Whether the pattern covers the given position on the given tile.
    #[must_use]
    pub fn contains(&self, position: Position, direction: Direction) -> bool {
        self.positions.contains(&(position, direction))
    }

    /// Distinct tiles the pattern spans. For monasteries: the center plus
    /// every occupied neighbor slot.
    #[must_use]
    pub fn size(&self) -> usize {
        match &self.kind {
            PatternKind::Monastery { neighbors, .. } => 1 + neighbors.len(),
            PatternKind::Connected => self.tiles().len(),
        }
    }

    /// Distinct tile positions, sorted.
    #[must_use]
    pub fn tiles(&self) -> SmallVec<[Position; 8]> {
        let mut tiles: SmallVec<[Position; 8]> = self.positions.iter().map(|(position, _)| *position).collect();
        tiles.sort_unstable();
        tiles.dedup();
        tiles
    }

    /// Followers per player, only players with at least one.
    #[must_use]
    pub fn follower_counts(&self) -> SmallVec<[(PlayerId, usize); 5]> {
        let mut counts: SmallVec<[(PlayerId, usize); 5]> = SmallVec::new();
        for follower in &self.followers {
            match counts.iter_mut().find(|(owner, _)| *owner == follower.owner) {
                Some((_, count)) => *count += 1,
                None => counts.push((follower.owner, 1)),
            }
        }
        counts.sort_unstable_by_key(|(owner, _)| *owner);
        counts
    }

    /// Players tied for the most followers. Empty without followers.
    #[must_use]
    pub fn majority_owners(&self) -> SmallVec<[PlayerId; 5]> {
        let counts = self.follower_counts();
        let Some(max) = counts.iter().map(|(_, count)| *count).max() else {
            return SmallVec::new();
        };
        counts
            .into_iter()
            .filter(|(_, count)| *count == max)
            .map(|(owner, _)| owner)
            .collect()
    }

    /// Whether the player has at least one follower here.
    #[must_use]
    pub fn is_occupied_by(&self, player: PlayerId) -> bool {
        self.followers.iter().any(|f| f.owner == player)
    }
}
