//! Pattern values and the scoring step.
//!
//! A completed pattern is worth its tile count times the terrain multiplier,
//! plus two points per pennant for cities. At the end of a round unfinished
//! patterns still score: one point per tile (and per pennant), monasteries one
//! point per occupied slot, fields three points per distinct completed city
//! they border.
//!
//! Scoring is idempotent: a pattern scores at most once and hands every
//! follower on it back.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::debug;

use super::board::Grid;
use super::pattern::{Follower, PatternKind};
use super::position::Position;
use crate::core::{PatternId, PlayerId};
use crate::tiles::TerrainType;

/// Extra points per pennant in a completed city.
pub const PENNANT_BONUS: u32 = 2;

/// Result of scoring one pattern.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternScore {
    pub pattern: PatternId,
    pub terrain: TerrainType,
    /// Points awarded to each scoring player (not split).
    pub points: u32,
    /// Players tied for the most followers; empty if nobody had one.
    pub players: SmallVec<[PlayerId; 5]>,
    /// Followers removed from the pattern, to go back to their owners.
    pub returned: SmallVec<[Follower; 4]>,
}

impl Grid {
    /// Tiles in the pattern carrying a pennant.
    #[must_use]
    pub fn pennant_count(&self, id: PatternId) -> usize {
        let Some(pattern) = self.pattern(self.resolve(id)) else {
            return 0;
        };
        pattern
            .tiles()
            .iter()
            .filter(|p| self.spot(**p).is_some_and(|spot| spot.tile().has_pennant()))
            .count()
    }

    /// Distinct completed cities bordering a field on the same tile face.
    #[must_use]
    pub fn adjacent_completed_cities(&self, id: PatternId) -> SmallVec<[PatternId; 8]> {
        let mut cities = SmallVec::new();
        let Some(field) = self.pattern(self.resolve(id)) else {
            return cities;
        };
        for &(position, direction) in field.positions() {
            for &next in direction.face_neighbors() {
                let Some(city) = self.pattern_at(position, next) else {
                    continue;
                };
                if city.terrain() == TerrainType::City && city.is_complete() && !cities.contains(&city.id()) {
                    cities.push(city.id());
                }
            }
        }
        cities
    }

    /// What the pattern is worth if it were scored now.
    #[must_use]
    pub fn pattern_value(&self, id: PatternId) -> u32 {
        let id = self.resolve(id);
        let Some(pattern) = self.pattern(id) else {
            return 0;
        };
        let size = pattern.size() as u32;
        match pattern.terrain() {
            TerrainType::City => {
                let pennants = self.pennant_count(id) as u32;
                if pattern.is_complete() {
                    size * pattern.multiplier() + pennants * PENNANT_BONUS
                } else {
                    size + pennants
                }
            }
            TerrainType::Road | TerrainType::Monastery => size * pattern.multiplier(),
            TerrainType::Field => self.adjacent_completed_cities(id).len() as u32 * pattern.multiplier(),
            TerrainType::Other => 0,
        }
    }

    /// Score a pattern once. Returns `None` if it already scored.
    ///
    /// Every player tied for the most followers receives the full value. All
    /// followers leave the pattern.
    pub fn score_pattern(&mut self, id: PatternId) -> Option<PatternScore> {
        let id = self.resolve(id);
        if self.pattern(id)?.is_scored() {
            return None;
        }
        let points = self.pattern_value(id);

        let pattern = self.patterns.get_mut(id.index())?;
        let players = pattern.majority_owners();
        let returned = std::mem::take(&mut pattern.followers);
        pattern.scored = true;

        debug!(pattern = %id, terrain = ?pattern.terrain, points, ?players, "pattern scored");
        Some(PatternScore {
            pattern: id,
            terrain: pattern.terrain,
            points,
            players,
            returned,
        })
    }

    /// Score every live pattern that still holds followers, in id order.
    pub fn final_scoring(&mut self) -> Vec<PatternScore> {
        let pending: Vec<PatternId> = self
            .patterns()
            .filter(|p| !p.is_scored() && !p.followers().is_empty())
            .map(|p| p.id())
            .collect();
        pending.into_iter().filter_map(|id| self.score_pattern(id)).collect()
    }

    /// Monastery center of a pattern, if it is one.
    #[must_use]
    pub fn monastery_center(&self, id: PatternId) -> Option<Position> {
        match self.pattern(self.resolve(id))?.kind() {
            PatternKind::Monastery { center, .. } => Some(*center),
            PatternKind::Connected => None,
        }
    }
}
