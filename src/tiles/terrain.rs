//! Terrain kinds and the per-position terrain of a tile face.
//!
//! A tile face is a 3×3 grid of positions:
//!
//! ```text
//! TopLeft    Top    TopRight
//! Left       Center Right
//! BottomLeft Bottom BottomRight
//! ```
//!
//! Layouts are written row by row with one symbol per position and `/`
//! between rows, e.g. `"FCF/RRR/FFF"` is a city cap on top with a straight
//! road crossing the middle. Symbols: `C` city, `R` road, `M` monastery,
//! `F` field, `O` other (road junction centers and similar).

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::grid::Direction;

/// Kind of terrain feature.
///
/// Declaration order is the order scores are listed in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TerrainType {
    City,
    Road,
    Monastery,
    Field,
    /// No feature; never scores and never takes followers.
    Other,
}

impl TerrainType {
    /// Terrain types that form patterns, take followers and have a score.
    pub const BASIC: [TerrainType; 4] = [
        TerrainType::City,
        TerrainType::Road,
        TerrainType::Monastery,
        TerrainType::Field,
    ];

    /// Whether this is one of the basic terrain types.
    #[must_use]
    pub const fn is_basic(self) -> bool {
        !matches!(self, TerrainType::Other)
    }

    /// Points per tile of a completed pattern. For fields: points per
    /// adjacent completed city.
    #[must_use]
    pub const fn multiplier(self) -> u32 {
        match self {
            TerrainType::City => 2,
            TerrainType::Road | TerrainType::Monastery => 1,
            TerrainType::Field => 3,
            TerrainType::Other => 0,
        }
    }

    /// Index into `BASIC`, if basic.
    #[must_use]
    pub const fn basic_index(self) -> Option<usize> {
        match self {
            TerrainType::City => Some(0),
            TerrainType::Road => Some(1),
            TerrainType::Monastery => Some(2),
            TerrainType::Field => Some(3),
            TerrainType::Other => None,
        }
    }

    /// Parse a layout symbol.
    #[must_use]
    pub const fn from_symbol(symbol: u8) -> Option<Self> {
        match symbol {
            b'C' => Some(TerrainType::City),
            b'R' => Some(TerrainType::Road),
            b'M' => Some(TerrainType::Monastery),
            b'F' => Some(TerrainType::Field),
            b'O' => Some(TerrainType::Other),
            _ => None,
        }
    }

    /// Whether two facing edges may touch. `Other` matches anything.
    #[must_use]
    pub fn matches(self, facing: TerrainType) -> bool {
        self == facing || self == TerrainType::Other || facing == TerrainType::Other
    }
}

/// A connected set of same-terrain positions on one tile face.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeatureGroup {
    pub terrain: TerrainType,
    pub directions: SmallVec<[Direction; 9]>,
}

impl FeatureGroup {
    /// Whether the group covers the given position.
    #[must_use]
    pub fn contains(&self, direction: Direction) -> bool {
        self.directions.contains(&direction)
    }
}

/// Terrain for each of the nine face positions, indexed by `Direction::index`.
pub type TileTerrain = [TerrainType; 9];

/// Parse a `"XXX/XXX/XXX"` layout.
///
/// Layouts are static data, so a malformed one is a programming error.
#[must_use]
pub fn parse_layout(layout: &str) -> TileTerrain {
    let mut terrain = [TerrainType::Other; 9];
    let rows: Vec<&str> = layout.split('/').collect();
    assert_eq!(rows.len(), 3, "layout {layout:?} must have three rows");

    for (row, symbols) in rows.iter().enumerate() {
        assert_eq!(symbols.len(), 3, "layout {layout:?} rows must have three symbols");
        for (col, symbol) in symbols.bytes().enumerate() {
            let kind = TerrainType::from_symbol(symbol)
                .unwrap_or_else(|| panic!("invalid terrain symbol {:?} in {layout:?}", symbol as char));
            terrain[Direction::from_cell(row, col).index()] = kind;
        }
    }
    terrain
}

/// Split a tile face into connected same-terrain groups.
///
/// Positions connect when they are orthogonal neighbors on the face and carry
/// the same terrain. `Other` positions belong to no group. Groups come out in
/// `Direction::ALL` order of their first position.
#[must_use]
pub fn feature_groups(terrain: &TileTerrain) -> SmallVec<[FeatureGroup; 8]> {
    let mut groups: SmallVec<[FeatureGroup; 8]> = SmallVec::new();
    let mut visited = [false; 9];

    for start in Direction::ALL {
        let kind = terrain[start.index()];
        if visited[start.index()] || !kind.is_basic() {
            continue;
        }

        let mut directions: SmallVec<[Direction; 9]> = SmallVec::new();
        let mut frontier: SmallVec<[Direction; 9]> = SmallVec::new();
        visited[start.index()] = true;
        frontier.push(start);

        while let Some(current) = frontier.pop() {
            directions.push(current);
            for next in current.face_neighbors() {
                if !visited[next.index()] && terrain[next.index()] == kind {
                    visited[next.index()] = true;
                    frontier.push(*next);
                }
            }
        }

        directions.sort_by_key(|d| d.index());
        groups.push(FeatureGroup { terrain: kind, directions });
    }

    groups
}
