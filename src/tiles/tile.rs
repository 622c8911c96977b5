//! Tile instances - one physical tile during a round.
//!
//! A tile combines its immutable template with a mutable rotation and the
//! position it was placed at. Rotation is stored in quarter turns clockwise;
//! looking up the terrain of a logical direction reads the template at that
//! direction turned back by the rotation.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::definition::TileType;
use super::terrain::{FeatureGroup, TerrainType};
use crate::core::TileId;
use crate::grid::{Direction, Position};

/// Clockwise quarter turns, always in `0..4`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Rotation(u8);

impl Rotation {
    /// The four distinct rotations.
    pub const ALL: [Rotation; 4] = [Rotation(0), Rotation(1), Rotation(2), Rotation(3)];

    /// Create a rotation, reducing modulo four.
    #[must_use]
    pub const fn new(quarter_turns: u8) -> Self {
        Self(quarter_turns % 4)
    }

    /// Clockwise quarter turns.
    #[must_use]
    pub const fn quarter_turns(self) -> u8 {
        self.0
    }

    /// One more quarter turn clockwise.
    #[must_use]
    pub const fn next(self) -> Self {
        Self::new(self.0 + 1)
    }
}

impl std::fmt::Display for Rotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}°", u32::from(self.0) * 90)
    }
}

/// A tile in a round.
///
/// ## Example
///
/// ```
/// use tile_placer::core::TileId;
/// use tile_placer::grid::Direction;
/// use tile_placer::tiles::{Rotation, TerrainType, Tile, TileType};
///
/// let mut tile = Tile::new(TileId::new(0), TileType::CityCap);
/// assert_eq!(tile.terrain(Direction::Top), TerrainType::City);
///
/// tile.rotate_to(Rotation::new(1));
/// assert_eq!(tile.terrain(Direction::Right), TerrainType::City);
/// assert_eq!(tile.terrain(Direction::Top), TerrainType::Field);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    id: TileId,
    tile_type: TileType,
    rotation: Rotation,
    position: Option<Position>,
}

impl Tile {
    /// Create an unplaced, unrotated tile.
    #[must_use]
    pub fn new(id: TileId, tile_type: TileType) -> Self {
        Self {
            id,
            tile_type,
            rotation: Rotation::default(),
            position: None,
        }
    }

    #[must_use]
    pub fn id(&self) -> TileId {
        self.id
    }

    #[must_use]
    pub fn tile_type(&self) -> TileType {
        self.tile_type
    }

    #[must_use]
    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Where the tile was placed, `None` while in a hand or the stack.
    #[must_use]
    pub fn position(&self) -> Option<Position> {
        self.position
    }

    /// Whether the tile's city carries a pennant.
    #[must_use]
    pub fn has_pennant(&self) -> bool {
        self.tile_type.definition().pennant
    }

    /// Turn the tile to an absolute rotation.
    pub fn rotate_to(&mut self, rotation: Rotation) {
        self.rotation = rotation;
    }

    /// Turn the tile one quarter clockwise.
    pub fn rotate_right(&mut self) {
        self.rotation = self.rotation.next();
    }

    /// Terrain at a logical (already rotated) direction.
    #[must_use]
    pub fn terrain(&self, direction: Direction) -> TerrainType {
        let base = direction.rotate_counter_clockwise(self.rotation.quarter_turns());
        self.tile_type.definition().terrain[base.index()]
    }

    /// Connected terrain groups in logical directions.
    #[must_use]
    pub fn groups(&self) -> SmallVec<[FeatureGroup; 8]> {
        let turns = self.rotation.quarter_turns();
        self.tile_type
            .definition()
            .groups()
            .iter()
            .map(|group| {
                let mut directions: SmallVec<[Direction; 9]> =
                    group.directions.iter().map(|d| d.rotate_clockwise(turns)).collect();
                directions.sort_by_key(|d| d.index());
                FeatureGroup {
                    terrain: group.terrain,
                    directions,
                }
            })
            .collect()
    }

    /// The group containing a logical direction, if it is a feature.
    #[must_use]
    pub fn group_at(&self, direction: Direction) -> Option<FeatureGroup> {
        self.groups().into_iter().find(|g| g.contains(direction))
    }

    /// Record the placement position. Happens exactly once per tile.
    pub(crate) fn place_at(&mut self, position: Position) {
        debug_assert!(self.position.is_none(), "{} placed twice", self.id);
        self.position = Some(position);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_wraps() {
        assert_eq!(Rotation::new(5), Rotation::new(1));
        assert_eq!(Rotation::new(3).next(), Rotation::new(0));
        assert_eq!(Rotation::new(2).to_string(), "180°");
    }

    #[test]
    fn test_terrain_follows_rotation() {
        let mut tile = Tile::new(TileId::new(1), TileType::CityCapRoad);
        assert_eq!(tile.terrain(Direction::Top), TerrainType::City);
        assert_eq!(tile.terrain(Direction::Left), TerrainType::Road);
        assert_eq!(tile.terrain(Direction::Bottom), TerrainType::Field);

        tile.rotate_right();
        assert_eq!(tile.terrain(Direction::Right), TerrainType::City);
        assert_eq!(tile.terrain(Direction::Top), TerrainType::Road);
        assert_eq!(tile.terrain(Direction::Left), TerrainType::Field);

        tile.rotate_to(Rotation::new(2));
        assert_eq!(tile.terrain(Direction::Bottom), TerrainType::City);
        assert_eq!(tile.terrain(Direction::TopLeft), TerrainType::Field);
    }

    #[test]
    fn test_groups_rotate_with_tile() {
        let mut tile = Tile::new(TileId::new(2), TileType::RoadCurve);
        let road = tile.group_at(Direction::Left).unwrap();
        assert_eq!(road.terrain, TerrainType::Road);
        assert!(road.contains(Direction::Bottom));

        tile.rotate_right();
        let road = tile.group_at(Direction::Top).unwrap();
        assert_eq!(road.terrain, TerrainType::Road);
        assert!(road.contains(Direction::Left));
        assert!(tile.group_at(Direction::Bottom).map_or(true, |g| g.terrain != TerrainType::Road));
    }

    #[test]
    fn test_position_is_set_on_placement() {
        let mut tile = Tile::new(TileId::new(3), TileType::Monastery);
        assert_eq!(tile.position(), None);
        tile.place_at(Position::new(4, 4));
        assert_eq!(tile.position(), Some(Position::new(4, 4)));
    }
}
