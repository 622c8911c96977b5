//! Pattern engine integration tests.
//!
//! These tests build small boards tile by tile and check how features
//! merge, complete and score.

use tile_placer::core::{PlacementError, PlayerId, TileId};
use tile_placer::grid::{Direction, Grid, Position};
use tile_placer::tiles::{Rotation, TerrainType, Tile, TileType};

fn tile(id: u32, tile_type: TileType, turns: u8) -> Tile {
    let mut tile = Tile::new(TileId::new(id), tile_type);
    tile.rotate_to(Rotation::new(turns));
    tile
}

fn at(x: i32, y: i32) -> Position {
    Position::new(x, y)
}

/// Two separate horizontal roads in row 2 with monasteries underneath to
/// keep the board connected. The gap at (2, 2) is still open.
fn two_roads() -> Grid {
    let mut grid = Grid::new(5, 5);
    grid.place(tile(1, TileType::Road, 1), at(1, 2)).unwrap();
    grid.place(tile(2, TileType::Monastery, 0), at(1, 3)).unwrap();
    grid.place(tile(3, TileType::Monastery, 0), at(2, 3)).unwrap();
    grid.place(tile(4, TileType::Monastery, 0), at(3, 3)).unwrap();
    grid.place(tile(5, TileType::Road, 1), at(3, 2)).unwrap();
    grid
}

// =============================================================================
// Merging
// =============================================================================

/// Test that a tile joining two roads leaves one road under the lowest id.
#[test]
fn test_three_road_merge() {
    let mut grid = two_roads();
    let west = grid.pattern_at(at(1, 2), Direction::Center).unwrap().id();
    let east = grid.pattern_at(at(3, 2), Direction::Center).unwrap().id();
    assert_ne!(west, east);
    assert!(west < east);

    grid.place_meeple(at(1, 2), Direction::Center, PlayerId::new(0), false)
        .unwrap();
    grid.place_meeple(at(3, 2), Direction::Left, PlayerId::new(1), false)
        .unwrap();

    let outcome = grid.place(tile(6, TileType::Road, 1), at(2, 2)).unwrap();
    assert!(outcome.touched.contains(&west));
    assert!(outcome.completed.is_empty());

    for x in 1..=3 {
        let road = grid.pattern_at(at(x, 2), Direction::Center).unwrap();
        assert_eq!(road.id(), west);
    }

    let road = grid.pattern(west).unwrap();
    assert_eq!(road.terrain(), TerrainType::Road);
    assert_eq!(road.size(), 3);
    assert_eq!(road.followers().len(), 2);
    assert!(!road.is_complete());
    assert_eq!(road.majority_owners().as_slice(), &[PlayerId::new(0), PlayerId::new(1)]);

    let absorbed = grid.pattern(east).unwrap();
    assert_eq!(absorbed.absorbed_into(), Some(west));
    assert!(!absorbed.is_live());
    assert_eq!(grid.resolve(east), west);
    assert_eq!(grid.patterns().filter(|p| p.id() == east).count(), 0);

    let joined = grid.patterns_at(at(2, 2));
    assert!(joined.contains(&west));
    assert!(!joined.contains(&east));
}

/// Test that the tile joining two roads merges the fields on both sides too.
#[test]
fn test_merge_carries_fields() {
    let mut grid = two_roads();
    let north_west = grid.pattern_at(at(1, 2), Direction::Top).unwrap().id();
    let north_east = grid.pattern_at(at(3, 2), Direction::Top).unwrap().id();
    assert_ne!(north_west, north_east);

    grid.place(tile(6, TileType::Road, 1), at(2, 2)).unwrap();
    assert_eq!(
        grid.pattern_at(at(3, 2), Direction::TopLeft).unwrap().id(),
        grid.pattern_at(at(1, 2), Direction::TopRight).unwrap().id()
    );
}

/// Test that a rejected tile leaves every pattern as it was.
#[test]
fn test_rejected_tile_changes_nothing() {
    let mut grid = two_roads();
    let before = grid.clone();

    let err = grid.place(tile(6, TileType::CityCap, 0), at(2, 2)).unwrap_err();
    assert!(matches!(err, PlacementError::EdgeMismatch { .. }));
    assert_eq!(grid, before);

    let err = grid.place(tile(6, TileType::Road, 1), at(5, 2)).unwrap_err();
    assert_eq!(err, PlacementError::OutOfBounds(at(5, 2)));
    assert_eq!(grid, before);
}

// =============================================================================
// Monastery
// =============================================================================

/// Test that a monastery completes with its eighth neighbor and is worth 9.
#[test]
fn test_monastery_scores_nine_on_eighth_neighbor() {
    let mut grid = Grid::new(3, 3);
    grid.place(tile(0, TileType::Monastery, 0), at(1, 1)).unwrap();
    let monastery = grid
        .place_meeple(at(1, 1), Direction::Center, PlayerId::new(0), false)
        .unwrap();

    let ring = [at(0, 1), at(0, 0), at(1, 0), at(2, 0), at(2, 1), at(2, 2), at(1, 2)];
    for (i, position) in ring.into_iter().enumerate() {
        let outcome = grid.place(tile(i as u32 + 1, TileType::Monastery, 0), position).unwrap();
        assert!(!outcome.completed.contains(&monastery));
        assert_eq!(grid.pattern(monastery).unwrap().size(), i + 2);
    }

    let outcome = grid.place(tile(8, TileType::Monastery, 0), at(0, 2)).unwrap();
    assert_eq!(outcome.completed.as_slice(), &[monastery]);
    assert_eq!(grid.pattern_value(monastery), 9);

    let score = grid.score_pattern(monastery).unwrap();
    assert_eq!(score.points, 9);
    assert_eq!(score.terrain, TerrainType::Monastery);
    assert_eq!(score.players.as_slice(), &[PlayerId::new(0)]);
    assert_eq!(score.returned.len(), 1);
    assert_eq!(grid.monastery_center(monastery), Some(at(1, 1)));
}

/// Test that a monastery laid into a fully surrounded hole completes with
/// its own placement.
#[test]
fn test_monastery_filling_last_hole_completes() {
    let mut grid = Grid::new(3, 3);
    let ring = [
        at(0, 0),
        at(1, 0),
        at(2, 0),
        at(2, 1),
        at(2, 2),
        at(1, 2),
        at(0, 2),
        at(0, 1),
    ];
    for (i, position) in ring.into_iter().enumerate() {
        grid.place(tile(i as u32, TileType::Monastery, 0), position).unwrap();
    }

    let outcome = grid.place(tile(8, TileType::Monastery, 0), at(1, 1)).unwrap();
    let center = grid.pattern_at(at(1, 1), Direction::Center).unwrap().id();
    assert!(grid.pattern(center).unwrap().is_complete());
    assert!(outcome.completed.contains(&center));
    assert_eq!(grid.pattern_value(center), 9);
}

/// Test that monasteries never merge with each other.
#[test]
fn test_monasteries_stay_separate() {
    let mut grid = Grid::new(3, 1);
    grid.place(tile(0, TileType::Monastery, 0), at(0, 0)).unwrap();
    grid.place(tile(1, TileType::Monastery, 0), at(1, 0)).unwrap();

    let left = grid.pattern_at(at(0, 0), Direction::Center).unwrap();
    let right = grid.pattern_at(at(1, 0), Direction::Center).unwrap();
    assert_ne!(left.id(), right.id());
    assert_eq!(left.size(), 2);
    assert_eq!(right.size(), 2);

    // The surrounding fields do merge.
    assert_eq!(
        grid.pattern_at(at(0, 0), Direction::Right).unwrap().id(),
        grid.pattern_at(at(1, 0), Direction::Left).unwrap().id()
    );
}

// =============================================================================
// Completion
// =============================================================================

/// Test that a city closed at both ends completes and stays complete.
#[test]
fn test_city_completion_is_permanent() {
    let mut grid = Grid::new(3, 4);
    grid.place(tile(0, TileType::CityCap, 2), at(1, 0)).unwrap();
    let city = grid.pattern_at(at(1, 0), Direction::Bottom).unwrap().id();

    let outcome = grid.place(tile(1, TileType::CityTube, 1), at(1, 1)).unwrap();
    assert!(outcome.completed.is_empty());
    assert!(!grid.pattern(city).unwrap().is_complete());

    let outcome = grid.place(tile(2, TileType::CityCap, 0), at(1, 2)).unwrap();
    assert_eq!(outcome.completed.as_slice(), &[city]);
    assert!(grid.completion_check(city));

    grid.place(tile(3, TileType::Road, 0), at(1, 3)).unwrap_err();
    grid.place(tile(3, TileType::Monastery, 0), at(1, 3)).unwrap();
    assert!(grid.pattern(city).unwrap().is_complete());
}

/// Test that fields never complete, however enclosed they are.
#[test]
fn test_fields_never_complete() {
    let mut grid = Grid::new(1, 1);
    grid.place(tile(0, TileType::Monastery, 0), at(0, 0)).unwrap();
    let field = grid.pattern_at(at(0, 0), Direction::Top).unwrap().id();
    assert!(!grid.completion_check(field));
}
