//! Tile types - static tile data.
//!
//! Each `TileType` is a stable key for one tile template: its terrain layout,
//! whether its city carries a pennant, and how many copies the base game
//! contains. The pattern engine only ever reads terrain and the pennant flag.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::terrain::{feature_groups, parse_layout, FeatureGroup, TileTerrain};

/// Stable key of a tile template.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TileType {
    MonasteryRoad,
    Monastery,
    CityFull,
    CityCapRoad,
    CityCap,
    CityTubePennant,
    CityTube,
    CityCapsOpposite,
    CityCapsAdjacent,
    CityCapCurveRight,
    CityCapCurveLeft,
    CityCapJunction,
    CityCornerPennant,
    CityCorner,
    CityCornerRoadPennant,
    CityCornerRoad,
    CityThreeSidesPennant,
    CityThreeSides,
    CityThreeSidesRoadPennant,
    CityThreeSidesRoad,
    Road,
    RoadCurve,
    RoadJunction,
    RoadCrossing,
}

/// Layout, pennant flag and base-game count per tile type, in `TileType` order.
const TEMPLATES: [(TileType, &str, bool, u32); 24] = [
    (TileType::MonasteryRoad, "FFF/FMF/FRF", false, 2),
    (TileType::Monastery, "FFF/FMF/FFF", false, 4),
    (TileType::CityFull, "CCC/CCC/CCC", true, 1),
    (TileType::CityCapRoad, "FCF/RRR/FFF", false, 3),
    (TileType::CityCap, "FCF/FFF/FFF", false, 5),
    (TileType::CityTubePennant, "FFF/CCC/FFF", true, 2),
    (TileType::CityTube, "FFF/CCC/FFF", false, 1),
    (TileType::CityCapsOpposite, "FFF/CFC/FFF", false, 3),
    (TileType::CityCapsAdjacent, "FCF/FFC/FFF", false, 2),
    (TileType::CityCapCurveRight, "FCF/FRR/FRF", false, 3),
    (TileType::CityCapCurveLeft, "FCF/RRF/FRF", false, 3),
    (TileType::CityCapJunction, "FCF/ROR/FRF", false, 3),
    (TileType::CityCornerPennant, "CCF/CFF/FFF", true, 2),
    (TileType::CityCorner, "CCF/CFF/FFF", false, 3),
    (TileType::CityCornerRoadPennant, "CCF/CRR/FRF", true, 2),
    (TileType::CityCornerRoad, "CCF/CRR/FRF", false, 3),
    (TileType::CityThreeSidesPennant, "CCC/CCC/FFF", true, 1),
    (TileType::CityThreeSides, "CCC/CCC/FFF", false, 3),
    (TileType::CityThreeSidesRoadPennant, "CCC/CCC/FRF", true, 2),
    (TileType::CityThreeSidesRoad, "CCC/CCC/FRF", false, 1),
    (TileType::Road, "FRF/FRF/FRF", false, 8),
    (TileType::RoadCurve, "FFF/RRF/FRF", false, 9),
    (TileType::RoadJunction, "FFF/ROR/FRF", false, 4),
    (TileType::RoadCrossing, "FRF/ROR/FRF", false, 1),
];

/// Parsed, immutable template of a tile type.
#[derive(Clone, Debug)]
pub struct TileDefinition {
    pub tile_type: TileType,
    pub terrain: TileTerrain,
    pub pennant: bool,
    /// Copies in the base game (one `CityCapRoad` more serves as foundation).
    pub amount: u32,
    groups: SmallVec<[FeatureGroup; 8]>,
}

impl TileDefinition {
    /// Connected terrain groups of the unrotated face.
    #[must_use]
    pub fn groups(&self) -> &[FeatureGroup] {
        &self.groups
    }
}

fn definitions() -> &'static [TileDefinition] {
    static DEFINITIONS: OnceLock<Vec<TileDefinition>> = OnceLock::new();
    DEFINITIONS.get_or_init(|| {
        TEMPLATES
            .iter()
            .map(|&(tile_type, layout, pennant, amount)| {
                let terrain = parse_layout(layout);
                TileDefinition {
                    tile_type,
                    terrain,
                    pennant,
                    amount,
                    groups: feature_groups(&terrain),
                }
            })
            .collect()
    })
}

impl TileType {
    /// Every tile type, in declaration order.
    pub const ALL: [TileType; 24] = [
        TileType::MonasteryRoad,
        TileType::Monastery,
        TileType::CityFull,
        TileType::CityCapRoad,
        TileType::CityCap,
        TileType::CityTubePennant,
        TileType::CityTube,
        TileType::CityCapsOpposite,
        TileType::CityCapsAdjacent,
        TileType::CityCapCurveRight,
        TileType::CityCapCurveLeft,
        TileType::CityCapJunction,
        TileType::CityCornerPennant,
        TileType::CityCorner,
        TileType::CityCornerRoadPennant,
        TileType::CityCornerRoad,
        TileType::CityThreeSidesPennant,
        TileType::CityThreeSides,
        TileType::CityThreeSidesRoadPennant,
        TileType::CityThreeSidesRoad,
        TileType::Road,
        TileType::RoadCurve,
        TileType::RoadJunction,
        TileType::RoadCrossing,
    ];

    /// Tile placed at the grid center when a round starts.
    pub const FOUNDATION: TileType = TileType::CityCapRoad;

    /// The parsed template of this type.
    #[must_use]
    pub fn definition(self) -> &'static TileDefinition {
        &definitions()[self as usize]
    }
}

impl std::fmt::Display for TileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}
