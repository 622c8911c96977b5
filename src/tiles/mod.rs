//! Tile model: terrain, tile types, tile instances and distributions.
//!
//! ## Key Types
//!
//! - `TerrainType`: kind of feature at a face position
//! - `TileType`: stable key of a tile template (layout + pennant flag)
//! - `Tile`: one physical tile with rotation and placement position
//! - `TileDistribution`: copies per tile type for building a stack

pub mod definition;
pub mod distribution;
pub mod terrain;
pub mod tile;

pub use definition::{TileDefinition, TileType};
pub use distribution::TileDistribution;
pub use terrain::{FeatureGroup, TerrainType, TileTerrain};
pub use tile::{Rotation, Tile};
