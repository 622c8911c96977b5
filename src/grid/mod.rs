//! The board: positions, placed tiles and the pattern engine.
//!
//! - `position`: grid coordinates and the nine tile-face directions
//! - `spot`: a placed tile with its pattern tags
//! - `pattern`: feature patterns and followers
//! - `board`: the bounded grid, placement and merging
//! - `scoring`: pattern values and the scoring step

pub mod board;
pub mod pattern;
pub mod position;
pub mod scoring;
pub mod spot;

pub use board::{Grid, PlacementOutcome};
pub use pattern::{Follower, GridPattern, PatternKind};
pub use position::{Direction, Position};
pub use scoring::{PatternScore, PENNANT_BONUS};
pub use spot::GridSpot;
