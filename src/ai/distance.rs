//! Distance measures for breaking ties between equally good moves.

use serde::{Deserialize, Serialize};

use crate::grid::Position;

/// A Minkowski distance of fixed order.
///
/// The rule-based AI prefers, among equally valued moves, the one closest to
/// the grid center under this measure. Higher orders make the preferred
/// region more square.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MinkowskiDistance {
    /// Order 1.
    Manhattan,
    /// Order 2.
    Euclidean,
    /// Order 4.
    #[default]
    RoundedSquare,
    /// Chebyshev distance, the limit of infinite order.
    Square,
}

impl MinkowskiDistance {
    pub const ALL: [MinkowskiDistance; 4] = [
        MinkowskiDistance::Manhattan,
        MinkowskiDistance::Euclidean,
        MinkowskiDistance::RoundedSquare,
        MinkowskiDistance::Square,
    ];

    /// Distance between two grid positions.
    #[must_use]
    pub fn distance(self, a: Position, b: Position) -> f64 {
        let dx = f64::from((a.x - b.x).abs());
        let dy = f64::from((a.y - b.y).abs());
        match self {
            MinkowskiDistance::Manhattan => dx + dy,
            MinkowskiDistance::Euclidean => dx.hypot(dy),
            MinkowskiDistance::RoundedSquare => (dx.powi(4) + dy.powi(4)).powf(0.25),
            MinkowskiDistance::Square => dx.max(dy),
        }
    }
}

impl std::fmt::Display for MinkowskiDistance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            MinkowskiDistance::Manhattan => "Manhattan",
            MinkowskiDistance::Euclidean => "Euclidean",
            MinkowskiDistance::RoundedSquare => "Rounded square",
            MinkowskiDistance::Square => "Square",
        };
        f.write_str(name)
    }
}
