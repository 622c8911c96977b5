//! Grid coordinates and tile-face directions.

use serde::{Deserialize, Serialize};

/// Grid coordinate. `x` grows to the right, `y` grows downwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The coordinate one step in the given direction.
    #[must_use]
    pub const fn neighbor(self, direction: Direction) -> Self {
        let (dx, dy) = direction.offset();
        Self::new(self.x + dx, self.y + dy)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One of the nine positions on a tile face.
///
/// Directions double as neighbor offsets on the grid: `Top` is the slot
/// above, `TopRight` the diagonal slot, `Center` the slot itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Direction {
    Top,
    Right,
    Bottom,
    Left,
    TopRight,
    BottomRight,
    BottomLeft,
    TopLeft,
    Center,
}

impl Direction {
    /// All nine positions, edges first, center last.
    pub const ALL: [Direction; 9] = [
        Direction::Top,
        Direction::Right,
        Direction::Bottom,
        Direction::Left,
        Direction::TopRight,
        Direction::BottomRight,
        Direction::BottomLeft,
        Direction::TopLeft,
        Direction::Center,
    ];

    /// Edge positions in clockwise order.
    pub const EDGES: [Direction; 4] = [Direction::Top, Direction::Right, Direction::Bottom, Direction::Left];

    /// Corner positions in clockwise order.
    pub const CORNERS: [Direction; 4] = [
        Direction::TopRight,
        Direction::BottomRight,
        Direction::BottomLeft,
        Direction::TopLeft,
    ];

    /// The eight surrounding grid slots.
    pub const NEIGHBORS: [Direction; 8] = [
        Direction::Top,
        Direction::Right,
        Direction::Bottom,
        Direction::Left,
        Direction::TopRight,
        Direction::BottomRight,
        Direction::BottomLeft,
        Direction::TopLeft,
    ];

    /// Index into per-direction arrays.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub const fn is_edge(self) -> bool {
        matches!(self, Direction::Top | Direction::Right | Direction::Bottom | Direction::Left)
    }

    #[must_use]
    pub const fn is_corner(self) -> bool {
        matches!(
            self,
            Direction::TopRight | Direction::BottomRight | Direction::BottomLeft | Direction::TopLeft
        )
    }

    /// Grid offset of the neighbor slot in this direction.
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Direction::Top => (0, -1),
            Direction::Right => (1, 0),
            Direction::Bottom => (0, 1),
            Direction::Left => (-1, 0),
            Direction::TopRight => (1, -1),
            Direction::BottomRight => (1, 1),
            Direction::BottomLeft => (-1, 1),
            Direction::TopLeft => (-1, -1),
            Direction::Center => (0, 0),
        }
    }

    /// Turn clockwise by the given number of quarter turns.
    #[must_use]
    pub const fn rotate_clockwise(self, quarter_turns: u8) -> Self {
        let turns = (quarter_turns % 4) as usize;
        match self {
            Direction::Center => Direction::Center,
            edge if edge.is_edge() => Self::EDGES[(edge.index() + turns) % 4],
            corner => Self::CORNERS[(corner.index() - 4 + turns) % 4],
        }
    }

    /// Turn counter-clockwise by the given number of quarter turns.
    #[must_use]
    pub const fn rotate_counter_clockwise(self, quarter_turns: u8) -> Self {
        self.rotate_clockwise(4 - quarter_turns % 4)
    }

    /// The position mirrored through the center.
    #[must_use]
    pub const fn opposite(self) -> Self {
        self.rotate_clockwise(2)
    }

    /// The direction at a row/column of the 3×3 face.
    #[must_use]
    pub const fn from_cell(row: usize, col: usize) -> Self {
        match (row, col) {
            (0, 0) => Direction::TopLeft,
            (0, 1) => Direction::Top,
            (0, 2) => Direction::TopRight,
            (1, 0) => Direction::Left,
            (1, 2) => Direction::Right,
            (2, 0) => Direction::BottomLeft,
            (2, 1) => Direction::Bottom,
            (2, 2) => Direction::BottomRight,
            _ => Direction::Center,
        }
    }

    /// Orthogonally adjacent positions on the same face.
    #[must_use]
    pub const fn face_neighbors(self) -> &'static [Direction] {
        use Direction::*;
        match self {
            Top => &[TopLeft, TopRight, Center],
            Right => &[TopRight, BottomRight, Center],
            Bottom => &[BottomLeft, BottomRight, Center],
            Left => &[TopLeft, BottomLeft, Center],
            TopRight => &[Top, Right],
            BottomRight => &[Right, Bottom],
            BottomLeft => &[Bottom, Left],
            TopLeft => &[Top, Left],
            Center => &[Top, Right, Bottom, Left],
        }
    }

    /// Positions on neighboring tiles that touch this position, as
    /// `(direction of the neighbor slot, position on the neighbor)`.
    ///
    /// Edges touch the opposite edge of one neighbor; corners touch the
    /// mirrored corners of their two orthogonal neighbors.
    #[must_use]
    pub const fn links(self) -> &'static [(Direction, Direction)] {
        use Direction::*;
        match self {
            Top => &[(Top, Bottom)],
            Right => &[(Right, Left)],
            Bottom => &[(Bottom, Top)],
            Left => &[(Left, Right)],
            TopRight => &[(Top, BottomRight), (Right, TopLeft)],
            BottomRight => &[(Right, BottomLeft), (Bottom, TopRight)],
            BottomLeft => &[(Bottom, TopLeft), (Left, BottomRight)],
            TopLeft => &[(Top, BottomLeft), (Left, TopRight)],
            Center => &[],
        }
    }
}
