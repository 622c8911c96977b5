//! Stable handles for game objects.
//!
//! Tiles and patterns are stored in indexed collections and referenced by
//! small copyable handles instead of references. A pattern that is absorbed
//! by a merge keeps its handle; lookups follow it to the survivor.
//!
//! ```
//! use tile_placer::core::{PatternId, TileId};
//!
//! let tile = TileId::new(3);
//! let pattern = PatternId::new(12);
//! assert_eq!(tile.raw(), 3);
//! assert_eq!(pattern.index(), 12);
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier of one physical tile within a round.
///
/// Two tiles of the same type still have different ids, which lets the
/// engine track that each tile moves stack → hand → grid exactly once.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TileId(pub u32);

impl TileId {
    /// Create a new tile ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for TileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tile({})", self.0)
    }
}

/// Handle of a pattern in the grid's pattern arena.
///
/// Handles are allocated in creation order and never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PatternId(pub u32);

impl PatternId {
    /// Create a new pattern ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Index into the pattern arena.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for PatternId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Pattern({})", self.0)
    }
}
