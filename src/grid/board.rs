//! The bounded grid and the incremental pattern engine.
//!
//! Placing a tile creates a spot, then walks the tile's terrain groups: each
//! group either starts a new pattern or joins every touching pattern of the
//! same terrain, merging them into the one with the lowest id. Spots and
//! patterns live in persistent vectors, so cloning a grid for a search
//! snapshot costs O(1).

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, trace};

use super::pattern::{Follower, GridPattern, PatternKind};
use super::position::{Direction, Position};
use super::spot::GridSpot;
use crate::core::{MeepleError, MeepleRules, PatternId, PlacementError, PlayerId};
use crate::tiles::{FeatureGroup, Rotation, TerrainType, Tile};

/// Patterns affected by one placement.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PlacementOutcome {
    /// Live patterns that gained positions or neighbors.
    pub touched: SmallVec<[PatternId; 8]>,
    /// Patterns that became complete with this placement.
    pub completed: SmallVec<[PatternId; 4]>,
}

/// Fixed-size grid of tile slots plus the pattern arena.
///
/// ## Example
///
/// ```
/// use tile_placer::core::TileId;
/// use tile_placer::grid::{Direction, Grid, Position};
/// use tile_placer::tiles::{TerrainType, Tile, TileType};
///
/// let mut grid = Grid::new(5, 5);
/// grid.place(Tile::new(TileId::new(0), TileType::Road), Position::new(2, 2)).unwrap();
/// grid.place(Tile::new(TileId::new(1), TileType::Road), Position::new(2, 1)).unwrap();
///
/// let road = grid.pattern_at(Position::new(2, 1), Direction::Center).unwrap();
/// assert_eq!(road.terrain(), TerrainType::Road);
/// assert_eq!(road.size(), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub(super) width: u32,
    pub(super) height: u32,
    pub(super) spots: Vector<Option<GridSpot>>,
    pub(super) patterns: Vector<GridPattern>,
    pub(super) tile_count: usize,
}

impl Grid {
    /// Create an empty grid.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        let slots = width as usize * height as usize;
        Self {
            width,
            height,
            spots: std::iter::repeat(None).take(slots).collect(),
            patterns: Vector::new(),
            tile_count: 0,
        }
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The slot the foundation tile goes to.
    #[must_use]
    pub fn center(&self) -> Position {
        Position::new((self.width / 2) as i32, (self.height / 2) as i32)
    }

    #[must_use]
    pub fn in_bounds(&self, position: Position) -> bool {
        position.x >= 0 && position.y >= 0 && (position.x as u32) < self.width && (position.y as u32) < self.height
    }

    fn index(&self, position: Position) -> Option<usize> {
        self.in_bounds(position)
            .then(|| position.y as usize * self.width as usize + position.x as usize)
    }

    /// Number of placed tiles.
    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.tile_count
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tile_count == 0
    }

    #[must_use]
    pub fn is_occupied(&self, position: Position) -> bool {
        self.spot(position).is_some()
    }

    /// The placed tile at a position.
    #[must_use]
    pub fn spot(&self, position: Position) -> Option<&GridSpot> {
        self.index(position).and_then(|i| self.spots.get(i)).and_then(Option::as_ref)
    }

    /// The placed tile next to `position` in `direction`.
    #[must_use]
    pub fn neighbor(&self, position: Position, direction: Direction) -> Option<&GridSpot> {
        self.spot(position.neighbor(direction))
    }

    /// Placed tiles around `position` in the given directions.
    #[must_use]
    pub fn neighbors_of(&self, position: Position, directions: &[Direction]) -> Vec<&GridSpot> {
        directions.iter().filter_map(|d| self.neighbor(position, *d)).collect()
    }

    /// All placed tiles in row-major order.
    pub fn spots(&self) -> impl Iterator<Item = &GridSpot> {
        self.spots.iter().flatten()
    }

    /// Empty slots orthogonally next to a placed tile, row-major. On an
    /// empty grid every slot is free.
    #[must_use]
    pub fn free_spots(&self) -> Vec<Position> {
        let mut free = Vec::new();
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                let position = Position::new(x, y);
                if self.is_occupied(position) {
                    continue;
                }
                if self.is_empty() || !self.neighbors_of(position, &Direction::EDGES).is_empty() {
                    free.push(position);
                }
            }
        }
        free
    }

    /// Check a placement without touching the grid. Uses the tile's current
    /// rotation.
    pub fn check_placement(&self, tile: &Tile, position: Position) -> Result<(), PlacementError> {
        if !self.in_bounds(position) {
            return Err(PlacementError::OutOfBounds(position));
        }
        if self.is_occupied(position) {
            return Err(PlacementError::Occupied(position));
        }
        if self.is_empty() {
            return Ok(());
        }

        let mut adjacent = false;
        for direction in Direction::EDGES {
            if let Some(neighbor) = self.neighbor(position, direction) {
                adjacent = true;
                let facing = neighbor.tile().terrain(direction.opposite());
                if !tile.terrain(direction).matches(facing) {
                    return Err(PlacementError::EdgeMismatch { position, direction });
                }
            }
        }
        if adjacent {
            Ok(())
        } else {
            Err(PlacementError::NotAdjacent(position))
        }
    }

    /// Every rotation and position the tile fits, position-major.
    #[must_use]
    pub fn legal_placements(&self, tile: &Tile) -> Vec<(Rotation, Position)> {
        let mut turned = tile.clone();
        let mut legal = Vec::new();
        for position in self.free_spots() {
            for rotation in Rotation::ALL {
                turned.rotate_to(rotation);
                if self.check_placement(&turned, position).is_ok() {
                    legal.push((rotation, position));
                }
            }
        }
        legal
    }

    /// Whether the tile fits anywhere in any rotation.
    #[must_use]
    pub fn fits_anywhere(&self, tile: &Tile) -> bool {
        let mut turned = tile.clone();
        self.free_spots().into_iter().any(|position| {
            Rotation::ALL.iter().any(|&rotation| {
                turned.rotate_to(rotation);
                self.check_placement(&turned, position).is_ok()
            })
        })
    }

    /// Place a tile and update patterns. Nothing changes on rejection.
    pub fn place(&mut self, mut tile: Tile, position: Position) -> Result<PlacementOutcome, PlacementError> {
        self.check_placement(&tile, position)?;
        let index = self.index(position).ok_or(PlacementError::OutOfBounds(position))?;

        debug!(tile = %tile.id(), tile_type = %tile.tile_type(), %position, rotation = %tile.rotation(), "placing tile");
        tile.place_at(position);
        let groups = tile.groups();
        self.spots.set(index, Some(GridSpot::new(tile, position)));
        self.tile_count += 1;

        let mut touched: SmallVec<[PatternId; 8]> = SmallVec::new();
        for group in &groups {
            let id = if group.terrain == TerrainType::Monastery {
                self.create_monastery(position)
            } else {
                self.attach_group(position, group)
            };
            touched.push(id);
        }
        touched.extend(self.update_monasteries_around(position));

        let mut outcome = PlacementOutcome::default();
        for id in touched {
            let id = self.resolve(id);
            if outcome.touched.contains(&id) {
                continue;
            }
            outcome.touched.push(id);
            let was_complete = self.patterns[id.index()].complete;
            if !was_complete && self.completion_check(id) {
                debug!(pattern = %id, terrain = ?self.patterns[id.index()].terrain, "pattern completed");
                outcome.completed.push(id);
            }
        }
        Ok(outcome)
    }

    /// Follow absorption links to the live pattern.
    #[must_use]
    pub fn resolve(&self, mut id: PatternId) -> PatternId {
        while let Some(next) = self.patterns.get(id.index()).and_then(|p| p.absorbed_into) {
            id = next;
        }
        id
    }

    /// A pattern by id, absorbed or not.
    #[must_use]
    pub fn pattern(&self, id: PatternId) -> Option<&GridPattern> {
        self.patterns.get(id.index())
    }

    /// The live pattern covering a position on a placed tile.
    #[must_use]
    pub fn pattern_at(&self, position: Position, direction: Direction) -> Option<&GridPattern> {
        let tag = self.spot(position)?.tag(direction)?;
        self.pattern(self.resolve(tag))
    }

    /// Live patterns on the tile at a position.
    #[must_use]
    pub fn patterns_at(&self, position: Position) -> Vec<PatternId> {
        let Some(spot) = self.spot(position) else {
            return Vec::new();
        };
        let mut ids: Vec<PatternId> = Vec::new();
        for id in spot.patterns() {
            let id = self.resolve(id);
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        ids
    }

    /// All live patterns in id order.
    pub fn patterns(&self) -> impl Iterator<Item = &GridPattern> {
        self.patterns.iter().filter(|p| p.is_live())
    }

    /// Decide whether a pattern is complete and record it.
    ///
    /// Roads and cities are complete when no contained edge position faces an
    /// empty slot; monasteries when all eight neighbors hold tiles. Fields
    /// never complete. Once complete, a pattern stays complete.
    pub fn completion_check(&mut self, id: PatternId) -> bool {
        let id = self.resolve(id);
        let Some(pattern) = self.patterns.get(id.index()) else {
            return false;
        };
        if pattern.complete {
            return true;
        }

        let complete = match (&pattern.kind, pattern.terrain) {
            (PatternKind::Monastery { neighbors, .. }, _) => neighbors.len() == Direction::NEIGHBORS.len(),
            (_, TerrainType::Field | TerrainType::Other) => false,
            _ => pattern
                .positions
                .iter()
                .all(|&(position, direction)| !direction.is_edge() || self.is_occupied(position.neighbor(direction))),
        };
        if complete {
            self.patterns[id.index()].complete = true;
        }
        complete
    }

    /// Check whether a follower of `player` may go on the feature at
    /// `direction` of the tile at `position`.
    pub fn check_meeple(
        &self,
        position: Position,
        direction: Direction,
        player: PlayerId,
        allow_fortifying: bool,
    ) -> Result<PatternId, MeepleError> {
        let pattern = self
            .pattern_at(position, direction)
            .ok_or(MeepleError::NoFeature { position, direction })?;

        let owned_by_others = !pattern.followers.is_empty() && !(allow_fortifying && pattern.is_occupied_by(player));
        if owned_by_others || pattern.scored {
            return Err(MeepleError::Occupied { position, direction });
        }
        Ok(pattern.id)
    }

    /// Bind a follower to a pattern.
    pub fn place_meeple(
        &mut self,
        position: Position,
        direction: Direction,
        player: PlayerId,
        allow_fortifying: bool,
    ) -> Result<PatternId, MeepleError> {
        let id = self.check_meeple(position, direction, player, allow_fortifying)?;
        self.patterns[id.index()].followers.push(Follower {
            owner: player,
            position,
            direction,
        });
        debug!(%player, %position, ?direction, pattern = %id, "follower placed");
        Ok(id)
    }

    /// Positions on the tile at `position` where `player` may put a
    /// follower, one direction per pattern, in `Direction::ALL` order.
    #[must_use]
    pub fn meeple_options(
        &self,
        position: Position,
        player: PlayerId,
        rules: &MeepleRules,
        allow_fortifying: bool,
    ) -> Vec<(Direction, PatternId)> {
        let mut options: Vec<(Direction, PatternId)> = Vec::new();
        for direction in Direction::ALL {
            let Ok(id) = self.check_meeple(position, direction, player, allow_fortifying) else {
                continue;
            };
            if rules.allows(self.patterns[id.index()].terrain) && options.iter().all(|(_, seen)| *seen != id) {
                options.push((direction, id));
            }
        }
        options
    }

    fn next_id(&self) -> PatternId {
        PatternId::new(self.patterns.len() as u32)
    }

    fn tag(&mut self, position: Position, direction: Direction, id: PatternId) {
        if let Some(Some(spot)) = self.index(position).and_then(|i| self.spots.get_mut(i)) {
            spot.set_tag(direction, id);
        }
    }

    fn create_monastery(&mut self, center: Position) -> PatternId {
        let id = self.next_id();
        let neighbors = Direction::NEIGHBORS
            .iter()
            .map(|d| center.neighbor(*d))
            .filter(|p| self.is_occupied(*p))
            .collect();
        self.patterns.push_back(GridPattern::monastery(id, center, neighbors));
        self.tag(center, Direction::Center, id);
        trace!(pattern = %id, %center, "monastery pattern created");
        id
    }

    /// Record a new tile at `position` in every monastery around it.
    fn update_monasteries_around(&mut self, position: Position) -> SmallVec<[PatternId; 8]> {
        let mut updated = SmallVec::new();
        for direction in Direction::NEIGHBORS {
            let center = position.neighbor(direction);
            let Some(tag) = self.spot(center).and_then(|s| s.tag(Direction::Center)) else {
                continue;
            };
            let id = self.resolve(tag);
            if let PatternKind::Monastery { neighbors, .. } = &mut self.patterns[id.index()].kind {
                if !neighbors.contains(&position) {
                    neighbors.push(position);
                    updated.push(id);
                }
            }
        }
        updated
    }

    /// Live same-terrain patterns on neighboring tiles that a group links to.
    fn touching_patterns(&self, position: Position, group: &FeatureGroup) -> SmallVec<[PatternId; 4]> {
        let mut touching = SmallVec::new();
        for &direction in &group.directions {
            if direction.is_corner() && group.terrain != TerrainType::Field {
                continue;
            }
            for &(toward, facing) in direction.links() {
                let Some(tag) = self.neighbor(position, toward).and_then(|s| s.tag(facing)) else {
                    continue;
                };
                let id = self.resolve(tag);
                if self.patterns[id.index()].terrain == group.terrain && !touching.contains(&id) {
                    touching.push(id);
                }
            }
        }
        touching
    }

    fn attach_group(&mut self, position: Position, group: &FeatureGroup) -> PatternId {
        let touching = self.touching_patterns(position, group);
        let survivor = match touching.iter().min() {
            Some(&lowest) => lowest,
            None => {
                let id = self.next_id();
                self.patterns.push_back(GridPattern::connected(id, group.terrain));
                trace!(pattern = %id, terrain = ?group.terrain, %position, "pattern created");
                id
            }
        };

        for &direction in &group.directions {
            self.patterns[survivor.index()].positions.push((position, direction));
            self.tag(position, direction, survivor);
        }
        for &absorbed in touching.iter().filter(|&&id| id != survivor) {
            self.absorb(survivor, absorbed);
        }
        survivor
    }

    /// Move every position and follower of `absorbed` into `survivor`.
    fn absorb(&mut self, survivor: PatternId, absorbed: PatternId) {
        let (positions, followers) = {
            let pattern = &mut self.patterns[absorbed.index()];
            pattern.absorbed_into = Some(survivor);
            (std::mem::take(&mut pattern.positions), std::mem::take(&mut pattern.followers))
        };
        for &(position, direction) in &positions {
            self.tag(position, direction, survivor);
        }
        trace!(%survivor, %absorbed, moved = positions.len(), "patterns merged");

        let target = &mut self.patterns[survivor.index()];
        target.positions.extend(positions);
        target.followers.extend(followers);
    }
}
