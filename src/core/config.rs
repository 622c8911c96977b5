//! Game settings.
//!
//! Settings are read when a round starts. Changing the grid size while a
//! round is running only raises the pending-resize flag; the new size is
//! applied by the next round.
//!
//! ```
//! use tile_placer::core::GameSettings;
//!
//! let settings = GameSettings::default()
//!     .with_players(3)
//!     .with_tiles_per_player(2)
//!     .with_computer_player(2);
//!
//! assert!(settings.validate().is_ok());
//! assert!(settings.is_computer_controlled(tile_placer::core::PlayerId::new(2)));
//! ```

use serde::{Deserialize, Serialize};

use crate::ai::MinkowskiDistance;
use crate::tiles::TerrainType;

use super::error::SettingsError;
use super::player::PlayerId;

/// Most players a round supports.
pub const MAXIMAL_PLAYERS: usize = 5;
/// Fewest players a round supports.
pub const MINIMAL_PLAYERS: usize = 2;
/// Largest hand a player may hold.
pub const MAXIMAL_TILES_ON_HAND: usize = 5;
/// Followers each player starts a round with.
pub const MAXIMAL_MEEPLES: u8 = 7;
/// Largest stack size multiplier.
pub const MAXIMAL_STACK_MULTIPLIER: u32 = 10;

const DEFAULT_NAMES: [&str; MAXIMAL_PLAYERS] = ["ONE", "TWO", "THREE", "FOUR", "FIVE"];

/// Which terrain types accept followers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeepleRules {
    pub city: bool,
    pub road: bool,
    pub monastery: bool,
    pub field: bool,
}

impl Default for MeepleRules {
    fn default() -> Self {
        Self {
            city: true,
            road: true,
            monastery: true,
            field: true,
        }
    }
}

impl MeepleRules {
    /// Whether followers may be placed on this terrain.
    #[must_use]
    pub fn allows(&self, terrain: TerrainType) -> bool {
        match terrain {
            TerrainType::City => self.city,
            TerrainType::Road => self.road,
            TerrainType::Monastery => self.monastery,
            TerrainType::Field => self.field,
            TerrainType::Other => false,
        }
    }

    /// Flip the rule for one terrain. `Other` has no rule.
    pub fn toggle(&mut self, terrain: TerrainType) {
        match terrain {
            TerrainType::City => self.city = !self.city,
            TerrainType::Road => self.road = !self.road,
            TerrainType::Monastery => self.monastery = !self.monastery,
            TerrainType::Field => self.field = !self.field,
            TerrainType::Other => {}
        }
    }
}

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSettings {
    grid_width: u32,
    grid_height: u32,

    /// Number of players in the next round (2-5).
    pub player_count: usize,

    /// Hand size cap (1-5).
    pub tiles_per_player: usize,

    /// Copies of the base distribution in the stack.
    pub stack_size_multiplier: u32,

    /// Allow placing a follower on a pattern the player already occupies.
    pub allow_fortifying: bool,

    /// Per-terrain follower toggles.
    pub meeple_rules: MeepleRules,

    /// Distance measure used by the rule-based AI.
    pub distance_measure: MinkowskiDistance,

    /// Computer-controlled flag per seat.
    pub computer_players: Vec<bool>,

    /// Display name per seat.
    pub player_names: Vec<String>,

    /// Seed for the stack shuffle.
    pub seed: u64,

    #[serde(skip)]
    grid_size_changed: bool,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            grid_width: 29,
            grid_height: 19,
            player_count: 2,
            tiles_per_player: 1,
            stack_size_multiplier: 1,
            allow_fortifying: false,
            meeple_rules: MeepleRules::default(),
            distance_measure: MinkowskiDistance::RoundedSquare,
            computer_players: vec![false; MAXIMAL_PLAYERS],
            player_names: DEFAULT_NAMES.iter().map(|n| n.to_string()).collect(),
            seed: 42,
            grid_size_changed: false,
        }
    }
}

impl GameSettings {
    /// Grid width in tiles.
    #[must_use]
    pub fn grid_width(&self) -> u32 {
        self.grid_width
    }

    /// Grid height in tiles.
    #[must_use]
    pub fn grid_height(&self) -> u32 {
        self.grid_height
    }

    /// Change the grid size. Takes effect when the next round starts.
    pub fn set_grid_size(&mut self, width: u32, height: u32) {
        if (width, height) != (self.grid_width, self.grid_height) {
            self.grid_width = width;
            self.grid_height = height;
            self.grid_size_changed = true;
        }
    }

    /// Whether the grid size changed since the last round started.
    #[must_use]
    pub fn is_grid_size_changed(&self) -> bool {
        self.grid_size_changed
    }

    /// Acknowledge a pending resize.
    pub fn clear_grid_size_changed(&mut self) {
        self.grid_size_changed = false;
    }

    /// Whether the given seat is computer controlled.
    #[must_use]
    pub fn is_computer_controlled(&self, player: PlayerId) -> bool {
        self.computer_players.get(player.index()).copied().unwrap_or(false)
    }

    /// Name of the given seat.
    #[must_use]
    pub fn player_name(&self, player: PlayerId) -> String {
        self.player_names
            .get(player.index())
            .cloned()
            .unwrap_or_else(|| player.to_string())
    }

    /// Set the grid size (builder pattern).
    #[must_use]
    pub fn with_grid(mut self, width: u32, height: u32) -> Self {
        self.set_grid_size(width, height);
        self
    }

    /// Set the player count (builder pattern).
    #[must_use]
    pub fn with_players(mut self, count: usize) -> Self {
        self.player_count = count;
        self
    }

    /// Set the hand size cap (builder pattern).
    #[must_use]
    pub fn with_tiles_per_player(mut self, tiles: usize) -> Self {
        self.tiles_per_player = tiles;
        self
    }

    /// Set the stack size multiplier (builder pattern).
    #[must_use]
    pub fn with_stack_multiplier(mut self, multiplier: u32) -> Self {
        self.stack_size_multiplier = multiplier;
        self
    }

    /// Allow or forbid fortifying (builder pattern).
    #[must_use]
    pub fn with_fortifying(mut self, allow: bool) -> Self {
        self.allow_fortifying = allow;
        self
    }

    /// Mark a seat as computer controlled (builder pattern).
    #[must_use]
    pub fn with_computer_player(mut self, seat: usize) -> Self {
        if seat >= self.computer_players.len() {
            self.computer_players.resize(seat + 1, false);
        }
        self.computer_players[seat] = true;
        self
    }

    /// Set the stack seed (builder pattern).
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the AI distance measure (builder pattern).
    #[must_use]
    pub fn with_distance_measure(mut self, measure: MinkowskiDistance) -> Self {
        self.distance_measure = measure;
        self
    }

    /// Check that the settings describe a playable round.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(MINIMAL_PLAYERS..=MAXIMAL_PLAYERS).contains(&self.player_count) {
            return Err(SettingsError::PlayerCount(self.player_count));
        }
        if !(1..=MAXIMAL_TILES_ON_HAND).contains(&self.tiles_per_player) {
            return Err(SettingsError::HandSize(self.tiles_per_player));
        }
        if self.grid_width == 0 || self.grid_height == 0 {
            return Err(SettingsError::GridSize {
                width: self.grid_width,
                height: self.grid_height,
            });
        }
        if !(1..=MAXIMAL_STACK_MULTIPLIER).contains(&self.stack_size_multiplier) {
            return Err(SettingsError::StackMultiplier(self.stack_size_multiplier));
        }
        Ok(())
    }
}
