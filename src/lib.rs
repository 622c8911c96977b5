//! # tile-placer
//!
//! Rules engine for a Carcassonne-style tile placement game.
//!
//! ## Design Principles
//!
//! 1. **Validate, then mutate**: every action is checked in full before the
//!    state changes, so a refused action leaves no trace.
//!
//! 2. **N-Player First**: every seat is addressed by `PlayerId` and every
//!    per-player table is a `PlayerMap`. Two to five players.
//!
//! 3. **Configuration Over Convention**: grid size, hand size, follower
//!    rules and computer seats come from `GameSettings`.
//!
//! ## Architecture
//!
//! - **Pattern arena**: connected features live in one arena addressed by
//!   `PatternId`. Merging keeps the lowest id and points the others at it.
//!
//! - **Persistent Data Structures**: grid and stack use `im-rs`, so a move
//!   search works on its own snapshot at O(1) cost.
//!
//! - **Explicit suspension**: computer turns are searched on a worker
//!   thread and collected with `Game::await_move`.
//!
//! ## Modules
//!
//! - `core`: ids, players, RNG, settings, actions, errors
//! - `tiles`: terrain, tile types, tiles, distributions
//! - `grid`: the board and the pattern engine
//! - `stack`: the draw pile
//! - `round`: players, hands, scores and turn order
//! - `events`: notifications about committed changes
//! - `rules`: the turn state machine
//! - `ai`: move search for computer players

pub mod ai;
pub mod core;
pub mod events;
pub mod grid;
pub mod round;
pub mod rules;
pub mod stack;
pub mod tiles;

// Re-export commonly used types
pub use crate::core::{
    Action, GameError, GameRng, GameSettings, MeepleError, MeepleRules, PatternId, PlacementError, PlayerId,
    PlayerMap, Result, SettingsError, TileId,
};

pub use crate::tiles::{Rotation, TerrainType, Tile, TileDistribution, TileType};

pub use crate::grid::{Direction, Follower, Grid, GridPattern, PatternKind, PatternScore, Position};

pub use crate::stack::TileStack;

pub use crate::round::{Player, PlayerScore, Round};

pub use crate::events::{EventBus, GameEvent, GameObserver};

pub use crate::rules::{Game, GameResult, GameState, Phase};

pub use crate::ai::{MinkowskiDistance, Move, MoveSearch, RuleBasedAi, SearchRequest};
