//! Core engine types: ids, players, RNG, settings, actions, errors.
//!
//! Everything else in the crate builds on these.

pub mod action;
pub mod config;
pub mod entity;
pub mod error;
pub mod player;
pub mod rng;

pub use action::Action;
pub use config::{
    GameSettings, MeepleRules, MAXIMAL_MEEPLES, MAXIMAL_PLAYERS, MAXIMAL_STACK_MULTIPLIER, MAXIMAL_TILES_ON_HAND,
    MINIMAL_PLAYERS,
};
pub use entity::{PatternId, TileId};
pub use error::{GameError, MeepleError, PlacementError, Result, SettingsError};
pub use player::{PlayerId, PlayerMap};
pub use rng::GameRng;
