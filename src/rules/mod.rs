//! Turn sequencing.
//!
//! `Game` drives a round through its phases, enforces which actions each
//! phase accepts and reports what happened as `GameEvent`s.

pub mod engine;
pub mod phase;
pub mod result;
pub mod state;

pub use engine::{Game, FOUNDATION_TILE_ID};
pub use phase::Phase;
pub use result::GameResult;
pub use state::GameState;
