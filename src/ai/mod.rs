//! Computer players.
//!
//! ## Overview
//!
//! - `MoveSearch`: the strategy interface the state machine consumes
//! - `RuleBasedAi`: the built-in greedy strategy
//! - `SearchPool`: tokio blocking pool the searches run on
//! - `SearchWorker`: one search in flight until the game awaits it
//! - `MinkowskiDistance`: tie-break measure, configured in the settings
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use tile_placer::ai::{MoveSearch, RuleBasedAi};
//! use tile_placer::core::GameSettings;
//! use tile_placer::rules::Game;
//!
//! let settings = GameSettings::default().with_computer_player(0).with_computer_player(1);
//! let search: Arc<dyn MoveSearch> = Arc::new(RuleBasedAi::new());
//! let mut game = Game::with_search(settings, search).unwrap();
//!
//! game.play_computer_turns().unwrap();
//! assert!(game.is_over());
//! ```

pub mod distance;
pub mod rule_based;
pub mod search;
pub mod worker;

pub use distance::MinkowskiDistance;
pub use rule_based::{RatedMove, RuleBasedAi, FOLLOWER_COST};
pub use search::{Move, MoveSearch, SearchRequest};
pub use worker::{SearchPool, SearchWorker};
