//! Notifications about committed state changes.
//!
//! Every accepted action yields an ordered list of `GameEvent`s. The game
//! returns that list to the caller and hands each event to the registered
//! observers, always after the transition is fully applied. Observers only
//! ever see `&GameEvent`, so they cannot reach back into the game while it
//! is being notified.
//!
//! ## Example
//!
//! ```
//! use tile_placer::core::PlayerId;
//! use tile_placer::events::{EventBus, GameEvent};
//! use std::sync::{Arc, Mutex};
//!
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let sink = Arc::clone(&seen);
//!
//! let mut bus = EventBus::new();
//! bus.subscribe(move |event: &GameEvent| sink.lock().unwrap().push(event.clone()));
//! bus.publish(&[GameEvent::ActivePlayerChanged { player: PlayerId::new(1) }]);
//!
//! assert_eq!(seen.lock().unwrap().len(), 1);
//! ```

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{PatternId, PlayerId, TileId};
use crate::grid::{Direction, Position};
use crate::rules::GameResult;
use crate::tiles::{Rotation, TerrainType, TileType};

/// Something that happened in the game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A tile moved from the stack into a hand.
    TileDrawn { player: PlayerId, tile: TileId },

    /// A tile was placed on the grid.
    TilePlaced {
        player: PlayerId,
        tile: TileId,
        tile_type: TileType,
        rotation: Rotation,
        position: Position,
    },

    /// A skipped tile left the hand. `discarded` if it left the round
    /// instead of going back to the stack.
    TileReturned {
        player: PlayerId,
        tile: TileId,
        discarded: bool,
    },

    /// A follower was placed.
    MeeplePlaced {
        player: PlayerId,
        position: Position,
        direction: Direction,
        pattern: PatternId,
    },

    /// A pattern scored for the listed players.
    PatternScored {
        pattern: PatternId,
        terrain: TerrainType,
        points: u32,
        players: SmallVec<[PlayerId; 5]>,
        final_scoring: bool,
    },

    /// The turn passed to another player.
    ActivePlayerChanged { player: PlayerId },

    /// The round ended, normally or by abort.
    RoundOver { result: GameResult, aborted: bool },
}

impl GameEvent {
    /// Short name used in logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::TileDrawn { .. } => "tile drawn",
            GameEvent::TilePlaced { .. } => "tile placed",
            GameEvent::TileReturned { .. } => "tile returned",
            GameEvent::MeeplePlaced { .. } => "meeple placed",
            GameEvent::PatternScored { .. } => "pattern scored",
            GameEvent::ActivePlayerChanged { .. } => "active player changed",
            GameEvent::RoundOver { .. } => "round over",
        }
    }
}

/// Receiver of game notifications.
pub trait GameObserver: Send {
    fn notify(&mut self, event: &GameEvent);
}

impl<F> GameObserver for F
where
    F: FnMut(&GameEvent) + Send,
{
    fn notify(&mut self, event: &GameEvent) {
        self(event);
    }
}

/// Registered observers, notified in subscription order.
#[derive(Default)]
pub struct EventBus {
    observers: Vec<Box<dyn GameObserver>>,
}

impl EventBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, observer: impl GameObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// Hand every event to every observer, event by event.
    pub fn publish(&mut self, events: &[GameEvent]) {
        for event in events {
            for observer in &mut self.observers {
                observer.notify(event);
            }
        }
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus").field("observers", &self.observers.len()).finish()
    }
}
