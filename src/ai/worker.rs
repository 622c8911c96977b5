//! Background move search.
//!
//! Searches run on the blocking thread pool of a small tokio runtime owned by
//! the game, and answer through a oneshot channel. The game holds the worker
//! until it needs the answer; dropping the worker cancels it, since the
//! search's send then goes nowhere and its result is never applied.

use std::sync::Arc;

use tokio::runtime::{Builder, Handle, Runtime};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::search::{Move, MoveSearch, SearchRequest};
use crate::core::{GameError, PlayerId, Result};

/// The runtime computer searches run on.
#[derive(Debug)]
pub struct SearchPool {
    handle: Handle,
    runtime: Option<Runtime>,
}

impl SearchPool {
    /// Start the runtime. Searches get their own blocking threads, so one
    /// async worker is enough.
    pub fn new() -> Result<Self> {
        let runtime = Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("move-search")
            .build()
            .map_err(|err| GameError::SearchPool(err.to_string()))?;
        Ok(Self {
            handle: runtime.handle().clone(),
            runtime: Some(runtime),
        })
    }

    /// Start searching `request` in the background.
    pub fn spawn(&self, search: Arc<dyn MoveSearch>, request: SearchRequest) -> SearchWorker {
        let (sender, receiver) = oneshot::channel();
        let player = request.player;
        let handle = self.handle.spawn_blocking(move || {
            let result = search.best_move(&request);
            if sender.send(result).is_err() {
                debug!(%player, "search result dropped, request was cancelled");
            }
        });
        debug!(%player, "move search started");
        SearchWorker {
            player,
            receiver,
            handle,
        }
    }
}

impl Drop for SearchPool {
    fn drop(&mut self) {
        // A search still running must not hold up the game's drop.
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_background();
        }
    }
}

/// A search in flight.
#[derive(Debug)]
pub struct SearchWorker {
    player: PlayerId,
    receiver: oneshot::Receiver<Option<Move>>,
    handle: JoinHandle<()>,
}

impl SearchWorker {
    #[must_use]
    pub fn player(&self) -> PlayerId {
        self.player
    }

    /// Whether the search task is done.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Block until the search answers. Must not be called from async code.
    pub fn wait(self) -> Result<Option<Move>> {
        match self.receiver.blocking_recv() {
            Ok(result) => Ok(result),
            Err(_) => {
                warn!(player = %self.player, "move search ended without a result");
                Err(GameError::SearchFailed(self.player))
            }
        }
    }
}
