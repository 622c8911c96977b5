//! The turn state machine.
//!
//! `Game` owns the state of the running round and is the only thing that
//! changes it. Every entry point validates before it mutates, so a refused
//! action leaves the state exactly as it was. Accepted actions return the
//! events they caused and hand the same events to the observers.
//!
//! Computer turns are searched on a background thread as soon as the turn
//! starts. The game keeps running (a human may abort) until `await_move`
//! collects the answer and plays it through the same paths a human action
//! takes.

use std::sync::Arc;

use tracing::{debug, error, info, instrument, warn};

use super::phase::Phase;
use super::result::GameResult;
use super::state::GameState;
use crate::ai::{Move, MoveSearch, RuleBasedAi, SearchPool, SearchRequest, SearchWorker};
use crate::core::{Action, GameError, GameRng, GameSettings, MeepleError, PatternId, PlayerId, Result, TileId};
use crate::events::{EventBus, GameEvent, GameObserver};
use crate::grid::{Direction, Grid, PatternScore, Position};
use crate::round::Round;
use crate::stack::TileStack;
use crate::tiles::{Rotation, Tile, TileDistribution, TileType};

/// Id of the foundation tile placed at the grid center.
pub const FOUNDATION_TILE_ID: TileId = TileId::new(0);

/// A game: the settings, the running round and its computer players.
///
/// ## Example
///
/// ```
/// use tile_placer::core::{Action, GameSettings};
/// use tile_placer::rules::{Game, Phase};
///
/// let mut game = Game::new(GameSettings::default().with_grid(9, 9)).unwrap();
/// assert_eq!(game.grid().tile_count(), 1);
///
/// let (rotation, position) = game.legal_placements(0)[0];
/// game.apply(Action::PlaceTile { tile: 0, rotation, position }).unwrap();
/// assert!(matches!(game.phase(), Phase::Manning { .. }));
///
/// game.apply(Action::Skip).unwrap();
/// assert_eq!(game.grid().tile_count(), 2);
/// ```
pub struct Game {
    settings: GameSettings,
    round_settings: GameSettings,
    distribution: TileDistribution,
    rng: GameRng,
    state: GameState,
    search: Arc<dyn MoveSearch>,
    pool: SearchPool,
    worker: Option<SearchWorker>,
    observers: EventBus,
}

impl Game {
    /// Start a game with the built-in computer strategy.
    pub fn new(settings: GameSettings) -> Result<Self> {
        Self::with_search(settings, Arc::new(RuleBasedAi::new()))
    }

    /// Start a game whose computer players use `search`.
    pub fn with_search(settings: GameSettings, search: Arc<dyn MoveSearch>) -> Result<Self> {
        Self::with_distribution(settings, TileDistribution::default(), search)
    }

    /// Start a game with a custom tile distribution.
    pub fn with_distribution(
        settings: GameSettings,
        distribution: TileDistribution,
        search: Arc<dyn MoveSearch>,
    ) -> Result<Self> {
        settings.validate()?;
        let mut rng = GameRng::new(settings.seed);
        let stack = TileStack::new(&distribution, settings.stack_size_multiplier, &mut rng.fork());
        Self::start(settings, distribution, rng, stack, search)
    }

    /// Start a game drawing from a prepared stack, top tile first. Later
    /// rounds use the default distribution.
    pub fn with_stack(settings: GameSettings, stack: TileStack, search: Arc<dyn MoveSearch>) -> Result<Self> {
        settings.validate()?;
        let rng = GameRng::new(settings.seed);
        Self::start(settings, TileDistribution::default(), rng, stack, search)
    }

    fn start(
        settings: GameSettings,
        distribution: TileDistribution,
        rng: GameRng,
        stack: TileStack,
        search: Arc<dyn MoveSearch>,
    ) -> Result<Self> {
        let state = GameState {
            grid: Grid::new(settings.grid_width(), settings.grid_height()),
            round: Round::new(&settings),
            stack: TileStack::default(),
            phase: Phase::GameOver,
            pending_scoring: Default::default(),
            result: None,
        };
        let mut game = Self {
            round_settings: settings.clone(),
            settings,
            distribution,
            rng,
            state,
            search,
            pool: SearchPool::new()?,
            worker: None,
            observers: EventBus::new(),
        };
        game.start_round(stack)?;
        Ok(game)
    }

    // === Queries ===

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.state.grid
    }

    #[must_use]
    pub fn round(&self) -> &Round {
        &self.state.round
    }

    #[must_use]
    pub fn stack(&self) -> &TileStack {
        &self.state.stack
    }

    /// Settings for the next round.
    #[must_use]
    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    /// Edit the settings. Changes apply when the next round starts.
    pub fn settings_mut(&mut self) -> &mut GameSettings {
        &mut self.settings
    }

    /// Settings the running round was started with.
    #[must_use]
    pub fn round_settings(&self) -> &GameSettings {
        &self.round_settings
    }

    #[must_use]
    pub fn active_player(&self) -> PlayerId {
        self.state.round.active()
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.state.phase.is_game_over()
    }

    #[must_use]
    pub fn result(&self) -> Option<&GameResult> {
        self.state.result.as_ref()
    }

    /// Hand tile a skip would give up, while placing.
    #[must_use]
    pub fn selected_tile(&self) -> Option<&Tile> {
        match self.state.phase {
            Phase::Placing { selected } => self.state.round.active_player().hand().get(selected),
            _ => None,
        }
    }

    /// Where the active player's hand tile at `index` fits.
    #[must_use]
    pub fn legal_placements(&self, index: usize) -> Vec<(Rotation, Position)> {
        self.state
            .round
            .active_player()
            .hand()
            .get(index)
            .map(|tile| self.state.grid.legal_placements(tile))
            .unwrap_or_default()
    }

    /// Features of the tile just placed that accept the active player's
    /// follower.
    #[must_use]
    pub fn meeple_options(&self) -> Vec<(Direction, PatternId)> {
        let Phase::Manning { position } = self.state.phase else {
            return Vec::new();
        };
        let player = self.state.round.active_player();
        if !player.has_free_meeple() {
            return Vec::new();
        }
        self.state.grid.meeple_options(
            position,
            player.id(),
            &self.round_settings.meeple_rules,
            self.round_settings.allow_fortifying,
        )
    }

    /// Stable byte form of the round state.
    pub fn state_bytes(&self) -> Result<Vec<u8>> {
        self.state
            .to_bytes()
            .map_err(|err| GameError::Serialization(err.to_string()))
    }

    /// Whether a computer move is being searched.
    #[must_use]
    pub fn is_search_pending(&self) -> bool {
        self.worker.is_some()
    }

    /// Register an observer for every later event.
    pub fn subscribe(&mut self, observer: impl GameObserver + 'static) {
        self.observers.subscribe(observer);
    }

    // === Actions ===

    /// Apply a human action.
    ///
    /// Refused actions leave the state untouched. Abort is accepted at any
    /// time, even during a computer turn.
    #[instrument(skip(self), fields(phase = self.state.phase.name(), player = %self.state.round.active()))]
    pub fn apply(&mut self, action: Action) -> Result<Vec<GameEvent>> {
        if !self.state.phase.permits(&action) {
            error!(%action, "illegal action refused");
            return Err(self.illegal(action.name()));
        }
        let active = self.state.round.active();
        if action != Action::Abort && self.state.round.active_player().is_computer_controlled() {
            return Err(GameError::ComputerTurn(active));
        }

        let mut events = Vec::new();
        self.step(action, &mut events)?;
        self.observers.publish(&events);
        Ok(events)
    }

    /// Collect the pending computer move and play it.
    ///
    /// Blocks until the search answers. A move the rules refuse, or no move
    /// at all, makes the computer skip.
    pub fn await_move(&mut self) -> Result<Vec<GameEvent>> {
        let worker = self.worker.take().ok_or(GameError::NoPendingMove)?;
        let player = worker.player();
        let mv = match worker.wait() {
            Ok(mv) => mv,
            Err(err) => {
                error!(%err, "move search failed, skipping the turn");
                None
            }
        };
        debug!(%player, ?mv, "computer move received");

        let mut events = Vec::new();
        self.play_computer_move(mv, &mut events)?;
        self.observers.publish(&events);
        Ok(events)
    }

    /// Play computer turns until a human is to move or the round is over.
    pub fn play_computer_turns(&mut self) -> Result<Vec<GameEvent>> {
        let mut events = Vec::new();
        while self.worker.is_some() {
            events.extend(self.await_move()?);
        }
        Ok(events)
    }

    /// Start the next round with the current settings. Only allowed once
    /// the running round is over.
    pub fn new_round(&mut self) -> Result<Vec<GameEvent>> {
        if !self.state.phase.is_game_over() {
            return Err(self.illegal("new round"));
        }
        self.settings.validate()?;
        let stack = TileStack::new(
            &self.distribution,
            self.settings.stack_size_multiplier,
            &mut self.rng.fork(),
        );
        let events = self.start_round(stack)?;
        self.observers.publish(&events);
        Ok(events)
    }

    // === Transitions ===

    fn illegal(&self, action: &'static str) -> GameError {
        GameError::IllegalAction {
            phase: self.state.phase.name(),
            action,
        }
    }

    fn step(&mut self, action: Action, events: &mut Vec<GameEvent>) -> Result<()> {
        match (self.state.phase, action) {
            (Phase::GameOver, Action::Abort) => Ok(()),
            (_, Action::Abort) => {
                info!(player = %self.state.round.active(), "round aborted");
                self.enter_game_over(true, events);
                Ok(())
            }
            (Phase::Placing { .. }, Action::PlaceTile { tile, rotation, position }) => {
                self.place_tile(tile, rotation, position, events)
            }
            (Phase::Placing { .. }, Action::SelectTile(index)) => self.select_tile(index),
            (Phase::Placing { selected }, Action::Skip) => self.skip_tile(selected, events),
            (Phase::Manning { position }, Action::PlaceMeeple(direction)) => {
                self.place_meeple(position, direction, events)
            }
            (Phase::Manning { .. }, Action::Skip) => {
                self.finish_turn(events);
                Ok(())
            }
            (_, action) => Err(self.illegal(action.name())),
        }
    }

    fn start_round(&mut self, stack: TileStack) -> Result<Vec<GameEvent>> {
        self.worker = None;
        self.settings.clear_grid_size_changed();
        self.round_settings = self.settings.clone();

        let mut grid = Grid::new(self.settings.grid_width(), self.settings.grid_height());
        let center = grid.center();
        grid.place(Tile::new(FOUNDATION_TILE_ID, TileType::FOUNDATION), center)?;

        let mut round = Round::new(&self.settings);
        let mut stack = stack;
        let mut events = Vec::new();
        let seats: Vec<PlayerId> = round.players().map(|p| p.id()).collect();
        for player in seats {
            let drawn = round.fill_hand(player, &mut stack);
            let hand = round.player(player).hand();
            for tile in &hand[hand.len() - drawn..] {
                events.push(GameEvent::TileDrawn { player, tile: tile.id() });
            }
        }

        info!(
            players = round.player_count(),
            width = grid.width(),
            height = grid.height(),
            stack = stack.len(),
            computers_only = !round.has_human_players(),
            "round started"
        );
        self.state = GameState {
            grid,
            round,
            stack,
            phase: Phase::Placing { selected: 0 },
            pending_scoring: Default::default(),
            result: None,
        };
        self.enter_placing(&mut events);
        Ok(events)
    }

    /// Begin the active player's turn, passing over players with nothing
    /// to place.
    fn enter_placing(&mut self, events: &mut Vec<GameEvent>) {
        loop {
            let active = self.state.round.active();
            if !self.state.round.has_full_hand(active) {
                if let Some(tile) = self.state.stack.draw() {
                    events.push(GameEvent::TileDrawn {
                        player: active,
                        tile: tile.id(),
                    });
                    self.state.round.player_mut(active).add_tile(tile);
                }
            }

            if self.state.round.is_over(&self.state.stack) {
                self.enter_game_over(false, events);
                return;
            }
            if self.state.round.active_player().hand().is_empty() {
                let next = self.state.round.next_turn();
                debug!(skipped = %active, "empty hand, turn passed");
                events.push(GameEvent::ActivePlayerChanged { player: next });
                continue;
            }

            self.state.phase = Phase::Placing { selected: 0 };
            if self.state.round.active_player().is_computer_controlled() {
                self.start_search();
            }
            return;
        }
    }

    fn start_search(&mut self) {
        let player = self.state.round.active_player();
        let request = SearchRequest::new(
            player.id(),
            player.hand().to_vec(),
            player.free_meeples(),
            self.state.grid.clone(),
            self.state.stack.clone(),
            &self.round_settings,
        );
        self.worker = Some(self.pool.spawn(Arc::clone(&self.search), request));
    }

    fn place_tile(
        &mut self,
        index: usize,
        rotation: Rotation,
        position: Position,
        events: &mut Vec<GameEvent>,
    ) -> Result<()> {
        let active = self.state.round.active();
        let mut tile = self
            .state
            .round
            .active_player()
            .hand()
            .get(index)
            .cloned()
            .ok_or(GameError::NoSuchTile(active, index))?;
        tile.rotate_to(rotation);
        let (id, tile_type) = (tile.id(), tile.tile_type());

        let outcome = self.state.grid.place(tile, position)?;
        self.state.round.active_player_mut().take_tile(index);

        debug!(player = %active, tile = %id, %position, %rotation, completed = outcome.completed.len(), "tile placed");
        events.push(GameEvent::TilePlaced {
            player: active,
            tile: id,
            tile_type,
            rotation,
            position,
        });
        self.state.pending_scoring = outcome.completed;
        self.state.phase = Phase::Manning { position };
        Ok(())
    }

    fn select_tile(&mut self, index: usize) -> Result<()> {
        let player = self.state.round.active_player();
        if index >= player.hand().len() {
            return Err(GameError::NoSuchTile(player.id(), index));
        }
        self.state.phase = Phase::Placing { selected: index };
        Ok(())
    }

    /// Give up a hand tile and pass the turn.
    fn skip_tile(&mut self, index: usize, events: &mut Vec<GameEvent>) -> Result<()> {
        let active = self.state.round.active();
        let tile = self
            .state
            .round
            .active_player_mut()
            .take_tile(index)
            .ok_or(GameError::NoSuchTile(active, index))?;

        let id = tile.id();
        let returned = self.state.stack.put_back(tile);
        debug!(player = %active, tile = %id, returned, "tile skipped");
        events.push(GameEvent::TileReturned {
            player: active,
            tile: id,
            discarded: !returned,
        });
        self.advance_turn(events);
        Ok(())
    }

    fn place_meeple(&mut self, position: Position, direction: Direction, events: &mut Vec<GameEvent>) -> Result<()> {
        let active = self.state.round.active();
        if !self.state.round.active_player().has_free_meeple() {
            return Err(MeepleError::NoneLeft(active).into());
        }
        let terrain = self
            .state
            .grid
            .pattern_at(position, direction)
            .ok_or(MeepleError::NoFeature { position, direction })?
            .terrain();
        if !self.round_settings.meeple_rules.allows(terrain) {
            return Err(MeepleError::TerrainDisabled(terrain).into());
        }

        let pattern = self
            .state
            .grid
            .place_meeple(position, direction, active, self.round_settings.allow_fortifying)?;
        self.state.round.active_player_mut().take_meeple();

        events.push(GameEvent::MeeplePlaced {
            player: active,
            position,
            direction,
            pattern,
        });
        self.finish_turn(events);
        Ok(())
    }

    /// Score what the turn completed and hand over to the next player.
    fn finish_turn(&mut self, events: &mut Vec<GameEvent>) {
        self.state.phase = Phase::TurnEnd;
        let pending = std::mem::take(&mut self.state.pending_scoring);
        for id in pending {
            if let Some(score) = self.state.grid.score_pattern(id) {
                self.award(score, false, events);
            }
        }
        self.advance_turn(events);
    }

    fn advance_turn(&mut self, events: &mut Vec<GameEvent>) {
        let next = self.state.round.next_turn();
        events.push(GameEvent::ActivePlayerChanged { player: next });
        self.enter_placing(events);
    }

    fn award(&mut self, score: PatternScore, final_scoring: bool, events: &mut Vec<GameEvent>) {
        for &player in &score.players {
            self.state.round.player_mut(player).add_points(score.points, score.terrain);
        }
        for follower in &score.returned {
            self.state.round.player_mut(follower.owner).return_meeple();
        }
        if !score.players.is_empty() {
            events.push(GameEvent::PatternScored {
                pattern: score.pattern,
                terrain: score.terrain,
                points: score.points,
                players: score.players,
                final_scoring,
            });
        }
    }

    fn enter_game_over(&mut self, aborted: bool, events: &mut Vec<GameEvent>) {
        self.worker = None;
        self.state.phase = Phase::GameOver;
        self.state.pending_scoring.clear();

        for score in self.state.grid.final_scoring() {
            self.award(score, true, events);
        }

        let round = &self.state.round;
        let result = GameResult::from_leaders(round.leaders(), round.player_count());
        info!(?result, aborted, turns = round.turn(), "round over");
        self.state.result = Some(result.clone());
        events.push(GameEvent::RoundOver { result, aborted });
    }

    fn play_computer_move(&mut self, mv: Option<Move>, events: &mut Vec<GameEvent>) -> Result<()> {
        if let Some(mv) = mv {
            match self.step(mv.placement(), events) {
                Ok(()) => {
                    if let Err(err) = self.step(mv.manning(), events) {
                        warn!(%err, "computer follower refused");
                        self.step(Action::Skip, events)?;
                    }
                    return Ok(());
                }
                Err(err) => warn!(%err, "computer placement refused"),
            }
        }

        let hand = self.state.round.active_player().hand();
        let choice = self.search.choose_tile_to_drop(hand, &self.state.grid);
        let index = if choice < hand.len() { choice } else { 0 };
        self.skip_tile(index, events)
    }
}

impl std::fmt::Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("phase", &self.state.phase)
            .field("active", &self.state.round.active())
            .field("search_pending", &self.worker.is_some())
            .finish_non_exhaustive()
    }
}
