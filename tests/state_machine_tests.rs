//! Turn state machine integration tests.
//!
//! These tests drive whole rounds through `Game::apply` and check phase
//! legality, the skip rules and the events a round reports.

use std::sync::{Arc, Mutex};

use tile_placer::ai::{Move, MoveSearch, RuleBasedAi, SearchRequest};
use tile_placer::core::{Action, GameError, GameSettings, PlayerId, TileId, MAXIMAL_MEEPLES};
use tile_placer::events::GameEvent;
use tile_placer::grid::{Direction, Position};
use tile_placer::rules::{Game, GameResult, Phase};
use tile_placer::stack::TileStack;
use tile_placer::tiles::{Rotation, TerrainType, Tile, TileType};

const P0: PlayerId = PlayerId::new(0);
const P1: PlayerId = PlayerId::new(1);

fn tiles(types: &[TileType]) -> TileStack {
    TileStack::from_tiles(
        types
            .iter()
            .enumerate()
            .map(|(i, &tile_type)| Tile::new(TileId::new(i as u32 + 1), tile_type)),
    )
}

fn game_with(settings: GameSettings, stack: TileStack) -> Game {
    Game::with_stack(settings, stack, Arc::new(RuleBasedAi::new())).unwrap()
}

fn all_actions() -> Vec<Action> {
    vec![
        Action::PlaceTile {
            tile: 0,
            rotation: Rotation::new(0),
            position: Position::new(0, 0),
        },
        Action::SelectTile(0),
        Action::PlaceMeeple(Direction::Center),
        Action::Skip,
    ]
}

// =============================================================================
// Legality
// =============================================================================

/// Test that every refused action leaves the state byte-for-byte unchanged.
#[test]
fn test_refused_actions_leave_state_unchanged() {
    let mut game = game_with(
        GameSettings::default().with_grid(5, 5),
        tiles(&[TileType::Road, TileType::Road, TileType::Road]),
    );

    // Placing: meeple is illegal, a far-off tile is rejected.
    let before = game.state_bytes().unwrap();
    for action in all_actions() {
        if matches!(action, Action::PlaceMeeple(_) | Action::PlaceTile { .. }) {
            assert!(game.apply(action).is_err(), "{action} should be refused");
            assert_eq!(game.state_bytes().unwrap(), before, "{action} changed the state");
        }
    }

    // Manning: tile actions are illegal.
    game.apply(Action::PlaceTile {
        tile: 0,
        rotation: Rotation::new(1),
        position: Position::new(1, 2),
    })
    .unwrap();
    let before = game.state_bytes().unwrap();
    for action in [all_actions()[0], all_actions()[1]] {
        let err = game.apply(action).unwrap_err();
        assert!(matches!(err, GameError::IllegalAction { phase: "manning", .. }));
        assert_eq!(game.state_bytes().unwrap(), before);
    }

    // Game over: everything but abort is illegal, abort does nothing.
    game.apply(Action::Abort).unwrap();
    let before = game.state_bytes().unwrap();
    for action in all_actions() {
        let err = game.apply(action).unwrap_err();
        assert!(matches!(err, GameError::IllegalAction { phase: "game over", .. }));
    }
    assert!(game.apply(Action::Abort).unwrap().is_empty());
    assert_eq!(game.state_bytes().unwrap(), before);
}

// =============================================================================
// Skipping
// =============================================================================

/// Test that a round where nothing fits ends by skipping, each tile going
/// back to the stack once and leaving the round the second time.
#[test]
fn test_no_fit_round_ends_by_skipping() {
    let mut game = game_with(
        GameSettings::default().with_grid(1, 1),
        tiles(&[TileType::Road, TileType::RoadCurve]),
    );
    assert!(game.legal_placements(0).is_empty());
    assert_eq!(game.stack().len(), 0);

    let mut events = Vec::new();
    while !game.is_over() {
        events.extend(game.apply(Action::Skip).unwrap());
    }

    let returned: Vec<(TileId, bool)> = events
        .iter()
        .filter_map(|e| match e {
            GameEvent::TileReturned { tile, discarded, .. } => Some((*tile, *discarded)),
            _ => None,
        })
        .collect();
    assert_eq!(
        returned,
        vec![
            (TileId::new(1), false),
            (TileId::new(2), false),
            (TileId::new(1), true),
            (TileId::new(2), true),
        ]
    );
    assert_eq!(
        events.last(),
        Some(&GameEvent::RoundOver {
            result: GameResult::Draw,
            aborted: false
        })
    );
    assert_eq!(game.grid().tile_count(), 1);
}

/// Test that a player with an empty hand is passed over while others still
/// hold tiles.
#[test]
fn test_empty_hand_is_passed_over() {
    let settings = GameSettings::default()
        .with_grid(5, 5)
        .with_players(3)
        .with_tiles_per_player(2);
    let mut game = game_with(settings, tiles(&[TileType::Road; 4]));
    assert!(game.round().player(PlayerId::new(2)).hand().is_empty());
    assert!(game.stack().is_empty());

    game.apply(Action::PlaceTile {
        tile: 0,
        rotation: Rotation::new(1),
        position: Position::new(1, 2),
    })
    .unwrap();
    let events = game.apply(Action::Skip).unwrap();
    assert_eq!(events, vec![GameEvent::ActivePlayerChanged { player: P1 }]);

    game.apply(Action::PlaceTile {
        tile: 0,
        rotation: Rotation::new(1),
        position: Position::new(3, 2),
    })
    .unwrap();
    let events = game.apply(Action::Skip).unwrap();
    assert_eq!(
        events,
        vec![
            GameEvent::ActivePlayerChanged {
                player: PlayerId::new(2)
            },
            GameEvent::ActivePlayerChanged { player: P0 },
        ]
    );
    assert_eq!(game.active_player(), P0);
    assert_eq!(game.phase(), Phase::Placing { selected: 0 });
}

// =============================================================================
// Scoring through turns
// =============================================================================

/// Test that a city closed in a turn scores when the turn ends and the
/// follower comes back.
#[test]
fn test_completed_city_scores_at_turn_end() {
    // The foundation's city opens upward at (2, 1); a cap turned down
    // closes it.
    let mut game = game_with(
        GameSettings::default().with_grid(5, 5),
        tiles(&[TileType::CityCap, TileType::Road, TileType::Road]),
    );

    game.apply(Action::PlaceTile {
        tile: 0,
        rotation: Rotation::new(2),
        position: Position::new(2, 1),
    })
    .unwrap();
    assert!(game
        .meeple_options()
        .iter()
        .any(|&(direction, _)| direction == Direction::Bottom));

    let events = game.apply(Action::PlaceMeeple(Direction::Bottom)).unwrap();
    let scored = events
        .iter()
        .find_map(|e| match e {
            GameEvent::PatternScored {
                terrain,
                points,
                players,
                final_scoring,
                ..
            } => Some((*terrain, *points, players.to_vec(), *final_scoring)),
            _ => None,
        })
        .unwrap();
    assert_eq!(scored, (TerrainType::City, 4, vec![P0], false));

    let player = game.round().player(P0);
    assert_eq!(player.score().overall(), 4);
    assert_eq!(player.score().terrain_score(TerrainType::City), 4);
    assert_eq!(player.free_meeples(), MAXIMAL_MEEPLES);
    assert_eq!(game.active_player(), P1);
}

/// Test that a monastery laid into a surrounded hole scores in the same turn
/// and its follower comes straight back.
#[test]
fn test_monastery_filling_hole_scores_at_turn_end() {
    // Roads beside the foundation, monasteries around (2, 3), then the
    // monastery for the hole itself.
    let mut types = vec![TileType::Road, TileType::Road];
    types.extend([TileType::Monastery; 6]);
    types.push(TileType::Road);
    let mut game = game_with(GameSettings::default().with_grid(5, 5), tiles(&types));

    let ring = [
        (1, Position::new(1, 2)),
        (1, Position::new(3, 2)),
        (0, Position::new(1, 3)),
        (0, Position::new(3, 3)),
        (0, Position::new(1, 4)),
        (0, Position::new(2, 4)),
        (0, Position::new(3, 4)),
    ];
    for (turns, position) in ring {
        game.apply(Action::PlaceTile {
            tile: 0,
            rotation: Rotation::new(turns),
            position,
        })
        .unwrap();
        game.apply(Action::Skip).unwrap();
    }

    assert_eq!(game.active_player(), P1);
    game.apply(Action::PlaceTile {
        tile: 0,
        rotation: Rotation::new(0),
        position: Position::new(2, 3),
    })
    .unwrap();
    let events = game.apply(Action::PlaceMeeple(Direction::Center)).unwrap();

    let scored = events
        .iter()
        .find_map(|e| match e {
            GameEvent::PatternScored {
                terrain,
                points,
                players,
                final_scoring,
                ..
            } => Some((*terrain, *points, players.to_vec(), *final_scoring)),
            _ => None,
        })
        .unwrap();
    assert_eq!(scored, (TerrainType::Monastery, 9, vec![P1], false));
    assert_eq!(game.round().player(P1).score().overall(), 9);
    assert_eq!(game.round().player(P1).free_meeples(), MAXIMAL_MEEPLES);
}

/// Test that an abort still runs final scoring for followers on the grid.
#[test]
fn test_abort_runs_final_scoring() {
    let mut game = game_with(
        GameSettings::default().with_grid(5, 5),
        tiles(&[TileType::Road, TileType::Road, TileType::Road]),
    );
    game.apply(Action::PlaceTile {
        tile: 0,
        rotation: Rotation::new(1),
        position: Position::new(1, 2),
    })
    .unwrap();
    game.apply(Action::PlaceMeeple(Direction::Center)).unwrap();
    assert_eq!(game.round().player(P0).free_meeples(), MAXIMAL_MEEPLES - 1);

    let events = game.apply(Action::Abort).unwrap();
    assert_eq!(
        events,
        vec![
            GameEvent::PatternScored {
                pattern: game.grid().pattern_at(Position::new(1, 2), Direction::Center).unwrap().id(),
                terrain: TerrainType::Road,
                points: 2,
                players: [P0].into_iter().collect(),
                final_scoring: true,
            },
            GameEvent::RoundOver {
                result: GameResult::Winner(P0),
                aborted: true
            },
        ]
    );
    assert_eq!(game.round().player(P0).free_meeples(), MAXIMAL_MEEPLES);
    assert!(game.result().unwrap().is_winner(P0));
}

// =============================================================================
// Computer players
// =============================================================================

/// Waits for the test to open the gate before answering.
struct Gated(Arc<Mutex<()>>);

impl MoveSearch for Gated {
    fn best_move(&self, _request: &SearchRequest) -> Option<Move> {
        let _open = self.0.lock().unwrap();
        None
    }
}

/// Test that aborting during a search drops it and the late answer is
/// never applied.
#[test]
fn test_abort_while_searching() {
    let gate = Arc::new(Mutex::new(()));
    let closed = gate.lock().unwrap();

    let settings = GameSettings::default().with_grid(5, 5).with_computer_player(0);
    let mut game = Game::with_stack(
        settings,
        tiles(&[TileType::Road, TileType::Road]),
        Arc::new(Gated(Arc::clone(&gate))),
    )
    .unwrap();
    assert!(game.is_search_pending());
    assert_eq!(game.apply(Action::Skip), Err(GameError::ComputerTurn(P0)));

    let events = game.apply(Action::Abort).unwrap();
    assert!(matches!(events.last(), Some(GameEvent::RoundOver { aborted: true, .. })));
    let after_abort = game.state_bytes().unwrap();

    drop(closed);
    assert_eq!(game.await_move(), Err(GameError::NoPendingMove));
    assert_eq!(game.state_bytes().unwrap(), after_abort);
    assert_eq!(game.phase(), Phase::GameOver);
}

/// Test that a whole round between computers reports consistent scores and
/// returns every follower.
#[test]
fn test_computer_round_is_consistent() {
    let settings = GameSettings::default()
        .with_grid(15, 15)
        .with_players(3)
        .with_tiles_per_player(2)
        .with_computer_player(0)
        .with_computer_player(1)
        .with_computer_player(2)
        .with_seed(11);
    let mut game = Game::new(settings).unwrap();

    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    game.subscribe(move |event: &GameEvent| sink.lock().unwrap().push(event.clone()));

    let events = game.play_computer_turns().unwrap();
    assert!(game.is_over());
    assert_eq!(*seen.lock().unwrap(), events);

    let mut totals = [0u32; 3];
    for event in &events {
        if let GameEvent::PatternScored { points, players, .. } = event {
            for player in players {
                totals[player.index()] += points;
            }
        }
    }
    for player in game.round().players() {
        assert_eq!(player.score().overall(), totals[player.id().index()]);
        assert_eq!(player.free_meeples(), MAXIMAL_MEEPLES);
        assert!(player.hand().is_empty());
    }
    assert!(game.stack().is_empty());
    assert!(game.result().is_some());
}

/// Test that equal seeds give equal rounds.
#[test]
fn test_computer_rounds_are_reproducible() {
    let settings = GameSettings::default()
        .with_grid(11, 11)
        .with_computer_player(0)
        .with_computer_player(1)
        .with_seed(5);

    let mut first = Game::new(settings.clone()).unwrap();
    let mut second = Game::new(settings).unwrap();
    let first_events = first.play_computer_turns().unwrap();
    let second_events = second.play_computer_turns().unwrap();

    assert_eq!(first_events, second_events);
    assert_eq!(first.state_bytes().unwrap(), second.state_bytes().unwrap());
}
