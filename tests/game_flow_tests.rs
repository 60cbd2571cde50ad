//! Game flow tests - phases, effects, scoring and lifecycle through the public API

use cheza::core::{Board, GameState, PieceQueue, Phase, RulesConfig, Tetromino};
use cheza::types::{Effect, GameInput, PieceKind, Rotation, TICK_MS};

/// First seed whose opening piece is `kind`
fn seed_starting_with(kind: PieceKind) -> u64 {
    (0u64..)
        .find(|&seed| PieceQueue::new(seed, 5).peek() == Some(kind))
        .unwrap()
}

fn game_on(rows: &[&str], first: PieceKind) -> GameState {
    let board = Board::from_rows(rows).unwrap();
    GameState::with_board(RulesConfig::default(), seed_starting_with(first), board).unwrap()
}

#[test]
fn test_line_clear_pipeline_phases() {
    let mut game = game_on(&["oooo..oooo"], PieceKind::O);
    assert_eq!(game.phase(), Phase::Are);
    assert_eq!(game.tick(100), vec![Effect::Spawned { kind: PieceKind::O }]);
    assert_eq!(game.phase(), Phase::Falling);

    let next = game.upcoming().next().unwrap();
    assert!(game.apply_input(GameInput::HardDrop));
    assert_eq!(game.phase(), Phase::Clearing);
    assert!(game.active().is_none());

    let effects = game.tick(299);
    assert_eq!(effects[0], Effect::HardDropped { cells: 18 });
    assert_eq!(effects[1], Effect::Locked { kind: PieceKind::O });
    match &effects[2] {
        Effect::LinesCleared { rows, count, tspin } => {
            assert_eq!(rows.as_slice(), &[19]);
            assert_eq!(*count, 1);
            assert!(!tspin);
        }
        other => panic!("expected LinesCleared, got {other:?}"),
    }
    assert_eq!(effects.len(), 3);
    assert_eq!(game.phase(), Phase::Clearing);
    assert_eq!(game.lines(), 1);
    assert_eq!(game.score(), 18 * 2 + 100);
    // rows are still on the board during the clear delay
    assert_eq!(game.board().occupied_count(), 12);

    assert_eq!(
        game.tick(1),
        vec![Effect::RowsRemoved { count: 1 }, Effect::Spawned { kind: next }]
    );
    assert_eq!(game.phase(), Phase::Are);
    assert_eq!(game.board().occupied_count(), 2);
}

#[test]
fn test_tetris_scores_line_table_exactly() {
    let mut game = game_on(&["iiiiiiiii."; 4], PieceKind::I);
    game.tick(100);

    assert!(game.apply_input(GameInput::RotateCw));
    for _ in 0..4 {
        assert!(game.apply_input(GameInput::MoveRight));
    }
    assert!(!game.apply_input(GameInput::MoveRight));
    assert!(game.apply_input(GameInput::HardDrop));

    assert_eq!(game.lines(), 4);
    assert_eq!(game.combo(), 0);
    assert_eq!(game.score(), 17 * 2 + 800);

    game.tick(300);
    assert_eq!(game.board().occupied_count(), 0);
}

#[test]
fn test_input_effects_arrive_with_next_tick() {
    let mut game = game_on(&[], PieceKind::T);
    game.tick(100);

    game.apply_input(GameInput::MoveLeft);
    game.apply_input(GameInput::ReleaseLeft);
    game.apply_input(GameInput::RotateCw);
    assert_eq!(
        game.tick(0),
        vec![
            Effect::Moved { dx: -1 },
            Effect::Rotated {
                rotation: Rotation::East,
                kicked: false
            },
        ]
    );
    assert_eq!(
        game.active(),
        Some(Tetromino {
            kind: PieceKind::T,
            rotation: Rotation::East,
            x: 2,
            y: 0
        })
    );
}

#[test]
fn test_hold_twice_is_noop() {
    let mut game = game_on(&[], PieceKind::S);
    game.tick(100);

    assert!(game.apply_input(GameInput::Hold));
    assert_eq!(game.hold_piece(), Some(PieceKind::S));
    let before = game.snapshot();

    assert!(!game.apply_input(GameInput::Hold));
    assert_eq!(game.snapshot(), before);

    let held: Vec<_> = game
        .tick(0)
        .into_iter()
        .filter(|e| matches!(e, Effect::Held { .. }))
        .collect();
    assert_eq!(held, vec![Effect::Held { kind: PieceKind::S }]);
}

#[test]
fn test_hold_rearms_after_lock() {
    let mut game = game_on(&[], PieceKind::Z);
    game.tick(100);
    game.apply_input(GameInput::Hold);
    assert!(!game.can_hold());

    game.apply_input(GameInput::HardDrop);
    assert!(game.can_hold());
    game.tick(100);
    assert!(game.apply_input(GameInput::Hold));
    assert_eq!(game.active().map(|p| p.kind), Some(PieceKind::Z));
}

#[test]
fn test_blocked_spawn_is_game_over_until_restart() {
    let mut game = game_on(&["zzzzzzzzz."; 20], PieceKind::T);
    assert!(game.game_over());
    assert_eq!(game.tick(TICK_MS), vec![Effect::GameOver { score: 0 }]);

    for input in [
        GameInput::MoveLeft,
        GameInput::RotateCw,
        GameInput::HardDrop,
        GameInput::Hold,
        GameInput::SoftDropOn,
        GameInput::PauseToggle,
    ] {
        assert!(!game.apply_input(input), "{input:?} accepted after game over");
    }

    assert!(game.apply_input(GameInput::Restart));
    assert!(!game.game_over());
    assert_eq!(game.episode_id(), 1);
    assert_eq!(game.board().occupied_count(), 0);
    let effects = game.tick(0);
    assert_eq!(effects[0], Effect::Restarted);
    assert!(matches!(effects[1], Effect::Spawned { .. }));
}

#[test]
fn test_stacking_to_the_top_ends_the_game() {
    let mut game = GameState::new(7);
    let mut ticks = 0;
    while !game.game_over() && ticks < 10_000 {
        game.tick(100);
        game.apply_input(GameInput::HardDrop);
        ticks += 1;
    }
    assert!(game.game_over());
    assert!(game.active().is_none());
    assert_eq!(game.phase(), Phase::GameOver);
}

#[test]
fn test_pause_blocks_gameplay_inputs() {
    let mut game = game_on(&[], PieceKind::L);
    game.tick(100);
    assert!(game.apply_input(GameInput::PauseToggle));
    assert!(game.paused());

    let before = game.snapshot();
    for input in [
        GameInput::MoveLeft,
        GameInput::MoveRight,
        GameInput::RotateCw,
        GameInput::RotateCcw,
        GameInput::HardDrop,
        GameInput::Hold,
        GameInput::SoftDropOn,
        GameInput::Restart,
    ] {
        assert!(!game.apply_input(input), "{input:?} accepted while paused");
    }
    game.tick(10_000);
    assert_eq!(game.snapshot(), before);

    assert!(game.apply_input(GameInput::PauseToggle));
    assert!(!game.paused());
}

#[test]
fn test_pause_freezes_held_direction_and_soft_drop() {
    let mut game = game_on(&[], PieceKind::J);
    game.tick(100);
    game.apply_input(GameInput::MoveRight);
    game.tick(100);
    game.apply_input(GameInput::SoftDropOn);
    let piece = game.active().unwrap();
    assert_eq!(piece.x, 4);

    game.apply_input(GameInput::PauseToggle);
    let paused = game.snapshot();
    assert_eq!(paused.timers.das_held_ms, 100);
    assert_eq!(paused.timers.gravity_ms, 100);
    assert!(game.soft_dropping());

    game.tick(10_000);
    assert_eq!(game.snapshot(), paused);

    game.apply_input(GameInput::PauseToggle);
    // 50 more ms crosses the 150ms delay and the 50ms soft drop threshold
    game.tick(50);
    let piece = game.active().unwrap();
    assert_eq!((piece.x, piece.y), (5, 1));
    assert_eq!(game.score(), 1);
}

#[test]
fn test_key_releases_register_while_paused() {
    let mut game = game_on(&[], PieceKind::L);
    game.tick(100);
    game.apply_input(GameInput::MoveLeft);
    game.apply_input(GameInput::SoftDropOn);
    let x = game.active().unwrap().x;

    game.apply_input(GameInput::PauseToggle);
    assert!(game.apply_input(GameInput::ReleaseLeft));
    assert!(game.apply_input(GameInput::SoftDropOff));
    assert!(!game.soft_dropping());
    assert_eq!(game.snapshot().timers.das_held_ms, 0);

    game.apply_input(GameInput::PauseToggle);
    game.tick(400);
    assert_eq!(game.active().unwrap().x, x);
}

#[test]
fn test_direction_pressed_during_are_repeats_once_falling() {
    let mut game = game_on(&[], PieceKind::T);
    assert_eq!(game.phase(), Phase::Are);

    // recorded, but the piece may not move yet
    assert!(game.apply_input(GameInput::MoveLeft));
    assert_eq!(game.active().unwrap().x, 3);

    game.tick(100);
    assert_eq!(game.phase(), Phase::Falling);
    assert_eq!(game.active().unwrap().x, 3);

    game.tick(100);
    assert_eq!(game.active().unwrap().x, 3);
    game.tick(50);
    assert_eq!(game.active().unwrap().x, 2);
    game.tick(50);
    assert_eq!(game.active().unwrap().x, 1);
    game.tick(50);
    assert_eq!(game.active().unwrap().x, 0);
}

#[test]
fn test_pause_freezes_line_clear_delay() {
    let mut game = game_on(&["oooo..oooo"], PieceKind::O);
    game.tick(100);
    game.apply_input(GameInput::HardDrop);
    game.tick(100);
    assert_eq!(game.phase(), Phase::Clearing);
    assert_eq!(game.snapshot().timers.phase_remaining_ms, 200);

    game.apply_input(GameInput::PauseToggle);
    game.tick(10_000);
    assert_eq!(game.phase(), Phase::Clearing);
    assert_eq!(game.snapshot().timers.phase_remaining_ms, 200);
    assert_eq!(game.board().occupied_count(), 12);

    game.apply_input(GameInput::PauseToggle);
    assert_eq!(game.tick(199), vec![Effect::Resumed]);
    assert_eq!(game.phase(), Phase::Clearing);

    let effects = game.tick(1);
    assert_eq!(effects[0], Effect::RowsRemoved { count: 1 });
    assert!(matches!(effects[1], Effect::Spawned { .. }));
    assert_eq!(game.board().occupied_count(), 2);
}

#[test]
fn test_soft_drop_uses_fast_threshold() {
    let mut game = game_on(&[], PieceKind::T);
    game.tick(100);
    let y = game.active().unwrap().y;

    game.apply_input(GameInput::SoftDropOn);
    for _ in 0..4 {
        game.tick(50);
    }
    assert_eq!(game.active().unwrap().y, y + 4);
    assert_eq!(game.score(), 4);

    game.apply_input(GameInput::SoftDropOff);
    game.tick(50);
    assert_eq!(game.active().unwrap().y, y + 4);
}

#[test]
fn test_gravity_alone_locks_pieces() {
    let mut game = GameState::new(2024);
    for _ in 0..2_000 {
        game.tick(TICK_MS);
    }
    assert!(game.piece_id() >= 2);
    assert_eq!(game.board().occupied_count() % 4, 0);
    assert!(game.board().occupied_count() >= 4);
}

#[test]
fn test_same_seed_same_game() {
    let script = [
        GameInput::MoveLeft,
        GameInput::RotateCw,
        GameInput::HardDrop,
        GameInput::Hold,
        GameInput::MoveRight,
        GameInput::ReleaseRight,
        GameInput::HardDrop,
    ];
    let mut a = GameState::new(99);
    let mut b = GameState::new(99);
    for round in 0..30 {
        for game in [&mut a, &mut b] {
            game.apply_input(script[round % script.len()]);
            game.tick(TICK_MS * 8);
        }
    }
    assert_eq!(a.snapshot(), b.snapshot());
}

#[test]
fn test_restart_starts_a_different_sequence() {
    let mut game = GameState::new(5);
    let first: Vec<_> = game.upcoming().collect();
    game.apply_input(GameInput::Restart);
    game.apply_input(GameInput::Restart);
    let third: Vec<_> = game.upcoming().collect();

    assert_eq!(game.episode_id(), 2);
    assert_ne!(game.seed(), 5);
    assert_eq!(third.len(), first.len());
}

#[test]
fn test_custom_rules_skip_delays() {
    let config = RulesConfig {
        are_ms: 0,
        line_clear_ms: 0,
        ..RulesConfig::default()
    };
    let board = Board::from_rows(&["oooo..oooo"]).unwrap();
    let mut game =
        GameState::with_board(config, seed_starting_with(PieceKind::O), board).unwrap();

    assert_eq!(game.phase(), Phase::Falling);
    assert!(game.apply_input(GameInput::HardDrop));
    assert_eq!(game.phase(), Phase::Falling);
    assert_eq!(game.board().occupied_count(), 2);
}
