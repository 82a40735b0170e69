//! End-to-end scenarios driving a session only through its public command surface.

use std::time::Duration;

use blockfall_engine::{
    ActivePiece, Board, Command, CommandError, Commands, EngineConfig, GameSession, InputMapper, Key,
    PieceSeed, StepOutcome, TouchPoint,
};

const FRAME: Duration = Duration::from_millis(16);

fn seeded_session(seed: u8) -> GameSession {
    GameSession::with_config(EngineConfig::default(), Some(PieceSeed::from_bytes([seed; 16])))
        .unwrap()
}

fn assert_piece_is_legal(session: &GameSession) {
    let board = session.field().board();
    let piece = session.falling_piece();
    assert!(
        !board.is_colliding(&piece),
        "falling piece collides while playing: {piece:?}"
    );
}

#[test]
fn random_command_rollouts_keep_invariants() {
    const SCRIPT: [Command; 7] = [
        Command::MoveLeft,
        Command::Rotate,
        Command::MoveRight,
        Command::ManualStep,
        Command::MoveRight,
        Command::Rotate,
        Command::ManualStep,
    ];

    for seed in 0..8 {
        let mut session = seeded_session(seed);
        let mut last_score = 0;
        for i in 0..2000 {
            if session.is_game_over() {
                break;
            }
            let command = SCRIPT[(i * 5 + usize::from(seed)) % SCRIPT.len()];
            _ = session.apply(command);
            _ = session.tick(FRAME);

            let snapshot = session.snapshot();
            assert_eq!((snapshot.width, snapshot.height), (10, 20));
            assert_eq!(snapshot.score % 100, 0);
            assert!(snapshot.score >= last_score);
            assert_eq!(snapshot.score, snapshot.cleared_lines * 100);
            last_score = snapshot.score;
            if !snapshot.game_over {
                assert_piece_is_legal(&session);
            }
        }
    }
}

#[test]
fn stacking_in_one_column_tops_out_and_restarts() {
    let mut session = seeded_session(42);
    let mut locks = 0;
    loop {
        match session.manual_step() {
            Ok(StepOutcome::Moved) => {}
            Ok(StepOutcome::Locked { .. }) => locks += 1,
            Ok(StepOutcome::ToppedOut { .. }) => break,
            Err(err) => panic!("unexpected error: {err}"),
        }
        assert!(locks < 200, "stack never reached the top");
    }

    assert!(session.is_game_over());
    let board = session.field().board().clone();
    for command in [
        Command::MoveLeft,
        Command::MoveRight,
        Command::Rotate,
        Command::ManualStep,
        Command::SetFastDrop(true),
    ] {
        assert_eq!(session.apply(command), Err(CommandError::GameOver));
    }
    assert_eq!(session.field().board(), &board);

    assert_eq!(session.apply(Command::Restart), Ok(None));
    assert!(!session.is_game_over());
    assert_eq!(session.score(), 0);
    assert!(session.field().board().is_empty());
    assert_eq!(session.snapshot().cells.iter().filter(|&&c| c != 0).count(), 0);
}

#[test]
fn rotation_against_right_wall_succeeds_or_reverts() {
    let mut session = seeded_session(9);
    for _ in 0..20 {
        while session.move_right().is_ok() {}
        let before = session.falling_piece();
        match session.rotate() {
            Ok(()) => {
                let after = session.falling_piece();
                assert_eq!(after.shape(), before.shape().rotated_right());
                assert!(after.x() >= before.x());
            }
            Err(err) => {
                assert!(err.is_piece_collision());
                assert_eq!(session.falling_piece(), before);
            }
        }
        assert_piece_is_legal(&session);
        while session.manual_step().unwrap().is_moved() {}
        if session.is_game_over() {
            break;
        }
    }
}

#[test]
fn gravity_follows_fast_drop_requests() {
    let mut session = seeded_session(1);
    let mut input = InputMapper::new(session.config().touch.clone());
    let start_y = session.falling_piece().y();

    // 31 frames add up to 496ms; the 32nd crosses the 500ms interval.
    let steps = (0..31).filter_map(|_| session.tick(FRAME)).count();
    assert_eq!(steps, 0);
    assert_eq!(session.tick(FRAME), Some(StepOutcome::Moved));
    assert_eq!(session.falling_piece().y(), start_y + 1);

    for command in input.key_down(Key::Down) {
        _ = session.apply(command);
    }
    assert_eq!(session.falling_piece().y(), start_y + 2);
    // 4 frames = 64ms > 50ms
    let steps = (0..4).filter_map(|_| session.tick(FRAME)).count();
    assert_eq!(steps, 1);

    for command in input.key_up(Key::Down) {
        _ = session.apply(command);
    }
    assert!(!session.scheduler().is_fast_drop());
}

fn send(session: &mut GameSession, commands: Commands) {
    for command in commands {
        _ = session.apply(command);
    }
}

#[test]
fn touch_gestures_drive_the_session() {
    let mut session = seeded_session(5);
    let mut input = InputMapper::default();
    let x = session.falling_piece().x();
    let ms = Duration::from_millis;

    send(&mut session, input.touch_start(TouchPoint::new(200.0, 300.0), ms(0)));
    send(&mut session, input.touch_move(TouchPoint::new(170.0, 302.0), ms(16)));
    assert_eq!(session.falling_piece().x(), x - 1);
    send(&mut session, input.touch_move(TouchPoint::new(170.0, 340.0), ms(100)));
    assert!(session.scheduler().is_fast_drop());
    send(&mut session, input.touch_end(TouchPoint::new(170.0, 340.0), ms(300)));
    assert!(!session.scheduler().is_fast_drop());

    let before = session.falling_piece();
    send(&mut session, input.touch_start(TouchPoint::new(50.0, 50.0), ms(1000)));
    send(&mut session, input.touch_end(TouchPoint::new(51.0, 50.0), ms(1100)));
    let after = session.falling_piece();
    assert_eq!(after.shape(), before.shape().rotated_right());
}

#[test]
fn custom_board_size_is_respected() {
    let config = EngineConfig {
        board_width: 6,
        board_height: 8,
        spawn_column: 1,
        ..EngineConfig::default()
    };
    let mut session = GameSession::with_config(config, Some(PieceSeed::from_bytes([2; 16]))).unwrap();
    assert_eq!(session.falling_piece().x(), 1);
    while session.manual_step().unwrap().is_moved() {}

    let snapshot = session.snapshot();
    assert_eq!((snapshot.width, snapshot.height), (6, 8));
    assert_eq!(snapshot.cells.len(), 48);
    assert_eq!(snapshot.cells.iter().filter(|&&c| c != 0).count(), 4);

    session.restart();
    assert_eq!(session.field().board(), &Board::new(6, 8));
    assert_eq!(
        session.falling_piece(),
        ActivePiece::spawn(session.falling_piece().kind(), 1)
    );
}
