//! Game rules built on top of the [`core`](crate::core) data structures.
//!
//! - [`GameField`] - board, falling piece and piece generator
//! - [`GameSession`] - command surface, drop timing and the `Playing`/`GameOver` state machine
//! - [`GameStats`] - score and lock counters
//! - [`DropScheduler`] - elapsed-time accumulator choosing when gravity applies
//! - [`PieceGenerator`] / [`PieceSeed`] - uniform random piece kinds
//! - [`EngineConfig`] - board size, spawn column, intervals and touch thresholds
//! - [`GameSnapshot`] - serializable read-only view for rendering
//!
//! # Game Flow
//!
//! 1. Create a [`GameSession`]; the first piece spawns at the top of the board
//! 2. The host calls [`GameSession::tick`] every frame and forwards player commands
//! 3. When the piece cannot move down it is locked, full rows are cleared and scored
//! 4. A new piece spawns; if it collides the session switches to game over
//! 5. [`GameSession::restart`] starts a new game on an empty board
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//!
//! use blockfall_engine::{GameSession, StepOutcome};
//!
//! let mut session = GameSession::new();
//!
//! _ = session.move_left();
//! _ = session.rotate();
//!
//! // Gravity applies once the normal interval has been exceeded.
//! assert_eq!(session.tick(Duration::from_millis(400)), None);
//! assert_eq!(session.tick(Duration::from_millis(200)), Some(StepOutcome::Moved));
//!
//! let snapshot = session.snapshot();
//! assert_eq!(snapshot.score, 0);
//! assert!(!snapshot.game_over);
//! ```

pub use self::{
    config::*, drop_scheduler::*, game_field::*, game_session::*, game_stats::*,
    piece_generator::*, snapshot::*,
};

mod config;
mod drop_scheduler;
mod game_field;
mod game_session;
mod game_stats;
mod piece_generator;
mod snapshot;
