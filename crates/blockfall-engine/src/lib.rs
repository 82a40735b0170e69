//! Falling-block puzzle engine.
//!
//! The crate is split in three layers:
//!
//! - [`core`] - board grid, piece catalog, shape matrices and the collision resolver
//! - [`engine`] - the lock & clear pipeline, drop scheduling and the session state machine
//! - [`input`] - translation of key presses and touch gestures into engine commands
//!
//! The engine is driven entirely from the outside: hosts call
//! [`GameSession::tick`] once per frame with the elapsed time, forward input through
//! [`InputMapper`], and read a [`GameSnapshot`] to draw.

pub use self::{core::*, engine::*, input::*};

pub mod core;
pub mod engine;
pub mod input;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("piece colliding with the board or its walls")]
pub struct PieceCollisionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum CompletePieceDropError {
    #[display("new piece collides at spawn position")]
    NewPieceCollision,
}

/// Reason a command left the session unchanged.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::IsVariant,
)]
pub enum CommandError {
    #[display("piece cannot move there")]
    PieceCollision(PieceCollisionError),
    #[display("game is over")]
    GameOver,
}

impl From<PieceCollisionError> for CommandError {
    fn from(err: PieceCollisionError) -> Self {
        CommandError::PieceCollision(err)
    }
}

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("board must be at least {min_width}x{min_height}, got {width}x{height}")]
    BoardTooSmall {
        width: usize,
        height: usize,
        min_width: usize,
        min_height: usize,
    },
    #[display("spawn column {column} leaves no room for a piece on a board {width} wide")]
    SpawnColumnOutOfRange { column: i32, width: usize },
    #[display("{name} must be greater than zero")]
    ZeroInterval { name: &'static str },
    #[display("fast drop interval ({fast_ms}ms) must not exceed normal interval ({normal_ms}ms)")]
    FastSlowerThanNormal { fast_ms: u64, normal_ms: u64 },
    #[display("touch distance threshold must be positive, got {_0}")]
    InvalidTouchDistance(#[error(not(source))] f32),
}
