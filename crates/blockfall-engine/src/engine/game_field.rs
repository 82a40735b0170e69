use crate::{
    CompletePieceDropError, PieceCollisionError,
    core::{ActivePiece, Board},
};

use super::piece_generator::PieceGenerator;

/// Board plus the piece currently falling on it.
///
/// The field enforces the collision contract: every `try_*` method either moves the
/// falling piece to a legal placement or leaves it untouched and returns an error.
#[derive(Debug, Clone)]
pub struct GameField {
    board: Board,
    falling_piece: ActivePiece,
    generator: PieceGenerator,
    spawn_column: i32,
}

impl GameField {
    /// Creates a field over `board` and spawns the first piece.
    ///
    /// The first piece is placed even if it collides with `board`; callers preparing a
    /// position can check [`Self::is_falling_piece_colliding`].
    #[must_use]
    pub fn new(board: Board, spawn_column: i32, mut generator: PieceGenerator) -> Self {
        let falling_piece = ActivePiece::spawn(generator.next_kind(), spawn_column);
        Self {
            board,
            falling_piece,
            generator,
            spawn_column,
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn falling_piece(&self) -> ActivePiece {
        self.falling_piece
    }

    #[must_use]
    pub fn spawn_column(&self) -> i32 {
        self.spawn_column
    }

    #[must_use]
    pub fn is_falling_piece_colliding(&self) -> bool {
        self.board.is_colliding(&self.falling_piece)
    }

    pub fn set_falling_piece(&mut self, piece: ActivePiece) -> Result<(), PieceCollisionError> {
        if self.board.is_colliding(&piece) {
            return Err(PieceCollisionError);
        }
        self.falling_piece = piece;
        Ok(())
    }

    pub fn try_move_left(&mut self) -> Result<(), PieceCollisionError> {
        self.set_falling_piece(self.falling_piece.left())
    }

    pub fn try_move_right(&mut self) -> Result<(), PieceCollisionError> {
        self.set_falling_piece(self.falling_piece.right())
    }

    pub fn try_move_down(&mut self) -> Result<(), PieceCollisionError> {
        self.set_falling_piece(self.falling_piece.down())
    }

    pub fn try_rotate(&mut self) -> Result<(), PieceCollisionError> {
        let piece = self
            .falling_piece
            .rotated_with_offset_search(&self.board)
            .ok_or(PieceCollisionError)?;
        self.falling_piece = piece;
        Ok(())
    }

    /// Locks the falling piece, clears full rows and spawns the next piece.
    ///
    /// Returns the number of rows cleared. The new piece is installed even when it
    /// collides at the spawn position; that case is reported as
    /// [`CompletePieceDropError::NewPieceCollision`].
    pub fn complete_piece_drop(&mut self) -> (usize, Result<(), CompletePieceDropError>) {
        self.board.merge(&self.falling_piece);
        let cleared_lines = self.board.clear_full_rows();

        self.falling_piece = ActivePiece::spawn(self.generator.next_kind(), self.spawn_column);
        if self.is_falling_piece_colliding() {
            return (
                cleared_lines,
                Err(CompletePieceDropError::NewPieceCollision),
            );
        }

        (cleared_lines, Ok(()))
    }

    /// Empties the board and spawns a fresh piece. Board dimensions are kept.
    pub fn reset(&mut self) {
        self.board = Board::new(self.board.width(), self.board.height());
        self.falling_piece = ActivePiece::spawn(self.generator.next_kind(), self.spawn_column);
    }
}
