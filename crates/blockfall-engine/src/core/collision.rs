use super::{board::Board, piece::ActivePiece};

/// Decides whether `piece` overlaps the board's walls, floor or locked cells.
///
/// A piece collides when any of its occupied cells
///
/// - has a column below 0 or at/after the board width,
/// - has a row at/after the board height, or
/// - lands on a non-empty cell of the board.
///
/// Rows above the top of the board are never out of bounds on their own, so pieces
/// may poke out of the top while spawning or rotating.
///
/// # Example
///
/// ```
/// use blockfall_engine::{ActivePiece, Board, PieceKind, collides};
///
/// let board = Board::new(10, 20);
/// let piece = ActivePiece::spawn(PieceKind::O, 0);
///
/// assert!(!collides(&board, &piece));
/// assert!(collides(&board, &piece.left()));
/// assert!(!collides(&board, &piece.with_position(0, -1)));
/// ```
#[must_use]
pub fn collides(board: &Board, piece: &ActivePiece) -> bool {
    piece.occupied_positions().any(|(x, y)| {
        let Ok(col) = usize::try_from(x) else {
            return true;
        };
        if col >= board.width() {
            return true;
        }
        let Ok(row) = usize::try_from(y) else {
            // Above the top edge.
            return false;
        };
        row >= board.height() || board.cell(x, y).is_some_and(|b| !b.is_empty())
    })
}

impl Board {
    /// Shorthand for [`collides`] with this board.
    #[must_use]
    pub fn is_colliding(&self, piece: &ActivePiece) -> bool {
        collides(self, piece)
    }
}
