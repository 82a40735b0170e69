use serde::{Deserialize, Serialize};

use super::piece::{ActivePiece, PieceKind};

/// A single cell of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub enum Block {
    /// Empty cell (no piece).
    #[default]
    Empty,
    /// Locked cell of a specific piece type.
    Piece(PieceKind),
}

impl Block {
    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Block::Empty)
    }

    /// Color identifier of the cell; `0` for an empty cell.
    #[must_use]
    pub const fn color_id(self) -> u8 {
        match self {
            Block::Empty => 0,
            Block::Piece(kind) => kind.color_id(),
        }
    }
}

/// A single row of the board.
#[derive(Debug, Clone, PartialEq, Eq)]
struct BlockRow {
    cells: Vec<Block>,
}

impl BlockRow {
    fn empty(width: usize) -> Self {
        Self {
            cells: vec![Block::Empty; width],
        }
    }

    fn is_filled(&self) -> bool {
        self.cells.iter().all(|b| !b.is_empty())
    }

    fn clear(&mut self) {
        self.cells.fill(Block::Empty);
    }
}

/// Grid of locked cells.
///
/// The board is `width × height` and never changes size after construction. Row 0 is
/// the top; rows grow downward. Only the lock pipeline writes to the board, through
/// [`Board::merge`] and [`Board::clear_full_rows`].
///
/// # Example
///
/// ```
/// use blockfall_engine::{ActivePiece, Block, Board, PieceKind};
///
/// let mut board = Board::new(4, 4);
/// let bar = ActivePiece::spawn(PieceKind::I, 0).with_position(0, 3);
///
/// board.merge(&bar);
/// assert!(board.is_row_full(3));
/// assert_eq!(board.clear_full_rows(), 1);
/// assert!(board.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    rows: Vec<BlockRow>,
}

impl Board {
    /// Default number of columns.
    pub const DEFAULT_WIDTH: usize = 10;
    /// Default number of rows.
    pub const DEFAULT_HEIGHT: usize = 20;

    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            rows: vec![BlockRow::empty(width); height],
        }
    }

    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Returns the cell at `(x, y)`, or `None` if the position lies outside the grid.
    #[must_use]
    pub fn cell(&self, x: i32, y: i32) -> Option<Block> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        self.rows.get(y)?.cells.get(x).copied()
    }

    /// Overwrites a single cell.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` lies outside the grid.
    pub fn set_cell(&mut self, x: usize, y: usize, block: Block) {
        self.rows[y].cells[x] = block;
    }

    /// Returns an iterator over the rows, top first.
    pub fn rows(&self) -> impl Iterator<Item = &[Block]> {
        self.rows.iter().map(|row| row.cells.as_slice())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.iter().flat_map(|row| &row.cells).all(|b| b.is_empty())
    }

    /// Checks whether every cell of the row is occupied.
    ///
    /// Rows outside the grid are never full.
    #[must_use]
    pub fn is_row_full(&self, row: usize) -> bool {
        self.rows.get(row).is_some_and(BlockRow::is_filled)
    }

    /// Writes the piece's kind into every cell the piece occupies.
    ///
    /// The caller must have checked that the piece does not collide; overlapping cells
    /// are silently overwritten. Cells above the top of the board are dropped.
    pub fn merge(&mut self, piece: &ActivePiece) {
        let block = Block::Piece(piece.kind());
        for (x, y) in piece.occupied_positions() {
            let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) else {
                continue;
            };
            if let Some(cell) = self.rows.get_mut(y).and_then(|row| row.cells.get_mut(x)) {
                *cell = block;
            }
        }
    }

    /// Removes every full row and returns how many were removed.
    ///
    /// Rows are scanned bottom to top. Remaining rows keep their relative order and
    /// slide down; the same number of empty rows appear at the top. Full rows that are
    /// not adjacent are all removed in the same pass.
    pub fn clear_full_rows(&mut self) -> usize {
        let mut count = 0;
        for y in (0..self.height).rev() {
            if self.rows[y].is_filled() {
                count += 1;
                continue;
            }
            if count > 0 {
                self.rows.swap(y, y + count);
            }
        }
        for row in &mut self.rows[..count] {
            row.clear();
        }
        count
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(Self::DEFAULT_WIDTH, Self::DEFAULT_HEIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FILL: Block = Block::Piece(PieceKind::Z);

    fn fill_row(board: &mut Board, y: usize) {
        for x in 0..board.width() {
            board.set_cell(x, y, FILL);
        }
    }

    #[test]
    fn test_initial_board_is_empty() {
        let board = Board::default();
        assert_eq!(board.width(), 10);
        assert_eq!(board.height(), 20);
        assert!(board.is_empty());
        assert_eq!(board.rows().count(), 20);
        assert!(board.rows().all(|row| row.len() == 10));
    }

    #[test]
    fn test_cell_out_of_range() {
        let board = Board::new(10, 20);
        assert_eq!(board.cell(0, 0), Some(Block::Empty));
        assert_eq!(board.cell(-1, 0), None);
        assert_eq!(board.cell(0, -1), None);
        assert_eq!(board.cell(10, 0), None);
        assert_eq!(board.cell(0, 20), None);
    }

    #[test]
    fn test_is_row_full() {
        let mut board = Board::new(10, 20);
        for x in 0..9 {
            board.set_cell(x, 19, FILL);
        }
        assert!(!board.is_row_full(19));
        board.set_cell(9, 19, FILL);
        assert!(board.is_row_full(19));
        assert!(!board.is_row_full(20));
    }

    #[test]
    fn test_merge_writes_kind() {
        let mut board = Board::new(10, 20);
        let piece = ActivePiece::spawn(PieceKind::O, 4).with_position(4, 18);
        board.merge(&piece);
        for (x, y) in [(4, 18), (5, 18), (4, 19), (5, 19)] {
            assert_eq!(board.cell(x, y), Some(Block::Piece(PieceKind::O)));
        }
        assert_eq!(board.cell(3, 18), Some(Block::Empty));
        assert_eq!(board.cell(4, 18).map(Block::color_id), Some(3));
    }

    #[test]
    fn test_merge_skips_cells_above_top() {
        let mut board = Board::new(10, 20);
        let piece = ActivePiece::spawn(PieceKind::O, 0).with_position(0, -1);
        board.merge(&piece);
        assert_eq!(board.cell(0, 0), Some(Block::Piece(PieceKind::O)));
        assert_eq!(board.cell(1, 0), Some(Block::Piece(PieceKind::O)));
        assert_eq!(board.rows().flatten().filter(|b| !b.is_empty()).count(), 2);
    }

    #[test]
    fn test_clear_full_rows_none() {
        let mut board = Board::new(10, 20);
        board.set_cell(0, 19, FILL);
        assert_eq!(board.clear_full_rows(), 0);
        assert_eq!(board.cell(0, 19), Some(FILL));
    }

    #[test]
    fn test_clear_full_rows_shifts_remaining_rows_down() {
        let mut board = Board::new(10, 20);
        fill_row(&mut board, 19);
        board.set_cell(3, 18, Block::Piece(PieceKind::T));
        board.set_cell(7, 17, Block::Piece(PieceKind::S));

        assert_eq!(board.clear_full_rows(), 1);
        assert_eq!(board.cell(3, 19), Some(Block::Piece(PieceKind::T)));
        assert_eq!(board.cell(7, 18), Some(Block::Piece(PieceKind::S)));
        assert!(board.rows().take(18).flatten().all(|b| b.is_empty()));
    }

    #[test]
    fn test_clear_full_rows_non_adjacent() {
        // [full, full, empty, full] on a 4-row board.
        let mut board = Board::new(4, 4);
        fill_row(&mut board, 0);
        fill_row(&mut board, 1);
        fill_row(&mut board, 3);

        assert_eq!(board.clear_full_rows(), 3);
        assert!(board.is_empty());
    }

    #[test]
    fn test_clear_full_rows_preserves_order() {
        let mut board = Board::new(3, 5);
        board.set_cell(0, 0, Block::Piece(PieceKind::I));
        fill_row(&mut board, 1);
        board.set_cell(1, 2, Block::Piece(PieceKind::J));
        fill_row(&mut board, 3);
        board.set_cell(2, 4, Block::Piece(PieceKind::L));

        assert_eq!(board.clear_full_rows(), 2);
        assert_eq!(board.cell(0, 2), Some(Block::Piece(PieceKind::I)));
        assert_eq!(board.cell(1, 3), Some(Block::Piece(PieceKind::J)));
        assert_eq!(board.cell(2, 4), Some(Block::Piece(PieceKind::L)));
        assert!(board.rows().take(2).flatten().all(|b| b.is_empty()));
    }

    #[test]
    fn test_clear_all_rows() {
        let mut board = Board::new(10, 20);
        for y in 0..20 {
            fill_row(&mut board, y);
        }
        assert_eq!(board.clear_full_rows(), 20);
        assert!(board.is_empty());
    }
}
