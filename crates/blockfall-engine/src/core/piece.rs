use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

use super::{board::Board, collision::collides, shape::ShapeMatrix};

/// The currently falling piece: a shape matrix placed at a grid offset.
///
/// Pieces are values. Movement and rotation return new `ActivePiece` instances and
/// leave the original untouched, so a rejected move never leaves partial state behind.
///
/// # Coordinate System
///
/// - `x` is the column of the matrix's top-left cell, `y` its row
/// - Rows grow downward; row 0 is the top of the board
/// - Both are signed: cells above the board (negative rows) are legal
///
/// # Example
///
/// ```
/// use blockfall_engine::{ActivePiece, Board, PieceKind};
///
/// let board = Board::new(10, 20);
/// let piece = ActivePiece::spawn(PieceKind::T, 3);
///
/// let moved = piece.left();
/// assert_eq!(moved.x(), 2);
///
/// let rotated = piece.rotated_with_offset_search(&board).unwrap();
/// assert_eq!(rotated.shape(), piece.shape().rotated_right());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActivePiece {
    kind: PieceKind,
    shape: ShapeMatrix,
    x: i32,
    y: i32,
}

impl ActivePiece {
    /// Places the spawn orientation of `kind` at row 0 of the given column.
    #[must_use]
    pub const fn spawn(kind: PieceKind, column: i32) -> Self {
        Self {
            kind,
            shape: kind.spawn_shape(),
            x: column,
            y: 0,
        }
    }

    #[must_use]
    pub const fn with_position(self, x: i32, y: i32) -> Self {
        Self { x, y, ..self }
    }

    #[must_use]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub const fn shape(&self) -> ShapeMatrix {
        self.shape
    }

    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Returns an iterator of occupied board positions `(column, row)`.
    #[expect(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
    pub fn occupied_positions(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape
            .occupied_cells()
            .map(move |(dx, dy)| (self.x + dx as i32, self.y + dy as i32))
    }

    #[must_use]
    pub const fn left(&self) -> Self {
        Self {
            x: self.x - 1,
            ..*self
        }
    }

    #[must_use]
    pub const fn right(&self) -> Self {
        Self {
            x: self.x + 1,
            ..*self
        }
    }

    #[must_use]
    pub const fn down(&self) -> Self {
        Self {
            y: self.y + 1,
            ..*self
        }
    }

    /// Rotates the shape 90° clockwise without any position correction.
    #[must_use]
    pub const fn rotated_right(&self) -> Self {
        Self {
            shape: self.shape.rotated_right(),
            ..*self
        }
    }

    /// Rotates clockwise, shifting right if the rotated piece collides.
    ///
    /// The rotated shape is first tried at the current column, then at column offsets
    /// `+1, +2, ..` up to the side length of the shape *before* rotation. The first
    /// legal placement is returned. `None` means every candidate collided and the
    /// rotation is abandoned; the caller keeps its current piece.
    ///
    /// Only rightward offsets are searched.
    #[must_use]
    pub fn rotated_with_offset_search(&self, board: &Board) -> Option<Self> {
        let rotated = self.rotated_right();
        offset_search(board, rotated, self.shape.side_len())
    }
}

/// Finds the first non-colliding rightward shift of `piece` within `max_offset` columns.
#[expect(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
fn offset_search(board: &Board, piece: ActivePiece, max_offset: usize) -> Option<ActivePiece> {
    (0..=max_offset as i32)
        .map(|offset| ActivePiece {
            x: piece.x + offset,
            ..piece
        })
        .find(|candidate| !collides(board, candidate))
}

/// The seven canonical pieces, in catalog order.
///
/// Each kind carries its spawn shape and a color identifier. Color identifiers are
/// `1..=7` so that `0` stays free to mean an empty cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum PieceKind {
    /// I-piece, the four-in-a-row bar.
    I = 0,
    /// T-piece.
    T = 1,
    /// O-piece, the square.
    O = 2,
    /// L-piece.
    L = 3,
    /// J-piece, mirror of L.
    J = 4,
    /// Z-piece.
    Z = 5,
    /// S-piece, mirror of Z.
    S = 6,
}

impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        PieceKind::ALL[rng.random_range(0..PieceKind::LEN)]
    }
}

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    /// All kinds in catalog order.
    pub const ALL: [Self; Self::LEN] = [
        PieceKind::I,
        PieceKind::T,
        PieceKind::O,
        PieceKind::L,
        PieceKind::J,
        PieceKind::Z,
        PieceKind::S,
    ];

    /// Shape of the piece as it appears when spawned.
    #[must_use]
    pub const fn spawn_shape(self) -> ShapeMatrix {
        SPAWN_SHAPES[self as usize]
    }

    /// Opaque color identifier written into board cells (`1..=7`).
    #[must_use]
    pub const fn color_id(self) -> u8 {
        self as u8 + 1
    }

    /// Looks up a kind by its color identifier.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_color_id(1), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_color_id(0), None);
    /// assert_eq!(PieceKind::from_color_id(8), None);
    /// ```
    #[must_use]
    pub const fn from_color_id(id: u8) -> Option<Self> {
        match id {
            1..=7 => Some(Self::ALL[(id - 1) as usize]),
            _ => None,
        }
    }

    /// Display color name associated with the kind.
    #[must_use]
    pub const fn color_name(self) -> &'static str {
        match self {
            PieceKind::I => "cyan",
            PieceKind::T => "purple",
            PieceKind::O => "yellow",
            PieceKind::L => "orange",
            PieceKind::J => "blue",
            PieceKind::Z => "red",
            PieceKind::S => "green",
        }
    }

    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::T => 'T',
            PieceKind::O => 'O',
            PieceKind::L => 'L',
            PieceKind::J => 'J',
            PieceKind::Z => 'Z',
            PieceKind::S => 'S',
        }
    }

    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(PieceKind::I),
            'T' => Some(PieceKind::T),
            'O' => Some(PieceKind::O),
            'L' => Some(PieceKind::L),
            'J' => Some(PieceKind::J),
            'Z' => Some(PieceKind::Z),
            'S' => Some(PieceKind::S),
            _ => None,
        }
    }
}

const SPAWN_SHAPES: [ShapeMatrix; PieceKind::LEN] = [
    // I-piece
    ShapeMatrix::from_rows([[1, 1, 1, 1]]),
    // T-piece
    ShapeMatrix::from_rows([[0, 1, 0], [1, 1, 1]]),
    // O-piece
    ShapeMatrix::from_rows([[1, 1], [1, 1]]),
    // L-piece
    ShapeMatrix::from_rows([[1, 0, 0], [1, 1, 1]]),
    // J-piece
    ShapeMatrix::from_rows([[0, 0, 1], [1, 1, 1]]),
    // Z-piece
    ShapeMatrix::from_rows([[1, 1, 0], [0, 1, 1]]),
    // S-piece
    ShapeMatrix::from_rows([[0, 1, 1], [1, 1, 0]]),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::board::Block;

    #[test]
    fn test_catalog_color_ids_are_distinct() {
        let mut ids: Vec<_> = PieceKind::ALL.iter().map(|k| k.color_id()).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6, 7]);
        for kind in PieceKind::ALL {
            assert_eq!(PieceKind::from_color_id(kind.color_id()), Some(kind));
        }
    }

    #[test]
    fn test_every_spawn_shape_has_four_cells() {
        for kind in PieceKind::ALL {
            assert_eq!(kind.spawn_shape().occupied_cells().count(), 4, "{kind:?}");
        }
    }

    #[test]
    fn test_piece_kind_char_conversion() {
        for kind in PieceKind::ALL {
            assert_eq!(PieceKind::from_char(kind.as_char()), Some(kind));
        }
        assert_eq!(PieceKind::from_char('X'), None);
        assert_eq!(PieceKind::from_char('i'), None);
    }

    #[test]
    fn test_piece_kind_color_names() {
        let names = PieceKind::ALL.map(PieceKind::color_name);
        assert_eq!(
            names,
            ["cyan", "purple", "yellow", "orange", "blue", "red", "green"]
        );
    }

    #[test]
    fn test_moves_do_not_touch_original() {
        let piece = ActivePiece::spawn(PieceKind::L, 3);
        let moved = piece.left().right().down();
        assert_eq!(piece.x(), 3);
        assert_eq!(piece.y(), 0);
        assert_eq!((moved.x(), moved.y()), (3, 1));
    }

    #[test]
    fn test_occupied_positions_follow_offset() {
        let piece = ActivePiece::spawn(PieceKind::T, 3).with_position(4, 7);
        let mut cells: Vec<_> = piece.occupied_positions().collect();
        cells.sort_unstable();
        assert_eq!(cells, vec![(4, 8), (5, 7), (5, 8), (6, 8)]);
    }

    #[test]
    fn test_rotation_on_open_board_keeps_column() {
        let board = Board::new(10, 20);
        let piece = ActivePiece::spawn(PieceKind::T, 3).with_position(3, 5);
        let rotated = piece.rotated_with_offset_search(&board).unwrap();
        assert_eq!(rotated.x(), 3);
        assert_eq!(rotated.y(), 5);
        assert_eq!(rotated.shape(), piece.shape().rotated_right());
    }

    #[test]
    fn test_rotation_above_board_top_is_allowed() {
        let board = Board::new(10, 20);
        let piece = ActivePiece::spawn(PieceKind::T, 3).with_position(3, -1);
        let rotated = piece.rotated_with_offset_search(&board).unwrap();
        assert_eq!((rotated.x(), rotated.y()), (3, -1));
        assert!(rotated.occupied_positions().any(|(_, y)| y < 0));
    }

    #[test]
    fn test_rotation_shifts_right_when_blocked() {
        let mut board = Board::new(10, 20);
        // Horizontal L at (3, 5) covers column 3 on rows 5 and 6; rotated it reaches row 7.
        board.set_cell(3, 7, Block::Piece(PieceKind::O));
        let piece = ActivePiece::spawn(PieceKind::L, 0).with_position(3, 5);
        assert!(!collides(&board, &piece));
        assert!(collides(&board, &piece.rotated_right()));

        let rotated = piece.rotated_with_offset_search(&board).unwrap();
        assert_eq!(rotated.x(), 4);
        assert_eq!(rotated.y(), 5);
        assert!(!collides(&board, &rotated));
    }

    #[test]
    fn test_rotation_search_is_bounded_by_previous_side_len() {
        let mut board = Board::new(10, 20);
        // Horizontal bar has side length 1: only offsets 0 and +1 are probed.
        let piece = ActivePiece::spawn(PieceKind::I, 0).with_position(2, 6);
        board.set_cell(2, 8, Block::Piece(PieceKind::O));
        board.set_cell(3, 8, Block::Piece(PieceKind::O));
        assert!(!collides(&board, &piece));

        // Offset +2 would be legal but lies outside the search window.
        assert!(!collides(&board, &piece.rotated_right().with_position(4, 6)));
        assert_eq!(piece.rotated_with_offset_search(&board), None);
    }

    #[test]
    fn test_rotation_against_right_wall_is_fully_reverted() {
        let board = Board::new(10, 20);
        // Vertical bar flush with the right wall; rotating makes it 4 wide.
        let vertical = ActivePiece::spawn(PieceKind::I, 0)
            .rotated_right()
            .with_position(9, 3);
        assert!(!collides(&board, &vertical));
        // Only rightward offsets are probed, all of them leave the board.
        assert_eq!(vertical.rotated_with_offset_search(&board), None);
    }

    #[test]
    fn test_random_kinds_cover_catalog() {
        use rand::SeedableRng as _;
        let mut rng = rand_pcg::Pcg32::seed_from_u64(7);
        let mut seen = [false; PieceKind::LEN];
        for _ in 0..500 {
            let kind: PieceKind = rng.random();
            seen[kind as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }
}
