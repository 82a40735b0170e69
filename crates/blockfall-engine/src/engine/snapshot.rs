use arrayvec::ArrayVec;
use serde::Serialize;

use crate::core::{ActivePiece, Board, PieceKind};

use super::{GameStats, SessionState};

/// Read-only view of a session, suitable for drawing or sending to a renderer.
///
/// Board cells are stored row-major, top row first, as color identifiers (`0` for an
/// empty cell, `1..=7` for locked cells). The active piece is reported separately and
/// is not merged into `cells`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    pub width: usize,
    pub height: usize,
    pub cells: Vec<u8>,
    pub active: ActiveSnapshot,
    pub score: usize,
    pub cleared_lines: usize,
    pub game_over: bool,
}

/// The falling piece as board positions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub color_id: u8,
    pub color_name: &'static str,
    /// Occupied `(column, row)` positions. Rows may be negative.
    pub cells: ArrayVec<(i32, i32), 4>,
}

impl GameSnapshot {
    pub(crate) fn capture(
        board: &Board,
        piece: &ActivePiece,
        stats: &GameStats,
        state: SessionState,
    ) -> Self {
        Self {
            width: board.width(),
            height: board.height(),
            cells: board.rows().flatten().map(|b| b.color_id()).collect(),
            active: ActiveSnapshot {
                kind: piece.kind(),
                color_id: piece.kind().color_id(),
                color_name: piece.kind().color_name(),
                cells: piece.occupied_positions().collect(),
            },
            score: stats.score(),
            cleared_lines: stats.total_cleared_lines(),
            game_over: state.is_game_over(),
        }
    }

    /// Color identifier of a locked cell, or `None` outside the board.
    #[must_use]
    pub fn cell(&self, x: usize, y: usize) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells.get(y * self.width + x).copied()
    }

    /// Color identifier as it should be drawn: the active piece over the locked cells.
    #[must_use]
    pub fn visible_cell(&self, x: usize, y: usize) -> Option<u8> {
        let locked = self.cell(x, y)?;
        let covered = self
            .active
            .cells
            .iter()
            .any(|&(ax, ay)| usize::try_from(ax) == Ok(x) && usize::try_from(ay) == Ok(y));
        Some(if covered { self.active.color_id } else { locked })
    }

    /// Rows of color identifiers, top first.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.cells.chunks(self.width)
    }
}
