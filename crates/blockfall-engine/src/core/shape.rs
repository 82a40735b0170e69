use serde::{Serialize, Serializer};

/// Largest extent of a shape matrix along either axis.
pub const MAX_SHAPE_SIZE: usize = 4;

/// Immutable occupancy matrix of a piece.
///
/// A matrix is `rows × cols` (both at most [`MAX_SHAPE_SIZE`]). Cell `(row, col)` is
/// relative to the top-left corner of the piece. Rotation never mutates a matrix; it
/// returns a new one, possibly with swapped dimensions.
///
/// # Example
///
/// ```
/// use blockfall_engine::ShapeMatrix;
///
/// let t = ShapeMatrix::from_rows([[0, 1, 0], [1, 1, 1]]);
/// let rotated = t.rotated_right();
///
/// assert_eq!((rotated.rows(), rotated.cols()), (3, 2));
/// assert_eq!(t.rotated_right().rotated_right().rotated_right().rotated_right(), t);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeMatrix {
    rows: u8,
    cols: u8,
    cells: [[bool; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl ShapeMatrix {
    /// Builds a matrix from rows of `0`/`1` values.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero or exceeds [`MAX_SHAPE_SIZE`].
    #[must_use]
    #[expect(clippy::cast_possible_truncation)]
    pub const fn from_rows<const R: usize, const C: usize>(rows: [[u8; C]; R]) -> Self {
        assert!(R > 0 && R <= MAX_SHAPE_SIZE);
        assert!(C > 0 && C <= MAX_SHAPE_SIZE);
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        let mut r = 0;
        while r < R {
            let mut c = 0;
            while c < C {
                cells[r][c] = rows[r][c] != 0;
                c += 1;
            }
            r += 1;
        }
        Self {
            rows: R as u8,
            cols: C as u8,
            cells,
        }
    }

    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows as usize
    }

    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols as usize
    }

    /// Extent used to bound the rotation offset search.
    ///
    /// This is the row count of the matrix, which for the square shapes is also the
    /// column count.
    #[must_use]
    pub const fn side_len(&self) -> usize {
        self.rows()
    }

    #[must_use]
    pub const fn is_occupied(&self, row: usize, col: usize) -> bool {
        row < self.rows() && col < self.cols() && self.cells[row][col]
    }

    /// Returns an iterator of occupied cells as `(dx, dy)` offsets from the top-left corner.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells[..self.rows()]
            .iter()
            .enumerate()
            .flat_map(move |(dy, row)| {
                row[..self.cols()]
                    .iter()
                    .enumerate()
                    .filter_map(move |(dx, &cell)| cell.then_some((dx, dy)))
            })
    }

    /// Returns the matrix rotated 90° clockwise.
    ///
    /// For an `R × C` input the result is `C × R` with `new[c][R - 1 - r] = old[r][c]`.
    #[must_use]
    pub const fn rotated_right(&self) -> Self {
        let rows = self.rows as usize;
        let cols = self.cols as usize;
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        let mut r = 0;
        while r < rows {
            let mut c = 0;
            while c < cols {
                cells[c][rows - 1 - r] = self.cells[r][c];
                c += 1;
            }
            r += 1;
        }
        Self {
            rows: self.cols,
            cols: self.rows,
            cells,
        }
    }
}

impl Serialize for ShapeMatrix {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Format: rows of 0/1 separated by '/' (e.g. "010/111")
        let mut s = String::with_capacity(self.rows() * (self.cols() + 1));
        for (r, row) in self.cells[..self.rows()].iter().enumerate() {
            if r > 0 {
                s.push('/');
            }
            s.extend(row[..self.cols()].iter().map(|&c| if c { '1' } else { '0' }));
        }
        serializer.serialize_str(&s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows_dimensions() {
        let bar = ShapeMatrix::from_rows([[1, 1, 1, 1]]);
        assert_eq!(bar.rows(), 1);
        assert_eq!(bar.cols(), 4);
        assert_eq!(bar.side_len(), 1);
        assert_eq!(bar.occupied_cells().count(), 4);
    }

    #[test]
    fn test_rotate_bar_becomes_vertical() {
        let bar = ShapeMatrix::from_rows([[1, 1, 1, 1]]);
        let vertical = bar.rotated_right();
        assert_eq!((vertical.rows(), vertical.cols()), (4, 1));
        for row in 0..4 {
            assert!(vertical.is_occupied(row, 0));
        }
    }

    #[test]
    fn test_rotate_l_clockwise() {
        // 100      11
        // 111  ->  10
        //          10
        let l = ShapeMatrix::from_rows([[1, 0, 0], [1, 1, 1]]);
        let expected = ShapeMatrix::from_rows([[1, 1], [1, 0], [1, 0]]);
        assert_eq!(l.rotated_right(), expected);
    }

    #[test]
    fn test_four_rotations_restore_original() {
        let shapes = [
            ShapeMatrix::from_rows([[1, 1, 1, 1]]),
            ShapeMatrix::from_rows([[0, 1, 0], [1, 1, 1]]),
            ShapeMatrix::from_rows([[1, 1], [1, 1]]),
            ShapeMatrix::from_rows([[0, 0, 1], [1, 1, 1]]),
            ShapeMatrix::from_rows([[0, 1, 1], [1, 1, 0]]),
        ];
        for shape in shapes {
            let mut rotated = shape;
            for _ in 0..4 {
                rotated = rotated.rotated_right();
            }
            assert_eq!(rotated, shape);
        }
    }

    #[test]
    fn test_is_occupied_out_of_range() {
        let square = ShapeMatrix::from_rows([[1, 1], [1, 1]]);
        assert!(square.is_occupied(1, 1));
        assert!(!square.is_occupied(2, 0));
        assert!(!square.is_occupied(0, 2));
    }

    #[test]
    fn test_serialize_rows() {
        let t = ShapeMatrix::from_rows([[0, 1, 0], [1, 1, 1]]);
        assert_eq!(serde_json::to_string(&t).unwrap(), "\"010/111\"");
    }
}
