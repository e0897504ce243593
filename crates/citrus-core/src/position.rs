use derive_more::Display;

/// A cell position on a square board, in row-major order.
///
/// Positions are board-size independent; [`Board`] methods convert between
/// positions and linear indices and check bounds.
///
/// [`Board`]: crate::Board
///
/// # Example
///
/// ```
/// use citrus_core::Position;
///
/// let a = Position::new(2, 3);
/// let b = Position::new(2, 4);
/// assert!(a.is_adjacent(b));
/// assert!(!a.is_adjacent(Position::new(3, 4)));
/// ```
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[display("({row}, {col})")]
pub struct Position {
    /// Row index, 0 at the top.
    pub row: usize,
    /// Column index, 0 at the left.
    pub col: usize,
}

impl Position {
    /// Creates a position from row and column indices.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Returns true if `other` shares an edge with this position.
    ///
    /// Adjacency is orthogonal only (Manhattan distance exactly 1);
    /// diagonal neighbors are not adjacent, and a position is not
    /// adjacent to itself. The relation is symmetric.
    #[must_use]
    pub const fn is_adjacent(self, other: Self) -> bool {
        let dr = self.row.abs_diff(other.row);
        let dc = self.col.abs_diff(other.col);
        (dr == 1 && dc == 0) || (dr == 0 && dc == 1)
    }
}
