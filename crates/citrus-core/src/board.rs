use std::{fmt, str::FromStr};

use crate::{Cell, CellId, Position, TokenKind, TokenSource};

/// Error raised when constructing a board from external data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum BoardError {
    /// The cell count does not form a square board of the stated size.
    #[display("expected {expected} cells for a {size}x{size} board, got {actual}")]
    NotSquare {
        /// Board size the data claimed.
        size: usize,
        /// Expected cell count (`size * size`).
        expected: usize,
        /// Actual cell count supplied.
        actual: usize,
    },
    /// A character in the text format is not a token code or `.`.
    #[display("unknown token code {code:?}")]
    UnknownCode {
        /// The offending character.
        code: char,
    },
    /// The text format rows have differing lengths.
    #[display("ragged rows: row {row} has {len} cells, expected {expected}")]
    RaggedRows {
        /// Index of the offending row.
        row: usize,
        /// Length of the offending row.
        len: usize,
        /// Expected row length.
        expected: usize,
    },
}

/// A square board of candy cells, row-major.
///
/// Boards are immutable value snapshots: every operation ([`swap`],
/// [`clear`], [`apply_gravity_and_refill`]) returns a new board and leaves
/// the receiver untouched. Cell ids stay stable across operations that do not
/// destroy the cell; cleared-and-refilled cells get fresh ids from a counter
/// carried along with each snapshot.
///
/// [`swap`]: Board::swap
/// [`clear`]: Board::clear
/// [`apply_gravity_and_refill`]: Board::apply_gravity_and_refill
///
/// # Example
///
/// ```
/// use citrus_core::Board;
///
/// let board: Board = "\
///     olb\n\
///     msc\n\
///     ols"
///     .parse()
///     .unwrap();
/// assert_eq!(board.size(), 3);
/// assert!(board.find_matches().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
    next_id: u64,
}

impl Board {
    /// Creates a board from a row-major token layout.
    ///
    /// `None` entries are empty cells. Cell ids are assigned in row-major
    /// order starting from zero.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::NotSquare`] if `tokens.len() != size * size`.
    pub fn from_tokens(size: usize, tokens: Vec<Option<TokenKind>>) -> Result<Self, BoardError> {
        let expected = size * size;
        if tokens.len() != expected {
            return Err(BoardError::NotSquare {
                size,
                expected,
                actual: tokens.len(),
            });
        }
        let cells = tokens
            .into_iter()
            .enumerate()
            .map(|(i, token)| Cell {
                id: CellId(i as u64),
                token,
                is_new: false,
            })
            .collect();
        Ok(Self {
            size,
            cells,
            next_id: expected as u64,
        })
    }

    /// Board side length.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Total cell count (`size * size`).
    #[must_use]
    pub const fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns true if the board has no cells (size zero).
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// All cells in row-major order.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Returns true if `pos` lies on the board.
    #[must_use]
    pub const fn contains(&self, pos: Position) -> bool {
        pos.row < self.size && pos.col < self.size
    }

    /// Converts a position to its row-major linear index.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is out of range.
    #[must_use]
    #[inline]
    pub fn index(&self, pos: Position) -> usize {
        assert!(self.contains(pos), "position {pos} out of range");
        pos.row * self.size + pos.col
    }

    /// Converts a row-major linear index back to a position.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not in `[0, size * size)`.
    #[must_use]
    #[inline]
    pub fn position(&self, index: usize) -> Position {
        assert!(index < self.cells.len(), "index {index} out of range");
        Position::new(index / self.size, index % self.size)
    }

    /// Returns the cell at the given position.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is out of range.
    #[must_use]
    pub fn cell(&self, pos: Position) -> &Cell {
        &self.cells[self.index(pos)]
    }

    /// Iterates over all positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        let size = self.size;
        (0..size).flat_map(move |row| (0..size).map(move |col| Position::new(row, col)))
    }

    /// Returns a new board with the contents of two cells exchanged.
    ///
    /// Adjacency is not validated here; the turn controller checks it before
    /// attempting a swap.
    ///
    /// # Panics
    ///
    /// Panics if either position is out of range.
    #[must_use]
    pub fn swap(&self, a: Position, b: Position) -> Self {
        let (ia, ib) = (self.index(a), self.index(b));
        let mut next = self.clone();
        next.cells.swap(ia, ib);
        next
    }

    /// Returns a new board with the given positions emptied.
    ///
    /// Cleared cells keep their id and drop their `is_new` flag; only the
    /// token is removed.
    ///
    /// # Panics
    ///
    /// Panics if any position is out of range.
    #[must_use]
    pub fn clear(&self, positions: impl IntoIterator<Item = Position>) -> Self {
        let mut next = self.clone();
        for pos in positions {
            let i = self.index(pos);
            next.cells[i].token = None;
            next.cells[i].is_new = false;
        }
        next
    }

    /// Applies gravity per column and refills vacated cells from the top.
    ///
    /// Each column independently: surviving cells keep their top-to-bottom
    /// order and compact to the bottom, keeping their ids with `is_new`
    /// cleared; the remaining top cells are filled with tokens drawn from
    /// `source`, with fresh ids and `is_new` set.
    #[must_use]
    pub fn apply_gravity_and_refill(&self, source: &mut impl TokenSource) -> Self {
        let mut next = self.clone();
        for col in 0..self.size {
            let survivors: Vec<Cell> = (0..self.size)
                .filter_map(|row| {
                    let cell = self.cell(Position::new(row, col));
                    (!cell.is_empty()).then_some(*cell)
                })
                .collect();
            let vacant = self.size - survivors.len();

            for row in 0..vacant {
                let i = next.index(Position::new(row, col));
                next.cells[i] = Cell {
                    id: CellId(next.next_id),
                    token: Some(source.next_token()),
                    is_new: true,
                };
                next.next_id += 1;
            }
            for (offset, cell) in survivors.into_iter().enumerate() {
                let i = next.index(Position::new(vacant + offset, col));
                next.cells[i] = Cell {
                    is_new: false,
                    ..cell
                };
            }
        }
        next
    }

    /// Returns true if both boards hold the same tokens in the same cells.
    ///
    /// Ids and `is_new` flags are ignored, so this compares what a player
    /// sees rather than snapshot identity.
    #[must_use]
    pub fn same_tokens(&self, other: &Self) -> bool {
        self.size == other.size
            && self
                .cells
                .iter()
                .zip(&other.cells)
                .all(|(a, b)| a.token == b.token)
    }
}

impl FromStr for Board {
    type Err = BoardError;

    /// Parses the board text format: one character per cell (token codes per
    /// [`TokenKind::code`], `.` for empty), rows separated by whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s.split_whitespace().collect();
        let size = rows.len();
        let mut tokens = Vec::with_capacity(size * size);
        for (row, line) in rows.iter().enumerate() {
            let len = line.chars().count();
            if len != size {
                return Err(BoardError::RaggedRows {
                    row,
                    len,
                    expected: size,
                });
            }
            for code in line.chars() {
                if code == '.' {
                    tokens.push(None);
                } else {
                    let kind =
                        TokenKind::from_code(code).ok_or(BoardError::UnknownCode { code })?;
                    tokens.push(Some(kind));
                }
            }
        }
        Self::from_tokens(size, tokens)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.size {
            if row > 0 {
                writeln!(f)?;
            }
            for col in 0..self.size {
                let cell = self.cell(Position::new(row, col));
                match cell.token {
                    Some(kind) => write!(f, "{}", kind.code())?,
                    None => write!(f, ".")?,
                }
            }
        }
        Ok(())
    }
}
