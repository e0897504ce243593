use derive_more::Display;

use crate::TokenKind;

/// Stable identity of a cell, for identity-based animation.
///
/// Ids survive every operation that does not destroy the cell: a token that
/// falls under gravity keeps its id, while a cleared-and-refilled cell gets a
/// fresh one. Ids are allocated per board from a monotonic counter.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[display("#{_0}")]
pub struct CellId(pub(crate) u64);

impl CellId {
    /// Raw id value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

/// One board cell: a stable id, an optional token, and a spawn flag.
///
/// `token == None` marks an empty cell (mid-cascade only; settled boards are
/// always full). `is_new` is set on freshly spawned cells for one snapshot so
/// a presentation layer can animate them dropping in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub(crate) id: CellId,
    pub(crate) token: Option<TokenKind>,
    pub(crate) is_new: bool,
}

impl Cell {
    /// Stable identity of this cell.
    #[must_use]
    pub const fn id(&self) -> CellId {
        self.id
    }

    /// Token occupying this cell, or `None` if the cell is empty.
    #[must_use]
    pub const fn token(&self) -> Option<TokenKind> {
        self.token
    }

    /// Returns true if the cell holds no token.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.token.is_none()
    }

    /// Returns true if the cell was spawned by the most recent refill.
    #[must_use]
    pub const fn is_new(&self) -> bool {
        self.is_new
    }
}
