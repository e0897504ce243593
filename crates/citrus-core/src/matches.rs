use std::collections::BTreeSet;

use crate::{Board, Position, TokenKind};

/// One contiguous same-kind run of length >= 3, the unit of scoring.
///
/// A cell at the intersection of a horizontal and a vertical run belongs to
/// two groups; both score independently, while [`Matches::positions`]
/// deduplicates for clearing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchGroup {
    positions: Vec<Position>,
}

impl MatchGroup {
    /// Ordered positions of the run (left-to-right or top-to-bottom).
    #[must_use]
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    /// Run length. Always at least 3.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Always false; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Points awarded for this group.
    ///
    /// Base points by length (3 -> 30, 4 -> 60, 5 -> 100, 6+ -> 150) plus a
    /// bonus of 5 points per token beyond the third. The bonus stacks on top
    /// of the flat 6+ base.
    #[must_use]
    pub fn score(&self) -> u32 {
        let len = self.len();
        let base = match len {
            0..=2 => 0,
            3 => 30,
            4 => 60,
            5 => 100,
            _ => 150,
        };
        let bonus = 5 * u32::try_from(len.saturating_sub(3)).unwrap_or(u32::MAX);
        base + bonus
    }
}

/// Result of one match-detection pass over a board.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Matches {
    positions: BTreeSet<Position>,
    groups: Vec<MatchGroup>,
}

impl Matches {
    /// Deduplicated union of all matched positions, for clearing.
    #[must_use]
    pub const fn positions(&self) -> &BTreeSet<Position> {
        &self.positions
    }

    /// All runs found, horizontal scans first, for scoring.
    #[must_use]
    pub fn groups(&self) -> &[MatchGroup] {
        &self.groups
    }

    /// Returns true if the pass found no run of length >= 3.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total points for this pass: the sum over all groups, overlapping
    /// groups counted independently.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.groups.iter().map(MatchGroup::score).sum()
    }

    fn push_run(&mut self, run: Vec<Position>) {
        if run.len() >= 3 {
            self.positions.extend(run.iter().copied());
            self.groups.push(MatchGroup { positions: run });
        }
    }
}

impl Board {
    /// Scans every row and column for runs of three or more equal tokens.
    ///
    /// Empty cells break runs and are never matched. The scan is a single
    /// deterministic pass per line; a cell can appear in at most one
    /// horizontal and one vertical group.
    ///
    /// # Example
    ///
    /// ```
    /// use citrus_core::Board;
    ///
    /// let board: Board = "\
    ///     ooo\n\
    ///     lms\n\
    ///     sml"
    ///     .parse()
    ///     .unwrap();
    /// let matches = board.find_matches();
    /// assert_eq!(matches.groups().len(), 1);
    /// assert_eq!(matches.groups()[0].len(), 3);
    /// assert_eq!(matches.score(), 30);
    /// ```
    #[must_use]
    pub fn find_matches(&self) -> Matches {
        let size = self.size();
        let mut matches = Matches::default();

        for row in 0..size {
            self.scan_line(&mut matches, (0..size).map(|col| Position::new(row, col)));
        }
        for col in 0..size {
            self.scan_line(&mut matches, (0..size).map(|row| Position::new(row, col)));
        }

        matches
    }

    /// Advances through one row or column, collecting maximal runs.
    fn scan_line(&self, matches: &mut Matches, line: impl Iterator<Item = Position>) {
        let mut run: Vec<Position> = Vec::new();
        let mut run_kind: Option<TokenKind> = None;

        for pos in line {
            let kind = self.cell(pos).token();
            if kind.is_some() && kind == run_kind {
                run.push(pos);
                continue;
            }
            matches.push_run(std::mem::take(&mut run));
            run_kind = kind;
            if kind.is_some() {
                run.push(pos);
            }
        }
        matches.push_run(run);
    }

    /// Returns true if swapping the two cells would create any match.
    ///
    /// # Panics
    ///
    /// Panics if either position is out of range.
    #[must_use]
    pub fn would_swap_create_match(&self, a: Position, b: Position) -> bool {
        !self.swap(a, b).find_matches().is_empty()
    }
}
