use citrus_core::{Board, Matches, Position};

/// Immediate feedback from [`Game::activate`](crate::Game::activate).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    /// The cell became the current selection.
    Selected {
        /// The newly selected cell.
        pos: Position,
    },
    /// The selected cell was activated again; the selection was cleared.
    SelectionCleared,
    /// The second pick was not adjacent: the selection moved to it and the
    /// presentation should give invalid-move feedback on both cells.
    SelectionMoved {
        /// The previously selected cell.
        from: Position,
        /// The cell that took over the selection.
        to: Position,
    },
    /// An adjacent pair was picked; a turn is now in flight. Drive it with
    /// [`Game::step`](crate::Game::step) or
    /// [`Game::run_turn`](crate::Game::run_turn).
    SwapStarted {
        /// The previously selected cell.
        from: Position,
        /// The adjacent cell it swaps with.
        to: Position,
    },
    /// The activation was not acted on.
    Ignored(IgnoredReason),
}

/// Why an activation was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoredReason {
    /// A turn is in flight; the controller is busy.
    Busy,
    /// The move budget is exhausted; start a new game.
    NoMovesLeft,
}

/// One observable stage of an in-flight turn.
///
/// [`Game::step`](crate::Game::step) yields these in order. Each carries the
/// board snapshot as of that stage so a presentation layer can render and
/// pace every stage independently; the engine never waits.
#[derive(Debug, Clone, PartialEq)]
pub enum TurnEvent {
    /// The tentative swap was applied to the board.
    SwapApplied {
        /// Board after the swap.
        board: Board,
    },
    /// The swap produced no match and was undone. The move budget is
    /// unchanged and the turn is over.
    SwapReverted {
        /// Board after swapping back, token-identical to the pre-turn board.
        board: Board,
    },
    /// One cascade pass found matches and cleared them.
    MatchesCleared {
        /// Board with the matched cells emptied.
        board: Board,
        /// The matches of this pass, grouped for scoring.
        matches: Matches,
        /// Points awarded for this pass.
        points: u32,
    },
    /// Gravity compacted the columns and refill topped them up.
    BoardSettled {
        /// Board after gravity and refill.
        board: Board,
    },
    /// The accumulated score reached the level target.
    LevelCompleted {
        /// The level that was just completed.
        level: u32,
    },
    /// A new level began: score and moves reset, fresh board generated.
    LevelStarted {
        /// The new level number.
        level: u32,
        /// The freshly generated, match-free board.
        board: Board,
    },
    /// The move budget ran out with the level target unmet.
    GameOver,
}
