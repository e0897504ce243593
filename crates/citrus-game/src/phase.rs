/// Where the turn controller currently is in its state machine.
///
/// `Idle` and `CellSelected` are the two resting states that accept player
/// activations. The animating and resolving phases are the suspension points
/// of an in-flight turn: the controller parks in them between
/// [`Game::step`](crate::Game::step) calls so a presentation layer can pace
/// each stage, and any activation received while in one of them is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum TurnPhase {
    /// Waiting for a first selection.
    Idle,
    /// One cell is selected; waiting for the second pick.
    CellSelected,
    /// A tentative swap was applied and is being shown.
    AnimatingSwap,
    /// A matchless swap is being undone.
    AnimatingRevert,
    /// The cascade loop is clearing, settling, and re-detecting.
    ResolvingCascade,
    /// The level target was reached; the next level is about to start.
    LevelTransition,
    /// The move budget is exhausted; only a new game resets this.
    GameOver,
}

impl TurnPhase {
    /// Returns true while a turn is in flight and activations are ignored.
    #[must_use]
    pub const fn is_busy(self) -> bool {
        matches!(
            self,
            Self::AnimatingSwap
                | Self::AnimatingRevert
                | Self::ResolvingCascade
                | Self::LevelTransition
        )
    }
}
