use citrus_core::{Board, Matches, Position};
use citrus_generator::BoardGenerator;

use crate::{Activation, GameConfig, IgnoredReason, TurnEvent, TurnPhase};

/// Error raised when assembling a game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GameError {
    /// The configured board cannot hold a run of three.
    #[display("board size {size} cannot hold a run of three (minimum 3)")]
    BoardTooSmall {
        /// The rejected board size.
        size: usize,
    },
    /// The configured move budget is zero.
    #[display("initial move budget must be at least 1")]
    NoMoveBudget,
    /// A supplied board does not match the configured size.
    #[display("board is {actual}x{actual} but the config expects {expected}x{expected}")]
    BoardSizeMismatch {
        /// Size the config expects.
        expected: usize,
        /// Size of the supplied board.
        actual: usize,
    },
}

/// A match-3 game session: board, score, level, move budget, and the turn
/// state machine.
///
/// The session is the single mutable root of a running game. All grid work is
/// delegated to the pure `citrus-core` operations; this type sequences them.
/// A player activation goes through [`activate`](Game::activate); when it
/// starts a swap, the resulting turn is driven stage by stage with
/// [`step`](Game::step) (or all at once with [`run_turn`](Game::run_turn)),
/// yielding a [`TurnEvent`] per observable stage for the presentation layer
/// to pace.
///
/// # Example
///
/// ```
/// use citrus_core::{Board, Position};
/// use citrus_game::{Activation, Game, GameConfig, TurnEvent};
/// use citrus_generator::BoardGenerator;
///
/// let board: Board = "\
///     ool\n\
///     lso\n\
///     sos"
///     .parse()
///     .unwrap();
/// let config = GameConfig::default().board_size(3).target_base(10_000);
/// let mut game = Game::with_board(config, BoardGenerator::from_seed("doc"), board).unwrap();
///
/// // select the top-right cell, then the adjacent cell below it
/// game.activate(Position::new(0, 2));
/// let activation = game.activate(Position::new(1, 2));
/// assert!(matches!(activation, Activation::SwapStarted { .. }));
///
/// // the swap lines up three Oranges; the turn costs one move and scores
/// let events = game.run_turn();
/// assert!(matches!(events[0], TurnEvent::SwapApplied { .. }));
/// assert_eq!(game.moves_left(), 19);
/// assert!(game.score() >= 30);
/// assert!(game.board().find_matches().is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct Game {
    config: GameConfig,
    generator: BoardGenerator,
    board: Board,
    score: u32,
    level: u32,
    moves_left: u32,
    selection: Option<Position>,
    phase: TurnPhase,
    /// Monotonic id of the most recent player-triggered operation. Stale
    /// in-flight turns compare against it and abandon themselves.
    op_counter: u64,
    turn: Option<PendingTurn>,
}

#[derive(Debug, Clone)]
struct PendingTurn {
    token: u64,
    stage: Stage,
}

/// Suspension points of an in-flight turn. Each [`Game::step`] call resumes
/// at the stored stage, emits at most one event, and parks at the next stage.
#[derive(Debug, Clone, Copy)]
enum Stage {
    TentativeSwap { from: Position, to: Position },
    Evaluate { from: Position, to: Position },
    Settle,
    Detect,
    Conclude,
    NextLevel,
}

impl Game {
    /// Creates a session with a freshly generated board.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::BoardTooSmall`] or [`GameError::NoMoveBudget`] if
    /// the config cannot produce a playable game.
    pub fn new(config: GameConfig, mut generator: BoardGenerator) -> Result<Self, GameError> {
        Self::validate(&config)?;
        let board = generator.generate(config.board_size);
        Ok(Self::assemble(config, generator, board))
    }

    /// Creates a session over a supplied board, e.g. a crafted scenario.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::BoardSizeMismatch`] if the board does not match
    /// `config.board_size`, and the same config errors as [`Game::new`].
    pub fn with_board(
        config: GameConfig,
        generator: BoardGenerator,
        board: Board,
    ) -> Result<Self, GameError> {
        Self::validate(&config)?;
        if board.size() != config.board_size {
            return Err(GameError::BoardSizeMismatch {
                expected: config.board_size,
                actual: board.size(),
            });
        }
        Ok(Self::assemble(config, generator, board))
    }

    fn validate(config: &GameConfig) -> Result<(), GameError> {
        if config.board_size < 3 {
            return Err(GameError::BoardTooSmall {
                size: config.board_size,
            });
        }
        if config.initial_moves == 0 {
            return Err(GameError::NoMoveBudget);
        }
        Ok(())
    }

    fn assemble(config: GameConfig, generator: BoardGenerator, board: Board) -> Self {
        Self {
            moves_left: config.initial_moves,
            config,
            generator,
            board,
            score: 0,
            level: 1,
            selection: None,
            phase: TurnPhase::Idle,
            op_counter: 0,
            turn: None,
        }
    }

    /// Current board snapshot.
    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Score accumulated in the current level.
    #[must_use]
    pub const fn score(&self) -> u32 {
        self.score
    }

    /// Current level, starting at 1.
    #[must_use]
    pub const fn level(&self) -> u32 {
        self.level
    }

    /// Moves remaining in the current level. Never negative; 0 means game
    /// over once the board settles.
    #[must_use]
    pub const fn moves_left(&self) -> u32 {
        self.moves_left
    }

    /// Score required to complete the current level.
    #[must_use]
    pub fn target_score(&self) -> u32 {
        self.config.target_score(self.level)
    }

    /// Currently selected cell, if any.
    #[must_use]
    pub const fn selection(&self) -> Option<Position> {
        self.selection
    }

    /// Current phase of the turn state machine.
    #[must_use]
    pub const fn phase(&self) -> TurnPhase {
        self.phase
    }

    /// The session config.
    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Seed of the generator driving this session's boards and refills.
    #[must_use]
    pub fn seed(&self) -> &str {
        self.generator.seed()
    }

    /// Handles a player activating a cell.
    ///
    /// Resting states select, deselect, move the selection, or start a swap
    /// per the returned [`Activation`]; busy phases and an exhausted move
    /// budget ignore the activation.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is not on the board. Activations come from the
    /// presentation layer's own grid, so an out-of-range position is a
    /// caller bug, not a player action.
    pub fn activate(&mut self, pos: Position) -> Activation {
        assert!(self.board.contains(pos), "position {pos} out of range");

        if self.phase.is_busy() {
            log::debug!("activate {pos}: ignored, controller busy ({:?})", self.phase);
            return Activation::Ignored(IgnoredReason::Busy);
        }
        if self.moves_left == 0 {
            log::debug!("activate {pos}: ignored, no moves left");
            return Activation::Ignored(IgnoredReason::NoMovesLeft);
        }

        match self.selection.take() {
            None => {
                self.selection = Some(pos);
                self.phase = TurnPhase::CellSelected;
                log::debug!("select first {pos}");
                Activation::Selected { pos }
            }
            Some(prev) if prev == pos => {
                self.phase = TurnPhase::Idle;
                log::debug!("select clear {pos}");
                Activation::SelectionCleared
            }
            Some(prev) if !prev.is_adjacent(pos) => {
                self.selection = Some(pos);
                log::debug!("select non-adjacent {prev} -> {pos}");
                Activation::SelectionMoved {
                    from: prev,
                    to: pos,
                }
            }
            Some(prev) => {
                self.op_counter += 1;
                self.phase = TurnPhase::AnimatingSwap;
                self.turn = Some(PendingTurn {
                    token: self.op_counter,
                    stage: Stage::TentativeSwap {
                        from: prev,
                        to: pos,
                    },
                });
                log::debug!("swap tentative {prev} <-> {pos} (op {})", self.op_counter);
                Activation::SwapStarted {
                    from: prev,
                    to: pos,
                }
            }
        }
    }

    /// Advances the in-flight turn by one observable stage.
    ///
    /// Returns the next [`TurnEvent`], or `None` once the turn has run its
    /// course (or if no turn is in flight). Between calls the session parks
    /// in the corresponding busy [`TurnPhase`], so a presentation layer can
    /// render the event's board snapshot and pace the animation before
    /// resuming.
    ///
    /// If a newer operation has superseded the in-flight turn (a stale
    /// token), the turn abandons itself without touching the session.
    pub fn step(&mut self) -> Option<TurnEvent> {
        let token = self.turn.as_ref()?.token;
        if token != self.op_counter {
            log::debug!(
                "abandoning stale turn (op {token} superseded by {})",
                self.op_counter
            );
            self.turn = None;
            return None;
        }

        loop {
            let stage = self.turn.as_ref()?.stage;
            match stage {
                Stage::TentativeSwap { from, to } => {
                    self.board = self.board.swap(from, to);
                    self.set_stage(Stage::Evaluate { from, to });
                    return Some(TurnEvent::SwapApplied {
                        board: self.board.clone(),
                    });
                }
                Stage::Evaluate { from, to } => {
                    let matches = self.board.find_matches();
                    log::debug!("match check: {} group(s)", matches.groups().len());
                    if matches.is_empty() {
                        // no match: swap back, move budget untouched
                        self.board = self.board.swap(from, to);
                        self.phase = TurnPhase::AnimatingRevert;
                        self.set_stage(Stage::Conclude);
                        log::debug!("swap revert {from} <-> {to}");
                        return Some(TurnEvent::SwapReverted {
                            board: self.board.clone(),
                        });
                    }
                    self.moves_left = self.moves_left.saturating_sub(1);
                    self.phase = TurnPhase::ResolvingCascade;
                    return Some(self.clear_pass(&matches));
                }
                Stage::Settle => {
                    self.board = self.board.apply_gravity_and_refill(&mut self.generator);
                    self.set_stage(Stage::Detect);
                    return Some(TurnEvent::BoardSettled {
                        board: self.board.clone(),
                    });
                }
                Stage::Detect => {
                    let matches = self.board.find_matches();
                    if matches.is_empty() {
                        // cascade settled; nothing to show for this check
                        self.set_stage(Stage::Conclude);
                        continue;
                    }
                    return Some(self.clear_pass(&matches));
                }
                Stage::Conclude => {
                    // level check runs once per settled turn, not mid-cascade
                    if self.score >= self.target_score() {
                        self.phase = TurnPhase::LevelTransition;
                        self.set_stage(Stage::NextLevel);
                        log::debug!("level {} complete (score {})", self.level, self.score);
                        return Some(TurnEvent::LevelCompleted { level: self.level });
                    }
                    self.turn = None;
                    if self.moves_left == 0 {
                        self.phase = TurnPhase::GameOver;
                        log::debug!("game over");
                        return Some(TurnEvent::GameOver);
                    }
                    self.phase = TurnPhase::Idle;
                    return None;
                }
                Stage::NextLevel => {
                    self.turn = None;
                    self.op_counter += 1;
                    self.level += 1;
                    self.score = 0;
                    self.moves_left = self.config.initial_moves;
                    self.board = self.generator.generate(self.config.board_size);
                    self.phase = TurnPhase::Idle;
                    log::debug!("level {} started", self.level);
                    return Some(TurnEvent::LevelStarted {
                        level: self.level,
                        board: self.board.clone(),
                    });
                }
            }
        }
    }

    /// Runs the in-flight turn to completion, collecting every stage event.
    pub fn run_turn(&mut self) -> Vec<TurnEvent> {
        let mut events = Vec::new();
        while let Some(event) = self.step() {
            events.push(event);
        }
        events
    }

    /// Starts a new game: level 1, fresh budget and board, score zero.
    ///
    /// Any in-flight turn is superseded; a stale [`step`](Game::step) after
    /// this is a no-op.
    pub fn reset(&mut self) {
        self.op_counter += 1;
        self.turn = None;
        self.selection = None;
        self.score = 0;
        self.level = 1;
        self.moves_left = self.config.initial_moves;
        self.board = self.generator.generate(self.config.board_size);
        self.phase = TurnPhase::Idle;
        log::debug!("new game (seed {})", self.generator.seed());
    }

    /// One-line status for a presentation layer to display.
    #[must_use]
    pub fn status_line(&self) -> &'static str {
        if self.moves_left == 0 && !self.phase.is_busy() {
            "No moves left. Start a new game."
        } else if self.phase.is_busy() {
            "Resolving matches..."
        } else if self.score >= self.target_score() {
            "Level complete!"
        } else {
            "Select a candy, then select an adjacent candy to swap."
        }
    }

    fn set_stage(&mut self, stage: Stage) {
        if let Some(turn) = &mut self.turn {
            turn.stage = stage;
        }
    }

    /// Clears one detection pass and accumulates its score.
    fn clear_pass(&mut self, matches: &Matches) -> TurnEvent {
        let points = matches.score();
        self.score += points;
        self.board = self.board.clear(matches.positions().iter().copied());
        self.set_stage(Stage::Settle);
        log::debug!(
            "cleared {} cell(s) for {points} point(s), score {}",
            matches.positions().len(),
            self.score
        );
        TurnEvent::MatchesCleared {
            board: self.board.clone(),
            matches: matches.clone(),
            points,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 3x3 board where swapping (0,2) and (1,2) lines up three Oranges on
    /// row 0, and no match exists beforehand.
    fn scorable_board() -> Board {
        "ool\nlso\nsos".parse().expect("valid board text")
    }

    /// 3x3 board with no match and where (0,1) <-> (0,2) creates none.
    fn quiet_board() -> Board {
        "ool\nlls\nsos".parse().expect("valid board text")
    }

    fn game_with(config: GameConfig, board: Board) -> Game {
        Game::with_board(config, BoardGenerator::from_seed("test"), board)
            .expect("valid session config")
    }

    fn small_config() -> GameConfig {
        // target high enough that cascades never complete the level
        GameConfig::default().board_size(3).target_base(100_000)
    }

    #[test]
    fn test_new_validates_config() {
        let generator = BoardGenerator::from_seed("cfg");
        assert!(matches!(
            Game::new(GameConfig::default().board_size(2), generator.clone()),
            Err(GameError::BoardTooSmall { size: 2 })
        ));
        assert!(matches!(
            Game::new(GameConfig::default().initial_moves(0), generator.clone()),
            Err(GameError::NoMoveBudget)
        ));
        let game = Game::new(GameConfig::default(), generator).unwrap();
        assert_eq!(game.level(), 1);
        assert_eq!(game.moves_left(), 20);
        assert_eq!(game.target_score(), 400);
        assert!(game.board().find_matches().is_empty());
    }

    #[test]
    fn test_with_board_checks_size() {
        assert!(matches!(
            Game::with_board(
                GameConfig::default(),
                BoardGenerator::from_seed("cfg"),
                quiet_board(),
            ),
            Err(GameError::BoardSizeMismatch {
                expected: 8,
                actual: 3
            })
        ));
    }

    #[test]
    fn test_selection_lifecycle() {
        let mut game = game_with(small_config(), quiet_board());
        let a = Position::new(0, 0);
        let b = Position::new(2, 2);

        assert_eq!(game.activate(a), Activation::Selected { pos: a });
        assert_eq!(game.phase(), TurnPhase::CellSelected);
        assert_eq!(game.selection(), Some(a));

        // reselecting the same cell clears
        assert_eq!(game.activate(a), Activation::SelectionCleared);
        assert_eq!(game.phase(), TurnPhase::Idle);
        assert_eq!(game.selection(), None);

        // a non-adjacent second pick moves the selection
        game.activate(a);
        assert_eq!(
            game.activate(b),
            Activation::SelectionMoved { from: a, to: b }
        );
        assert_eq!(game.selection(), Some(b));
        assert_eq!(game.phase(), TurnPhase::CellSelected);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_activate_out_of_range_panics() {
        let mut game = game_with(small_config(), quiet_board());
        let _ = game.activate(Position::new(3, 0));
    }

    #[test]
    fn test_no_match_swap_reverts_without_spending_a_move() {
        let mut game = game_with(small_config(), quiet_board());
        let original = game.board().clone();

        game.activate(Position::new(0, 1));
        let activation = game.activate(Position::new(0, 2));
        assert!(matches!(activation, Activation::SwapStarted { .. }));
        assert_eq!(game.phase(), TurnPhase::AnimatingSwap);
        assert_eq!(game.selection(), None);

        let events = game.run_turn();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], TurnEvent::SwapApplied { .. }));
        assert!(matches!(events[1], TurnEvent::SwapReverted { .. }));

        assert_eq!(game.moves_left(), 20);
        assert_eq!(game.score(), 0);
        assert_eq!(game.phase(), TurnPhase::Idle);
        assert!(game.board().same_tokens(&original));
    }

    #[test]
    fn test_revert_is_a_paced_stage() {
        let mut game = game_with(small_config(), quiet_board());
        game.activate(Position::new(0, 1));
        game.activate(Position::new(0, 2));

        assert!(matches!(game.step(), Some(TurnEvent::SwapApplied { .. })));
        assert_eq!(game.phase(), TurnPhase::AnimatingSwap);

        assert!(matches!(game.step(), Some(TurnEvent::SwapReverted { .. })));
        assert_eq!(game.phase(), TurnPhase::AnimatingRevert);

        assert_eq!(game.step(), None);
        assert_eq!(game.phase(), TurnPhase::Idle);
    }

    #[test]
    fn test_scoring_swap_cascades_to_stability() {
        let mut game = game_with(small_config(), scorable_board());

        game.activate(Position::new(0, 2));
        game.activate(Position::new(1, 2));
        let events = game.run_turn();

        assert!(matches!(events[0], TurnEvent::SwapApplied { .. }));
        assert!(matches!(
            events[1],
            TurnEvent::MatchesCleared { points, .. } if points >= 30
        ));
        assert!(matches!(events[2], TurnEvent::BoardSettled { .. }));
        // clear and settle alternate for the rest of the cascade
        for pair in events[1..].chunks(2) {
            assert!(matches!(pair[0], TurnEvent::MatchesCleared { .. }));
            if let Some(event) = pair.get(1) {
                assert!(matches!(event, TurnEvent::BoardSettled { .. }));
            }
        }

        assert_eq!(game.moves_left(), 19);
        assert!(game.score() >= 30);
        assert_eq!(game.phase(), TurnPhase::Idle);
        assert!(game.board().find_matches().is_empty());
        assert!(game.board().cells().iter().all(|cell| !cell.is_empty()));
    }

    #[test]
    fn test_cleared_snapshot_precedes_settled_snapshot() {
        let mut game = game_with(small_config(), scorable_board());
        game.activate(Position::new(0, 2));
        game.activate(Position::new(1, 2));

        let _ = game.step(); // swap
        let cleared = game.step();
        let Some(TurnEvent::MatchesCleared { board, matches, .. }) = cleared else {
            panic!("expected a clear stage, got {cleared:?}");
        };
        assert_eq!(game.phase(), TurnPhase::ResolvingCascade);
        for &pos in matches.positions() {
            assert!(board.cell(pos).is_empty());
        }

        let Some(TurnEvent::BoardSettled { board }) = game.step() else {
            panic!("expected a settle stage");
        };
        assert!(board.cells().iter().all(|cell| !cell.is_empty()));
        assert!(board.cells().iter().any(citrus_core::Cell::is_new));
    }

    #[test]
    fn test_level_transition_resets_session() {
        // any scoring swap reaches the level target
        let config = small_config().target_base(30);
        let mut game = game_with(config, scorable_board());

        game.activate(Position::new(0, 2));
        game.activate(Position::new(1, 2));
        let events = game.run_turn();

        assert!(
            events
                .iter()
                .any(|event| matches!(event, TurnEvent::LevelCompleted { level: 1 }))
        );
        let started = events.iter().find_map(|event| match event {
            TurnEvent::LevelStarted { level, board } => Some((*level, board)),
            _ => None,
        });
        let (level, board) = started.expect("level 2 should start");
        assert_eq!(level, 2);
        assert!(board.find_matches().is_empty());

        assert_eq!(game.level(), 2);
        assert_eq!(game.score(), 0);
        assert_eq!(game.moves_left(), 20);
        assert_eq!(game.target_score(), 30 + 250);
        assert_eq!(game.phase(), TurnPhase::Idle);
    }

    #[test]
    fn test_level_transition_is_a_paced_stage() {
        let config = small_config().target_base(30);
        let mut game = game_with(config, scorable_board());
        game.activate(Position::new(0, 2));
        game.activate(Position::new(1, 2));

        let mut saw_completed = false;
        while let Some(event) = game.step() {
            if matches!(event, TurnEvent::LevelCompleted { .. }) {
                saw_completed = true;
                // parked for the celebration pause
                assert_eq!(game.phase(), TurnPhase::LevelTransition);
                assert_eq!(game.level(), 1);
            }
        }
        assert!(saw_completed);
        assert_eq!(game.level(), 2);
    }

    #[test]
    fn test_game_over_blocks_activations_until_reset() {
        let config = small_config().initial_moves(1);
        let mut game = game_with(config, scorable_board());

        game.activate(Position::new(0, 2));
        game.activate(Position::new(1, 2));
        let events = game.run_turn();

        assert_eq!(events.last(), Some(&TurnEvent::GameOver));
        assert_eq!(game.moves_left(), 0);
        assert_eq!(game.phase(), TurnPhase::GameOver);
        assert_eq!(game.status_line(), "No moves left. Start a new game.");

        assert_eq!(
            game.activate(Position::new(0, 0)),
            Activation::Ignored(IgnoredReason::NoMovesLeft)
        );
        assert_eq!(game.selection(), None);

        game.reset();
        assert_eq!(game.phase(), TurnPhase::Idle);
        assert_eq!(game.level(), 1);
        assert_eq!(game.moves_left(), 1);
        assert!(game.board().find_matches().is_empty());
        assert!(matches!(
            game.activate(Position::new(0, 0)),
            Activation::Selected { .. }
        ));
    }

    #[test]
    fn test_activations_ignored_while_busy() {
        let mut game = game_with(small_config(), scorable_board());
        game.activate(Position::new(0, 2));
        game.activate(Position::new(1, 2));

        assert_eq!(game.phase(), TurnPhase::AnimatingSwap);
        assert_eq!(
            game.activate(Position::new(0, 0)),
            Activation::Ignored(IgnoredReason::Busy)
        );

        let _ = game.step();
        let _ = game.step();
        assert_eq!(game.phase(), TurnPhase::ResolvingCascade);
        assert_eq!(
            game.activate(Position::new(0, 0)),
            Activation::Ignored(IgnoredReason::Busy)
        );
        assert_eq!(game.status_line(), "Resolving matches...");
    }

    #[test]
    fn test_reset_supersedes_in_flight_turn() {
        let mut game = game_with(small_config(), scorable_board());
        game.activate(Position::new(0, 2));
        game.activate(Position::new(1, 2));

        let _ = game.step(); // swap applied
        let _ = game.step(); // first clear
        game.reset();

        let fresh = game.board().clone();
        assert_eq!(game.step(), None);
        assert_eq!(game.board(), &fresh);
        assert_eq!(game.score(), 0);
        assert_eq!(game.phase(), TurnPhase::Idle);
    }

    #[test]
    fn test_stale_op_token_abandons_turn() {
        let mut game = game_with(small_config(), scorable_board());
        game.activate(Position::new(0, 2));
        game.activate(Position::new(1, 2));
        let _ = game.step();

        // simulate an incorrectly double-dispatched newer operation
        game.op_counter += 1;
        let before = game.board().clone();
        assert_eq!(game.step(), None);
        assert_eq!(game.board(), &before);
        assert!(game.turn.is_none());
    }

    #[test]
    fn test_status_line_states() {
        let mut game = game_with(small_config(), quiet_board());
        assert_eq!(
            game.status_line(),
            "Select a candy, then select an adjacent candy to swap."
        );

        game.score = game.target_score();
        assert_eq!(game.status_line(), "Level complete!");
    }
}
