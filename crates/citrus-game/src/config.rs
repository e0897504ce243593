/// Tunable parameters for a game session.
///
/// Fields are public for reading; the builder-style methods of the same name
/// set them. Defaults match the original game: an 8x8 board, 20 moves per
/// level, and a level target of `400 + (level - 1) * 250`.
///
/// # Example
///
/// ```
/// use citrus_game::GameConfig;
///
/// let config = GameConfig::default().board_size(6).initial_moves(10);
/// assert_eq!(config.board_size, 6);
/// assert_eq!(config.target_score(1), 400);
/// assert_eq!(config.target_score(3), 900);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    /// Board side length.
    pub board_size: usize,
    /// Move budget granted at game start and at each new level.
    pub initial_moves: u32,
    /// Target score for level 1.
    pub target_base: u32,
    /// Target score increment per level.
    pub target_step: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: 8,
            initial_moves: 20,
            target_base: 400,
            target_step: 250,
        }
    }
}

impl GameConfig {
    /// Sets the board side length.
    #[must_use]
    pub fn board_size(mut self, board_size: usize) -> Self {
        self.board_size = board_size;
        self
    }

    /// Sets the per-level move budget.
    #[must_use]
    pub fn initial_moves(mut self, initial_moves: u32) -> Self {
        self.initial_moves = initial_moves;
        self
    }

    /// Sets the level 1 target score.
    #[must_use]
    pub fn target_base(mut self, target_base: u32) -> Self {
        self.target_base = target_base;
        self
    }

    /// Sets the target score increment per level.
    #[must_use]
    pub fn target_step(mut self, target_step: u32) -> Self {
        self.target_step = target_step;
        self
    }

    /// Score required to complete the given level (levels start at 1).
    #[must_use]
    pub fn target_score(&self, level: u32) -> u32 {
        self.target_base + level.saturating_sub(1) * self.target_step
    }
}
