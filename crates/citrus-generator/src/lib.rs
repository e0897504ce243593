//! Randomized board generation for the Citrus Crush match-3 engine.
//!
//! [`BoardGenerator`] owns a seeded PCG-64 stream and provides the two
//! randomized operations the engine needs: generating a fresh board with no
//! pre-existing match, and drawing refill tokens through the
//! [`TokenSource`] trait during cascade resolution.
//!
//! Generators are reproducible: a generator built with
//! [`BoardGenerator::from_seed`] yields the same boards and refill tokens for
//! the same sequence of calls. Seed strings are hashed with SHA-256 to derive
//! the full RNG state.
//!
//! # Example
//!
//! ```
//! use citrus_generator::BoardGenerator;
//!
//! let mut generator = BoardGenerator::from_seed("example");
//! let board = generator.generate(8);
//!
//! // fresh boards never start with a match
//! assert!(board.find_matches().is_empty());
//!
//! // same seed, same board
//! let mut replay = BoardGenerator::from_seed("example");
//! assert_eq!(replay.generate(8), board);
//! ```

use citrus_core::{Board, TokenKind, TokenSource};
use rand::{
    RngExt as _, SeedableRng as _,
    distr::{Alphanumeric, SampleString as _},
};
use rand_pcg::Pcg64;
use sha2::{Digest as _, Sha256};

/// Seeded source of random boards and refill tokens.
///
/// See the [crate docs](crate) for an overview and example.
#[derive(Debug, Clone)]
pub struct BoardGenerator {
    rng: Pcg64,
    seed: String,
}

impl BoardGenerator {
    /// Length of seed strings produced by [`BoardGenerator::new`].
    const SEED_LEN: usize = 16;

    /// Creates a generator with a fresh random seed.
    ///
    /// The chosen seed is available through [`seed`](Self::seed) so a session
    /// can be reproduced later.
    #[must_use]
    pub fn new() -> Self {
        let seed = Alphanumeric.sample_string(&mut rand::rng(), Self::SEED_LEN);
        Self::from_seed(seed)
    }

    /// Creates a generator from an explicit seed string.
    ///
    /// The seed is hashed with SHA-256 to fill the PCG-64 state, so any
    /// string works and equal seeds give equal streams.
    #[must_use]
    pub fn from_seed(seed: impl Into<String>) -> Self {
        let seed = seed.into();
        let digest: [u8; 32] = Sha256::digest(seed.as_bytes()).into();
        Self {
            rng: Pcg64::from_seed(digest),
            seed,
        }
    }

    /// The seed string this generator was built from.
    #[must_use]
    pub fn seed(&self) -> &str {
        &self.seed
    }

    /// Draws one token kind uniformly at random.
    pub fn random_token(&mut self) -> TokenKind {
        TokenKind::ALL[self.rng.random_range(0..TokenKind::ALL.len())]
    }

    /// Generates a `size` x `size` board with no run of three or more.
    ///
    /// Cells are filled row-major; each draw is rejected and redrawn while it
    /// would complete a run with the two cells to its left or the two cells
    /// above, which are the only already-placed neighbors that matter in this
    /// fill order. With six token kinds a valid draw always exists, so the
    /// loop terminates.
    #[expect(clippy::missing_panics_doc)]
    pub fn generate(&mut self, size: usize) -> Board {
        let mut tokens: Vec<Option<TokenKind>> = Vec::with_capacity(size * size);
        for i in 0..size * size {
            let (row, col) = (i / size, i % size);
            let mut kind = self.random_token();
            while completes_run(&tokens, size, row, col, kind) {
                kind = self.random_token();
            }
            tokens.push(Some(kind));
        }
        Board::from_tokens(size, tokens).expect("cell count matches size")
    }
}

impl Default for BoardGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenSource for BoardGenerator {
    fn next_token(&mut self) -> TokenKind {
        self.random_token()
    }
}

/// Returns true if placing `kind` at (`row`, `col`) would complete a run of
/// three with cells already placed to the left or above.
fn completes_run(
    tokens: &[Option<TokenKind>],
    size: usize,
    row: usize,
    col: usize,
    kind: TokenKind,
) -> bool {
    let at = |r: usize, c: usize| tokens[r * size + c];
    let left_pair =
        col >= 2 && at(row, col - 1) == Some(kind) && at(row, col - 2) == Some(kind);
    let upper_pair =
        row >= 2 && at(row - 1, col) == Some(kind) && at(row - 2, col) == Some(kind);
    left_pair || upper_pair
}
