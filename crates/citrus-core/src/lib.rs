//! Core grid engine for the Citrus Crush match-3 game.
//!
//! This crate holds the pure board algorithms: token kinds, cells with stable
//! ids, square board snapshots, adjacency, swapping, match detection,
//! clearing, gravity/refill, and scoring. Everything operates
//! snapshot-in/snapshot-out; nothing here is random or stateful. Randomness
//! enters through the [`TokenSource`] trait, implemented by
//! `citrus-generator`, and turn sequencing lives in `citrus-game`.
//!
//! # Example
//!
//! ```
//! use citrus_core::{Board, Position};
//!
//! let board: Board = "\
//!     ool\n\
//!     lso\n\
//!     sos"
//!     .parse()
//!     .unwrap();
//!
//! // the board is stable until a swap lines up three Oranges
//! assert!(board.find_matches().is_empty());
//! let swapped = board.swap(Position::new(0, 2), Position::new(1, 2));
//! let matches = swapped.find_matches();
//! assert_eq!(matches.groups().len(), 1);
//! assert_eq!(matches.score(), 30);
//! ```

pub use self::{
    board::{Board, BoardError},
    cell::{Cell, CellId},
    matches::{MatchGroup, Matches},
    position::Position,
    token::{TokenKind, TokenSource},
};

mod board;
mod cell;
mod matches;
mod position;
mod token;
