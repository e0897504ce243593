//! Turn sequencing for the Citrus Crush match-3 engine.
//!
//! [`Game`] owns the session state (board, score, level, move budget,
//! selection, phase) and drives one player action through the swap /
//! revert-or-resolve state machine. The grid algorithms themselves live in
//! `citrus-core` and stay pure; this crate only sequences them and feeds
//! refills from a `citrus-generator` stream.
//!
//! A turn is consumed stage by stage: [`Game::activate`] reports how an
//! activation was interpreted, and [`Game::step`] yields one [`TurnEvent`]
//! per observable stage (tentative swap, clear, settle, revert, level
//! transition) so a presentation layer can animate and pace each one. The
//! engine never blocks or waits; pacing is entirely the caller's business.

pub use self::{
    config::GameConfig,
    event::{Activation, IgnoredReason, TurnEvent},
    game::{Game, GameError},
    phase::TurnPhase,
};

mod config;
mod event;
mod game;
mod phase;
