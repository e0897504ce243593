//! Headless driver that plays the game with a simple greedy policy.
//!
//! This example shows how to:
//! - Build a `Game` session from a seed
//! - Find a valid swap by probing with `would_swap_create_match`
//! - Drive a turn stage by stage and consume `TurnEvent`s
//!
//! Run with debug logging to watch the controller's decisions:
//!
//! ```sh
//! RUST_LOG=debug cargo run --example autoplay -- --seed demo
//! ```

use citrus_core::Position;
use citrus_game::{Activation, Game, GameConfig, TurnEvent};
use citrus_generator::BoardGenerator;
use clap::Parser;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Seed string; omit for a random seed.
    #[arg(long, value_name = "SEED")]
    seed: Option<String>,

    /// Board side length.
    #[arg(long, value_name = "N", default_value_t = 8)]
    size: usize,

    /// Stop after this many levels even if moves remain.
    #[arg(long, value_name = "COUNT", default_value_t = 3)]
    max_levels: u32,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let generator = match args.seed {
        Some(seed) => BoardGenerator::from_seed(seed),
        None => BoardGenerator::new(),
    };
    let config = GameConfig::default().board_size(args.size);
    let mut game = Game::new(config, generator).expect("playable config");

    println!("Seed: {}", game.seed());

    while game.level() <= args.max_levels {
        let Some((from, to)) = first_valid_swap(&game) else {
            println!("No valid swap available; stopping.");
            break;
        };

        assert!(matches!(game.activate(from), Activation::Selected { .. }));
        assert!(matches!(
            game.activate(to),
            Activation::SwapStarted { .. }
        ));

        let mut passes = 0_u32;
        let mut gained = 0_u32;
        let mut game_over = false;
        while let Some(event) = game.step() {
            match event {
                TurnEvent::MatchesCleared { points, .. } => {
                    passes += 1;
                    gained += points;
                }
                TurnEvent::LevelStarted { level, .. } => {
                    println!("=== level {level} ===");
                }
                TurnEvent::GameOver => game_over = true,
                _ => {}
            }
        }

        println!(
            "swap {from} <-> {to}: +{gained} over {passes} pass(es), \
             score {}/{}, moves left {}",
            game.score(),
            game.target_score(),
            game.moves_left()
        );

        if game_over {
            println!("{}", game.status_line());
            break;
        }
    }

    println!("Finished at level {} with score {}.", game.level(), game.score());
}

/// Scans row-major for the first adjacent pair whose swap scores.
fn first_valid_swap(game: &Game) -> Option<(Position, Position)> {
    let board = game.board();
    for pos in board.positions() {
        let right = Position::new(pos.row, pos.col + 1);
        if board.contains(right) && board.would_swap_create_match(pos, right) {
            return Some((pos, right));
        }
        let below = Position::new(pos.row + 1, pos.col);
        if board.contains(below) && board.would_swap_create_match(pos, below) {
            return Some((pos, below));
        }
    }
    None
}
