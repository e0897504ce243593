//! Example demonstrating board generation.
//!
//! This example shows how to:
//! - Create a `BoardGenerator` from an explicit seed or from entropy
//! - Generate match-free boards of a chosen size
//! - Display the board text format and the seed for reproduction
//!
//! # Usage
//!
//! ```sh
//! cargo run --example generate_board
//! ```
//!
//! Reproduce a board by passing its seed:
//!
//! ```sh
//! cargo run --example generate_board -- --seed 4fz19xqkAb3VhG0p
//! ```
//!
//! Generate several boards of a non-default size:
//!
//! ```sh
//! cargo run --example generate_board -- --size 10 --count 3
//! ```

use clap::Parser;
use citrus_generator::BoardGenerator;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Board side length.
    #[arg(long, value_name = "N", default_value_t = 8)]
    size: usize,

    /// Seed string; omit for a random seed.
    #[arg(long, value_name = "SEED")]
    seed: Option<String>,

    /// Number of boards to generate from the same stream.
    #[arg(long, value_name = "COUNT", default_value_t = 1)]
    count: usize,
}

fn main() {
    let args = Args::parse();
    let mut generator = match args.seed {
        Some(seed) => BoardGenerator::from_seed(seed),
        None => BoardGenerator::new(),
    };

    println!("Seed:");
    println!("  {}", generator.seed());

    for i in 0..args.count {
        let board = generator.generate(args.size);
        assert!(board.find_matches().is_empty());
        println!();
        println!("Board {}:", i + 1);
        for line in board.to_string().lines() {
            println!("  {line}");
        }
    }
}
