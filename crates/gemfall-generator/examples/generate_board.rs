//! Example demonstrating match-3 board generation.
//!
//! This example shows how to:
//! - Create a `BoardGenerator` for a given board size and alphabet
//! - Generate a board from a random seed, a hex seed or a phrase
//! - Display the board, its seed and the valid moves it offers
//! - Sample many boards in parallel to measure how often generation retries
//!
//! # Usage
//!
//! ```sh
//! cargo run --example generate_board
//! ```
//!
//! Reproduce a board from a seed or a phrase:
//!
//! ```sh
//! cargo run --example generate_board -- --seed 1234567890abcdef1234567890abcdef1234567890abcdef1234567890abcdef
//! cargo run --example generate_board -- --phrase "daily challenge"
//! ```
//!
//! Change the board shape and the number of token kinds:
//!
//! ```sh
//! cargo run --example generate_board -- --rows 6 --cols 10 --kinds 7
//! ```
//!
//! Sample boards and print retry statistics instead of a single board:
//!
//! ```sh
//! cargo run --example generate_board -- --samples 10000
//! ```

use std::{num::NonZero, process};

use clap::Parser;
use gemfall_core::Alphabet;
use gemfall_generator::{BoardGenerator, BoardSeed, GeneratedBoard};
use gemfall_solver::MoveFinder as _;
use rayon::prelude::*;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Seed as 64 hex digits.
    #[arg(long, value_name = "HEX", conflicts_with = "phrase")]
    seed: Option<BoardSeed>,

    /// Phrase to derive the seed from.
    #[arg(long, value_name = "TEXT")]
    phrase: Option<String>,

    /// Board height.
    #[arg(long, default_value_t = 8)]
    rows: usize,

    /// Board width.
    #[arg(long, default_value_t = 8)]
    cols: usize,

    /// Number of token kinds; the reference symbols are used for six.
    #[arg(long, value_name = "COUNT", default_value_t = 6)]
    kinds: usize,

    /// Maximum attempts per board.
    #[arg(long, value_name = "COUNT", default_value_t = 1000)]
    max_attempts: usize,

    /// Number of boards to sample for statistics.
    #[arg(long, value_name = "COUNT")]
    samples: Option<usize>,
}

fn main() {
    let args = Args::parse();

    if args.rows == 0 || args.cols == 0 {
        eprintln!("--rows and --cols must be at least 1.");
        process::exit(1);
    }
    let Some(max_attempts) = NonZero::new(args.max_attempts) else {
        eprintln!("--max-attempts must be at least 1.");
        process::exit(1);
    };
    let alphabet = if args.kinds == Alphabet::REFERENCE_SYMBOLS.len() {
        Alphabet::reference()
    } else {
        Alphabet::letters(args.kinds).unwrap_or_else(|err| {
            eprintln!("Invalid --kinds: {err}");
            process::exit(2);
        })
    };
    let generator =
        BoardGenerator::new(args.rows, args.cols, alphabet).with_max_attempts(max_attempts);

    if let Some(samples) = args.samples {
        print_stats(&generator, samples);
        return;
    }

    let seed = match (args.seed, &args.phrase) {
        (Some(seed), _) => seed,
        (None, Some(phrase)) => BoardSeed::from_phrase(phrase),
        (None, None) => BoardSeed::random(),
    };
    match generator.generate_with_seed(seed) {
        Ok(board) => print_board(&generator, &board),
        Err(err) => {
            eprintln!("{err}");
            process::exit(1);
        }
    }
}

fn print_board(generator: &BoardGenerator, board: &GeneratedBoard) {
    println!("Seed:");
    println!("  {}", board.seed);
    println!();

    println!("Board:");
    for row in 0..board.grid.rows() {
        let line: String = board
            .grid
            .row(row)
            .iter()
            .map(|token| generator.alphabet().symbol(*token))
            .collect();
        println!("  {line}");
    }
    println!();

    let moves = generator.finder().valid_moves(&board.grid);
    println!("Stats:");
    println!("  attempts: {}", board.attempts);
    println!("  valid moves: {}", moves.len());
    for swap in moves {
        println!("    {swap}");
    }
}

fn print_stats(generator: &BoardGenerator, samples: usize) {
    if samples == 0 {
        eprintln!("--samples must be at least 1.");
        process::exit(1);
    }

    let results = (0..samples)
        .into_par_iter()
        .map(|_| generator.generate().map(|board| board.attempts))
        .collect::<Vec<_>>();
    let attempts = results
        .iter()
        .filter_map(|result| result.as_ref().ok().copied())
        .collect::<Vec<_>>();
    let exhausted = results.len() - attempts.len();

    println!("Samples: {samples}");
    println!("  exhausted: {exhausted}");
    if attempts.is_empty() {
        return;
    }
    let total: usize = attempts.iter().sum();
    let retried = attempts.iter().filter(|&&n| n > 1).count();
    #[expect(clippy::cast_precision_loss)]
    let mean = total as f64 / attempts.len() as f64;
    println!("  mean attempts: {mean:.3}");
    println!("  max attempts: {}", attempts.iter().max().copied().unwrap_or(0));
    println!("  boards needing a retry: {retried}");
}
