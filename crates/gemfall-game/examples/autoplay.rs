//! Example that plays a seeded game by always taking the hinted swap.
//!
//! This example shows how to:
//! - Build a `GameConfig`, optionally loaded from a JSON file
//! - Drive a `Session` through `select_cell` and `advance_level`
//! - Read cascade results and the session state after every move
//! - Print a `SessionSnapshot` as JSON
//!
//! # Usage
//!
//! ```sh
//! cargo run --example autoplay
//! ```
//!
//! Replay the same game from a phrase, and show engine logs:
//!
//! ```sh
//! RUST_LOG=debug cargo run --example autoplay -- --phrase "lucky" --levels 3
//! ```
//!
//! Load the configuration from a file and dump the final state:
//!
//! ```sh
//! cargo run --example autoplay -- --config config.json --snapshot
//! ```

use std::{error::Error, fs, path::PathBuf};

use clap::Parser;
use gemfall_game::{GameConfig, GamePhase, SelectOutcome, Session};
use gemfall_generator::BoardSeed;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Seed as 64 hex digits.
    #[arg(long, value_name = "HEX", conflicts_with = "phrase")]
    seed: Option<BoardSeed>,

    /// Phrase to derive the seed from.
    #[arg(long, value_name = "TEXT")]
    phrase: Option<String>,

    /// JSON file with the game configuration.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Stop after completing this many levels.
    #[arg(long, value_name = "COUNT", default_value_t = 5)]
    levels: u32,

    /// Print every move.
    #[arg(short, long)]
    verbose: bool,

    /// Print the final session snapshot as JSON.
    #[arg(long)]
    snapshot: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    better_panic::install();
    env_logger::init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => serde_json::from_str::<GameConfig>(&fs::read_to_string(path)?)?,
        None => GameConfig::default(),
    };
    let seed = match (args.seed, &args.phrase) {
        (Some(seed), _) => seed,
        (None, Some(phrase)) => BoardSeed::from_phrase(phrase),
        (None, None) => BoardSeed::random(),
    };

    let mut session = Session::with_seed(config, seed)?;
    println!("Seed:");
    println!("  {seed}");
    println!();

    let mut completed = 0;
    loop {
        print_level_start(&session);
        while session.phase().is_playing() {
            let Some(swap) = session.hint() else {
                return Err("playing board has no valid move".into());
            };
            session.select_cell(swap.first())?;
            let outcome = session.select_cell(swap.second())?;
            if args.verbose {
                print_move(&session, &outcome);
            }
        }

        match session.phase() {
            GamePhase::LevelComplete => {
                completed += 1;
                println!(
                    "  complete: {} / {} points, {} moves left",
                    session.score(),
                    session.target_score(),
                    session.moves_remaining()
                );
                if completed >= args.levels {
                    break;
                }
                session.advance_level()?;
            }
            GamePhase::GameOver => {
                println!(
                    "  game over: {} / {} points",
                    session.score(),
                    session.target_score()
                );
                break;
            }
            GamePhase::Playing => unreachable!(),
        }
    }

    println!();
    println!("Result:");
    println!("  levels completed: {completed}");
    println!("  final score: {}", session.score());

    if args.snapshot {
        println!();
        println!("{}", serde_json::to_string_pretty(&session.snapshot())?);
    }
    Ok(())
}

fn print_level_start(session: &Session) {
    println!(
        "Level {} (target {}, {} moves):",
        session.level(),
        session.target_score(),
        session.moves_remaining()
    );
    let alphabet = session.config().alphabet();
    let grid = session.grid();
    for row in 0..grid.rows() {
        let line: String = grid
            .row(row)
            .iter()
            .map(|token| alphabet.symbol(*token))
            .collect();
        println!("  {line}");
    }
}

fn print_move(session: &Session, outcome: &SelectOutcome) {
    let SelectOutcome::Scored(report) = outcome else {
        println!("  {outcome:?}");
        return;
    };
    let chain = session
        .last_cascade()
        .iter()
        .map(|step| step.removed.to_string())
        .collect::<Vec<_>>()
        .join("+");
    println!(
        "  {}: +{} ({chain} tokens){} -> {} ({:.0}%)",
        report.swap,
        report.points,
        if report.reshuffled { ", reshuffled" } else { "" },
        session.score(),
        session.progress() * 100.0
    );
}
