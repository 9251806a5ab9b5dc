//! Random board generation for match-3 games.
//!
//! [`BoardGenerator`] fills a grid with uniformly random tokens and rejects
//! deadlocked results, so every board it returns has at least one valid swap.
//! Generation is reproducible: each board is derived from a [`BoardSeed`],
//! which can be shared as 64 hex digits or derived from a phrase.
//!
//! # Examples
//!
//! ```
//! use gemfall_core::Alphabet;
//! use gemfall_generator::BoardGenerator;
//!
//! let generator = BoardGenerator::new(8, 8, Alphabet::reference());
//! let board = generator.generate()?;
//! println!("seed: {}", board.seed);
//! println!("{}", board.grid);
//! # Ok::<(), gemfall_generator::GenerationError>(())
//! ```

pub use self::{
    generator::{
        BoardGenerator, DEFAULT_MAX_ATTEMPTS, GeneratedBoard, GenerationError, fill_random,
        random_token,
    },
    seed::{BoardSeed, SeedParseError},
};

mod generator;
mod seed;
