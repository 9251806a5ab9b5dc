//! Core data structures for match-3 boards.
//!
//! This crate provides the board-level building blocks shared by move
//! validation, board generation and game session management:
//!
//! - [`token`]: [`Token`] values and the [`Alphabet`] they are drawn from
//! - [`cell`]: [`Cell`] coordinates and adjacent [`Swap`]s
//! - [`grid`]: the [`Grid`] container, its text format and gravity refill
//! - [`matches`]: the [`MatchSet`] type and [`find_matches`] detector
//!
//! # Examples
//!
//! ```
//! use gemfall_core::{Cell, Grid, find_matches};
//!
//! let mut grid: Grid = "
//!     AABC
//!     CCAB
//!     BBCA
//! "
//! .parse()?;
//! assert!(find_matches(&grid).is_empty());
//!
//! grid.swap(Cell::new(0, 2), Cell::new(1, 2));
//! assert_eq!(find_matches(&grid).len(), 3);
//! # Ok::<(), gemfall_core::GridParseError>(())
//! ```

pub mod cell;
pub mod grid;
pub mod matches;
pub mod token;

pub use self::{
    cell::{Cell, Swap},
    grid::{Grid, GridParseError},
    matches::{MIN_RUN, MatchSet, find_matches, has_match},
    token::{Alphabet, AlphabetError, Token},
};
