//! Move validation for match-3 boards.
//!
//! A move is a swap of two orthogonally adjacent cells; it is *valid* when the
//! grid contains at least one match after the swap. A grid without any valid
//! move is *deadlocked* and has to be reshuffled.
//!
//! Two interchangeable [`MoveFinder`] implementations are provided:
//!
//! - [`ExhaustiveFinder`]: clones the grid for every trial swap and runs full
//!   match detection. Simple and obviously correct; used as the test oracle.
//! - [`LocalFinder`]: evaluates each swap through a swapped view of the grid,
//!   inspecting only the runs that pass through the two exchanged cells.
//!
//! # Examples
//!
//! ```
//! use gemfall_core::Grid;
//! use gemfall_solver::{LocalFinder, MoveFinder};
//!
//! let grid: Grid = "
//!     ABCD
//!     CDAB
//!     ABCD
//!     CDAB
//! "
//! .parse()?;
//! let finder = LocalFinder::new();
//! assert!(!finder.has_valid_move(&grid)); // deadlocked
//! # Ok::<(), gemfall_core::GridParseError>(())
//! ```

pub use self::{
    exhaustive::ExhaustiveFinder,
    finder::{BoxedMoveFinder, MoveFinder, candidate_swaps},
    local::LocalFinder,
};

mod exhaustive;
mod finder;
mod local;
