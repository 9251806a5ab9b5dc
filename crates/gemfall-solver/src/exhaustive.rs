use gemfall_core::{Grid, Swap, find_matches};

use crate::{BoxedMoveFinder, MoveFinder};

const NAME: &str = "exhaustive";

/// The reference move finder.
///
/// For every cell and each of its orthogonal neighbours, clones the grid,
/// performs the swap on the copy and runs full match detection. Costs
/// O((rows·cols)²) per query, which is fine for 8×8 boards and makes it a
/// trustworthy oracle for faster finders.
///
/// # Examples
///
/// ```
/// use gemfall_core::Grid;
/// use gemfall_solver::{ExhaustiveFinder, MoveFinder};
///
/// let grid: Grid = "
///     AAB
///     BCA
///     CBC
/// "
/// .parse()?;
/// let finder = ExhaustiveFinder::new();
/// assert!(finder.has_valid_move(&grid));
/// # Ok::<(), gemfall_core::GridParseError>(())
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct ExhaustiveFinder;

impl ExhaustiveFinder {
    /// Creates a new `ExhaustiveFinder`.
    #[must_use]
    pub const fn new() -> Self {
        ExhaustiveFinder
    }
}

impl MoveFinder for ExhaustiveFinder {
    fn name(&self) -> &'static str {
        NAME
    }

    fn clone_box(&self) -> BoxedMoveFinder {
        Box::new(*self)
    }

    fn swap_creates_match(&self, grid: &Grid, swap: Swap) -> bool {
        let mut trial = grid.clone();
        trial.swap(swap.first(), swap.second());
        !find_matches(&trial).is_empty()
    }

    fn find_move(&self, grid: &Grid) -> Option<Swap> {
        for cell in grid.cells() {
            for neighbor in cell.neighbors(grid.rows(), grid.cols()) {
                let Some(swap) = Swap::new(cell, neighbor) else {
                    continue;
                };
                if self.swap_creates_match(grid, swap) {
                    return Some(swap);
                }
            }
        }
        None
    }
}
