use std::fmt::Debug;

use gemfall_core::{Cell, Grid, Swap};

/// A strategy for deciding which adjacent swaps produce a match.
///
/// Implementations must agree on every answer; they differ only in cost.
/// [`ExhaustiveFinder`](crate::ExhaustiveFinder) is the reference
/// implementation the others are tested against.
pub trait MoveFinder: Debug + Send + Sync {
    /// Returns the name of the finder.
    fn name(&self) -> &'static str;

    /// Returns a boxed clone of the finder.
    fn clone_box(&self) -> BoxedMoveFinder;

    /// Returns `true` if performing `swap` on `grid` leaves at least one match.
    fn swap_creates_match(&self, grid: &Grid, swap: Swap) -> bool;

    /// Returns the first swap, in [`candidate_swaps`] order, that produces a match.
    ///
    /// Returns `None` when the grid is deadlocked.
    fn find_move(&self, grid: &Grid) -> Option<Swap> {
        candidate_swaps(grid).find(|swap| self.swap_creates_match(grid, *swap))
    }

    /// Returns `true` if any single adjacent swap produces a match.
    ///
    /// A grid for which this returns `false` is deadlocked.
    fn has_valid_move(&self, grid: &Grid) -> bool {
        self.find_move(grid).is_some()
    }

    /// Returns every swap that produces a match, each unordered pair once, sorted.
    fn valid_moves(&self, grid: &Grid) -> Vec<Swap> {
        let mut moves: Vec<_> = candidate_swaps(grid)
            .filter(|swap| self.swap_creates_match(grid, *swap))
            .collect();
        moves.sort_unstable();
        moves
    }
}

/// A boxed move finder.
pub type BoxedMoveFinder = Box<dyn MoveFinder>;

impl Clone for BoxedMoveFinder {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Iterates over every adjacent pair of `grid` exactly once.
///
/// Cells are visited in row-major order; for each cell the pair with the cell
/// below comes before the pair with the cell to the right.
///
/// # Examples
///
/// ```
/// use gemfall_core::{Grid, Token};
/// use gemfall_solver::candidate_swaps;
///
/// let grid = Grid::filled(8, 8, Token::new(0));
/// // 8 rows x 7 horizontal pairs + 7 x 8 vertical pairs
/// assert_eq!(candidate_swaps(&grid).count(), 112);
/// ```
pub fn candidate_swaps(grid: &Grid) -> impl Iterator<Item = Swap> + use<> {
    let (rows, cols) = (grid.rows(), grid.cols());
    grid.cells().flat_map(move |cell: Cell| {
        [cell.down(rows), cell.right(cols)]
            .into_iter()
            .flatten()
            .filter_map(move |other| Swap::new(cell, other))
    })
}
