use gemfall_core::{Cell, Grid, MIN_RUN, Swap, Token};

use crate::{BoxedMoveFinder, MoveFinder, candidate_swaps};

const NAME: &str = "local";

/// A move finder that inspects only the lines a swap can affect.
///
/// Instead of cloning the grid, a swap is evaluated through a swapped view:
/// only the row and column runs passing through the two exchanged cells are
/// measured. Runs that already exist elsewhere on the board (which a settled
/// board never has) are accounted for separately, so the answers are identical
/// to [`ExhaustiveFinder`](crate::ExhaustiveFinder).
///
/// # Examples
///
/// ```
/// use gemfall_core::Grid;
/// use gemfall_solver::{ExhaustiveFinder, LocalFinder, MoveFinder};
///
/// let grid: Grid = "
///     ABA
///     CAC
///     BCB
/// "
/// .parse()?;
/// let local = LocalFinder::new();
/// assert_eq!(local.find_move(&grid), ExhaustiveFinder::new().find_move(&grid));
/// # Ok::<(), gemfall_core::GridParseError>(())
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFinder;

impl LocalFinder {
    /// Creates a new `LocalFinder`.
    #[must_use]
    pub const fn new() -> Self {
        LocalFinder
    }
}

impl MoveFinder for LocalFinder {
    fn name(&self) -> &'static str {
        NAME
    }

    fn clone_box(&self) -> BoxedMoveFinder {
        Box::new(*self)
    }

    fn swap_creates_match(&self, grid: &Grid, swap: Swap) -> bool {
        SwapProbe::new(grid).creates_match(swap)
    }

    fn find_move(&self, grid: &Grid) -> Option<Swap> {
        let probe = SwapProbe::new(grid);
        candidate_swaps(grid).find(|swap| probe.creates_match(*swap))
    }

    fn valid_moves(&self, grid: &Grid) -> Vec<Swap> {
        let probe = SwapProbe::new(grid);
        let mut moves: Vec<_> = candidate_swaps(grid)
            .filter(|swap| probe.creates_match(*swap))
            .collect();
        moves.sort_unstable();
        moves
    }
}

/// Evaluates swaps against one grid without mutating it.
#[derive(Debug)]
struct SwapProbe<'a> {
    grid: &'a Grid,
    existing_windows: Vec<[Cell; MIN_RUN]>,
}

impl<'a> SwapProbe<'a> {
    fn new(grid: &'a Grid) -> Self {
        let mut existing_windows = Vec::new();
        for cell in grid.cells() {
            let right = [0, 1, 2].map(|i| Cell::new(cell.row, cell.col + i));
            let down = [0, 1, 2].map(|i| Cell::new(cell.row + i, cell.col));
            for window in [right, down] {
                if window.iter().all(|c| grid.contains(*c))
                    && window.iter().all(|c| grid[*c] == grid[window[0]])
                {
                    existing_windows.push(window);
                }
            }
        }
        Self {
            grid,
            existing_windows,
        }
    }

    fn creates_match(&self, swap: Swap) -> bool {
        let (a, b) = (swap.first(), swap.second());
        // A run untouched by the swap survives it.
        let untouched = self
            .existing_windows
            .iter()
            .any(|window| !window.contains(&a) && !window.contains(&b));
        untouched || self.has_run_through(swap, a) || self.has_run_through(swap, b)
    }

    fn token_after(&self, swap: Swap, cell: Cell) -> Token {
        if cell == swap.first() {
            self.grid[swap.second()]
        } else if cell == swap.second() {
            self.grid[swap.first()]
        } else {
            self.grid[cell]
        }
    }

    fn has_run_through(&self, swap: Swap, cell: Cell) -> bool {
        let token = self.token_after(swap, cell);
        let same = |c: Cell| self.token_after(swap, c) == token;

        let left = (0..cell.col)
            .rev()
            .take_while(|&col| same(Cell::new(cell.row, col)))
            .count();
        let right = (cell.col + 1..self.grid.cols())
            .take_while(|&col| same(Cell::new(cell.row, col)))
            .count();
        if left + right + 1 >= MIN_RUN {
            return true;
        }

        let up = (0..cell.row)
            .rev()
            .take_while(|&row| same(Cell::new(row, cell.col)))
            .count();
        let down = (cell.row + 1..self.grid.rows())
            .take_while(|&row| same(Cell::new(row, cell.col)))
            .count();
        up + down + 1 >= MIN_RUN
    }
}
