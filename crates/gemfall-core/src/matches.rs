//! Match detection.

use std::collections::{BTreeSet, btree_set};

use crate::{Cell, Grid};

/// Minimum length of an aligned run that counts as a match.
pub const MIN_RUN: usize = 3;

/// The set of cells that belong to some aligned run in a grid snapshot.
///
/// Cells are kept unique and iterate in row-major order. A match set is always
/// recomputed from a grid with [`find_matches`]; it is never patched after the
/// grid changes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct MatchSet {
    cells: BTreeSet<Cell>,
}

impl MatchSet {
    /// Creates an empty match set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of matched cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns `true` if no cell is matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns `true` if `cell` is matched.
    #[must_use]
    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    /// Adds a cell, returning `true` if it was not already present.
    pub fn insert(&mut self, cell: Cell) -> bool {
        self.cells.insert(cell)
    }

    /// Iterates over matched cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().copied()
    }
}

impl FromIterator<Cell> for MatchSet {
    fn from_iter<T: IntoIterator<Item = Cell>>(iter: T) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

impl Extend<Cell> for MatchSet {
    fn extend<T: IntoIterator<Item = Cell>>(&mut self, iter: T) {
        self.cells.extend(iter);
    }
}

impl IntoIterator for MatchSet {
    type Item = Cell;
    type IntoIter = btree_set::IntoIter<Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.into_iter()
    }
}

/// Returns every cell that is part of a horizontal or vertical run of at least
/// [`MIN_RUN`] equal tokens.
///
/// Each row is scanned left to right and each column top to bottom; every
/// window of three equal consecutive tokens contributes its cells. Longer runs
/// are covered by overlapping windows, and runs that cross share their common
/// cell. The result is empty when the grid has no run.
///
/// # Examples
///
/// ```
/// use gemfall_core::{Cell, Grid, find_matches};
///
/// let grid: Grid = "
///     AAAB
///     BCAC
///     CBAB
/// "
/// .parse()?;
/// let matches = find_matches(&grid);
/// assert_eq!(matches.len(), 5);
/// assert!(matches.contains(Cell::new(0, 2)));
/// assert!(matches.contains(Cell::new(2, 2)));
/// # Ok::<(), gemfall_core::GridParseError>(())
/// ```
#[must_use]
pub fn find_matches(grid: &Grid) -> MatchSet {
    let mut matches = MatchSet::new();
    for row in 0..grid.rows() {
        for col in 0..grid.cols().saturating_sub(MIN_RUN - 1) {
            let window = [0, 1, 2].map(|i| Cell::new(row, col + i));
            if is_uniform(grid, &window) {
                matches.extend(window);
            }
        }
    }
    for row in 0..grid.rows().saturating_sub(MIN_RUN - 1) {
        for col in 0..grid.cols() {
            let window = [0, 1, 2].map(|i| Cell::new(row + i, col));
            if is_uniform(grid, &window) {
                matches.extend(window);
            }
        }
    }
    matches
}

/// Returns `true` if the grid has at least one run, without collecting cells.
#[must_use]
pub fn has_match(grid: &Grid) -> bool {
    grid.cells().any(|cell| {
        let right = [0, 1, 2].map(|i| Cell::new(cell.row, cell.col + i));
        let down = [0, 1, 2].map(|i| Cell::new(cell.row + i, cell.col));
        [right, down]
            .iter()
            .any(|window| window.iter().all(|c| grid.contains(*c)) && is_uniform(grid, window))
    })
}

fn is_uniform(grid: &Grid, window: &[Cell; MIN_RUN]) -> bool {
    let first = grid.get(window[0]);
    window[1..].iter().all(|cell| grid.get(*cell) == first)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::Token;

    fn grid(s: &str) -> Grid {
        s.parse().expect("valid grid")
    }

    fn cells(list: &[(usize, usize)]) -> MatchSet {
        list.iter().map(|&(r, c)| Cell::new(r, c)).collect()
    }

    #[test]
    fn test_no_matches() {
        let g = grid(
            "
            ABAB
            BABA
            ABAB
            ",
        );
        assert!(find_matches(&g).is_empty());
        assert!(!has_match(&g));
    }

    #[test]
    fn test_run_of_three() {
        let g = grid(
            "
            BAAA
            CBCB
            ",
        );
        assert_eq!(find_matches(&g), cells(&[(0, 1), (0, 2), (0, 3)]));
        assert!(has_match(&g));
    }

    #[test]
    fn test_run_of_four_and_five() {
        let g = grid(
            "
            AAAAB
            CCCCC
            ",
        );
        let matches = find_matches(&g);
        assert_eq!(matches.len(), 9);
        assert!(!matches.contains(Cell::new(0, 4)));
    }

    #[test]
    fn test_vertical_run() {
        let g = grid(
            "
            AB
            AC
            AB
            BC
            ",
        );
        assert_eq!(find_matches(&g), cells(&[(0, 0), (1, 0), (2, 0)]));
    }

    #[test]
    fn test_crossing_runs_merge() {
        let g = grid(
            "
            BACB
            AAAC
            CADB
            ",
        );
        // Row 1 run and column 1 run share (1, 1).
        assert_eq!(
            find_matches(&g),
            cells(&[(1, 0), (1, 1), (1, 2), (0, 1), (2, 1)])
        );
    }

    #[test]
    fn test_small_grids_never_match() {
        assert!(find_matches(&Grid::filled(2, 2, Token::new(0))).is_empty());
        assert!(find_matches(&Grid::filled(1, 1, Token::new(0))).is_empty());
        assert_eq!(find_matches(&Grid::filled(1, 3, Token::new(0))).len(), 3);
    }

    /// Collects cells of maximal runs by walking each line once.
    fn maximal_runs(grid: &Grid) -> MatchSet {
        let mut result = MatchSet::new();
        let lines = (0..grid.rows())
            .map(|r| (0..grid.cols()).map(|c| Cell::new(r, c)).collect::<Vec<_>>())
            .chain((0..grid.cols()).map(|c| (0..grid.rows()).map(|r| Cell::new(r, c)).collect()));
        for line in lines {
            let mut start = 0;
            while start < line.len() {
                let token = grid.get(line[start]);
                let mut end = start + 1;
                while end < line.len() && grid.get(line[end]) == token {
                    end += 1;
                }
                if end - start >= MIN_RUN {
                    result.extend(line[start..end].iter().copied());
                }
                start = end;
            }
        }
        result
    }

    fn arb_grid() -> impl Strategy<Value = Grid> {
        (1usize..9, 1usize..9, 2u8..5).prop_flat_map(|(rows, cols, kinds)| {
            proptest::collection::vec(0..kinds, rows * cols).prop_map(move |tokens| {
                let mut tokens = tokens.into_iter();
                Grid::from_fn(rows, cols, |_| Token::new(tokens.next().unwrap()))
            })
        })
    }

    proptest! {
        #[test]
        fn prop_matches_equal_maximal_runs(g in arb_grid()) {
            prop_assert_eq!(find_matches(&g), maximal_runs(&g));
        }

        #[test]
        fn prop_has_match_agrees(g in arb_grid()) {
            prop_assert_eq!(has_match(&g), !find_matches(&g).is_empty());
        }
    }
}
