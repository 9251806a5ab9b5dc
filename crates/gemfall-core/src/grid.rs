//! The token grid.

use std::{
    fmt::{self, Display},
    ops::Index,
    str::FromStr,
};

use crate::{Cell, MatchSet, Token};

/// A fixed-size rectangular board of tokens.
///
/// Every cell always holds exactly one token; there is no empty state. Cells are
/// stored row-major. Accessing a cell outside the board panics: callers are
/// expected to pass coordinates from [`Grid::cells`] or validated input.
///
/// # Text format
///
/// Grids parse from and display as one line per row, each token written as its
/// letter (`A` for token 0). Whitespace inside a line and blank lines are ignored.
///
/// # Examples
///
/// ```
/// use gemfall_core::{Cell, Grid, Token};
///
/// let mut grid: Grid = "
///     ABC
///     BCA
///     CAB
/// "
/// .parse()?;
/// assert_eq!(grid.rows(), 3);
/// assert_eq!(grid[Cell::new(1, 2)], Token::new(0));
///
/// grid.swap(Cell::new(0, 0), Cell::new(0, 1));
/// assert_eq!(grid.to_string(), "BAC\nBCA\nCAB");
/// # Ok::<(), gemfall_core::GridParseError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Token>,
}

impl Grid {
    /// Creates a grid by calling `f` for every cell in row-major order.
    ///
    /// # Panics
    ///
    /// Panics if `rows` or `cols` is zero.
    pub fn from_fn<F>(rows: usize, cols: usize, mut f: F) -> Self
    where
        F: FnMut(Cell) -> Token,
    {
        assert!(rows > 0 && cols > 0, "grid must have at least one cell");
        let mut cells = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                cells.push(f(Cell::new(row, col)));
            }
        }
        Self { rows, cols, cells }
    }

    /// Creates a grid with every cell holding `token`.
    ///
    /// # Panics
    ///
    /// Panics if `rows` or `cols` is zero.
    #[must_use]
    pub fn filled(rows: usize, cols: usize, token: Token) -> Self {
        Self::from_fn(rows, cols, |_| token)
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns the number of cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns `true` if the grid has no cells, which a constructed grid never does.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns `true` if `cell` lies inside the grid.
    #[must_use]
    pub fn contains(&self, cell: Cell) -> bool {
        cell.row < self.rows && cell.col < self.cols
    }

    #[track_caller]
    fn offset(&self, cell: Cell) -> usize {
        assert!(
            self.contains(cell),
            "cell {cell} is outside the {}x{} grid",
            self.rows,
            self.cols
        );
        cell.row * self.cols + cell.col
    }

    /// Returns the token at `cell`.
    ///
    /// # Panics
    ///
    /// Panics if `cell` is outside the grid.
    #[must_use]
    #[track_caller]
    pub fn get(&self, cell: Cell) -> Token {
        self.cells[self.offset(cell)]
    }

    /// Replaces the token at `cell`.
    ///
    /// # Panics
    ///
    /// Panics if `cell` is outside the grid.
    #[track_caller]
    pub fn set(&mut self, cell: Cell, token: Token) {
        let offset = self.offset(cell);
        self.cells[offset] = token;
    }

    /// Exchanges the tokens of two cells in place.
    ///
    /// Swapping the same pair twice restores the original grid.
    ///
    /// # Panics
    ///
    /// Panics if either cell is outside the grid.
    #[track_caller]
    pub fn swap(&mut self, a: Cell, b: Cell) {
        let a = self.offset(a);
        let b = self.offset(b);
        self.cells.swap(a, b);
    }

    /// Returns the tokens of row `row`.
    ///
    /// # Panics
    ///
    /// Panics if `row` is outside the grid.
    #[must_use]
    pub fn row(&self, row: usize) -> &[Token] {
        assert!(row < self.rows, "row {row} is outside the grid");
        &self.cells[row * self.cols..(row + 1) * self.cols]
    }

    /// Iterates over every cell coordinate in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + use<> {
        let cols = self.cols;
        (0..self.rows).flat_map(move |row| (0..cols).map(move |col| Cell::new(row, col)))
    }

    /// Iterates over every `(cell, token)` pair in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Cell, Token)> + '_ {
        self.cells().zip(self.cells.iter().copied())
    }

    /// Removes the matched cells and lets the survivors fall.
    ///
    /// Each column is compacted independently: surviving tokens keep their
    /// relative order and settle at the bottom, and the vacated cells at the top
    /// are filled by calling `refill` with their final coordinates, top to bottom.
    /// Columns are processed left to right.
    pub fn collapse<F>(&mut self, matches: &MatchSet, mut refill: F)
    where
        F: FnMut(Cell) -> Token,
    {
        debug_assert!(matches.iter().all(|cell| self.contains(cell)));
        let mut survivors = Vec::with_capacity(self.rows);
        for col in 0..self.cols {
            survivors.clear();
            survivors.extend(
                (0..self.rows)
                    .map(|row| Cell::new(row, col))
                    .filter(|cell| !matches.contains(*cell))
                    .map(|cell| self.get(cell)),
            );
            let missing = self.rows - survivors.len();
            for row in 0..missing {
                let cell = Cell::new(row, col);
                let token = refill(cell);
                self.set(cell, token);
            }
            for (row, token) in (missing..self.rows).zip(survivors.iter().copied()) {
                self.set(Cell::new(row, col), token);
            }
        }
    }
}

impl Index<Cell> for Grid {
    type Output = Token;

    #[track_caller]
    fn index(&self, cell: Cell) -> &Self::Output {
        &self.cells[self.offset(cell)]
    }
}

impl Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            if row > 0 {
                writeln!(f)?;
            }
            for token in self.row(row) {
                write!(f, "{token}")?;
            }
        }
        Ok(())
    }
}

/// Errors returned when parsing a [`Grid`] from text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GridParseError {
    /// The input contained no rows.
    #[display("grid text contains no rows")]
    Empty,
    /// A character other than a token letter or whitespace was found.
    #[display("invalid token {ch:?} at row {row}")]
    InvalidToken {
        /// The offending character.
        ch: char,
        /// Row on which it appeared.
        row: usize,
    },
    /// A row's width differs from the first row.
    #[display("row {row} has {len} tokens, expected {expected}")]
    RaggedRow {
        /// Row index.
        row: usize,
        /// Width of that row.
        len: usize,
        /// Width of the first row.
        expected: usize,
    },
}

impl FromStr for Grid {
    type Err = GridParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cols = None;
        let mut cells = Vec::new();
        let mut rows = 0;
        for line in s.lines() {
            let start = cells.len();
            for ch in line.chars().filter(|ch| !ch.is_whitespace()) {
                let token =
                    Token::from_letter(ch).ok_or(GridParseError::InvalidToken { ch, row: rows })?;
                cells.push(token);
            }
            let len = cells.len() - start;
            if len == 0 {
                continue;
            }
            let expected = *cols.get_or_insert(len);
            if len != expected {
                return Err(GridParseError::RaggedRow {
                    row: rows,
                    len,
                    expected,
                });
            }
            rows += 1;
        }
        let cols = cols.ok_or(GridParseError::Empty)?;
        Ok(Self { rows, cols, cells })
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn grid(s: &str) -> Grid {
        s.parse().expect("valid grid")
    }

    #[test]
    fn test_parse_and_display() {
        let g = grid(
            "
            A B C D
            D C B A
            ",
        );
        assert_eq!(g.rows(), 2);
        assert_eq!(g.cols(), 4);
        assert_eq!(g.get(Cell::new(1, 0)), Token::new(3));
        assert_eq!(g.row(0), &[Token::new(0), Token::new(1), Token::new(2), Token::new(3)]);
        assert_eq!(g.to_string(), "ABCD\nDCBA");
        assert_eq!(grid(&g.to_string()), g);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<Grid>(), Err(GridParseError::Empty));
        assert_eq!("  \n \n".parse::<Grid>(), Err(GridParseError::Empty));
        assert_eq!(
            "AB\nA?".parse::<Grid>(),
            Err(GridParseError::InvalidToken { ch: '?', row: 1 })
        );
        assert_eq!(
            "ABC\nAB".parse::<Grid>(),
            Err(GridParseError::RaggedRow {
                row: 1,
                len: 2,
                expected: 3
            })
        );
    }

    #[test]
    fn test_set_and_clone_are_independent() {
        let original = grid("AAA\nBBB");
        let mut copy = original.clone();
        copy.set(Cell::new(0, 0), Token::new(2));
        assert_eq!(original.get(Cell::new(0, 0)), Token::new(0));
        assert_eq!(copy.get(Cell::new(0, 0)), Token::new(2));
    }

    #[test]
    #[should_panic(expected = "outside the 2x3 grid")]
    fn test_out_of_bounds_get_panics() {
        let g = grid("AAA\nBBB");
        let _ = g.get(Cell::new(2, 0));
    }

    #[test]
    #[should_panic(expected = "outside the 2x3 grid")]
    fn test_out_of_bounds_swap_panics() {
        let mut g = grid("AAA\nBBB");
        g.swap(Cell::new(0, 0), Cell::new(0, 3));
    }

    #[test]
    fn test_cells_are_row_major() {
        let g = Grid::filled(2, 3, Token::new(0));
        let cells: Vec<_> = g.cells().collect();
        assert_eq!(cells.len(), 6);
        assert_eq!(cells[0], Cell::new(0, 0));
        assert_eq!(cells[2], Cell::new(0, 2));
        assert_eq!(cells[3], Cell::new(1, 0));
    }

    #[test]
    fn test_collapse_preserves_survivor_order() {
        let mut g = grid(
            "
            ABC
            BAC
            CAC
            DBA
            ",
        );
        // Remove (1,1), (2,1) in the middle column and the top three of the last column.
        let matches: MatchSet = [
            Cell::new(1, 1),
            Cell::new(2, 1),
            Cell::new(0, 2),
            Cell::new(1, 2),
            Cell::new(2, 2),
        ]
        .into_iter()
        .collect();
        let mut refilled = Vec::new();
        g.collapse(&matches, |cell| {
            refilled.push(cell);
            Token::new(25)
        });
        assert_eq!(
            g,
            grid(
                "
                AZZ
                BZZ
                CBZ
                DBA
                "
            )
        );
        assert_eq!(
            refilled,
            vec![
                Cell::new(0, 1),
                Cell::new(1, 1),
                Cell::new(0, 2),
                Cell::new(1, 2),
                Cell::new(2, 2),
            ]
        );
    }

    fn arb_grid() -> impl Strategy<Value = Grid> {
        (1usize..7, 1usize..7).prop_flat_map(|(rows, cols)| {
            proptest::collection::vec(0u8..6, rows * cols).prop_map(move |tokens| {
                let mut tokens = tokens.into_iter();
                Grid::from_fn(rows, cols, |_| Token::new(tokens.next().unwrap()))
            })
        })
    }

    proptest! {
        #[test]
        fn prop_swap_twice_is_identity(g in arb_grid(), a in (0usize..7, 0usize..7), b in (0usize..7, 0usize..7)) {
            let a = Cell::new(a.0 % g.rows(), a.1 % g.cols());
            let b = Cell::new(b.0 % g.rows(), b.1 % g.cols());
            let mut swapped = g.clone();
            swapped.swap(a, b);
            swapped.swap(a, b);
            prop_assert_eq!(swapped, g);
        }
    }
}
