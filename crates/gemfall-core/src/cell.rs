//! Board coordinates and adjacent swaps.

use std::fmt::{self, Display};

/// A board coordinate, 0-indexed from the top-left corner.
///
/// Cells order row-major: first by row, then by column.
///
/// # Examples
///
/// ```
/// use gemfall_core::Cell;
///
/// let a = Cell::new(2, 2);
/// assert!(a.is_adjacent(Cell::new(2, 3)));
/// assert!(!a.is_adjacent(Cell::new(4, 4)));
/// assert_eq!(a.manhattan_distance(Cell::new(4, 4)), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cell {
    /// Row index.
    pub row: usize,
    /// Column index.
    pub col: usize,
}

impl Cell {
    /// Creates a cell at `(row, col)`.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Returns the Manhattan distance between two cells.
    #[must_use]
    pub const fn manhattan_distance(self, other: Self) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// Returns `true` if `other` is orthogonally adjacent (distance exactly 1).
    #[must_use]
    pub const fn is_adjacent(self, other: Self) -> bool {
        self.manhattan_distance(other) == 1
    }

    /// Returns the cell to the right, or `None` when it would leave a board `cols` wide.
    #[must_use]
    pub fn right(self, cols: usize) -> Option<Self> {
        (self.col + 1 < cols).then(|| Self::new(self.row, self.col + 1))
    }

    /// Returns the cell below, or `None` when it would leave a board `rows` tall.
    #[must_use]
    pub fn down(self, rows: usize) -> Option<Self> {
        (self.row + 1 < rows).then(|| Self::new(self.row + 1, self.col))
    }

    /// Returns the orthogonal neighbours that lie inside a `rows`×`cols` board.
    ///
    /// Neighbours are yielded in up, down, left, right order.
    pub fn neighbors(self, rows: usize, cols: usize) -> impl Iterator<Item = Self> {
        let up = self.row.checked_sub(1).map(|row| Self::new(row, self.col));
        let left = self.col.checked_sub(1).map(|col| Self::new(self.row, col));
        [up, self.down(rows), left, self.right(cols)]
            .into_iter()
            .flatten()
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(usize, usize)> for Cell {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

/// An exchange of two orthogonally adjacent cells.
///
/// The pair is unordered: `Swap::new(a, b)` and `Swap::new(b, a)` are equal.
///
/// # Examples
///
/// ```
/// use gemfall_core::{Cell, Swap};
///
/// let swap = Swap::new(Cell::new(1, 2), Cell::new(1, 1)).unwrap();
/// assert_eq!(swap.first(), Cell::new(1, 1));
/// assert_eq!(swap.second(), Cell::new(1, 2));
/// assert!(Swap::new(Cell::new(0, 0), Cell::new(1, 1)).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Swap {
    first: Cell,
    second: Cell,
}

impl Swap {
    /// Creates a swap of two adjacent cells, or `None` if they are not adjacent.
    #[must_use]
    pub fn new(a: Cell, b: Cell) -> Option<Self> {
        a.is_adjacent(b).then(|| Self {
            first: a.min(b),
            second: a.max(b),
        })
    }

    /// Returns the smaller cell in row-major order.
    #[must_use]
    pub const fn first(self) -> Cell {
        self.first
    }

    /// Returns the larger cell in row-major order.
    #[must_use]
    pub const fn second(self) -> Cell {
        self.second
    }

    /// Returns `true` if the swap moves tokens along a row.
    #[must_use]
    pub const fn is_horizontal(self) -> bool {
        self.first.row == self.second.row
    }
}

impl Display for Swap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <-> {}", self.first, self.second)
    }
}
