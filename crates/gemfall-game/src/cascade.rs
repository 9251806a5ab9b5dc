use std::{iter::FusedIterator, num::NonZero};

use gemfall_core::{Cell, Grid, MatchSet, Token, find_matches};

use crate::ScoreRules;

/// Default cap on the number of steps in one cascade.
pub const DEFAULT_MAX_STEPS: NonZero<usize> = NonZero::new(1000).unwrap();

/// One removal round of a [`Cascade`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadeStep {
    /// Number of tokens removed in this step.
    pub removed: usize,
    /// Points scored by this step.
    pub points: u64,
    /// Whether this step was triggered by an earlier step of the same cascade.
    pub chain_link: bool,
    /// The removed cells, as they were positioned before the collapse.
    pub cells: MatchSet,
}

/// Resolves matches on a grid, one removal round per iteration.
///
/// Each call to [`next`](Iterator::next) removes the current match set,
/// lets the survivors fall, fills the vacated cells from the refill source
/// and re-detects matches. Iteration ends when the grid has no match left,
/// or after the step cap is reached.
///
/// The grid is mutated in place; dropping the cascade early leaves the grid
/// at the last completed step.
///
/// # Examples
///
/// ```
/// use gemfall_core::{Grid, Token, find_matches};
/// use gemfall_game::{Cascade, ScoreRules};
///
/// let mut grid: Grid = "
///     BCD
///     AAA
///     CDB
/// "
/// .parse()?;
/// let matches = find_matches(&grid);
/// let mut refill = [3, 4, 3].into_iter().map(Token::new);
/// let cascade = Cascade::new(&mut grid, ScoreRules::default(), matches, |_| {
///     refill.next().unwrap()
/// });
/// let steps: Vec<_> = cascade.collect();
///
/// assert_eq!(steps.len(), 1);
/// assert_eq!(steps[0].points, 30);
/// assert_eq!(grid.to_string(), "DED\nBCD\nCDB");
/// # Ok::<(), gemfall_core::GridParseError>(())
/// ```
#[derive(Debug)]
pub struct Cascade<'a, F> {
    grid: &'a mut Grid,
    rules: ScoreRules,
    pending: Option<MatchSet>,
    refill: F,
    steps: usize,
    max_steps: NonZero<usize>,
}

impl<'a, F> Cascade<'a, F>
where
    F: FnMut(Cell) -> Token,
{
    /// Creates a cascade starting from `initial` matches on `grid`.
    ///
    /// An empty `initial` set produces an empty cascade.
    pub fn new(grid: &'a mut Grid, rules: ScoreRules, initial: MatchSet, refill: F) -> Self {
        Self {
            grid,
            rules,
            pending: (!initial.is_empty()).then_some(initial),
            refill,
            steps: 0,
            max_steps: DEFAULT_MAX_STEPS,
        }
    }

    /// Sets the maximum number of steps this cascade will perform.
    #[must_use]
    pub fn with_max_steps(mut self, max_steps: NonZero<usize>) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Returns the number of steps performed so far.
    #[must_use]
    pub fn steps(&self) -> usize {
        self.steps
    }
}

impl<F> Iterator for Cascade<'_, F>
where
    F: FnMut(Cell) -> Token,
{
    type Item = CascadeStep;

    fn next(&mut self) -> Option<Self::Item> {
        let cells = self.pending.take()?;
        if self.steps >= self.max_steps.get() {
            log::warn!(
                "cascade stopped after {} steps with {} matched cells left",
                self.steps,
                cells.len()
            );
            return None;
        }

        let chain_link = self.steps > 0;
        let removed = cells.len();
        let points = self.rules.step_points(removed, chain_link);
        self.grid.collapse(&cells, &mut self.refill);
        self.steps += 1;

        let next = find_matches(self.grid);
        if !next.is_empty() {
            self.pending = Some(next);
        }
        Some(CascadeStep {
            removed,
            points,
            chain_link,
            cells,
        })
    }
}

impl<F> FusedIterator for Cascade<'_, F> where F: FnMut(Cell) -> Token {}
