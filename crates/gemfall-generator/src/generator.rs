use std::num::NonZero;

use gemfall_core::{Alphabet, Grid, Token};
use gemfall_solver::{LocalFinder, MoveFinder};
use rand::Rng;

use crate::BoardSeed;

/// Default number of full-board attempts before generation gives up.
pub const DEFAULT_MAX_ATTEMPTS: NonZero<usize> = NonZero::new(1000).unwrap();

/// Errors returned by [`BoardGenerator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GenerationError {
    /// No board with a valid move was found within the retry cap.
    #[display("no playable {rows}x{cols} board found after {attempts} attempts")]
    Exhausted {
        /// Board height.
        rows: usize,
        /// Board width.
        cols: usize,
        /// Number of boards tried.
        attempts: usize,
    },
}

/// A board produced by [`BoardGenerator`], together with how it was made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedBoard {
    /// The generated grid; it always has at least one valid move.
    pub grid: Grid,
    /// Seed that reproduces this board.
    pub seed: BoardSeed,
    /// Number of full-board attempts it took.
    pub attempts: usize,
}

/// Generates random boards that are guaranteed to have a valid move.
///
/// Every attempt fills all cells uniformly at random from the alphabet and
/// checks the result with a [`MoveFinder`]. Deadlocked boards are discarded
/// and regenerated from scratch, up to a retry cap.
///
/// Generated boards may already contain matches; they are not required to be
/// settled.
///
/// # Examples
///
/// ```
/// use gemfall_core::Alphabet;
/// use gemfall_generator::{BoardGenerator, BoardSeed};
/// use gemfall_solver::{LocalFinder, MoveFinder as _};
///
/// let generator = BoardGenerator::new(8, 8, Alphabet::reference());
/// let board = generator.generate_with_seed(BoardSeed::from_phrase("docs"))?;
/// assert!(LocalFinder::new().has_valid_move(&board.grid));
///
/// // The same seed reproduces the same board.
/// let again = generator.generate_with_seed(board.seed)?;
/// assert_eq!(again.grid, board.grid);
/// # Ok::<(), gemfall_generator::GenerationError>(())
/// ```
#[derive(Debug, Clone)]
pub struct BoardGenerator<F = LocalFinder> {
    rows: usize,
    cols: usize,
    alphabet: Alphabet,
    finder: F,
    max_attempts: NonZero<usize>,
}

impl BoardGenerator {
    /// Creates a generator for `rows`×`cols` boards using the [`LocalFinder`].
    ///
    /// # Panics
    ///
    /// Panics if `rows` or `cols` is zero.
    #[must_use]
    pub fn new(rows: usize, cols: usize, alphabet: Alphabet) -> Self {
        assert!(rows > 0 && cols > 0, "board must have at least one cell");
        Self {
            rows,
            cols,
            alphabet,
            finder: LocalFinder::new(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl<F> BoardGenerator<F>
where
    F: MoveFinder,
{
    /// Replaces the move finder used to reject deadlocked boards.
    #[must_use]
    pub fn with_finder<G>(self, finder: G) -> BoardGenerator<G>
    where
        G: MoveFinder,
    {
        BoardGenerator {
            rows: self.rows,
            cols: self.cols,
            alphabet: self.alphabet,
            finder,
            max_attempts: self.max_attempts,
        }
    }

    /// Sets the number of attempts after which generation fails.
    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: NonZero<usize>) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Returns the board height.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the board width.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns the alphabet tokens are drawn from.
    #[must_use]
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Returns the move finder.
    #[must_use]
    pub fn finder(&self) -> &F {
        &self.finder
    }

    /// Returns the retry cap.
    #[must_use]
    pub fn max_attempts(&self) -> NonZero<usize> {
        self.max_attempts
    }

    /// Generates a board from a fresh random seed.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::Exhausted`] if no playable board is found
    /// within the retry cap.
    pub fn generate(&self) -> Result<GeneratedBoard, GenerationError> {
        self.generate_with_seed(BoardSeed::random())
    }

    /// Generates the board determined by `seed`.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::Exhausted`] if no playable board is found
    /// within the retry cap.
    pub fn generate_with_seed(&self, seed: BoardSeed) -> Result<GeneratedBoard, GenerationError> {
        let mut rng = seed.rng();
        let (grid, attempts) = self.generate_counted(&mut rng)?;
        Ok(GeneratedBoard {
            grid,
            seed,
            attempts,
        })
    }

    /// Generates a board drawing randomness from `rng`.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::Exhausted`] if no playable board is found
    /// within the retry cap.
    pub fn generate_with_rng<R>(&self, rng: &mut R) -> Result<Grid, GenerationError>
    where
        R: Rng + ?Sized,
    {
        self.generate_counted(rng).map(|(grid, _)| grid)
    }

    fn generate_counted<R>(&self, rng: &mut R) -> Result<(Grid, usize), GenerationError>
    where
        R: Rng + ?Sized,
    {
        for attempt in 1..=self.max_attempts.get() {
            let grid = fill_random(self.rows, self.cols, &self.alphabet, rng);
            if self.finder.has_valid_move(&grid) {
                log::debug!(
                    "generated {}x{} board after {attempt} attempt(s)",
                    self.rows,
                    self.cols
                );
                return Ok((grid, attempt));
            }
        }
        log::warn!(
            "board generation exhausted after {} attempts ({}x{}, {} tokens)",
            self.max_attempts,
            self.rows,
            self.cols,
            self.alphabet.len()
        );
        Err(GenerationError::Exhausted {
            rows: self.rows,
            cols: self.cols,
            attempts: self.max_attempts.get(),
        })
    }
}

/// Draws one token uniformly from `alphabet`.
pub fn random_token<R>(alphabet: &Alphabet, rng: &mut R) -> Token
where
    R: Rng + ?Sized,
{
    alphabet.token(rng.random_range(0..alphabet.len()))
}

/// Fills a `rows`×`cols` grid with uniformly random tokens, with no playability check.
///
/// # Panics
///
/// Panics if `rows` or `cols` is zero.
pub fn fill_random<R>(rows: usize, cols: usize, alphabet: &Alphabet, rng: &mut R) -> Grid
where
    R: Rng + ?Sized,
{
    Grid::from_fn(rows, cols, |_| random_token(alphabet, rng))
}
