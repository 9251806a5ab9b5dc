use gemfall_core::{Cell, Grid, Swap, find_matches};
use gemfall_generator::{BoardGenerator, BoardSeed, random_token};
use gemfall_solver::{LocalFinder, MoveFinder as _};
use rand_pcg::Pcg64;

use crate::{Cascade, CascadeStep, GameConfig, GameError, GamePhase, SessionSnapshot};

/// What a call to [`Session::select_cell`] did.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::IsVariant)]
pub enum SelectOutcome {
    /// The session is not in the playing phase; nothing changed.
    Ignored,
    /// The cell became the selection.
    Selected,
    /// The selected cell was selected again and the selection was cleared.
    Deselected,
    /// A non-adjacent cell was selected; it replaced the previous selection.
    SelectionMoved,
    /// The adjacent swap produced no match and was reverted at no cost.
    Rejected(Swap),
    /// The adjacent swap produced a match and was played.
    Scored(MoveReport),
}

/// The result of a scoring swap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveReport {
    /// The swap that was played.
    pub swap: Swap,
    /// Number of cascade steps, including the initial match.
    pub steps: usize,
    /// Points gained by this swap.
    pub points: u64,
    /// Whether the board was deadlocked afterwards and had to be regenerated.
    pub reshuffled: bool,
    /// Phase after the swap.
    pub phase: GamePhase,
}

/// A single-player match-3 game.
///
/// The session owns the board and all progression state. Hosts feed it cell
/// selections and render the read-only projection ([`grid`](Self::grid),
/// [`score`](Self::score), [`phase`](Self::phase), ...) after every call.
///
/// Every board and refill token is drawn from a random number generator
/// seeded by a [`BoardSeed`], so a session created with
/// [`Session::with_seed`] replays identically for the same inputs.
///
/// # Examples
///
/// ```
/// use gemfall_game::{GameConfig, GamePhase, SelectOutcome, Session};
/// use gemfall_generator::BoardSeed;
///
/// let mut session = Session::with_seed(GameConfig::default(), BoardSeed::from_phrase("example"))?;
/// assert_eq!(session.phase(), GamePhase::Playing);
/// assert_eq!(session.moves_remaining(), 18);
///
/// let swap = session.hint().expect("new boards always have a move");
/// assert_eq!(session.select_cell(swap.first())?, SelectOutcome::Selected);
/// let outcome = session.select_cell(swap.second())?;
/// assert!(outcome.is_scored());
/// assert_eq!(session.moves_remaining(), 17);
/// assert!(session.score() >= 30);
/// # Ok::<(), gemfall_game::GameError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Session {
    config: GameConfig,
    seed: BoardSeed,
    rng: Pcg64,
    generator: BoardGenerator,
    finder: LocalFinder,
    grid: Grid,
    score: u64,
    level: u32,
    moves_remaining: u32,
    target_score: u64,
    selection: Option<Cell>,
    phase: GamePhase,
    last_cascade: Vec<CascadeStep>,
}

impl Session {
    /// Starts a new game at level 1 with a random seed.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Config`] if `config` is invalid, or
    /// [`GameError::Generation`] if no playable board could be generated.
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        Self::with_seed(config, BoardSeed::random())
    }

    /// Starts a new game at level 1 whose boards and refills derive from `seed`.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Config`] if `config` is invalid, or
    /// [`GameError::Generation`] if no playable board could be generated.
    pub fn with_seed(config: GameConfig, seed: BoardSeed) -> Result<Self, GameError> {
        let mut session = Self::empty(config, seed)?;
        session.grid = session.generator.generate_with_rng(&mut session.rng)?;
        log::debug!("new session with seed {seed}");
        Ok(session)
    }

    /// Restores a session from a snapshot.
    ///
    /// `seed` drives all future boards and refills; the restored session does
    /// not need to continue the random sequence of the session that was saved.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Config`] if `config` is invalid, or
    /// [`GameError::Snapshot`] if the snapshot does not fit `config`.
    pub fn from_snapshot(
        config: GameConfig,
        snapshot: &SessionSnapshot,
        seed: BoardSeed,
    ) -> Result<Self, GameError> {
        let mut session = Self::empty(config, seed)?;
        let (grid, selection) = snapshot.restore_board(&session.config)?;
        session.grid = grid;
        session.selection = selection;
        session.score = snapshot.score;
        session.level = snapshot.level;
        session.moves_remaining = snapshot.moves_remaining;
        session.target_score = snapshot.target_score;
        session.phase = snapshot.phase;
        Ok(session)
    }

    /// Level 1 state around a placeholder grid.
    fn empty(config: GameConfig, seed: BoardSeed) -> Result<Self, GameError> {
        config.validate()?;
        let generator =
            BoardGenerator::new(config.rows(), config.cols(), config.alphabet().clone())
                .with_max_attempts(config.max_generation_attempts());
        let grid = Grid::filled(config.rows(), config.cols(), config.alphabet().token(0));
        Ok(Self {
            moves_remaining: config.moves_for_level(1),
            target_score: config.target_for_level(1),
            seed,
            rng: seed.rng(),
            generator,
            finder: LocalFinder::new(),
            grid,
            score: 0,
            level: 1,
            selection: None,
            phase: GamePhase::Playing,
            last_cascade: Vec::new(),
            config,
        })
    }

    /// Returns the configuration this session was created with.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Returns the seed of this session's random sequence.
    #[must_use]
    pub fn seed(&self) -> BoardSeed {
        self.seed
    }

    /// Returns the current board.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Returns the selected cell, if any.
    #[must_use]
    pub fn selection(&self) -> Option<Cell> {
        self.selection
    }

    /// Returns the total score.
    #[must_use]
    pub fn score(&self) -> u64 {
        self.score
    }

    /// Returns the current level, starting at 1.
    #[must_use]
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Returns the moves left on this level.
    #[must_use]
    pub fn moves_remaining(&self) -> u32 {
        self.moves_remaining
    }

    /// Returns the score needed to complete this level.
    #[must_use]
    pub fn target_score(&self) -> u64 {
        self.target_score
    }

    /// Returns the current phase.
    #[must_use]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Returns the cascade steps of the most recent scoring swap.
    ///
    /// Empty unless the previous call to [`select_cell`](Self::select_cell)
    /// scored.
    #[must_use]
    pub fn last_cascade(&self) -> &[CascadeStep] {
        &self.last_cascade
    }

    /// Returns the score as a fraction of the target, clamped to `1.0`.
    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn progress(&self) -> f64 {
        (self.score as f64 / self.target_score as f64).min(1.0)
    }

    /// Returns a valid swap on the current board, if the game is being played.
    #[must_use]
    pub fn hint(&self) -> Option<Swap> {
        if self.phase.is_playing() {
            self.finder.find_move(&self.grid)
        } else {
            None
        }
    }

    /// Handles a click on `cell`.
    ///
    /// Outside the playing phase this does nothing. Otherwise the first click
    /// selects a cell, a second click on the same cell deselects it, a click
    /// on a non-adjacent cell moves the selection, and a click on an
    /// orthogonally adjacent cell attempts to swap the two.
    ///
    /// A swap that creates a match costs one move and is resolved completely:
    /// the cascade runs, the board is regenerated if it has no valid move
    /// left, and then the level is checked for completion before the moves
    /// are checked for exhaustion.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Generation`] if the board became deadlocked and
    /// no replacement could be generated. The swap has still been played and
    /// scored, and the deadlocked board stays in place.
    ///
    /// # Panics
    ///
    /// Panics if `cell` is outside the grid.
    pub fn select_cell(&mut self, cell: Cell) -> Result<SelectOutcome, GameError> {
        assert!(
            self.grid.contains(cell),
            "cell {cell} is outside the {}x{} grid",
            self.grid.rows(),
            self.grid.cols()
        );
        self.last_cascade.clear();
        if !self.phase.is_playing() {
            return Ok(SelectOutcome::Ignored);
        }

        let Some(selected) = self.selection else {
            self.selection = Some(cell);
            return Ok(SelectOutcome::Selected);
        };
        if selected == cell {
            self.selection = None;
            return Ok(SelectOutcome::Deselected);
        }
        let Some(swap) = Swap::new(selected, cell) else {
            self.selection = Some(cell);
            return Ok(SelectOutcome::SelectionMoved);
        };
        self.selection = None;
        self.play_swap(swap)
    }

    fn play_swap(&mut self, swap: Swap) -> Result<SelectOutcome, GameError> {
        self.grid.swap(swap.first(), swap.second());
        let initial = find_matches(&self.grid);
        if initial.is_empty() {
            self.grid.swap(swap.first(), swap.second());
            return Ok(SelectOutcome::Rejected(swap));
        }

        self.moves_remaining = self.moves_remaining.saturating_sub(1);
        let alphabet = self.config.alphabet();
        let rng = &mut self.rng;
        let steps: Vec<_> = Cascade::new(&mut self.grid, self.config.scoring(), initial, |_| {
            random_token(alphabet, rng)
        })
        .with_max_steps(self.config.max_cascade_steps())
        .collect();
        let points = steps.iter().map(|step| step.points).sum::<u64>();
        self.score = self.score.saturating_add(points);
        log::debug!(
            "swap {swap} scored {points} points in {} step(s)",
            steps.len()
        );
        let step_count = steps.len();
        self.last_cascade = steps;

        let reshuffle = if self.finder.has_valid_move(&self.grid) {
            Ok(false)
        } else {
            self.reshuffle().map(|()| true)
        };
        self.check_end();
        let reshuffled = reshuffle?;

        Ok(SelectOutcome::Scored(MoveReport {
            swap,
            steps: step_count,
            points,
            reshuffled,
            phase: self.phase,
        }))
    }

    /// Replaces a deadlocked board, keeping score, level, moves and target.
    fn reshuffle(&mut self) -> Result<(), GameError> {
        let grid = self.generator.generate_with_rng(&mut self.rng)?;
        self.grid = grid;
        self.selection = None;
        log::debug!("board deadlocked; reshuffled");
        Ok(())
    }

    fn check_end(&mut self) {
        if self.score >= self.target_score {
            self.phase = GamePhase::LevelComplete;
            log::info!("level {} complete with {} points", self.level, self.score);
        } else if self.moves_remaining == 0 {
            self.phase = GamePhase::GameOver;
            log::info!(
                "game over on level {} with {} of {} points",
                self.level,
                self.score,
                self.target_score
            );
        }
    }

    /// Starts the next level after a completed one.
    ///
    /// The level increases by one, the moves are reset to one more than the
    /// previous level's allowance and the target grows by the configured
    /// multiplier. The score carries over.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidPhase`] unless the session is in
    /// [`GamePhase::LevelComplete`], or [`GameError::Generation`] if no
    /// playable board could be generated; the session is unchanged in both
    /// cases.
    pub fn advance_level(&mut self) -> Result<(), GameError> {
        self.last_cascade.clear();
        if !self.phase.is_level_complete() {
            return Err(GameError::InvalidPhase {
                expected: GamePhase::LevelComplete,
                actual: self.phase,
            });
        }
        let grid = self.generator.generate_with_rng(&mut self.rng)?;
        self.grid = grid;
        self.level = self.level.saturating_add(1);
        self.moves_remaining = self.config.moves_for_level(self.level);
        self.target_score = self.config.target_for_level(self.level);
        self.selection = None;
        self.phase = GamePhase::Playing;
        log::debug!(
            "advanced to level {}: {} moves, target {}",
            self.level,
            self.moves_remaining,
            self.target_score
        );
        Ok(())
    }

    /// Restarts from level 1 with a fresh board, in any phase.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Generation`] if no playable board could be
    /// generated; the session is unchanged in that case.
    pub fn restart(&mut self) -> Result<(), GameError> {
        self.last_cascade.clear();
        let grid = self.generator.generate_with_rng(&mut self.rng)?;
        self.grid = grid;
        self.score = 0;
        self.level = 1;
        self.moves_remaining = self.config.moves_for_level(1);
        self.target_score = self.config.target_for_level(1);
        self.selection = None;
        self.phase = GamePhase::Playing;
        log::debug!("session restarted");
        Ok(())
    }

    /// Captures the observable state for saving.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            grid: SessionSnapshot::grid_rows(&self.grid),
            score: self.score,
            level: self.level,
            moves_remaining: self.moves_remaining,
            target_score: self.target_score,
            selection: self.selection.map(|cell| [cell.row, cell.col]),
            phase: self.phase,
        }
    }
}
