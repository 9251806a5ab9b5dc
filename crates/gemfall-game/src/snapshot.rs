use gemfall_core::{Cell, Grid, GridParseError, Token};
use serde::{Deserialize, Serialize};

use crate::{GameConfig, GamePhase};

/// Errors returned when restoring a session from a [`SessionSnapshot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum SnapshotError {
    /// The grid rows could not be parsed.
    #[display("invalid grid: {_0}")]
    Grid(#[from] GridParseError),
    /// The grid does not have the configured size.
    #[display("grid is {rows}x{cols}, expected {expected_rows}x{expected_cols}")]
    Shape {
        /// Rows in the snapshot.
        rows: usize,
        /// Columns in the snapshot.
        cols: usize,
        /// Configured rows.
        expected_rows: usize,
        /// Configured columns.
        expected_cols: usize,
    },
    /// The grid holds a token the configured alphabet does not have.
    #[display("token {token} at {cell} is not in the alphabet")]
    UnknownToken {
        /// The offending token.
        token: Token,
        /// Where it was found.
        cell: Cell,
    },
    /// The level is zero.
    #[display("level must be at least 1")]
    InvalidLevel,
    /// The target score is zero.
    #[display("target score must be at least 1")]
    InvalidTarget,
    /// The selected cell is outside the grid.
    #[display("selection ({row}, {col}) is outside the grid")]
    SelectionOutOfBounds {
        /// Selected row.
        row: usize,
        /// Selected column.
        col: usize,
    },
    /// A cell is selected while the game is not being played.
    #[display("selection is only allowed while playing, not in the {phase} phase")]
    UnexpectedSelection {
        /// Phase in the snapshot.
        phase: GamePhase,
    },
}

/// A serializable copy of the observable state of a [`Session`](crate::Session).
///
/// The grid is stored as text rows in the letter format of [`Grid`]'s
/// `Display` implementation, so snapshots stay readable as JSON.
///
/// # Examples
///
/// ```
/// use gemfall_game::{GameConfig, Session};
/// use gemfall_generator::BoardSeed;
///
/// let config = GameConfig::default();
/// let session = Session::with_seed(config.clone(), BoardSeed::from_phrase("save"))?;
/// let snapshot = session.snapshot();
/// assert_eq!(snapshot.grid.len(), 8);
///
/// let restored = Session::from_snapshot(config, &snapshot, session.seed())?;
/// assert_eq!(restored.grid(), session.grid());
/// assert_eq!(restored.snapshot(), snapshot);
/// # Ok::<(), gemfall_game::GameError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Grid rows, top to bottom, one letter per token.
    pub grid: Vec<String>,
    /// Current score.
    pub score: u64,
    /// Current level, starting at 1.
    pub level: u32,
    /// Moves left on this level.
    pub moves_remaining: u32,
    /// Score needed to complete this level.
    pub target_score: u64,
    /// Selected cell as `[row, col]`.
    pub selection: Option<[usize; 2]>,
    /// Current phase.
    pub phase: GamePhase,
}

impl SessionSnapshot {
    pub(crate) fn grid_rows(grid: &Grid) -> Vec<String> {
        (0..grid.rows())
            .map(|row| grid.row(row).iter().map(|token| token.letter()).collect())
            .collect()
    }

    /// Parses and checks the grid and selection against `config`.
    pub(crate) fn restore_board(
        &self,
        config: &GameConfig,
    ) -> Result<(Grid, Option<Cell>), SnapshotError> {
        let grid: Grid = self.grid.join("\n").parse()?;
        if (grid.rows(), grid.cols()) != (config.rows(), config.cols()) {
            return Err(SnapshotError::Shape {
                rows: grid.rows(),
                cols: grid.cols(),
                expected_rows: config.rows(),
                expected_cols: config.cols(),
            });
        }
        if let Some((cell, token)) = grid
            .iter()
            .find(|(_, token)| !config.alphabet().contains(*token))
        {
            return Err(SnapshotError::UnknownToken { token, cell });
        }
        if self.level == 0 {
            return Err(SnapshotError::InvalidLevel);
        }
        if self.target_score == 0 {
            return Err(SnapshotError::InvalidTarget);
        }
        let selection = match self.selection {
            None => None,
            Some(_) if !self.phase.is_playing() => {
                return Err(SnapshotError::UnexpectedSelection { phase: self.phase });
            }
            Some([row, col]) => {
                let cell = Cell::new(row, col);
                if !grid.contains(cell) {
                    return Err(SnapshotError::SelectionOutOfBounds { row, col });
                }
                Some(cell)
            }
        };
        Ok((grid, selection))
    }
}
