use std::num::NonZero;

use gemfall_core::Alphabet;
use gemfall_generator::DEFAULT_MAX_ATTEMPTS;
use serde::{Deserialize, Serialize};

use crate::{ScoreRules, cascade::DEFAULT_MAX_STEPS};

/// Errors returned by [`GameConfig::validate`].
#[derive(Debug, Clone, Copy, PartialEq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    /// The board is too short to hold a vertical match.
    #[display("board needs at least 3 rows, got {rows}")]
    TooFewRows {
        /// Configured row count.
        rows: usize,
    },
    /// The board is too narrow to hold a horizontal match.
    #[display("board needs at least 3 columns, got {cols}")]
    TooFewCols {
        /// Configured column count.
        cols: usize,
    },
    /// Level 1 would start without moves.
    #[display("base moves must be at least 1")]
    NoMoves,
    /// Level 1 would be complete before the first move.
    #[display("base target must be at least 1")]
    NoTarget,
    /// The target multiplier is NaN, infinite or shrinks the target.
    #[display("target multiplier must be finite and at least 1.0, got {multiplier}")]
    InvalidMultiplier {
        /// Configured multiplier.
        multiplier: f64,
    },
}

/// Tunable parameters of a game.
///
/// `Default` is the reference configuration: an 8×8 board with six symbols,
/// 18 moves and a target of 150 points on level 1, and a target that grows by
/// ×1.75 per level.
///
/// The configuration can be serialized, so hosts may load it from a file.
/// Deserialized values should be checked with [`GameConfig::validate`];
/// [`Session`](crate::Session) constructors do this automatically.
///
/// # Examples
///
/// ```
/// use gemfall_game::GameConfig;
///
/// let config = GameConfig::default().with_base_moves(12).with_base_target(200);
/// config.validate()?;
/// assert_eq!(config.moves_for_level(3), 14);
/// assert_eq!(config.target_for_level(1), 200);
/// # Ok::<(), gemfall_game::ConfigError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    rows: usize,
    cols: usize,
    #[serde(with = "alphabet_symbols")]
    alphabet: Alphabet,
    base_moves: u32,
    base_target: u64,
    target_multiplier: f64,
    #[serde(default)]
    scoring: ScoreRules,
    #[serde(default = "default_max_generation_attempts")]
    max_generation_attempts: NonZero<usize>,
    #[serde(default = "default_max_cascade_steps")]
    max_cascade_steps: NonZero<usize>,
}

fn default_max_generation_attempts() -> NonZero<usize> {
    DEFAULT_MAX_ATTEMPTS
}

fn default_max_cascade_steps() -> NonZero<usize> {
    DEFAULT_MAX_STEPS
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: 8,
            cols: 8,
            alphabet: Alphabet::reference(),
            base_moves: 18,
            base_target: 150,
            target_multiplier: 1.75,
            scoring: ScoreRules::default(),
            max_generation_attempts: DEFAULT_MAX_ATTEMPTS,
            max_cascade_steps: DEFAULT_MAX_STEPS,
        }
    }
}

impl GameConfig {
    /// Checks that the configuration describes a playable game.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows < 3 {
            return Err(ConfigError::TooFewRows { rows: self.rows });
        }
        if self.cols < 3 {
            return Err(ConfigError::TooFewCols { cols: self.cols });
        }
        if self.base_moves == 0 {
            return Err(ConfigError::NoMoves);
        }
        if self.base_target == 0 {
            return Err(ConfigError::NoTarget);
        }
        if !self.target_multiplier.is_finite() || self.target_multiplier < 1.0 {
            return Err(ConfigError::InvalidMultiplier {
                multiplier: self.target_multiplier,
            });
        }
        Ok(())
    }

    /// Sets the board size.
    #[must_use]
    pub fn with_size(mut self, rows: usize, cols: usize) -> Self {
        self.rows = rows;
        self.cols = cols;
        self
    }

    /// Sets the token alphabet.
    #[must_use]
    pub fn with_alphabet(mut self, alphabet: Alphabet) -> Self {
        self.alphabet = alphabet;
        self
    }

    /// Sets the number of moves on level 1.
    #[must_use]
    pub fn with_base_moves(mut self, base_moves: u32) -> Self {
        self.base_moves = base_moves;
        self
    }

    /// Sets the target score of level 1.
    #[must_use]
    pub fn with_base_target(mut self, base_target: u64) -> Self {
        self.base_target = base_target;
        self
    }

    /// Sets the per-level growth factor of the target score.
    #[must_use]
    pub fn with_target_multiplier(mut self, target_multiplier: f64) -> Self {
        self.target_multiplier = target_multiplier;
        self
    }

    /// Sets the scoring rules.
    #[must_use]
    pub fn with_scoring(mut self, scoring: ScoreRules) -> Self {
        self.scoring = scoring;
        self
    }

    /// Sets how many boards the generator may try before giving up.
    #[must_use]
    pub fn with_max_generation_attempts(mut self, attempts: NonZero<usize>) -> Self {
        self.max_generation_attempts = attempts;
        self
    }

    /// Sets the longest cascade resolved after one swap.
    #[must_use]
    pub fn with_max_cascade_steps(mut self, steps: NonZero<usize>) -> Self {
        self.max_cascade_steps = steps;
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

    /// Returns the token alphabet.
    #[must_use]
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Returns the number of moves on level 1.
    #[must_use]
    pub fn base_moves(&self) -> u32 {
        self.base_moves
    }

    /// Returns the target score of level 1.
    #[must_use]
    pub fn base_target(&self) -> u64 {
        self.base_target
    }

    /// Returns the per-level growth factor of the target score.
    #[must_use]
    pub fn target_multiplier(&self) -> f64 {
        self.target_multiplier
    }

    /// Returns the scoring rules.
    #[must_use]
    pub fn scoring(&self) -> ScoreRules {
        self.scoring
    }

    /// Returns the board generation retry cap.
    #[must_use]
    pub fn max_generation_attempts(&self) -> NonZero<usize> {
        self.max_generation_attempts
    }

    /// Returns the cascade step cap.
    #[must_use]
    pub fn max_cascade_steps(&self) -> NonZero<usize> {
        self.max_cascade_steps
    }

    /// Returns the moves available on `level` (1-based): one more per level.
    #[must_use]
    pub fn moves_for_level(&self, level: u32) -> u32 {
        self.base_moves.saturating_add(level.saturating_sub(1))
    }

    /// Returns the target score of `level` (1-based).
    ///
    /// The target is `floor(base_target × multiplier^(level − 1))`, saturating
    /// at `u64::MAX`.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::cast_sign_loss
    )]
    pub fn target_for_level(&self, level: u32) -> u64 {
        let exponent = i32::try_from(level.saturating_sub(1)).unwrap_or(i32::MAX);
        let target = (self.base_target as f64 * self.target_multiplier.powi(exponent)).floor();
        target as u64
    }
}

mod alphabet_symbols {
    use gemfall_core::Alphabet;
    use serde::{Deserialize as _, Deserializer, Serializer, de::Error as _};

    pub(super) fn serialize<S>(alphabet: &Alphabet, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let symbols: String = alphabet.symbols().iter().collect();
        serializer.serialize_str(&symbols)
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<Alphabet, D::Error>
    where
        D: Deserializer<'de>,
    {
        let symbols = String::deserialize(deserializer)?;
        Alphabet::new(symbols.chars()).map_err(D::Error::custom)
    }
}
