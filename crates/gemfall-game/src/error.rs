use gemfall_generator::GenerationError;

use crate::{ConfigError, GamePhase, SnapshotError};

/// Errors returned by [`Session`](crate::Session) operations.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum GameError {
    /// The game configuration is not playable.
    #[display("invalid configuration: {_0}")]
    Config(#[from] ConfigError),
    /// No playable board could be generated.
    #[display("board generation failed: {_0}")]
    Generation(#[from] GenerationError),
    /// A snapshot does not describe a valid session for the configuration.
    #[display("invalid snapshot: {_0}")]
    Snapshot(#[from] SnapshotError),
    /// The operation is not allowed in the current phase.
    #[display("operation requires the {expected} phase, but the game is in the {actual} phase")]
    InvalidPhase {
        /// Phase the operation requires.
        expected: GamePhase,
        /// Phase the session is in.
        actual: GamePhase,
    },
}
