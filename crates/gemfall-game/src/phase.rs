use serde::{Deserialize, Serialize};

/// The lifecycle phase of a [`Session`](crate::Session).
///
/// Only [`GamePhase::Playing`] accepts cell selections.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::IsVariant,
)]
pub enum GamePhase {
    /// The player is making moves.
    #[default]
    #[display("playing")]
    Playing,
    /// The target score was reached; waiting for the next level.
    #[display("level complete")]
    LevelComplete,
    /// The moves ran out before the target was reached.
    #[display("game over")]
    GameOver,
}
