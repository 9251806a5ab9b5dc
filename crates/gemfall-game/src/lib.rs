//! Game sessions for the Gemfall match-3 engine.
//!
//! A [`Session`] is the state machine a host drives: it owns the board, turns
//! cell selections into swaps, resolves cascades, reshuffles deadlocked boards
//! and tracks score, moves and level progression. Presentation stays outside;
//! every entry point returns a structured result and the host renders the
//! session's read-only state afterwards.
//!
//! - [`config`]: [`GameConfig`] and its validation
//! - [`scoring`]: [`ScoreRules`] for cascade points
//! - [`cascade`]: the [`Cascade`] resolver
//! - [`session`]: [`Session`] and the outcomes of its operations
//! - [`snapshot`]: serializable [`SessionSnapshot`]s
//!
//! # Examples
//!
//! ```
//! use gemfall_game::{GameConfig, GamePhase, Session};
//! use gemfall_generator::BoardSeed;
//!
//! let mut session = Session::with_seed(GameConfig::default(), BoardSeed::from_phrase("intro"))?;
//! while session.phase() == GamePhase::Playing {
//!     let swap = session.hint().expect("playing boards always have a move");
//!     session.select_cell(swap.first())?;
//!     session.select_cell(swap.second())?;
//! }
//! assert!(session.phase().is_level_complete() || session.phase().is_game_over());
//! # Ok::<(), gemfall_game::GameError>(())
//! ```

pub mod cascade;
pub mod config;
mod error;
mod phase;
pub mod scoring;
pub mod session;
pub mod snapshot;

pub use self::{
    cascade::{Cascade, CascadeStep, DEFAULT_MAX_STEPS},
    config::{ConfigError, GameConfig},
    error::GameError,
    phase::GamePhase,
    scoring::ScoreRules,
    session::{MoveReport, SelectOutcome, Session},
    snapshot::{SessionSnapshot, SnapshotError},
};
