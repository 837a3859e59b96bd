use crate::battle::state::{BattlePhase, Side};
use std::path::PathBuf;

/// Main error type for the creature battle engine
#[derive(Debug, thiserror::Error)]
pub enum BattleEngineError {
    /// A creature record could not be turned into a combatant
    #[error("invalid source record: {0}")]
    InvalidSourceRecord(#[from] SourceRecordError),
    /// A command was rejected by the turn scheduler
    #[error("submission rejected: {0}")]
    Submission(#[from] SubmissionError),
    /// The move catalog is malformed
    #[error("move catalog error: {0}")]
    Catalog(#[from] CatalogError),
    /// The engine configuration could not be loaded
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors raised while building a combatant from a source record
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SourceRecordError {
    #[error("record has no identifier")]
    MissingId,
    #[error("record {id} has no name")]
    MissingName { id: u32 },
}

/// Reasons the scheduler refuses a move submission.
///
/// These leave the session untouched; callers can treat them as no-ops.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionError {
    #[error("battle is not in progress (phase: {phase:?})")]
    BattleNotInProgress { phase: BattlePhase },
    #[error("it is not {side:?}'s turn")]
    NotPlayersTurn { side: Side },
    #[error("a turn is already being resolved")]
    BattleLocked,
    #[error("invalid move index: {0}")]
    InvalidMoveIndex(usize),
    #[error("move {0} has no uses remaining")]
    MoveDepleted(usize),
    #[error("cannot pass while a usable move remains")]
    MovesStillUsable,
}

/// Errors related to loading the move catalog
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogError {
    #[error("malformed catalog data: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("rules reference unknown move '{0}'")]
    UnknownMove(String),
    #[error("move '{key}' has accuracy {accuracy}, expected 0-100")]
    InvalidAccuracy { key: String, accuracy: u8 },
    #[error("move '{0}' has no uses")]
    ZeroUses(String),
}

/// Errors related to loading the engine configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed configuration: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Type alias for Results using BattleEngineError
pub type BattleResult<T> = Result<T, BattleEngineError>;

/// Type alias for Results using SubmissionError
pub type SubmissionResult<T> = Result<T, SubmissionError>;

/// Type alias for Results using CatalogError
pub type CatalogResult<T> = Result<T, CatalogError>;
