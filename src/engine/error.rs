use thiserror::Error;

/// Failures surfaced by session operations.
///
/// Every variant is returned before any mutation takes place, so a failed
/// command always leaves the session exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The caller supplied unusable input (blank name, empty participant
    /// list, unknown player id, ...).
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// A mutating operation targeted a round that is missing or no longer
    /// accepts it (concluded or archived).
    #[error("round is not active")]
    RoundNotActive,
    /// Undo was requested while the archive is empty.
    #[error("no archived round to restore")]
    NothingToUndo,
    /// Undo would discard regular entries recorded in the current round.
    #[error("current round has regular entries; archive it before undoing")]
    UndoBlocked,
    /// Registry growth is blocked while the open round has a burned
    /// participant.
    #[error("cannot add a player while the current round has a burned participant")]
    AddPlayerBlocked,
}
