//! Error types for the fiction engine.

use bw_core::WorldError;
use thiserror::Error;

/// Result type for fiction operations.
pub type FictionResult<T> = Result<T, FictionError>;

/// Errors that can occur while resolving a command.
///
/// Every variant except [`FictionError::Corrupted`] is a recoverable,
/// player-facing outcome. A command that fails leaves the game state as it
/// was.
#[derive(Debug, Error)]
pub enum FictionError {
    /// No exit in that direction.
    #[error("You can't go '{0}'.")]
    InvalidDirection(String),

    /// The destination is locked and the key is not carried.
    #[error("{0} is locked.")]
    Locked(String),

    /// Target item or fixture is not here.
    #[error("You can't see '{0}'.")]
    NotFound(String),

    /// The item exists but cannot be picked up.
    #[error("You can't take '{0}'.")]
    CannotTake(String),

    /// Inventory is at capacity.
    #[error("Your hands are full. Drop something first.")]
    InventoryFull,

    /// Item not in inventory.
    #[error("You are not carrying '{0}'.")]
    NotCarried(String),

    /// Missing item or not enough battery.
    #[error("{0}")]
    InsufficientResource(String),

    /// The command word matched nothing closely enough.
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// The undo history is empty.
    #[error("Nothing to undo.")]
    NothingToUndo,

    /// The session has ended; only undo, load, help and quit remain.
    #[error("The story is over. Try 'undo' or 'load'.")]
    GameOver,

    /// A puzzle asked a question and no answer came.
    #[error("No answer given.")]
    NoAnswer,

    /// The save slot could not be read or decoded.
    #[error("Load failed: {0}")]
    LoadFailed(String),

    /// The save slot could not be written.
    #[error("Save failed: {0}")]
    SaveFailed(String),

    /// A snapshot failed validation.
    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),

    /// The world definition or a snapshot is internally inconsistent.
    #[error("world is corrupted: {0}")]
    Corrupted(#[from] WorldError),
}

impl FictionError {
    /// Whether this error signals a broken world rather than bad input.
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::Corrupted(_))
    }
}
