//! Horror interactive-fiction engine for Blackwood.
//!
//! Drives a single-player escape from Blackwood Manor: tolerant command
//! parsing with typo correction, two depleting resources (sanity and
//! battery), a roaming phantom, two gating puzzles, and snapshot-based undo
//! and save/load. Handlers return structured [`Outcome`]s; rendering is left
//! to the caller.

/// Session configuration and difficulty.
pub mod config;
/// Error types for the fiction engine.
pub mod error;
/// Context-sensitive tips.
pub mod hints;
/// Sanity-driven text mutation.
pub mod narrator;
/// Structured command results.
pub mod outcome;
/// Command parsing and fuzzy resolution.
pub mod parser;
/// The phantom adversary.
pub mod phantom;
/// Player state management.
pub mod player;
/// Game session management.
pub mod session;
/// Snapshots, undo history and the save slot.
pub mod snapshot;
/// Read-only views for the presentation layer.
pub mod view;

pub use config::{Difficulty, GameConfig};
pub use error::{FictionError, FictionResult};
pub use outcome::{Correction, Ending, Outcome, Turn};
pub use parser::{Command, Dispatcher, Verb};
pub use phantom::Phantom;
pub use player::{DeathCause, PlayerState};
pub use session::{GameSession, Prompt};
pub use snapshot::{FileSlot, MemorySlot, SaveSlot, Snapshot};
