//! Structured results of player commands.
//!
//! Handlers never print. They return an [`Outcome`] (or a
//! [`FictionError`](crate::FictionError)) and the presentation layer decides
//! how to show it.

use chrono::{DateTime, Utc};

use crate::narrator::HauntedText;
use crate::phantom::{Proximity, StunOutcome, TickReport};
use crate::player::DeathCause;

/// What a successful command did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The player walked into another room.
    Moved {
        /// Destination room ID.
        room: String,
        /// Name of the room that was unlocked on the way in, if any.
        unlocked: Option<String>,
        /// What the phantom did afterwards.
        tick: TickReport,
        /// Set if the room killed the player.
        death: Option<DeathCause>,
    },
    /// The player examined an item.
    Examined {
        /// Item name.
        name: String,
        /// Description, possibly warped by low sanity.
        description: HauntedText,
        /// Hidden text revealed by the inspection.
        revealed: Option<String>,
        /// Whether the revealed text was new to the journal.
        new_lore: bool,
    },
    /// Bare `look`: the caller should redraw the room.
    LookedAround,
    /// An item moved into the inventory.
    Taken {
        /// Item name.
        name: String,
    },
    /// An item moved out of the inventory into the room.
    Dropped {
        /// Item name.
        name: String,
    },
    /// Batteries were used.
    Recharged {
        /// Battery level afterwards.
        battery: i32,
    },
    /// The amulet was used.
    Soothed {
        /// Sanity afterwards.
        sanity: i32,
    },
    /// The target has no use effect. Nothing changed.
    CannotUse {
        /// What the player tried to use.
        target: String,
    },
    /// The safe code was right; the silver key is now in the room.
    SafeOpened,
    /// The safe was opened earlier.
    SafeAlreadyOpen,
    /// The safe code was wrong.
    WrongCode {
        /// Sanity lost.
        penalty: i32,
    },
    /// No safe here, or the target was not the safe.
    NothingToUnlock,
    /// The piano tune was right and a hidden exit opened.
    PianoSolved {
        /// Direction of the new exit.
        direction: &'static str,
    },
    /// The piano puzzle was solved earlier. Nothing changed.
    PianoAlreadySolved,
    /// The notes were wrong.
    WrongSequence {
        /// Sanity lost.
        penalty: i32,
    },
    /// No piano here, or the target was not the piano.
    NoPiano,
    /// The flashlight was fired.
    Flashed {
        /// Battery spent.
        cost: i32,
        /// Whether it hit the phantom.
        stun: StunOutcome,
    },
    /// Result of listening for the phantom.
    Heard(Proximity),
    /// A bought tip.
    Hint {
        /// The tip.
        text: &'static str,
        /// Sanity spent.
        cost: i32,
    },
    /// Show the inventory.
    ShowInventory,
    /// Show the map.
    ShowMap,
    /// Show the journal.
    ShowJournal,
    /// Show command help.
    ShowHelp,
    /// The save slot was written.
    Saved,
    /// The save slot was restored.
    Loaded {
        /// When that save was written.
        saved_at: DateTime<Utc>,
    },
    /// One step was rewound.
    Undone,
    /// The player asked to leave.
    Quit,
}

/// A typo that was accepted as a known command word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Correction {
    /// What the player typed.
    pub typed: String,
    /// The word it was taken for.
    pub matched: &'static str,
    /// Similarity score, 0-100.
    pub score: u8,
}

/// How a finished session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ending {
    /// The player reached the garden.
    Escaped {
        /// Final score.
        score: i64,
        /// Whether the sapphire came along.
        wealthy: bool,
    },
    /// The player died.
    Died(DeathCause),
}

/// Everything one line of input produced.
#[derive(Debug)]
pub struct Turn {
    /// Set when the command word was a corrected typo.
    pub correction: Option<Correction>,
    /// The handler's result.
    pub result: crate::FictionResult<Outcome>,
    /// Set once the session has ended, including by this turn.
    pub ending: Option<Ending>,
}
