//! Read-only data handed to the presentation layer each turn.

use crate::config::Difficulty;
use crate::narrator::HauntedText;

/// Shown at the gate until the foyer has been opened.
pub const TUTORIAL_TIP: &str = "Type 'take iron key' then 'go north'.";

/// Command summary for `help`, as (command, description) pairs.
pub const COMMAND_HELP: &[(&str, &str)] = &[
    ("go <dir>", "Move (north, south, east, west, up, down)"),
    ("look [item]", "Examine an item, or the room"),
    ("take <item>", "Pick something up"),
    ("drop <item>", "Put something down"),
    ("use <item>", "Use batteries or the amulet"),
    ("unlock safe", "Enter the safe code"),
    ("play piano", "Play a tune"),
    ("flash", "Stun the phantom (costs battery)"),
    ("listen", "Sense the phantom"),
    ("hint", "Get a tip (costs sanity)"),
    ("inventory", "List what you carry"),
    ("journal", "Read discovered lore"),
    ("map", "Show explored rooms"),
    ("undo", "Rewind one step"),
    ("save / load", "Use the save slot"),
    ("quit", "Leave the manor"),
];

/// The current room as the player perceives it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomView {
    /// Room ID.
    pub id: String,
    /// Room name.
    pub name: String,
    /// Description, or `None` when it is pitch black.
    pub description: Option<HauntedText>,
    /// Names of items lying here.
    pub items: Vec<String>,
    /// Exit directions.
    pub exits: Vec<String>,
    /// Tutorial overlay, if it still applies.
    pub tutorial: Option<&'static str>,
    /// Sanity is low enough for the broken-mind style.
    pub broken: bool,
}

/// Resource gauges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusView {
    /// Sanity, 0-100.
    pub sanity: i32,
    /// Battery, 0-100.
    pub battery: i32,
    /// Moves made.
    pub turns: u32,
    /// Session difficulty.
    pub difficulty: Difficulty,
}

/// How a room appears on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapCell {
    /// The player is here.
    Current,
    /// Entered before.
    Visited,
    /// Never entered.
    Unknown,
}
