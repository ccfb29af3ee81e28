//! Command vocabulary and input tokenizing.

use std::fmt;

/// Every action the engine knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    /// Walk through an exit.
    Move,
    /// Examine an item.
    Look,
    /// Pick up an item.
    Take,
    /// Put down an item.
    Drop,
    /// Consume an item.
    Use,
    /// List carried items.
    Inventory,
    /// Show the map.
    Map,
    /// Show discovered lore.
    Journal,
    /// Write the save slot.
    Save,
    /// Read the save slot.
    Load,
    /// Show command help.
    Help,
    /// Enter the safe code.
    Unlock,
    /// Play the piano.
    Play,
    /// Rewind one step.
    Undo,
    /// Buy a tip with sanity.
    Hint,
    /// Sense the phantom.
    Listen,
    /// Stun the phantom with the flashlight.
    Flash,
    /// Leave the game.
    Quit,
}

impl Verb {
    /// Whether the verb can change game state, and so needs an undo step.
    pub fn is_mutating(self) -> bool {
        matches!(
            self,
            Self::Move
                | Self::Look
                | Self::Take
                | Self::Drop
                | Self::Use
                | Self::Unlock
                | Self::Play
                | Self::Flash
                | Self::Hint
                | Self::Load
        )
    }

    /// Whether the verb is still allowed once the session has ended.
    pub fn allowed_after_end(self) -> bool {
        matches!(self, Self::Undo | Self::Load | Self::Help | Self::Quit)
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Move => "go",
            Self::Look => "look",
            Self::Take => "take",
            Self::Drop => "drop",
            Self::Use => "use",
            Self::Inventory => "inventory",
            Self::Map => "map",
            Self::Journal => "journal",
            Self::Save => "save",
            Self::Load => "load",
            Self::Help => "help",
            Self::Unlock => "unlock",
            Self::Play => "play",
            Self::Undo => "undo",
            Self::Hint => "hint",
            Self::Listen => "listen",
            Self::Flash => "flash",
            Self::Quit => "quit",
        };
        f.write_str(name)
    }
}

/// A word the player may type, and what it means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alias {
    /// The command word.
    pub word: &'static str,
    /// The verb it selects.
    pub verb: Verb,
    /// Argument implied by the word itself (bare directions).
    pub argument: Option<&'static str>,
}

const fn verb(word: &'static str, verb: Verb) -> Alias {
    Alias {
        word,
        verb,
        argument: None,
    }
}

const fn direction(word: &'static str, name: &'static str) -> Alias {
    Alias {
        word,
        verb: Verb::Move,
        argument: Some(name),
    }
}

/// The fixed command vocabulary, in tie-break order.
pub const ALIASES: &[Alias] = &[
    verb("go", Verb::Move),
    verb("move", Verb::Move),
    verb("walk", Verb::Move),
    verb("look", Verb::Look),
    verb("inspect", Verb::Look),
    verb("examine", Verb::Look),
    verb("read", Verb::Look),
    verb("take", Verb::Take),
    verb("get", Verb::Take),
    verb("grab", Verb::Take),
    verb("drop", Verb::Drop),
    verb("use", Verb::Use),
    verb("inventory", Verb::Inventory),
    verb("inv", Verb::Inventory),
    verb("i", Verb::Inventory),
    verb("map", Verb::Map),
    verb("journal", Verb::Journal),
    verb("j", Verb::Journal),
    verb("save", Verb::Save),
    verb("load", Verb::Load),
    verb("help", Verb::Help),
    verb("unlock", Verb::Unlock),
    verb("play", Verb::Play),
    verb("undo", Verb::Undo),
    verb("hint", Verb::Hint),
    verb("listen", Verb::Listen),
    verb("flash", Verb::Flash),
    verb("quit", Verb::Quit),
    verb("exit", Verb::Quit),
    direction("north", "north"),
    direction("n", "north"),
    direction("south", "south"),
    direction("s", "south"),
    direction("east", "east"),
    direction("e", "east"),
    direction("west", "west"),
    direction("w", "west"),
    direction("up", "up"),
    direction("u", "up"),
    direction("down", "down"),
    direction("d", "down"),
];

/// A resolved command: a verb and its free-text argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    /// What to do.
    pub verb: Verb,
    /// Everything after the command word, passed through untouched.
    pub argument: String,
}

impl Command {
    /// Build a command from an alias and the typed argument.
    pub fn from_alias(alias: &Alias, argument: &str) -> Self {
        let argument = match alias.argument {
            Some(implied) => implied.to_string(),
            None => argument.to_string(),
        };
        Self {
            verb: alias.verb,
            argument,
        }
    }
}

/// Split input into a lowercase command word and the rest of the line.
///
/// Returns `None` for blank input.
pub fn split_input(input: &str) -> Option<(String, String)> {
    let lower = input.trim().to_lowercase();
    let mut words = lower.split_whitespace();
    let token = words.next()?.to_string();
    let rest = words.collect::<Vec<_>>().join(" ");
    Some((token, rest))
}
