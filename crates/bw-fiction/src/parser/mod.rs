//! Command parsing and fuzzy resolution.

mod command;
mod resolver;

pub use command::{ALIASES, Alias, Command, Verb, split_input};
pub use resolver::{Dispatcher, FUZZY_THRESHOLD, Resolution, similarity};
