//! Command word resolution with fuzzy matching.

use strsim::jaro_winkler;

use super::command::{ALIASES, Alias, Command, split_input};

/// Minimum similarity score (0-100) for accepting an inexact command word.
pub const FUZZY_THRESHOLD: u8 = 80;

/// Shortest alias that takes part in fuzzy matching.
const MIN_FUZZY_LEN: usize = 2;

/// How a line of input was understood.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The command word is in the vocabulary.
    Exact(Command),
    /// The command word was a close typo of a known word.
    Corrected {
        /// The resolved command.
        command: Command,
        /// What the player typed.
        typed: String,
        /// The word it was taken for.
        matched: &'static str,
        /// Similarity score, 0-100.
        score: u8,
    },
    /// Nothing matched closely enough.
    Unknown {
        /// What the player typed.
        typed: String,
    },
}

/// Similarity of two words on a 0-100 scale.
pub fn similarity(a: &str, b: &str) -> u8 {
    (jaro_winkler(a, b) * 100.0).round() as u8
}

/// Maps typed command words to commands.
///
/// Built once per session; the vocabulary never changes afterwards.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    aliases: &'static [Alias],
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Dispatcher {
    /// Create a dispatcher over the standard vocabulary.
    pub fn new() -> Self {
        Self { aliases: ALIASES }
    }

    /// Resolve a line of input. Returns `None` for blank input.
    pub fn resolve(&self, input: &str) -> Option<Resolution> {
        let (token, argument) = split_input(input)?;

        if let Some(alias) = self.aliases.iter().find(|a| a.word == token) {
            return Some(Resolution::Exact(Command::from_alias(alias, &argument)));
        }

        let resolution = match self.closest(&token) {
            Some((alias, score)) if score >= FUZZY_THRESHOLD => {
                tracing::debug!(typed = %token, matched = alias.word, score, "command corrected");
                Resolution::Corrected {
                    command: Command::from_alias(alias, &argument),
                    typed: token,
                    matched: alias.word,
                    score,
                }
            }
            _ => Resolution::Unknown { typed: token },
        };
        Some(resolution)
    }

    /// The best-scoring alias. Ties go to the earlier entry.
    ///
    /// One-letter shorthands ("n", "i") only ever match exactly.
    fn closest(&self, token: &str) -> Option<(&'static Alias, u8)> {
        let mut best: Option<(&'static Alias, u8)> = None;
        for alias in self.aliases.iter().filter(|a| a.word.len() >= MIN_FUZZY_LEN) {
            let score = similarity(token, alias.word);
            if best.is_none_or(|(_, top)| score > top) {
                best = Some((alias, score));
            }
        }
        best
    }
}
