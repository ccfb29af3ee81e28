//! Sanity-driven hallucinations.
//!
//! Below [`HALLUCINATION_THRESHOLD`] sanity, certain words in room and item
//! descriptions may be swapped for darker ones. Each candidate word costs
//! exactly one draw from the session's random stream; other words cost
//! nothing, so the stream's consumption depends only on the text and the
//! sanity value.

use std::fmt;

use rand::Rng;
use rand::rngs::StdRng;

/// At or below this sanity, descriptions start to warp.
pub const HALLUCINATION_THRESHOLD: i32 = 60;
/// Below this sanity the presentation shows a broken-mind style.
pub const BROKEN_THRESHOLD: i32 = 30;

/// Chance that a candidate word is swapped.
const SWAP_CHANCE: f64 = 0.4;

const SWAPS: &[(&str, &str)] = &[
    ("dust", "ash"),
    ("quiet", "whispering"),
    ("shadows", "monsters"),
    ("smell", "stench"),
    ("smells", "stenches"),
    ("old", "ancient"),
    ("piano", "coffin"),
    ("battery", "lifeline"),
    ("light", "hope"),
    ("safe", "vault"),
];

/// One word of a possibly-haunted text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    /// The word, punctuation included.
    pub text: String,
    /// Whether this word was swapped.
    pub haunted: bool,
}

/// A description after hallucinations were applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HauntedText {
    /// Words in order.
    pub spans: Vec<Span>,
}

impl HauntedText {
    /// Whether any word was swapped.
    pub fn is_haunted(&self) -> bool {
        self.spans.iter().any(|s| s.haunted)
    }
}

impl fmt::Display for HauntedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, span) in self.spans.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(&span.text)?;
        }
        Ok(())
    }
}

/// Warp `text` according to `sanity`, drawing from `rng`.
pub fn haunt_text(text: &str, sanity: i32, rng: &mut StdRng) -> HauntedText {
    let spans = text
        .split_whitespace()
        .map(|word| {
            if sanity > HALLUCINATION_THRESHOLD {
                return plain(word);
            }
            let (lead, core, trail) = split_punctuation(word);
            let Some(replacement) = lookup(core) else {
                return plain(word);
            };
            if !rng.random_bool(SWAP_CHANCE) {
                return plain(word);
            }
            Span {
                text: format!("{lead}{}{trail}", match_case(core, replacement)),
                haunted: true,
            }
        })
        .collect();
    HauntedText { spans }
}

fn plain(word: &str) -> Span {
    Span {
        text: word.to_string(),
        haunted: false,
    }
}

fn lookup(core: &str) -> Option<&'static str> {
    let lower = core.to_lowercase();
    SWAPS.iter().find(|(from, _)| *from == lower).map(|(_, to)| *to)
}

fn split_punctuation(word: &str) -> (&str, &str, &str) {
    let is_punct = |c: char| ".,!?:;'\"".contains(c);
    let core_start = word.find(|c: char| !is_punct(c)).unwrap_or(word.len());
    let core_end = word
        .rfind(|c: char| !is_punct(c))
        .map_or(core_start, |i| i + word[i..].chars().next().map_or(1, char::len_utf8));
    (
        &word[..core_start],
        &word[core_start..core_end],
        &word[core_end..],
    )
}

fn match_case(original: &str, replacement: &str) -> String {
    match original.chars().next() {
        Some(c) if c.is_uppercase() => {
            let mut chars = replacement.chars();
            chars
                .next()
                .map(|first| first.to_uppercase().chain(chars).collect())
                .unwrap_or_default()
        }
        _ => replacement.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{RngCore, SeedableRng};

    const TEXT: &str = "Grand entrance. Dust everywhere, old shadows and quiet.";

    #[test]
    fn sane_text_is_untouched_and_draws_nothing() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut fresh = StdRng::seed_from_u64(1);

        let out = haunt_text(TEXT, 61, &mut rng);
        assert_eq!(out.to_string(), TEXT);
        assert!(!out.is_haunted());
        assert_eq!(rng.next_u64(), fresh.next_u64());
    }

    #[test]
    fn low_sanity_swaps_some_words() {
        let mut rng = StdRng::seed_from_u64(0);
        let haunted_any = (0..20).any(|_| haunt_text(TEXT, 10, &mut rng).is_haunted());
        assert!(haunted_any);
    }

    #[test]
    fn swaps_keep_case_and_punctuation() {
        let mut rng = StdRng::seed_from_u64(0);
        for _ in 0..50 {
            let out = haunt_text("Dust.", 0, &mut rng);
            let text = out.to_string();
            assert!(text == "Dust." || text == "Ash.", "got {text}");
        }
    }

    #[test]
    fn same_seed_same_hallucination() {
        let a = haunt_text(TEXT, 20, &mut StdRng::seed_from_u64(77));
        let b = haunt_text(TEXT, 20, &mut StdRng::seed_from_u64(77));
        assert_eq!(a, b);
    }

    #[test]
    fn split_punctuation_parts() {
        assert_eq!(split_punctuation("dust,"), ("", "dust", ","));
        assert_eq!(split_punctuation("'old'"), ("'", "old", "'"));
        assert_eq!(split_punctuation("..."), ("...", "", ""));
    }

    #[test]
    fn match_case_capitalises() {
        assert_eq!(match_case("Quiet", "whispering"), "Whispering");
        assert_eq!(match_case("quiet", "whispering"), "whispering");
    }
}
