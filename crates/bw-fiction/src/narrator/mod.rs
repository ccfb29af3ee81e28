//! Narrator: text the engine produces for the presentation layer.

mod haunt;

pub use haunt::{BROKEN_THRESHOLD, HALLUCINATION_THRESHOLD, HauntedText, Span, haunt_text};
