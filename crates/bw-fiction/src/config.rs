//! Session configuration.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How hard the manor pushes back. Fixed for the whole session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    /// Halved drains and damage.
    Story,
    /// Base values.
    #[default]
    Normal,
    /// Drains and damage times one and a half.
    Hard,
}

impl Difficulty {
    /// All difficulties in menu order.
    pub const ALL: [Difficulty; 3] = [Self::Story, Self::Normal, Self::Hard];

    /// Multiplier applied to every drain and damage amount.
    pub fn multiplier(self) -> f64 {
        match self {
            Self::Story => 0.5,
            Self::Normal => 1.0,
            Self::Hard => 1.5,
        }
    }

    /// Scale a base amount, rounding to the nearest integer.
    pub fn scale(self, base: i32) -> i32 {
        (f64::from(base) * self.multiplier()).round() as i32
    }

    /// Parse a difficulty name or its menu number (1-3).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "1" | "story" => Some(Self::Story),
            "2" | "normal" => Some(Self::Normal),
            "3" | "hard" | "hardcore" => Some(Self::Hard),
            _ => None,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Story => write!(f, "story"),
            Self::Normal => write!(f, "normal"),
            Self::Hard => write!(f, "hard"),
        }
    }
}

/// Configuration for a game session.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Seed for the session's random stream.
    pub seed: u64,
    /// Difficulty for the session.
    pub difficulty: Difficulty,
    /// Maximum number of undo steps kept.
    pub history_capacity: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            difficulty: Difficulty::Normal,
            history_capacity: 10,
        }
    }
}

impl GameConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the difficulty.
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Set the undo capacity (at least 1).
    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = GameConfig::default();
        assert_eq!(cfg.seed, 42);
        assert_eq!(cfg.difficulty, Difficulty::Normal);
        assert_eq!(cfg.history_capacity, 10);
    }

    #[test]
    fn builder_methods() {
        let cfg = GameConfig::default()
            .with_seed(1234)
            .with_difficulty(Difficulty::Hard)
            .with_history_capacity(0);
        assert_eq!(cfg.seed, 1234);
        assert_eq!(cfg.difficulty, Difficulty::Hard);
        assert_eq!(cfg.history_capacity, 1);
    }

    #[test]
    fn scale_rounds() {
        assert_eq!(Difficulty::Story.scale(15), 8);
        assert_eq!(Difficulty::Normal.scale(15), 15);
        assert_eq!(Difficulty::Hard.scale(15), 23);
        assert_eq!(Difficulty::Story.scale(1), 1);
        assert_eq!(Difficulty::Hard.scale(20), 30);
    }

    #[test]
    fn parse_names_and_numbers() {
        assert_eq!(Difficulty::parse("1"), Some(Difficulty::Story));
        assert_eq!(Difficulty::parse("Normal"), Some(Difficulty::Normal));
        assert_eq!(Difficulty::parse("hardcore"), Some(Difficulty::Hard));
        assert_eq!(Difficulty::parse("4"), None);
    }
}
