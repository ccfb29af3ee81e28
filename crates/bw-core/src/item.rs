use serde::{Deserialize, Serialize};

/// A thing that lives either in a room or in the player's inventory.
///
/// Items are immutable once built. Moving an item between containers moves
/// the value itself, so an item is never referenced by two containers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Item {
    /// Stable key, e.g. `"iron_key"`.
    pub id: String,
    /// Display name, e.g. `"Iron Key"`.
    pub name: String,
    /// Text shown when the item is examined.
    pub description: String,
    /// Whether the item can be picked up.
    pub takeable: bool,
    /// Whether examining the item can reveal hidden text.
    pub interactable: bool,
    /// Text revealed on close inspection, if any.
    pub hidden_text: Option<String>,
    /// Points added to the final score when carried out of the manor.
    pub value: u32,
}

impl Item {
    /// Create a takeable, non-interactable item worth nothing.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            takeable: true,
            interactable: false,
            hidden_text: None,
            value: 0,
        }
    }

    /// Mark the item as fixed in place.
    pub fn fixed(mut self) -> Self {
        self.takeable = false;
        self
    }

    /// Attach text that is revealed when the item is examined.
    pub fn with_hidden_text(mut self, text: impl Into<String>) -> Self {
        self.interactable = true;
        self.hidden_text = Some(text.into());
        self
    }

    /// Set the item's score value.
    pub fn with_value(mut self, value: u32) -> Self {
        self.value = value;
        self
    }

    /// Whether `query` names this item, by lowercase display name or by ID.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim();
        self.id == query || self.name.eq_ignore_ascii_case(query)
    }
}
