use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::item::Item;

/// A single room of the manor.
///
/// `id`, `name` and `description` never change after the world is built.
/// Everything else is captured by [`RoomState`] and may change during play.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    /// Stable key, e.g. `"foyer"`.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Text shown on entering.
    pub description: String,
    /// Direction name to destination room ID.
    pub exits: BTreeMap<String, String>,
    /// Items lying in the room, in display order.
    pub items: Vec<Item>,
    /// Whether the room needs a light source.
    pub dark: bool,
    /// Whether the room is locked.
    pub locked: bool,
    /// Item ID that unlocks the room.
    pub key_id: Option<String>,
}

impl Room {
    /// Create an unlocked, lit, empty room with no exits.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            exits: BTreeMap::new(),
            items: Vec::new(),
            dark: false,
            locked: false,
            key_id: None,
        }
    }

    /// Add an exit in `direction` leading to `target`.
    pub fn with_exit(mut self, direction: impl Into<String>, target: impl Into<String>) -> Self {
        self.exits.insert(direction.into(), target.into());
        self
    }

    /// Place an item in the room.
    pub fn with_item(mut self, item: Item) -> Self {
        self.items.push(item);
        self
    }

    /// Mark the room as dark.
    pub fn dark(mut self) -> Self {
        self.dark = true;
        self
    }

    /// Lock the room behind the item with ID `key_id`.
    pub fn locked_by(mut self, key_id: impl Into<String>) -> Self {
        self.locked = true;
        self.key_id = Some(key_id.into());
        self
    }

    /// Find an item in the room by name or ID.
    pub fn find_item(&self, query: &str) -> Option<&Item> {
        self.items.iter().find(|i| i.matches(query))
    }

    /// Whether an item with the given ID lies here.
    pub fn has_item(&self, item_id: &str) -> bool {
        self.items.iter().any(|i| i.id == item_id)
    }

    /// Whether the room can be entered by someone carrying `held` item IDs.
    pub fn opens_for<'a>(&self, mut held: impl Iterator<Item = &'a str>) -> bool {
        if !self.locked {
            return true;
        }
        match &self.key_id {
            Some(key) => held.any(|id| id == key),
            None => false,
        }
    }

    /// Copy out the mutable part of the room.
    pub fn state(&self) -> RoomState {
        RoomState {
            locked: self.locked,
            items: self.items.clone(),
            exits: self.exits.clone(),
        }
    }

    /// Overwrite the mutable part of the room.
    pub fn apply_state(&mut self, state: RoomState) {
        self.locked = state.locked;
        self.items = state.items;
        self.exits = state.exits;
    }
}

/// The part of a [`Room`] that changes during play.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RoomState {
    /// Lock flag.
    pub locked: bool,
    /// Items in the room.
    pub items: Vec<Item>,
    /// Exits, including any opened at runtime.
    pub exits: BTreeMap<String, String>,
}
