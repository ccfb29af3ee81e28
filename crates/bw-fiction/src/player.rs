//! Player state management.

use std::collections::BTreeSet;

use bw_core::Item;
use bw_core::manor::items;
use serde::{Deserialize, Serialize};

use crate::config::Difficulty;
use crate::error::{FictionError, FictionResult};

/// Maximum number of items the player can carry.
pub const MAX_INVENTORY: usize = 5;
/// Upper bound of sanity and battery.
pub const MAX_RESOURCE: i32 = 100;

/// Why a session ended badly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeathCause {
    /// Entered a dark room without a light.
    Darkness,
    /// Entered a dark room with a dead flashlight.
    DeadBattery,
    /// Sanity reached zero.
    MindShattered,
}

/// The player's state in a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlayerState {
    /// Current room ID.
    pub room_id: String,
    /// Carried items, in pickup order.
    pub inventory: Vec<Item>,
    /// Rooms entered at least once.
    pub visited: BTreeSet<String>,
    /// Discovered lore, without duplicates.
    pub journal: Vec<String>,
    /// Sanity, 0-100.
    pub sanity: i32,
    /// Flashlight battery, 0-100.
    pub battery: i32,
    /// Number of successful moves.
    pub turns: u32,
    /// Cleared on death.
    pub alive: bool,
    /// Set on reaching the garden.
    pub escaped: bool,
    /// Set when the foyer is first unlocked.
    pub tutorial_done: bool,
    /// Session difficulty.
    pub difficulty: Difficulty,
    /// Set together with `alive = false`.
    pub cause_of_death: Option<DeathCause>,
}

impl PlayerState {
    /// Create a fresh player standing in `room_id`.
    pub fn new(room_id: impl Into<String>, difficulty: Difficulty) -> Self {
        let room_id = room_id.into();
        let mut visited = BTreeSet::new();
        visited.insert(room_id.clone());
        Self {
            room_id,
            inventory: Vec::new(),
            visited,
            journal: Vec::new(),
            sanity: MAX_RESOURCE,
            battery: MAX_RESOURCE,
            turns: 0,
            alive: true,
            escaped: false,
            tutorial_done: false,
            difficulty,
            cause_of_death: None,
        }
    }

    /// Check if the player has an item with this ID.
    pub fn has_item(&self, item_id: &str) -> bool {
        self.inventory.iter().any(|i| i.id == item_id)
    }

    /// Find a carried item by name or ID.
    pub fn find_item(&self, query: &str) -> Option<&Item> {
        self.inventory.iter().find(|i| i.matches(query))
    }

    /// Whether the flashlight is carried.
    pub fn has_light(&self) -> bool {
        self.has_item(items::FLASHLIGHT)
    }

    /// Whether another item fits.
    pub fn has_room(&self) -> bool {
        self.inventory.len() < MAX_INVENTORY
    }

    /// IDs of carried items.
    pub fn item_ids(&self) -> impl Iterator<Item = &str> {
        self.inventory.iter().map(|i| i.id.as_str())
    }

    /// Add an item to inventory.
    ///
    /// Callers check [`PlayerState::has_room`] before taking the item out of
    /// its room, so a full inventory never loses an item.
    pub fn add_item(&mut self, item: Item) -> FictionResult<()> {
        if !self.has_room() {
            return Err(FictionError::InventoryFull);
        }
        self.inventory.push(item);
        Ok(())
    }

    /// Remove an item by name or ID.
    pub fn remove_item(&mut self, query: &str) -> FictionResult<Item> {
        let pos = self
            .inventory
            .iter()
            .position(|i| i.matches(query))
            .ok_or_else(|| FictionError::NotCarried(query.to_string()))?;
        Ok(self.inventory.remove(pos))
    }

    /// Add a signed amount to sanity, saturating at 0 and 100.
    pub fn adjust_sanity(&mut self, delta: i32) {
        self.sanity = self.sanity.saturating_add(delta).clamp(0, MAX_RESOURCE);
    }

    /// Add a signed amount to battery, saturating at 0 and 100.
    pub fn adjust_battery(&mut self, delta: i32) {
        self.battery = self.battery.saturating_add(delta).clamp(0, MAX_RESOURCE);
    }

    /// Record a room as visited.
    pub fn visit(&mut self, room_id: &str) {
        self.visited.insert(room_id.to_string());
    }

    /// Append a journal entry unless it is already there.
    ///
    /// Returns `true` if the entry is new.
    pub fn record_lore(&mut self, entry: impl Into<String>) -> bool {
        let entry = entry.into();
        if self.journal.contains(&entry) {
            return false;
        }
        self.journal.push(entry);
        true
    }

    /// End the session badly.
    pub fn die(&mut self, cause: DeathCause) {
        self.alive = false;
        self.cause_of_death = Some(cause);
    }

    /// Whether the session has reached a terminal state.
    pub fn is_finished(&self) -> bool {
        !self.alive || self.escaped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn player() -> PlayerState {
        PlayerState::new("gate", Difficulty::Normal)
    }

    fn trinket(n: usize) -> Item {
        Item::new(format!("trinket_{n}"), format!("Trinket {n}"), "")
    }

    #[test]
    fn player_state_new() {
        let p = player();
        assert_eq!(p.room_id, "gate");
        assert!(p.visited.contains("gate"));
        assert_eq!(p.sanity, 100);
        assert_eq!(p.battery, 100);
        assert!(p.alive && !p.escaped && !p.tutorial_done);
    }

    #[test]
    fn inventory_capacity() {
        let mut p = player();
        for n in 0..MAX_INVENTORY {
            p.add_item(trinket(n)).unwrap();
        }
        assert!(!p.has_room());
        assert!(matches!(
            p.add_item(trinket(99)),
            Err(FictionError::InventoryFull)
        ));
        assert_eq!(p.inventory.len(), MAX_INVENTORY);
    }

    #[test]
    fn remove_by_name_or_id() {
        let mut p = player();
        p.add_item(Item::new("amulet", "Jade Amulet", "")).unwrap();
        p.add_item(Item::new("note", "Crumpled Note", "")).unwrap();

        assert_eq!(p.remove_item("jade amulet").unwrap().id, "amulet");
        assert_eq!(p.remove_item("note").unwrap().id, "note");
        assert!(matches!(
            p.remove_item("note"),
            Err(FictionError::NotCarried(_))
        ));
    }

    #[test]
    fn lore_is_deduplicated() {
        let mut p = player();
        assert!(p.record_lore("Note: Code: 123"));
        assert!(!p.record_lore("Note: Code: 123"));
        assert_eq!(p.journal.len(), 1);
    }

    #[test]
    fn visit_is_idempotent() {
        let mut p = player();
        p.visit("foyer");
        p.visit("foyer");
        assert_eq!(p.visited.len(), 2);
    }

    #[test]
    fn death_records_cause() {
        let mut p = player();
        p.die(DeathCause::Darkness);
        assert!(!p.alive);
        assert!(p.is_finished());
        assert_eq!(p.cause_of_death, Some(DeathCause::Darkness));
    }

    #[test]
    fn visited_serializes_as_sorted_sequence() {
        let mut p = player();
        p.visit("attic");
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["visited"], serde_json::json!(["attic", "gate"]));
    }

    proptest! {
        #[test]
        fn resources_stay_in_bounds(deltas in prop::collection::vec(-250i32..250, 0..40)) {
            let mut p = player();
            for d in deltas {
                p.adjust_sanity(d);
                p.adjust_battery(-d);
                prop_assert!((0..=MAX_RESOURCE).contains(&p.sanity));
                prop_assert!((0..=MAX_RESOURCE).contains(&p.battery));
            }
        }

        #[test]
        fn inventory_never_exceeds_capacity(count in 0usize..20) {
            let mut p = player();
            for n in 0..count {
                let _ = p.add_item(trinket(n));
            }
            prop_assert!(p.inventory.len() <= MAX_INVENTORY);
            prop_assert_eq!(p.inventory.len(), count.min(MAX_INVENTORY));
        }
    }
}
