//! Versioned snapshots of the mutable session state.
//!
//! A [`Snapshot`] is what undo and save/load operate on. It captures the
//! player, the phantom, the session flags and the mutable part of every
//! room. Room names, descriptions and the set of room IDs are never
//! serialized; they come from the static manor definition.
//!
//! Deserializing is strict (`deny_unknown_fields` throughout) and
//! [`Snapshot::validate`] checks the semantic invariants against the world
//! before anything is applied, so a bad snapshot never half-restores.

mod history;
mod slot;

pub use history::History;
pub use slot::{FileSlot, MemorySlot, SaveSlot};

use std::collections::BTreeMap;

use bw_core::{RoomState, World};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{FictionError, FictionResult};
use crate::phantom::Phantom;
use crate::player::{MAX_INVENTORY, MAX_RESOURCE, PlayerState};

/// Schema version written into every snapshot.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Per-session values that are not part of the player or the phantom.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionState {
    /// Seed the session was started with.
    pub seed: u64,
    /// The three-digit safe code.
    pub safe_code: String,
    /// Whether the piano puzzle has been solved.
    pub piano_solved: bool,
    /// Whether the safe has been opened.
    pub safe_opened: bool,
}

/// A complete copy of the mutable session state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Snapshot {
    /// Schema version.
    pub version: u32,
    /// Player state.
    pub player: PlayerState,
    /// Phantom state.
    pub phantom: Phantom,
    /// Session flags.
    pub session: SessionState,
    /// Mutable state of every room, keyed by room ID.
    pub rooms: BTreeMap<String, RoomState>,
}

impl Snapshot {
    /// Serialize to compact JSON.
    pub fn to_json(&self) -> FictionResult<String> {
        serde_json::to_string(self).map_err(|e| FictionError::InvalidSnapshot(e.to_string()))
    }

    /// Parse from JSON. Only the shape is checked here; see
    /// [`Snapshot::validate`] for the semantic checks.
    pub fn from_json(json: &str) -> FictionResult<Self> {
        serde_json::from_str(json).map_err(|e| FictionError::InvalidSnapshot(e.to_string()))
    }

    /// Check that this snapshot can be applied to `world`.
    pub fn validate(&self, world: &World) -> FictionResult<()> {
        if self.version != SNAPSHOT_VERSION {
            return Err(FictionError::InvalidSnapshot(format!(
                "unsupported version {} (expected {SNAPSHOT_VERSION})",
                self.version
            )));
        }

        let player = &self.player;
        if player.inventory.len() > MAX_INVENTORY {
            return Err(invalid(format!(
                "inventory holds {} items",
                player.inventory.len()
            )));
        }
        for (name, value) in [("sanity", player.sanity), ("battery", player.battery)] {
            if !(0..=MAX_RESOURCE).contains(&value) {
                return Err(invalid(format!("{name} {value} out of range")));
            }
        }
        if player.alive == player.cause_of_death.is_some() {
            return Err(invalid("alive flag disagrees with cause of death"));
        }

        let rooms = std::iter::once(&player.room_id)
            .chain(&player.visited)
            .chain(std::iter::once(&self.phantom.room_id));
        for room in rooms {
            if !world.contains(room) {
                return Err(invalid(format!("unknown room '{room}'")));
            }
        }

        let code = &self.session.safe_code;
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid(format!("malformed safe code '{code}'")));
        }

        world
            .check_states(&self.rooms)
            .map_err(|e| invalid(e.to_string()))?;

        let mut seen = std::collections::BTreeSet::new();
        let items = player
            .inventory
            .iter()
            .chain(self.rooms.values().flat_map(|r| r.items.iter()));
        for item in items {
            if !seen.insert(item.id.as_str()) {
                return Err(invalid(format!("item '{}' appears twice", item.id)));
            }
        }

        Ok(())
    }
}

fn invalid(reason: impl Into<String>) -> FictionError {
    FictionError::InvalidSnapshot(reason.into())
}

/// What the save slot holds: a snapshot plus when it was written.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SaveFile {
    /// When the game was saved.
    pub saved_at: DateTime<Utc>,
    /// The saved state.
    pub snapshot: Snapshot,
}

impl SaveFile {
    /// Wrap a snapshot, stamped with the current time.
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            saved_at: Utc::now(),
            snapshot,
        }
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> FictionResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| FictionError::SaveFailed(e.to_string()))
    }

    /// Parse from JSON.
    pub fn from_json(json: &str) -> FictionResult<Self> {
        serde_json::from_str(json).map_err(|e| FictionError::LoadFailed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Difficulty;
    use bw_core::manor::{self, rooms};

    fn fixture() -> (World, Snapshot) {
        let world = manor::blackwood("123").unwrap();
        let snapshot = Snapshot {
            version: SNAPSHOT_VERSION,
            player: PlayerState::new(rooms::GATE, Difficulty::Normal),
            phantom: Phantom::new(rooms::ATTIC),
            session: SessionState {
                seed: 7,
                safe_code: "123".into(),
                piano_solved: false,
                safe_opened: false,
            },
            rooms: world.states(),
        };
        (world, snapshot)
    }

    #[test]
    fn fresh_snapshot_is_valid() {
        let (world, snapshot) = fixture();
        snapshot.validate(&world).unwrap();
    }

    #[test]
    fn json_round_trip_is_lossless() {
        let (_, snapshot) = fixture();
        let json = snapshot.to_json().unwrap();
        let back = Snapshot::from_json(&json).unwrap();
        assert_eq!(back, snapshot);
        assert_eq!(back.to_json().unwrap(), json);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let (_, snapshot) = fixture();
        let mut value = serde_json::to_value(&snapshot).unwrap();
        value["player"]["mana"] = serde_json::json!(3);
        let err = Snapshot::from_json(&value.to_string()).unwrap_err();
        assert!(matches!(err, FictionError::InvalidSnapshot(_)));
    }

    #[test]
    fn wrong_version_is_rejected() {
        let (world, mut snapshot) = fixture();
        snapshot.version = 2;
        assert!(snapshot.validate(&world).is_err());
    }

    #[test]
    fn out_of_range_resources_are_rejected() {
        let (world, mut snapshot) = fixture();
        snapshot.player.sanity = 101;
        assert!(snapshot.validate(&world).is_err());

        let (world, mut snapshot) = fixture();
        snapshot.player.battery = -1;
        assert!(snapshot.validate(&world).is_err());
    }

    #[test]
    fn dangling_exit_is_rejected() {
        let (world, mut snapshot) = fixture();
        snapshot
            .rooms
            .get_mut(rooms::LIBRARY)
            .unwrap()
            .exits
            .insert("east".into(), "ballroom".into());
        assert!(snapshot.validate(&world).is_err());
    }

    #[test]
    fn dynamic_exit_to_known_room_is_accepted() {
        let (world, mut snapshot) = fixture();
        snapshot
            .rooms
            .get_mut(rooms::LIBRARY)
            .unwrap()
            .exits
            .insert("east".into(), rooms::STUDY.into());
        snapshot.validate(&world).unwrap();
    }

    #[test]
    fn missing_room_is_rejected() {
        let (world, mut snapshot) = fixture();
        snapshot.rooms.remove(rooms::ATTIC);
        assert!(snapshot.validate(&world).is_err());
    }

    #[test]
    fn duplicated_item_is_rejected() {
        let (world, mut snapshot) = fixture();
        let key = snapshot.rooms[rooms::GATE].items[0].clone();
        snapshot.player.inventory.push(key);
        assert!(snapshot.validate(&world).is_err());
    }

    #[test]
    fn malformed_safe_code_is_rejected() {
        let (world, mut snapshot) = fixture();
        snapshot.session.safe_code = "12a".into();
        assert!(snapshot.validate(&world).is_err());
    }

    #[test]
    fn save_file_carries_timestamp() {
        let (_, snapshot) = fixture();
        let file = SaveFile::new(snapshot.clone());
        let json = file.to_json().unwrap();
        assert!(json.contains("saved_at"));
        let back = SaveFile::from_json(&json).unwrap();
        assert_eq!(back.snapshot, snapshot);
        assert_eq!(back.saved_at, file.saved_at);
    }
}
