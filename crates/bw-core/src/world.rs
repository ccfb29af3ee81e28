use std::collections::BTreeMap;

use crate::error::{WorldError, WorldResult};
use crate::item::Item;
use crate::room::{Room, RoomState};

/// The room graph. Owns every room.
///
/// The set of room IDs is fixed once the world is built. Exits, locks and
/// items change during play; nothing else does.
#[derive(Debug, Clone, Default)]
pub struct World {
    rooms: BTreeMap<String, Room>,
}

impl World {
    /// Create an empty world.
    pub fn new() -> Self {
        Self::default()
    }

    // -----------------------------------------------------------------------
    // Construction
    // -----------------------------------------------------------------------

    /// Add a room. Fails if a room with the same ID already exists.
    pub fn add_room(&mut self, room: Room) -> WorldResult<()> {
        if self.rooms.contains_key(&room.id) {
            return Err(WorldError::DuplicateRoom(room.id));
        }
        self.rooms.insert(room.id.clone(), room);
        Ok(())
    }

    /// Check that every exit references an existing room.
    pub fn validate(&self) -> WorldResult<()> {
        for room in self.rooms.values() {
            self.check_exits(&room.id, &room.exits)?;
        }
        Ok(())
    }

    fn check_exits(&self, room: &str, exits: &BTreeMap<String, String>) -> WorldResult<()> {
        for (direction, target) in exits {
            if !self.rooms.contains_key(target) {
                return Err(WorldError::DanglingExit {
                    room: room.to_string(),
                    direction: direction.clone(),
                    target: target.clone(),
                });
            }
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    /// Get a room by ID.
    pub fn room(&self, id: &str) -> WorldResult<&Room> {
        self.rooms
            .get(id)
            .ok_or_else(|| WorldError::UnknownRoom(id.to_string()))
    }

    fn room_mut(&mut self, id: &str) -> WorldResult<&mut Room> {
        self.rooms
            .get_mut(id)
            .ok_or_else(|| WorldError::UnknownRoom(id.to_string()))
    }

    /// Whether a room with this ID exists.
    pub fn contains(&self, id: &str) -> bool {
        self.rooms.contains_key(id)
    }

    /// Iterate over all rooms in ID order.
    pub fn rooms(&self) -> impl Iterator<Item = &Room> {
        self.rooms.values()
    }

    /// Number of rooms.
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    /// Whether the world has no rooms.
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// The exits of a room.
    pub fn exits(&self, id: &str) -> WorldResult<&BTreeMap<String, String>> {
        Ok(&self.room(id)?.exits)
    }

    /// Destination IDs reachable in one step, in direction order.
    pub fn neighbors(&self, id: &str) -> WorldResult<Vec<&str>> {
        Ok(self.exits(id)?.values().map(String::as_str).collect())
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Remove an item from a room and hand it to the caller.
    pub fn take_item(&mut self, room_id: &str, item_id: &str) -> WorldResult<Item> {
        let room = self.room_mut(room_id)?;
        let pos = room
            .items
            .iter()
            .position(|i| i.id == item_id)
            .ok_or_else(|| WorldError::UnknownItem {
                room: room_id.to_string(),
                item: item_id.to_string(),
            })?;
        Ok(room.items.remove(pos))
    }

    /// Append an item to a room's item list.
    pub fn place_item(&mut self, room_id: &str, item: Item) -> WorldResult<()> {
        self.room_mut(room_id)?.items.push(item);
        Ok(())
    }

    /// Set a room's lock flag.
    pub fn set_locked(&mut self, room_id: &str, locked: bool) -> WorldResult<()> {
        self.room_mut(room_id)?.locked = locked;
        Ok(())
    }

    /// Open a new exit. The destination must exist.
    pub fn add_exit(&mut self, room_id: &str, direction: &str, target: &str) -> WorldResult<()> {
        if !self.rooms.contains_key(target) {
            return Err(WorldError::DanglingExit {
                room: room_id.to_string(),
                direction: direction.to_string(),
                target: target.to_string(),
            });
        }
        self.room_mut(room_id)?
            .exits
            .insert(direction.to_string(), target.to_string());
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Room state
    // -----------------------------------------------------------------------

    /// Copy out the mutable state of every room.
    pub fn states(&self) -> BTreeMap<String, RoomState> {
        self.rooms
            .iter()
            .map(|(id, room)| (id.clone(), room.state()))
            .collect()
    }

    /// Check that `states` covers exactly this world's rooms and that every
    /// exit it describes is valid.
    pub fn check_states(&self, states: &BTreeMap<String, RoomState>) -> WorldResult<()> {
        if let Some(id) = states.keys().find(|id| !self.rooms.contains_key(*id)) {
            return Err(WorldError::UnknownRoom(id.clone()));
        }
        if let Some(id) = self.rooms.keys().find(|id| !states.contains_key(*id)) {
            return Err(WorldError::UnknownRoom(id.clone()));
        }
        for (id, state) in states {
            self.check_exits(id, &state.exits)?;
        }
        Ok(())
    }

    /// Replace the mutable state of every room.
    ///
    /// Validates first; on error no room is touched.
    pub fn apply_states(&mut self, states: BTreeMap<String, RoomState>) -> WorldResult<()> {
        self.check_states(&states)?;
        for (id, state) in states {
            if let Some(room) = self.rooms.get_mut(&id) {
                room.apply_state(state);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_rooms() -> World {
        let mut world = World::new();
        world
            .add_room(
                Room::new("hall", "Hall", "Long.")
                    .with_exit("north", "den")
                    .with_item(Item::new("lamp", "Lamp", "Brass.")),
            )
            .unwrap();
        world
            .add_room(Room::new("den", "Den", "Cosy.").with_exit("south", "hall"))
            .unwrap();
        world
    }

    #[test]
    fn unknown_room_is_an_error() {
        let world = two_rooms();
        assert_eq!(
            world.room("cellar").unwrap_err(),
            WorldError::UnknownRoom("cellar".into())
        );
    }

    #[test]
    fn duplicate_room_rejected() {
        let mut world = two_rooms();
        let err = world.add_room(Room::new("den", "Den", "")).unwrap_err();
        assert_eq!(err, WorldError::DuplicateRoom("den".into()));
        assert_eq!(world.len(), 2);
    }

    #[test]
    fn validate_finds_dangling_exit() {
        let mut world = two_rooms();
        assert!(world.validate().is_ok());
        world
            .add_room(Room::new("attic", "Attic", "").with_exit("down", "nowhere"))
            .unwrap();
        assert!(matches!(
            world.validate(),
            Err(WorldError::DanglingExit { .. })
        ));
    }

    #[test]
    fn neighbors_follow_exits() {
        let world = two_rooms();
        assert_eq!(world.neighbors("hall").unwrap(), vec!["den"]);
    }

    #[test]
    fn take_and_place_moves_item() {
        let mut world = two_rooms();
        let lamp = world.take_item("hall", "lamp").unwrap();
        assert!(!world.room("hall").unwrap().has_item("lamp"));

        world.place_item("den", lamp).unwrap();
        assert!(world.room("den").unwrap().has_item("lamp"));
    }

    #[test]
    fn take_missing_item_fails() {
        let mut world = two_rooms();
        assert!(matches!(
            world.take_item("den", "lamp"),
            Err(WorldError::UnknownItem { .. })
        ));
    }

    #[test]
    fn add_exit_requires_existing_target() {
        let mut world = two_rooms();
        assert!(world.add_exit("den", "up", "attic").is_err());
        assert!(!world.exits("den").unwrap().contains_key("up"));

        world.add_exit("den", "east", "hall").unwrap();
        assert_eq!(world.exits("den").unwrap()["east"], "hall");
    }

    #[test]
    fn apply_states_is_all_or_nothing() {
        let mut world = two_rooms();
        let mut states = world.states();
        states.get_mut("hall").unwrap().locked = true;
        states
            .get_mut("den")
            .unwrap()
            .exits
            .insert("up".into(), "nowhere".into());

        assert!(world.apply_states(states).is_err());
        assert!(!world.room("hall").unwrap().locked);
    }

    #[test]
    fn apply_states_rejects_missing_room() {
        let mut world = two_rooms();
        let mut states = world.states();
        states.remove("den");
        assert_eq!(
            world.apply_states(states).unwrap_err(),
            WorldError::UnknownRoom("den".into())
        );
    }

    #[test]
    fn apply_states_restores_runtime_exit() {
        let mut world = two_rooms();
        let before = world.states();
        world.add_exit("den", "east", "hall").unwrap();
        let after = world.states();

        world.apply_states(before.clone()).unwrap();
        assert_eq!(world.states(), before);

        world.apply_states(after).unwrap();
        assert_eq!(world.exits("den").unwrap()["east"], "hall");
    }
}
