/// Alias for `Result<T, WorldError>`.
pub type WorldResult<T> = Result<T, WorldError>;

/// Internal-consistency errors of the room graph.
///
/// None of these can be triggered by player input. They indicate a broken
/// world definition or a snapshot that does not fit the world.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorldError {
    /// The requested room ID does not exist in the world.
    #[error("unknown room: {0}")]
    UnknownRoom(String),

    /// A room with the same ID was added twice.
    #[error("room already exists: {0}")]
    DuplicateRoom(String),

    /// The item is not in the given room.
    #[error("item \"{item}\" is not in room {room}")]
    UnknownItem {
        /// The room that was searched.
        room: String,
        /// The missing item ID.
        item: String,
    },

    /// An exit points at a room that does not exist.
    #[error("exit {direction} of room {room} leads to unknown room {target}")]
    DanglingExit {
        /// The room owning the exit.
        room: String,
        /// The exit's direction name.
        direction: String,
        /// The missing destination.
        target: String,
    },
}
