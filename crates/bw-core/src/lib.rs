//! Core types for Blackwood: items, rooms, and the room graph.
//!
//! This crate defines the static shape of the manor and the small amount of
//! per-room state that changes during play (items, locks, exits). It knows
//! nothing about the player or the phantom; the engine in `bw-fiction`
//! drives it.

/// Error types used throughout the crate.
pub mod error;
/// Items that live in rooms or in the player's inventory.
pub mod item;
/// The static Blackwood Manor definition.
pub mod manor;
/// Rooms and their mutable state.
pub mod room;
/// The room graph that owns every room.
pub mod world;

/// Re-export error types.
pub use error::{WorldError, WorldResult};
/// Re-export item types.
pub use item::Item;
/// Re-export room types.
pub use room::{Room, RoomState};
/// Re-export world model types.
pub use world::World;
