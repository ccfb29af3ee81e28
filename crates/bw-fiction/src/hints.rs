//! Context-sensitive tips.

use bw_core::World;
use bw_core::manor::{items, rooms};

use crate::error::FictionResult;
use crate::player::PlayerState;
use crate::snapshot::SessionState;

/// Sanity cost of a hint, before the difficulty multiplier.
pub const HINT_COST: i32 = 5;

/// Pick the tip for the player's current situation.
///
/// Depends only on the room and puzzle progress, never on chance.
pub fn tip(
    world: &World,
    player: &PlayerState,
    session: &SessionState,
) -> FictionResult<&'static str> {
    let tip = match player.room_id.as_str() {
        rooms::GATE => "Unlock the North door with the key.",
        rooms::FOYER if world.room(rooms::GARDEN)?.locked => "Golden Key is in the Basement.",
        rooms::FOYER => "The garden lies south. Run.",
        rooms::KITCHEN if !player.has_item(items::NOTE) => "Take the note.",
        rooms::KITCHEN if world.room(rooms::BASEMENT)?.locked => {
            "The basement door wants a silver key."
        }
        rooms::LIBRARY if !session.safe_opened => "The note from the kitchen holds the safe code.",
        rooms::LIBRARY if !session.piano_solved => "Play the name chalked above the piano.",
        rooms::BASEMENT if !player.has_item(items::GOLDEN_KEY) => "Take the golden key.",
        rooms::ATTIC => "Don't linger here.",
        _ => "Explore.",
    };
    Ok(tip)
}
