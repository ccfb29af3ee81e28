//! Blackwood Manor: the fixed map every session plays on.

use crate::error::WorldResult;
use crate::item::Item;
use crate::room::Room;
use crate::world::World;

/// Room IDs.
pub mod rooms {
    /// Where every session starts.
    pub const GATE: &str = "gate";
    /// Entrance hall, locked by the iron key.
    pub const FOYER: &str = "foyer";
    /// Holds the note and the spare batteries.
    pub const KITCHEN: &str = "kitchen";
    /// Holds the safe and the piano.
    pub const LIBRARY: &str = "library";
    /// Holds the amulet.
    pub const BEDROOM: &str = "bedroom";
    /// Dark, locked by the silver key.
    pub const BASEMENT: &str = "basement";
    /// The phantom's lair.
    pub const ATTIC: &str = "attic";
    /// The way out, locked by the golden key.
    pub const GARDEN: &str = "garden";
    /// Hidden behind the library until the piano is played.
    pub const STUDY: &str = "study";
}

/// Item IDs.
pub mod items {
    /// Opens the foyer.
    pub const IRON_KEY: &str = "gate_key";
    /// The only light source.
    pub const FLASHLIGHT: &str = "flashlight";
    /// Carries the safe code.
    pub const NOTE: &str = "note";
    /// Recharges the flashlight.
    pub const BATTERIES: &str = "batteries";
    /// Restores sanity.
    pub const AMULET: &str = "amulet";
    /// Fixed in the library.
    pub const SAFE: &str = "safe";
    /// Fixed in the library.
    pub const PIANO: &str = "piano";
    /// Found in the safe; opens the basement.
    pub const SILVER_KEY: &str = "silver_key";
    /// Found in the basement; opens the garden.
    pub const GOLDEN_KEY: &str = "golden_key";
    /// Treasure in the secret study.
    pub const SAPPHIRE: &str = "sapphire";
}

/// Direction of the exit the piano puzzle opens in the library.
pub const SECRET_DIRECTION: &str = "east";

/// The key that lies inside the library safe.
pub fn silver_key() -> Item {
    Item::new(
        items::SILVER_KEY,
        "Silver Key",
        "Small key with a skull motif.",
    )
}

/// Build the manor. `safe_code` is written on the crumpled note.
pub fn blackwood(safe_code: &str) -> WorldResult<World> {
    let iron_key = Item::new(items::IRON_KEY, "Iron Key", "Rusty but solid.");
    let flashlight = Item::new(items::FLASHLIGHT, "Flashlight", "Rugged and heavy.");
    let note = Item::new(items::NOTE, "Crumpled Note", "Hastily scrawled numbers.")
        .with_hidden_text(format!("Code: {safe_code}"));
    let batteries =
        Item::new(items::BATTERIES, "Spare Batteries", "Standard voltage.").with_value(10);
    let amulet = Item::new(items::AMULET, "Jade Amulet", "Warm to the touch.");
    let safe = Item::new(items::SAFE, "Safe", "Needs a 3-digit code.").fixed();
    let piano = Item::new(
        items::PIANO,
        "Grand Piano",
        "Elegant keys covered in dust. Someone chalked a name above them: 'DAD'.",
    )
    .fixed();
    let golden_key = Item::new(items::GOLDEN_KEY, "Golden Key", "Heavy gold key.").with_value(50);
    let sapphire = Item::new(
        items::SAPPHIRE,
        "Star Sapphire",
        "A brilliant gem worth a fortune.",
    )
    .with_value(500);

    let mut world = World::new();
    world.add_room(
        Room::new(
            rooms::GATE,
            "Manor Gate",
            "Rain lashes down. A massive gate blocks the way north. \
             An old Iron Key sits in the mud.",
        )
        .with_exit("north", rooms::FOYER)
        .with_item(iron_key),
    )?;
    world.add_room(
        Room::new(rooms::FOYER, "Foyer", "Grand entrance. Dust everywhere.")
            .locked_by(items::IRON_KEY)
            .with_exit("north", rooms::LIBRARY)
            .with_exit("east", rooms::KITCHEN)
            .with_exit("west", rooms::BEDROOM)
            .with_exit("south", rooms::GARDEN)
            .with_item(flashlight),
    )?;
    world.add_room(
        Room::new(
            rooms::KITCHEN,
            "Kitchen",
            "Smells of rot. Old shadows pool in the corners.",
        )
        .with_exit("west", rooms::FOYER)
        .with_exit("down", rooms::BASEMENT)
        .with_item(note)
        .with_item(batteries),
    )?;
    world.add_room(
        Room::new(rooms::LIBRARY, "Library", "Quiet rows of books.")
            .with_exit("south", rooms::FOYER)
            .with_exit("up", rooms::ATTIC)
            .with_item(safe)
            .with_item(piano),
    )?;
    world.add_room(
        Room::new(
            rooms::BEDROOM,
            "Master Bedroom",
            "Moonlight hits the mirror.",
        )
        .with_exit("east", rooms::FOYER)
        .with_item(amulet),
    )?;
    world.add_room(
        Room::new(rooms::BASEMENT, "Basement", "Damp and cold.")
            .dark()
            .locked_by(items::SILVER_KEY)
            .with_exit("up", rooms::KITCHEN)
            .with_item(golden_key),
    )?;
    world.add_room(
        Room::new(rooms::ATTIC, "Attic", "Cobwebs and memories.").with_exit("down", rooms::LIBRARY),
    )?;
    world.add_room(
        Room::new(rooms::GARDEN, "Freedom", "Fresh air!")
            .locked_by(items::GOLDEN_KEY)
            .with_exit("north", rooms::FOYER),
    )?;
    world.add_room(
        Room::new(rooms::STUDY, "Secret Study", "A hidden room.")
            .with_exit("west", rooms::LIBRARY)
            .with_item(sapphire),
    )?;

    world.validate()?;
    Ok(world)
}
