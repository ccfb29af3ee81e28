//! Turning engine results into terminal text.

use bw_core::manor::rooms;
use bw_fiction::narrator::HauntedText;
use bw_fiction::phantom::{Proximity, StunOutcome, TickReport};
use bw_fiction::view::{COMMAND_HELP, MapCell, RoomView, StatusView};
use bw_fiction::{Correction, DeathCause, Ending, FictionError, GameSession, Outcome, PlayerState};
use colored::{ColoredString, Colorize};
use comfy_table::{ContentArrangement, Table};

pub fn banner(seed: u64) {
    println!();
    println!("  {}", "B L A C K W O O D".bold().white());
    println!("  {}", format!("Seed: {seed}").dimmed());
    println!();
}

pub fn difficulty_menu() {
    println!("  {}", "SELECT DIFFICULTY".bold());
    println!("  1. Story");
    println!("  2. Normal");
    println!("  3. Hardcore");
}

pub fn prologue() {
    println!();
    println!("  {}", "PROLOGUE".bold().yellow());
    println!("  You are at the Manor Gate. Get inside.");
    println!(
        "  Try: {}, {}, {}. Type {} for all commands.",
        "look".bold(),
        "take iron key".bold(),
        "go north".bold(),
        "help".bold()
    );
}

pub fn status(status: &StatusView) {
    println!();
    println!(
        "  Sanity: {}   Battery: {}   {}",
        gauge(status.sanity, status.sanity > 70),
        gauge(status.battery, status.battery > 50),
        format!("turn {} ({})", status.turns, status.difficulty).dimmed()
    );
}

fn gauge(value: i32, healthy: bool) -> ColoredString {
    let blocks = usize::try_from((value / 10).clamp(0, 10)).unwrap_or(0);
    let bar = format!("{}{} {value:>3}%", "█".repeat(blocks), "░".repeat(10 - blocks));
    if healthy { bar.green() } else { bar.red() }
}

pub fn room(view: &RoomView) {
    println!();
    let Some(description) = &view.description else {
        println!("  {}", "???".red().bold());
        println!("  {}", "It is pitch black.".red());
        return;
    };

    let title = if view.broken {
        view.name.magenta().bold()
    } else {
        view.name.cyan().bold()
    };
    println!("  {title}");
    println!("  {}", haunted(description));

    if !view.items.is_empty() {
        let items: Vec<String> = view.items.iter().map(|i| i.yellow().to_string()).collect();
        println!("\n  {} {}", "Items:".bold(), items.join(", "));
    }
    println!("  {} {}", "Exits:".bold(), view.exits.join(", ").to_uppercase());
    if let Some(tip) = view.tutorial {
        println!("\n  {}", format!(" TUTORIAL: {tip} ").white().on_blue());
    }
}

fn haunted(text: &HauntedText) -> String {
    text.spans
        .iter()
        .map(|span| {
            if span.haunted {
                span.text.red().italic().to_string()
            } else {
                span.text.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn correction(correction: &Correction) {
    println!("  {}", format!("Did you mean '{}'?", correction.matched).dimmed().italic());
}

pub fn error(err: &FictionError) {
    if err.is_internal() {
        println!("  {}", format!("error: {err}").red().bold());
    } else {
        println!("  {}", err.to_string().yellow());
    }
}

pub fn outcome(session: &GameSession, outcome: &Outcome) {
    match outcome {
        Outcome::Moved { unlocked, tick, .. } => {
            if let Some(name) = unlocked {
                println!("  {}", format!("Unlocked {name}.").green());
            }
            phantom(tick);
        }
        Outcome::Examined {
            name,
            description,
            revealed,
            new_lore,
        } => {
            println!("  {}", name.cyan().bold());
            println!("  {}", haunted(description));
            if let Some(text) = revealed {
                println!("  {}", format!("> {text}").italic());
                if *new_lore {
                    println!("  {}", "(added to your journal)".dimmed());
                }
            }
        }
        Outcome::LookedAround | Outcome::Quit => {}
        Outcome::Taken { name } => println!("  {}", format!("Taken: {name}").green()),
        Outcome::Dropped { name } => println!("  {}", format!("Dropped: {name}").yellow()),
        Outcome::Recharged { battery } => {
            println!("  {}", format!("Recharged. Battery: {battery}%").green());
        }
        Outcome::Soothed { sanity } => {
            println!("  {}", format!("Sanity restored. ({sanity}%)").green());
        }
        Outcome::CannotUse { target } => {
            println!("  {}", format!("Can't use '{target}' directly.").yellow());
        }
        Outcome::SafeOpened => {
            println!("  {}", "Safe opens! A silver key glints inside.".green());
        }
        Outcome::SafeAlreadyOpen => println!("  The safe is already open."),
        Outcome::WrongCode { penalty } => {
            println!("  {}", format!("Wrong. (-{penalty} sanity)").red());
        }
        Outcome::NothingToUnlock => println!("  {}", "Nothing to unlock.".yellow()),
        Outcome::PianoSolved { direction } => {
            let msg = format!("A hidden door slides open to the {}!", capitalize(direction));
            println!("  {}", msg.cyan());
        }
        Outcome::PianoAlreadySolved => println!("  Already solved."),
        Outcome::WrongSequence { penalty } => {
            println!("  {}", format!("Discordant noise! (-{penalty} sanity)").red());
        }
        Outcome::NoPiano => println!("  {}", "No piano.".yellow()),
        Outcome::Flashed { cost, stun } => {
            let msg = format!("You unleash a blinding burst! (Battery -{cost})");
            println!("  {}", msg.white().bold());
            match stun {
                StunOutcome::Stunned { .. } => {
                    println!("  {}", "The Phantom shrieks and flees!".green().bold());
                }
                StunOutcome::Missed => println!("  {}", "Nothing but dust moths.".italic()),
            }
        }
        Outcome::Heard(proximity) => {
            println!("  {}", "Listening...".italic());
            match proximity {
                Proximity::Here => println!("  {}", "IT IS HERE!".red().bold()),
                Proximity::Near => println!("  {}", "You hear shuffling nearby.".yellow().bold()),
                Proximity::Distant => println!("  {}", "Silence.".dimmed()),
            }
        }
        Outcome::Hint { text, cost } => {
            println!(
                "  {} {text} {}",
                "HINT:".magenta().bold(),
                format!("(-{cost} sanity)").dimmed()
            );
        }
        Outcome::ShowInventory => inventory(session.player()),
        Outcome::ShowJournal => journal(session.player()),
        Outcome::ShowMap => map(session),
        Outcome::ShowHelp => help(),
        Outcome::Saved => println!("  {}", "Saved.".green()),
        Outcome::Loaded { saved_at } => {
            let when = saved_at.format("%Y-%m-%d %H:%M UTC");
            println!("  {}", format!("Loaded game saved {when}.").green());
        }
        Outcome::Undone => println!("  {}", "Time rewinds.".yellow().bold()),
    }
}

fn phantom(tick: &TickReport) {
    if tick.awakened {
        println!("  {}", "Something has awakened in the house...".magenta().bold());
    }
    if let Some(damage) = tick.attack {
        println!("  {}", "THE PHANTOM SCREAMS!".red().bold());
        println!("  {}", format!("Your mind begins to fracture! (-{damage} sanity)").italic());
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars
        .next()
        .map(|c| c.to_uppercase().chain(chars).collect())
        .unwrap_or_default()
}

fn inventory(player: &PlayerState) {
    if player.inventory.is_empty() {
        println!("  Your pockets are empty.");
        return;
    }
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Item", "Description", "Value"]);
    for item in &player.inventory {
        table.add_row(vec![
            item.name.clone(),
            item.description.clone(),
            item.value.to_string(),
        ]);
    }
    println!("{table}");
}

fn journal(player: &PlayerState) {
    println!("  {}", "Journal".blue().bold());
    if player.journal.is_empty() {
        println!("  Empty.");
    }
    for entry in &player.journal {
        println!("  - {entry}");
    }
}

fn help() {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Command", "Description"]);
    for (command, description) in COMMAND_HELP {
        table.add_row(vec![*command, *description]);
    }
    println!("{table}");
}

fn map(session: &GameSession) {
    let cell = |id: &str, label: &str| match session.map_cell(id) {
        MapCell::Current => "[YOU]".red().bold().on_white().to_string(),
        MapCell::Visited => format!("[{label}]").green().to_string(),
        MapCell::Unknown => "[ ? ]".dimmed().to_string(),
    };
    // The study only shows up once it has been found.
    let study = match session.map_cell(rooms::STUDY) {
        MapCell::Unknown => "      ".to_string(),
        _ => format!("-{}", cell(rooms::STUDY, "Std")),
    };

    println!("  {}", "Map".blue().bold());
    println!("        {}", cell(rooms::ATTIC, "Att"));
    println!("          |");
    println!("        {}{study}", cell(rooms::LIBRARY, "Lib"));
    println!("          |");
    println!(
        "  {}-{}-{}",
        cell(rooms::BEDROOM, "Bed"),
        cell(rooms::FOYER, "Foy"),
        cell(rooms::KITCHEN, "Kit")
    );
    println!("          |     |");
    println!(
        "        {} {}",
        cell(rooms::GARDEN, "Gar"),
        cell(rooms::BASEMENT, "Bas")
    );
}

pub fn death(cause: DeathCause) {
    let msg = match cause {
        DeathCause::Darkness => "Darkness consumes you.",
        DeathCause::DeadBattery => "Flashlight dead. You die.",
        DeathCause::MindShattered => "Your mind shatters.",
    };
    println!("\n  {}", msg.red().bold());
}

pub fn rewind_offer() {
    println!(
        "  {}",
        "Type 'undo' to rewind time, or anything else to accept your fate.".dimmed()
    );
}

pub fn ending(ending: Option<Ending>) {
    println!();
    match ending {
        Some(Ending::Escaped { score, wealthy }) => {
            let title = if wealthy {
                "WEALTHY SURVIVOR".yellow().bold()
            } else {
                "ESCAPED".green().bold()
            };
            println!("  {title}");
            println!("  Score: {score}");
        }
        Some(Ending::Died(_)) => println!("  {}", "YOU DIED".red().bold()),
        None => println!("  {}", "You leave Blackwood behind. For now.".dimmed()),
    }
}
