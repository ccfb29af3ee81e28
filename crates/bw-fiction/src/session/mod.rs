//! Game session management.
//!
//! [`GameSession`] owns every piece of mutable state: the world, the player,
//! the phantom, the session flags, the random stream and the undo history.
//! Each line of input goes through [`GameSession::process`], which resolves
//! it, runs the handler, checks the terminal conditions and records an undo
//! step if the state changed.
//!
//! All randomness comes from the session's own seeded stream, so a seed and
//! an input script fully determine a playthrough.

mod actions;

pub use actions::{
    AMULET_RESTORE, BATTERY_DRAIN_DARK, BATTERY_DRAIN_LIT, BATTERY_RESTORE, FLASH_COST,
    MOVE_SANITY_DRAIN, WRONG_CODE_PENALTY, WRONG_NOTES_PENALTY,
};

use bw_core::World;
use bw_core::manor::{self, items, rooms};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::GameConfig;
use crate::error::{FictionError, FictionResult};
use crate::narrator::{BROKEN_THRESHOLD, haunt_text};
use crate::outcome::{Correction, Ending, Outcome, Turn};
use crate::parser::{Command, Dispatcher, Resolution, Verb};
use crate::phantom::Phantom;
use crate::player::{DeathCause, PlayerState};
use crate::snapshot::{History, MemorySlot, SNAPSHOT_VERSION, SaveSlot, SessionState, Snapshot};
use crate::view::{MapCell, RoomView, StatusView, TUTORIAL_TIP};

/// Answers the secondary questions some puzzles ask (safe code, notes).
pub trait Prompt {
    /// Ask a question. `None` means no answer is coming (end of input).
    fn ask(&mut self, question: &str) -> Option<String>;
}

impl<F> Prompt for F
where
    F: FnMut(&str) -> Option<String>,
{
    fn ask(&mut self, question: &str) -> Option<String> {
        self(question)
    }
}

/// A running game.
pub struct GameSession {
    world: World,
    player: PlayerState,
    phantom: Phantom,
    state: SessionState,
    rng: StdRng,
    history: History,
    dispatcher: Dispatcher,
    slot: Box<dyn SaveSlot>,
}

impl GameSession {
    /// Start a new game.
    ///
    /// The safe code is the first draw from the seeded stream. Saving goes
    /// to an in-memory slot until [`GameSession::with_slot`] replaces it.
    pub fn new(config: GameConfig) -> FictionResult<Self> {
        let mut rng = StdRng::seed_from_u64(config.seed);
        let safe_code = rng.random_range(100..=999u32).to_string();
        let world = manor::blackwood(&safe_code)?;

        tracing::info!(seed = config.seed, difficulty = %config.difficulty, "session started");

        Ok(Self {
            world,
            player: PlayerState::new(rooms::GATE, config.difficulty),
            phantom: Phantom::new(rooms::ATTIC),
            state: SessionState {
                seed: config.seed,
                safe_code,
                piano_solved: false,
                safe_opened: false,
            },
            rng,
            history: History::new(config.history_capacity),
            dispatcher: Dispatcher::new(),
            slot: Box::new(MemorySlot::new()),
        })
    }

    /// Use `slot` for save and load.
    pub fn with_slot(mut self, slot: impl SaveSlot + 'static) -> Self {
        self.slot = Box::new(slot);
        self
    }

    /// Get the world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Get the player state.
    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    /// Get the phantom.
    pub fn phantom(&self) -> &Phantom {
        &self.phantom
    }

    /// Get the session flags, including the seed and safe code.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Number of undo steps available.
    pub fn undo_depth(&self) -> usize {
        self.history.len()
    }

    // -----------------------------------------------------------------------
    // Turn processing
    // -----------------------------------------------------------------------

    /// Process one line of input.
    ///
    /// Returns `None` for blank input, which changes nothing.
    pub fn process(&mut self, input: &str, prompt: &mut dyn Prompt) -> Option<Turn> {
        let (command, correction) = match self.dispatcher.resolve(input)? {
            Resolution::Exact(command) => (command, None),
            Resolution::Corrected {
                command,
                typed,
                matched,
                score,
            } => (
                command,
                Some(Correction {
                    typed,
                    matched,
                    score,
                }),
            ),
            Resolution::Unknown { typed } => {
                return Some(Turn {
                    correction: None,
                    result: Err(FictionError::UnknownCommand(typed)),
                    ending: self.ending(),
                });
            }
        };

        let result = self.execute(&command, prompt);
        if let Some(e) = result.as_ref().err().filter(|e| e.is_internal()) {
            tracing::error!(error = %e, verb = %command.verb, "command hit a corrupted world");
        }
        Some(Turn {
            correction,
            result,
            ending: self.ending(),
        })
    }

    /// Run a resolved command.
    ///
    /// Mutating commands snapshot the state first and record that snapshot
    /// as an undo step only if the state actually changed. A failing command
    /// is rolled back, so errors never leave partial changes behind.
    pub fn execute(
        &mut self,
        command: &Command,
        prompt: &mut dyn Prompt,
    ) -> FictionResult<Outcome> {
        if self.is_over() && !command.verb.allowed_after_end() {
            return Err(FictionError::GameOver);
        }
        if !command.verb.is_mutating() {
            return self.dispatch(command, prompt);
        }

        let before = self.snapshot();
        let result = self.dispatch(command, prompt);
        self.settle();

        if self.snapshot() == before {
            return result;
        }
        if result.is_err() {
            self.apply(before)?;
            return result;
        }
        self.history.push(before);
        result
    }

    fn dispatch(&mut self, command: &Command, prompt: &mut dyn Prompt) -> FictionResult<Outcome> {
        let arg = command.argument.as_str();
        match command.verb {
            Verb::Move => self.do_move(arg),
            Verb::Look => self.do_look(arg),
            Verb::Take => self.do_take(arg),
            Verb::Drop => self.do_drop(arg),
            Verb::Use => self.do_use(arg),
            Verb::Unlock => self.do_unlock(arg, prompt),
            Verb::Play => self.do_play(arg, prompt),
            Verb::Flash => self.do_flash(),
            Verb::Listen => self.do_listen(),
            Verb::Hint => self.do_hint(),
            Verb::Undo => self.do_undo(),
            Verb::Save => self.do_save(),
            Verb::Load => self.do_load(),
            Verb::Inventory => Ok(Outcome::ShowInventory),
            Verb::Map => Ok(Outcome::ShowMap),
            Verb::Journal => Ok(Outcome::ShowJournal),
            Verb::Help => Ok(Outcome::ShowHelp),
            Verb::Quit => Ok(Outcome::Quit),
        }
    }

    /// Apply the terminal conditions that hold regardless of the command.
    fn settle(&mut self) {
        if !self.player.alive {
            return;
        }
        if self.player.sanity <= 0 {
            tracing::info!(turn = self.player.turns, "mind shattered");
            self.player.die(DeathCause::MindShattered);
        } else if self.player.room_id == rooms::GARDEN && !self.player.escaped {
            tracing::info!(turn = self.player.turns, "player escaped");
            self.player.escaped = true;
        }
    }

    // -----------------------------------------------------------------------
    // Snapshots
    // -----------------------------------------------------------------------

    /// Capture the full mutable state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            version: SNAPSHOT_VERSION,
            player: self.player.clone(),
            phantom: self.phantom.clone(),
            session: self.state.clone(),
            rooms: self.world.states(),
        }
    }

    /// Replace the full mutable state. Nothing changes if validation fails.
    pub fn restore(&mut self, snapshot: Snapshot) -> FictionResult<()> {
        snapshot.validate(&self.world)?;
        self.apply(snapshot)
    }

    fn apply(&mut self, snapshot: Snapshot) -> FictionResult<()> {
        self.world.apply_states(snapshot.rooms)?;
        self.player = snapshot.player;
        self.phantom = snapshot.phantom;
        self.state = snapshot.session;
        tracing::debug!(turn = self.player.turns, room = %self.player.room_id, "state restored");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Views
    // -----------------------------------------------------------------------

    /// Describe the current room.
    ///
    /// Draws from the random stream when sanity is low enough to
    /// hallucinate.
    pub fn room_view(&mut self) -> FictionResult<RoomView> {
        let room = self.world.room(&self.player.room_id)?;
        let pitch_black = room.dark && !self.player.has_light();
        let description = if pitch_black {
            None
        } else {
            Some(haunt_text(
                &room.description,
                self.player.sanity,
                &mut self.rng,
            ))
        };
        let tutorial =
            (!self.player.tutorial_done && room.id == rooms::GATE).then_some(TUTORIAL_TIP);

        Ok(RoomView {
            id: room.id.clone(),
            name: room.name.clone(),
            description,
            items: if pitch_black {
                Vec::new()
            } else {
                room.items.iter().map(|i| i.name.clone()).collect()
            },
            exits: room.exits.keys().cloned().collect(),
            tutorial,
            broken: self.player.sanity < BROKEN_THRESHOLD,
        })
    }

    /// Current resource gauges.
    pub fn status(&self) -> StatusView {
        StatusView {
            sanity: self.player.sanity,
            battery: self.player.battery,
            turns: self.player.turns,
            difficulty: self.player.difficulty,
        }
    }

    /// How a room should appear on the map.
    pub fn map_cell(&self, room_id: &str) -> MapCell {
        if self.player.room_id == room_id {
            MapCell::Current
        } else if self.player.visited.contains(room_id) {
            MapCell::Visited
        } else {
            MapCell::Unknown
        }
    }

    // -----------------------------------------------------------------------
    // Ending
    // -----------------------------------------------------------------------

    /// Whether the session has reached a terminal state.
    pub fn is_over(&self) -> bool {
        self.player.is_finished()
    }

    /// Escape score: sanity times ten, minus two per move, plus the value of
    /// everything carried out.
    pub fn score(&self) -> i64 {
        let carried: i64 = self.player.inventory.iter().map(|i| i64::from(i.value)).sum();
        i64::from(self.player.sanity) * 10 - i64::from(self.player.turns) * 2 + carried
    }

    /// How the session ended, if it has.
    pub fn ending(&self) -> Option<Ending> {
        if let Some(cause) = self.player.cause_of_death {
            return Some(Ending::Died(cause));
        }
        self.player.escaped.then(|| Ending::Escaped {
            score: self.score(),
            wealthy: self.player.has_item(items::SAPPHIRE),
        })
    }
}
