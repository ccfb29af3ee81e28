//! Command handlers.

use bw_core::manor::{self, items, rooms};

use super::{GameSession, Prompt};
use crate::error::{FictionError, FictionResult};
use crate::hints::{self, HINT_COST};
use crate::narrator::haunt_text;
use crate::outcome::Outcome;
use crate::player::DeathCause;
use crate::snapshot::SaveFile;

/// Sanity lost per move.
pub const MOVE_SANITY_DRAIN: i32 = 1;
/// Battery lost per move into a lit room while carrying the flashlight.
pub const BATTERY_DRAIN_LIT: i32 = 2;
/// Battery lost per move into a dark room while carrying the flashlight.
pub const BATTERY_DRAIN_DARK: i32 = 5;
/// Battery spent on a flash.
pub const FLASH_COST: i32 = 20;
/// Battery restored by the spare batteries.
pub const BATTERY_RESTORE: i32 = 40;
/// Sanity restored by the amulet.
pub const AMULET_RESTORE: i32 = 25;
/// Sanity lost on a wrong safe code.
pub const WRONG_CODE_PENALTY: i32 = 3;
/// Sanity lost on a wrong piano tune. Not scaled by difficulty.
pub const WRONG_NOTES_PENALTY: i32 = 2;

const PIANO_SOLUTION: &str = "DAD";

impl GameSession {
    pub(super) fn do_move(&mut self, direction: &str) -> FictionResult<Outcome> {
        let direction = direction.trim();
        let dest_id = self
            .world
            .exits(&self.player.room_id)?
            .get(direction)
            .cloned()
            .ok_or_else(|| FictionError::InvalidDirection(direction.to_string()))?;

        let dest = self.world.room(&dest_id)?;
        if !dest.opens_for(self.player.item_ids()) {
            return Err(FictionError::Locked(dest.name.clone()));
        }
        let unlocked = dest.locked.then(|| dest.name.clone());
        let dark = dest.dark;

        if unlocked.is_some() {
            self.world.set_locked(&dest_id, false)?;
            tracing::debug!(room = %dest_id, "room unlocked");
            if dest_id == rooms::FOYER {
                self.player.tutorial_done = true;
            }
        }

        self.player.room_id = dest_id.clone();
        self.player.visit(&dest_id);
        self.player.turns += 1;
        self.drain(dark);

        let tick = self.phantom.tick(&self.world, &mut self.player, &mut self.rng)?;

        let death = if !dark {
            None
        } else if !self.player.has_light() {
            Some(DeathCause::Darkness)
        } else if self.player.battery <= 0 {
            Some(DeathCause::DeadBattery)
        } else {
            None
        };
        if let Some(cause) = death {
            tracing::info!(room = %dest_id, ?cause, "player died");
            self.player.die(cause);
        }

        Ok(Outcome::Moved {
            room: dest_id,
            unlocked,
            tick,
            death,
        })
    }

    /// Per-move resource drain.
    fn drain(&mut self, dark: bool) {
        let difficulty = self.player.difficulty;
        self.player.adjust_sanity(-difficulty.scale(MOVE_SANITY_DRAIN));
        if self.player.has_light() {
            let base = if dark {
                BATTERY_DRAIN_DARK
            } else {
                BATTERY_DRAIN_LIT
            };
            self.player.adjust_battery(-difficulty.scale(base));
        }
    }

    pub(super) fn do_look(&mut self, target: &str) -> FictionResult<Outcome> {
        let target = target.trim();
        if matches!(target, "" | "room" | "around") {
            return Ok(Outcome::LookedAround);
        }

        let room = self.world.room(&self.player.room_id)?;
        let item = self
            .player
            .find_item(target)
            .or_else(|| room.find_item(target))
            .cloned()
            .ok_or_else(|| FictionError::NotFound(target.to_string()))?;

        let description = haunt_text(&item.description, self.player.sanity, &mut self.rng);
        let revealed = item.hidden_text.clone().filter(|_| item.interactable);
        let new_lore = match &revealed {
            Some(text) => self.player.record_lore(format!("{}: {text}", item.name)),
            None => false,
        };

        Ok(Outcome::Examined {
            name: item.name,
            description,
            revealed,
            new_lore,
        })
    }

    pub(super) fn do_take(&mut self, target: &str) -> FictionResult<Outcome> {
        let target = target.trim();
        let target = target.strip_prefix("up ").unwrap_or(target).trim();

        let room = self.world.room(&self.player.room_id)?;
        let item = room
            .find_item(target)
            .ok_or_else(|| FictionError::NotFound(target.to_string()))?;
        if !item.takeable {
            return Err(FictionError::CannotTake(item.name.clone()));
        }
        if !self.player.has_room() {
            return Err(FictionError::InventoryFull);
        }

        let item_id = item.id.clone();
        let item = self.world.take_item(&self.player.room_id, &item_id)?;
        let name = item.name.clone();
        self.player.add_item(item)?;
        Ok(Outcome::Taken { name })
    }

    pub(super) fn do_drop(&mut self, target: &str) -> FictionResult<Outcome> {
        let item = self.player.remove_item(target.trim())?;
        let name = item.name.clone();
        self.world.place_item(&self.player.room_id, item)?;
        Ok(Outcome::Dropped { name })
    }

    pub(super) fn do_use(&mut self, target: &str) -> FictionResult<Outcome> {
        let target = target.trim();
        if target.contains("batter") {
            self.consume(items::BATTERIES)?;
            self.player.adjust_battery(BATTERY_RESTORE);
            Ok(Outcome::Recharged {
                battery: self.player.battery,
            })
        } else if target.contains("amulet") {
            self.consume(items::AMULET)?;
            self.player.adjust_sanity(AMULET_RESTORE);
            Ok(Outcome::Soothed {
                sanity: self.player.sanity,
            })
        } else {
            Ok(Outcome::CannotUse {
                target: target.to_string(),
            })
        }
    }

    fn consume(&mut self, item_id: &str) -> FictionResult<()> {
        self.player.remove_item(item_id).map(|_| ())
    }

    pub(super) fn do_unlock(
        &mut self,
        target: &str,
        prompt: &mut dyn Prompt,
    ) -> FictionResult<Outcome> {
        let room_id = self.player.room_id.clone();
        if !target.contains("safe") || !self.world.room(&room_id)?.has_item(items::SAFE) {
            return Ok(Outcome::NothingToUnlock);
        }
        if self.state.safe_opened {
            return Ok(Outcome::SafeAlreadyOpen);
        }

        let code = prompt.ask("Code: ").ok_or(FictionError::NoAnswer)?;
        if code.trim() == self.state.safe_code {
            self.world.place_item(&room_id, manor::silver_key())?;
            self.state.safe_opened = true;
            tracing::debug!("safe opened");
            Ok(Outcome::SafeOpened)
        } else {
            let penalty = self.player.difficulty.scale(WRONG_CODE_PENALTY);
            self.player.adjust_sanity(-penalty);
            Ok(Outcome::WrongCode { penalty })
        }
    }

    pub(super) fn do_play(
        &mut self,
        target: &str,
        prompt: &mut dyn Prompt,
    ) -> FictionResult<Outcome> {
        let room_id = self.player.room_id.clone();
        if !target.contains("piano") || !self.world.room(&room_id)?.has_item(items::PIANO) {
            return Ok(Outcome::NoPiano);
        }
        if self.state.piano_solved {
            return Ok(Outcome::PianoAlreadySolved);
        }

        let notes = prompt.ask("Notes: ").ok_or(FictionError::NoAnswer)?;
        if normalize_notes(&notes) == PIANO_SOLUTION {
            self.world.add_exit(&room_id, manor::SECRET_DIRECTION, rooms::STUDY)?;
            self.state.piano_solved = true;
            tracing::debug!(room = %room_id, "hidden exit opened");
            Ok(Outcome::PianoSolved {
                direction: manor::SECRET_DIRECTION,
            })
        } else {
            self.player.adjust_sanity(-WRONG_NOTES_PENALTY);
            Ok(Outcome::WrongSequence {
                penalty: WRONG_NOTES_PENALTY,
            })
        }
    }

    pub(super) fn do_flash(&mut self) -> FictionResult<Outcome> {
        if !self.player.has_light() {
            return Err(FictionError::InsufficientResource(
                "You have no flashlight.".to_string(),
            ));
        }
        let cost = self.player.difficulty.scale(FLASH_COST);
        if self.player.battery < cost {
            return Err(FictionError::InsufficientResource(format!(
                "Battery too low ({}%, need {cost}%).",
                self.player.battery
            )));
        }

        self.player.adjust_battery(-cost);
        let stun = self.phantom.stun(
            &self.world,
            &self.player.room_id,
            self.player.turns,
            &mut self.rng,
        )?;
        Ok(Outcome::Flashed { cost, stun })
    }

    pub(super) fn do_listen(&self) -> FictionResult<Outcome> {
        let proximity = self.phantom.proximity(&self.world, &self.player.room_id)?;
        Ok(Outcome::Heard(proximity))
    }

    pub(super) fn do_hint(&mut self) -> FictionResult<Outcome> {
        let text = hints::tip(&self.world, &self.player, &self.state)?;
        let cost = self.player.difficulty.scale(HINT_COST);
        self.player.adjust_sanity(-cost);
        Ok(Outcome::Hint { text, cost })
    }

    pub(super) fn do_undo(&mut self) -> FictionResult<Outcome> {
        let snapshot = self.history.pop().ok_or(FictionError::NothingToUndo)?;
        if let Err(e) = self.restore(snapshot) {
            tracing::warn!(error = %e, "undo step rejected");
            return Err(e);
        }
        Ok(Outcome::Undone)
    }

    pub(super) fn do_save(&mut self) -> FictionResult<Outcome> {
        let json = SaveFile::new(self.snapshot()).to_json()?;
        self.slot.write(&json).map_err(|e| {
            tracing::warn!(error = %e, "save failed");
            FictionError::SaveFailed(e.to_string())
        })?;
        Ok(Outcome::Saved)
    }

    pub(super) fn do_load(&mut self) -> FictionResult<Outcome> {
        let json = self
            .slot
            .read()
            .map_err(|e| FictionError::LoadFailed(e.to_string()))?
            .ok_or_else(|| FictionError::LoadFailed("no saved game".to_string()))?;
        let save = SaveFile::from_json(&json)?;
        let saved_at = save.saved_at;
        self.restore(save.snapshot).map_err(|e| {
            tracing::warn!(error = %e, "save slot rejected");
            FictionError::LoadFailed(e.to_string())
        })?;
        Ok(Outcome::Loaded { saved_at })
    }
}

/// Uppercase and drop separators, so "d-a-d" and "D A D" both read "DAD".
fn normalize_notes(notes: &str) -> String {
    notes
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .flat_map(char::to_uppercase)
        .collect()
}
