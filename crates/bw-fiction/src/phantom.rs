//! The phantom: a random-walk adversary haunting the manor.
//!
//! The phantom starts dormant in the attic. Once the player has solved the
//! tutorial gate and made more than [`ACTIVATION_TURNS`] moves it wakes up
//! for good. While active it screams at a player sharing its room and drifts
//! to a random neighbouring room with probability [`MOVE_CHANCE`] per tick.
//! A flash of light stuns it for [`STUN_TURNS`] turns and drives it away.

use bw_core::World;
use rand::Rng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use crate::error::FictionResult;
use crate::player::PlayerState;

/// Sanity lost per scream, before the difficulty multiplier.
pub const ATTACK_DAMAGE: i32 = 15;
/// Chance per tick that the phantom changes room.
pub const MOVE_CHANCE: f64 = 0.45;
/// The phantom wakes once the move count exceeds this.
pub const ACTIVATION_TURNS: u32 = 8;
/// How many turns a flash keeps the phantom inert.
pub const STUN_TURNS: u32 = 3;

/// Observable state of the phantom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhantomMode {
    /// Not yet awake.
    Dormant,
    /// Awake and hunting.
    Active,
    /// Awake but inert until the stun wears off.
    Stunned,
}

/// How close the phantom is to a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Proximity {
    /// Same room.
    Here,
    /// One exit away.
    Near,
    /// Anywhere else.
    Distant,
}

/// What happened during one phantom tick.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    /// The phantom woke up this tick.
    pub awakened: bool,
    /// The tick was skipped because the phantom is stunned.
    pub stunned: bool,
    /// Sanity damage dealt, if the phantom attacked.
    pub attack: Option<i32>,
    /// Room the phantom moved to, if it moved.
    pub moved_to: Option<String>,
}

/// Result of flashing the phantom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StunOutcome {
    /// The phantom was not in the room.
    Missed,
    /// The phantom was stunned and fled.
    Stunned {
        /// Last turn on which the phantom stays inert.
        until: u32,
        /// Where it fled, if its room has exits.
        fled_to: Option<String>,
    },
}

/// The adversary's state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Phantom {
    /// Current room ID.
    pub room_id: String,
    /// Set once, never cleared.
    pub active: bool,
    /// The phantom is inert while the turn counter is at most this.
    pub stun_until: u32,
}

impl Phantom {
    /// Create a dormant phantom in `room_id`.
    pub fn new(room_id: impl Into<String>) -> Self {
        Self {
            room_id: room_id.into(),
            active: false,
            stun_until: 0,
        }
    }

    /// Whether a stun is in effect at `turn`.
    pub fn is_stunned(&self, turn: u32) -> bool {
        self.stun_until > 0 && turn <= self.stun_until
    }

    /// The phantom's mode at `turn`.
    pub fn mode(&self, turn: u32) -> PhantomMode {
        if !self.active {
            PhantomMode::Dormant
        } else if self.is_stunned(turn) {
            PhantomMode::Stunned
        } else {
            PhantomMode::Active
        }
    }

    /// Run one tick after the player has moved.
    pub fn tick(
        &mut self,
        world: &World,
        player: &mut PlayerState,
        rng: &mut StdRng,
    ) -> FictionResult<TickReport> {
        let turn = player.turns;
        let mut report = TickReport::default();

        if self.is_stunned(turn) {
            report.stunned = true;
            return Ok(report);
        }

        if !self.active && turn > ACTIVATION_TURNS && player.tutorial_done {
            self.active = true;
            report.awakened = true;
            tracing::debug!(turn, room = %self.room_id, "phantom awakened");
        }

        if !self.active {
            return Ok(report);
        }

        if self.room_id == player.room_id {
            let damage = player.difficulty.scale(ATTACK_DAMAGE);
            player.adjust_sanity(-damage);
            report.attack = Some(damage);
            tracing::debug!(damage, sanity = player.sanity, "phantom attacked");
        }

        if rng.random_bool(MOVE_CHANCE) {
            report.moved_to = self.wander(world, rng)?;
        }

        Ok(report)
    }

    /// Try to stun the phantom from `player_room` at `turn`.
    ///
    /// Only works when the phantom shares the room. A stunned phantom always
    /// flees to a random neighbouring room.
    pub fn stun(
        &mut self,
        world: &World,
        player_room: &str,
        turn: u32,
        rng: &mut StdRng,
    ) -> FictionResult<StunOutcome> {
        if self.room_id != player_room {
            return Ok(StunOutcome::Missed);
        }
        self.stun_until = turn + STUN_TURNS;
        let fled_to = self.wander(world, rng)?;
        tracing::debug!(until = self.stun_until, ?fled_to, "phantom stunned");
        Ok(StunOutcome::Stunned {
            until: self.stun_until,
            fled_to,
        })
    }

    /// Classify how close the phantom is to `room_id`.
    pub fn proximity(&self, world: &World, room_id: &str) -> FictionResult<Proximity> {
        if self.room_id == room_id {
            return Ok(Proximity::Here);
        }
        let near = world
            .exits(room_id)?
            .values()
            .any(|target| *target == self.room_id);
        Ok(if near {
            Proximity::Near
        } else {
            Proximity::Distant
        })
    }

    /// Step to a uniformly chosen neighbour. Stays put in a dead end.
    fn wander(&mut self, world: &World, rng: &mut StdRng) -> FictionResult<Option<String>> {
        let neighbors = world.neighbors(&self.room_id)?;
        let Some(next) = neighbors.choose(rng).map(|s| s.to_string()) else {
            return Ok(None);
        };
        tracing::debug!(from = %self.room_id, to = %next, "phantom moved");
        self.room_id = next.clone();
        Ok(Some(next))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Difficulty;
    use bw_core::Room;
    use rand::SeedableRng;

    fn triangle() -> World {
        let mut world = World::new();
        world
            .add_room(Room::new("a", "A", "").with_exit("east", "b").with_exit("south", "c"))
            .unwrap();
        world
            .add_room(Room::new("b", "B", "").with_exit("west", "a"))
            .unwrap();
        world
            .add_room(Room::new("c", "C", "").with_exit("north", "a"))
            .unwrap();
        world.add_room(Room::new("cell", "Cell", "")).unwrap();
        world
    }

    fn ready_player(room: &str, turns: u32) -> PlayerState {
        let mut p = PlayerState::new(room, Difficulty::Normal);
        p.turns = turns;
        p.tutorial_done = true;
        p
    }

    #[test]
    fn stays_dormant_before_tutorial() {
        let world = triangle();
        let mut rng = StdRng::seed_from_u64(1);
        let mut phantom = Phantom::new("a");
        let mut player = ready_player("a", 20);
        player.tutorial_done = false;

        let report = phantom.tick(&world, &mut player, &mut rng).unwrap();
        assert!(!phantom.active);
        assert_eq!(report, TickReport::default());
        assert_eq!(player.sanity, 100);
    }

    #[test]
    fn stays_dormant_until_enough_moves() {
        let world = triangle();
        let mut rng = StdRng::seed_from_u64(1);
        let mut phantom = Phantom::new("a");
        let mut player = ready_player("b", ACTIVATION_TURNS);

        phantom.tick(&world, &mut player, &mut rng).unwrap();
        assert_eq!(phantom.mode(player.turns), PhantomMode::Dormant);

        player.turns += 1;
        let report = phantom.tick(&world, &mut player, &mut rng).unwrap();
        assert!(report.awakened);
        assert_eq!(phantom.mode(player.turns), PhantomMode::Active);
    }

    #[test]
    fn attacks_when_sharing_room() {
        let world = triangle();
        let mut rng = StdRng::seed_from_u64(7);
        let mut phantom = Phantom::new("a");
        phantom.active = true;
        let mut player = ready_player("a", 10);
        player.difficulty = Difficulty::Hard;

        let report = phantom.tick(&world, &mut player, &mut rng).unwrap();
        assert_eq!(report.attack, Some(23));
        assert_eq!(player.sanity, 77);
    }

    #[test]
    fn random_walk_follows_exits() {
        let world = triangle();
        let mut rng = StdRng::seed_from_u64(99);
        let mut phantom = Phantom::new("a");
        phantom.active = true;
        let mut player = ready_player("cell", 10);

        let mut moves = 0;
        for _ in 0..200 {
            let from = phantom.room_id.clone();
            let report = phantom.tick(&world, &mut player, &mut rng).unwrap();
            if let Some(to) = report.moved_to {
                moves += 1;
                assert!(world.neighbors(&from).unwrap().contains(&to.as_str()));
            } else {
                assert_eq!(phantom.room_id, from);
            }
        }
        // 0.45 over 200 ticks
        assert!((50..150).contains(&moves), "moved {moves} times");
    }

    #[test]
    fn dead_end_keeps_phantom_in_place() {
        let world = triangle();
        let mut rng = StdRng::seed_from_u64(3);
        let mut phantom = Phantom::new("cell");
        phantom.active = true;
        let mut player = ready_player("a", 10);

        for _ in 0..20 {
            let report = phantom.tick(&world, &mut player, &mut rng).unwrap();
            assert_eq!(report.moved_to, None);
        }
        assert_eq!(phantom.room_id, "cell");
    }

    #[test]
    fn stun_requires_same_room() {
        let world = triangle();
        let mut rng = StdRng::seed_from_u64(5);
        let mut phantom = Phantom::new("b");
        phantom.active = true;

        let outcome = phantom.stun(&world, "a", 4, &mut rng).unwrap();
        assert_eq!(outcome, StunOutcome::Missed);
        assert_eq!(phantom.room_id, "b");
        assert_eq!(phantom.stun_until, 0);
    }

    #[test]
    fn stun_forces_flight_and_suppresses_ticks() {
        let world = triangle();
        let mut rng = StdRng::seed_from_u64(5);
        let mut phantom = Phantom::new("a");
        phantom.active = true;

        let outcome = phantom.stun(&world, "a", 4, &mut rng).unwrap();
        let StunOutcome::Stunned { until, fled_to } = outcome else {
            panic!("expected stun");
        };
        assert_eq!(until, 7);
        let fled_to = fled_to.unwrap();
        assert!(fled_to == "b" || fled_to == "c");

        // Even sharing a room, a stunned phantom does nothing.
        let mut player = ready_player(&fled_to, 7);
        let report = phantom.tick(&world, &mut player, &mut rng).unwrap();
        assert!(report.stunned);
        assert_eq!(report.attack, None);
        assert_eq!(player.sanity, 100);
        assert_eq!(phantom.mode(7), PhantomMode::Stunned);
        assert_eq!(phantom.mode(8), PhantomMode::Active);
    }

    #[test]
    fn proximity_tiers() {
        let world = triangle();
        let phantom = Phantom::new("b");
        assert_eq!(phantom.proximity(&world, "b").unwrap(), Proximity::Here);
        assert_eq!(phantom.proximity(&world, "a").unwrap(), Proximity::Near);
        assert_eq!(phantom.proximity(&world, "c").unwrap(), Proximity::Distant);
    }

    #[test]
    fn same_seed_same_walk() {
        let world = triangle();
        let walk = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut phantom = Phantom::new("a");
            phantom.active = true;
            let mut player = ready_player("cell", 10);
            (0..30)
                .map(|_| {
                    phantom.tick(&world, &mut player, &mut rng).unwrap();
                    phantom.room_id.clone()
                })
                .collect::<Vec<_>>()
        };
        assert_eq!(walk(1234), walk(1234));
    }
}
