use std::collections::VecDeque;

use super::Snapshot;

/// Bounded undo stack. Pushing past capacity evicts the oldest entry.
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<Snapshot>,
    capacity: usize,
}

impl History {
    /// Create an empty history holding at most `capacity` snapshots.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Record a snapshot as the most recent undo step.
    pub fn push(&mut self, snapshot: Snapshot) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
            tracing::debug!(capacity = self.capacity, "oldest undo step evicted");
        }
        self.entries.push_back(snapshot);
        tracing::debug!(depth = self.entries.len(), "undo step recorded");
    }

    /// Take the most recent snapshot.
    pub fn pop(&mut self) -> Option<Snapshot> {
        self.entries.pop_back()
    }

    /// Number of stored steps.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there is nothing to undo.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of stored steps.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Difficulty;
    use crate::phantom::Phantom;
    use crate::player::PlayerState;
    use crate::snapshot::{SNAPSHOT_VERSION, SessionState};

    fn step(turns: u32) -> Snapshot {
        let mut player = PlayerState::new("gate", Difficulty::Normal);
        player.turns = turns;
        Snapshot {
            version: SNAPSHOT_VERSION,
            player,
            phantom: Phantom::new("attic"),
            session: SessionState {
                seed: 1,
                safe_code: "111".into(),
                piano_solved: false,
                safe_opened: false,
            },
            rooms: Default::default(),
        }
    }

    #[test]
    fn pop_is_last_in_first_out() {
        let mut history = History::new(10);
        history.push(step(1));
        history.push(step(2));
        assert_eq!(history.pop().unwrap().player.turns, 2);
        assert_eq!(history.pop().unwrap().player.turns, 1);
        assert!(history.pop().is_none());
    }

    #[test]
    fn overflow_evicts_oldest() {
        let mut history = History::new(3);
        for turns in 1..=5 {
            history.push(step(turns));
        }
        assert_eq!(history.len(), 3);
        let order: Vec<u32> = std::iter::from_fn(|| history.pop())
            .map(|s| s.player.turns)
            .collect();
        assert_eq!(order, vec![5, 4, 3]);
    }

    #[test]
    fn capacity_is_at_least_one() {
        let mut history = History::new(0);
        assert_eq!(history.capacity(), 1);
        history.push(step(1));
        history.push(step(2));
        assert_eq!(history.len(), 1);
        assert_eq!(history.pop().unwrap().player.turns, 2);
        assert!(history.is_empty());
    }
}
