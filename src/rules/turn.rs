//! Turn sequencing.
//!
//! `TurnManager::next_turn` is the only place lock counters tick down.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{PlayerId, World};

/// Acting player and turn counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TurnManager {
    /// Player whose turn it is.
    pub active: PlayerId,

    /// Turn number (starts at 1).
    pub turn: u32,
}

impl Default for TurnManager {
    fn default() -> Self {
        Self::new(PlayerId::HOME)
    }
}

impl TurnManager {
    /// Turn 1 with `first` acting.
    #[must_use]
    pub const fn new(first: PlayerId) -> Self {
        Self {
            active: first,
            turn: 1,
        }
    }

    /// Whether `player` may act.
    #[must_use]
    pub fn is_active(&self, player: PlayerId) -> bool {
        self.active == player
    }

    /// Tick every unit's lock down by one (floor 0), hand the turn to the
    /// other player and bump the counter.
    pub fn next_turn(&mut self, world: &mut World) {
        world.tick_locks();
        self.active = self.active.opponent();
        self.turn += 1;
        debug!("turn {} begins, {} to act", self.turn, self.active);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::NodeId;
    use crate::cards::{CardCatalog, CardId, CardTemplate};

    fn world_with_locked_unit(turns: u8) -> (World, crate::core::UnitId) {
        let catalog = CardCatalog::new()
            .with_card(CardTemplate::new(CardId::new(1), "Mid", 5))
            .unwrap();
        let mut world = World::new();
        let id = world
            .spawn_unit_from_card(&catalog, PlayerId::HOME, CardId::new(1), NodeId::new(5).unwrap())
            .unwrap();
        world.unit_mut(id).unwrap().lock(turns);
        (world, id)
    }

    #[test]
    fn test_starts_at_turn_one() {
        let turns = TurnManager::new(PlayerId::AWAY);
        assert_eq!(turns.turn, 1);
        assert!(turns.is_active(PlayerId::AWAY));
        assert!(!turns.is_active(PlayerId::HOME));
    }

    #[test]
    fn test_next_turn_flips_and_counts() {
        let mut world = World::new();
        let mut turns = TurnManager::default();

        turns.next_turn(&mut world);
        assert_eq!(turns.active, PlayerId::AWAY);
        assert_eq!(turns.turn, 2);

        turns.next_turn(&mut world);
        assert_eq!(turns.active, PlayerId::HOME);
        assert_eq!(turns.turn, 3);
    }

    #[test]
    fn test_next_turn_ticks_locks_to_zero() {
        let (mut world, id) = world_with_locked_unit(2);
        let mut turns = TurnManager::default();

        turns.next_turn(&mut world);
        assert_eq!(world.unit(id).unwrap().lock_turns, 1);

        turns.next_turn(&mut world);
        turns.next_turn(&mut world);
        assert_eq!(world.unit(id).unwrap().lock_turns, 0);
    }
}
