//! Units - live card instances on the pitch.
//!
//! A `Unit` is spawned from a `CardTemplate` and tracks the mutable state a
//! card picks up during a match: stamina, lock turns, position and the ball.
//! Units are plain data; a deserialized unit is immediately usable.

use serde::{Deserialize, Serialize};

use super::definition::{CardId, CardTemplate};
use crate::board::NodeId;
use crate::core::{PlayerId, UnitId};

/// A card on the pitch.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Unit {
    /// Unique ID for this instance.
    pub id: UnitId,

    /// Controlling player.
    pub owner: PlayerId,

    /// Template this unit was spawned from.
    pub card: CardId,

    /// Node the unit stands on.
    pub position: NodeId,

    /// Formation node the unit returns to at kickoff.
    pub home: NodeId,

    /// Remaining stamina, 0..=max_stamina.
    pub stamina: i32,

    /// Stamina at spawn (the template's base stamina).
    pub max_stamina: i32,

    /// Turns left before the unit may act again. 0 = free.
    pub lock_turns: u8,

    /// Whether the unit holds the ball.
    pub has_ball: bool,

    /// Goalkeeper flag.
    #[serde(default)]
    pub goalkeeper: bool,
}

impl Unit {
    /// Create a unit from a template, at full stamina, on `node`.
    #[must_use]
    pub fn spawn(id: UnitId, owner: PlayerId, template: &CardTemplate, node: NodeId) -> Self {
        Self {
            id,
            owner,
            card: template.id,
            position: node,
            home: node,
            stamina: template.base_stamina,
            max_stamina: template.base_stamina,
            lock_turns: 0,
            has_ball: false,
            goalkeeper: false,
        }
    }

    /// Mark the unit as a goalkeeper (builder pattern).
    #[must_use]
    pub fn as_goalkeeper(mut self, goalkeeper: bool) -> Self {
        self.goalkeeper = goalkeeper;
        self
    }

    /// Spend stamina.
    ///
    /// With enough stamina the cost is deducted and `true` returned.
    /// Otherwise stamina drops to 0 and `false` signals the shortfall.
    pub fn spend_stamina(&mut self, cost: i32) -> bool {
        let cost = cost.max(0);
        if self.stamina >= cost {
            self.stamina -= cost;
            true
        } else {
            self.stamina = 0;
            false
        }
    }

    /// Whether the unit could pay `cost` without running dry.
    #[must_use]
    pub fn can_afford(&self, cost: i32) -> bool {
        self.stamina >= cost.max(0)
    }

    /// Whether the unit is free to act.
    #[must_use]
    pub fn is_free(&self) -> bool {
        self.lock_turns == 0
    }

    /// Lock the unit, keeping the longer of the current and new lock.
    pub fn lock(&mut self, turns: u8) {
        self.lock_turns = self.lock_turns.max(turns);
    }

    /// Tick one turn off the lock, never below zero.
    pub fn tick_lock(&mut self) {
        self.lock_turns = self.lock_turns.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Stat;

    fn unit(stamina: i32) -> Unit {
        let template = CardTemplate::new(CardId::new(1), "Mid", stamina).with_stat(Stat::Speed, 2, 1);
        Unit::spawn(UnitId(1), PlayerId::HOME, &template, NodeId::new(5).unwrap())
    }

    #[test]
    fn test_spawn_from_template() {
        let u = unit(10);

        assert_eq!(u.card, CardId::new(1));
        assert_eq!(u.stamina, 10);
        assert_eq!(u.max_stamina, 10);
        assert_eq!(u.position, u.home);
        assert!(u.is_free());
        assert!(!u.has_ball);
        assert!(!u.goalkeeper);
    }

    #[test]
    fn test_spend_stamina_success() {
        let mut u = unit(5);
        assert!(u.spend_stamina(3));
        assert_eq!(u.stamina, 2);
        assert!(u.spend_stamina(2));
        assert_eq!(u.stamina, 0);
    }

    #[test]
    fn test_spend_stamina_clamps() {
        let mut u = unit(2);
        assert!(!u.spend_stamina(5));
        assert_eq!(u.stamina, 0);
    }

    #[test]
    fn test_negative_cost_is_free() {
        let mut u = unit(4);
        assert!(u.spend_stamina(-3));
        assert_eq!(u.stamina, 4);
    }

    #[test]
    fn test_lock_and_tick() {
        let mut u = unit(5);
        u.lock(2);
        u.lock(1);
        assert_eq!(u.lock_turns, 2);

        u.tick_lock();
        u.tick_lock();
        u.tick_lock();
        assert_eq!(u.lock_turns, 0);
        assert!(u.is_free());
    }

    #[test]
    fn test_unit_serialization() {
        let u = unit(7).as_goalkeeper(true);
        let json = serde_json::to_string(&u).unwrap();
        let deserialized: Unit = serde_json::from_str(&json).unwrap();
        assert_eq!(u, deserialized);
    }
}
