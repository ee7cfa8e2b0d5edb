//! World state: the board plus the live unit table.
//!
//! A `World` is created once per match and threaded through every rule by
//! reference. Two matches never share one, so nothing leaks between games.
//!
//! ## Invariants
//!
//! - Every unit in the table stands on exactly one node, and that node is
//!   the one recorded in `Unit::position`.
//! - Every occupant on the board is a unit in the table.
//! - At most one unit holds the ball.
//!
//! `check_invariants` verifies all three.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::entity::UnitId;
use super::player::PlayerId;
use crate::board::{Board, NodeId};
use crate::cards::{CardCatalog, CardId, Unit};
use crate::error::{InvariantViolation, MatchError};

/// Board and units for one match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct World {
    /// Node occupancy.
    pub board: Board,

    /// Live units by ID.
    units: BTreeMap<UnitId, Unit>,

    /// Next unit ID to allocate.
    next_unit_id: UnitId,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    /// Create an empty world.
    #[must_use]
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            units: BTreeMap::new(),
            next_unit_id: UnitId::FIRST,
        }
    }

    // === Spawning ===

    fn alloc_unit_id(&mut self) -> UnitId {
        let id = self.next_unit_id;
        self.next_unit_id = id.next();
        id
    }

    fn spawn(
        &mut self,
        catalog: &CardCatalog,
        owner: PlayerId,
        card: CardId,
        node: NodeId,
        goalkeeper: bool,
    ) -> Result<UnitId, MatchError> {
        let template = catalog.get(card).ok_or(MatchError::UnknownCard(card))?;
        let id = self.alloc_unit_id();
        let unit = Unit::spawn(id, owner, template, node).as_goalkeeper(goalkeeper);

        self.units.insert(id, unit);
        self.board.place(id, node);
        Ok(id)
    }

    /// Spawn a unit from a card template onto a node.
    ///
    /// The unit starts with the template's base stamina and the node becomes
    /// its kickoff position.
    pub fn spawn_unit_from_card(
        &mut self,
        catalog: &CardCatalog,
        owner: PlayerId,
        card: CardId,
        node: NodeId,
    ) -> Result<UnitId, MatchError> {
        self.spawn(catalog, owner, card, node, false)
    }

    /// Spawn a goalkeeper.
    pub fn spawn_goalkeeper_from_card(
        &mut self,
        catalog: &CardCatalog,
        owner: PlayerId,
        card: CardId,
        node: NodeId,
    ) -> Result<UnitId, MatchError> {
        self.spawn(catalog, owner, card, node, true)
    }

    /// Replace a unit with a fresh one spawned from `card` on the same node.
    ///
    /// The newcomer keeps the outgoing unit's owner, kickoff position,
    /// goalkeeper flag and ball. Returns the new unit's ID.
    pub fn substitute(
        &mut self,
        catalog: &CardCatalog,
        outgoing: UnitId,
        card: CardId,
    ) -> Result<UnitId, MatchError> {
        let template = catalog.get(card).ok_or(MatchError::UnknownCard(card))?;
        let old = self.units.get(&outgoing).ok_or(MatchError::UnknownUnit(outgoing))?.clone();

        let id = self.alloc_unit_id();
        let mut unit = Unit::spawn(id, old.owner, template, old.position).as_goalkeeper(old.goalkeeper);
        unit.home = old.home;
        unit.has_ball = old.has_ball;

        self.remove_unit(outgoing);
        self.units.insert(id, unit);
        self.board.place(id, old.position);
        Ok(id)
    }

    /// Remove a unit from the table and the board.
    pub fn remove_unit(&mut self, id: UnitId) -> Option<Unit> {
        self.board.remove(id);
        self.units.remove(&id)
    }

    /// Clear the unit table and every node.
    pub fn reset_units(&mut self) {
        self.units.clear();
        self.board.reset_occupants();
    }

    // === Lookup ===

    /// Get a unit.
    #[must_use]
    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.get(&id)
    }

    /// Get a mutable unit.
    pub fn unit_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.units.get_mut(&id)
    }

    /// All units, ascending by ID.
    pub fn units(&self) -> impl Iterator<Item = &Unit> {
        self.units.values()
    }

    /// One player's units, ascending by ID.
    pub fn units_of(&self, player: PlayerId) -> impl Iterator<Item = &Unit> {
        self.units.values().filter(move |u| u.owner == player)
    }

    /// Number of live units.
    #[must_use]
    pub fn unit_count(&self) -> usize {
        self.units.len()
    }

    /// Units of `player` on `node`, ascending by ID.
    pub fn owned_on(&self, node: NodeId, player: PlayerId) -> impl Iterator<Item = UnitId> + '_ {
        self.board
            .occupants(node)
            .iter()
            .copied()
            .filter(move |id| self.units.get(id).is_some_and(|u| u.owner == player))
    }

    // === Stamina, locks, ball ===

    /// Spend stamina on a unit. `None` if the unit does not exist.
    pub fn spend_stamina(&mut self, id: UnitId, cost: i32) -> Option<bool> {
        self.units.get_mut(&id).map(|u| u.spend_stamina(cost))
    }

    /// Decrement every unit's lock by one, flooring at zero.
    pub fn tick_locks(&mut self) {
        for unit in self.units.values_mut() {
            unit.tick_lock();
        }
    }

    /// Clear every lock.
    pub fn clear_locks(&mut self) {
        for unit in self.units.values_mut() {
            unit.lock_turns = 0;
        }
    }

    /// The unit holding the ball, if any.
    #[must_use]
    pub fn ball_carrier(&self) -> Option<UnitId> {
        self.units.values().find(|u| u.has_ball).map(|u| u.id)
    }

    /// Hand the ball to `id`, taking it from whoever had it.
    ///
    /// Returns `false` (and changes nothing) if the unit does not exist.
    pub fn give_ball(&mut self, id: UnitId) -> bool {
        if !self.units.contains_key(&id) {
            return false;
        }
        for unit in self.units.values_mut() {
            unit.has_ball = unit.id == id;
        }
        true
    }

    /// Take the ball off the pitch.
    pub fn clear_ball(&mut self) {
        for unit in self.units.values_mut() {
            unit.has_ball = false;
        }
    }

    // === Movement ===

    /// Move a unit one step along the graph.
    pub fn move_unit(&mut self, id: UnitId, to: NodeId) -> Result<(), MatchError> {
        let unit = self.units.get_mut(&id).ok_or(MatchError::UnknownUnit(id))?;
        self.board.move_unit(id, unit.position, to)?;
        unit.position = to;
        Ok(())
    }

    /// Move a unit to any node, ignoring adjacency.
    pub fn relocate(&mut self, id: UnitId, to: NodeId) -> Result<(), MatchError> {
        let unit = self.units.get_mut(&id).ok_or(MatchError::UnknownUnit(id))?;
        self.board.relocate(id, to);
        unit.position = to;
        Ok(())
    }

    /// Send every unit back to its kickoff node.
    pub fn reset_positions(&mut self) {
        self.board.reset_occupants();
        for unit in self.units.values_mut() {
            unit.position = unit.home;
            self.board.place(unit.id, unit.home);
        }
    }

    // === Consistency ===

    /// Verify the occupancy and ball invariants.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let mut seen: BTreeMap<UnitId, NodeId> = BTreeMap::new();

        for (node, occupants) in self.board.iter() {
            for &id in occupants {
                if !self.units.contains_key(&id) {
                    return Err(InvariantViolation::UnknownOccupant { unit: id, node });
                }
                if let Some(first) = seen.insert(id, node) {
                    return Err(InvariantViolation::DuplicateOccupancy {
                        unit: id,
                        first,
                        second: node,
                    });
                }
            }
        }

        for unit in self.units.values() {
            match seen.get(&unit.id) {
                None => return Err(InvariantViolation::Unplaced { unit: unit.id }),
                Some(&actual) if actual != unit.position => {
                    return Err(InvariantViolation::PositionMismatch {
                        unit: unit.id,
                        recorded: unit.position,
                        actual,
                    });
                }
                Some(_) => {}
            }
        }

        let carriers: Vec<UnitId> = self.units.values().filter(|u| u.has_ball).map(|u| u.id).collect();
        if carriers.len() > 1 {
            return Err(InvariantViolation::MultipleBallCarriers(carriers));
        }

        Ok(())
    }
}
