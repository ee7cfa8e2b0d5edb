//! Board occupancy tracking and movement.
//!
//! The `Board` records which units stand on which node. Topology is static
//! (see `NodeId::neighbors`); only the occupant sets change. It supports:
//! - Adjacency-checked moves (`move_unit`)
//! - Unchecked placement for kickoffs and push-backs (`place`/`relocate`)
//! - Occupant lookup by node and location lookup by unit

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::node::{NodeId, NODE_COUNT};
use crate::core::UnitId;
use crate::error::BoardError;

/// Read-only view of a single node.
#[derive(Clone, Copy, Debug)]
pub struct NodeView<'a> {
    /// Node identity.
    pub id: NodeId,
    /// Nodes reachable in one step.
    pub neighbors: &'static [NodeId],
    /// Goal/goalkeeper node flag.
    pub is_goal: bool,
    /// Units currently on the node, ascending by ID.
    pub occupants: &'a BTreeSet<UnitId>,
}

/// Occupant sets for all twelve nodes.
///
/// ```
/// use soccer_ccg::board::{Board, NodeId};
/// use soccer_ccg::core::UnitId;
///
/// let mut board = Board::new();
/// let a = NodeId::new(2).unwrap();
/// let b = NodeId::new(5).unwrap();
///
/// board.place(UnitId(1), a);
/// board.move_unit(UnitId(1), a, b).unwrap();
///
/// assert_eq!(board.locate(UnitId(1)), Some(b));
/// assert!(board.is_empty(a));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    occupants: [BTreeSet<UnitId>; NODE_COUNT],
}

impl Board {
    /// Create an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// View a node.
    #[must_use]
    pub fn node(&self, id: NodeId) -> NodeView<'_> {
        NodeView {
            id,
            neighbors: id.neighbors(),
            is_goal: id.is_goal(),
            occupants: &self.occupants[id.slot()],
        }
    }

    /// Nodes reachable from `id` in one step.
    #[must_use]
    pub fn neighbors(&self, id: NodeId) -> &'static [NodeId] {
        id.neighbors()
    }

    /// Whether `to` is in `from`'s adjacency list.
    #[must_use]
    pub fn is_adjacent(&self, from: NodeId, to: NodeId) -> bool {
        from.neighbors().contains(&to)
    }

    /// Units on a node, ascending by ID.
    #[must_use]
    pub fn occupants(&self, id: NodeId) -> &BTreeSet<UnitId> {
        &self.occupants[id.slot()]
    }

    /// Whether nobody stands on the node.
    #[must_use]
    pub fn is_empty(&self, id: NodeId) -> bool {
        self.occupants[id.slot()].is_empty()
    }

    /// Find the node a unit stands on.
    #[must_use]
    pub fn locate(&self, unit: UnitId) -> Option<NodeId> {
        NodeId::all().find(|node| self.occupants[node.slot()].contains(&unit))
    }

    /// Put a unit on a node without any checks.
    ///
    /// Callers must make sure the unit is not already on another node.
    pub fn place(&mut self, unit: UnitId, node: NodeId) {
        self.occupants[node.slot()].insert(unit);
    }

    /// Take a unit off the board. Returns the node it was on.
    pub fn remove(&mut self, unit: UnitId) -> Option<NodeId> {
        let node = self.locate(unit)?;
        self.occupants[node.slot()].remove(&unit);
        Some(node)
    }

    /// Move a unit to any node, adjacent or not.
    ///
    /// Used for kickoff resets and push-backs. Returns the previous node.
    pub fn relocate(&mut self, unit: UnitId, to: NodeId) -> Option<NodeId> {
        let from = self.remove(unit);
        self.place(unit, to);
        from
    }

    /// Move a unit one step along the graph.
    ///
    /// Fails if the unit is not on `from` or `to` is not adjacent to `from`.
    pub fn move_unit(&mut self, unit: UnitId, from: NodeId, to: NodeId) -> Result<(), BoardError> {
        if !self.occupants[from.slot()].contains(&unit) {
            return Err(BoardError::NotOnNode { unit, node: from });
        }
        if !self.is_adjacent(from, to) {
            return Err(BoardError::NotAdjacent { from, to });
        }

        self.occupants[from.slot()].remove(&unit);
        self.occupants[to.slot()].insert(unit);
        Ok(())
    }

    /// Clear every node.
    pub fn reset_occupants(&mut self) {
        for set in &mut self.occupants {
            set.clear();
        }
    }

    /// Iterate over (node, occupants) for every node.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &BTreeSet<UnitId>)> {
        NodeId::all().map(move |node| (node, &self.occupants[node.slot()]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(n: u8) -> NodeId {
        NodeId::new(n).unwrap()
    }

    #[test]
    fn test_node_view() {
        let mut board = Board::new();
        board.place(UnitId(3), node(12));

        let view = board.node(node(12));
        assert!(view.is_goal);
        assert_eq!(view.neighbors, board.neighbors(node(12)));
        assert!(view.occupants.contains(&UnitId(3)));
    }

    #[test]
    fn test_move_adjacent() {
        let mut board = Board::new();
        board.place(UnitId(1), node(5));

        board.move_unit(UnitId(1), node(5), node(9)).unwrap();

        assert!(board.is_empty(node(5)));
        assert_eq!(board.locate(UnitId(1)), Some(node(9)));
    }

    #[test]
    fn test_move_not_adjacent_fails() {
        let mut board = Board::new();
        board.place(UnitId(1), node(1));

        let err = board.move_unit(UnitId(1), node(1), node(12)).unwrap_err();
        assert_eq!(err, BoardError::NotAdjacent { from: node(1), to: node(12) });
        assert_eq!(board.locate(UnitId(1)), Some(node(1)));
    }

    #[test]
    fn test_adjacency_is_directional_lookup() {
        let board = Board::new();
        assert!(board.is_adjacent(node(10), node(12)));
        assert!(board.is_adjacent(node(12), node(10)));
        assert!(!board.is_adjacent(node(9), node(12)));
    }

    #[test]
    fn test_move_from_wrong_node_fails() {
        let mut board = Board::new();
        board.place(UnitId(1), node(2));

        let err = board.move_unit(UnitId(1), node(3), node(5)).unwrap_err();
        assert_eq!(err, BoardError::NotOnNode { unit: UnitId(1), node: node(3) });
    }

    #[test]
    fn test_relocate_and_remove() {
        let mut board = Board::new();
        board.place(UnitId(1), node(12));

        assert_eq!(board.relocate(UnitId(1), node(10)), Some(node(12)));
        assert_eq!(board.locate(UnitId(1)), Some(node(10)));

        assert_eq!(board.remove(UnitId(1)), Some(node(10)));
        assert_eq!(board.locate(UnitId(1)), None);
        assert_eq!(board.remove(UnitId(1)), None);
    }

    #[test]
    fn test_occupants_are_a_set() {
        let mut board = Board::new();
        board.place(UnitId(2), node(8));
        board.place(UnitId(2), node(8));
        board.place(UnitId(1), node(8));

        let ids: Vec<_> = board.occupants(node(8)).iter().copied().collect();
        assert_eq!(ids, vec![UnitId(1), UnitId(2)]);
    }

    #[test]
    fn test_reset_occupants() {
        let mut board = Board::new();
        board.place(UnitId(1), node(1));
        board.place(UnitId(2), node(12));

        board.reset_occupants();

        assert!(board.iter().all(|(_, units)| units.is_empty()));
    }
}
