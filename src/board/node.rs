//! Node identifiers and the fixed pitch graph.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// Number of nodes on the pitch.
pub const NODE_COUNT: usize = 12;

/// A node on the pitch, 1..=12.
///
/// Node 1 is the home goal, node 12 the away goal. Construction is checked,
/// so holding a `NodeId` means it names a real node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct NodeId(u8);

impl NodeId {
    /// Goal defended by the home player.
    pub const HOME_GOAL: NodeId = NodeId(1);

    /// Goal defended by the away player.
    pub const AWAY_GOAL: NodeId = NodeId(12);

    /// Create a node ID, returning `None` outside 1..=12.
    #[must_use]
    pub const fn new(id: u8) -> Option<Self> {
        if id >= 1 && id as usize <= NODE_COUNT {
            Some(Self(id))
        } else {
            None
        }
    }

    /// Get the raw node number.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// 0-based slot for array storage.
    #[must_use]
    pub(crate) const fn slot(self) -> usize {
        self.0 as usize - 1
    }

    /// Iterate over every node, 1 through 12.
    pub fn all() -> impl Iterator<Item = NodeId> {
        (1..=NODE_COUNT as u8).map(NodeId)
    }

    /// Whether this is one of the two goal nodes.
    #[must_use]
    pub const fn is_goal(self) -> bool {
        self.0 == Self::HOME_GOAL.0 || self.0 == Self::AWAY_GOAL.0
    }

    /// The goal node a player defends (and its keeper starts on).
    #[must_use]
    pub const fn own_goal(player: PlayerId) -> Self {
        if player.0 == PlayerId::HOME.0 {
            Self::HOME_GOAL
        } else {
            Self::AWAY_GOAL
        }
    }

    /// The goal node a player shoots at.
    #[must_use]
    pub const fn target_goal(player: PlayerId) -> Self {
        Self::own_goal(player.opponent())
    }

    /// Where a shooter denied at this goal ends up: 12 → 10, 1 → 2.
    #[must_use]
    pub const fn push_back(self) -> Option<Self> {
        match self.0 {
            12 => Some(NodeId(10)),
            1 => Some(NodeId(2)),
            _ => None,
        }
    }

    /// Directional adjacency list for this node.
    #[must_use]
    pub fn neighbors(self) -> &'static [NodeId] {
        ADJACENCY[self.slot()]
    }
}

impl TryFrom<u8> for NodeId {
    type Error = String;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        NodeId::new(id).ok_or_else(|| format!("node {id} is not on the pitch (1..={NODE_COUNT})"))
    }
}

impl From<NodeId> for u8 {
    fn from(node: NodeId) -> Self {
        node.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Node({})", self.0)
    }
}

const fn n(id: u8) -> NodeId {
    NodeId(id)
}

/// The published adjacency table. Lists are directional.
static ADJACENCY: [&[NodeId]; NODE_COUNT] = [
    &[n(2), n(3)],
    &[n(1), n(3), n(4), n(5)],
    &[n(1), n(2), n(5), n(6)],
    &[n(2), n(5), n(7), n(8)],
    &[n(2), n(3), n(4), n(6), n(7), n(8), n(9)],
    &[n(3), n(5), n(8), n(9)],
    &[n(4), n(5), n(8), n(10)],
    &[n(4), n(5), n(6), n(7), n(9), n(10), n(11)],
    &[n(5), n(6), n(8), n(11)],
    &[n(7), n(8), n(11), n(12)],
    &[n(8), n(9), n(10), n(12)],
    &[n(10), n(11)],
];
