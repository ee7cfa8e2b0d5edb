//! Unit actions.
//!
//! An action is the verb a unit performs on its turn plus the node it is
//! aimed at. Shots carry no target: a shot always goes at the goal the unit
//! is standing on.

use serde::{Deserialize, Serialize};

use crate::board::NodeId;

/// The three things a unit can attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    /// Move to an adjacent node, carrying the ball if held.
    Dribble,
    /// Give the ball to a unit on an adjacent node.
    Pass,
    /// Shoot at the goal the unit is standing on.
    Shoot,
}

impl ActionKind {
    /// All action kinds.
    pub const ALL: [ActionKind; 3] = [ActionKind::Dribble, ActionKind::Pass, ActionKind::Shoot];

    /// Whether the acting unit must hold the ball.
    #[must_use]
    pub const fn requires_ball(self) -> bool {
        matches!(self, ActionKind::Pass | ActionKind::Shoot)
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ActionKind::Dribble => "dribble",
            ActionKind::Pass => "pass",
            ActionKind::Shoot => "shoot",
        };
        f.write_str(name)
    }
}

/// A complete unit action.
///
/// ```
/// use soccer_ccg::board::NodeId;
/// use soccer_ccg::core::{Action, ActionKind};
///
/// let run = Action::Dribble(NodeId::new(5).unwrap());
/// assert_eq!(run.kind(), ActionKind::Dribble);
/// assert_eq!(run.target(), NodeId::new(5));
/// assert_eq!(Action::Shoot.target(), None);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Move onto the node.
    Dribble(NodeId),
    /// Pass into the node.
    Pass(NodeId),
    /// Shoot from the current node.
    Shoot,
}

impl Action {
    /// Build an action from its kind and an optional target node.
    ///
    /// Returns `None` when a dribble or pass has no target.
    #[must_use]
    pub fn from_parts(kind: ActionKind, target: Option<NodeId>) -> Option<Self> {
        match kind {
            ActionKind::Dribble => target.map(Action::Dribble),
            ActionKind::Pass => target.map(Action::Pass),
            ActionKind::Shoot => Some(Action::Shoot),
        }
    }

    /// The action's kind.
    #[must_use]
    pub const fn kind(&self) -> ActionKind {
        match self {
            Action::Dribble(_) => ActionKind::Dribble,
            Action::Pass(_) => ActionKind::Pass,
            Action::Shoot => ActionKind::Shoot,
        }
    }

    /// Target node, if the action has one.
    #[must_use]
    pub const fn target(&self) -> Option<NodeId> {
        match self {
            Action::Dribble(node) | Action::Pass(node) => Some(*node),
            Action::Shoot => None,
        }
    }
}
