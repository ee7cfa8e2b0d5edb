//! High-level match phases.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::{PlayerId, UnitId};

/// Where the match is in its lifecycle.
///
/// `CoinToss -> InProgress <-> PostBattleMove`, terminal `Finished`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPhase {
    /// Waiting for the coin toss and the kickoff unit.
    #[default]
    CoinToss,
    /// Normal play.
    InProgress,
    /// A dribble winner may step onto an adjacent empty node.
    PostBattleMove { unit: UnitId },
    /// A player reached the goal target.
    Finished { winner: PlayerId },
}

impl MatchPhase {
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        matches!(self, MatchPhase::Finished { .. })
    }

    /// Winner, once the match is over.
    #[must_use]
    pub const fn winner(&self) -> Option<PlayerId> {
        match self {
            MatchPhase::Finished { winner } => Some(*winner),
            _ => None,
        }
    }
}

impl fmt::Display for MatchPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchPhase::CoinToss => f.write_str("coin toss"),
            MatchPhase::InProgress => f.write_str("play"),
            MatchPhase::PostBattleMove { unit } => write!(f, "post-battle move of {}", unit),
            MatchPhase::Finished { winner } => write!(f, "finished match (won by {})", winner),
        }
    }
}
