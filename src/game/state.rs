//! Serializable match state.
//!
//! Plain data, no behavior beyond constructors: a deserialized `MatchState`
//! is immediately playable once handed back to a `Match`.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::command::ActionRecord;
use super::phase::MatchPhase;
use crate::battle::PendingBattle;
use crate::core::{PlayerId, PlayerMap, World};
use crate::rules::TurnManager;

/// Everything that changes during a match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchState {
    /// Board and units.
    pub world: World,

    /// Acting player and turn number.
    pub turns: TurnManager,

    /// Goals per player.
    pub score: PlayerMap<u32>,

    pub phase: MatchPhase,

    /// The unresolved battle, if any. At most one at a time.
    pub pending: Option<PendingBattle>,

    /// Set by the coin toss, consumed by the kickoff.
    pub coin_toss_winner: Option<PlayerId>,

    /// Accepted commands, oldest first.
    pub history: Vector<ActionRecord>,
}

impl MatchState {
    /// Fresh state around a populated world.
    #[must_use]
    pub fn new(world: World) -> Self {
        Self {
            world,
            turns: TurnManager::default(),
            score: PlayerMap::with_value(0),
            phase: MatchPhase::CoinToss,
            pending: None,
            coin_toss_winner: None,
            history: Vector::new(),
        }
    }
}
