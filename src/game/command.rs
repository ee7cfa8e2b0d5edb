//! Match commands and the command log.
//!
//! Every accepted command is appended to the match history. Commands carry
//! everything needed to reproduce them, including the dice that settled a
//! battle, so replaying a history reproduces the match without the RNG.

use serde::{Deserialize, Serialize};

use crate::battle::{DiceRolls, Resolution};
use crate::board::NodeId;
use crate::cards::CardId;
use crate::core::{Action, PlayerId, UnitId};

/// One inbound command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    /// Decide who kicks off.
    CoinToss { winner: PlayerId },
    /// Give the ball to the coin-toss winner's chosen unit.
    Kickoff { unit: UnitId },
    /// Dribble, pass or shoot.
    Act { unit: UnitId, action: Action },
    /// Settle the pending battle (attacker only).
    Resolve {
        unit: UnitId,
        resolution: Resolution,
        pass_target: Option<UnitId>,
        rolls: Option<DiceRolls>,
    },
    /// The defending player gives up the pending battle.
    Concede { player: PlayerId },
    /// Bonus step after winning a dribble.
    PostBattleMove { unit: UnitId, to: NodeId },
    /// Decline the bonus step.
    SkipPostBattleMove,
    /// Swap a unit for a fresh one from the catalog.
    Substitute { unit: UnitId, card: CardId },
}

/// A command as it was accepted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActionRecord {
    /// Position in the history, from 0.
    pub sequence: u64,
    /// Turn number when the command was accepted.
    pub turn: u32,
    /// Player the command was issued for.
    pub player: PlayerId,
    pub command: Command,
}
