//! Error types.
//!
//! Illegal moves are ordinary data: `IllegalAction` is carried inside
//! `ActionOutcome::Illegal` and its `Display` is the reason shown to the
//! player. The remaining types are `Err` values from fallible entry points.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::NodeId;
use crate::cards::CardId;
use crate::core::{PlayerId, UnitId};
use crate::game::MatchPhase;

/// Board movement failures.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardError {
    #[error("{unit} is not on {node}")]
    NotOnNode { unit: UnitId, node: NodeId },

    #[error("{to} is not adjacent to {from}")]
    NotAdjacent { from: NodeId, to: NodeId },
}

/// Why a requested action was refused.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IllegalAction {
    #[error("unknown unit {0}")]
    UnknownUnit(UnitId),

    #[error("match is not in progress")]
    NotInProgress,

    #[error("a battle is pending")]
    BattlePending,

    #[error("not your turn")]
    NotYourTurn,

    #[error("unit is locked for {turns} more turn(s)")]
    Locked { turns: u8 },

    #[error("unit does not have the ball")]
    NoBall,

    #[error("unit is not on {0}")]
    NotOnNode(NodeId),

    #[error("{to} is not adjacent to {from}")]
    NotAdjacent { from: NodeId, to: NodeId },

    #[error("node is occupied by a teammate")]
    TeammateBlocking,

    #[error("no teammate or opponent to pass to")]
    NoPassTarget,

    #[error("not in shooting range: not at opponent's goal")]
    NotInShootingRange,

    #[error("contested node is overcrowded")]
    Overcrowded,
}

/// Battle resolution could not produce a result.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolveError {
    #[error("unit {0} not found")]
    MissingUnit(UnitId),

    #[error("card {0} not found")]
    MissingCard(CardId),

    #[error("die roll {0} is outside the die's faces")]
    InvalidDieRoll(u8),
}

/// Card catalog loading failures.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("invalid catalog json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("card {0} registered twice")]
    DuplicateCard(CardId),
}

/// Broken world-state invariants. Never produced under correct sequencing.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvariantViolation {
    #[error("{unit} occupies both {first} and {second}")]
    DuplicateOccupancy {
        unit: UnitId,
        first: NodeId,
        second: NodeId,
    },

    #[error("{unit} is not on any node")]
    Unplaced { unit: UnitId },

    #[error("{unit} records {recorded} but stands on {actual}")]
    PositionMismatch {
        unit: UnitId,
        recorded: NodeId,
        actual: NodeId,
    },

    #[error("{node} lists unknown unit {unit}")]
    UnknownOccupant { unit: UnitId, node: NodeId },

    #[error("{0:?} all hold the ball")]
    MultipleBallCarriers(Vec<UnitId>),
}

/// Errors from `Match` entry points.
#[derive(Error, Debug)]
pub enum MatchError {
    #[error("command not allowed during {0}")]
    WrongPhase(MatchPhase),

    #[error("coin toss has not been decided")]
    CoinTossUndecided,

    #[error("{unit} does not belong to {player}")]
    NotOwnedBy { unit: UnitId, player: PlayerId },

    #[error("unknown unit {0}")]
    UnknownUnit(UnitId),

    #[error("unknown card {0}")]
    UnknownCard(CardId),

    #[error("{0} has no units")]
    EmptySquad(PlayerId),

    #[error("no battle is pending")]
    NoPendingBattle,

    #[error("{0} is not an attacker in the pending battle")]
    NotAttacker(UnitId),

    #[error("{0} is not defending in the pending battle")]
    NotDefender(PlayerId),

    #[error("{0} is not the unit granted the post-battle move")]
    NotPostBattleMover(UnitId),

    #[error("{0} is not empty")]
    NodeOccupied(NodeId),

    #[error(transparent)]
    Illegal(#[from] IllegalAction),

    #[error(transparent)]
    Board(#[from] BoardError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Invariant(#[from] InvariantViolation),

    #[error("invalid config json: {0}")]
    Config(#[from] serde_json::Error),

    #[error("snapshot encoding failed: {0}")]
    Encoding(#[from] bincode::Error),
}
