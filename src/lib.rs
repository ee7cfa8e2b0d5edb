//! # soccer-ccg
//!
//! Rules core for a turn-based soccer card battle game.
//!
//! Two players field small squads on a fixed 12-node pitch. Units dribble,
//! pass and shoot; actions into an occupied node become battles settled by a
//! stat comparison with a dice tie-break.
//!
//! ## Design Principles
//!
//! 1. **Explicit World**: Board and units live in one `World` value owned by
//!    the match. No globals, so matches never leak into each other.
//!
//! 2. **Plain Data**: Units, pending battles and match state are serde
//!    records. A deserialized snapshot plays on without re-hydration.
//!
//! 3. **Effects as Data**: The battle resolver is pure. It returns
//!    post-effects and the match applies them.
//!
//! 4. **Deterministic**: All randomness goes through a seeded ChaCha8 RNG or
//!    externally supplied dice, and every accepted command is logged with
//!    the rolls that decided it.
//!
//! ## Modules
//!
//! - `core`: Unit IDs, players, actions, RNG, configuration, world state
//! - `board`: Node graph and occupancy
//! - `cards`: Card templates, catalog, live units
//! - `battle`: Matchups, dice, battle resolution
//! - `rules`: Turn manager and action evaluator
//! - `game`: Match state machine, builder, history, snapshots
//! - `error`: Error types

pub mod battle;
pub mod board;
pub mod cards;
pub mod core;
pub mod error;
pub mod game;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionKind, BattleRules, GameRng, GameRngState, LockRules, MatchConfig, PlayerId,
    PlayerMap, UnitId, World,
};

pub use crate::board::{Board, NodeId};

pub use crate::cards::{CardCatalog, CardId, CardTemplate, Rarity, Stat, StatLine, Unit};

pub use crate::battle::{
    resolve_battle, BattleOutcome, BattleRequest, BattleSide, Decision, DiceRolls, DiceSource,
    FixedDice, Matchup, PendingBattle, PostEffect, Resolution, Strength,
};

pub use crate::rules::{ActionOutcome, TurnManager};

pub use crate::game::{
    ActionRecord, Command, Formation, Match, MatchBuilder, MatchPhase, MatchSnapshot, MatchState,
    Squad,
};

pub use crate::error::{
    BoardError, CatalogError, IllegalAction, InvariantViolation, MatchError, ResolveError,
};
