//! Core types: unit IDs, players, actions, RNG, configuration, world state.
//!
//! Everything here is plain data. Rules live in `rules` and `battle`; the
//! match state machine lives in `game`.

pub mod action;
pub mod config;
pub mod entity;
pub mod player;
pub mod rng;
pub mod state;

pub use action::{Action, ActionKind};
pub use config::{BattleRules, LockRules, MatchConfig};
pub use entity::UnitId;
pub use player::{PlayerId, PlayerMap, PLAYER_COUNT};
pub use rng::{GameRng, GameRngState};
pub use state::World;
