//! Contested actions.
//!
//! A battle starts when a dribble, pass or shot targets a node held by the
//! opponent. The evaluator classifies it into a [`Matchup`], the match stores
//! it as a [`PendingBattle`], and [`resolve_battle`] settles it into a
//! [`BattleOutcome`] whose [`PostEffect`]s the match then applies.

pub mod dice;
pub mod matchup;
pub mod outcome;
pub mod resolver;

pub use dice::{DiceRolls, DiceSource, FixedDice};
pub use matchup::{BattleSide, Matchup, PendingBattle, SideUnits};
pub use outcome::{BattleOutcome, BattleRequest, Decision, PostEffect, Resolution, Strength};
pub use resolver::{resolve_battle, Contribution, Resolver};
