//! Match orchestration.
//!
//! ## Key Types
//!
//! - `Match`: owns one game's state and sequences every command
//! - `MatchBuilder` / `Squad` / `Formation`: set up the pitch
//! - `MatchPhase`: coin toss, play, post-battle move, finished
//! - `Command` / `ActionRecord`: the replayable command log
//! - `MatchSnapshot`: state plus RNG position, JSON or bincode

pub mod command;
pub mod orchestrator;
pub mod phase;
pub mod setup;
pub mod snapshot;
pub mod state;

pub use command::{ActionRecord, Command};
pub use orchestrator::Match;
pub use phase::MatchPhase;
pub use setup::{Formation, MatchBuilder, Squad};
pub use snapshot::MatchSnapshot;
pub use state::MatchState;
