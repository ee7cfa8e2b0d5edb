//! Turn sequencing and action legality.
//!
//! - `turn`: acting player, turn counter, lock ticking
//! - `evaluator`: validates dribble/pass/shoot requests and either applies
//!   them or reports a pending battle

pub mod evaluator;
pub mod turn;

pub use evaluator::{evaluate, legal_actions, perform_action, ActionOutcome};
pub use turn::TurnManager;
