//! Match snapshots.
//!
//! A snapshot is the full `MatchState` plus the RNG position, so a restored
//! match rolls the same dice the original would have. Snapshots encode to
//! JSON for inspection or to bincode for storage.

use serde::{Deserialize, Serialize};

use super::state::MatchState;
use crate::core::GameRngState;
use crate::error::MatchError;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub state: MatchState,
    pub rng: GameRngState,
}

impl MatchSnapshot {
    /// Compact binary encoding.
    pub fn to_bytes(&self) -> Result<Vec<u8>, MatchError> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, MatchError> {
        Ok(bincode::deserialize(bytes)?)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
