//! Tie-break dice.
//!
//! The resolver never owns randomness. It asks a `DiceSource` for one roll
//! per side, which is either the match RNG or a pair of externally authored
//! rolls (for replays, or for two clients sharing a single result).

use serde::{Deserialize, Serialize};

use super::matchup::BattleSide;
use crate::core::GameRng;

/// Anything that can roll a die for one side of a battle.
pub trait DiceSource {
    /// Roll a die with `sides` faces for `side`. Expected range is 1..=sides.
    fn roll(&mut self, side: BattleSide, sides: u8) -> u8;
}

impl DiceSource for GameRng {
    fn roll(&mut self, _side: BattleSide, sides: u8) -> u8 {
        self.roll_die(sides)
    }
}

/// A pair of pre-supplied rolls.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DiceRolls {
    pub attacker: u8,
    pub defender: u8,
}

impl DiceRolls {
    #[must_use]
    pub const fn new(attacker: u8, defender: u8) -> Self {
        Self { attacker, defender }
    }

    /// The roll for one side.
    #[must_use]
    pub const fn for_side(&self, side: BattleSide) -> u8 {
        match side {
            BattleSide::Attacker => self.attacker,
            BattleSide::Defender => self.defender,
        }
    }
}

/// Dice that always return the supplied rolls.
///
/// The resolver checks every roll against the die's faces, so an
/// out-of-range value surfaces as an error rather than a skewed result.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedDice(pub DiceRolls);

impl From<DiceRolls> for FixedDice {
    fn from(rolls: DiceRolls) -> Self {
        Self(rolls)
    }
}

impl DiceSource for FixedDice {
    fn roll(&mut self, side: BattleSide, _sides: u8) -> u8 {
        self.0.for_side(side)
    }
}
