//! Battle inputs and results.

use std::fmt;
use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

use super::dice::DiceRolls;
use super::matchup::{BattleSide, PendingBattle};
use crate::board::NodeId;
use crate::core::{PlayerId, UnitId};

/// Battle strength in hundredths of a stat point.
///
/// Kept as an integer so the outnumbered multiplier (x1.95) is exact and
/// threshold comparisons never depend on float rounding.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Strength(i64);

impl Strength {
    /// Hundredths per stat point.
    pub const SCALE: i64 = 100;

    pub const ZERO: Strength = Strength(0);

    /// Strength of a whole number of stat points.
    #[must_use]
    pub const fn from_points(points: i64) -> Self {
        Self(points * Self::SCALE)
    }

    /// Raw value in hundredths.
    #[must_use]
    pub const fn hundredths(self) -> i64 {
        self.0
    }

    /// Multiply by `percent` / 100.
    #[must_use]
    pub const fn scaled(self, percent: i64) -> Self {
        Self(self.0 * percent / 100)
    }

    #[must_use]
    pub const fn abs(self) -> Self {
        Self(self.0.abs())
    }
}

impl Add for Strength {
    type Output = Strength;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Strength {
    type Output = Strength;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.abs();
        write!(f, "{}{}.{:02}", sign, abs / Self::SCALE, abs % Self::SCALE)
    }
}

/// How the attacker wants the battle settled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    /// Compare values, rolling dice if the contest is close.
    #[default]
    Contest,
    /// The given side concedes. No dice.
    Surrender(BattleSide),
}

/// Everything the resolver needs for one battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleRequest {
    pub battle: PendingBattle,
    pub resolution: Resolution,
    /// Preferred receiver if the battle is a pass.
    pub pass_target: Option<UnitId>,
    /// Externally authored rolls. When absent the caller's dice are used.
    pub rolls: Option<DiceRolls>,
}

impl BattleRequest {
    /// A normal contest.
    #[must_use]
    pub const fn contest(battle: PendingBattle) -> Self {
        Self {
            battle,
            resolution: Resolution::Contest,
            pass_target: None,
            rolls: None,
        }
    }

    /// A battle one side gives up.
    #[must_use]
    pub const fn surrender(battle: PendingBattle, side: BattleSide) -> Self {
        Self {
            battle,
            resolution: Resolution::Surrender(side),
            pass_target: None,
            rolls: None,
        }
    }

    #[must_use]
    pub const fn with_rolls(mut self, rolls: DiceRolls) -> Self {
        self.rolls = Some(rolls);
        self
    }

    #[must_use]
    pub const fn with_pass_target(mut self, target: UnitId) -> Self {
        self.pass_target = Some(target);
        self
    }
}

/// What settled the battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "by", rename_all = "snake_case")]
pub enum Decision {
    /// Values were far enough apart; no dice.
    Threshold,
    /// Close contest settled by a die each.
    Dice {
        rolls: DiceRolls,
        attacker_penalty: i64,
        defender_penalty: i64,
    },
    /// One side conceded.
    Surrender { side: BattleSide },
}

/// A state change the orchestrator applies after a battle, in order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum PostEffect {
    SpendStamina { unit: UnitId, cost: i32 },
    Lock { unit: UnitId, turns: u8 },
    GiveBall { unit: UnitId },
    Goal { scorer: UnitId, player: PlayerId },
    Reposition { unit: UnitId, to: NodeId },
}

/// Result of a resolved battle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleOutcome {
    pub battle: PendingBattle,
    pub winner: BattleSide,
    /// Attacking side's strength after the outnumbered multiplier.
    pub attack: Strength,
    pub defense: Strength,
    pub decided_by: Decision,
    pub effects: Vec<PostEffect>,
}

impl BattleOutcome {
    #[must_use]
    pub const fn loser(&self) -> BattleSide {
        self.winner.other()
    }

    #[must_use]
    pub fn attacker_won(&self) -> bool {
        self.winner == BattleSide::Attacker
    }

    /// Player whose side won.
    #[must_use]
    pub const fn winning_player(&self) -> PlayerId {
        match self.winner {
            BattleSide::Attacker => self.battle.attacking_player,
            BattleSide::Defender => self.battle.defending_player(),
        }
    }

    /// Rolls used, if dice decided the battle.
    #[must_use]
    pub const fn rolls(&self) -> Option<DiceRolls> {
        match self.decided_by {
            Decision::Dice { rolls, .. } => Some(rolls),
            _ => None,
        }
    }

    /// The scoring player, if this battle produced a goal.
    #[must_use]
    pub fn goal(&self) -> Option<PlayerId> {
        self.effects.iter().find_map(|effect| match *effect {
            PostEffect::Goal { player, .. } => Some(player),
            _ => None,
        })
    }

    /// Lock applied to `unit`, if any.
    #[must_use]
    pub fn lock_for(&self, unit: UnitId) -> Option<u8> {
        self.effects.iter().find_map(|effect| match *effect {
            PostEffect::Lock { unit: u, turns } if u == unit => Some(turns),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strength_scaling_is_exact() {
        let combined = Strength::from_points(20).scaled(195);
        assert_eq!(combined.hundredths(), 3900);
        assert_eq!(combined, Strength::from_points(39));

        let odd = Strength::from_points(7).scaled(195);
        assert_eq!(odd.hundredths(), 1365);
        assert_eq!(odd.to_string(), "13.65");
    }

    #[test]
    fn test_strength_display_negative() {
        let diff = Strength::from_points(3) - Strength::from_points(10).scaled(195);
        assert_eq!(diff.to_string(), "-16.50");
        assert_eq!(diff.abs().to_string(), "16.50");
    }

    #[test]
    fn test_strength_ordering() {
        assert!(Strength::from_points(5) > Strength::ZERO);
        assert!((Strength::from_points(2) - Strength::from_points(4)) < Strength::ZERO);
    }

    #[test]
    fn test_post_effect_json_shape() {
        let effect = PostEffect::Lock {
            unit: UnitId(4),
            turns: 2,
        };
        let json = serde_json::to_string(&effect).unwrap();
        assert_eq!(json, r#"{"effect":"lock","unit":4,"turns":2}"#);
    }
}
