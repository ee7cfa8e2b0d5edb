//! Match configuration.
//!
//! Everything tunable about a match lives here:
//! - `LockRules`: how many turns a battle loser sits out, per action
//! - `BattleRules`: thresholds, the outnumbered multiplier, penalties
//! - `MatchConfig`: combines the above with the goal target
//!
//! All types deserialize with defaults for missing fields, so a config file
//! only needs to mention what it overrides.

use serde::{Deserialize, Serialize};

use super::action::ActionKind;
use crate::error::MatchError;

/// Lock duration (in turns) applied to the losers of a battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LockRules {
    /// Turns locked after losing a dribble contest.
    pub dribble: u8,
    /// Turns locked after losing a pass contest.
    pub pass: u8,
    /// Turns locked after losing a shot contest.
    pub shoot: u8,
}

impl Default for LockRules {
    fn default() -> Self {
        Self {
            dribble: 2,
            pass: 1,
            shoot: 1,
        }
    }
}

impl LockRules {
    /// Lock duration for the loser of a contest of this kind.
    #[must_use]
    pub const fn for_action(&self, action: ActionKind) -> u8 {
        match action {
            ActionKind::Dribble => self.dribble,
            ActionKind::Pass => self.pass,
            ActionKind::Shoot => self.shoot,
        }
    }
}

/// Battle resolution constants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleRules {
    /// A 1v1 is decided without dice when the values differ by more than this.
    pub single_threshold: i64,

    /// Same, for the two outnumbered variants.
    pub outnumbered_threshold: i64,

    /// Multiplier applied to the aggregated side in an outnumbered battle,
    /// in percent (195 = x1.95).
    pub outnumbered_multiplier_percent: i64,

    /// Subtracted from the roll of the side with the strictly lower value.
    pub underdog_penalty: i64,

    /// Factor on the lone defender's speed when defending a 1v1 pass.
    pub pass_defense_speed_factor: i64,

    /// Flat speed reduction for a unit that cannot afford its stamina cost.
    pub exhaustion_speed_penalty: i64,

    /// Stamina paid by each unit of a side that concedes a battle.
    pub surrender_stamina_penalty: i32,

    /// Faces on the tie-break die.
    pub die_sides: u8,

    /// Lock durations for battle losers.
    pub locks: LockRules,
}

impl Default for BattleRules {
    fn default() -> Self {
        Self {
            single_threshold: 5,
            outnumbered_threshold: 10,
            outnumbered_multiplier_percent: 195,
            underdog_penalty: 2,
            pass_defense_speed_factor: 2,
            exhaustion_speed_penalty: 2,
            surrender_stamina_penalty: 2,
            die_sides: 6,
            locks: LockRules::default(),
        }
    }
}

impl BattleRules {
    /// Replace the lock table.
    #[must_use]
    pub fn with_locks(mut self, locks: LockRules) -> Self {
        self.locks = locks;
        self
    }

    /// Set the surrender stamina penalty.
    #[must_use]
    pub fn with_surrender_penalty(mut self, penalty: i32) -> Self {
        self.surrender_stamina_penalty = penalty;
        self
    }
}

/// Complete match configuration.
///
/// ```
/// use soccer_ccg::core::MatchConfig;
///
/// let config = MatchConfig::from_json(r#"{ "goal_target": 5 }"#).unwrap();
/// assert_eq!(config.goal_target, 5);
/// assert_eq!(config.battle.single_threshold, 5);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Goals needed to win the match.
    pub goal_target: u32,

    /// Battle constants.
    pub battle: BattleRules,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            goal_target: 3,
            battle: BattleRules::default(),
        }
    }
}

impl MatchConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from JSON, defaulting missing fields.
    pub fn from_json(json: &str) -> Result<Self, MatchError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set the goal target.
    #[must_use]
    pub fn with_goal_target(mut self, goals: u32) -> Self {
        self.goal_target = goals.max(1);
        self
    }

    /// Replace the battle rules.
    #[must_use]
    pub fn with_battle_rules(mut self, battle: BattleRules) -> Self {
        self.battle = battle;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_lock_table() {
        let locks = LockRules::default();
        assert_eq!(locks.for_action(ActionKind::Dribble), 2);
        assert_eq!(locks.for_action(ActionKind::Pass), 1);
        assert_eq!(locks.for_action(ActionKind::Shoot), 1);
    }

    #[test]
    fn test_default_battle_rules() {
        let rules = BattleRules::default();
        assert_eq!(rules.single_threshold, 5);
        assert_eq!(rules.outnumbered_threshold, 10);
        assert_eq!(rules.outnumbered_multiplier_percent, 195);
        assert_eq!(rules.underdog_penalty, 2);
        assert_eq!(rules.die_sides, 6);
    }

    #[test]
    fn test_match_config_builder() {
        let config = MatchConfig::new()
            .with_goal_target(5)
            .with_battle_rules(BattleRules::default().with_surrender_penalty(4));

        assert_eq!(config.goal_target, 5);
        assert_eq!(config.battle.surrender_stamina_penalty, 4);
    }

    #[test]
    fn test_goal_target_never_zero() {
        assert_eq!(MatchConfig::new().with_goal_target(0).goal_target, 1);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config =
            MatchConfig::from_json(r#"{ "battle": { "locks": { "dribble": 3 } } }"#).unwrap();

        assert_eq!(config.goal_target, 3);
        assert_eq!(config.battle.locks.dribble, 3);
        assert_eq!(config.battle.locks.pass, 1);
        assert_eq!(config.battle.outnumbered_threshold, 10);
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(MatchConfig::from_json("{ goal_target: }").is_err());
    }
}
