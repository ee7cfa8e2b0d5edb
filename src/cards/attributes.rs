//! Card stat table.
//!
//! Every card has five named attributes. Each carries a `value` (strength in
//! battle) and a `cost` (stamina spent when the attribute is used).
//!
//! Lookups never fail: an attribute a card does not list reads as
//! `StatLine { value: 0, cost: 0 }`.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Named card attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stat {
    /// Carrying the ball past a defender.
    Dribbling,
    /// Getting the ball to a teammate.
    Passing,
    /// Scoring.
    Shooting,
    /// Stopping dribbles and shots.
    Defending,
    /// Added to every contest.
    Speed,
}

impl Stat {
    /// All attributes.
    pub const ALL: [Stat; 5] = [
        Stat::Dribbling,
        Stat::Passing,
        Stat::Shooting,
        Stat::Defending,
        Stat::Speed,
    ];
}

/// One attribute's battle value and stamina cost.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatLine {
    /// Strength added to the unit's side in a contest.
    #[serde(default)]
    pub value: i64,
    /// Stamina spent to use the attribute.
    #[serde(default)]
    pub cost: i32,
}

impl StatLine {
    /// Create a stat line.
    #[must_use]
    pub const fn new(value: i64, cost: i32) -> Self {
        Self { value, cost }
    }
}

/// Attribute table for a card.
///
/// ```
/// use soccer_ccg::cards::{Stat, StatLine, StatTable};
///
/// let table = StatTable::new().with(Stat::Speed, 3, 1);
/// assert_eq!(table.get(Stat::Speed), StatLine::new(3, 1));
/// assert_eq!(table.get(Stat::Shooting), StatLine::default());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatTable(FxHashMap<Stat, StatLine>);

impl StatTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an attribute (builder pattern).
    #[must_use]
    pub fn with(mut self, stat: Stat, value: i64, cost: i32) -> Self {
        self.set(stat, StatLine::new(value, cost));
        self
    }

    /// Set an attribute.
    pub fn set(&mut self, stat: Stat, line: StatLine) {
        self.0.insert(stat, line);
    }

    /// Read an attribute, defaulting to zero.
    #[must_use]
    pub fn get(&self, stat: Stat) -> StatLine {
        self.0.get(&stat).copied().unwrap_or_default()
    }

    /// Shortcut for `get(stat).value`.
    #[must_use]
    pub fn value(&self, stat: Stat) -> i64 {
        self.get(stat).value
    }

    /// Shortcut for `get(stat).cost`.
    #[must_use]
    pub fn cost(&self, stat: Stat) -> i32 {
        self.get(stat).cost
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_attribute_defaults_to_zero() {
        let table = StatTable::new();
        for stat in Stat::ALL {
            assert_eq!(table.value(stat), 0);
            assert_eq!(table.cost(stat), 0);
        }
    }

    #[test]
    fn test_set_overwrites() {
        let mut table = StatTable::new().with(Stat::Passing, 4, 2);
        table.set(Stat::Passing, StatLine::new(6, 3));
        assert_eq!(table.get(Stat::Passing), StatLine::new(6, 3));
    }

    #[test]
    fn test_json_shape() {
        let table: StatTable = serde_json::from_str(
            r#"{ "dribbling": { "value": 8, "cost": 2 }, "speed": { "value": 2 } }"#,
        )
        .unwrap();

        assert_eq!(table.get(Stat::Dribbling), StatLine::new(8, 2));
        assert_eq!(table.get(Stat::Speed), StatLine::new(2, 0));
        assert_eq!(table.get(Stat::Defending), StatLine::default());
    }

    #[test]
    fn test_unknown_attribute_is_rejected() {
        let result: Result<StatTable, _> =
            serde_json::from_str(r#"{ "heading": { "value": 1, "cost": 1 } }"#);
        assert!(result.is_err());
    }
}
