//! Card templates - static card data.
//!
//! `CardTemplate` holds the immutable properties of a card: its name,
//! rarity, base stamina and stat table. Instance-specific data (current
//! stamina, locks, position, the ball) lives on `Unit`.

use serde::{Deserialize, Serialize};

use super::attributes::{Stat, StatLine, StatTable};

/// Unique identifier for a card template.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Card rarity tier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    #[default]
    Common,
    Rare,
    Epic,
    Legendary,
}

/// Static card template.
///
/// ```
/// use soccer_ccg::cards::{CardId, CardTemplate, Rarity, Stat};
///
/// let winger = CardTemplate::new(CardId::new(1), "Winger", 10)
///     .with_rarity(Rarity::Rare)
///     .with_stat(Stat::Dribbling, 8, 2)
///     .with_stat(Stat::Speed, 2, 1);
///
/// assert_eq!(winger.stat(Stat::Dribbling).value, 8);
/// assert_eq!(winger.stat(Stat::Passing).value, 0);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardTemplate {
    /// Unique identifier.
    pub id: CardId,

    /// Display name.
    pub name: String,

    /// Rarity tier.
    #[serde(default)]
    pub rarity: Rarity,

    /// Stamina a fresh unit starts with.
    pub base_stamina: i32,

    /// Attribute values and costs.
    #[serde(default)]
    pub stats: StatTable,
}

impl CardTemplate {
    /// Create a template with an empty stat table.
    #[must_use]
    pub fn new(id: CardId, name: impl Into<String>, base_stamina: i32) -> Self {
        Self {
            id,
            name: name.into(),
            rarity: Rarity::default(),
            base_stamina: base_stamina.max(0),
            stats: StatTable::default(),
        }
    }

    /// Set the rarity (builder pattern).
    #[must_use]
    pub fn with_rarity(mut self, rarity: Rarity) -> Self {
        self.rarity = rarity;
        self
    }

    /// Set an attribute (builder pattern).
    #[must_use]
    pub fn with_stat(mut self, stat: Stat, value: i64, cost: i32) -> Self {
        self.stats.set(stat, StatLine::new(value, cost));
        self
    }

    /// Read an attribute, defaulting to zero.
    #[must_use]
    pub fn stat(&self, stat: Stat) -> StatLine {
        self.stats.get(stat)
    }
}
