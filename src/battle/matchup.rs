//! Who is fighting whom.
//!
//! The multiplicity of a contest is fixed when the battle is triggered and
//! carried as a `Matchup` variant, each holding exactly the IDs it needs.

use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};

use crate::board::NodeId;
use crate::core::{ActionKind, PlayerId, UnitId};

/// Units on one side of a battle. Never more than two.
pub type SideUnits = SmallVec<[UnitId; 2]>;

/// The two sides of a contest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BattleSide {
    /// The side that attempted the action.
    Attacker,
    /// The side standing on the contested node.
    Defender,
}

impl BattleSide {
    /// The other side.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            BattleSide::Attacker => BattleSide::Defender,
            BattleSide::Defender => BattleSide::Attacker,
        }
    }
}

/// Multiplicity variant of a battle, with typed participant IDs.
///
/// The first attacker is always the unit that attempted the action; in
/// `TwoAttackersVOne` the second is its teammate already on the contested
/// node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Matchup {
    OneVOne {
        attacker: UnitId,
        defender: UnitId,
    },
    TwoAttackersVOne {
        attackers: [UnitId; 2],
        defender: UnitId,
    },
    OneVTwoDefenders {
        attacker: UnitId,
        defenders: [UnitId; 2],
    },
}

impl Matchup {
    /// Classify a contest from its participant lists.
    ///
    /// Returns `None` for shapes the rules do not support (2v2, empty sides,
    /// three or more on a side).
    ///
    /// ```
    /// use soccer_ccg::battle::Matchup;
    /// use soccer_ccg::core::UnitId;
    ///
    /// let m = Matchup::from_sides(&[UnitId(1)], &[UnitId(7), UnitId(8)]).unwrap();
    /// assert!(matches!(m, Matchup::OneVTwoDefenders { .. }));
    /// assert!(Matchup::from_sides(&[UnitId(1), UnitId(2)], &[UnitId(7), UnitId(8)]).is_none());
    /// ```
    #[must_use]
    pub fn from_sides(attackers: &[UnitId], defenders: &[UnitId]) -> Option<Self> {
        match (attackers, defenders) {
            (&[attacker], &[defender]) => Some(Matchup::OneVOne { attacker, defender }),
            (&[a, b], &[defender]) => Some(Matchup::TwoAttackersVOne {
                attackers: [a, b],
                defender,
            }),
            (&[attacker], &[a, b]) => Some(Matchup::OneVTwoDefenders {
                attacker,
                defenders: [a, b],
            }),
            _ => None,
        }
    }

    /// Attacking units, acting unit first.
    #[must_use]
    pub fn attackers(&self) -> SideUnits {
        match *self {
            Matchup::OneVOne { attacker, .. } | Matchup::OneVTwoDefenders { attacker, .. } => {
                smallvec![attacker]
            }
            Matchup::TwoAttackersVOne { attackers, .. } => SmallVec::from_buf(attackers),
        }
    }

    /// Defending units.
    #[must_use]
    pub fn defenders(&self) -> SideUnits {
        match *self {
            Matchup::OneVOne { defender, .. } | Matchup::TwoAttackersVOne { defender, .. } => {
                smallvec![defender]
            }
            Matchup::OneVTwoDefenders { defenders, .. } => SmallVec::from_buf(defenders),
        }
    }

    /// Units on a side.
    #[must_use]
    pub fn side(&self, side: BattleSide) -> SideUnits {
        match side {
            BattleSide::Attacker => self.attackers(),
            BattleSide::Defender => self.defenders(),
        }
    }

    /// The side's lead unit: the acting attacker, or the first defender.
    #[must_use]
    pub fn primary(&self, side: BattleSide) -> UnitId {
        match (*self, side) {
            (Matchup::OneVOne { attacker, .. }, BattleSide::Attacker)
            | (Matchup::OneVTwoDefenders { attacker, .. }, BattleSide::Attacker) => attacker,
            (Matchup::TwoAttackersVOne { attackers, .. }, BattleSide::Attacker) => attackers[0],
            (Matchup::OneVOne { defender, .. }, BattleSide::Defender)
            | (Matchup::TwoAttackersVOne { defender, .. }, BattleSide::Defender) => defender,
            (Matchup::OneVTwoDefenders { defenders, .. }, BattleSide::Defender) => defenders[0],
        }
    }

    /// Which side a unit fights on, if it takes part.
    #[must_use]
    pub fn side_of(&self, unit: UnitId) -> Option<BattleSide> {
        if self.attackers().contains(&unit) {
            Some(BattleSide::Attacker)
        } else if self.defenders().contains(&unit) {
            Some(BattleSide::Defender)
        } else {
            None
        }
    }

    /// Whether one side has two units.
    #[must_use]
    pub const fn is_outnumbered(&self) -> bool {
        !matches!(self, Matchup::OneVOne { .. })
    }
}

/// An unresolved contest, held by the match until the attacker resolves it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PendingBattle {
    /// Participants.
    pub matchup: Matchup,
    /// Node being contested.
    pub node: NodeId,
    /// Action that triggered the battle.
    pub action: ActionKind,
    /// Player who attempted the action.
    pub attacking_player: PlayerId,
}

impl PendingBattle {
    /// Player on the defending side.
    #[must_use]
    pub const fn defending_player(&self) -> PlayerId {
        self.attacking_player.opponent()
    }
}
