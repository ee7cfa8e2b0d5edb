//! Player identification and per-player data storage.
//!
//! ## PlayerId
//!
//! A match is always contested by exactly two players. `PlayerId::HOME`
//! defends node 1 and kicks toward node 12, `PlayerId::AWAY` the reverse.
//!
//! ## PlayerMap
//!
//! Fixed two-slot storage indexed by `PlayerId` (scores, squads).

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Number of players in a match.
pub const PLAYER_COUNT: usize = 2;

/// One of the two players in a match.
///
/// Construction is checked, including deserialization, so a `PlayerId`
/// always indexes a `PlayerMap` safely.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct PlayerId(pub(crate) u8);

impl PlayerId {
    /// The side defending node 1.
    pub const HOME: PlayerId = PlayerId(0);

    /// The side defending node 12.
    pub const AWAY: PlayerId = PlayerId(1);

    /// Create a player ID from a 0-based index.
    ///
    /// Returns `None` for anything but 0 or 1.
    #[must_use]
    pub const fn new(id: u8) -> Option<Self> {
        if (id as usize) < PLAYER_COUNT {
            Some(Self(id))
        } else {
            None
        }
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The other player.
    ///
    /// ```
    /// use soccer_ccg::core::PlayerId;
    ///
    /// assert_eq!(PlayerId::HOME.opponent(), PlayerId::AWAY);
    /// assert_eq!(PlayerId::AWAY.opponent(), PlayerId::HOME);
    /// ```
    #[must_use]
    pub const fn opponent(self) -> Self {
        Self(1 - (self.0 & 1))
    }

    /// Both players, home first.
    pub fn both() -> impl Iterator<Item = PlayerId> {
        [Self::HOME, Self::AWAY].into_iter()
    }
}

impl TryFrom<u8> for PlayerId {
    type Error = String;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        PlayerId::new(id).ok_or_else(|| format!("player {id} does not exist (0..{PLAYER_COUNT})"))
    }
}

impl From<PlayerId> for u8 {
    fn from(player: PlayerId) -> Self {
        player.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Per-player data storage with O(1) access.
///
/// ```
/// use soccer_ccg::core::{PlayerId, PlayerMap};
///
/// let mut goals: PlayerMap<u32> = PlayerMap::with_value(0);
/// goals[PlayerId::AWAY] += 1;
///
/// assert_eq!(goals[PlayerId::HOME], 0);
/// assert_eq!(goals[PlayerId::AWAY], 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: [T; PLAYER_COUNT],
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    pub fn new(factory: impl Fn(PlayerId) -> T) -> Self {
        Self {
            data: [factory(PlayerId::HOME), factory(PlayerId::AWAY)],
        }
    }

    /// Create a new PlayerMap with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    /// Get a reference to a player's data.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    /// Get a mutable reference to a player's data.
    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }
}

impl<T: Default> Default for PlayerMap<T> {
    fn default() -> Self {
        Self::new(|_| T::default())
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}
