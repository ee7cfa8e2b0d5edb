//! Unit identification.
//!
//! Every unit spawned onto the pitch gets a `UnitId` from the `World` that
//! owns it. IDs are never reused within a match, so a substituted unit's old
//! ID stays dead and cannot alias the replacement.
//!
//! ```
//! use soccer_ccg::core::UnitId;
//!
//! let striker = UnitId(7);
//! assert_eq!(striker.raw(), 7);
//! assert_eq!(format!("{striker}"), "Unit(7)");
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a live unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UnitId(pub u32);

impl UnitId {
    /// First ID handed out by a fresh `World`.
    pub const FIRST: UnitId = UnitId(1);

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// The ID allocated after this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl From<u32> for UnitId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for UnitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Unit({})", self.0)
    }
}
