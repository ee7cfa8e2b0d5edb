//! Card system: templates, catalog, and live units.
//!
//! ## Key Types
//!
//! - `CardId`: Identifier for card templates
//! - `Stat` / `StatLine` / `StatTable`: Attribute values and stamina costs
//! - `CardTemplate`: Immutable card data (name, rarity, stamina, stats)
//! - `CardCatalog`: Template lookup, loaded once per process
//! - `Unit`: A card spawned onto the pitch

pub mod attributes;
pub mod definition;
pub mod instance;
pub mod registry;

pub use attributes::{Stat, StatLine, StatTable};
pub use definition::{CardId, CardTemplate, Rarity};
pub use instance::Unit;
pub use registry::CardCatalog;
