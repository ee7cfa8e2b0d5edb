//! Card catalog for template lookup.
//!
//! The `CardCatalog` stores every card template available to a match. It is
//! loaded once at startup and never mutated afterwards, so matches share it
//! behind an `Arc`.

use rustc_hash::FxHashMap;
use serde::Deserialize;

use super::definition::{CardId, CardTemplate, Rarity};
use crate::error::CatalogError;

/// Catalog of card templates.
///
/// ```
/// use soccer_ccg::cards::{CardCatalog, CardId};
///
/// let catalog = CardCatalog::from_json(r#"{
///     "cards": [
///         { "id": 1, "name": "Striker", "base_stamina": 10,
///           "stats": { "shooting": { "value": 7, "cost": 3 } } }
///     ]
/// }"#).unwrap();
///
/// assert_eq!(catalog.get(CardId::new(1)).unwrap().name, "Striker");
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardCatalog {
    cards: FxHashMap<CardId, CardTemplate>,
}

#[derive(Deserialize)]
struct CatalogFile {
    cards: Vec<CardTemplate>,
}

impl CardCatalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a catalog from `{ "cards": [ ... ] }` JSON.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(json)?;
        let mut catalog = Self::new();
        for card in file.cards {
            catalog.register(card)?;
        }
        Ok(catalog)
    }

    /// Register a template. Fails if the ID is taken.
    pub fn register(&mut self, card: CardTemplate) -> Result<(), CatalogError> {
        if self.cards.contains_key(&card.id) {
            return Err(CatalogError::DuplicateCard(card.id));
        }
        self.cards.insert(card.id, card);
        Ok(())
    }

    /// Register a template (builder pattern).
    pub fn with_card(mut self, card: CardTemplate) -> Result<Self, CatalogError> {
        self.register(card)?;
        Ok(self)
    }

    /// Get a template by ID.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&CardTemplate> {
        self.cards.get(&id)
    }

    /// Check if a card ID is registered.
    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.cards.contains_key(&id)
    }

    /// Get the number of registered cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all templates.
    pub fn iter(&self) -> impl Iterator<Item = &CardTemplate> {
        self.cards.values()
    }

    /// Find templates of a given rarity.
    pub fn find_by_rarity(&self, rarity: Rarity) -> impl Iterator<Item = &CardTemplate> {
        self.cards.values().filter(move |c| c.rarity == rarity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Stat;

    #[test]
    fn test_register_and_get() {
        let mut catalog = CardCatalog::new();
        catalog
            .register(CardTemplate::new(CardId::new(1), "Test Card", 8))
            .unwrap();

        assert_eq!(catalog.get(CardId::new(1)).unwrap().name, "Test Card");
        assert!(catalog.get(CardId::new(99)).is_none());
        assert!(catalog.contains(CardId::new(1)));
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_duplicate_id_is_rejected() {
        let mut catalog = CardCatalog::new();
        catalog.register(CardTemplate::new(CardId::new(1), "A", 5)).unwrap();

        let err = catalog
            .register(CardTemplate::new(CardId::new(1), "B", 5))
            .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateCard(id) if id == CardId::new(1)));
        assert_eq!(catalog.get(CardId::new(1)).unwrap().name, "A");
    }

    #[test]
    fn test_from_json() {
        let catalog = CardCatalog::from_json(
            r#"{ "cards": [
                { "id": 1, "name": "Keeper", "rarity": "epic", "base_stamina": 12,
                  "stats": { "defending": { "value": 9, "cost": 2 } } },
                { "id": 2, "name": "Winger", "base_stamina": 10 }
            ] }"#,
        )
        .unwrap();

        assert_eq!(catalog.len(), 2);
        let keeper = catalog.get(CardId::new(1)).unwrap();
        assert_eq!(keeper.rarity, Rarity::Epic);
        assert_eq!(keeper.stat(Stat::Defending).value, 9);
        assert_eq!(catalog.find_by_rarity(Rarity::Common).count(), 1);
    }

    #[test]
    fn test_from_json_duplicate() {
        let result = CardCatalog::from_json(
            r#"{ "cards": [
                { "id": 1, "name": "A", "base_stamina": 1 },
                { "id": 1, "name": "B", "base_stamina": 1 }
            ] }"#,
        );
        assert!(matches!(result, Err(CatalogError::DuplicateCard(_))));
    }

    #[test]
    fn test_from_json_malformed() {
        assert!(matches!(
            CardCatalog::from_json("{ \"cards\": 3 }"),
            Err(CatalogError::Json(_))
        ));
    }
}
