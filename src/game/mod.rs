//! Card games: schema plus loaded cards.
//!
//! ## Key Types
//!
//! - `CardGame`: A game definition with its card and set collections
//! - `IngestReport`: Counts from one bulk load
//!
//! Every engine operation takes the game explicitly; there is no global
//! "current game".
//!
//! ## Example
//!
//! ```
//! use cgs_core::CardGame;
//! use serde_json::json;
//!
//! let mut game = CardGame::from_json(r#"{
//!     "name": "Mini",
//!     "cardProperties": [{"name": "cost", "type": "integer"}]
//! }"#).unwrap();
//!
//! let cards = game.ingest_card(&json!({"id": "1", "name": "Fireball", "cost": 3, "set": "BASE"}));
//! assert_eq!(cards.len(), 1);
//! assert_eq!(game.card("1").unwrap().get_int("cost"), 3);
//! assert!(game.set("BASE").is_some());
//! ```

mod ingest;

use std::sync::Arc;

use indexmap::IndexMap;

pub use ingest::IngestReport;

use crate::cards::{Card, CardRegistry, Set};
use crate::core::config::GameDef;
use crate::error::{CardGameError, Result};
use crate::schema::{flatten, EnumDef, PropertyDef, OBJECT_DELIMITER};

/// A card game: its definition and every loaded card and set.
#[derive(Debug)]
pub struct CardGame {
    def: GameDef,
    /// Every schema node by full dotted path, objects included.
    property_index: IndexMap<String, Arc<PropertyDef>>,
    registry: CardRegistry,
    errors: Vec<CardGameError>,
}

impl CardGame {
    /// Create a game from its definition.
    ///
    /// Schema problems are recorded in [`errors`](Self::errors) rather than
    /// rejected. Enum lookups are registered in declaration order, followed
    /// by each enum property's empty-display text.
    #[must_use]
    pub fn new(mut def: GameDef) -> Self {
        let mut errors = Vec::new();

        for enum_def in &def.enums {
            if crate::schema::resolve_property(&def.card_properties, &enum_def.property).is_none() {
                tracing::warn!(property = %enum_def.property, "enum refers to unknown property");
                errors.push(CardGameError::UnknownEnumProperty(enum_def.property.clone()));
            }
        }
        for (path, property) in flatten(&def.card_properties) {
            if property.is_enum_type() && !def.enums.iter().any(|e| e.property == path) {
                tracing::warn!(property = %path, "enum property has no enum definition");
                errors.push(CardGameError::MissingEnumDef(path));
            }
        }

        let mut property_index = IndexMap::new();
        for property in &def.card_properties {
            index_property(&mut property_index, property, String::new());
        }

        for enum_def in &mut def.enums {
            enum_def.initialize_lookups();
        }
        for enum_def in &mut def.enums {
            if let Some(property) = property_index.get(&enum_def.property) {
                enum_def.create_lookup(&property.display_empty);
            }
        }

        tracing::debug!(
            game = %def.name,
            properties = property_index.len(),
            enums = def.enums.len(),
            "loaded game definition"
        );

        Self {
            def,
            property_index,
            registry: CardRegistry::new(),
            errors,
        }
    }

    /// Parse a game definition document and create the game.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(Self::new(GameDef::from_json(text)?))
    }

    #[must_use]
    pub fn def(&self) -> &GameDef {
        &self.def
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.def.name
    }

    #[must_use]
    pub fn registry(&self) -> &CardRegistry {
        &self.registry
    }

    /// Every card in load order.
    pub fn cards(&self) -> impl Iterator<Item = &Arc<Card>> + Clone {
        self.registry.iter()
    }

    #[must_use]
    pub fn card(&self, id: &str) -> Option<&Arc<Card>> {
        self.registry.get(id)
    }

    #[must_use]
    pub fn card_count(&self) -> usize {
        self.registry.len()
    }

    /// Every set in load order.
    pub fn sets(&self) -> impl Iterator<Item = &Set> {
        self.registry.sets()
    }

    #[must_use]
    pub fn set(&self, code: &str) -> Option<&Set> {
        self.registry.set(code)
    }

    /// Enum table for a property path.
    #[must_use]
    pub fn enum_def(&self, property: &str) -> Option<&EnumDef> {
        self.def.enums.iter().find(|e| e.property == property)
    }

    pub(crate) fn enum_def_mut(&mut self, property: &str) -> Option<&mut EnumDef> {
        self.def.enums.iter_mut().find(|e| e.property == property)
    }

    #[must_use]
    pub fn is_enum_property(&self, property: &str) -> bool {
        self.enum_def(property).is_some()
    }

    /// Schema node for a dotted property path.
    #[must_use]
    pub fn resolve_property(&self, path: &str) -> Option<&PropertyDef> {
        self.property_index.get(path).map(AsRef::as_ref)
    }

    pub(crate) fn property_arc(&self, path: &str) -> Option<Arc<PropertyDef>> {
        self.property_index.get(path).cloned()
    }

    /// Every filterable property with its full dotted path.
    #[must_use]
    pub fn flattened_properties(&self) -> Vec<(String, &PropertyDef)> {
        flatten(&self.def.card_properties)
    }

    /// Structural problems found since the last [`clear_errors`](Self::clear_errors).
    #[must_use]
    pub fn errors(&self) -> &[CardGameError] {
        &self.errors
    }

    pub fn clear_errors(&mut self) {
        self.errors.clear();
    }

    pub(crate) fn record_error(&mut self, error: CardGameError) {
        tracing::warn!(game = %self.def.name, %error, "card game error");
        self.errors.push(error);
    }

    /// Add a built card, marking it a reprint if its name was seen before.
    ///
    /// The card's set is registered if it is new.
    pub fn add_card(&mut self, mut card: Card) -> Arc<Card> {
        card.is_reprint = self.def.card_name_is_unique && self.registry.has_name(&card.name);
        self.registry.register_set(Set::new(card.set_code.clone(), String::new()));
        self.registry.register(card)
    }

    /// Remove a card by id.
    pub fn remove_card(&mut self, id: &str) -> Option<Arc<Card>> {
        self.registry.remove(id)
    }
}

fn index_property(
    index: &mut IndexMap<String, Arc<PropertyDef>>,
    property: &PropertyDef,
    prefix: String,
) {
    let path = prefix + &property.name;
    for child in &property.properties {
        index_property(index, child, path.clone() + OBJECT_DELIMITER);
    }
    index.insert(path, Arc::new(property.clone()));
}
