//! Cards - one printing of one card in one set.
//!
//! A `Card` is built once during ingestion and never changes afterwards.
//! Its properties are kept in schema declaration order, with nested object
//! children stored under `parent.child` keys.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use indexmap::IndexMap;

use super::attributes::{CardProperty, PropertyValue};
use crate::game::CardGame;
use crate::schema::PropertyType;

/// A card record.
///
/// Equality and hashing use the id alone.
///
/// ## Example
///
/// ```
/// use std::sync::Arc;
/// use cgs_core::cards::{Card, CardProperty};
/// use cgs_core::schema::{PropertyDef, PropertyType};
///
/// let cost = Arc::new(PropertyDef::new("cost", PropertyType::Integer));
/// let bolt = Card::new("LB1", "Lightning Bolt", "LEA")
///     .with_property("cost", CardProperty::parse(cost, "1", None));
///
/// assert_eq!(bolt.get_int("cost"), 1);
/// assert_eq!(bolt.get_int("power"), 0);
/// ```
#[derive(Clone, Debug)]
pub struct Card {
    pub id: String,
    pub name: String,
    pub set_code: String,
    pub properties: IndexMap<String, CardProperty>,
    /// Set when an earlier card with the same name was already loaded.
    pub is_reprint: bool,
}

impl Card {
    /// Create a card with no properties.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        set_code: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            set_code: set_code.into(),
            properties: IndexMap::new(),
            is_reprint: false,
        }
    }

    /// Add a property (builder pattern).
    #[must_use]
    pub fn with_property(mut self, key: impl Into<String>, property: CardProperty) -> Self {
        self.properties.insert(key.into(), property);
        self
    }

    /// Mark as a reprint (builder pattern).
    #[must_use]
    pub fn with_reprint(mut self, is_reprint: bool) -> Self {
        self.is_reprint = is_reprint;
        self
    }

    #[must_use]
    pub fn has_property(&self, name: &str) -> bool {
        self.properties.contains_key(name)
    }

    #[must_use]
    pub fn property(&self, name: &str) -> Option<&CardProperty> {
        self.properties.get(name)
    }

    #[must_use]
    pub fn value(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.get(name).map(|property| &property.value)
    }

    /// Stored text of a property, empty if the card lacks it.
    #[must_use]
    pub fn get_raw(&self, name: &str) -> String {
        self.value(name)
            .map(|value| value.raw().into_owned())
            .unwrap_or_default()
    }

    /// Display text of a property.
    ///
    /// Enum values are mapped through the game's enum table. Empty values
    /// show the property's `display_empty` text.
    #[must_use]
    pub fn get_string(&self, name: &str, game: &CardGame) -> String {
        let Some(property) = self.properties.get(name) else {
            return String::new();
        };
        let raw = property.value.raw();
        if raw.is_empty() {
            return property.def.display_empty.clone();
        }
        match game.enum_def(name) {
            Some(enum_def) => enum_def.get_string_from_property_value(&raw),
            None => raw.into_owned(),
        }
    }

    /// Integer reading of a property; 0 when missing or not a number.
    #[must_use]
    pub fn get_int(&self, name: &str) -> i64 {
        self.value(name).map_or(0, PropertyValue::as_int)
    }

    /// Boolean reading of a property; false when missing.
    #[must_use]
    pub fn get_bool(&self, name: &str) -> bool {
        self.value(name).is_some_and(PropertyValue::as_bool)
    }

    /// Enum flags of a property; 0 when missing or not an enum.
    #[must_use]
    pub fn get_enum(&self, name: &str) -> i64 {
        self.value(name).and_then(PropertyValue::flags).unwrap_or(0)
    }

    /// Sort order for decks.
    ///
    /// Properties are compared in schema order and the first difference
    /// decides. Boolean and enum properties put `true` first, integers sort
    /// ascending and everything else by ordinal text.
    #[must_use]
    pub fn compare(&self, other: &Card) -> Ordering {
        self.properties
            .iter()
            .map(|(key, property)| {
                let theirs = other.value(key);
                match property.def.property_type {
                    PropertyType::Boolean
                    | PropertyType::StringEnum
                    | PropertyType::StringEnumList
                    | PropertyType::ObjectEnum
                    | PropertyType::ObjectEnumList => theirs
                        .is_some_and(PropertyValue::as_bool)
                        .cmp(&property.value.as_bool()),
                    PropertyType::Integer => property
                        .value
                        .as_int()
                        .cmp(&theirs.map_or(0, PropertyValue::as_int)),
                    _ => {
                        let mine = property.value.raw();
                        let theirs = theirs.map(PropertyValue::raw).unwrap_or_default();
                        mine.as_ref().cmp(theirs.as_ref())
                    }
                }
            })
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialEq for Card {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Card {}

impl Hash for Card {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

/// Shared card handle, as stored by the registry and decks.
pub type CardRef = Arc<Card>;

/// Unicode-aware case-insensitive equality, used for every name match.
pub(crate) fn eq_ignore_case(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::PropertyDef;

    fn prop(name: &str, property_type: PropertyType, raw: &str) -> CardProperty {
        CardProperty::parse(Arc::new(PropertyDef::new(name, property_type)), raw, None)
    }

    #[test]
    fn test_card_builder() {
        let card = Card::new("1", "Goblin", "M10")
            .with_property("cost", prop("cost", PropertyType::Integer, "2"))
            .with_property("haste", prop("haste", PropertyType::Boolean, "yes"))
            .with_property("type", prop("type", PropertyType::String, "Creature"));

        assert_eq!(card.get_int("cost"), 2);
        assert!(card.get_bool("haste"));
        assert!(!card.get_bool("flying"));
        assert_eq!(card.get_raw("type"), "Creature");
        assert_eq!(card.get_raw("missing"), "");
        assert_eq!(card.get_enum("type"), 0);
        assert!(card.has_property("cost"));
        assert!(!card.is_reprint);
    }

    #[test]
    fn test_equality_by_id() {
        let a = Card::new("1", "Goblin", "M10");
        let b = Card::new("1", "Renamed", "M11").with_reprint(true);
        let c = Card::new("2", "Goblin", "M10");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_compare_integers_ascending() {
        let cheap = Card::new("1", "A", "S").with_property("cost", prop("cost", PropertyType::Integer, "1"));
        let dear = Card::new("2", "B", "S").with_property("cost", prop("cost", PropertyType::Integer, "7"));
        assert_eq!(cheap.compare(&dear), Ordering::Less);
        assert_eq!(dear.compare(&cheap), Ordering::Greater);
    }

    #[test]
    fn test_compare_booleans_true_first() {
        let yes = Card::new("1", "A", "S").with_property("rare", prop("rare", PropertyType::Boolean, "true"));
        let no = Card::new("2", "B", "S").with_property("rare", prop("rare", PropertyType::Boolean, "false"));
        assert_eq!(yes.compare(&no), Ordering::Less);
    }

    #[test]
    fn test_compare_falls_through_ties() {
        let a = Card::new("1", "A", "S")
            .with_property("cost", prop("cost", PropertyType::Integer, "3"))
            .with_property("text", prop("text", PropertyType::String, "beta"));
        let b = Card::new("2", "B", "S")
            .with_property("cost", prop("cost", PropertyType::Integer, "3"))
            .with_property("text", prop("text", PropertyType::String, "alpha"));
        assert_eq!(a.compare(&b), Ordering::Greater);
        assert_eq!(a.compare(&a.clone()), Ordering::Equal);
    }

    #[test]
    fn test_eq_ignore_case() {
        assert!(eq_ignore_case("Æther Vial", "æther vial"));
        assert!(eq_ignore_case("ÆTHER VIAL", "Æther Vial"));
        assert!(!eq_ignore_case("Bolt", "Bolts"));
    }

    #[test]
    fn test_compare_missing_counterpart_is_empty() {
        let a = Card::new("1", "A", "S").with_property("text", prop("text", PropertyType::String, "x"));
        let b = Card::new("2", "B", "S");
        assert_eq!(a.compare(&b), Ordering::Greater);
    }
}
