//! Lazy card filtering.
//!
//! `CardGame::filter_cards` returns an iterator that tests cards only as
//! they are pulled, so callers showing one page of results never touch the
//! rest of the collection. Cloning the iterator restarts the search from the
//! clone point.

use std::iter::FusedIterator;
use std::sync::Arc;

use smallvec::SmallVec;

use super::filters::CardSearchFilters;
use crate::cards::Card;
use crate::game::CardGame;

/// Filters with their text fields lowercased once, ready to test cards.
#[derive(Clone, Debug)]
struct Matcher<'a> {
    filters: &'a CardSearchFilters,
    name_tokens: SmallVec<[String; 4]>,
    id: String,
    set_code: String,
    strings: SmallVec<[(&'a str, String); 4]>,
}

impl<'a> Matcher<'a> {
    fn new(filters: &'a CardSearchFilters) -> Self {
        Self {
            filters,
            name_tokens: filters
                .name
                .split_whitespace()
                .map(str::to_lowercase)
                .collect(),
            id: filters.id.to_lowercase(),
            set_code: filters.set_code.to_lowercase(),
            strings: filters
                .string_properties
                .iter()
                .map(|(property, value)| (property.as_str(), value.to_lowercase()))
                .collect(),
        }
    }

    fn matches(&self, card: &Card, game: &CardGame) -> bool {
        if !self.name_tokens.is_empty() {
            let name = card.name.to_lowercase();
            if !self.name_tokens.iter().all(|token| name.contains(token.as_str())) {
                return false;
            }
        }
        if !self.id.is_empty() && !card.id.to_lowercase().contains(&self.id) {
            return false;
        }
        if !self.set_code.is_empty() && !card.set_code.to_lowercase().contains(&self.set_code) {
            return false;
        }

        let filters = self.filters;
        self.strings.iter().all(|(property, value)| {
            card.get_string(property, game).to_lowercase().contains(value.as_str())
        }) && filters
            .int_min_properties
            .iter()
            .all(|(property, min)| card.get_int(property) >= *min)
            && filters
                .int_max_properties
                .iter()
                .all(|(property, max)| card.get_int(property) <= *max)
            && filters
                .bool_properties
                .iter()
                .all(|(property, value)| card.get_bool(property) == *value)
            && filters
                .enum_properties
                .iter()
                .all(|(property, flags)| matches_enum(card, game, property, *flags))
    }
}

/// Enum filter test. Without an enum table the card never matches.
fn matches_enum(card: &Card, game: &CardGame, property: &str, filter: i64) -> bool {
    let Some(enum_def) = game.enum_def(property) else {
        tracing::debug!(property, "enum filter on property without enum definition");
        return false;
    };
    let flags = match card.value(property) {
        Some(value) => value
            .flags()
            .unwrap_or_else(|| enum_def.get_enum_from_property_value(&value.raw())),
        None => 0,
    };
    if flags & filter != 0 {
        return true;
    }
    filter == enum_def.empty_flag()
        && game
            .resolve_property(property)
            .is_some_and(|def| card.get_string(property, game) == def.display_empty)
}

impl CardSearchFilters {
    /// Whether `card` satisfies every populated filter.
    #[must_use]
    pub fn matches(&self, card: &Card, game: &CardGame) -> bool {
        Matcher::new(self).matches(card, game)
    }
}

/// Lazy iterator over the cards matching a filter, in load order.
#[derive(Clone, Debug)]
pub struct CardFilter<'a> {
    game: &'a CardGame,
    cards: indexmap::map::Values<'a, String, Arc<Card>>,
    matcher: Matcher<'a>,
}

impl<'a> Iterator for CardFilter<'a> {
    type Item = &'a Arc<Card>;

    fn next(&mut self) -> Option<Self::Item> {
        let game = self.game;
        let matcher = &self.matcher;
        self.cards.by_ref().find(|card| matcher.matches(card, game))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.cards.size_hint().1)
    }
}

impl FusedIterator for CardFilter<'_> {}

impl CardGame {
    /// Cards matching `filters`, tested lazily in load order.
    ///
    /// ## Example
    ///
    /// ```
    /// use cgs_core::{CardGame, CardSearchFilters};
    /// use serde_json::json;
    ///
    /// let mut game = CardGame::from_json(r#"{"cardProperties": [{"name": "cost", "type": "integer"}]}"#).unwrap();
    /// game.ingest_card(&json!({"id": "1", "name": "Fireball", "cost": 3}));
    /// game.ingest_card(&json!({"id": "2", "name": "Ice Bolt", "cost": 5}));
    ///
    /// let filters = CardSearchFilters::new().with_int_min("cost", 4);
    /// let ids: Vec<_> = game.filter_cards(&filters).map(|card| card.id.as_str()).collect();
    /// assert_eq!(ids, vec!["2"]);
    /// ```
    pub fn filter_cards<'a>(&'a self, filters: &'a CardSearchFilters) -> CardFilter<'a> {
        CardFilter {
            game: self,
            cards: self.registry().values(),
            matcher: Matcher::new(filters),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::GameDef;
    use crate::schema::{EnumDef, PropertyDef, PropertyType};
    use indexmap::IndexMap;
    use serde_json::json;

    fn game() -> CardGame {
        let def = GameDef::new("Test")
            .with_property(PropertyDef::new("cost", PropertyType::Integer))
            .with_property(PropertyDef::new("text", PropertyType::String))
            .with_property(PropertyDef::new("token", PropertyType::Boolean))
            .with_property(PropertyDef::new("color", PropertyType::StringEnum).with_display_empty("Colorless"))
            .with_enum(
                EnumDef::new("color", IndexMap::new())
                    .with_value("R", "Red")
                    .with_value("U", "Blue"),
            );
        let mut game = CardGame::new(def);
        game.ingest_card(&json!({"id": "1", "name": "Fireball", "cost": 3, "text": "Deal X damage", "color": "R", "set": "A"}));
        game.ingest_card(&json!({"id": "2", "name": "Ice Bolt", "cost": 5, "color": "U", "set": "B"}));
        game.ingest_card(&json!({"id": "3", "name": "Golem", "cost": 4, "token": "yes", "set": "B"}));
        game
    }

    fn ids(game: &CardGame, filters: &CardSearchFilters) -> Vec<String> {
        game.filter_cards(filters).map(|card| card.id.clone()).collect()
    }

    #[test]
    fn test_empty_filter_matches_all() {
        let game = game();
        assert_eq!(ids(&game, &CardSearchFilters::new()), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_int_range() {
        let game = game();
        assert_eq!(ids(&game, &CardSearchFilters::new().with_int_min("cost", 4)), vec!["2", "3"]);
        assert_eq!(
            ids(&game, &CardSearchFilters::new().with_int_min("cost", 4).with_int_max("cost", 4)),
            vec!["3"]
        );
    }

    #[test]
    fn test_string_and_bool() {
        let game = game();
        assert_eq!(ids(&game, &CardSearchFilters::new().with_string("text", "DAMAGE")), vec!["1"]);
        assert_eq!(ids(&game, &CardSearchFilters::new().with_bool("token", true)), vec!["3"]);
        assert_eq!(ids(&game, &CardSearchFilters::new().with_bool("token", false)), vec!["1", "2"]);
    }

    #[test]
    fn test_id_and_set_substring() {
        let game = game();
        assert_eq!(ids(&game, &CardSearchFilters::new().with_set_code("b")), vec!["2", "3"]);
        assert_eq!(ids(&game, &CardSearchFilters::new().with_id("1")), vec!["1"]);
    }

    #[test]
    fn test_enum_flags() {
        let game = game();
        assert_eq!(ids(&game, &CardSearchFilters::new().with_enum("color", 1)), vec!["1"]);
        assert_eq!(ids(&game, &CardSearchFilters::new().with_enum("color", 3)), vec!["1", "2"]);
    }

    #[test]
    fn test_enum_empty_flag() {
        let game = game();
        let empty = game.enum_def("color").unwrap().empty_flag();
        assert_eq!(empty, 4);
        assert_eq!(ids(&game, &CardSearchFilters::new().with_enum("color", empty)), vec!["3"]);
    }

    #[test]
    fn test_enum_without_definition_never_matches() {
        let game = game();
        assert!(ids(&game, &CardSearchFilters::new().with_enum("rarity", 1)).is_empty());
    }

    #[test]
    fn test_iterator_restarts_from_clone() {
        let game = game();
        let filters = CardSearchFilters::new().with_int_min("cost", 3);
        let mut results = game.filter_cards(&filters);
        let restart = results.clone();

        assert_eq!(results.next().map(|c| c.id.as_str()), Some("1"));
        assert_eq!(results.count(), 2);
        assert_eq!(restart.count(), 3);
    }
}
