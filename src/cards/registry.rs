//! Card registry for card and set lookup.
//!
//! The `CardRegistry` stores every loaded card and set for a game, in load
//! order. It also remembers each card name it has seen so ingestion can
//! detect reprints.

use std::sync::Arc;

use indexmap::IndexMap;
use rustc_hash::FxHashSet;

use super::card::{eq_ignore_case, Card};
use super::set::Set;

/// Registry of cards and sets.
///
/// ## Example
///
/// ```
/// use cgs_core::cards::{Card, CardRegistry};
///
/// let mut registry = CardRegistry::new();
/// registry.register(Card::new("LB1", "Lightning Bolt", "LEA"));
///
/// let found = registry.get("LB1").unwrap();
/// assert_eq!(found.name, "Lightning Bolt");
/// assert!(registry.has_name("Lightning Bolt"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    cards: IndexMap<String, Arc<Card>>,
    sets: IndexMap<String, Set>,
    names: FxHashSet<String>,
}

impl CardRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a card, replacing any card with the same id in place.
    pub fn register(&mut self, card: Card) -> Arc<Card> {
        let card = Arc::new(card);
        self.names.insert(card.name.clone());
        self.cards.insert(card.id.clone(), Arc::clone(&card));
        card
    }

    /// Remove a card by id, keeping the order of the rest.
    pub fn remove(&mut self, id: &str) -> Option<Arc<Card>> {
        self.cards.shift_remove(id)
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Arc<Card>> {
        self.cards.get(id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.cards.contains_key(id)
    }

    /// Whether any card with this exact name has been registered.
    #[must_use]
    pub fn has_name(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Get the number of registered cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all cards in load order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Card>> + Clone {
        self.cards.values()
    }

    pub(crate) fn values(&self) -> indexmap::map::Values<'_, String, Arc<Card>> {
        self.cards.values()
    }

    /// Find cards matching a predicate.
    pub fn find<F>(&self, predicate: F) -> impl Iterator<Item = &Arc<Card>>
    where
        F: Fn(&Card) -> bool,
    {
        self.cards.values().filter(move |card| predicate(card))
    }

    /// Find cards whose name matches, ignoring case.
    pub fn find_by_name<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Arc<Card>> {
        self.find(move |card| eq_ignore_case(&card.name, name))
    }

    /// Register a set unless one with the same code exists.
    ///
    /// Returns whether the set was added.
    pub fn register_set(&mut self, set: Set) -> bool {
        if self.sets.contains_key(&set.code) {
            return false;
        }
        self.sets.insert(set.code.clone(), set);
        true
    }

    /// Register or replace a set.
    pub fn replace_set(&mut self, set: Set) {
        self.sets.insert(set.code.clone(), set);
    }

    #[must_use]
    pub fn set(&self, code: &str) -> Option<&Set> {
        self.sets.get(code)
    }

    #[must_use]
    pub fn contains_set(&self, code: &str) -> bool {
        self.sets.contains_key(code)
    }

    /// Iterate over all sets in load order.
    pub fn sets(&self) -> impl Iterator<Item = &Set> {
        self.sets.values()
    }
}
