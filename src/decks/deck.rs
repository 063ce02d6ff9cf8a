//! Decks - ordered card lists with a name and a file format.
//!
//! A deck is a flat sequence that may repeat cards; counts are derived on
//! demand. Parsing is best effort: lines that don't resolve to a card are
//! dropped and the rest of the deck still loads.

use std::sync::Arc;

use im::Vector;
use indexmap::IndexMap;

use crate::cards::Card;
use crate::core::config::{DeckFileType, ExtraDef};
use crate::core::rng::DeckRng;
use crate::game::CardGame;

/// Name of a deck that has not been given one.
pub const DEFAULT_DECK_NAME: &str = "Untitled";

/// Txt lines that end the main deck.
const SIDEBOARD_MARKERS: [&str; 4] = ["Sideboard", "sideboard", "Sideboard:", "# Sideboard"];

/// Most copies of one card a single deck line may add.
///
/// Lines asking for more are malformed and add nothing.
pub const MAX_COPIES: usize = 999;

/// Ydk line that ends the main and extra decks.
pub(crate) const YDK_SIDE_MARKER: &str = "!side";

/// A deck of cards.
///
/// Cloning is O(1); clones share structure until modified.
#[derive(Clone, Debug, PartialEq)]
pub struct Deck {
    pub name: String,
    pub file_type: DeckFileType,
    pub(crate) cards: Vector<Arc<Card>>,
}

impl Default for Deck {
    fn default() -> Self {
        Self::new(DEFAULT_DECK_NAME, DeckFileType::default())
    }
}

impl Deck {
    /// Create an empty deck. An empty name becomes [`DEFAULT_DECK_NAME`].
    #[must_use]
    pub fn new(name: impl Into<String>, file_type: DeckFileType) -> Self {
        let mut name = name.into();
        if name.is_empty() {
            name = DEFAULT_DECK_NAME.to_string();
        }
        Self {
            name,
            file_type,
            cards: Vector::new(),
        }
    }

    /// Parse deck text in `file_type` format against `game`'s cards.
    ///
    /// ## Example
    ///
    /// ```
    /// use cgs_core::{CardGame, Deck, DeckFileType};
    /// use serde_json::json;
    ///
    /// let mut game = CardGame::from_json(r#"{"name": "Mini"}"#).unwrap();
    /// game.ingest_card(&json!({"id": "1", "name": "Fireball"}));
    ///
    /// let deck = Deck::parse(&game, "Burn", DeckFileType::Txt, "3x Fireball\n1 Unknown Card\n");
    /// assert_eq!(deck.len(), 3);
    /// ```
    #[must_use]
    pub fn parse(game: &CardGame, name: &str, file_type: DeckFileType, text: &str) -> Self {
        let mut deck = Self::new(name, file_type);
        for line in text.split('\n').map(str::trim) {
            match file_type {
                DeckFileType::Dec => deck.load_dec(game, line),
                DeckFileType::Hsd => deck.load_hsd(game, line),
                DeckFileType::Ydk => {
                    if line == YDK_SIDE_MARKER {
                        break;
                    }
                    deck.load_ydk(game, line);
                }
                DeckFileType::Txt => {
                    if SIDEBOARD_MARKERS.contains(&line) {
                        break;
                    }
                    deck.load_txt(game, line);
                }
            }
        }
        tracing::debug!(deck = %deck.name, format = %file_type, cards = deck.len(), "parsed deck");
        deck
    }

    /// Append one card.
    pub fn add(&mut self, card: Arc<Card>) {
        self.cards.push_back(card);
    }

    /// Append `count` copies of a card. Counts above [`MAX_COPIES`] are
    /// refused and add nothing.
    pub(crate) fn add_copies(&mut self, card: &Arc<Card>, count: usize) -> bool {
        if count > MAX_COPIES {
            tracing::debug!(card = %card.id, count, "dropping deck line with too many copies");
            return false;
        }
        for _ in 0..count {
            self.cards.push_back(Arc::clone(card));
        }
        true
    }

    #[must_use]
    pub fn cards(&self) -> &Vector<Arc<Card>> {
        &self.cards
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Card>> {
        self.cards.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Copies of each distinct card, in order of first appearance.
    #[must_use]
    pub fn card_counts(&self) -> IndexMap<Arc<Card>, usize> {
        count_cards(self.cards.iter())
    }

    /// Cards matched by the game's extra rules, by group name.
    ///
    /// A card joins the first group whose rule it matches. Enum properties
    /// match when their display text contains the rule's value; other
    /// properties must equal it.
    #[must_use]
    pub fn extra_groups(&self, game: &CardGame) -> IndexMap<String, Vec<Arc<Card>>> {
        let mut groups: IndexMap<String, Vec<Arc<Card>>> = IndexMap::new();
        for card in &self.cards {
            if let Some(extra) = game.def().extras.iter().find(|extra| is_extra(card, extra, game)) {
                groups
                    .entry(extra.group_name().to_string())
                    .or_default()
                    .push(Arc::clone(card));
            }
        }
        groups
    }

    /// Every card in any extra group, group by group.
    #[must_use]
    pub fn extra_cards(&self, game: &CardGame) -> Vec<Arc<Card>> {
        self.extra_groups(game).into_values().flatten().collect()
    }

    /// Cards not in any extra group, in deck order.
    #[must_use]
    pub fn main_cards(&self, game: &CardGame) -> Vec<Arc<Card>> {
        let extras = self.extra_cards(game);
        self.cards
            .iter()
            .filter(|card| !extras.contains(card))
            .cloned()
            .collect()
    }

    /// Stable sort by [`Card::compare`].
    pub fn sort(&mut self) {
        let mut cards: Vec<Arc<Card>> = self.cards.iter().cloned().collect();
        cards.sort_by(|a, b| a.compare(b));
        self.cards = cards.into_iter().collect();
    }

    /// Shuffle the deck in place.
    pub fn shuffle(&mut self, rng: &mut DeckRng) {
        let mut cards: Vec<Arc<Card>> = self.cards.iter().cloned().collect();
        rng.shuffle(&mut cards);
        self.cards = cards.into_iter().collect();
    }

    /// Serialize in this deck's own format.
    #[must_use]
    pub fn to_string(&self, game: &CardGame) -> String {
        self.to_format(game, self.file_type)
    }

    /// Serialize in `file_type` format.
    #[must_use]
    pub fn to_format(&self, game: &CardGame, file_type: DeckFileType) -> String {
        match file_type {
            DeckFileType::Dec => self.to_dec(),
            DeckFileType::Hsd => self.to_hsd(game),
            DeckFileType::Txt => self.to_txt(game),
            DeckFileType::Ydk => self.to_ydk(game),
        }
    }
}

pub(crate) fn count_cards<'a>(cards: impl Iterator<Item = &'a Arc<Card>>) -> IndexMap<Arc<Card>, usize> {
    let mut counts = IndexMap::new();
    for card in cards {
        *counts.entry(Arc::clone(card)).or_insert(0) += 1;
    }
    counts
}

fn is_extra(card: &Card, extra: &ExtraDef, game: &CardGame) -> bool {
    let value = card.get_string(&extra.property, game);
    if game.is_enum_property(&extra.property) {
        value.contains(extra.value.as_str())
    } else {
        value == extra.value
    }
}
