//! Dec decks: `<count> <name>` lines.

use std::fmt::Write;

use super::deck::Deck;
use crate::cards::card::eq_ignore_case;
use crate::game::CardGame;
use crate::search::CardSearchFilters;

impl Deck {
    /// Add the cards described by one dec line.
    ///
    /// The first token is the count when it parses as one; the rest is an
    /// exact (case-insensitive) card name.
    pub fn load_dec(&mut self, game: &CardGame, line: &str) {
        if line.is_empty() || line.starts_with("//") || line.starts_with("SB:") {
            return;
        }

        let (count, name) = match line.split_once(' ') {
            Some((first, rest)) => match first.parse::<usize>() {
                Ok(count) => (count, rest.trim()),
                Err(_) => (1, line),
            },
            None => (1, line),
        };

        let filters = CardSearchFilters::new().with_name(name);
        let found = game
            .filter_cards(&filters)
            .find(|card| eq_ignore_case(&card.name, name));

        match found {
            Some(card) => {
                self.add_copies(card, count);
            }
            None => tracing::debug!(line, "no card matches dec line"),
        }
    }

    /// Serialize as dec.
    #[must_use]
    pub fn to_dec(&self) -> String {
        let mut text = String::new();
        for (card, count) in self.card_counts() {
            let _ = writeln!(text, "{count} {}", card.name);
        }
        text
    }
}
