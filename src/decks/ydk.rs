//! Ydk decks: one card id per line.
//!
//! ```text
//! #main
//! 89631139
//! 89631139
//! #extra
//! 44508094
//! !side
//! ```
//!
//! Ids are the display text of the game's `deckFileAltId` property. Cards
//! without that property are written and matched by their own id.

use std::fmt::Write;
use std::sync::Arc;

use super::deck::{Deck, YDK_SIDE_MARKER};
use crate::cards::Card;
use crate::game::CardGame;

/// The id a card is written under in ydk files.
pub(crate) fn alt_id(card: &Card, game: &CardGame) -> String {
    let id = card.get_string(&game.def().deck_file_alt_id, game);
    if id.is_empty() {
        card.id.clone()
    } else {
        id
    }
}

impl Deck {
    /// Add the card named by one ydk line.
    pub fn load_ydk(&mut self, game: &CardGame, line: &str) {
        if line.is_empty() || line.starts_with('#') || line == YDK_SIDE_MARKER {
            return;
        }

        match game.cards().find(|card| alt_id(card, game) == line) {
            Some(card) => self.add(Arc::clone(card)),
            None => tracing::debug!(line, "no card matches ydk id"),
        }
    }

    /// Serialize as ydk. Extra cards go in the `#extra` section.
    #[must_use]
    pub fn to_ydk(&self, game: &CardGame) -> String {
        let mut text = String::from("#main\n");
        for card in self.main_cards(game) {
            let _ = writeln!(text, "{}", alt_id(&card, game));
        }
        text.push_str("#extra\n");
        for card in self.extra_cards(game) {
            let _ = writeln!(text, "{}", alt_id(&card, game));
        }
        text.push_str(YDK_SIDE_MARKER);
        text.push('\n');
        text
    }
}
