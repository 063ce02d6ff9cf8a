//! Hsd decks: Hearthstone deck strings.
//!
//! A deck string is base64 over a varint payload:
//!
//! ```text
//! 0x00  version=1  format=1
//! hero count,   hero ids...
//! single count, ids...          (one copy each)
//! double count, ids...          (two copies each)
//! multi count,  (id, count)...
//! ```
//!
//! Ids are the game's integer `deckFileAltId` property. Lines starting with
//! `###` name the deck; other `#` lines are comments.

use std::fmt::Write;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use super::deck::{count_cards, Deck, MAX_COPIES};
use super::varint::{self, VarIntReader};
use crate::cards::Card;
use crate::error::Result;
use crate::game::CardGame;

const NAME_MARKER: &str = "###";

/// Header varints written after the reserved byte.
const VERSION: u64 = 1;
const FORMAT: u64 = 1;

/// Property shown after `# Class:` in the comment header.
const CLASS_PROPERTY: &str = "cardClass";

/// Property shown in parentheses on each card comment line.
const COST_PROPERTY: &str = "cost";

/// Decode a base64 deck string into `(id, copies)` entries, heroes first.
pub(crate) fn decode(line: &str) -> Result<Vec<(u64, u64)>> {
    let bytes = STANDARD.decode(line)?;
    let mut reader = VarIntReader::new(&bytes, 1);
    reader.next_value()?;
    reader.next_value()?;

    let mut entries = Vec::new();
    for copies in [1, 1, 2] {
        let count = reader.next_value()?;
        for _ in 0..count {
            entries.push((reader.next_value()?, copies));
        }
    }
    let multis = reader.next_value()?;
    for _ in 0..multis {
        let id = reader.next_value()?;
        entries.push((id, reader.next_value()?));
    }
    Ok(entries)
}

/// Encode heroes and `(id, copies)` entries as a base64 deck string.
pub(crate) fn encode(heroes: &[u64], entries: &[(u64, usize)]) -> String {
    let mut bytes = vec![0];
    varint::write(&mut bytes, VERSION);
    varint::write(&mut bytes, FORMAT);

    varint::write(&mut bytes, heroes.len() as u64);
    for &hero in heroes {
        varint::write(&mut bytes, hero);
    }
    for copies in [1, 2] {
        let ids: Vec<u64> = entries
            .iter()
            .filter(|(_, count)| *count == copies)
            .map(|(id, _)| *id)
            .collect();
        varint::write(&mut bytes, ids.len() as u64);
        for id in ids {
            varint::write(&mut bytes, id);
        }
    }
    let multis: Vec<&(u64, usize)> = entries.iter().filter(|(_, count)| *count > 2).collect();
    varint::write(&mut bytes, multis.len() as u64);
    for (id, count) in multis {
        varint::write(&mut bytes, *id);
        varint::write(&mut bytes, *count as u64);
    }
    STANDARD.encode(bytes)
}

fn hsd_id(card: &Card, game: &CardGame) -> u64 {
    u64::try_from(card.get_int(&game.def().deck_file_alt_id)).unwrap_or(0)
}

impl Deck {
    /// Read one hsd line: a name, a comment, or a deck string.
    ///
    /// Deck strings are added in payload order, then the deck is sorted.
    /// A payload that fails to decode, or that asks for more than
    /// [`MAX_COPIES`] of any card, adds nothing.
    pub fn load_hsd(&mut self, game: &CardGame, line: &str) {
        if let Some(name) = line.strip_prefix(NAME_MARKER) {
            self.name = name.trim().to_string();
            return;
        }
        if line.is_empty() || line.starts_with('#') {
            return;
        }

        let entries = match decode(line) {
            Ok(entries) => entries,
            Err(error) => {
                tracing::debug!(%error, "dropping malformed hsd deck string");
                return;
            }
        };
        if entries.iter().any(|&(_, copies)| copies > MAX_COPIES as u64) {
            tracing::debug!("dropping hsd deck string with too many copies");
            return;
        }

        let alt_id = &game.def().deck_file_alt_id;
        for (id, copies) in entries {
            let found = i64::try_from(id)
                .ok()
                .and_then(|id| game.cards().find(|card| card.get_int(alt_id) == id));
            match found {
                Some(card) => {
                    self.add_copies(card, usize::try_from(copies).unwrap_or(0));
                }
                None => tracing::debug!(id, "no card matches hsd id"),
            }
        }
        self.sort();
    }

    /// Serialize as hsd: a comment header followed by the deck string.
    ///
    /// Extra cards are written as heroes.
    #[must_use]
    pub fn to_hsd(&self, game: &CardGame) -> String {
        let extras = self.extra_cards(game);
        let main = self.main_cards(game);
        let counts = count_cards(main.iter());

        let mut text = String::new();
        let _ = writeln!(text, "{NAME_MARKER} {}", self.name);
        if let Some(class) = extras
            .first()
            .map(|hero| hero.get_string(CLASS_PROPERTY, game))
            .filter(|class| !class.is_empty())
        {
            let _ = writeln!(text, "# Class: {class}");
        }
        text.push_str("# Format: Wild\n#\n");
        for (card, count) in &counts {
            let _ = writeln!(text, "# {count}x ({}) {}", card.get_string(COST_PROPERTY, game), card.name);
        }
        text.push_str("#\n");

        let heroes: Vec<u64> = extras.iter().map(|card| hsd_id(card, game)).collect();
        let entries: Vec<(u64, usize)> = counts
            .iter()
            .map(|(card, count)| (hsd_id(card, game), *count))
            .collect();
        text.push_str(&encode(&heroes, &entries));
        text.push('\n');
        text
    }
}
