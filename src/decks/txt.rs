//! Txt decks: `<count> [<id>] <name> (<set>)` lines.
//!
//! ```text
//! ### Standard Deck: Burn
//! ## Heroes
//! 1 Jaina
//! ## Main Deck
//! 4x Lightning Bolt
//! 2 [LB-2] Lightning Bolt (M10)
//! ```
//!
//! The count may be written `N`, `Nx` or `xN`. A trailing `(set)` is only
//! read as a set when the game has a set with that code.

use std::fmt::Write;
use std::sync::Arc;

use indexmap::IndexMap;
use smallvec::SmallVec;

use super::deck::{count_cards, Deck};
use crate::cards::card::eq_ignore_case;
use crate::cards::Card;
use crate::core::config::DeckFileTxtId;
use crate::game::CardGame;
use crate::search::CardSearchFilters;

/// One parsed txt line.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct TxtLine {
    pub count: usize,
    pub id: String,
    pub name: String,
    pub set_code: String,
}

impl TxtLine {
    /// Split a non-comment line into its parts.
    pub(crate) fn parse(line: &str, game: &CardGame) -> Self {
        let mut parsed = TxtLine {
            count: 1,
            name: line.to_string(),
            ..Self::default()
        };
        if !line.contains(' ') {
            return parsed;
        }

        let mut tokens: SmallVec<[&str; 8]> = line.split(' ').collect();
        if let Some(count) = tokens.first().and_then(|token| parse_count(token)) {
            parsed.count = count;
            tokens.remove(0);
        }
        if let Some(id) = tokens
            .first()
            .and_then(|token| token.strip_prefix('['))
            .and_then(|token| token.strip_suffix(']'))
        {
            parsed.id = id.to_string();
            tokens.remove(0);
        }

        let rest = tokens.join(" ");
        parsed.name = match set_suffix(&rest, game) {
            Some((name, set_code)) => {
                parsed.set_code = set_code.to_string();
                name.trim_end().to_string()
            }
            None => rest,
        };
        parsed
    }
}

/// `N`, `Nx` or `xN`.
fn parse_count(token: &str) -> Option<usize> {
    let digits = if token.starts_with('x') || token.ends_with('x') {
        token.trim_matches('x')
    } else {
        token
    };
    digits.parse().ok()
}

/// Split `name (SET)` when `SET` is a known set code.
fn set_suffix<'a>(text: &'a str, game: &CardGame) -> Option<(&'a str, &'a str)> {
    let inner = text.strip_suffix(')')?;
    let open = inner.rfind('(')?;
    let set_code = &inner[open + 1..];
    game.set(set_code).map(|_| (&inner[..open], set_code))
}

fn is_comment(line: &str) -> bool {
    line.starts_with('#') || line.starts_with("//")
}

impl Deck {
    /// Add the cards described by one txt line.
    ///
    /// A card whose id equals the line's `[id]` wins; otherwise the first
    /// card whose name matches (and set, if given) is added `count` times.
    pub fn load_txt(&mut self, game: &CardGame, line: &str) {
        if line.is_empty()
            || is_comment(line)
            || line.eq_ignore_ascii_case("Sideboard")
            || line == "Sideboard:"
        {
            return;
        }

        let parsed = TxtLine::parse(line, game);
        if let Some(card) = game.card(&parsed.id) {
            self.add_copies(card, parsed.count);
            return;
        }

        let filters = CardSearchFilters::new()
            .with_id(parsed.id.as_str())
            .with_name(parsed.name.as_str())
            .with_set_code(parsed.set_code.as_str());
        let found = game.filter_cards(&filters).find(|card| {
            card.id == parsed.id
                || (eq_ignore_case(card.name.trim(), &parsed.name)
                    && (parsed.set_code.is_empty() || eq_ignore_case(&parsed.set_code, &card.set_code)))
        });

        match found {
            Some(card) => {
                self.add_copies(card, parsed.count);
            }
            None => tracing::debug!(line, "no card matches txt line"),
        }
    }

    /// Serialize as txt.
    ///
    /// Extra groups get their own `## group` sections ahead of `## Main Deck`.
    /// Cards are disambiguated by id or set when names aren't unique or the
    /// card is a reprint.
    #[must_use]
    pub fn to_txt(&self, game: &CardGame) -> String {
        let mut text = String::new();
        let _ = writeln!(text, "### {} Deck: {}", game.name(), self.name);

        let groups = self.extra_groups(game);
        if !groups.is_empty() {
            for (group, cards) in &groups {
                let _ = writeln!(text, "## {group}");
                write_txt_lines(&mut text, game, count_cards(cards.iter()));
            }
            text.push_str("## Main Deck\n");
        }

        let main = self.main_cards(game);
        write_txt_lines(&mut text, game, count_cards(main.iter()));
        text
    }
}

fn write_txt_lines(text: &mut String, game: &CardGame, counts: IndexMap<Arc<Card>, usize>) {
    let def = game.def();
    for (card, count) in counts {
        let disambiguate = !def.card_name_is_unique || card.is_reprint;
        let _ = write!(text, "{count} ");
        if disambiguate && def.deck_file_txt_id == DeckFileTxtId::Id {
            let _ = write!(text, "[{}] ", card.id);
        }
        text.push_str(&card.name);
        if disambiguate && def.deck_file_txt_id == DeckFileTxtId::Set {
            let _ = write!(text, " ({})", card.set_code);
        }
        text.push('\n');
    }
}
