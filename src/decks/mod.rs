//! Decks and deck file codecs.
//!
//! ## Key Types
//!
//! - `Deck`: Named, ordered card list that may repeat cards
//! - `VarIntReader`: Sequential LEB128 reader used by hsd deck strings
//!
//! Each file format lives in its own module as an `impl Deck` block with a
//! `load_*` line reader and a `to_*` writer:
//!
//! | Format | Lines                              | Resolves by           |
//! |--------|------------------------------------|-----------------------|
//! | dec    | `<count> <name>`                   | exact name            |
//! | hsd    | base64 varint deck string          | integer alt id        |
//! | txt    | `<count> [<id>] <name> (<set>)`    | id, name and set      |
//! | ydk    | one id per line                    | alt id display text   |

pub mod dec;
pub mod deck;
pub mod hsd;
pub mod txt;
pub mod varint;
pub mod ydk;

pub use deck::{Deck, DEFAULT_DECK_NAME, MAX_COPIES};
pub use varint::VarIntReader;
