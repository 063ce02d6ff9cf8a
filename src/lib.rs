//! # cgs-core
//!
//! A data-driven engine for configurable card games: typed card schemas,
//! enum bit flags, card search, and deck file codecs.
//!
//! ## Design Principles
//!
//! 1. **Game-Agnostic**: No hardcoded card fields, enums, or deck rules.
//!    Games describe themselves with a JSON `GameDef`.
//!
//! 2. **Explicit Context**: Every operation takes the `CardGame` it works
//!    against. There is no global current game.
//!
//! 3. **Best Effort Loading**: Bad card fields become empty values and
//!    unresolvable deck lines are dropped. Structural problems are recorded
//!    on the game instead of aborting the load.
//!
//! ## Architecture
//!
//! - **Shared Cards**: Cards are `Arc<Card>`, shared between the registry,
//!   search results and decks.
//!
//! - **Persistent Decks**: Decks hold an `im::Vector`, so cloning a deck is
//!   O(1).
//!
//! - **Bit-Flag Enums**: Each declared enum symbol gets one bit; a card's
//!   flags are resolved once, when the card is built.
//!
//! ## Modules
//!
//! - `core`: Game definition and deterministic RNG
//! - `schema`: Property definitions and enum tables
//! - `cards`: Property values, cards, sets, and the registry
//! - `game`: A loaded game and card/set ingestion
//! - `search`: Card search filters and the lazy filter engine
//! - `decks`: Decks and the dec, hsd, txt and ydk codecs
//!
//! ## Example
//!
//! ```
//! use cgs_core::{CardGame, CardSearchFilters, Deck, DeckFileType};
//! use serde_json::json;
//!
//! let mut game = CardGame::from_json(r#"{
//!     "name": "Mini",
//!     "cardProperties": [{"name": "cost", "type": "integer"}]
//! }"#).unwrap();
//! game.ingest_card(&json!({"id": "1", "name": "Fireball", "cost": 3}));
//! game.ingest_card(&json!({"id": "2", "name": "Ice Bolt", "cost": 5}));
//!
//! let cheap = CardSearchFilters::parse("cost<=4");
//! assert_eq!(game.filter_cards(&cheap).count(), 1);
//!
//! let deck = Deck::parse(&game, "Burn", DeckFileType::Txt, "2 Fireball\n1 Ice Bolt\n");
//! assert_eq!(deck.to_dec(), "2 Fireball\n1 Ice Bolt\n");
//! ```

pub mod cards;
pub mod core;
pub mod decks;
pub mod error;
pub mod game;
pub mod schema;
pub mod search;

// Re-export commonly used types
pub use crate::core::{
    DeckFileTxtId, DeckFileType, DeckRng, ExtraDef, GameDef, DEFAULT_SET_CODE,
};

pub use crate::schema::{EnumDef, PropertyDef, PropertyType};

pub use crate::cards::{Card, CardProperty, CardRef, CardRegistry, PropertyValue, Set};

pub use crate::game::{CardGame, IngestReport};

pub use crate::search::{CardFilter, CardSearchFilters};

pub use crate::decks::{Deck, DEFAULT_DECK_NAME};

pub use crate::error::{CardGameError, Result};
