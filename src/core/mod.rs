//! Core engine types: game configuration and deterministic randomness.
//!
//! These are game-agnostic. Games describe themselves with a `GameDef`
//! rather than modifying the engine.

pub mod config;
pub mod rng;

pub use config::{
    DeckFileTxtId, DeckFileType, ExtraDef, GameDef, DEFAULT_EXTRA_GROUP, DEFAULT_GAME_NAME,
    DEFAULT_SET_CODE,
};
pub use rng::DeckRng;
