//! Card system: property values, cards, sets, and the registry.
//!
//! ## Key Types
//!
//! - `PropertyValue`: Typed value of one card property
//! - `CardProperty`: A value paired with its schema node
//! - `Card`: One card record, compared and hashed by id
//! - `Set`: A card set (code and display name)
//! - `CardRegistry`: Card and set lookup in load order
//!
//! Cards are shared as `Arc<Card>` between the registry, filter results
//! and decks.

pub mod attributes;
pub mod card;
pub mod registry;
pub mod set;

pub use attributes::{parse_bool, CardProperty, PropertyValue};
pub use card::{Card, CardRef};
pub use registry::CardRegistry;
pub use set::Set;
