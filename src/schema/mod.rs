//! Game schema: typed card properties and enumerations.
//!
//! ## Key Types
//!
//! - `PropertyType`: Closed set of value kinds a property may hold
//! - `PropertyDef`: Named, typed property with optional child properties
//! - `EnumDef`: Symbol -> display text table with bit-flag lookups
//!
//! Both lists are declared by the game definition and are immutable once
//! the game is loaded, except that enum lookups grow as unseen symbols are
//! encountered.

pub mod enums;
pub mod property;

pub use enums::{parse_int, EnumDef, DELIMITER, HEX_PREFIX};
pub use property::{
    flatten, resolve_property, PropertyDef, PropertyType, ESCAPE_CHARACTER, OBJECT_DELIMITER,
};
