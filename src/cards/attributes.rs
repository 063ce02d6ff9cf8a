//! Typed card property values.
//!
//! Raw card data is loosely typed: everything arrives as strings, lists of
//! strings, or sub-objects. Each value is interpreted once, against its
//! `PropertyDef`, when the card is built, so accessors never re-parse.
//!
//! ## PropertyValue Types
//!
//! - `Text`: Plain and escaped strings, serialized objects
//! - `Integer`: Numbers (cost, attack), 0 if the raw text isn't a number
//! - `Boolean`: Flags, true for `true`/`yes`/`y`/`1`
//! - `Enum`: Enum symbols with their OR'd bit flags
//! - `List`: String lists without an enum table

use std::borrow::Cow;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::schema::enums::split_values;
use crate::schema::{parse_int, EnumDef, PropertyDef, PropertyType, DELIMITER, ESCAPE_CHARACTER};

/// Interpreted value of one card property.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropertyValue {
    Text(String),
    Integer { raw: String, value: i64 },
    Boolean { raw: String, value: bool },
    /// Enum symbols and their flags as resolved when the card was built.
    Enum { raw: String, flags: i64 },
    List(Vec<String>),
}

impl Default for PropertyValue {
    fn default() -> Self {
        PropertyValue::Text(String::new())
    }
}

impl PropertyValue {
    /// Interpret `raw` according to `def`.
    ///
    /// Never fails: unparseable integers read as 0 and unknown booleans as
    /// false. Any property with an enum table, other than integer and
    /// boolean properties, becomes an `Enum`.
    #[must_use]
    pub fn parse(def: &PropertyDef, raw: &str, enum_def: Option<&EnumDef>) -> Self {
        match (def.property_type, enum_def) {
            (PropertyType::Integer, _) => PropertyValue::Integer {
                raw: raw.to_string(),
                value: parse_int(raw).unwrap_or(0),
            },
            (PropertyType::Boolean, _) => PropertyValue::Boolean {
                raw: raw.to_string(),
                value: parse_bool(raw),
            },
            (_, Some(enum_def)) => PropertyValue::Enum {
                raw: raw.to_string(),
                flags: enum_def.get_enum_from_property_value(raw),
            },
            (PropertyType::EscapedString, None) => {
                PropertyValue::Text(raw.replace(ESCAPE_CHARACTER, ""))
            }
            (property_type, None) if property_type.is_list() => {
                PropertyValue::List(split_values(raw).map(str::to_string).collect())
            }
            (_, None) => PropertyValue::Text(raw.to_string()),
        }
    }

    /// Stored string form. Lists are joined by the enum delimiter.
    #[must_use]
    pub fn raw(&self) -> Cow<'_, str> {
        match self {
            PropertyValue::Text(raw)
            | PropertyValue::Integer { raw, .. }
            | PropertyValue::Boolean { raw, .. }
            | PropertyValue::Enum { raw, .. } => Cow::Borrowed(raw),
            PropertyValue::List(items) => Cow::Owned(items.join(DELIMITER)),
        }
    }

    /// Integer reading; 0 when the value isn't a number.
    #[must_use]
    pub fn as_int(&self) -> i64 {
        match self {
            PropertyValue::Integer { value, .. } => *value,
            other => parse_int(&other.raw()).unwrap_or(0),
        }
    }

    /// Boolean reading.
    #[must_use]
    pub fn as_bool(&self) -> bool {
        match self {
            PropertyValue::Boolean { value, .. } => *value,
            other => parse_bool(&other.raw()),
        }
    }

    /// Enum flags, if this is an enum value.
    #[must_use]
    pub fn flags(&self) -> Option<i64> {
        match self {
            PropertyValue::Enum { flags, .. } => Some(*flags),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            PropertyValue::List(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            PropertyValue::List(items) => items.is_empty(),
            other => other.raw().is_empty(),
        }
    }
}

impl std::fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw())
    }
}

/// Lenient boolean parse: `true`, `yes`, `y` or `1`, ignoring case.
#[must_use]
pub fn parse_bool(text: &str) -> bool {
    ["true", "yes", "y", "1"]
        .iter()
        .any(|truthy| text.eq_ignore_ascii_case(truthy))
}

/// A property value paired with the schema node it was read against.
#[derive(Clone, Debug, PartialEq)]
pub struct CardProperty {
    pub def: Arc<PropertyDef>,
    pub value: PropertyValue,
}

impl CardProperty {
    #[must_use]
    pub fn new(def: Arc<PropertyDef>, value: PropertyValue) -> Self {
        Self { def, value }
    }

    /// Interpret `raw` against `def`.
    #[must_use]
    pub fn parse(def: Arc<PropertyDef>, raw: &str, enum_def: Option<&EnumDef>) -> Self {
        let value = PropertyValue::parse(&def, raw, enum_def);
        Self { def, value }
    }

    /// Property with no value.
    #[must_use]
    pub fn empty(def: Arc<PropertyDef>) -> Self {
        Self::parse(def, "", None)
    }
}
