//! Enumerated property values and their bit-flag lookups.
//!
//! An `EnumDef` maps the hidden symbols stored on cards to the text shown to
//! users. Each symbol is also assigned an integer flag so that several values
//! can be OR'd together into one filter or one card value:
//!
//! - Symbols written as hex literals (`0x10`) use that literal as their flag.
//! - Every other symbol gets `1 << (lookups already assigned)`.
//!
//! Flags depend on registration order, so lookups are registered in
//! declaration order when the game loads and then on first sight of any
//! unseen symbol.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Separator between multiple enum values in one stored or displayed string.
pub const DELIMITER: &str = " | ";

/// Prefix marking a symbol or value as a hexadecimal integer.
pub const HEX_PREFIX: &str = "0x";

/// Highest shift that still yields a positive `i64` flag.
const MAX_FLAG_SHIFT: usize = 62;

/// Parse a decimal or `0x`-prefixed hexadecimal integer.
#[must_use]
pub fn parse_int(text: &str) -> Option<i64> {
    match text.strip_prefix(HEX_PREFIX) {
        Some(hex) => i64::from_str_radix(hex, 16).ok(),
        None => text.trim().parse().ok(),
    }
}

/// Enumeration for one card property.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EnumDef {
    /// Name (or dotted path) of the card property this enum describes.
    #[serde(default)]
    pub property: String,

    /// Symbol -> display text, in declaration order.
    #[serde(default)]
    pub values: IndexMap<String, String>,

    /// Symbol -> bit flag, in registration order.
    #[serde(skip)]
    lookups: IndexMap<String, i64>,
}

impl EnumDef {
    /// Create an enum for `property` with no lookups registered yet.
    #[must_use]
    pub fn new(property: impl Into<String>, values: IndexMap<String, String>) -> Self {
        Self {
            property: property.into(),
            values,
            lookups: IndexMap::new(),
        }
    }

    /// Add a declared value (builder pattern).
    #[must_use]
    pub fn with_value(mut self, symbol: impl Into<String>, display: impl Into<String>) -> Self {
        self.values.insert(symbol.into(), display.into());
        self
    }

    /// Registered lookups in registration order.
    #[must_use]
    pub fn lookups(&self) -> &IndexMap<String, i64> {
        &self.lookups
    }

    /// Flag registered for `key`, if any.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<i64> {
        self.lookups.get(key).copied()
    }

    /// Flag that marks "no value" for this enum in filters.
    #[must_use]
    pub fn empty_flag(&self) -> i64 {
        if self.values.len() > MAX_FLAG_SHIFT {
            return 0;
        }
        1 << self.values.len()
    }

    /// Clear and re-register every declared symbol in declaration order.
    pub fn initialize_lookups(&mut self) {
        self.lookups.clear();
        let keys: Vec<String> = self.values.keys().cloned().collect();
        for key in keys {
            self.create_lookup(&key);
        }
    }

    /// Register `key` and return its new flag.
    ///
    /// Returns 0 without registering anything if `key` is empty or already
    /// has a lookup.
    pub fn create_lookup(&mut self, key: &str) -> i64 {
        if key.is_empty() || self.lookups.contains_key(key) {
            return 0;
        }

        let explicit = if key.starts_with(HEX_PREFIX) {
            parse_int(key)
        } else {
            None
        };
        let flag = match explicit {
            Some(value) => value,
            None if self.lookups.len() <= MAX_FLAG_SHIFT => 1 << self.lookups.len(),
            None => {
                tracing::warn!(
                    property = %self.property,
                    key,
                    "enum has run out of flag bits; value will not be filterable"
                );
                0
            }
        };

        self.lookups.insert(key.to_string(), flag);
        flag
    }

    /// OR together the flags for every token of a stored property value.
    ///
    /// Tokens that are neither registered symbols nor integers contribute 0.
    #[must_use]
    pub fn get_enum_from_property_value(&self, value: &str) -> i64 {
        split_values(value)
            .filter_map(|token| self.lookup(token).or_else(|| parse_int(token)))
            .fold(0, |flags, flag| flags | flag)
    }

    /// Display text of every declared symbol whose flag is set in `flags`.
    ///
    /// Bits without a declared symbol are dropped.
    #[must_use]
    pub fn get_string_from_lookup_flags(&self, flags: i64) -> String {
        let mut text = String::new();
        for (symbol, display) in &self.values {
            match self.lookup(symbol) {
                Some(flag) if flag & flags != 0 => {
                    if !text.is_empty() {
                        text.push_str(DELIMITER);
                    }
                    text.push_str(display);
                }
                _ => {}
            }
        }
        text
    }

    /// Display text for a stored property value.
    ///
    /// Declared symbols and integers are expanded through their flags,
    /// declared symbols without lookups map to their display text, and any
    /// other token is kept as written.
    #[must_use]
    pub fn get_string_from_property_value(&self, value: &str) -> String {
        let mut text = String::new();
        for token in split_values(value) {
            if !text.is_empty() {
                text.push_str(DELIMITER);
            }
            let declared = if self.values.contains_key(token) {
                self.lookup(token)
            } else {
                None
            };
            match declared.or_else(|| parse_int(token)) {
                Some(flags) => text.push_str(&self.get_string_from_lookup_flags(flags)),
                None => text.push_str(self.values.get(token).map_or(token, String::as_str)),
            }
        }
        text
    }

    /// Symbol-joined form of `flags`, the inverse of
    /// [`get_enum_from_property_value`](Self::get_enum_from_property_value).
    #[must_use]
    pub fn get_symbols_from_lookup_flags(&self, flags: i64) -> String {
        self.values
            .keys()
            .filter(|symbol| matches!(self.lookup(symbol), Some(flag) if flag & flags != 0))
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(DELIMITER)
    }
}

/// Non-empty tokens of a delimiter-joined value.
pub(crate) fn split_values(value: &str) -> impl Iterator<Item = &str> {
    value.split(DELIMITER).filter(|token| !token.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn colors() -> EnumDef {
        let mut def = EnumDef::new("color", IndexMap::new())
            .with_value("R", "Red")
            .with_value("G", "Green")
            .with_value("B", "Blue");
        def.initialize_lookups();
        def
    }

    #[test]
    fn test_parse_int() {
        assert_eq!(parse_int("42"), Some(42));
        assert_eq!(parse_int(" 7 "), Some(7));
        assert_eq!(parse_int("0x10"), Some(16));
        assert_eq!(parse_int("0xff"), Some(255));
        assert_eq!(parse_int("0xZZ"), None);
        assert_eq!(parse_int("Red"), None);
        assert_eq!(parse_int(""), None);
    }

    #[test]
    fn test_lookups_follow_declaration_order() {
        let def = colors();
        assert_eq!(def.lookup("R"), Some(1));
        assert_eq!(def.lookup("G"), Some(2));
        assert_eq!(def.lookup("B"), Some(4));
        assert_eq!(def.empty_flag(), 8);
    }

    #[test]
    fn test_create_lookup_is_idempotent() {
        let mut def = colors();
        assert_eq!(def.create_lookup("R"), 0);
        assert_eq!(def.create_lookup(""), 0);
        assert_eq!(def.create_lookup("W"), 8);
        assert_eq!(def.create_lookup("W"), 0);
        assert_eq!(def.lookup("W"), Some(8));
    }

    #[test]
    fn test_hex_symbols_use_their_literal() {
        let mut def = EnumDef::new("type", IndexMap::new())
            .with_value("0x1", "Monster")
            .with_value("0x40", "Fusion")
            .with_value("Spell", "Spell");
        def.initialize_lookups();

        assert_eq!(def.lookup("0x1"), Some(1));
        assert_eq!(def.lookup("0x40"), Some(64));
        // Two lookups already assigned
        assert_eq!(def.lookup("Spell"), Some(4));
        assert_eq!(def.get_string_from_lookup_flags(0x41), "Monster | Fusion");
    }

    #[test]
    fn test_enum_from_property_value() {
        let def = colors();
        assert_eq!(def.get_enum_from_property_value("R"), 1);
        assert_eq!(def.get_enum_from_property_value("R | B"), 5);
        assert_eq!(def.get_enum_from_property_value("R | 0x2"), 3);
        assert_eq!(def.get_enum_from_property_value("Purple"), 0);
        assert_eq!(def.get_enum_from_property_value(""), 0);
    }

    #[test]
    fn test_string_from_lookup_flags() {
        let def = colors();
        assert_eq!(def.get_string_from_lookup_flags(0), "");
        assert_eq!(def.get_string_from_lookup_flags(6), "Green | Blue");
        // Undeclared bit 16 is dropped
        assert_eq!(def.get_string_from_lookup_flags(17), "Red");
    }

    #[test]
    fn test_string_from_property_value() {
        let def = colors();
        assert_eq!(def.get_string_from_property_value("R | G"), "Red | Green");
        assert_eq!(def.get_string_from_property_value("Purple"), "Purple");
        assert_eq!(def.get_string_from_property_value("5"), "Red | Blue");
    }

    #[test]
    fn test_undeclared_lookup_displays_verbatim() {
        let mut def = colors();
        def.create_lookup("Purple");
        assert_eq!(def.get_enum_from_property_value("Purple"), 8);
        assert_eq!(def.get_string_from_property_value("R | Purple"), "Red | Purple");
    }

    #[test]
    fn test_symbols_round_trip() {
        let def = colors();
        let flags = def.get_enum_from_property_value("G | B");
        assert_eq!(def.get_symbols_from_lookup_flags(flags), "G | B");
    }

    #[test]
    fn test_serde_keeps_declaration_order() {
        let json = r#"{"property":"color","values":{"Z":"Zed","A":"Ay"}}"#;
        let mut def: EnumDef = serde_json::from_str(json).unwrap();
        assert!(def.lookups().is_empty());
        def.initialize_lookups();
        assert_eq!(def.lookup("Z"), Some(1));
        assert_eq!(def.lookup("A"), Some(2));
    }
}
