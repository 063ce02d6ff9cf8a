//! Card search filters and their canonical string form.
//!
//! The canonical form is a sequence of `; `-terminated segments:
//!
//! ```text
//! name:"blue dragon"; id:"X"; set:"LEA"; text:"flying"; cost>=2; cost<=4; IS token; NOT legendary; color:=5;
//! ```
//!
//! Text values are double-quoted, with `\` written as `\\` and `"` as `\"`.
//! A quote only opens a value right after `:`, so apostrophes inside names
//! are literal.
//!
//! Enum filters keep the raw bitmask (`prop:=flags`) rather than symbol
//! names, so they survive changes to how symbols are displayed.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::schema::parse_int;

const SEGMENT_END: char = ';';

/// Structured card query. Every populated field must match.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CardSearchFilters {
    /// Whitespace-separated tokens, each a substring of the card name.
    pub name: String,
    /// Substring of the card id.
    pub id: String,
    /// Substring of the card's set code.
    pub set_code: String,
    /// Property -> substring of its display text.
    pub string_properties: IndexMap<String, String>,
    pub int_min_properties: IndexMap<String, i64>,
    pub int_max_properties: IndexMap<String, i64>,
    pub bool_properties: IndexMap<String, bool>,
    /// Property -> enum bitmask; any shared bit matches.
    pub enum_properties: IndexMap<String, i64>,
}

impl CardSearchFilters {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    #[must_use]
    pub fn with_set_code(mut self, set_code: impl Into<String>) -> Self {
        self.set_code = set_code.into();
        self
    }

    #[must_use]
    pub fn with_string(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.string_properties.insert(property.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_int_min(mut self, property: impl Into<String>, min: i64) -> Self {
        self.int_min_properties.insert(property.into(), min);
        self
    }

    #[must_use]
    pub fn with_int_max(mut self, property: impl Into<String>, max: i64) -> Self {
        self.int_max_properties.insert(property.into(), max);
        self
    }

    #[must_use]
    pub fn with_bool(mut self, property: impl Into<String>, value: bool) -> Self {
        self.bool_properties.insert(property.into(), value);
        self
    }

    #[must_use]
    pub fn with_enum(mut self, property: impl Into<String>, flags: i64) -> Self {
        self.enum_properties.insert(property.into(), flags);
        self
    }

    /// True when no field would restrict a search.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
            && self.id.is_empty()
            && self.set_code.is_empty()
            && self.string_properties.is_empty()
            && self.int_min_properties.is_empty()
            && self.int_max_properties.is_empty()
            && self.bool_properties.is_empty()
            && self.enum_properties.is_empty()
    }

    /// Rebuild filters from their canonical string form.
    ///
    /// Segments that can't be understood are ignored.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut filters = Self::default();
        for segment in split_segments(text) {
            filters.apply_segment(segment);
        }
        filters
    }

    fn apply_segment(&mut self, segment: &str) {
        if let Some(property) = segment.strip_prefix("IS ") {
            self.bool_properties.insert(property.trim().to_string(), true);
            return;
        }
        if let Some(property) = segment.strip_prefix("NOT ") {
            self.bool_properties.insert(property.trim().to_string(), false);
            return;
        }

        let Some(at) = segment.find([':', '>', '<']) else {
            tracing::trace!(segment, "ignoring filter segment");
            return;
        };
        let key = segment[..at].trim().to_string();
        let rest = &segment[at..];

        if let Some(value) = rest.strip_prefix(":=") {
            if let Some(flags) = parse_int(value.trim()) {
                self.enum_properties.insert(key, flags);
            }
        } else if let Some(value) = rest.strip_prefix(">=") {
            if let Ok(min) = value.trim().parse() {
                self.int_min_properties.insert(key, min);
            }
        } else if let Some(value) = rest.strip_prefix("<=") {
            if let Ok(max) = value.trim().parse() {
                self.int_max_properties.insert(key, max);
            }
        } else if let Some(value) = rest.strip_prefix(':') {
            let value = unquote(value.trim());
            match key.as_str() {
                "name" => self.name = value,
                "id" => self.id = value,
                "set" => self.set_code = value,
                _ => {
                    self.string_properties.insert(key, value);
                }
            }
        } else {
            tracing::trace!(segment, "ignoring filter segment");
        }
    }
}

impl fmt::Display for CardSearchFilters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in [("name", &self.name), ("id", &self.id), ("set", &self.set_code)] {
            if !value.is_empty() {
                write!(f, "{key}:\"{}\"; ", escape(value))?;
            }
        }
        for (property, value) in &self.string_properties {
            write!(f, "{property}:\"{}\"; ", escape(value))?;
        }
        for (property, min) in &self.int_min_properties {
            write!(f, "{property}>={min}; ")?;
        }
        for (property, max) in &self.int_max_properties {
            write!(f, "{property}<={max}; ")?;
        }
        for (property, value) in &self.bool_properties {
            let prefix = if *value { "IS" } else { "NOT" };
            write!(f, "{prefix} {property}; ")?;
        }
        for (property, flags) in &self.enum_properties {
            write!(f, "{property}:={flags}; ")?;
        }
        Ok(())
    }
}

impl FromStr for CardSearchFilters {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

/// Trimmed, non-empty segments, splitting on `;` outside quoted values.
fn split_segments(text: &str) -> SmallVec<[&str; 8]> {
    let mut segments = SmallVec::new();
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut previous: Option<char> = None;
    let mut start = 0;
    for (i, c) in text.char_indices() {
        match quote {
            Some(_) if escaped => escaped = false,
            Some(_) if c == '\\' => escaped = true,
            Some(open) if c == open => quote = None,
            Some(_) => {}
            None if matches!(c, '"' | '\'') && previous == Some(':') => quote = Some(c),
            None if c == SEGMENT_END => {
                segments.push(text[start..i].trim());
                start = i + c.len_utf8();
            }
            None => {}
        }
        if !c.is_whitespace() {
            previous = Some(c);
        }
    }
    segments.push(text[start..].trim());
    segments.retain(|segment: &mut &str| !segment.is_empty());
    segments
}

fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

fn unquote(value: &str) -> String {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            let mut text = String::with_capacity(inner.len());
            let mut chars = inner.chars();
            while let Some(c) = chars.next() {
                match c {
                    '\\' => text.extend(chars.next()),
                    _ => text.push(c),
                }
            }
            return text;
        }
    }
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CardSearchFilters {
        CardSearchFilters::new()
            .with_name("blue dragon")
            .with_id("LOB")
            .with_set_code("LOB")
            .with_string("text", "draw; then discard")
            .with_int_min("cost", 2)
            .with_int_max("cost", 4)
            .with_bool("token", true)
            .with_bool("legendary", false)
            .with_enum("color", 5)
    }

    #[test]
    fn test_display() {
        assert_eq!(
            sample().to_string(),
            "name:\"blue dragon\"; id:\"LOB\"; set:\"LOB\"; text:\"draw; then discard\"; \
             cost>=2; cost<=4; IS token; NOT legendary; color:=5; "
        );
        assert_eq!(CardSearchFilters::new().to_string(), "");
    }

    #[test]
    fn test_parse_round_trip() {
        let filters = sample();
        assert_eq!(CardSearchFilters::parse(&filters.to_string()), filters);
        assert_eq!(filters.to_string().parse::<CardSearchFilters>().unwrap(), filters);
    }

    #[test]
    fn test_quotes_and_separators_in_values_round_trip() {
        let filters = CardSearchFilters::new()
            .with_name("O'Brien")
            .with_id("a;b")
            .with_set_code("it's")
            .with_string("text", "5\" tall")
            .with_string("path", "back\\slash")
            .with_int_min("cost", 2);

        let text = filters.to_string();
        assert!(text.contains(r#"text:"5\" tall"; "#));
        assert!(text.contains(r#"path:"back\\slash"; "#));
        assert_eq!(CardSearchFilters::parse(&text), filters);
    }

    #[test]
    fn test_parse_tolerates_noise() {
        let filters = CardSearchFilters::parse("  name:'Dark Magician' ;garbage; cost>=x; rarity:=0x10;;");
        assert_eq!(filters.name, "Dark Magician");
        assert!(filters.int_min_properties.is_empty());
        assert_eq!(filters.enum_properties.get("rarity"), Some(&16));
    }

    #[test]
    fn test_is_empty() {
        assert!(CardSearchFilters::new().is_empty());
        assert!(!CardSearchFilters::new().with_bool("x", false).is_empty());
    }

    #[test]
    fn test_serde() {
        let filters = sample();
        let json = serde_json::to_string(&filters).unwrap();
        let back: CardSearchFilters = serde_json::from_str(&json).unwrap();
        assert_eq!(back, filters);
    }
}
