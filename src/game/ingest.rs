//! Card ingestion from semi-structured JSON records.
//!
//! Each declared property is read from the raw record according to its
//! type. A field that is missing or has the wrong shape yields an empty
//! value; it never fails the card.

use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;

use super::CardGame;
use crate::cards::{Card, CardProperty, Set};
use crate::error::{CardGameError, Result};
use crate::schema::enums::split_values;
use crate::schema::{PropertyDef, PropertyType, DELIMITER, OBJECT_DELIMITER};

/// Counts from one bulk load.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IngestReport {
    /// Cards created. A record in several sets creates several cards.
    pub cards: usize,
    /// Records skipped for lacking an id (or, for sets, a code).
    pub skipped: usize,
    /// Sets added.
    pub sets: usize,
}

impl CardGame {
    /// Build and register the cards described by one raw record.
    ///
    /// Returns one card per resolved set code, or nothing if the record has
    /// no id.
    pub fn ingest_card(&mut self, raw: &Value) -> Vec<Arc<Card>> {
        let default_set = self.def.set_code_default.clone();
        self.ingest_card_in_set(raw, &default_set)
    }

    /// Like [`ingest_card`](Self::ingest_card), with cards lacking a set
    /// placed in `default_set`.
    pub fn ingest_card_in_set(&mut self, raw: &Value, default_set: &str) -> Vec<Arc<Card>> {
        match self.build_cards(raw, default_set) {
            Ok(cards) => cards,
            Err(error) => {
                tracing::debug!(%error, "skipping card record");
                Vec::new()
            }
        }
    }

    /// Parse a cards document and ingest every record in it.
    pub fn load_cards_json(&mut self, text: &str) -> IngestReport {
        match serde_json::from_str::<Value>(text) {
            Ok(document) => self.load_cards_value(&document),
            Err(error) => {
                self.record_error(error.into());
                IngestReport::default()
            }
        }
    }

    /// Ingest every card record in a parsed cards document.
    ///
    /// Records are read from `cardDataIdentifier` when set, otherwise from
    /// the document itself; either an array or an object's values.
    pub fn load_cards_value(&mut self, document: &Value) -> IngestReport {
        let path = self.def.card_data_identifier.clone();
        let Some(records) = data_records(document, &path) else {
            self.record_error(CardGameError::MissingData(path));
            return IngestReport::default();
        };

        let default_set = self.def.set_code_default.clone();
        let known_sets = self.registry.sets().count();
        let mut report = IngestReport::default();
        for record in records {
            self.ingest_into(record, &default_set, &mut report);
        }
        report.sets = self.registry.sets().count() - known_sets;
        tracing::debug!(cards = report.cards, skipped = report.skipped, "loaded cards");
        report
    }

    /// Parse a sets document and ingest every set and its nested cards.
    pub fn load_sets_json(&mut self, text: &str) -> IngestReport {
        match serde_json::from_str::<Value>(text) {
            Ok(document) => self.load_sets_value(&document),
            Err(error) => {
                self.record_error(error.into());
                IngestReport::default()
            }
        }
    }

    /// Ingest every set record in a parsed sets document.
    ///
    /// Each set's cards, if listed under `setCardsIdentifier`, default to
    /// that set.
    pub fn load_sets_value(&mut self, document: &Value) -> IngestReport {
        let path = self.def.set_data_identifier.clone();
        let Some(records) = data_records(document, &path) else {
            self.record_error(CardGameError::MissingData(path));
            return IngestReport::default();
        };

        let mut report = IngestReport::default();
        for record in records {
            let code = scalar(record.get(&self.def.set_code_identifier));
            if code.is_empty() {
                let error = CardGameError::MissingSetCode(self.def.set_code_identifier.clone());
                tracing::debug!(%error, "skipping set record");
                report.skipped += 1;
                continue;
            }
            let name = scalar(record.get(&self.def.set_name_identifier));
            self.registry.replace_set(Set::new(code.clone(), name));
            report.sets += 1;

            if let Some(cards) = record.get(&self.def.set_cards_identifier).and_then(Value::as_array) {
                for card in cards {
                    self.ingest_into(card, &code, &mut report);
                }
            }
        }
        report
    }

    fn ingest_into(&mut self, raw: &Value, default_set: &str, report: &mut IngestReport) {
        match self.build_cards(raw, default_set) {
            Ok(cards) => report.cards += cards.len(),
            Err(error) => {
                tracing::debug!(%error, "skipping card record");
                report.skipped += 1;
            }
        }
    }

    fn build_cards(&mut self, raw: &Value, default_set: &str) -> Result<Vec<Arc<Card>>> {
        let mut id = scalar(raw.get(&self.def.card_id_identifier));
        if id.is_empty() {
            return Err(CardGameError::MissingCardId(self.def.card_id_identifier.clone()));
        }
        if let Some(stop) = self.def.card_id_stop.chars().next() {
            if let Some((head, _)) = id.split_once(stop) {
                id = head.to_string();
            }
        }
        let name = scalar(raw.get(&self.def.card_name_identifier));

        let mut extracted = Vec::new();
        for property in &self.def.card_properties {
            extract_property(
                property,
                raw,
                property.name.clone(),
                &self.def.card_property_identifier,
                &mut extracted,
            );
        }
        let properties = self.build_properties(extracted);

        let sets = self.resolve_sets(raw, default_set);
        let multi_set = sets.len() > 1;
        let mut cards = Vec::with_capacity(sets.len());
        for (code, set_name) in sets {
            let is_reprint = self.def.card_name_is_unique && self.registry.has_name(&name);
            let card_id = if multi_set {
                format!("{id}_{code}")
            } else {
                id.clone()
            };
            let card = Card {
                id: card_id,
                name: name.clone(),
                set_code: code.clone(),
                properties: properties.clone(),
                is_reprint,
            };
            tracing::trace!(id = %card.id, set = %code, is_reprint, "ingested card");
            cards.push(self.registry.register(card));
            self.registry.register_set(Set::new(code, set_name));
        }
        Ok(cards)
    }

    /// Type raw values, registering lookups for enum tokens seen for the first time.
    fn build_properties(&mut self, extracted: Vec<(String, String)>) -> IndexMap<String, CardProperty> {
        let mut properties = IndexMap::with_capacity(extracted.len());
        for (key, raw) in extracted {
            let Some(def) = self.property_arc(&key) else {
                continue;
            };
            if let Some(enum_def) = self.enum_def_mut(&key) {
                for token in split_values(&raw) {
                    enum_def.create_lookup(token);
                }
            }
            let property = CardProperty::parse(def, &raw, self.enum_def(&key));
            properties.insert(key, property);
        }
        properties
    }

    /// Set code -> set name for every set the record belongs to.
    fn resolve_sets(&self, raw: &Value, default_set: &str) -> IndexMap<String, String> {
        let def = &self.def;
        let mut sets = IndexMap::new();

        let mut segments: Vec<&str> = def
            .card_set_identifier
            .split(OBJECT_DELIMITER)
            .filter(|s| !s.is_empty())
            .collect();
        let field = segments.pop().unwrap_or_default();
        let source = segments
            .into_iter()
            .try_fold(raw, |value, segment| value.get(segment));
        let field_value = source.and_then(|s| s.get(field));
        let or_default = |code: String| {
            if code.is_empty() {
                default_set.to_string()
            } else {
                code
            }
        };

        if def.card_sets_in_list {
            let items = field_value.and_then(Value::as_array).map(Vec::as_slice).unwrap_or_default();
            for item in items {
                let (code, name) = if def.card_set_is_object {
                    (
                        scalar(item.get(&def.set_code_identifier)),
                        scalar(item.get(&def.set_name_identifier)),
                    )
                } else if item.is_object() {
                    (
                        scalar(item.get(field)),
                        scalar(item.get(&def.card_set_name_identifier)),
                    )
                } else {
                    (scalar(Some(item)), String::new())
                };
                let code = or_default(code);
                let name = if name.is_empty() { code.clone() } else { name };
                sets.insert(code, name);
            }
        } else if def.card_sets_in_list_is_csv {
            let codes = or_default(scalar(field_value));
            let names = scalar(source.and_then(|s| s.get(&def.card_set_name_identifier)));
            let names: Vec<&str> = names.split(',').map(str::trim).filter(|n| !n.is_empty()).collect();
            for (i, code) in codes.split(',').map(str::trim).filter(|c| !c.is_empty()).enumerate() {
                let name = names.get(i).copied().unwrap_or(code);
                sets.insert(code.to_string(), name.to_string());
            }
        } else if def.card_set_is_object {
            let code = or_default(scalar(field_value.and_then(|s| s.get(&def.set_code_identifier))));
            let name = scalar(field_value.and_then(|s| s.get(&def.set_name_identifier)));
            sets.insert(code, name);
        } else {
            let code = or_default(scalar(field_value));
            let name = scalar(source.and_then(|s| s.get(&def.card_set_name_identifier)));
            sets.insert(code, name);
        }

        if sets.is_empty() {
            sets.insert(default_set.to_string(), String::new());
        }
        sets
    }
}

/// String form of a scalar JSON value; empty for null, missing, or nested values.
pub(crate) fn scalar(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Number(number)) => number.to_string(),
        Some(Value::Bool(flag)) => flag.to_string(),
        _ => String::new(),
    }
}

/// Records under a dotted `path` (or the document itself): an array's items
/// or an object's values.
fn data_records<'a>(document: &'a Value, path: &str) -> Option<Vec<&'a Value>> {
    let container = path
        .split(OBJECT_DELIMITER)
        .filter(|s| !s.is_empty())
        .try_fold(document, |value, segment| value.get(segment))?;
    match container {
        Value::Array(items) => Some(items.iter().collect()),
        Value::Object(fields) => Some(fields.values().collect()),
        _ => None,
    }
}

/// Read `property` from `source` into `(key, raw)` pairs.
///
/// Object properties emit their own serialized text followed by one entry per
/// child under `key.child`.
fn extract_property(
    property: &PropertyDef,
    source: &Value,
    key: String,
    identifier: &str,
    out: &mut Vec<(String, String)>,
) {
    let field = source.get(&property.name);
    match property.property_type {
        PropertyType::ObjectEnumList => {
            let raw = list_items(field)
                .iter()
                .map(|item| scalar(item.get(identifier)))
                .collect::<Vec<_>>()
                .join(DELIMITER);
            out.push((key, raw));
        }
        PropertyType::ObjectList => {
            let items = list_items(field);
            let raw = items
                .iter()
                .map(|item| item.to_string())
                .collect::<Vec<_>>()
                .join(DELIMITER);
            out.push((key.clone(), raw));

            for child in &property.properties {
                let child_key = format!("{key}{OBJECT_DELIMITER}{}", child.name);
                if items.is_empty() {
                    extract_empty(child, child_key, out);
                    continue;
                }
                let mut per_item = Vec::new();
                for item in items {
                    extract_property(child, item, child_key.clone(), identifier, &mut per_item);
                }
                let mut joined: IndexMap<String, Vec<String>> = IndexMap::new();
                for (k, v) in per_item {
                    joined.entry(k).or_default().push(v.replace(DELIMITER, ", "));
                }
                out.extend(joined.into_iter().map(|(k, vs)| (k, vs.join(DELIMITER))));
            }
        }
        PropertyType::ObjectEnum => {
            out.push((key, scalar(field.and_then(|f| f.get(identifier)))));
        }
        PropertyType::Object => match field {
            Some(sub) if sub.as_object().is_some_and(|fields| !fields.is_empty()) => {
                out.push((key.clone(), sub.to_string()));
                for child in &property.properties {
                    let child_key = format!("{key}{OBJECT_DELIMITER}{}", child.name);
                    extract_property(child, sub, child_key, identifier, out);
                }
            }
            _ => extract_empty(property, key, out),
        },
        PropertyType::StringList | PropertyType::StringEnumList => {
            let raw = if property.delimiter.is_empty() {
                match field {
                    Some(Value::Array(items)) => items
                        .iter()
                        .map(|item| scalar(Some(item)))
                        .collect::<Vec<_>>()
                        .join(DELIMITER),
                    other => scalar(other),
                }
            } else {
                scalar(field)
                    .split(property.delimiter.as_str())
                    .filter(|token| !token.is_empty())
                    .collect::<Vec<_>>()
                    .join(DELIMITER)
            };
            out.push((key, raw));
        }
        PropertyType::String
        | PropertyType::EscapedString
        | PropertyType::StringEnum
        | PropertyType::Integer
        | PropertyType::Boolean => out.push((key, scalar(field))),
    }
}

/// Empty entries for `property` and all of its descendants.
fn extract_empty(property: &PropertyDef, key: String, out: &mut Vec<(String, String)>) {
    out.push((key.clone(), String::new()));
    for child in &property.properties {
        extract_empty(child, format!("{key}{OBJECT_DELIMITER}{}", child.name), out);
    }
}

fn list_items(field: Option<&Value>) -> &[Value] {
    field.and_then(Value::as_array).map(Vec::as_slice).unwrap_or_default()
}
