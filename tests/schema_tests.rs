//! Game definition and enum tests.
//!
//! These tests verify schema loading from JSON:
//! - Enum flag allocation and display
//! - Nested object properties and dotted paths
//! - Structural errors recorded on the game

use cgs_core::schema::{EnumDef, PropertyType};
use cgs_core::{CardGame, CardGameError};
use proptest::prelude::*;

const GAME: &str = r#"{
    "name": "Arcmage",
    "cardProperties": [
        {"name": "cost", "type": "integer"},
        {"name": "color", "type": "stringEnumList", "displayEmpty": "Colorless"},
        {"name": "stats.attack", "type": "integer"},
        {"name": "rarity", "type": "stringEnum"}
    ],
    "enums": [
        {"property": "color", "values": {"R": "Red", "U": "Blue", "G": "Green"}},
        {"property": "rarity", "values": {"0x10": "Rare", "0x20": "Mythic"}},
        {"property": "faction", "values": {"A": "Alliance"}}
    ]
}"#;

/// Test that declared symbols get flags in declaration order.
#[test]
fn test_enum_flags_follow_declaration_order() {
    let game = CardGame::from_json(GAME).unwrap();
    let color = game.enum_def("color").unwrap();

    assert_eq!(color.lookup("R"), Some(1));
    assert_eq!(color.lookup("U"), Some(2));
    assert_eq!(color.lookup("G"), Some(4));
    assert_eq!(color.lookup("Colorless"), Some(8));
    assert_eq!(color.empty_flag(), 8);

    assert_eq!(color.get_enum_from_property_value("R | G"), 5);
    assert_eq!(color.get_string_from_property_value("R | G"), "Red | Green");
    assert_eq!(color.get_string_from_lookup_flags(6), "Blue | Green");
}

/// Test that hex symbols use their literal value as the flag.
#[test]
fn test_hex_symbols() {
    let game = CardGame::from_json(GAME).unwrap();
    let rarity = game.enum_def("rarity").unwrap();

    assert_eq!(rarity.lookup("0x10"), Some(16));
    assert_eq!(rarity.lookup("0x20"), Some(32));
    assert_eq!(rarity.get_string_from_property_value("0x20"), "Mythic");
    assert_eq!(rarity.get_string_from_property_value("48"), "Rare | Mythic");
}

/// Test that dotted names become nested objects with addressable leaves.
#[test]
fn test_dotted_property_paths() {
    let game = CardGame::from_json(GAME).unwrap();

    let stats = game.resolve_property("stats").unwrap();
    assert_eq!(stats.property_type, PropertyType::Object);
    assert_eq!(
        game.resolve_property("stats.attack").map(|p| p.property_type),
        Some(PropertyType::Integer)
    );

    let paths: Vec<String> = game.flattened_properties().into_iter().map(|(path, _)| path).collect();
    assert_eq!(paths, vec!["cost", "color", "stats.attack", "rarity"]);
}

/// Test that schema problems are recorded instead of rejected.
#[test]
fn test_structural_errors_recorded() {
    let mut game = CardGame::from_json(GAME).unwrap();
    assert_eq!(game.errors().len(), 1);
    assert!(matches!(&game.errors()[0], CardGameError::UnknownEnumProperty(p) if p == "faction"));

    game.clear_errors();
    assert!(game.errors().is_empty());

    let game = CardGame::from_json(r#"{"cardProperties": [{"name": "kind", "type": "stringEnum"}]}"#).unwrap();
    assert!(matches!(&game.errors()[0], CardGameError::MissingEnumDef(p) if p == "kind"));
}

/// Test that a broken definition document is an error.
#[test]
fn test_invalid_document() {
    assert!(matches!(CardGame::from_json("{"), Err(CardGameError::Json(_))));
}

fn symbols_enum(count: usize) -> EnumDef {
    let mut enum_def = EnumDef::new("p", Default::default());
    for i in 0..count {
        enum_def = enum_def.with_value(format!("S{i}"), format!("Symbol {i}"));
    }
    enum_def.initialize_lookups();
    enum_def
}

proptest! {
    /// Symbols rendered from flags parse back to the same flags.
    #[test]
    fn prop_enum_symbols_round_trip(count in 1usize..12, mask in any::<i64>()) {
        let enum_def = symbols_enum(count);
        let flags = mask & ((1i64 << count) - 1);

        let symbols = enum_def.get_symbols_from_lookup_flags(flags);
        prop_assert_eq!(enum_def.get_enum_from_property_value(&symbols), flags);
    }

    /// When symbols display as themselves, display text parses back to the same flags.
    #[test]
    fn prop_enum_display_round_trip(count in 1usize..12, mask in any::<i64>()) {
        let mut enum_def = EnumDef::new("p", Default::default());
        for i in 0..count {
            enum_def = enum_def.with_value(format!("S{i}"), format!("S{i}"));
        }
        enum_def.initialize_lookups();
        let flags = mask & ((1i64 << count) - 1);

        let text = enum_def.get_string_from_lookup_flags(flags);
        prop_assert_eq!(enum_def.get_enum_from_property_value(&text), flags);
    }

    /// Display text names exactly the set bits.
    #[test]
    fn prop_enum_display_counts_bits(count in 1usize..12, mask in any::<i64>()) {
        let enum_def = symbols_enum(count);
        let flags = mask & ((1i64 << count) - 1);

        let text = enum_def.get_string_from_lookup_flags(flags);
        let shown = if text.is_empty() { 0 } else { text.split(" | ").count() };
        prop_assert_eq!(shown, flags.count_ones() as usize);
    }
}
