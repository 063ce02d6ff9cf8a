//! Card and set ingestion tests.
//!
//! These tests verify loading whole documents:
//! - Card arrays, keyed objects and nested data paths
//! - Set membership in its scalar, list, CSV and object forms
//! - Reprint detection and per-set card ids

use cgs_core::{CardGame, CardGameError, GameDef, IngestReport, DEFAULT_SET_CODE};
use serde_json::json;

fn game(json: &str) -> CardGame {
    CardGame::from_json(json).unwrap()
}

/// Test loading a card array nested under a data path.
#[test]
fn test_load_nested_card_array() {
    let mut game = game(r#"{
        "name": "Nested",
        "cardDataIdentifier": "data.cards",
        "cardProperties": [{"name": "cost", "type": "integer"}]
    }"#);

    let report = game.load_cards_json(
        r#"{"data": {"cards": [
            {"id": "1", "name": "Fireball", "cost": 4, "set": "CORE"},
            {"name": "No Id"},
            {"id": "2", "name": "Ice Bolt", "cost": "2", "set": "CORE"}
        ]}}"#,
    );

    assert_eq!(report, IngestReport { cards: 2, skipped: 1, sets: 1 });
    assert_eq!(game.card("2").unwrap().get_int("cost"), 2);
    assert_eq!(game.set("CORE").map(|s| s.name.as_str()), Some("CORE"));
}

/// Test loading cards keyed by id in an object.
#[test]
fn test_load_keyed_object() {
    let mut game = CardGame::new(GameDef::new("Keyed"));
    let report = game.load_cards_value(&json!({
        "a": {"id": "a", "name": "Alpha"},
        "b": {"id": "b", "name": "Beta"}
    }));

    assert_eq!(report.cards, 2);
    let ids: Vec<_> = game.cards().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b"]);
    assert_eq!(game.card("a").unwrap().set_code, DEFAULT_SET_CODE);
}

/// Test that a missing data path is recorded on the game.
#[test]
fn test_missing_data_recorded() {
    let mut game = game(r#"{"cardDataIdentifier": "cards"}"#);
    let report = game.load_cards_value(&json!({"other": []}));

    assert_eq!(report, IngestReport::default());
    assert!(matches!(&game.errors()[0], CardGameError::MissingData(p) if p == "cards"));

    game.load_cards_json("not json");
    assert!(matches!(game.errors()[1], CardGameError::Json(_)));
}

/// Test that a card in several sets becomes one card per set.
#[test]
fn test_sets_in_list_suffix_ids() {
    let mut game = game(r#"{"cardSetsInList": true, "cardSetIdentifier": "printings"}"#);
    let cards = game.ingest_card(&json!({"id": "7", "name": "Bolt", "printings": ["LEA", "M10"]}));

    let ids: Vec<_> = cards.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["7_LEA", "7_M10"]);
    assert!(!cards[0].is_reprint);
    assert!(cards[1].is_reprint);

    let cards = game.ingest_card(&json!({"id": "8", "name": "Giant", "printings": ["LEA"]}));
    assert_eq!(cards[0].id, "8");
}

/// Test set lists holding set objects.
#[test]
fn test_set_objects_in_list() {
    let mut game = game(r#"{"cardSetsInList": true, "cardSetIsObject": true, "cardSetIdentifier": "sets"}"#);
    let cards = game.ingest_card(&json!({
        "id": "1",
        "name": "Bolt",
        "sets": [{"code": "A", "name": "Alpha"}, {"code": "B", "name": "Beta"}]
    }));

    assert_eq!(cards.len(), 2);
    assert_eq!(game.set("B").map(|s| s.name.as_str()), Some("Beta"));
}

/// Test comma-separated set codes with matching names.
#[test]
fn test_csv_sets() {
    let mut game = game(r#"{"cardSetsInListIsCsv": true}"#);
    let cards = game.ingest_card(&json!({"id": "1", "name": "Bolt", "set": "A, B", "setname": "Alpha, Beta"}));

    let codes: Vec<_> = cards.iter().map(|c| c.set_code.as_str()).collect();
    assert_eq!(codes, vec!["A", "B"]);
    assert_eq!(game.set("A").map(|s| s.name.as_str()), Some("Alpha"));
}

/// Test a single set object under a dotted identifier.
#[test]
fn test_set_object_at_dotted_path() {
    let mut game = game(r#"{"cardSetIsObject": true, "cardSetIdentifier": "print.set"}"#);
    let cards = game.ingest_card(&json!({
        "id": "1",
        "name": "Bolt",
        "print": {"set": {"code": "M10", "name": "Magic 2010"}}
    }));

    assert_eq!(cards[0].set_code, "M10");
    assert_eq!(game.set("M10").map(|s| s.name.as_str()), Some("Magic 2010"));
}

/// Test that later cards sharing a name are reprints only with unique names.
#[test]
fn test_reprints() {
    let mut game = CardGame::new(GameDef::new("Unique"));
    game.ingest_card(&json!({"id": "1", "name": "Bolt", "set": "A"}));
    game.ingest_card(&json!({"id": "2", "name": "Bolt", "set": "B"}));
    assert!(!game.card("1").unwrap().is_reprint);
    assert!(game.card("2").unwrap().is_reprint);

    let mut game = CardGame::new(GameDef::new("Shared").with_non_unique_names());
    game.ingest_card(&json!({"id": "1", "name": "Bolt"}));
    game.ingest_card(&json!({"id": "2", "name": "Bolt"}));
    assert!(!game.card("2").unwrap().is_reprint);
}

/// Test loading a sets document with nested cards.
#[test]
fn test_load_sets_with_cards() {
    let mut game = CardGame::new(GameDef::new("Sets"));
    let report = game.load_sets_json(
        r#"[
            {"code": "LEA", "name": "Alpha", "cards": [{"id": "1", "name": "Bolt"}, {"id": "2", "name": "Giant"}]},
            {"name": "No Code"},
            {"code": "LEB", "name": "Beta"}
        ]"#,
    );

    assert_eq!(report, IngestReport { cards: 2, skipped: 1, sets: 2 });
    assert_eq!(game.card("2").unwrap().set_code, "LEA");
    assert_eq!(game.set("LEA").map(|s| s.name.as_str()), Some("Alpha"));

    let codes: Vec<_> = game.sets().map(|s| s.code.as_str()).collect();
    assert_eq!(codes, vec!["LEA", "LEB"]);
}

/// Test that reloading a card replaces it in place.
#[test]
fn test_reload_replaces_card() {
    let mut game = CardGame::new(GameDef::new("Reload"));
    game.ingest_card(&json!({"id": "1", "name": "Bolt"}));
    game.ingest_card(&json!({"id": "2", "name": "Giant"}));
    game.ingest_card(&json!({"id": "1", "name": "Lightning Bolt"}));

    let names: Vec<_> = game.cards().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Lightning Bolt", "Giant"]);
    assert!(game.remove_card("1").is_some());
    assert_eq!(game.card_count(), 1);
}
