//! Tier 2: Multi-word phrases, multiple keys and identity

use crate::test_utils::*;
use serde_json::{json, Value};
use triesearch::{JsonTrieSearch, RecordId, TrieSearchOptions};

fn quick_brown_fox(min: usize) -> JsonTrieSearch {
    let mut ts = index_with(&["key"], TrieSearchOptions::new().min(min));
    ts.add_all(vec![
        json!({"key": "the quick brown fox"}),
        json!({"key": "the quick brown"}),
        json!({"key": "the quick fox"}),
        json!({"key": "the fox"}),
    ])
    .unwrap();
    ts
}

fn union_with_index_field(second_key: &str, records: Vec<Value>) -> JsonTrieSearch {
    let opts = TrieSearchOptions::new().min(2).index_field(field("ix"));
    let mut ts = index_with(&["key", second_key], opts);
    ts.add_all(records).unwrap();
    ts
}

// ============================================================================
// Words of one phrase are ANDed
// ============================================================================

#[test]
fn test_words_are_anded_with_min() {
    let mut ts = quick_brown_fox(2);

    assert_eq!(ts.get("the quick").len(), 3);
    assert_eq!(ts.get("the brown").len(), 2);
    assert_eq!(ts.get("the fox").len(), 3);
    assert_eq!(ts.get("fox brown").len(), 1);
    assert_eq!(ts.get("brown fox").len(), 1);
}

#[test]
fn test_short_words_are_ignored() {
    let mut ts = quick_brown_fox(2);

    assert_eq!(ts.get("brown f").len(), 2);
    assert_eq!(ts.get("br f").len(), 2);
    assert_eq!(ts.get("qui b c d e f g h").len(), 3);
}

#[test]
fn test_phrase_of_only_short_words_is_empty() {
    let mut ts = quick_brown_fox(3);
    assert!(ts.get("a b").is_empty());
    assert!(ts.get("").is_empty());
}

#[test]
fn test_and_across_single_key() {
    let mut ts = index(&["key"]);
    ts.add_all(vec![
        json!({"key": "guadalupe mountains national park"}),
        json!({"key": "guadalupe island"}),
        json!({"key": "city of guadalupe"}),
        json!({"key": "big bend national park"}),
    ])
    .unwrap();

    assert_eq!(
        texts(&ts.get("guadalupe park"), "key"),
        vec!["guadalupe mountains national park"]
    );
    assert_eq!(
        sorted_texts(&ts.get("national park"), "key"),
        vec!["big bend national park", "guadalupe mountains national park"]
    );
}

#[test]
fn test_and_across_multiple_keys() {
    let mut ts = index(&["name", "type"]);
    ts.add_all(vec![
        json!({"name": "guadalupe mountains", "type": "national park"}),
        json!({"name": "guadalupe", "type": "island"}),
        json!({"name": "city of guadalupe", "type": "city"}),
        json!({"name": "big bend", "type": "national park"}),
    ])
    .unwrap();

    assert_eq!(texts(&ts.get("guadalupe park"), "name"), vec!["guadalupe mountains"]);
    assert_eq!(
        sorted_texts(&ts.get("national park"), "name"),
        vec!["big bend", "guadalupe mountains"]
    );
}

// ============================================================================
// Index field
// ============================================================================

#[test]
fn test_index_field_unions_keys() {
    let mut ts = union_with_index_field(
        "key2",
        vec![
            json!({"key": "the quick brown fox", "key2": "jumped", "ix": 1}),
            json!({"key": "the quick brown", "key2": "jumped", "ix": 2}),
            json!({"key": "the quick fox", "key2": "brown", "ix": 3}),
            json!({"key": "the fox", "key2": "quick brown", "ix": 4}),
        ],
    );

    assert_eq!(ts.get("the quick").len(), 4);
    assert_eq!(ts.get("the brown").len(), 4);
    assert_eq!(ts.get("the fox").len(), 3);
    assert_eq!(ts.get("fox brown").len(), 3);
    assert_eq!(ts.get("brown fox").len(), 3);
    assert_eq!(ts.get("brown z").len(), 4);
    assert_eq!(ts.get("br f").len(), 4);
    assert_eq!(ts.get("jum b c d e f g h").len(), 2);
}

#[test]
fn test_deep_key_with_index_field() {
    let mut ts = union_with_index_field(
        "key2.key3",
        vec![
            json!({"key": "the quick brown fox", "key2": {"key3": "jumped"}, "ix": 1}),
            json!({"key": "the quick brown", "key2": {"key3": "jumped"}, "ix": 2}),
            json!({"key": "the quick fox", "key2": {"key3": "brown"}, "ix": 3}),
            json!({"key": "the fox", "key2": {"key3": "quick brown"}, "ix": 4}),
        ],
    );

    assert_eq!(ts.get("the quick").len(), 4);
    assert_eq!(ts.get("the brown").len(), 4);
    assert_eq!(ts.get("the fox").len(), 3);
    assert_eq!(ts.get("fox brown").len(), 3);
    assert_eq!(ts.get("brown fox").len(), 3);
    assert_eq!(ts.get("brown z").len(), 4);
    assert_eq!(ts.get("br f").len(), 4);
    assert_eq!(sorted_texts(&ts.get("jum b c d e f g h"), "ix"), vec!["1", "2"]);
}

#[test]
fn test_missing_index_field_is_an_error() {
    let opts = TrieSearchOptions::new().index_field(field("ix"));
    let mut ts = index_with(&["key"], opts);
    let err = ts.add(json!({"key": "no index here"})).unwrap_err();
    assert!(err.is_missing_value());
    assert!(ts.get("index").is_empty());
}

// ============================================================================
// Identity
// ============================================================================

#[test]
fn test_same_key_text_collapses() {
    let mut ts = index(&["key"]);
    ts.add(json!({"key": "twin", "n": 1})).unwrap();
    ts.add(json!({"key": "twin", "n": 2})).unwrap();
    assert_eq!(ts.get("twin").len(), 1);
}

#[test]
fn test_id_field_distinguishes_equal_keys() {
    let opts = TrieSearchOptions::new().id_field(field("n"));
    let mut ts = index_with(&["key"], opts);
    ts.add(json!({"key": "twin", "n": 1})).unwrap();
    ts.add(json!({"key": "twin", "n": 2})).unwrap();

    let hits = ts.get("twin");
    assert_eq!(sorted_texts(&hits, "n"), vec!["1", "2"]);
    assert_eq!(hits[0].id(), &RecordId::explicit("1"));
}

#[test]
fn test_id_function() {
    let opts = TrieSearchOptions::<Value>::new().id_function(|record: &Value| {
        record["sku"]
            .as_str()
            .map(str::to_uppercase)
            .ok_or_else(|| "record has no sku".into())
    });
    let mut ts = index_with(&["name"], opts);
    ts.add(json!({"name": "widget", "sku": "w-1"})).unwrap();

    let hits = ts.get("wid");
    assert_eq!(hits[0].id(), &RecordId::explicit("W-1"));

    let err = ts.add(json!({"name": "gadget"})).unwrap_err();
    assert!(err.is_configuration());
}

#[test]
fn test_explicit_id_skips_missing_key_fields() {
    let opts = TrieSearchOptions::new().id_field(field("id"));
    let mut ts = index_with(&["title", "subtitle"], opts);
    ts.add(json!({"id": "a", "title": "only a title"})).unwrap();
    assert_eq!(ts.get("title").len(), 1);
}

// ============================================================================
// Arrays of phrases
// ============================================================================

#[test]
fn test_array_of_phrases() {
    let mut ts = quick_brown_fox(1);

    assert_eq!(ts.get(["the", "brown", "quick"]).len(), 2);
    assert_eq!(ts.get(vec!["the brown", "quick"]).len(), 2);
    assert!(ts.get(vec!["the brown".to_string(), "zebra".to_string()]).is_empty());
}
