//! Tier 3: Diacritics, misspellings and custom splitting

use crate::test_utils::*;
use serde_json::json;
use triesearch::{ExpansionRule, JsonTrieSearch, SplitPattern, Splitter, TrieSearchOptions};

// ============================================================================
// Diacritics
// ============================================================================

fn international() -> JsonTrieSearch {
    let groups = [
        ("a", "åäàáâã"),
        ("e", "èéêë"),
        ("i", "ìíîï"),
        ("o", "òóôõö"),
        ("u", "ùúûü"),
        ("ae", "æ"),
    ];
    let mut ts = index(&["key"]);
    for (group, letters) in groups {
        ts.add_all(letters.chars().map(|c| json!({"key": c.to_string(), "group": group})))
            .unwrap();
    }
    ts
}

#[test]
fn test_plain_vowel_finds_accented_letters() {
    let mut ts = international();

    let hits = ts.get("a");
    assert_eq!(hits.len(), 7);
    assert!(texts(&hits, "group").iter().all(|g| g == "a" || g == "ae"));

    for (vowel, count) in [("e", 4), ("i", 4), ("o", 5), ("u", 4)] {
        let hits = ts.get(vowel);
        assert_eq!(hits.len(), count, "vowel {}", vowel);
        assert!(texts(&hits, "group").iter().all(|g| g == vowel));
    }
}

#[test]
fn test_ligature_expands_to_two_letters() {
    let mut ts = international();
    assert_eq!(texts(&ts.get("ae"), "key"), vec!["æ"]);
}

#[test]
fn test_swedish_sentence() {
    init_tracing();
    let mut ts = international();
    ts.add(json!({"key": "godis på sötdag är bra"})).unwrap();

    assert_eq!(ts.get("pa").len(), 1);
    assert_eq!(ts.get("sot").len(), 1);
    assert_eq!(ts.get("ar").len(), 1);
    assert_eq!(ts.get("sötdag").len(), 1);
}

#[test]
fn test_accented_key_found_by_plain_query() {
    let mut ts = index(&["key"]);
    ts.add(json!({"key": "Café Noir"})).unwrap();

    assert_eq!(ts.get("cafe").len(), 1);
    assert_eq!(ts.get("café noi").len(), 1);
}

#[test]
fn test_diacritics_disabled() {
    let opts = TrieSearchOptions::new().expand_rules(Vec::new());
    let mut ts = index_with(&["key"], opts);
    ts.add(json!({"key": "café"})).unwrap();

    assert_eq!(ts.get("café").len(), 1);
    assert!(ts.get("cafe").is_empty());
}

#[test]
fn test_custom_expansion_rule() {
    let opts = TrieSearchOptions::new().expand_rules(vec![ExpansionRule::new("ß", "ss")]);
    let mut ts = index_with(&["key"], opts);
    ts.add(json!({"key": "straße"})).unwrap();

    assert_eq!(ts.get("strasse").len(), 1);
    assert_eq!(ts.get("straß").len(), 1);
}

#[test]
fn test_map_does_not_expand_diacritics() {
    let mut ts = index(&["key"]);
    ts.map("crème", json!({"key": 1})).unwrap();

    assert_eq!(ts.get("crème").len(), 1);
    assert!(ts.get("creme").is_empty());
}

// ============================================================================
// Misspellings
// ============================================================================

#[test]
fn test_misspellings_are_found() {
    let opts = TrieSearchOptions::new().enable_misspellings(true);
    let mut ts = index_with(&["key"], opts);
    ts.add(json!({"key": "android"})).unwrap();

    for typo in ["andoid", "andriod", "androd", "android"] {
        assert_eq!(ts.get(typo).len(), 1, "typo {}", typo);
    }
    assert!(ts.get("ndroid").is_empty());
}

#[test]
fn test_misspellings_off_by_default() {
    let mut ts = index(&["key"]);
    ts.add(json!({"key": "android"})).unwrap();
    assert!(ts.get("andriod").is_empty());
}

// ============================================================================
// Custom splitting
// ============================================================================

fn camel_case() -> SplitPattern {
    SplitPattern::whitespace()
        .with_chars(['.', '-', '\'', '_'])
        .split_before_uppercase()
}

#[test]
fn test_map_with_camel_case_pattern() {
    let opts = TrieSearchOptions::new()
        .split_on(SplitPattern::whitespace().with_chars(['.', '-', '\'']).split_before_uppercase())
        .split_on_get(Splitter::Disabled);
    let mut ts = index_with(&["key"], opts);
    ts.map("This IsSome.Phrase-Whatever", json!({"key": 12345})).unwrap();

    for word in ["This", "Is", "Some", "Phrase", "Whatever"] {
        assert_eq!(ts.get(word).len(), 1, "word {}", word);
    }
}

#[test]
fn test_capital_letter_breaks() {
    let opts = TrieSearchOptions::new()
        .split_on(camel_case())
        .split_on_get(Splitter::Disabled)
        .insert_full_unsplit_key(true);
    let mut ts = index_with(&["key"], opts);
    ts.map("It'sOnlyA_Flesh Wound", json!({"key": 12345})).unwrap();
    ts.map("WhatIsYourFavoriteColor", json!({"key": 67890})).unwrap();

    for word in ["It", "s", "Only", "A", "Flesh", "Wound", "It'sOnlyA_Flesh Wound"] {
        assert_eq!(texts(&ts.get(word), "key")[0], "12345", "word {}", word);
    }
    for word in ["What", "Is", "Your", "Fav", "Favorite", "Color", "WhatIsYourFavoriteColor"] {
        assert_eq!(texts(&ts.get(word), "key")[0], "67890", "word {}", word);
    }
}

#[test]
fn test_capital_letter_breaks_with_whitespace_query() {
    let opts = TrieSearchOptions::new()
        .split_on(camel_case())
        .split_on_get(SplitPattern::whitespace());
    let mut ts = index_with(&["key"], opts);
    ts.map("WhatIsYourFavoriteColor", json!({"key": 67890})).unwrap();

    assert_eq!(texts(&ts.get("What Is"), "key"), vec!["67890"]);
    assert_eq!(texts(&ts.get("Color Favorite"), "key"), vec!["67890"]);
}

#[test]
fn test_camel_case_query_matches_camel_case_key() {
    let mut ts = index_with(&["key"], TrieSearchOptions::new().split_on(camel_case()));
    ts.add(json!({"key": "HelloWorld"})).unwrap();
    ts.add(json!({"key": "WhatIsYourFavoriteColor"})).unwrap();

    assert_eq!(texts(&ts.get("HelloWorld"), "key"), vec!["HelloWorld"]);
    assert_eq!(texts(&ts.get("World"), "key"), vec!["HelloWorld"]);
    assert_eq!(texts(&ts.get("FavColor"), "key"), vec!["WhatIsYourFavoriteColor"]);
    assert!(ts.get("HelloColor").is_empty());
}

#[test]
fn test_other_word_breaks() {
    let opts = TrieSearchOptions::new().split_on(SplitPattern::whitespace().with_chars(['/', '(', ')']));
    let mut ts = index_with(&["key"], opts);
    ts.map("Hello/World", json!({"key": 12345})).unwrap();
    ts.map("What's(Up)", json!({"key": 67890})).unwrap();

    assert_eq!(texts(&ts.search("Hello"), "key"), vec!["12345"]);
    assert_eq!(texts(&ts.search("Up"), "key"), vec!["67890"]);
    assert_eq!(texts(&ts.search("what's"), "key"), vec!["67890"]);
}

#[test]
fn test_case_sensitive_index() {
    let opts = TrieSearchOptions::new().ignore_case(false);
    let mut ts = index_with(&["key"], opts);
    ts.add(json!({"key": "Rust"})).unwrap();

    assert_eq!(ts.get("Ru").len(), 1);
    assert!(ts.get("ru").is_empty());
}
