//! Shared helpers for the comprehensive suite

use serde_json::Value;
use triesearch::{JsonHit, JsonTrieSearch, KeyField, TrieSearch, TrieSearchOptions};

/// Install a test-writer subscriber once; later calls are no-ops
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing_subscriber::filter::LevelFilter::TRACE)
        .try_init();
}

/// Index over the given key-field paths
pub fn index(fields: &[&str]) -> JsonTrieSearch {
    index_with(fields, TrieSearchOptions::new())
}

/// Index over the given key-field paths with options
pub fn index_with(fields: &[&str], options: TrieSearchOptions<Value>) -> JsonTrieSearch {
    TrieSearch::parse(fields, options).expect("valid key fields")
}

/// Text of `field` for every hit, in result order
pub fn texts(hits: &[JsonHit], field: &str) -> Vec<String> {
    hits.iter()
        .map(|h| match &h[field] {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .collect()
}

/// Like [`texts`], sorted
pub fn sorted_texts(hits: &[JsonHit], field: &str) -> Vec<String> {
    let mut out = texts(hits, field);
    out.sort();
    out
}

/// Follow a chain of edge labels from the root
pub fn has_path(ts: &JsonTrieSearch, labels: &[&str]) -> bool {
    let mut node = ts.root();
    for label in labels {
        match node.child(label) {
            Some(child) => node = child,
            None => return false,
        }
    }
    true
}

/// Key field shorthand
pub fn field(name: &str) -> KeyField {
    KeyField::name(name)
}
