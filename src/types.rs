//! Public types for the triesearch API.
//!
//! This module re-exports types from internal crates with a clean public interface.

// ============================================================================
// Public API types - these are what users should use
// ============================================================================

// Errors
pub use triesearch_core::{BoxError, Error, Result};

// Records and their identity
pub use triesearch_core::{FieldSegment, KeyField, PathParseError, Record, RecordId};

// The index and its configuration
pub use triesearch_engine::search::{
    IdentitySource, IndexConfig, TrieSearch, TrieSearchOptions, DEFAULT_MAX_CACHE_SIZE,
};

// Query inputs and results
pub use triesearch_engine::search::{reducer_fn, Hit, Phrases, Reducer, UnionReducer};

// Tokenization and expansion
pub use triesearch_engine::search::{
    default_expansion_rules, ExpansionRule, SplitPattern, Splitter, DEFAULT_PUNCTUATION,
};

// Trie introspection
pub use triesearch_engine::search::{EdgeLabel, TrieNode};

// ============================================================================
// Convenience aliases
// ============================================================================

/// An index over JSON documents
pub type JsonTrieSearch = TrieSearch<serde_json::Value>;

/// A hit on a JSON document
pub type JsonHit = Hit<serde_json::Value>;
