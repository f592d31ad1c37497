//! Prefix search over in-memory records
//!
//! This module contains:
//! - `types`: hits and query phrases
//! - `tokenizer`: splitting keys and phrases into tokens
//! - `expand`: diacritic and misspelling expansion
//! - `identity`: record identity resolution
//! - `trie`: the character trie
//! - `cache`: bounded phrase result cache
//! - `reducer`: combining per-phrase results
//! - `options`: index configuration
//! - `index`: the `TrieSearch` index

mod cache;
pub mod expand;
mod identity;
mod index;
mod options;
mod reducer;
pub mod tokenizer;
mod trie;
mod types;

pub use cache::{CachedHits, ResultCache};
pub use expand::{default_expansion_rules, expand_diacritics, expand_misspellings, ExpansionRule};
pub use identity::{derive_id, resolve_id, IdentityFn, IdentitySource};
pub use index::{TrieSearch, OBJECT_KEY_FIELD, OBJECT_VALUE_FIELD};
pub use options::{
    IndexConfig, SharedReducer, TrieSearchOptions, DEFAULT_KEEP_ALL_KEY, DEFAULT_MAX_CACHE_SIZE,
};
pub use reducer::{reducer_fn, Reducer, UnionReducer};
pub use tokenizer::{SplitPattern, Splitter, DEFAULT_PUNCTUATION};
pub use trie::{key_to_edges, EdgeLabel, HitSet, Trie, TrieNode};
pub use types::{Hit, Phrases};
