//! Prefix-search engine
//!
//! The `search` module holds the trie, its tokenization and expansion
//! pipelines, the result cache and the [`search::TrieSearch`] index.

#![warn(missing_docs)]

pub mod search;

pub use search::{Hit, TrieSearch, TrieSearchOptions};
