//! In-memory prefix search
//!
//! `triesearch` maps the text of record fields, and the words inside it, to
//! the records themselves. Lookups match by prefix, AND the words of a phrase
//! together, and combine several phrases with a reducer. Accented characters
//! and (optionally) one-edit misspellings are indexed as alternate spellings
//! so plain or slightly wrong queries still find them.
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use triesearch::{KeyField, TrieSearch};
//!
//! let mut index = TrieSearch::new(vec![KeyField::name("title")]);
//! index.add(json!({"title": "Café Rouge"}))?;
//! index.add(json!({"title": "Cafeteria"}))?;
//!
//! assert_eq!(index.get("caf").len(), 2);
//! assert_eq!(index.get("cafe rou").len(), 1);
//! # Ok::<(), triesearch::Error>(())
//! ```

#![warn(missing_docs)]

mod types;

pub use types::*;
