//! The prefix-search index
//!
//! [`TrieSearch`] ties the pieces together:
//!
//! - `add` resolves the record's identity, expands diacritics in each
//!   key-field value and maps every expansion into the trie
//! - `map` splits a key into tokens, folds case, adds misspellings and inserts
//!   each token
//! - `get` looks up each phrase (AND across its words, through the cache)
//!   and folds the phrase results with a reducer
//! - `remove` re-derives the tokens of a phrase and drops records whose
//!   key fields contain it
//!
//! # Concurrency
//!
//! Queries maintain the cache, so every operation that touches the trie
//! takes `&mut self`. Wrap the index in a lock to share it across threads.

use super::cache::{CachedHits, ResultCache};
use super::expand::{expand_diacritics, expand_misspellings};
use super::identity::{derive_id, resolve_id};
use super::options::{TrieSearchOptions, DEFAULT_MAX_CACHE_SIZE};
use super::reducer::Reducer;
use super::trie::{key_to_edges, EdgeLabel, HitSet, Trie, TrieNode};
use super::types::{Hit, Phrases};
use rustc_hash::FxHashSet;
use std::sync::Arc;
use tracing::{debug, trace, warn};
use triesearch_core::{Error, KeyField, Record, RecordId, Result};

/// Key field holding the object key in records built by `add_from_object`
pub const OBJECT_KEY_FIELD: &str = "_key_";

/// Value field used by `add_from_object` when none is given
pub const OBJECT_VALUE_FIELD: &str = "value";

// joins the folded words of a phrase into its cache key
const WORD_SEPARATOR: &str = "\u{1f}";

// ============================================================================
// KeptRecords
// ============================================================================

/// Flat list of inserted records, de-duplicated by the keep-all key
struct KeptRecords<R> {
    records: Vec<Hit<R>>,
    keys: FxHashSet<String>,
}

impl<R: Record> KeptRecords<R> {
    fn new() -> Self {
        KeptRecords {
            records: Vec::new(),
            keys: FxHashSet::default(),
        }
    }

    fn add(&mut self, hit: &Hit<R>, key_field: &KeyField) {
        let key = hit
            .field_text(key_field)
            .unwrap_or_else(|| hit.id().to_string());
        if self.keys.insert(key) {
            self.records.push(hit.clone());
        }
    }

    fn retain<F: FnMut(&Hit<R>) -> bool>(&mut self, key_field: &KeyField, mut keep: F) {
        let keys = &mut self.keys;
        self.records.retain(|hit| {
            if keep(hit) {
                return true;
            }
            let key = hit
                .field_text(key_field)
                .unwrap_or_else(|| hit.id().to_string());
            keys.remove(&key);
            false
        });
    }
}

// ============================================================================
// TrieSearch
// ============================================================================

/// In-memory prefix-search index over records of type `R`
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use triesearch_core::KeyField;
/// use triesearch_engine::search::TrieSearch;
///
/// let mut trie = TrieSearch::new(vec![KeyField::name("someKey")]);
/// trie.add(json!({"someKey": "hello world"})).unwrap();
/// trie.add(json!({"someKey": "hello, I like trains"})).unwrap();
///
/// assert_eq!(trie.search("he").len(), 2);
/// assert_eq!(trie.search("her").len(), 0);
/// assert_eq!(trie.search("hel wor").len(), 1);
///
/// trie.remove("hello world");
/// assert_eq!(trie.search("world").len(), 0);
/// ```
pub struct TrieSearch<R> {
    trie: Trie<R>,
    key_fields: Vec<KeyField>,
    options: TrieSearchOptions<R>,
    cache: ResultCache<R>,
    kept: Option<KeptRecords<R>>,
}

impl<R: Record> TrieSearch<R> {
    /// Create an index over `key_fields` with default options
    pub fn new(key_fields: Vec<KeyField>) -> Self {
        Self::with_options(key_fields, TrieSearchOptions::default())
    }

    /// Create an index over `key_fields` with `options`
    pub fn with_options(key_fields: Vec<KeyField>, options: TrieSearchOptions<R>) -> Self {
        TrieSearch {
            trie: Trie::new(options.min),
            cache: ResultCache::new(cache_capacity(options.max_cache_size)),
            kept: options.keep_all.then(KeptRecords::new),
            key_fields,
            options,
        }
    }

    /// Parse `key_fields` and create an index with `options`
    pub fn parse<I, S>(key_fields: I, options: TrieSearchOptions<R>) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self::with_options(KeyField::parse_all(key_fields)?, options))
    }

    // ------------------------------------------------------------------
    // Insertion
    // ------------------------------------------------------------------

    /// Index `record` under the index's key fields
    pub fn add(&mut self, record: R) -> Result<()> {
        self.add_shared(Arc::new(record))
    }

    /// Index an already shared record under the index's key fields
    pub fn add_shared(&mut self, record: Arc<R>) -> Result<()> {
        let fields = self.key_fields.clone();
        self.insert_record(record, &fields)
    }

    /// Index `record` under `key_fields` instead of the index's own
    pub fn add_with_keys(&mut self, record: R, key_fields: &[KeyField]) -> Result<()> {
        self.insert_record(Arc::new(record), key_fields)
    }

    /// Index every record, stopping at the first failure
    ///
    /// Records before the failing one stay indexed.
    pub fn add_all<I>(&mut self, records: I) -> Result<()>
    where
        I: IntoIterator<Item = R>,
    {
        for record in records {
            self.add(record)?;
        }
        Ok(())
    }

    /// Index every record under `key_fields`, stopping at the first failure
    pub fn add_all_with_keys<I>(&mut self, records: I, key_fields: &[KeyField]) -> Result<()>
    where
        I: IntoIterator<Item = R>,
    {
        for record in records {
            self.add_with_keys(record, key_fields)?;
        }
        Ok(())
    }

    fn insert_record(&mut self, record: Arc<R>, fields: &[KeyField]) -> Result<()> {
        if !fields.is_empty() && !record.is_addressable() {
            return Err(Error::configuration(
                "record cannot be field-addressed; index it with map()",
            ));
        }
        let id = resolve_id(
            &*record,
            self.options.id_field_or_function.as_ref(),
            self.options.index_field.as_ref(),
            fields,
        )?;

        let values: Vec<String> = if fields.is_empty() {
            vec![record.full_text()]
        } else {
            fields
                .iter()
                .filter_map(|field| match record.field_text(field) {
                    Some(text) if text.is_empty() => {
                        warn!(target: "triesearch::index", field = %field, id = %id, "empty key field skipped");
                        None
                    }
                    Some(text) => Some(text),
                    None => {
                        trace!(target: "triesearch::index", field = %field, id = %id, "no text for key field");
                        None
                    }
                })
                .collect()
        };

        self.invalidate();
        let hit = Hit::new(id, record);
        for value in &values {
            for expanded in expand_diacritics(value, &self.options.expand_rules) {
                self.map_hit(&expanded, &hit);
            }
        }
        self.keep(&hit);
        Ok(())
    }

    /// Index `record` under the single key string `key`
    ///
    /// The key is split, case-folded and misspelling-expanded per the
    /// options; diacritic expansion is left to `add`. The record's identity
    /// is resolved as for `add`; when no explicit identity is configured and
    /// the record lacks the index's key fields, it is identified by its full
    /// text instead.
    pub fn map(&mut self, key: &str, record: R) -> Result<()> {
        let record = Arc::new(record);
        let id = match self.id_of(&record) {
            Err(err) if err.is_missing_value() && self.options.id_field_or_function.is_none() => {
                trace!(target: "triesearch::index", key, "mapped record lacks key fields; using full text identity");
                derive_id(&*record, &[])?
            }
            resolved => resolved?,
        };
        self.invalidate();
        let hit = Hit::new(id, record);
        self.map_hit(key, &hit);
        self.keep(&hit);
        Ok(())
    }

    fn map_hit(&mut self, key: &str, hit: &Hit<R>) {
        let tokens = self
            .options
            .split_on
            .tokens(key, self.options.insert_full_unsplit_key);
        for token in self.index_tokens(tokens) {
            self.trie.insert(&token, hit.clone());
        }
    }

    /// Case-fold `tokens` and add misspellings
    fn index_tokens(&self, tokens: Vec<String>) -> Vec<String> {
        let mut out = Vec::with_capacity(tokens.len());
        for token in tokens {
            let token = if self.options.ignore_case {
                token.to_lowercase()
            } else {
                token
            };
            if self.options.enable_misspellings {
                out.extend(expand_misspellings(vec![token]));
            } else {
                out.push(token);
            }
        }
        out
    }

    fn keep(&mut self, hit: &Hit<R>) {
        if let Some(kept) = &mut self.kept {
            kept.add(hit, &self.options.keep_all_key);
        }
    }

    /// Bulk-load a plain object of key → value pairs
    ///
    /// Each pair becomes a record `{ "_key_": key, <value_field>: value }`
    /// and `_key_` is added to the index's key fields.
    pub fn add_from_object(
        &mut self,
        object: &serde_json::Map<String, serde_json::Value>,
        value_field: Option<&str>,
    ) -> Result<()>
    where
        R: From<serde_json::Value>,
    {
        let key_field = KeyField::name(OBJECT_KEY_FIELD);
        if !self.key_fields.contains(&key_field) {
            self.key_fields.push(key_field);
        }
        let value_field = value_field.unwrap_or(OBJECT_VALUE_FIELD);

        self.invalidate();
        for (key, value) in object {
            let mut record = serde_json::Map::new();
            record.insert(OBJECT_KEY_FIELD.to_string(), serde_json::Value::String(key.clone()));
            record.insert(value_field.to_string(), value.clone());
            self.add(R::from(serde_json::Value::Object(record)))?;
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Removal
    // ------------------------------------------------------------------

    /// Remove records whose key fields contain `phrase`
    ///
    /// Returns the number of bucket entries removed.
    pub fn remove(&mut self, phrase: &str) -> usize {
        let fields = self.key_fields.clone();
        self.remove_in(phrase, &fields)
    }

    /// Remove records whose `key_fields` contain `phrase`
    ///
    /// Only the tokens derived from `phrase` are touched: diacritic
    /// expansions, split words, the unsplit phrase when configured, and
    /// misspellings when enabled. A record is dropped from those tokens when
    /// one of `key_fields` (the full text, when empty) contains `phrase`,
    /// compared case-insensitively if the index ignores case.
    pub fn remove_in(&mut self, phrase: &str, key_fields: &[KeyField]) -> usize {
        self.invalidate();

        let ignore_case = self.options.ignore_case;
        let needle = fold(phrase, ignore_case);

        let mut tokens = Vec::new();
        for expanded in expand_diacritics(phrase, &self.options.expand_rules) {
            let split = self
                .options
                .split_on
                .tokens(&expanded, self.options.insert_full_unsplit_key);
            tokens.extend(self.index_tokens(split));
        }
        let mut seen = FxHashSet::default();
        tokens.retain(|t| seen.insert(t.clone()));

        let matches = |hit: &Hit<R>| record_contains(&**hit.record(), key_fields, &needle, ignore_case);

        let mut removed = 0;
        for token in &tokens {
            removed += self.trie.remove_matching(token, matches);
        }
        if let Some(kept) = &mut self.kept {
            kept.retain(&self.options.keep_all_key, |hit| !matches(hit));
        }

        debug!(target: "triesearch::index", phrase, removed, size = self.trie.size(), "removed phrase");
        removed
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Records matching `phrases`, combined with the default reducer
    pub fn get<'p>(&mut self, phrases: impl Into<Phrases<'p>>) -> Vec<Hit<R>> {
        self.run_query(phrases.into(), None, None)
    }

    /// Like [`get`](Self::get), with at most `limit` matches per phrase
    pub fn get_limited<'p>(&mut self, phrases: impl Into<Phrases<'p>>, limit: usize) -> Vec<Hit<R>> {
        self.run_query(phrases.into(), None, Some(limit))
    }

    /// Records matching `phrases`, combined with `reducer`
    ///
    /// A caller-supplied reducer requires an explicit identity
    /// (`id_field_or_function`); without one this fails before any lookup.
    pub fn get_with<'p>(
        &mut self,
        phrases: impl Into<Phrases<'p>>,
        reducer: Option<&dyn Reducer<R>>,
        limit: Option<usize>,
    ) -> Result<Vec<Hit<R>>> {
        if reducer.is_some() && self.options.id_field_or_function.is_none() {
            return Err(Error::configuration(
                "a custom reducer requires id_field_or_function to be set",
            ));
        }
        Ok(self.run_query(phrases.into(), reducer, limit))
    }

    /// Alias for [`get`](Self::get)
    pub fn search<'p>(&mut self, phrases: impl Into<Phrases<'p>>) -> Vec<Hit<R>> {
        self.get(phrases)
    }

    /// Alias for [`get_with`](Self::get_with)
    pub fn search_with<'p>(
        &mut self,
        phrases: impl Into<Phrases<'p>>,
        reducer: Option<&dyn Reducer<R>>,
        limit: Option<usize>,
    ) -> Result<Vec<Hit<R>>> {
        self.get_with(phrases, reducer, limit)
    }

    fn run_query(
        &mut self,
        phrases: Phrases<'_>,
        reducer: Option<&dyn Reducer<R>>,
        limit: Option<usize>,
    ) -> Vec<Hit<R>> {
        let per_phrase: Vec<(&str, CachedHits<R>)> = phrases
            .iter()
            .map(|phrase| (phrase, self.lookup(phrase, limit)))
            .collect();

        let default = Arc::clone(&self.options.default_reducer);
        let reducer: &dyn Reducer<R> = match reducer {
            Some(r) => r,
            None => default.as_ref(),
        };

        let index: &Self = self;
        let mut accumulator = None;
        for (phrase, matches) in &per_phrase {
            accumulator = Some(reducer.combine(accumulator, phrase, matches, index));
        }
        accumulator.unwrap_or_default()
    }

    /// Matches for a single phrase
    ///
    /// The phrase is split with the query splitter before each word is
    /// case-folded, mirroring how keys are tokenized at insertion. Words are
    /// ANDed by identity. With caching enabled, repeating the call without an
    /// intervening mutation returns the same shared list.
    pub fn lookup(&mut self, phrase: &str, limit: Option<usize>) -> CachedHits<R> {
        let ignore_case = self.options.ignore_case;
        let words: Vec<String> = self
            .options
            .query_splitter()
            .split(phrase)
            .into_iter()
            .map(|word| fold(word, ignore_case))
            .collect();
        let key = words.join(WORD_SEPARATOR);

        if self.options.cache {
            if let Some(hits) = self.cache.get(&key, limit) {
                trace!(target: "triesearch::cache", phrase, "cache hit");
                return hits;
            }
        }

        let hits = Arc::new(self.match_words(&words, limit));
        if self.options.cache {
            trace!(target: "triesearch::cache", phrase, "cache miss");
            self.cache.insert(key, limit, Arc::clone(&hits));
        }
        hits
    }

    fn match_words(&self, words: &[String], limit: Option<usize>) -> Vec<Hit<R>> {
        let mut result: Option<Vec<Hit<R>>> = None;
        for word in words {
            if word.chars().count() < self.options.min {
                trace!(target: "triesearch::index", word = %word, min = self.options.min, "skipping short word");
                continue;
            }

            let mut found = HitSet::new();
            if let Some(node) = self.trie.find(word) {
                node.collect(limit, &mut found);
            }

            result = Some(match result {
                None => found.into_vec(),
                Some(mut previous) => {
                    previous.retain(|hit| found.contains(hit.id()));
                    previous
                }
            });
        }
        result.unwrap_or_default()
    }

    // ------------------------------------------------------------------
    // Maintenance & introspection
    // ------------------------------------------------------------------

    /// Discard every node, the flat record list and the cache
    pub fn reset(&mut self) {
        self.trie.clear();
        self.cache.clear();
        if let Some(kept) = &mut self.kept {
            *kept = KeptRecords::new();
        }
        debug!(target: "triesearch::index", "index reset");
    }

    /// Drop every cached result
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    fn invalidate(&mut self) {
        if !self.cache.is_empty() {
            trace!(target: "triesearch::cache", entries = self.cache.len(), "invalidating cache");
        }
        self.cache.clear();
    }

    /// Identity of `record` as this index resolves it
    pub fn id_of(&self, record: &R) -> Result<RecordId> {
        if record.is_addressable() || self.options.id_field_or_function.is_some() {
            resolve_id(
                record,
                self.options.id_field_or_function.as_ref(),
                self.options.index_field.as_ref(),
                &self.key_fields,
            )
        } else {
            derive_id(record, &[])
        }
    }

    /// Number of edges in the trie
    pub fn size(&self) -> usize {
        self.trie.size()
    }

    /// The key fields indexed by `add`
    pub fn key_fields(&self) -> &[KeyField] {
        &self.key_fields
    }

    /// The active options
    pub fn options(&self) -> &TrieSearchOptions<R> {
        &self.options
    }

    /// Number of cached phrase results
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Edge labels `key` maps to under the configured `min`
    pub fn key_to_edges(&self, key: &str) -> Vec<EdgeLabel> {
        key_to_edges(key, self.options.min)
    }

    /// Flat list of inserted records, when `keep_all` is set
    pub fn all_records(&self) -> Option<&[Hit<R>]> {
        self.kept.as_ref().map(|k| k.records.as_slice())
    }

    /// Read-only access to the root node
    pub fn root(&self) -> &TrieNode<R> {
        self.trie.root()
    }
}

fn cache_capacity(max_cache_size: usize) -> usize {
    if max_cache_size == 0 {
        DEFAULT_MAX_CACHE_SIZE
    } else {
        max_cache_size
    }
}

fn fold(text: &str, ignore_case: bool) -> String {
    if ignore_case {
        text.to_lowercase()
    } else {
        text.to_string()
    }
}

fn record_contains<R: Record>(record: &R, fields: &[KeyField], needle: &str, ignore_case: bool) -> bool {
    if fields.is_empty() {
        return fold(&record.full_text(), ignore_case).contains(needle);
    }
    fields.iter().any(|field| {
        record
            .field_text(field)
            .map_or(false, |text| fold(&text, ignore_case).contains(needle))
    })
}
