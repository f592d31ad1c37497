//! Index configuration
//!
//! [`TrieSearchOptions`] holds every knob, including the ones that carry code
//! (splitters, identity functions, reducers). [`IndexConfig`] is the
//! plain-data subset that can be loaded from JSON and applied on top of the
//! defaults.

use super::expand::{default_expansion_rules, ExpansionRule};
use super::identity::IdentitySource;
use super::reducer::{Reducer, UnionReducer};
use super::tokenizer::Splitter;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use triesearch_core::{BoxError, Error, KeyField, Result};

/// Default result cache capacity
pub const DEFAULT_MAX_CACHE_SIZE: usize = 64;

/// Default field de-duplicating the flat record list
pub const DEFAULT_KEEP_ALL_KEY: &str = "id";

/// Shared reducer used when a query does not pass one
pub type SharedReducer<R> = Arc<dyn Reducer<R> + Send + Sync>;

/// Options for building a [`TrieSearch`](super::TrieSearch)
///
/// Use the builder pattern to configure options:
///
/// ```
/// use triesearch_engine::search::{Splitter, TrieSearchOptions};
///
/// let opts = TrieSearchOptions::<serde_json::Value>::new()
///     .min(2)
///     .split_on(Splitter::Disabled)
///     .enable_misspellings(true);
/// assert_eq!(opts.min, 2);
/// ```
pub struct TrieSearchOptions<R> {
    /// Lowercase keys at insertion and phrases at query time
    pub ignore_case: bool,
    /// Memoize phrase lookups
    pub cache: bool,
    /// Cache capacity; `0` means [`DEFAULT_MAX_CACHE_SIZE`]
    pub max_cache_size: usize,
    /// Splitter used at insertion
    pub split_on: Splitter,
    /// Splitter used at query time; `None` reuses `split_on`
    pub split_on_get: Option<Splitter>,
    /// Minimum token length, also the size of the combined first edge
    pub min: usize,
    /// Keep a flat list of every inserted record
    pub keep_all: bool,
    /// Field de-duplicating the flat list
    pub keep_all_key: KeyField,
    /// Explicit record identity
    pub id_field_or_function: Option<IdentitySource<R>>,
    /// Diacritic expansion table; empty disables expansion
    pub expand_rules: Vec<ExpansionRule>,
    /// Index the unsplit key alongside its split tokens
    pub insert_full_unsplit_key: bool,
    /// Index one-edit misspellings of every token
    pub enable_misspellings: bool,
    /// Derive implicit identities from this field only
    pub index_field: Option<KeyField>,
    /// Reducer used when a query does not pass one
    pub default_reducer: SharedReducer<R>,
}

impl<R> TrieSearchOptions<R> {
    /// Create options with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set case folding
    pub fn ignore_case(mut self, ignore_case: bool) -> Self {
        self.ignore_case = ignore_case;
        self
    }

    /// Turn the result cache on or off
    pub fn cache(mut self, cache: bool) -> Self {
        self.cache = cache;
        self
    }

    /// Set the cache capacity
    ///
    /// `0` selects [`DEFAULT_MAX_CACHE_SIZE`]; use `cache(false)` to turn
    /// caching off.
    pub fn max_cache_size(mut self, size: usize) -> Self {
        self.max_cache_size = size;
        self
    }

    /// Set the insertion splitter
    pub fn split_on(mut self, splitter: impl Into<Splitter>) -> Self {
        self.split_on = splitter.into();
        self
    }

    /// Set a separate query splitter
    pub fn split_on_get(mut self, splitter: impl Into<Splitter>) -> Self {
        self.split_on_get = Some(splitter.into());
        self
    }

    /// Set the minimum token length
    pub fn min(mut self, min: usize) -> Self {
        self.min = min;
        self
    }

    /// Keep a flat list of records, de-duplicated by `key`
    pub fn keep_all(mut self, key: KeyField) -> Self {
        self.keep_all = true;
        self.keep_all_key = key;
        self
    }

    /// Use a field as the explicit record identity
    pub fn id_field(mut self, field: KeyField) -> Self {
        self.id_field_or_function = Some(IdentitySource::Field(field));
        self
    }

    /// Use a function as the explicit record identity
    pub fn id_function<F>(mut self, f: F) -> Self
    where
        F: Fn(&R) -> std::result::Result<String, BoxError> + Send + Sync + 'static,
    {
        self.id_field_or_function = Some(IdentitySource::function(f));
        self
    }

    /// Replace the diacritic expansion table
    pub fn expand_rules(mut self, rules: Vec<ExpansionRule>) -> Self {
        self.expand_rules = rules;
        self
    }

    /// Also index the unsplit key
    pub fn insert_full_unsplit_key(mut self, enabled: bool) -> Self {
        self.insert_full_unsplit_key = enabled;
        self
    }

    /// Index one-edit misspellings
    pub fn enable_misspellings(mut self, enabled: bool) -> Self {
        self.enable_misspellings = enabled;
        self
    }

    /// Derive implicit identities from `field` only
    pub fn index_field(mut self, field: KeyField) -> Self {
        self.index_field = Some(field);
        self
    }

    /// Set the reducer used when a query does not pass one
    pub fn default_reducer<T>(mut self, reducer: T) -> Self
    where
        T: Reducer<R> + Send + Sync + 'static,
    {
        self.default_reducer = Arc::new(reducer);
        self
    }

    /// The splitter queries use
    pub fn query_splitter(&self) -> &Splitter {
        self.split_on_get.as_ref().unwrap_or(&self.split_on)
    }

    /// Apply a plain-data config on top of the defaults
    pub fn from_config(config: &IndexConfig) -> Result<Self> {
        let mut opts = Self::default()
            .ignore_case(config.ignore_case)
            .cache(config.cache)
            .max_cache_size(config.max_cache_size)
            .min(config.min)
            .insert_full_unsplit_key(config.insert_full_unsplit_key)
            .enable_misspellings(config.enable_misspellings);

        opts.keep_all = config.keep_all;
        opts.keep_all_key = config.keep_all_key.parse()?;
        if !config.split {
            opts.split_on = Splitter::Disabled;
        }
        if !config.expand_diacritics {
            opts.expand_rules.clear();
        }
        if let Some(field) = &config.index_field {
            opts.index_field = Some(field.parse()?);
        }
        if let Some(field) = &config.id_field {
            opts.id_field_or_function = Some(IdentitySource::Field(field.parse()?));
        }
        Ok(opts)
    }
}

impl<R> Default for TrieSearchOptions<R> {
    fn default() -> Self {
        Self {
            ignore_case: true,
            cache: true,
            max_cache_size: DEFAULT_MAX_CACHE_SIZE,
            split_on: Splitter::default(),
            split_on_get: None,
            min: 1,
            keep_all: false,
            keep_all_key: KeyField::name(DEFAULT_KEEP_ALL_KEY),
            id_field_or_function: None,
            expand_rules: default_expansion_rules().to_vec(),
            insert_full_unsplit_key: false,
            enable_misspellings: false,
            index_field: None,
            default_reducer: Arc::new(UnionReducer),
        }
    }
}

impl<R> Clone for TrieSearchOptions<R> {
    fn clone(&self) -> Self {
        Self {
            ignore_case: self.ignore_case,
            cache: self.cache,
            max_cache_size: self.max_cache_size,
            split_on: self.split_on.clone(),
            split_on_get: self.split_on_get.clone(),
            min: self.min,
            keep_all: self.keep_all,
            keep_all_key: self.keep_all_key.clone(),
            id_field_or_function: self.id_field_or_function.clone(),
            expand_rules: self.expand_rules.clone(),
            insert_full_unsplit_key: self.insert_full_unsplit_key,
            enable_misspellings: self.enable_misspellings,
            index_field: self.index_field.clone(),
            default_reducer: Arc::clone(&self.default_reducer),
        }
    }
}

impl<R> fmt::Debug for TrieSearchOptions<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrieSearchOptions")
            .field("ignore_case", &self.ignore_case)
            .field("cache", &self.cache)
            .field("max_cache_size", &self.max_cache_size)
            .field("split_on", &self.split_on)
            .field("split_on_get", &self.split_on_get)
            .field("min", &self.min)
            .field("keep_all", &self.keep_all)
            .field("keep_all_key", &self.keep_all_key)
            .field("id_field_or_function", &self.id_field_or_function)
            .field("expand_rules", &self.expand_rules.len())
            .field("insert_full_unsplit_key", &self.insert_full_unsplit_key)
            .field("enable_misspellings", &self.enable_misspellings)
            .field("index_field", &self.index_field)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// IndexConfig
// ============================================================================

/// Serializable index settings
///
/// Missing fields take their default values.
///
/// ```
/// use triesearch_engine::search::IndexConfig;
///
/// let config = IndexConfig::from_json(r#"{ "min": 2, "cache": false }"#).unwrap();
/// assert_eq!(config.min, 2);
/// assert!(!config.cache);
/// assert!(config.ignore_case);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// See [`TrieSearchOptions::ignore_case`]
    pub ignore_case: bool,
    /// See [`TrieSearchOptions::cache`]
    pub cache: bool,
    /// See [`TrieSearchOptions::max_cache_size`]
    pub max_cache_size: usize,
    /// `false` disables splitting at insertion and query time
    pub split: bool,
    /// See [`TrieSearchOptions::min`]
    pub min: usize,
    /// See [`TrieSearchOptions::keep_all`]
    pub keep_all: bool,
    /// Key-field path de-duplicating the flat list
    pub keep_all_key: String,
    /// Key-field path used as the explicit identity
    pub id_field: Option<String>,
    /// `false` disables the default diacritic table
    pub expand_diacritics: bool,
    /// See [`TrieSearchOptions::insert_full_unsplit_key`]
    pub insert_full_unsplit_key: bool,
    /// See [`TrieSearchOptions::enable_misspellings`]
    pub enable_misspellings: bool,
    /// Key-field path restricting implicit identities
    pub index_field: Option<String>,
}

impl IndexConfig {
    /// Parse from JSON text
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text)
            .map_err(|e| Error::configuration_with_source("invalid index config", Box::new(e)))
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            ignore_case: true,
            cache: true,
            max_cache_size: DEFAULT_MAX_CACHE_SIZE,
            split: true,
            min: 1,
            keep_all: false,
            keep_all_key: DEFAULT_KEEP_ALL_KEY.to_string(),
            id_field: None,
            expand_diacritics: true,
            insert_full_unsplit_key: false,
            enable_misspellings: false,
            index_field: None,
        }
    }
}
