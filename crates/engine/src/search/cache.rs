//! Bounded phrase → result cache
//!
//! Entries are keyed by the normalized phrase and the optional limit, and
//! evicted oldest-first once the entry count exceeds capacity. Reads do not
//! refresh an entry's position. Any structural mutation of the index clears
//! the whole cache.

use super::types::Hit;
use rustc_hash::FxHashMap;
use std::collections::VecDeque;
use std::sync::Arc;
use tracing::debug;

/// Shared, immutable result list
pub type CachedHits<R> = Arc<Vec<Hit<R>>>;

/// Insertion-ordered result cache
pub struct ResultCache<R> {
    entries: FxHashMap<String, FxHashMap<Option<usize>, CachedHits<R>>>,
    order: VecDeque<(String, Option<usize>)>,
    len: usize,
    capacity: usize,
}

impl<R> ResultCache<R> {
    /// Create an empty cache holding at most `capacity` entries
    pub fn new(capacity: usize) -> Self {
        ResultCache {
            entries: FxHashMap::default(),
            order: VecDeque::new(),
            len: 0,
            capacity,
        }
    }

    /// Cached result for `phrase` at `limit`
    pub fn get(&self, phrase: &str, limit: Option<usize>) -> Option<CachedHits<R>> {
        self.entries
            .get(phrase)
            .and_then(|by_limit| by_limit.get(&limit))
            .map(Arc::clone)
    }

    /// Store a result and evict the oldest entries beyond capacity
    pub fn insert(&mut self, phrase: String, limit: Option<usize>, hits: CachedHits<R>) {
        let by_limit = self.entries.entry(phrase.clone()).or_default();
        if by_limit.insert(limit, hits).is_none() {
            self.order.push_back((phrase, limit));
            self.len += 1;
        }
        while self.len > self.capacity {
            let Some((oldest, oldest_limit)) = self.order.pop_front() else {
                break;
            };
            self.evict(&oldest, oldest_limit);
            debug!(target: "triesearch::cache", phrase = %oldest, limit = ?oldest_limit, "evicted cache entry");
        }
    }

    fn evict(&mut self, phrase: &str, limit: Option<usize>) {
        let Some(by_limit) = self.entries.get_mut(phrase) else {
            return;
        };
        if by_limit.remove(&limit).is_some() {
            self.len -= 1;
        }
        if by_limit.is_empty() {
            self.entries.remove(phrase);
        }
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
        self.len = 0;
    }

    /// Number of cached entries
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Maximum number of entries
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
