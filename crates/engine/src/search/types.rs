//! Result and query input types

use std::borrow::Cow;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;
use triesearch_core::RecordId;

// ============================================================================
// Hit
// ============================================================================

/// A record as stored in the trie and returned by queries
///
/// Pairs the record's resolved identity with a shared handle to the record.
/// Cloning a hit never clones the record itself.
pub struct Hit<R> {
    id: RecordId,
    record: Arc<R>,
}

impl<R> Hit<R> {
    /// Create a hit from an identity and a shared record
    pub fn new(id: RecordId, record: Arc<R>) -> Self {
        Hit { id, record }
    }

    /// The record's identity
    pub fn id(&self) -> &RecordId {
        &self.id
    }

    /// The shared record handle
    pub fn record(&self) -> &Arc<R> {
        &self.record
    }

    /// Take the shared record handle
    pub fn into_record(self) -> Arc<R> {
        self.record
    }

    /// Check if two hits point at the same stored record
    pub fn same_record(&self, other: &Hit<R>) -> bool {
        Arc::ptr_eq(&self.record, &other.record)
    }
}

impl<R> Clone for Hit<R> {
    fn clone(&self) -> Self {
        Hit {
            id: self.id.clone(),
            record: Arc::clone(&self.record),
        }
    }
}

impl<R> Deref for Hit<R> {
    type Target = R;

    fn deref(&self) -> &R {
        &self.record
    }
}

impl<R: fmt::Debug> fmt::Debug for Hit<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hit")
            .field("id", &self.id)
            .field("record", &self.record)
            .finish()
    }
}

impl<R: PartialEq> PartialEq for Hit<R> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.record == other.record
    }
}

// ============================================================================
// Phrases
// ============================================================================

/// One or more query phrases
///
/// Anything string-like converts into a single phrase; slices, vectors and
/// arrays of strings convert into several.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phrases<'a>(Vec<Cow<'a, str>>);

impl<'a> Phrases<'a> {
    /// Iterate over the phrases in order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|p| p.as_ref())
    }

    /// Number of phrases
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if there are no phrases
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> From<&'a str> for Phrases<'a> {
    fn from(phrase: &'a str) -> Self {
        Phrases(vec![Cow::Borrowed(phrase)])
    }
}

impl<'a> From<&'a String> for Phrases<'a> {
    fn from(phrase: &'a String) -> Self {
        Phrases(vec![Cow::Borrowed(phrase.as_str())])
    }
}

impl From<String> for Phrases<'static> {
    fn from(phrase: String) -> Self {
        Phrases(vec![Cow::Owned(phrase)])
    }
}

impl<'a, 'b> From<&'b [&'a str]> for Phrases<'a> {
    fn from(phrases: &'b [&'a str]) -> Self {
        Phrases(phrases.iter().map(|p| Cow::Borrowed(*p)).collect())
    }
}

impl<'a, 'b, const N: usize> From<&'b [&'a str; N]> for Phrases<'a> {
    fn from(phrases: &'b [&'a str; N]) -> Self {
        Phrases(phrases.iter().map(|p| Cow::Borrowed(*p)).collect())
    }
}

impl<'a, const N: usize> From<[&'a str; N]> for Phrases<'a> {
    fn from(phrases: [&'a str; N]) -> Self {
        Phrases(phrases.into_iter().map(Cow::Borrowed).collect())
    }
}

impl<'a> From<Vec<&'a str>> for Phrases<'a> {
    fn from(phrases: Vec<&'a str>) -> Self {
        Phrases(phrases.into_iter().map(Cow::Borrowed).collect())
    }
}

impl<'a> From<&'a [String]> for Phrases<'a> {
    fn from(phrases: &'a [String]) -> Self {
        Phrases(phrases.iter().map(|p| Cow::Borrowed(p.as_str())).collect())
    }
}

impl From<Vec<String>> for Phrases<'static> {
    fn from(phrases: Vec<String>) -> Self {
        Phrases(phrases.into_iter().map(Cow::Owned).collect())
    }
}
