//! Combining per-phrase results into one answer
//!
//! A [`Reducer`] is folded over the phrases of a query in order. It receives
//! the accumulator so far (`None` on the first phrase), the phrase, that
//! phrase's matches and the index, and returns the new accumulator.
//! Closures with the matching signature are reducers too.

use super::index::TrieSearch;
use super::types::Hit;
use rustc_hash::FxHashMap;
use triesearch_core::RecordId;

/// Strategy for combining phrase results
pub trait Reducer<R> {
    /// Fold one phrase's `matches` into `accumulator`
    fn combine(
        &self,
        accumulator: Option<Vec<Hit<R>>>,
        phrase: &str,
        matches: &[Hit<R>],
        index: &TrieSearch<R>,
    ) -> Vec<Hit<R>>;
}

impl<R, F> Reducer<R> for F
where
    F: Fn(Option<Vec<Hit<R>>>, &str, &[Hit<R>], &TrieSearch<R>) -> Vec<Hit<R>>,
{
    fn combine(
        &self,
        accumulator: Option<Vec<Hit<R>>>,
        phrase: &str,
        matches: &[Hit<R>],
        index: &TrieSearch<R>,
    ) -> Vec<Hit<R>> {
        self(accumulator, phrase, matches, index)
    }
}

/// Pin a closure's argument types to the reducer signature
///
/// # Example
///
/// ```
/// use triesearch_engine::search::{reducer_fn, Reducer};
///
/// // keep every phrase's matches, in order
/// let concat = reducer_fn::<String, _>(|acc, _phrase, matches, _index| {
///     let mut acc = acc.unwrap_or_default();
///     acc.extend_from_slice(matches);
///     acc
/// });
/// # let _: &dyn Reducer<String> = &concat;
/// ```
pub fn reducer_fn<R, F>(f: F) -> F
where
    F: Fn(Option<Vec<Hit<R>>>, &str, &[Hit<R>], &TrieSearch<R>) -> Vec<Hit<R>>,
{
    f
}

/// Pairwise union with a repeat test
///
/// The first phrase's matches become the accumulator. For each later phrase
/// the accumulator and the new matches are scanned together, alternating
/// `accumulator[i]` then `matches[i]`; a record is emitted the moment its
/// identity has been seen exactly twice. Records present on only one side
/// are dropped, so successive phrases narrow the result.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnionReducer;

impl<R> Reducer<R> for UnionReducer {
    fn combine(
        &self,
        accumulator: Option<Vec<Hit<R>>>,
        _phrase: &str,
        matches: &[Hit<R>],
        _index: &TrieSearch<R>,
    ) -> Vec<Hit<R>> {
        let Some(accumulator) = accumulator else {
            return matches.to_vec();
        };

        let mut counts: FxHashMap<&RecordId, u32> = FxHashMap::default();
        let mut results = Vec::new();
        let longest = accumulator.len().max(matches.len());

        for i in 0..longest {
            if let Some(hit) = accumulator.get(i) {
                tally(hit, &mut counts, &mut results);
            }
            if let Some(hit) = matches.get(i) {
                tally(hit, &mut counts, &mut results);
            }
        }
        results
    }
}

fn tally<'a, R>(hit: &'a Hit<R>, counts: &mut FxHashMap<&'a RecordId, u32>, out: &mut Vec<Hit<R>>) {
    let seen = counts.entry(hit.id()).or_insert(0);
    *seen += 1;
    if *seen == 2 {
        out.push(hit.clone());
    }
}
