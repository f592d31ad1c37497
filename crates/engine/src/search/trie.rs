//! Character trie: node model, insertion, prefix lookup, removal
//!
//! # Design
//!
//! Each node owns its children by value in an `FxHashMap` keyed by edge
//! label, plus a bucket of hits for tokens that end at the node. With
//! `min > 1` the first `min` characters of a token form one combined edge,
//! so tokens shorter than `min` have no path at all.
//!
//! `size` counts edge creations and is decremented for every edge pruned on
//! removal. A node with no bucket entries and no children is never left in
//! the tree (the root excepted).

use super::types::Hit;
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;
use tracing::trace;
use triesearch_core::RecordId;

/// Label on the edge between two nodes
pub type EdgeLabel = SmallVec<[char; 4]>;

/// Split a token into edge labels
///
/// Returns no labels when `key` is shorter than `min`.
///
/// # Example
///
/// ```
/// use triesearch_engine::search::key_to_edges;
///
/// let edges = key_to_edges("key", 2);
/// assert_eq!(edges.len(), 2);
/// assert_eq!(edges[0].as_slice(), &['k', 'e']);
/// assert!(key_to_edges("key", 4).is_empty());
/// ```
pub fn key_to_edges(key: &str, min: usize) -> Vec<EdgeLabel> {
    let chars: Vec<char> = key.chars().collect();
    if min > 1 {
        if chars.len() < min {
            return Vec::new();
        }
        let mut edges = Vec::with_capacity(chars.len() - min + 1);
        edges.push(EdgeLabel::from_slice(&chars[..min]));
        edges.extend(chars[min..].iter().map(|c| EdgeLabel::from_slice(&[*c])));
        edges
    } else {
        chars.iter().map(|c| EdgeLabel::from_slice(&[*c])).collect()
    }
}

// ============================================================================
// TrieNode
// ============================================================================

/// A node in the trie
pub struct TrieNode<R> {
    children: FxHashMap<EdgeLabel, TrieNode<R>>,
    bucket: Vec<Hit<R>>,
}

impl<R> TrieNode<R> {
    fn new() -> Self {
        TrieNode {
            children: FxHashMap::default(),
            bucket: Vec::new(),
        }
    }

    /// Child reached through `label`
    pub fn child(&self, label: &str) -> Option<&TrieNode<R>> {
        let label: EdgeLabel = label.chars().collect();
        self.children.get(&label)
    }

    /// Hits for tokens that end exactly here
    pub fn bucket(&self) -> &[Hit<R>] {
        &self.bucket
    }

    /// Number of outgoing edges
    pub fn children_len(&self) -> usize {
        self.children.len()
    }

    /// Labels of outgoing edges, in no particular order
    pub fn edge_labels(&self) -> impl Iterator<Item = String> + '_ {
        self.children.keys().map(|label| label.iter().collect())
    }

    /// True when the node holds nothing and leads nowhere
    pub fn is_empty(&self) -> bool {
        self.bucket.is_empty() && self.children.is_empty()
    }

    /// Depth-first collection of every hit at or below this node
    ///
    /// Bucket first, then children. Stops the moment `out` reaches `limit`.
    /// Returns `true` when the limit was reached.
    pub fn collect(&self, limit: Option<usize>, out: &mut HitSet<R>) -> bool {
        for hit in &self.bucket {
            if out.is_full(limit) {
                return true;
            }
            out.push(hit);
        }
        for child in self.children.values() {
            if out.is_full(limit) {
                return true;
            }
            if child.collect(limit, out) {
                return true;
            }
        }
        out.is_full(limit)
    }
}

// ============================================================================
// HitSet
// ============================================================================

/// Ordered hits, de-duplicated by record identity
pub struct HitSet<R> {
    hits: Vec<Hit<R>>,
    seen: FxHashSet<RecordId>,
}

impl<R> HitSet<R> {
    /// Create an empty set
    pub fn new() -> Self {
        HitSet {
            hits: Vec::new(),
            seen: FxHashSet::default(),
        }
    }

    /// Add `hit` unless a hit with the same identity is present
    pub fn push(&mut self, hit: &Hit<R>) -> bool {
        if self.seen.insert(hit.id().clone()) {
            self.hits.push(hit.clone());
            true
        } else {
            false
        }
    }

    /// Check if a record identity is present
    pub fn contains(&self, id: &RecordId) -> bool {
        self.seen.contains(id)
    }

    /// Number of hits
    pub fn len(&self) -> usize {
        self.hits.len()
    }

    /// Check if the set is empty
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    fn is_full(&self, limit: Option<usize>) -> bool {
        limit.map_or(false, |l| self.hits.len() >= l)
    }

    /// The hits in insertion order
    pub fn into_vec(self) -> Vec<Hit<R>> {
        self.hits
    }
}

impl<R> Default for HitSet<R> {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Trie
// ============================================================================

/// The trie and its size counter
pub struct Trie<R> {
    root: TrieNode<R>,
    size: usize,
    min: usize,
}

impl<R> Trie<R> {
    /// Create an empty trie for tokens of at least `min` characters
    pub fn new(min: usize) -> Self {
        Trie {
            root: TrieNode::new(),
            size: 0,
            min,
        }
    }

    /// The root node
    pub fn root(&self) -> &TrieNode<R> {
        &self.root
    }

    /// Number of edges created and not yet pruned
    pub fn size(&self) -> usize {
        self.size
    }

    fn too_short(&self, token: &str) -> bool {
        token.is_empty() || token.chars().count() < self.min
    }

    /// Append `hit` to the bucket at the end of `token`'s path
    ///
    /// Tokens shorter than `min` are skipped. Returns whether the hit was
    /// stored.
    pub fn insert(&mut self, token: &str, hit: Hit<R>) -> bool {
        if self.too_short(token) {
            trace!(target: "triesearch::trie", token, min = self.min, "skipping short token");
            return false;
        }

        let size = &mut self.size;
        let mut node = &mut self.root;
        for edge in key_to_edges(token, self.min) {
            node = node.children.entry(edge).or_insert_with(|| {
                *size += 1;
                TrieNode::new()
            });
        }
        node.bucket.push(hit);
        true
    }

    /// Node at the end of `token`'s path
    pub fn find(&self, token: &str) -> Option<&TrieNode<R>> {
        if self.too_short(token) {
            return None;
        }
        let mut node = &self.root;
        for edge in key_to_edges(token, self.min) {
            node = node.children.get(&edge)?;
        }
        Some(node)
    }

    /// Drop hits matching `predicate` from the bucket at the end of `token`
    ///
    /// Nodes left empty along the path are pruned. Returns the number of
    /// bucket entries removed.
    pub fn remove_matching<F>(&mut self, token: &str, mut predicate: F) -> usize
    where
        F: FnMut(&Hit<R>) -> bool,
    {
        if self.too_short(token) {
            return 0;
        }
        let edges = key_to_edges(token, self.min);
        let mut pruned = 0;
        let removed = remove_rec(&mut self.root, &edges, &mut predicate, &mut pruned);
        self.size -= pruned;
        if pruned > 0 {
            trace!(target: "triesearch::trie", token, pruned, "pruned empty nodes");
        }
        removed
    }

    /// Discard every node
    pub fn clear(&mut self) {
        self.root = TrieNode::new();
        self.size = 0;
    }
}

fn remove_rec<R, F>(
    node: &mut TrieNode<R>,
    edges: &[EdgeLabel],
    predicate: &mut F,
    pruned: &mut usize,
) -> usize
where
    F: FnMut(&Hit<R>) -> bool,
{
    let Some((edge, rest)) = edges.split_first() else {
        let before = node.bucket.len();
        node.bucket.retain(|hit| !predicate(hit));
        return before - node.bucket.len();
    };

    let Some(child) = node.children.get_mut(edge) else {
        return 0;
    };
    let removed = remove_rec(child, rest, predicate, pruned);
    if child.is_empty() {
        node.children.remove(edge);
        *pruned += 1;
    }
    removed
}
