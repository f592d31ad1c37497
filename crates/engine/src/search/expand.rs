//! Alternate spellings generated at insertion time
//!
//! Two independent passes:
//! - diacritic expansion: one extra string per accented character, with just
//!   that character replaced by its plain alternate
//! - misspelling expansion: one-edit variants (interior deletions and adjacent
//!   swaps) of each starting token
//!
//! Neither pass runs at query time. A query for "cafe" finds "café" because
//! "cafe" was indexed alongside it, not because the query was expanded.

use once_cell::sync::Lazy;
use rustc_hash::FxHashSet;

/// A class of characters that share a plain alternate spelling
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpansionRule {
    chars: Vec<char>,
    alternate: String,
}

impl ExpansionRule {
    /// Any character of `chars` (matched case-insensitively) may be spelled `alternate`
    pub fn new(chars: &str, alternate: impl Into<String>) -> Self {
        ExpansionRule {
            chars: chars.chars().collect(),
            alternate: alternate.into(),
        }
    }

    /// The replacement text
    pub fn alternate(&self) -> &str {
        &self.alternate
    }

    fn matches(&self, c: char) -> bool {
        self.chars.contains(&c) || c.to_lowercase().any(|l| self.chars.contains(&l))
    }
}

static DEFAULT_RULES: Lazy<Vec<ExpansionRule>> = Lazy::new(|| {
    vec![
        ExpansionRule::new("åäàáâãæ", "a"),
        ExpansionRule::new("èéêë", "e"),
        ExpansionRule::new("ìíîï", "i"),
        ExpansionRule::new("òóôõö", "o"),
        ExpansionRule::new("ùúûü", "u"),
        ExpansionRule::new("æ", "ae"),
    ]
});

/// The built-in Latin diacritic table
pub fn default_expansion_rules() -> &'static [ExpansionRule] {
    &DEFAULT_RULES
}

/// Expand `value` with one alternate per matching character
///
/// The original is always first. Each rule is applied to the original
/// string independently, so two accented characters yield two alternates,
/// not a fully-substituted third one.
///
/// # Example
///
/// ```
/// use triesearch_engine::search::{default_expansion_rules, expand_diacritics};
///
/// let values = expand_diacritics("café", default_expansion_rules());
/// assert_eq!(values, vec!["café", "cafe"]);
/// ```
pub fn expand_diacritics(value: &str, rules: &[ExpansionRule]) -> Vec<String> {
    let mut values = vec![value.to_string()];
    if rules.is_empty() {
        return values;
    }

    let chars: Vec<char> = value.chars().collect();
    for rule in rules {
        for (i, &c) in chars.iter().enumerate() {
            if !rule.matches(c) {
                continue;
            }
            let mut alternate = String::with_capacity(value.len() + rule.alternate.len());
            alternate.extend(&chars[..i]);
            alternate.push_str(&rule.alternate);
            alternate.extend(&chars[i + 1..]);
            values.push(alternate);
        }
    }
    values
}

/// Add one-edit misspellings of every starting token
///
/// Only the tokens present on entry are expanded; variants are appended in
/// generation order, skipping any string already in the list.
///
/// # Example
///
/// ```
/// use triesearch_engine::search::expand_misspellings;
///
/// let words = expand_misspellings(vec!["the".to_string()]);
/// assert_eq!(words, vec!["the", "te", "teh"]);
/// ```
pub fn expand_misspellings(mut words: Vec<String>) -> Vec<String> {
    let mut seen: FxHashSet<String> = words.iter().cloned().collect();
    let starting = words.len();

    for w in 0..starting {
        let chars: Vec<char> = words[w].chars().collect();
        let len = chars.len();
        let mut variants = Vec::new();

        // deletions: "androd" for "android"
        for c in 1..len.saturating_sub(1) {
            let mut v = chars.clone();
            v.remove(c);
            variants.push(v);
        }
        // swaps: "andriod" for "android"
        for c in 1..len.saturating_sub(1) {
            let mut v = chars.clone();
            v.swap(c, c + 1);
            variants.push(v);
        }

        for v in variants {
            let s: String = v.into_iter().collect();
            if seen.insert(s.clone()) {
                words.push(s);
            }
        }
    }
    words
}
