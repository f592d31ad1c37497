//! Splitting keys and query phrases into tokens
//!
//! Pipeline at insertion: split on the configured delimiters (and, optionally,
//! before every uppercase letter) → drop blank pieces → optionally keep the
//! unsplit key as well. Queries reuse the same pattern unless a separate
//! query splitter is configured.

use tracing::trace;

/// Punctuation that separates tokens in the default splitter
pub const DEFAULT_PUNCTUATION: &[char] = &[
    ',', '.', ';', ':', '!', '?', '(', ')', '[', ']', '{', '}', '"', '/',
];

/// A delimiter pattern
///
/// Delimiter characters are consumed. A case boundary is zero-width: the
/// uppercase letter starts the next piece.
///
/// # Example
///
/// ```
/// use triesearch_engine::search::SplitPattern;
///
/// let camel = SplitPattern::whitespace().split_before_uppercase();
/// assert_eq!(camel.segments("HelloWorld foo"), vec!["Hello", "World", "foo"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitPattern {
    whitespace: bool,
    chars: Vec<char>,
    case_boundaries: bool,
}

impl SplitPattern {
    /// Split on any Unicode whitespace
    pub fn whitespace() -> Self {
        SplitPattern {
            whitespace: true,
            chars: Vec::new(),
            case_boundaries: false,
        }
    }

    /// Split on exactly the given characters
    pub fn chars(chars: impl IntoIterator<Item = char>) -> Self {
        SplitPattern {
            whitespace: false,
            chars: chars.into_iter().collect(),
            case_boundaries: false,
        }
    }

    /// Also split on whitespace
    pub fn with_whitespace(mut self) -> Self {
        self.whitespace = true;
        self
    }

    /// Also split on the given characters
    pub fn with_chars(mut self, chars: impl IntoIterator<Item = char>) -> Self {
        self.chars.extend(chars);
        self
    }

    /// Start a new piece before every uppercase letter
    pub fn split_before_uppercase(mut self) -> Self {
        self.case_boundaries = true;
        self
    }

    #[inline]
    fn is_delimiter(&self, c: char) -> bool {
        (self.whitespace && c.is_whitespace()) || self.chars.contains(&c)
    }

    /// Raw pieces of `text`, including empty ones between adjacent delimiters
    pub fn segments<'t>(&self, text: &'t str) -> Vec<&'t str> {
        let mut pieces = Vec::new();
        let mut start = 0;
        for (i, c) in text.char_indices() {
            if self.is_delimiter(c) {
                pieces.push(&text[start..i]);
                start = i + c.len_utf8();
            } else if self.case_boundaries && c.is_uppercase() && i > start {
                pieces.push(&text[start..i]);
                start = i;
            }
        }
        pieces.push(&text[start..]);
        pieces
    }
}

impl Default for SplitPattern {
    /// Whitespace plus [`DEFAULT_PUNCTUATION`]
    fn default() -> Self {
        SplitPattern::whitespace().with_chars(DEFAULT_PUNCTUATION.iter().copied())
    }
}

/// How keys and phrases are broken into tokens
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Splitter {
    /// The whole string is a single token, whitespace included
    Disabled,
    /// Split with a delimiter pattern
    Pattern(SplitPattern),
}

impl Default for Splitter {
    fn default() -> Self {
        Splitter::Pattern(SplitPattern::default())
    }
}

impl From<SplitPattern> for Splitter {
    fn from(pattern: SplitPattern) -> Self {
        Splitter::Pattern(pattern)
    }
}

fn is_blank(piece: &str) -> bool {
    piece.chars().all(char::is_whitespace)
}

impl Splitter {
    /// Check if splitting is turned off
    pub fn is_disabled(&self) -> bool {
        matches!(self, Splitter::Disabled)
    }

    /// Raw pieces of `text`
    pub fn segments<'t>(&self, text: &'t str) -> Vec<&'t str> {
        match self {
            Splitter::Disabled => vec![text],
            Splitter::Pattern(p) => p.segments(text),
        }
    }

    /// Split a query phrase into words, dropping empty pieces
    ///
    /// # Example
    ///
    /// ```
    /// use triesearch_engine::search::Splitter;
    ///
    /// let words = Splitter::default().split("hel  wor");
    /// assert_eq!(words, vec!["hel", "wor"]);
    /// ```
    pub fn split<'t>(&self, text: &'t str) -> Vec<&'t str> {
        self.segments(text)
            .into_iter()
            .filter(|p| !p.is_empty())
            .collect()
    }

    /// Tokens to index for one key
    ///
    /// When the pattern does not actually segment `text` (every piece is the
    /// text itself or blank), the whole text is the only token. Otherwise the
    /// non-blank pieces are returned, followed by `text` itself when
    /// `keep_full` is set.
    pub fn tokens(&self, text: &str, keep_full: bool) -> Vec<String> {
        let pieces = self.segments(text);
        if pieces.iter().all(|p| *p == text || is_blank(p)) {
            return vec![text.to_string()];
        }

        let mut tokens: Vec<String> = pieces
            .into_iter()
            .filter(|p| !is_blank(p))
            .map(str::to_string)
            .collect();
        if keep_full {
            tokens.push(text.to_string());
        }
        trace!(target: "triesearch::tokenizer", key = text, count = tokens.len(), "split key");
        tokens
    }
}
