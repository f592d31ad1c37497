//! Key fields: the record locations whose text is indexed
//!
//! A key field is either a simple property name (`"title"`) or a nested path
//! into a record (`"author.name"`, `"tags[0]"`). Parsing follows the usual
//! dotted/bracket syntax:
//!
//! | Syntax | Meaning | Example |
//! |--------|---------|---------|
//! | `key` | Property | `title` |
//! | `a.b` | Nested property | `author.name` |
//! | `a[n]` | Property then index | `tags[0]` |
//! | `a[n].b` | Mixed | `items[1].label` |

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error type for key-field parsing
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathParseError {
    /// The key field string was empty
    #[error("key field cannot be empty")]
    EmptyPath,
    /// Empty key in path
    #[error("empty key in path at position {0}")]
    EmptyKey(usize),
    /// Unclosed bracket
    #[error("unclosed bracket starting at position {0}")]
    UnclosedBracket(usize),
    /// Invalid array index
    #[error("invalid array index at position {0}: {1}")]
    InvalidIndex(usize, String),
    /// Unexpected character
    #[error("unexpected character '{0}' at position {1}")]
    UnexpectedChar(char, usize),
}

/// A segment in a key-field path
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldSegment {
    /// Property name: `.foo`
    Key(String),
    /// Array index: `[0]`
    Index(usize),
}

impl fmt::Display for FieldSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldSegment::Key(k) => write!(f, ".{}", k),
            FieldSegment::Index(i) => write!(f, "[{}]", i),
        }
    }
}

/// A field to index or to derive identity from
///
/// Always has at least one segment. Build one directly with
/// [`KeyField::name`] (no parsing, any characters allowed) or parse one from
/// a path string.
///
/// # Examples
///
/// ```
/// use triesearch_core::KeyField;
///
/// let simple = KeyField::name("title");
/// let nested = KeyField::name("author").key("name");
///
/// let parsed: KeyField = "author.name".parse().unwrap();
/// assert_eq!(parsed, nested);
/// assert!(simple.is_simple());
/// assert!(!nested.is_simple());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct KeyField {
    segments: Vec<FieldSegment>,
}

impl KeyField {
    /// A simple, top-level property name
    pub fn name(name: impl Into<String>) -> Self {
        KeyField {
            segments: vec![FieldSegment::Key(name.into())],
        }
    }

    /// Append a key segment (builder pattern)
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.segments.push(FieldSegment::Key(key.into()));
        self
    }

    /// Append an index segment (builder pattern)
    pub fn index(mut self, idx: usize) -> Self {
        self.segments.push(FieldSegment::Index(idx));
        self
    }

    /// Build from segments; `None` when `segments` is empty
    pub fn from_segments(segments: Vec<FieldSegment>) -> Option<Self> {
        if segments.is_empty() {
            None
        } else {
            Some(KeyField { segments })
        }
    }

    /// Get the path segments
    pub fn segments(&self) -> &[FieldSegment] {
        &self.segments
    }

    /// True for a single top-level property
    pub fn is_simple(&self) -> bool {
        matches!(self.segments.as_slice(), [FieldSegment::Key(_)])
    }

    /// Parse every string in `fields`, failing on the first invalid one
    pub fn parse_all<I, S>(fields: I) -> Result<Vec<KeyField>, PathParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        fields.into_iter().map(|f| f.as_ref().parse()).collect()
    }

    /// Walk this path through a JSON value
    ///
    /// Returns `None` as soon as a segment does not apply (missing property,
    /// out-of-range index, or the wrong container type).
    pub fn resolve<'a>(&self, value: &'a serde_json::Value) -> Option<&'a serde_json::Value> {
        let mut current = value;
        for seg in &self.segments {
            current = match seg {
                FieldSegment::Key(k) => current.as_object()?.get(k)?,
                FieldSegment::Index(i) => current.as_array()?.get(*i)?,
            };
        }
        Some(current)
    }

    /// Convert to the dotted string form
    pub fn to_path_string(&self) -> String {
        let mut result = String::new();
        for seg in &self.segments {
            match seg {
                FieldSegment::Key(k) => {
                    if !result.is_empty() {
                        result.push('.');
                    }
                    result.push_str(k);
                }
                FieldSegment::Index(i) => {
                    result.push('[');
                    result.push_str(&i.to_string());
                    result.push(']');
                }
            }
        }
        result
    }
}

fn is_key_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '-' || c == '$'
}

impl FromStr for KeyField {
    type Err = PathParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.chars().collect();
        let mut segments = Vec::new();
        let mut i = 0;

        if i < chars.len() && chars[i] == '.' {
            i += 1;
        }

        while i < chars.len() {
            if chars[i] == '.' {
                i += 1;
                if i >= chars.len() {
                    return Err(PathParseError::EmptyKey(i));
                }
            }

            if chars[i] == '[' {
                let start = i;
                i += 1;
                let idx_start = i;
                while i < chars.len() && chars[i] != ']' {
                    i += 1;
                }
                if i >= chars.len() {
                    return Err(PathParseError::UnclosedBracket(start));
                }
                let idx_str: String = chars[idx_start..i].iter().collect();
                let idx = idx_str
                    .parse::<usize>()
                    .map_err(|_| PathParseError::InvalidIndex(idx_start, idx_str))?;
                segments.push(FieldSegment::Index(idx));
                i += 1;
            } else if is_key_char(chars[i]) {
                let key_start = i;
                while i < chars.len() && is_key_char(chars[i]) {
                    i += 1;
                }
                segments.push(FieldSegment::Key(chars[key_start..i].iter().collect()));
            } else {
                return Err(PathParseError::UnexpectedChar(chars[i], i));
            }
        }

        KeyField::from_segments(segments).ok_or(PathParseError::EmptyPath)
    }
}

impl TryFrom<String> for KeyField {
    type Error = PathParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<KeyField> for String {
    fn from(field: KeyField) -> Self {
        field.to_path_string()
    }
}

impl fmt::Display for KeyField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_path_string())
    }
}
