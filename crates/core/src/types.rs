//! Identifier types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identity of a record inside one index
///
/// Used to de-duplicate query results and to compare records across phrase
/// result sets. `Explicit` ids come from a configured identity field or
/// function; `Hashed` ids are derived from the record's key-field text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RecordId {
    /// xxh3-64 digest of the record's key-field text
    Hashed(u64),
    /// Caller-provided identity
    Explicit(String),
}

impl RecordId {
    /// Create an explicit id
    pub fn explicit(id: impl Into<String>) -> Self {
        RecordId::Explicit(id.into())
    }

    /// Get the explicit id text, if any
    pub fn as_explicit(&self) -> Option<&str> {
        match self {
            RecordId::Explicit(s) => Some(s),
            RecordId::Hashed(_) => None,
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Hashed(h) => write!(f, "#{:016x}", h),
            RecordId::Explicit(s) => write!(f, "{}", s),
        }
    }
}
