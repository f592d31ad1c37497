//! The `Record` trait: how the index reads text out of caller values
//!
//! The index never inspects a record beyond this trait. Implementations are
//! provided for `serde_json::Value` (field-addressable documents) and for
//! `String` (primitive records that are indexed through `map` only).

use crate::key_field::KeyField;
use serde_json::Value;

/// A value that can be stored in the index
pub trait Record {
    /// Text stored at `field`, or `None` when the field is absent or null
    fn field_text(&self, field: &KeyField) -> Option<String>;

    /// Whether the record supports field lookups at all
    ///
    /// Primitive records return `false`; identity derivation from key fields
    /// is a configuration error for them.
    fn is_addressable(&self) -> bool;

    /// The whole record rendered as text
    fn full_text(&self) -> String;
}

/// Render a JSON value the way it is indexed
///
/// Strings are used as-is, numbers and booleans by their literal form, and
/// containers by their compact JSON text. Null has no text.
pub fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(_) | Value::Object(_) => Some(value.to_string()),
    }
}

impl Record for Value {
    fn field_text(&self, field: &KeyField) -> Option<String> {
        field.resolve(self).and_then(value_text)
    }

    fn is_addressable(&self) -> bool {
        matches!(self, Value::Object(_) | Value::Array(_))
    }

    fn full_text(&self) -> String {
        value_text(self).unwrap_or_default()
    }
}

impl Record for String {
    fn field_text(&self, _field: &KeyField) -> Option<String> {
        None
    }

    fn is_addressable(&self) -> bool {
        false
    }

    fn full_text(&self) -> String {
        self.clone()
    }
}
