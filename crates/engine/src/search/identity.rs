//! Record identity resolution
//!
//! Every hit carries a [`RecordId`]. It comes from, in order of precedence:
//! 1. an explicit identity field or function
//! 2. a hash of the configured `index_field`
//! 3. a hash of the key fields used for the insertion
//! 4. a hash of the record's full text, when there are no key fields
//!
//! Ids are resolved once per insertion and shared by every hit created for
//! that record, so aggregation and reducers never recompute them.

use std::fmt;
use std::sync::Arc;
use triesearch_core::{BoxError, Error, KeyField, Record, RecordId, Result};
use xxhash_rust::xxh3::xxh3_64;

/// Separates key-field values in the hashed identity text
const FIELD_SEPARATOR: u8 = 0x1F;

/// Caller-provided identity function
pub type IdentityFn<R> = Arc<dyn Fn(&R) -> std::result::Result<String, BoxError> + Send + Sync>;

/// Where an explicit record identity comes from
pub enum IdentitySource<R> {
    /// Read the id from a record field
    Field(KeyField),
    /// Compute the id with a function
    Function(IdentityFn<R>),
}

impl<R> IdentitySource<R> {
    /// Identity read from `field`
    pub fn field(field: KeyField) -> Self {
        IdentitySource::Field(field)
    }

    /// Identity computed by `f`
    pub fn function<F>(f: F) -> Self
    where
        F: Fn(&R) -> std::result::Result<String, BoxError> + Send + Sync + 'static,
    {
        IdentitySource::Function(Arc::new(f))
    }
}

impl<R: Record> IdentitySource<R> {
    /// Resolve the explicit id of `record`
    pub fn resolve(&self, record: &R) -> Result<RecordId> {
        match self {
            IdentitySource::Field(field) => {
                if !record.is_addressable() {
                    return Err(Error::configuration(format!(
                        "identity field '{}' needs a field-addressable record",
                        field
                    )));
                }
                record
                    .field_text(field)
                    .map(RecordId::Explicit)
                    .ok_or_else(|| Error::missing_value(field.clone()))
            }
            IdentitySource::Function(f) => f(record).map(RecordId::Explicit).map_err(|e| {
                Error::configuration_with_source("identity function failed", e)
            }),
        }
    }
}

impl<R> Clone for IdentitySource<R> {
    fn clone(&self) -> Self {
        match self {
            IdentitySource::Field(f) => IdentitySource::Field(f.clone()),
            IdentitySource::Function(f) => IdentitySource::Function(Arc::clone(f)),
        }
    }
}

impl<R> fmt::Debug for IdentitySource<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdentitySource::Field(field) => f.debug_tuple("Field").field(field).finish(),
            IdentitySource::Function(_) => f.write_str("Function(..)"),
        }
    }
}

/// Hash the text of `fields` into an identity
///
/// Fails with `MissingValue` if any field has no text, and with a
/// configuration error if `record` cannot be field-addressed. With no fields
/// the record's full text is hashed.
pub fn derive_id<R: Record>(record: &R, fields: &[KeyField]) -> Result<RecordId> {
    if fields.is_empty() {
        return Ok(RecordId::Hashed(xxh3_64(record.full_text().as_bytes())));
    }
    if !record.is_addressable() {
        return Err(Error::configuration(
            "record cannot be field-addressed; configure an identity function",
        ));
    }

    let mut buf = Vec::new();
    for (i, field) in fields.iter().enumerate() {
        let text = record
            .field_text(field)
            .ok_or_else(|| Error::missing_value(field.clone()))?;
        if i > 0 {
            buf.push(FIELD_SEPARATOR);
        }
        buf.extend_from_slice(text.as_bytes());
    }
    Ok(RecordId::Hashed(xxh3_64(&buf)))
}

/// Resolve the identity of `record` inserted through `fields`
pub fn resolve_id<R: Record>(
    record: &R,
    explicit: Option<&IdentitySource<R>>,
    index_field: Option<&KeyField>,
    fields: &[KeyField],
) -> Result<RecordId> {
    if let Some(source) = explicit {
        return source.resolve(record);
    }
    match index_field {
        Some(field) => derive_id(record, std::slice::from_ref(field)),
        None => derive_id(record, fields),
    }
}
