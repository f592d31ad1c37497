//! Core types for the trie search workspace
//!
//! This crate defines the foundational types shared by the engine:
//! - `Error` / `Result`: the workspace error type
//! - `KeyField`: a simple or nested record field to index
//! - `Record`: how text is read out of caller values
//! - `RecordId`: record identity used for de-duplication

#![warn(missing_docs)]

pub mod error;
pub mod key_field;
pub mod record;
pub mod types;

pub use error::{BoxError, Error, Result};
pub use key_field::{FieldSegment, KeyField, PathParseError};
pub use record::{value_text, Record};
pub use types::RecordId;
