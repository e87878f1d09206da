//! JSON encoding for documents.
//!
//! Files are written pretty-printed with a 4-space indent and non-ASCII
//! text left unescaped, e.g.:
//! ```text
//! {
//!     "Content": [
//!         {
//!             "id": 1,
//!             "name": "Zoë"
//!         }
//!     ]
//! }
//! ```
//! Object key order survives a decode/encode cycle.

use std::path::Path;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Serializer, Value};

use crate::storage::error::{StoreError, StoreResult};
use crate::storage::types::Document;

const INDENT: &[u8] = b"    ";

/// serialize a value to pretty JSON bytes
pub fn encode<T: Serialize + ?Sized>(value: &T) -> StoreResult<Vec<u8>> {
    let mut bytes = Vec::with_capacity(128);
    let formatter = PrettyFormatter::with_indent(INDENT);
    let mut ser = Serializer::with_formatter(&mut bytes, formatter);
    value.serialize(&mut ser)?;
    Ok(bytes)
}

/// deserialize a document from JSON bytes
///
/// the top-level value must be an object
pub fn decode(bytes: &[u8], path: &Path) -> StoreResult<Document> {
    match serde_json::from_slice::<Value>(bytes)? {
        Value::Object(doc) => Ok(doc),
        other => Err(StoreError::corrupted(
            path,
            format!("top-level value is {}, expected an object", kind(&other)),
        )),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
