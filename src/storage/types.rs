//! Document and record types plus the `{"Content": [...]}` layout helpers.

use std::path::Path;

use serde_json::{Map, Value};

use crate::storage::error::{StoreError, StoreResult};

/// Top-level key holding the record list.
pub const CONTENT_KEY: &str = "Content";

/// A whole parsed file. Key order from disk is kept.
pub type Document = Map<String, Value>;

/// One element of `Content`: an ordered field name -> value mapping.
pub type Record = Map<String, Value>;

/// The document written when a file is bootstrapped or cleared.
///
/// ```text
/// {
///     "Content": []
/// }
/// ```
pub fn skeleton() -> Document {
    let mut doc = Document::new();
    doc.insert(CONTENT_KEY.to_string(), Value::Array(Vec::new()));
    doc
}

/// Borrow the content list of a document.
///
/// Only the list itself is checked. Elements are not validated; scans skip
/// anything that is not an object.
pub(crate) fn content<'a>(doc: &'a Document, path: &Path) -> StoreResult<&'a Vec<Value>> {
    let list = match doc.get(CONTENT_KEY) {
        Some(Value::Array(list)) => list,
        Some(_) => return Err(StoreError::corrupted(path, "`Content` is not an array")),
        None => return Err(StoreError::corrupted(path, "missing `Content` key")),
    };
    Ok(list)
}

/// Mutable counterpart of [`content`].
pub(crate) fn content_mut<'a>(
    doc: &'a mut Document,
    path: &Path,
) -> StoreResult<&'a mut Vec<Value>> {
    let list = match doc.get_mut(CONTENT_KEY) {
        Some(Value::Array(list)) => list,
        Some(_) => return Err(StoreError::corrupted(path, "`Content` is not an array")),
        None => return Err(StoreError::corrupted(path, "missing `Content` key")),
    };
    Ok(list)
}

/// Copy the content list out as owned records, dropping non-object elements.
pub(crate) fn records(doc: &Document, path: &Path) -> StoreResult<Vec<Record>> {
    Ok(content(doc, path)?
        .iter()
        .filter_map(|v| v.as_object().cloned())
        .collect())
}

/// True when `candidate` agrees with `probe` on every field in `uids`.
///
/// A candidate without one of the fields never matches.
pub(crate) fn uids_match(candidate: &Record, probe: &Record, uids: &[&str]) -> bool {
    uids.iter()
        .all(|field| matches!((candidate.get(*field), probe.get(*field)), (Some(a), Some(b)) if a == b))
}

/// Position of the first record in `list` matching `probe` on `uids`.
pub(crate) fn position_by_uids(list: &[Value], probe: &Record, uids: &[&str]) -> Option<usize> {
    list.iter().position(|v| {
        v.as_object()
            .map_or(false, |candidate| uids_match(candidate, probe, uids))
    })
}

/// Position of the first record whose `field` equals `value`.
pub(crate) fn position_by_value(list: &[Value], field: &str, value: &Value) -> Option<usize> {
    list.iter().position(|v| {
        v.as_object()
            .and_then(|candidate| candidate.get(field))
            .map_or(false, |found| found == value)
    })
}
