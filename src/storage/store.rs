//! Mutex-guarded JSON record store.
//!
//! A [`RecordStore`] is bound to one file holding a `{"Content": [...]}`
//! document. Every public operation takes the handle's lock for the
//! duration of its file I/O and re-reads the file, so the file is the only
//! source of truth and operations on one handle never interleave.
//!
//! Each operation comes in two forms:
//! - a `try_*` form returning [`StoreResult`], and
//! - a non-failing form that logs the error and degrades to
//!   `false` / `None` / an empty list, treating the store as empty.
//!
//! Locking is in-process only. Two handles (or two processes) pointed at
//! the same path do not coordinate.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;
use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::storage::codec;
use crate::storage::config::StoreConfig;
use crate::storage::error::{StoreError, StoreResult};
use crate::storage::types::{self, Document, Record};

/// Thread-safe handle to one JSON record file.
///
/// Clone this to share across threads - clones share the same lock.
#[derive(Clone)]
pub struct RecordStore {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    lock: Mutex<()>,
    config: StoreConfig,
}

impl RecordStore {
    /// Bind a store to `path` with default options.
    ///
    /// Nothing is touched on disk until the first write.
    pub fn open(path: impl AsRef<Path>) -> Self {
        Self::with_config(StoreConfig::new(path.as_ref()))
    }

    /// Bind a store using a custom configuration.
    pub fn with_config(config: StoreConfig) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                lock: Mutex::new(()),
                config,
            }),
        }
    }

    /// Get the file path.
    pub fn path(&self) -> &Path {
        &self.inner.config.path
    }

    /// Get the configuration.
    pub fn config(&self) -> &StoreConfig {
        &self.inner.config
    }

    /// Run `f` while holding the handle's lock.
    fn locked<F, T>(&self, f: F) -> StoreResult<T>
    where
        F: FnOnce(&Path) -> StoreResult<T>,
    {
        let _guard = self.inner.lock.lock();
        f(self.path())
    }

    fn trace(&self, op: &'static str) {
        if self.inner.config.verbose {
            debug!(op, path = %self.path().display(), "store operation");
        }
    }

    fn log_failure(&self, op: &'static str, err: &StoreError) {
        error!(op, path = %self.path().display(), error = %err, "JSON store operation failed");
    }

    /// Create missing parent directories. Runs outside the lock.
    fn prepare_parent_dirs(&self) {
        if !self.inner.config.create_parent_dirs {
            return;
        }
        let Some(dir) = self.path().parent() else {
            return;
        };
        if dir.as_os_str().is_empty() || dir.exists() {
            return;
        }
        if let Err(e) = fs::create_dir_all(dir) {
            warn!(dir = %dir.display(), error = %e, "could not create parent directories");
        }
    }

    // ==================== Raw Document Access ====================

    /// Read and parse the whole document.
    ///
    /// Returns `Ok(None)` when the file is missing or empty.
    pub fn try_read(&self) -> StoreResult<Option<Document>> {
        self.trace("read");
        self.locked(load)
    }

    /// Read the whole document.
    ///
    /// A missing or empty file yields `Some` of an empty document; `None`
    /// means the file exists but could not be opened or parsed.
    pub fn read(&self) -> Option<Document> {
        match self.try_read() {
            Ok(doc) => Some(doc.unwrap_or_default()),
            Err(e) => {
                self.log_failure("read", &e);
                None
            }
        }
    }

    /// Overwrite the file with `doc`.
    pub fn try_write(&self, doc: &Document) -> StoreResult<()> {
        self.trace("write");
        if doc.is_empty() {
            return Err(StoreError::EmptyInput);
        }
        self.prepare_parent_dirs();
        self.locked(|path| store(path, doc))
    }

    /// Overwrite the file with `doc`. Empty documents are rejected.
    pub fn write(&self, doc: &Document) -> bool {
        match self.try_write(doc) {
            Ok(()) => true,
            Err(e) => {
                self.log_failure("write", &e);
                false
            }
        }
    }

    /// Remove the file. A missing file is not an error.
    pub fn try_delete(&self) -> StoreResult<()> {
        self.trace("delete");
        self.locked(|path| match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::io(path, e)),
        })
    }

    /// Remove the file.
    pub fn delete(&self) -> bool {
        match self.try_delete() {
            Ok(()) => true,
            Err(e) => {
                self.log_failure("delete", &e);
                false
            }
        }
    }

    /// Check whether the file exists and is non-empty.
    pub fn exists(&self) -> bool {
        self.locked(is_present).unwrap_or_else(|e| {
            self.log_failure("exists", &e);
            false
        })
    }

    // ==================== Content Access ====================

    /// Read the `Content` list. A missing or empty file yields no records.
    pub fn try_read_content(&self) -> StoreResult<Vec<Record>> {
        match self.try_read()? {
            Some(doc) => types::records(&doc, self.path()),
            None => Ok(Vec::new()),
        }
    }

    /// Read the `Content` list.
    ///
    /// Unreadable or malformed files are logged and reported as empty, so
    /// callers cannot tell "no data" from "corrupt data" here. Use
    /// [`try_read_content`](Self::try_read_content) for that.
    pub fn read_content(&self) -> Vec<Record> {
        self.try_read_content().unwrap_or_else(|e| {
            self.log_failure("read_content", &e);
            Vec::new()
        })
    }

    /// Number of records in `Content`, 0 when absent or unreadable.
    pub fn len(&self) -> usize {
        self.read_content().len()
    }

    /// Check whether `Content` holds no records.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append `record` to `Content` in one critical section.
    ///
    /// A missing or empty file is bootstrapped with the skeleton document
    /// first, so the first append always lands.
    pub fn try_append_content(&self, record: Record) -> StoreResult<()> {
        self.trace("append_content");
        if record.is_empty() {
            return Err(StoreError::EmptyInput);
        }
        self.prepare_parent_dirs();
        self.locked(|path| {
            let mut doc = load(path)?.unwrap_or_else(types::skeleton);
            types::content_mut(&mut doc, path)?.push(Value::Object(record));
            store(path, &doc)
        })
    }

    /// Append `record` to `Content`. Empty records are rejected.
    pub fn append_content(&self, record: Record) -> bool {
        let path = self.path().display();
        match self.try_append_content(record) {
            Ok(()) => true,
            Err(StoreError::EmptyInput) => {
                warn!(path = %path, "refusing to append an empty record");
                false
            }
            Err(e @ StoreError::Io { .. }) => {
                error!(path = %path, errno = ?e.raw_os_error(), error = %e, "I/O failure while appending record");
                false
            }
            Err(e) if e.is_corruption() => {
                error!(path = %path, error = %e, "data conversion failure while appending record");
                false
            }
            Err(e) => {
                self.log_failure("append_content", &e);
                false
            }
        }
    }

    /// Reset the document to the skeleton.
    ///
    /// Fails with [`StoreError::NotInitialized`] when the file is missing
    /// or empty; unlike appending, clearing never creates the file.
    pub fn try_clear_content(&self) -> StoreResult<()> {
        self.trace("clear_content");
        self.locked(|path| {
            if !is_present(path)? {
                return Err(StoreError::NotInitialized(path.to_path_buf()));
            }
            store(path, &types::skeleton())
        })
    }

    /// Reset the document to the skeleton.
    pub fn clear_content(&self) -> bool {
        match self.try_clear_content() {
            Ok(()) => true,
            Err(e) => {
                self.log_failure("clear_content", &e);
                false
            }
        }
    }

    // ==================== Lookup ====================

    /// Run `f` over the content list; absence and failures give `None`.
    fn scan<F, T>(&self, op: &'static str, f: F) -> Option<T>
    where
        F: FnOnce(&[Value]) -> Option<T>,
    {
        self.trace(op);
        let result = self.locked(|path| match load(path)? {
            Some(doc) => {
                let list = types::content(&doc, path)?;
                Ok(list.clone())
            }
            None => Ok(Vec::new()),
        });
        match result {
            Ok(list) => f(&list),
            Err(e) => {
                self.log_failure(op, &e);
                None
            }
        }
    }

    /// Check whether a record structurally equal to `record` is stored.
    pub fn contains(&self, record: &Record) -> bool {
        self.contains_at(record).is_some()
    }

    /// Index of the first record structurally equal to `record`.
    ///
    /// Field order does not matter for equality.
    pub fn contains_at(&self, record: &Record) -> Option<usize> {
        self.scan("contains_at", |list| {
            list.iter().position(|v| v.as_object() == Some(record))
        })
    }

    /// First record whose `uid` field equals `value`.
    ///
    /// Empty records are skipped. Only the first match is returned if
    /// several records share the value.
    pub fn find_by_uid(&self, value: &Value, uid: &str) -> Option<Record> {
        self.scan("find_by_uid", |list| {
            list.iter()
                .filter_map(Value::as_object)
                .filter(|candidate| !candidate.is_empty())
                .find(|candidate| candidate.get(uid) == Some(value))
                .cloned()
        })
    }

    // ==================== Mutation by UID ====================

    /// Replace the first stored record agreeing with `record` on every
    /// field in `uids`, in one critical section.
    ///
    /// Returns the index that was replaced. The file is untouched when no
    /// record matches.
    pub fn try_update(&self, record: Record, uids: &[&str]) -> StoreResult<usize> {
        self.trace("update");
        if uids.is_empty() {
            return Err(StoreError::NoUidFields);
        }
        if let Some(missing) = uids.iter().find(|field| !record.contains_key(**field)) {
            return Err(StoreError::MissingUid(missing.to_string()));
        }
        self.locked(|path| {
            let mut doc = load(path)?.ok_or_else(|| StoreError::NotInitialized(path.to_path_buf()))?;
            let list = types::content_mut(&mut doc, path)?;
            let Some(index) = types::position_by_uids(list, &record, uids) else {
                return Err(not_found(&record, uids));
            };
            list[index] = Value::Object(record);
            store(path, &doc)?;
            Ok(index)
        })
    }

    /// Replace the first record matching `record` on all of `uids`.
    pub fn update_by_uids(&self, record: Record, uids: &[&str]) -> bool {
        match self.try_update(record, uids) {
            Ok(_) => true,
            Err(e) => {
                self.log_failure("update", &e);
                false
            }
        }
    }

    /// Replace the first record whose `uid` matches `record`'s.
    pub fn update(&self, record: Record, uid: &str) -> bool {
        self.update_by_uids(record, &[uid])
    }

    /// Replace the first record matching `record` on both `uid1` and `uid2`.
    pub fn update_by_two_uids(&self, record: Record, uid1: &str, uid2: &str) -> bool {
        self.update_by_uids(record, &[uid1, uid2])
    }

    /// Remove the first record whose `uid` field equals `value`.
    ///
    /// The read, removal and write-back of the remaining records happen in
    /// one critical section. Returns the removed record.
    pub fn try_remove_by_uid(&self, value: &Value, uid: &str) -> StoreResult<Record> {
        self.trace("remove_by_uid");
        self.locked(|path| {
            let not_found = || StoreError::RecordNotFound {
                field: uid.to_string(),
                value: value.clone(),
            };
            let mut doc = load(path)?.ok_or_else(not_found)?;
            let list = types::content_mut(&mut doc, path)?;
            let index = types::position_by_value(list, uid, value).ok_or_else(not_found)?;
            let removed = list.remove(index);
            store(path, &doc)?;
            match removed {
                Value::Object(record) => Ok(record),
                _ => Err(StoreError::corrupted(path, "removed element is not an object")),
            }
        })
    }

    /// Remove the first record whose `uid` field equals `value`.
    ///
    /// Returns whether a record was found and removed.
    pub fn remove_by_uid(&self, value: &Value, uid: &str) -> bool {
        match self.try_remove_by_uid(value, uid) {
            Ok(_) => true,
            Err(e) if e.is_not_found() => {
                debug!(path = %self.path().display(), uid, %value, "no record to remove");
                false
            }
            Err(e) => {
                self.log_failure("remove_by_uid", &e);
                false
            }
        }
    }
}

fn not_found(record: &Record, uids: &[&str]) -> StoreError {
    let value = match uids {
        [single] => record.get(*single).cloned().unwrap_or(Value::Null),
        _ => Value::Array(
            uids.iter()
                .map(|field| record.get(*field).cloned().unwrap_or(Value::Null))
                .collect(),
        ),
    };
    StoreError::RecordNotFound {
        field: uids.join(","),
        value,
    }
}

// The helpers below expect the caller to hold the store lock.

fn is_present(path: &Path) -> StoreResult<bool> {
    match fs::metadata(path) {
        Ok(meta) => Ok(meta.len() > 0),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(StoreError::io(path, e)),
    }
}

fn load(path: &Path) -> StoreResult<Option<Document>> {
    if !is_present(path)? {
        return Ok(None);
    }
    let bytes = fs::read(path).map_err(|e| StoreError::io(path, e))?;
    codec::decode(&bytes, path).map(Some)
}

/// Overwrite (never append) the file with `doc`.
///
/// The document is encoded before the file is truncated, so an encoding
/// failure leaves the old content in place.
fn store(path: &Path, doc: &Document) -> StoreResult<()> {
    let bytes = codec::encode(doc)?;
    let mut file = fs::File::create(path).map_err(|e| StoreError::io(path, e))?;
    file.write_all(&bytes).map_err(|e| StoreError::io(path, e))?;
    file.flush().map_err(|e| StoreError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn setup() -> (TempDir, RecordStore) {
        let dir = TempDir::new().unwrap();
        let store = RecordStore::open(dir.path().join("data.json"));
        (dir, store)
    }

    fn rec(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            _ => panic!("fixture must be an object"),
        }
    }

    fn seeded() -> (TempDir, RecordStore) {
        let (dir, store) = setup();
        assert!(store.append_content(rec(json!({"id": 1, "v": "a"}))));
        assert!(store.append_content(rec(json!({"id": 2, "v": "b"}))));
        (dir, store)
    }

    #[test]
    fn test_read_missing_and_empty_file() {
        let (_dir, store) = setup();
        assert_eq!(store.read(), Some(Document::new()));
        assert!(store.try_read().unwrap().is_none());

        fs::write(store.path(), b"").unwrap();
        assert_eq!(store.read(), Some(Document::new()));
        assert!(!store.exists());
    }

    #[test]
    fn test_read_unparseable_is_distinct_from_empty() {
        let (_dir, store) = setup();
        fs::write(store.path(), b"{ broken").unwrap();
        assert_eq!(store.read(), None);
        assert!(store.try_read().unwrap_err().is_corruption());
    }

    #[test]
    fn test_write_then_read() {
        let (_dir, store) = setup();
        let doc = rec(json!({"Content": [{"id": 1}], "Meta": {"owner": "ü"}}));
        assert!(store.write(&doc));
        assert_eq!(store.read(), Some(doc));
    }

    #[test]
    fn test_write_rejects_empty_document() {
        let (_dir, store) = setup();
        assert!(!store.write(&Document::new()));
        assert!(matches!(store.try_write(&Document::new()), Err(StoreError::EmptyInput)));
        assert!(!store.path().exists());
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let store = RecordStore::open(dir.path().join("a/b/c.json"));
        assert!(store.write(&types::skeleton()));
        assert!(store.exists());
    }

    #[test]
    fn test_write_without_parent_dirs_fails() {
        let dir = TempDir::new().unwrap();
        let config = StoreConfig::new(dir.path().join("missing/c.json")).create_parent_dirs(false);
        let store = RecordStore::with_config(config);
        assert!(matches!(store.try_write(&types::skeleton()), Err(StoreError::Io { .. })));
        assert!(!store.write(&types::skeleton()));
    }

    #[test]
    fn test_delete_is_idempotent() {
        let (_dir, store) = seeded();
        assert!(store.delete());
        assert!(!store.path().exists());
        assert!(store.delete());
    }

    #[test]
    fn test_append_bootstraps_file() {
        let (_dir, store) = setup();
        assert!(store.append_content(rec(json!({"id": 1}))));
        let text = fs::read_to_string(store.path()).unwrap();
        assert_eq!(text, "{\n    \"Content\": [\n        {\n            \"id\": 1\n        }\n    ]\n}");
    }

    #[test]
    fn test_append_lands_last() {
        let (_dir, store) = seeded();
        let record = rec(json!({"id": 3, "v": "c"}));
        assert!(store.append_content(record.clone()));
        let content = store.read_content();
        assert_eq!(content.len(), 3);
        assert_eq!(content.last(), Some(&record));
    }

    #[test]
    fn test_append_rejects_empty_record() {
        let (_dir, store) = setup();
        assert!(!store.append_content(Record::new()));
        assert!(!store.path().exists());
    }

    #[test]
    fn test_append_to_malformed_document_fails() {
        let (_dir, store) = setup();
        fs::write(store.path(), br#"{"Other": 1}"#).unwrap();
        assert!(!store.append_content(rec(json!({"id": 1}))));
        assert_eq!(fs::read_to_string(store.path()).unwrap(), r#"{"Other": 1}"#);
    }

    #[test]
    fn test_read_content_collapses_corruption_to_empty() {
        let (_dir, store) = setup();
        fs::write(store.path(), b"not json at all").unwrap();
        assert!(store.read_content().is_empty());
        assert!(store.try_read_content().unwrap_err().is_corruption());

        fs::write(store.path(), br#"{"Content": 5}"#).unwrap();
        assert!(store.read_content().is_empty());
        assert!(store.try_read_content().is_err());
    }

    #[test]
    fn test_clear_content() {
        let (_dir, store) = seeded();
        assert!(store.clear_content());
        assert!(store.read_content().is_empty());
        assert!(store.exists());
    }

    #[test]
    fn test_clear_missing_file_fails_without_creating() {
        let (_dir, store) = setup();
        assert!(!store.clear_content());
        assert!(matches!(store.try_clear_content(), Err(StoreError::NotInitialized(_))));
        assert!(!store.path().exists());
    }

    #[test]
    fn test_contains_and_position() {
        let (_dir, store) = seeded();
        let second = rec(json!({"v": "b", "id": 2}));
        assert!(store.contains(&second));
        assert_eq!(store.contains_at(&second), Some(1));

        let absent = rec(json!({"id": 2}));
        assert!(!store.contains(&absent));
        assert_eq!(store.contains_at(&absent), None);
    }

    #[test]
    fn test_lookups_on_missing_file() {
        let (_dir, store) = setup();
        let probe = rec(json!({"id": 1}));
        assert!(!store.contains(&probe));
        assert_eq!(store.find_by_uid(&json!(1), "id"), None);
        assert!(!store.update(probe, "id"));
        assert!(!store.remove_by_uid(&json!(1), "id"));
        assert!(!store.path().exists());
    }

    #[test]
    fn test_find_by_uid() {
        let (_dir, store) = seeded();
        assert_eq!(
            store.find_by_uid(&json!(2), "id"),
            Some(rec(json!({"id": 2, "v": "b"})))
        );
        assert_eq!(store.find_by_uid(&json!(3), "id"), None);
    }

    #[test]
    fn test_find_by_uid_skips_empty_and_foreign_records() {
        let (_dir, store) = setup();
        let doc = rec(json!({"Content": [{}, {"name": "x"}, {"id": "k", "n": 1}, {"id": "k", "n": 2}]}));
        assert!(store.write(&doc));
        assert_eq!(
            store.find_by_uid(&json!("k"), "id"),
            Some(rec(json!({"id": "k", "n": 1})))
        );
    }

    #[test]
    fn test_update_replaces_first_match_only() {
        let (_dir, store) = seeded();
        assert!(store.update(rec(json!({"id": 1, "v": "z"})), "id"));
        let content = store.read_content();
        assert_eq!(content[0], rec(json!({"id": 1, "v": "z"})));
        assert_eq!(content[1], rec(json!({"id": 2, "v": "b"})));
    }

    #[test]
    fn test_update_missing_uid_leaves_file_alone() {
        let (_dir, store) = seeded();
        let before = fs::read(store.path()).unwrap();
        assert!(!store.update(rec(json!({"id": 9, "v": "z"})), "id"));
        assert!(matches!(
            store.try_update(rec(json!({"v": "z"})), &["id"]),
            Err(StoreError::MissingUid(_))
        ));
        assert_eq!(fs::read(store.path()).unwrap(), before);
    }

    #[test]
    fn test_update_needs_a_uid_field() {
        let (_dir, store) = seeded();
        let before = fs::read(store.path()).unwrap();
        assert!(matches!(
            store.try_update(rec(json!({"id": 5, "v": "z"})), &[]),
            Err(StoreError::NoUidFields)
        ));
        assert!(!store.update_by_uids(rec(json!({"id": 5, "v": "z"})), &[]));
        assert_eq!(fs::read(store.path()).unwrap(), before);
    }

    #[test]
    fn test_duplicate_uids_update_first_only() {
        let (_dir, store) = setup();
        assert!(store.append_content(rec(json!({"id": 7, "v": "first"}))));
        assert!(store.append_content(rec(json!({"id": 7, "v": "second"}))));

        assert_eq!(store.try_update(rec(json!({"id": 7, "v": "new"})), &["id"]).unwrap(), 0);
        assert_eq!(
            store.read_content(),
            vec![rec(json!({"id": 7, "v": "new"})), rec(json!({"id": 7, "v": "second"}))]
        );
    }

    #[test]
    fn test_duplicate_uids_remove_first_only() {
        let (_dir, store) = setup();
        assert!(store.append_content(rec(json!({"id": 7, "v": "first"}))));
        assert!(store.append_content(rec(json!({"id": 7, "v": "second"}))));

        assert!(store.remove_by_uid(&json!(7), "id"));
        assert_eq!(store.read_content(), vec![rec(json!({"id": 7, "v": "second"}))]);
        assert_eq!(store.find_by_uid(&json!(7), "id"), Some(rec(json!({"id": 7, "v": "second"}))));
    }

    #[test]
    fn test_null_elements_do_not_break_operations() {
        let (_dir, store) = setup();
        fs::write(store.path(), r#"{"Content": [null, {"id": 1, "v": "a"}]}"#).unwrap();

        assert_eq!(store.find_by_uid(&json!(1), "id"), Some(rec(json!({"id": 1, "v": "a"}))));
        assert_eq!(store.contains_at(&rec(json!({"id": 1, "v": "a"}))), Some(1));
        assert!(store.append_content(rec(json!({"id": 2}))));
        assert!(store.update(rec(json!({"id": 1, "v": "z"})), "id"));

        let doc = store.read().unwrap();
        assert_eq!(
            doc["Content"],
            json!([null, {"id": 1, "v": "z"}, {"id": 2}])
        );

        assert!(store.remove_by_uid(&json!(2), "id"));
        assert_eq!(store.read().unwrap()["Content"], json!([null, {"id": 1, "v": "z"}]));
        assert_eq!(store.read_content(), vec![rec(json!({"id": 1, "v": "z"}))]);
    }

    #[cfg(unix)]
    #[test]
    fn test_exists_reports_false_on_stat_failure() {
        let (_dir, store) = setup();
        // A path below a regular file cannot be stat'ed.
        fs::write(store.path(), b"{}").unwrap();
        let nested = RecordStore::open(store.path().join("inner.json"));
        assert!(!nested.exists());
    }

    #[test]
    fn test_update_by_two_uids() {
        let (_dir, store) = setup();
        for (chat, user, n) in [(1, 1, 0), (1, 2, 0), (2, 2, 0)] {
            assert!(store.append_content(rec(json!({"chat": chat, "user": user, "n": n}))));
        }
        assert!(store.update_by_two_uids(rec(json!({"chat": 1, "user": 2, "n": 7})), "chat", "user"));
        assert!(!store.update_by_two_uids(rec(json!({"chat": 2, "user": 1, "n": 7})), "chat", "user"));

        let content = store.read_content();
        assert_eq!(content[0]["n"], json!(0));
        assert_eq!(content[1]["n"], json!(7));
        assert_eq!(content[2]["n"], json!(0));
    }

    #[test]
    fn test_remove_middle_record_keeps_the_rest() {
        let (_dir, store) = seeded();
        assert!(store.append_content(rec(json!({"id": 3, "v": "c"}))));

        assert!(store.remove_by_uid(&json!(2), "id"));
        assert_eq!(
            store.read_content(),
            vec![rec(json!({"id": 1, "v": "a"})), rec(json!({"id": 3, "v": "c"}))]
        );
        assert!(!store.remove_by_uid(&json!(2), "id"));
    }

    #[test]
    fn test_remove_last_record_leaves_skeleton() {
        let (_dir, store) = setup();
        assert!(store.append_content(rec(json!({"id": 1}))));
        let removed = store.try_remove_by_uid(&json!(1), "id").unwrap();
        assert_eq!(removed, rec(json!({"id": 1})));
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "{\n    \"Content\": []\n}");
    }

    #[test]
    fn test_rewrite_preserves_other_keys_and_order() {
        let (_dir, store) = setup();
        fs::write(
            store.path(),
            br#"{"Version": 2, "Content": [{"id": 1, "b": 0, "a": 0}], "Tail": true}"#,
        )
        .unwrap();
        assert!(store.update(rec(json!({"id": 1, "b": 1, "a": 1})), "id"));

        let doc = store.read().unwrap();
        let keys: Vec<&String> = doc.keys().collect();
        assert_eq!(keys, ["Version", "Content", "Tail"]);
        let content = store.read_content();
        let fields: Vec<&String> = content[0].keys().collect();
        assert_eq!(fields, ["id", "b", "a"]);
    }

    #[test]
    fn test_len() {
        let (_dir, store) = seeded();
        assert_eq!(store.len(), 2);
        assert!(store.delete());
        assert!(store.is_empty());
    }
}
