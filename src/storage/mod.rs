//! storage layer for tsjson
//!
//! A single JSON file holds one document of the form
//!
//! ```text
//! {
//!     "Content": [ record, record, ... ]
//! }
//! ```
//!
//! and a [`RecordStore`] handle guards every read-modify-write of that file
//! with one in-process lock.
//!
//! # Usage
//!
//! ```no_run
//! use serde_json::json;
//! use tsjson::storage::RecordStore;
//!
//! let store = RecordStore::open("./data/users.json");
//!
//! let alice = json!({"id": 1, "name": "Alice"}).as_object().cloned().unwrap();
//! store.append_content(alice);
//!
//! let found = store.find_by_uid(&json!(1), "id");
//! assert!(found.is_some());
//! ```

mod codec;
mod config;
mod error;
mod store;
mod types;

// Re-export public API
pub use codec::{decode, encode};
pub use config::StoreConfig;
pub use error::{StoreError, StoreResult};
pub use store::RecordStore;
pub use types::{skeleton, Document, Record, CONTENT_KEY};
