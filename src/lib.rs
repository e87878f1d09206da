//! tsjson - a thread-safe JSON record store
//!
//! This crate keeps an ordered list of records in a single JSON file of the
//! form `{"Content": [...]}` and lets many threads of one process read and
//! modify it through a shared, mutex-guarded handle.
//!
//! # Example
//!
//! ```no_run
//! use serde_json::json;
//! use tsjson::storage::RecordStore;
//!
//! let store = RecordStore::open("./chats.json");
//! let chat = json!({"chat_id": 10, "title": "general"}).as_object().cloned().unwrap();
//! store.append_content(chat.clone());
//! assert!(store.contains(&chat));
//! store.remove_by_uid(&json!(10), "chat_id");
//! ```

pub mod cli;
pub mod storage;
