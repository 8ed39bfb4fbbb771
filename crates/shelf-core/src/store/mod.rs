//! Persistence for the book list

mod book_store;
mod storage;

pub use book_store::{BookStore, LoadWarning, StoreError, WriteOutcome, DEFAULT_STORAGE_KEY};
pub use storage::{validate_key, FileStorage, KeyValueStorage, MemoryStorage, StorageError};
