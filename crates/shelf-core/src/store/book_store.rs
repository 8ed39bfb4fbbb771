//! The persisted book list
//!
//! `BookStore` owns the canonical, insertion-ordered list and writes the whole
//! list back to its storage key after every accepted mutation.

use thiserror::Error;

use super::storage::{KeyValueStorage, StorageError};
use crate::domain::{Book, BookPatch, NewBook};
use crate::text::is_valid_read_date;

/// Default storage key for the book list
pub const DEFAULT_STORAGE_KEY: &str = "books";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Book not found: {0}")]
    NotFound(u64),
    #[error("Invalid read date {0:?}, expected YYYY/MM/DD or empty")]
    InvalidReadDate(String),
    #[error("No ids left after {0}")]
    IdsExhausted(u64),
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Why the stored list could not be used at load time
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadWarning {
    /// The stored value is not a JSON array of books
    Malformed(String),
    /// The storage backend failed to read
    Unreadable(StorageError),
}

impl std::fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadWarning::Malformed(msg) => write!(f, "stored list is malformed: {}", msg),
            LoadWarning::Unreadable(e) => write!(f, "stored list is unreadable: {}", e),
        }
    }
}

/// Result of a mutation
///
/// The in-memory change always stands. `warning` is set when the
/// write-through failed and the durable copy is now behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOutcome<T> {
    pub value: T,
    pub warning: Option<StorageError>,
}

impl<T> WriteOutcome<T> {
    pub fn is_persisted(&self) -> bool {
        self.warning.is_none()
    }
}

/// Insertion-ordered list of books with write-through durability
pub struct BookStore {
    storage: Box<dyn KeyValueStorage>,
    key: String,
    books: Vec<Book>,
    load_warning: Option<LoadWarning>,
    /// Raw malformed value, copied to the backup key before it is overwritten
    unparsed: Option<String>,
}

impl BookStore {
    /// Load the list stored under `key`
    ///
    /// A missing value yields an empty list. A malformed or unreadable value
    /// also yields an empty list and is reported by [`BookStore::load_warning`];
    /// the stored value is left alone until the next write. A malformed value
    /// is copied to [`BookStore::backup_key`] before that write replaces it.
    pub fn load(
        storage: impl KeyValueStorage + 'static,
        key: impl Into<String>,
    ) -> Result<Self, StoreError> {
        Self::load_boxed(Box::new(storage), key)
    }

    pub fn load_boxed(
        storage: Box<dyn KeyValueStorage>,
        key: impl Into<String>,
    ) -> Result<Self, StoreError> {
        let key = key.into();
        super::storage::validate_key(&key)?;

        let mut unparsed = None;
        let (books, load_warning) = match storage.get(&key) {
            Ok(None) => (Vec::new(), None),
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Book>>(&raw) {
                Ok(books) => (books, None),
                Err(e) => {
                    unparsed = Some(raw);
                    (Vec::new(), Some(LoadWarning::Malformed(e.to_string())))
                }
            },
            Err(e) => (Vec::new(), Some(LoadWarning::Unreadable(e))),
        };

        match &load_warning {
            Some(warning) => {
                tracing::warn!(key = %key, "Resetting book list to empty: {}", warning);
            }
            None => {
                tracing::info!(key = %key, count = books.len(), "Loaded book list");
            }
        }

        Ok(Self {
            storage,
            key,
            books,
            load_warning,
            unparsed,
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn load_warning(&self) -> Option<&LoadWarning> {
        self.load_warning.as_ref()
    }

    /// Key a malformed stored value is preserved under, `{key}-corrupt`
    pub fn backup_key(&self) -> String {
        format!("{}-corrupt", self.key)
    }

    /// Current list, in insertion order
    pub fn snapshot(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn get(&self, id: u64) -> Option<&Book> {
        self.books.iter().find(|b| b.id == id)
    }

    /// Id the next appended book will receive
    ///
    /// Derived from the last element only. There is no deletion, so the last
    /// element always carries the largest id; if removal is ever added this
    /// must scan for the maximum instead. `None` once the last id is `u64::MAX`.
    pub fn next_id(&self) -> Option<u64> {
        match self.books.last() {
            Some(last) => last.id.checked_add(1),
            None => Some(1),
        }
    }

    /// Append a book, assigning its id
    pub fn append(&mut self, book: NewBook) -> Result<WriteOutcome<Book>, StoreError> {
        let id = match self.next_id() {
            Some(id) => id,
            None => return Err(StoreError::IdsExhausted(u64::MAX)),
        };
        let book = book.into_book(id);
        self.books.push(book.clone());
        tracing::debug!(id = book.id, title = %book.title, "Appended book");

        let warning = self.write_through();
        Ok(WriteOutcome {
            value: book,
            warning,
        })
    }

    /// Replace the read date and/or memo of the book with `id`
    pub fn update(&mut self, id: u64, patch: &BookPatch) -> Result<WriteOutcome<Book>, StoreError> {
        if let Some(read_date) = &patch.read_date {
            if !is_valid_read_date(read_date) {
                return Err(StoreError::InvalidReadDate(read_date.clone()));
            }
        }

        let book = self
            .books
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or(StoreError::NotFound(id))?;
        patch.apply(book);
        let updated = book.clone();
        tracing::debug!(id, "Updated book");

        let warning = self.write_through();
        Ok(WriteOutcome {
            value: updated,
            warning,
        })
    }

    /// Serialize the full list under the store's key
    ///
    /// A malformed value found at load time is backed up first; if that copy
    /// cannot be written the stored value is not replaced.
    pub fn save(&mut self) -> Result<(), StorageError> {
        self.preserve_unparsed()?;
        let json = serde_json::to_string(&self.books)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.storage.set(&self.key, &json)
    }

    fn preserve_unparsed(&mut self) -> Result<(), StorageError> {
        if let Some(raw) = &self.unparsed {
            let backup_key = self.backup_key();
            self.storage.set(&backup_key, raw)?;
            tracing::warn!(key = %self.key, backup = %backup_key, "Backed up malformed book list");
            self.unparsed = None;
        }
        Ok(())
    }

    fn write_through(&mut self) -> Option<StorageError> {
        match self.save() {
            Ok(()) => {
                self.load_warning = None;
                None
            }
            Err(e) => {
                tracing::warn!(key = %self.key, "Failed to persist book list: {}", e);
                Some(e)
            }
        }
    }
}

impl std::fmt::Debug for BookStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BookStore")
            .field("key", &self.key)
            .field("books", &self.books.len())
            .field("load_warning", &self.load_warning)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStorage;
    use std::sync::Arc;

    fn book(title: &str) -> NewBook {
        NewBook::new(title)
    }

    #[test]
    fn test_append_to_empty_store_assigns_one() {
        let storage = Arc::new(MemoryStorage::new());
        let mut store = BookStore::load(storage.clone(), "books").unwrap();

        let outcome = store.append(book("A")).unwrap();
        assert_eq!(outcome.value.id, 1);
        assert!(outcome.is_persisted());

        let raw = storage.get("books").unwrap().unwrap();
        assert_eq!(
            raw,
            r#"[{"id":1,"title":"A","image":"","readDate":"","memo":"","description":""}]"#
        );
    }

    #[test]
    fn test_append_uses_last_id() {
        let storage = Arc::new(MemoryStorage::new());
        storage
            .set(
                "books",
                r#"[{"id":7,"title":"x","image":"","readDate":"","memo":"","description":""},
                    {"id":3,"title":"y","image":"","readDate":"","memo":"","description":""}]"#,
            )
            .unwrap();
        let mut store = BookStore::load(storage, "books").unwrap();

        assert_eq!(store.append(book("z")).unwrap().value.id, 4);
    }

    #[test]
    fn test_update_missing_id_reports_not_found() {
        let storage = Arc::new(MemoryStorage::new());
        let mut store = BookStore::load(storage.clone(), "books").unwrap();
        store.append(book("A")).unwrap();
        let before = storage.get("books").unwrap();

        let err = store.update(9, &BookPatch::new().memo("x")).unwrap_err();
        assert_eq!(err, StoreError::NotFound(9));
        assert_eq!(storage.get("books").unwrap(), before);
    }

    #[test]
    fn test_update_rejects_bad_read_date() {
        let mut store = BookStore::load(MemoryStorage::new(), "books").unwrap();
        store.append(book("A")).unwrap();

        let err = store
            .update(1, &BookPatch::new().read_date("yesterday").memo("m"))
            .unwrap_err();
        assert_eq!(err, StoreError::InvalidReadDate("yesterday".to_string()));
        assert_eq!(store.get(1).unwrap().memo, "");
    }

    #[test]
    fn test_malformed_value_resets_with_warning() {
        let storage = Arc::new(MemoryStorage::new());
        storage.insert_raw("books", "{not json");

        let mut store = BookStore::load(storage.clone(), "books").unwrap();
        assert!(store.is_empty());
        assert!(matches!(store.load_warning(), Some(LoadWarning::Malformed(_))));
        // Left in place until the next write
        assert_eq!(storage.get("books").unwrap().as_deref(), Some("{not json"));

        store.append(book("A")).unwrap();
        assert!(store.load_warning().is_none());
        assert!(storage.get("books").unwrap().unwrap().starts_with("[{\"id\":1"));
        assert_eq!(store.backup_key(), "books-corrupt");
        assert_eq!(
            storage.get("books-corrupt").unwrap().as_deref(),
            Some("{not json")
        );
    }

    #[test]
    fn test_failed_backup_keeps_malformed_value() {
        let storage = Arc::new(MemoryStorage::with_quota(16));
        storage.insert_raw("books", "{not json at all}");

        let mut store = BookStore::load(storage.clone(), "books").unwrap();
        let outcome = store.append(book("A")).unwrap();
        assert!(matches!(
            outcome.warning,
            Some(StorageError::QuotaExceeded { .. })
        ));
        assert_eq!(
            storage.get("books").unwrap().as_deref(),
            Some("{not json at all}")
        );
        assert!(store.load_warning().is_some());
    }

    #[test]
    fn test_missing_text_fields_read_as_empty() {
        let storage = Arc::new(MemoryStorage::new());
        storage.insert_raw("books", r#"[{"id":1,"title":"x"}]"#);

        let store = BookStore::load(storage, "books").unwrap();
        assert!(store.load_warning().is_none());
        let book = store.get(1).unwrap();
        assert_eq!(book.description, "");
        assert!(!book.is_read());
    }

    #[test]
    fn test_append_after_max_id_is_rejected() {
        let storage = Arc::new(MemoryStorage::new());
        storage.insert_raw(
            "books",
            &format!(r#"[{{"id":{},"title":"last"}}]"#, u64::MAX),
        );
        let mut store = BookStore::load(storage.clone(), "books").unwrap();
        let before = storage.get("books").unwrap();

        assert_eq!(store.next_id(), None);
        assert_eq!(
            store.append(book("overflow")),
            Err(StoreError::IdsExhausted(u64::MAX))
        );
        assert_eq!(store.len(), 1);
        assert_eq!(storage.get("books").unwrap(), before);
    }

    #[test]
    fn test_quota_failure_is_a_warning() {
        let mut store = BookStore::load(MemoryStorage::with_quota(10), "books").unwrap();

        let outcome = store.append(book("A long enough title")).unwrap();
        assert_eq!(outcome.value.id, 1);
        assert!(matches!(
            outcome.warning,
            Some(StorageError::QuotaExceeded { .. })
        ));
        // The in-memory list keeps the book
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_invalid_key_rejected() {
        let err = BookStore::load(MemoryStorage::new(), "a/b").unwrap_err();
        assert_eq!(
            err,
            StoreError::Storage(StorageError::InvalidKey("a/b".to_string()))
        );
    }
}
