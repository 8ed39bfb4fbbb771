//! shelf-core: core library for the shelf personal book tracker
//!
//! This library provides:
//! - The persisted book list (`BookStore`) with write-through storage
//! - Key-value storage backends (file and in-memory)
//! - The Google Books catalog client
//! - Search keyword validation, paging and restorable search state
//! - Display resolution for the list and detail views
//! - Navigation-scoped lookups that discard superseded results

pub mod config;
pub mod display;
pub mod domain;
pub mod error;
pub mod http;
#[cfg(feature = "native")]
pub mod lookup;
pub mod search;
pub mod sources;
pub mod store;
pub mod text;

pub use config::{ConfigError, ShelfConfig};
pub use display::{BookSummary, DetailRecord, NO_IMAGE, UNKNOWN};
pub use domain::{Book, BookPatch, CatalogPage, CatalogRecord, ListPrice, NewBook, SearchCard};
pub use error::{Result, ShelfError};
#[cfg(feature = "native")]
pub use lookup::{LatestLookup, LookupOutcome};
pub use search::{
    back_link, Keyword, KeywordError, SearchError, SearchPage, SearchPaging, SearchRequest,
};
#[cfg(feature = "native")]
pub use sources::CatalogClient;
pub use sources::{GoogleBooksSource, SourceError};
pub use store::{
    BookStore, FileStorage, KeyValueStorage, LoadWarning, MemoryStorage, StorageError, StoreError,
    WriteOutcome,
};

/// Returns the version of shelf-core
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
