//! Error types for shelf-core

use thiserror::Error;

use crate::config::ConfigError;
use crate::http::HttpError;
use crate::search::{KeywordError, SearchError};
use crate::sources::SourceError;
use crate::store::{StorageError, StoreError};

/// Result type alias for shelf operations
pub type Result<T> = std::result::Result<T, ShelfError>;

/// Main error type for shelf operations
#[derive(Error, Debug)]
pub enum ShelfError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Search error: {0}")]
    Search(#[from] SearchError),

    #[error("Catalog error: {0}")]
    Source(#[from] SourceError),

    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl From<KeywordError> for ShelfError {
    fn from(e: KeywordError) -> Self {
        ShelfError::Search(SearchError::Keyword(e))
    }
}
