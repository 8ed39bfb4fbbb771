//! Common traits for catalog sources

use thiserror::Error;

use crate::http::HttpError;
#[cfg(feature = "native")]
use crate::{
    domain::{CatalogPage, CatalogRecord},
    search::Keyword,
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    #[error("HTTP error: {0}")]
    Http(HttpError),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Rate limited")]
    RateLimit,
    #[error("Not found")]
    NotFound,
    #[error("Invalid query: {0}")]
    InvalidQuery(String),
}

impl From<HttpError> for SourceError {
    fn from(e: HttpError) -> Self {
        match e {
            HttpError::RateLimited => SourceError::RateLimit,
            e if e.is_not_found() => SourceError::NotFound,
            other => SourceError::Http(other),
        }
    }
}

/// Metadata about a source
pub struct SourceMetadata {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub base_url: &'static str,
    pub max_page_size: u32,
    pub requires_api_key: bool,
}

/// Read-only book catalog
#[cfg(feature = "native")]
#[async_trait::async_trait]
pub trait CatalogClient: Send + Sync {
    /// Fetch one volume by catalog id
    async fn lookup_by_id(&self, id: &str) -> Result<CatalogRecord, SourceError>;

    /// Title search, `max_results` records starting at `start_index`
    async fn search_by_title(
        &self,
        keyword: &Keyword,
        start_index: u32,
        max_results: u32,
    ) -> Result<CatalogPage, SourceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_mapping() {
        assert_eq!(SourceError::from(HttpError::RateLimited), SourceError::RateLimit);
        assert_eq!(SourceError::from(HttpError::Status(404)), SourceError::NotFound);
        assert_eq!(
            SourceError::from(HttpError::Status(503)),
            SourceError::Http(HttpError::Status(503))
        );
    }
}
