//! Catalog search: keyword validation, paging, and restorable search state
//!
//! A search is described by a [`SearchRequest`] (keyword + one-based page).
//! Its query string form (`?keyword=...&page=N`) is what the search route
//! carries, so a result page can be restored from its URL and the detail
//! view can link back to it.

mod keyword;
mod paging;

pub use keyword::{Keyword, KeywordError, FORBIDDEN_CHARACTERS};
pub use paging::{SearchPaging, MAX_PAGE_SIZE};

use serde::Serialize;
use thiserror::Error;

use crate::domain::SearchCard;
use crate::sources::SourceError;

/// Path of the search route
pub const SEARCH_PATH: &str = "/search";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error(transparent)]
    Keyword(#[from] KeywordError),
    #[error("Page {page} is out of range (1..={max_page})")]
    PageOutOfRange { page: u32, max_page: u32 },
    #[error("Invalid page: {0}")]
    InvalidPage(String),
    #[error("Invalid paging: {0}")]
    InvalidPaging(String),
    #[error("Catalog error: {0}")]
    Source(#[from] SourceError),
}

/// Validated search state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub keyword: Keyword,
    pub page: u32,
}

impl SearchRequest {
    pub fn new(keyword: &str, page: u32) -> Result<Self, SearchError> {
        if page == 0 {
            return Err(SearchError::InvalidPage("pages start at 1".to_string()));
        }
        Ok(Self {
            keyword: Keyword::parse(keyword)?,
            page,
        })
    }

    /// Build from raw route parameters; a missing page means page 1
    pub fn from_params(keyword: Option<&str>, page: Option<&str>) -> Result<Self, SearchError> {
        let page = match page {
            None | Some("") => 1,
            Some(raw) => raw
                .parse::<u32>()
                .map_err(|_| SearchError::InvalidPage(raw.to_string()))?,
        };
        Self::new(keyword.unwrap_or_default(), page)
    }

    /// Parse `?keyword=...&page=N` (leading `?` optional)
    pub fn from_query_string(query: &str) -> Result<Self, SearchError> {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut keyword = None;
        let mut page = None;
        for (name, value) in url::form_urlencoded::parse(query.as_bytes()) {
            match name.as_ref() {
                "keyword" => keyword = Some(value.into_owned()),
                "page" => page = Some(value.into_owned()),
                _ => {}
            }
        }
        Self::from_params(keyword.as_deref(), page.as_deref())
    }

    pub fn to_query_string(&self) -> String {
        format!(
            "?keyword={}&page={}",
            urlencoding::encode(self.keyword.as_str()),
            self.page
        )
    }

    /// Route that restores this search
    pub fn path(&self) -> String {
        format!("{}{}", SEARCH_PATH, self.to_query_string())
    }
}

/// Link from a detail view back to the results it was opened from
///
/// `from_search` is the transient navigation state: the query string of the
/// originating search. Anything that is not a query string is ignored.
pub fn back_link(from_search: Option<&str>) -> String {
    match from_search {
        Some(query) if query.starts_with('?') && query.len() > 1 => {
            format!("{}{}", SEARCH_PATH, query)
        }
        _ => SEARCH_PATH.to_string(),
    }
}

/// One page of search results, ready to render
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchPage {
    pub keyword: Keyword,
    pub page: u32,
    pub page_size: u32,
    /// Total reported by the catalog
    pub total_count: u64,
    /// Total reachable under the local cap
    pub addressable_count: u64,
    pub total_pages: u32,
    /// Query string restoring this page
    pub query: String,
    pub cards: Vec<SearchCard>,
}

/// Run a validated search against the catalog
///
/// The page is range-checked before anything is sent.
#[cfg(feature = "native")]
pub async fn run_search(
    client: &dyn crate::sources::CatalogClient,
    request: &SearchRequest,
    paging: &SearchPaging,
    preview_chars: usize,
) -> Result<SearchPage, SearchError> {
    let start_index = paging.start_index(request.page)?;
    let max_results = paging.max_results(start_index);

    let result = client
        .search_by_title(&request.keyword, start_index, max_results)
        .await?;

    let cards = result
        .items
        .iter()
        .take(max_results as usize)
        .map(|record| SearchCard::from_record(record, preview_chars))
        .collect();

    Ok(SearchPage {
        keyword: request.keyword.clone(),
        page: request.page,
        page_size: paging.page_size(),
        total_count: result.total_count,
        addressable_count: paging.addressable(result.total_count),
        total_pages: paging.total_pages(result.total_count),
        query: request.to_query_string(),
        cards,
    })
}
