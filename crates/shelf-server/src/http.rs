//! HTTP endpoint handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use shelf_core::search::run_search;
use shelf_core::{
    back_link, Book, BookPatch, BookSummary, DetailRecord, LookupOutcome, NewBook, SearchCard,
    SearchError, SearchPage, SearchRequest, SourceError, StorageError, StoreError,
};

use crate::AppState;

/// Error payload returned by every endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

pub type ApiError = (StatusCode, Json<ErrorBody>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorBody {
            error: message.into(),
        }),
    )
}

fn store_error(e: StoreError) -> ApiError {
    let status = match e {
        StoreError::NotFound(_) => StatusCode::NOT_FOUND,
        StoreError::InvalidReadDate(_) => StatusCode::BAD_REQUEST,
        StoreError::Storage(_) | StoreError::IdsExhausted(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    api_error(status, e.to_string())
}

fn search_error(e: SearchError) -> ApiError {
    match e {
        SearchError::Source(source) => source_error(source),
        SearchError::InvalidPaging(_) => {
            api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
        other => api_error(StatusCode::BAD_REQUEST, other.to_string()),
    }
}

fn source_error(e: SourceError) -> ApiError {
    match e {
        SourceError::NotFound => api_error(StatusCode::NOT_FOUND, "unavailable"),
        SourceError::InvalidQuery(_) => api_error(StatusCode::BAD_REQUEST, e.to_string()),
        other => api_error(StatusCode::BAD_GATEWAY, other.to_string()),
    }
}

/// A stored book plus the write-through result
#[derive(Debug, Serialize, Deserialize)]
pub struct WriteResponse {
    pub book: Book,
    /// Present when the change was kept in memory but not persisted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl WriteResponse {
    fn new(book: Book, warning: Option<StorageError>) -> Self {
        Self {
            book,
            warning: warning.map(|e| e.to_string()),
        }
    }
}

// === Index and edit views ===

#[derive(Debug, Serialize)]
pub struct BooksResponse {
    pub books: Vec<BookSummary>,
    pub count: usize,
}

/// List tracked books in insertion order
pub async fn list_books(State(state): State<Arc<AppState>>) -> Json<BooksResponse> {
    let store = state.store.read().await;
    let books: Vec<BookSummary> = store.snapshot().iter().map(BookSummary::from).collect();

    Json(BooksResponse {
        count: books.len(),
        books,
    })
}

/// Add a search result card to the list
pub async fn create_book(
    State(state): State<Arc<AppState>>,
    Json(card): Json<SearchCard>,
) -> Result<(StatusCode, Json<WriteResponse>), ApiError> {
    if card.title.trim().is_empty() {
        return Err(api_error(StatusCode::BAD_REQUEST, "title must not be empty"));
    }

    let mut store = state.store.write().await;
    let outcome = store
        .append(NewBook::from_card(&card))
        .map_err(store_error)?;

    Ok((
        StatusCode::CREATED,
        Json(WriteResponse::new(outcome.value, outcome.warning)),
    ))
}

/// Get a tracked book for editing
pub async fn get_book(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<Book>, ApiError> {
    let store = state.store.read().await;
    store
        .get(id)
        .cloned()
        .map(Json)
        .ok_or_else(|| store_error(StoreError::NotFound(id)))
}

/// Save the edit view's read date and memo
pub async fn update_book(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
    Json(patch): Json<BookPatch>,
) -> Result<Json<WriteResponse>, ApiError> {
    let mut store = state.store.write().await;
    let outcome = store.update(id, &patch).map_err(store_error)?;

    Ok(Json(WriteResponse::new(outcome.value, outcome.warning)))
}

// === Search view ===

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub keyword: Option<String>,
    pub page: Option<String>,
}

/// Search the catalog by title
///
/// The keyword and page are validated before the catalog is called.
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchPage>, ApiError> {
    let request = SearchRequest::from_params(query.keyword.as_deref(), query.page.as_deref())
        .map_err(search_error)?;

    let page = run_search(
        state.catalog.as_ref(),
        &request,
        &state.paging,
        state.preview_chars,
    )
    .await
    .map_err(|e| {
        tracing::warn!(keyword = %request.keyword, "Search failed: {}", e);
        search_error(e)
    })?;

    Ok(Json(page))
}

// === Detail view ===

#[derive(Debug, Deserialize)]
pub struct DetailQuery {
    /// Local book this detail view was opened for
    pub book: Option<u64>,
    /// Detail view instance; without it the lookup is not tracked
    pub nav: Option<String>,
    /// Query string of the search the view was opened from
    pub from_search: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DetailResponse {
    pub catalog_id: String,
    pub record: DetailRecord,
    pub back_link: String,
    /// False when the catalog lookup failed and local data was used
    pub from_catalog: bool,
}

/// Show a catalog record, falling back to the local book
pub async fn get_detail(
    State(state): State<Arc<AppState>>,
    Path(catalog_id): Path<String>,
    Query(query): Query<DetailQuery>,
) -> Result<Json<DetailResponse>, ApiError> {
    let catalog = Arc::clone(&state.catalog);
    let fetched = match query.nav.as_deref() {
        Some(view) => {
            let id = catalog_id.clone();
            let outcome = state
                .detail_views
                .slot(view)
                .fetch(&catalog_id, || async move { catalog.lookup_by_id(&id).await })
                .await;
            match outcome {
                LookupOutcome::Completed(result) => result,
                LookupOutcome::Superseded => {
                    return Err(api_error(
                        StatusCode::CONFLICT,
                        "superseded by a newer navigation",
                    ));
                }
            }
        }
        None => catalog.lookup_by_id(&catalog_id).await,
    };

    let catalog_record = match fetched {
        Ok(record) => Some(record),
        Err(e) => {
            tracing::warn!(catalog_id = %catalog_id, "Catalog lookup failed: {}", e);
            None
        }
    };

    let local = match query.book {
        Some(id) => state.store.read().await.get(id).cloned(),
        None => None,
    };

    let record = DetailRecord::resolve(catalog_record.as_ref(), local.as_ref())
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, "unavailable"))?;

    Ok(Json(DetailResponse {
        catalog_id,
        record,
        back_link: back_link(query.from_search.as_deref()),
        from_catalog: catalog_record.is_some(),
    }))
}

/// Capture a catalog record into the list
pub async fn add_from_detail(
    State(state): State<Arc<AppState>>,
    Path(catalog_id): Path<String>,
) -> Result<(StatusCode, Json<WriteResponse>), ApiError> {
    let record = state
        .catalog
        .lookup_by_id(&catalog_id)
        .await
        .map_err(|e| {
            tracing::warn!(catalog_id = %catalog_id, "Catalog lookup failed: {}", e);
            source_error(e)
        })?;

    let mut store = state.store.write().await;
    let outcome = store
        .append(NewBook::from_catalog(&record))
        .map_err(store_error)?;

    Ok((
        StatusCode::CREATED,
        Json(WriteResponse::new(outcome.value, outcome.warning)),
    ))
}

/// Close a detail view, cancelling its pending lookup
pub async fn close_detail_view(
    State(state): State<Arc<AppState>>,
    Path(view): Path<String>,
) -> Result<StatusCode, ApiError> {
    if state.detail_views.close(&view) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(api_error(StatusCode::NOT_FOUND, format!("no open view {}", view)))
    }
}

// === System ===

#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub version: String,
    pub storage_key: String,
    pub count: usize,
    pub load_warning: Option<String>,
}

/// Get server status
pub async fn get_status(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let store = state.store.read().await;

    Json(StatusResponse {
        version: shelf_core::version(),
        storage_key: store.key().to_string(),
        count: store.len(),
        load_warning: store.load_warning().map(|w| w.to_string()),
    })
}
