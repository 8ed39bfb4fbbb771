//! Shelf Server - book tracker API
//!
//! HTTP server backing the index, search, edit and detail views.

pub mod http;
pub mod views;

use std::sync::Arc;

use axum::{
    routing::{delete, get, post},
    Router,
};
use thiserror::Error;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use shelf_core::{
    BookStore, CatalogClient, FileStorage, GoogleBooksSource, SearchPaging, ShelfConfig,
    ShelfError,
};

use crate::views::DetailViews;

/// Log filter used when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "shelf_server=info,shelf_core=info,tower_http=info";

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Setup failed: {0}")]
    Setup(#[from] ShelfError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shared application state
pub struct AppState {
    pub store: RwLock<BookStore>,
    pub catalog: Arc<dyn CatalogClient>,
    /// Lookup slots of the open detail views, keyed by `nav`
    pub detail_views: DetailViews,
    pub paging: SearchPaging,
    pub preview_chars: usize,
}

impl AppState {
    pub fn new(
        store: BookStore,
        catalog: Arc<dyn CatalogClient>,
        paging: SearchPaging,
        preview_chars: usize,
    ) -> Self {
        Self {
            store: RwLock::new(store),
            catalog,
            detail_views: DetailViews::new(),
            paging,
            preview_chars,
        }
    }

    /// File-backed store and the Google Books catalog, as configured
    pub fn from_config(config: &ShelfConfig) -> Result<Self, ShelfError> {
        let data_dir = config.data_dir();
        let storage = FileStorage::new(&data_dir)?;
        let store = BookStore::load(storage, config.storage.key.clone())?;
        tracing::info!("Book list stored in {}", data_dir.display());

        let catalog = GoogleBooksSource::from_config(&config.catalog)?;
        let paging = config.catalog.paging()?;

        Ok(Self::new(
            store,
            Arc::new(catalog),
            paging,
            config.catalog.description_preview_chars,
        ))
    }
}

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Index and edit views
        .route("/books", get(http::list_books).post(http::create_book))
        .route("/books/{id}", get(http::get_book).put(http::update_book))
        // Search view
        .route("/search", get(http::search))
        // Detail view
        .route("/detail/{catalog_id}", get(http::get_detail))
        .route("/detail/{catalog_id}/add", post(http::add_from_detail))
        .route("/detail/views/{view}", delete(http::close_detail_view))
        // System
        .route("/status", get(http::get_status))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the server
pub async fn serve(addr: &str, state: Arc<AppState>) -> Result<(), ServerError> {
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Shelf server listening on {}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
