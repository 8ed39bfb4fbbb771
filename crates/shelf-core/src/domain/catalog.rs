//! Read-only metadata returned by the book catalog

use serde::{Deserialize, Serialize};

use crate::text::{non_empty, strip_html, truncate_chars};

/// Catalog list price
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ListPrice {
    pub amount: f64,
    pub currency_code: Option<String>,
}

/// A single volume from the external catalog
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct CatalogRecord {
    pub id: String,
    pub title: Option<String>,
    /// Raw description, possibly containing HTML
    pub description: Option<String>,
    pub thumbnail: Option<String>,
    pub publisher: Option<String>,
    pub published_date: Option<String>,
    pub list_price: Option<ListPrice>,
    pub buy_link: Option<String>,
}

/// One page of catalog search results
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct CatalogPage {
    pub items: Vec<CatalogRecord>,
    /// Upstream `totalItems`, before the local cap
    pub total_count: u64,
}

/// A catalog record projected for the search result list
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchCard {
    pub id: String,
    pub title: String,
    pub image: String,
    pub description: String,
}

impl SearchCard {
    pub fn from_record(record: &CatalogRecord, preview_chars: usize) -> Self {
        let description = non_empty(record.description.as_deref())
            .map(|d| truncate_chars(&strip_html(d), preview_chars))
            .unwrap_or_default();

        Self {
            id: record.id.clone(),
            title: record.title.clone().unwrap_or_default(),
            image: record.thumbnail.clone().unwrap_or_default(),
            description,
        }
    }
}
