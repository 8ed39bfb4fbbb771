//! Google Books source plugin
//!
//! API docs: https://developers.google.com/books/docs/v1/using
//! `maxResults` is capped at 40 by the API.

use super::traits::{SourceError, SourceMetadata};
use crate::domain::{CatalogPage, CatalogRecord, ListPrice};
use serde::Deserialize;

#[cfg(feature = "native")]
use crate::http::HttpClient;
#[cfg(feature = "native")]
use crate::search::Keyword;

pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/books/v1";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VolumeList {
    #[serde(default)]
    total_items: u64,
    #[serde(default)]
    items: Vec<Volume>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Volume {
    id: String,
    #[serde(default)]
    volume_info: Option<VolumeInfo>,
    #[serde(default)]
    sale_info: Option<SaleInfo>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VolumeInfo {
    title: Option<String>,
    description: Option<String>,
    publisher: Option<String>,
    published_date: Option<String>,
    image_links: Option<ImageLinks>,
}

#[derive(Debug, Deserialize)]
struct ImageLinks {
    thumbnail: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SaleInfo {
    list_price: Option<Price>,
    buy_link: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Price {
    amount: Option<f64>,
    currency_code: Option<String>,
}

pub struct GoogleBooksSource {
    #[cfg(feature = "native")]
    client: HttpClient,
    base_url: String,
}

impl GoogleBooksSource {
    #[cfg(feature = "native")]
    pub fn new(client: HttpClient, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    #[cfg(feature = "native")]
    pub fn from_config(config: &crate::config::CatalogConfig) -> Result<Self, SourceError> {
        let client = HttpClient::new(
            &config.user_agent,
            std::time::Duration::from_secs(config.timeout_secs),
        )?;
        Ok(Self::new(client, config.base_url.clone()))
    }

    pub fn metadata() -> SourceMetadata {
        SourceMetadata {
            id: "googlebooks",
            name: "Google Books",
            description: "Book metadata and sale information from Google Books",
            base_url: DEFAULT_BASE_URL,
            max_page_size: 40,
            requires_api_key: false,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL for a single-volume lookup
    pub fn volume_url(&self, id: &str) -> String {
        format!("{}/volumes/{}", self.base_url, urlencoding::encode(id))
    }

    /// Parse a `volumes` search response
    pub fn parse_search_response(json: &str) -> Result<CatalogPage, SourceError> {
        let list: VolumeList = serde_json::from_str(json)
            .map_err(|e| SourceError::Parse(format!("Invalid Google Books JSON: {}", e)))?;

        Ok(CatalogPage {
            items: list.items.into_iter().map(Self::parse_volume).collect(),
            total_count: list.total_items,
        })
    }

    /// Parse a single `volumes/{id}` response
    pub fn parse_volume_response(json: &str) -> Result<CatalogRecord, SourceError> {
        let volume: Volume = serde_json::from_str(json)
            .map_err(|e| SourceError::Parse(format!("Invalid Google Books JSON: {}", e)))?;
        Ok(Self::parse_volume(volume))
    }

    fn parse_volume(volume: Volume) -> CatalogRecord {
        let info = volume.volume_info;
        let sale = volume.sale_info;

        let list_price = sale
            .as_ref()
            .and_then(|s| s.list_price.as_ref())
            .and_then(|p| {
                p.amount.map(|amount| ListPrice {
                    amount,
                    currency_code: p.currency_code.clone(),
                })
            });

        match info {
            Some(info) => CatalogRecord {
                id: volume.id,
                title: info.title,
                description: info.description,
                thumbnail: info.image_links.and_then(|l| l.thumbnail),
                publisher: info.publisher,
                published_date: info.published_date,
                list_price,
                buy_link: sale.and_then(|s| s.buy_link),
            },
            None => CatalogRecord {
                id: volume.id,
                list_price,
                buy_link: sale.and_then(|s| s.buy_link),
                ..Default::default()
            },
        }
    }
}

#[cfg(feature = "native")]
#[async_trait::async_trait]
impl super::traits::CatalogClient for GoogleBooksSource {
    async fn lookup_by_id(&self, id: &str) -> Result<CatalogRecord, SourceError> {
        if id.is_empty() {
            return Err(SourceError::InvalidQuery("empty volume id".to_string()));
        }

        tracing::debug!(id, "Fetching volume");
        let body = self.client.get_text(&self.volume_url(id), &[]).await?;
        Self::parse_volume_response(&body)
    }

    async fn search_by_title(
        &self,
        keyword: &Keyword,
        start_index: u32,
        max_results: u32,
    ) -> Result<CatalogPage, SourceError> {
        let query = keyword.title_query();
        let start_index = start_index.to_string();
        let max_results = max_results.to_string();
        let params = [
            ("q", query.as_str()),
            ("startIndex", start_index.as_str()),
            ("maxResults", max_results.as_str()),
        ];

        tracing::debug!(keyword = %keyword, start_index = %start_index, "Searching volumes");
        let body = self
            .client
            .get_text(&format!("{}/volumes", self.base_url), &params)
            .await?;
        Self::parse_search_response(&body)
    }
}
