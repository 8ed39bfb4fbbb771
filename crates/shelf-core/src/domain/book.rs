//! Tracked book records

use serde::{Deserialize, Serialize};

use super::catalog::{CatalogRecord, SearchCard};
use crate::display::UNKNOWN;
use crate::text::{non_empty, strip_html};

/// A book on the user's list
///
/// Field names are serialized in camelCase so the stored list stays
/// `[{id, title, image, readDate, memo, description}, ...]`.
/// Only `id` and `title` are required when reading a stored list; a missing
/// text field reads as empty.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: u64,
    pub title: String,
    /// Cover URL exactly as captured
    #[serde(default)]
    pub image: String,
    /// `YYYY/MM/DD`, or empty when not yet read
    #[serde(default)]
    pub read_date: String,
    #[serde(default)]
    pub memo: String,
    #[serde(default)]
    pub description: String,
}

impl Book {
    pub fn is_read(&self) -> bool {
        !self.read_date.is_empty()
    }
}

/// A book that has not been assigned an id yet
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct NewBook {
    pub title: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub read_date: String,
    #[serde(default)]
    pub memo: String,
    #[serde(default)]
    pub description: String,
}

impl NewBook {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Capture a search result card
    ///
    /// The card's description was already stripped and shortened when the
    /// card was built.
    pub fn from_card(card: &SearchCard) -> Self {
        Self {
            title: card.title.clone(),
            image: card.image.clone(),
            description: card.description.clone(),
            ..Default::default()
        }
    }

    /// Capture a full catalog record
    pub fn from_catalog(record: &CatalogRecord) -> Self {
        let title = non_empty(record.title.as_deref()).unwrap_or(UNKNOWN);
        let description = non_empty(record.description.as_deref())
            .map(strip_html)
            .unwrap_or_else(|| UNKNOWN.to_string());

        Self {
            title: title.to_string(),
            image: record.thumbnail.clone().unwrap_or_default(),
            description,
            ..Default::default()
        }
    }

    pub(crate) fn into_book(self, id: u64) -> Book {
        Book {
            id,
            title: self.title,
            image: self.image,
            read_date: self.read_date,
            memo: self.memo,
            description: self.description,
        }
    }
}

/// Fields the edit view may change on an existing book
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct BookPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
}

impl BookPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn read_date(mut self, read_date: impl Into<String>) -> Self {
        self.read_date = Some(read_date.into());
        self
    }

    pub fn memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = Some(memo.into());
        self
    }

    pub(crate) fn apply(&self, book: &mut Book) {
        if let Some(read_date) = &self.read_date {
            book.read_date = read_date.clone();
        }
        if let Some(memo) = &self.memo {
            book.memo = memo.clone();
        }
    }
}
