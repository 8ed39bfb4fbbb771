//! Display records for the list and detail views
//!
//! All fallback rules live here. Every field resolves through a fixed order
//! of sources and ends in a placeholder, so views never see an empty field.
//! Empty strings count as missing.
//!
//! | field          | order                                                      |
//! |----------------|------------------------------------------------------------|
//! | title          | catalog, local, [`UNKNOWN`]                                |
//! | image          | catalog thumbnail, local image (https), [`NO_IMAGE`]       |
//! | publisher      | catalog, [`UNKNOWN`]                                       |
//! | published_date | catalog with `-` as `/`, [`UNKNOWN`]                       |
//! | price          | catalog list price, [`UNKNOWN`]                            |
//! | description    | catalog, local (HTML stripped), [`UNKNOWN`]                |
//! | buy_link       | catalog, none                                              |

use serde::Serialize;

use crate::domain::{Book, CatalogRecord, ListPrice};
use crate::text::{non_empty, strip_html, upgrade_https};

/// Placeholder for missing text fields
pub const UNKNOWN: &str = "unknown";

/// Placeholder cover image
pub const NO_IMAGE: &str = "/no-image.png";

/// Fully populated detail view record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailRecord {
    pub title: String,
    pub image: String,
    pub publisher: String,
    pub published_date: String,
    pub price: String,
    pub description: String,
    /// `None` renders as a disabled purchase link
    pub buy_link: Option<String>,
}

impl DetailRecord {
    /// Resolve every field from the catalog record and/or the local book
    ///
    /// Returns `None` when neither source is available, which the view shows
    /// as "unavailable".
    pub fn resolve(catalog: Option<&CatalogRecord>, local: Option<&Book>) -> Option<Self> {
        if catalog.is_none() && local.is_none() {
            return None;
        }

        let title = non_empty(catalog.and_then(|c| c.title.as_deref()))
            .or_else(|| non_empty(local.map(|b| b.title.as_str())))
            .unwrap_or(UNKNOWN)
            .to_string();

        let image = non_empty(catalog.and_then(|c| c.thumbnail.as_deref()))
            .or_else(|| non_empty(local.map(|b| b.image.as_str())))
            .map(upgrade_https)
            .unwrap_or_else(|| NO_IMAGE.to_string());

        let publisher = non_empty(catalog.and_then(|c| c.publisher.as_deref()))
            .unwrap_or(UNKNOWN)
            .to_string();

        let published_date = non_empty(catalog.and_then(|c| c.published_date.as_deref()))
            .map(|d| d.replace('-', "/"))
            .unwrap_or_else(|| UNKNOWN.to_string());

        let price = catalog
            .and_then(|c| c.list_price.as_ref())
            .and_then(format_price)
            .unwrap_or_else(|| UNKNOWN.to_string());

        let description = non_empty(catalog.and_then(|c| c.description.as_deref()))
            .or_else(|| non_empty(local.map(|b| b.description.as_str())))
            .map(strip_html)
            .unwrap_or_else(|| UNKNOWN.to_string());

        let buy_link = non_empty(catalog.and_then(|c| c.buy_link.as_deref())).map(str::to_string);

        Some(Self {
            title,
            image,
            publisher,
            published_date,
            price,
            description,
            buy_link,
        })
    }
}

/// A book as shown on the index list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookSummary {
    pub id: u64,
    pub title: String,
    pub image: String,
    pub read_date: String,
    pub memo: String,
    pub description: String,
}

impl From<&Book> for BookSummary {
    fn from(book: &Book) -> Self {
        let image = if book.image.is_empty() {
            NO_IMAGE.to_string()
        } else {
            upgrade_https(&book.image)
        };

        Self {
            id: book.id,
            title: book.title.clone(),
            image,
            read_date: book.read_date.clone(),
            memo: book.memo.clone(),
            description: book.description.clone(),
        }
    }
}

/// Format a list price for display
///
/// Yen (or an unlabelled amount) is shown as whole yen with digit grouping,
/// e.g. `1,980円`. Other currencies keep their cents and code.
/// Zero and non-finite amounts count as missing.
pub fn format_price(price: &ListPrice) -> Option<String> {
    if !price.amount.is_finite() || price.amount <= 0.0 {
        return None;
    }

    match price.currency_code.as_deref() {
        None | Some("JPY") => Some(format!("{}円", group_digits(price.amount.round() as u64))),
        Some(code) => {
            let cents = (price.amount * 100.0).round() as u64;
            Some(format!(
                "{}.{:02} {}",
                group_digits(cents / 100),
                cents % 100,
                code
            ))
        }
    }
}

fn group_digits(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> CatalogRecord {
        CatalogRecord {
            id: "vol".to_string(),
            title: Some("Catalog Title".to_string()),
            description: Some("<p>Catalog<br/> text</p>".to_string()),
            thumbnail: Some("http://img/catalog".to_string()),
            publisher: Some("Publisher".to_string()),
            published_date: Some("2020-04-01".to_string()),
            list_price: Some(ListPrice {
                amount: 1980.0,
                currency_code: Some("JPY".to_string()),
            }),
            buy_link: Some("https://buy".to_string()),
        }
    }

    fn local() -> Book {
        Book {
            id: 1,
            title: "Local Title".to_string(),
            image: "http://img/local".to_string(),
            read_date: String::new(),
            memo: String::new(),
            description: "Local text".to_string(),
        }
    }

    #[test]
    fn test_unavailable_without_sources() {
        assert_eq!(DetailRecord::resolve(None, None), None);
    }

    #[test]
    fn test_catalog_wins() {
        let record = DetailRecord::resolve(Some(&catalog()), Some(&local())).unwrap();
        assert_eq!(record.title, "Catalog Title");
        assert_eq!(record.image, "https://img/catalog");
        assert_eq!(record.publisher, "Publisher");
        assert_eq!(record.published_date, "2020/04/01");
        assert_eq!(record.price, "1,980円");
        assert_eq!(record.description, "Catalog text");
        assert_eq!(record.buy_link.as_deref(), Some("https://buy"));
    }

    #[test]
    fn test_title_falls_back_to_local_then_unknown() {
        let mut c = catalog();
        c.title = Some(String::new());
        let record = DetailRecord::resolve(Some(&c), Some(&local())).unwrap();
        assert_eq!(record.title, "Local Title");

        let mut b = local();
        b.title.clear();
        let record = DetailRecord::resolve(Some(&c), Some(&b)).unwrap();
        assert_eq!(record.title, UNKNOWN);
    }

    #[test]
    fn test_image_falls_back_to_local_then_placeholder() {
        let mut c = catalog();
        c.thumbnail = None;
        let record = DetailRecord::resolve(Some(&c), Some(&local())).unwrap();
        assert_eq!(record.image, "https://img/local");

        let record = DetailRecord::resolve(Some(&c), None).unwrap();
        assert_eq!(record.image, NO_IMAGE);
    }

    #[test]
    fn test_catalog_only_fields_default_to_unknown() {
        let record = DetailRecord::resolve(None, Some(&local())).unwrap();
        assert_eq!(record.title, "Local Title");
        assert_eq!(record.image, "https://img/local");
        assert_eq!(record.description, "Local text");
        assert_eq!(record.publisher, UNKNOWN);
        assert_eq!(record.published_date, UNKNOWN);
        assert_eq!(record.price, UNKNOWN);
        assert_eq!(record.buy_link, None);
    }

    #[test]
    fn test_description_falls_back_to_unknown() {
        let mut b = local();
        b.description.clear();
        let mut c = catalog();
        c.description = None;
        let record = DetailRecord::resolve(Some(&c), Some(&b)).unwrap();
        assert_eq!(record.description, UNKNOWN);
    }

    #[test]
    fn test_format_price() {
        let yen = |amount| ListPrice {
            amount,
            currency_code: Some("JPY".to_string()),
        };
        assert_eq!(format_price(&yen(1980.0)).as_deref(), Some("1,980円"));
        assert_eq!(format_price(&yen(1234567.0)).as_deref(), Some("1,234,567円"));
        assert_eq!(format_price(&yen(500.0)).as_deref(), Some("500円"));
        assert_eq!(format_price(&yen(0.0)), None);

        let usd = ListPrice {
            amount: 1299.5,
            currency_code: Some("USD".to_string()),
        };
        assert_eq!(format_price(&usd).as_deref(), Some("1,299.50 USD"));
    }

    #[test]
    fn test_summary_upgrades_image() {
        let summary = BookSummary::from(&local());
        assert_eq!(summary.image, "https://img/local");

        let mut b = local();
        b.image.clear();
        assert_eq!(BookSummary::from(&b).image, NO_IMAGE);
    }
}
