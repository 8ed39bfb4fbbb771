//! Text helpers for captured and displayed catalog data

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;

/// Format used for `Book::read_date`
pub const READ_DATE_FORMAT: &str = "%Y/%m/%d";

lazy_static! {
    static ref LINE_BREAK: Regex = Regex::new(r"(?i)<br\s*/?>").unwrap();
    static ref ANY_TAG: Regex = Regex::new(r"</?[^>]+>").unwrap();
    static ref READ_DATE: Regex = Regex::new(r"^\d{4}/\d{2}/\d{2}$").unwrap();
}

/// Strip HTML markup from catalog descriptions
///
/// Line breaks are dropped first, then any remaining open or close tag.
pub fn strip_html(text: &str) -> String {
    let without_breaks = LINE_BREAK.replace_all(text, "");
    ANY_TAG.replace_all(&without_breaks, "").into_owned()
}

/// Upgrade an insecure `http://` URL to `https://`
///
/// Only the scheme prefix is touched; anything else is returned unchanged.
pub fn upgrade_https(url: &str) -> String {
    match url.strip_prefix("http://") {
        Some(rest) => format!("https://{}", rest),
        None => url.to_string(),
    }
}

/// Truncate to at most `max` characters (not bytes)
pub fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

/// Format a calendar date as a read date (`YYYY/MM/DD`)
pub fn format_read_date(date: NaiveDate) -> String {
    date.format(READ_DATE_FORMAT).to_string()
}

/// Parse a read date
///
/// Returns `Ok(None)` for the empty string ("not yet read").
pub fn parse_read_date(value: &str) -> Result<Option<NaiveDate>, chrono::ParseError> {
    if value.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(value, READ_DATE_FORMAT).map(Some)
}

/// Whether `value` is an acceptable stored read date
pub fn is_valid_read_date(value: &str) -> bool {
    value.is_empty() || (READ_DATE.is_match(value) && parse_read_date(value).is_ok())
}

/// Treat empty strings as missing
pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_html() {
        let input = "<p>First line<br>second<BR/>third<br />end</p>";
        assert_eq!(strip_html(input), "First linesecondthirdend");
    }

    #[test]
    fn test_strip_html_plain_text_unchanged() {
        assert_eq!(strip_html("No markup here"), "No markup here");
    }

    #[test]
    fn test_upgrade_https() {
        assert_eq!(
            upgrade_https("http://books.google.com/x.jpg"),
            "https://books.google.com/x.jpg"
        );
        assert_eq!(upgrade_https("https://a/b"), "https://a/b");
        assert_eq!(upgrade_https("/no-image.png"), "/no-image.png");
        assert_eq!(upgrade_https(""), "");
    }

    #[test]
    fn test_truncate_chars_counts_characters() {
        assert_eq!(truncate_chars("吾輩は猫である", 3), "吾輩は");
        assert_eq!(truncate_chars("short", 40), "short");
    }

    #[test]
    fn test_read_date_round_trip() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let formatted = format_read_date(date);
        assert_eq!(formatted, "2024/01/01");
        assert_eq!(parse_read_date(&formatted).unwrap(), Some(date));
        assert_eq!(parse_read_date("").unwrap(), None);
    }

    #[test]
    fn test_is_valid_read_date() {
        assert!(is_valid_read_date(""));
        assert!(is_valid_read_date("2024/02/29"));
        assert!(!is_valid_read_date("2023/02/29"));
        assert!(!is_valid_read_date("2024-01-01"));
        assert!(!is_valid_read_date("2024/1/1"));
    }
}
