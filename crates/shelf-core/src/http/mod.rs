//! HTTP transport for the catalog client
//!
//! Only the pieces the catalog needs: GET with query parameters, a text body,
//! and errors that tell throttling and missing volumes apart from outages.

#[cfg(feature = "native")]
pub mod native;

#[cfg(feature = "native")]
pub use native::*;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HttpError {
    #[error("Request failed: {0}")]
    Request(String),
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    #[error("Request timed out")]
    Timeout,
    #[error("Rate limited")]
    RateLimited,
    #[error("Unexpected status {0}")]
    Status(u16),
    #[error("Could not read response body: {0}")]
    Body(String),
}

impl HttpError {
    /// Map a non-success status code
    pub fn from_status(status: u16) -> Self {
        match status {
            429 => HttpError::RateLimited,
            s => HttpError::Status(s),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, HttpError::Status(404))
    }
}
