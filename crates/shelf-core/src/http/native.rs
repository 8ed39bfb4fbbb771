//! reqwest-backed client

use std::time::{Duration, Instant};

use reqwest::{header, Client, Url};

use super::HttpError;

/// JSON GET client shared by catalog requests
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, HttpError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .user_agent(user_agent)
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| HttpError::Request(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// GET `base` with `params` appended and return the body of a 2xx response
    pub async fn get_text(&self, base: &str, params: &[(&str, &str)]) -> Result<String, HttpError> {
        let url = if params.is_empty() {
            Url::parse(base)
        } else {
            Url::parse_with_params(base, params)
        }
        .map_err(|_| HttpError::InvalidUrl(base.to_string()))?;

        let started = Instant::now();
        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                HttpError::Timeout
            } else {
                HttpError::Request(e.to_string())
            }
        })?;

        let status = response.status();
        tracing::debug!(
            url = %response.url(),
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Catalog response"
        );

        if !status.is_success() {
            return Err(HttpError::from_status(status.as_u16()));
        }

        response
            .text()
            .await
            .map_err(|e| HttpError::Body(e.to_string()))
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient").finish_non_exhaustive()
    }
}
