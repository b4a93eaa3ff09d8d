// src/fetch/http.rs
// =============================================================================
// This module downloads pages over HTTP.
//
// Key functionality:
// - Makes GET requests with a per-request timeout
// - Follows up to 5 redirects
// - Classifies every failure (network, HTTP status, timeout, content type)
// - Hands successful HTML to the parser in html.rs
//
// A failed fetch is a value (PageResult with an error status), never a panic
// or an early return: one bad page must not stop the crawl.
// =============================================================================

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::{redirect, Client, Response};
use thiserror::Error;

use super::html::parse_page;

// Why a page could not be fetched
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Connection refused, DNS failure, TLS problems, broken bodies...
    #[error("network error: {0}")]
    Network(String),
    /// The server answered with a non-2xx status
    #[error("HTTP {0}")]
    HttpStatus(u16),
    /// No complete answer within the configured timeout
    #[error("request timed out")]
    Timeout,
    /// The body is not text (images, PDFs, archives...)
    #[error("unsupported content type '{0}'")]
    UnsupportedContent(String),
}

impl FetchError {
    // Short label used in log fields
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Network(_) => "network",
            FetchError::HttpStatus(_) => "http_status",
            FetchError::Timeout => "timeout",
            FetchError::UnsupportedContent(_) => "unsupported_content",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageStatus {
    Ok,
    Error(FetchError),
}

// Represents the result of fetching a single page
#[derive(Debug, Clone)]
pub struct PageResult {
    /// The URL that was requested
    pub url: String,
    pub status: PageStatus,
    /// Text to run the extractors over (only set when status is Ok)
    pub content: Option<String>,
    /// Absolute http(s) links found on the page, in document order
    pub links: Vec<String>,
}

impl PageResult {
    #[cfg(test)]
    pub fn is_ok(&self) -> bool {
        matches!(self.status, PageStatus::Ok)
    }

    pub fn error(&self) -> Option<&FetchError> {
        match &self.status {
            PageStatus::Ok => None,
            PageStatus::Error(error) => Some(error),
        }
    }

    fn failed(url: &str, error: FetchError) -> Self {
        Self {
            url: url.to_string(),
            status: PageStatus::Error(error),
            content: None,
            links: Vec::new(),
        }
    }
}

// Downloads pages. Cheap to clone: reqwest's Client is reference counted
// and keeps one connection pool for the whole crawl.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    timeout: Duration,
}

impl Fetcher {
    pub fn new(timeout: Duration, user_agent: &str) -> reqwest::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .redirect(redirect::Policy::limited(5))
            .build()?;

        Ok(Self { client, timeout })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    // Fetches and parses one page.
    //
    // Links are resolved against the final URL (after redirects), so a
    // relative link on a redirected page points where the browser would go.
    pub async fn fetch(&self, url: &str) -> PageResult {
        match self.fetch_text(url).await {
            Ok((final_url, body)) => {
                let page = parse_page(&body, &final_url);
                PageResult {
                    url: url.to_string(),
                    status: PageStatus::Ok,
                    content: Some(page.text),
                    links: page.links,
                }
            }
            Err(error) => PageResult::failed(url, error),
        }
    }

    // GETs a URL and returns (final URL, body) if the body is text.
    pub async fn fetch_text(&self, url: &str) -> Result<(String, String), FetchError> {
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(categorize_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        if let Some(content_type) = content_type(&response) {
            if !is_text(&content_type) {
                return Err(FetchError::UnsupportedContent(content_type));
            }
        }

        let final_url = response.url().to_string();
        let body = response.text().await.map_err(categorize_error)?;
        Ok((final_url, body))
    }
}

fn content_type(response: &Response) -> Option<String> {
    response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim().to_ascii_lowercase())
        .filter(|v| !v.is_empty())
}

// text/html, text/plain, application/xhtml+xml...
// A missing content type is treated as text.
fn is_text(content_type: &str) -> bool {
    let mime = content_type.split(';').next().unwrap_or_default().trim();
    mime.starts_with("text/") || mime.ends_with("html") || mime.ends_with("+xml") || mime == "application/xml"
}

// Maps reqwest errors onto our taxonomy.
//
// reqwest reports a timeout the same way whether it hit while connecting or
// while reading the body; both count as Timeout.
fn categorize_error(error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout
    } else if error.is_redirect() {
        FetchError::Network("too many redirects".to_string())
    } else {
        FetchError::Network(error.to_string())
    }
}
