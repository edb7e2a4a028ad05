// src/error.rs
// =============================================================================
// Error types for the crawl.
//
// A timeout is NOT in here: it is an expected outcome of a crawl (see
// crawl::CrawlOutcome::TimedOut), not a failure. Everything in this enum
// aborts the crawl and prints nothing.
//
// Rust concepts:
// - thiserror: derive macro that implements std::error::Error and Display
// - #[from]: auto-generates From<reqwest::Error> so `?` converts for us
// =============================================================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrawlError {
    /// The root URL could not be parsed
    #[error("invalid root url '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// DNS failure, connection refused, malformed response, too many redirects...
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered, but not with a 2xx status
    #[error("HTTP {status} fetching {url}")]
    Status { url: String, status: u16 },

    /// The server answered with something that is not HTML or XML
    #[error("unsupported content type '{content_type}' at {url}")]
    UnsupportedContentType { url: String, content_type: String },
}

pub type Result<T> = std::result::Result<T, CrawlError>;
