// src/crawl/spider.rs
// =============================================================================
// The crawl itself: fetch one page, walk it, collect and sort its links.
//
// A crawl moves through these states:
//
//   Idle -> Fetching -> Succeeded   (links collected, sorted, printed)
//                    -> TimedOut    (nothing collected, empty list printed)
//                    -> Failed      (error reported, nothing printed)
//
// The fetch is the only thing that can time out. Its deadline is the
// requested timeout plus a fixed grace period for connection setup, and it
// covers connecting, redirects, and reading the body. Once the page is in
// memory the walk runs to completion.
//
// Rust concepts:
// - async/await: the fetch is the one await point of the whole program
// - Result<T, E> with a custom error enum (see src/error.rs)
// - Pattern guards: `Err(e) if e.is_timeout()` matches only some errors
// =============================================================================

use std::fmt;
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::{redirect, Client};
use scraper::Html;
use tracing::{error, info, warn};
use url::Url;

use super::links::LinkList;
use super::tree::{document_base, HtmlNode};
use super::walker::collect_links;
use crate::error::{CrawlError, Result};

/// Added to the caller's timeout to cover connection overhead
pub const GRACE_PERIOD: Duration = Duration::from_millis(1500);

/// Redirect hops followed before giving up
pub const MAX_REDIRECTS: usize = 20;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

// Validated settings for one crawl (built by the CLI, see src/cli.rs)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlConfig {
    pub root_url: String,
    pub max_urls: usize,
    pub timeout: Duration,
}

impl CrawlConfig {
    /// The fetch deadline: requested timeout plus the grace period
    pub fn deadline(&self) -> Duration {
        self.timeout + GRACE_PERIOD
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlState {
    Idle,
    Fetching,
    Succeeded,
    TimedOut,
    Failed,
}

impl fmt::Display for CrawlState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CrawlState::Idle => "idle",
            CrawlState::Fetching => "fetching",
            CrawlState::Succeeded => "succeeded",
            CrawlState::TimedOut => "timed out",
            CrawlState::Failed => "failed",
        };
        f.write_str(name)
    }
}

// How a crawl ended, when it didn't fail
//
// Both variants carry a list that should be printed.
#[derive(Debug)]
pub enum CrawlOutcome {
    Succeeded(LinkList),
    /// The fetch hit its deadline; the list is empty
    TimedOut(LinkList),
}

impl CrawlOutcome {
    pub fn links(&self) -> &LinkList {
        match self {
            CrawlOutcome::Succeeded(links) | CrawlOutcome::TimedOut(links) => links,
        }
    }

    pub fn state(&self) -> CrawlState {
        match self {
            CrawlOutcome::Succeeded(_) => CrawlState::Succeeded,
            CrawlOutcome::TimedOut(_) => CrawlState::TimedOut,
        }
    }
}

// A fetched page: where we ended up after redirects, and its HTML
struct FetchedPage {
    url: Url,
    html: String,
}

// Runs one crawl
//
// Returns:
//   Ok(Succeeded(links)) with the links sorted
//   Ok(TimedOut(empty list)) if the fetch ran out of time
//   Err(CrawlError) for any other failure
pub async fn spider_web(config: &CrawlConfig) -> Result<CrawlOutcome> {
    let mut state = CrawlState::Idle;

    let root = Url::parse(&config.root_url).map_err(|source| CrawlError::InvalidUrl {
        url: config.root_url.clone(),
        source,
    })?;

    enter(&mut state, CrawlState::Fetching);
    info!(
        url = %root,
        deadline_ms = config.deadline().as_millis() as u64,
        "fetching root page"
    );

    // The client (and its connection pool) lives only for this call
    let fetched = match build_client(config.deadline()) {
        Ok(client) => fetch_page(&client, root).await,
        Err(e) => Err(e.into()),
    };

    match fetched {
        Ok(page) => {
            let mut links = extract_links(&page.html, &page.url, config.max_urls);
            links.sort();
            enter(&mut state, CrawlState::Succeeded);
            info!(count = links.len(), "collected links");
            Ok(CrawlOutcome::Succeeded(links))
        }
        Err(CrawlError::Http(e)) if e.is_timeout() => {
            enter(&mut state, CrawlState::TimedOut);
            warn!("fetch exceeded its deadline: {}", e);
            Ok(CrawlOutcome::TimedOut(LinkList::with_capacity(config.max_urls)))
        }
        Err(e) => {
            enter(&mut state, CrawlState::Failed);
            error!("crawl aborted: {}", e);
            Err(e)
        }
    }
}

// Parses HTML and collects its links, in discovery order
//
// Parameters:
//   html: the page source
//   page_url: the page's final URL, used as the base for relative links
//     (a <base href> in the document takes precedence)
//   max_urls: how many links to collect at most
pub fn extract_links(html: &str, page_url: &Url, max_urls: usize) -> LinkList {
    let document = Html::parse_document(html);
    let base = document_base(&document, page_url);
    collect_links(Some(HtmlNode::root(&document, &base)), max_urls)
}

fn enter(state: &mut CrawlState, next: CrawlState) {
    info!(from = %state, to = %next, "crawl state changed");
    *state = next;
}

fn build_client(deadline: Duration) -> reqwest::Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(deadline)
        .redirect(redirect::Policy::limited(MAX_REDIRECTS))
        .build()
}

// Fetches the page and checks it is something we can parse
async fn fetch_page(client: &Client, url: Url) -> Result<FetchedPage> {
    let response = client.get(url).send().await?;

    // After redirects this is the URL of the page we actually got
    let final_url = response.url().clone();

    let status = response.status();
    if !status.is_success() {
        return Err(CrawlError::Status {
            url: final_url.to_string(),
            status: status.as_u16(),
        });
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    if let Some(content_type) = content_type {
        if !is_markup(&content_type) {
            return Err(CrawlError::UnsupportedContentType {
                url: final_url.to_string(),
                content_type,
            });
        }
    }

    let html = response.text().await?;
    Ok(FetchedPage {
        url: final_url,
        html,
    })
}

// HTML or XML, e.g. "text/html; charset=utf-8" or "application/xhtml+xml"
fn is_markup(content_type: &str) -> bool {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();

    mime.starts_with("text/")
        || mime == "application/xml"
        || (mime.starts_with("application/") && mime.ends_with("+xml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{
        matchers::{method, path},
        Mock, MockServer, ResponseTemplate,
    };

    fn config(root_url: String, max_urls: usize, timeout_ms: u64) -> CrawlConfig {
        CrawlConfig {
            root_url,
            max_urls,
            timeout: Duration::from_millis(timeout_ms),
        }
    }

    fn html(body: &str) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_raw(body.as_bytes().to_vec(), "text/html")
    }

    #[test]
    fn test_deadline_adds_grace_period() {
        let config = config("https://example.com".to_string(), 1, 250);
        assert_eq!(config.deadline(), Duration::from_millis(1750));
    }

    #[test]
    fn test_is_markup() {
        assert!(is_markup("text/html"));
        assert!(is_markup("text/html; charset=UTF-8"));
        assert!(is_markup("Text/Plain"));
        assert!(is_markup("application/xhtml+xml"));
        assert!(is_markup("application/xml"));
        assert!(!is_markup("image/png"));
        assert!(!is_markup("application/json"));
    }

    #[test]
    fn test_extract_links_from_html() {
        let page = Url::parse("https://example.com/docs/").unwrap();
        let links = extract_links(
            r##"<html><body>
                <a href="intro">Intro</a>
                <a href="#top">Top</a>
                <a href="https://other.test/search?q=rust&a=1">Search</a>
                <a href="intro">Intro again</a>
            </body></html>"##,
            &page,
            10,
        );
        assert_eq!(
            links.entries(),
            [
                "https://example.com/docs/intro",
                "https://other.test/search\n\ta=1\n\tq=rust",
            ]
        );
    }

    #[tokio::test]
    async fn test_crawl_collects_sorted_links() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(html(
                r##"<html><body>
                    <nav><a href="/zeta">Z</a></nav>
                    <a href="/alpha">A</a>
                    <a href="#section">Jump</a>
                    <p><a href="/mid?b=2&a=1">M</a><a href="/alpha">A again</a></p>
                </body></html>"##,
            ))
            .mount(&mock_server)
            .await;

        let outcome = spider_web(&config(mock_server.uri(), 10, 1000)).await.unwrap();
        assert_eq!(outcome.state(), CrawlState::Succeeded);

        let base = mock_server.uri();
        assert_eq!(
            outcome.links().entries(),
            [
                format!("{}/alpha", base),
                format!("{}/mid\n\ta=1\n\tb=2", base),
                format!("{}/zeta", base),
            ]
        );
    }

    #[tokio::test]
    async fn test_crawl_respects_max_urls() {
        let mock_server = MockServer::start().await;

        let mut body = String::from("<html><body>");
        for i in 0..10 {
            body.push_str(&format!(r#"<a href="/page{}">Page</a>"#, i));
        }
        body.push_str("</body></html>");

        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(html(&body))
            .mount(&mock_server)
            .await;

        let outcome = spider_web(&config(mock_server.uri(), 3, 1000)).await.unwrap();
        let base = mock_server.uri();
        assert_eq!(
            outcome.links().entries(),
            [
                format!("{}/page0", base),
                format!("{}/page1", base),
                format!("{}/page2", base),
            ]
        );
    }

    #[tokio::test]
    async fn test_relative_links_resolve_against_redirect_target() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/old"))
            .respond_with(ResponseTemplate::new(301).insert_header("location", "/new/"))
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/new/"))
            .respond_with(html(r#"<a href="page">Page</a>"#))
            .mount(&mock_server)
            .await;

        let root = format!("{}/old", mock_server.uri());
        let outcome = spider_web(&config(root, 10, 1000)).await.unwrap();
        assert_eq!(
            outcome.links().entries(),
            [format!("{}/new/page", mock_server.uri())]
        );
    }

    #[tokio::test]
    async fn test_base_element_overrides_page_url() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(html(
                r#"<html><head><base href="https://cdn.example.com/docs/"></head>
                   <body><a href="guide">Guide</a></body></html>"#,
            ))
            .mount(&mock_server)
            .await;

        let outcome = spider_web(&config(mock_server.uri(), 10, 1000)).await.unwrap();
        assert_eq!(
            outcome.links().entries(),
            ["https://cdn.example.com/docs/guide"]
        );
    }

    #[tokio::test]
    async fn test_slow_server_times_out_with_empty_list() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(
                html(r#"<a href="/never">Never</a>"#).set_delay(Duration::from_secs(5)),
            )
            .mount(&mock_server)
            .await;

        // Deadline is 1 ms + the grace period
        let outcome = spider_web(&config(mock_server.uri(), 10, 1)).await.unwrap();
        assert_eq!(outcome.state(), CrawlState::TimedOut);
        assert!(outcome.links().is_empty());
    }

    #[tokio::test]
    async fn test_not_found_is_a_failure() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let root = format!("{}/missing", mock_server.uri());
        let err = spider_web(&config(root, 10, 1000)).await.unwrap_err();
        assert!(matches!(err, CrawlError::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_binary_content_is_a_failure() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/logo.png"))
            .respond_with(
                ResponseTemplate::new(200).set_body_raw(vec![0x89, 0x50, 0x4e, 0x47], "image/png"),
            )
            .mount(&mock_server)
            .await;

        let root = format!("{}/logo.png", mock_server.uri());
        let err = spider_web(&config(root, 10, 1000)).await.unwrap_err();
        assert!(matches!(err, CrawlError::UnsupportedContentType { .. }));
    }

    #[tokio::test]
    async fn test_unparseable_root_url() {
        let err = spider_web(&config("http://".to_string(), 10, 1000))
            .await
            .unwrap_err();
        assert!(matches!(err, CrawlError::InvalidUrl { .. }));
    }

    #[tokio::test]
    async fn test_connection_refused_is_a_failure() {
        // Port 1 (tcpmux) is essentially never listening
        let err = spider_web(&config("http://127.0.0.1:1/".to_string(), 10, 1000))
            .await
            .unwrap_err();
        assert!(matches!(err, CrawlError::Http(_)));
    }
}
