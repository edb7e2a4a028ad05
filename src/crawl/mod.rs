// src/crawl/mod.rs
// =============================================================================
// This module fetches one page and lists the links reachable from it.
//
// Submodules, leaf-first:
// - links:     the bounded, deduplicated list of collected links
// - tree:      the narrow view of the document the walker works on
// - validator: decides which nodes are links worth keeping
// - walker:    the breadth-first traversal
// - spider:    fetches the page and drives everything above
//
// Only one page is ever fetched: links found on it are listed, not followed.
// =============================================================================

pub mod links;
mod spider;
mod tree;
mod validator;
mod walker;

pub use spider::{spider_web, CrawlConfig, CrawlOutcome};
