// src/format/mod.rs
// =============================================================================
// This module turns raw absolute URLs into their display form.
//
// Submodules:
// - query: splits a query string into tokens and orders them by key
//
// A URL without a query string is displayed as-is. A URL with one is shown
// as its path, followed by one tab-indented line per query parameter:
//
//   https://x.test/p?b=2&a=1
//
// becomes
//
//   https://x.test/p
//   	a=1
//   	b=2
// =============================================================================

mod query;

pub use query::sort_query_tokens;

// Formats a URL for output
//
// Parameters:
//   url: the raw absolute URL (borrowed, we never modify it)
//
// Returns: the formatted, possibly multi-line, entry. If the query string
// can't be split into key=value pairs the original URL comes back unchanged.
pub fn format_url(url: &str) -> String {
    // split_once splits at the FIRST '?', anything after belongs to the query
    let Some((path, query)) = url.split_once('?') else {
        return url.to_string();
    };

    match sort_query_tokens(query) {
        Some(tokens) => {
            let mut formatted = String::with_capacity(url.len() + tokens.len() * 2);
            formatted.push_str(path);
            for token in tokens {
                formatted.push_str("\n\t");
                formatted.push_str(token);
            }
            formatted
        }
        None => url.to_string(),
    }
}
